//! Shared helpers for CLI commands
//!
//! Business flags common to `generate` and `palette`, and writing a
//! generated theme to the configured output locations.

use brandforge_core::{
    config::OutputSettings, error::Result, types::slugify, BusinessProfile, GeneratedTheme,
};
use clap::Args;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Business information flags
#[derive(Args, Debug, Clone, Default)]
pub struct BusinessArgs {
    /// Business name
    #[arg(long)]
    pub business_name: String,

    /// Industry
    #[arg(long)]
    pub industry: String,

    /// Short description of the business
    #[arg(long, default_value = "")]
    pub business_description: String,

    /// Target audience
    #[arg(long, default_value = "")]
    pub target_audience: String,

    /// Comma-separated list of services
    #[arg(long, default_value = "")]
    pub services: String,

    #[arg(long, default_value = "")]
    pub contact_email: String,

    #[arg(long, default_value = "")]
    pub contact_phone: String,

    #[arg(long, default_value = "")]
    pub website_domain: String,

    /// File-name slug for outputs (defaults to the slugified business name)
    #[arg(long)]
    pub client_name: Option<String>,

    /// JSON produced by logo color extraction
    #[arg(long)]
    pub logo_colors: Option<String>,

    #[arg(long)]
    pub logo_path: Option<String>,

    #[arg(long)]
    pub primary_color: Option<String>,

    #[arg(long)]
    pub secondary_color: Option<String>,

    #[arg(long)]
    pub accent_color: Option<String>,
}

impl BusinessArgs {
    pub fn into_profile(self) -> BusinessProfile {
        let mut profile = BusinessProfile::new(self.business_name, self.industry);
        if let Some(client_name) = self.client_name.filter(|c| !c.trim().is_empty()) {
            profile.client_name = slugify(&client_name);
        }
        profile.business_description = self.business_description;
        profile.target_audience = self.target_audience;
        profile.services = BusinessProfile::parse_services(&self.services);
        profile.contact_email = self.contact_email;
        profile.contact_phone = self.contact_phone;
        profile.website_domain = self.website_domain;
        profile.logo_colors = self.logo_colors;
        profile.logo_path = self.logo_path;
        profile.primary_color = self.primary_color;
        profile.secondary_color = self.secondary_color;
        profile.accent_color = self.accent_color;
        profile
    }
}

/// Write the client config, append the theme CSS, and write metadata.
///
/// Returns the paths touched, in the order written. The metadata file
/// records all of them.
pub fn persist_outputs(theme: &mut GeneratedTheme, output: &OutputSettings) -> Result<Vec<PathBuf>> {
    let client = &theme.metadata.client_name;
    fs::create_dir_all(&output.clients_dir)?;

    let config_path = output.clients_dir.join(format!("{}.js", client));
    fs::write(&config_path, &theme.client_config)?;
    debug!("Wrote client config to {}", config_path.display());

    append_css(&output.themes_css, &theme.theme_css)?;
    debug!("Appended theme CSS to {}", output.themes_css.display());

    let metadata_path = output
        .clients_dir
        .join(format!("{}-metadata.json", client));
    theme.metadata.files_created = vec![
        config_path.clone(),
        output.themes_css.clone(),
        metadata_path.clone(),
    ];
    let json = serde_json::to_string_pretty(&theme.metadata)?;
    fs::write(&metadata_path, json)?;

    info!("Saved outputs for {}", client);
    Ok(theme.metadata.files_created.clone())
}

fn append_css(path: &Path, css: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    write!(file, "\n{}", css)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandforge_core::ThemeGenerator;
    use tempfile::TempDir;

    fn args() -> BusinessArgs {
        BusinessArgs {
            business_name: "Harbor Ledger".to_string(),
            industry: "Finance".to_string(),
            services: "Bookkeeping, ,Payroll".to_string(),
            primary_color: Some("#1e3a8a".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_into_profile() {
        let profile = args().into_profile();
        assert_eq!(profile.client_name, "harbor-ledger");
        assert_eq!(profile.services, vec!["Bookkeeping", "Payroll"]);
        assert_eq!(profile.primary_color.as_deref(), Some("#1e3a8a"));

        let mut custom = args();
        custom.client_name = Some("Harbor HQ".to_string());
        assert_eq!(custom.into_profile().client_name, "harbor-hq");
    }

    #[test]
    fn test_persist_outputs() {
        let dir = TempDir::new().unwrap();
        let output = OutputSettings {
            clients_dir: dir.path().join("clients"),
            themes_css: dir.path().join("styles").join("client-themes.css"),
        };
        let mut theme = ThemeGenerator::offline(&args().into_profile());

        let files = persist_outputs(&mut theme, &output).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| f.exists()));

        let config = fs::read_to_string(dir.path().join("clients/harbor-ledger.js")).unwrap();
        assert_eq!(config, theme.client_config);

        let metadata: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("clients/harbor-ledger-metadata.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(metadata["client_name"], "harbor-ledger");
        assert_eq!(metadata["files_created"].as_array().unwrap().len(), 3);

        // A second theme is appended, not overwritten
        persist_outputs(&mut theme, &output).unwrap();
        let css = fs::read_to_string(&output.themes_css).unwrap();
        assert_eq!(css.matches(".theme-harbor-ledger {").count(), 2);
    }
}

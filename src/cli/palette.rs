//! Palette preview command
//!
//! Resolves colors offline and prints them without touching the service
//! or the output directories.

use brandforge_core::{
    color::PaletteScales, error::Result, resolve_colors, stylesheet::render_theme_css,
    BusinessProfile,
};
use chrono::Utc;
use clap::ValueEnum;
use serde_json::json;

use super::helpers::BusinessArgs;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteFormat {
    /// Palette, sources, scales and harmony report
    #[default]
    Json,
    /// The theme stylesheet block
    Css,
}

/// Handle the palette command
pub fn handle(business: BusinessArgs, format: PaletteFormat) -> Result<()> {
    let profile = business.into_profile();
    println!("{}", render(&profile, format)?);
    Ok(())
}

fn render(profile: &BusinessProfile, format: PaletteFormat) -> Result<String> {
    let resolution = resolve_colors(profile);
    match format {
        PaletteFormat::Json => {
            let scales = PaletteScales::from_palette(&resolution.palette);
            let report = json!({
                "palette": resolution.palette,
                "sources": resolution.sources,
                "harmony": resolution.harmony,
                "scales": scales,
            });
            Ok(serde_json::to_string_pretty(&report)?)
        }
        PaletteFormat::Css => Ok(render_theme_css(profile, &resolution.palette, Utc::now())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> BusinessProfile {
        let mut profile = BusinessProfile::new("Pine & Pour", "Coffee Roastery");
        profile.primary_color = Some("#112233".to_string());
        profile.secondary_color = Some("not-a-color".to_string());
        profile
    }

    #[test]
    fn test_render_json() {
        let output = render(&profile(), PaletteFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["palette"]["primary"], "#112233");
        assert_eq!(value["sources"]["primary"], "user");
        assert_eq!(value["sources"]["secondary"], "heuristic");
        assert!(value["harmony"].is_object());
        assert!(value["scales"]["primary"].is_object());
    }

    #[test]
    fn test_render_css() {
        let output = render(&profile(), PaletteFormat::Css).unwrap();
        assert!(output.contains(".theme-pine-pour {"));
        assert!(output.contains("--color-primary-500: #112233;"));
    }
}

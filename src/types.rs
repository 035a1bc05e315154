//! Core data types for the Brandforge theme generator
//!
//! This module defines the business profile supplied once per run and the
//! four-role palette that color resolution produces. These types are shared
//! by the color engine, prompt construction, and stylesheet emission.

use crate::color::{fnv1a_32, HexColor};
use serde::{Deserialize, Serialize};

/// A palette role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    Neutral,
}

impl ColorRole {
    /// Roles resolved independently from competing sources
    pub const RESOLVED: [ColorRole; 3] = [ColorRole::Primary, ColorRole::Secondary, ColorRole::Accent];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorRole::Primary => "primary",
            ColorRole::Secondary => "secondary",
            ColorRole::Accent => "accent",
            ColorRole::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for ColorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four-role brand palette
///
/// `neutral` tracks `secondary` unless a caller sets it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: HexColor,
    pub secondary: HexColor,
    pub accent: HexColor,
    pub neutral: HexColor,
}

impl Palette {
    pub fn new(primary: HexColor, secondary: HexColor, accent: HexColor) -> Self {
        Self {
            primary,
            secondary,
            accent,
            neutral: secondary,
        }
    }

    pub fn get(&self, role: ColorRole) -> HexColor {
        match role {
            ColorRole::Primary => self.primary,
            ColorRole::Secondary => self.secondary,
            ColorRole::Accent => self.accent,
            ColorRole::Neutral => self.neutral,
        }
    }
}

/// Business facts supplied once per run; never mutated by the pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessProfile {
    pub business_name: String,

    /// Slug used for file names and the `.theme-<client>` class
    pub client_name: String,

    pub industry: String,
    pub business_description: String,
    pub target_audience: String,
    pub services: Vec<String>,
    pub contact_email: String,
    pub contact_phone: String,
    pub website_domain: String,

    /// Explicit brand colors (highest priority when valid)
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,

    /// Raw JSON from logo color extraction
    pub logo_colors: Option<String>,

    pub logo_path: Option<String>,
}

impl BusinessProfile {
    pub fn new(business_name: impl Into<String>, industry: impl Into<String>) -> Self {
        let business_name = business_name.into();
        Self {
            client_name: slugify(&business_name),
            business_name,
            industry: industry.into(),
            ..Default::default()
        }
    }

    /// Split a comma-separated services string, dropping blank entries
    pub fn parse_services(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// User-specified color for a role, if any non-blank value was given
    pub fn user_color(&self, role: ColorRole) -> Option<&str> {
        let value = match role {
            ColorRole::Primary => self.primary_color.as_deref(),
            ColorRole::Secondary => self.secondary_color.as_deref(),
            ColorRole::Accent => self.accent_color.as_deref(),
            ColorRole::Neutral => None,
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn has_user_colors(&self) -> bool {
        ColorRole::RESOLVED
            .iter()
            .any(|role| self.user_color(*role).is_some())
    }
}

/// Lowercase, with runs of non-alphanumerics collapsed to `-`.
///
/// Names with no ASCII letters or digits get `client-<fnv1a hex>` so file
/// names and CSS classes are never empty.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        return format!("client-{:08x}", fnv1a_32(input));
    }
    slug.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_neutral_defaults_to_secondary() {
        let palette = Palette::new(
            HexColor::from_u32(0x112233),
            HexColor::from_u32(0x445566),
            HexColor::from_u32(0x778899),
        );
        assert_eq!(palette.neutral, palette.secondary);
        assert_eq!(palette.get(ColorRole::Neutral).to_string(), "#445566");
    }

    #[test]
    fn test_parse_services() {
        assert_eq!(
            BusinessProfile::parse_services(" Audits, ,Tax prep ,Payroll"),
            vec!["Audits", "Tax prep", "Payroll"]
        );
        assert!(BusinessProfile::parse_services("").is_empty());
    }

    #[test]
    fn test_user_color_ignores_blank() {
        let mut profile = BusinessProfile::new("Acme", "Retail");
        profile.primary_color = Some("  ".to_string());
        profile.accent_color = Some(" #ff0000 ".to_string());

        assert_eq!(profile.user_color(ColorRole::Primary), None);
        assert_eq!(profile.user_color(ColorRole::Accent), Some("#ff0000"));
        assert!(profile.has_user_colors());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Tech 10 Solutions, Inc."), "tech-10-solutions-inc");
        assert_eq!(slugify("--Crown--"), "crown");
        assert_eq!(slugify("Café Ünïcode"), "caf-n-code");
        assert_eq!(BusinessProfile::new("Blue Fern", "Retail").client_name, "blue-fern");
    }

    #[test]
    fn test_slugify_without_ascii_falls_back_to_hash() {
        let slug = slugify("東京カフェ");
        assert_eq!(slug, format!("client-{:08x}", fnv1a_32("東京カフェ")));
        assert_eq!(slug.len(), "client-".len() + 8);
        assert_ne!(slug, slugify("大阪カフェ"));
        assert_eq!(slugify("---"), format!("client-{:08x}", fnv1a_32("---")));

        let profile = BusinessProfile::new("東京カフェ", "Hospitality");
        assert_eq!(profile.client_name, slug);
    }
}

//! Final palette from user, extracted, and heuristic colors
//!
//! Each of primary/secondary/accent is resolved on its own:
//! a valid user color wins, then a valid extracted color (unless the
//! extraction itself came from heuristics), then the heuristic color.
//! `neutral` always mirrors the resolved secondary.

use super::convert::HexColor;
use super::extracted::ExtractedColors;
use super::harmony::{validate_harmony, HarmonyReport};
use super::heuristic::colors_from_business;
use crate::types::{BusinessProfile, ColorRole, Palette};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Where a resolved color came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSource {
    User,
    Extracted,
    Heuristic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSources {
    pub primary: ColorSource,
    pub secondary: ColorSource,
    pub accent: ColorSource,
}

/// Outcome of [`resolve_colors`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorResolution {
    pub palette: Palette,
    pub sources: RoleSources,
    /// Present when the profile supplied at least one user color
    pub harmony: Option<HarmonyReport>,
}

pub fn resolve_colors(profile: &BusinessProfile) -> ColorResolution {
    let extracted = profile
        .logo_colors
        .as_deref()
        .filter(|json| !json.trim().is_empty())
        .and_then(|json| match ExtractedColors::parse(json) {
            Ok(colors) if colors.heuristic => {
                debug!("Ignoring extracted colors flagged as business-derived");
                None
            }
            Ok(colors) => Some(colors),
            Err(e) => {
                warn!("Could not parse logo colors, ignoring them: {}", e);
                None
            }
        });
    let heuristic = colors_from_business(profile);

    let resolve = |role: ColorRole| -> (HexColor, ColorSource) {
        if let Some(raw) = profile.user_color(role) {
            match HexColor::parse(raw) {
                Ok(color) => {
                    debug!("{} color {} from user input", role, color);
                    return (color, ColorSource::User);
                }
                Err(e) => warn!("Ignoring user {} color: {}", role, e),
            }
        }

        if let Some(color) = extracted.as_ref().and_then(|colors| colors.role(role)) {
            debug!("{} color {} from logo extraction", role, color);
            return (color, ColorSource::Extracted);
        }

        let color = heuristic.get(role);
        debug!("{} color {} from business heuristics", role, color);
        (color, ColorSource::Heuristic)
    };

    let (primary, primary_source) = resolve(ColorRole::Primary);
    let (secondary, secondary_source) = resolve(ColorRole::Secondary);
    let (accent, accent_source) = resolve(ColorRole::Accent);
    let palette = Palette::new(primary, secondary, accent);

    let harmony = profile.has_user_colors().then(|| {
        let report = validate_harmony(
            &palette.primary.to_string(),
            &palette.secondary.to_string(),
            &palette.accent.to_string(),
        );
        info!(
            "Palette harmony score {}/10 ({} warnings)",
            report.harmony_score,
            report.warnings.len()
        );
        report
    });

    ColorResolution {
        palette,
        sources: RoleSources {
            primary: primary_source,
            secondary: secondary_source,
            accent: accent_source,
        },
        harmony,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tech_profile() -> BusinessProfile {
        BusinessProfile::new("Tech 10", "Technology & Telecommunications")
    }

    #[test]
    fn test_user_color_beats_extraction() {
        let mut profile = tech_profile();
        profile.primary_color = Some("#112233".to_string());
        profile.logo_colors = Some(r##"{"palette": {"primary": "#445566"}}"##.to_string());

        let resolution = resolve_colors(&profile);
        assert_eq!(resolution.palette.primary.to_string(), "#112233");
        assert_eq!(resolution.sources.primary, ColorSource::User);
        assert!(resolution.harmony.is_some());
    }

    #[test]
    fn test_user_color_gets_hash_prefix() {
        let mut profile = tech_profile();
        profile.accent_color = Some("FCBC7A".to_string());
        assert_eq!(resolve_colors(&profile).palette.accent.to_string(), "#fcbc7a");
    }

    #[test]
    fn test_extraction_beats_heuristic() {
        let mut profile = tech_profile();
        profile.logo_colors = Some(r##"{"palette": {"primary": "#445566"}}"##.to_string());

        let resolution = resolve_colors(&profile);
        assert_eq!(resolution.palette.primary.to_string(), "#445566");
        assert_eq!(resolution.sources.primary, ColorSource::Extracted);
        // Roles missing from the extraction fall through independently
        assert_eq!(resolution.sources.secondary, ColorSource::Heuristic);
        assert!(resolution.harmony.is_none());
    }

    #[test]
    fn test_heuristic_extraction_is_not_authoritative() {
        let mut profile = tech_profile();
        profile.logo_colors =
            Some(r##"{"source": "heuristic", "palette": {"primary": "#445566"}}"##.to_string());

        let resolution = resolve_colors(&profile);
        assert_eq!(
            resolution.palette.primary,
            colors_from_business(&profile).primary
        );
        assert_eq!(resolution.sources.primary, ColorSource::Heuristic);
    }

    #[test]
    fn test_invalid_user_color_falls_through() {
        let mut profile = tech_profile();
        profile.primary_color = Some("#12345".to_string());
        profile.logo_colors = Some(r##"{"dominantColors": ["#445566", "#111111", "#eeeeee"]}"##.to_string());

        let resolution = resolve_colors(&profile);
        assert_eq!(resolution.palette.primary.to_string(), "#445566");
        assert_eq!(resolution.sources.primary, ColorSource::Extracted);
        // A user color was supplied, even if unusable
        assert!(resolution.harmony.is_some());
    }

    #[test]
    fn test_neutral_mirrors_secondary() {
        let mut profile = tech_profile();
        profile.secondary_color = Some("#333333".to_string());
        profile.logo_colors = Some(r##"{"palette": {"neutral": "#999999"}}"##.to_string());

        let palette = resolve_colors(&profile).palette;
        assert_eq!(palette.neutral.to_string(), "#333333");
    }

    #[test]
    fn test_malformed_extraction_is_ignored() {
        let mut profile = tech_profile();
        profile.logo_colors = Some("not json".to_string());
        let resolution = resolve_colors(&profile);
        assert_eq!(resolution.palette, colors_from_business(&profile));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let mut profile = BusinessProfile::new("Quiet Harbor", "Hospitality");
        profile.logo_colors = Some(r##"{"palette": {"accent": "#fcbc7a"}}"##.to_string());
        assert_eq!(resolve_colors(&profile), resolve_colors(&profile));
    }
}

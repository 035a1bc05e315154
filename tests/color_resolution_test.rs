//! Palette resolution across user, extracted and heuristic sources

mod common;

use brandforge_core::{
    color::{colors_from_business, ColorSource},
    resolve_colors, validate_harmony, BusinessProfile,
};
use common::{extracted_palette, harbor_profile};

#[test]
fn test_user_color_beats_extracted() {
    let mut profile = harbor_profile();
    profile.primary_color = Some("#112233".to_string());
    profile.logo_colors = Some(extracted_palette("#445566", "#cbd5e1", "#f59e0b"));

    let resolution = resolve_colors(&profile);
    assert_eq!(resolution.palette.primary.to_string(), "#112233");
    assert_eq!(resolution.sources.primary, ColorSource::User);

    // Roles without a user color still take the extraction
    assert_eq!(resolution.palette.secondary.to_string(), "#cbd5e1");
    assert_eq!(resolution.sources.secondary, ColorSource::Extracted);
    assert!(resolution.harmony.is_some());
}

#[test]
fn test_extracted_beats_heuristic() {
    let mut profile = harbor_profile();
    profile.logo_colors = Some(extracted_palette("#445566", "#cbd5e1", "#f59e0b"));

    let resolution = resolve_colors(&profile);
    assert_eq!(resolution.palette.primary.to_string(), "#445566");
    assert_eq!(resolution.sources.primary, ColorSource::Extracted);
    assert!(resolution.harmony.is_none());
}

#[test]
fn test_heuristic_when_nothing_else() {
    let profile = harbor_profile();
    let resolution = resolve_colors(&profile);

    assert_eq!(resolution.palette, colors_from_business(&profile));
    assert_eq!(resolution.palette.primary.to_string(), "#1e3a8a");
    assert_eq!(resolution.sources.accent, ColorSource::Heuristic);
}

#[test]
fn test_heuristic_extraction_is_not_authoritative() {
    let mut profile = harbor_profile();
    profile.logo_colors = Some(
        r##"{"source": "heuristic", "palette": {"primary": "#445566", "secondary": "#cbd5e1", "accent": "#f59e0b"}}"##
            .to_string(),
    );

    let resolution = resolve_colors(&profile);
    assert_eq!(resolution.palette.primary.to_string(), "#1e3a8a");
    assert_eq!(resolution.sources.primary, ColorSource::Heuristic);
}

#[test]
fn test_invalid_user_color_falls_through() {
    let mut profile = harbor_profile();
    profile.primary_color = Some("#12345".to_string());
    profile.accent_color = Some("f97316".to_string());

    let resolution = resolve_colors(&profile);
    assert_eq!(resolution.sources.primary, ColorSource::Heuristic);
    assert_eq!(resolution.palette.accent.to_string(), "#f97316");
    assert_eq!(resolution.sources.accent, ColorSource::User);
}

#[test]
fn test_malformed_extraction_is_ignored() {
    let mut profile = harbor_profile();
    profile.logo_colors = Some("{not json".to_string());

    let resolution = resolve_colors(&profile);
    assert_eq!(resolution.palette, colors_from_business(&profile));
}

#[test]
fn test_neutral_mirrors_secondary() {
    let mut profile = harbor_profile();
    profile.secondary_color = Some("#94a3b8".to_string());

    let palette = resolve_colors(&profile).palette;
    assert_eq!(palette.neutral, palette.secondary);
    assert_eq!(palette.neutral.to_string(), "#94a3b8");
}

#[test]
fn test_resolution_is_deterministic() {
    let mut profile = BusinessProfile::new("Quillfeather Atelier", "Bookbinding");
    profile.logo_colors = Some(extracted_palette("#zzzzzz", "#cbd5e1", "#f59e0b"));

    let first = resolve_colors(&profile);
    let second = resolve_colors(&profile);
    assert_eq!(first, second);
    assert_eq!(first.sources.primary, ColorSource::Heuristic);
}

#[test]
fn test_dark_monochrome_harmony() {
    let report = validate_harmony("#000000", "#010101", "#020202");

    assert!(report.warnings.iter().any(|w| w.contains("too dark")));
    assert!(report.warnings.iter().any(|w| w.contains("too similar")));
    assert!(report.warnings.iter().any(|w| w.contains("low contrast overall")));
    assert!(report.harmony_score <= 7);
    assert!(!report.accessible);
}

//! Advisory scoring of how well primary, secondary and accent work together
//!
//! The report never blocks palette resolution; it only annotates it.

use super::convert::{hsl_to_hex, HexColor, Hsl};
use serde::Serialize;
use tracing::warn;

/// Substitute for an unparseable primary
const DEFAULT_PRIMARY: HexColor = HexColor::from_u32(0x2563eb);

const MIN_PRIMARY_LIGHTNESS: f64 = 20.0;
const MIN_LIGHTNESS_GAP: f64 = 15.0;
const MIN_ACCENT_LIGHTNESS: f64 = 50.0;
const MIN_HUE_SPREAD: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarmonyReport {
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    /// `10 - warnings`, floored at 0
    pub harmony_score: u8,
    /// False when any warning concerns accessibility
    pub accessible: bool,
}

#[derive(Default)]
struct Findings {
    warnings: Vec<String>,
    suggestions: Vec<String>,
    accessibility_issue: bool,
}

impl Findings {
    fn note(&mut self, warning: String) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    fn flag(&mut self, warning: String, suggestion: &str) {
        self.note(warning);
        self.suggestions.push(suggestion.to_string());
    }

    fn into_report(self) -> HarmonyReport {
        let harmony_score = 10usize.saturating_sub(self.warnings.len()) as u8;
        HarmonyReport {
            warnings: self.warnings,
            suggestions: self.suggestions,
            harmony_score,
            accessible: !self.accessibility_issue,
        }
    }
}

/// Complement of `primary`, lifted to at least 70% lightness
pub fn complementary_accent(primary: &Hsl) -> HexColor {
    hsl_to_hex(primary.h + 180.0, primary.s, (primary.l + 20.0).max(70.0))
}

pub fn validate_harmony(primary: &str, secondary: &str, accent: &str) -> HarmonyReport {
    let mut findings = Findings::default();

    let primary = HexColor::parse(primary).unwrap_or_else(|_| {
        findings.note(format!(
            "Primary color '{}' is not a valid hex color; substituted {}",
            primary, DEFAULT_PRIMARY
        ));
        DEFAULT_PRIMARY
    });
    let p = primary.to_hsl();

    let secondary = HexColor::parse(secondary).unwrap_or_else(|_| {
        findings.note(format!(
            "Secondary color '{}' is not a valid hex color; fell back to primary {}",
            secondary, primary
        ));
        primary
    });
    let s = secondary.to_hsl();

    let accent = HexColor::parse(accent).unwrap_or_else(|_| {
        let complement = complementary_accent(&p);
        findings.note(format!(
            "Accent color '{}' is not a valid hex color; substituted complementary {}",
            accent, complement
        ));
        complement
    });
    let a = accent.to_hsl();

    if p.l < MIN_PRIMARY_LIGHTNESS {
        findings.flag(
            format!(
                "Primary color {} is too dark for accessibility ({:.0}% lightness)",
                primary, p.l
            ),
            "Lighten the primary color above 20% lightness so text and buttons stay legible",
        );
        findings.accessibility_issue = true;
    }

    if (p.l - s.l).abs() < MIN_LIGHTNESS_GAP {
        findings.flag(
            format!(
                "Primary {} and secondary {} are too similar, low distinction ({:.0}% vs {:.0}% lightness)",
                primary, secondary, p.l, s.l
            ),
            "Widen the lightness gap between primary and secondary to at least 15%",
        );
    }

    if a.l < MIN_ACCENT_LIGHTNESS {
        findings.flag(
            format!(
                "Accent color {} is not vibrant enough for calls-to-action ({:.0}% lightness)",
                accent, a.l
            ),
            "Use an accent of 50% lightness or more for buttons and highlights",
        );
    }

    if (p.h - s.h).abs() < MIN_HUE_SPREAD && (p.h - a.h).abs() < MIN_HUE_SPREAD {
        findings.flag(
            "Primary, secondary and accent hues are within 30 degrees: colors too similar, low contrast overall"
                .to_string(),
            "Take the secondary or accent from another hue family, such as the primary's complement",
        );
    }

    findings.into_report()
}

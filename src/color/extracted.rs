//! Colors extracted from a logo image by an upstream analysis step
//!
//! Three JSON shapes are accepted, tried in order: an explicit `palette`
//! object, a `dominantColors` list (3+ entries), or `raw` swatches.

use super::convert::HexColor;
use crate::error::{Result, ThemeError};
use crate::types::ColorRole;
use serde::Deserialize;
use tracing::debug;

/// `source` values marking an extraction as derived from the business
/// heuristics rather than a real image
const HEURISTIC_SOURCES: [&str; 4] = ["heuristic", "business", "business_heuristic", "business-heuristic"];

#[derive(Debug, Default, Deserialize)]
struct RawExtraction {
    palette: Option<RolePalette>,
    #[serde(rename = "dominantColors")]
    dominant_colors: Option<Vec<Option<String>>>,
    raw: Option<RawSwatches>,
    source: Option<String>,
    heuristic: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct RolePalette {
    primary: Option<String>,
    secondary: Option<String>,
    accent: Option<String>,
    neutral: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSwatches {
    vibrant: Option<String>,
    muted: Option<String>,
    light_vibrant: Option<String>,
    dark_muted: Option<String>,
}

/// Per-role colors from an extraction. Invalid entries are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedColors {
    pub primary: Option<HexColor>,
    pub secondary: Option<HexColor>,
    pub accent: Option<HexColor>,
    pub neutral: Option<HexColor>,

    /// Extraction came from business heuristics, not an image
    pub heuristic: bool,
}

impl ExtractedColors {
    pub fn parse(json: &str) -> Result<Self> {
        let raw: RawExtraction = serde_json::from_str(json)
            .map_err(|e| ThemeError::ContentParse(format!("logo colors: {}", e)))?;

        let heuristic = raw.heuristic.unwrap_or(false)
            || raw.source.as_deref().map_or(false, |source| {
                HEURISTIC_SOURCES
                    .iter()
                    .any(|marker| source.trim().eq_ignore_ascii_case(marker))
            });

        let [primary, secondary, accent, neutral] = if let Some(palette) = raw.palette {
            [palette.primary, palette.secondary, palette.accent, palette.neutral]
        } else if let Some(dominant) = raw.dominant_colors.filter(|d| d.len() >= 3) {
            let mut dominant = dominant.into_iter();
            [
                dominant.next().flatten(),
                dominant.next().flatten(),
                dominant.next().flatten(),
                dominant.next().flatten(),
            ]
        } else if let Some(raw) = raw.raw {
            [raw.vibrant, raw.muted, raw.light_vibrant, raw.dark_muted]
        } else {
            [None, None, None, None]
        };

        Ok(Self {
            primary: valid(ColorRole::Primary, primary),
            secondary: valid(ColorRole::Secondary, secondary),
            accent: valid(ColorRole::Accent, accent),
            neutral: valid(ColorRole::Neutral, neutral),
            heuristic,
        })
    }

    pub fn role(&self, role: ColorRole) -> Option<HexColor> {
        match role {
            ColorRole::Primary => self.primary,
            ColorRole::Secondary => self.secondary,
            ColorRole::Accent => self.accent,
            ColorRole::Neutral => self.neutral,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
            && self.secondary.is_none()
            && self.accent.is_none()
            && self.neutral.is_none()
    }
}

fn valid(role: ColorRole, value: Option<String>) -> Option<HexColor> {
    let value = value?;
    match HexColor::parse(value.trim()) {
        Ok(color) => Some(color),
        Err(e) => {
            debug!("Dropping extracted {} color: {}", role, e);
            None
        }
    }
}

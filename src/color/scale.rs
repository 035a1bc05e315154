//! Eleven-step shade ramps (`50`..`950`) derived from a single base color

use super::convert::{hsl_to_hex, HexColor};
use crate::types::Palette;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Shade keys from lightest to darkest
pub const SHADE_KEYS: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// (shade, target lightness, minimum share of the gap between base and white)
const LIGHTER: [(u16, f64, f64); 5] = [
    (50, 95.0, 0.9),
    (100, 90.0, 0.8),
    (200, 80.0, 0.6),
    (300, 65.0, 0.3),
    (400, 50.0, 0.06),
];

/// (shade, target lightness, maximum fraction of base lightness)
const DARKER: [(u16, f64, f64); 5] = [
    (600, 40.0, 0.94),
    (700, 30.0, 0.75),
    (800, 20.0, 0.5),
    (900, 12.0, 0.3),
    (950, 6.0, 0.15),
];

/// Slate ramp used when the base color cannot be parsed
const FALLBACK: [(u16, &str); 10] = [
    (50, "#f8fafc"),
    (100, "#f1f5f9"),
    (200, "#e2e8f0"),
    (300, "#cbd5e1"),
    (400, "#94a3b8"),
    (600, "#475569"),
    (700, "#334155"),
    (800, "#1e293b"),
    (900, "#0f172a"),
    (950, "#020617"),
];

/// Mapping from shade key to color text.
///
/// Values are canonical hex except `500` of a fallback scale, which holds
/// the caller's raw input verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShadeScale {
    shades: BTreeMap<u16, String>,
    #[serde(skip)]
    fallback: bool,
}

impl ShadeScale {
    pub fn get(&self, shade: u16) -> Option<&str> {
        self.shades.get(&shade).map(String::as_str)
    }

    /// The `500` shade
    pub fn base(&self) -> &str {
        self.get(500).unwrap_or_default()
    }

    /// Whether this is the slate fallback produced for invalid input
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Shades in order from `50` to `950`
    pub fn iter(&self) -> impl Iterator<Item = (u16, &str)> {
        self.shades.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.shades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shades.is_empty()
    }
}

/// Shade scales for the three tinted palette roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteScales {
    pub primary: ShadeScale,
    pub secondary: ShadeScale,
    pub accent: ShadeScale,
}

impl PaletteScales {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            primary: generate_scale(&palette.primary.to_string()),
            secondary: generate_scale(&palette.secondary.to_string()),
            accent: generate_scale(&palette.accent.to_string()),
        }
    }
}

/// Build the `50`..`950` ramp for `base`.
///
/// Lighter shades sit at fixed lightness targets with saturation eased to
/// 90% (floor 10 for chromatic input). Darker shades sit at fixed targets
/// with saturation raised to 110% (cap 100). A target only moves when the
/// base's own lightness would otherwise break the light-to-dark ordering,
/// and a shade that renders no lighter (or darker) than its neighbour is
/// pushed out one rendered level at a time.
/// Invalid input yields the slate fallback with `500` set to the raw input.
pub fn generate_scale(base: &str) -> ShadeScale {
    let color = match HexColor::parse(base) {
        Ok(color) => color,
        Err(e) => {
            warn!("{}; using neutral fallback scale", e);
            return fallback_scale(base);
        }
    };

    let hsl = color.to_hsl();
    let light_sat = if hsl.s > 0.0 {
        (hsl.s * 0.9).max(10.0)
    } else {
        0.0
    };
    let dark_sat = (hsl.s * 1.1).min(100.0);

    let mut shades = BTreeMap::new();

    // Walk outward from 500 so each shade is judged against its rendered neighbour
    let lighter = LIGHTER.iter().rev().map(|&(shade, target, share)| {
        (shade, target.max(hsl.l + (100.0 - hsl.l) * share))
    });
    push_side(&mut shades, hsl.h, light_sat, hsl.l, lighter, Direction::Lighter);

    shades.insert(500, color.to_string());

    let darker = DARKER
        .iter()
        .map(|&(shade, target, fraction)| (shade, target.min(hsl.l * fraction)));
    push_side(&mut shades, hsl.h, dark_sat, hsl.l, darker, Direction::Darker);

    ShadeScale {
        shades,
        fallback: false,
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Lighter,
    Darker,
}

/// Half of one rendered lightness level (`(max + min) / 510`)
const LIGHTNESS_STEP: f64 = 100.0 / 510.0 / 2.0;

/// Render one side of the ramp, nearest shade first.
///
/// A shade whose rendered lightness does not move past its neighbour is
/// stepped further out until it does. Once lightness reaches 0 or 100 the
/// 8-bit range is exhausted and the shade keeps the extreme color.
fn push_side(
    shades: &mut BTreeMap<u16, String>,
    hue: f64,
    saturation: f64,
    base_lightness: f64,
    ideal: impl Iterator<Item = (u16, f64)>,
    direction: Direction,
) {
    let beyond = |candidate: f64, neighbour: f64| match direction {
        Direction::Lighter => candidate > neighbour,
        Direction::Darker => candidate < neighbour,
    };

    let mut neighbour = base_lightness;
    for (shade, mut lightness) in ideal {
        let mut rendered = hsl_to_hex(hue, saturation, lightness);
        while !beyond(rendered.to_hsl().l, neighbour) {
            let next = match direction {
                Direction::Lighter => (lightness + LIGHTNESS_STEP).min(100.0),
                Direction::Darker => (lightness - LIGHTNESS_STEP).max(0.0),
            };
            if next == lightness {
                debug!("No lightness left for shade {} of {}", shade, rendered);
                break;
            }
            lightness = next;
            rendered = hsl_to_hex(hue, saturation, lightness);
        }
        neighbour = rendered.to_hsl().l;
        shades.insert(shade, rendered.to_string());
    }
}

fn fallback_scale(raw: &str) -> ShadeScale {
    let mut shades: BTreeMap<u16, String> = FALLBACK
        .iter()
        .map(|(shade, hex)| (*shade, hex.to_string()))
        .collect();
    shades.insert(500, raw.to_string());

    ShadeScale {
        shades,
        fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::convert::hex_to_hsl;

    fn lightness(scale: &ShadeScale, shade: u16) -> f64 {
        hex_to_hsl(scale.get(shade).unwrap()).unwrap().l
    }

    #[test]
    fn test_has_all_shade_keys() {
        let scale = generate_scale("#2563eb");
        let keys: Vec<u16> = scale.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, SHADE_KEYS.to_vec());
        assert!(!scale.is_fallback());
    }

    #[test]
    fn test_base_is_normalized_input() {
        assert_eq!(generate_scale("2563EB").base(), "#2563eb");
        assert_eq!(generate_scale("#0D9488").get(500), Some("#0d9488"));
    }

    #[test]
    fn test_mid_lightness_base_uses_fixed_targets() {
        // Lightness 45 sits between the 400 and 600 targets
        let base = hsl_to_hex(210.0, 60.0, 45.0).to_string();
        let scale = generate_scale(&base);

        for (shade, expected) in [
            (50, 95.0),
            (100, 90.0),
            (200, 80.0),
            (300, 65.0),
            (400, 50.0),
            (600, 40.0),
            (700, 30.0),
            (800, 20.0),
            (900, 12.0),
            (950, 6.0),
        ] {
            let actual = lightness(&scale, shade);
            assert!(
                (actual - expected).abs() < 0.5,
                "shade {shade}: expected ~{expected}, got {actual}"
            );
        }
    }

    #[test]
    fn test_lightness_strictly_decreases() {
        for base in ["#2563eb", "#f59e0b", "#fde68a", "#1e3a8a", "#64748b", "#c4b5fd"] {
            let scale = generate_scale(base);
            let values: Vec<f64> = SHADE_KEYS.iter().map(|k| lightness(&scale, *k)).collect();
            for pair in values.windows(2) {
                assert!(pair[0] > pair[1], "{base}: {values:?}");
            }
        }
    }

    #[test]
    fn test_extreme_bases_keep_distinct_shades() {
        for base in ["#080808", "#f7f7f7", "#050000", "#fafafa", "#0a0a14"] {
            let scale = generate_scale(base);
            let values: Vec<f64> = SHADE_KEYS.iter().map(|k| lightness(&scale, *k)).collect();
            for pair in values.windows(2) {
                assert!(pair[0] > pair[1], "{base}: {values:?}");
            }
        }

        let near_black = generate_scale("#080808");
        assert_eq!(near_black.get(600), Some("#070707"));
        assert_eq!(near_black.get(950), Some("#010101"));
        let near_white = generate_scale("#f7f7f7");
        assert_eq!(near_white.get(400), Some("#f8f8f8"));
    }

    #[test]
    fn test_exhausted_range_clamps_to_extreme() {
        let scale = generate_scale("#000000");
        for shade in [600, 700, 800, 900, 950] {
            assert_eq!(scale.get(shade), Some("#000000"));
        }
        assert!(lightness(&scale, 400) > 0.0);

        let scale = generate_scale("#ffffff");
        assert_eq!(scale.get(50), Some("#ffffff"));
        assert!(lightness(&scale, 600) < 100.0);
    }

    #[test]
    fn test_dark_shades_boost_saturation() {
        let base = hsl_to_hex(20.0, 50.0, 45.0).to_string();
        let scale = generate_scale(&base);
        let dark = hex_to_hsl(scale.get(700).unwrap()).unwrap();
        let light = hex_to_hsl(scale.get(300).unwrap()).unwrap();
        assert!(dark.s > 50.0, "700 saturation {}", dark.s);
        assert!(light.s < 50.0, "300 saturation {}", light.s);
    }

    #[test]
    fn test_gray_stays_gray() {
        let scale = generate_scale("#808080");
        for (_, hex) in scale.iter() {
            assert_eq!(hex_to_hsl(hex).unwrap().s, 0.0, "{hex}");
        }
    }

    #[test]
    fn test_invalid_input_returns_fallback() {
        for raw in ["zzzzzz", "#123", ""] {
            let scale = generate_scale(raw);
            assert!(scale.is_fallback());
            assert_eq!(scale.len(), 11);
            assert_eq!(scale.get(500), Some(raw));
            assert_eq!(scale.get(50), Some("#f8fafc"));
            assert_eq!(scale.get(950), Some("#020617"));
        }
    }

    #[test]
    fn test_scale_serializes_as_map() {
        let json = serde_json::to_value(generate_scale("#2563eb")).unwrap();
        assert_eq!(json["500"], "#2563eb");
        assert_eq!(json.as_object().unwrap().len(), 11);
    }
}

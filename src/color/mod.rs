//! Color engine
//!
//! Converts hex input to HSL, builds shade scales, scores palette
//! harmony, and resolves the final palette from user, extracted, and
//! heuristic sources. Nothing here performs I/O.

pub mod convert;
pub mod extracted;
pub mod harmony;
pub mod heuristic;
pub mod resolver;
pub mod scale;

pub use convert::{hex_to_hsl, hsl_to_hex, normalize_hex, validate_hex, HexColor, Hsl};
pub use extracted::ExtractedColors;
pub use harmony::{complementary_accent, validate_harmony, HarmonyReport};
pub use heuristic::{color_for_name, colors_from_business, fnv1a_32};
pub use resolver::{resolve_colors, ColorResolution, ColorSource, RoleSources};
pub use scale::{generate_scale, PaletteScales, ShadeScale, SHADE_KEYS};

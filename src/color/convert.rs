//! Hex triplet and HSL conversion
//!
//! Everything above this module speaks in [`HexColor`] (validated RGB) or
//! [`Hsl`] (hue in degrees, saturation and lightness in percent).

use crate::error::{Result, ThemeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated RGB color.
///
/// Always renders in canonical form: lowercase, `#`-prefixed, six digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

/// Hue/saturation/lightness triple.
///
/// `h` is in `[0, 360)`, `s` and `l` are in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl HexColor {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` literal (used by the color tables)
    pub const fn from_u32(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xff) as u8,
            g: ((packed >> 8) & 0xff) as u8,
            b: (packed & 0xff) as u8,
        }
    }

    /// Parse six hex digits with an optional leading `#`
    pub fn parse(input: &str) -> Result<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ThemeError::InvalidColorFormat(input.to_string()));
        }

        let channel = |at: usize| {
            u8::from_str_radix(&digits[at..at + 2], 16)
                .map_err(|_| ThemeError::InvalidColorFormat(input.to_string()))
        };

        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn channels(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub fn to_hsl(&self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let delta = max - min;

        if delta == 0.0 {
            // Achromatic
            return Hsl {
                h: 0.0,
                s: 0.0,
                l: l * 100.0,
            };
        }

        let s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        let h = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Hsl {
            h: (h * 60.0).rem_euclid(360.0),
            s: s * 100.0,
            l: l * 100.0,
        }
    }
}

impl Hsl {
    pub fn to_hex(&self) -> HexColor {
        hsl_to_hex(self.h, self.s, self.l)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ThemeError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

/// True when `input` is six hex digits with an optional leading `#`
pub fn validate_hex(input: &str) -> bool {
    HexColor::parse(input).is_ok()
}

/// Canonical `#rrggbb` form of a valid hex string
pub fn normalize_hex(input: &str) -> Result<String> {
    HexColor::parse(input).map(|c| c.to_string())
}

pub fn hex_to_hsl(input: &str) -> Result<Hsl> {
    HexColor::parse(input).map(|c| c.to_hsl())
}

/// Inverse of [`hex_to_hsl`]. Out-of-range inputs are wrapped (hue) or
/// clamped (saturation, lightness).
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> HexColor {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 100.0) / 100.0;
    let l = l.clamp(0.0, 100.0) / 100.0;

    if s == 0.0 {
        let v = to_channel(l);
        return HexColor::from_rgb(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    HexColor::from_rgb(
        to_channel(hue_to_channel(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_channel(p, q, h)),
        to_channel(hue_to_channel(p, q, h - 1.0 / 3.0)),
    )
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

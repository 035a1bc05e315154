//! Starting colors inferred from what the business says about itself
//!
//! Lookup order: industry keywords, then descriptive keywords in the
//! description and audience, then a stable hash of the business name.

use super::convert::HexColor;
use crate::types::{BusinessProfile, Palette};
use tracing::debug;

/// (keyword, [primary, secondary, accent]); first match wins
const INDUSTRY_COLORS: &[(&str, [u32; 3])] = &[
    ("technology", [0x2563eb, 0x64748b, 0x06b6d4]),
    ("software", [0x4f46e5, 0x64748b, 0x22d3ee]),
    ("tech", [0x2563eb, 0x475569, 0x10b981]),
    ("finance", [0x1e3a8a, 0x475569, 0xd97706]),
    ("bank", [0x1e40af, 0x64748b, 0xca8a04]),
    ("insurance", [0x1d4ed8, 0x64748b, 0x0891b2]),
    ("health", [0x0d9488, 0x64748b, 0x22c55e]),
    ("medical", [0x0e7490, 0x64748b, 0x14b8a6]),
    ("creative", [0x7c3aed, 0x6b7280, 0xf97316]),
    ("design", [0xdb2777, 0x6b7280, 0xfbbf24]),
    ("marketing", [0xe11d48, 0x6b7280, 0xf59e0b]),
    ("real estate", [0x0f766e, 0x78716c, 0xd4a373]),
    ("property", [0x115e59, 0x78716c, 0xeab308]),
    ("education", [0x1d4ed8, 0x64748b, 0xfacc15]),
    ("retail", [0xea580c, 0x57534e, 0xfacc15]),
    ("ecommerce", [0xf97316, 0x57534e, 0x8b5cf6]),
    ("food", [0xdc2626, 0x78716c, 0xf59e0b]),
    ("restaurant", [0xb91c1c, 0x78716c, 0xfbbf24]),
    ("legal", [0x1e293b, 0x64748b, 0xb45309]),
    ("consulting", [0x0f172a, 0x64748b, 0x0ea5e9]),
    ("fitness", [0x16a34a, 0x52525b, 0xf97316]),
    ("construction", [0xca8a04, 0x44403c, 0xea580c]),
];

/// (keyword, [primary, secondary, accent]); matched at word starts
const KEYWORD_COLORS: &[(&str, [u32; 3])] = &[
    ("premium", [0x111827, 0x6b7280, 0xd4af37]),
    ("luxury", [0x1c1917, 0x78716c, 0xc9a227]),
    ("eco", [0x15803d, 0x78716c, 0x84cc16]),
    ("green", [0x16a34a, 0x6b7280, 0xa3e635]),
    ("digital", [0x4f46e5, 0x64748b, 0x22d3ee]),
    ("innovation", [0x7c3aed, 0x64748b, 0x10b981]),
    ("global", [0x1d4ed8, 0x475569, 0x0ea5e9]),
    ("local", [0xb45309, 0x78716c, 0x16a34a]),
    ("enterprise", [0x1e40af, 0x475569, 0xf59e0b]),
    ("startup", [0x8b5cf6, 0x64748b, 0xf43f5e]),
];

/// Twelve-way table the name hash indexes into
const NAME_HASH_COLORS: [u32; 12] = [
    0xdc2626, 0xea580c, 0xd97706, 0x65a30d, 0x16a34a, 0x059669, 0x0d9488, 0x0891b2, 0x2563eb,
    0x4f46e5, 0x7c3aed, 0xdb2777,
];

const NEUTRAL_GRAY: u32 = 0x64748b;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the UTF-8 bytes of `input`.
///
/// Stable across runs and platforms, unlike `std`'s randomized hasher.
pub fn fnv1a_32(input: &str) -> u32 {
    input.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Color picked from the 12-entry table by hashing `key`
pub fn color_for_name(key: &str) -> HexColor {
    let index = (fnv1a_32(key) % NAME_HASH_COLORS.len() as u32) as usize;
    HexColor::from_u32(NAME_HASH_COLORS[index])
}

/// Heuristic palette for a business with no authoritative colors
pub fn colors_from_business(profile: &BusinessProfile) -> Palette {
    let industry = profile.industry.to_lowercase();
    if let Some((keyword, colors)) = INDUSTRY_COLORS
        .iter()
        .find(|(keyword, _)| industry.contains(keyword))
    {
        debug!("Industry '{}' matched '{}'", profile.industry, keyword);
        return palette_from(colors);
    }

    let text = format!(
        "{} {}",
        profile.business_description, profile.target_audience
    )
    .to_lowercase();
    if let Some((keyword, colors)) = KEYWORD_COLORS
        .iter()
        .find(|(keyword, _)| contains_word_start(&text, keyword))
    {
        debug!("Description keyword '{}' matched", keyword);
        return palette_from(colors);
    }

    debug!(
        "No industry or keyword match for '{}'; hashing business name",
        profile.business_name
    );
    Palette::new(
        color_for_name(&profile.business_name),
        HexColor::from_u32(NEUTRAL_GRAY),
        color_for_name(&format!("{}accent", profile.business_name)),
    )
}

fn palette_from(colors: &[u32; 3]) -> Palette {
    Palette::new(
        HexColor::from_u32(colors[0]),
        HexColor::from_u32(colors[1]),
        HexColor::from_u32(colors[2]),
    )
}

/// `keyword` occurs where a word begins ("eco-friendly" yes, "second" no)
fn contains_word_start(text: &str, keyword: &str) -> bool {
    text.match_indices(keyword).any(|(at, _)| {
        text[..at]
            .chars()
            .next_back()
            .map_or(true, |prev| !prev.is_alphanumeric())
    })
}

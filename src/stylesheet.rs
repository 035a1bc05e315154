//! `.theme-<client>` stylesheet emission
//!
//! Pure formatting over the resolved palette's shade scales plus
//! industry-dependent typography and component tokens.

use crate::color::{PaletteScales, ShadeScale};
use crate::types::{slugify, BusinessProfile, Palette};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Typography and component tokens for an industry family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndustryStyle {
    pub font_primary: &'static str,
    pub font_heading: &'static str,
    pub radius: &'static str,
    pub shadow: &'static str,
}

const TECH: IndustryStyle = IndustryStyle {
    font_primary: "Inter",
    font_heading: "JetBrains Mono",
    radius: "4px",
    shadow: "var(--shadow-lg)",
};

const PROFESSIONAL: IndustryStyle = IndustryStyle {
    font_primary: "Inter",
    font_heading: "Playfair Display",
    radius: "6px",
    shadow: "var(--shadow-sm)",
};

const CREATIVE: IndustryStyle = IndustryStyle {
    font_primary: "Inter",
    font_heading: "Playfair Display",
    radius: "16px",
    shadow: "var(--shadow-lg)",
};

const HEALTH: IndustryStyle = IndustryStyle {
    font_primary: "Source Sans Pro",
    font_heading: "Source Sans Pro",
    radius: "8px",
    shadow: "var(--shadow-md)",
};

const DEFAULT_STYLE: IndustryStyle = IndustryStyle {
    font_primary: "Inter",
    font_heading: "Inter",
    radius: "8px",
    shadow: "var(--shadow-md)",
};

/// Families checked in order; first keyword hit wins
const FAMILIES: [(&[&str], IndustryStyle); 4] = [
    (&["technology", "software"], TECH),
    (&["finance", "legal", "consulting"], PROFESSIONAL),
    (&["creative", "design", "marketing"], CREATIVE),
    (&["health", "medical"], HEALTH),
];

pub fn industry_style(industry: &str) -> IndustryStyle {
    let industry = industry.to_lowercase();
    FAMILIES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| industry.contains(k)))
        .map_or(DEFAULT_STYLE, |(_, style)| *style)
}

/// CSS class suffix for a client
pub fn theme_class(profile: &BusinessProfile) -> String {
    let source = if profile.client_name.trim().is_empty() {
        &profile.business_name
    } else {
        &profile.client_name
    };
    format!("theme-{}", slugify(source))
}

pub fn render_theme_css(
    profile: &BusinessProfile,
    palette: &Palette,
    generated_at: DateTime<Utc>,
) -> String {
    let scales = PaletteScales::from_palette(palette);
    let style = industry_style(&profile.industry);
    let one_line = |text: &str| text.replace("*/", "* /").replace(['\n', '\r'], " ");

    let mut css = String::new();
    let _ = writeln!(css, "/*");
    let _ = writeln!(css, " * Client Theme: {}", one_line(&profile.business_name));
    let _ = writeln!(
        css,
        " * Generated on: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(css, " * Industry: {}", one_line(&profile.industry));
    let _ = writeln!(css, " */");
    let _ = writeln!(css, ".{} {{", theme_class(profile));
    let _ = writeln!(css, "  /* Background for visual distinction */");
    let _ = writeln!(
        css,
        "  background-color: {};",
        scales.primary.get(50).unwrap_or_default()
    );

    for (role, scale) in [
        ("primary", &scales.primary),
        ("secondary", &scales.secondary),
        ("accent", &scales.accent),
    ] {
        write_scale(&mut css, role, scale);
    }

    let radius = style.radius;
    let _ = write!(
        css,
        r#"
  /* Typography */
  --font-family-primary: '{primary}', sans-serif;
  --font-family-heading: '{heading}', sans-serif;
  --font-scale-ratio: 1.25;
  --font-weight-heading: var(--font-weight-semibold);
  --letter-spacing-heading: var(--letter-spacing-tight);

  /* Component theming */
  --button-radius: {radius};
  --card-radius: calc({radius} * 1.5);
  --input-radius: calc({radius} * 0.75);
  --card-shadow: {shadow};
  --button-shadow: var(--shadow-sm);

  /* Border radius */
  --border-radius-md: {radius};
  --border-radius-lg: calc({radius} * 1.5);
}}
"#,
        primary = style.font_primary,
        heading = style.font_heading,
        radius = radius,
        shadow = style.shadow,
    );
    css
}

fn write_scale(css: &mut String, role: &str, scale: &ShadeScale) {
    let mut title = role.to_string();
    if let Some(first) = title.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    let _ = writeln!(css, "\n  /* {} color scale */", title);
    for (shade, color) in scale.iter() {
        let _ = writeln!(css, "  --color-{}-{}: {};", role, shade, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{generate_scale, HexColor};
    use chrono::TimeZone;

    fn palette() -> Palette {
        Palette::new(
            HexColor::from_u32(0x2563eb),
            HexColor::from_u32(0x64748b),
            HexColor::from_u32(0xf59e0b),
        )
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_industry_styles() {
        assert_eq!(industry_style("Enterprise Software").font_heading, "JetBrains Mono");
        assert_eq!(industry_style("Legal Services").radius, "6px");
        assert_eq!(industry_style("Graphic Design").radius, "16px");
        assert_eq!(industry_style("Medical Clinic").font_primary, "Source Sans Pro");
        assert_eq!(industry_style("Bakery"), DEFAULT_STYLE);
    }

    #[test]
    fn test_theme_css_contents() {
        let mut profile = BusinessProfile::new("Tech 10 Solutions", "Technology");
        profile.client_name = "Tech 10 Solutions!".to_string();
        let css = render_theme_css(&profile, &palette(), timestamp());

        assert!(css.contains(".theme-tech-10-solutions {"));
        assert!(css.contains(" * Generated on: 2024-05-01 12:30:00"));
        assert!(css.contains("  --color-primary-500: #2563eb;"));
        assert!(css.contains("  --color-accent-500: #f59e0b;"));
        assert!(css.contains("/* Secondary color scale */"));
        assert!(css.contains("--card-radius: calc(4px * 1.5);"));
        assert!(css.contains("--card-shadow: var(--shadow-lg);"));

        let background = format!(
            "background-color: {};",
            generate_scale("#2563eb").get(50).unwrap()
        );
        assert!(css.contains(&background));
        assert_eq!(css.matches("--color-").count(), 33);
    }

    #[test]
    fn test_header_cannot_close_comment_early() {
        let profile = BusinessProfile::new("Evil */ .x { }", "Retail");
        let css = render_theme_css(&profile, &palette(), timestamp());
        let header_end = css.find("*/").unwrap();
        assert!(css[..header_end].contains(" * Industry: Retail"));
    }

    #[test]
    fn test_non_ascii_name_gets_named_class() {
        let profile = BusinessProfile::new("東京カフェ", "Cafe");
        let class = theme_class(&profile);
        assert_eq!(class, format!("theme-{}", profile.client_name));
        assert!(class.starts_with("theme-client-"));

        let css = render_theme_css(&profile, &palette(), timestamp());
        assert!(css.contains(&format!(".{} {{", class)));
        assert!(!css.contains(".theme- {"));
    }
}

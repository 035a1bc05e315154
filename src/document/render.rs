//! JavaScript literal rendering for merged content sections

use super::payload::{FeatureItem, ServiceTier, Testimonial};
use std::fmt::Write;

const DEFAULT_FEATURE_ICON: &str = "star";

/// Escape text for use inside a double-quoted JavaScript string
pub fn escape_js_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            c if c.is_control() => {
                let _ = write!(escaped, "\\u{:04x}", c as u32);
            }
            c => escaped.push(c),
        }
    }
    escaped
}

/// Double-quoted, escaped JavaScript string literal
pub fn js_string(text: &str) -> String {
    format!("\"{}\"", escape_js_string(text))
}

/// Inline array of string literals: `["a", "b"]`
pub fn js_string_array(items: &[String]) -> String {
    let items: Vec<String> = items.iter().map(|item| js_string(item)).collect();
    format!("[{}]", items.join(", "))
}

/// Multi-line object literal from pre-rendered values.
///
/// `indent` is the indentation of the line the object starts on; fields
/// sit one level deeper and the closing brace lines up with `indent`.
pub fn js_object(fields: &[(&str, String)], indent: &str) -> String {
    let inner = format!("{}  ", indent);
    let body: Vec<String> = fields
        .iter()
        .map(|(key, value)| format!("{}{}: {}", inner, key, value))
        .collect();
    format!("{{\n{}\n{}}}", body.join(",\n"), indent)
}

/// Multi-line array of pre-rendered object literals
fn js_list(items: Vec<String>, indent: &str) -> String {
    let inner = format!("{}  ", indent);
    let body: Vec<String> = items
        .into_iter()
        .map(|item| format!("{}{}", inner, item))
        .collect();
    format!("[\n{}\n{}]", body.join(",\n"), indent)
}

pub fn render_features(features: &[FeatureItem], indent: &str) -> String {
    let item_indent = format!("{}  ", indent);
    let items = features
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let icon = feature
                .icon
                .as_deref()
                .filter(|icon| !icon.trim().is_empty())
                .unwrap_or(DEFAULT_FEATURE_ICON);
            let image = feature
                .image
                .clone()
                .filter(|image| !image.trim().is_empty())
                .unwrap_or_else(|| format!("/images/feature{}.jpg", i + 1));
            js_object(
                &[
                    ("title", js_string(&feature.title)),
                    ("description", js_string(&feature.description)),
                    ("icon", js_string(icon)),
                    ("image", js_string(&image)),
                ],
                &item_indent,
            )
        })
        .collect();
    js_list(items, indent)
}

pub fn render_services(services: &[ServiceTier], indent: &str) -> String {
    let item_indent = format!("{}  ", indent);
    let items = services
        .iter()
        .map(|service| {
            js_object(
                &[
                    ("name", js_string(&service.name)),
                    ("description", js_string(&service.description)),
                    ("features", js_string_array(&service.features)),
                    ("price", js_string(&service.price)),
                    ("cta", js_string(&service.cta)),
                ],
                &item_indent,
            )
        })
        .collect();
    js_list(items, indent)
}

pub fn render_testimonials(testimonials: &[Testimonial], indent: &str) -> String {
    let item_indent = format!("{}  ", indent);
    let items = testimonials
        .iter()
        .map(|testimonial| {
            js_object(
                &[
                    ("quote", js_string(&testimonial.quote)),
                    ("author", js_string(&testimonial.author)),
                    ("title", js_string(&testimonial.title)),
                    ("company", js_string(&testimonial.company)),
                ],
                &item_indent,
            )
        })
        .collect();
    js_list(items, indent)
}

/// Team entry emitted when the base document has none
pub fn placeholder_team(indent: &str) -> String {
    let member = js_object(
        &[
            ("name", js_string("Team Member")),
            ("title", js_string("Position")),
            ("image", js_string("/images/team/member.jpg")),
        ],
        &format!("{}  ", indent),
    );
    js_list(vec![member], indent)
}

//! Marketing copy produced by the content-generation call

use super::clean::clean_json_response;
use crate::error::{Result, ThemeError};
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sections to merge into a base document.
///
/// A section that is absent (or an empty list) leaves the matching part
/// of the base document untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentPayload {
    pub hero: Option<HeroContent>,
    pub features: Option<Vec<FeatureItem>>,
    pub services: Option<Vec<ServiceTier>>,
    pub testimonials: Option<Vec<Testimonial>>,
    pub about: Option<AboutContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroContent {
    #[serde(deserialize_with = "lenient_opt_string")]
    pub headline: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub subheadline: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub cta: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub secondary_cta: Option<String>,
}

impl HeroContent {
    /// (document key, new value) for every field present
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("headline", self.headline.as_deref()),
            ("subheadline", self.subheadline.as_deref()),
            ("cta", self.cta.as_deref()),
            ("secondaryCta", self.secondary_cta.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureItem {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub icon: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceTier {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_strings")]
    pub features: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub price: String,
    #[serde(deserialize_with = "lenient_string")]
    pub cta: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    #[serde(deserialize_with = "lenient_string")]
    pub quote: String,
    #[serde(deserialize_with = "lenient_string")]
    pub author: String,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub company: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutContent {
    #[serde(deserialize_with = "lenient_opt_string")]
    pub story: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub mission: Option<String>,
    #[serde(deserialize_with = "lenient_opt_strings")]
    pub values: Option<Vec<String>>,
}

impl AboutContent {
    pub fn is_empty(&self) -> bool {
        self.story.is_none()
            && self.mission.is_none()
            && self.values.as_ref().map_or(true, Vec::is_empty)
    }
}

impl ContentPayload {
    /// Parse generated content, tolerating markdown fences around it
    pub fn from_json(raw: &str) -> Result<Self> {
        let cleaned = clean_json_response(raw);
        serde_json::from_str(&cleaned).map_err(|e| ThemeError::ContentParse(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.hero.as_ref().map_or(true, |hero| hero.fields().is_empty())
            && self.features.as_ref().map_or(true, Vec::is_empty)
            && self.services.as_ref().map_or(true, Vec::is_empty)
            && self.testimonials.as_ref().map_or(true, Vec::is_empty)
            && self.about.as_ref().map_or(true, AboutContent::is_empty)
    }
}

/// Copy text the model may have emitted as a number, boolean or `null`
fn text(value: Value) -> Option<std::result::Result<String, String>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Ok(s)),
        Value::Number(n) => Some(Ok(n.to_string())),
        Value::Bool(b) => Some(Ok(b.to_string())),
        other => Some(Err(format!("expected text, found {}", other))),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    text(Value::deserialize(deserializer)?)
        .transpose()
        .map_err(D::Error::custom)
}

fn lenient_opt_strings<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Array(items) => items
            .into_iter()
            .filter_map(text)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Some)
            .map_err(D::Error::custom),
        other => text(other)
            .transpose()
            .map(|single| single.map(|s| vec![s]))
            .map_err(D::Error::custom),
    }
}

fn lenient_strings<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_strings(deserializer)?.unwrap_or_default())
}

//! Splicing generated content into a base document
//!
//! Each section is located by property name, scoped to the `content`
//! object when the document has one. Hero fields are replaced one by one
//! as direct children of the hero object. Features, services and
//! testimonials are rebuilt in full. The about object is rebuilt keeping
//! its team and any field the payload leaves out.
//!
//! The merged text must pass the [`DocumentValidator`]; otherwise the base
//! document is returned unchanged.

use super::payload::{AboutContent, ContentPayload, HeroContent};
use super::render::{
    js_object, js_string, js_string_array, placeholder_team, render_features, render_services,
    render_testimonials,
};
use super::scan::{scan, CodeMap, Property};
use super::validator::{DocumentValidator, Validation};
use crate::error::ThemeError;
use serde::Serialize;
use std::fmt;
use std::ops::Range;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Hero,
    Features,
    Services,
    Testimonials,
    About,
}

impl Section {
    pub fn key(&self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::Features => "features",
            Section::Services => "services",
            Section::Testimonials => "testimonials",
            Section::About => "about",
        }
    }

    /// Opening bracket the section's value must start with
    fn opener(&self) -> u8 {
        match self {
            Section::Hero | Section::About => b'{',
            _ => b'[',
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeOutcome {
    pub document: String,
    pub warnings: Vec<String>,
    /// Sections written into the document (empty after a rollback)
    pub applied: Vec<Section>,
    pub rolled_back: bool,
    /// Verdict on the merged text, when a merge was attempted
    pub validation: Option<Validation>,
}

impl MergeOutcome {
    fn unchanged(base: &str, warnings: Vec<String>) -> Self {
        Self {
            document: base.to_string(),
            warnings,
            applied: Vec::new(),
            rolled_back: false,
            validation: None,
        }
    }
}

struct Edit {
    span: Range<usize>,
    replacement: String,
}

pub struct ContentMerger {
    validator: DocumentValidator,
}

impl ContentMerger {
    pub fn new(validator: DocumentValidator) -> Self {
        Self { validator }
    }

    pub fn merge(&self, base: &str, payload: &ContentPayload) -> MergeOutcome {
        let map = match scan(base) {
            Ok(map) => map,
            Err(e) => {
                let warning = format!("Base document could not be scanned ({}); content not merged", e);
                warn!("{}", warning);
                return MergeOutcome::unchanged(base, vec![warning]);
            }
        };

        let mut warnings = Vec::new();
        let mut edits: Vec<(Section, Vec<Edit>)> = Vec::new();

        if let Some(hero) = &payload.hero {
            if let Some(section) = hero_edits(&map, hero, &mut warnings) {
                edits.push((Section::Hero, section));
            }
        }

        let lists = [
            (Section::Features, payload.features.as_ref().map(|f| f.len())),
            (Section::Services, payload.services.as_ref().map(|s| s.len())),
            (
                Section::Testimonials,
                payload.testimonials.as_ref().map(|t| t.len()),
            ),
        ];
        for (section, count) in lists {
            match count {
                None => debug!("Payload has no {} section; leaving it untouched", section),
                Some(0) => debug!("Payload {} list is empty; leaving it untouched", section),
                Some(_) => {
                    let Some(property) = locate(&map, section, &mut warnings) else {
                        continue;
                    };
                    let indent = map.line_indent(property.key_start);
                    let replacement = match section {
                        Section::Features => {
                            render_features(payload.features.as_deref().unwrap_or_default(), indent)
                        }
                        Section::Services => {
                            render_services(payload.services.as_deref().unwrap_or_default(), indent)
                        }
                        _ => render_testimonials(
                            payload.testimonials.as_deref().unwrap_or_default(),
                            indent,
                        ),
                    };
                    edits.push((
                        section,
                        vec![Edit {
                            span: property.value,
                            replacement,
                        }],
                    ));
                }
            }
        }

        if let Some(about) = payload.about.as_ref().filter(|about| !about.is_empty()) {
            if let Some(edit) = about_edit(&map, about, &mut warnings) {
                edits.push((Section::About, vec![edit]));
            }
        }

        let (document, applied) = apply(base, edits, &mut warnings);
        if applied.is_empty() {
            return MergeOutcome::unchanged(base, warnings);
        }

        let validation = self.validator.is_well_formed(&document);
        if !validation.well_formed {
            let error = ThemeError::MergeValidation(
                validation
                    .diagnostic
                    .clone()
                    .unwrap_or_else(|| "document is not well-formed".to_string()),
            );
            let warning = format!("{}; kept the base document", error);
            warn!("{}", warning);
            warnings.push(warning);
            return MergeOutcome {
                document: base.to_string(),
                warnings,
                applied: Vec::new(),
                rolled_back: true,
                validation: Some(validation),
            };
        }

        info!(
            "Merged {} content sections",
            applied.len()
        );
        MergeOutcome {
            document,
            warnings,
            applied,
            rolled_back: false,
            validation: Some(validation),
        }
    }
}

impl Default for ContentMerger {
    fn default() -> Self {
        Self::new(DocumentValidator::default())
    }
}

/// Shallowest property for `section` with the expected bracket, searched in
/// the `content` object first and then in the whole document
fn locate(map: &CodeMap<'_>, section: Section, warnings: &mut Vec<String>) -> Option<Property> {
    let whole = 0..map.text().len();
    let found_in = |scope: Range<usize>| {
        map.properties(scope, section.key())
            .into_iter()
            .filter(|property| map.opens_with(&property.value, section.opener()))
            .min_by_key(|property| property.depth)
    };

    let content_scope = map
        .shallowest(whole.clone(), "content")
        .filter(|content| map.opens_with(&content.value, b'{'))
        .map(|content| map.inner(&content.value));

    let property = content_scope.and_then(found_in).or_else(|| found_in(whole));
    if property.is_none() {
        let warning = format!("No {} section found in base document; skipped", section);
        warn!("{}", warning);
        warnings.push(warning);
    }
    property
}

fn hero_edits(
    map: &CodeMap<'_>,
    hero: &HeroContent,
    warnings: &mut Vec<String>,
) -> Option<Vec<Edit>> {
    let fields = hero.fields();
    if fields.is_empty() {
        debug!("Payload hero has no fields; leaving it untouched");
        return None;
    }

    let object = locate(map, Section::Hero, warnings)?;
    let edits: Vec<Edit> = fields
        .into_iter()
        .filter_map(|(key, value)| match map.direct_property(object.value.start, key) {
            Some(property) => Some(Edit {
                span: property.value,
                replacement: js_string(value),
            }),
            None => {
                debug!("Hero has no '{}' field; value dropped", key);
                None
            }
        })
        .collect();

    if edits.is_empty() {
        let warning = "Hero section has none of the generated fields; skipped".to_string();
        warn!("{}", warning);
        warnings.push(warning);
        return None;
    }
    Some(edits)
}

fn about_edit(map: &CodeMap<'_>, about: &AboutContent, warnings: &mut Vec<String>) -> Option<Edit> {
    let object = locate(map, Section::About, warnings)?;
    let text = map.text();
    let indent = map.line_indent(object.key_start);
    let field_indent = format!("{}  ", indent);
    let existing = |key: &str| {
        map.direct_property(object.value.start, key)
            .map(|property| text[property.value].to_string())
    };

    let story = about
        .story
        .as_deref()
        .map(js_string)
        .or_else(|| existing("story"))
        .unwrap_or_else(|| js_string(""));
    let mission = about
        .mission
        .as_deref()
        .map(js_string)
        .or_else(|| existing("mission"))
        .unwrap_or_else(|| js_string(""));
    let values = about
        .values
        .as_deref()
        .filter(|values| !values.is_empty())
        .map(js_string_array)
        .or_else(|| existing("values"))
        .unwrap_or_else(|| "[]".to_string());
    let team = existing("team").unwrap_or_else(|| placeholder_team(&field_indent));

    Some(Edit {
        span: object.value,
        replacement: js_object(
            &[
                ("story", story),
                ("mission", mission),
                ("values", values),
                ("team", team),
            ],
            indent,
        ),
    })
}

/// Apply section edits back to front. A section overlapping one already
/// accepted is dropped whole.
fn apply(
    base: &str,
    sections: Vec<(Section, Vec<Edit>)>,
    warnings: &mut Vec<String>,
) -> (String, Vec<Section>) {
    let mut accepted: Vec<(Section, Edit)> = Vec::new();
    let mut applied = Vec::new();

    for (section, edits) in sections {
        let overlaps = edits.iter().any(|edit| {
            accepted.iter().any(|(_, other)| {
                edit.span.start < other.span.end && other.span.start < edit.span.end
            })
        });
        if overlaps {
            let warning = format!("{} section overlaps another section; skipped", section);
            warn!("{}", warning);
            warnings.push(warning);
            continue;
        }
        debug!("Applying {} section", section);
        applied.push(section);
        accepted.extend(edits.into_iter().map(|edit| (section, edit)));
    }

    accepted.sort_by_key(|(_, edit)| std::cmp::Reverse(edit.span.start));
    let mut document = base.to_string();
    for (_, edit) in accepted {
        document.replace_range(edit.span, &edit.replacement);
    }
    (document, applied)
}

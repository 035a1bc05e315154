//! End-to-end theme generation
//!
//! Resolve colors, ask the service for a base configuration and for
//! marketing copy, merge the copy in, and render the stylesheet. Only
//! service failures abort a run; color, parse and merge problems become
//! warnings on the result.

use crate::color::{resolve_colors, ColorResolution, HarmonyReport, PaletteScales, RoleSources};
use crate::config::GeneratorConfig;
use crate::document::clean::looks_like_javascript;
use crate::document::{
    clean_javascript_response, render_base_document, ContentMerger, ContentPayload,
    DocumentValidator, MergeOutcome, Validation,
};
use crate::error::Result;
use crate::prompts::{config_prompt, content_prompt, content_system_prompt, system_prompt};
use crate::services::{retry_with_backoff, GenerationRequest, RetryPolicy, TextGenerator};
use crate::stylesheet::{render_theme_css, theme_class};
use crate::types::{BusinessProfile, Palette};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Record of one generation run, persisted next to the client config
#[derive(Debug, Clone, Serialize)]
pub struct GenerationMetadata {
    pub client_name: String,
    pub business_name: String,
    pub industry: String,
    pub theme_class: String,
    pub generated_at: DateTime<Utc>,
    /// None when generated offline
    pub ai_model: Option<String>,
    pub generation_steps: Vec<String>,
    pub content_customized: bool,
    pub palette: Palette,
    pub color_sources: RoleSources,
    pub harmony: Option<HarmonyReport>,
    pub validation: Option<Validation>,
    pub warnings: Vec<String>,
    /// Filled in once outputs are written
    pub files_created: Vec<PathBuf>,
    pub business_data: BusinessProfile,
}

#[derive(Debug, Clone)]
pub struct GeneratedTheme {
    /// JavaScript module for the client configuration
    pub client_config: String,
    pub theme_css: String,
    pub resolution: ColorResolution,
    pub scales: PaletteScales,
    pub metadata: GenerationMetadata,
}

pub struct ThemeGenerator {
    llm: Arc<dyn TextGenerator>,
    retry: RetryPolicy,
    merger: ContentMerger,
    config_temperature: f32,
    content_temperature: f32,
}

impl ThemeGenerator {
    pub fn new(llm: Arc<dyn TextGenerator>, config: &GeneratorConfig) -> Self {
        Self {
            llm,
            retry: config.retry.policy(),
            merger: ContentMerger::new(DocumentValidator::from_settings(&config.validator)),
            config_temperature: config.llm.config_temperature,
            content_temperature: config.llm.content_temperature,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_merger(mut self, merger: ContentMerger) -> Self {
        self.merger = merger;
        self
    }

    pub async fn generate(&self, profile: &BusinessProfile) -> Result<GeneratedTheme> {
        info!("Generating theme for {}", profile.business_name);
        let resolution = resolve_colors(profile);
        let mut warnings = Vec::new();

        info!("Step 1: generating base configuration");
        let config_request = GenerationRequest {
            system: system_prompt().to_string(),
            prompt: config_prompt(profile, &resolution.palette),
            temperature: self.config_temperature,
        };
        let raw_config = retry_with_backoff(&self.retry, "Base configuration", || {
            self.llm.generate(&config_request)
        })
        .await?;
        let base = clean_javascript_response(&raw_config);
        if !looks_like_javascript(&base) {
            warnings.push("Generated configuration may not be valid JavaScript".to_string());
        }

        info!("Step 2: generating marketing content");
        let content_request = GenerationRequest {
            system: content_system_prompt().to_string(),
            prompt: content_prompt(profile),
            temperature: self.content_temperature,
        };
        let raw_content = retry_with_backoff(&self.retry, "Marketing content", || {
            self.llm.generate(&content_request)
        })
        .await?;

        info!("Step 3: merging content into configuration");
        let (client_config, merge) = match ContentPayload::from_json(&raw_content) {
            Ok(payload) => {
                let outcome = self.merger.merge(&base, &payload);
                warnings.extend(outcome.warnings.iter().cloned());
                (outcome.document.clone(), Some(outcome))
            }
            Err(e) => {
                let warning = format!("{}; keeping the base configuration", e);
                warn!("{}", warning);
                warnings.push(warning);
                (base, None)
            }
        };

        let steps = ["color_resolution", "base_config", "custom_content", "merge", "theme_css"];
        Ok(finish(
            profile,
            resolution,
            client_config,
            merge,
            Some(self.llm.model_name()),
            &steps,
            warnings,
        ))
    }

    /// Same outputs without the service: the placeholder configuration
    /// becomes the client config
    pub fn offline(profile: &BusinessProfile) -> GeneratedTheme {
        info!("Generating offline theme for {}", profile.business_name);
        let resolution = resolve_colors(profile);
        let client_config = render_base_document(profile, &resolution.palette);
        let steps = ["color_resolution", "placeholder_config", "theme_css"];
        finish(profile, resolution, client_config, None, None, &steps, Vec::new())
    }
}

fn finish(
    profile: &BusinessProfile,
    resolution: ColorResolution,
    client_config: String,
    merge: Option<MergeOutcome>,
    ai_model: Option<String>,
    steps: &[&str],
    warnings: Vec<String>,
) -> GeneratedTheme {
    let generated_at = Utc::now();
    let scales = PaletteScales::from_palette(&resolution.palette);
    let theme_css = render_theme_css(profile, &resolution.palette, generated_at);

    let content_customized = merge
        .as_ref()
        .map_or(false, |outcome| !outcome.applied.is_empty());
    let validation = merge.and_then(|outcome| outcome.validation);

    let metadata = GenerationMetadata {
        client_name: profile.client_name.clone(),
        business_name: profile.business_name.clone(),
        industry: profile.industry.clone(),
        theme_class: theme_class(profile),
        generated_at,
        ai_model,
        generation_steps: steps.iter().map(|s| s.to_string()).collect(),
        content_customized,
        palette: resolution.palette,
        color_sources: resolution.sources,
        harmony: resolution.harmony.clone(),
        validation,
        warnings,
        files_created: Vec::new(),
        business_data: profile.clone(),
    };

    info!(
        "Theme ready: {} ({} warnings)",
        metadata.theme_class,
        metadata.warnings.len()
    );
    GeneratedTheme {
        client_config,
        theme_css,
        resolution,
        scales,
        metadata,
    }
}

//! End-to-end generation with a scripted text service

mod common;

use brandforge_core::{
    color::resolve_colors,
    document::render_base_document,
    prompts::{content_system_prompt, system_prompt},
    services::RetryPolicy,
    GeneratorConfig, ThemeError, ThemeGenerator,
};
use common::{harbor_profile, ScriptedGenerator};
use std::sync::Arc;

const CONTENT: &str = r#"```json
{
  "hero": {"headline": "Books That Balance", "cta": "Book a call"},
  "services": [
    {"name": "Starter", "description": "Monthly books", "features": ["Reconciliation", "Reports"], "price": "$199/mo", "cta": "Start now"}
  ]
}
```"#;

fn config() -> GeneratorConfig {
    let mut config = GeneratorConfig::default();
    config.validator.use_node = false;
    config
}

fn fenced_base() -> String {
    let profile = harbor_profile();
    let palette = resolve_colors(&profile).palette;
    format!("```javascript\n{}```\n", render_base_document(&profile, &palette))
}

fn generator(llm: Arc<ScriptedGenerator>, attempts: u32) -> ThemeGenerator {
    ThemeGenerator::new(llm, &config()).with_retry_policy(RetryPolicy::immediate(attempts))
}

#[tokio::test]
async fn test_pipeline_merges_generated_content() {
    let llm = Arc::new(ScriptedGenerator::new(vec![
        Ok(fenced_base()),
        Ok(CONTENT.to_string()),
    ]));
    let theme = generator(llm.clone(), 5)
        .generate(&harbor_profile())
        .await
        .unwrap();

    assert!(theme.client_config.starts_with("// Client Configuration for Harbor Ledger"));
    assert!(!theme.client_config.contains("```"));
    assert!(theme.client_config.contains(r#"headline: "Books That Balance""#));
    assert!(theme.client_config.contains(r#"price: "$199/mo""#));
    assert!(!theme.client_config.contains("[Powerful headline]"));
    assert!(theme.client_config.contains("[Customer testimonial]"));

    assert!(theme.theme_css.contains(".theme-harbor-ledger {"));
    assert!(theme.theme_css.contains("--color-primary-500: #1e3a8a;"));

    let metadata = &theme.metadata;
    assert!(metadata.content_customized);
    assert_eq!(metadata.ai_model.as_deref(), Some("scripted"));
    assert!(metadata.harmony.is_none());
    assert!(metadata.warnings.is_empty(), "{:?}", metadata.warnings);

    let requests = llm.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].system, system_prompt());
    assert!((requests[0].temperature - 0.7).abs() < f32::EPSILON);
    assert!(requests[0].prompt.contains("- Primary: #1e3a8a"));
    assert_eq!(requests[1].system, content_system_prompt());
    assert!(requests[1].prompt.contains("- Payroll"));
}

#[tokio::test]
async fn test_overload_is_retried_then_succeeds() {
    let llm = Arc::new(ScriptedGenerator::new(vec![
        Err(ThemeError::ServiceOverloaded("529".to_string())),
        Err(ThemeError::RateLimitExceeded("429".to_string())),
        Ok(fenced_base()),
        Ok(CONTENT.to_string()),
    ]));
    let theme = generator(llm.clone(), 5)
        .generate(&harbor_profile())
        .await
        .unwrap();

    assert_eq!(llm.requests().len(), 4);
    assert!(theme.metadata.content_customized);
}

#[tokio::test]
async fn test_retries_exhausted_is_fatal() {
    let llm = Arc::new(ScriptedGenerator::new(vec![
        Err(ThemeError::RateLimitExceeded("429".to_string())),
        Err(ThemeError::RateLimitExceeded("429".to_string())),
    ]));
    let result = generator(llm.clone(), 2).generate(&harbor_profile()).await;

    match result {
        Err(ThemeError::RetriesExhausted { attempts, last }) => {
            assert_eq!(attempts, 2);
            assert!(matches!(*last, ThemeError::RateLimitExceeded(_)));
        }
        other => panic!("expected RetriesExhausted, got {:?}", other.map(|_| ())),
    }
    assert_eq!(llm.requests().len(), 2);
}

#[tokio::test]
async fn test_other_service_errors_are_not_retried() {
    let llm = Arc::new(ScriptedGenerator::new(vec![Err(ThemeError::LlmApi(
        "400 Bad Request".to_string(),
    ))]));
    let result = generator(llm.clone(), 5).generate(&harbor_profile()).await;

    assert!(matches!(result, Err(ThemeError::LlmApi(_))));
    assert_eq!(llm.requests().len(), 1);
}

#[tokio::test]
async fn test_invalid_merge_keeps_base_configuration() {
    // A stray closing bracket in the base makes it unscannable
    let broken = "export const clientConfig = { content: { hero: { headline: \"x\" } } }};";
    let llm = Arc::new(ScriptedGenerator::new(vec![
        Ok(broken.to_string()),
        Ok(CONTENT.to_string()),
    ]));
    let theme = generator(llm, 5).generate(&harbor_profile()).await.unwrap();

    assert_eq!(theme.client_config, broken);
    assert!(!theme.metadata.content_customized);
    assert_eq!(theme.metadata.warnings.len(), 1);
}

#[test]
fn test_offline_theme_with_user_colors() {
    let mut profile = harbor_profile();
    profile.primary_color = Some("0F766E".to_string());
    profile.accent_color = Some("#f59e0b".to_string());

    let theme = ThemeGenerator::offline(&profile);

    assert_eq!(theme.resolution.palette.primary.to_string(), "#0f766e");
    assert!(theme.client_config.contains(r##"primary: "#0f766e""##));
    assert!(theme.theme_css.contains("--color-accent-500: #f59e0b;"));
    assert_eq!(theme.scales.primary.base(), "#0f766e");

    let metadata = &theme.metadata;
    assert!(metadata.harmony.is_some());
    assert_eq!(metadata.ai_model, None);
    assert_eq!(metadata.generation_steps[0], "color_resolution");
    assert_eq!(metadata.business_data.business_name, "Harbor Ledger");
}

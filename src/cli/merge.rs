//! Content merge command

use brandforge_core::{
    config::ValidatorSettings, error::Result, ContentMerger, ContentPayload, DocumentValidator,
    MergeOutcome,
};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Handle the merge command
pub fn handle(base: &Path, content: &Path, validator: &ValidatorSettings) -> Result<()> {
    let outcome = merge_files(base, content, validator)?;

    for warning in &outcome.warnings {
        warn!("{}", warning);
        eprintln!("warning: {}", warning);
    }
    print!("{}", outcome.document);
    Ok(())
}

fn merge_files(base: &Path, content: &Path, validator: &ValidatorSettings) -> Result<MergeOutcome> {
    debug!(
        "Merging {} into {}",
        content.display(),
        base.display()
    );
    let base_document = fs::read_to_string(base)?;
    let payload = ContentPayload::from_json(&fs::read_to_string(content)?)?;

    let merger = ContentMerger::new(DocumentValidator::from_settings(validator));
    Ok(merger.merge(&base_document, &payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandforge_core::error::ThemeError;
    use tempfile::TempDir;

    const BASE: &str = r#"export const clientConfig = {
  content: {
    hero: {
      headline: "Old",
      cta: "Call"
    }
  }
};
"#;

    fn in_process() -> ValidatorSettings {
        ValidatorSettings {
            use_node: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_files() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("base.js");
        let content = dir.path().join("content.json");
        fs::write(&base, BASE).unwrap();
        fs::write(&content, "```json\n{\"hero\": {\"headline\": \"New\"}}\n```").unwrap();

        let outcome = merge_files(&base, &content, &in_process()).unwrap();
        assert!(outcome.document.contains(r#"headline: "New""#));
        assert!(outcome.document.contains(r#"cta: "Call""#));
        assert!(!outcome.rolled_back);
    }

    #[test]
    fn test_merge_files_rejects_bad_json() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("base.js");
        let content = dir.path().join("content.json");
        fs::write(&base, BASE).unwrap();
        fs::write(&content, "not json").unwrap();

        let result = merge_files(&base, &content, &in_process());
        assert!(matches!(result, Err(ThemeError::ContentParse(_))));
    }
}

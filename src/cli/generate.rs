//! Theme generation command

use brandforge_core::{error::Result, GeneratorConfig, LlmService, TextGenerator, ThemeGenerator};
use std::sync::Arc;
use tracing::{debug, warn};

use super::helpers::{persist_outputs, BusinessArgs};

/// Handle the generate command
pub async fn handle(business: BusinessArgs, offline: bool, config: GeneratorConfig) -> Result<()> {
    let profile = business.into_profile();

    let mut theme = if offline {
        debug!("Offline mode: using the placeholder configuration");
        ThemeGenerator::offline(&profile)
    } else {
        let llm: Arc<dyn TextGenerator> = Arc::new(LlmService::new(config.llm.clone())?);
        ThemeGenerator::new(llm, &config).generate(&profile).await?
    };

    let files = persist_outputs(&mut theme, &config.output)?;

    for warning in &theme.metadata.warnings {
        warn!("{}", warning);
    }

    println!();
    println!("Theme generated for {}", profile.business_name);
    println!("   Class: {}", theme.metadata.theme_class);
    println!(
        "   Palette: primary {} / secondary {} / accent {}",
        theme.resolution.palette.primary,
        theme.resolution.palette.secondary,
        theme.resolution.palette.accent
    );
    if let Some(harmony) = &theme.resolution.harmony {
        println!("   Harmony score: {}", harmony.harmony_score);
        for warning in &harmony.warnings {
            println!("   ! {}", warning);
        }
    }
    println!("   Files:");
    for file in files {
        println!("   - {}", file.display());
    }
    println!();

    Ok(())
}

//! Brandforge - brand palettes and generated client configurations
//!
//! Derives a coherent palette for a business from competing color sources
//! and assembles a themed website configuration:
//! - Hex/HSL conversion and 11-step shade scales
//! - Harmony scoring of primary, secondary and accent
//! - Priority resolution of user, logo-extracted and heuristic colors
//! - Bracket-aware merge of generated copy into a configuration document,
//!   with validation and rollback
//!
//! # Architecture
//!
//! - **Color**: pure palette engine (no I/O)
//! - **Document**: placeholder rendering, cleaning, merge and validation
//! - **Services**: generative-text collaborator and retry policy
//! - **Generator**: the end-to-end pipeline
//!
//! # Example
//!
//! ```ignore
//! use brandforge_core::{BusinessProfile, ThemeGenerator};
//!
//! let mut profile = BusinessProfile::new("Harbor Ledger", "Finance");
//! profile.primary_color = Some("#1e3a8a".to_string());
//!
//! let theme = ThemeGenerator::offline(&profile);
//! println!("{}", theme.theme_css);
//! ```

pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod generator;
pub mod prompts;
pub mod services;
pub mod stylesheet;
pub mod types;

// Re-export commonly used types
pub use color::{
    generate_scale, resolve_colors, validate_harmony, validate_hex, ColorResolution, HexColor,
    ShadeScale,
};
pub use config::GeneratorConfig;
pub use document::{ContentMerger, ContentPayload, DocumentValidator, MergeOutcome};
pub use error::{Result, ThemeError};
pub use generator::{GeneratedTheme, GenerationMetadata, ThemeGenerator};
pub use services::{LlmConfig, LlmService, TextGenerator};
pub use types::{BusinessProfile, ColorRole, Palette};

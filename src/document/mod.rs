//! Client configuration documents
//!
//! Rendering of the placeholder configuration, cleanup of generated text,
//! and the bracket-aware merge of generated copy into a base document.

pub mod clean;
pub mod merge;
pub mod payload;
pub mod render;
pub mod scan;
pub mod template;
pub mod validator;

pub use clean::{clean_javascript_response, clean_json_response};
pub use merge::{ContentMerger, MergeOutcome, Section};
pub use payload::{AboutContent, ContentPayload, FeatureItem, HeroContent, ServiceTier, Testimonial};
pub use render::escape_js_string;
pub use scan::{scan, CodeMap, ScanError};
pub use template::render_base_document;
pub use validator::{
    BracketScanner, DocumentValidator, NodeSyntaxChecker, SyntaxCheck, SyntaxChecker, Validation,
};

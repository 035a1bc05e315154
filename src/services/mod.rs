//! External collaborators and the retry policy around them

pub mod llm;
pub mod retry;

pub use llm::{GenerationRequest, LlmConfig, LlmService, TextGenerator};
pub use retry::{retry_with_backoff, RetryPolicy};

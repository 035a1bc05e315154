//! Common test utilities and helpers

#![allow(dead_code)]

use async_trait::async_trait;
use brandforge_core::{
    document::{SyntaxCheck, SyntaxChecker},
    error::Result,
    services::GenerationRequest,
    BusinessProfile, TextGenerator,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A profile with no colors of its own
pub fn harbor_profile() -> BusinessProfile {
    let mut profile = BusinessProfile::new("Harbor Ledger", "Finance");
    profile.business_description = "Bookkeeping for small businesses".to_string();
    profile.target_audience = "Founders and freelancers".to_string();
    profile.services = BusinessProfile::parse_services("Bookkeeping, Payroll, Tax prep");
    profile.contact_email = "hello@harborledger.example".to_string();
    profile
}

/// Extracted-color JSON in the `palette` shape
pub fn extracted_palette(primary: &str, secondary: &str, accent: &str) -> String {
    format!(
        r##"{{"palette": {{"primary": "{}", "secondary": "{}", "accent": "{}", "neutral": "#64748b"}}}}"##,
        primary, secondary, accent
    )
}

/// Replays canned responses in order and records every request
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new(responses: Vec<Result<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("ScriptedGenerator ran out of responses")
    }

    fn model_name(&self) -> String {
        "scripted".to_string()
    }
}

/// Syntax checker that rejects every document
pub struct RejectingChecker;

impl SyntaxChecker for RejectingChecker {
    fn name(&self) -> String {
        "rejecting".to_string()
    }

    fn check(&self, _text: &str) -> SyntaxCheck {
        SyntaxCheck::Invalid {
            diagnostic: "SyntaxError: Unexpected token".to_string(),
        }
    }
}

/// Syntax checker that can never run
pub struct MissingChecker;

impl SyntaxChecker for MissingChecker {
    fn name(&self) -> String {
        "missing".to_string()
    }

    fn check(&self, _text: &str) -> SyntaxCheck {
        SyntaxCheck::Unavailable {
            reason: "binary not found".to_string(),
        }
    }
}

//! Well-formedness gate for merged documents
//!
//! Checkers are tried in order. The first one that can render a verdict
//! decides; one that is unavailable defers to the next. When none can
//! check, the document is accepted and the result is marked degraded.

use super::scan::scan;
use crate::config::ValidatorSettings;
use serde::Serialize;
use std::io::{ErrorKind, Write};
use std::process::Command;
use tracing::{debug, warn};
use tree_sitter::{Node, Parser};

/// Verdict of a single checker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxCheck {
    Valid,
    Invalid { diagnostic: String },
    Unavailable { reason: String },
}

/// Capability to decide whether text is syntactically valid
#[cfg_attr(test, mockall::automock)]
pub trait SyntaxChecker: Send + Sync {
    fn name(&self) -> String;

    fn check(&self, text: &str) -> SyntaxCheck;
}

/// In-process balanced bracket and literal scan
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketScanner;

impl SyntaxChecker for BracketScanner {
    fn name(&self) -> String {
        "bracket-scanner".to_string()
    }

    fn check(&self, text: &str) -> SyntaxCheck {
        match scan(text) {
            Ok(_) => SyntaxCheck::Valid,
            Err(e) => SyntaxCheck::Invalid {
                diagnostic: e.to_string(),
            },
        }
    }
}

/// `node --check` against a temporary ES module
#[derive(Debug, Clone)]
pub struct NodeSyntaxChecker {
    binary: String,
}

impl NodeSyntaxChecker {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for NodeSyntaxChecker {
    fn default() -> Self {
        Self::new("node")
    }
}

impl SyntaxChecker for NodeSyntaxChecker {
    fn name(&self) -> String {
        format!("{} --check", self.binary)
    }

    fn check(&self, text: &str) -> SyntaxCheck {
        let mut file = match tempfile::Builder::new()
            .prefix("brandforge-")
            .suffix(".mjs")
            .tempfile()
        {
            Ok(file) => file,
            Err(e) => {
                return SyntaxCheck::Unavailable {
                    reason: format!("could not create scratch file: {}", e),
                }
            }
        };
        if let Err(e) = file.write_all(text.as_bytes()).and_then(|_| file.flush()) {
            return SyntaxCheck::Unavailable {
                reason: format!("could not write scratch file: {}", e),
            };
        }

        match Command::new(&self.binary)
            .arg("--check")
            .arg(file.path())
            .output()
        {
            Ok(output) if output.status.success() => SyntaxCheck::Valid,
            Ok(output) => SyntaxCheck::Invalid {
                diagnostic: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            },
            Err(e) if e.kind() == ErrorKind::NotFound => SyntaxCheck::Unavailable {
                reason: format!("'{}' not found", self.binary),
            },
            Err(e) => SyntaxCheck::Unavailable {
                reason: format!("could not run '{}': {}", self.binary, e),
            },
        }
    }
}

/// In-process JavaScript grammar check
///
/// Catches what the bracket scan cannot, such as a missing comma between
/// properties. A fresh parser is built per check since `Parser` is not `Sync`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSitterChecker;

impl SyntaxChecker for TreeSitterChecker {
    fn name(&self) -> String {
        "tree-sitter-javascript".to_string()
    }

    fn check(&self, text: &str) -> SyntaxCheck {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&tree_sitter_javascript::LANGUAGE.into()) {
            return SyntaxCheck::Unavailable {
                reason: format!("Failed to load javascript grammar: {}", e),
            };
        }

        let Some(tree) = parser.parse(text, None) else {
            return SyntaxCheck::Unavailable {
                reason: "parser returned no tree".to_string(),
            };
        };

        let root = tree.root_node();
        if !root.has_error() {
            return SyntaxCheck::Valid;
        }

        let diagnostic = match first_error(root) {
            Some(node) => {
                let at = node.start_position();
                let what = if node.is_missing() {
                    format!("missing '{}'", node.kind())
                } else {
                    "unexpected syntax".to_string()
                };
                format!("{} at line {}, column {}", what, at.row + 1, at.column + 1)
            }
            None => "syntax error".to_string(),
        };
        SyntaxCheck::Invalid { diagnostic }
    }
}

/// Depth-first search for the earliest error or missing node
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .find_map(first_error)
}

/// Outcome of [`DocumentValidator::is_well_formed`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub well_formed: bool,
    /// No checker could run; the document was accepted unchecked
    pub degraded: bool,
    pub diagnostic: Option<String>,
    /// Checker that rendered the verdict
    pub checker: Option<String>,
}

pub struct DocumentValidator {
    checkers: Vec<Box<dyn SyntaxChecker>>,
}

impl DocumentValidator {
    pub fn new(checkers: Vec<Box<dyn SyntaxChecker>>) -> Self {
        Self { checkers }
    }

    /// Only the in-process scanner
    pub fn scanner_only() -> Self {
        Self::new(vec![Box::new(BracketScanner)])
    }

    /// Node first when enabled, then the grammar check when enabled, then
    /// the bracket scanner
    pub fn from_settings(settings: &ValidatorSettings) -> Self {
        let mut checkers: Vec<Box<dyn SyntaxChecker>> = Vec::new();
        if settings.use_node {
            checkers.push(Box::new(NodeSyntaxChecker::new(settings.node_binary.clone())));
        }
        if settings.use_tree_sitter {
            checkers.push(Box::new(TreeSitterChecker));
        }
        checkers.push(Box::new(BracketScanner));
        Self::new(checkers)
    }

    pub fn is_well_formed(&self, text: &str) -> Validation {
        let mut unavailable = Vec::new();

        for checker in &self.checkers {
            let name = checker.name();
            match checker.check(text) {
                SyntaxCheck::Valid => {
                    debug!("Document passed {}", name);
                    return Validation {
                        well_formed: true,
                        degraded: false,
                        diagnostic: None,
                        checker: Some(name),
                    };
                }
                SyntaxCheck::Invalid { diagnostic } => {
                    debug!("Document failed {}: {}", name, diagnostic);
                    return Validation {
                        well_formed: false,
                        degraded: false,
                        diagnostic: Some(diagnostic),
                        checker: Some(name),
                    };
                }
                SyntaxCheck::Unavailable { reason } => {
                    debug!("{} unavailable: {}", name, reason);
                    unavailable.push(format!("{}: {}", name, reason));
                }
            }
        }

        let diagnostic = if unavailable.is_empty() {
            "no syntax checker configured".to_string()
        } else {
            unavailable.join("; ")
        };
        warn!(
            "Document accepted without a syntax check ({})",
            diagnostic
        );
        Validation {
            well_formed: true,
            degraded: true,
            diagnostic: Some(diagnostic),
            checker: None,
        }
    }
}

impl Default for DocumentValidator {
    fn default() -> Self {
        Self::scanner_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable(reason: &'static str) -> MockSyntaxChecker {
        let mut checker = MockSyntaxChecker::new();
        checker.expect_name().return_const("mock".to_string());
        checker
            .expect_check()
            .returning(move |_| SyntaxCheck::Unavailable {
                reason: reason.to_string(),
            });
        checker
    }

    #[test]
    fn test_scanner_verdicts() {
        let validator = DocumentValidator::scanner_only();
        let ok = validator.is_well_formed("export const a = { b: [1, 2] };");
        assert!(ok.well_formed);
        assert!(!ok.degraded);
        assert_eq!(ok.checker.as_deref(), Some("bracket-scanner"));

        let bad = validator.is_well_formed("export const a = { b: [1, 2 };");
        assert!(!bad.well_formed);
        assert!(bad.diagnostic.unwrap().contains("line 1"));
    }

    #[test]
    fn test_unavailable_checker_defers_to_next() {
        let validator = DocumentValidator::new(vec![
            Box::new(unavailable("missing")),
            Box::new(BracketScanner),
        ]);
        let result = validator.is_well_formed("{ a: ");
        assert!(!result.well_formed);
        assert!(!result.degraded);
    }

    #[test]
    fn test_all_unavailable_is_degraded_acceptance() {
        let validator = DocumentValidator::new(vec![Box::new(unavailable("no runtime"))]);
        let result = validator.is_well_formed("{{{{");
        assert!(result.well_formed);
        assert!(result.degraded);
        assert_eq!(result.diagnostic.as_deref(), Some("mock: no runtime"));
        assert_eq!(result.checker, None);
    }

    #[test]
    fn test_missing_node_binary_is_unavailable() {
        let checker = NodeSyntaxChecker::new("brandforge-no-such-node-binary");
        assert!(matches!(
            checker.check("export const a = 1;"),
            SyntaxCheck::Unavailable { .. }
        ));
    }

    #[test]
    fn test_from_settings_without_node() {
        let settings = ValidatorSettings {
            use_node: false,
            use_tree_sitter: false,
            node_binary: "node".to_string(),
        };
        let validator = DocumentValidator::from_settings(&settings);
        assert_eq!(validator.checkers.len(), 1);
        assert!(validator.is_well_formed("{ a: 1 }").well_formed);
    }

    #[test]
    fn test_from_settings_chain_order() {
        let validator = DocumentValidator::from_settings(&ValidatorSettings::default());
        let names: Vec<String> = validator.checkers.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec!["node --check", "tree-sitter-javascript", "bracket-scanner"]
        );
    }

    #[test]
    fn test_tree_sitter_verdicts() {
        let checker = TreeSitterChecker;
        assert_eq!(
            checker.check("export const a = { b: [1, 2], c: \"x\" };"),
            SyntaxCheck::Valid
        );

        // Balanced brackets, but not JavaScript
        let missing_comma = "export const a = {\n  b: 1\n  c: 2\n};";
        assert_eq!(BracketScanner.check(missing_comma), SyntaxCheck::Valid);
        match checker.check(missing_comma) {
            SyntaxCheck::Invalid { diagnostic } => assert!(diagnostic.contains("line")),
            other => panic!("expected a syntax error, got {other:?}"),
        }

        assert!(matches!(
            checker.check("export const a = { b: [1, 2 };"),
            SyntaxCheck::Invalid { .. }
        ));
    }

    #[test]
    fn test_grammar_check_decides_before_scanner() {
        let settings = ValidatorSettings {
            use_node: false,
            ..ValidatorSettings::default()
        };
        let validator = DocumentValidator::from_settings(&settings);

        let result = validator.is_well_formed("export const a = { b: 1 c: 2 };");
        assert!(!result.well_formed);
        assert_eq!(result.checker.as_deref(), Some("tree-sitter-javascript"));

        let result = validator.is_well_formed("export const a = { b: 1, c: 2 };");
        assert!(result.well_formed);
        assert_eq!(result.checker.as_deref(), Some("tree-sitter-javascript"));
    }
}

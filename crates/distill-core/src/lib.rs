//! Distill Core - multi-pass, budget-driven syntactic optimizer
//!
//! # Overview
//!
//! `distill-core` is a pure library that shrinks source files into a smaller,
//! still syntactically recognizable rendering sized to a token budget.
//! Comments, string/collection literals, function bodies, and private
//! declarations are selectively elided, truncated, or summarized, while
//! imports, type declarations, and function signatures are preserved so a
//! reader can still reason about the file's shape.
//!
//! # Architecture
//!
//! **IMPORTANT: This is a LIBRARY with NO I/O.**
//! - Accepts `&str` (source code), not file paths
//! - Returns `Result<OptimizeResult>`, not stdout writes
//! - Pure transformations, no side effects
//!
//! The pipeline: `parse → classify → [pass₁ → pass₂ → … → passₙ → measure]`
//! (looped by the budget controller) `→ render`.
//!
//! CLI interfaces handle I/O separately.
//!
//! # Example
//!
//! ```no_run
//! use distill_core::{optimize_source, Language, Policy, Preset};
//!
//! let source = "fn add(a: i32, b: i32) -> i32 { a + b }";
//! let policy = Policy::with_preset(Preset::Structure);
//! let result = optimize_source(source, Language::Rust, &policy)?;
//! # Ok::<(), distill_core::DistillError>(())
//! ```
//!
//! # Design Principles
//!
//! 1. **Zero-copy where possible** - classified nodes carry byte ranges, not owned text
//! 2. **Result types everywhere** - NO panics (enforced by clippy)
//! 3. **Dependency injection** - NO global state; the tokenizer is passed in
//! 4. **Fixed pipeline, escalating budget** - passes never reorder themselves

mod budget;
mod classify;
mod elision;
mod error;
mod language;
mod parser;
mod passes;
mod policy;
mod render;
mod tokenizer;

pub use budget::{BudgetState, OptimizeResult};
pub use elision::{DeclNoun, ElisionKind, ElisionRecord};
pub use error::{DistillError, Result};
pub use language::Language;
pub use parser::Parser;
pub use policy::{BodyBraceStyle, CommentsMode, FunctionBodiesMode, ImportsMode, LiteralsMode, Policy, Preset};
pub use tokenizer::{TiktokenTokenizer, Tokenizer};

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

// ============================================================================
// Public API - Core Optimization Functions
// ============================================================================

/// Optimize source code under a policy, using the reference `tiktoken-rs`
/// tokenizer.
///
/// This is the PRIMARY function most callers want.
///
/// # Arguments
///
/// * `source` - Source code as string slice (zero-copy input)
/// * `language` - Programming language for parsing
/// * `policy` - Optimization policy (pass modes, budget)
///
/// # Errors
///
/// - [`DistillError::PolicyError`] - policy failed validation
/// - [`DistillError::TokenizerError`] - the reference tokenizer failed to load
pub fn optimize_source(source: &str, language: Language, policy: &Policy) -> Result<OptimizeResult> {
    let tokenizer = TiktokenTokenizer::new()?;
    run_pipeline(source, language, false, policy, &tokenizer, None)
}

/// Optimize source code with an injected [`Tokenizer`] and an optional
/// cancellation flag.
///
/// Advanced API for callers that need a custom tokenizer (the [`Tokenizer`]
/// trait is pluggable) or batch-level cancellation.
///
/// # Errors
///
/// Same as [`optimize_source`], plus whatever the injected tokenizer itself
/// can produce.
pub fn optimize_with_tokenizer(
    source: &str,
    language: Language,
    policy: &Policy,
    tokenizer: &dyn Tokenizer,
    cancel: Option<&Arc<AtomicBool>>,
) -> Result<OptimizeResult> {
    run_pipeline(source, language, false, policy, tokenizer, cancel)
}

/// Optimize source code with automatic language detection from a file path.
///
/// Convenience function that detects language from file extension and
/// whether the extension marks a header file (all forward declarations and
/// prototypes public by definition).
///
/// # Errors
///
/// - [`DistillError::UnsupportedLanguage`] - could not detect language from path
/// - All errors from [`optimize_source`]
pub fn optimize_auto(source: &str, path: &std::path::Path, policy: &Policy) -> Result<OptimizeResult> {
    let language = Language::from_path(path).ok_or_else(|| DistillError::UnsupportedLanguage(path.to_path_buf()))?;
    let is_header = Language::is_header_extension(path);
    let tokenizer = TiktokenTokenizer::new()?;
    run_pipeline(source, language, is_header, policy, &tokenizer, None)
}

fn run_pipeline(
    source: &str,
    language: Language,
    is_header: bool,
    policy: &Policy,
    tokenizer: &dyn Tokenizer,
    cancel: Option<&Arc<AtomicBool>>,
) -> Result<OptimizeResult> {
    policy.validate()?;

    if source.is_empty() {
        return Ok(OptimizeResult {
            output: String::new(),
            token_count: Some(0),
            final_state: BudgetState::Satisfied,
            budget_unreachable: false,
            aborted: false,
        });
    }

    let mut parser = Parser::new(language)?;
    let tree = match parser.parse(source) {
        Ok(tree) => tree,
        Err(_) => {
            // Parse error recovery: return input unchanged with the original
            // state, never surfaced as a hard error to the caller.
            return Ok(OptimizeResult {
                output: source.to_string(),
                token_count: None,
                final_state: BudgetState::Final,
                budget_unreachable: false,
                aborted: false,
            });
        }
    };

    let root = classify::classify(source, &tree, language, is_header)?;
    budget::optimize(source, &root, language, policy, tokenizer, cancel)
}

// ============================================================================
// Language Detection Utilities
// ============================================================================

/// Detect language from file extension.
///
/// # Examples
///
/// ```
/// use distill_core::{detect_language, Language};
///
/// assert_eq!(detect_language("rs"), Some(Language::Rust));
/// assert_eq!(detect_language("unknown"), None);
/// ```
pub fn detect_language(extension: &str) -> Option<Language> {
    Language::from_extension(extension)
}

/// Detect language from file path.
pub fn detect_language_from_path(path: &std::path::Path) -> Option<Language> {
    Language::from_path(path)
}

// ============================================================================
// Version Information
// ============================================================================

/// Get library version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Get list of supported languages.
pub fn supported_languages() -> &'static [Language] {
    &[
        Language::TypeScript,
        Language::JavaScript,
        Language::Python,
        Language::Rust,
        Language::Go,
        Language::Java,
        Language::C,
        Language::Cpp,
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_supported_languages() {
        assert_eq!(supported_languages().len(), 8);
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("rs"), Some(Language::Rust));
        assert_eq!(detect_language("unknown"), None);
    }

    #[test]
    fn noop_policy_is_identity() {
        let source = "fn main() {\n    let x = 1;\n}\n";
        let result = optimize_source(source, Language::Rust, &Policy::default()).unwrap();
        assert_eq!(result.output, source);
    }

    #[test]
    fn structure_preset_strips_function_body() {
        let source = "fn add(a: i32, b: i32) -> i32 {\n    let sum = a + b;\n    sum\n}\n";
        let policy = Policy::with_preset(Preset::Structure);
        let result = optimize_source(source, Language::Rust, &policy).unwrap();
        assert!(result.output.contains("function body omitted"));
        assert!(!result.output.contains("let sum"));
    }

    #[test]
    fn empty_file_returns_empty() {
        let result = optimize_source("", Language::Rust, &Policy::default()).unwrap();
        assert_eq!(result.output, "");
    }

    #[test]
    fn unsupported_extension_errors() {
        let result = optimize_auto("x", std::path::Path::new("file.unknown"), &Policy::default());
        assert!(matches!(result, Err(DistillError::UnsupportedLanguage(_))));
    }
}

//! Error types for Distill operations
//!
//! ARCHITECTURE: Using thiserror for ergonomic error handling.
//! All library functions return Result<T, DistillError>.
//! NO panics allowed in library code (enforced by clippy lints).

use std::path::PathBuf;
use thiserror::Error;

/// Error taxonomy for the optimizer core
#[derive(Debug, Error)]
pub enum DistillError {
    /// Language could not be detected from file path
    #[error("unsupported language for file: {0}")]
    UnsupportedLanguage(PathBuf),

    /// tree-sitter failed to parse source code
    #[error("failed to parse source code: {0}")]
    ParseError(String),

    /// tree-sitter language loading error
    #[error("tree-sitter language error: {0}")]
    TreeSitterError(#[from] tree_sitter::LanguageError),

    /// Unrecognized option or out-of-range budget
    #[error("invalid policy: {0}")]
    PolicyError(String),

    /// Tokenizer backend failed; the controller aborts and returns input unchanged
    #[error("tokenizer error: {0}")]
    TokenizerError(String),

    /// UTF-8 conversion error
    #[error("UTF-8 error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),
}

/// Result type alias for Distill operations
pub type Result<T> = std::result::Result<T, DistillError>;

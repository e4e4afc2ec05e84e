//! Parser module - tree-sitter wrapper
//!
//! ARCHITECTURE: This is the ONLY module that imports tree-sitter directly
//! besides `classify`, which walks the tree it produces.
//!
//! Design: a `Parser` instance is bound to a specific language.

pub(crate) mod language;

use crate::error::{DistillError, Result};
use crate::Language;

/// Wraps a `tree_sitter::Parser` bound to one [`Language`].
pub struct Parser {
    language: Language,
    tree_sitter_parser: tree_sitter::Parser,
}

impl Parser {
    /// Create a parser for a specific language.
    ///
    /// # Errors
    /// Returns [`DistillError::TreeSitterError`] if the grammar fails to load.
    pub fn new(language: Language) -> Result<Self> {
        let ts_language = language.to_tree_sitter();

        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&ts_language)?;

        Ok(Self {
            language,
            tree_sitter_parser: parser,
        })
    }

    /// Parse source code into a tree-sitter AST.
    ///
    /// ARCHITECTURE: returns the raw `tree_sitter::Tree`; the classification
    /// layer operates directly on it rather than building a second AST.
    ///
    /// # Errors
    /// Returns [`DistillError::ParseError`] if parsing fails outright (this is
    /// rare — tree-sitter is error-tolerant and usually returns a tree with
    /// error nodes instead).
    pub fn parse(&mut self, source: &str) -> Result<tree_sitter::Tree> {
        self.tree_sitter_parser
            .parse(source, None)
            .ok_or_else(|| DistillError::ParseError(format!("failed to parse {} source", self.language.name())))
    }

    /// Language this parser is bound to.
    pub fn language(&self) -> Language {
        self.language
    }
}

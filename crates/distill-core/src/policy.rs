//! Policy configuration for the optimization pipeline.
//!
//! ARCHITECTURE: a builder-style config struct, generalized from a single
//! exclusive mode selector into one independently-configurable option per
//! pass.

use crate::error::{DistillError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentsMode {
    KeepAll,
    KeepDoc,
    KeepFirstSentence,
    StripAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportsMode {
    KeepAll,
    SummarizeGroups,
    StripAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralsMode {
    KeepAll,
    TrimLarge,
    MaxTokens(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionBodiesMode {
    KeepAll,
    StripLarge(u32),
    StripAll,
    MaxTokens(u32),
}

/// Whether an elided function body keeps its enclosing braces.
///
/// Both forms show up in real-world usage, so this implementation exposes
/// the choice instead of guessing. Default is `Replace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyBraceStyle {
    #[default]
    Replace,
    Keep,
}

/// A preset expands to a concrete [`Policy`] — CLI-level sugar that gives an
/// ergonomic named shortcut over the otherwise fully general per-pass
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Keep everything; a no-op policy.
    Full,
    /// Strip function bodies, keep declarations and doc comments.
    Structure,
    /// Public API surface only: signatures and types, no private members.
    Signatures,
    /// Types and declarations only, bodies and non-doc comments stripped.
    Types,
}

impl Preset {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Some(Self::Full),
            "structure" => Some(Self::Structure),
            "signatures" => Some(Self::Signatures),
            "types" => Some(Self::Types),
            _ => None,
        }
    }

    pub fn to_policy(self) -> Policy {
        match self {
            Self::Full => Policy::default(),
            Self::Structure => Policy {
                comments: CommentsMode::KeepDoc,
                function_bodies: FunctionBodiesMode::StripAll,
                ..Policy::default()
            },
            Self::Signatures => Policy {
                comments: CommentsMode::KeepDoc,
                imports: ImportsMode::SummarizeGroups,
                function_bodies: FunctionBodiesMode::StripAll,
                public_api_only: true,
                ..Policy::default()
            },
            Self::Types => Policy {
                comments: CommentsMode::StripAll,
                imports: ImportsMode::StripAll,
                literals: LiteralsMode::TrimLarge,
                function_bodies: FunctionBodiesMode::StripAll,
                public_api_only: true,
                ..Policy::default()
            },
        }
    }
}

/// Immutable configuration consumed by the pass pipeline and budget controller
///.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub comments: CommentsMode,
    pub imports: ImportsMode,
    pub literals: LiteralsMode,
    pub function_bodies: FunctionBodiesMode,
    pub public_api_only: bool,
    pub target_tokens: Option<usize>,
    pub body_brace_style: BodyBraceStyle,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            comments: CommentsMode::KeepAll,
            imports: ImportsMode::KeepAll,
            literals: LiteralsMode::KeepAll,
            function_bodies: FunctionBodiesMode::KeepAll,
            public_api_only: false,
            target_tokens: None,
            body_brace_style: BodyBraceStyle::Replace,
        }
    }
}

impl Policy {
    pub fn with_preset(preset: Preset) -> Self {
        preset.to_policy()
    }

    pub fn with_target_tokens(mut self, target: usize) -> Self {
        self.target_tokens = Some(target);
        self
    }

    pub fn with_comments(mut self, mode: CommentsMode) -> Self {
        self.comments = mode;
        self
    }

    pub fn with_imports(mut self, mode: ImportsMode) -> Self {
        self.imports = mode;
        self
    }

    pub fn with_literals(mut self, mode: LiteralsMode) -> Self {
        self.literals = mode;
        self
    }

    pub fn with_function_bodies(mut self, mode: FunctionBodiesMode) -> Self {
        self.function_bodies = mode;
        self
    }

    pub fn with_public_api_only(mut self, value: bool) -> Self {
        self.public_api_only = value;
        self
    }

    pub fn with_body_brace_style(mut self, style: BodyBraceStyle) -> Self {
        self.body_brace_style = style;
        self
    }

    /// Validates budget and threshold fields fall in sane ranges.
    ///
    /// # Errors
    /// Returns [`DistillError::PolicyError`] for an out-of-range budget.
    pub fn validate(&self) -> Result<()> {
        if let Some(target) = self.target_tokens {
            if target == 0 {
                return Err(DistillError::PolicyError(
                    "target_tokens must be greater than zero".to_string(),
                ));
            }
        }
        if let LiteralsMode::MaxTokens(n) = self.literals {
            if n == 0 {
                return Err(DistillError::PolicyError("literals max_tokens must be > 0".to_string()));
            }
        }
        Ok(())
    }

    /// Whether this policy performs no elision whatsoever (invariant 2).
    pub fn is_noop(&self) -> bool {
        self.comments == CommentsMode::KeepAll
            && self.imports == ImportsMode::KeepAll
            && self.literals == LiteralsMode::KeepAll
            && self.function_bodies == FunctionBodiesMode::KeepAll
            && !self.public_api_only
    }
}

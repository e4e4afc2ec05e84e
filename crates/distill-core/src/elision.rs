//! Elision records produced by optimization passes, consumed by the renderer.

/// Kind of content an [`ElisionRecord`] replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElisionKind {
    Comment,
    Docstring,
    ImportGroup,
    LiteralString,
    LiteralCollection,
    FunctionBody,
    Member,
    ToplevelDecl,
}

/// What kind of top-level or member declaration a [`ElisionKind::ToplevelDecl`]
/// or [`ElisionKind::Member`] record summarizes — carried separately from
/// `ElisionKind` so the renderer can pick the right noun (`function`, `typedef`,
/// `class`, `variable`, `method`, `field`, …) without re-deriving it from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclNoun {
    Function,
    Method,
    Typedef,
    Class,
    Struct,
    Enum,
    Variable,
    Field,
}

impl DeclNoun {
    pub fn singular(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Method => "method",
            Self::Typedef => "typedef",
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Variable => "variable",
            Self::Field => "field",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Self::Function => "functions",
            Self::Method => "methods",
            Self::Typedef => "typedefs",
            Self::Class => "classes",
            Self::Struct => "structs",
            Self::Enum => "enums",
            Self::Variable => "variables",
            Self::Field => "fields",
        }
    }
}

/// A single replacement a pass made, recorded for the renderer to splice in.
///
/// `original_node_ref` is a byte range `(start, end)` into the original
/// source — classified nodes never carry a back-pointer into the tree.
#[derive(Debug, Clone)]
pub struct ElisionRecord {
    pub kind: ElisionKind,
    pub original_node_ref: (usize, usize),
    pub replacement_text: String,
    pub dropped_token_delta: u32,
    pub dropped_line_count: u32,
    pub summary_count: Option<u32>,
    pub decl_noun: Option<DeclNoun>,
}

impl ElisionRecord {
    pub fn new(kind: ElisionKind, range: (usize, usize), replacement_text: impl Into<String>) -> Self {
        Self {
            kind,
            original_node_ref: range,
            replacement_text: replacement_text.into(),
            dropped_token_delta: 0,
            dropped_line_count: 0,
            summary_count: None,
            decl_noun: None,
        }
    }

    pub fn with_tokens(mut self, dropped_token_delta: u32) -> Self {
        self.dropped_token_delta = dropped_token_delta;
        self
    }

    pub fn with_lines(mut self, dropped_line_count: u32) -> Self {
        self.dropped_line_count = dropped_line_count;
        self
    }

    pub fn with_summary_count(mut self, summary_count: u32) -> Self {
        self.summary_count = Some(summary_count);
        self
    }

    pub fn with_decl_noun(mut self, decl_noun: DeclNoun) -> Self {
        self.decl_noun = Some(decl_noun);
        self
    }

    pub fn start(&self) -> usize {
        self.original_node_ref.0
    }

    pub fn end(&self) -> usize {
        self.original_node_ref.1
    }
}

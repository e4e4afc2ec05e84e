//! Classification layer — walks a tree-sitter CST and tags each node with a
//! uniform role vocabulary, so the pass layer never has to branch on a
//! grammar's raw node-kind strings.
//!
//! ARCHITECTURE: a depth- and node-count-bounded recursive walk over
//! `tree_sitter::Node` that, instead of directly producing a replacement map,
//! builds a parallel `ClassifiedNode` tree that every pass then reads and
//! rewrites.

use crate::error::{DistillError, Result};
use crate::parser::language::{self, GrammarProfile};
use crate::Language;
use tree_sitter::Node;

/// Maximum AST recursion depth to prevent stack overflow attacks.
const MAX_AST_DEPTH: usize = 500;

/// Maximum number of AST nodes to prevent memory exhaustion.
const MAX_AST_NODES: usize = 100_000;

/// Closed role vocabulary a classified node may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Import,
    Docstring,
    LineComment,
    BlockComment,
    StringLiteral,
    CollectionLiteral,
    FunctionDefinition,
    MethodDefinition,
    ClassDefinition,
    TypeDeclaration,
    VariableDeclaration,
    FunctionBody,
    HeaderGuard,
    ForwardDeclaration,
    NamespaceAnonymous,
}

/// Visibility as derived purely from syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
    Unknown,
}

/// A CST node extended with roles, visibility, and byte/line ranges.
///
/// Invariant: `byte_range`/`line_range` always track the original source and
/// are never mutated after classification — passes record *elisions*
/// alongside the tree rather than editing ranges in place.
#[derive(Debug, Clone)]
pub struct ClassifiedNode {
    /// tree-sitter node-kind strings are `&'static str` — they're interned in
    /// the grammar's own static kind-name table, not borrowed from the source.
    pub kind: &'static str,
    pub roles: Vec<Role>,
    pub visibility: Visibility,
    pub byte_range: (usize, usize),
    pub line_range: (usize, usize),
    pub body_range: Option<(usize, usize)>,
    pub children: Vec<ClassifiedNode>,
}

impl ClassifiedNode {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn start_byte(&self) -> usize {
        self.byte_range.0
    }

    pub fn end_byte(&self) -> usize {
        self.byte_range.1
    }

    pub fn line_span(&self) -> u32 {
        (self.line_range.1.saturating_sub(self.line_range.0) + 1) as u32
    }
}

/// Traversal state threaded through recursive classification.
struct Context<'a> {
    source: &'a [u8],
    profile: GrammarProfile,
    language: Language,
    is_header: bool,
    node_count: usize,
}

/// Classify a parsed tree into the uniform [`ClassifiedNode`] representation.
///
/// # Errors
/// Returns [`DistillError::ParseError`] if the tree exceeds the AST depth or
/// node-count security limits.
pub fn classify(source: &str, tree: &tree_sitter::Tree, language: Language, is_header: bool) -> Result<ClassifiedNode> {
    let mut ctx = Context {
        source: source.as_bytes(),
        profile: language::profile(language),
        language,
        is_header,
        node_count: 0,
    };
    classify_node(tree.root_node(), &mut ctx, 0, false)
}

fn classify_node(node: Node, ctx: &mut Context, depth: usize, inside_anonymous_namespace: bool) -> Result<ClassifiedNode> {
    if depth > MAX_AST_DEPTH {
        return Err(DistillError::ParseError(format!(
            "maximum AST depth exceeded: {MAX_AST_DEPTH} (possible malicious input with deeply nested declarations)"
        )));
    }
    ctx.node_count += 1;
    if ctx.node_count > MAX_AST_NODES {
        return Err(DistillError::ParseError(format!(
            "too many AST nodes: {} (max: {MAX_AST_NODES}). Possible malicious input.",
            ctx.node_count
        )));
    }

    let kind = node.kind();
    let roles = assign_roles(node, kind, ctx);
    let is_anon_ns = ctx.profile.namespace_kinds.contains(&kind) && node.child_by_field_name("name").is_none();
    let visibility = compute_visibility(node, kind, ctx, inside_anonymous_namespace);
    let body_range = find_body_node(node, &ctx.profile).map(|b| (b.start_byte(), b.end_byte()));

    let mut children = Vec::with_capacity(node.child_count());
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        children.push(classify_node(child, ctx, depth + 1, inside_anonymous_namespace || is_anon_ns)?);
    }

    Ok(ClassifiedNode {
        kind,
        roles,
        visibility,
        byte_range: (node.start_byte(), node.end_byte()),
        line_range: (node.start_position().row + 1, node.end_position().row + 1),
        body_range,
        children,
    })
}

fn assign_roles(node: Node, kind: &str, ctx: &Context) -> Vec<Role> {
    let profile = &ctx.profile;
    let mut roles = Vec::new();

    if profile.import_kinds.contains(&kind) {
        roles.push(Role::Import);
    }
    if profile.function_kinds.contains(&kind) {
        roles.push(Role::FunctionDefinition);
    }
    if profile.method_kinds.contains(&kind) && is_method(node, ctx.language) {
        roles.push(Role::MethodDefinition);
    }
    if profile.class_kinds.contains(&kind) || profile.struct_kinds.contains(&kind) {
        roles.push(Role::ClassDefinition);
    }
    if profile.type_alias_kinds.contains(&kind) || profile.interface_kinds.contains(&kind) || profile.enum_kinds.contains(&kind) {
        roles.push(Role::TypeDeclaration);
    }
    if profile.variable_kinds.contains(&kind) {
        roles.push(Role::VariableDeclaration);
    }
    if profile.body_kinds.contains(&kind) {
        roles.push(Role::FunctionBody);
    }
    if profile.namespace_kinds.contains(&kind) && node.child_by_field_name("name").is_none() {
        roles.push(Role::NamespaceAnonymous);
    }

    if profile.line_comment_kinds.contains(&kind) || profile.block_comment_kinds.contains(&kind) {
        if is_docstring(node, kind, ctx) {
            roles.push(Role::Docstring);
        } else if profile.block_comment_kinds.contains(&kind) || node_text(node, ctx.source).starts_with("/*") {
            roles.push(Role::BlockComment);
        } else {
            roles.push(Role::LineComment);
        }
    }

    if profile.string_literal_kinds.contains(&kind) {
        roles.push(Role::StringLiteral);
    }
    if profile.collection_literal_kinds.contains(&kind) {
        roles.push(Role::CollectionLiteral);
    }

    if ctx.language.is_c_family() {
        if Some(kind) == profile.preproc_include_kind {
            // already tagged Import above
        }
        if profile.preproc_conditional_kinds.contains(&kind) && is_header_guard(node, ctx) {
            roles.push(Role::HeaderGuard);
        }
        if kind == "declaration" && node_has_function_declarator(node) {
            roles.push(Role::ForwardDeclaration);
        }
    }

    roles
}

fn is_method(node: Node, _language: Language) -> bool {
    // A function/method-shaped node counts as a method when it sits inside a
    // class/struct body rather than at file/module scope.
    let mut cur = node.parent();
    while let Some(p) = cur {
        match p.kind() {
            "class_body" | "field_declaration_list" | "declaration_list" => return true,
            "program" | "translation_unit" | "module" | "source_file" => return false,
            _ => cur = p.parent(),
        }
    }
    false
}

fn is_docstring(node: Node, kind: &str, ctx: &Context) -> bool {
    match ctx.language {
        Language::Python => {
            // First string-literal statement in a module/class/function body.
            kind == "string" && is_first_statement_in_block(node)
        }
        Language::C | Language::Cpp => {
            kind == "comment"
                && node_text(node, ctx.source).starts_with("/**")
                && precedes_a_declaration(node)
        }
        Language::Rust => {
            let text = node_text(node, ctx.source);
            (text.starts_with("///") || text.starts_with("//!")) && precedes_a_declaration(node)
        }
        Language::TypeScript | Language::JavaScript => {
            node_text(node, ctx.source).starts_with("/**") && precedes_a_declaration(node)
        }
        Language::Go | Language::Java => {
            // By convention, a line-comment block immediately above a
            // declaration is its doc comment (no special prefix required).
            kind == "comment" && precedes_a_declaration(node)
        }
    }
}

fn is_first_statement_in_block(node: Node) -> bool {
    let Some(parent) = node.parent() else { return false };
    let expr_stmt = if parent.kind() == "expression_statement" { parent } else { node };
    let Some(block) = expr_stmt.parent() else { return false };
    let mut cursor = block.walk();
    block
        .children(&mut cursor)
        .find(|c| c.kind() != "comment")
        .map(|first| first.id() == expr_stmt.id())
        .unwrap_or(false)
}

fn precedes_a_declaration(node: Node) -> bool {
    let mut sib = node.next_sibling();
    while let Some(s) = sib {
        if s.kind() == "comment" {
            sib = s.next_sibling();
            continue;
        }
        return true;
    }
    false
}

fn is_header_guard(node: Node, ctx: &Context) -> bool {
    ctx.is_header && node.parent().map(|p| p.kind() == "translation_unit").unwrap_or(true)
}

fn node_has_function_declarator(node: Node) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|c| c.kind() == "function_declarator")
}

fn find_body_node<'a>(node: Node<'a>, profile: &GrammarProfile) -> Option<Node<'a>> {
    if !profile.function_kinds.contains(&node.kind()) && !profile.method_kinds.contains(&node.kind()) {
        return None;
    }
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|child| profile.body_kinds.contains(&child.kind()))
}

fn compute_visibility(node: Node, kind: &str, ctx: &Context, inside_anonymous_namespace: bool) -> Visibility {
    if inside_anonymous_namespace {
        return Visibility::Private;
    }
    match ctx.language {
        Language::C | Language::Cpp => c_family_visibility(node, kind, ctx),
        Language::Python => python_visibility(node, kind, ctx),
        Language::Rust => rust_visibility(node, kind, ctx),
        Language::Go => go_visibility(node, kind, ctx),
        Language::Java => java_visibility(node, kind, ctx),
        Language::TypeScript | Language::JavaScript => Visibility::Unknown,
    }
}

fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn declared_name<'a>(node: Node<'a>, source: &'a [u8]) -> Option<&'a str> {
    node.child_by_field_name("name")
        .or_else(|| node.child_by_field_name("declarator"))
        .and_then(|n| n.utf8_text(source).ok())
}

fn c_family_visibility(node: Node, kind: &str, ctx: &Context) -> Visibility {
    let profile = &ctx.profile;
    if ctx.is_header && (profile.function_kinds.contains(&kind) || kind == "declaration") {
        return Visibility::Public;
    }
    if profile.function_kinds.contains(&kind) || profile.variable_kinds.contains(&kind) {
        let is_static = node
            .children(&mut node.walk())
            .any(|c| ctx.profile.static_storage_text == Some(node_text(c, ctx.source)));
        if is_static {
            return Visibility::Private;
        }
    }
    if let Some(access) = enclosing_access_specifier(node, profile, ctx.source) {
        return access;
    }
    Visibility::Public
}

/// Walks upward to the nearest class/struct body, then scans preceding
/// siblings for the most recent `access_specifier` label.
///
/// A C++ `class` defaults to private until the first explicit specifier; a
/// `struct` defaults to public. We only reach this function for `class_specifier`
/// member scopes (the only case `access_specifier_kind` is `Some`), so default
/// to private and let an explicit `public:` section override.
fn enclosing_access_specifier(node: Node, profile: &GrammarProfile, source: &[u8]) -> Option<Visibility> {
    let access_kind = profile.access_specifier_kind?;
    let mut cur = node.parent()?;
    while !profile.class_body_kinds.contains(&cur.kind()) {
        cur = cur.parent()?;
    }
    let body = cur;
    let target_start = node.start_byte();
    let mut current_vis = Visibility::Private;
    let mut cursor = body.walk();
    for child in body.children(&mut cursor) {
        if child.start_byte() >= target_start {
            break;
        }
        if child.kind() == access_kind {
            current_vis = match node_text(child, source) {
                "public" => Visibility::Public,
                _ => Visibility::Private,
            };
        }
    }
    Some(current_vis)
}

fn python_visibility(node: Node, kind: &str, ctx: &Context) -> Visibility {
    if ctx.profile.function_kinds.contains(&kind) || ctx.profile.class_kinds.contains(&kind) {
        if let Some(name) = declared_name(node, ctx.source) {
            return if name.starts_with('_') { Visibility::Private } else { Visibility::Public };
        }
    }
    Visibility::Unknown
}

fn rust_visibility(node: Node, kind: &str, ctx: &Context) -> Visibility {
    let is_item = ctx.profile.function_kinds.contains(&kind)
        || ctx.profile.class_kinds.contains(&kind)
        || ctx.profile.interface_kinds.contains(&kind)
        || ctx.profile.type_alias_kinds.contains(&kind)
        || ctx.profile.variable_kinds.contains(&kind)
        || ctx.profile.enum_kinds.contains(&kind);
    if !is_item {
        return Visibility::Unknown;
    }
    let mut cursor = node.walk();
    let has_pub = node.children(&mut cursor).any(|c| c.kind() == "visibility_modifier");
    if has_pub { Visibility::Public } else { Visibility::Private }
}

fn go_visibility(node: Node, kind: &str, ctx: &Context) -> Visibility {
    let is_item = ctx.profile.function_kinds.contains(&kind)
        || ctx.profile.method_kinds.contains(&kind)
        || ctx.profile.class_kinds.contains(&kind)
        || ctx.profile.variable_kinds.contains(&kind);
    if !is_item {
        return Visibility::Unknown;
    }
    match declared_name(node, ctx.source).and_then(|n| n.chars().next()) {
        Some(c) if c.is_uppercase() => Visibility::Public,
        Some(_) => Visibility::Private,
        None => Visibility::Unknown,
    }
}

fn java_visibility(node: Node, kind: &str, ctx: &Context) -> Visibility {
    let is_item = ctx.profile.method_kinds.contains(&kind)
        || ctx.profile.class_kinds.contains(&kind)
        || ctx.profile.interface_kinds.contains(&kind)
        || ctx.profile.enum_kinds.contains(&kind)
        || ctx.profile.variable_kinds.contains(&kind);
    if !is_item {
        return Visibility::Unknown;
    }
    let mut cursor = node.walk();
    let modifiers = node.children(&mut cursor).find(|c| c.kind() == "modifiers");
    match modifiers {
        Some(m) if node_text(m, ctx.source).contains("public") => Visibility::Public,
        Some(_) => Visibility::Private,
        None => Visibility::Private, // package-private collapses into the binary private/public scheme
    }
}

//! Per-language node-kind tables
//!
//! ARCHITECTURE: Each language's tree-sitter grammar uses its own vocabulary of
//! node kind strings. This module is the single place that vocabulary is recorded,
//! so `classify` stays generic over `GrammarProfile` instead of hard-coding a
//! `match language` for every role.

use crate::Language;

/// Node-kind vocabulary for one language's tree-sitter grammar.
///
/// Every field is a *set* of kind names because a role is sometimes satisfied by
/// more than one grammar production (e.g. JS/TS function declarations, arrow
/// functions, and function expressions are all "function-ish").
#[derive(Debug)]
pub(crate) struct GrammarProfile {
    pub function_kinds: &'static [&'static str],
    pub method_kinds: &'static [&'static str],
    pub class_kinds: &'static [&'static str],
    pub interface_kinds: &'static [&'static str],
    pub enum_kinds: &'static [&'static str],
    pub struct_kinds: &'static [&'static str],
    pub type_alias_kinds: &'static [&'static str],
    pub variable_kinds: &'static [&'static str],
    pub import_kinds: &'static [&'static str],
    pub line_comment_kinds: &'static [&'static str],
    pub block_comment_kinds: &'static [&'static str],
    pub string_literal_kinds: &'static [&'static str],
    pub collection_literal_kinds: &'static [&'static str],
    pub body_kinds: &'static [&'static str],
    pub class_body_kinds: &'static [&'static str],
    pub access_specifier_kind: Option<&'static str>,
    pub namespace_kinds: &'static [&'static str],
    pub visibility_modifier_kind: Option<&'static str>,
    pub static_storage_text: Option<&'static str>,
    pub preproc_include_kind: Option<&'static str>,
    pub preproc_conditional_kinds: &'static [&'static str],
}

pub(crate) fn profile(language: Language) -> GrammarProfile {
    match language {
        Language::TypeScript | Language::JavaScript => GrammarProfile {
            function_kinds: &["function_declaration", "function_expression", "arrow_function", "generator_function_declaration"],
            method_kinds: &["method_definition"],
            class_kinds: &["class_declaration"],
            interface_kinds: &["interface_declaration"],
            enum_kinds: &["enum_declaration"],
            struct_kinds: &[],
            type_alias_kinds: &["type_alias_declaration"],
            variable_kinds: &["lexical_declaration", "variable_declaration"],
            import_kinds: &["import_statement"],
            line_comment_kinds: &["comment"],
            block_comment_kinds: &[],
            string_literal_kinds: &["string", "template_string"],
            collection_literal_kinds: &["array", "object"],
            body_kinds: &["statement_block"],
            class_body_kinds: &["class_body"],
            access_specifier_kind: None,
            namespace_kinds: &[],
            visibility_modifier_kind: None,
            static_storage_text: None,
            preproc_include_kind: None,
            preproc_conditional_kinds: &[],
        },
        Language::Python => GrammarProfile {
            function_kinds: &["function_definition"],
            method_kinds: &["function_definition"],
            class_kinds: &["class_definition"],
            interface_kinds: &[],
            enum_kinds: &[],
            struct_kinds: &[],
            type_alias_kinds: &["type_alias_statement"],
            variable_kinds: &["assignment", "expression_statement"],
            import_kinds: &["import_statement", "import_from_statement"],
            line_comment_kinds: &["comment"],
            block_comment_kinds: &[],
            string_literal_kinds: &["string"],
            collection_literal_kinds: &["list", "dictionary", "set", "tuple"],
            body_kinds: &["block"],
            class_body_kinds: &["block"],
            access_specifier_kind: None,
            namespace_kinds: &[],
            visibility_modifier_kind: None,
            static_storage_text: None,
            preproc_include_kind: None,
            preproc_conditional_kinds: &[],
        },
        Language::Rust => GrammarProfile {
            function_kinds: &["function_item"],
            method_kinds: &["function_item"],
            class_kinds: &["struct_item"],
            interface_kinds: &["trait_item"],
            enum_kinds: &["enum_item"],
            struct_kinds: &["struct_item"],
            type_alias_kinds: &["type_item"],
            variable_kinds: &["static_item", "const_item", "let_declaration"],
            import_kinds: &["use_declaration"],
            line_comment_kinds: &["line_comment"],
            block_comment_kinds: &["block_comment"],
            string_literal_kinds: &["string_literal", "raw_string_literal"],
            collection_literal_kinds: &["array_expression", "struct_expression", "tuple_expression"],
            body_kinds: &["block"],
            class_body_kinds: &["field_declaration_list", "declaration_list"],
            access_specifier_kind: None,
            namespace_kinds: &["mod_item"],
            visibility_modifier_kind: Some("visibility_modifier"),
            static_storage_text: None,
            preproc_include_kind: None,
            preproc_conditional_kinds: &[],
        },
        Language::Go => GrammarProfile {
            function_kinds: &["function_declaration"],
            method_kinds: &["method_declaration"],
            class_kinds: &["type_declaration"],
            interface_kinds: &["interface_type"],
            enum_kinds: &[],
            struct_kinds: &["struct_type"],
            type_alias_kinds: &["type_alias"],
            variable_kinds: &["var_declaration", "const_declaration"],
            import_kinds: &["import_declaration"],
            line_comment_kinds: &["comment"],
            block_comment_kinds: &[],
            string_literal_kinds: &["interpreted_string_literal", "raw_string_literal"],
            collection_literal_kinds: &["composite_literal"],
            body_kinds: &["block"],
            class_body_kinds: &["field_declaration_list"],
            access_specifier_kind: None,
            namespace_kinds: &[],
            visibility_modifier_kind: None,
            static_storage_text: None,
            preproc_include_kind: None,
            preproc_conditional_kinds: &[],
        },
        Language::Java => GrammarProfile {
            function_kinds: &["method_declaration"],
            method_kinds: &["method_declaration"],
            class_kinds: &["class_declaration"],
            interface_kinds: &["interface_declaration"],
            enum_kinds: &["enum_declaration"],
            struct_kinds: &[],
            type_alias_kinds: &[],
            variable_kinds: &["field_declaration", "local_variable_declaration"],
            import_kinds: &["import_declaration"],
            line_comment_kinds: &["line_comment"],
            block_comment_kinds: &["block_comment"],
            string_literal_kinds: &["string_literal"],
            collection_literal_kinds: &["array_initializer"],
            body_kinds: &["block"],
            class_body_kinds: &["class_body"],
            access_specifier_kind: None,
            namespace_kinds: &[],
            visibility_modifier_kind: Some("modifiers"),
            static_storage_text: None,
            preproc_include_kind: None,
            preproc_conditional_kinds: &[],
        },
        Language::C => GrammarProfile {
            function_kinds: &["function_definition"],
            method_kinds: &["function_definition"],
            class_kinds: &["struct_specifier"],
            interface_kinds: &[],
            enum_kinds: &["enum_specifier"],
            struct_kinds: &["struct_specifier"],
            type_alias_kinds: &["type_definition"],
            variable_kinds: &["declaration"],
            import_kinds: &["preproc_include"],
            line_comment_kinds: &["comment"],
            block_comment_kinds: &[],
            string_literal_kinds: &["string_literal"],
            collection_literal_kinds: &["initializer_list"],
            body_kinds: &["compound_statement"],
            class_body_kinds: &["field_declaration_list"],
            access_specifier_kind: None,
            namespace_kinds: &[],
            visibility_modifier_kind: None,
            static_storage_text: Some("static"),
            preproc_include_kind: Some("preproc_include"),
            preproc_conditional_kinds: &["preproc_ifdef", "preproc_if", "preproc_def"],
        },
        Language::Cpp => GrammarProfile {
            function_kinds: &["function_definition"],
            method_kinds: &["function_definition"],
            class_kinds: &["class_specifier", "struct_specifier"],
            interface_kinds: &[],
            enum_kinds: &["enum_specifier"],
            struct_kinds: &["struct_specifier"],
            type_alias_kinds: &["type_definition", "alias_declaration"],
            variable_kinds: &["declaration", "field_declaration"],
            import_kinds: &["preproc_include"],
            line_comment_kinds: &["comment"],
            block_comment_kinds: &[],
            string_literal_kinds: &["string_literal", "raw_string_literal"],
            collection_literal_kinds: &["initializer_list"],
            body_kinds: &["compound_statement"],
            class_body_kinds: &["field_declaration_list"],
            access_specifier_kind: Some("access_specifier"),
            namespace_kinds: &["namespace_definition"],
            visibility_modifier_kind: None,
            static_storage_text: Some("static"),
            preproc_include_kind: Some("preproc_include"),
            preproc_conditional_kinds: &["preproc_ifdef", "preproc_if", "preproc_def"],
        },
    }
}

/// `//` for every supported language except Python, which uses `#`
pub(crate) fn line_comment_marker(language: Language) -> &'static str {
    if language.uses_hash_comments() {
        "#"
    } else {
        "//"
    }
}

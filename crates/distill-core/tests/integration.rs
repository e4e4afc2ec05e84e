//! Integration tests for distill-core
//!
//! These tests validate the full pipeline from source -> optimized output,
//! across languages and presets.

#![allow(clippy::unwrap_used)]

use distill_core::{optimize_source, Language, Policy, Preset};

const RUST_FIXTURE: &str = include_str!("../../../tests/fixtures/rust/simple.rs");

// ============================================================================
// Rust
// ============================================================================

#[test]
fn rust_full_preset_is_identity() {
    let result = optimize_source(RUST_FIXTURE, Language::Rust, &Policy::with_preset(Preset::Full)).unwrap();
    assert_eq!(result.output, RUST_FIXTURE);
}

#[test]
fn rust_structure_preset_strips_bodies_keeps_signatures() {
    let result = optimize_source(RUST_FIXTURE, Language::Rust, &Policy::with_preset(Preset::Structure)).unwrap();
    assert!(result.output.contains("pub fn add(a: i32, b: i32) -> i32"));
    assert!(result.output.contains("pub struct Calculator"));
    assert!(!result.output.contains("a + b"));
    assert!(result.output.contains("function body omitted"));
}

#[test]
fn rust_signatures_preset_drops_private_members() {
    let source = "pub fn visible() {}\n\nfn hidden() {\n    let x = 1;\n    let _ = x;\n}\n";
    let policy = Policy::with_preset(Preset::Signatures);
    let result = optimize_source(source, Language::Rust, &policy).unwrap();
    assert!(result.output.contains("visible"));
    assert!(!result.output.contains("let x = 1"));
}

#[test]
fn rust_types_preset_keeps_type_declarations() {
    let result = optimize_source(RUST_FIXTURE, Language::Rust, &Policy::with_preset(Preset::Types)).unwrap();
    assert!(result.output.contains("pub enum Status"));
    assert!(result.output.contains("pub trait Compute"));
}

// ============================================================================
// Python
// ============================================================================

const PYTHON_SOURCE: &str = "def calculate_sum(a: int, b: int) -> int:\n    \"\"\"Adds two numbers.\"\"\"\n    result = a + b\n    return result\n\n\ndef _private_helper():\n    pass\n";

#[test]
fn python_structure_strips_body_keeps_docstring() {
    let policy = Policy::with_preset(Preset::Structure);
    let result = optimize_source(PYTHON_SOURCE, Language::Python, &policy).unwrap();
    assert!(result.output.contains("def calculate_sum(a: int, b: int) -> int:"));
    assert!(!result.output.contains("result = a + b"));
}

#[test]
fn python_signatures_drops_underscore_prefixed_function() {
    let policy = Policy::with_preset(Preset::Signatures);
    let result = optimize_source(PYTHON_SOURCE, Language::Python, &policy).unwrap();
    assert!(result.output.contains("calculate_sum"));
    assert!(!result.output.contains("_private_helper"));
}

// ============================================================================
// TypeScript
// ============================================================================

const TS_SOURCE: &str = "export function add(a: number, b: number): number {\n    return a + b;\n}\n\nfunction internal(): void {}\n";

#[test]
fn typescript_structure_strips_body() {
    let policy = Policy::with_preset(Preset::Structure);
    let result = optimize_source(TS_SOURCE, Language::TypeScript, &policy).unwrap();
    assert!(result.output.contains("function add(a: number, b: number): number"));
    assert!(!result.output.contains("return a + b"));
}

// ============================================================================
// Go
// ============================================================================

const GO_SOURCE: &str = "package main\n\nfunc Add(a int, b int) int {\n\treturn a + b\n}\n\nfunc helper() {\n\t_ = 1\n}\n";

#[test]
fn go_signatures_keeps_exported_drops_lowercase() {
    let policy = Policy::with_preset(Preset::Signatures);
    let result = optimize_source(GO_SOURCE, Language::Go, &policy).unwrap();
    assert!(result.output.contains("func Add"));
    assert!(!result.output.contains("func helper"));
}

// ============================================================================
// Java
// ============================================================================

const JAVA_SOURCE: &str =
    "public class Simple {\n    public int add(int a, int b) {\n        return a + b;\n    }\n\n    private void helper() {\n        int x = 1;\n    }\n}\n";

#[test]
fn java_signatures_keeps_public_methods_only() {
    let policy = Policy::with_preset(Preset::Signatures);
    let result = optimize_source(JAVA_SOURCE, Language::Java, &policy).unwrap();
    assert!(result.output.contains("add"));
    assert!(!result.output.contains("int x = 1"));
}

// ============================================================================
// C / C++
// ============================================================================

const C_SOURCE: &str = "int add(int a, int b) {\n    return a + b;\n}\n\nstatic int helper(void) {\n    return 0;\n}\n";

#[test]
fn c_signatures_drops_static_function() {
    let policy = Policy::with_preset(Preset::Signatures);
    let result = optimize_source(C_SOURCE, Language::C, &policy).unwrap();
    assert!(result.output.contains("int add(int a, int b)"));
    assert!(!result.output.contains("helper"));
}

const CPP_SOURCE: &str =
    "class Widget {\npublic:\n    int size() const { return 1; }\nprivate:\n    int hidden_size() const { return 2; }\n};\n";

#[test]
fn cpp_signatures_drops_private_method() {
    let policy = Policy::with_preset(Preset::Signatures);
    let result = optimize_source(CPP_SOURCE, Language::Cpp, &policy).unwrap();
    assert!(result.output.contains("size"));
    assert!(!result.output.contains("hidden_size"));
}

// ============================================================================
// Budget controller
// ============================================================================

#[test]
fn target_tokens_escalates_until_satisfied_or_saturated() {
    let source = "fn main() {\n    // a helpful comment explaining things\n    let data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];\n    println!(\"{:?}\", data);\n}\n";
    let policy = Policy::default().with_target_tokens(5);
    let result = optimize_source(source, Language::Rust, &policy).unwrap();
    assert!(result.final_state == distill_core::BudgetState::Satisfied || result.budget_unreachable);
}

#[test]
fn malformed_source_does_not_panic() {
    let source = "fn main( {{{ ???";
    let result = optimize_source(source, Language::Rust, &Policy::with_preset(Preset::Structure));
    assert!(result.is_ok());
}

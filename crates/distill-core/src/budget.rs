//! Budget controller — the state machine that escalates
//! pass aggressiveness until a token target is met or every lever saturates.
//!
//! ARCHITECTURE: a pure `(source, tree, policy) → Result<OptimizeResult>`
//! function — no I/O, no global state, a `Policy` in and a rendered `String`
//! out — that runs the pass pipeline and, if a token target is set,
//! re-escalates it until the target is met or every lever saturates.

use crate::classify::ClassifiedNode;
use crate::elision::ElisionRecord;
use crate::passes::{run_all, PassContext};
use crate::policy::{CommentsMode, FunctionBodiesMode, ImportsMode, LiteralsMode, Policy};
use crate::render::render;
use crate::tokenizer::Tokenizer;
use crate::Language;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Controller lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetState {
    Initial,
    Applied,
    Measured,
    Satisfied,
    Escalate,
    Final,
}

/// Outcome of a completed optimization run.
#[derive(Debug, Clone)]
pub struct OptimizeResult {
    pub output: String,
    pub token_count: Option<usize>,
    pub final_state: BudgetState,
    /// Set when the controller saturated every escalation lever without
    /// meeting the target. Never an error, just a signal the caller may
    /// surface as a warning.
    pub budget_unreachable: bool,
    pub aborted: bool,
}

/// Drives the fixed pass pipeline against a token budget.
///
/// # Errors
/// Propagates tokenizer failures as an infrastructure error; the controller
/// aborts and returns the input unchanged.
pub fn optimize(
    source: &str,
    root: &ClassifiedNode,
    language: Language,
    policy: &Policy,
    tokenizer: &dyn Tokenizer,
    cancel: Option<&Arc<AtomicBool>>,
) -> crate::error::Result<OptimizeResult> {
    policy.validate()?;

    if let Some(flag) = cancel {
        if flag.load(Ordering::SeqCst) {
            return Ok(OptimizeResult {
                output: source.to_string(),
                token_count: None,
                final_state: BudgetState::Initial,
                budget_unreachable: false,
                aborted: true,
            });
        }
    }

    let mut working_policy = *policy;
    let mut state = BudgetState::Initial;

    loop {
        state = BudgetState::Applied;
        let ctx = PassContext {
            source,
            language,
            policy: &working_policy,
            tokenizer,
        };
        let elisions = run_all(root, &ctx);
        let output = render(source, &elisions);
        state = BudgetState::Measured;

        let Some(target) = working_policy.target_tokens else {
            return Ok(finish(output, None, BudgetState::Satisfied));
        };

        let count = tokenizer.count(&output).map_err(|e| {
            crate::error::DistillError::TokenizerError(e.to_string())
        })?;

        if count <= target {
            state = BudgetState::Satisfied;
            return Ok(finish(output, Some(count), state));
        }

        if let Some(flag) = cancel {
            if flag.load(Ordering::SeqCst) {
                return Ok(OptimizeResult {
                    output: source.to_string(),
                    token_count: None,
                    final_state: state,
                    budget_unreachable: false,
                    aborted: true,
                });
            }
        }

        state = BudgetState::Escalate;
        match escalate(&mut working_policy) {
            Some(()) => continue,
            None => {
                return Ok(OptimizeResult {
                    output,
                    token_count: Some(count),
                    final_state: BudgetState::Final,
                    budget_unreachable: true,
                    aborted: false,
                });
            }
        }
    }
}

fn finish(output: String, token_count: Option<usize>, state: BudgetState) -> OptimizeResult {
    OptimizeResult {
        output,
        token_count,
        final_state: state,
        budget_unreachable: false,
        aborted: false,
    }
}

/// Escalates exactly one pass by one level, in the fixed priority order
/// comments → literals → function_bodies → imports → public_api_only.
/// Returns `None` once every lever is saturated.
fn escalate(policy: &mut Policy) -> Option<()> {
    if escalate_comments(policy) {
        return Some(());
    }
    if escalate_literals(policy) {
        return Some(());
    }
    if escalate_function_bodies(policy) {
        return Some(());
    }
    if escalate_imports(policy) {
        return Some(());
    }
    if !policy.public_api_only {
        policy.public_api_only = true;
        return Some(());
    }
    None
}

fn escalate_comments(policy: &mut Policy) -> bool {
    policy.comments = match policy.comments {
        CommentsMode::KeepAll => CommentsMode::KeepDoc,
        CommentsMode::KeepDoc => CommentsMode::KeepFirstSentence,
        CommentsMode::KeepFirstSentence => CommentsMode::StripAll,
        CommentsMode::StripAll => return false,
    };
    true
}

fn escalate_literals(policy: &mut Policy) -> bool {
    policy.literals = match policy.literals {
        LiteralsMode::KeepAll => LiteralsMode::MaxTokens(80),
        LiteralsMode::TrimLarge => LiteralsMode::MaxTokens(40),
        LiteralsMode::MaxTokens(n) => {
            let next = (n / 2).max(10);
            if next == n {
                return false;
            }
            LiteralsMode::MaxTokens(next)
        }
    };
    true
}

fn escalate_function_bodies(policy: &mut Policy) -> bool {
    policy.function_bodies = match policy.function_bodies {
        FunctionBodiesMode::KeepAll => FunctionBodiesMode::StripLarge(20),
        FunctionBodiesMode::StripLarge(_) => FunctionBodiesMode::StripAll,
        FunctionBodiesMode::StripAll => FunctionBodiesMode::MaxTokens(80),
        FunctionBodiesMode::MaxTokens(n) => {
            let next = (n / 2).max(10);
            if next == n {
                return false;
            }
            FunctionBodiesMode::MaxTokens(next)
        }
    };
    true
}

fn escalate_imports(policy: &mut Policy) -> bool {
    policy.imports = match policy.imports {
        ImportsMode::KeepAll => ImportsMode::SummarizeGroups,
        ImportsMode::SummarizeGroups => ImportsMode::StripAll,
        ImportsMode::StripAll => return false,
    };
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::parser::Parser;
    use crate::tokenizer::TiktokenTokenizer;

    fn build(language: Language, source: &str) -> ClassifiedNode {
        let mut parser = Parser::new(language).unwrap();
        let tree = parser.parse(source).unwrap();
        classify(source, &tree, language, false).unwrap()
    }

    #[test]
    fn identity_under_noop_policy() {
        let source = "fn main() {\n    println!(\"hi\");\n}\n";
        let root = build(Language::Rust, source);
        let tokenizer = TiktokenTokenizer::new().unwrap();
        let result = optimize(source, &root, Language::Rust, &Policy::default(), &tokenizer, None).unwrap();
        assert_eq!(result.output, source);
        assert_eq!(result.final_state, BudgetState::Satisfied);
    }

    #[test]
    fn escalation_terminates_and_meets_tiny_budget_or_saturates() {
        let source = "fn main() {\n    // a helpful comment\n    let x = 1;\n    println!(\"{}\", x);\n}\n";
        let root = build(Language::Rust, source);
        let tokenizer = TiktokenTokenizer::new().unwrap();
        let policy = Policy::default().with_target_tokens(1);
        let result = optimize(source, &root, Language::Rust, &policy, &tokenizer, None).unwrap();
        assert!(result.final_state == BudgetState::Satisfied || result.budget_unreachable);
    }

    #[test]
    fn cancellation_returns_input_unchanged() {
        let source = "fn main() {}\n";
        let root = build(Language::Rust, source);
        let tokenizer = TiktokenTokenizer::new().unwrap();
        let cancel = Arc::new(AtomicBool::new(true));
        let policy = Policy::default().with_target_tokens(1);
        let result = optimize(source, &root, Language::Rust, &policy, &tokenizer, Some(&cancel)).unwrap();
        assert!(result.aborted);
        assert_eq!(result.output, source);
    }
}

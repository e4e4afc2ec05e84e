//! The fixed-order pass pipeline.
//!
//! ARCHITECTURE: a `Vec<Box<dyn Pass>>` pipeline, one struct per pass, each a
//! pure `(tree, policy) → elisions` function that composes with the others
//! instead of being mutually exclusive.

mod comments;
mod function_body;
mod imports;
mod literals;
mod public_api;

use crate::classify::ClassifiedNode;
use crate::elision::ElisionRecord;
use crate::policy::Policy;
use crate::tokenizer::Tokenizer;
use crate::Language;

/// Read-only context every pass receives. Passes never mutate the classified
/// tree — they only append [`ElisionRecord`]s describing what they'd replace.
pub(crate) struct PassContext<'a> {
    pub source: &'a str,
    pub language: Language,
    pub policy: &'a Policy,
    pub tokenizer: &'a dyn Tokenizer,
}

/// One of the five deterministic transformations named in the glossary.
pub(crate) trait Pass {
    fn name(&self) -> &'static str;

    /// Produce elision records for this pass, given the tree and whatever
    /// ranges earlier passes in the pipeline already claimed (so a pass never
    /// re-elides content inside an already-elided region).
    fn run(&self, root: &ClassifiedNode, ctx: &PassContext, already_elided: &[ElisionRecord]) -> Vec<ElisionRecord>;
}

/// Fixed pipeline order: public-API filter → imports →
/// literals → function bodies → comments.
pub(crate) fn pipeline() -> Vec<Box<dyn Pass>> {
    vec![
        Box::new(public_api::PublicApiPass),
        Box::new(imports::ImportsPass),
        Box::new(literals::LiteralsPass),
        Box::new(function_body::FunctionBodyPass),
        Box::new(comments::CommentsPass),
    ]
}

/// Run every pass in fixed order, accumulating elisions. Each pass sees the
/// elisions produced by every pass that ran before it.
pub(crate) fn run_all(root: &ClassifiedNode, ctx: &PassContext) -> Vec<ElisionRecord> {
    let mut all = Vec::new();
    for pass in pipeline() {
        let mut produced = pass.run(root, ctx, &all);
        all.append(&mut produced);
    }
    all
}

/// True if `range` falls entirely inside a range already claimed by an
/// earlier pass — used so e.g. the comment pass skips comments that live
/// inside a function body the body pass already replaced.
pub(crate) fn is_covered(range: (usize, usize), already_elided: &[ElisionRecord]) -> bool {
    already_elided
        .iter()
        .any(|r| r.start() <= range.0 && range.1 <= r.end() && r.original_node_ref != range)
}

/// Depth-first iterator helper shared by every pass: visit every node.
pub(crate) fn walk<'a>(node: &'a ClassifiedNode, visit: &mut impl FnMut(&'a ClassifiedNode)) {
    visit(node);
    for child in &node.children {
        walk(child, visit);
    }
}

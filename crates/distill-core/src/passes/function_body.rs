//! Function-body pass.

use super::{is_covered, walk, Pass, PassContext};
use crate::classify::{ClassifiedNode, Role};
use crate::elision::{ElisionKind, ElisionRecord};
use crate::policy::{BodyBraceStyle, FunctionBodiesMode};

pub(crate) struct FunctionBodyPass;

impl Pass for FunctionBodyPass {
    fn name(&self) -> &'static str {
        "function_bodies"
    }

    fn run(&self, root: &ClassifiedNode, ctx: &PassContext, already_elided: &[ElisionRecord]) -> Vec<ElisionRecord> {
        if ctx.policy.function_bodies == FunctionBodiesMode::KeepAll {
            return Vec::new();
        }

        let mut records = Vec::new();
        walk(root, &mut |node| {
            if !(node.has_role(Role::FunctionDefinition) || node.has_role(Role::MethodDefinition)) {
                return;
            }
            let Some(body_range) = node.body_range else { return };
            if is_covered(node.byte_range, already_elided) {
                return;
            }

            let line_span = body_line_span(node, body_range);
            // "Functions whose body is already empty or single-statement ...
            // are left verbatim." A single-statement body spans at most 1
            // extra line beyond its opening line.
            if line_span <= 1 {
                return;
            }

            if let Some(record) = elide_body(node, body_range, line_span, ctx) {
                records.push(record);
            }
        });
        records
    }
}

fn body_line_span(node: &ClassifiedNode, body_range: (usize, usize)) -> u32 {
    node.children
        .iter()
        .find(|c| c.byte_range == body_range)
        .map(|b| b.line_span())
        .unwrap_or_else(|| node.line_span())
}

fn elide_body(node: &ClassifiedNode, body_range: (usize, usize), line_span: u32, ctx: &PassContext) -> Option<ElisionRecord> {
    let noun = if node.has_role(Role::MethodDefinition) { "method" } else { "function" };

    match ctx.policy.function_bodies {
        FunctionBodiesMode::KeepAll => None,
        FunctionBodiesMode::StripAll => Some(strip_record(body_range, line_span, noun, ctx)),
        FunctionBodiesMode::StripLarge(threshold) => {
            if line_span > threshold {
                Some(strip_record(body_range, line_span, noun, ctx))
            } else {
                None
            }
        }
        FunctionBodiesMode::MaxTokens(budget) => truncate_record(body_range, line_span, budget, ctx),
    }
}

fn strip_record(body_range: (usize, usize), line_span: u32, noun: &str, ctx: &PassContext) -> ElisionRecord {
    let placeholder = format!("// … {noun} body omitted ({line_span} lines)");
    let text = match ctx.policy.body_brace_style {
        BodyBraceStyle::Replace => format!(" {placeholder}"),
        BodyBraceStyle::Keep => format!("{{ {placeholder} }}"),
    };
    ElisionRecord::new(ElisionKind::FunctionBody, body_range, text).with_lines(line_span)
}

fn truncate_record(body_range: (usize, usize), line_span: u32, budget: u32, ctx: &PassContext) -> Option<ElisionRecord> {
    let body_text = &ctx.source[body_range.0..body_range.1];
    let total_tokens = ctx.tokenizer.count(body_text).ok()?;
    if total_tokens as u32 <= budget {
        return None;
    }

    let trailing_return = body_text.rfind("return").map(|i| body_text[i..].to_string());
    let placeholder = format!("// … function body truncated ({line_span} lines)");
    let text = match trailing_return {
        Some(ret) => format!("{{ {placeholder}\n{ret}"),
        None => format!("{{ {placeholder} }}"),
    };

    Some(ElisionRecord::new(ElisionKind::FunctionBody, body_range, text).with_lines(line_span))
}

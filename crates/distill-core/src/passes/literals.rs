//! Literal pass — the one pass injected with the shared
//! `Tokenizer` (dependency injection, not a pass-owned global; see DESIGN.md
//! for why).

use super::{is_covered, walk, Pass, PassContext};
use crate::classify::{ClassifiedNode, Role};
use crate::elision::{ElisionKind, ElisionRecord};
use crate::policy::LiteralsMode;

pub(crate) struct LiteralsPass;

/// Default per-literal token budget for `trim_large`, since the distilled
/// spec names the mode but not a concrete threshold — chosen generously so
/// only genuinely large literals are touched.
const TRIM_LARGE_DEFAULT_TOKENS: u32 = 40;

impl Pass for LiteralsPass {
    fn name(&self) -> &'static str {
        "literals"
    }

    fn run(&self, root: &ClassifiedNode, ctx: &PassContext, already_elided: &[ElisionRecord]) -> Vec<ElisionRecord> {
        let budget = match ctx.policy.literals {
            LiteralsMode::KeepAll => return Vec::new(),
            LiteralsMode::TrimLarge => TRIM_LARGE_DEFAULT_TOKENS,
            LiteralsMode::MaxTokens(n) => n,
        };

        let mut candidates = Vec::new();
        walk(root, &mut |node| {
            if (node.has_role(Role::StringLiteral) || node.has_role(Role::CollectionLiteral))
                && !is_covered(node.byte_range, already_elided)
            {
                candidates.push(node);
            }
        });

        // "Truncate the largest literals first, not in source order. Tie-break
        // by earlier source position."
        let mut sized: Vec<(usize, &ClassifiedNode)> = candidates
            .into_iter()
            .map(|n| (n.end_byte() - n.start_byte(), n))
            .collect();
        sized.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.start_byte().cmp(&b.1.start_byte())));

        let mut records = Vec::new();
        for (_, node) in sized {
            let text = &ctx.source[node.byte_range.0..node.byte_range.1];
            let total = match ctx.tokenizer.count(text) {
                Ok(t) => t,
                Err(_) => continue,
            };
            if total as u32 <= budget {
                continue;
            }

            if node.has_role(Role::StringLiteral) {
                if let Some(record) = truncate_string_literal(node, text, budget, ctx) {
                    records.push(record);
                }
            } else if let Some(record) = truncate_collection_literal(node, text, budget, ctx) {
                records.push(record);
            }
        }
        records
    }
}

fn truncate_string_literal(node: &ClassifiedNode, text: &str, budget: u32, ctx: &PassContext) -> Option<ElisionRecord> {
    let (open, close) = string_delimiters(text)?;
    let inner = &text[open.len()..text.len() - close.len()];

    // Binary search for the largest inner prefix whose token count is
    // ≤ budget−1 (leaving room for the appended ellipsis character).
    let mut lo = 0usize;
    let mut hi = inner.len();
    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        let candidate_end = floor_char_boundary(inner, mid);
        let candidate = format!("{open}{}…{close}", &inner[..candidate_end]);
        match ctx.tokenizer.count(&candidate) {
            Ok(count) if count <= budget.saturating_sub(1) as usize => lo = mid,
            _ => hi = mid.saturating_sub(1),
        }
        if mid == 0 {
            break;
        }
    }
    let prefix_len = floor_char_boundary(inner, lo);

    let original_tokens = ctx.tokenizer.count(text).ok()?;
    let replacement = format!("{open}{}…{close}", &inner[..prefix_len]);
    let replacement_tokens = ctx.tokenizer.count(&replacement).ok()?;
    let dropped = original_tokens.saturating_sub(replacement_tokens) as u32;

    let rendered = format!("{replacement}; // literal string (−{dropped} tokens)");

    Some(
        ElisionRecord::new(ElisionKind::LiteralString, node.byte_range, rendered)
            .with_tokens(dropped)
            .with_lines(node.line_span()),
    )
}

fn truncate_collection_literal(node: &ClassifiedNode, text: &str, budget: u32, ctx: &PassContext) -> Option<ElisionRecord> {
    let (open, close) = collection_delimiters(text)?;
    let elements = split_top_level_elements(&text[open.len()..text.len() - close.len()]);

    if elements.is_empty() {
        return None;
    }

    let mut kept = Vec::new();
    let mut running = 0usize;
    for element in &elements {
        let candidate_tokens = ctx.tokenizer.count(element.trim()).ok()?;
        if running + candidate_tokens > budget as usize {
            break;
        }
        running += candidate_tokens;
        kept.push(element.trim());
    }

    let original_tokens = ctx.tokenizer.count(text).ok()?;

    if kept.is_empty() {
        let dropped = original_tokens as u32;
        let rendered = format!("{open}{close} // literal array (−{dropped} tokens)");
        return Some(
            ElisionRecord::new(ElisionKind::LiteralCollection, node.byte_range, rendered)
                .with_tokens(dropped)
                .with_lines(node.line_span()),
        );
    }

    let remaining = elements.len() - kept.len();
    let kept_text = kept.join(", ");
    let kept_tokens = ctx.tokenizer.count(&kept_text).ok()?;
    let dropped = original_tokens.saturating_sub(kept_tokens) as u32;

    let rendered = if remaining > 0 {
        format!("{open}{kept_text}, …{close} // … ({remaining} more, −{dropped} tokens)")
    } else {
        format!("{open}{kept_text}{close}")
    };

    Some(
        ElisionRecord::new(ElisionKind::LiteralCollection, node.byte_range, rendered)
            .with_tokens(dropped)
            .with_lines(node.line_span())
            .with_summary_count(remaining as u32),
    )
}

fn string_delimiters(text: &str) -> Option<(&'static str, &'static str)> {
    if text.starts_with("r\"") || text.starts_with("R\"(") {
        return Some(("\"", "\""));
    }
    if text.starts_with('"') {
        Some(("\"", "\""))
    } else if text.starts_with('\'') {
        Some(("'", "'"))
    } else if text.starts_with('`') {
        Some(("`", "`"))
    } else {
        None
    }
}

fn collection_delimiters(text: &str) -> Option<(&'static str, &'static str)> {
    if text.starts_with('[') {
        Some(("[", "]"))
    } else if text.starts_with('{') {
        Some(("{", "}"))
    } else if text.starts_with('(') {
        Some(("(", ")"))
    } else {
        None
    }
}

/// Splits on top-level commas only, respecting nested brackets/quotes, so a
/// nested collection element isn't cut in the middle.
fn split_top_level_elements(body: &str) -> Vec<&str> {
    let mut elements = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    let mut in_quote: Option<char> = None;

    for (i, c) in body.char_indices() {
        if let Some(q) = in_quote {
            if c == q {
                in_quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => in_quote = Some(c),
            '[' | '{' | '(' => depth += 1,
            ']' | '}' | ')' => depth -= 1,
            ',' if depth == 0 => {
                let piece = body[start..i].trim();
                if !piece.is_empty() {
                    elements.push(piece);
                }
                start = i + 1;
            }
            _ => {}
        }
    }
    let tail = body[start..].trim();
    if !tail.is_empty() {
        elements.push(tail);
    }
    elements
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

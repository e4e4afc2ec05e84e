//! Comment pass — runs last in the pipeline so surviving
//! inline comments on retained code are still processed.

use super::{is_covered, walk, Pass, PassContext};
use crate::classify::{ClassifiedNode, Role};
use crate::elision::{ElisionKind, ElisionRecord};
use crate::policy::CommentsMode;
use crate::Language;

pub(crate) struct CommentsPass;

impl Pass for CommentsPass {
    fn name(&self) -> &'static str {
        "comments"
    }

    fn run(&self, root: &ClassifiedNode, ctx: &PassContext, already_elided: &[ElisionRecord]) -> Vec<ElisionRecord> {
        if ctx.policy.comments == CommentsMode::KeepAll {
            return Vec::new();
        }

        let mut comments = Vec::new();
        walk(root, &mut |node| {
            if (node.has_role(Role::LineComment) || node.has_role(Role::BlockComment) || node.has_role(Role::Docstring))
                && !is_covered(node.byte_range, already_elided)
            {
                comments.push(node);
            }
        });
        comments.sort_by_key(|n| n.start_byte());

        let marker = line_comment_marker(ctx.language);
        let mut records = Vec::new();
        let mut run: Vec<&ClassifiedNode> = Vec::new();

        for comment in comments {
            if comment.has_role(Role::Docstring) {
                flush_run(&mut run, marker, &mut records);
                if let Some(record) = render_docstring(comment, ctx) {
                    records.push(record);
                }
                continue;
            }
            // Non-doc comments are elided under every mode except `keep_all`.
            run.push(comment);
        }
        flush_run(&mut run, marker, &mut records);

        records
    }
}

fn line_comment_marker(language: Language) -> &'static str {
    if language.uses_hash_comments() {
        "#"
    } else {
        "//"
    }
}

/// "Sequential comment placeholders on adjacent lines coalesce into a single
/// `// … N comments omitted (M lines)` when both N ≥ 2 and M ≥ 4; otherwise
/// each is emitted independently."
fn flush_run(run: &mut Vec<&ClassifiedNode>, marker: &str, records: &mut Vec<ElisionRecord>) {
    if run.is_empty() {
        return;
    }

    let mut groups: Vec<Vec<&ClassifiedNode>> = Vec::new();
    let mut current: Vec<&ClassifiedNode> = Vec::new();
    for comment in run.drain(..) {
        if let Some(last) = current.last() {
            if comment.line_range.0.saturating_sub(last.line_range.1) > 1 {
                groups.push(std::mem::take(&mut current));
            }
        }
        current.push(comment);
    }
    if !current.is_empty() {
        groups.push(current);
    }

    for group in groups {
        let lines: u32 = group.iter().map(|n| n.line_span()).sum();
        let start = group.first().expect("group is non-empty").start_byte();
        let end = group.last().expect("group is non-empty").end_byte();

        let text = if group.len() >= 2 && lines >= 4 {
            format!("{marker} … {} comments omitted ({lines} lines)", group.len())
        } else {
            // Each is emitted independently but we still return one record
            // per comment in that case.
            for comment in &group {
                records.push(
                    ElisionRecord::new(ElisionKind::Comment, comment.byte_range, format!("{marker} … comment omitted"))
                        .with_lines(comment.line_span()),
                );
            }
            continue;
        };

        records.push(
            ElisionRecord::new(ElisionKind::Comment, (start, end), text)
                .with_lines(lines)
                .with_summary_count(group.len() as u32),
        );
    }
}

fn render_docstring(node: &ClassifiedNode, ctx: &PassContext) -> Option<ElisionRecord> {
    let lines = node.line_span();
    let is_hash = ctx.language.uses_hash_comments();

    match ctx.policy.comments {
        CommentsMode::KeepAll | CommentsMode::KeepDoc => None,
        CommentsMode::KeepFirstSentence => {
            let text = &ctx.source[node.byte_range.0..node.byte_range.1];
            let truncated = truncate_to_first_sentence(text)?;
            Some(ElisionRecord::new(ElisionKind::Docstring, node.byte_range, truncated).with_lines(lines))
        }
        CommentsMode::StripAll => {
            let suffix = if lines > 1 { format!(" ({lines} lines)") } else { String::new() };
            let text = if is_hash {
                format!("\"\"\"… docstring omitted{suffix}\"\"\"")
            } else {
                format!("/** … docstring omitted{suffix} */")
            };
            Some(ElisionRecord::new(ElisionKind::Docstring, node.byte_range, text).with_lines(lines))
        }
    }
}

/// Truncates a docstring to its first sentence (first period followed by
/// whitespace, or end of first line if no period), replacing the tail with
/// a single `…`.
fn truncate_to_first_sentence(text: &str) -> Option<String> {
    let first_line_end = text.find('\n').unwrap_or(text.len());
    let first_line = &text[..first_line_end];

    let cut = first_line
        .match_indices(". ")
        .next()
        .map(|(i, _)| i + 1)
        .unwrap_or(first_line_end);

    if cut >= text.len() {
        return None; // nothing to truncate
    }

    let mut result = text[..cut].to_string();
    result.push('…');
    Some(result)
}

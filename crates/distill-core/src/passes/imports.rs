//! Import pass.

use super::{is_covered, Pass, PassContext};
use crate::classify::{ClassifiedNode, Role};
use crate::elision::{ElisionKind, ElisionRecord};
use crate::policy::ImportsMode;

pub(crate) struct ImportsPass;

/// An import group spanning more than this many entries retains its first
/// and last import above/below the placeholder.
const RETAIN_BOUNDARY_THRESHOLD: usize = 10;

impl Pass for ImportsPass {
    fn name(&self) -> &'static str {
        "imports"
    }

    fn run(&self, root: &ClassifiedNode, ctx: &PassContext, already_elided: &[ElisionRecord]) -> Vec<ElisionRecord> {
        if ctx.policy.imports == ImportsMode::KeepAll {
            return Vec::new();
        }

        let mut records = Vec::new();
        for group in group_adjacent_imports(root) {
            if group.iter().any(|n| is_covered(n.byte_range, already_elided)) {
                continue;
            }
            let should_elide = ctx.policy.imports == ImportsMode::StripAll || group.len() >= 2;
            if !should_elide {
                continue;
            }
            records.push(import_group_record(&group));
        }
        records
    }
}

fn group_adjacent_imports(root: &ClassifiedNode) -> Vec<Vec<&ClassifiedNode>> {
    let mut groups = Vec::new();
    let mut current: Vec<&ClassifiedNode> = Vec::new();
    let mut prev_end_line = None;

    for child in &root.children {
        if !child.has_role(Role::Import) {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
            prev_end_line = None;
            continue;
        }

        // "separated by fewer than two blank lines" — a gap of more than 2
        // lines between imports breaks the group.
        if let Some(prev_end) = prev_end_line {
            let gap = child.line_range.0.saturating_sub(prev_end);
            if gap > 2 {
                groups.push(std::mem::take(&mut current));
            }
        }
        prev_end_line = Some(child.line_range.1);
        current.push(child);
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

fn import_group_record(group: &[&ClassifiedNode]) -> ElisionRecord {
    let lines: u32 = group.iter().map(|n| n.line_span()).sum();

    if group.len() > RETAIN_BOUNDARY_THRESHOLD {
        // Retain first/last; elide only the interior span.
        let interior = &group[1..group.len() - 1];
        let start = interior.first().expect("interior is non-empty for >10 entries").start_byte();
        let end = interior.last().expect("interior is non-empty for >10 entries").end_byte();
        let text = format!("// … {} imports omitted ({} lines)", interior.len(), lines);
        return ElisionRecord::new(ElisionKind::ImportGroup, (start, end), text)
            .with_lines(lines)
            .with_summary_count(interior.len() as u32);
    }

    let start = group.first().expect("group is non-empty").start_byte();
    let end = group.last().expect("group is non-empty").end_byte();
    let text = format!("// … {} imports omitted ({} lines)", group.len(), lines);
    ElisionRecord::new(ElisionKind::ImportGroup, (start, end), text)
        .with_lines(lines)
        .with_summary_count(group.len() as u32)
}

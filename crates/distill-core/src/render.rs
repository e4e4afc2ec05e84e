//! Renderer — walks retained byte spans and splices in
//! elision placeholders in byte order.
//!
//! ARCHITECTURE: sort elisions by start offset, skip any that overlap an
//! already-placed one, verify UTF-8 boundaries, then copy-then-replace —
//! each record carries its own `replacement_text: String` rather than a
//! fixed placeholder.

use crate::elision::ElisionRecord;

/// Render the final output text by splicing elision placeholders into the
/// original source, preserving byte order for every retained span.
pub(crate) fn render(source: &str, elisions: &[ElisionRecord]) -> String {
    if elisions.is_empty() {
        return source.to_string();
    }

    let mut sorted: Vec<&ElisionRecord> = elisions.iter().collect();
    sorted.sort_unstable_by_key(|r| r.start());

    let estimated_capacity = source.len() + sorted.len() * 24;
    let mut result = String::with_capacity(estimated_capacity);
    let mut last_pos = 0usize;

    for record in sorted {
        let (start, end) = (record.start(), record.end());

        // Defensive: malformed/overlapping ranges from a buggy pass are
        // skipped rather than panicking — the renderer never fails.
        if end < start || end > source.len() || start < last_pos {
            continue;
        }
        if !source.is_char_boundary(start) || !source.is_char_boundary(end) {
            continue;
        }

        result.push_str(&source[last_pos..start]);
        result.push_str(&record.replacement_text);
        last_pos = end;
    }

    if source.is_char_boundary(last_pos) {
        result.push_str(&source[last_pos..]);
    }

    result
}

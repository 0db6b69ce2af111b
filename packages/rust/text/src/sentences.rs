//! Heuristic sentence segmentation.

use std::sync::LazyLock;

use regex::Regex;

/// Split plain text into trimmed, non-empty sentences in document order.
///
/// A boundary is whitespace that follows `.`, `!` or `?`; the terminator
/// stays attached to its sentence. Abbreviations and decimals followed by a
/// space are split too.
pub fn split_sentences(text: &str) -> Vec<String> {
    // Terminator plus the whitespace run after it. The `regex` crate has no
    // lookbehind, so the cut lands one byte past the match start instead.
    static BOUNDARY_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in BOUNDARY_RE.find_iter(text) {
        // Terminators are ASCII, so +1 stays on a char boundary.
        push_trimmed(&mut sentences, &text[start..boundary.start() + 1]);
        start = boundary.end();
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed(out: &mut Vec<String>, segment: &str) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

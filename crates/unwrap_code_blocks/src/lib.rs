// crates/unwrap_code_blocks/src/lib.rs

//! Markdown fence removal for code-bearing sections.
//!
//! Drops usually wrap implementation and testing code in fenced blocks;
//! the persisted files want the bare code.

use drop_section::{ExtractionResult, SectionKind};
use once_cell::sync::Lazy;
use regex::Regex;

// An opening fence line (three or more backticks, optional language tag), the
// body, and the first closing fence line after it. The body group is absent
// for an empty block.
static FENCED_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms)^[ \t]*`{3,}[ \t]*[\w+#.-]*[ \t]*\r?\n(?:(.*?)\r?\n)??[ \t]*`{3,}[ \t]*\r?$")
        .unwrap()
});

// A whole span that is nothing but one inline code span, e.g. `x == 1`.
static INLINE_SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A[ \t]*`([^`\r\n]+)`[ \t]*\z").unwrap());

/// Strips markdown code fences from `content`.
///
/// When the content holds one or more fenced blocks, their bodies are
/// returned joined by a blank line; everything outside the fences is
/// dropped. Content, or a fenced body, that is exactly one single-line
/// inline code span loses its backticks. Anything else comes back
/// unchanged, so the function is idempotent on its own output.
pub fn unwrap_code_blocks(content: &str) -> String {
    let bodies: Vec<&str> = FENCED_BLOCK_RE
        .captures_iter(content)
        .map(|cap| cap.get(1).map_or("", |body| body.as_str()))
        .map(strip_inline_span)
        .collect();

    if bodies.is_empty() {
        return strip_inline_span(content).to_string();
    }
    bodies.join("\n\n")
}

fn strip_inline_span(content: &str) -> &str {
    INLINE_SPAN_RE
        .captures(content)
        .and_then(|cap| cap.get(1))
        .map_or(content, |inner| inner.as_str())
}

/// Unwraps the content of every code-bearing kind in `sections`
/// (implementation and testing). Other kinds are left untouched.
pub fn unwrap_code_sections(sections: &mut ExtractionResult) {
    for (kind, content) in sections.iter_mut() {
        if kind.is_code() {
            *content = unwrap_code_blocks(content);
        }
    }
}

/// Unwraps a single section's content if its kind carries code.
pub fn unwrap_for_kind(kind: SectionKind, content: &str) -> String {
    if kind.is_code() {
        unwrap_code_blocks(content)
    } else {
        content.to_string()
    }
}

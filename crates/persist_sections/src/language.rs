// crates/persist_sections/src/language.rs

//! Guesses a file extension for a section from its own content.

use drop_section::{ExtractionResult, SectionKind};
use once_cell::sync::Lazy;
use regex::Regex;

// ---------------------------------------------------------------------------
//  Regexes
// ---------------------------------------------------------------------------

// `def name(`
static PY_DEF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"def\s+\w+\s*\(").unwrap());

// `function name(`
static JS_FUNCTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"function\s+\w+\s*\(").unwrap());

static JAVA_CLASS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"public\s+class").unwrap());

static JAVA_MAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"public\s+static\s+void\s+main").unwrap());

static C_MAIN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"int\s+main\s*\(").unwrap());

/// Best-effort language guess. The first rule that matches wins:
/// Python, then JavaScript, then Java, then C/C++; `txt` otherwise.
pub fn guess_extension(content: &str) -> &'static str {
    if PY_DEF_RE.is_match(content) || content.contains("import ") {
        "py"
    } else if JS_FUNCTION_RE.is_match(content) || content.contains("console.log") {
        "js"
    } else if JAVA_CLASS_RE.is_match(content) || JAVA_MAIN_RE.is_match(content) {
        "java"
    } else if content.contains("#include") || C_MAIN_RE.is_match(content) {
        if content.contains("std::") {
            "cpp"
        } else {
            "c"
        }
    } else {
        "txt"
    }
}

/// The extension a section of `kind` is written with. Prose kinds are
/// markdown; code kinds are guessed from their content in `sections`.
pub fn extension_for(kind: SectionKind, sections: &ExtractionResult) -> &'static str {
    match kind {
        SectionKind::Requirements | SectionKind::Design | SectionKind::Documentation => "md",
        SectionKind::Implementation | SectionKind::Testing => {
            guess_extension(sections.get(&kind).map(String::as_str).unwrap_or(""))
        }
        SectionKind::Unknown => "txt",
    }
}

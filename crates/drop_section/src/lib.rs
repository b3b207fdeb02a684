// crates/drop_section/src/lib.rs

//! Section kinds shared by every crate in the drop tool-chain, the
//! [`ExtractionResult`] mapping they produce, and the validator that
//! reports required kinds missing from a result.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The fixed categories a drop's content is classified into.
///
/// Declaration order is also the tie-break order used when two markers start
/// at the same byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKind {
    Requirements,
    Design,
    Implementation,
    Testing,
    Documentation,
    Unknown,
}

impl SectionKind {
    /// Every kind, in declaration order.
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Requirements,
        SectionKind::Design,
        SectionKind::Implementation,
        SectionKind::Testing,
        SectionKind::Documentation,
        SectionKind::Unknown,
    ];

    /// Kinds that can be selected or written out. `Unknown` never is.
    pub const KNOWN: [SectionKind; 5] = [
        SectionKind::Requirements,
        SectionKind::Design,
        SectionKind::Implementation,
        SectionKind::Testing,
        SectionKind::Documentation,
    ];

    /// Kinds whose absence is reported by [`validate_sections`].
    pub const REQUIRED: [SectionKind; 3] = [
        SectionKind::Requirements,
        SectionKind::Design,
        SectionKind::Implementation,
    ];

    /// Lower-case name, as used in file names and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Requirements => "requirements",
            SectionKind::Design => "design",
            SectionKind::Implementation => "implementation",
            SectionKind::Testing => "testing",
            SectionKind::Documentation => "documentation",
            SectionKind::Unknown => "unknown",
        }
    }

    /// Capitalised name used in generated headers.
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Requirements => "Requirements",
            SectionKind::Design => "Design",
            SectionKind::Implementation => "Implementation",
            SectionKind::Testing => "Testing",
            SectionKind::Documentation => "Documentation",
            SectionKind::Unknown => "Unknown",
        }
    }

    /// `true` for the kinds whose content is code and gets unwrapped from
    /// markdown fences.
    pub fn is_code(self) -> bool {
        matches!(self, SectionKind::Implementation | SectionKind::Testing)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown section kind '{0}'")]
pub struct ParseSectionKindError(pub String);

impl FromStr for SectionKind {
    type Err = ParseSectionKindError;

    /// Parses a kind name case-insensitively. Surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ParseSectionKindError(s.to_string()))
    }
}

/// Mapping from section kind to its extracted content. Keys are present only
/// for kinds actually found; at most one value is kept per kind.
pub type ExtractionResult = BTreeMap<SectionKind, String>;

/// Which segmentation strategy actually produced a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Marker scan over plain text.
    PlainText,
    /// Section containers located in structured markup.
    Markup,
    /// Markup was requested but could not be parsed; the marker scan ran
    /// over the raw text instead.
    MarkupFallback { reason: String },
}

/// An extraction result together with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub sections: ExtractionResult,
    pub strategy: Strategy,
}

impl Extraction {
    pub fn new(sections: ExtractionResult, strategy: Strategy) -> Self {
        Self { sections, strategy }
    }

    pub fn get(&self, kind: SectionKind) -> Option<&str> {
        self.sections.get(&kind).map(String::as_str)
    }
}

/// Returns the required kinds absent from `result`.
pub fn missing_sections(result: &ExtractionResult) -> BTreeSet<SectionKind> {
    SectionKind::REQUIRED
        .into_iter()
        .filter(|kind| !result.contains_key(kind))
        .collect()
}

/// Checks `result` for required kinds and logs a warning naming any that are
/// missing. The result itself is never touched; the missing set is returned
/// so callers can act on it if they wish.
pub fn validate_sections(result: &ExtractionResult) -> BTreeSet<SectionKind> {
    let missing = missing_sections(result);
    if !missing.is_empty() {
        log::warn!("Missing sections in drop: {}", join_kinds(&missing));
    }
    missing
}

/// Joins kind names with ", " in declaration order.
pub fn join_kinds<'a, I>(kinds: I) -> String
where
    I: IntoIterator<Item = &'a SectionKind>,
{
    kinds
        .into_iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

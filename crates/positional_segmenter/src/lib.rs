// crates/positional_segmenter/src/lib.rs

//! Splits a plain-text drop into sections by marker position.
//!
//! Every registered pattern is run over the whole document, the hits are
//! ordered by byte offset, and each section runs from the end of its marker
//! to the start of the next marker (or the end of the document).
//!
//! When a kind's marker occurs more than once, the section belonging to the
//! last occurrence wins and earlier ones are dropped.

use drop_section::{validate_sections, ExtractionResult, SectionKind};
use marker_registry::MarkerRegistry;
use thiserror::Error;
use unwrap_code_blocks::unwrap_code_sections;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SegmentError {
    #[error("No drop sections found in the content")]
    NoSectionsFound,
}

/// One marker occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMatch<'a> {
    /// Byte offset of the first character of the marker.
    pub position: usize,
    pub kind: SectionKind,
    pub matched_text: &'a str,
}

impl MarkerMatch<'_> {
    /// Byte offset just past the marker, where its span begins.
    pub fn end(&self) -> usize {
        self.position + self.matched_text.len()
    }
}

/// Scans `document` with every marker in `registry` and returns its sections.
///
/// Implementation and testing spans are unwrapped from markdown fences, and
/// the result is checked for missing required kinds (reported, not raised).
///
/// # Errors
///
/// Returns [`SegmentError::NoSectionsFound`] when no marker matches at all.
pub fn scan(registry: &MarkerRegistry, document: &str) -> Result<ExtractionResult, SegmentError> {
    let matches = find_markers(registry, document);
    if matches.is_empty() {
        return Err(SegmentError::NoSectionsFound);
    }
    log::debug!("Found {} section markers", matches.len());

    let mut sections = slice_sections(document, &matches);
    unwrap_code_sections(&mut sections);
    validate_sections(&sections);
    Ok(sections)
}

/// Collects every non-overlapping match of every pattern of every kind,
/// ordered by position.
///
/// Matches starting at the same offset are ordered by kind declaration
/// order, then by pattern registration order.
pub fn find_markers<'a>(registry: &MarkerRegistry, document: &'a str) -> Vec<MarkerMatch<'a>> {
    let mut matches: Vec<MarkerMatch<'a>> = registry
        .iter()
        .flat_map(|(kind, marker)| {
            marker.regex().find_iter(document).map(move |m| MarkerMatch {
                position: m.start(),
                kind,
                matched_text: m.as_str(),
            })
        })
        .collect();

    // Stable: ties keep the registry's kind-then-pattern order.
    matches.sort_by_key(|m| (m.position, m.kind));
    matches
}

/// Derives each match's span from consecutive marker boundaries and writes
/// them into a result in document order, so later matches of a kind
/// overwrite earlier ones.
///
/// A span whose next marker starts before its own marker ends (overlapping
/// markers) is empty.
pub fn slice_sections(document: &str, matches: &[MarkerMatch<'_>]) -> ExtractionResult {
    let mut sections = ExtractionResult::new();
    for (i, current) in matches.iter().enumerate() {
        let start = current.end();
        let end = matches
            .get(i + 1)
            .map_or(document.len(), |next| next.position);
        let content = if start < end {
            document[start..end].trim()
        } else {
            ""
        };

        if let Some(previous) = sections.insert(current.kind, content.to_string()) {
            log::debug!(
                "Replacing earlier {} section ({} bytes) with the one at offset {}",
                current.kind,
                previous.len(),
                current.position
            );
        }
    }
    sections
}

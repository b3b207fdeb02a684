// crates/markup_segmenter/src/lib.rs

//! Section extraction for drops written as structured markup.
//!
//! Sections are `<div class="section" id="...">` containers; the `id` names
//! the kind. Code kinds take the text of their nested `<code>` elements,
//! prose kinds take the container text minus its leading heading.
//!
//! The HTML parser recovers from anything a browser would, so the only
//! markup this module cannot process is markup with no section containers
//! at all. That is not an error here: the raw text goes through the marker
//! scan instead and the outcome says so.

pub mod tree;

use drop_section::{validate_sections, Extraction, ExtractionResult, SectionKind, Strategy};
use marker_registry::MarkerRegistry;
use positional_segmenter::SegmentError;
use thiserror::Error;

pub use tree::{parse_markup, Element, Node};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkupError {
    #[error("no <div class=\"section\"> containers found")]
    NoSectionContainers,
}

/// Maps a container id to its section kind. Ids match exactly.
pub fn kind_for_id(id: &str) -> Option<SectionKind> {
    match id {
        "requirements" => Some(SectionKind::Requirements),
        "design" => Some(SectionKind::Design),
        "implementation" => Some(SectionKind::Implementation),
        "testing" => Some(SectionKind::Testing),
        "documentation" => Some(SectionKind::Documentation),
        _ => None,
    }
}

/// Extracts sections from a markup drop, falling back to the marker scan
/// over the raw text when the markup does not parse.
///
/// # Errors
///
/// Only the fallback can fail, with [`SegmentError::NoSectionsFound`] when
/// the raw text holds no markers either.
pub fn scan_markup(registry: &MarkerRegistry, document: &str) -> Result<Extraction, SegmentError> {
    match extract_sections(document) {
        Ok(sections) => {
            log::debug!("Extracted {} sections from markup", sections.len());
            validate_sections(&sections);
            Ok(Extraction::new(sections, Strategy::Markup))
        }
        Err(err) => {
            log::warn!("Error parsing markup: {}; falling back to marker scan", err);
            let sections = positional_segmenter::scan(registry, document)?;
            Ok(Extraction::new(
                sections,
                Strategy::MarkupFallback {
                    reason: err.to_string(),
                },
            ))
        }
    }
}

/// Parses `document` and reads every section container out of it. Later
/// containers of a kind replace earlier ones.
///
/// # Errors
///
/// [`MarkupError::NoSectionContainers`] when the document holds no
/// `div.section` element, whatever its id.
pub fn extract_sections(document: &str) -> Result<ExtractionResult, MarkupError> {
    let root = parse_markup(document);
    let containers = root.find_all(&is_section_container);
    if containers.is_empty() {
        return Err(MarkupError::NoSectionContainers);
    }

    let mut sections = ExtractionResult::new();
    for container in containers {
        let Some(id) = container.attribute("id") else {
            continue;
        };
        let Some(kind) = kind_for_id(id) else {
            log::debug!("Skipping section container with unrecognised id '{}'", id);
            continue;
        };
        sections.insert(kind, container_content(kind, container));
    }
    Ok(sections)
}

fn is_section_container(element: &Element) -> bool {
    element.name == "div" && element.has_class("section")
}

fn is_heading(element: &Element) -> bool {
    matches!(element.name.as_str(), "h1" | "h2" | "h3")
}

fn container_content(kind: SectionKind, container: &Element) -> String {
    if kind.is_code() {
        let blocks: Vec<String> = container
            .find_all(&|e: &Element| e.name == "code")
            .into_iter()
            .map(Element::text)
            .collect();
        if blocks.is_empty() {
            container.text().trim().to_string()
        } else {
            blocks.join("\n\n")
        }
    } else {
        let mut body = container.clone();
        body.remove_first(&is_heading);
        body.text().trim().to_string()
    }
}

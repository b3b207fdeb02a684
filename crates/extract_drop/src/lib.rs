// crates/extract_drop/src/lib.rs

//! Facade over the drop tool-chain: picks the segmentation strategy for a
//! document, runs it, and hands back the sections together with the
//! strategy that produced them.

pub mod config;

use std::fs;
use std::path::{Path, PathBuf};

use drop_section::{Extraction, ExtractionResult, SectionKind, Strategy};
use marker_registry::{MarkerRegistry, RegistryError};
use positional_segmenter::SegmentError;
use thiserror::Error;

pub use config::ExtractConfig;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Drop file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Segment(#[from] SegmentError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("No {0} section found in the drop")]
    SectionNotFound(SectionKind),
}

/// How the caller declares a document should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    PlainText,
    Markup,
}

impl DocumentType {
    /// Infers the type from the file extension: `.html`, `.htm`, `.xhtml`
    /// and `.xml` (any case) are markup, everything else is plain text.
    pub fn from_path(path: &Path) -> Self {
        let is_markup = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                matches!(
                    ext.to_ascii_lowercase().as_str(),
                    "html" | "htm" | "xhtml" | "xml"
                )
            })
            .unwrap_or(false);
        if is_markup {
            DocumentType::Markup
        } else {
            DocumentType::PlainText
        }
    }
}

/// Extracts sections from drops using one marker registry.
#[derive(Debug, Clone, Default)]
pub struct DropExtractor {
    registry: MarkerRegistry,
}

impl DropExtractor {
    /// An extractor using the built-in markers only.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: MarkerRegistry) -> Self {
        Self { registry }
    }

    /// An extractor whose registry extends the built-ins with `markers`.
    pub fn with_markers<I, S>(markers: I) -> Result<Self, ExtractError>
    where
        I: IntoIterator<Item = (SectionKind, S)>,
        S: AsRef<str>,
    {
        Ok(Self::with_registry(MarkerRegistry::with_additional(markers)?))
    }

    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    /// Marker scan over a plain-text drop.
    pub fn extract_from_str(&self, document: &str) -> Result<ExtractionResult, ExtractError> {
        Ok(positional_segmenter::scan(&self.registry, document)?)
    }

    /// Container scan over a markup drop, with marker-scan fallback.
    pub fn extract_markup(&self, document: &str) -> Result<Extraction, ExtractError> {
        Ok(markup_segmenter::scan_markup(&self.registry, document)?)
    }

    /// Runs the strategy matching the declared `doc_type`.
    pub fn extract(&self, document: &str, doc_type: DocumentType) -> Result<Extraction, ExtractError> {
        log::debug!("Extracting drop as {:?}", doc_type);
        match doc_type {
            DocumentType::PlainText => Ok(Extraction::new(
                self.extract_from_str(document)?,
                Strategy::PlainText,
            )),
            DocumentType::Markup => self.extract_markup(document),
        }
    }

    /// Reads `path` and extracts it. Markup is used when `force_markup` is
    /// set or the extension says so.
    ///
    /// # Errors
    ///
    /// [`ExtractError::InputNotFound`] is returned before anything is read
    /// when `path` does not exist.
    pub fn extract_from_file(&self, path: &Path, force_markup: bool) -> Result<Extraction, ExtractError> {
        if !path.exists() {
            return Err(ExtractError::InputNotFound(path.to_path_buf()));
        }
        let document = fs::read_to_string(path).map_err(|source| ExtractError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let doc_type = if force_markup {
            DocumentType::Markup
        } else {
            DocumentType::from_path(path)
        };
        self.extract(&document, doc_type)
    }

    /// Extracts a plain-text drop and returns only the content of `kind`.
    pub fn extract_section(&self, document: &str, kind: SectionKind) -> Result<String, ExtractError> {
        self.extract_from_str(document)?
            .remove(&kind)
            .ok_or(ExtractError::SectionNotFound(kind))
    }

    /// Shorthand for the implementation section of a plain-text drop.
    pub fn extract_implementation(&self, document: &str) -> Result<String, ExtractError> {
        self.extract_section(document, SectionKind::Implementation)
    }
}

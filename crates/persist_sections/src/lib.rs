// crates/persist_sections/src/lib.rs

//! Writes an [`ExtractionResult`] to disk, one file per section, each with a
//! small documentation header in the target language's comment syntax.

pub mod header;
pub mod language;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use drop_section::{ExtractionResult, SectionKind};
use thiserror::Error;

pub use header::{add_documentation_header, render_header, title_case, HeaderContext};
pub use language::{extension_for, guess_extension};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Error creating directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `<base>_<kind>.<ext>`
pub fn section_file_name(base_name: &str, kind: SectionKind, ext: &str) -> String {
    format!("{}_{}.{}", base_name, kind.as_str(), ext)
}

/// Saves every section in `sections` into `dir` (created if missing) and
/// returns the path written for each kind. `Unknown` sections are skipped.
///
/// Files are written one at a time; if one fails, the ones already written
/// stay as they are.
pub fn save_sections(
    sections: &ExtractionResult,
    dir: &Path,
    ctx: &HeaderContext,
) -> Result<BTreeMap<SectionKind, PathBuf>, PersistError> {
    create_dir(dir)?;

    let mut written = BTreeMap::new();
    for (&kind, content) in sections {
        if kind == SectionKind::Unknown {
            continue;
        }
        let ext = extension_for(kind, sections);
        let path = dir.join(section_file_name(&ctx.component_name, kind, ext));
        let documented = add_documentation_header(content, kind, ext, ctx);

        fs::write(&path, documented).map_err(|source| PersistError::Write {
            path: path.clone(),
            source,
        })?;
        log::debug!("Wrote {} section to {}", kind, path.display());
        written.insert(kind, path);
    }
    Ok(written)
}

/// Like [`save_sections`], but each kind goes into its own `<dir>/<kind>/`
/// subdirectory. A subdirectory is created for every known kind, even those
/// absent from `sections`.
pub fn save_sections_in_subdirs(
    sections: &ExtractionResult,
    dir: &Path,
    ctx: &HeaderContext,
) -> Result<BTreeMap<SectionKind, PathBuf>, PersistError> {
    for kind in SectionKind::KNOWN {
        create_dir(&dir.join(kind.as_str()))?;
    }

    let mut written = BTreeMap::new();
    for (&kind, content) in sections {
        if kind == SectionKind::Unknown {
            continue;
        }
        let single: ExtractionResult = [(kind, content.clone())].into_iter().collect();
        written.extend(save_sections(&single, &dir.join(kind.as_str()), ctx)?);
    }
    Ok(written)
}

fn create_dir(dir: &Path) -> Result<(), PersistError> {
    fs::create_dir_all(dir).map_err(|source| PersistError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

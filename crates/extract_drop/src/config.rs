// crates/extract_drop/src/config.rs

use std::path::{Path, PathBuf};

use drop_section::SectionKind;
use marker_registry::{parse_marker_spec, RegistryError};

/// Environment variable holding extra markers as `KIND=PATTERN` entries
/// separated by `;`.
pub const MARKERS_ENV: &str = "EXTRACT_DROP_MARKERS";

/// Runtime configuration composed from the CLI and the environment.
#[derive(Clone, Debug, Default)]
pub struct ExtractConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Overrides the base name derived from the input file.
    pub base_name: Option<String>,
    /// One subdirectory per section kind.
    pub subdirs: bool,
    /// Read the input as markup whatever its extension.
    pub force_markup: bool,
    pub debug: bool,
    /// Print only this section instead of writing files.
    pub section: Option<SectionKind>,
    /// Extra markers, CLI entries first, then environment entries.
    pub markers: Vec<(SectionKind, String)>,
}

impl ExtractConfig {
    /// The base name for output files: the override if given, otherwise the
    /// input file's stem.
    pub fn base_name(&self) -> String {
        self.base_name
            .clone()
            .unwrap_or_else(|| file_stem(&self.input))
    }

    /// The input's file name, as recorded in generated headers.
    pub fn source_file(&self) -> String {
        self.input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string())
    }

    /// Parses and appends `KIND=PATTERN` marker specs.
    pub fn add_marker_specs<I, S>(&mut self, specs: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for spec in specs {
            self.markers.push(parse_marker_spec(spec.as_ref())?);
        }
        Ok(())
    }

    /// Appends the markers listed in [`MARKERS_ENV`], if set.
    pub fn add_env_markers(&mut self) -> Result<(), RegistryError> {
        match std::env::var(MARKERS_ENV) {
            Ok(value) => self.add_marker_specs(split_env_markers(&value)),
            Err(_) => Ok(()),
        }
    }
}

fn split_env_markers(value: &str) -> Vec<&str> {
    value
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "component".to_string())
}

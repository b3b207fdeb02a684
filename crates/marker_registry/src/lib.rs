// crates/marker_registry/src/lib.rs

//! `marker_registry` — the catalog of section markers.
//!
//!  * **Built-in catalog** – heading, block-comment, line-comment and
//!    docstring spellings for every known [`SectionKind`].
//!  * **Caller additions** – extra patterns extend (never replace) the
//!    built-ins of their kind.
//!  * **Owned storage** – every [`MarkerRegistry`] owns its own pattern
//!    lists, so adding to one instance never shows up in another.
//!
//! All patterns are compiled case-insensitively with `^`/`$` matching at
//! line boundaries.

use std::collections::BTreeMap;

use drop_section::SectionKind;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

// ---------------------------------------------------------------------------
//  Built-in catalog
// ---------------------------------------------------------------------------

/// Heading-style, block-comment-style, line-comment-style and docstring-style
/// spellings. A heading starts its line and its label is a whole word; any
/// text after the label opens the section's content.
fn builtin_patterns(kind: SectionKind) -> &'static [&'static str] {
    match kind {
        SectionKind::Requirements => &[
            r"^[ \t]*#+[ \t]*Requirements\b:?",
            r"^[ \t]*#+[ \t]*Specification\b:?",
            r"/\*+\s*Requirements:?\s*\*+/",
            r"//+[ \t]*Requirements\b:?",
            r#""""[\s\S]*?Requirements:?[\s\S]*?""""#,
        ],
        SectionKind::Design => &[
            r"^[ \t]*#+[ \t]*Design\b:?",
            r"^[ \t]*#+[ \t]*Architecture\b:?",
            r"/\*+\s*Design:?\s*\*+/",
            r"//+[ \t]*Design\b:?",
            r#""""[\s\S]*?Design:?[\s\S]*?""""#,
        ],
        SectionKind::Implementation => &[
            r"^[ \t]*#+[ \t]*Implementation\b:?",
            r"^[ \t]*#+[ \t]*Code\b:?",
            r"/\*+\s*Implementation:?\s*\*+/",
            r"//+[ \t]*Implementation\b:?",
            r#""""[\s\S]*?Implementation:?[\s\S]*?""""#,
        ],
        SectionKind::Testing => &[
            r"^[ \t]*#+[ \t]*Testing\b:?",
            r"^[ \t]*#+[ \t]*Tests\b:?",
            r"/\*+\s*Testing:?\s*\*+/",
            r"//+[ \t]*Testing\b:?",
            r#""""[\s\S]*?Testing:?[\s\S]*?""""#,
        ],
        SectionKind::Documentation => &[
            r"^[ \t]*#+[ \t]*Documentation\b:?",
            r"/\*+\s*Documentation:?\s*\*+/",
            r"//+[ \t]*Documentation\b:?",
            r#""""[\s\S]*?Documentation:?[\s\S]*?""""#,
        ],
        SectionKind::Unknown => &[],
    }
}

// Compiled once; each registry takes its own copy of the lists.
static BUILTIN_MARKERS: Lazy<BTreeMap<SectionKind, Vec<Marker>>> = Lazy::new(|| {
    SectionKind::KNOWN
        .into_iter()
        .map(|kind| {
            let markers = builtin_patterns(kind)
                .iter()
                .map(|pattern| Marker::compile(kind, pattern).unwrap())
                .collect();
            (kind, markers)
        })
        .collect()
});

// ---------------------------------------------------------------------------
//  Types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid marker pattern '{pattern}' for {kind}: {source}")]
    InvalidPattern {
        kind: SectionKind,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("markers cannot be registered for the {0} kind")]
    UnregistrableKind(SectionKind),
    #[error("invalid marker spec '{0}', expected KIND=PATTERN")]
    InvalidSpec(String),
}

/// One compiled marker pattern.
#[derive(Debug, Clone)]
pub struct Marker {
    pattern: String,
    regex: Regex,
}

impl Marker {
    fn compile(kind: SectionKind, pattern: &str) -> Result<Self, RegistryError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()
            .map_err(|source| RegistryError::InvalidPattern {
                kind,
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The pattern source as registered.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Maps each section kind to the marker patterns that open it.
#[derive(Debug, Clone)]
pub struct MarkerRegistry {
    markers: BTreeMap<SectionKind, Vec<Marker>>,
}

impl Default for MarkerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerRegistry {
    /// A registry holding only the built-in catalog.
    pub fn new() -> Self {
        Self {
            markers: BUILTIN_MARKERS.clone(),
        }
    }

    /// A registry holding the built-in catalog extended with `additional`
    /// patterns. Additions are appended after the built-ins of their kind.
    pub fn with_additional<I, S>(additional: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (SectionKind, S)>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for (kind, pattern) in additional {
            registry.add_pattern(kind, pattern.as_ref())?;
        }
        Ok(registry)
    }

    /// Appends `pattern` to the markers of `kind` in this registry only.
    pub fn add_pattern(&mut self, kind: SectionKind, pattern: &str) -> Result<(), RegistryError> {
        if kind == SectionKind::Unknown {
            return Err(RegistryError::UnregistrableKind(kind));
        }
        let marker = Marker::compile(kind, pattern)?;
        self.markers.entry(kind).or_default().push(marker);
        Ok(())
    }

    /// Every marker registered for `kind`, built-ins first.
    pub fn markers(&self, kind: SectionKind) -> &[Marker] {
        self.markers.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Pattern sources registered for `kind`.
    pub fn patterns(&self, kind: SectionKind) -> Vec<&str> {
        self.markers(kind).iter().map(Marker::pattern).collect()
    }

    /// All `(kind, marker)` pairs, kinds in declaration order and markers in
    /// registration order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, &Marker)> + '_ {
        self.markers
            .iter()
            .flat_map(|(kind, markers)| markers.iter().map(move |marker| (*kind, marker)))
    }
}

/// Parses a `KIND=PATTERN` spec as accepted on the command line.
pub fn parse_marker_spec(spec: &str) -> Result<(SectionKind, String), RegistryError> {
    let (kind, pattern) = spec
        .split_once('=')
        .ok_or_else(|| RegistryError::InvalidSpec(spec.to_string()))?;
    let kind: SectionKind = kind
        .parse()
        .map_err(|_| RegistryError::InvalidSpec(spec.to_string()))?;
    if pattern.is_empty() {
        return Err(RegistryError::InvalidSpec(spec.to_string()));
    }
    Ok((kind, pattern.to_string()))
}

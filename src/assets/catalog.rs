//! Outline library on disk: `images/manifest.json` plus the SVG files it lists.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rand::Rng;

use crate::assets::builtin::builtin_for;
use crate::assets::outline::OutlineArt;
use crate::foundation::error::{ColorbookError, ColorbookResult};

/// Manifest location relative to the library root.
pub const MANIFEST_PATH: &str = "images/manifest.json";

/// Directory every catalog entry lives under.
pub const IMAGES_PREFIX: &str = "images/";

/// Entries used when the manifest is missing, empty, or unreadable.
pub const FALLBACK_FILES: [&str; 3] = [
    "images/sample1.svg",
    "images/sample2.svg",
    "images/sample3.svg",
];

/// Where the current entry list came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    /// Parsed from the manifest.
    Manifest,
    /// The built-in fallback list.
    Fallback,
}

/// The set of outlines available to pick from.
#[derive(Clone, Debug)]
pub struct OutlineCatalog {
    root: PathBuf,
    entries: Vec<String>,
    source: CatalogSource,
}

impl OutlineCatalog {
    /// Load the catalog under `root`. Never fails: problems with the manifest fall back to
    /// [`FALLBACK_FILES`] with a warning.
    pub fn load(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        match read_manifest(&root) {
            Ok(entries) => Self {
                root,
                entries,
                source: CatalogSource::Manifest,
            },
            Err(err) => {
                tracing::warn!(root = %root.display(), error = %err, "using fallback outline list");
                Self::fallback(root)
            }
        }
    }

    /// Catalog with an explicit entry list; entries are normalized like manifest entries.
    pub fn from_entries<I, S>(root: impl Into<PathBuf>, entries: I) -> ColorbookResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|e| normalize_entry(e.as_ref()))
            .collect::<ColorbookResult<Vec<_>>>()?;
        if entries.is_empty() {
            return Err(ColorbookError::validation("outline catalog must not be empty"));
        }
        Ok(Self {
            root: root.into(),
            entries,
            source: CatalogSource::Manifest,
        })
    }

    fn fallback(root: PathBuf) -> Self {
        Self {
            root,
            entries: FALLBACK_FILES.iter().map(|s| (*s).to_owned()).collect(),
            source: CatalogSource::Fallback,
        }
    }

    /// Library root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Normalized entries, each starting with `images/`.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Whether the entries came from the manifest or the fallback list.
    pub fn source(&self) -> CatalogSource {
        self.source
    }

    /// Uniformly random entry.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.entries[rng.random_range(0..self.entries.len())]
    }

    /// Filesystem path of an entry.
    pub fn path_of(&self, entry: &str) -> PathBuf {
        self.root.join(entry)
    }

    /// Read and parse one entry.
    pub fn load_outline(&self, entry: &str) -> ColorbookResult<OutlineArt> {
        let rel = normalize_entry(entry)?;
        let art = OutlineArt::from_svg_file(&self.path_of(&rel))?;
        tracing::debug!(entry = %rel, "loaded outline");
        Ok(art)
    }

    /// Read one entry, substituting an embedded outline when it cannot be used.
    pub fn load_or_builtin(&self, entry: &str) -> ColorbookResult<OutlineArt> {
        match self.load_outline(entry) {
            Ok(art) => Ok(art),
            Err(err) => {
                let builtin = builtin_for(entry);
                tracing::warn!(entry, error = %err, fallback = builtin.name, "outline unavailable");
                OutlineArt::builtin(builtin)
            }
        }
    }
}

fn read_manifest(root: &Path) -> ColorbookResult<Vec<String>> {
    let path = root.join(MANIFEST_PATH);
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("read manifest '{}'", path.display()))?;
    let names: Vec<String> = serde_json::from_str(&text)
        .map_err(|e| ColorbookError::serde(format!("manifest is not a JSON string array: {e}")))?;
    if names.is_empty() {
        return Err(ColorbookError::asset("manifest is empty"));
    }

    let mut entries = Vec::with_capacity(names.len());
    for name in &names {
        match normalize_entry(name) {
            Ok(e) => entries.push(e),
            Err(err) => tracing::warn!(name, error = %err, "skipping manifest entry"),
        }
    }
    if entries.is_empty() {
        return Err(ColorbookError::asset("manifest has no usable entries"));
    }
    Ok(entries)
}

/// Normalize a manifest name into a root-relative path under `images/`.
pub fn normalize_entry(name: &str) -> ColorbookResult<String> {
    let rel = normalize_rel_path(name)?;
    if rel.starts_with(IMAGES_PREFIX) {
        Ok(rel)
    } else {
        Ok(format!("{IMAGES_PREFIX}{rel}"))
    }
}

/// Normalize a library-relative path: `/` separators, no `.` segments, no absolute paths or `..`.
fn normalize_rel_path(source: &str) -> ColorbookResult<String> {
    let s = source.trim().replace('\\', "/");
    if s.starts_with('/') {
        return Err(ColorbookError::validation("outline paths must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ColorbookError::validation(
                "outline paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ColorbookError::validation(
            "outline path must contain a file name",
        ));
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/catalog.rs"]
mod tests;

//! Page index snapshots.
//!
//! # Responsibilities
//! - Enumerate page files under the pages directory
//! - Record which configured extensions exist per identifier
//! - Expose registered API routes as if their files existed
//!
//! # Design Decisions
//! - Immutable once built; a rescan produces a new snapshot
//! - Files with unconfigured extensions and hidden entries are ignored
//! - A missing pages directory is an empty index, not an error

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::routing::matcher;

/// Error raised while scanning the pages directory.
#[derive(Debug, Error)]
#[error("failed to scan {path}: {source}")]
pub struct IndexError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// The set of known page files at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageIndex {
    /// Configured extensions, primary first.
    extensions: Vec<String>,
    /// Identifier → extensions present on disk.
    pages: BTreeMap<String, BTreeSet<String>>,
}

impl PageIndex {
    /// Create an empty index accepting the given extensions.
    pub fn new(extensions: Vec<String>) -> Self {
        Self {
            extensions,
            pages: BTreeMap::new(),
        }
    }

    /// Build an index from page file paths relative to the pages directory.
    pub fn from_files<I, S>(extensions: Vec<String>, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new(extensions);
        for file in files {
            index.insert_file(file.as_ref());
        }
        index
    }

    /// Walk `pages_dir` and record every page file found.
    pub async fn scan(pages_dir: &Path, extensions: &[String]) -> Result<Self, IndexError> {
        let mut index = Self::new(extensions.to_vec());
        if !tokio::fs::try_exists(pages_dir).await.unwrap_or(false) {
            tracing::warn!(pages_dir = %pages_dir.display(), "Pages directory does not exist");
            return Ok(index);
        }

        let mut pending = vec![(pages_dir.to_path_buf(), String::new())];
        while let Some((dir, prefix)) = pending.pop() {
            let io_err = |source| IndexError {
                path: dir.clone(),
                source,
            };
            let mut entries = tokio::fs::read_dir(&dir).await.map_err(io_err)?;
            while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
                let name = entry.file_name().to_string_lossy().into_owned();
                if name.starts_with('.') {
                    continue;
                }
                let path = entry.path();
                let metadata = match tokio::fs::metadata(&path).await {
                    Ok(metadata) => metadata,
                    Err(e) => {
                        tracing::debug!(
                            path = %path.display(),
                            error = %e,
                            "Skipping unreadable entry"
                        );
                        continue;
                    }
                };
                let relative = format!("{prefix}{name}");
                if metadata.is_dir() {
                    pending.push((path, format!("{relative}/")));
                } else if metadata.is_file() {
                    index.insert_file(&relative);
                }
            }
        }

        tracing::debug!(
            pages_dir = %pages_dir.display(),
            pages = index.len(),
            "Page index built"
        );
        Ok(index)
    }

    /// Record API routes in the primary-extension slot of their identifiers.
    pub fn with_api_routes<'a, I>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        if let Some(primary) = self.primary_extension().map(str::to_string) {
            for identifier in identifiers {
                self.insert(identifier, &primary);
            }
        }
        self
    }

    /// Record a page file given as `identifier.ext`.
    ///
    /// Returns false when the file does not carry a configured extension.
    pub fn insert_file(&mut self, relative: &str) -> bool {
        let relative = relative.replace('\\', "/");
        let Some((identifier, extension)) = relative.rsplit_once('.') else {
            return false;
        };
        if identifier.ends_with('/') {
            return false;
        }
        self.insert(identifier, extension)
    }

    /// Record `identifier` as present with `extension`.
    pub fn insert(&mut self, identifier: &str, extension: &str) -> bool {
        if identifier.is_empty() || !self.extensions.iter().any(|e| e == extension) {
            return false;
        }
        self.pages
            .entry(identifier.to_string())
            .or_default()
            .insert(extension.to_string())
    }

    /// The primary extension, if any is configured.
    pub fn primary_extension(&self) -> Option<&str> {
        self.extensions.first().map(String::as_str)
    }

    /// Whether any configured extension exists for `identifier`.
    pub fn contains(&self, identifier: &str) -> bool {
        self.pages.contains_key(identifier)
    }

    /// All identifiers in sorted order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    /// Top-level dynamic pages as `(identifier, param name)` pairs.
    pub fn dynamic_pages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.identifiers()
            .filter_map(|id| matcher::dynamic_param(id).map(|name| (id, name)))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

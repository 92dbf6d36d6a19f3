//! Page loading.
//!
//! # Responsibilities
//! - Turn a resolved identifier into a [`PageModule`]
//! - Probe page file extensions in configured order
//! - Attach the registered data hook, or hand out the API handler
//!
//! # Design Decisions
//! - Loading has no observable side effects: repeated loads are equivalent
//! - The component cache is an optimization keyed by file path, never relied upon
//! - Identifiers that would leave the pages directory are simply not found

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

use crate::config::AppConfig;
use crate::pages::module::{Component, PageModule};
use crate::pages::registry::PageRegistry;
use crate::routing::index::{IndexError, PageIndex};
use crate::routing::matcher;

/// Errors that can occur while loading a page.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No candidate file (or API handler) exists for the identifier.
    #[error("page not found: {0}")]
    NotFound(String),

    /// A candidate file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads page modules from the pages directory and the registry.
pub struct PageLoader {
    pages_dir: PathBuf,
    extensions: Vec<String>,
    registry: Arc<PageRegistry>,
    cache: Option<DashMap<PathBuf, Component>>,
}

impl PageLoader {
    pub fn new(
        pages_dir: impl Into<PathBuf>,
        extensions: Vec<String>,
        registry: Arc<PageRegistry>,
    ) -> Self {
        Self {
            pages_dir: pages_dir.into(),
            extensions,
            registry,
            cache: None,
        }
    }

    /// Build a loader from the site configuration.
    pub fn from_config(config: &AppConfig, registry: Arc<PageRegistry>) -> Self {
        Self::new(
            config.paths.pages_dir.clone(),
            config.pages.extensions.clone(),
            registry,
        )
        .with_cache(config.cache_modules())
    }

    /// Enable or disable the component cache.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache = enabled.then(DashMap::new);
        self
    }

    pub fn pages_dir(&self) -> &Path {
        &self.pages_dir
    }

    /// Snapshot the page tree: files on disk plus registered API routes.
    pub async fn scan_index(&self) -> Result<PageIndex, IndexError> {
        let index = PageIndex::scan(&self.pages_dir, &self.extensions).await?;
        Ok(index.with_api_routes(self.registry.api_routes()))
    }

    /// Drop every cached component.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Load the page module for `identifier`.
    pub async fn load(&self, identifier: &str) -> Result<PageModule, LoadError> {
        if !matcher::is_safe_identifier(identifier) {
            tracing::warn!(page = %identifier, "Refusing to load unsafe page identifier");
            return Err(LoadError::NotFound(identifier.to_string()));
        }

        if matcher::is_api(identifier) {
            return self
                .registry
                .api_handler(identifier)
                .map(PageModule::Api)
                .ok_or_else(|| LoadError::NotFound(identifier.to_string()));
        }

        for ext in &self.extensions {
            let path = self.pages_dir.join(format!("{identifier}.{ext}"));
            if let Some(component) = self.load_component(&path).await? {
                tracing::debug!(page = %identifier, path = %path.display(), "Page loaded");
                return Ok(PageModule::Ui {
                    component,
                    hook: self.registry.hook(identifier),
                });
            }
        }

        Err(LoadError::NotFound(identifier.to_string()))
    }

    /// Read a component file, `None` when it does not exist.
    async fn load_component(&self, path: &Path) -> Result<Option<Component>, LoadError> {
        let cached = self
            .cache
            .as_ref()
            .and_then(|cache| cache.get(path).map(|entry| entry.value().clone()));
        if let Some(component) = cached {
            return Ok(Some(component));
        }

        let io_err = |source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        };
        match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_err(e)),
        }

        let source = match tokio::fs::read_to_string(path).await {
            Ok(source) => source,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_err(e)),
        };
        let component = Component::new(path, source);

        if let Some(cache) = &self.cache {
            cache.insert(path.to_path_buf(), component.clone());
        }
        Ok(Some(component))
    }
}

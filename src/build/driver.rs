//! One-shot static build.
//!
//! # Responsibilities
//! - Enumerate the buildable pages of the page tree
//! - Render each in static mode through the shared pipeline
//! - Write one document per page under the output directory
//!
//! # Design Decisions
//! - Pages are built one after another in identifier order, so output
//!   and logs are reproducible
//! - The first failure aborts the build; files already written stay
//! - API pages, dynamic pages and shell pages are never built

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::config::AppConfig;
use crate::observability::metrics;
use crate::pages::loader::{LoadError, PageLoader};
use crate::pages::registry::PageRegistry;
use crate::render::{
    HandlebarsRenderer, PipelineError, RenderContext, RenderMode, RenderPipeline, Rendered,
    Renderer,
};
use crate::routing::{matcher, IndexError, PageIndex, Params};

/// Errors that abort a build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A UI page rendered to something other than a document.
    #[error("page {0} did not render to a document")]
    NotADocument(String),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A page written by the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPage {
    pub identifier: String,
    pub output: PathBuf,
}

/// Summary of a successful build.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages: Vec<BuiltPage>,
}

impl BuildReport {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Renders every static page into the output directory.
pub struct StaticBuilder {
    loader: PageLoader,
    pipeline: RenderPipeline,
    dist_dir: PathBuf,
    output_extension: String,
    shell_pages: Vec<String>,
}

impl StaticBuilder {
    /// Create a builder rendering components with Handlebars.
    pub fn new(config: &AppConfig, registry: PageRegistry) -> Self {
        let renderer = Arc::new(HandlebarsRenderer::from_config(&config.render));
        Self::with_renderer(config, registry, renderer)
    }

    pub fn with_renderer(
        config: &AppConfig,
        registry: PageRegistry,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            // Each page is loaded exactly once.
            loader: PageLoader::from_config(config, Arc::new(registry)).with_cache(false),
            pipeline: RenderPipeline::new(renderer),
            dist_dir: config.paths.dist_dir.clone(),
            output_extension: config.pages.output_extension.clone(),
            shell_pages: config.pages.shell_pages.clone(),
        }
    }

    /// Build every static page.
    pub async fn build(&self) -> Result<BuildReport, BuildError> {
        let index = self.loader.scan_index().await?;
        let pages = self.buildable_pages(&index);

        tracing::info!(
            pages = pages.len(),
            dist_dir = %self.dist_dir.display(),
            "Starting static build"
        );

        let mut report = BuildReport::default();
        for identifier in pages {
            let output = self.build_page(&identifier).await.inspect_err(|e| {
                tracing::error!(page = %identifier, error = %e, "Static build failed");
            })?;
            metrics::record_page_built(&identifier);
            tracing::info!(page = %identifier, output = %output.display(), "Built page");
            report.pages.push(BuiltPage { identifier, output });
        }

        tracing::info!(pages = report.len(), "Static build complete");
        Ok(report)
    }

    /// Identifiers the build renders, in build order.
    pub fn buildable_pages(&self, index: &PageIndex) -> Vec<String> {
        // PageIndex iterates in identifier order.
        index
            .identifiers()
            .filter(|id| !matcher::is_api(id))
            .filter(|id| !matcher::has_dynamic_segment(id))
            .filter(|id| !self.shell_pages.iter().any(|shell| shell == id))
            .map(str::to_string)
            .collect()
    }

    /// Where the document for `identifier` is written.
    pub fn output_path(&self, identifier: &str) -> PathBuf {
        self.dist_dir
            .join(format!("{identifier}.{}", self.output_extension))
    }

    async fn build_page(&self, identifier: &str) -> Result<PathBuf, BuildError> {
        let module = self.loader.load(identifier).await?;
        let ctx = RenderContext::new(identifier, Params::new(), RenderMode::Static);

        let html = match self.pipeline.render(ctx, &module, None).await? {
            Rendered::Document(html) => html,
            Rendered::Delegated(_) => return Err(BuildError::NotADocument(identifier.to_string())),
        };

        let output = self.output_path(identifier);
        write_output(&output, &html).await?;
        Ok(output)
    }
}

async fn write_output(path: &Path, html: &str) -> Result<(), BuildError> {
    let write_error = |source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }
    tokio::fs::write(path, html).await.map_err(write_error)
}

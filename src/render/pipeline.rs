//! Render orchestration shared by the request server and the static build.
//!
//! # Responsibilities
//! - Delegate API pages to their handler untouched
//! - Run the data hook matching the render mode
//! - Render the component and wrap it in the page document
//!
//! # Design Decisions
//! - The component is never rendered before the hook has resolved
//! - A failed hook fails the render; partial props are never used
//! - No retries: the same inputs would fail the same way

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use thiserror::Error;

use crate::pages::module::{Component, DataHook, HookError, PageModule, Props, ServerPropsContext};
use crate::render::context::{RenderContext, RenderMode};
use crate::render::document;
use crate::render::renderer::{RenderError, Renderer};

/// Errors that fail a render.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The page's data hook failed.
    #[error("data hook for page {page} failed: {source}")]
    DataFetch {
        page: String,
        #[source]
        source: HookError,
    },

    /// The renderer failed on the page's component.
    #[error("rendering page {page} failed: {source}")]
    Render {
        page: String,
        #[source]
        source: RenderError,
    },

    /// An API page was rendered without a request to hand it.
    #[error("API page {0} can only be served in response to a request")]
    NoExchange(String),
}

/// Outcome of a successful render.
#[derive(Debug)]
pub enum Rendered {
    /// A complete HTML document.
    Document(String),
    /// The response produced by an API handler.
    Delegated(Response),
}

/// Runs data hooks and the renderer for one page at a time.
#[derive(Clone)]
pub struct RenderPipeline {
    renderer: Arc<dyn Renderer>,
}

impl RenderPipeline {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self { renderer }
    }

    /// Render `module` for `ctx`.
    ///
    /// `request` is required for API pages and ignored by UI pages.
    pub async fn render(
        &self,
        mut ctx: RenderContext,
        module: &PageModule,
        request: Option<Request<Body>>,
    ) -> Result<Rendered, PipelineError> {
        let (component, hook) = match module {
            PageModule::Api(handler) => {
                let request = request
                    .ok_or_else(|| PipelineError::NoExchange(ctx.page_identifier.clone()))?;
                tracing::debug!(page = %ctx.page_identifier, "Delegating to API handler");
                return Ok(Rendered::Delegated(handler(request).await));
            }
            PageModule::Ui { component, hook } => (component, hook),
        };

        ctx.props = self.fetch_props(&ctx, hook).await?;
        let html = self.render_document(&ctx, component)?;
        Ok(Rendered::Document(html))
    }

    /// Invoke the hook that applies to the context's mode.
    async fn fetch_props(
        &self,
        ctx: &RenderContext,
        hook: &DataHook,
    ) -> Result<Props, PipelineError> {
        let fetched = match (ctx.mode, hook) {
            (RenderMode::Server, DataHook::Server(hook)) => {
                hook(ServerPropsContext {
                    query: ctx.params.clone(),
                })
                .await
            }
            (RenderMode::Static, DataHook::Static(hook)) => hook().await,
            _ => return Ok(Props::new()),
        };

        tracing::debug!(page = %ctx.page_identifier, mode = %ctx.mode, "Data hook completed");
        fetched.map_err(|source| PipelineError::DataFetch {
            page: ctx.page_identifier.clone(),
            source,
        })
    }

    fn render_document(
        &self,
        ctx: &RenderContext,
        component: &Component,
    ) -> Result<String, PipelineError> {
        let fragment = self
            .renderer
            .render(component, &ctx.props)
            .map_err(|source| PipelineError::Render {
                page: ctx.page_identifier.clone(),
                source,
            })?;
        Ok(document::wrap(&ctx.page_identifier, &fragment))
    }
}

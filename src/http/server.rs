//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the page handler as fallback
//! - Serve prebuilt output (production) and public assets before pages
//! - Wire up middleware (panic recovery, timeout, request ID, tracing)
//! - Resolve, load and render pages per request
//! - Keep the page index current in development
//!
//! # Design Decisions
//! - One request never affects another: failures become a 500 for that
//!   request only and the server keeps accepting
//! - The page index is an atomically swapped snapshot; readers never block
//! - UI pages answer GET and HEAD only, API handlers see every method

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, Mode};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::response;
use crate::observability::{metrics, spans};
use crate::pages::loader::{LoadError, PageLoader};
use crate::pages::registry::PageRegistry;
use crate::pages::watcher::PageWatcher;
use crate::render::{
    HandlebarsRenderer, RenderContext, RenderMode, RenderPipeline, Rendered, Renderer,
};
use crate::routing::{resolve, IndexError, PageIndex};

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<ArcSwap<PageIndex>>,
    pub loader: Arc<PageLoader>,
    pub pipeline: RenderPipeline,
}

/// HTTP server for a page tree.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a server rendering components with Handlebars.
    pub async fn new(config: AppConfig, registry: PageRegistry) -> Result<Self, ServerError> {
        let renderer = Arc::new(HandlebarsRenderer::from_config(&config.render));
        Self::with_renderer(config, registry, renderer).await
    }

    /// Create a server with a custom renderer.
    pub async fn with_renderer(
        config: AppConfig,
        registry: PageRegistry,
        renderer: Arc<dyn Renderer>,
    ) -> Result<Self, ServerError> {
        let loader = Arc::new(PageLoader::from_config(&config, Arc::new(registry)));
        let index = loader.scan_index().await?;

        tracing::info!(
            pages = index.len(),
            pages_dir = %loader.pages_dir().display(),
            "Page index built"
        );

        let state = AppState {
            index: Arc::new(ArcSwap::from_pointee(index)),
            loader,
            pipeline: RenderPipeline::new(renderer),
        };

        let router = Self::build_router(&config, state.clone()).await?;
        Ok(Self {
            router,
            config,
            state,
        })
    }

    /// Build the Axum router with static directories and middleware layers.
    #[allow(deprecated)]
    async fn build_router(config: &AppConfig, state: AppState) -> Result<Router, ServerError> {
        let mut app = Router::new().fallback(page_handler).with_state(state);

        let public_dir = &config.paths.public_dir;
        if tokio::fs::try_exists(public_dir).await? {
            tracing::info!(path = %public_dir.display(), "Serving public assets");
            app = Router::new().fallback_service(
                ServeDir::new(public_dir)
                    .call_fallback_on_method_not_allowed(true)
                    .fallback(app),
            );
        }

        // Checked last so prebuilt output wins over public assets.
        let dist_dir = &config.paths.dist_dir;
        if config.server.mode == Mode::Production && tokio::fs::try_exists(dist_dir).await? {
            tracing::info!(path = %dist_dir.display(), "Serving prebuilt pages");
            app = Router::new().fallback_service(
                ServeDir::new(dist_dir)
                    .call_fallback_on_method_not_allowed(true)
                    .fallback(app),
            );
        }

        Ok(app
            .layer(CatchPanicLayer::custom(response::panic_response))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(spans::request_span))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer()))
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = %self.config.server.mode,
            "HTTP server starting"
        );

        if self.config.watch_pages() {
            self.spawn_watcher(shutdown.resubscribe()).await;
        }

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    async fn spawn_watcher(&self, shutdown: broadcast::Receiver<()>) {
        let pages_dir = self.state.loader.pages_dir();
        if !tokio::fs::try_exists(pages_dir).await.unwrap_or(false) {
            tracing::warn!(path = %pages_dir.display(), "Pages directory missing, not watching");
            return;
        }

        let watcher = PageWatcher::new(self.state.index.clone(), self.state.loader.clone());
        if let Err(e) = watcher.spawn(shutdown) {
            tracing::warn!(error = %e, "Failed to start page watcher, changes need a restart");
        }
    }

    /// The fully layered router, for serving without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Shared state: the live page index, loader and pipeline.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Page handler.
/// Resolves the path, loads the page and renders it in server mode.
async fn page_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_string();
    let path = request.uri().path().to_string();
    let method = request.method().clone();
    let method_str = method.to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Handling page request"
    );

    // 1. Resolve against the current index snapshot
    let route = match resolve(&path, &state.index.load()) {
        Ok(route) => route,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                path = %path,
                error = %e,
                "Route resolution failed"
            );
            metrics::record_request(&method_str, 500, "none", start_time);
            return response::internal_error();
        }
    };

    let Some(page) = route.page_identifier.clone() else {
        tracing::debug!(request_id = %request_id, path = %path, "No page matched");
        metrics::record_request(&method_str, 404, "none", start_time);
        return response::not_found();
    };

    let is_api = route.is_api();
    if !is_api && method != Method::GET && method != Method::HEAD {
        metrics::record_request(&method_str, 405, &page, start_time);
        return response::method_not_allowed();
    }

    // 2. Load the module
    let module = match state.loader.load(&page).await {
        Ok(module) => module,
        Err(LoadError::NotFound(_)) => {
            tracing::warn!(request_id = %request_id, page = %page, "Indexed page has no module");
            metrics::record_request(&method_str, 404, &page, start_time);
            return if is_api {
                response::api_not_found()
            } else {
                response::not_found()
            };
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                page = %page,
                error = %e,
                "Failed to load page"
            );
            metrics::record_request(&method_str, 500, &page, start_time);
            return response::internal_error();
        }
    };

    // 3. Render
    let ctx = RenderContext::new(page.clone(), route.params, RenderMode::Server);
    let response = match state.pipeline.render(ctx, &module, Some(request)).await {
        Ok(Rendered::Document(html)) => response::document(html),
        Ok(Rendered::Delegated(response)) => response,
        Err(e) => {
            tracing::error!(request_id = %request_id, page = %page, error = %e, "Render failed");
            metrics::record_render_failure(&page, &e);
            response::internal_error()
        }
    };

    metrics::record_request(&method_str, response.status().as_u16(), &page, start_time);
    response
}

async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    let _ = shutdown.recv().await;
    tracing::info!("Shutdown signal received");
}

//! Loaded page modules.
//!
//! A page is decided once, at load time, to be either a UI page (a component
//! plus at most one data hook) or an API page (a request handler). Call sites
//! match on the variant instead of probing for capabilities.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::future::BoxFuture;

use crate::routing::Params;

/// Props handed to a component.
pub type Props = serde_json::Map<String, serde_json::Value>;

/// Error raised by a data hook.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a data hook.
pub type HookResult = Result<Props, HookError>;

/// Zero-argument hook run by the static build.
pub type StaticPropsFn = Arc<dyn Fn() -> BoxFuture<'static, HookResult> + Send + Sync>;

/// Request-time hook receiving the route parameters.
pub type ServerPropsFn =
    Arc<dyn Fn(ServerPropsContext) -> BoxFuture<'static, HookResult> + Send + Sync>;

/// Handler owning the full request/response exchange of an API page.
pub type ApiHandler = Arc<dyn Fn(Request<Body>) -> BoxFuture<'static, Response> + Send + Sync>;

/// Argument of a server-data hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerPropsContext {
    /// Parameters bound by the route, e.g. `{ slug: "hello" }`.
    pub query: Params,
}

/// The data hook attached to a UI page.
#[derive(Clone, Default)]
pub enum DataHook {
    #[default]
    None,
    Static(StaticPropsFn),
    Server(ServerPropsFn),
}

impl DataHook {
    pub fn kind(&self) -> &'static str {
        match self {
            DataHook::None => "none",
            DataHook::Static(_) => "static",
            DataHook::Server(_) => "server",
        }
    }
}

impl fmt::Debug for DataHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataHook::{}", self.kind())
    }
}

/// A page component: the template read from the page file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    path: PathBuf,
    source: Arc<str>,
}

impl Component {
    pub fn new(path: impl Into<PathBuf>, source: impl Into<Arc<str>>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }

    /// File the component was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A loaded page.
#[derive(Clone)]
pub enum PageModule {
    Ui { component: Component, hook: DataHook },
    Api(ApiHandler),
}

impl PageModule {
    pub fn is_api(&self) -> bool {
        matches!(self, PageModule::Api(_))
    }
}

impl fmt::Debug for PageModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageModule::Ui { component, hook } => f
                .debug_struct("Ui")
                .field("component", &component.path())
                .field("hook", hook)
                .finish(),
            PageModule::Api(_) => f.write_str("Api"),
        }
    }
}

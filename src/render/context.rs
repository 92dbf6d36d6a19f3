//! Per-render state.

use crate::pages::module::Props;
use crate::routing::Params;

/// Which data hook a render uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Build time: static-data hook, no request.
    Static,
    /// Request time: server-data hook with the route parameters.
    Server,
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Static => write!(f, "static"),
            RenderMode::Server => write!(f, "server"),
        }
    }
}

/// State of one render, owned by a single pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub page_identifier: String,
    pub params: Params,
    pub mode: RenderMode,
    /// Filled in by the data hook before the component is rendered.
    pub props: Props,
}

impl RenderContext {
    pub fn new(page_identifier: impl Into<String>, params: Params, mode: RenderMode) -> Self {
        Self {
            page_identifier: page_identifier.into(),
            params,
            mode,
            props: Props::new(),
        }
    }
}

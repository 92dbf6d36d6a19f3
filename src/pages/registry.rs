//! Page registry: the Rust capabilities bound to page identifiers.
//!
//! # Responsibilities
//! - Hold the data hook registered for each UI page
//! - Hold the handler registered for each API page
//! - Convert hook output into props once, at the boundary
//!
//! # Design Decisions
//! - Built by the application before the server or build starts, then frozen
//! - One hook per page: registering a second one replaces the first
//! - API identifiers always live under `api/`

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::IntoResponse;
use futures_util::FutureExt;
use serde::Serialize;
use serde_json::Value;

use crate::pages::module::{
    ApiHandler, DataHook, HookError, Props, ServerPropsContext, ServerPropsFn, StaticPropsFn,
};
use crate::routing::matcher;

/// Hooks and API handlers keyed by page identifier.
#[derive(Clone, Default)]
pub struct PageRegistry {
    hooks: HashMap<String, DataHook>,
    api: HashMap<String, ApiHandler>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a build-time data hook to a UI page.
    pub fn static_props<F, Fut, T, E>(mut self, identifier: impl Into<String>, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Serialize + 'static,
        E: Into<HookError> + 'static,
    {
        let hook: StaticPropsFn = Arc::new(move || {
            let fut = hook();
            async move {
                match fut.await {
                    Ok(value) => into_props(value),
                    Err(e) => Err(e.into()),
                }
            }
            .boxed()
        });
        self.hooks.insert(identifier.into(), DataHook::Static(hook));
        self
    }

    /// Attach a request-time data hook to a UI page.
    pub fn server_props<F, Fut, T, E>(mut self, identifier: impl Into<String>, hook: F) -> Self
    where
        F: Fn(ServerPropsContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Serialize + 'static,
        E: Into<HookError> + 'static,
    {
        let hook: ServerPropsFn = Arc::new(move |ctx| {
            let fut = hook(ctx);
            async move {
                match fut.await {
                    Ok(value) => into_props(value),
                    Err(e) => Err(e.into()),
                }
            }
            .boxed()
        });
        self.hooks.insert(identifier.into(), DataHook::Server(hook));
        self
    }

    /// Register an API page. `hello` and `api/hello` name the same route.
    pub fn api<F, Fut, R>(mut self, identifier: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + 'static,
    {
        let identifier = identifier.into();
        let identifier = if matcher::is_api(&identifier) {
            identifier
        } else {
            format!("{}{}", matcher::API_PREFIX, identifier.trim_start_matches('/'))
        };
        let handler: ApiHandler = Arc::new(move |request| {
            let fut = handler(request);
            async move { fut.await.into_response() }.boxed()
        });
        self.api.insert(identifier, handler);
        self
    }

    /// The data hook registered for `identifier`, [`DataHook::None`] if absent.
    pub fn hook(&self, identifier: &str) -> DataHook {
        self.hooks.get(identifier).cloned().unwrap_or_default()
    }

    pub fn api_handler(&self, identifier: &str) -> Option<ApiHandler> {
        self.api.get(identifier).cloned()
    }

    /// Identifiers of every registered API page.
    pub fn api_routes(&self) -> impl Iterator<Item = &str> {
        self.api.keys().map(String::as_str)
    }
}

fn into_props<T: Serialize>(value: T) -> Result<Props, HookError> {
    match serde_json::to_value(value)? {
        Value::Object(props) => Ok(props),
        Value::Null => Ok(Props::new()),
        other => Err(format!("data hook returned a non-object value: {other}").into()),
    }
}

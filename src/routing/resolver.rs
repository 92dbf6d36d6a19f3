//! Route resolution.
//!
//! # Responsibilities
//! - Map a request path onto a page identifier using an index snapshot
//! - Bind the slug to the parameter of a dynamic page
//! - Return an explicit no-match rather than a silent default
//!
//! # Design Decisions
//! - Pure function of (path, snapshot): no filesystem access
//! - Strict precedence: exact page (API routes included), then dynamic page
//! - More than one dynamic page is an error, never a listing-order pick

use std::collections::BTreeMap;

use thiserror::Error;

use crate::routing::index::PageIndex;
use crate::routing::matcher;

/// Parameters bound by a dynamic segment.
pub type Params = BTreeMap<String, String>;

/// Outcome of resolving a request path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMatch {
    /// Matched page, `None` when nothing matched.
    pub page_identifier: Option<String>,
    /// Empty unless the match came from a dynamic segment.
    pub params: Params,
}

impl RouteMatch {
    /// The no-match result.
    pub fn none() -> Self {
        Self::default()
    }

    fn exact(identifier: &str) -> Self {
        Self {
            page_identifier: Some(identifier.to_string()),
            params: Params::new(),
        }
    }

    fn dynamic(identifier: &str, name: &str, slug: &str) -> Self {
        Self {
            page_identifier: Some(identifier.to_string()),
            params: Params::from([(name.to_string(), slug.to_string())]),
        }
    }

    pub fn is_match(&self) -> bool {
        self.page_identifier.is_some()
    }

    /// Whether the matched page is an API route.
    pub fn is_api(&self) -> bool {
        self.page_identifier.as_deref().is_some_and(matcher::is_api)
    }
}

/// Resolution failure caused by the page tree itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("ambiguous dynamic routes: {}", .0.join(", "))]
    AmbiguousDynamic(Vec<String>),
}

/// Resolve `url_path` against a snapshot of the page tree.
pub fn resolve(url_path: &str, index: &PageIndex) -> Result<RouteMatch, ResolveError> {
    let slug = matcher::normalize(url_path);

    // Registered API routes sit in the index under the primary extension,
    // so this also covers the API namespace.
    if index.contains(slug) {
        return Ok(RouteMatch::exact(slug));
    }

    let mut dynamic = index.dynamic_pages();
    let Some((identifier, name)) = dynamic.next() else {
        tracing::debug!(path = %url_path, "No page matched");
        return Ok(RouteMatch::none());
    };
    let others: Vec<String> = dynamic.map(|(id, _)| id.to_string()).collect();
    if !others.is_empty() {
        let mut all = vec![identifier.to_string()];
        all.extend(others);
        return Err(ResolveError::AmbiguousDynamic(all));
    }

    Ok(RouteMatch::dynamic(identifier, name, slug))
}

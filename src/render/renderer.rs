//! Component renderer capability.
//!
//! # Responsibilities
//! - Define the seam between the pipeline and the rendering engine
//! - Provide the default Handlebars-backed engine
//!
//! # Design Decisions
//! - The pipeline treats the renderer as a black box: component + props in, HTML out
//! - Rendering is synchronous; data fetching already happened
//! - Props are HTML-escaped by the engine unless a template opts out (`{{{raw}}}`)

use std::path::PathBuf;

use handlebars::Handlebars;
use thiserror::Error;

use crate::config::schema::RenderConfig;
use crate::pages::module::{Component, Props};

/// A component failed to render.
#[derive(Debug, Error)]
#[error("failed to render {}: {source}", .component.display())]
pub struct RenderError {
    pub component: PathBuf,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl RenderError {
    pub fn new(
        component: &Component,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            component: component.path().to_path_buf(),
            source: source.into(),
        }
    }
}

/// Turns a component and its props into an HTML fragment.
pub trait Renderer: Send + Sync {
    fn render(&self, component: &Component, props: &Props) -> Result<String, RenderError>;
}

/// Renders components as Handlebars templates.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    /// In strict mode a template referencing a missing prop fails to render.
    pub fn new(strict: bool) -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(strict);
        Self { registry }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.strict)
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Renderer for HandlebarsRenderer {
    fn render(&self, component: &Component, props: &Props) -> Result<String, RenderError> {
        self.registry
            .render_template(component.source(), props)
            .map_err(|e| RenderError::new(component, e))
    }
}

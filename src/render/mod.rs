//! Rendering subsystem.
//!
//! # Data Flow
//! ```text
//! (RenderContext, PageModule, request?)
//!     → pipeline.rs
//!         API page  → handler(request) → Rendered::Delegated
//!         UI page   → data hook for the mode (context.rs)
//!                   → renderer.rs (component + props → fragment)
//!                   → document.rs (fragment → HTML document)
//!                   → Rendered::Document
//! ```
//!
//! # Design Decisions
//! - Identical pipeline for request-time and build-time rendering
//! - Renderer is a trait object so applications can swap engines

pub mod context;
pub mod document;
pub mod pipeline;
pub mod renderer;

pub use context::{RenderContext, RenderMode};
pub use pipeline::{PipelineError, RenderPipeline, Rendered};
pub use renderer::{HandlebarsRenderer, RenderError, Renderer};

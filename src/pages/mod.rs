//! Page subsystem.
//!
//! # Data Flow
//! ```text
//! Application startup:
//!     PageRegistry (data hooks, API handlers) → frozen behind Arc
//!
//! Per load:
//!     identifier
//!     → loader.rs (API registry lookup, or extension probe on disk)
//!     → module.rs (PageModule::Ui { component, hook } | PageModule::Api)
//!
//! Development:
//!     watcher.rs (file events) → rescan → swap shared PageIndex
//! ```
//!
//! # Design Decisions
//! - Page variant decided once at load time, never re-probed by callers
//! - Components are the page files; capabilities come from code

pub mod loader;
pub mod module;
pub mod registry;
pub mod watcher;

pub use loader::{LoadError, PageLoader};
pub use module::{
    ApiHandler, Component, DataHook, HookError, PageModule, Props, ServerPropsContext,
};
pub use registry::PageRegistry;
pub use watcher::PageWatcher;

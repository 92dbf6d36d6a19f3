//! Static build subsystem.
//!
//! # Data Flow
//! ```text
//! pages directory
//!     → PageIndex scan (UI pages only, identifier order)
//!     → for each page: loader → pipeline (static mode) → dist/<id>.html
//!     → BuildReport, or the first error
//! ```

pub mod driver;

pub use driver::{BuildError, BuildReport, BuiltPage, StaticBuilder};

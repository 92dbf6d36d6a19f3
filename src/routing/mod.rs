//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request path
//!     → matcher.rs (normalize into a slug, classify identifiers)
//!     → resolver.rs (exact → API namespace → dynamic)
//!     → Return: RouteMatch (identifier + params) or NoMatch
//!
//! Index Compilation (startup, and on change in development):
//!     pages directory walk + registered API routes
//!     → index.rs (identifier → extensions present)
//!     → Freeze as immutable PageIndex snapshot
//! ```
//!
//! # Design Decisions
//! - Snapshots immutable at runtime, swapped whole on rescan
//! - No regex in hot path
//! - Deterministic: same input always matches same route
//! - First rule that fires wins

pub mod index;
pub mod matcher;
pub mod resolver;

pub use index::{IndexError, PageIndex};
pub use resolver::{resolve, Params, ResolveError, RouteMatch};

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Server, pipeline and build produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → spans.rs (request spans with correlation IDs)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, opt-in)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line of a request
//! - Metrics are cheap and disabled unless configured

pub mod logging;
pub mod metrics;
pub mod spans;

pub use self::logging::init_logging;
pub use self::metrics::init_metrics;

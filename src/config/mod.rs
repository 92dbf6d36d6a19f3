//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig::rooted (explicit site root, never the process cwd)
//!     → AppConfig (validated, immutable)
//!     → handed by value to the server and the build driver
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AppConfig;
pub use schema::LogFormat;
pub use schema::Mode;
pub use schema::ObservabilityConfig;
pub use schema::PagesConfig;
pub use schema::PathsConfig;

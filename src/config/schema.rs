//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the site.
//! All types derive Serde traits for deserialization from config files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Root configuration for a site.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener settings and serving mode.
    pub server: ServerConfig,

    /// Site directories.
    pub paths: PathsConfig,

    /// Page discovery and build output.
    pub pages: PagesConfig,

    /// Component renderer settings.
    pub render: RenderConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Resolve every relative site directory against `root`.
    pub fn rooted(mut self, root: &Path) -> Self {
        self.paths = self.paths.rooted(root);
        self
    }

    /// Whether loaded components are cached between requests.
    pub fn cache_modules(&self) -> bool {
        self.pages
            .cache_modules
            .unwrap_or(self.server.mode == Mode::Production)
    }

    /// Whether the pages directory is watched for changes.
    pub fn watch_pages(&self) -> bool {
        self.pages
            .watch
            .unwrap_or(self.server.mode == Mode::Development)
    }
}

/// Serving mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Render everything per request, watch pages for changes.
    #[default]
    Development,
    /// Serve prebuilt output first, cache loaded components.
    Production,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Development => write!(f, "development"),
            Mode::Production => write!(f, "production"),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind (e.g., "127.0.0.1").
    pub host: String,

    /// TCP port, overridden by `PORT` when launched from the CLI.
    pub port: u16,

    /// Development or production serving.
    pub mode: Mode,
}

impl ServerConfig {
    /// The `host:port` pair handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            mode: Mode::Development,
        }
    }
}

/// Site directories. Relative paths are resolved by [`AppConfig::rooted`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Page tree scanned for routable files.
    pub pages_dir: PathBuf,

    /// Static build output, served first in production.
    pub dist_dir: PathBuf,

    /// Public assets, served in every mode when present.
    pub public_dir: PathBuf,
}

impl PathsConfig {
    fn rooted(self, root: &Path) -> Self {
        Self {
            pages_dir: root.join(self.pages_dir),
            dist_dir: root.join(self.dist_dir),
            public_dir: root.join(self.public_dir),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            pages_dir: PathBuf::from("pages"),
            dist_dir: PathBuf::from("dist"),
            public_dir: PathBuf::from("public"),
        }
    }
}

/// Page discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Page file extensions without the dot, primary first.
    pub extensions: Vec<String>,

    /// App shell / document overrides never built as pages.
    pub shell_pages: Vec<String>,

    /// Extension of files written by the static build.
    pub output_extension: String,

    /// Cache loaded components (default: production only).
    pub cache_modules: Option<bool>,

    /// Rescan the page tree on change (default: development only).
    pub watch: Option<bool>,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["hbs".to_string(), "html".to_string()],
            shell_pages: vec!["_app".to_string(), "_document".to_string()],
            output_extension: "html".to_string(),
            cache_modules: None,
            watch: None,
        }
    }
}

/// Component renderer configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RenderConfig {
    /// Fail rendering when a template references a missing prop.
    pub strict: bool,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

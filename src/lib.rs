//! pagewright: file-system routed pages, rendered per request or ahead of time.

pub mod build;
pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pages;
pub mod render;
pub mod routing;

pub use build::StaticBuilder;
pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use pages::PageRegistry;

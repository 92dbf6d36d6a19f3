//! A two-page site with data hooks and an API route.
//!
//! ```text
//! cargo run --example basic-app -- --root demos/basic-app dev
//! cargo run --example basic-app -- --root demos/basic-app build
//! cargo run --example basic-app -- --root demos/basic-app start
//! ```

use std::convert::Infallible;

use axum::body::Body;
use axum::http::Request;
use axum::Json;
use clap::Parser;
use pagewright::cli::{self, Cli};
use pagewright::PageRegistry;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = PageRegistry::new()
        .static_props("index", || async {
            Ok::<_, Infallible>(json!({ "message": "Static Hello" }))
        })
        .server_props("about", |_ctx| async {
            Ok::<_, Infallible>(json!({ "randomNum": fastrand::u32(0..1000) }))
        })
        .api("hello", |_req: Request<Body>| async {
            Json(json!({ "message": "Hello from the API" }))
        });

    cli::run(Cli::parse(), registry).await?;
    Ok(())
}

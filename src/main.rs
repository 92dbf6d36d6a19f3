//! pagewright
//!
//! File-system routed pages rendered per request or ahead of time.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────────────┐
//!                    │                        PAGEWRIGHT                         │
//!                    │                                                           │
//!   Client Request   │  ┌──────────┐   ┌────────────┐   ┌────────────┐          │
//!   ─────────────────┼─▶│  dist/   │──▶│  public/   │──▶│  routing   │          │
//!                    │  │(prod)    │   │  assets    │   │  resolver  │          │
//!                    │  └──────────┘   └────────────┘   └─────┬──────┘          │
//!                    │                                       │                  │
//!                    │                                       ▼                  │
//!                    │                                ┌────────────┐            │
//!                    │                                │   pages    │            │
//!                    │                                │   loader   │            │
//!                    │                                └─────┬──────┘            │
//!                    │                                      │                   │
//!                    │                                      ▼                   │
//!   Client Response  │                                ┌────────────┐            │
//!   ◀────────────────┼────────────────────────────────│   render   │            │
//!                    │                                │  pipeline  │            │
//!                    │                                └─────┬──────┘            │
//!                    │                                      │                   │
//!   `build` command  │  ┌──────────┐                        │                   │
//!   ─────────────────┼─▶│  build   │────────────────────────┘ ──▶ dist/*.html   │
//!                    │  │  driver  │                                            │
//!                    │  └──────────┘                                            │
//!                    │                                                           │
//!                    │  Cross-cutting: config, observability, lifecycle          │
//!                    └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The binary serves a page tree with no data hooks or API routes.
//! Applications that need them call [`pagewright::cli::run`] with their own
//! registry.

use clap::Parser;

use pagewright::cli::{self, Cli};
use pagewright::PageRegistry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    cli::run(Cli::parse(), PageRegistry::new()).await?;
    Ok(())
}

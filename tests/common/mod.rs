//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;

use pagewright::config::{AppConfig, Mode};
use pagewright::http::HttpServer;
use pagewright::lifecycle::Shutdown;
use pagewright::PageRegistry;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A scratch site: `pages/`, `public/` and `dist/` under one temp root.
pub struct Site {
    pub root: TempDir,
}

impl Site {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Write a page file relative to the pages directory.
    pub fn page(self, name: &str, content: &str) -> Self {
        write(&self.root.path().join("pages").join(name), content);
        self
    }

    /// Write a public asset relative to the public directory.
    pub fn public(self, name: &str, content: &str) -> Self {
        write(&self.root.path().join("public").join(name), content);
        self
    }

    /// Write a prebuilt file relative to the output directory.
    pub fn dist(self, name: &str, content: &str) -> Self {
        write(&self.root.path().join("dist").join(name), content);
        self
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Configuration rooted at this site, watcher off.
    pub fn config(&self, mode: Mode) -> AppConfig {
        let mut config = AppConfig::default().rooted(self.root.path());
        config.server.mode = mode;
        config.pages.watch = Some(false);
        config
    }
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// A server running on an ephemeral port.
pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl RunningServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Spawn the server for `config` on 127.0.0.1 with an OS-assigned port.
pub async fn start_server(config: AppConfig, registry: PageRegistry) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config, registry).await.unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    RunningServer { addr, shutdown }
}

/// A client that never reuses connections or goes through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

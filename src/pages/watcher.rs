//! Pages directory watcher for development mode.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};

use crate::pages::loader::PageLoader;
use crate::routing::index::PageIndex;

/// Quiet period that coalesces bursts of file events into one rescan.
const SETTLE: Duration = Duration::from_millis(50);

/// Rebuilds the shared page index whenever the pages directory changes.
pub struct PageWatcher {
    pages_dir: PathBuf,
    index: Arc<ArcSwap<PageIndex>>,
    loader: Arc<PageLoader>,
}

impl PageWatcher {
    pub fn new(index: Arc<ArcSwap<PageIndex>>, loader: Arc<PageLoader>) -> Self {
        Self {
            pages_dir: loader.pages_dir().to_path_buf(),
            index,
            loader,
        }
    }

    /// Start watching; the returned task ends on shutdown.
    pub fn spawn(
        self,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<tokio::task::JoinHandle<()>, notify::Error> {
        let (change_tx, mut change_rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_create() || event.kind.is_modify() || event.kind.is_remove() {
                        let _ = change_tx.send(());
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default(),
        )?;
        watcher.watch(&self.pages_dir, RecursiveMode::Recursive)?;

        tracing::info!(path = ?self.pages_dir, "Page watcher started");

        Ok(tokio::spawn(async move {
            // The watcher stops delivering events once dropped.
            let _watcher = watcher;
            loop {
                tokio::select! {
                    changed = change_rx.recv() => {
                        if changed.is_none() {
                            break;
                        }
                        tokio::time::sleep(SETTLE).await;
                        while change_rx.try_recv().is_ok() {}
                        self.rescan().await;
                    }
                    _ = shutdown.recv() => {
                        tracing::info!("Page watcher received shutdown signal, exiting loop");
                        break;
                    }
                }
            }
        }))
    }

    async fn rescan(&self) {
        tracing::info!("Page change detected, rescanning...");
        match self.loader.scan_index().await {
            Ok(index) => {
                tracing::info!(pages = index.len(), "Page index reloaded");
                self.index.store(Arc::new(index));
                self.loader.clear_cache();
            }
            Err(e) => {
                tracing::error!("Failed to rescan pages: {}. Keeping current index.", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::registry::PageRegistry;

    #[tokio::test]
    async fn test_rescan_swaps_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.hbs"), "home").unwrap();
        let loader = Arc::new(PageLoader::new(
            dir.path(),
            vec!["hbs".to_string()],
            Arc::new(PageRegistry::new()),
        ));
        let index = Arc::new(ArcSwap::from_pointee(loader.scan_index().await.unwrap()));
        let watcher = PageWatcher::new(index.clone(), loader);

        std::fs::write(dir.path().join("about.hbs"), "about").unwrap();
        watcher.rescan().await;

        assert!(index.load().contains("about"));
        assert!(index.load().contains("index"));
    }
}

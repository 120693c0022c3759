//! Fixed-size pool of page workers.
//!
//! All workers pull from one URL supply and push into one title channel.
//! The supply's receiver sits behind a mutex that is held only while waiting
//! for the next URL, so a worker never holds it across a fetch. A worker stops
//! when the supply is closed and empty.

use crate::config::Selectors;
use crate::fetch::Fetch;
use crate::models::{ItemTitle, PageOutcome, PageUrl};
use crate::scrapers::titles::scrape_page;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

type UrlSupply = Arc<Mutex<mpsc::Receiver<PageUrl>>>;

/// What one worker did before it stopped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub pages_scraped: usize,
    pub pages_failed: usize,
    pub titles: usize,
}

/// Sum of all worker reports.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PoolReport {
    pub workers: usize,
    pub pages_scraped: usize,
    pub pages_failed: usize,
    pub titles: usize,
}

impl PoolReport {
    fn absorb(&mut self, worker: WorkerReport) {
        self.pages_scraped += worker.pages_scraped;
        self.pages_failed += worker.pages_failed;
        self.titles += worker.titles;
    }
}

pub struct FetchPool<F> {
    fetcher: Arc<F>,
    selectors: Arc<Selectors>,
    workers: usize,
}

impl<F: Fetch> FetchPool<F> {
    pub fn new(fetcher: Arc<F>, selectors: Selectors, workers: usize) -> Self {
        Self {
            fetcher,
            selectors: Arc::new(selectors),
            workers,
        }
    }

    /// Start exactly `workers` tasks. Each one holds its own clone of `titles`.
    pub fn spawn(&self, urls: mpsc::Receiver<PageUrl>, titles: &mpsc::Sender<ItemTitle>) -> RunningPool {
        let urls: UrlSupply = Arc::new(Mutex::new(urls));

        let handles = (0..self.workers)
            .map(|id| {
                tokio::spawn(worker(
                    id,
                    Arc::clone(&self.fetcher),
                    Arc::clone(&self.selectors),
                    Arc::clone(&urls),
                    titles.clone(),
                ))
            })
            .collect();

        debug!(workers = self.workers, "Fetch pool started");
        RunningPool { handles }
    }
}

/// Handle to a started pool.
pub struct RunningPool {
    handles: Vec<JoinHandle<WorkerReport>>,
}

impl RunningPool {
    /// Wait until every worker has stopped.
    ///
    /// A worker that panicked is logged and counted as having done nothing.
    pub async fn drain(self) -> PoolReport {
        let mut report = PoolReport {
            workers: self.handles.len(),
            ..PoolReport::default()
        };

        for joined in join_all(self.handles).await {
            match joined {
                Ok(worker) => report.absorb(worker),
                Err(e) => error!(error = %e, "Worker task failed"),
            }
        }

        report
    }
}

async fn next_page(urls: &Mutex<mpsc::Receiver<PageUrl>>) -> Option<PageUrl> {
    urls.lock().await.recv().await
}

async fn worker<F: Fetch>(
    id: usize,
    fetcher: Arc<F>,
    selectors: Arc<Selectors>,
    urls: UrlSupply,
    titles: mpsc::Sender<ItemTitle>,
) -> WorkerReport {
    let mut report = WorkerReport::default();

    while let Some(page) = next_page(&urls).await {
        match scrape_page(fetcher.as_ref(), &page, &selectors).await {
            PageOutcome::Scraped(found) => {
                report.pages_scraped += 1;
                for title in found {
                    if titles.send(title).await.is_err() {
                        error!(worker = id, "Title channel closed while pool was running");
                        return report;
                    }
                    report.titles += 1;
                }
            }
            PageOutcome::Failed(e) => {
                report.pages_failed += 1;
                warn!(worker = id, page = page.index(), error = %e, "Skipping page");
            }
        }
    }

    debug!(worker = id, ?report, "Worker finished");
    report
}

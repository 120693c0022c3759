//! Single consumer on the title channel.

use crate::error::Result;
use crate::models::{ItemTitle, ResultSet};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Collects titles on its own task until every sender is gone, then sorts them.
///
/// Must be running before the pool starts producing: the title channel is
/// bounded and workers block until the aggregator takes each title.
pub struct Aggregator {
    handle: JoinHandle<ResultSet>,
}

impl Aggregator {
    pub fn spawn(titles: mpsc::Receiver<ItemTitle>) -> Self {
        Self {
            handle: tokio::spawn(collect(titles)),
        }
    }

    /// Wait for the sorted result. Only resolves after the channel is closed.
    pub async fn finish(self) -> Result<ResultSet> {
        Ok(self.handle.await?)
    }
}

async fn collect(mut titles: mpsc::Receiver<ItemTitle>) -> ResultSet {
    let mut collected = Vec::new();
    while let Some(title) = titles.recv().await {
        collected.push(title);
    }
    debug!(count = collected.len(), "Title channel drained");
    ResultSet::from_unsorted(collected)
}

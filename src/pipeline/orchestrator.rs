//! Runs one catalog walk from discovery to the sorted result.
//!
//! ```text
//! Discovering ──▶ Dispatching ──▶ Draining ──▶ Aggregating ──▶ Done
//!      │
//!      └──▶ Fatal
//! ```
//!
//! Only discovery can fail the run. Page failures are absorbed by the pool.

use super::aggregator::Aggregator;
use super::pool::{FetchPool, PoolReport};
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::fetch::Fetch;
use crate::models::{PageCount, PageUrl, ResultSet};
use crate::scrapers::pagination::discover;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

// tokio channels cannot be rendezvous channels; capacity 1 is the closest.
const URL_QUEUE_CAPACITY: usize = 1;
const TITLE_QUEUE_CAPACITY: usize = 1;

#[derive(Debug, Clone, Copy)]
enum RunState {
    Discovering,
    Dispatching,
    Draining,
    Aggregating,
    Done,
    Fatal,
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct CatalogRun {
    pub pages: PageCount,
    pub results: ResultSet,
    pub report: PoolReport,
}

pub struct Orchestrator<F> {
    config: CatalogConfig,
    fetcher: Arc<F>,
}

impl<F: Fetch> Orchestrator<F> {
    pub fn new(config: CatalogConfig, fetcher: F) -> Self {
        Self {
            config,
            fetcher: Arc::new(fetcher),
        }
    }

    /// Walk the whole catalog.
    ///
    /// # Errors
    ///
    /// Any error from discovering the page count. Nothing is fetched past page 1
    /// in that case. An aggregator panic is reported as [`crate::CatalogError::Task`].
    #[instrument(level = "info", skip_all, fields(base_url = %self.config.base_url(), workers = self.config.workers()))]
    pub async fn run(&self) -> Result<CatalogRun> {
        let started = Instant::now();
        let mut state = RunState::Discovering;

        let discovered = discover(
            self.fetcher.as_ref(),
            self.config.base_url(),
            self.config.selectors(),
        )
        .await;
        let pages = match discovered {
            Ok(pages) => pages,
            Err(e) => {
                advance(&mut state, RunState::Fatal);
                warn!(error = %e, "Page count discovery failed");
                return Err(e);
            }
        };

        advance(&mut state, RunState::Dispatching);
        let (url_tx, url_rx) = mpsc::channel(URL_QUEUE_CAPACITY);
        let (title_tx, title_rx) = mpsc::channel(TITLE_QUEUE_CAPACITY);

        let aggregator = Aggregator::spawn(title_rx);
        let pool = FetchPool::new(
            Arc::clone(&self.fetcher),
            self.config.selectors().clone(),
            self.config.workers(),
        )
        .spawn(url_rx, &title_tx);

        for page in PageUrl::sequence(self.config.base_url(), pages) {
            if url_tx.send(page).await.is_err() {
                error!("Every worker stopped before all pages were dispatched");
                break;
            }
        }

        advance(&mut state, RunState::Draining);
        drop(url_tx);
        let report = pool.drain().await;

        advance(&mut state, RunState::Aggregating);
        drop(title_tx);
        let results = aggregator.finish().await?;

        advance(&mut state, RunState::Done);
        info!(
            pages = pages.get(),
            scraped = report.pages_scraped,
            failed = report.pages_failed,
            titles = results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Catalog walk complete"
        );

        Ok(CatalogRun {
            pages,
            results,
            report,
        })
    }
}

fn advance(state: &mut RunState, next: RunState) {
    debug!(from = ?*state, to = ?next, "Run state change");
    *state = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::fetch::memory::MemoryFetcher;
    use crate::models::ItemTitle;
    use url::Url;

    const BASE: &str = "http://catalog.test/browse/all/";

    fn page_select(last: &str) -> String {
        format!(
            r#"<html><body>
                 <select id="page-select">
                   <option value="1">1</option>
                   <option value="{last}">{last}</option>
                 </select>
               </body></html>"#
        )
    }

    fn listing(titles: &[&str]) -> String {
        let links: String = titles
            .iter()
            .map(|t| format!(r#"<li><a class="cover thumb" title="{t}" href="/p"><img></a></li>"#))
            .collect();
        format!("<html><body><ul>{links}</ul></body></html>")
    }

    fn page(index: usize) -> String {
        PageUrl::new(&Url::parse(BASE).unwrap(), index).to_string()
    }

    fn three_page_catalog() -> MemoryFetcher {
        MemoryFetcher::default()
            .with_page(BASE, page_select("3"))
            .with_page(&page(1), listing(&["Zeta", "Alpha"]))
            .with_page(&page(2), listing(&["Mike", "Bravo"]))
            .with_page(&page(3), listing(&["Yankee", "Charlie"]))
    }

    fn orchestrator(fetcher: MemoryFetcher, workers: usize) -> Orchestrator<MemoryFetcher> {
        Orchestrator::new(CatalogConfig::new(BASE, workers).unwrap(), fetcher)
    }

    fn names(run: &CatalogRun) -> Vec<&str> {
        run.results.iter().map(ItemTitle::as_str).collect()
    }

    #[tokio::test]
    async fn test_three_pages_sorted() {
        let run = orchestrator(three_page_catalog(), 10).run().await.unwrap();

        assert_eq!(run.pages.get(), 3);
        assert_eq!(
            names(&run),
            vec!["Alpha", "Bravo", "Charlie", "Mike", "Yankee", "Zeta"]
        );
        assert_eq!(run.report.pages_scraped, 3);
    }

    #[tokio::test]
    async fn test_worker_count_does_not_change_result() {
        let one = orchestrator(three_page_catalog(), 1).run().await.unwrap();
        let ten = orchestrator(three_page_catalog(), 10).run().await.unwrap();
        assert_eq!(one.results, ten.results);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_runtime_same_result() {
        let run = orchestrator(three_page_catalog(), 10).run().await.unwrap();
        assert_eq!(run.results.len(), 6);
        assert_eq!(run.results.iter().next().map(ItemTitle::as_str), Some("Alpha"));
    }

    #[tokio::test]
    async fn test_one_failed_page_keeps_the_rest() {
        let fetcher = MemoryFetcher::default()
            .with_page(BASE, page_select("3"))
            .with_page(&page(1), listing(&["Zeta", "Alpha"]))
            .with_page(&page(3), listing(&["Yankee", "Charlie"]));

        let run = orchestrator(fetcher, 4).run().await.unwrap();

        assert_eq!(names(&run), vec!["Alpha", "Charlie", "Yankee", "Zeta"]);
        assert_eq!(run.report.pages_failed, 1);
    }

    #[tokio::test]
    async fn test_single_page_with_idle_workers() {
        let fetcher = MemoryFetcher::default()
            .with_page(BASE, page_select("1"))
            .with_page(&page(1), listing(&["Solo"]));

        let run = orchestrator(fetcher, 10).run().await.unwrap();

        assert_eq!(names(&run), vec!["Solo"]);
        assert_eq!(run.report.workers, 10);
        assert_eq!(run.report.pages_scraped, 1);
    }

    #[tokio::test]
    async fn test_discovery_page_titles_not_counted() {
        // Page 1 of the walk is fetched as `?page=1`, separately from discovery.
        let first = format!(
            "{}{}",
            page_select("1"),
            listing(&["Seen during discovery"])
        );
        let fetcher = MemoryFetcher::default()
            .with_page(BASE, first)
            .with_page(&page(1), listing(&["Walked"]));

        let run = orchestrator(fetcher, 2).run().await.unwrap();
        assert_eq!(names(&run), vec!["Walked"]);
    }

    #[tokio::test]
    async fn test_many_pages_many_titles() {
        let mut fetcher = MemoryFetcher::default().with_page(BASE, page_select("25"));
        let mut expected = Vec::new();
        for i in 1..=25 {
            let titles: Vec<String> = (0..4).map(|j| format!("Title {:02}-{}", 26 - i, j)).collect();
            let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
            fetcher = fetcher.with_page(&page(i), listing(&refs));
            expected.extend(titles);
        }
        expected.sort();

        let run = orchestrator(fetcher, 3).run().await.unwrap();
        let got: Vec<String> = run.results.iter().map(ToString::to_string).collect();
        assert_eq!(got, expected);
    }

    #[tokio::test]
    async fn test_missing_control_is_fatal_and_fetches_nothing_else() {
        let fetcher = MemoryFetcher::default().with_page(BASE, listing(&["A"]));
        let orchestrator = orchestrator(fetcher, 5);

        let err = orchestrator.run().await.unwrap_err();

        assert!(matches!(err, CatalogError::NoPagesFound));
        assert_eq!(orchestrator.fetcher.requested(), vec![BASE.to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_count_is_fatal() {
        let fetcher = MemoryFetcher::default().with_page(BASE, page_select("0"));
        let orchestrator = orchestrator(fetcher, 5);

        let err = orchestrator.run().await.unwrap_err();

        assert!(matches!(err, CatalogError::InvalidPageCount));
        assert_eq!(orchestrator.fetcher.requested().len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_first_page_is_fatal() {
        let orchestrator = orchestrator(MemoryFetcher::default(), 5);
        let err = orchestrator.run().await.unwrap_err();
        assert!(err.is_transport());
    }
}

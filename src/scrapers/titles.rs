//! Cover-title extraction.
//!
//! Every catalog entry has one `<a class="cover ..." title="...">` link. The
//! walk emits that title and does not look inside the link, so anchors nested
//! in a cover link are never counted twice.

use super::markup::{Document, MarkupNode, children_rev};
use crate::config::Selectors;
use crate::fetch::Fetch;
use crate::models::{ItemTitle, PageOutcome, PageUrl};
use tracing::{debug, instrument};

/// Titles of all cover links under `root`, in document order. Never fails.
pub fn extract<'a, N: MarkupNode<'a>>(root: N, selectors: &Selectors) -> Vec<ItemTitle> {
    let mut titles = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if let Some(title) = cover_title(node, &selectors.cover_class_prefix) {
            titles.push(ItemTitle::from(title));
            continue;
        }
        stack.extend(children_rev(node));
    }

    titles
}

fn cover_title<'a, N: MarkupNode<'a>>(node: N, prefix: &str) -> Option<&'a str> {
    if !node.is_element("a") {
        return None;
    }
    let class = node.attr("class").unwrap_or_default();
    let title = node.attr("title").unwrap_or_default();
    (class.starts_with(prefix) && !title.is_empty()).then_some(title)
}

/// Fetch one catalog page and pull its titles out.
///
/// Fetch failures come back as [`PageOutcome::Failed`]; the caller decides
/// whether they matter.
#[instrument(level = "debug", skip_all, fields(page = page.index()))]
pub async fn scrape_page<F: Fetch>(fetcher: &F, page: &PageUrl, selectors: &Selectors) -> PageOutcome {
    let body = match fetcher.fetch(page.url()).await {
        Ok(body) => body,
        Err(e) => return PageOutcome::Failed(e),
    };

    let document = Document::parse(&body);
    let titles = extract(document.root(), selectors);
    debug!(count = titles.len(), "Extracted titles");
    PageOutcome::Scraped(titles)
}

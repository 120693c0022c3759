//! Values flowing through the pipeline.
//!
//! - [`PageCount`]: how many pages the catalog has, discovered once per run
//! - [`PageUrl`]: one page to fetch, handed to exactly one worker
//! - [`ItemTitle`]: one cover title extracted from a page
//! - [`ResultSet`]: every title from every page, sorted
//! - [`PageOutcome`]: what a worker got out of a single page

use crate::error::CatalogError;
use serde::Serialize;
use std::fmt;
use std::num::NonZeroUsize;
use url::Url;

/// Number of catalog pages. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PageCount(NonZeroUsize);

impl PageCount {
    /// Returns `None` for zero, negative or out-of-range values.
    pub fn new(value: i64) -> Option<Self> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for PageCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog page: base address plus 1-based page index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrl {
    index: usize,
    url: Url,
}

impl PageUrl {
    /// Build the URL for page `index` by appending `page=<index>` to `base`.
    pub fn new(base: &Url, index: usize) -> Self {
        let mut url = base.clone();
        url.query_pairs_mut()
            .append_pair("page", &index.to_string());
        Self { index, url }
    }

    /// Pages `1..=count` in ascending order.
    pub fn sequence(base: &Url, count: PageCount) -> impl Iterator<Item = PageUrl> + '_ {
        (1..=count.get()).map(move |index| Self::new(base, index))
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for PageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Title of one catalog item. Duplicates across pages are kept.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemTitle(String);

impl ItemTitle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemTitle {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemTitle {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ItemTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// All titles of a run in ascending lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<ItemTitle>);

impl ResultSet {
    /// Sort `titles` into a result set. The sort is by byte-wise string order.
    pub fn from_unsorted(mut titles: Vec<ItemTitle>) -> Self {
        titles.sort();
        Self(titles)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ItemTitle> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ItemTitle;
    type IntoIter = std::slice::Iter<'a, ItemTitle>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Result of a worker's attempt at one page. Never leaves the pool.
#[derive(Debug)]
pub enum PageOutcome {
    Scraped(Vec<ItemTitle>),
    Failed(CatalogError),
}

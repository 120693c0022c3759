//! Compile-time defaults and the immutable run configuration.
//!
//! Nothing here is process-wide mutable state: the [`CatalogConfig`] value is
//! built once (usually from the [`crate::cli::Cli`]) and handed to the
//! [`crate::Orchestrator`] by value.

use crate::error::{CatalogError, Result};
use url::Url;

/// Catalog listing whose pages are walked.
pub const BASE_URL: &str = "https://digital.darkhorse.com/browse/all/";

/// Number of concurrent page workers.
pub const MAX_REQUESTS: usize = 10;

/// `id` of the `<select>` control listing the catalog pages.
pub const PAGE_SELECT_ID: &str = "page-select";

/// Class prefix marking an item's cover link. The trailing space is significant.
pub const COVER_CLASS_PREFIX: &str = "cover ";

/// The two markers that tie the scraper to the catalog's markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    /// `id` of the pagination `<select>`.
    pub page_select_id: String,
    /// Prefix the `class` attribute of a cover `<a>` must start with.
    pub cover_class_prefix: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            page_select_id: PAGE_SELECT_ID.to_string(),
            cover_class_prefix: COVER_CLASS_PREFIX.to_string(),
        }
    }
}

/// Immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    base_url: Url,
    workers: usize,
    selectors: Selectors,
}

impl CatalogConfig {
    /// Build a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if `base_url` is not an absolute
    /// `http`/`https` URL or if `workers` is zero.
    pub fn new(base_url: &str, workers: usize) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| CatalogError::Config {
            message: format!("invalid base URL {base_url:?}: {e}"),
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(CatalogError::Config {
                message: format!("unsupported URL scheme {:?}", base_url.scheme()),
            });
        }

        if workers == 0 {
            return Err(CatalogError::Config {
                message: "worker count must be at least 1".to_string(),
            });
        }

        Ok(Self {
            base_url,
            workers,
            selectors: Selectors::default(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn selectors(&self) -> &Selectors {
        &self.selectors
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(BASE_URL).expect("BASE_URL is a valid URL"),
            workers: MAX_REQUESTS,
            selectors: Selectors::default(),
        }
    }
}

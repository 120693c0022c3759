//! Page fetching.
//!
//! [`Fetch`] is the seam between the pipeline and the network. The pipeline
//! only ever asks for the raw body of a URL; [`HttpFetcher`] answers with a
//! plain reqwest GET, and tests plug in an in-memory catalog instead.

use crate::error::{CatalogError, Result};
use std::future::Future;
use tracing::{debug, instrument};
use url::Url;

/// Something that can turn a URL into the bytes of its body.
///
/// Non-2xx answers must come back as errors, not as bodies.
pub trait Fetch: Send + Sync + 'static {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// [`Fetch`] over HTTP: plain GET, no custom headers, no retries.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self), fields(%url))]
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body.to_vec())
    }
}

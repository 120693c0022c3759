use thiserror::Error;

/// Everything that can go wrong while walking the catalog.
///
/// During discovery every variant is fatal. Inside the fetch pool the
/// transport variants only cost the page they happened on. Markup never fails
/// to parse: html5ever recovers from anything.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{url} answered with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Could not find any page in the comic book catalog")]
    NoPagesFound,

    #[error("Invalid number of pages in the comic book catalog")]
    InvalidPageCount,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("aggregator task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl CatalogError {
    /// Network or HTTP-status failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

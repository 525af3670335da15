//! Per-URL fetch failure.

use thiserror::Error;

/// Boxed transport cause, so any client (or test double) can report its own error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure to retrieve one URL. Only transport-level problems end up here;
/// an HTTP error status is still a successful fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connect, TLS, timeout, malformed URL, or any other client failure.
    #[error("Get \"{url}\": {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },
    /// The fetcher panicked; the unit still reports so the run stays complete.
    #[error("Get \"{url}\": fetch unit panicked")]
    Panicked { url: String },
}

impl FetchError {
    pub fn transport(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        FetchError::Transport {
            url: url.into(),
            source: source.into(),
        }
    }

    /// The URL this failure belongs to.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. } | FetchError::Panicked { url } => url,
        }
    }
}

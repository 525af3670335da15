//! Single-URL HTTP GET.
//!
//! Uses the curl crate (libcurl) with one `Easy` handle per request. Any HTTP
//! status counts as a successful fetch; only transport failures are errors.
//! Blocking: the scheduler runs each fetch on Tokio's blocking pool.

mod error;

pub use error::{BoxError, FetchError};

use crate::config::HashfetchConfig;
use std::time::Duration;

/// Retrieves the full body of one URL.
///
/// Implemented by [`CurlFetcher`] and by any `Fn(&str) -> Result<Vec<u8>, FetchError>`,
/// which is how tests plug in failing or instrumented transports.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<F> Fetch for F
where
    F: Fn(&str) -> Result<Vec<u8>, FetchError> + Send + Sync,
{
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self(url)
    }
}

/// Resolved request settings for one run.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// End-to-end limit per request (connect + read). Zero means no limit.
    pub timeout: Duration,
    pub user_agent: String,
    pub max_redirections: u32,
}

impl FetchOptions {
    /// Builds options from config, applying the `HASHFETCH_TIMEOUT` override.
    pub fn from_config(cfg: &HashfetchConfig) -> Self {
        Self {
            timeout: cfg.timeout(),
            user_agent: cfg.user_agent.clone(),
            max_redirections: cfg.max_redirections,
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        let cfg = HashfetchConfig::default();
        Self {
            timeout: Duration::from_secs(cfg.timeout_secs),
            user_agent: cfg.user_agent,
            max_redirections: cfg.max_redirections,
        }
    }
}

/// libcurl-backed fetcher. Connections are closed after each request.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    options: FetchOptions,
}

impl CurlFetcher {
    pub fn new(options: FetchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let fail = |e: curl::Error| FetchError::transport(url, e);
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(fail)?;
        easy.useragent(&self.options.user_agent).map_err(fail)?;
        easy.follow_location(true).map_err(fail)?;
        easy.max_redirections(self.options.max_redirections).map_err(fail)?;
        easy.timeout(self.options.timeout).map_err(fail)?;
        // One-shot batch: no keep-alive, no pooled connections.
        easy.forbid_reuse(true).map_err(fail)?;
        let mut list = curl::easy::List::new();
        list.append("Connection: close").map_err(fail)?;
        easy.http_headers(list).map_err(fail)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(fail)?;
            transfer.perform().map_err(fail)?;
        }

        let code = easy.response_code().unwrap_or(0);
        tracing::debug!(url, status = code, bytes = body.len(), "GET done");
        Ok(body)
    }
}

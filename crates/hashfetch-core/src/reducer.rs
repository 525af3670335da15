//! Reduces a fetched page to a fixed-size record.
//!
//! The body is hashed and dropped here, so a finished record costs the same
//! memory no matter how large the page was.

use md5::{Digest, Md5};
use std::fmt;

use crate::fetcher::FetchError;

/// Size of a page digest in bytes.
pub const DIGEST_LEN: usize = 16;

/// Outcome for one URL: its MD5 digest, or the error that prevented the fetch.
#[derive(Debug)]
pub struct PageResult {
    url: String,
    digest: [u8; DIGEST_LEN],
    error: Option<FetchError>,
}

/// Builds the record for `url` from a fetch outcome. The body is consumed.
pub fn reduce(url: String, outcome: Result<Vec<u8>, FetchError>) -> PageResult {
    match outcome {
        Ok(body) => PageResult::success(url, &body),
        Err(err) => PageResult::failure(url, err),
    }
}

/// MD5 of `data`.
pub fn md5_digest(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Md5::new();
    hasher.update(data);
    hasher.finalize().into()
}

impl PageResult {
    pub fn success(url: String, body: &[u8]) -> Self {
        Self {
            url,
            digest: md5_digest(body),
            error: None,
        }
    }

    pub fn failure(url: String, error: FetchError) -> Self {
        Self {
            url,
            digest: [0; DIGEST_LEN],
            error: Some(error),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The body digest, or `None` if the fetch failed.
    pub fn digest(&self) -> Option<[u8; DIGEST_LEN]> {
        match self.error {
            None => Some(self.digest),
            Some(_) => None,
        }
    }

    pub fn digest_hex(&self) -> Option<String> {
        self.digest().map(hex::encode)
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// `<url> <hex digest>` on success, `<url> (Error: <message>)` on failure.
impl fmt::Display for PageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(e) => write!(f, "{} (Error: {})", self.url, e),
            None => write!(f, "{} {}", self.url, hex::encode(self.digest)),
        }
    }
}

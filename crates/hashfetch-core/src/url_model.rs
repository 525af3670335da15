//! Input URL normalization.
//!
//! Turns loosely written command-line input (`golang.org`, `//host/path`,
//! ` foo.html`) into absolute URLs the fetcher can request.

use thiserror::Error;
use url::Url;

/// An input that cannot be turned into an absolute URL.
#[derive(Debug, Error)]
#[error("{input:?} is not a valid url: {source}")]
pub struct UrlError {
    pub input: String,
    #[source]
    pub source: url::ParseError,
}

/// Normalizes one input into an absolute URL string.
///
/// Whitespace is trimmed, `//host` and scheme-less input default to `http`,
/// and a single trailing `/` is dropped from the result.
///
/// # Examples
///
/// - `normalize_url("golang.org")` → `"http://golang.org"`
/// - `normalize_url("//www.debian.org")` → `"http://www.debian.org"`
pub fn normalize_url(raw: &str) -> Result<String, UrlError> {
    let trimmed = raw.trim();
    let candidate = if trimmed.starts_with("//") {
        format!("http:{}", trimmed)
    } else {
        trimmed.to_string()
    };

    let parsed = match Url::parse(&candidate) {
        Ok(u) if u.has_host() => u,
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("http://{}", candidate)).map_err(|source| UrlError {
                input: raw.to_string(),
                source,
            })?
        }
        Err(source) => {
            return Err(UrlError {
                input: raw.to_string(),
                source,
            })
        }
    };

    let s = parsed.as_str();
    Ok(s.strip_suffix('/').unwrap_or(s).to_string())
}

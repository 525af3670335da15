//! Validation of user-supplied run parameters.
//!
//! Everything here runs before the pipeline starts: a run either gets a
//! non-empty list of absolute URLs and a [`MaxConcurrent`], or it fails with
//! an [`ArgumentError`] and nothing is fetched.

use thiserror::Error;

use crate::limits::MaxConcurrent;
use crate::url_model::normalize_url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("invalid value \"{0}\" for flag --parallel")]
    InvalidParallel(usize),
    #[error("invalid value \"{0}\" for default_parallel in config file")]
    InvalidDefaultParallel(usize),
    #[error("no url provided")]
    NoUrl,
    #[error("no valid url provided")]
    NoValidUrl,
}

/// Checks the `--parallel` value against `max`.
///
/// Zero is rejected. Values above `max` are clamped with a warning.
pub fn validate_parallel(requested: usize, max: usize) -> Result<MaxConcurrent, ArgumentError> {
    let requested = MaxConcurrent::new(requested).ok_or(ArgumentError::InvalidParallel(requested))?;
    Ok(clamp(requested, max, "flag --parallel"))
}

/// Same as [`validate_parallel`] for the config file's `default_parallel`,
/// so a bad config is not blamed on a flag the user never passed.
pub fn validate_default_parallel(
    configured: usize,
    max: usize,
) -> Result<MaxConcurrent, ArgumentError> {
    let configured =
        MaxConcurrent::new(configured).ok_or(ArgumentError::InvalidDefaultParallel(configured))?;
    Ok(clamp(configured, max, "default_parallel"))
}

fn clamp(requested: MaxConcurrent, max: usize, source: &str) -> MaxConcurrent {
    match MaxConcurrent::new(max) {
        Some(max) if requested > max => {
            tracing::warn!(
                "value \"{}\" for {} is too big, using default max {}",
                requested,
                source,
                max
            );
            max
        }
        _ => requested,
    }
}

/// Normalizes every input, skipping (and logging) the ones that are not URLs.
/// Order and duplicates are preserved.
pub fn normalize_urls<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<String>, ArgumentError> {
    if inputs.is_empty() {
        return Err(ArgumentError::NoUrl);
    }
    let mut urls = Vec::with_capacity(inputs.len());
    for input in inputs {
        match normalize_url(input.as_ref()) {
            Ok(url) => urls.push(url),
            Err(e) => tracing::warn!("skipping {}", e),
        }
    }
    if urls.is_empty() {
        return Err(ArgumentError::NoValidUrl);
    }
    Ok(urls)
}

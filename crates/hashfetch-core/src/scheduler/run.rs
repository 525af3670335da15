//! Admission loop: one fetch unit per URL, at most `max_concurrent` at once.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::fetcher::{Fetch, FetchError};
use crate::limits::MaxConcurrent;
use crate::reducer::{reduce, PageResult};

use super::permit::PermitPool;
use super::stream::ResultStream;

/// Starts fetching `urls` and returns the stream their records arrive on.
///
/// URLs are admitted in input order, each once a permit is free; records
/// arrive in completion order. The stream closes after every URL has produced
/// exactly one record. Failures stay local to their URL.
///
/// Must be called from within a Tokio runtime. Each fetch runs on the
/// blocking pool, so a multi-threaded runtime is not required.
pub fn schedule<F>(
    fetcher: Arc<F>,
    urls: Vec<String>,
    max_concurrent: MaxConcurrent,
) -> ResultStream
where
    F: Fetch + ?Sized + 'static,
{
    let total = urls.len();
    // Room for every record: units never wait on a consumer that has not started reading.
    let (tx, rx) = mpsc::channel(total.max(1));
    if total == 0 {
        return ResultStream::new(rx, 0);
    }

    // More permits than URLs would never be used.
    let max_concurrent = max_concurrent.at_most(total);
    tracing::debug!(urls = total, max_concurrent = %max_concurrent, "scheduling fetch run");
    let pool = PermitPool::new(max_concurrent);
    tokio::spawn(admit(fetcher, urls, pool, tx));
    ResultStream::new(rx, total)
}

async fn admit<F>(
    fetcher: Arc<F>,
    urls: Vec<String>,
    pool: PermitPool,
    tx: mpsc::Sender<PageResult>,
) where
    F: Fetch + ?Sized + 'static,
{
    let mut units = JoinSet::new();

    for url in urls {
        let Some(permit) = pool.acquire().await else {
            tracing::error!("permit pool closed before {} was admitted", url);
            break;
        };
        tracing::debug!(url = %url, in_use = pool.in_use(), "admitted");
        let fetcher = Arc::clone(&fetcher);
        let tx = tx.clone();
        units.spawn_blocking(move || {
            let _permit = permit;
            let record = run_unit(fetcher.as_ref(), url);
            if tx.blocking_send(record).is_err() {
                tracing::debug!("result stream dropped by consumer");
            }
        });
    }
    // Remaining senders belong to running units; the stream closes when the last one finishes.
    drop(tx);

    let mut finished = 0usize;
    while let Some(res) = units.join_next().await {
        if let Err(e) = res {
            tracing::error!("fetch unit join: {}", e);
        }
        finished += 1;
    }
    tracing::debug!(units = finished, "fetch run complete");
}

/// Fetches and reduces one URL. A panicking fetcher becomes a failed record.
fn run_unit<F>(fetcher: &F, url: String) -> PageResult
where
    F: Fetch + ?Sized,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| fetcher.fetch(&url)))
        .unwrap_or_else(|_| Err(FetchError::Panicked { url: url.clone() }));
    match &outcome {
        Ok(body) => tracing::debug!(url = %url, bytes = body.len(), "fetched"),
        Err(e) => tracing::debug!(url = %url, "fetch failed: {}", e),
    }
    reduce(url, outcome)
}

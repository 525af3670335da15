//! `hashfetch URL...` – fetch every URL and print one line per result.

use anyhow::{Context, Result};
use hashfetch_core::fetcher::{CurlFetcher, FetchOptions};
use hashfetch_core::scheduler::{self, ResultStream, RunSummary};
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use crate::cli::RunPlan;

pub async fn run_fetch(plan: RunPlan, options: FetchOptions) -> Result<RunSummary> {
    let started = Instant::now();
    let count = plan.urls.len();
    let fetcher = Arc::new(CurlFetcher::new(options));
    let stream = scheduler::schedule(fetcher, plan.urls, plan.max_concurrent);

    let summary = print_results(stream, &mut std::io::stdout()).await?;

    tracing::info!(
        "fetched {} url(s) with parallel={}: {} ok, {} failed in {:.2}s",
        count,
        plan.max_concurrent,
        summary.succeeded,
        summary.failed,
        started.elapsed().as_secs_f64()
    );
    Ok(summary)
}

/// Writes each record as it completes. Failed URLs are output, not errors.
pub(crate) async fn print_results<W: Write>(
    mut stream: ResultStream,
    out: &mut W,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    while let Some(record) = stream.next().await {
        summary.record(&record);
        writeln!(out, "{}", record).context("write result")?;
    }
    out.flush().context("flush results")?;
    Ok(summary)
}

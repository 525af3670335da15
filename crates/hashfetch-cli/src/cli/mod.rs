//! CLI for hashfetch.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use hashfetch_core::args::{
    normalize_urls, validate_default_parallel, validate_parallel, ArgumentError,
};
use hashfetch_core::config::{self, HashfetchConfig};
use hashfetch_core::fetcher::FetchOptions;
use hashfetch_core::limits::{self, MaxConcurrent};

use commands::run_fetch;

/// Fetch URLs in parallel and print the MD5 of each response body.
#[derive(Debug, Parser)]
#[command(name = "hashfetch")]
#[command(about = "hashfetch: fetch URLs concurrently and print an MD5 per response", long_about = None)]
pub struct Cli {
    /// Limit the number of parallel requests (default from config, 10).
    #[arg(long, value_name = "N")]
    pub parallel: Option<usize>,

    /// URLs to fetch. A missing scheme defaults to http.
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,
}

/// Validated inputs for one run.
#[derive(Debug)]
pub struct RunPlan {
    pub urls: Vec<String>,
    pub max_concurrent: MaxConcurrent,
}

impl RunPlan {
    /// Validates parallelism first, then URLs. An explicit `--parallel` wins
    /// over the config default; only the value actually used is checked.
    pub fn from_args(
        parallel: Option<usize>,
        inputs: &[String],
        default_parallel: usize,
        max_parallel: usize,
    ) -> Result<Self, ArgumentError> {
        let max_concurrent = match parallel {
            Some(n) => validate_parallel(n, max_parallel)?,
            None => validate_default_parallel(default_parallel, max_parallel)?,
        };
        let urls = normalize_urls(inputs)?;
        Ok(Self {
            urls,
            max_concurrent,
        })
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let cfg = match config::load_or_init() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("using default config: {:#}", e);
                HashfetchConfig::default()
            }
        };
        tracing::debug!("loaded config: {:?}", cfg);

        let plan = RunPlan::from_args(
            self.parallel,
            &self.urls,
            cfg.default_parallel,
            limits::max_parallel(),
        )?;
        let options = FetchOptions::from_config(&cfg);
        tracing::debug!(timeout_secs = options.timeout.as_secs(), "fetch options resolved");

        run_fetch(plan, options).await?;
        Ok(())
    }
}

/// Prints a failed run to stderr; argument errors also get the usage line.
pub fn report_error(err: &anyhow::Error) {
    if let Some(arg_err) = err.downcast_ref::<ArgumentError>() {
        eprintln!("Error: {}", arg_err);
        eprintln!("{}", Cli::command().render_usage());
    } else {
        eprintln!("hashfetch error: {:#}", err);
    }
}

#[cfg(test)]
mod tests;

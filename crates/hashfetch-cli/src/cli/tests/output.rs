//! Tests for result rendering.

use crate::cli::commands::print_results;
use hashfetch_core::fetcher::FetchError;
use hashfetch_core::limits::MaxConcurrent;
use hashfetch_core::scheduler::schedule;
use std::sync::Arc;

fn response_from(url: &str) -> Result<Vec<u8>, FetchError> {
    Ok(format!("Response from {}", url).into_bytes())
}

fn some_error(url: &str) -> Result<Vec<u8>, FetchError> {
    Err(FetchError::transport(url, "some error"))
}

#[tokio::test]
async fn prints_one_line_per_url_in_order_with_single_slot() {
    let urls = vec![
        "https://www.formula1.com".to_string(),
        "https://www.mlb.com".to_string(),
        "http://coffeegeek.com".to_string(),
        "https://pabloaguiar.me".to_string(),
    ];
    let stream = schedule(Arc::new(response_from), urls, MaxConcurrent::new(1).unwrap());
    let mut out = Vec::new();
    let summary = print_results(stream, &mut out).await.unwrap();
    assert_eq!(summary.succeeded, 4);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "https://www.formula1.com a6bbc57376114596ddf51c4f9f7fdcb0\n\
         https://www.mlb.com b6e7c2d493778a4c7662273355008762\n\
         http://coffeegeek.com d75c56b4b08d69152f7bdd1b84e94abc\n\
         https://pabloaguiar.me 2f4e55faf5ff25b6cd61d7d683375045\n"
    );
}

#[tokio::test]
async fn prints_errors_inline() {
    let urls = vec!["https://github.com".to_string(), "https://gitlab.com".to_string()];
    let stream = schedule(Arc::new(some_error), urls, MaxConcurrent::new(1).unwrap());
    let mut out = Vec::new();
    let summary = print_results(stream, &mut out).await.unwrap();
    assert_eq!(summary.failed, 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "https://github.com (Error: Get \"https://github.com\": some error)\n\
         https://gitlab.com (Error: Get \"https://gitlab.com\": some error)\n"
    );
}

#[tokio::test]
async fn prints_nothing_for_empty_run() {
    let stream = schedule(Arc::new(response_from), Vec::new(), MaxConcurrent::new(1).unwrap());
    let mut out = Vec::new();
    let summary = print_results(stream, &mut out).await.unwrap();
    assert_eq!(summary.total(), 0);
    assert!(out.is_empty());
}

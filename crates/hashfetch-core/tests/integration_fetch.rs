//! Integration test: real libcurl fetches against a local server, end to end
//! through the scheduler.

mod common;

use common::page_server::{self, PageServerOptions};
use hashfetch_core::fetcher::{CurlFetcher, Fetch, FetchError, FetchOptions};
use hashfetch_core::limits::MaxConcurrent;
use hashfetch_core::reducer::md5_digest;
use hashfetch_core::scheduler::{schedule, RunSummary};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

fn fetcher_with_timeout(secs: u64) -> CurlFetcher {
    CurlFetcher::new(FetchOptions {
        timeout: Duration::from_secs(secs),
        ..FetchOptions::default()
    })
}

#[test]
fn get_returns_body() {
    let url = page_server::start(b"I love pancakes".to_vec());
    let body = fetcher_with_timeout(10).fetch(&url).unwrap();
    assert_eq!(body, b"I love pancakes");
}

#[test]
fn error_statuses_are_not_failures() {
    for status in [
        "400 Bad Request",
        "401 Unauthorized",
        "404 Not Found",
        "408 Request Timeout",
        "500 Internal Server Error",
    ] {
        let url = page_server::start_with_options(
            b"nope".to_vec(),
            PageServerOptions {
                status,
                ..PageServerOptions::default()
            },
        );
        let body = fetcher_with_timeout(10).fetch(&url);
        assert!(body.is_ok(), "should not fail with status {}", status);
    }
}

#[test]
fn sends_user_agent_and_connection_close() {
    let url = page_server::start(Vec::new());
    let fetcher = CurlFetcher::new(FetchOptions {
        timeout: Duration::from_secs(10),
        user_agent: "hashfetch-test/1.0".to_string(),
        max_redirections: 10,
    });
    let echoed = fetcher.fetch(&format!("{}/headers", url)).unwrap();
    let head = String::from_utf8(echoed).unwrap().to_ascii_lowercase();
    assert!(head.starts_with("get /headers"));
    assert!(head.contains("user-agent: hashfetch-test/1.0"));
    assert!(head.contains("connection: close"));
}

#[test]
fn slow_server_times_out() {
    let url = page_server::start_with_options(
        b"late".to_vec(),
        PageServerOptions {
            delay: Duration::from_secs(3),
            ..PageServerOptions::default()
        },
    );
    let err = fetcher_with_timeout(1).fetch(&url).unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));
    assert_eq!(err.url(), url);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn schedule_mixes_successes_and_failures() {
    let body: Vec<u8> = (0u8..100).cycle().take(64 * 1024).collect();
    let good = page_server::start(body.clone());
    let empty = page_server::start(Vec::new());
    let refused = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port())
    };

    let urls = vec![
        format!("{}/a", good),
        refused.clone(),
        format!("{}/b", good),
        empty.clone(),
    ];
    let fetcher = Arc::new(fetcher_with_timeout(10));
    let mut stream = schedule(fetcher, urls.clone(), MaxConcurrent::new(2).unwrap());

    let mut summary = RunSummary::default();
    let mut seen = Vec::new();
    while let Some(record) = stream.next().await {
        summary.record(&record);
        if record.url() == refused {
            assert!(record.digest().is_none());
            assert!(record
                .to_string()
                .starts_with(&format!("{} (Error: Get \"{}\": ", refused, refused)));
        } else if record.url() == empty {
            assert_eq!(record.digest(), Some(md5_digest(b"")));
        } else {
            assert_eq!(record.digest(), Some(md5_digest(&body)));
        }
        seen.push(record.url().to_string());
    }

    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, 1);
    seen.sort();
    let mut expected = urls;
    expected.sort();
    assert_eq!(seen, expected);
}

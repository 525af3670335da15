//! Shared helpers for integration tests.

pub mod page_server;

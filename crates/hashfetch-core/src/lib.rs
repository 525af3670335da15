pub mod config;
pub mod logging;

pub mod args;
pub mod fetcher;
pub mod limits;
pub mod reducer;
pub mod scheduler;
pub mod url_model;

pub use fetcher::{CurlFetcher, Fetch, FetchError, FetchOptions};
pub use limits::MaxConcurrent;
pub use reducer::PageResult;
pub use scheduler::{schedule, ResultStream};

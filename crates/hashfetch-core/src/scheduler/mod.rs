//! Bounded-concurrency fetch pipeline.
//!
//! Admits one fetch unit per URL through a permit pool, reduces each response
//! to a [`PageResult`](crate::reducer::PageResult), and hands records to the
//! caller through a [`ResultStream`] as they complete.

mod permit;
mod run;
mod stream;

pub use permit::{Permit, PermitPool};
pub use run::schedule;
pub use stream::{ResultStream, RunSummary};

//! Consumer side of a fetch run.

use tokio::sync::mpsc;

use crate::reducer::PageResult;

/// Records of one `schedule` call, in completion order.
///
/// Ends (returns `None`) once every fetch unit has reported. Single use.
#[derive(Debug)]
pub struct ResultStream {
    rx: mpsc::Receiver<PageResult>,
    remaining: usize,
}

impl ResultStream {
    pub(super) fn new(rx: mpsc::Receiver<PageResult>, expected: usize) -> Self {
        Self {
            rx,
            remaining: expected,
        }
    }

    /// Next finished record, or `None` when the run is complete.
    pub async fn next(&mut self) -> Option<PageResult> {
        let record = self.rx.recv().await;
        self.note(&record);
        record
    }

    /// Blocking variant of [`next`](Self::next) for callers outside an async context.
    /// Panics if called from within an async runtime, like Tokio's `blocking_recv`.
    pub fn blocking_next(&mut self) -> Option<PageResult> {
        let record = self.rx.blocking_recv();
        self.note(&record);
        record
    }

    /// Records not yet delivered.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Drains the stream.
    pub async fn collect_all(mut self) -> Vec<PageResult> {
        let mut out = Vec::with_capacity(self.remaining);
        while let Some(r) = self.next().await {
            out.push(r);
        }
        out
    }

    fn note(&mut self, record: &Option<PageResult>) {
        if record.is_some() {
            self.remaining = self.remaining.saturating_sub(1);
        }
    }
}

/// Tally of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, result: &PageResult) {
        if result.is_ok() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

//! Result records and the aggregate report derived from them

use crate::error::RequestError;
use std::collections::BTreeMap;
use std::time::Duration;

/// Outcome of a single worker's request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    /// Index of the worker that produced this record
    pub worker_id: usize,

    /// Transport completed and the body is valid JSON
    pub success: bool,

    /// Time from request start to the moment the outcome was known
    pub elapsed: Duration,

    /// HTTP status, absent when no response was received
    pub status: Option<u16>,

    /// Failure detail, `None` iff `success`
    pub error: Option<RequestError>,
}

impl RequestOutcome {
    pub fn succeeded(worker_id: usize, status: u16, elapsed: Duration) -> Self {
        Self {
            worker_id,
            success: true,
            elapsed,
            status: Some(status),
            error: None,
        }
    }

    pub fn failed(
        worker_id: usize,
        status: Option<u16>,
        elapsed: Duration,
        error: RequestError,
    ) -> Self {
        Self {
            worker_id,
            success: false,
            elapsed,
            status,
            error: Some(error),
        }
    }

    /// Status code with `0` standing in for "no response"
    pub fn status_code(&self) -> u16 {
        self.status.unwrap_or(0)
    }
}

/// Latency distribution over all drained records
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LatencyStats {
    pub fastest: Duration,
    pub slowest: Duration,
    pub mean: Duration,
    pub median: Duration,
}

impl LatencyStats {
    /// Compute stats from a set of per-request durations
    pub fn from_samples(samples: &[Duration]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut sorted = samples.to_vec();
        sorted.sort_unstable();

        let len = sorted.len();
        let total: Duration = sorted.iter().sum();
        let median = if len % 2 == 0 {
            (sorted[len / 2 - 1] + sorted[len / 2]) / 2
        } else {
            sorted[len / 2]
        };

        Self {
            fastest: sorted[0],
            slowest: sorted[len - 1],
            mean: total / len as u32,
            median,
        }
    }
}

/// Aggregate report for one burst
#[derive(Debug, Clone)]
pub struct BurstReport {
    /// Records drained from the channel
    pub total: u64,

    /// Records with `success = true`
    pub successes: u64,

    /// Wall-clock time from first dispatch to final record drained
    pub elapsed: Duration,

    /// Per-request latency distribution
    pub latency: LatencyStats,

    /// Records per status code (`0` = no response)
    pub status_counts: BTreeMap<u16, u64>,
}

impl BurstReport {
    pub fn failures(&self) -> u64 {
        self.total - self.successes
    }
}

/// Running counters maintained by the consumer loop
#[derive(Debug, Default)]
pub(crate) struct Tally {
    total: u64,
    successes: u64,
    samples: Vec<Duration>,
    status_counts: BTreeMap<u16, u64>,
}

impl Tally {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            samples: Vec::with_capacity(n),
            ..Default::default()
        }
    }

    pub(crate) fn record(&mut self, outcome: &RequestOutcome) {
        self.total += 1;
        if outcome.success {
            self.successes += 1;
        }
        self.samples.push(outcome.elapsed);
        *self.status_counts.entry(outcome.status_code()).or_insert(0) += 1;
    }

    pub(crate) fn finish(self, elapsed: Duration) -> BurstReport {
        BurstReport {
            total: self.total,
            successes: self.successes,
            elapsed,
            latency: LatencyStats::from_samples(&self.samples),
            status_counts: self.status_counts,
        }
    }
}

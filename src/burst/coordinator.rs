//! Burst coordinator - orchestrates the fan-out/fan-in of one burst
//!
//! The coordinator is responsible for:
//! - Building the shared HTTP client
//! - Spawning exactly N workers onto the tokio runtime
//! - Running a completion watcher that closes the result channel
//! - Draining results into the aggregate report
//!
//! Channel lifecycle: every worker task holds a clone of the sender and the
//! watcher holds the original. The watcher drops its sender only after the
//! `JoinSet` has joined every worker, so the channel closes exactly once and
//! never before the last send has landed. The consumer stops on `None`.

use crate::burst::outcome::{BurstReport, RequestOutcome, Tally};
use crate::burst::worker::Worker;
use crate::config::RunConfig;
use crate::error::{BurstError, RequestError, Result};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::{self, JoinError, JoinSet};
use tracing::{debug, info, warn};

/// Upper bound on the result channel buffer
pub const MAX_CHANNEL_CAPACITY: usize = 1024;

/// Bursts above this size get a warning; there is no admission control
pub const LARGE_BURST_WARNING: usize = 1024;

/// Coordinates one burst of requests
pub struct Coordinator {
    /// Configuration
    config: Arc<RunConfig>,

    /// Shared HTTP client with the request timeout applied
    client: reqwest::Client,
}

impl Coordinator {
    /// Create a new coordinator
    pub fn new(config: RunConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(BurstError::Client)?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Configuration this coordinator was built from
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run the burst, invoking `on_outcome` for each result as it arrives
    pub async fn run<O>(self, on_outcome: O) -> BurstReport
    where
        O: FnMut(&RequestOutcome),
    {
        let workers = self.config.workers;

        info!(
            url = %self.config.url,
            workers = workers,
            timeout_ms = self.config.timeout.as_millis() as u64,
            "Starting burst"
        );

        if workers > LARGE_BURST_WARNING {
            warn!(
                workers = workers,
                "Large burst: every request opens its own connection, no admission control is applied"
            );
        }

        let url: Arc<str> = Arc::from(self.config.url.as_str());
        let client = self.client;

        let report = run_with(
            workers,
            |id| Worker::new(id, client.clone(), Arc::clone(&url)).run(),
            on_outcome,
        )
        .await;

        info!(
            total = report.total,
            successes = report.successes,
            failures = report.failures(),
            duration_ms = report.elapsed.as_millis() as u64,
            "Burst completed"
        );

        report
    }
}

/// Fan out `workers` tasks built by `make_worker` and fan their outcomes in.
///
/// Exactly `workers` outcomes reach `on_outcome`, in completion order.
pub async fn run_with<F, Fut, O>(workers: usize, mut make_worker: F, mut on_outcome: O) -> BurstReport
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = RequestOutcome> + Send + 'static,
    O: FnMut(&RequestOutcome),
{
    let start = Instant::now();
    let (tx, mut rx) = mpsc::channel::<RequestOutcome>(workers.clamp(1, MAX_CHANNEL_CAPACITY));

    let mut tasks = JoinSet::new();
    let mut worker_ids = HashMap::with_capacity(workers);
    for id in 0..workers {
        let work = make_worker(id);
        let tx = tx.clone();
        let handle = tasks.spawn(async move {
            let outcome = work.await;
            if tx.send(outcome).await.is_err() {
                debug!(worker = id, "Result channel closed before send");
            }
        });
        worker_ids.insert(handle.id(), id);
    }

    debug!(workers = workers, "All workers dispatched");

    // The original sender moves into the watcher; the consumer holds none.
    tokio::spawn(watch_completion(tasks, worker_ids, tx, start));

    let mut tally = Tally::with_capacity(workers);
    while let Some(outcome) = rx.recv().await {
        match &outcome.error {
            Some(err) if err.is_timeout() => warn!(
                worker = outcome.worker_id,
                elapsed_ms = outcome.elapsed.as_millis() as u64,
                "Request timed out"
            ),
            Some(err) => warn!(
                worker = outcome.worker_id,
                status = outcome.status_code(),
                elapsed_ms = outcome.elapsed.as_millis() as u64,
                error = %err,
                "Request failed"
            ),
            None => {}
        }
        tally.record(&outcome);
        on_outcome(&outcome);
    }

    tally.finish(start.elapsed())
}

/// Wait for every worker, substitute a record for any that died, then close.
async fn watch_completion(
    mut tasks: JoinSet<()>,
    worker_ids: HashMap<task::Id, usize>,
    tx: mpsc::Sender<RequestOutcome>,
    start: Instant,
) {
    while let Some(joined) = tasks.join_next().await {
        let Err(e) = joined else { continue };

        // A task that died never sent; its own join error names the worker.
        let Some(&id) = worker_ids.get(&e.id()) else {
            debug!(task = %e.id(), "Join error for unknown task");
            continue;
        };
        let outcome = RequestOutcome::failed(
            id,
            None,
            start.elapsed(),
            RequestError::WorkerPanicked {
                message: join_error_message(e),
            },
        );
        if tx.send(outcome).await.is_err() {
            debug!(worker = id, "Result channel closed before send");
        }
    }

    debug!("All workers joined, closing result channel");
    drop(tx);
}

fn join_error_message(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }

    let payload = err.into_panic();
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

//! Worker logic for a single request
//!
//! Each worker:
//! - Issues exactly one GET against the target URL
//! - Is bounded by the client-level timeout
//! - Classifies the outcome (transport failure, bad payload, success)
//! - Produces exactly one `RequestOutcome`
//!
//! Workers never retry and never log failures themselves; failure detail
//! rides along in the outcome and is logged by the consumer.

use crate::burst::outcome::RequestOutcome;
use crate::error::RequestError;
use std::sync::Arc;
use std::time::Instant;
use tracing::trace;

/// A single-request worker
pub struct Worker {
    /// Worker ID
    id: usize,

    /// Shared HTTP client (carries the request timeout)
    client: reqwest::Client,

    /// Target URL
    url: Arc<str>,
}

impl Worker {
    pub fn new(id: usize, client: reqwest::Client, url: Arc<str>) -> Self {
        Self { id, client, url }
    }

    /// Perform the request and classify the outcome
    pub async fn run(self) -> RequestOutcome {
        let start = Instant::now();

        trace!(worker = self.id, url = %self.url, "Sending request");

        let response = match self.client.get(&*self.url).send().await {
            Ok(response) => response,
            Err(e) => {
                return RequestOutcome::failed(
                    self.id,
                    None,
                    start.elapsed(),
                    RequestError::transport(&e),
                );
            }
        };

        let status = response.status().as_u16();

        // The client timeout also covers the body, so a stalled body is a
        // transport failure with the status already known.
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                return RequestOutcome::failed(
                    self.id,
                    Some(status),
                    start.elapsed(),
                    RequestError::transport(&e),
                );
            }
        };

        match serde_json::from_slice::<serde_json::Value>(&body) {
            Ok(_) => RequestOutcome::succeeded(self.id, status, start.elapsed()),
            Err(e) => RequestOutcome::failed(self.id, Some(status), start.elapsed(), e.into()),
        }
    }
}

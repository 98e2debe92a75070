//! Startup helpers
//!
//! The bus and the workflow engine may come up after the dispatcher (common
//! in container environments), so connecting to them is retried with
//! exponential backoff before giving up.

use std::future::Future;
use std::time::Duration;
use tracing::{error, info, warn};

/// Retry schedule for startup connections
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            max_retries: 10,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

/// Runs `op` until it succeeds or the retries are exhausted
///
/// `what` names the target in logs and in the final error.
pub async fn with_retry<T, E, F, Fut>(
    what: &str,
    backoff: Backoff,
    mut op: F,
) -> anyhow::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;
    let mut delay = backoff.initial_delay;

    loop {
        attempt += 1;

        match op().await {
            Ok(value) => {
                if attempt > 1 {
                    info!("Connected to {} after {} attempt(s)", what, attempt);
                }
                return Ok(value);
            }
            Err(e) => {
                if attempt >= backoff.max_retries {
                    error!("Failed to connect to {} after {} attempts", what, attempt);
                    return Err(anyhow::anyhow!("Cannot establish {} connection: {}", what, e));
                }

                warn!(
                    "Failed to connect to {} (attempt {}/{}): {}",
                    what, attempt, backoff.max_retries, e
                );
                warn!("Retrying in {:?}...", delay);

                tokio::time::sleep(delay).await;

                // Exponential backoff with cap
                delay = (delay * 2).min(backoff.max_delay);
            }
        }
    }
}

//! Exponential backoff for transient cloud failures.
//!
//! A plain async loop: this workspace does not pull in a retry crate for
//! a shape this small.

use std::future::Future;
use std::time::Duration;

use seedr_core::CloudError;

const BASE_DELAY: Duration = Duration::from_secs(1);
const MAX_DELAY: Duration = Duration::from_secs(30);

/// Run `op` up to `max_attempts + 1` times, retrying only on transient
/// [`CloudError`]s with exponential backoff (base 1s, factor 2, cap 30s).
/// `max_attempts = 0` disables retrying entirely; the first failure is
/// returned as-is.
pub async fn with_retry<F, Fut, T>(max_attempts: u32, mut op: F) -> Result<T, CloudError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CloudError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts && err.is_transient() => {
                let delay = BASE_DELAY
                    .checked_mul(1 << attempt.min(10))
                    .unwrap_or(MAX_DELAY)
                    .min(MAX_DELAY);
                tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying after transient cloud error");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) if attempt > 0 && err.is_transient() => {
                return Err(CloudError::RetriesExhausted {
                    attempts: attempt + 1,
                    last: Box::new(err),
                });
            }
            Err(err) => return Err(err),
        }
    }
}

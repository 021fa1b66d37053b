//! Bounded retry wrapper for completion providers.

use super::{GenerationParams, LlmError, LlmProvider};
use async_trait::async_trait;
use std::time::Duration;

/// Retries transient failures of the wrapped provider.
///
/// Only errors where [`LlmError::is_transient`] holds are retried, at most
/// `max_retries` times. A rate-limit `retry-after` hint replaces the fixed
/// backoff, capped at `max_backoff`.
#[derive(Debug)]
pub struct RetryingProvider<P> {
    inner: P,
    max_retries: u32,
    backoff: Duration,
    max_backoff: Duration,
}

impl<P: LlmProvider> RetryingProvider<P> {
    pub fn new(inner: P, max_retries: u32) -> Self {
        Self {
            inner,
            max_retries,
            backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(10),
        }
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    fn delay_for(&self, err: &LlmError) -> Duration {
        match err {
            LlmError::RateLimited {
                retry_after_secs: Some(secs),
            } => Duration::from_secs(*secs).min(self.max_backoff),
            _ => self.backoff,
        }
    }
}

#[async_trait]
impl<P: LlmProvider> LlmProvider for RetryingProvider<P> {
    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String, LlmError> {
        let mut attempt = 0;
        loop {
            match self.inner.complete(prompt, params).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.delay_for(&e);
                    tracing::warn!(
                        provider = self.inner.provider_name(),
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Transient completion failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }
}

// src/optimizer/mod.rs
//! Resume optimization through a hosted generative model

pub mod gemini;
pub mod prompts;
pub mod schema;

pub use gemini::{GeminiClient, GeminiSettings};

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::error::OptimizationError;
use crate::types::OptimizationResult;

/// Rewrites a free-text resume against a job description
#[async_trait]
pub trait ResumeOptimizer: Send + Sync {
    async fn optimize(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<OptimizationResult, OptimizationError>;
}

/// Reject blank inputs before any network call
pub fn validate_inputs(resume_text: &str, job_description: &str) -> Result<(), OptimizationError> {
    if resume_text.trim().is_empty() || job_description.trim().is_empty() {
        return Err(OptimizationError::EmptyInput);
    }
    Ok(())
}

/// Bounded retries with exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first call included
    pub max_attempts: u32,
    /// Delay before the first retry, doubled for each further one
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u32 << retry.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(factor)
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or attempts run out
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, OptimizationError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, OptimizationError>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < attempts => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        "Attempt {}/{} failed: {}. Retrying after {}ms",
                        attempt,
                        attempts,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

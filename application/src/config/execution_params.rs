//! Execution parameters - plan execution control.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Static parameters controlling how plans execute.
///
/// The retry limit of one and the single rate-limit fallback are the
/// production defaults; deployments that prefer fail-fast behavior can
/// turn the fallback off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Deadline for one backend call in single and sequential modes
    pub call_deadline: Duration,
    /// Shared deadline for all specialist calls of an ensemble
    pub ensemble_deadline: Duration,
    /// How many times a failed call is retried on the same backend
    pub max_retries: usize,
    /// Whether a rate-limited call may fall back to another backend
    pub rate_limit_fallback: bool,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            call_deadline: Duration::from_secs(30),
            ensemble_deadline: Duration::from_secs(8),
            max_retries: 1,
            rate_limit_fallback: true,
        }
    }
}

impl ExecutionParams {
    pub fn with_call_deadline(mut self, deadline: Duration) -> Self {
        self.call_deadline = deadline;
        self
    }

    pub fn with_ensemble_deadline(mut self, deadline: Duration) -> Self {
        self.ensemble_deadline = deadline;
        self
    }

    pub fn without_rate_limit_fallback(mut self) -> Self {
        self.rate_limit_fallback = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ExecutionParams::default();
        assert_eq!(params.max_retries, 1);
        assert!(params.rate_limit_fallback);
        assert!(params.ensemble_deadline < params.call_deadline);
    }

    #[test]
    fn test_builders() {
        let params = ExecutionParams::default()
            .with_call_deadline(Duration::from_secs(5))
            .without_rate_limit_fallback();
        assert_eq!(params.call_deadline, Duration::from_secs(5));
        assert!(!params.rate_limit_fallback);
    }
}

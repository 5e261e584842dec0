//! Backend invoker port
//!
//! Defines the interface for performing one text-completion call against
//! an opaque backend. Implementations (adapters) live in the
//! infrastructure layer; authentication and provider-specific payload
//! shaping are their concern, not this port's.

use async_trait::async_trait;
use concierge_domain::Backend;
use std::time::Duration;
use thiserror::Error;

/// Typed failures an invocation can produce
///
/// Each variant is retryable exactly once by the executor before being
/// treated as a hard step failure; [`InvokerError::RateLimited`]
/// additionally triggers a routing-table fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvokerError {
    #[error("Backend call timed out")]
    Timeout,

    #[error("Backend rate limited the call")]
    RateLimited,

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Backend returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// A completed backend call
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// The backend's text response
    pub content: String,
    /// Wall-clock time the call took
    pub elapsed_ms: u64,
    /// Estimated cost of the call, in USD
    pub estimated_cost: f64,
}

impl Invocation {
    pub fn new(content: impl Into<String>, elapsed_ms: u64, estimated_cost: f64) -> Self {
        Self {
            content: content.into(),
            elapsed_ms,
            estimated_cost,
        }
    }
}

/// Port for invoking one backend with one prompt
///
/// The only component in the system that performs network I/O.
#[async_trait]
pub trait BackendInvoker: Send + Sync {
    /// Invoke `backend` with `prompt`, completing within `deadline`.
    ///
    /// `system_prompt` frames the role the backend plays in the current
    /// plan. Implementations must map transport failures onto the typed
    /// [`InvokerError`] variants rather than surfacing raw errors.
    async fn invoke(
        &self,
        backend: &Backend,
        system_prompt: &str,
        prompt: &str,
        deadline: Duration,
    ) -> Result<Invocation, InvokerError>;
}

//! Application-level configuration.
//!
//! [`ExecutionParams`] groups the static parameters that control plan
//! execution: deadlines, the retry limit, and whether rate-limit fallback
//! is allowed. These are application-layer concerns, not domain policy.

pub mod execution_params;

pub use execution_params::ExecutionParams;

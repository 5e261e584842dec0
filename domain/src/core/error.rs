//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// The classifier and strategy selector are total functions and never
/// produce these; plan construction is the one fallible domain operation.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),
}

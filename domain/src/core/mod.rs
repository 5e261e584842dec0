//! Core domain concepts shared across all subdomains.
//!
//! - [`backend::Backend`] - available LLM backends (Claude, GPT, Gemini, etc.)
//! - [`query::Query`] - an incoming natural-language request
//! - [`error::DomainError`] - domain-level errors

pub mod backend;
pub mod error;
pub mod query;

//! Infrastructure layer for llm-concierge
//!
//! Adapters that implement the application's ports against the outside
//! world: the HTTP backend gateway and the TOML configuration sources.

pub mod config;
pub mod http;

pub use config::{ConfigLoader, FileConfig};
pub use http::HttpBackendInvoker;

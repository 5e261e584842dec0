//! Configuration loading and conversion

pub mod file_config;
pub mod loader;

pub use file_config::{FileBackendConfig, FileConfig, FileExecutionConfig, FileGatewayConfig};
pub use loader::ConfigLoader;

//! HTTP gateway adapters

pub mod invoker;

pub use invoker::HttpBackendInvoker;

//! Application layer for llm-concierge
//!
//! Use cases orchestrate the domain pipeline and own all backend I/O
//! through the [`ports`] abstractions. Infrastructure supplies the port
//! implementations; the CLI wires them together.

pub mod config;
pub mod ports;
pub mod use_cases;

pub use config::ExecutionParams;
pub use ports::backend_invoker::{BackendInvoker, Invocation, InvokerError};
pub use ports::progress::{NoProgress, ProgressNotifier};
pub use use_cases::{
    ExecutePlanInput, ExecutePlanUseCase, HandleRequestInput, HandleRequestOutput,
    HandleRequestUseCase,
};

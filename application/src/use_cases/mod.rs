//! Application use cases

pub mod execute_plan;
pub mod handle_request;

pub use execute_plan::{ExecutePlanInput, ExecutePlanUseCase};
pub use handle_request::{HandleRequestInput, HandleRequestOutput, HandleRequestUseCase};

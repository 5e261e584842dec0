//! Progress notification port
//!
//! Defines the interface for reporting progress while a plan executes.

use concierge_domain::{AgentRole, ExecutionMode};

/// Callback for progress updates during plan execution
///
/// Implementations live outside this crate and can display progress in
/// various ways (console, web UI, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called once when execution of the plan begins
    fn on_plan_start(&self, mode: ExecutionMode, total_agents: usize);

    /// Called when one agent's call completes (success or failure)
    fn on_agent_complete(&self, role: &AgentRole, success: bool);

    /// Called when the synthesis pass starts
    fn on_synthesis_start(&self) {}

    /// Called once when execution of the plan finishes
    fn on_plan_complete(&self, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_plan_start(&self, _mode: ExecutionMode, _total_agents: usize) {}
    fn on_agent_complete(&self, _role: &AgentRole, _success: bool) {}
    fn on_plan_complete(&self, _success: bool) {}
}

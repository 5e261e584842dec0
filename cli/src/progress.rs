//! Console progress reporting

use concierge_application::ports::progress::ProgressNotifier;
use concierge_domain::{AgentRole, ExecutionMode};

/// Reports execution progress to stderr, keeping stdout for the answer
pub struct ConsoleProgress;

impl ProgressNotifier for ConsoleProgress {
    fn on_plan_start(&self, mode: ExecutionMode, total_agents: usize) {
        eprintln!("[plan] {} execution, {} agent(s)", mode, total_agents);
    }

    fn on_agent_complete(&self, role: &AgentRole, success: bool) {
        let marker = if success { "ok" } else { "failed" };
        eprintln!("[agent] {} ({}) {}", role.backend, role.kind, marker);
    }

    fn on_synthesis_start(&self) {
        eprintln!("[synthesis] merging specialist answers");
    }

    fn on_plan_complete(&self, success: bool) {
        let marker = if success { "done" } else { "failed" };
        eprintln!("[plan] {}", marker);
    }
}

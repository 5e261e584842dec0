//! Strategy selector - maps a triage record onto a collaboration plan.
//!
//! A small ordered rule set, evaluated in fixed priority order with the
//! first match applied exclusively. The fallback rule always matches, so
//! the selector is total: every triage yields exactly one plan.

use super::value_objects::{AgentRole, CollaborationPlan};
use crate::core::backend::Backend;
use crate::routing::{CapabilityTier, RoutingTable};
use crate::triage::{Complexity, Domain, Triage};
use std::sync::Arc;

/// Number of independent specialists in a critical ensemble
const ENSEMBLE_SIZE: usize = 3;

/// Rule names, surfaced in `CollaborationResult::reasoning`
pub mod rules {
    pub const SPECIALIST_CHAIN: &str = "specialist-chain";
    pub const CRITICAL_ENSEMBLE: &str = "critical-ensemble";
    pub const TECHNICAL_CHAIN: &str = "technical-chain";
    pub const SINGLE: &str = "single";
}

/// Selects a [`CollaborationPlan`] for a [`Triage`].
///
/// Pure and deterministic; the only input beyond the triage is the
/// read-only routing table used to resolve role backends.
pub struct StrategySelector {
    table: Arc<RoutingTable>,
}

impl StrategySelector {
    pub fn new(table: Arc<RoutingTable>) -> Self {
        Self { table }
    }

    /// Select the plan for a triage. Total: rules are tried in priority
    /// order and the single-agent fallback always matches.
    pub fn select(&self, triage: &Triage) -> CollaborationPlan {
        if triage.domain == Domain::Medical && triage.complexity == Complexity::High {
            return self.specialist_chain(triage);
        }

        if triage.urgency.is_critical() {
            return self.critical_ensemble();
        }

        if triage.domain == Domain::Technical && triage.complexity == Complexity::High {
            return self.technical_chain(triage);
        }

        CollaborationPlan::single(
            AgentRole::generalist(
                triage.suggested_backend.clone(),
                "Answer the request directly",
            ),
            rules::SINGLE,
        )
    }

    /// Rule 1: high-complexity medical requests run extraction then
    /// explanation as a two-step chain. The explanation step's own output
    /// is the final answer, so no synthesis pass follows.
    fn specialist_chain(&self, triage: &Triage) -> CollaborationPlan {
        let extractor = self
            .table
            .specialist_for(Domain::Medical)
            .unwrap_or_else(|| triage.suggested_backend.clone());
        let explainer = self.frontier_generalist();

        CollaborationPlan::sequential(
            vec![
                AgentRole::specialist(
                    extractor,
                    "Extract the clinically relevant findings from the request",
                ),
                AgentRole::generalist(
                    explainer,
                    "Translate the structured findings into a clear, patient-appropriate explanation",
                ),
            ],
            rules::SPECIALIST_CHAIN,
        )
        .expect("specialist chain has two agents")
    }

    /// Rule 2: critical urgency fans out to independent specialists and
    /// synthesizes a consensus answer.
    fn critical_ensemble(&self) -> CollaborationPlan {
        let purposes = [
            "Assess the immediate risks and what must happen first",
            "Recommend the concrete next actions to take",
            "Consider alternative explanations and what would rule them out",
        ];

        let mut backends = self.table.top_capability(ENSEMBLE_SIZE);
        if backends.is_empty() {
            backends.push(Backend::default());
        }

        let mut agents: Vec<AgentRole> = backends
            .iter()
            .cycle()
            .take(ENSEMBLE_SIZE)
            .zip(purposes)
            .map(|(backend, purpose)| AgentRole::specialist(backend.clone(), purpose))
            .collect();

        let synthesizer = self.frontier_generalist();
        agents.push(AgentRole::synthesizer(
            synthesizer,
            "Merge the independent assessments into one consensus answer",
        ));

        CollaborationPlan::ensemble(agents, rules::CRITICAL_ENSEMBLE)
    }

    /// Rule 3: high-complexity technical requests extract requirements
    /// with a fast backend, then generate the solution with a frontier one.
    fn technical_chain(&self, triage: &Triage) -> CollaborationPlan {
        let extractor = self
            .table
            .specialist_for(Domain::Technical)
            .or_else(|| self.table.cheapest_at_tier(CapabilityTier::Fast, false))
            .unwrap_or_else(|| triage.suggested_backend.clone());
        let solver = self.frontier_generalist();

        CollaborationPlan::sequential(
            vec![
                AgentRole::specialist(
                    extractor,
                    "Extract the concrete requirements, constraints and unknowns",
                ),
                AgentRole::generalist(
                    solver,
                    "Produce a complete solution that satisfies the extracted requirements",
                ),
            ],
            rules::TECHNICAL_CHAIN,
        )
        .expect("technical chain has two agents")
    }

    fn frontier_generalist(&self) -> Backend {
        self.table.highest_capability().unwrap_or_default()
    }
}

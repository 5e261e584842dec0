//! Collaboration plan value objects.
//!
//! A [`CollaborationPlan`] is produced by the
//! [`StrategySelector`](crate::plan::StrategySelector) and drives the
//! executor. It is immutable once built; the constructors enforce the
//! structural invariants so downstream code never re-checks them.

use crate::core::backend::Backend;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What part an agent plays in a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    /// Produces a domain-focused answer or intermediate artifact
    Specialist,
    /// Produces the audience-facing answer
    Generalist,
    /// Merges ensemble outputs into one answer
    Synthesizer,
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleKind::Specialist => write!(f, "specialist"),
            RoleKind::Generalist => write!(f, "generalist"),
            RoleKind::Synthesizer => write!(f, "synthesizer"),
        }
    }
}

/// One participant in a collaboration plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRole {
    /// The part this agent plays
    pub kind: RoleKind,
    /// The backend that executes it
    pub backend: Backend,
    /// Free-text purpose, interpolated into the agent's prompt
    pub purpose: String,
}

impl AgentRole {
    pub fn specialist(backend: Backend, purpose: impl Into<String>) -> Self {
        Self {
            kind: RoleKind::Specialist,
            backend,
            purpose: purpose.into(),
        }
    }

    pub fn generalist(backend: Backend, purpose: impl Into<String>) -> Self {
        Self {
            kind: RoleKind::Generalist,
            backend,
            purpose: purpose.into(),
        }
    }

    pub fn synthesizer(backend: Backend, purpose: impl Into<String>) -> Self {
        Self {
            kind: RoleKind::Synthesizer,
            backend,
            purpose: purpose.into(),
        }
    }

    /// Check if this is the synthesizer role
    pub fn is_synthesizer(&self) -> bool {
        matches!(self.kind, RoleKind::Synthesizer)
    }
}

/// How the plan's agents are driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One backend call
    Single,
    /// Each step's output feeds the next step's prompt
    Sequential,
    /// All agents answer independently and concurrently
    Ensemble,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Single => write!(f, "single"),
            ExecutionMode::Sequential => write!(f, "sequential"),
            ExecutionMode::Ensemble => write!(f, "ensemble"),
        }
    }
}

/// The strategy chosen for one request
///
/// Invariants (enforced by the constructors):
/// - `Sequential` plans carry at least two agents.
/// - `Ensemble` plans with more than one non-synthesizer agent require
///   synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaborationPlan {
    /// Participants, in execution order for sequential mode
    pub agents: Vec<AgentRole>,
    /// Execution mode
    pub mode: ExecutionMode,
    /// Whether a synthesis pass runs after the agents finish
    pub synthesis_required: bool,
    /// Name of the rule that produced this plan
    pub strategy: String,
}

impl CollaborationPlan {
    /// A single-agent plan
    pub fn single(agent: AgentRole, strategy: impl Into<String>) -> Self {
        Self {
            agents: vec![agent],
            mode: ExecutionMode::Single,
            synthesis_required: false,
            strategy: strategy.into(),
        }
    }

    /// A sequential chain; requires at least two agents
    pub fn sequential(
        agents: Vec<AgentRole>,
        strategy: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if agents.len() < 2 {
            return Err(DomainError::InvalidPlan(
                "sequential plan requires at least 2 agents".to_string(),
            ));
        }
        Ok(Self {
            agents,
            mode: ExecutionMode::Sequential,
            synthesis_required: false,
            strategy: strategy.into(),
        })
    }

    /// An ensemble plan; synthesis is forced on whenever more than one
    /// specialist participates
    pub fn ensemble(agents: Vec<AgentRole>, strategy: impl Into<String>) -> Self {
        let specialist_count = agents.iter().filter(|a| !a.is_synthesizer()).count();
        Self {
            agents,
            mode: ExecutionMode::Ensemble,
            synthesis_required: specialist_count > 1,
            strategy: strategy.into(),
        }
    }

    /// The non-synthesizer participants, in plan order
    pub fn specialists(&self) -> impl Iterator<Item = &AgentRole> {
        self.agents.iter().filter(|a| !a.is_synthesizer())
    }

    /// The synthesizer role, when the plan carries one
    pub fn synthesizer(&self) -> Option<&AgentRole> {
        self.agents.iter().find(|a| a.is_synthesizer())
    }

    /// Re-check the structural invariants (used by tests and debug assertions)
    pub fn validate(&self) -> Result<(), DomainError> {
        match self.mode {
            ExecutionMode::Single => Ok(()),
            ExecutionMode::Sequential => {
                if self.agents.len() < 2 {
                    Err(DomainError::InvalidPlan(
                        "sequential plan requires at least 2 agents".to_string(),
                    ))
                } else {
                    Ok(())
                }
            }
            ExecutionMode::Ensemble => {
                let specialist_count = self.specialists().count();
                if specialist_count > 1 && !self.synthesis_required {
                    Err(DomainError::InvalidPlan(
                        "multi-agent ensemble requires synthesis".to_string(),
                    ))
                } else {
                    Ok(())
                }
            }
        }
    }
}

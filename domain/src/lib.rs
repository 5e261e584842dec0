//! Domain layer for llm-concierge
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Triage
//!
//! Every request is classified once, cheaply and deterministically, into a
//! [`Triage`] record before any backend is contacted. Triage drives every
//! downstream decision.
//!
//! ## Collaboration
//!
//! The [`StrategySelector`] maps a triage onto a [`CollaborationPlan`]:
//! one backend, a sequential chain of two, or a parallel ensemble whose
//! answers are merged by a synthesizer with a measurable consensus score.

pub mod collab;
pub mod consensus;
pub mod core;
pub mod enhance;
pub mod plan;
pub mod prompt;
pub mod routing;
pub mod triage;
pub mod util;

// Re-export commonly used types
pub use collab::{AgentResponse, CollaborationResult};
pub use consensus::{parse_confidence, score as consensus_score};
pub use core::{
    backend::Backend,
    error::DomainError,
    query::{Query, Speaker, Turn},
};
pub use enhance::{Enhanced, EnhancementMetadata, ResponseEnhancer, milestone_suggestions};
pub use plan::{AgentRole, CollaborationPlan, ExecutionMode, RoleKind, StrategySelector, rules};
pub use prompt::PromptTemplate;
pub use routing::{BackendProfile, CapabilityTier, RoutingTable};
pub use triage::{
    Classifier, Complexity, Domain, EmotionalTone, MAX_KEYWORDS, OutputShape, Triage, Urgency,
};
pub use util::truncate_str;

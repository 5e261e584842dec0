//! Collaboration result value objects.
//!
//! - [`AgentResponse`] - one backend call's outcome, success or failure
//! - [`CollaborationResult`] - the terminal value returned to the caller
//!
//! A `CollaborationResult` is always complete: even when every backend
//! failed, the caller receives the responses gathered so far plus a
//! human-readable explanation in `reasoning`, never an error.

use crate::plan::AgentRole;
use serde::{Deserialize, Serialize};

/// Outcome of one backend call within a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    /// The role that produced this response
    pub role: AgentRole,
    /// The response content (empty on failure)
    pub content: String,
    /// Self-reported confidence, when the backend supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    /// Wall-clock time the call took
    pub elapsed_ms: u64,
    /// Estimated cost of the call, in USD
    pub estimated_cost: f64,
    /// Error marker when the call failed after retry and fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AgentResponse {
    /// A successful response
    pub fn success(
        role: AgentRole,
        content: impl Into<String>,
        elapsed_ms: u64,
        estimated_cost: f64,
    ) -> Self {
        Self {
            role,
            content: content.into(),
            confidence: None,
            elapsed_ms,
            estimated_cost,
            error: None,
        }
    }

    /// A failed response carrying its error marker
    pub fn failure(role: AgentRole, error: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            role,
            content: String::new(),
            confidence: None,
            elapsed_ms,
            estimated_cost: 0.0,
            error: Some(error.into()),
        }
    }

    /// Attach a self-reported confidence figure
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }

    /// Returns `true` if this call succeeded
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Terminal value of one routed request
///
/// Constructed once per request and never mutated after return. The
/// subsystem has no persistence obligation; the caller decides what to
/// store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaborationResult {
    /// The answer shown to the user; empty signals failure
    pub primary_response: String,
    /// Every backend call made, in plan order, failures included
    pub agent_responses: Vec<AgentResponse>,
    /// The synthesizer's merged answer, for ensemble plans
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesized_response: Option<String>,
    /// Agreement score across ensemble responses, in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consensus_score: Option<f32>,
    /// Human-readable explanation of the strategy and any failures
    pub reasoning: String,
    /// Sum of per-call cost estimates
    pub total_cost: f64,
    /// End-to-end latency attributed to backend calls
    pub total_latency_ms: u64,
}

impl CollaborationResult {
    pub fn new(primary_response: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            primary_response: primary_response.into(),
            agent_responses: Vec::new(),
            synthesized_response: None,
            consensus_score: None,
            reasoning: reasoning.into(),
            total_cost: 0.0,
            total_latency_ms: 0,
        }
    }

    /// A failure result: empty primary response, reasoning explains why
    pub fn failed(reasoning: impl Into<String>, agent_responses: Vec<AgentResponse>) -> Self {
        let total_cost = agent_responses.iter().map(|r| r.estimated_cost).sum();
        Self {
            primary_response: String::new(),
            agent_responses,
            synthesized_response: None,
            consensus_score: None,
            reasoning: reasoning.into(),
            total_cost,
            total_latency_ms: 0,
        }
    }

    pub fn with_agent_responses(mut self, responses: Vec<AgentResponse>) -> Self {
        self.agent_responses = responses;
        self
    }

    pub fn with_synthesis(mut self, synthesized: impl Into<String>, score: f32) -> Self {
        self.synthesized_response = Some(synthesized.into());
        self.consensus_score = Some(score.clamp(0.0, 1.0));
        self
    }

    pub fn with_totals(mut self, total_cost: f64, total_latency_ms: u64) -> Self {
        self.total_cost = total_cost;
        self.total_latency_ms = total_latency_ms;
        self
    }

    /// Whether the request produced an answer
    pub fn is_success(&self) -> bool {
        !self.primary_response.is_empty()
    }

    /// Iterator over the successful backend calls
    pub fn successful_responses(&self) -> impl Iterator<Item = &AgentResponse> {
        self.agent_responses.iter().filter(|r| r.is_success())
    }

    /// Iterator over the failed backend calls
    pub fn failed_responses(&self) -> impl Iterator<Item = &AgentResponse> {
        self.agent_responses.iter().filter(|r| !r.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::Backend;

    fn role() -> AgentRole {
        AgentRole::generalist(Backend::default(), "answer")
    }

    #[test]
    fn test_success_and_failure_markers() {
        let ok = AgentResponse::success(role(), "fine", 120, 0.01);
        let err = AgentResponse::failure(role(), "timeout", 5000);
        assert!(ok.is_success());
        assert!(!err.is_success());
        assert!(err.content.is_empty());
        assert_eq!(err.estimated_cost, 0.0);
    }

    #[test]
    fn test_confidence_is_clamped() {
        let r = AgentResponse::success(role(), "x", 1, 0.0).with_confidence(1.4);
        assert_eq!(r.confidence, Some(1.0));
    }

    #[test]
    fn test_failed_result_signals_via_empty_primary() {
        let result = CollaborationResult::failed(
            "all specialists failed",
            vec![AgentResponse::failure(role(), "unavailable", 10)],
        );
        assert!(!result.is_success());
        assert_eq!(result.failed_responses().count(), 1);
        assert_eq!(result.successful_responses().count(), 0);
    }

    #[test]
    fn test_failed_result_sums_partial_costs() {
        let result = CollaborationResult::failed(
            "chain aborted",
            vec![
                AgentResponse::success(role(), "step one", 100, 0.02),
                AgentResponse::failure(role(), "timeout", 5000),
            ],
        );
        assert!((result.total_cost - 0.02).abs() < f64::EPSILON);
    }
}

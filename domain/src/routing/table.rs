//! Static routing and cost table.
//!
//! The table maps each [`Backend`] to its per-call cost estimate and
//! capability flags. It is loaded once at process start, shared by
//! reference, and treated as read-only for the lifetime of the process;
//! reconfiguration replaces the whole `Arc`, never mutates in place.

use crate::core::backend::Backend;
use crate::triage::{Complexity, Domain, Urgency};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rough capability class of a backend
///
/// Ordered: `Fast < Balanced < Frontier`. Critical requests always route
/// to the highest tier available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityTier {
    Fast,
    #[default]
    Balanced,
    Frontier,
}

impl std::fmt::Display for CapabilityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapabilityTier::Fast => write!(f, "fast"),
            CapabilityTier::Balanced => write!(f, "balanced"),
            CapabilityTier::Frontier => write!(f, "frontier"),
        }
    }
}

/// Cost and capability metadata for one backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendProfile {
    /// Human-readable name for display surfaces
    pub display_name: String,
    /// Estimated cost per call, in USD
    pub cost_per_call: f64,
    /// Whether the backend accepts image input
    pub supports_vision: bool,
    /// Domain this backend is tuned for, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<Domain>,
    /// Capability class
    pub tier: CapabilityTier,
}

impl BackendProfile {
    pub fn new(display_name: impl Into<String>, cost_per_call: f64, tier: CapabilityTier) -> Self {
        Self {
            display_name: display_name.into(),
            cost_per_call,
            supports_vision: false,
            specialization: None,
            tier,
        }
    }

    /// Mark this backend as vision-capable
    pub fn with_vision(mut self) -> Self {
        self.supports_vision = true;
        self
    }

    /// Mark this backend as tuned for a domain
    pub fn with_specialization(mut self, domain: Domain) -> Self {
        self.specialization = Some(domain);
        self
    }
}

/// Read-only routing and cost table shared across all requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingTable {
    backends: BTreeMap<Backend, BackendProfile>,
}

impl RoutingTable {
    /// Build a table from explicit profiles
    pub fn new(backends: BTreeMap<Backend, BackendProfile>) -> Self {
        Self { backends }
    }

    /// Check whether the table has no backends
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Number of registered backends
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// Look up the profile for a backend
    pub fn profile(&self, backend: &Backend) -> Option<&BackendProfile> {
        self.backends.get(backend)
    }

    /// Per-call cost estimate for a backend (0.0 when unregistered)
    pub fn cost_of(&self, backend: &Backend) -> f64 {
        self.backends
            .get(backend)
            .map(|p| p.cost_per_call)
            .unwrap_or(0.0)
    }

    /// Iterate over registered backends and their profiles
    pub fn iter(&self) -> impl Iterator<Item = (&Backend, &BackendProfile)> {
        self.backends.iter()
    }

    /// Register or replace one backend profile (builder, used during load)
    pub fn with_backend(mut self, backend: Backend, profile: BackendProfile) -> Self {
        self.backends.insert(backend, profile);
        self
    }

    /// The most capable backend: highest tier, cost as tie-break
    pub fn highest_capability(&self) -> Option<Backend> {
        self.backends
            .iter()
            .max_by(|(_, a), (_, b)| {
                a.tier
                    .cmp(&b.tier)
                    .then(a.cost_per_call.total_cmp(&b.cost_per_call))
            })
            .map(|(b, _)| b.clone())
    }

    /// The `n` most capable backends, highest tier first, cost as tie-break
    pub fn top_capability(&self, n: usize) -> Vec<Backend> {
        let mut ranked: Vec<(&Backend, &BackendProfile)> = self.backends.iter().collect();
        ranked.sort_by(|(_, a), (_, b)| {
            b.tier
                .cmp(&a.tier)
                .then(b.cost_per_call.total_cmp(&a.cost_per_call))
        });
        ranked.into_iter().take(n).map(|(b, _)| b.clone()).collect()
    }

    /// The backend tuned for a domain, if one is registered
    pub fn specialist_for(&self, domain: Domain) -> Option<Backend> {
        self.backends
            .iter()
            .find(|(_, p)| p.specialization == Some(domain))
            .map(|(b, _)| b.clone())
    }

    /// Cheapest backend at or above the given tier, optionally vision-only
    pub fn cheapest_at_tier(&self, tier: CapabilityTier, requires_vision: bool) -> Option<Backend> {
        self.backends
            .iter()
            .filter(|(_, p)| p.tier >= tier && (!requires_vision || p.supports_vision))
            .min_by(|(_, a), (_, b)| a.cost_per_call.total_cmp(&b.cost_per_call))
            .map(|(b, _)| b.clone())
    }

    /// Advisory backend lookup keyed on the triage axes.
    ///
    /// Resolution order:
    /// 1. `Critical` urgency always selects the highest-capability backend.
    /// 2. `requires_vision` restricts every candidate set to vision-capable
    ///    backends (when at least one exists).
    /// 3. A domain specialist is preferred for specialized domains at
    ///    `Medium` or `High` complexity.
    /// 4. Otherwise the cheapest backend at the complexity-matched tier.
    pub fn suggest(
        &self,
        complexity: Complexity,
        domain: Domain,
        urgency: Urgency,
        requires_vision: bool,
    ) -> Backend {
        if urgency.is_critical() {
            if let Some(backend) = self.highest_capability() {
                return backend;
            }
        }

        if requires_vision {
            if let Some(backend) = self.suggest_vision(complexity, domain) {
                return backend;
            }
        }

        if domain.is_specialized() && complexity != Complexity::Simple {
            if let Some(backend) = self.specialist_for(domain) {
                return backend;
            }
        }

        let tier = Self::tier_for(complexity);
        self.cheapest_at_tier(tier, false)
            .or_else(|| self.highest_capability())
            .unwrap_or_default()
    }

    /// Vision-restricted suggestion: specialist first, then tier match
    fn suggest_vision(&self, complexity: Complexity, domain: Domain) -> Option<Backend> {
        if domain.is_specialized() {
            if let Some(backend) = self.specialist_for(domain) {
                if self
                    .profile(&backend)
                    .is_some_and(|p| p.supports_vision)
                {
                    return Some(backend);
                }
            }
        }
        self.cheapest_at_tier(Self::tier_for(complexity), true)
            .or_else(|| self.cheapest_at_tier(CapabilityTier::Fast, true))
    }

    /// Fallback backend after a rate-limited call: the cheapest compatible
    /// backend other than the one that failed.
    ///
    /// Compatible means vision-capable when the request needs vision.
    /// Returns `None` when no other compatible backend is registered.
    pub fn fallback_for(&self, failed: &Backend, requires_vision: bool) -> Option<Backend> {
        self.backends
            .iter()
            .filter(|(b, p)| *b != failed && (!requires_vision || p.supports_vision))
            .min_by(|(_, a), (_, b)| a.cost_per_call.total_cmp(&b.cost_per_call))
            .map(|(b, _)| b.clone())
    }

    fn tier_for(complexity: Complexity) -> CapabilityTier {
        match complexity {
            Complexity::Simple => CapabilityTier::Fast,
            Complexity::Medium => CapabilityTier::Balanced,
            Complexity::High => CapabilityTier::Frontier,
        }
    }
}

impl Default for RoutingTable {
    /// Built-in profiles for the default backend fleet.
    ///
    /// Deployments override these from configuration; the defaults keep a
    /// zero-config run working.
    fn default() -> Self {
        let mut backends = BTreeMap::new();
        backends.insert(
            Backend::ClaudeOpus46,
            BackendProfile::new("Claude Opus 4.6", 0.075, CapabilityTier::Frontier).with_vision(),
        );
        backends.insert(
            Backend::Gpt52,
            BackendProfile::new("GPT-5.2", 0.060, CapabilityTier::Frontier).with_vision(),
        );
        backends.insert(
            Backend::ClaudeSonnet45,
            BackendProfile::new("Claude Sonnet 4.5", 0.018, CapabilityTier::Balanced).with_vision(),
        );
        backends.insert(
            Backend::Gemini3Pro,
            BackendProfile::new("Gemini 3 Pro", 0.012, CapabilityTier::Balanced).with_vision(),
        );
        backends.insert(
            Backend::MedGemma27b,
            BackendProfile::new("MedGemma 27B", 0.008, CapabilityTier::Balanced)
                .with_vision()
                .with_specialization(Domain::Medical),
        );
        backends.insert(
            Backend::ClaudeHaiku45,
            BackendProfile::new("Claude Haiku 4.5", 0.004, CapabilityTier::Fast)
                .with_specialization(Domain::Technical),
        );
        backends.insert(
            Backend::Gpt5Mini,
            BackendProfile::new("GPT-5 Mini", 0.002, CapabilityTier::Fast),
        );
        Self { backends }
    }
}

//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain and
//! application types after validation.

use concierge_application::ExecutionParams;
use concierge_domain::{Backend, BackendProfile, CapabilityTier, Domain, RoutingTable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Gateway connection settings
    pub gateway: FileGatewayConfig,
    /// Plan execution settings
    pub execution: FileExecutionConfig,
    /// Per-backend overrides of the built-in fleet
    pub backends: Vec<FileBackendConfig>,
}

/// `[gateway]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Base URL of the OpenAI-compatible gateway
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: Option<String>,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key_env: None,
        }
    }
}

/// `[execution]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    /// Per-call deadline in milliseconds
    pub call_deadline_ms: u64,
    /// Shared ensemble deadline in milliseconds
    pub ensemble_deadline_ms: u64,
    /// Retries per backend call on top of the first attempt
    pub max_retries: usize,
    /// Whether rate-limited calls may reroute to a cheaper backend
    pub rate_limit_fallback: bool,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            call_deadline_ms: params.call_deadline.as_millis() as u64,
            ensemble_deadline_ms: params.ensemble_deadline.as_millis() as u64,
            max_retries: params.max_retries,
            rate_limit_fallback: params.rate_limit_fallback,
        }
    }
}

/// One `[[backends]]` entry overriding or extending the built-in fleet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Model identifier, e.g. `claude-sonnet-4.5`
    pub name: String,
    /// Human-readable name shown in output
    pub display_name: Option<String>,
    /// Estimated cost per call in USD
    pub cost_per_call: Option<f64>,
    /// One of `fast`, `balanced`, `frontier`
    pub tier: Option<String>,
    /// One of `technical`, `medical`
    pub specialization: Option<String>,
    /// Whether the backend accepts image input
    pub supports_vision: Option<bool>,
}

impl FileConfig {
    /// Validate the configuration, returning all detected issues as
    /// human-readable warnings. Loading never hard-fails on these; the
    /// offending entries are ignored at conversion time.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.gateway.base_url.trim().is_empty() {
            issues.push("gateway.base_url is empty, using the default".to_string());
        }
        if self.execution.call_deadline_ms == 0 {
            issues.push("execution.call_deadline_ms must be positive".to_string());
        }
        if self.execution.ensemble_deadline_ms == 0 {
            issues.push("execution.ensemble_deadline_ms must be positive".to_string());
        }

        for entry in &self.backends {
            if entry.name.trim().is_empty() {
                issues.push("backends entry with an empty name".to_string());
                continue;
            }
            if let Some(tier) = &entry.tier {
                if parse_tier(tier).is_none() {
                    issues.push(format!(
                        "backends.{}: unknown tier '{}', expected fast, balanced or frontier",
                        entry.name, tier
                    ));
                }
            }
            if let Some(spec) = &entry.specialization {
                if parse_specialization(spec).is_none() {
                    issues.push(format!(
                        "backends.{}: unknown specialization '{}', expected technical or medical",
                        entry.name, spec
                    ));
                }
            }
            if let Some(cost) = entry.cost_per_call {
                if cost < 0.0 {
                    issues.push(format!(
                        "backends.{}: cost_per_call must not be negative",
                        entry.name
                    ));
                }
            }
        }

        issues
    }

    /// Convert the `[execution]` section into application parameters
    pub fn to_execution_params(&self) -> ExecutionParams {
        let defaults = ExecutionParams::default();
        let mut params = defaults
            .with_call_deadline(Duration::from_millis(self.execution.call_deadline_ms.max(1)))
            .with_ensemble_deadline(Duration::from_millis(
                self.execution.ensemble_deadline_ms.max(1),
            ));
        params.max_retries = self.execution.max_retries;
        params.rate_limit_fallback = self.execution.rate_limit_fallback;
        params
    }

    /// Build the routing table: the built-in fleet with `[[backends]]`
    /// entries layered on top. Invalid entries are skipped.
    pub fn to_routing_table(&self) -> RoutingTable {
        let mut table = RoutingTable::default();

        for entry in &self.backends {
            if entry.name.trim().is_empty() {
                continue;
            }
            let backend: Backend = entry.name.parse().unwrap_or(Backend::Custom(entry.name.clone()));

            let base = table.profile(&backend).cloned().unwrap_or_else(|| {
                BackendProfile::new(entry.name.clone(), 0.0, CapabilityTier::Balanced)
            });

            let mut profile = BackendProfile::new(
                entry.display_name.clone().unwrap_or(base.display_name),
                entry.cost_per_call.unwrap_or(base.cost_per_call),
                entry
                    .tier
                    .as_deref()
                    .and_then(parse_tier)
                    .unwrap_or(base.tier),
            );
            if entry.supports_vision.unwrap_or(base.supports_vision) {
                profile = profile.with_vision();
            }
            if let Some(domain) = entry
                .specialization
                .as_deref()
                .and_then(parse_specialization)
                .or(base.specialization)
            {
                profile = profile.with_specialization(domain);
            }

            table = table.with_backend(backend, profile);
        }

        table
    }
}

fn parse_tier(s: &str) -> Option<CapabilityTier> {
    match s.to_lowercase().as_str() {
        "fast" => Some(CapabilityTier::Fast),
        "balanced" => Some(CapabilityTier::Balanced),
        "frontier" => Some(CapabilityTier::Frontier),
        _ => None,
    }
}

fn parse_specialization(s: &str) -> Option<Domain> {
    match s.to_lowercase().as_str() {
        "technical" => Some(Domain::Technical),
        "medical" => Some(Domain::Medical),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_execution_section_round_trips_to_params() {
        let mut config = FileConfig::default();
        config.execution.call_deadline_ms = 5_000;
        config.execution.max_retries = 2;

        let params = config.to_execution_params();
        assert_eq!(params.call_deadline, Duration::from_millis(5_000));
        assert_eq!(params.max_retries, 2);
        assert!(params.rate_limit_fallback);
    }

    #[test]
    fn test_backend_override_replaces_fleet_entry() {
        let config: FileConfig = toml::from_str(
            r#"
            [[backends]]
            name = "claude-sonnet-4.5"
            cost_per_call = 0.03
            tier = "frontier"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_empty());

        let table = config.to_routing_table();
        let profile = table.profile(&Backend::ClaudeSonnet45).unwrap();
        assert!((profile.cost_per_call - 0.03).abs() < 1e-9);
        assert_eq!(profile.tier, CapabilityTier::Frontier);
        // Untouched fields come from the built-in fleet
        assert!(profile.supports_vision);
    }

    #[test]
    fn test_unknown_backend_name_becomes_custom() {
        let config: FileConfig = toml::from_str(
            r#"
            [[backends]]
            name = "local-llama"
            cost_per_call = 0.0
            tier = "fast"
            "#,
        )
        .unwrap();

        let table = config.to_routing_table();
        let backend = Backend::Custom("local-llama".to_string());
        assert!(table.profile(&backend).is_some());
    }

    #[test]
    fn test_invalid_tier_is_reported() {
        let config: FileConfig = toml::from_str(
            r#"
            [[backends]]
            name = "claude-sonnet-4.5"
            tier = "jumbo"
            "#,
        )
        .unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("unknown tier"));
    }
}

//! Backend value object representing an LLM completion endpoint

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Known LLM backends (Value Object)
///
/// A backend is an opaque remote text-completion service. The concierge
/// never looks inside a backend; it only routes prompts to one and reads
/// the text that comes back. Capability and cost metadata live in the
/// [`RoutingTable`](crate::routing::RoutingTable), not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Backend {
    // Claude backends
    ClaudeOpus46,
    ClaudeSonnet45,
    ClaudeHaiku45,
    // GPT backends
    Gpt52,
    Gpt5Mini,
    // Gemini backends
    Gemini3Pro,
    // Domain-tuned backends
    MedGemma27b,
    // Custom
    Custom(String),
}

impl Backend {
    /// Get the string identifier for this backend
    pub fn as_str(&self) -> &str {
        match self {
            Backend::ClaudeOpus46 => "claude-opus-4.6",
            Backend::ClaudeSonnet45 => "claude-sonnet-4.5",
            Backend::ClaudeHaiku45 => "claude-haiku-4.5",
            Backend::Gpt52 => "gpt-5.2",
            Backend::Gpt5Mini => "gpt-5-mini",
            Backend::Gemini3Pro => "gemini-3-pro-preview",
            Backend::MedGemma27b => "medgemma-27b",
            Backend::Custom(s) => s,
        }
    }

    /// The backends a default deployment knows about
    pub fn default_backends() -> Vec<Backend> {
        vec![
            Backend::ClaudeOpus46,
            Backend::ClaudeSonnet45,
            Backend::ClaudeHaiku45,
            Backend::Gpt52,
            Backend::Gpt5Mini,
            Backend::Gemini3Pro,
            Backend::MedGemma27b,
        ]
    }

    /// Check if this is a Claude backend
    pub fn is_claude(&self) -> bool {
        matches!(
            self,
            Backend::ClaudeOpus46 | Backend::ClaudeSonnet45 | Backend::ClaudeHaiku45
        )
    }

    /// Check if this is a GPT backend
    pub fn is_gpt(&self) -> bool {
        matches!(self, Backend::Gpt52 | Backend::Gpt5Mini)
    }

    /// Check if this is a Gemini-family backend
    pub fn is_gemini(&self) -> bool {
        matches!(self, Backend::Gemini3Pro | Backend::MedGemma27b)
    }
}

impl Default for Backend {
    /// Returns the default backend (Claude Sonnet 4.5)
    fn default() -> Self {
        Backend::ClaudeSonnet45
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Backend {
    fn from_name(s: &str) -> Self {
        match s {
            "claude-opus-4.6" => Backend::ClaudeOpus46,
            "claude-sonnet-4.5" => Backend::ClaudeSonnet45,
            "claude-haiku-4.5" => Backend::ClaudeHaiku45,
            "gpt-5.2" => Backend::Gpt52,
            "gpt-5-mini" => Backend::Gpt5Mini,
            "gemini-3-pro-preview" => Backend::Gemini3Pro,
            "medgemma-27b" => Backend::MedGemma27b,
            other => Backend::Custom(other.to_string()),
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl Serialize for Backend {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Backend {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Backend::from_name(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_roundtrip() {
        for backend in Backend::default_backends() {
            let s = backend.to_string();
            let parsed: Backend = s.parse().unwrap();
            assert_eq!(backend, parsed);
        }
    }

    #[test]
    fn test_custom_backend() {
        let backend: Backend = "local-llama-70b".parse().unwrap();
        assert_eq!(backend, Backend::Custom("local-llama-70b".to_string()));
        assert_eq!(backend.to_string(), "local-llama-70b");
    }

    #[test]
    fn test_backend_family_detection() {
        assert!(Backend::ClaudeOpus46.is_claude());
        assert!(Backend::Gpt52.is_gpt());
        assert!(Backend::Gemini3Pro.is_gemini());
        assert!(!Backend::ClaudeHaiku45.is_gpt());
    }
}

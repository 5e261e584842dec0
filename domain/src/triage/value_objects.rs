//! Triage value objects - the immutable classification record and its axes.
//!
//! A [`Triage`] is produced exactly once per request by the
//! [`Classifier`](crate::triage::Classifier) and is never mutated
//! afterwards. Every axis is a closed enum so that invalid states are
//! unrepresentable.

use crate::core::backend::Backend;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much reasoning a request demands - drives backend tier selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Complexity::Simple => write!(f, "simple"),
            Complexity::Medium => write!(f, "medium"),
            Complexity::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Complexity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" | "s" => Ok(Complexity::Simple),
            "medium" | "m" => Ok(Complexity::Medium),
            "high" | "h" => Ok(Complexity::High),
            _ => Err(format!("Invalid Complexity: {}", s)),
        }
    }
}

/// Subject area of a request - drives backend specialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Technical,
    Medical,
    #[default]
    General,
}

impl Domain {
    /// Check whether this is a specialized (non-general) domain
    pub fn is_specialized(&self) -> bool {
        !matches!(self, Domain::General)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Technical => write!(f, "technical"),
            Domain::Medical => write!(f, "medical"),
            Domain::General => write!(f, "general"),
        }
    }
}

impl std::str::FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "technical" | "tech" => Ok(Domain::Technical),
            "medical" | "med" => Ok(Domain::Medical),
            "general" => Ok(Domain::General),
            _ => Err(format!("Invalid Domain: {}", s)),
        }
    }
}

/// How quickly a request needs an answer
///
/// `Critical` short-circuits cost optimization everywhere it is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Urgency {
    /// Check if this is the critical level
    pub fn is_critical(&self) -> bool {
        matches!(self, Urgency::Critical)
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Low => write!(f, "low"),
            Urgency::Medium => write!(f, "medium"),
            Urgency::High => write!(f, "high"),
            Urgency::Critical => write!(f, "critical"),
        }
    }
}

/// Presentation shape the answer should take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputShape {
    #[default]
    PlainText,
    Table,
    StructuredSections,
    EnumeratedList,
}

impl fmt::Display for OutputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputShape::PlainText => write!(f, "plain_text"),
            OutputShape::Table => write!(f, "table"),
            OutputShape::StructuredSections => write!(f, "structured_sections"),
            OutputShape::EnumeratedList => write!(f, "enumerated_list"),
        }
    }
}

/// Emotional register the answer should carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalTone {
    Empathetic,
    Professional,
    Playful,
}

impl fmt::Display for EmotionalTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmotionalTone::Empathetic => write!(f, "empathetic"),
            EmotionalTone::Professional => write!(f, "professional"),
            EmotionalTone::Playful => write!(f, "playful"),
        }
    }
}

/// Maximum number of extracted keywords a triage carries
pub const MAX_KEYWORDS: usize = 10;

/// The up-front classification of one request
///
/// Produced once by the classifier, consumed by the strategy selector,
/// executor prompts and the response enhancer. Immutable by construction:
/// all fields are exposed but the value is never rebuilt mid-request.
///
/// Invariants: `confidence` ∈ [0, 1]; `keywords.len()` ≤ [`MAX_KEYWORDS`],
/// insertion order is relevance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triage {
    /// Reasoning demand of the request
    pub complexity: Complexity,
    /// Subject area of the request
    pub domain: Domain,
    /// How quickly an answer is needed
    pub urgency: Urgency,
    /// Whether the request references visual input (image, scan, diagram)
    pub requires_vision: bool,
    /// Presentation shape the answer should take
    pub output_shape: OutputShape,
    /// Emotional register, when one could be inferred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotional_tone: Option<EmotionalTone>,
    /// Extracted keywords, most relevant first
    pub keywords: Vec<String>,
    /// Advisory backend choice; the strategy selector may override it
    pub suggested_backend: Backend,
    /// Classifier confidence in this triage
    pub confidence: f32,
}

impl Triage {
    /// The triage returned for an empty or whitespace-only query
    pub fn default_for_empty(suggested_backend: Backend) -> Self {
        Self {
            complexity: Complexity::Simple,
            domain: Domain::General,
            urgency: Urgency::Low,
            requires_vision: false,
            output_shape: OutputShape::PlainText,
            emotional_tone: None,
            keywords: Vec::new(),
            suggested_backend,
            confidence: 0.5,
        }
    }

    /// Clamp confidence into [0, 1] and cap keywords at [`MAX_KEYWORDS`]
    pub fn normalized(mut self) -> Self {
        self.confidence = self.confidence.clamp(0.0, 1.0);
        self.keywords.truncate(MAX_KEYWORDS);
        self
    }
}

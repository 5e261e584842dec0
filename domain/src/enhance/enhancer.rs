//! Response enhancement - presentation hints applied after execution.
//!
//! The enhancer never invokes a backend and never alters factual content.
//! It flags shape mismatches for the renderer, prefixes tone, and applies
//! cosmetic terminology highlighting.

use crate::triage::{Domain, EmotionalTone, OutputShape, Triage};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Glossary terms highlighted per domain (cosmetic markdown bold)
const TECHNICAL_GLOSSARY: &[&str] = &["latency", "throughput", "architecture", "deployment"];
const MEDICAL_GLOSSARY: &[&str] = &["diagnosis", "symptoms", "treatment", "medication"];

/// Presentation metadata produced alongside the enhanced text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnhancementMetadata {
    /// Set when the text does not already match the requested shape;
    /// the renderer should coerce it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_hint: Option<OutputShape>,
    /// The tone prefix that was applied, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone_applied: Option<EmotionalTone>,
    /// Terms that were highlighted
    pub highlighted_terms: Vec<String>,
}

/// An enhanced response: adjusted text plus its presentation metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enhanced {
    pub text: String,
    pub metadata: EnhancementMetadata,
}

/// Applies presentation hints to a final response text
pub struct ResponseEnhancer;

impl ResponseEnhancer {
    pub fn new() -> Self {
        Self
    }

    /// Enhance a response for presentation. Applies, in order: format
    /// coercion hints, tone prefixing, terminology highlighting.
    pub fn enhance(&self, text: &str, triage: &Triage) -> Enhanced {
        let mut metadata = EnhancementMetadata::default();

        if !Self::matches_shape(text, triage.output_shape) {
            metadata.format_hint = Some(triage.output_shape);
        }

        let mut out = text.to_string();
        match triage.emotional_tone {
            Some(EmotionalTone::Empathetic) => {
                out = format!(
                    "I understand this can feel overwhelming. Let's take it step by step.\n\n{}",
                    out
                );
                metadata.tone_applied = Some(EmotionalTone::Empathetic);
            }
            Some(EmotionalTone::Playful) => {
                out = format!("Great question! {}", out);
                metadata.tone_applied = Some(EmotionalTone::Playful);
            }
            Some(EmotionalTone::Professional) | None => {}
        }

        let (highlighted, terms) = Self::highlight_terms(&out, triage.domain);
        out = highlighted;
        metadata.highlighted_terms = terms;

        Enhanced {
            text: out,
            metadata,
        }
    }

    /// Whether the text already looks like the requested shape
    fn matches_shape(text: &str, shape: OutputShape) -> bool {
        match shape {
            OutputShape::PlainText => true,
            OutputShape::Table => text.contains('|'),
            OutputShape::EnumeratedList => text.lines().any(|l| {
                let t = l.trim_start();
                t.starts_with("- ")
                    || t.starts_with("* ")
                    || t.chars().next().is_some_and(|c| c.is_ascii_digit())
            }),
            OutputShape::StructuredSections => text.lines().any(|l| l.trim_start().starts_with('#')),
        }
    }

    /// Bold the first occurrence of each domain glossary term.
    ///
    /// Cosmetic only: the surrounding text is untouched, so meaning is
    /// preserved.
    fn highlight_terms(text: &str, domain: Domain) -> (String, Vec<String>) {
        let glossary = match domain {
            Domain::Technical => TECHNICAL_GLOSSARY,
            Domain::Medical => MEDICAL_GLOSSARY,
            Domain::General => return (text.to_string(), Vec::new()),
        };

        let mut out = text.to_string();
        let mut highlighted = Vec::new();
        for term in glossary {
            let pattern = Regex::new(&format!(r"(?i)\b({})\b", regex::escape(term)))
                .expect("glossary term pattern is valid");
            if pattern.is_match(&out) {
                out = pattern.replace(&out, "**$1**").into_owned();
                highlighted.push(term.to_string());
            }
        }
        (out, highlighted)
    }
}

impl Default for ResponseEnhancer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::Backend;
    use crate::triage::{Complexity, Urgency};

    fn triage_with(shape: OutputShape, tone: Option<EmotionalTone>, domain: Domain) -> Triage {
        Triage {
            complexity: Complexity::Medium,
            domain,
            urgency: Urgency::Medium,
            requires_vision: false,
            output_shape: shape,
            emotional_tone: tone,
            keywords: vec![],
            suggested_backend: Backend::default(),
            confidence: 0.7,
        }
    }

    #[test]
    fn test_table_shape_mismatch_sets_format_hint() {
        let triage = triage_with(OutputShape::Table, None, Domain::General);
        let enhanced = ResponseEnhancer::new().enhance("just prose, no table", &triage);
        assert_eq!(enhanced.metadata.format_hint, Some(OutputShape::Table));
    }

    #[test]
    fn test_existing_table_needs_no_hint() {
        let triage = triage_with(OutputShape::Table, None, Domain::General);
        let enhanced = ResponseEnhancer::new().enhance("| a | b |\n| 1 | 2 |", &triage);
        assert_eq!(enhanced.metadata.format_hint, None);
    }

    #[test]
    fn test_empathetic_tone_prepends_acknowledgment() {
        let triage = triage_with(
            OutputShape::PlainText,
            Some(EmotionalTone::Empathetic),
            Domain::General,
        );
        let enhanced = ResponseEnhancer::new().enhance("Here is the answer.", &triage);
        assert!(enhanced.text.starts_with("I understand"));
        assert!(enhanced.text.ends_with("Here is the answer."));
    }

    #[test]
    fn test_professional_tone_is_a_no_op() {
        let triage = triage_with(
            OutputShape::PlainText,
            Some(EmotionalTone::Professional),
            Domain::General,
        );
        let enhanced = ResponseEnhancer::new().enhance("Here is the answer.", &triage);
        assert_eq!(enhanced.text, "Here is the answer.");
        assert_eq!(enhanced.metadata.tone_applied, None);
    }

    #[test]
    fn test_highlighting_is_cosmetic() {
        let triage = triage_with(OutputShape::PlainText, None, Domain::Technical);
        let enhanced =
            ResponseEnhancer::new().enhance("The latency improved after deployment.", &triage);
        assert!(enhanced.text.contains("**latency**"));
        assert!(enhanced.text.contains("**deployment**"));
        // Stripping the markers recovers the original text exactly
        assert_eq!(
            enhanced.text.replace("**", ""),
            "The latency improved after deployment."
        );
    }

    #[test]
    fn test_general_domain_highlights_nothing() {
        let triage = triage_with(OutputShape::PlainText, None, Domain::General);
        let enhanced =
            ResponseEnhancer::new().enhance("The latency improved after deployment.", &triage);
        assert!(enhanced.metadata.highlighted_terms.is_empty());
        assert!(!enhanced.text.contains("**"));
    }

    #[test]
    fn test_list_detection() {
        let triage = triage_with(OutputShape::EnumeratedList, None, Domain::General);
        let listed = ResponseEnhancer::new().enhance("1. first\n2. second", &triage);
        assert_eq!(listed.metadata.format_hint, None);
        let prose = ResponseEnhancer::new().enhance("first then second", &triage);
        assert_eq!(
            prose.metadata.format_hint,
            Some(OutputShape::EnumeratedList)
        );
    }
}

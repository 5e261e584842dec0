//! Request classifier - the cheap, deterministic triage step.
//!
//! Runs on every request before any backend is contacted, so it must stay
//! pure (no I/O, no randomness) and fast (single pass over the text plus a
//! handful of substring scans). It never fails: the worst case for any
//! input is the default triage.

use super::lexicon;
use super::value_objects::{
    Complexity, Domain, EmotionalTone, MAX_KEYWORDS, OutputShape, Triage, Urgency,
};
use crate::core::query::{Query, Turn};
use crate::routing::RoutingTable;
use regex::Regex;
use std::sync::Arc;

/// How many trailing user turns the tone step inspects
const TONE_HISTORY_WINDOW: usize = 3;

/// Token-count ceiling below which interrogative queries count as simple
const SIMPLE_TOKEN_LIMIT: usize = 10;

/// Token-count floor above which queries count as high complexity
const HIGH_TOKEN_THRESHOLD: usize = 30;

/// Minimum keyword length kept during extraction
const MIN_KEYWORD_LEN: usize = 4;

/// Classifies a request into a [`Triage`] record.
///
/// Holds the read-only routing table (for the backend-suggestion step)
/// and the compiled pattern sets. Construction compiles the regexes once;
/// classification itself is allocation-light and deterministic.
pub struct Classifier {
    table: Arc<RoutingTable>,
    interrogative_opener: Regex,
    word_splitter: Regex,
}

impl Classifier {
    pub fn new(table: Arc<RoutingTable>) -> Self {
        Self {
            table,
            // Questions that open with an interrogative or auxiliary verb
            interrogative_opener: Regex::new(
                r"(?i)^\s*(what|when|where|who|which|is|are|can|do|does|how)\b",
            )
            .expect("interrogative opener pattern is valid"),
            word_splitter: Regex::new(r"[^a-z0-9']+").expect("word splitter pattern is valid"),
        }
    }

    /// Classify a request into a triage record.
    ///
    /// `context` is an optional caller-supplied domain hint (e.g. which
    /// knowledge base the conversation started from); `history` is the
    /// prior conversation, oldest first.
    pub fn classify(&self, query: &Query, context: Option<&str>, history: &[Turn]) -> Triage {
        if query.is_blank() {
            let suggested = self.table.suggest(
                Complexity::Simple,
                Domain::General,
                Urgency::Low,
                false,
            );
            return Triage::default_for_empty(suggested);
        }

        let text = query.content();
        let lower = text.to_lowercase();
        let token_count = text.split_whitespace().count();

        let (complexity, confidence) = self.classify_complexity(&lower, token_count);
        let domain = self.classify_domain(&lower, context);
        let urgency = self.classify_urgency(&lower, complexity);
        let output_shape = self.classify_output_shape(&lower, complexity);
        let keywords = self.extract_keywords(&lower);
        let requires_vision = lexicon::contains_any(&lower, lexicon::VISION_TERMS);
        let emotional_tone = self.classify_tone(&lower, history);
        let suggested_backend = self
            .table
            .suggest(complexity, domain, urgency, requires_vision);

        Triage {
            complexity,
            domain,
            urgency,
            requires_vision,
            output_shape,
            emotional_tone: Some(emotional_tone),
            keywords,
            suggested_backend,
            confidence,
        }
        .normalized()
    }

    /// Step 1: complexity, first match wins
    fn classify_complexity(&self, lower: &str, token_count: usize) -> (Complexity, f32) {
        let simple_opener =
            self.interrogative_opener.is_match(lower) && token_count < SIMPLE_TOKEN_LIMIT;
        if simple_opener || lexicon::contains_any(lower, lexicon::FAQ_PHRASES) {
            return (Complexity::Simple, 0.9);
        }

        if lexicon::contains_any(lower, lexicon::HIGH_COMPLEXITY_TERMS)
            || token_count > HIGH_TOKEN_THRESHOLD
        {
            return (Complexity::High, 0.85);
        }

        (Complexity::Medium, 0.7)
    }

    /// Step 2: domain by keyword score, context hint breaks ties
    fn classify_domain(&self, lower: &str, context: Option<&str>) -> Domain {
        let technical = lexicon::match_count(lower, lexicon::TECHNICAL_TERMS);
        let medical = lexicon::match_count(lower, lexicon::MEDICAL_TERMS);

        if technical > medical {
            return Domain::Technical;
        }
        if medical > technical {
            return Domain::Medical;
        }

        // Tie (including zero-zero): fall back to the caller's hint
        if let Some(hint) = context {
            let hint = hint.to_lowercase();
            if hint.contains("medical") || hint.contains("clinical") {
                return Domain::Medical;
            }
            if hint.contains("technical") || hint.contains("engineering") {
                return Domain::Technical;
            }
        }

        Domain::General
    }

    /// Step 3: urgency, critical set first
    fn classify_urgency(&self, lower: &str, complexity: Complexity) -> Urgency {
        if lexicon::contains_any(lower, lexicon::CRITICAL_TERMS) {
            return Urgency::Critical;
        }
        if lexicon::contains_any(lower, lexicon::HIGH_PRIORITY_TERMS) {
            return Urgency::High;
        }
        if complexity == Complexity::Simple {
            return Urgency::Low;
        }
        Urgency::Medium
    }

    /// Step 4: preferred output shape
    fn classify_output_shape(&self, lower: &str, complexity: Complexity) -> OutputShape {
        if lexicon::contains_any(lower, lexicon::COMPARISON_TERMS) {
            return OutputShape::Table;
        }
        if lexicon::contains_any(lower, lexicon::ENUMERATION_TERMS) {
            return OutputShape::EnumeratedList;
        }
        if complexity == Complexity::High && lexicon::contains_any(lower, lexicon::STRUCTURED_TERMS)
        {
            return OutputShape::StructuredSections;
        }
        OutputShape::PlainText
    }

    /// Step 5: keyword extraction preserving first-seen order
    fn extract_keywords(&self, lower: &str) -> Vec<String> {
        let mut keywords: Vec<String> = Vec::new();
        for token in self.word_splitter.split(lower) {
            if token.len() < MIN_KEYWORD_LEN {
                continue;
            }
            if lexicon::STOP_WORDS.contains(&token) {
                continue;
            }
            if keywords.iter().any(|k| k == token) {
                continue;
            }
            keywords.push(token.to_string());
            if keywords.len() == MAX_KEYWORDS {
                break;
            }
        }
        keywords
    }

    /// Step 7: emotional tone, current query first, then recent user turns
    fn classify_tone(&self, lower: &str, history: &[Turn]) -> EmotionalTone {
        if lexicon::contains_any(lower, lexicon::CONFUSION_TERMS) {
            return EmotionalTone::Empathetic;
        }

        let exclamations = lower.matches('!').count();
        if exclamations >= 2 || lexicon::contains_any(lower, lexicon::EXCITEMENT_TERMS) {
            return EmotionalTone::Playful;
        }

        // Confusion in recent user turns propagates empathy across the
        // conversation even when the current query reads neutral.
        let recent_confusion = history
            .iter()
            .rev()
            .filter(|t| t.is_user())
            .take(TONE_HISTORY_WINDOW)
            .any(|t| lexicon::contains_any(&t.content.to_lowercase(), lexicon::CONFUSION_TERMS));
        if recent_confusion {
            return EmotionalTone::Empathetic;
        }

        EmotionalTone::Professional
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::Backend;

    fn classifier() -> Classifier {
        Classifier::new(Arc::new(RoutingTable::default()))
    }

    #[test]
    fn test_office_hours_is_simple_low() {
        let triage = classifier().classify(&Query::new("What are your office hours?"), None, &[]);
        assert_eq!(triage.complexity, Complexity::Simple);
        assert_eq!(triage.urgency, Urgency::Low);
        assert!((triage.confidence - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_comprehensive_comparison_is_high_with_table_shape() {
        let query = Query::new(
            "Please comprehensively analyze and compare the architecture trade-offs \
             of these two approaches",
        );
        let triage = classifier().classify(&query, None, &[]);
        assert_eq!(triage.complexity, Complexity::High);
        assert_eq!(triage.domain, Domain::Technical);
        assert!(matches!(
            triage.output_shape,
            OutputShape::Table | OutputShape::StructuredSections
        ));
    }

    #[test]
    fn test_emergency_is_critical_regardless_of_length() {
        let triage = classifier().classify(
            &Query::new("emergency, the patient is unresponsive"),
            None,
            &[],
        );
        assert_eq!(triage.urgency, Urgency::Critical);
    }

    #[test]
    fn test_empty_query_yields_default_triage() {
        let triage = classifier().classify(&Query::new("   "), None, &[]);
        assert_eq!(triage.complexity, Complexity::Simple);
        assert_eq!(triage.domain, Domain::General);
        assert_eq!(triage.urgency, Urgency::Low);
        assert_eq!(triage.output_shape, OutputShape::PlainText);
        assert!((triage.confidence - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let c = classifier();
        let query = Query::new("Compare the latency of these two database designs quickly");
        let history = vec![Turn::user("earlier question"), Turn::assistant("answer")];
        let a = c.classify(&query, Some("technical"), &history);
        let b = c.classify(&query, Some("technical"), &history);
        assert_eq!(a, b);
    }

    #[test]
    fn test_domain_tie_uses_context_hint() {
        let c = classifier();
        let query = Query::new("Can you explain this result in more detail for me?");
        assert_eq!(
            c.classify(&query, Some("medical records"), &[]).domain,
            Domain::Medical
        );
        assert_eq!(
            c.classify(&query, Some("engineering docs"), &[]).domain,
            Domain::Technical
        );
        assert_eq!(c.classify(&query, None, &[]).domain, Domain::General);
    }

    #[test]
    fn test_keyword_extraction_dedup_and_cap() {
        let c = classifier();
        let query = Query::new(
            "database database schema schema migration rollout alpha bravo charlie delta \
             echo foxtrot golf hotel india juliett",
        );
        let triage = c.classify(&query, None, &[]);
        assert!(triage.keywords.len() <= MAX_KEYWORDS);
        assert_eq!(triage.keywords[0], "database");
        assert_eq!(
            triage.keywords.iter().filter(|k| *k == "database").count(),
            1
        );
    }

    #[test]
    fn test_keywords_drop_stop_words_and_short_tokens() {
        let triage = classifier().classify(
            &Query::new("what is the best way to fix a bug in my api"),
            None,
            &[],
        );
        assert!(!triage.keywords.iter().any(|k| k == "the"));
        assert!(!triage.keywords.iter().any(|k| k == "api")); // 3 chars
        assert!(triage.keywords.iter().any(|k| k == "best"));
    }

    #[test]
    fn test_vision_detection() {
        let triage = classifier().classify(
            &Query::new("Can you look at this x-ray scan of my wrist?"),
            None,
            &[],
        );
        assert!(triage.requires_vision);
        let table = RoutingTable::default();
        assert!(
            table
                .profile(&triage.suggested_backend)
                .unwrap()
                .supports_vision
        );
    }

    #[test]
    fn test_confused_query_gets_empathetic_tone() {
        let triage = classifier().classify(
            &Query::new("I'm confused, this still doesn't make sense to me at all"),
            None,
            &[],
        );
        assert_eq!(triage.emotional_tone, Some(EmotionalTone::Empathetic));
    }

    #[test]
    fn test_confusion_in_history_propagates_empathy() {
        let history = vec![
            Turn::user("I don't understand this part"),
            Turn::assistant("Let me explain."),
        ];
        let triage = classifier().classify(
            &Query::new("Could you go over the second section again"),
            None,
            &history,
        );
        assert_eq!(triage.emotional_tone, Some(EmotionalTone::Empathetic));
    }

    #[test]
    fn test_excited_query_gets_playful_tone() {
        let triage =
            classifier().classify(&Query::new("This is awesome!! Tell me more!!"), None, &[]);
        assert_eq!(triage.emotional_tone, Some(EmotionalTone::Playful));
    }

    #[test]
    fn test_default_tone_is_professional() {
        let triage = classifier().classify(
            &Query::new("Summarize the deployment requirements for the new service"),
            None,
            &[],
        );
        assert_eq!(triage.emotional_tone, Some(EmotionalTone::Professional));
    }

    #[test]
    fn test_enumeration_shape() {
        let triage = classifier().classify(
            &Query::new("Give me the steps to renew a prescription"),
            None,
            &[],
        );
        assert_eq!(triage.output_shape, OutputShape::EnumeratedList);
    }

    #[test]
    fn test_critical_suggestion_is_highest_capability() {
        let triage = classifier().classify(
            &Query::new("urgent: severe bleeding after the accident"),
            None,
            &[],
        );
        assert_eq!(triage.suggested_backend, Backend::ClaudeOpus46);
    }

    #[test]
    fn test_confidence_always_in_unit_interval() {
        let queries = [
            "",
            "hi",
            "What are your office hours?",
            "Compare and evaluate everything comprehensively please with great detail",
            "emergency!!",
        ];
        let c = classifier();
        for q in queries {
            let triage = c.classify(&Query::new(q), None, &[]);
            assert!((0.0..=1.0).contains(&triage.confidence), "query: {:?}", q);
        }
    }
}

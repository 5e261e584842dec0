//! Keyword sets backing the triage classifier.
//!
//! Plain string-matching heuristics, kept deliberately: the classifier
//! contract allows a model-based implementation to replace them without
//! touching any other component.

/// Phrases that mark a query as a simple FAQ-style request
pub(crate) const FAQ_PHRASES: &[&str] = &[
    "office hours",
    "opening hours",
    "how much",
    "price",
    "cost of",
    "contact",
    "phone number",
    "thank you",
    "thanks",
    "hello",
    "where are you located",
];

/// Verbs that indicate a high-complexity request
pub(crate) const HIGH_COMPLEXITY_TERMS: &[&str] = &[
    "analyze",
    "analyse",
    "compare",
    "evaluate",
    "comprehensive",
    "comprehensively",
    "architect",
    "trade-off",
    "tradeoff",
    "optimize",
    "in depth",
];

/// Technical-domain vocabulary
pub(crate) const TECHNICAL_TERMS: &[&str] = &[
    "code",
    "api",
    "server",
    "database",
    "deploy",
    "deployment",
    "architecture",
    "software",
    "system design",
    "bug",
    "compile",
    "latency",
    "network",
    "algorithm",
    "infrastructure",
    "kubernetes",
    "microservice",
    "backend",
    "frontend",
    "refactor",
];

/// Medical-domain vocabulary
pub(crate) const MEDICAL_TERMS: &[&str] = &[
    "symptom",
    "symptoms",
    "diagnosis",
    "patient",
    "treatment",
    "medication",
    "dose",
    "dosage",
    "pain",
    "fever",
    "doctor",
    "blood",
    "therapy",
    "chronic",
    "infection",
    "allergy",
    "prescription",
    "vaccine",
    "injury",
    "clinical",
];

/// Terms that force critical urgency
pub(crate) const CRITICAL_TERMS: &[&str] = &[
    "emergency",
    "urgent",
    "urgently",
    "life-threatening",
    "unresponsive",
    "unconscious",
    "severe bleeding",
    "chest pain",
    "overdose",
    "can't breathe",
    "cannot breathe",
];

/// Terms that raise urgency to high without being critical
pub(crate) const HIGH_PRIORITY_TERMS: &[&str] = &[
    "asap",
    "right away",
    "as soon as possible",
    "quickly",
    "deadline",
    "today",
    "immediately",
];

/// Terms that ask for a comparison-shaped answer
pub(crate) const COMPARISON_TERMS: &[&str] = &[
    "compare",
    "comparison",
    "versus",
    " vs ",
    "difference between",
    "pros and cons",
    "trade-off",
    "tradeoff",
];

/// Terms that ask for an enumerated answer
pub(crate) const ENUMERATION_TERMS: &[&str] =
    &["list", "steps", "types", "kinds", "options", "ways to", "examples of"];

/// Terms triggering structured sections at high complexity
pub(crate) const STRUCTURED_TERMS: &[&str] = &["comprehensive", "comprehensively", "analyze", "analyse"];

/// Terms that mark visual input
pub(crate) const VISION_TERMS: &[&str] = &[
    "image",
    "picture",
    "photo",
    "scan",
    "x-ray",
    "xray",
    "mri",
    "diagram",
    "screenshot",
    "chart",
    "attached file",
];

/// Terms that indicate the user is confused or struggling
pub(crate) const CONFUSION_TERMS: &[&str] = &[
    "confused",
    "don't understand",
    "do not understand",
    "doesn't make sense",
    "unclear",
    "i'm lost",
    "i am lost",
    "frustrated",
    "what do you mean",
];

/// Terms that indicate excitement
pub(crate) const EXCITEMENT_TERMS: &[&str] =
    &["awesome", "amazing", "so cool", "excited", "love it", "can't wait"];

/// Stop words dropped during keyword extraction
pub(crate) const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "your", "all", "can", "had", "her", "was",
    "one", "our", "out", "has", "have", "him", "his", "how", "its", "may", "new", "now", "old",
    "see", "two", "way", "who", "did", "get", "said", "each", "she", "that", "this", "with",
    "from", "they", "will", "would", "there", "their", "what", "about", "which", "when", "them",
    "some", "were", "these", "than", "then", "into", "could", "should", "also", "more", "other",
    "please", "does", "where", "why",
];

/// Check whether any term from a set appears in the lower-cased text
pub(crate) fn contains_any(lower_text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| lower_text.contains(t))
}

/// Count how many terms from a set appear in the lower-cased text
pub(crate) fn match_count(lower_text: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|t| lower_text.contains(*t)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_any() {
        assert!(contains_any("this is an emergency call", CRITICAL_TERMS));
        assert!(!contains_any("a calm question", CRITICAL_TERMS));
    }

    #[test]
    fn test_match_count_scores_each_term_once() {
        let text = "the api server and the database server";
        // "api", "server", "database" each count once regardless of repeats
        assert_eq!(match_count(text, TECHNICAL_TERMS), 3);
    }
}

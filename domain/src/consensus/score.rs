//! Consensus scoring - a [0, 1] measure of agreement across responses.
//!
//! When every response carries a self-reported confidence the score is
//! their arithmetic mean. Otherwise agreement is approximated by averaged
//! pairwise token-set Jaccard similarity. The lexical overlap is a
//! documented placeholder for semantic similarity: an embedding-based
//! comparator can replace it behind the same `score()` contract without
//! touching any caller.

use crate::collab::AgentResponse;
use std::collections::BTreeSet;

/// Tokens at or below this length are ignored by the lexical comparison
const MIN_TOKEN_LEN: usize = 4;

/// Agreement score for a set of responses.
///
/// - A single response scores exactly 1.0 by definition.
/// - An empty slice scores 0.0 (callers pass at least one response).
pub fn score(responses: &[AgentResponse]) -> f32 {
    match responses.len() {
        0 => 0.0,
        1 => 1.0,
        _ => {
            if let Some(mean) = mean_confidence(responses) {
                mean
            } else {
                mean_pairwise_similarity(responses)
            }
        }
    }
}

/// Arithmetic mean of self-reported confidences, if all are present
fn mean_confidence(responses: &[AgentResponse]) -> Option<f32> {
    let mut sum = 0.0f32;
    for response in responses {
        sum += response.confidence?;
    }
    Some((sum / responses.len() as f32).clamp(0.0, 1.0))
}

/// Average Jaccard similarity over every pair of responses
fn mean_pairwise_similarity(responses: &[AgentResponse]) -> f32 {
    let token_sets: Vec<BTreeSet<String>> =
        responses.iter().map(|r| token_set(&r.content)).collect();

    let mut total = 0.0f32;
    let mut pairs = 0u32;
    for i in 0..token_sets.len() {
        for j in (i + 1)..token_sets.len() {
            total += jaccard(&token_sets[i], &token_sets[j]);
            pairs += 1;
        }
    }

    if pairs == 0 {
        0.0
    } else {
        (total / pairs as f32).clamp(0.0, 1.0)
    }
}

/// Lower-cased content tokens longer than [`MIN_TOKEN_LEN`]
fn token_set(content: &str) -> BTreeSet<String> {
    content
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > MIN_TOKEN_LEN)
        .map(|t| t.to_string())
        .collect()
}

fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f32 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f32 / union as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::Backend;
    use crate::plan::AgentRole;

    fn response(content: &str) -> AgentResponse {
        AgentResponse::success(
            AgentRole::specialist(Backend::default(), "assess"),
            content,
            10,
            0.01,
        )
    }

    #[test]
    fn test_single_response_scores_exactly_one() {
        assert_eq!(score(&[response("any answer at all")]), 1.0);
    }

    #[test]
    fn test_empty_input_scores_zero() {
        assert_eq!(score(&[]), 0.0);
    }

    #[test]
    fn test_mean_of_self_reported_confidences() {
        let responses = vec![
            response("a").with_confidence(0.8),
            response("b").with_confidence(0.6),
        ];
        assert!((score(&responses) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_lexical_fallback_when_any_confidence_missing() {
        // One missing confidence forces the lexical path
        let responses = vec![
            response("administer antibiotics before surgery").with_confidence(0.9),
            response("administer antibiotics before surgery"),
        ];
        assert!((score(&responses) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_identical_texts_score_one() {
        let responses = vec![
            response("increase the connection timeout setting"),
            response("increase the connection timeout setting"),
        ];
        assert!((score(&responses) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        let responses = vec![
            response("database sharding improves throughput"),
            response("penguins prefer colder climates"),
        ];
        assert_eq!(score(&responses), 0.0);
    }

    #[test]
    fn test_short_tokens_are_ignored() {
        // Every token is <= 4 chars, so both sets are empty: no overlap signal
        let responses = vec![response("it is ok to go"), response("it is ok to go")];
        assert_eq!(score(&responses), 0.0);
    }

    #[test]
    fn test_score_bounds_hold_for_partial_overlap() {
        let responses = vec![
            response("restart the ingestion service and check the queue depth"),
            response("check the queue depth after restarting ingestion"),
            response("the queue looks healthy, restart nothing"),
        ];
        let s = score(&responses);
        assert!((0.0..=1.0).contains(&s));
        assert!(s > 0.0);
    }
}

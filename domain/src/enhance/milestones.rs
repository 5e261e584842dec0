//! Milestone follow-up suggestions.
//!
//! Canned follow-up prompts surfaced at fixed turn-count thresholds,
//! keyed by the triage domain. Pure: the same inputs always produce the
//! same suggestions.

use crate::core::query::Turn;
use crate::triage::{Domain, Triage};

/// Turn counts at which a suggestion unlocks
const THRESHOLDS: [usize; 3] = [3, 5, 7];

/// Maximum number of suggestions returned
const MAX_SUGGESTIONS: usize = 3;

/// Follow-up prompts for the current turn count.
///
/// One suggestion per reached threshold, keyed by domain, capped at
/// [`MAX_SUGGESTIONS`]. Suggestions whose text already appears in the
/// conversation history are skipped.
pub fn milestone_suggestions(turn_count: usize, history: &[Turn], triage: &Triage) -> Vec<String> {
    let mut suggestions = Vec::new();

    for (i, threshold) in THRESHOLDS.iter().enumerate() {
        if turn_count < *threshold {
            break;
        }
        let suggestion = suggestion_for(triage.domain, i);
        if history.iter().any(|t| t.content == suggestion) {
            continue;
        }
        suggestions.push(suggestion);
        if suggestions.len() == MAX_SUGGESTIONS {
            break;
        }
    }

    suggestions
}

fn suggestion_for(domain: Domain, tier: usize) -> String {
    let text = match (domain, tier) {
        (Domain::Medical, 0) => "Would you like a summary of what we've covered about your symptoms?",
        (Domain::Medical, 1) => "Should I list questions worth asking your doctor?",
        (Domain::Medical, _) => "Want me to put together a printable overview of this conversation?",
        (Domain::Technical, 0) => "Want a quick recap of the decisions made so far?",
        (Domain::Technical, 1) => "Should I draft an implementation checklist from this discussion?",
        (Domain::Technical, _) => "Would a written design summary of this thread be useful?",
        (Domain::General, 0) => "Would a short summary of our conversation help?",
        (Domain::General, 1) => "Is there a related topic you'd like to explore next?",
        (Domain::General, _) => "Want me to condense everything so far into key takeaways?",
    };
    text.to_string()
}

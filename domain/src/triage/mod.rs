//! Triage - the cheap up-front classification of a request.
//!
//! [`Classifier::classify`] turns a raw query (plus optional context hint
//! and conversation history) into a [`Triage`] record, which the strategy
//! selector then maps onto a collaboration plan.

mod classifier;
mod lexicon;
mod value_objects;

pub use classifier::Classifier;
pub use value_objects::{
    Complexity, Domain, EmotionalTone, MAX_KEYWORDS, OutputShape, Triage, Urgency,
};

//! Presentation-side post-processing of final responses.

mod enhancer;
mod milestones;

pub use enhancer::{Enhanced, EnhancementMetadata, ResponseEnhancer};
pub use milestones::milestone_suggestions;

//! Agreement scoring and synthesis parsing for ensemble responses.

mod parsing;
mod score;

pub use parsing::parse_confidence;
pub use score::score;

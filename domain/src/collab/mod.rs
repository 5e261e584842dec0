//! Collaboration outcome types shared between the executor and the caller.

mod value_objects;

pub use value_objects::{AgentResponse, CollaborationResult};

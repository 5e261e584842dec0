//! Collaboration planning - roles, plans and the strategy selector.

mod selector;
mod value_objects;

pub use selector::{StrategySelector, rules};
pub use value_objects::{AgentRole, CollaborationPlan, ExecutionMode, RoleKind};

//! Routing and cost table for the backend fleet.

mod table;

pub use table::{BackendProfile, CapabilityTier, RoutingTable};

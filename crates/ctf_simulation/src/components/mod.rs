//! ECS components for match entities
//!
//! - agent: Team, AgentId, Agent, AgentStatus, VisualState
//! - movement: NavPath
//! - world: FieldGeometry, Zone

pub mod agent;
pub mod movement;
pub mod world;

pub use agent::*;
pub use movement::*;
pub use world::*;

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Variable timestep, validated and clamped at the entry point
//! - No wall-clock reads and no randomness (the bundled autopilot keeps
//!   its own seeded RNG outside the sim)
//! - Stable iteration order (agents by index, projectiles by spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod error;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{elastic_collide, reflect_velocity, wall_rebound};
pub use error::{SimError, SimResult};
pub use snapshot::{AgentView, MatchEvent, MatchSnapshot, ProjectileView};
pub use state::{Agent, AgentId, Body, MatchPhase, MatchState, Projectile};
pub use tick::AgentInput;

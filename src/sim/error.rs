//! Simulation error types

use thiserror::Error;

/// Convenience alias for fallible sim operations
pub type SimResult<T> = std::result::Result<T, SimError>;

/// Errors surfaced by `MatchState::advance`
///
/// The state is left untouched when any of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SimError {
    /// Timestep was NaN, infinite, or negative
    #[error("invalid timestep {dt}: must be finite and non-negative")]
    InvalidTimestep { dt: f32 },
    /// A controller produced a non-finite aim angle
    #[error("agent {agent} aim angle {aim} is not finite")]
    InvalidAim { agent: usize, aim: f32 },
}

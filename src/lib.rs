//! Recoil Duel - a two-player combat sim in a circular arena
//!
//! Firing is the only source of thrust: every shot kicks the shooter
//! backward, so moving and attacking are the same decision. When the match
//! clock runs out the arena wall turns lethal and closes in.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, match state)
//! - `control`: Controller seam and the bundled autopilot

pub mod control;
pub mod sim;

pub use control::{Controller, Gunner, HoldFire};
pub use sim::{AgentId, AgentInput, MatchEvent, MatchSnapshot, MatchState, SimError};

/// Match tuning constants
pub mod consts {
    /// Fixed timestep used by the demo loop (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Arena dimensions
    pub const ARENA_BASE_RADIUS: f32 = 250.0;
    pub const ARENA_MIN_RADIUS: f32 = 50.0;
    /// Wall closing speed during sudden death (units per second)
    pub const ARENA_SHRINK_RATE: f32 = 10.0;

    /// Match clock (seconds until sudden death)
    pub const MATCH_DURATION: f32 = 60.0;

    /// Agent defaults - spawns are mirrored on the x axis, facing inward
    pub const AGENT_RADIUS: f32 = 20.0;
    pub const AGENT_MAX_HEALTH: u8 = 10;
    pub const AGENT_SPAWN_OFFSET: f32 = 150.0;

    /// Weapon
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 800.0;
    /// Muzzle distance beyond the shooter's own radius
    pub const MUZZLE_CLEARANCE: f32 = 10.0;
    /// Instantaneous kickback per shot, opposite the aim direction
    pub const RECOIL_IMPULSE: f32 = 50.0;

    /// Heat model
    pub const HEAT_PER_SHOT: f32 = 0.15;
    /// Forced cooldown rate while overheated (heat per second)
    pub const OVERHEAT_COOLDOWN_RATE: f32 = 1.0 / 3.0;
    /// Seconds without firing before heat starts to drain
    pub const IDLE_DRAIN_DELAY: f32 = 2.0;
    pub const IDLE_DRAIN_RATE: f32 = 0.5;

    /// Post-shot steering assist
    pub const STEER_WINDOW: f32 = 0.15;
    pub const STEER_RATE: f32 = 5.0;

    /// Largest timestep advance() will integrate; bigger values clamp
    pub const MAX_DT: f32 = 0.1;
}

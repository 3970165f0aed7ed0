//! Controller seam between the sim and whoever plays it
//!
//! Controllers consume snapshots and return orders; they never touch the
//! match directly. The sim stays deterministic no matter what a controller
//! does - at worst it aims badly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{AgentId, AgentInput, MatchSnapshot};

/// Decides one agent's orders each tick from the latest snapshot
pub trait Controller: Send {
    fn name(&self) -> &str;
    fn decide(&mut self, snapshot: &MatchSnapshot, me: AgentId) -> AgentInput;
}

/// Inert baseline: keeps the current aim and never fires
pub struct HoldFire;

impl Controller for HoldFire {
    fn name(&self) -> &str {
        "hold_fire"
    }

    fn decide(&mut self, snapshot: &MatchSnapshot, me: AgentId) -> AgentInput {
        AgentInput {
            aim: snapshot.agents[me].aim,
            fire: false,
        }
    }
}

/// Default per-tick fire probability for [`Gunner`]
const DEFAULT_FIRE_CHANCE: f32 = 0.02;

/// The bundled autopilot: tracks the opponent every tick and squeezes off
/// shots at random while the gun is cool. All of its randomness comes from
/// its own seeded generator, so a rematch with the same seeds replays
/// identically.
pub struct Gunner {
    rng: Pcg32,
    fire_chance: f32,
}

impl Gunner {
    pub fn new(seed: u64) -> Self {
        Self::with_fire_chance(seed, DEFAULT_FIRE_CHANCE)
    }

    /// Same autopilot, different trigger discipline
    pub fn with_fire_chance(seed: u64, fire_chance: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            fire_chance,
        }
    }
}

impl Controller for Gunner {
    fn name(&self) -> &str {
        "gunner"
    }

    fn decide(&mut self, snapshot: &MatchSnapshot, me: AgentId) -> AgentInput {
        let my = &snapshot.agents[me];
        let them = snapshot.opponent_of(me);
        let to_them = them.pos - my.pos;
        let aim = to_them.y.atan2(to_them.x);

        // Draw every tick so the stream advances uniformly regardless of
        // gun state.
        let roll = self.rng.random::<f32>();
        let fire = !my.overheated && roll < self.fire_chance;

        AgentInput { aim, fire }
    }
}

//! Match tick: validation, agent updates, projectile flight, resolution,
//! win handling
//!
//! `advance` is the single entry point. Callers own frame pacing; any dt
//! within the validated range integrates correctly, and the same dt/input
//! sequence always replays to the same states.

use glam::Vec2;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::collision;
use super::error::{SimError, SimResult};
use super::snapshot::{MatchEvent, MatchSnapshot};
use super::state::{Agent, MatchPhase, MatchState, Projectile};
use crate::consts::*;

/// One agent's orders for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentInput {
    /// Desired aim angle in radians
    pub aim: f32,
    /// Trigger held this tick. Level-sampled: holding it fires every
    /// eligible tick, with heat as the rate limiter.
    pub fire: bool,
}

impl MatchState {
    /// Advance the match by `dt` seconds with both agents' orders.
    ///
    /// Runs the whole frame in fixed order: clock and arena, agents in
    /// roster order, projectile flight, collision resolution, pruning, win
    /// check. The returned snapshot is the committed post-tick state plus
    /// everything that happened during the call.
    ///
    /// Returns an error (state untouched) for a non-finite or negative
    /// `dt` and for non-finite aim angles. Oversized timesteps clamp to
    /// `MAX_DT` so a stalled caller cannot tunnel bodies through the wall.
    pub fn advance(&mut self, dt: f32, inputs: &[AgentInput; 2]) -> SimResult<MatchSnapshot> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SimError::InvalidTimestep { dt });
        }
        for (id, input) in inputs.iter().enumerate() {
            if !input.aim.is_finite() {
                return Err(SimError::InvalidAim {
                    agent: id,
                    aim: input.aim,
                });
            }
        }
        let dt = if dt > MAX_DT {
            warn!("clamping oversized timestep {dt} to {MAX_DT}");
            MAX_DT
        } else {
            dt
        };

        let mut events = Vec::new();
        self.tick += 1;

        // Clock first. Sudden death begins on the tick the countdown
        // crosses zero; the wall starts moving the tick after.
        if self.clock > 0.0 {
            self.clock -= dt;
            if self.clock <= 0.0 {
                self.clock = 0.0;
                self.phase = MatchPhase::SuddenDeath;
                events.push(MatchEvent::SuddenDeath);
                info!("sudden death at tick {}: the wall is closing in", self.tick);
            }
        } else if self.sudden_death() {
            self.arena_radius =
                (self.arena_radius - ARENA_SHRINK_RATE * dt).max(ARENA_MIN_RADIUS);
        }

        let sudden_death = self.sudden_death();
        for (agent, input) in self.agents.iter_mut().zip(inputs.iter()) {
            if let Some(proj) = update_agent(agent, input, dt, sudden_death) {
                events.push(MatchEvent::ShotFired { agent: agent.id });
                self.projectiles.push(proj);
            }
        }

        for proj in &mut self.projectiles {
            proj.body.integrate(dt);
        }

        collision::resolve(self, &mut events);

        // Last one standing (or nobody) ends the round and re-racks.
        if self.alive_count() <= 1 {
            let winner = self.agents.iter().find(|a| a.alive()).map(|a| a.id);
            match winner {
                Some(id) => info!("agent {id} takes the round at tick {}", self.tick),
                None => info!("round ends in a draw at tick {}", self.tick),
            }
            events.push(MatchEvent::MatchOver { winner });
            self.reset_round();
        }

        Ok(MatchSnapshot::capture(self, events))
    }
}

/// One agent's frame: fire resolution first (it is input handling), then
/// post-shot steering, integration, and heat bookkeeping. Returns the
/// projectile when the agent fired.
fn update_agent(
    agent: &mut Agent,
    input: &AgentInput,
    dt: f32,
    sudden_death: bool,
) -> Option<Projectile> {
    if !agent.alive() {
        return None;
    }

    agent.aim = input.aim;

    let fired = if input.fire && agent.can_fire(sudden_death) {
        Some(fire(agent))
    } else {
        None
    };

    // While the window is open, swing the velocity toward the aim at a
    // rate proportional to dt. The dt clamp keeps the factor below 1.
    if agent.steer_window > 0.0 {
        agent.steer_window -= dt;
        let speed = agent.body.speed();
        if speed > 0.0 {
            let target = Vec2::from_angle(agent.aim) * speed;
            agent.body.vel += (target - agent.body.vel) * (STEER_RATE * dt);
        }
    }

    agent.body.integrate(dt);

    agent.since_last_shot += dt;
    if agent.overheated {
        // Forced cooldown runs all the way to zero before the trigger
        // works again.
        agent.heat -= dt * OVERHEAT_COOLDOWN_RATE;
        if agent.heat <= 0.0 {
            agent.heat = 0.0;
            agent.overheated = false;
        }
    } else if agent.since_last_shot > IDLE_DRAIN_DELAY && agent.heat > 0.0 {
        agent.heat = (agent.heat - IDLE_DRAIN_RATE * dt).max(0.0);
    }

    fired
}

/// The shot itself: muzzle spawn, recoil kick opposite the aim, steering
/// window opened, gun heated.
fn fire(agent: &mut Agent) -> Projectile {
    let proj = Projectile::fired_by(agent);

    let dir = Vec2::from_angle(agent.aim);
    agent.body.vel -= dir * RECOIL_IMPULSE;
    agent.steer_window = STEER_WINDOW;
    agent.heat += HEAT_PER_SHOT;
    if agent.heat >= 1.0 {
        agent.heat = 1.0;
        agent.overheated = true;
    }
    agent.since_last_shot = 0.0;

    proj
}

//! Match state and core entity types
//!
//! Everything `advance` mutates lives here. All of it is serializable so a
//! match can be checkpointed and resumed deterministically.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Index into the match roster; doubles as projectile ownership
pub type AgentId = usize;

/// Shared kinematic core for anything that moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Euler step
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Distance from the arena center
    #[inline]
    pub fn dist_from_center(&self) -> f32 {
        self.pos.length()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// One combatant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub body: Body,
    /// Aim direction in radians, overwritten from controller input each tick
    pub aim: f32,
    /// Hit points; the agent is alive while this is above zero
    pub health: u8,
    /// Weapon heat in [0, 1]
    pub heat: f32,
    /// Locked out of firing until heat cools all the way back to zero
    pub overheated: bool,
    /// Seconds since the last shot (drives idle heat drain)
    pub since_last_shot: f32,
    /// Seconds of post-shot steering assist remaining
    pub steer_window: f32,
}

impl Agent {
    /// Spawn at the mirrored arena position for this id, facing the opponent
    pub fn spawn(id: AgentId) -> Self {
        let side = if id == 0 { -1.0 } else { 1.0 };
        Self {
            id,
            body: Body::new(
                Vec2::new(side * AGENT_SPAWN_OFFSET, 0.0),
                Vec2::ZERO,
                AGENT_RADIUS,
            ),
            aim: if id == 0 { 0.0 } else { std::f32::consts::PI },
            health: AGENT_MAX_HEALTH,
            heat: 0.0,
            overheated: false,
            since_last_shot: 0.0,
            steer_window: 0.0,
        }
    }

    #[inline]
    pub fn alive(&self) -> bool {
        self.health > 0
    }

    /// Eligible to fire this tick (dead, overheated, and sudden-death
    /// agents all have their trigger disabled)
    #[inline]
    pub fn can_fire(&self, sudden_death: bool) -> bool {
        self.alive() && !self.overheated && !sudden_death
    }
}

/// A fired round - constant velocity, removed on its first contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    pub owner: AgentId,
    /// Set by the resolver, pruned at the end of the tick
    pub should_remove: bool,
}

impl Projectile {
    /// Muzzle spawn: just past the shooter's radius, full speed along aim
    pub fn fired_by(agent: &Agent) -> Self {
        let dir = Vec2::from_angle(agent.aim);
        Self {
            body: Body::new(
                agent.body.pos + dir * (agent.body.radius + MUZZLE_CLEARANCE),
                dir * PROJECTILE_SPEED,
                PROJECTILE_RADIUS,
            ),
            owner: agent.id,
            should_remove: false,
        }
    }
}

/// Which regime the match clock is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Clock counting down, wall bounces
    Countdown,
    /// Clock expired, wall kills on contact and closes in
    SuddenDeath,
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Run seed, recorded so a replay can name the run it came from
    pub seed: u64,
    /// Both combatants, indexed by `AgentId`
    pub agents: [Agent; 2],
    /// Live projectiles in spawn order
    pub projectiles: Vec<Projectile>,
    /// Current wall radius
    pub arena_radius: f32,
    /// Seconds left until sudden death
    pub clock: f32,
    pub phase: MatchPhase,
    /// Ticks advanced since creation; survives round resets
    pub tick: u64,
}

impl MatchState {
    /// Fresh match: agents at spawn, full clock, full-size arena
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            agents: [Agent::spawn(0), Agent::spawn(1)],
            projectiles: Vec::new(),
            arena_radius: ARENA_BASE_RADIUS,
            clock: MATCH_DURATION,
            phase: MatchPhase::Countdown,
            tick: 0,
        }
    }

    /// Round reset after a win or draw: everything back to spawn except
    /// the seed and the tick counter
    pub fn reset_round(&mut self) {
        self.agents = [Agent::spawn(0), Agent::spawn(1)];
        self.projectiles.clear();
        self.arena_radius = ARENA_BASE_RADIUS;
        self.clock = MATCH_DURATION;
        self.phase = MatchPhase::Countdown;
    }

    #[inline]
    pub fn sudden_death(&self) -> bool {
        self.phase == MatchPhase::SuddenDeath
    }

    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.alive()).count()
    }
}

//! Read-only views handed to controllers and frontends
//!
//! Snapshots are plain data: serializable, cheap to clone, and carrying the
//! tick's events so a frontend can drive presentation without diffing state.
//! Nothing in here feeds back into the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Agent, AgentId, MatchState, Projectile};

/// Everything notable that happened during one advance call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// An agent fired: projectile spawned, recoil applied
    ShotFired { agent: AgentId },
    /// A projectile struck an opposing agent
    Hit { owner: AgentId, target: AgentId },
    /// Non-lethal wall contact (push-back, rebound if outbound)
    WallContact { agent: AgentId },
    /// The sudden-death wall caught an agent
    WallElimination { agent: AgentId },
    /// The two agents bounced off each other
    AgentsCollided,
    /// The clock ran out; the wall is now lethal
    SuddenDeath,
    /// Round ended; `None` is a draw. The snapshot carrying this event
    /// already shows the reset state of the next round.
    MatchOver { winner: Option<AgentId> },
}

/// Agent state as seen from the outside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub id: AgentId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub aim: f32,
    pub health: u8,
    pub heat: f32,
    pub overheated: bool,
    pub alive: bool,
}

impl From<&Agent> for AgentView {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            pos: agent.body.pos,
            vel: agent.body.vel,
            aim: agent.aim,
            health: agent.health,
            heat: agent.heat,
            overheated: agent.overheated,
            alive: agent.alive(),
        }
    }
}

/// Projectile state as seen from the outside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: AgentId,
}

impl From<&Projectile> for ProjectileView {
    fn from(proj: &Projectile) -> Self {
        Self {
            pos: proj.body.pos,
            vel: proj.body.vel,
            owner: proj.owner,
        }
    }
}

/// Full picture of one committed tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub seed: u64,
    pub tick: u64,
    /// Seconds left until sudden death (0 once it starts)
    pub clock: f32,
    pub arena_radius: f32,
    pub sudden_death: bool,
    pub agents: [AgentView; 2],
    pub projectiles: Vec<ProjectileView>,
    /// What happened during the tick that produced this snapshot
    pub events: Vec<MatchEvent>,
}

impl MatchSnapshot {
    pub(crate) fn capture(state: &MatchState, events: Vec<MatchEvent>) -> Self {
        Self {
            seed: state.seed,
            tick: state.tick,
            clock: state.clock,
            arena_radius: state.arena_radius,
            sudden_death: state.sudden_death(),
            agents: [(&state.agents[0]).into(), (&state.agents[1]).into()],
            projectiles: state.projectiles.iter().map(Into::into).collect(),
            events,
        }
    }

    /// The other combatant. `me` must be a valid roster index (0 or 1).
    pub fn opponent_of(&self, me: AgentId) -> &AgentView {
        &self.agents[1 - me]
    }
}

impl MatchState {
    /// Event-free view of the current state, e.g. to seed controllers
    /// before the first tick
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::capture(self, Vec::new())
    }
}

//! Collision detection and response
//!
//! Everything is circles: agents and projectiles against the arena wall
//! (containment, not exclusion) and against each other. The resolver runs
//! in a fixed order every tick: wall/agent, wall/projectile,
//! projectile/agent, agent/agent, then pruning. The order is load-bearing;
//! a projectile marked at the wall can still land its hit in the same tick.

use glam::Vec2;

use super::snapshot::MatchEvent;
use super::state::{Body, MatchState};

/// Distances below this are treated as coincident (no defined normal)
const GEOM_EPS: f32 = 1e-6;

/// Reflect velocity off a surface: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// How far a body pokes past the arena boundary (positive = breach)
#[inline]
pub fn wall_breach(body: &Body, arena_radius: f32) -> f32 {
    body.dist_from_center() + body.radius - arena_radius
}

/// Circle overlap test on squared distances
#[inline]
pub fn circles_touch(a: &Body, b: &Body) -> bool {
    let reach = a.radius + b.radius;
    a.pos.distance_squared(b.pos) < reach * reach
}

/// Non-lethal wall response: snap the body back onto the boundary, then
/// reflect the velocity only if it still points outward. Inbound bodies
/// keep their velocity and just get the position correction.
///
/// A body sitting exactly on the arena center has no defined normal and is
/// left alone for the tick.
pub fn wall_rebound(body: &mut Body, arena_radius: f32) {
    let dist = body.dist_from_center();
    if dist <= GEOM_EPS {
        return;
    }
    let normal = body.pos / dist;
    body.pos = normal * (arena_radius - body.radius);
    if body.vel.dot(normal) > 0.0 {
        body.vel = reflect_velocity(body.vel, normal);
    }
}

/// Equal-mass elastic response between two overlapping circles: separate
/// them half-and-half along the center line, then swap the velocity
/// components along that line. Tangential components are untouched, so
/// momentum and kinetic energy are both conserved.
///
/// Coincident centers have no defined normal; the pair is left alone for
/// the tick rather than being separated in an arbitrary direction.
pub fn elastic_collide(a: &mut Body, b: &mut Body) {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    if dist <= GEOM_EPS {
        return;
    }
    let normal = delta / dist;

    let overlap = (a.radius + b.radius) - dist;
    a.pos -= normal * (overlap / 2.0);
    b.pos += normal * (overlap / 2.0);

    let a_along = a.vel.dot(normal);
    let b_along = b.vel.dot(normal);
    a.vel += (b_along - a_along) * normal;
    b.vel += (a_along - b_along) * normal;
}

/// One full resolution pass over the match, in fixed order. Appends an
/// event for every contact a frontend would present.
pub(crate) fn resolve(state: &mut MatchState, events: &mut Vec<MatchEvent>) {
    let sudden_death = state.sudden_death();
    let arena_radius = state.arena_radius;

    // 1. Wall vs agent. During sudden death the boundary kills outright;
    //    otherwise it corrects position and bounces outbound motion.
    for agent in &mut state.agents {
        if wall_breach(&agent.body, arena_radius) > 0.0 {
            if sudden_death {
                if agent.alive() {
                    events.push(MatchEvent::WallElimination { agent: agent.id });
                }
                agent.health = 0;
            } else {
                wall_rebound(&mut agent.body, arena_radius);
                events.push(MatchEvent::WallContact { agent: agent.id });
            }
        }
    }

    // 2. Wall vs projectile: mark only, pruning happens last.
    for proj in &mut state.projectiles {
        if wall_breach(&proj.body, arena_radius) >= 0.0 {
            proj.should_remove = true;
        }
    }

    // 3. Projectile vs agent. Owners are immune to their own rounds and a
    //    projectile damages at most one agent.
    for proj in &mut state.projectiles {
        for agent in &mut state.agents {
            if agent.id == proj.owner || !agent.alive() {
                continue;
            }
            if circles_touch(&proj.body, &agent.body) {
                agent.health = agent.health.saturating_sub(1);
                proj.should_remove = true;
                events.push(MatchEvent::Hit {
                    owner: proj.owner,
                    target: agent.id,
                });
                break;
            }
        }
    }

    // 4. Agent vs agent, only while both are alive.
    let [a, b] = &mut state.agents;
    if a.alive() && b.alive() && circles_touch(&a.body, &b.body) {
        elastic_collide(&mut a.body, &mut b.body);
        events.push(MatchEvent::AgentsCollided);
    }

    // 5. Prune everything marked above.
    state.projectiles.retain(|p| !p.should_remove);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Projectile;

    fn body_at(x: f32, y: f32, vx: f32, vy: f32, radius: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(vx, vy), radius)
    }

    #[test]
    fn test_reflect_velocity() {
        // Moving right into a wall whose normal points left
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_wall_rebound_snaps_to_boundary() {
        // Radius-20 body at distance 235 in a 250 arena pokes out by 5
        let mut body = body_at(235.0, 0.0, 50.0, 0.0, 20.0);
        assert!(wall_breach(&body, 250.0) > 0.0);

        wall_rebound(&mut body, 250.0);
        assert!((body.dist_from_center() - 230.0).abs() < 0.001);
        // Outbound velocity got reflected straight back
        assert!((body.vel.x - (-50.0)).abs() < 0.001);
    }

    #[test]
    fn test_wall_rebound_keeps_inbound_velocity() {
        let mut body = body_at(235.0, 0.0, -30.0, 10.0, 20.0);
        wall_rebound(&mut body, 250.0);

        assert!((body.dist_from_center() - 230.0).abs() < 0.001);
        assert_eq!(body.vel, Vec2::new(-30.0, 10.0));
    }

    #[test]
    fn test_wall_rebound_preserves_speed() {
        let mut body = body_at(170.0, 170.0, 80.0, 45.0, 20.0);
        let speed_before = body.speed();
        wall_rebound(&mut body, 230.0);
        assert!((body.speed() - speed_before).abs() < 0.01);
    }

    #[test]
    fn test_wall_breach_inside_is_negative() {
        let body = body_at(0.0, 100.0, 0.0, 0.0, 20.0);
        assert!(wall_breach(&body, 250.0) < 0.0);
    }

    #[test]
    fn test_elastic_head_on_swaps_velocities() {
        let mut a = body_at(-10.0, 0.0, 5.0, 0.0, 20.0);
        let mut b = body_at(10.0, 0.0, -3.0, 0.0, 20.0);

        elastic_collide(&mut a, &mut b);

        // Overlap of 20 split evenly: both pushed out to just touching
        assert!((a.pos.x - (-20.0)).abs() < 0.001);
        assert!((b.pos.x - 20.0).abs() < 0.001);
        // Head-on equal masses trade velocities outright
        assert!((a.vel.x - (-3.0)).abs() < 0.001);
        assert!((b.vel.x - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_elastic_preserves_tangential() {
        let mut a = body_at(-10.0, 0.0, 5.0, 7.0, 20.0);
        let mut b = body_at(10.0, 0.0, -3.0, -2.0, 20.0);

        elastic_collide(&mut a, &mut b);

        // Normal is the x axis, so y components ride through unchanged
        assert!((a.vel.y - 7.0).abs() < 0.001);
        assert!((b.vel.y - (-2.0)).abs() < 0.001);
    }

    #[test]
    fn test_elastic_conserves_momentum_and_energy() {
        let mut a = body_at(3.0, 4.0, 120.0, -35.0, 20.0);
        let mut b = body_at(30.0, -10.0, -60.0, 80.0, 20.0);
        let p_before = a.vel + b.vel;
        let ke_before = a.vel.length_squared() + b.vel.length_squared();

        elastic_collide(&mut a, &mut b);

        let p_after = a.vel + b.vel;
        let ke_after = a.vel.length_squared() + b.vel.length_squared();
        assert!((p_before - p_after).length() < 0.01);
        assert!((ke_before - ke_after).abs() / ke_before < 1e-4);
    }

    #[test]
    fn test_coincident_centers_skip_response() {
        let mut a = body_at(50.0, 50.0, 10.0, 0.0, 20.0);
        let mut b = body_at(50.0, 50.0, -10.0, 0.0, 20.0);

        elastic_collide(&mut a, &mut b);

        // No finite normal, so nothing moves and nothing goes NaN
        assert_eq!(a.pos, Vec2::new(50.0, 50.0));
        assert_eq!(b.pos, Vec2::new(50.0, 50.0));
        assert!(a.vel.x.is_finite() && b.vel.x.is_finite());
    }

    #[test]
    fn test_resolve_owner_is_immune() {
        let mut state = MatchState::new(0);
        let mut proj = Projectile::fired_by(&state.agents[0]);
        proj.body.pos = state.agents[0].body.pos; // dead center on the owner
        state.projectiles.push(proj);

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert_eq!(state.agents[0].health, 10);
        assert_eq!(state.projectiles.len(), 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_resolve_hit_damages_and_prunes() {
        let mut state = MatchState::new(0);
        let mut proj = Projectile::fired_by(&state.agents[0]);
        proj.body.pos = state.agents[1].body.pos + Vec2::new(20.0, 0.0);
        state.projectiles.push(proj);

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert_eq!(state.agents[1].health, 9);
        assert!(state.projectiles.is_empty());
        assert!(events.contains(&MatchEvent::Hit { owner: 0, target: 1 }));
    }

    #[test]
    fn test_resolve_dead_agents_not_hit() {
        let mut state = MatchState::new(0);
        state.agents[1].health = 0;
        let mut proj = Projectile::fired_by(&state.agents[0]);
        proj.body.pos = state.agents[1].body.pos;
        state.projectiles.push(proj);

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert!(events.is_empty());
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_resolve_wall_marked_projectile_still_hits() {
        let mut state = MatchState::new(0);
        state.arena_radius = 100.0;
        // Agent pressed against the wall, projectile overlapping both
        state.agents[1].body.pos = Vec2::new(78.0, 0.0);
        let mut proj = Projectile::fired_by(&state.agents[0]);
        proj.body.pos = Vec2::new(97.0, 0.0);
        state.projectiles.push(proj);

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert_eq!(state.agents[1].health, 9);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_resolve_countdown_wall_bounces() {
        let mut state = MatchState::new(0);
        state.agents[0].body.pos = Vec2::new(-235.0, 0.0);
        state.agents[0].body.vel = Vec2::new(-40.0, 0.0);

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert_eq!(state.agents[0].health, 10);
        assert!((state.agents[0].body.dist_from_center() - 230.0).abs() < 0.001);
        assert!((state.agents[0].body.vel.x - 40.0).abs() < 0.001);
        assert!(events.contains(&MatchEvent::WallContact { agent: 0 }));
    }

    #[test]
    fn test_resolve_sudden_death_wall_kills() {
        let mut state = MatchState::new(0);
        state.phase = crate::sim::MatchPhase::SuddenDeath;
        state.clock = 0.0;
        state.agents[0].body.pos = Vec2::new(-235.0, 0.0);

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert_eq!(state.agents[0].health, 0);
        // No push-back on a kill: the body stays where the wall caught it
        assert_eq!(state.agents[0].body.pos, Vec2::new(-235.0, 0.0));
        assert!(events.contains(&MatchEvent::WallElimination { agent: 0 }));
    }

    #[test]
    fn test_resolve_agents_bounce_apart() {
        let mut state = MatchState::new(0);
        state.agents[0].body.pos = Vec2::new(-15.0, 0.0);
        state.agents[0].body.vel = Vec2::new(60.0, 0.0);
        state.agents[1].body.pos = Vec2::new(15.0, 0.0);
        state.agents[1].body.vel = Vec2::ZERO;

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        // Full velocity transfer into the stationary agent
        assert!((state.agents[0].body.vel.x - 0.0).abs() < 0.001);
        assert!((state.agents[1].body.vel.x - 60.0).abs() < 0.001);
        let gap = state.agents[1].body.pos.x - state.agents[0].body.pos.x;
        assert!((gap - 40.0).abs() < 0.001);
        assert!(events.contains(&MatchEvent::AgentsCollided));
    }
}

//! Headless exhibition match
//!
//! Runs the bundled autopilots against each other at the standard tick rate,
//! then prints a season summary and the final snapshot as JSON. The seed
//! comes from the first argument, so the same invocation replays the same
//! season tick for tick.

use recoil_duel::consts::SIM_DT;
use recoil_duel::{Controller, Gunner, MatchEvent, MatchState};

/// Rounds to play before the summary
const ROUNDS: u32 = 5;
/// Hard tick cap in case a round refuses to end
const MAX_TICKS: u64 = 200_000;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(2024);
    log::info!("starting exhibition season, seed {seed}");

    let mut state = MatchState::new(seed);
    let mut controllers: [Box<dyn Controller>; 2] = [
        Box::new(Gunner::new(seed)),
        Box::new(Gunner::new(seed.wrapping_add(0x9E37_79B9))),
    ];
    log::info!(
        "{} (agent 0) vs {} (agent 1)",
        controllers[0].name(),
        controllers[1].name()
    );

    let mut snapshot = state.snapshot();
    let mut wins = [0u32; 2];
    let mut draws = 0u32;
    let mut shots = [0u64; 2];
    let mut hits = [0u64; 2];
    let mut rounds_played = 0u32;
    let mut ticks: u64 = 0;

    while rounds_played < ROUNDS && ticks < MAX_TICKS {
        let inputs = [
            controllers[0].decide(&snapshot, 0),
            controllers[1].decide(&snapshot, 1),
        ];
        snapshot = match state.advance(SIM_DT, &inputs) {
            Ok(snap) => snap,
            Err(err) => {
                log::error!("sim rejected the tick: {err}");
                break;
            }
        };
        ticks += 1;

        for event in &snapshot.events {
            match *event {
                MatchEvent::ShotFired { agent } => shots[agent] += 1,
                MatchEvent::Hit { owner, .. } => hits[owner] += 1,
                MatchEvent::MatchOver { winner } => {
                    rounds_played += 1;
                    match winner {
                        Some(agent) => {
                            wins[agent] += 1;
                            log::info!(
                                "round {rounds_played}: {} (agent {agent}) wins",
                                controllers[agent].name()
                            );
                        }
                        None => {
                            draws += 1;
                            log::info!("round {rounds_played}: draw");
                        }
                    }
                }
                _ => {}
            }
        }
    }

    println!(
        "season over after {ticks} ticks ({:.1}s simulated)",
        ticks as f32 * SIM_DT
    );
    for (id, controller) in controllers.iter().enumerate() {
        println!(
            "  agent {id} ({}): {} wins, {} shots fired, {} hits landed",
            controller.name(),
            wins[id],
            shots[id],
            hits[id]
        );
    }
    println!("  draws: {draws}");

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("final snapshot:\n{json}"),
        Err(err) => log::error!("could not serialize the final snapshot: {err}"),
    }
}

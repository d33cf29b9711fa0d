//! Cauldron Spin demo host
//!
//! Runs scripted brewing sessions headlessly: frames arrive at a fixed
//! display rate, the clock turns them into engine ticks, and the "player"
//! clicks at a steady rhythm until the pantry runs dry.

use cauldron_spin::platform::FixedStepClock;
use cauldron_spin::sim::{Engine, SessionObserver, SessionResult, SessionState, TickInput};
use cauldron_spin::{Pantry, Settings};

fn main() {
    env_logger::init();
    log::info!("Cauldron Spin (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Could not load {}: {}, using defaults", path, e);
                Settings::default()
            }
        },
        None => Settings::default(),
    };

    let mut engine = Engine::new(settings, Pantry::new(3), ConsoleObserver);
    let mut clock = FixedStepClock::default();

    // 60 Hz display, one click every 0.75s while stops are awaited
    let frame_dt = 1.0 / 60.0;
    let click_every = 45;
    let mut frame: u64 = 0;
    let mut pending_click = false;

    while frame < 60 * 60 {
        frame += 1;

        if engine.state() == SessionState::Idle && !engine.request_start() {
            break;
        }
        if engine.state() == SessionState::AwaitingStops && frame % click_every == 0 {
            pending_click = true;
        }

        for _ in 0..clock.accumulate(frame_dt) {
            let input = TickInput {
                activate: pending_click,
            };
            engine.tick(&input, clock.dt());
            // One-shot input
            pending_click = false;
        }
    }

    let pantry = engine.ledger();
    println!(
        "\nBrewing done: {} ingredient(s) left, {} magic earned",
        pantry.ingredients, pantry.magic
    );
}

struct ConsoleObserver;

impl SessionObserver for ConsoleObserver {
    fn session_state_changed(&mut self, state: SessionState) {
        log::info!("Session -> {:?}", state);
    }

    fn session_resolved(&mut self, result: &SessionResult) {
        let names: Vec<&str> = result
            .landed
            .iter()
            .map(|s| s.as_ref().map_or("-", |s| s.as_str()))
            .collect();
        println!("[{}] -> {:?}, +{} magic", names.join(" | "), result.tier, result.reward);
    }
}

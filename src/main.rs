//! Pixel Invaders entry point
//!
//! Headless attract-mode demo: drives the simulation with a simple autopilot
//! at a simulated 60 Hz clock, narrating events through the logger. A real
//! host would swap the autopilot for keyboard input and the log sink for a
//! renderer and an audio backend.
//!
//! Usage: `pixel-invaders [seed] [ticks]`

use std::cmp::Ordering;
use std::path::PathBuf;

use pixel_invaders::audio::{AudioSink, LogAudio};
use pixel_invaders::consts::*;
use pixel_invaders::sim::{
    ArenaConfig, GamePhase, GameState, ProjectileOwner, TickInput, tick,
};
use pixel_invaders::{HighScores, Settings};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 120);

    let settings = Settings::load(&PathBuf::from("pixel_invaders_settings.json"));
    let mut audio = LogAudio::from_settings(&settings);

    let arena = match ArenaConfig::new(ARENA_WIDTH, ARENA_HEIGHT) {
        Ok(arena) => arena,
        Err(e) => {
            log::error!("bad arena configuration: {e}");
            return;
        }
    };
    let mut state = GameState::new(arena, seed);

    log::info!("attract mode: seed {seed}, {ticks} ticks");

    let mut runs = 0u32;
    for t in 0..ticks {
        let now_ms = t as f64 * MS_PER_TICK;
        let was_playing = state.phase == GamePhase::Playing;

        let input = autopilot(&state);
        tick(&mut state, &input, now_ms);

        for event in state.drain_events() {
            audio.handle(&event);
        }
        if was_playing && state.phase == GamePhase::GameOver {
            runs += 1;
            log::info!(
                "run {runs} ended at tick {t}: score {}, wave {}",
                state.score,
                state.wave
            );
        }
    }

    let hud = state.snapshot().hud;
    log::info!(
        "attract mode done: score {}, wave {}, lives {}",
        hud.score,
        hud.wave,
        hud.lives
    );

    let score_path = PathBuf::from("pixel_invaders_highscores.json");
    let mut scores = HighScores::load(&score_path);
    if let Some(rank) = scores.add_score(hud.score, hud.wave, ticks as f64 * MS_PER_TICK) {
        log::info!("demo run ranked #{rank} (best {})", scores.best());
        scores.save(&score_path);
    }
}

/// Minimal attract-mode pilot: restart when idle, dodge the nearest incoming
/// shot, otherwise park under the closest invader column and hold fire.
fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput {
        fire: true,
        ..TickInput::default()
    };

    match state.phase {
        GamePhase::Start | GamePhase::GameOver => {
            input.start = true;
            return input;
        }
        GamePhase::Playing => {}
    }

    let cannon_center = state.cannon.pos.x + CANNON_WIDTH / 2.0;

    // Sidestep the enemy shot closest to arrival, if any is worryingly close
    let threat = state
        .projectiles
        .iter()
        .filter(|p| p.owner == ProjectileOwner::Enemy)
        .filter(|p| (p.pos.x - cannon_center).abs() < 40.0)
        .filter(|p| p.pos.y > state.cannon.pos.y - 120.0)
        .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal));
    if let Some(shot) = threat {
        if shot.pos.x >= cannon_center {
            input.left = true;
        } else {
            input.right = true;
        }
        return input;
    }

    // Track the horizontally nearest alive invader
    let target = state
        .invaders
        .iter()
        .filter(|i| i.alive)
        .min_by(|a, b| {
            let da = (a.pos.x + INVADER_WIDTH / 2.0 - cannon_center).abs();
            let db = (b.pos.x + INVADER_WIDTH / 2.0 - cannon_center).abs();
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        });
    if let Some(invader) = target {
        let target_x = invader.pos.x + INVADER_WIDTH / 2.0;
        if target_x < cannon_center - CANNON_SPEED {
            input.left = true;
        } else if target_x > cannon_center + CANNON_SPEED {
            input.right = true;
        }
    }

    input
}

//! Spawn and timing policy
//!
//! Rate-limits enemy fire, the bonus target, and the step-sound trigger with
//! explicit session timers driven by the host's monotonic clock. All
//! probability gates draw from the session's seeded RNG, so spawn behavior is
//! reproducible for a given seed and clock.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{BonusTarget, Invader, Projectile, ProjectileOwner};
use crate::consts::*;

/// Rate-limit timers, in host-clock milliseconds
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub last_enemy_shot_ms: f64,
    pub last_bonus_spawn_ms: f64,
    pub last_step_sound_ms: f64,
}

/// Attempt one enemy shot.
///
/// Gated first by a per-tick 2% draw (firing stays bursty rather than
/// metronomic), then by the 1000 ms cooldown. When both gates pass, a
/// uniformly random alive invader fires a downward projectile from its
/// bottom-center.
pub fn enemy_fire(
    invaders: &[Invader],
    timers: &mut SpawnTimers,
    rng: &mut Pcg32,
    now_ms: f64,
) -> Option<Projectile> {
    if rng.random::<f32>() >= ENEMY_FIRE_CHANCE {
        return None;
    }
    if now_ms - timers.last_enemy_shot_ms < ENEMY_FIRE_COOLDOWN_MS {
        return None;
    }

    let alive: Vec<&Invader> = invaders.iter().filter(|i| i.alive).collect();
    if alive.is_empty() {
        return None;
    }
    let shooter = alive[rng.random_range(0..alive.len())];

    timers.last_enemy_shot_ms = now_ms;
    Some(Projectile::new(
        shooter.pos + Vec2::new(INVADER_WIDTH / 2.0, INVADER_HEIGHT),
        ProjectileOwner::Enemy,
    ))
}

/// Attempt to bring the bonus target into play.
///
/// Eligible only while inactive, at least 15 s after the previous spawn, and
/// behind a 0.1% per-tick draw. Returns true when the target just activated
/// (the caller owes the audio collaborator a loop-start event).
pub fn maybe_activate_bonus(
    bonus: &mut BonusTarget,
    arena_width: f32,
    timers: &mut SpawnTimers,
    rng: &mut Pcg32,
    now_ms: f64,
) -> bool {
    if bonus.active {
        return false;
    }
    if now_ms - timers.last_bonus_spawn_ms <= BONUS_SPAWN_COOLDOWN_MS {
        return false;
    }
    if rng.random::<f32>() >= BONUS_SPAWN_CHANCE {
        return false;
    }

    bonus.activate(arena_width, rng);
    timers.last_bonus_spawn_ms = now_ms;
    true
}

/// Rate-limit the invader step sound to one trigger per
/// `500 / (1 + wave * 0.1)` ms. Consumes the window when it fires.
pub fn step_sound_ready(timers: &mut SpawnTimers, wave: u32, now_ms: f64) -> bool {
    let interval = STEP_SOUND_BASE_MS / (1.0 + wave as f64 * STEP_SOUND_WAVE_SCALE);
    if now_ms - timers.last_step_sound_ms > interval {
        timers.last_step_sound_ms = now_ms;
        true
    } else {
        false
    }
}

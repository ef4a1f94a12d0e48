//! Per-tick simulation step
//!
//! One atomic update per host frame: input, formation, projectiles, bonus
//! target, collisions, in that order. No work happens outside `Playing`
//! except reacting to the start/restart trigger.

use glam::Vec2;

use super::formation::{self, Formation};
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState, Projectile, ProjectileOwner};
use crate::consts::*;

/// Input signals for a single tick, produced by the input collaborator.
///
/// All four are level signals ("held this tick"). Fire is edge-triggered by
/// availability: a held fire button launches again as soon as the previous
/// player shot is gone, never sooner.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Start/restart trigger (only observed in `Start` and `GameOver`)
    pub start: bool,
}

/// Advance the game state by one tick.
///
/// `now_ms` is the host's monotonic clock; all rate-limit timers compare
/// against it, so tests can drive time explicitly.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    match state.phase {
        GamePhase::Start | GamePhase::GameOver => {
            if input.start {
                log::info!("starting run (seed {})", state.seed);
                state.reset();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    // 1. Held-input cannon movement, availability-gated fire
    if input.left {
        state.cannon.move_left();
    }
    if input.right {
        state.cannon.move_right(state.arena.width);
    }
    if input.fire {
        try_player_fire(state);
    }

    // 2. Formation advance, wave progression, enemy fire
    if state.alive_invaders() == 0 {
        next_wave(state);
    } else {
        let cannon_y = state.cannon.pos.y;
        let step = state
            .formation
            .advance(&mut state.invaders, &state.arena, cannon_y);

        if step.anim_toggled && spawn::step_sound_ready(&mut state.timers, state.wave, now_ms) {
            let alive = state.alive_invaders();
            state.events.push(GameEvent::InvaderStep {
                pitch: 1.0 + alive as f32 / 50.0,
            });
        }

        // Invasion reaching the cannon row ends the run immediately,
        // regardless of remaining lives
        if step.reached_cannon {
            game_over(state);
            return;
        }

        if let Some(shot) = spawn::enemy_fire(&state.invaders, &mut state.timers, &mut state.rng, now_ms)
        {
            state.projectiles.push(shot);
        }
    }

    // 3. Advance projectiles, discard off-arena ones
    for projectile in &mut state.projectiles {
        projectile.advance();
    }
    let arena_height = state.arena.height;
    state.projectiles.retain(|p| !p.is_off_arena(arena_height));

    // 4. Bonus target: advance, then gate a fresh spawn
    let bonus_was_active = state.bonus.active;
    state.bonus.advance(state.arena.width);
    if bonus_was_active && !state.bonus.active {
        state.events.push(GameEvent::BonusLoopStop);
    }
    if spawn::maybe_activate_bonus(
        &mut state.bonus,
        state.arena.width,
        &mut state.timers,
        &mut state.rng,
        now_ms,
    ) {
        state.events.push(GameEvent::BonusLoopStart);
    }

    // 5. Collision resolution against this tick's positions
    resolve_collisions(state);
}

/// Spawn a player shot if the one-live-projectile rule allows it
fn try_player_fire(state: &mut GameState) {
    if !state.cannon.can_fire {
        return;
    }
    if state
        .projectiles
        .iter()
        .any(|p| p.owner == ProjectileOwner::Player)
    {
        return;
    }

    let origin = state.cannon.pos + Vec2::new(CANNON_WIDTH / 2.0, 0.0);
    state
        .projectiles
        .push(Projectile::new(origin, ProjectileOwner::Player));
    state.events.push(GameEvent::PlayerShot);
}

/// Collision rules, in fixed order. Consumed projectiles are marked first and
/// compacted in one pass at the end, so no scan ever removes from the list it
/// is iterating.
fn resolve_collisions(state: &mut GameState) {
    let mut consumed = vec![false; state.projectiles.len()];

    // Player shots vs invaders, then the bonus target. A projectile resolves
    // at most one invader kill: first match in creation order wins.
    for (pi, shot) in state.projectiles.iter().enumerate() {
        if shot.owner != ProjectileOwner::Player {
            continue;
        }
        let shot_box = shot.bounds();

        for invader in state.invaders.iter_mut() {
            if !invader.alive {
                continue;
            }
            if shot_box.overlaps(&invader.bounds()) {
                invader.alive = false;
                consumed[pi] = true;
                state.score += invader.points();
                state.events.push(GameEvent::InvaderHit);
                break;
            }
        }
        if consumed[pi] {
            continue;
        }

        if state.bonus.active && shot_box.overlaps(&state.bonus.bounds()) {
            state.bonus.active = false;
            consumed[pi] = true;
            state.score += state.bonus.roll_points(&mut state.rng);
            state.events.push(GameEvent::BonusHit);
            state.events.push(GameEvent::BonusLoopStop);
        }
    }

    // Enemy shots vs the cannon
    let cannon_box = state.cannon.bounds();
    for (pi, shot) in state.projectiles.iter().enumerate() {
        if consumed[pi] || shot.owner != ProjectileOwner::Enemy {
            continue;
        }
        if shot.bounds().overlaps(&cannon_box) {
            consumed[pi] = true;
            state.cannon.lives = state.cannon.lives.saturating_sub(1);
            state.events.push(GameEvent::PlayerHit);
        }
    }

    // Any remaining shot vs shields, no score effect
    for (pi, shot) in state.projectiles.iter().enumerate() {
        if consumed[pi] {
            continue;
        }
        for shield in state.shields.iter_mut() {
            if shield.resolve_hit(shot) {
                consumed[pi] = true;
                break;
            }
        }
    }

    let mut idx = 0;
    state.projectiles.retain(|_| {
        let keep = !consumed[idx];
        idx += 1;
        keep
    });

    if state.cannon.lives == 0 {
        game_over(state);
    }
}

/// Roll the formation over to the next wave at its scaled speed
fn next_wave(state: &mut GameState) {
    state.wave += 1;
    state.formation = Formation::new(state.wave);
    state.invaders = formation::spawn_wave();
    state.projectiles.clear();
    log::debug!(
        "wave {} begins (formation speed {})",
        state.wave,
        state.formation.speed
    );
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    if state.bonus.active {
        state.bonus.active = false;
        state.events.push(GameEvent::BonusLoopStop);
    }
    state.events.push(GameEvent::GameOver);
    log::info!(
        "game over: score {}, wave {}, lives {}",
        state.score,
        state.wave,
        state.cannon.lives
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ArenaConfig;

    const IDLE: TickInput = TickInput {
        left: false,
        right: false,
        fire: false,
        start: false,
    };

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(ArenaConfig::default(), seed);
        tick(&mut state, &TickInput { start: true, ..IDLE }, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        state.drain_events();
        state
    }

    #[test]
    fn test_start_screen_is_inert_without_trigger() {
        let mut state = GameState::new(ArenaConfig::default(), 1);
        for t in 0..100 {
            tick(&mut state, &IDLE, t as f64 * MS_PER_TICK);
        }
        assert_eq!(state.phase, GamePhase::Start);
        assert!(state.invaders.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_start_trigger_populates_run() {
        let state = started(1);
        assert_eq!(state.invaders.len(), 55);
        assert_eq!(state.wave, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.cannon.lives, STARTING_LIVES);
        assert_eq!(state.shields.len(), SHIELD_COUNT);
    }

    #[test]
    fn test_cannon_stays_within_margins() {
        let mut state = started(2);
        let max_x = state.arena.width - CANNON_WIDTH - EDGE_MARGIN;

        let hold_left = TickInput { left: true, ..IDLE };
        for t in 1..400 {
            tick(&mut state, &hold_left, t as f64 * MS_PER_TICK);
            assert!(state.cannon.pos.x >= EDGE_MARGIN);
            if state.phase != GamePhase::Playing {
                return; // run can legitimately end under enemy fire
            }
        }

        let hold_right = TickInput { right: true, ..IDLE };
        for t in 400..800 {
            tick(&mut state, &hold_right, t as f64 * MS_PER_TICK);
            assert!(state.cannon.pos.x <= max_x);
            if state.phase != GamePhase::Playing {
                return;
            }
        }
    }

    #[test]
    fn test_single_live_player_projectile() {
        let mut state = started(3);
        let hold_fire = TickInput { fire: true, ..IDLE };
        for t in 1..600 {
            tick(&mut state, &hold_fire, t as f64 * MS_PER_TICK);
            let player_shots = state
                .projectiles
                .iter()
                .filter(|p| p.owner == ProjectileOwner::Player)
                .count();
            assert!(player_shots <= 1);
            if state.phase != GamePhase::Playing {
                return;
            }
        }
    }

    #[test]
    fn test_player_shot_kills_small_invader() {
        let mut state = started(4);

        // Drop a player shot right on the top-left of a small (30 pt) invader
        let target_idx = state
            .invaders
            .iter()
            .position(|i| i.kind == crate::sim::state::InvaderKind::Small)
            .unwrap();
        let target_pos = state.invaders[target_idx].pos;
        state
            .projectiles
            .push(Projectile::new(target_pos, ProjectileOwner::Player));

        tick(&mut state, &IDLE, MS_PER_TICK);

        assert!(!state.invaders[target_idx].alive);
        assert_eq!(state.score, 30);
        assert!(state
            .projectiles
            .iter()
            .all(|p| p.owner != ProjectileOwner::Player));
        assert!(state.events.contains(&GameEvent::InvaderHit));
    }

    #[test]
    fn test_score_increments_match_variant_values() {
        for (kind, value) in [
            (crate::sim::state::InvaderKind::Small, 30),
            (crate::sim::state::InvaderKind::Medium, 20),
            (crate::sim::state::InvaderKind::Large, 10),
        ] {
            let mut state = started(5);
            let before = state.score;
            let idx = state.invaders.iter().position(|i| i.kind == kind).unwrap();
            state.projectiles.push(Projectile::new(
                state.invaders[idx].pos,
                ProjectileOwner::Player,
            ));
            tick(&mut state, &IDLE, MS_PER_TICK);
            assert_eq!(state.score - before, value);
        }
    }

    #[test]
    fn test_one_kill_per_projectile_per_tick() {
        let mut state = started(6);

        // Stack two invaders so a single shot overlaps both
        let second = state.invaders[1].pos;
        state.invaders[0].pos = second;
        state
            .projectiles
            .push(Projectile::new(second, ProjectileOwner::Player));

        tick(&mut state, &IDLE, MS_PER_TICK);

        // First match in creation order dies; the other survives
        let dead = state.invaders.iter().filter(|i| !i.alive).count();
        assert_eq!(dead, 1);
        assert!(!state.invaders[0].alive);
        assert!(state.invaders[1].alive);
        assert_eq!(state.score, state.invaders[0].points());
    }

    #[test]
    fn test_lethal_enemy_shot_at_one_life() {
        let mut state = started(7);
        state.cannon.lives = 1;
        state
            .projectiles
            .push(Projectile::new(state.cannon.pos, ProjectileOwner::Enemy));

        tick(&mut state, &IDLE, MS_PER_TICK);

        assert_eq!(state.cannon.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PlayerHit));
        assert!(events.contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_nonlethal_hit_decrements_lives() {
        let mut state = started(8);
        state
            .projectiles
            .push(Projectile::new(state.cannon.pos, ProjectileOwner::Enemy));

        tick(&mut state, &IDLE, MS_PER_TICK);

        assert_eq!(state.cannon.lives, STARTING_LIVES - 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_cleared_formation_rolls_next_wave() {
        let mut state = started(9);
        for invader in &mut state.invaders {
            invader.alive = false;
        }
        state
            .projectiles
            .push(Projectile::new(Vec2::new(400.0, 300.0), ProjectileOwner::Enemy));

        tick(&mut state, &IDLE, MS_PER_TICK);

        assert_eq!(state.wave, 2);
        assert_eq!(state.invaders.len(), 55);
        assert!(state.invaders.iter().all(|i| i.alive));
        assert!((state.formation.speed - 0.7).abs() < 1e-6);
        // In-flight projectiles are cleared on wave roll
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = started(10);
        state.score = 1234;
        state.wave = 3;
        state.cannon.lives = 1;
        state
            .projectiles
            .push(Projectile::new(state.cannon.pos, ProjectileOwner::Enemy));
        tick(&mut state, &IDLE, MS_PER_TICK);
        assert_eq!(state.phase, GamePhase::GameOver);
        state.drain_events();

        tick(&mut state, &TickInput { start: true, ..IDLE }, 2.0 * MS_PER_TICK);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.wave, 1);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.invaders.len(), 55);
        // Cannon back at arena-center-bottom
        assert_eq!(
            state.cannon.pos,
            Vec2::new(
                state.arena.width / 2.0 - CANNON_WIDTH / 2.0,
                state.arena.height - CANNON_BOTTOM_OFFSET
            )
        );
    }

    #[test]
    fn test_bonus_kill_scores_in_range() {
        let mut state = started(11);
        state.bonus.active = true;
        state.bonus.direction = 1.0;
        state.bonus.pos = Vec2::new(400.0, BONUS_Y);
        state
            .projectiles
            .push(Projectile::new(Vec2::new(410.0, 45.0), ProjectileOwner::Player));

        tick(&mut state, &IDLE, MS_PER_TICK);

        assert!(!state.bonus.active);
        assert!((BONUS_MIN_POINTS..=BONUS_MAX_POINTS).contains(&state.score));
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::BonusHit));
        assert!(events.contains(&GameEvent::BonusLoopStop));
    }

    #[test]
    fn test_shield_absorbs_shots_without_scoring() {
        let mut state = started(12);
        // Aim an enemy shot at the first shield's top row
        let block_pos = state.shields[0].blocks[0].pos;
        state
            .projectiles
            .push(Projectile::new(block_pos - Vec2::new(0.0, 2.0), ProjectileOwner::Enemy));
        let alive_blocks = |s: &GameState| {
            s.shields[0].blocks.iter().filter(|b| b.alive).count()
        };
        let before = alive_blocks(&state);

        tick(&mut state, &IDLE, MS_PER_TICK);

        assert_eq!(before - alive_blocks(&state), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_invasion_ends_run_regardless_of_lives() {
        let mut state = started(13);
        // Park the whole formation just above the cannon row at the margin so
        // the next reversal descends into it
        let cannon_y = state.cannon.pos.y;
        for invader in &mut state.invaders {
            invader.pos.y = cannon_y - INVADER_HEIGHT - FORMATION_DESCEND_STEP + 1.0;
        }
        state.invaders[0].pos.x = state.arena.width - INVADER_WIDTH - EDGE_MARGIN - 1.0;

        let mut ended = false;
        for t in 1..50 {
            tick(&mut state, &IDLE, t as f64 * MS_PER_TICK);
            if state.phase == GamePhase::GameOver {
                ended = true;
                break;
            }
        }
        assert!(ended);
        assert_eq!(state.cannon.lives, STARTING_LIVES);
    }

    #[test]
    fn test_player_shot_emits_event_and_spawns_at_muzzle() {
        let mut state = started(14);
        let muzzle = state.cannon.pos + Vec2::new(CANNON_WIDTH / 2.0, 0.0);

        tick(&mut state, &TickInput { fire: true, ..IDLE }, MS_PER_TICK);

        let shot = state
            .projectiles
            .iter()
            .find(|p| p.owner == ProjectileOwner::Player)
            .expect("player shot in flight");
        // One advance has already happened this tick
        assert_eq!(shot.pos, muzzle + Vec2::new(0.0, PLAYER_SHOT_SPEED));
        assert!(state.drain_events().contains(&GameEvent::PlayerShot));
    }

    #[test]
    fn test_disarmed_cannon_cannot_fire() {
        let mut state = started(15);
        state.cannon.can_fire = false;
        tick(&mut state, &TickInput { fire: true, ..IDLE }, MS_PER_TICK);
        assert!(state
            .projectiles
            .iter()
            .all(|p| p.owner != ProjectileOwner::Player));
    }
}

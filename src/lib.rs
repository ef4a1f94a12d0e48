//! Pixel Invaders - a Space Invaders style arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, formation, collisions, game state)
//! - `audio`: Audio collaborator contract (fire-and-forget game events)
//! - `settings`: Volume/mute preferences
//! - `highscores`: Local top-10 leaderboard

pub mod audio;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation rate the host scheduler is expected to drive (ticks/second)
    pub const TICKS_PER_SECOND: f64 = 60.0;
    /// Milliseconds per simulation tick at the nominal rate
    pub const MS_PER_TICK: f64 = 1000.0 / TICKS_PER_SECOND;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Horizontal margin the cannon and formation may not cross
    pub const EDGE_MARGIN: f32 = 20.0;

    /// Cannon defaults
    pub const CANNON_WIDTH: f32 = 32.0;
    pub const CANNON_HEIGHT: f32 = 24.0;
    pub const CANNON_SPEED: f32 = 4.0;
    /// Vertical offset of the cannon from the arena bottom
    pub const CANNON_BOTTOM_OFFSET: f32 = 60.0;
    pub const STARTING_LIVES: u32 = 3;

    /// Projectile defaults (negative speed = upward/player-owned)
    pub const PROJECTILE_WIDTH: f32 = 3.0;
    pub const PROJECTILE_HEIGHT: f32 = 12.0;
    pub const PLAYER_SHOT_SPEED: f32 = -6.0;
    pub const ENEMY_SHOT_SPEED: f32 = 3.0;

    /// Invader defaults
    pub const INVADER_WIDTH: f32 = 32.0;
    pub const INVADER_HEIGHT: f32 = 24.0;
    /// Formation grid layout
    pub const FORMATION_COLS: usize = 11;
    pub const FORMATION_START_X: f32 = 60.0;
    pub const FORMATION_START_Y: f32 = 80.0;
    pub const FORMATION_SPACING_X: f32 = 48.0;
    pub const FORMATION_SPACING_Y: f32 = 40.0;
    /// Vertical step the whole formation takes on direction reversal
    pub const FORMATION_DESCEND_STEP: f32 = 20.0;
    /// Wave-indexed formation speed: BASE + (wave - 1) * STEP
    pub const FORMATION_BASE_SPEED: f32 = 0.5;
    pub const FORMATION_WAVE_SPEED_STEP: f32 = 0.2;
    /// Walk-cycle animation toggles every this many ticks, in lockstep
    pub const FORMATION_ANIM_PERIOD: u32 = 30;

    /// Shield defaults
    pub const SHIELD_BLOCK_SIZE: f32 = 8.0;
    pub const SHIELD_COUNT: usize = 4;
    /// Vertical offset of the shield row from the arena bottom
    pub const SHIELD_BOTTOM_OFFSET: f32 = 150.0;

    /// Bonus target (UFO) defaults
    pub const BONUS_WIDTH: f32 = 48.0;
    pub const BONUS_HEIGHT: f32 = 20.0;
    pub const BONUS_SPEED: f32 = 2.0;
    pub const BONUS_Y: f32 = 40.0;
    pub const BONUS_MIN_POINTS: u32 = 100;
    pub const BONUS_MAX_POINTS: u32 = 300;

    /// Spawn/timing policy gates
    pub const ENEMY_FIRE_COOLDOWN_MS: f64 = 1000.0;
    pub const ENEMY_FIRE_CHANCE: f32 = 0.02;
    pub const BONUS_SPAWN_COOLDOWN_MS: f64 = 15000.0;
    pub const BONUS_SPAWN_CHANCE: f32 = 0.001;
    /// Invader step sound: at most one trigger per BASE / (1 + wave * SCALE) ms
    pub const STEP_SOUND_BASE_MS: f64 = 500.0;
    pub const STEP_SOUND_WAVE_SCALE: f64 = 0.1;
}

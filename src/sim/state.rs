//! Game entities and session state
//!
//! All state that must be persisted for save/determinism lives here. The
//! `GameState` exclusively owns every entity collection; collaborators only
//! ever see read-only views of it.

use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::formation::{self, Formation};
use super::spawn::SpawnTimers;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start trigger
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for the restart trigger
    GameOver,
}

/// Discrete event notifications for the audio collaborator.
///
/// Fire-and-forget: the core never reads anything back from the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Cannon fired a shot
    PlayerShot,
    /// Formation walk-cycle advanced; pitch hint rises as invaders thin out
    InvaderStep { pitch: f32 },
    /// An invader was destroyed
    InvaderHit,
    /// The cannon was hit
    PlayerHit,
    /// Bonus target entered the arena (start the hum loop)
    BonusLoopStart,
    /// Bonus target left play for any reason (stop the hum loop)
    BonusLoopStop,
    /// Bonus target was destroyed
    BonusHit,
    /// Run ended
    GameOver,
}

/// Arena dimensions, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}

impl ArenaConfig {
    /// Validate and build an arena. Non-positive dimensions are a fatal
    /// construction error; there is no recoverable fallback.
    pub fn new(width: f32, height: f32) -> Result<Self, ArenaError> {
        if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
            return Err(ArenaError { width, height });
        }
        Ok(Self { width, height })
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Rejected arena dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaError {
    pub width: f32,
    pub height: f32,
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arena dimensions must be positive and finite, got {}x{}",
            self.width, self.height
        )
    }
}

impl std::error::Error for ArenaError {}

/// The player's cannon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cannon {
    /// Top-left corner in arena coordinates
    pub pos: Vec2,
    pub lives: u32,
    /// Fire eligibility (host can clear this to disarm, e.g. during respawn)
    pub can_fire: bool,
}

impl Cannon {
    pub fn new(arena: &ArenaConfig) -> Self {
        Self {
            pos: Vec2::new(
                arena.width / 2.0 - CANNON_WIDTH / 2.0,
                arena.height - CANNON_BOTTOM_OFFSET,
            ),
            lives: STARTING_LIVES,
            can_fire: true,
        }
    }

    /// Displace left by the fixed speed, clamped to the arena margin
    pub fn move_left(&mut self) {
        self.pos.x = (self.pos.x - CANNON_SPEED).max(EDGE_MARGIN);
    }

    /// Displace right by the fixed speed, clamped to the arena margin
    pub fn move_right(&mut self, arena_width: f32) {
        self.pos.x = (self.pos.x + CANNON_SPEED).min(arena_width - CANNON_WIDTH - EDGE_MARGIN);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(CANNON_WIDTH, CANNON_HEIGHT))
    }
}

/// Projectile ownership tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// A shot in flight, from either side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Signed vertical speed; negative moves up (player), positive down (enemy)
    pub speed: f32,
    pub owner: ProjectileOwner,
}

impl Projectile {
    pub fn new(pos: Vec2, owner: ProjectileOwner) -> Self {
        let speed = match owner {
            ProjectileOwner::Player => PLAYER_SHOT_SPEED,
            ProjectileOwner::Enemy => ENEMY_SHOT_SPEED,
        };
        Self { pos, speed, owner }
    }

    /// Advance one tick along the vertical axis
    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    /// True once the projectile has left the arena vertically
    pub fn is_off_arena(&self, arena_height: f32) -> bool {
        self.pos.y < 0.0 || self.pos.y > arena_height
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT))
    }
}

/// Invader variants, top row to bottom row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvaderKind {
    Small,
    Medium,
    Large,
}

impl InvaderKind {
    /// Point value awarded when destroyed
    pub fn points(&self) -> u32 {
        match self {
            InvaderKind::Small => 30,
            InvaderKind::Medium => 20,
            InvaderKind::Large => 10,
        }
    }

    /// Render hint: fixed per-variant color (RGB)
    pub fn color(&self) -> [u8; 3] {
        match self {
            InvaderKind::Small => [0x66, 0xFF, 0x66],
            InvaderKind::Medium => [0x00, 0xFF, 0xFF],
            InvaderKind::Large => [0xFF, 0x6B, 0xD5],
        }
    }
}

/// One member of the formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invader {
    pub pos: Vec2,
    pub kind: InvaderKind,
    /// Dead invaders are inert: no movement, no collision, no draw
    pub alive: bool,
    /// 2-frame walk-cycle index, toggled in lockstep across the formation
    pub anim_frame: u8,
}

impl Invader {
    pub fn new(pos: Vec2, kind: InvaderKind) -> Self {
        Self {
            pos,
            kind,
            alive: true,
            anim_frame: 0,
        }
    }

    pub fn points(&self) -> u32 {
        self.kind.points()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(INVADER_WIDTH, INVADER_HEIGHT))
    }
}

/// One destructible cell of a shield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShieldBlock {
    pub pos: Vec2,
    pub alive: bool,
}

impl ShieldBlock {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, alive: true }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(SHIELD_BLOCK_SIZE))
    }
}

/// Shield layout: 5 rows x 8 columns, pyramid with a central notch
const SHIELD_PATTERN: [[u8; 8]; 5] = [
    [0, 1, 1, 1, 1, 1, 1, 0],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 0, 0, 1, 1, 1],
    [1, 1, 0, 0, 0, 0, 1, 1],
];

/// A shield obstacle built from a fixed block pattern.
///
/// Blocks are created once, in row-major order, and never added afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shield {
    pub blocks: Vec<ShieldBlock>,
}

impl Shield {
    pub fn new(origin: Vec2) -> Self {
        let mut blocks = Vec::new();
        for (row, cells) in SHIELD_PATTERN.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == 1 {
                    blocks.push(ShieldBlock::new(
                        origin
                            + Vec2::new(
                                col as f32 * SHIELD_BLOCK_SIZE,
                                row as f32 * SHIELD_BLOCK_SIZE,
                            ),
                    ));
                }
            }
        }
        Self { blocks }
    }

    /// Resolve a projectile strike against this shield.
    ///
    /// Scans blocks in creation order and kills the first alive block whose
    /// bounds overlap the projectile (first-match, not nearest-match). At most
    /// one block dies per call; dead blocks never come back.
    pub fn resolve_hit(&mut self, projectile: &Projectile) -> bool {
        let shot = projectile.bounds();
        for block in &mut self.blocks {
            if block.alive && block.bounds().overlaps(&shot) {
                block.alive = false;
                return true;
            }
        }
        false
    }
}

/// The intermittent high-value bonus target (the "UFO")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusTarget {
    pub pos: Vec2,
    pub active: bool,
    /// Horizontal travel direction: -1.0 or +1.0
    pub direction: f32,
}

impl Default for BonusTarget {
    fn default() -> Self {
        Self {
            pos: Vec2::new(-BONUS_WIDTH, BONUS_Y),
            active: false,
            direction: 1.0,
        }
    }
}

impl BonusTarget {
    /// Enter the arena from a random side (50/50)
    pub fn activate(&mut self, arena_width: f32, rng: &mut Pcg32) {
        self.active = true;
        self.direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.pos.x = if self.direction > 0.0 {
            -BONUS_WIDTH
        } else {
            arena_width
        };
        self.pos.y = BONUS_Y;
    }

    /// Advance one tick; deactivates once fully off-arena on either side
    pub fn advance(&mut self, arena_width: f32) {
        if !self.active {
            return;
        }
        self.pos.x += BONUS_SPEED * self.direction;
        if self.pos.x > arena_width + BONUS_WIDTH || self.pos.x < -BONUS_WIDTH {
            self.active = false;
        }
    }

    /// Point value awarded on destruction, uniform in [100, 300]
    pub fn roll_points(&self, rng: &mut Pcg32) -> u32 {
        rng.random_range(BONUS_MIN_POINTS..=BONUS_MAX_POINTS)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(BONUS_WIDTH, BONUS_HEIGHT))
    }
}

fn seed_zero_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete simulation session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub arena: ArenaConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    /// 1-based wave counter
    pub wave: u32,
    pub cannon: Cannon,
    pub invaders: Vec<Invader>,
    pub projectiles: Vec<Projectile>,
    pub shields: Vec<Shield>,
    pub bonus: BonusTarget,
    pub formation: Formation,
    pub timers: SpawnTimers,
    /// Events accumulated this tick, drained by the host for the audio
    /// collaborator
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Sole randomness source; reconstructed from `seed` after deserialization
    #[serde(skip, default = "seed_zero_rng")]
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a session on the title screen. The formation is not populated
    /// until the start trigger arrives.
    pub fn new(arena: ArenaConfig, seed: u64) -> Self {
        Self {
            arena,
            seed,
            phase: GamePhase::Start,
            score: 0,
            wave: 1,
            cannon: Cannon::new(&arena),
            invaders: Vec::new(),
            projectiles: Vec::new(),
            shields: build_shields(&arena),
            bonus: BonusTarget::default(),
            formation: Formation::new(1),
            timers: SpawnTimers::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Reset the run and enter `Playing` (start and restart trigger)
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.wave = 1;
        self.cannon = Cannon::new(&self.arena);
        self.projectiles.clear();
        self.formation = Formation::new(1);
        self.invaders = formation::spawn_wave();
        self.shields = build_shields(&self.arena);
        if self.bonus.active {
            self.events.push(GameEvent::BonusLoopStop);
        }
        self.bonus = BonusTarget::default();
    }

    pub fn alive_invaders(&self) -> usize {
        self.invaders.iter().filter(|i| i.alive).count()
    }

    /// Hand the tick's accumulated events to the host (audio collaborator)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Re-seed the randomness source (deserialized states restart their
    /// random stream from the run seed)
    pub fn reseed_rng(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
    }
}

/// Four shields, evenly spaced above the cannon row
pub fn build_shields(arena: &ArenaConfig) -> Vec<Shield> {
    let y = arena.height - SHIELD_BOTTOM_OFFSET;
    let spacing = arena.width / (SHIELD_COUNT as f32 + 1.0);
    (0..SHIELD_COUNT)
        .map(|i| Shield::new(Vec2::new(spacing * (i as f32 + 1.0) - 32.0, y)))
        .collect()
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - One atomic update per tick, driven by the host scheduler
//! - Seeded RNG only, injected at construction
//! - Explicit clock only (`now_ms` parameter, never ambient time)
//! - No rendering, audio, or platform dependencies

pub mod collision;
pub mod formation;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, overlaps};
pub use formation::{Formation, FormationStep, spawn_wave};
pub use snapshot::{Hud, Snapshot};
pub use spawn::SpawnTimers;
pub use state::{
    ArenaConfig, ArenaError, BonusTarget, Cannon, GameEvent, GamePhase, GameState, Invader,
    InvaderKind, Projectile, ProjectileOwner, Shield, ShieldBlock,
};
pub use tick::{TickInput, tick};

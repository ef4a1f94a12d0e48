//! Read-only view of the session for the render collaborator
//!
//! The renderer gets borrowed slices of the entity collections plus the HUD
//! numbers, once per tick. Nothing here can feed back into the simulation.

use super::state::{BonusTarget, Cannon, GamePhase, GameState, Invader, Projectile, Shield};

/// HUD numbers for the current tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub wave: u32,
    pub lives: u32,
    pub phase: GamePhase,
}

/// Per-tick read-only snapshot of everything the renderer needs:
/// entity bounds and visual state (variant, animation frame, alive flags)
/// plus the HUD.
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub cannon: &'a Cannon,
    pub invaders: &'a [Invader],
    pub projectiles: &'a [Projectile],
    pub shields: &'a [Shield],
    pub bonus: &'a BonusTarget,
    pub hud: Hud,
}

impl GameState {
    /// Expose the current tick's state for rendering
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            cannon: &self.cannon,
            invaders: &self.invaders,
            projectiles: &self.projectiles,
            shields: &self.shields,
            bonus: &self.bonus,
            hud: Hud {
                score: self.score,
                wave: self.wave,
                lives: self.cannon.lives,
                phase: self.phase,
            },
        }
    }
}

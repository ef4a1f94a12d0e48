//! Formation controller
//!
//! Governs the invader grid as one synchronized group: shared direction and
//! speed, edge-triggered reversal with descent, the lockstep walk-cycle
//! animation, and the per-wave layout.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{ArenaConfig, Invader, InvaderKind};
use crate::consts::*;

/// Shared movement state for the whole invader grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formation {
    /// Horizontal travel direction: -1.0 or +1.0
    pub direction: f32,
    /// Per-tick horizontal displacement, scaled by wave
    pub speed: f32,
    /// Tick counter driving the walk-cycle toggle
    anim_ticks: u32,
}

/// What happened during one formation step
#[derive(Debug, Clone, Copy, Default)]
pub struct FormationStep {
    /// The formation hit a margin: direction flipped and everyone descended
    pub reversed: bool,
    /// Some invader's descended bottom reached the cannon row (loss condition)
    pub reached_cannon: bool,
    /// The walk-cycle frame toggled this tick (paces the step sound)
    pub anim_toggled: bool,
}

impl Formation {
    /// Formation for the given 1-based wave, at that wave's scaled speed
    pub fn new(wave: u32) -> Self {
        Self {
            direction: 1.0,
            speed: FORMATION_BASE_SPEED + (wave.saturating_sub(1)) as f32 * FORMATION_WAVE_SPEED_STEP,
            anim_ticks: 0,
        }
    }

    /// Advance every alive invader one tick.
    ///
    /// Movement happens first; if any alive invader then sits at or beyond a
    /// horizontal margin, the whole formation flips direction and descends by
    /// the fixed step in this same tick. Descent is also where the
    /// invasion-reaches-cannon loss condition is detected.
    pub fn advance(
        &mut self,
        invaders: &mut [Invader],
        arena: &ArenaConfig,
        cannon_y: f32,
    ) -> FormationStep {
        let mut step = FormationStep::default();

        let mut hit_edge = false;
        for invader in invaders.iter_mut().filter(|i| i.alive) {
            invader.pos.x += self.speed * self.direction;
            if invader.pos.x <= EDGE_MARGIN
                || invader.pos.x >= arena.width - INVADER_WIDTH - EDGE_MARGIN
            {
                hit_edge = true;
            }
        }

        if hit_edge {
            self.direction = -self.direction;
            step.reversed = true;
            for invader in invaders.iter_mut().filter(|i| i.alive) {
                invader.pos.y += FORMATION_DESCEND_STEP;
                if invader.pos.y + INVADER_HEIGHT >= cannon_y {
                    step.reached_cannon = true;
                }
            }
        }

        self.anim_ticks += 1;
        if self.anim_ticks % FORMATION_ANIM_PERIOD == 0 {
            for invader in invaders.iter_mut().filter(|i| i.alive) {
                invader.anim_frame = (invader.anim_frame + 1) % 2;
            }
            step.anim_toggled = true;
        }

        step
    }
}

/// Build the fixed 11x5 grid for a fresh wave.
///
/// Row order top to bottom: one row of small invaders, two of medium, two of
/// large. Invaders are created row-major, which fixes the collision scan
/// order for the rest of the wave.
pub fn spawn_wave() -> Vec<Invader> {
    let mut invaders = Vec::with_capacity(FORMATION_COLS * 5);

    let rows: [(usize, InvaderKind); 5] = [
        (0, InvaderKind::Small),
        (1, InvaderKind::Medium),
        (2, InvaderKind::Medium),
        (3, InvaderKind::Large),
        (4, InvaderKind::Large),
    ];

    for (row, kind) in rows {
        for col in 0..FORMATION_COLS {
            invaders.push(Invader::new(
                Vec2::new(
                    FORMATION_START_X + col as f32 * FORMATION_SPACING_X,
                    FORMATION_START_Y + row as f32 * FORMATION_SPACING_Y,
                ),
                kind,
            ));
        }
    }

    invaders
}

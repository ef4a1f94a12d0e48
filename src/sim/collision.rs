//! Axis-aligned collision detection
//!
//! Every entity in the arena is a top-left anchored rectangle, so the whole
//! collision story reduces to one strict AABB intersection test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Strict intersection with another box (shared edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        overlaps(self, other)
    }
}

/// Strict AABB intersection test
///
/// Pure and symmetric. Boxes that merely touch along an edge are not
/// considered overlapping.
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.pos.x < b.pos.x + b.size.x
        && a.pos.x + a.size.x > b.pos.x
        && a.pos.y < b.pos.y + b.size.y
        && a.pos.y + a.size.y > b.pos.y
}

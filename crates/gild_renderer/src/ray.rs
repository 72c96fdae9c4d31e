//! Ray packets.
//!
//! A packet carries one ray per lane plus the mask of lanes that map to a
//! real pixel. Inactive lanes still hold numbers, but nothing downstream ever
//! writes their results anywhere.

use gild_math::{f32x8, LaneMask, Vec3, Vec3x8};

/// A group of rays evaluated together, one per lane.
#[derive(Debug, Clone, Copy)]
pub struct RayPacket {
    /// Ray origins
    pub origin: Vec3x8,
    /// Ray directions (not normalized)
    pub direction: Vec3x8,
    /// Lanes that correspond to pixels inside the image
    pub active: LaneMask,
}

impl RayPacket {
    #[inline]
    pub fn new(origin: Vec3x8, direction: Vec3x8, active: LaneMask) -> Self {
        Self {
            origin,
            direction,
            active,
        }
    }

    /// The same ray in every lane, all lanes active.
    pub fn splat(origin: Vec3, direction: Vec3) -> Self {
        Self::new(Vec3x8::splat(origin), Vec3x8::splat(direction), LaneMask::all())
    }

    /// Point along each lane's ray at parameter `t`.
    /// P(t) = direction * t + origin
    #[inline]
    pub fn at(&self, t: f32x8) -> Vec3x8 {
        Vec3x8::along(self.origin, self.direction, t)
    }
}

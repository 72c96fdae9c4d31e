//! Pinhole camera for packet ray generation.
//!
//! The camera sits at the origin looking down -Z through an image plane at
//! z = -1. Only the horizontal axis is scaled by the aspect ratio. All math is
//! plain multiply/add/divide so every platform produces the same floats.

use gild_math::{f32x8, LaneMask, Vec3x8, LANES, LANE_INDEX};

use crate::{RayPacket, Tile};

/// Fixed pinhole camera for a `width` x `height` image.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,
    aspect: f32,
}

impl Camera {
    pub fn new(image_width: u32, image_height: u32) -> Self {
        Self {
            image_width,
            image_height,
            aspect: image_width as f32 / image_height as f32,
        }
    }

    /// Primary rays for one tile.
    ///
    /// Lane `i` maps to column `tile.x + i`; lanes at or past the image width
    /// are left inactive.
    pub fn packet(&self, tile: &Tile) -> RayPacket {
        let width = self.image_width as f32;
        let height = self.image_height as f32;

        let col = f32x8::splat(tile.x as f32) + LANE_INDEX;
        let u = ((col + f32x8::splat(0.5)) / f32x8::splat(width) * f32x8::splat(2.0)
            - f32x8::splat(1.0))
            * f32x8::splat(self.aspect);
        let v = 1.0 - 2.0 * (tile.y as f32 + 0.5) / height;

        let direction = Vec3x8::new(u, f32x8::splat(v), f32x8::splat(-1.0));
        let remaining = self.image_width.saturating_sub(tile.x) as usize;
        let active = LaneMask::first(tile.active.min(remaining));

        RayPacket::new(Vec3x8::zero(), direction, active)
    }
}

/// Packet for the tile starting at (`tile_x`, `tile_y`).
///
/// `lane_width` caps the number of active lanes; it may not exceed the
/// packet type's lane count.
pub fn generate_packet(
    tile_x: u32,
    tile_y: u32,
    image_width: u32,
    image_height: u32,
    lane_width: usize,
) -> RayPacket {
    assert!(
        lane_width > 0 && lane_width <= LANES,
        "lane width {} outside 1..={}",
        lane_width,
        LANES
    );
    let camera = Camera::new(image_width, image_height);
    camera.packet(&Tile::new(tile_x, tile_y, lane_width))
}

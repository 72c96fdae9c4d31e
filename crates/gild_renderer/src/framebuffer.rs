//! Flat RGB8 framebuffer.

use gild_math::{Interval, Vec3x8};

use crate::Tile;

/// Row-major RGB image, 3 bytes per pixel, no padding.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    bytes: Vec<u8>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bytes: vec![0; width as usize * height as usize * 3],
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize * self.width as usize + x as usize) * 3
    }

    /// Store one shaded pixel.
    ///
    /// Channels are clamped to [0, 1], scaled by 255 and truncated.
    pub fn write_pixel(&mut self, x: u32, y: u32, color: [f32; 3]) {
        let i = self.offset(x, y);
        for (dst, c) in self.bytes[i..i + 3].iter_mut().zip(color) {
            *dst = (Interval::UNIT.clamp(c) * 255.0) as u8;
        }
    }

    /// Store the active lanes of a shaded packet.
    pub fn write_packet(&mut self, tile: &Tile, color: &Vec3x8) {
        for (lane, x) in tile.columns().enumerate() {
            let c = color.lane(lane);
            self.write_pixel(x, tile.y, [c.x, c.y, c.z]);
        }
    }

    /// Get the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.offset(x, y);
        [self.bytes[i], self.bytes[i + 1], self.bytes[i + 2]]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Reset every byte to zero.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Index of the first byte that differs from `reference`.
    ///
    /// A length mismatch counts as a difference at the shorter length.
    pub fn first_mismatch(&self, reference: &[u8]) -> Option<usize> {
        let shorter = self.bytes.len().min(reference.len());
        self.bytes
            .iter()
            .zip(reference)
            .position(|(a, b)| a != b)
            .or_else(|| (self.bytes.len() != reference.len()).then_some(shorter))
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

//! Tiling of the framebuffer into packet-sized runs.
//!
//! Each tile is one row segment exactly one packet wide. The last tile of a
//! row is partial when the width is not a multiple of the lane count; its
//! `active` count tells the packet generator how many lanes map to pixels.

/// A horizontal run of pixels handled by one ray packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Column of the first lane
    pub x: u32,
    /// Row
    pub y: u32,
    /// Number of lanes that map to pixels (1..=lanes)
    pub active: usize,
}

impl Tile {
    pub fn new(x: u32, y: u32, active: usize) -> Self {
        Self { x, y, active }
    }

    /// Columns covered by the active lanes.
    pub fn columns(&self) -> std::ops::Range<u32> {
        self.x..self.x + self.active as u32
    }
}

/// Tiles covering a `width` x `height` image in row-major order.
pub fn generate_tiles(width: u32, height: u32, lanes: usize) -> Vec<Tile> {
    assert!(lanes > 0, "packet width must be non-zero");
    let step = lanes as u32;
    let per_row = width.div_ceil(step) as usize;
    let mut tiles = Vec::with_capacity(per_row * height as usize);

    for y in 0..height {
        let mut x = 0;
        while x < width {
            let active = step.min(width - x) as usize;
            tiles.push(Tile::new(x, y, active));
            x += step;
        }
    }

    tiles
}

//! Compile-time configuration shared by every crate.

/// Framebuffer width in pixels.
pub const WIDTH: u32 = 640;

/// Framebuffer height in pixels.
pub const HEIGHT: u32 = 480;

/// Ambient term added to every shaded channel.
pub const AMBIENT: f32 = 0.1;

/// Number of golden reference scenes.
pub const SCENE_COUNT: usize = 10;

/// Capacity of the scene's triangle list.
pub const MAX_TRIANGLES: usize = 128;

/// Initial `best_t` of a packet; anything at or beyond it counts as a miss.
pub const MISS_DISTANCE: f32 = 1e9;

/// Bytes in one RGB framebuffer of `WIDTH` x `HEIGHT`.
pub const IMAGE_BYTES: usize = (WIDTH as usize) * (HEIGHT as usize) * 3;

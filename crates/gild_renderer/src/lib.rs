//! Gild renderer - packet ray tracing
//!
//! Renders the regression scenes eight rays at a time. Each framebuffer row
//! is split into packet-wide tiles; every packet is tested against all
//! primitives of the scene in a fixed order, shaded with one directional
//! light and written back as RGB8.
//!
//! Lanes never branch individually. Results are merged with lane masks, so a
//! lane that fails any test simply keeps its previous value.

mod ray;
mod hittable;
mod sphere;
mod plane;
mod cylinder;
mod disk;
mod triangle;
mod camera;
mod tile;
mod shade;
mod framebuffer;
mod renderer;

pub use ray::RayPacket;
pub use hittable::{intersect_scene, update_hit, HitState, Intersect};
pub use camera::{generate_packet, Camera};
pub use tile::{generate_tiles, Tile};
pub use shade::shade;
pub use framebuffer::Framebuffer;
pub use renderer::{render_frame, render_scene, RenderConfig};

/// Re-export the math types used in the public API
pub use gild_math::{f32x8, lane_width, LaneMask, Vec3, Vec3x8};

// Re-export glam for convenience
pub use glam::*;

// Packet lane types
pub use wide::f32x8;

mod interval;
pub mod lanes;
pub mod trig;

pub use interval::Interval;
pub use lanes::{lane_width, LaneMask, Vec3x8, LANES, LANE_INDEX};
pub use trig::{taylor_cos, taylor_sin};

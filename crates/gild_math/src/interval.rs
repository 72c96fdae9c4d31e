use wide::{f32x8, CmpGe, CmpLe};

use crate::LaneMask;

/// Closed range `[min, max]` used for clipping and clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Per-lane inclusive containment test.
    ///
    /// NaN lanes are never contained.
    #[inline]
    pub fn contains_lanes(&self, x: f32x8) -> LaneMask {
        let lo = x.cmp_ge(f32x8::splat(self.min));
        let hi = x.cmp_le(f32x8::splat(self.max));
        LaneMask::from_raw(lo & hi)
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// The unit interval `[0, 1]` that color channels are clamped to.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}

//! Packet lane types for 8-wide ray evaluation.
//!
//! Lanes are `wide::f32x8`, which lowers to AVX/SSE/NEON/simd128 where the
//! target has them and to a plain array loop everywhere else. Masks are
//! stored as `f32x8` with every bit of an active lane set, so that a mask can
//! be fed straight into `blend`.
//!
//! Every operation here is lane-local: no lane ever reads another lane's data,
//! which keeps the rendered output independent of the packet width.

use glam::Vec3;
use wide::{f32x8, CmpGe, CmpGt, CmpLe, CmpLt, CmpNe};

/// Number of lanes in a packet.
pub const LANES: usize = 8;

/// Lane indices `0..LANES` as floats.
pub const LANE_INDEX: f32x8 = f32x8::new([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);

/// Widest packet the lane types support.
///
/// `wide` picks the instruction set when the crate is compiled, so this is
/// fixed for a given build. Renderers default their packet width to this
/// value and may run narrower packets with the remaining lanes masked off.
#[inline]
pub fn lane_width() -> usize {
    LANES
}

/// Per-lane predicate.
#[derive(Clone, Copy, Debug)]
pub struct LaneMask(f32x8);

impl LaneMask {
    /// Wrap the raw output of a `wide` comparison.
    #[inline]
    pub fn from_raw(raw: f32x8) -> Self {
        LaneMask(raw)
    }

    /// Mask with the first `count` lanes active.
    #[inline]
    pub fn first(count: usize) -> Self {
        LaneMask(LANE_INDEX.cmp_lt(f32x8::splat(count.min(LANES) as f32)))
    }

    /// Mask with every lane active.
    #[inline]
    pub fn all() -> Self {
        Self::first(LANES)
    }

    /// Lanes where `a > b`. NaN compares false.
    #[inline]
    pub fn gt(a: f32x8, b: f32x8) -> Self {
        LaneMask(a.cmp_gt(b))
    }

    /// Lanes where `a >= b`.
    #[inline]
    pub fn ge(a: f32x8, b: f32x8) -> Self {
        LaneMask(a.cmp_ge(b))
    }

    /// Lanes where `a < b`.
    #[inline]
    pub fn lt(a: f32x8, b: f32x8) -> Self {
        LaneMask(a.cmp_lt(b))
    }

    /// Lanes where `a <= b`.
    #[inline]
    pub fn le(a: f32x8, b: f32x8) -> Self {
        LaneMask(a.cmp_le(b))
    }

    /// Lanes where `a != b`.
    #[inline]
    pub fn ne(a: f32x8, b: f32x8) -> Self {
        LaneMask(a.cmp_ne(b))
    }

    /// Build a mask from one flag per lane.
    pub fn from_bools(flags: [bool; LANES]) -> Self {
        let on = f32::from_bits(u32::MAX);
        let mut raw = [0.0f32; LANES];
        for (slot, flag) in raw.iter_mut().zip(flags) {
            if flag {
                *slot = on;
            }
        }
        LaneMask(f32x8::new(raw))
    }

    #[inline]
    pub fn and(self, other: LaneMask) -> Self {
        LaneMask(self.0 & other.0)
    }

    /// True when at least one lane is active.
    #[inline]
    pub fn any(self) -> bool {
        self.bits() != 0
    }

    /// True when `lane` is active.
    #[inline]
    pub fn test(self, lane: usize) -> bool {
        lane < LANES && (self.bits() >> lane) & 1 == 1
    }

    /// Number of active lanes.
    #[inline]
    pub fn count(self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Pick `on` in active lanes and `off` elsewhere.
    #[inline]
    pub fn select(self, on: f32x8, off: f32x8) -> f32x8 {
        self.0.blend(on, off)
    }

    #[inline]
    fn bits(self) -> u32 {
        (self.0.move_mask() as u32) & ((1 << LANES) - 1)
    }
}

/// Eight 3D vectors in structure-of-arrays layout.
#[derive(Clone, Copy, Debug)]
pub struct Vec3x8 {
    pub x: f32x8,
    pub y: f32x8,
    pub z: f32x8,
}

impl Vec3x8 {
    #[inline]
    pub fn new(x: f32x8, y: f32x8, z: f32x8) -> Self {
        Vec3x8 { x, y, z }
    }

    /// Same vector in every lane.
    #[inline]
    pub fn splat(v: Vec3) -> Self {
        Vec3x8 {
            x: f32x8::splat(v.x),
            y: f32x8::splat(v.y),
            z: f32x8::splat(v.z),
        }
    }

    #[inline]
    pub fn zero() -> Self {
        Vec3x8 {
            x: f32x8::ZERO,
            y: f32x8::ZERO,
            z: f32x8::ZERO,
        }
    }

    /// `(x*x + y*y) + z*z`, evaluated left to right.
    #[inline]
    pub fn dot(self, other: Self) -> f32x8 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Vec3x8 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// `origin + direction * t` per lane, multiply then add.
    #[inline]
    pub fn along(origin: Self, direction: Self, t: f32x8) -> Self {
        Vec3x8 {
            x: direction.x * t + origin.x,
            y: direction.y * t + origin.y,
            z: direction.z * t + origin.z,
        }
    }

    /// Take `self` in active lanes and `other` elsewhere.
    #[inline]
    pub fn select(self, mask: LaneMask, other: Self) -> Self {
        Vec3x8 {
            x: mask.select(self.x, other.x),
            y: mask.select(self.y, other.y),
            z: mask.select(self.z, other.z),
        }
    }

    /// Extract a single lane.
    #[inline]
    pub fn lane(self, index: usize) -> Vec3 {
        Vec3::new(
            self.x.to_array()[index],
            self.y.to_array()[index],
            self.z.to_array()[index],
        )
    }
}

impl std::ops::Add for Vec3x8 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Vec3x8 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Vec3x8 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Vec3x8 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Mul<f32x8> for Vec3x8 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32x8) -> Self {
        Vec3x8 {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl std::ops::Div<f32x8> for Vec3x8 {
    type Output = Self;
    #[inline]
    fn div(self, scalar: f32x8) -> Self {
        Vec3x8 {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_masks_partial_packet() {
        let mask = LaneMask::first(3);
        assert_eq!(mask.count(), 3);
        assert!(mask.test(0) && mask.test(2));
        assert!(!mask.test(3) && !mask.test(7));

        assert_eq!(LaneMask::first(0).count(), 0);
        assert_eq!(LaneMask::first(100).count(), LANES);
    }

    #[test]
    fn test_select_only_touches_active_lanes() {
        let mask = LaneMask::from_bools([true, false, true, false, false, false, false, true]);
        let picked = mask.select(f32x8::splat(1.0), f32x8::splat(-1.0)).to_array();
        assert_eq!(picked, [1.0, -1.0, 1.0, -1.0, -1.0, -1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_comparisons() {
        let a = f32x8::new([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, f32::NAN]);
        let b = f32x8::splat(3.0);
        assert_eq!(LaneMask::gt(a, b).count(), 3);
        assert_eq!(LaneMask::ge(a, b).count(), 4);
        assert_eq!(LaneMask::lt(a, b).count(), 3);
        assert_eq!(LaneMask::le(a, b).count(), 4);
        let c = f32x8::new([0.0, 3.0, 3.0, -3.0, 3.0, 1e-30, 3.0, 3.0]);
        assert_eq!(LaneMask::ne(c, b).count(), 3);
        assert!(!LaneMask::ne(c, b).test(1));
    }

    #[test]
    fn test_mask_logic() {
        let a = LaneMask::first(4);
        let b = LaneMask::from_bools([false, true, false, true, false, true, false, true]);
        assert_eq!(a.and(b).count(), 2);
        assert!(a.and(b).test(1) && a.and(b).test(3));
        assert!(!a.and(b).test(5));
        assert!(!LaneMask::first(0).any());
        assert!(LaneMask::all().any());
    }

    #[test]
    fn test_dot_and_cross() {
        let a = Vec3x8::splat(Vec3::X);
        let b = Vec3x8::splat(Vec3::Y);
        assert_eq!(a.dot(b).to_array(), [0.0; LANES]);
        assert_eq!(a.cross(b).lane(5), Vec3::Z);

        let v = Vec3x8::splat(Vec3::new(1.0, 2.0, 2.0));
        assert_eq!(v.dot(v).to_array(), [9.0; LANES]);
    }

    #[test]
    fn test_along_matches_scalar() {
        let origin = Vec3x8::splat(Vec3::new(1.0, 0.0, 0.0));
        let direction = Vec3x8::splat(Vec3::new(0.0, 0.0, -1.0));
        let p = Vec3x8::along(origin, direction, f32x8::splat(2.5));
        assert_eq!(p.lane(0), Vec3::new(1.0, 0.0, -2.5));
    }
}

//! Ray-triangle intersection for mesh triangles.
//!
//! Uses the Möller-Trumbore algorithm. Both faces are hit; only `det == 0`
//! is rejected.

use gild_core::Triangle;
use gild_math::{f32x8, LaneMask, Vec3x8};

use crate::hittable::{update_hit, HitState, Intersect};
use crate::RayPacket;

impl Intersect for Triangle {
    /// Mesh hits carry color only; the lane keeps whatever normal it had.
    fn intersect(&self, packet: &RayPacket, state: &mut HitState) {
        let edge1 = Vec3x8::splat(self.v1 - self.v0);
        let edge2 = Vec3x8::splat(self.v2 - self.v0);
        let d = packet.direction;

        let h = d.cross(edge2);
        let det = edge1.dot(h);

        // Ray is parallel to triangle
        let hit = LaneMask::ne(det, f32x8::ZERO);
        if !hit.and(packet.active).any() {
            return;
        }

        let inv_det = f32x8::splat(1.0) / det;
        let s = packet.origin - Vec3x8::splat(self.v0);
        let u = s.dot(h) * inv_det;
        let q = s.cross(edge1);
        let v = d.dot(q) * inv_det;

        let inside = hit
            .and(LaneMask::ge(u, f32x8::ZERO))
            .and(LaneMask::ge(v, f32x8::ZERO))
            .and(LaneMask::le(u + v, f32x8::splat(1.0)));
        if !inside.and(packet.active).any() {
            return;
        }

        let t = edge2.dot(q) * inv_det;
        let closer = state.closer(packet, inside, t);
        if !closer.any() {
            return;
        }

        update_hit(closer, t, None, Vec3x8::splat(self.color.to_rgb()), state);
    }
}

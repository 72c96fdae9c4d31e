//! Ray-plane intersection.

use gild_core::Plane;
use gild_math::{f32x8, LaneMask, Vec3x8};

use crate::hittable::{update_hit, HitState, Intersect};
use crate::RayPacket;

impl Intersect for Plane {
    /// `t = -(O·N + d) / (D·N)`; rays with `D·N == 0` never hit, even when
    /// they lie inside the plane. The stored normal is reported as-is.
    fn intersect(&self, packet: &RayPacket, state: &mut HitState) {
        let normal = Vec3x8::splat(self.normal);

        let denom = packet.direction.dot(normal);
        let valid = LaneMask::ne(denom, f32x8::ZERO);
        let t = (f32x8::splat(-self.d) - packet.origin.dot(normal)) / denom;

        let closer = state.closer(packet, valid, t);
        if !closer.any() {
            return;
        }

        update_hit(
            closer,
            t,
            Some(normal),
            Vec3x8::splat(self.color.to_rgb()),
            state,
        );
    }
}

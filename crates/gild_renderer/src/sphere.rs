//! Ray-sphere intersection.

use gild_core::Sphere;
use gild_math::{f32x8, LaneMask, Vec3x8};

use crate::hittable::{update_hit, HitState, Intersect};
use crate::RayPacket;

impl Intersect for Sphere {
    /// Solves `a t² + b t + c = 0` with `a = |D|²`, `b = 2 D·(O-C)`,
    /// `c = |O-C|² - r²` and keeps the smaller root.
    ///
    /// A zero discriminant (tangent ray) is a miss.
    fn intersect(&self, packet: &RayPacket, state: &mut HitState) {
        let center = Vec3x8::splat(self.center);
        let radius = f32x8::splat(self.radius);

        let oc = packet.origin - center;
        let d = packet.direction;
        let a = d.dot(d);
        let b = d.dot(oc) * f32x8::splat(2.0);
        let c = oc.dot(oc) - f32x8::splat(self.radius * self.radius);

        let discriminant = b * b - f32x8::splat(4.0) * (a * c);
        let hit = LaneMask::gt(discriminant, f32x8::ZERO);
        if !hit.and(packet.active).any() {
            return;
        }

        let t0 = (-b - discriminant.sqrt()) / (a * f32x8::splat(2.0));
        let closer = state.closer(packet, hit, t0);
        if !closer.any() {
            return;
        }

        let normal = (packet.at(t0) - center) / radius;
        update_hit(
            closer,
            t0,
            Some(normal),
            Vec3x8::splat(self.color.to_rgb()),
            state,
        );
    }
}

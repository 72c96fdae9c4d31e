//! Ray-cylinder intersection (side wall only).

use gild_core::Cylinder;
use gild_math::{f32x8, Interval, LaneMask, Vec3x8};

use crate::hittable::{update_hit, HitState, Intersect};
use crate::RayPacket;

impl Intersect for Cylinder {
    /// Infinite Y-aligned cylinder solved in X/Z only, then clipped to
    /// `[base.y, base.y + height]` inclusive. No end caps.
    fn intersect(&self, packet: &RayPacket, state: &mut HitState) {
        let cx = f32x8::splat(self.base.x);
        let cz = f32x8::splat(self.base.z);
        let radius = f32x8::splat(self.radius);
        let o = packet.origin;
        let d = packet.direction;

        let x = o.x - cx;
        let z = o.z - cz;
        let a = d.x * d.x + d.z * d.z;
        let b = (d.x * x + d.z * z) * f32x8::splat(2.0);
        let c = x * x + z * z - f32x8::splat(self.radius * self.radius);

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

        let p = packet.at(t0);
        let span = Interval::new(self.base.y, self.base.y + self.height);
        let within = closer.and(span.contains_lanes(p.y));
        if !within.any() {
            return;
        }

        let normal = Vec3x8::new((p.x - cx) / radius, f32x8::ZERO, (p.z - cz) / radius);
        update_hit(
            within,
            t0,
            Some(normal),
            Vec3x8::splat(self.color.to_rgb()),
            state,
        );
    }
}

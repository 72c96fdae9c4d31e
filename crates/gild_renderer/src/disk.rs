//! Ray-disk intersection.

use gild_core::Disk;
use gild_math::{f32x8, LaneMask, Vec3, Vec3x8};

use crate::hittable::{update_hit, HitState, Intersect};
use crate::RayPacket;

impl Intersect for Disk {
    /// Hit the plane `y = center.y`, then keep points with
    /// `dx² + dz² <= r²`. Rays with `D.y == 0` are rejected outright.
    fn intersect(&self, packet: &RayPacket, state: &mut HitState) {
        let o = packet.origin;
        let d = packet.direction;

        let valid = LaneMask::ne(d.y, f32x8::ZERO);
        if !valid.and(packet.active).any() {
            return;
        }

        let t = (f32x8::splat(self.center.y) - o.y) / d.y;
        let closer = state.closer(packet, valid, t);
        if !closer.any() {
            return;
        }

        let p = packet.at(t);
        let dx = p.x - f32x8::splat(self.center.x);
        let dz = p.z - f32x8::splat(self.center.z);
        let dist2 = dx * dx + dz * dz;
        let inside = closer.and(LaneMask::le(
            dist2,
            f32x8::splat(self.radius * self.radius),
        ));
        if !inside.any() {
            return;
        }

        update_hit(
            inside,
            t,
            Some(Vec3x8::splat(Vec3::Y)),
            Vec3x8::splat(self.color.to_rgb()),
            state,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gild_core::PackedColor;

    fn floor_disk() -> Disk {
        Disk::new(Vec3::new(0.0, -1.0, -4.0), 1.0, PackedColor(0xFFFF00))
    }

    #[test]
    fn test_disk_hit_from_above() {
        let packet = RayPacket::splat(Vec3::new(0.0, 1.0, -4.0), Vec3::new(0.0, -1.0, 0.0));
        let mut state = HitState::new();

        floor_disk().intersect(&packet, &mut state);

        assert_eq!(state.best_t.to_array()[0], 2.0);
        assert_eq!(state.normal.lane(0), Vec3::Y);
        assert_eq!(state.color.lane(0), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_rim_is_inclusive() {
        let packet = RayPacket::splat(Vec3::new(1.0, 1.0, -4.0), Vec3::new(0.0, -1.0, 0.0));
        let mut state = HitState::new();

        floor_disk().intersect(&packet, &mut state);

        assert!(state.hit_mask().test(0));
    }

    #[test]
    fn test_outside_radius_misses() {
        let packet = RayPacket::splat(Vec3::new(1.5, 1.0, -4.0), Vec3::new(0.0, -1.0, 0.0));
        let mut state = HitState::new();

        floor_disk().intersect(&packet, &mut state);

        assert!(!state.hit_mask().any());
    }

    #[test]
    fn test_horizontal_ray_never_hits() {
        // Origin lies exactly in the disk plane, inside the radius.
        let packet = RayPacket::splat(Vec3::new(0.0, -1.0, -4.0), Vec3::new(0.0, 0.0, -1.0));
        let mut state = HitState::new();

        floor_disk().intersect(&packet, &mut state);

        assert!(!state.hit_mask().any());
        assert_eq!(state.best_t.to_array(), HitState::new().best_t.to_array());
    }
}

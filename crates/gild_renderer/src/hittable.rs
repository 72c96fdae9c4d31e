//! Closest-hit state and primitive dispatch.
//!
//! Every intersector funnels its result through [`update_hit`], which writes
//! a lane only when the lane is active, the primitive reported a valid hit,
//! `t > 0`, and `t < best_t`. Primitives are visited in a fixed order
//! (spheres, planes, cylinders, disks, triangles, each by index), so on an
//! exact tie in `t` the primitive seen first keeps the lane.

use gild_core::config::MISS_DISTANCE;
use gild_core::SceneStore;
use gild_math::{f32x8, LaneMask, Vec3, Vec3x8};

use crate::RayPacket;

/// Nearest intersection found so far, per lane.
#[derive(Debug, Clone, Copy)]
pub struct HitState {
    /// Ray parameter of the nearest hit; `MISS_DISTANCE` when nothing was hit
    pub best_t: f32x8,
    /// Shading normal of the nearest hit
    pub normal: Vec3x8,
    /// Albedo of the nearest hit, channels in [0, 1]
    pub color: Vec3x8,
}

impl Default for HitState {
    fn default() -> Self {
        Self {
            best_t: f32x8::splat(MISS_DISTANCE),
            normal: Vec3x8::splat(Vec3::Z),
            color: Vec3x8::zero(),
        }
    }
}

impl HitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lanes where a candidate at `t` would replace the current hit.
    ///
    /// `valid` is the primitive's own hit mask. Lanes where `t` is NaN never
    /// qualify.
    #[inline]
    pub fn closer(&self, packet: &RayPacket, valid: LaneMask, t: f32x8) -> LaneMask {
        packet
            .active
            .and(valid)
            .and(LaneMask::gt(t, f32x8::ZERO))
            .and(LaneMask::lt(t, self.best_t))
    }

    /// Lanes that hit anything at all.
    pub fn hit_mask(&self) -> LaneMask {
        LaneMask::lt(self.best_t, f32x8::splat(MISS_DISTANCE))
    }
}

/// Overwrite the lanes in `mask` with a new nearest hit.
///
/// `normal` of `None` keeps the previous normal in those lanes; mesh
/// triangles only contribute their color.
#[inline]
pub fn update_hit(
    mask: LaneMask,
    t: f32x8,
    normal: Option<Vec3x8>,
    color: Vec3x8,
    state: &mut HitState,
) {
    state.best_t = mask.select(t, state.best_t);
    if let Some(normal) = normal {
        state.normal = normal.select(mask, state.normal);
    }
    state.color = color.select(mask, state.color);
}

/// Anything a ray packet can be tested against.
pub trait Intersect {
    /// Fold this primitive's hits into `state`.
    fn intersect(&self, packet: &RayPacket, state: &mut HitState);
}

impl<T: Intersect> Intersect for [T] {
    fn intersect(&self, packet: &RayPacket, state: &mut HitState) {
        for primitive in self {
            primitive.intersect(packet, state);
        }
    }
}

/// Test a packet against every primitive of the scene in dispatch order.
pub fn intersect_scene(scene: &SceneStore, packet: &RayPacket, state: &mut HitState) {
    scene.spheres.intersect(packet, state);
    scene.planes.intersect(packet, state);
    scene.cylinders.intersect(packet, state);
    scene.disks.intersect(packet, state);
    scene.triangles.as_slice().intersect(packet, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, Tile};
    use gild_core::config::{HEIGHT, WIDTH};
    use gild_core::{select_scene, PackedColor, Plane, Sphere};
    use gild_math::LANES;

    #[test]
    fn test_default_state_is_a_miss() {
        let state = HitState::new();
        assert!(!state.hit_mask().any());
        assert_eq!(state.normal.lane(0), Vec3::Z);
        assert_eq!(state.color.lane(0), Vec3::ZERO);
    }

    #[test]
    fn test_update_hit_only_touches_masked_lanes() {
        let mut state = HitState::new();
        let mask = LaneMask::from_bools([true, false, false, true, false, false, false, false]);
        update_hit(
            mask,
            f32x8::splat(2.0),
            Some(Vec3x8::splat(Vec3::Y)),
            Vec3x8::splat(Vec3::ONE),
            &mut state,
        );

        let t = state.best_t.to_array();
        assert_eq!(t[0], 2.0);
        assert_eq!(t[1], MISS_DISTANCE);
        assert_eq!(t[3], 2.0);
        assert_eq!(state.normal.lane(0), Vec3::Y);
        assert_eq!(state.normal.lane(1), Vec3::Z);
        assert_eq!(state.color.lane(3), Vec3::ONE);
        assert_eq!(state.color.lane(4), Vec3::ZERO);
    }

    #[test]
    fn test_update_without_normal_keeps_normal() {
        let mut state = HitState::new();
        update_hit(
            LaneMask::all(),
            f32x8::splat(1.0),
            None,
            Vec3x8::splat(Vec3::X),
            &mut state,
        );
        assert_eq!(state.normal.lane(0), Vec3::Z);
        assert_eq!(state.color.lane(0), Vec3::X);
    }

    #[test]
    fn test_closer_rejects_non_positive_and_farther() {
        let mut state = HitState::new();
        state.best_t = f32x8::splat(5.0);
        let packet = RayPacket::splat(Vec3::ZERO, Vec3::NEG_Z);
        let t = f32x8::new([-1.0, 0.0, 1.0, 4.999, 5.0, 6.0, f32::NAN, 3.0]);
        let valid = LaneMask::from_bools([true, true, true, true, true, true, true, false]);

        let mask = state.closer(&packet, valid, t);
        let expected = [false, false, true, true, false, false, false, false];
        for (lane, want) in expected.iter().enumerate() {
            assert_eq!(mask.test(lane), *want, "lane {}", lane);
        }
    }

    fn bits(v: Vec3) -> [u32; 3] {
        v.to_array().map(f32::to_bits)
    }

    fn selected_scene(index: usize) -> SceneStore {
        let mut scene = SceneStore::baseline();
        select_scene(&mut scene, index).unwrap();
        scene
    }

    fn dispatch_step(scene: &SceneStore, step: usize, packet: &RayPacket, state: &mut HitState) {
        match step {
            0 => scene.spheres.intersect(packet, state),
            1 => scene.planes.intersect(packet, state),
            2 => scene.cylinders.intersect(packet, state),
            3 => scene.disks.intersect(packet, state),
            _ => scene.triangles.as_slice().intersect(packet, state),
        }
    }

    #[test]
    fn test_dispatch_is_monotonic() {
        let camera = Camera::new(WIDTH, HEIGHT);
        let mut mixed_packets = 0;

        for index in [0, 5, 9] {
            let scene = selected_scene(index);
            for y in (0..HEIGHT).step_by(37) {
                for x in (0..WIDTH).step_by(LANES * 9) {
                    let packet = camera.packet(&Tile::new(x, y, LANES));
                    let mut state = HitState::new();

                    for step in 0..5 {
                        let before = state;
                        dispatch_step(&scene, step, &packet, &mut state);

                        let (t0, t1) = (before.best_t.to_array(), state.best_t.to_array());
                        for lane in 0..LANES {
                            let at = (index, x, y, step, lane);
                            assert!(t1[lane] <= t0[lane], "{:?}", at);
                            if t1[lane] == t0[lane] {
                                assert_eq!(
                                    bits(state.normal.lane(lane)),
                                    bits(before.normal.lane(lane)),
                                    "{:?}",
                                    at
                                );
                                assert_eq!(
                                    bits(state.color.lane(lane)),
                                    bits(before.color.lane(lane)),
                                    "{:?}",
                                    at
                                );
                            }
                            if step == 4 {
                                // Mesh triangles never replace the normal
                                assert_eq!(
                                    bits(state.normal.lane(lane)),
                                    bits(before.normal.lane(lane)),
                                    "{:?}",
                                    at
                                );
                            }
                        }
                    }

                    let t = state.best_t.to_array();
                    if t.iter().any(|&v| v != t[0]) {
                        mixed_packets += 1;
                    }
                }
            }
        }

        assert!(mixed_packets > 0);
    }

    #[test]
    fn test_packet_lanes_match_single_rays() {
        let camera = Camera::new(WIDTH, HEIGHT);

        for index in [0, 5, 9] {
            let scene = selected_scene(index);
            for (x, y) in [(0, 0), (312, 240), (320, 200), (160, 300), (632, 479)] {
                let packet = camera.packet(&Tile::new(x, y, LANES));
                let mut state = HitState::new();
                intersect_scene(&scene, &packet, &mut state);

                for lane in 0..LANES {
                    let single = camera.packet(&Tile::new(x + lane as u32, y, 1));
                    assert_eq!(single.active.count(), 1);
                    let mut alone = HitState::new();
                    intersect_scene(&scene, &single, &mut alone);

                    let at = (index, x, y, lane);
                    assert_eq!(
                        state.best_t.to_array()[lane].to_bits(),
                        alone.best_t.to_array()[0].to_bits(),
                        "{:?}",
                        at
                    );
                    assert_eq!(
                        bits(state.normal.lane(lane)),
                        bits(alone.normal.lane(0)),
                        "{:?}",
                        at
                    );
                    assert_eq!(
                        bits(state.color.lane(lane)),
                        bits(alone.color.lane(0)),
                        "{:?}",
                        at
                    );
                }
            }
        }
    }

    #[test]
    fn test_exact_tie_keeps_first_primitive() {
        let first = Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, PackedColor(0xFF0000));
        let twin = Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, PackedColor(0x0000FF));
        let packet = RayPacket::splat(Vec3::ZERO, Vec3::NEG_Z);
        let mut state = HitState::new();

        [first, twin].intersect(&packet, &mut state);

        assert_eq!(state.best_t.to_array()[0], 2.0);
        assert_eq!(state.color.lane(0), Vec3::X);
    }

    #[test]
    fn test_inactive_lanes_never_update() {
        let plane = Plane::new(Vec3::Z, 6.0, PackedColor::WHITE);
        let mut packet = RayPacket::splat(Vec3::ZERO, Vec3::NEG_Z);
        packet.active = LaneMask::first(2);
        let mut state = HitState::new();

        plane.intersect(&packet, &mut state);

        assert_eq!(state.hit_mask().count(), 2);
        assert_eq!(state.best_t.to_array()[2], MISS_DISTANCE);
    }
}

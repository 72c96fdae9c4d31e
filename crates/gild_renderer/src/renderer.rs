//! Frame renderer.
//!
//! Drives every tile of the image through packet generation, intersection
//! dispatch, shading and the framebuffer writer. Single-threaded; the only
//! parallelism is across the lanes of each packet.

use std::time::Instant;

use gild_core::config::{AMBIENT, HEIGHT, WIDTH};
use gild_core::{select_scene, CoreError, SceneStore};
use gild_math::{lane_width, LANES};

use crate::hittable::{intersect_scene, HitState};
use crate::{generate_tiles, shade, Camera, Framebuffer};

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Ambient term added to every channel
    pub ambient: f32,
    /// Rays per packet, `1..=LANES`. Narrower packets leave lanes idle
    pub lanes: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            ambient: AMBIENT,
            lanes: lane_width(),
        }
    }
}

/// Render the scene into `framebuffer`.
///
/// Every pixel is written, so the framebuffer does not need clearing between
/// frames. Its dimensions must match `config`. The image does not depend on
/// `config.lanes`.
pub fn render_frame(scene: &SceneStore, config: &RenderConfig, framebuffer: &mut Framebuffer) {
    assert_eq!(
        (framebuffer.width, framebuffer.height),
        (config.width, config.height),
        "framebuffer does not match render config"
    );
    assert!(
        (1..=LANES).contains(&config.lanes),
        "packet width {} outside 1..={}",
        config.lanes,
        LANES
    );

    let start = Instant::now();
    let camera = Camera::new(config.width, config.height);
    let light = scene.light.normalized();
    let tiles = generate_tiles(config.width, config.height, config.lanes);

    for tile in &tiles {
        let packet = camera.packet(tile);
        let mut state = HitState::new();
        intersect_scene(scene, &packet, &mut state);

        let color = shade(state.normal, state.color, light, config.ambient);
        framebuffer.write_packet(tile, &color);
    }

    log::debug!(
        "Rendered {}x{} in {} tiles ({} primitives) in {:?}",
        config.width,
        config.height,
        tiles.len(),
        scene.primitive_count(),
        start.elapsed()
    );
}

/// Select scene `index` into a fresh store and render it at the default
/// configuration.
pub fn render_scene(index: usize) -> Result<Framebuffer, CoreError> {
    let mut scene = SceneStore::baseline();
    select_scene(&mut scene, index)?;

    let config = RenderConfig::default();
    let mut framebuffer = Framebuffer::new(config.width, config.height);
    render_frame(&scene, &config, &mut framebuffer);
    Ok(framebuffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generate_packet, Intersect};
    use gild_core::config::{IMAGE_BYTES, SCENE_COUNT};
    use gild_math::Vec3;

    #[test]
    fn test_render_is_deterministic() {
        let first = render_scene(0).unwrap();
        let second = render_scene(0).unwrap();

        assert_eq!(first.as_bytes().len(), IMAGE_BYTES);
        assert_eq!(first.first_mismatch(second.as_bytes()), None);
    }

    #[test]
    fn test_center_pixel_hits_first_sphere() {
        let scene = SceneStore::baseline();
        let packet = generate_packet(320, 240, WIDTH, HEIGHT, lane_width());

        let mut spheres_only = HitState::new();
        scene.spheres[..1].intersect(&packet, &mut spheres_only);
        let t0 = spheres_only.best_t.to_array()[0];
        assert!((t0 - 2.0).abs() < 0.01, "t0 = {}", t0);

        let mut full = HitState::new();
        intersect_scene(&scene, &packet, &mut full);
        assert_eq!(full.best_t.to_array()[0], t0);
        assert_eq!(full.color.lane(0), Vec3::X);
    }

    #[test]
    fn test_center_pixel_faces_away_from_light() {
        // The light points along -Z, so N·L < 0 on the front of the sphere
        // and only the ambient term survives.
        let framebuffer = render_scene(0).unwrap();
        assert_eq!(framebuffer.pixel(320, 240), [25, 25, 25]);
    }

    #[test]
    fn test_ceiling_is_lit() {
        // Top-left pixel sees the y = 1 plane, N·L = 1/√3
        let framebuffer = render_scene(0).unwrap();
        let [r, g, b] = framebuffer.pixel(0, 0);
        assert!(r > 25 && r == g && g == b, "{:?}", [r, g, b]);
    }

    #[test]
    fn test_miss_is_ambient() {
        let scene = SceneStore::empty();
        let config = RenderConfig {
            width: 16,
            height: 4,
            ambient: 0.1,
            ..RenderConfig::default()
        };
        let mut framebuffer = Framebuffer::new(16, 4);
        render_frame(&scene, &config, &mut framebuffer);

        assert!(framebuffer.as_bytes().iter().all(|&b| b == 25));
    }

    #[test]
    fn test_partial_tiles_fill_every_pixel() {
        let scene = SceneStore::baseline();
        let config = RenderConfig {
            width: 13,
            height: 3,
            ambient: 1.0,
            ..RenderConfig::default()
        };
        let mut framebuffer = Framebuffer::new(13, 3);
        render_frame(&scene, &config, &mut framebuffer);

        // Ambient 1.0 saturates every channel of every pixel
        assert!(framebuffer.as_bytes().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_output_is_independent_of_packet_width() {
        for index in [0, 5, 9] {
            let mut scene = SceneStore::baseline();
            select_scene(&mut scene, index).unwrap();

            let render = |lanes: usize| {
                let config = RenderConfig {
                    width: 90,
                    height: 60,
                    lanes,
                    ..RenderConfig::default()
                };
                let mut framebuffer = Framebuffer::new(config.width, config.height);
                render_frame(&scene, &config, &mut framebuffer);
                framebuffer
            };

            let full = render(lane_width());
            for lanes in [1, 3, LANES - 1] {
                let narrow = render(lanes);
                assert_eq!(
                    full.first_mismatch(narrow.as_bytes()),
                    None,
                    "scene {} with {} lanes",
                    index,
                    lanes
                );
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_oversized_packet_width_panics() {
        let config = RenderConfig {
            width: 8,
            height: 8,
            lanes: LANES + 1,
            ..RenderConfig::default()
        };
        let mut framebuffer = Framebuffer::new(8, 8);
        render_frame(&SceneStore::baseline(), &config, &mut framebuffer);
    }

    #[test]
    fn test_torus_scene_differs_from_baseline() {
        let baseline = render_scene(0).unwrap();
        let torus = render_scene(5).unwrap();
        assert!(baseline.first_mismatch(torus.as_bytes()).is_some());
    }

    #[test]
    fn test_out_of_range_scene_fails() {
        assert!(matches!(
            render_scene(SCENE_COUNT),
            Err(CoreError::SceneIndex { .. })
        ));
    }

    #[test]
    #[should_panic]
    fn test_mismatched_framebuffer_panics() {
        let mut framebuffer = Framebuffer::new(8, 8);
        render_frame(&SceneStore::baseline(), &RenderConfig::default(), &mut framebuffer);
    }
}

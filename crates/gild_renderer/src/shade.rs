//! Single-light ambient + diffuse shading.

use gild_math::{f32x8, Vec3, Vec3x8};

/// Shade one packet.
///
/// Each channel is `albedo * max(0, N·L) + ambient`. The ambient term is not
/// scaled by albedo and nothing is clamped here; the framebuffer clamps on
/// write. `light` must already be unit length.
#[inline]
pub fn shade(normal: Vec3x8, albedo: Vec3x8, light: Vec3, ambient: f32) -> Vec3x8 {
    let ndotl = normal.dot(Vec3x8::splat(light)).max(f32x8::ZERO);
    let ambient = f32x8::splat(ambient);

    Vec3x8::new(
        albedo.x * ndotl + ambient,
        albedo.y * ndotl + ambient,
        albedo.z * ndotl + ambient,
    )
}

//! Truncated Taylor sine/cosine used to lay out procedural meshes.
//!
//! These are deliberately low precision (around 1e-3 near ±π). Mesh vertices
//! feed straight into the golden images, so the exact series and wrap
//! constants must not change without re-baking every reference image.

const WRAP_LIMIT: f32 = 3.14159;
const WRAP_PERIOD: f32 = 6.28318;

#[inline]
fn wrap(mut x: f32) -> f32 {
    while x > WRAP_LIMIT {
        x -= WRAP_PERIOD;
    }
    while x < -WRAP_LIMIT {
        x += WRAP_PERIOD;
    }
    x
}

/// `x(1 - x²/6 + x⁴/120)` after wrapping into `[-π, π]`.
#[inline]
pub fn taylor_sin(x: f32) -> f32 {
    let x = wrap(x);
    let x2 = x * x;
    x * (1.0 - x2 / 6.0 + (x2 * x2) / 120.0)
}

/// `1 - x²/2 + x⁴/24` after wrapping into `[-π, π]`.
#[inline]
pub fn taylor_cos(x: f32) -> f32 {
    let x = wrap(x);
    let x2 = x * x;
    1.0 - x2 / 2.0 + (x2 * x2) / 24.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_at_zero() {
        assert_eq!(taylor_sin(0.0), 0.0);
        assert_eq!(taylor_cos(0.0), 1.0);
    }

    #[test]
    fn test_close_to_libm_for_small_angles() {
        for i in -10..=10 {
            let x = i as f32 * 0.1;
            assert!((taylor_sin(x) - x.sin()).abs() < 1e-3, "sin({})", x);
            assert!((taylor_cos(x) - x.cos()).abs() < 2e-3, "cos({})", x);
        }
    }

    #[test]
    fn test_wraps_full_turns() {
        let x = 0.5f32;
        assert!((taylor_sin(x + WRAP_PERIOD) - taylor_sin(x)).abs() < 1e-5);
        assert!((taylor_cos(x - 2.0 * WRAP_PERIOD) - taylor_cos(x)).abs() < 1e-5);
    }

    #[test]
    fn test_low_precision_near_pi() {
        // The truncated series is visibly off near the wrap point.
        let s = taylor_sin(3.0);
        assert!((s - 3.0f32.sin()).abs() > 1e-2);
        assert!((taylor_cos(3.0) - 3.0f32.cos()).abs() > 0.5);
    }
}

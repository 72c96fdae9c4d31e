//! Triangle geometry for the scene store.
//!
//! Triangles live in a fixed-capacity `TriangleList` (the "flat BVH": a plain
//! list scanned in index order). Procedural meshes are produced by
//! [`build_torus`] and loaded with [`TriangleList::replace_saturating`], which
//! keeps the historical silent-drop behaviour but reports how much was lost.

use arrayvec::ArrayVec;
use gild_math::{taylor_cos, taylor_sin, Vec3};

use crate::config::MAX_TRIANGLES;
use crate::error::CoreError;
use crate::scene::PackedColor;

/// A single flat-colored triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub color: PackedColor,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, color: PackedColor) -> Self {
        Self { v0, v1, v2, color }
    }
}

/// Bounded triangle collection holding at most `MAX_TRIANGLES` entries.
#[derive(Clone, Debug, Default)]
pub struct TriangleList {
    triangles: ArrayVec<Triangle, MAX_TRIANGLES>,
}

impl TriangleList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a triangle, failing once the list is full.
    pub fn try_push(&mut self, triangle: Triangle) -> Result<(), CoreError> {
        self.triangles
            .try_push(triangle)
            .map_err(|_| CoreError::TriangleCapacity {
                capacity: MAX_TRIANGLES,
            })
    }

    /// Append as many triangles as fit and return how many were dropped.
    pub fn extend_saturating<I>(&mut self, triangles: I) -> usize
    where
        I: IntoIterator<Item = Triangle>,
    {
        let mut dropped = 0;
        for triangle in triangles {
            if self.try_push(triangle).is_err() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::warn!(
                "Triangle list full ({} max), dropped {} triangles",
                MAX_TRIANGLES,
                dropped
            );
        }
        dropped
    }

    /// Clear, then load `triangles`. Returns the number dropped.
    pub fn replace_saturating<I>(&mut self, triangles: I) -> usize
    where
        I: IntoIterator<Item = Triangle>,
    {
        self.clear();
        self.extend_saturating(triangles)
    }

    pub fn clear(&mut self) {
        self.triangles.clear();
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        MAX_TRIANGLES
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    pub fn as_slice(&self) -> &[Triangle] {
        &self.triangles
    }
}

impl<'a> IntoIterator for &'a TriangleList {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parameters of the procedural torus.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TorusParams {
    /// Distance from the torus center to the tube center
    pub major_radius: f32,
    /// Tube radius
    pub minor_radius: f32,
    /// Grid resolution along both angles
    pub segments: u32,
    pub color: PackedColor,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            major_radius: 1.5,
            minor_radius: 0.5,
            segments: 8,
            color: PackedColor(0xFF8800),
        }
    }
}

/// Full turn used for the angle grid. Matches the trig wrap period.
const TURN: f32 = 6.28318;

/// Tessellate a torus lying in the XZ plane around the origin.
///
/// Produces `2 * segments²` triangles, two per grid quad, emitted as
/// `(v0, v1, v2)` then `(v2, v1, v3)`. Vertex positions use the truncated
/// Taylor trig from `gild_math` so the mesh is reproducible bit for bit.
pub fn build_torus(params: &TorusParams) -> Vec<Triangle> {
    let seg = params.segments;
    let big_r = params.major_radius;
    let r = params.minor_radius;

    let vertex = |theta: f32, phi: f32| {
        let ring = big_r + r * taylor_cos(phi);
        Vec3::new(ring * taylor_cos(theta), r * taylor_sin(phi), -ring * taylor_sin(theta))
    };

    let mut triangles = Vec::with_capacity((2 * seg * seg) as usize);
    for i in 0..seg {
        for j in 0..seg {
            let t0 = i as f32 / seg as f32 * TURN;
            let t1 = (i + 1) as f32 / seg as f32 * TURN;
            let p0 = j as f32 / seg as f32 * TURN;
            let p1 = (j + 1) as f32 / seg as f32 * TURN;

            let v0 = vertex(t0, p0);
            let v1 = vertex(t0, p1);
            let v2 = vertex(t1, p0);
            let v3 = vertex(t1, p1);

            triangles.push(Triangle::new(v0, v1, v2, params.color));
            triangles.push(Triangle::new(v2, v1, v3, params.color));
        }
    }

    triangles
}

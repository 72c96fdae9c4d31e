//! Scene store for the packet ray tracer.
//!
//! A `SceneStore` owns every primitive of one frame plus the single
//! directional light. It is reset and patched in place between frames by
//! [`SceneStore::select`] and handed to the renderer by shared reference.

use gild_math::Vec3;

use crate::mesh::TriangleList;

/// 0xRRGGBB color as stored in scene data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PackedColor(pub u32);

impl PackedColor {
    pub const BLACK: PackedColor = PackedColor(0x000000);
    pub const WHITE: PackedColor = PackedColor(0xFFFFFF);

    /// Channels in `[0, 1]`, each byte divided by 255.
    #[inline]
    pub fn to_rgb(self) -> Vec3 {
        Vec3::new(
            ((self.0 >> 16) & 0xFF) as f32 / 255.0,
            ((self.0 >> 8) & 0xFF) as f32 / 255.0,
            (self.0 & 0xFF) as f32 / 255.0,
        )
    }
}

/// A sphere primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    /// Always > 0
    pub radius: f32,
    pub color: PackedColor,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, color: PackedColor) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive");
        Self {
            center,
            radius,
            color,
        }
    }
}

/// Infinite plane `N·P + d = 0`.
///
/// The normal is used exactly as stored, both for intersection and shading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
    pub color: PackedColor,
}

impl Plane {
    pub fn new(normal: Vec3, d: f32, color: PackedColor) -> Self {
        Self { normal, d, color }
    }
}

/// Y-aligned cylinder side wall from `base.y` to `base.y + height`. No caps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cylinder {
    pub base: Vec3,
    pub radius: f32,
    pub height: f32,
    pub color: PackedColor,
}

impl Cylinder {
    pub fn new(base: Vec3, radius: f32, height: f32, color: PackedColor) -> Self {
        debug_assert!(radius > 0.0 && height > 0.0);
        Self {
            base,
            radius,
            height,
            color,
        }
    }
}

/// Horizontal disk in the plane `y = center.y`, facing +Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disk {
    pub center: Vec3,
    pub radius: f32,
    pub color: PackedColor,
}

impl Disk {
    pub fn new(center: Vec3, radius: f32, color: PackedColor) -> Self {
        debug_assert!(radius > 0.0, "disk radius must be positive");
        Self {
            center,
            radius,
            color,
        }
    }
}

/// Directional light. The direction is stored raw and normalized per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub direction: Vec3,
}

impl Light {
    pub fn new(direction: Vec3) -> Self {
        Self { direction }
    }

    /// Unit-length direction, each component divided by the length.
    pub fn normalized(&self) -> Vec3 {
        let d = self.direction;
        let len = (d.x * d.x + d.y * d.y + d.z * d.z).sqrt();
        Vec3::new(d.x / len, d.y / len, d.z / len)
    }
}

/// Every primitive of one frame.
///
/// Intersection order is fixed by the renderer: spheres, planes, cylinders,
/// disks, triangles, each in index order.
#[derive(Clone, Debug, Default)]
pub struct SceneStore {
    pub spheres: Vec<Sphere>,
    pub planes: Vec<Plane>,
    pub cylinders: Vec<Cylinder>,
    pub disks: Vec<Disk>,
    pub triangles: TriangleList,
    pub light: Light,
}

impl Default for Light {
    fn default() -> Self {
        Self::new(Vec3::new(1.0, 1.0, -1.0))
    }
}

impl SceneStore {
    /// Scene with no primitives and the default light.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The common starting point every preset patches.
    pub fn baseline() -> Self {
        let mut scene = Self::empty();
        scene.reset();
        scene
    }

    /// Overwrite every field with the baseline scene.
    pub fn reset(&mut self) {
        self.spheres.clear();
        self.spheres.extend([
            Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, PackedColor(0xFF0000)),
            Sphere::new(Vec3::new(2.0, 0.0, -4.0), 1.0, PackedColor(0x00FF00)),
            Sphere::new(Vec3::new(-2.0, 0.0, -4.5), 1.0, PackedColor(0x0000FF)),
            Sphere::new(Vec3::new(1.0, -1.0, -5.0), 0.8, PackedColor(0xFFFF00)),
            Sphere::new(Vec3::new(-1.5, -0.5, -6.0), 1.2, PackedColor(0xFF00FF)),
        ]);

        self.planes.clear();
        self.planes.extend([
            Plane::new(Vec3::new(0.0, 1.0, 0.0), -1.0, PackedColor(0xAAAAAA)),
            Plane::new(Vec3::new(0.0, 0.0, 1.0), 6.0, PackedColor(0xCCCCCC)),
        ]);

        self.cylinders.clear();
        self.cylinders.push(Cylinder::new(
            Vec3::new(0.0, -1.0, -5.0),
            1.0,
            2.0,
            PackedColor(0x00FFFF),
        ));

        self.disks.clear();
        self.disks
            .push(Disk::new(Vec3::new(2.0, -1.0, -4.0), 1.5, PackedColor(0xFFFF00)));

        self.triangles.clear();
        self.light = Light::default();
    }

    /// Total number of primitives across all collections.
    pub fn primitive_count(&self) -> usize {
        self.spheres.len()
            + self.planes.len()
            + self.cylinders.len()
            + self.disks.len()
            + self.triangles.len()
    }
}

//! The ten canned regression scenes.
//!
//! Every preset starts from [`SceneStore::reset`] and applies a small data
//! patch. Presets `Torus` and `TorusCloseUp` also rebuild the triangle mesh;
//! all others leave the triangle list empty.

use std::fmt;

use crate::config::SCENE_COUNT;
use crate::error::CoreError;
use crate::mesh::{build_torus, TorusParams};
use crate::scene::{PackedColor, SceneStore};

/// One of the ten golden scenes, in index order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScenePreset {
    Baseline,
    MirroredLight,
    LargeSpheres,
    WideDisk,
    LightFromBelow,
    Torus,
    TallCylinder,
    DistantSpheres,
    SmallWhiteSpheres,
    TorusCloseUp,
}

impl ScenePreset {
    /// All presets in index order.
    pub const ALL: [ScenePreset; SCENE_COUNT] = [
        ScenePreset::Baseline,
        ScenePreset::MirroredLight,
        ScenePreset::LargeSpheres,
        ScenePreset::WideDisk,
        ScenePreset::LightFromBelow,
        ScenePreset::Torus,
        ScenePreset::TallCylinder,
        ScenePreset::DistantSpheres,
        ScenePreset::SmallWhiteSpheres,
        ScenePreset::TorusCloseUp,
    ];

    /// Look up a preset by scene index.
    pub fn from_index(index: usize) -> Result<Self, CoreError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(CoreError::SceneIndex {
                index,
                count: SCENE_COUNT,
            })
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ScenePreset::Baseline => "baseline",
            ScenePreset::MirroredLight => "mirrored light",
            ScenePreset::LargeSpheres => "large spheres",
            ScenePreset::WideDisk => "wide disk",
            ScenePreset::LightFromBelow => "light from below",
            ScenePreset::Torus => "torus",
            ScenePreset::TallCylinder => "tall cylinder",
            ScenePreset::DistantSpheres => "distant spheres",
            ScenePreset::SmallWhiteSpheres => "small white spheres",
            ScenePreset::TorusCloseUp => "torus close-up",
        }
    }

    /// Whether this preset builds the torus mesh.
    pub fn has_mesh(self) -> bool {
        matches!(self, ScenePreset::Torus | ScenePreset::TorusCloseUp)
    }
}

impl fmt::Display for ScenePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.index(), self.name())
    }
}

impl SceneStore {
    /// Reset to the baseline and apply `preset`.
    pub fn select(&mut self, preset: ScenePreset) {
        self.reset();

        match preset {
            ScenePreset::Baseline => {}
            ScenePreset::MirroredLight => {
                self.light.direction.x = -1.0;
                self.planes[0].color = PackedColor(0xFF00FF);
                self.spheres[0].center.x = -3.0;
            }
            ScenePreset::LargeSpheres => {
                for sphere in &mut self.spheres {
                    sphere.radius = 1.2;
                }
                self.cylinders[0].color = PackedColor(0xFFFF00);
            }
            ScenePreset::WideDisk => {
                self.disks[0].radius = 3.0;
                self.disks[0].color = PackedColor(0xFF00FF);
            }
            ScenePreset::LightFromBelow => {
                self.light.direction.x = 0.0;
                self.light.direction.y = -1.0;
                self.spheres[1].center.x += 2.0;
                self.spheres[2].center.x -= 2.0;
            }
            ScenePreset::Torus => {}
            ScenePreset::TallCylinder => {
                self.cylinders[0].height = 4.0;
                self.cylinders[0].radius = 0.7;
            }
            ScenePreset::DistantSpheres => {
                self.spheres[0].center.z = -10.0;
                self.spheres[4].center.z = -12.0;
                self.planes[1].color = PackedColor(0x00FF00);
            }
            ScenePreset::SmallWhiteSpheres => {
                self.planes[0].color = PackedColor::BLACK;
                for sphere in &mut self.spheres {
                    sphere.radius = 0.4;
                    sphere.color = PackedColor::WHITE;
                }
            }
            ScenePreset::TorusCloseUp => {
                self.spheres[0].center.z = -1.5;
                self.spheres[1].center.z = -2.0;
            }
        }

        if preset.has_mesh() {
            self.triangles
                .replace_saturating(build_torus(&TorusParams::default()));
        }

        log::debug!(
            "Selected scene {}: {} primitives",
            preset,
            self.primitive_count()
        );
    }
}

/// Reset `scene` and apply the preset at `index`.
///
/// Fails with [`CoreError::SceneIndex`] for indices outside `0..SCENE_COUNT`,
/// leaving the scene untouched.
pub fn select_scene(scene: &mut SceneStore, index: usize) -> Result<ScenePreset, CoreError> {
    let preset = ScenePreset::from_index(index)?;
    scene.select(preset);
    Ok(preset)
}

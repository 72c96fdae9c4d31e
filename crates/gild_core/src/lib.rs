//! Gild Core - scene data for the packet ray tracer.
//!
//! This crate provides:
//!
//! - **Scene store**: `SceneStore` owning every primitive and the light
//! - **Primitives**: `Sphere`, `Plane`, `Cylinder`, `Disk`, `Triangle`
//! - **Mesh builder**: procedural torus into a bounded `TriangleList`
//! - **Scene presets**: the ten canned regression scenes
//!
//! # Example
//!
//! ```
//! use gild_core::{SceneStore, ScenePreset};
//!
//! let mut scene = SceneStore::baseline();
//! scene.select(ScenePreset::Torus);
//! assert_eq!(scene.triangles.len(), 128);
//! ```

pub mod config;
pub mod error;
pub mod mesh;
pub mod presets;
pub mod scene;

// Re-export commonly used types
pub use error::CoreError;
pub use mesh::{build_torus, Triangle, TriangleList, TorusParams};
pub use presets::{select_scene, ScenePreset};
pub use scene::{Cylinder, Disk, Light, PackedColor, Plane, SceneStore, Sphere};

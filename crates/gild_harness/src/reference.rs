//! Golden reference images, one per scene.
//!
//! A table can be filled from a directory of `output_<N>.ppm` files written
//! by a generate run, from a baked table file, or directly from memory. A
//! baked table is the `SCENE_COUNT` raw RGB images concatenated in scene
//! order with no header.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use gild_core::config::SCENE_COUNT;
use gild_core::ScenePreset;

use crate::error::{GoldenError, GoldenResult};
use crate::ppm::{read_ppm, rgb_len};

/// File name of the golden image for `scene` inside an output directory.
pub fn scene_file_name(scene: usize) -> String {
    format!("output_{}.ppm", scene)
}

/// Parse a scene index back out of an `output_<N>.ppm` file name.
fn parse_scene_file_name(name: &str) -> Option<usize> {
    name.strip_prefix("output_")?
        .strip_suffix(".ppm")?
        .parse()
        .ok()
}

/// Reference images indexed by scene.
#[derive(Clone, Debug)]
pub struct ReferenceTable {
    width: u32,
    height: u32,
    image_len: usize,
    images: Vec<Option<Vec<u8>>>,
}

impl ReferenceTable {
    /// An empty table for `width` x `height` images.
    ///
    /// Fails when either dimension is zero or the image size overflows.
    pub fn new(width: u32, height: u32) -> GoldenResult<Self> {
        let image_len = rgb_len(width, height)?;
        if image_len == 0 {
            return Err(GoldenError::ImageSize { width, height });
        }
        Ok(Self {
            width,
            height,
            image_len,
            images: vec![None; SCENE_COUNT],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes in one image.
    pub fn image_len(&self) -> usize {
        self.image_len
    }

    /// Store the reference for `scene`, replacing any previous one.
    pub fn insert(&mut self, scene: usize, pixels: Vec<u8>) -> GoldenResult<()> {
        ScenePreset::from_index(scene)?;
        if pixels.len() != self.image_len() {
            return Err(GoldenError::SizeMismatch {
                name: format!("scene {} reference", scene),
                expected: self.image_len(),
                found: pixels.len(),
            });
        }
        self.images[scene] = Some(pixels);
        Ok(())
    }

    /// Reference bytes for `scene`, if present.
    pub fn get(&self, scene: usize) -> Option<&[u8]> {
        self.images.get(scene)?.as_deref()
    }

    /// Number of scenes with a reference.
    pub fn len(&self) -> usize {
        self.images.iter().filter(|image| image.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when every scene has a reference.
    pub fn is_complete(&self) -> bool {
        self.len() == SCENE_COUNT
    }

    /// Build a table from in-memory images, scene `i` taken from `images[i]`.
    pub fn from_images(width: u32, height: u32, images: Vec<Vec<u8>>) -> GoldenResult<Self> {
        let mut table = Self::new(width, height)?;
        for (scene, pixels) in images.into_iter().enumerate() {
            table.insert(scene, pixels)?;
        }
        Ok(table)
    }

    /// Load every `output_<N>.ppm` in `dir`.
    ///
    /// Files whose index is outside the scene range are skipped with a
    /// warning. Two files naming the same scene (`output_1.ppm` and
    /// `output_01.ppm`) are an error. Every image must match `width` x `height`.
    pub fn from_dir(dir: &Path, width: u32, height: u32) -> GoldenResult<Self> {
        let entries = std::fs::read_dir(dir).map_err(|source| GoldenError::Read {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut found: Vec<(usize, PathBuf)> = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let Some(scene) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(parse_scene_file_name)
            else {
                continue;
            };
            if scene >= SCENE_COUNT {
                log::warn!("Ignoring {}: no scene {}", path.display(), scene);
                continue;
            }
            found.push((scene, path));
        }
        found.sort();
        if let Some(pair) = found.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(GoldenError::DuplicateScene {
                scene: pair[0].0,
                first: pair[0].1.clone(),
                second: pair[1].1.clone(),
            });
        }

        let mut table = Self::new(width, height)?;
        for (scene, path) in found {
            let image = read_ppm(&path)?;
            if (image.width, image.height) != (width, height) {
                return Err(GoldenError::Dimensions {
                    name: path.display().to_string(),
                    width,
                    height,
                    found_width: image.width,
                    found_height: image.height,
                });
            }
            table.insert(scene, image.pixels)?;
        }

        log::debug!("Loaded {} reference images from {}", table.len(), dir.display());
        Ok(table)
    }

    /// Load a baked table file.
    pub fn from_table_file(path: &Path, width: u32, height: u32) -> GoldenResult<Self> {
        let bytes = std::fs::read(path).map_err(|source| GoldenError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut table = Self::new(width, height)?;
        let image_len = table.image_len();
        let expected = image_len
            .checked_mul(SCENE_COUNT)
            .ok_or(GoldenError::ImageSize { width, height })?;
        if bytes.len() != expected {
            return Err(GoldenError::SizeMismatch {
                name: path.display().to_string(),
                expected,
                found: bytes.len(),
            });
        }

        for (scene, chunk) in bytes.chunks_exact(image_len).enumerate() {
            table.insert(scene, chunk.to_vec())?;
        }
        Ok(table)
    }

    /// Load from a directory of PPM files or from a baked table file.
    pub fn load(path: &Path, width: u32, height: u32) -> GoldenResult<Self> {
        if path.is_dir() {
            Self::from_dir(path, width, height)
        } else {
            Self::from_table_file(path, width, height)
        }
    }

    /// Write the baked table. Every scene must have a reference.
    pub fn write_table(&self, path: &Path) -> GoldenResult<()> {
        if let Some(missing) = self.images.iter().position(Option::is_none) {
            return Err(GoldenError::MissingScene(missing));
        }

        let mut writer = BufWriter::new(File::create(path)?);
        for pixels in self.images.iter().flatten() {
            writer.write_all(pixels)?;
        }
        writer.flush()?;
        Ok(())
    }
}

//! Generate, validate and bake runs.
//!
//! Both render modes walk the selected scenes in index order, rendering each
//! into one reused framebuffer. Generate writes every frame to disk;
//! validate compares every frame byte for byte with its reference.

use std::path::{Path, PathBuf};
use std::time::Instant;

use gild_core::config::SCENE_COUNT;
use gild_core::{select_scene, SceneStore, ScenePreset};
use gild_renderer::{render_frame, Framebuffer, RenderConfig};

use crate::error::{GoldenError, GoldenResult};
use crate::ppm::write_ppm;
use crate::reference::{scene_file_name, ReferenceTable};
use crate::sink::DiagnosticSink;

/// What validate does after a scene fails.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failing scene
    #[default]
    Halt,
    /// Render every scene and report all failures
    Continue,
}

/// Options shared by generate and validate.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub render: RenderConfig,
    /// Scene indices to run, in order
    pub scenes: Vec<usize>,
    pub policy: FailurePolicy,
    /// Also write a PNG preview next to each generated PPM
    pub png: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            scenes: (0..SCENE_COUNT).collect(),
            policy: FailurePolicy::Halt,
            png: false,
        }
    }
}

impl HarnessConfig {
    /// Restrict the run to a single scene.
    pub fn with_scene(mut self, scene: usize) -> GoldenResult<Self> {
        ScenePreset::from_index(scene)?;
        self.scenes = vec![scene];
        Ok(self)
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_png(mut self, png: bool) -> Self {
        self.png = png;
        self
    }
}

/// First differing byte of a failed scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub scene: usize,
    /// Byte offset into the RGB framebuffer
    pub offset: usize,
}

impl Mismatch {
    /// Pixel coordinates of the mismatching byte.
    pub fn pixel(&self, width: u32) -> (u32, u32) {
        let pixel = (self.offset / 3) as u32;
        (pixel % width, pixel / width)
    }
}

/// Outcome of a validate run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Scenes that matched, in run order
    pub passed: Vec<usize>,
    /// Scenes that did not match, in run order
    pub failed: Vec<Mismatch>,
    /// The earliest failing scene of the run
    pub first_failure: Option<Mismatch>,
}

impl ValidationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn record_failure(&mut self, mismatch: Mismatch) {
        self.first_failure.get_or_insert(mismatch);
        self.failed.push(mismatch);
    }
}

/// Owns the scene store and framebuffer shared by every scene of a run.
struct SceneRunner {
    scene: SceneStore,
    framebuffer: Framebuffer,
    render: RenderConfig,
}

impl SceneRunner {
    fn new(render: RenderConfig) -> Self {
        Self {
            scene: SceneStore::baseline(),
            framebuffer: Framebuffer::new(render.width, render.height),
            render,
        }
    }

    fn render(&mut self, index: usize) -> GoldenResult<&Framebuffer> {
        let start = Instant::now();
        let preset = select_scene(&mut self.scene, index)?;
        self.framebuffer.clear();
        render_frame(&self.scene, &self.render, &mut self.framebuffer);
        log::info!("Rendered scene {} in {:?}", preset, start.elapsed());
        Ok(&self.framebuffer)
    }
}

/// Render the selected scenes and write `output_<N>.ppm` for each into
/// `out_dir`, creating it if needed. Returns the written PPM paths.
pub fn run_generate(
    config: &HarnessConfig,
    out_dir: &Path,
    sink: &mut dyn DiagnosticSink,
) -> GoldenResult<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;
    sink.put_string("Rendering Scenes");

    let mut runner = SceneRunner::new(config.render);
    let mut written = Vec::with_capacity(config.scenes.len());

    for &index in &config.scenes {
        let framebuffer = runner.render(index)?;

        let path = out_dir.join(scene_file_name(index));
        write_ppm(&path, framebuffer.width, framebuffer.height, framebuffer.as_bytes())?;
        log::info!("Wrote {}", path.display());

        if config.png {
            let preview = path.with_extension("png");
            write_png(&preview, framebuffer)?;
            log::info!("Wrote {}", preview.display());
        }

        written.push(path);
    }

    Ok(written)
}

/// Render the selected scenes and compare each with its reference.
///
/// A missing reference is an error, not a failed scene. Dimension mismatches
/// between the table and the render config are rejected before rendering.
pub fn run_validate(
    config: &HarnessConfig,
    references: &ReferenceTable,
    sink: &mut dyn DiagnosticSink,
) -> GoldenResult<ValidationReport> {
    let (width, height) = (config.render.width, config.render.height);
    if (references.width(), references.height()) != (width, height) {
        return Err(GoldenError::Dimensions {
            name: "reference table".to_string(),
            width,
            height,
            found_width: references.width(),
            found_height: references.height(),
        });
    }
    if let Some(&missing) = config.scenes.iter().find(|&&s| references.get(s).is_none()) {
        return Err(GoldenError::MissingScene(missing));
    }

    sink.put_string("Rendering Scenes");

    let mut runner = SceneRunner::new(config.render);
    let mut report = ValidationReport::default();

    for &index in &config.scenes {
        let framebuffer = runner.render(index)?;
        let reference = references
            .get(index)
            .ok_or(GoldenError::MissingScene(index))?;

        match framebuffer.first_mismatch(reference) {
            None => {
                sink.put_string(&format!("scene {} Pass", index));
                report.passed.push(index);
            }
            Some(offset) => {
                let mismatch = Mismatch {
                    scene: index,
                    offset,
                };
                let (x, y) = mismatch.pixel(width);
                log::warn!(
                    "Scene {} differs at byte {} (pixel {}, {})",
                    index,
                    offset,
                    x,
                    y
                );
                report.record_failure(mismatch);
                sink.put_string(&format!("scene {} Fail", index));

                if config.policy == FailurePolicy::Halt {
                    sink.put_string("TEST FAIL");
                    return Ok(report);
                }
            }
        }
    }

    sink.put_string(if report.is_success() {
        "TEST PASS"
    } else {
        "TEST FAIL"
    });
    Ok(report)
}

/// Read the PPM directory and write the baked table file.
///
/// Returns the number of scenes baked.
pub fn bake(ppm_dir: &Path, table_path: &Path, width: u32, height: u32) -> GoldenResult<usize> {
    let table = ReferenceTable::from_dir(ppm_dir, width, height)?;
    table.write_table(table_path)?;
    log::info!(
        "Baked {} scenes from {} into {}",
        table.len(),
        ppm_dir.display(),
        table_path.display()
    );
    Ok(table.len())
}

fn write_png(path: &Path, framebuffer: &Framebuffer) -> GoldenResult<()> {
    let image = image::RgbImage::from_raw(
        framebuffer.width,
        framebuffer.height,
        framebuffer.as_bytes().to_vec(),
    )
    .ok_or_else(|| GoldenError::SizeMismatch {
        name: path.display().to_string(),
        expected: framebuffer.width as usize * framebuffer.height as usize * 3,
        found: framebuffer.as_bytes().len(),
    })?;
    image.save(path)?;
    Ok(())
}

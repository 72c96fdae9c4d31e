//! Gild regression harness
//!
//! Renders the ten regression scenes and either writes them out as golden
//! PPM images or checks them byte for byte against a reference table.
//!
//! # Example
//!
//! ```no_run
//! use gild_harness::{run_validate, HarnessConfig, ReferenceTable, StdoutSink};
//! use std::path::Path;
//!
//! let config = HarnessConfig::default();
//! let references = ReferenceTable::load(
//!     Path::new("reference_ppm"),
//!     config.render.width,
//!     config.render.height,
//! )?;
//! let report = run_validate(&config, &references, &mut StdoutSink)?;
//! assert!(report.is_success());
//! # Ok::<(), gild_harness::GoldenError>(())
//! ```

mod error;
mod harness;
mod ppm;
mod reference;
mod sink;

pub use error::{GoldenError, GoldenResult};
pub use harness::{
    bake, run_generate, run_validate, FailurePolicy, HarnessConfig, Mismatch, ValidationReport,
};
pub use ppm::{decode_ppm, encode_ppm, read_ppm, write_ppm, PpmImage};
pub use reference::{scene_file_name, ReferenceTable};
pub use sink::{DiagnosticSink, StdoutSink};

/// Re-export the pieces of the renderer the harness is configured with
pub use gild_renderer::{Framebuffer, RenderConfig};

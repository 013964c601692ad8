//! CLI command implementations.
//!
//! - `clip` - Clip one polygon given as a point list
//! - `svg` - Clip every polygon in an SVG file
//! - `batch` - Run a YAML job file

pub mod clip;
pub mod common;
pub mod job;

pub use clip::{cmd_clip, cmd_svg};
pub use common::{parse_window, OutputFormat};
pub use job::cmd_batch;

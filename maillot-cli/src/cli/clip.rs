//! Clip commands: inline point lists and SVG documents.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info};

use maillot::{clip_polygon_in_rect, clip_polygons, extract_polygons_from_svg, parse_points, Polygon, Rect};

use super::common::{render, OutputFormat};

/// Write to `output` or stdout.
pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Execute the clip command: one polygon given on the command line.
pub fn cmd_clip(points: &str, rect: &Rect, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let outer = parse_points(points).context("Failed to parse --points")?;
    debug!(vertices = outer.len(), ?rect, "clipping polygon");

    let clipped = clip_polygon_in_rect(&outer, rect)?;
    let polygons = if clipped.is_empty() {
        info!("Polygon does not intersect the window");
        Vec::new()
    } else {
        vec![Polygon::new(clipped)]
    };

    write_output(&render(&polygons, rect, format, None)?, output)
}

/// Execute the svg command: clip every polygon found in an SVG file.
pub fn cmd_svg(input: &Path, rect: &Rect, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let start = Instant::now();
    let svg_content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let polygons = extract_polygons_from_svg(&svg_content)
        .with_context(|| format!("Failed to parse {}", input.display()))?;
    info!("Loaded {} polygons in {:?}", polygons.len(), start.elapsed());

    let start = Instant::now();
    let clipped = clip_polygons(&polygons, rect)?;
    info!(
        "Clipped {} polygons in {:?}, {} intersect the window",
        polygons.len(),
        start.elapsed(),
        clipped.len()
    );

    write_output(&render(&clipped, rect, format, Some(&svg_content))?, output)
}

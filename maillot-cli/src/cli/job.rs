//! Batch jobs: a YAML file naming a window and the polygons to clip.
//!
//! ```yaml
//! window:
//!   a: [2, 2]
//!   b: [6, 5]
//! format: json        # optional, text | json | svg
//! polygons:
//!   - id: triangle
//!     points: "3,4 3,1 5,3"
//!   - points: "4,4 1,11 12,1"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use maillot::{clip_polygon_in_rect, parse_points, Point, Polygon, Rect};

use super::clip::write_output;
use super::common::{render, OutputFormat};

/// A complete clipping job.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    /// Clipping window as two diagonal corners
    pub window: JobWindow,

    /// Default output format (overridden by `--format`)
    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Polygons to clip, in order
    pub polygons: Vec<JobPolygon>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobWindow {
    pub a: [f64; 2],
    pub b: [f64; 2],
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobPolygon {
    #[serde(default)]
    pub id: Option<String>,

    /// Vertices in SVG points syntax
    pub points: String,
}

impl Job {
    /// Load a job from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse job file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn rect(&self) -> Result<Rect> {
        let [ax, ay] = self.window.a;
        let [bx, by] = self.window.b;
        Ok(Rect::from_diagonal(Point::new(ax, ay), Point::new(bx, by))?)
    }

    /// Clip every polygon. Results keep their slot even when empty.
    pub fn run(&self) -> Result<(Rect, Vec<Polygon>)> {
        let rect = self.rect()?;
        let mut results = Vec::with_capacity(self.polygons.len());

        for (i, polygon) in self.polygons.iter().enumerate() {
            let name = polygon.id.clone().unwrap_or_else(|| format!("#{}", i));
            let outer = parse_points(&polygon.points)
                .with_context(|| format!("Polygon {}: bad points", name))?;
            let clipped = clip_polygon_in_rect(&outer, &rect)
                .with_context(|| format!("Polygon {}: clipping failed", name))?;

            if clipped.is_empty() {
                warn!("Polygon {} does not intersect the window", name);
            } else {
                debug!("Polygon {}: {} -> {} vertices", name, outer.len(), clipped.len());
            }
            results.push(Polygon::with_id(clipped, polygon.id.clone()));
        }

        Ok((rect, results))
    }
}

/// Execute the batch command.
pub fn cmd_batch(job_path: &Path, format: Option<OutputFormat>, output: Option<&Path>) -> Result<()> {
    let job = Job::load(job_path)?;
    info!("Loaded job with {} polygons", job.polygons.len());

    let (rect, results) = job.run()?;
    let format = format.or(job.format).unwrap_or(OutputFormat::Json);

    write_output(&render(&results, &rect, format, None)?, output)
}

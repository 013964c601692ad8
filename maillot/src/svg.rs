//! SVG input - extract polygons to clip from SVG documents.
//!
//! Uses usvg for complete SVG resolution (CSS, shapes to paths, etc.)
//! then walks the tree to extract path data as polygons.
//!
//! ## Curve Flattening
//!
//! SVG paths contain Bézier curves (cubic and quadratic). The clipper only
//! understands straight edges, so curves are "flattened" into line
//! segments with lyon_geom at a fixed tolerance.

use lyon_geom::{CubicBezierSegment, QuadraticBezierSegment, point};
use svgtypes::NumberListParser;
use thiserror::Error;

use crate::geometry::{Point, Polygon};

/// Error type for SVG input.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("SVG parse error: {0}")]
    Parse(String),

    #[error("No polygons found in SVG")]
    NoPolygons,

    #[error("invalid point list: {0}")]
    Points(String),
}

/// Tolerance for curve flattening.
/// Lower = more points, smoother curves, slower.
const CURVE_TOLERANCE: f32 = 0.1;

/// Consecutive points closer than this are merged.
const DEDUP_EPSILON: f64 = 1e-6;

/// Extract all polygons from an SVG document.
pub fn extract_polygons_from_svg(svg_content: &str) -> Result<Vec<Polygon>, SvgError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .map_err(|e| SvgError::Parse(e.to_string()))?;

    let mut polygons = Vec::new();
    extract_from_group(tree.root(), &mut polygons);

    if polygons.is_empty() {
        Err(SvgError::NoPolygons)
    } else {
        Ok(polygons)
    }
}

/// Parse a point list in SVG `points` attribute syntax, e.g. `"3,4 3,1 5,3"`.
///
/// Commas and whitespace both separate numbers; the count must be even.
pub fn parse_points(text: &str) -> Result<Vec<Point>, SvgError> {
    let numbers = NumberListParser::from(text)
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|e| SvgError::Points(e.to_string()))?;

    if numbers.len() % 2 != 0 {
        return Err(SvgError::Points(format!(
            "odd number of coordinates ({}) in {:?}",
            numbers.len(),
            text
        )));
    }

    Ok(numbers.chunks_exact(2).map(|xy| Point::new(xy[0], xy[1])).collect())
}

fn extract_from_group(group: &usvg::Group, polygons: &mut Vec<Polygon>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(group) => extract_from_group(group, polygons),
            usvg::Node::Path(path) => {
                if let Some(polygon) = path_to_polygon(path) {
                    polygons.push(polygon);
                }
            }
            // Ignore text, images, etc.
            _ => {}
        }
    }
}

/// Convert the first subpath of a usvg path to a polygon.
fn path_to_polygon(path: &usvg::Path) -> Option<Polygon> {
    use usvg::tiny_skia_path::PathSegment;

    let mut points = Vec::new();
    let mut last_point: Option<(f32, f32)> = None;

    for segment in path.data().segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                // Only the first subpath is a clipping subject
                if !points.is_empty() {
                    break;
                }
                points.push(Point::new(p.x as f64, p.y as f64));
                last_point = Some((p.x, p.y));
            }
            PathSegment::LineTo(p) => {
                points.push(Point::new(p.x as f64, p.y as f64));
                last_point = Some((p.x, p.y));
            }
            PathSegment::QuadTo(ctrl, p) => {
                if let Some((lx, ly)) = last_point {
                    let curve = QuadraticBezierSegment {
                        from: point(lx, ly),
                        ctrl: point(ctrl.x, ctrl.y),
                        to: point(p.x, p.y),
                    };
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |line| {
                        points.push(Point::new(line.to.x as f64, line.to.y as f64));
                    });
                } else {
                    points.push(Point::new(p.x as f64, p.y as f64));
                }
                last_point = Some((p.x, p.y));
            }
            PathSegment::CubicTo(ctrl1, ctrl2, p) => {
                if let Some((lx, ly)) = last_point {
                    let curve = CubicBezierSegment {
                        from: point(lx, ly),
                        ctrl1: point(ctrl1.x, ctrl1.y),
                        ctrl2: point(ctrl2.x, ctrl2.y),
                        to: point(p.x, p.y),
                    };
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |line| {
                        points.push(Point::new(line.to.x as f64, line.to.y as f64));
                    });
                } else {
                    points.push(Point::new(p.x as f64, p.y as f64));
                }
                last_point = Some((p.x, p.y));
            }
            PathSegment::Close => {}
        }
    }

    points.dedup_by(|a, b| (a.x - b.x).abs() < DEDUP_EPSILON && (a.y - b.y).abs() < DEDUP_EPSILON);

    // An explicit closing vertex duplicates the implicit closing edge
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    if points.len() < 3 {
        return None;
    }

    let id = path.id();
    let id = if id.is_empty() { None } else { Some(id.to_string()) };
    Some(Polygon::with_id(points, id))
}

// ============================================================================
// TESTS
// ============================================================================

//! Polygon clipping against a rectangular window (Maillot's algorithm).
//!
//! Walks the polygon edge by edge, clipping each edge as a segment and
//! inserting window corners (turning points) wherever the boundary has to
//! run along the window border.

use tracing::debug;

use crate::clip::clip_segment;
use crate::error::ClipError;
use crate::geometry::{Point, Polygon, Rect};
use crate::region::RegionCode;
use crate::turning::{resolve, turning_point};

// ============================================================================
// EDGE ITERATION
// ============================================================================

/// Index pairs `(i - 1 mod n, i)` for `i` in `0..n`.
///
/// The first pair is the closing edge `(n - 1, 0)`, then each consecutive
/// pair in order.
///
/// ## Rust Lesson #6: Implementing Iterator
///
/// Only `next` is required. Everything else (`map`, `collect`, `zip`...)
/// comes for free from the trait's default methods.
#[derive(Debug, Clone)]
pub struct EdgePairs {
    n: usize,
    i: usize,
}

impl EdgePairs {
    pub fn new(n: usize) -> Self {
        Self { n, i: 0 }
    }
}

impl Iterator for EdgePairs {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i >= self.n {
            return None;
        }
        let prev = if self.i == 0 { self.n - 1 } else { self.i - 1 };
        let pair = (prev, self.i);
        self.i += 1;
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.n - self.i;
        (left, Some(left))
    }
}

impl ExactSizeIterator for EdgePairs {}

// ============================================================================
// CLIPPING
// ============================================================================

/// Append `p` unless it repeats the last output vertex.
#[inline]
fn push_vertex(output: &mut Vec<Point>, p: Point) {
    if output.last() != Some(&p) {
        output.push(p);
    }
}

fn validate(polygon: &[Point]) -> Result<(), ClipError> {
    if polygon.len() < 3 {
        return Err(ClipError::InvalidInput(format!(
            "polygon needs at least 3 vertices, got {}",
            polygon.len()
        )));
    }
    if let Some((i, p)) = polygon.iter().enumerate().find(|(_, p)| !p.is_finite()) {
        return Err(ClipError::InvalidInput(format!(
            "vertex {} is not finite: ({}, {})",
            i, p.x, p.y
        )));
    }
    Ok(())
}

/// Clip `polygon` to the window spanned by the diagonal `window_a`-`window_b`.
///
/// Returns the clipped boundary in the input's winding order, implicitly
/// closed. An empty result means the polygon misses the window.
pub fn clip_polygon(polygon: &[Point], window_a: Point, window_b: Point) -> Result<Vec<Point>, ClipError> {
    let rect = Rect::from_diagonal(window_a, window_b)?;
    clip_polygon_in_rect(polygon, &rect)
}

/// Clip `polygon` to an already built window.
pub fn clip_polygon_in_rect(polygon: &[Point], rect: &Rect) -> Result<Vec<Point>, ClipError> {
    validate(polygon)?;

    let codes: Vec<RegionCode> = polygon.iter().map(|p| RegionCode::of(*p, rect)).collect();
    let mut output = Vec::with_capacity(polygon.len() + 4);

    for (s, e) in EdgePairs::new(polygon.len()) {
        let (start, end) = (polygon[s], polygon[e]);
        let (start_code, end_code) = (codes[s], codes[e]);
        let mut code = end_code;

        match clip_segment(start, end, rect)? {
            Some((a, b)) => {
                // An unmoved start was already emitted as the previous edge's end
                if a != start {
                    push_vertex(&mut output, a);
                }
                push_vertex(&mut output, b);
            }
            None => {
                let resolution = resolve(start, end, start_code, end_code, rect)?;
                if let Some(corner) = resolution.corner {
                    push_vertex(&mut output, corner);
                }
                code = resolution.code;
            }
        }

        if let Some(corner) = turning_point(code, rect)? {
            push_vertex(&mut output, corner);
        }
    }

    // The closing edge is implicit
    if output.len() > 1 && output.first() == output.last() {
        output.pop();
    }

    debug!(input = polygon.len(), output = output.len(), "clipped polygon");
    Ok(output)
}

/// Clip a batch of polygons to `rect`.
///
/// Polygons left with fewer than three vertices are dropped; IDs carry over.
pub fn clip_polygons(polygons: &[Polygon], rect: &Rect) -> Result<Vec<Polygon>, ClipError> {
    let mut clipped = Vec::with_capacity(polygons.len());

    for polygon in polygons {
        let outer = clip_polygon_in_rect(&polygon.outer, rect)?;
        if outer.len() >= 3 {
            clipped.push(Polygon::with_id(outer, polygon.id.clone()));
        } else {
            debug!(id = ?polygon.id, "polygon dropped, outside window");
        }
    }

    Ok(clipped)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[[f64; 2]]) -> Vec<Point> {
        coords.iter().map(|c| Point::new(c[0], c[1])).collect()
    }

    fn clip(coords: &[[f64; 2]]) -> Vec<Point> {
        clip_polygon(&pts(coords), Point::new(2.0, 2.0), Point::new(6.0, 5.0)).unwrap()
    }

    fn window() -> Rect {
        Rect::from_diagonal(Point::new(2.0, 2.0), Point::new(6.0, 5.0)).unwrap()
    }

    #[test]
    fn edge_pairs_start_with_closing_edge() {
        let pairs: Vec<_> = EdgePairs::new(4).collect();
        assert_eq!(pairs, vec![(3, 0), (0, 1), (1, 2), (2, 3)]);
        assert_eq!(EdgePairs::new(3).len(), 3);
        assert_eq!(EdgePairs::new(0).next(), None);
    }

    #[test]
    fn polygon_inside_is_unchanged() {
        let polygon = [[3.0, 4.0], [4.0, 4.0], [4.0, 3.0]];
        assert_eq!(clip(&polygon), pts(&polygon));
    }

    #[test]
    fn one_vertex_below_window() {
        assert_eq!(
            clip(&[[3.0, 4.0], [3.0, 1.0], [5.0, 3.0]]),
            pts(&[[3.0, 4.0], [3.0, 2.0], [4.0, 2.0], [5.0, 3.0]])
        );
        assert_eq!(
            clip(&[[5.0, 3.0], [3.0, 1.0], [3.0, 4.0]]),
            pts(&[[5.0, 3.0], [4.0, 2.0], [3.0, 2.0], [3.0, 4.0]])
        );
    }

    #[test]
    fn basic_test_adds_corner_when_edge_ends_in_corner_region() {
        assert_eq!(
            clip(&[[3.0, 3.0], [0.0, 6.0], [6.0, 6.0]]),
            pts(&[[5.0, 5.0], [3.0, 3.0], [2.0, 4.0], [2.0, 5.0]])
        );
    }

    #[test]
    fn one_one_case_with_different_sides() {
        assert_eq!(
            clip(&[[3.0, 3.0], [0.0, 3.0], [3.0, 0.0]]),
            pts(&[[3.0, 2.0], [3.0, 3.0], [2.0, 3.0], [2.0, 2.0]])
        );
    }

    #[test]
    fn one_one_case_with_same_side() {
        assert_eq!(
            clip(&[[5.0, 3.0], [7.0, 3.0], [7.0, 5.0]]),
            pts(&[[6.0, 4.0], [5.0, 3.0], [6.0, 3.0]])
        );
    }

    #[test]
    fn two_one_case() {
        assert_eq!(
            clip(&[[4.0, 4.0], [8.0, 8.0], [-1.0, 4.0]]),
            pts(&[[2.0, 4.0], [4.0, 4.0], [5.0, 5.0], [6.0, 5.0], [2.0, 5.0]])
        );
    }

    #[test]
    fn one_two_case() {
        assert_eq!(
            clip(&[[-1.0, 4.0], [8.0, 8.0], [4.0, 4.0]]),
            pts(&[[2.0, 4.0], [2.0, 5.0], [6.0, 5.0], [5.0, 5.0], [4.0, 4.0]])
        );
    }

    #[test]
    fn two_two_cases() {
        let cases = [
            ([[4.0, 4.0], [1.0, 11.0], [12.0, 1.0]], [[6.0, 5.0], [6.0, 2.0]]),
            ([[4.0, 3.0], [7.0, -4.0], [-4.0, 6.0]], [[2.0, 2.0], [2.0, 5.0]]),
            ([[4.0, 3.0], [12.0, 6.0], [1.0, -4.0]], [[6.0, 2.0], [2.0, 2.0]]),
            ([[4.0, 4.0], [-4.0, 1.0], [7.0, 11.0]], [[2.0, 5.0], [6.0, 5.0]]),
        ];
        for (polygon, tail) in cases {
            let result = clip(&polygon);
            assert_eq!(result.len(), 6, "polygon {:?} -> {:?}", polygon, result);
            assert_eq!(&result[4..], pts(&tail).as_slice());
        }
    }

    #[test]
    fn polygon_beside_window_gives_empty_output() {
        assert!(clip(&[[7.0, 3.0], [8.0, 3.0], [8.0, 4.0]]).is_empty());
        assert!(clip(&[[3.0, 0.0], [5.0, 0.0], [4.0, 1.0]]).is_empty());
    }

    #[test]
    fn polygon_in_corner_region_collapses_to_corner() {
        assert_eq!(clip(&[[10.0, 10.0], [12.0, 10.0], [11.0, 12.0]]), pts(&[[6.0, 5.0]]));
    }

    #[test]
    fn polygon_covering_window_gives_window() {
        let result = clip(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]);
        assert_eq!(result, window().corners().to_vec());
    }

    #[test]
    fn output_stays_in_window() {
        let rect = window();
        let polygons = [
            vec![[4.0, 4.0], [1.0, 11.0], [12.0, 1.0]],
            vec![[-1.0, 4.0], [8.0, 8.0], [4.0, 4.0]],
            vec![[0.0, 0.0], [9.0, 1.0], [7.0, 7.0], [1.0, 6.5]],
            vec![[4.0, -3.0], [9.0, 3.5], [4.0, 9.0], [-2.0, 3.5]],
        ];
        for polygon in polygons {
            for p in clip(&polygon) {
                assert!(rect.contains(p), "{:?} escaped window for {:?}", p, polygon);
            }
        }
    }

    #[test]
    fn clipping_is_idempotent() {
        let polygons = [
            vec![[3.0, 4.0], [3.0, 1.0], [5.0, 3.0]],
            vec![[4.0, 4.0], [8.0, 8.0], [-1.0, 4.0]],
            vec![[4.0, 4.0], [1.0, 11.0], [12.0, 1.0]],
            vec![[3.0, 3.0], [0.0, 3.0], [3.0, 0.0]],
        ];
        for polygon in polygons {
            let once = clip(&polygon);
            let twice = clip_polygon_in_rect(&once, &window()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn reversing_input_reverses_output() {
        let polygon = pts(&[[3.0, 4.0], [3.0, 1.0], [5.0, 3.0]]);
        let forward = clip_polygon_in_rect(&polygon, &window()).unwrap();
        let reversed_input: Vec<Point> = polygon.iter().rev().copied().collect();
        let mut backward = clip_polygon_in_rect(&reversed_input, &window()).unwrap();
        backward.reverse();

        // Same cycle, possibly rotated
        let offset = backward.iter().position(|p| *p == forward[0]).unwrap();
        backward.rotate_left(offset);
        assert_eq!(forward, backward);
    }

    #[test]
    fn invalid_input_fails_fast() {
        let two = pts(&[[0.0, 0.0], [1.0, 1.0]]);
        assert!(matches!(
            clip_polygon(&two, Point::new(0.0, 0.0), Point::new(1.0, 1.0)),
            Err(ClipError::InvalidInput(_))
        ));

        let tri = pts(&[[0.0, 0.0], [1.0, 1.0], [1.0, 0.0]]);
        assert!(clip_polygon(&tri, Point::new(1.0, 1.0), Point::new(1.0, 1.0)).is_err());
        assert!(clip_polygon(&tri, Point::new(0.0, 1.0), Point::new(3.0, 1.0)).is_err());

        let nan = pts(&[[0.0, 0.0], [f64::NAN, 1.0], [1.0, 0.0]]);
        assert!(clip_polygon(&nan, Point::new(0.0, 0.0), Point::new(1.0, 1.0)).is_err());
    }

    #[test]
    fn huge_coordinates_fail_instead_of_leaking_nan() {
        let polygon = pts(&[[1e160, 1e160], [3.0, 3.0], [4.0, 4.0]]);
        let result = clip_polygon(&polygon, Point::new(2.0, 2.0), Point::new(6.0, 5.0));
        assert!(matches!(result, Err(ClipError::DegenerateIntersection { .. })));
    }

    #[test]
    fn clip_polygons_keeps_ids_and_drops_misses() {
        let polygons = vec![
            Polygon::with_id(pts(&[[3.0, 4.0], [3.0, 1.0], [5.0, 3.0]]), Some("a".to_string())),
            Polygon::with_id(pts(&[[10.0, 10.0], [12.0, 10.0], [11.0, 12.0]]), Some("b".to_string())),
            Polygon::new(pts(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]])),
        ];
        let clipped = clip_polygons(&polygons, &window()).unwrap();
        assert_eq!(clipped.len(), 2);
        assert_eq!(clipped[0].id.as_deref(), Some("a"));
        assert_eq!(clipped[0].len(), 4);
        assert_eq!(clipped[1].id, None);
        assert_eq!(clipped[1].outer, window().corners().to_vec());
    }
}

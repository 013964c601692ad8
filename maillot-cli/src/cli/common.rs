//! Common utilities shared across CLI commands.

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};

use maillot::{parse_points, Point, Polygon, Rect};

/// Output format for clipped polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One polygon per line, in SVG points syntax
    Text,
    Json,
    Svg,
}

/// A point in JSON output format.
#[derive(Serialize)]
struct JsonPoint {
    x: f64,
    y: f64,
}

/// The clipping window in JSON output format.
#[derive(Serialize)]
struct JsonWindow {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
}

/// A clipped polygon in JSON output format.
#[derive(Serialize)]
struct JsonPolygon {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    points: Vec<JsonPoint>,
}

#[derive(Serialize)]
struct JsonOutput {
    window: JsonWindow,
    polygons: Vec<JsonPolygon>,
}

/// Parse a single `x,y` coordinate pair.
pub fn parse_point(text: &str) -> Result<Point> {
    let points = parse_points(text).with_context(|| format!("Invalid point {:?}", text))?;
    match points.as_slice() {
        [p] => Ok(*p),
        _ => bail!("Expected one x,y pair, got {:?}", text),
    }
}

/// Build the clipping window from two diagonal corners given as `x,y`.
pub fn parse_window(a: &str, b: &str) -> Result<Rect> {
    let rect = Rect::from_diagonal(parse_point(a)?, parse_point(b)?)?;
    Ok(rect)
}

/// Render polygons in the requested format.
pub fn render(polygons: &[Polygon], rect: &Rect, format: OutputFormat, original_svg: Option<&str>) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => polygons_to_text(polygons),
        OutputFormat::Json => polygons_to_json(polygons, rect)?,
        OutputFormat::Svg => polygons_to_svg(polygons, rect, original_svg),
    })
}

/// Format points in SVG points syntax: "x1,y1 x2,y2 ...".
pub fn points_string(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per polygon, in the same syntax `--points` accepts.
pub fn polygons_to_text(polygons: &[Polygon]) -> String {
    let mut out = String::new();
    for polygon in polygons {
        if let Some(id) = &polygon.id {
            out.push_str(id);
            out.push_str(": ");
        }
        out.push_str(&points_string(&polygon.outer));
        out.push('\n');
    }
    out
}

pub fn polygons_to_json(polygons: &[Polygon], rect: &Rect) -> Result<String> {
    let output = JsonOutput {
        window: JsonWindow {
            xmin: rect.xmin,
            xmax: rect.xmax,
            ymin: rect.ymin,
            ymax: rect.ymax,
        },
        polygons: polygons
            .iter()
            .map(|polygon| JsonPolygon {
                id: polygon.id.clone(),
                points: polygon.outer.iter().map(|p| JsonPoint { x: p.x, y: p.y }).collect(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&output).context("Failed to serialize JSON")
}

/// Convert polygons to SVG output (`<polygon>` elements), with the window
/// drawn as a dashed rectangle.
pub fn polygons_to_svg(polygons: &[Polygon], rect: &Rect, original_svg: Option<&str>) -> String {
    let viewbox = original_svg.and_then(extract_viewbox).unwrap_or_else(|| {
        format!("{} {} {} {}", rect.xmin, rect.ymin, rect.width(), rect.height())
    });

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="{}">
<rect x="{}" y="{}" width="{}" height="{}" stroke="#cccccc" stroke-dasharray="2" fill="none"/>
<g stroke="black" stroke-width="0.5" fill="none">
"##,
        viewbox,
        rect.xmin, rect.ymin, rect.width(), rect.height()
    ));

    for polygon in polygons.iter().filter(|p| !p.is_empty()) {
        match &polygon.id {
            Some(id) => svg.push_str(&format!(
                "  <polygon id=\"{}\" points=\"{}\"/>\n",
                escape(id.as_str()),
                points_string(&polygon.outer)
            )),
            None => svg.push_str(&format!("  <polygon points=\"{}\"/>\n", points_string(&polygon.outer))),
        }
    }

    svg.push_str("</g>\n</svg>\n");
    svg
}

/// Extract viewBox from SVG content.
pub fn extract_viewbox(svg: &str) -> Option<String> {
    for attr in ["viewBox=\"", "viewbox=\""] {
        if let Some(start) = svg.find(attr) {
            let rest = &svg[start + attr.len()..];
            if let Some(end) = rest.find('"') {
                return Some(rest[..end].to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Rect {
        parse_window("2,2", "6,5").unwrap()
    }

    #[test]
    fn window_from_any_diagonal() {
        assert_eq!(parse_window("6,2", "2,5").unwrap(), window());
        assert!(parse_window("2,2", "2,5").is_err());
        assert!(parse_window("2", "6,5").is_err());
        assert!(parse_window("2,2 3,3", "6,5").is_err());
    }

    #[test]
    fn text_output_round_trips_through_parse_points() {
        let polygon = Polygon::new(vec![Point::new(3.0, 4.0), Point::new(3.0, 2.5), Point::new(4.0, 2.0)]);
        let text = polygons_to_text(std::slice::from_ref(&polygon));
        assert_eq!(text, "3,4 3,2.5 4,2\n");
        assert_eq!(parse_points(text.trim()).unwrap(), polygon.outer);
    }

    #[test]
    fn svg_output_uses_source_viewbox() {
        let polygon = Polygon::with_id(vec![Point::new(3.0, 4.0), Point::new(3.0, 2.0), Point::new(4.0, 2.0)], Some("tri".into()));
        let svg = polygons_to_svg(&[polygon], &window(), Some(r#"<svg viewBox="0 0 10 10">"#));
        assert!(svg.contains(r#"viewBox="0 0 10 10""#));
        assert!(svg.contains(r#"<polygon id="tri" points="3,4 3,2 4,2"/>"#));

        let svg = polygons_to_svg(&[], &window(), None);
        assert!(svg.contains(r#"viewBox="2 2 4 3""#));
    }

    #[test]
    fn svg_output_escapes_ids() {
        let polygon = Polygon::with_id(
            vec![Point::new(3.0, 4.0), Point::new(3.0, 2.0), Point::new(4.0, 2.0)],
            Some(r#"a"<b>&c"#.into()),
        );
        let svg = polygons_to_svg(&[polygon], &window(), None);
        assert!(svg.contains(r#"<polygon id="a&quot;&lt;b&gt;&amp;c" points="3,4 3,2 4,2"/>"#), "{}", svg);
    }

    #[test]
    fn json_output_has_window_and_points() {
        let polygon = Polygon::new(vec![Point::new(3.0, 4.0), Point::new(3.0, 2.0), Point::new(4.0, 2.0)]);
        let json = polygons_to_json(&[polygon], &window()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["window"]["xmax"], 6.0);
        assert_eq!(value["polygons"][0]["points"][1]["y"], 2.0);
        assert!(value["polygons"][0].get("id").is_none());
    }
}

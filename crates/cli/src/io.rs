//! Polygon text files: one header line, then one `x,y` pair per line.
//!
//! The same format carries query point lists.

use anyhow::{bail, Context, Result};
use polygrid::{Point, Polygon};
use std::fs;
use std::path::Path;

/// Parse `x,y` lines after the header; blank lines are skipped.
pub fn parse_points(text: &str) -> Result<Vec<Point>> {
    let mut pts = Vec::new();
    for (lineno, line) in text.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let p = parse_point(line).with_context(|| format!("line {}", lineno + 1))?;
        pts.push(p);
    }
    Ok(pts)
}

/// Parse a single `x,y` pair.
pub fn parse_point(s: &str) -> Result<Point> {
    let mut it = s.split(',').map(str::trim);
    let (Some(x), Some(y), None) = (it.next(), it.next(), it.next()) else {
        bail!("expected `x,y`, got {s:?}");
    };
    let x: f64 = x.parse().with_context(|| format!("bad x coordinate {x:?}"))?;
    let y: f64 = y.parse().with_context(|| format!("bad y coordinate {y:?}"))?;
    Ok(Point::new(x, y))
}

pub fn read_points(path: &Path) -> Result<Vec<Point>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_points(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Load a closed polygon; unless `raw`, recenter it and scale to unit area.
pub fn read_polygon(path: &Path, raw: bool) -> Result<Polygon> {
    let pts = read_points(path)?;
    let poly = Polygon::new(pts).with_context(|| format!("validating {}", path.display()))?;
    if raw {
        return Ok(poly);
    }
    poly.normalized()
        .with_context(|| format!("normalizing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SQUARE: &str = "# x, y\n0,0\n2,0\n2,2\n0,2\n\n0,0\n";

    #[test]
    fn parses_points_after_header() {
        let pts = parse_points(SQUARE).unwrap();
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[1], Point::new(2.0, 0.0));
    }

    #[test]
    fn reports_bad_lines() {
        let err = parse_points("# x, y\n0,0\n1;2\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 3"));
        assert!(parse_point("1,2,3").is_err());
        assert!(parse_point(" 1.5 , -2 ").is_ok());
    }

    #[test]
    fn reads_and_normalizes_polygon() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("square.polygon");
        fs::write(&path, SQUARE).unwrap();
        let raw = read_polygon(&path, true).unwrap();
        assert!((raw.signed_area() - 4.0).abs() < 1e-12);
        let norm = read_polygon(&path, false).unwrap();
        assert!((norm.signed_area() - 1.0).abs() < 1e-12);
        assert!(norm.center_of_mass().norm() < 1e-12);
    }

    #[test]
    fn rejects_open_ring() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("open.polygon");
        fs::write(&path, "# x, y\n0,0\n1,0\n1,1\n0,1\n").unwrap();
        assert!(read_polygon(&path, true).is_err());
    }
}

//! Point classification against a built grid.
//!
//! Interior/Exterior cells answer in O(1). Mixed cells use a side test against the
//! nearest clipped segment of the cell, which is exact whenever the boundary is
//! locally convex around the query point. Only the pieces stored in the cell are
//! considered, so near a reflex vertex whose edges are not both in the cell the
//! nearest piece may belong to the "wrong" edge and the answer can flip.
//! `ClassifyMode::Exact` trades that shortcut for a full winding-number test.

use tracing::warn;

use crate::polygon::{is_left, Orientation, Point};

use super::types::{CellLabel, ClassifyMode, Grid, QueryError, Segment};

impl Grid {
    /// `Ok(true)` if `p` is outside the polygon, `Ok(false)` if inside.
    pub fn classify(&self, p: Point) -> Result<bool, QueryError> {
        self.classify_with(p, ClassifyMode::default())
    }

    /// Negation of `classify`.
    pub fn is_inside(&self, p: Point) -> Result<bool, QueryError> {
        self.classify(p).map(|outside| !outside)
    }

    pub fn classify_with(&self, p: Point, mode: ClassifyMode) -> Result<bool, QueryError> {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return Err(QueryError::NonFinitePoint);
        }
        let Some((col, row)) = self.cell_index(p) else {
            return Ok(true);
        };
        let cell = self.cell(col, row);
        match cell.label {
            CellLabel::Interior => return Ok(false),
            CellLabel::Exterior => return Ok(true),
            CellLabel::Mixed | CellLabel::Unknown => {}
        }
        if mode == ClassifyMode::Exact {
            return Ok(!self.polygon.contains(p));
        }
        if !cell.segments.is_empty() {
            return Ok(!self.nearest_side_is_inside(&cell.segments, p));
        }
        let ring = self.ring_segments(col, row)?;
        Ok(!self.nearest_side_is_inside(&ring, p))
    }

    /// Segments of the first ring (Chebyshev distance 1, 2, …) around `(col, row)`
    /// that contains any `Mixed` cell. Gives up after `grid_size` rings.
    pub(crate) fn ring_segments(&self, col: usize, row: usize) -> Result<Vec<Segment>, QueryError> {
        let n = self.grid_size as isize;
        let (c0, r0) = (col as isize, row as isize);
        let mut found = Vec::new();
        for rng in 1..=n {
            for r in (r0 - rng).max(0)..=(r0 + rng).min(n - 1) {
                for c in (c0 - rng).max(0)..=(c0 + rng).min(n - 1) {
                    if (c - c0).abs().max((r - r0).abs()) != rng {
                        continue;
                    }
                    let cell = self.cell(c as usize, r as usize);
                    if cell.label == CellLabel::Mixed {
                        found.extend_from_slice(&cell.segments);
                    }
                }
            }
            if !found.is_empty() {
                return Ok(found);
            }
        }
        warn!(col, row, rings = self.grid_size, "ring expansion found no boundary");
        Err(QueryError::NoBoundaryNearby {
            rings: self.grid_size,
        })
    }

    /// Closest piece to `p` among `segments`, then `p`'s side of the parent edge
    /// (left for counter-clockwise rings, right for clockwise ones).
    ///
    /// Pieces at the same distance meet at a shared vertex; the one whose edge
    /// line lies farthest from `p` decides, which is the correct side at both
    /// convex and reflex vertices.
    fn nearest_side_is_inside(&self, segments: &[Segment], p: Point) -> bool {
        const TIE: f64 = 1e-9;
        let mut best = f64::INFINITY;
        let mut offset: f64 = 0.0;
        for s in segments {
            let a = self.polygon.point_on_edge(s.edge, s.t0);
            let b = self.polygon.point_on_edge(s.edge, s.t1);
            let ab = b - a;
            let len2 = ab.norm_squared();
            let t = if len2 > 0.0 {
                ((p - a).dot(&ab) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let d2 = (a + ab * t - p).norm_squared();
            let closer = d2 < best * (1.0 - TIE);
            if !closer && d2 > best * (1.0 + TIE) {
                continue;
            }
            let (e0, e1) = self.polygon.edge(s.edge);
            // Signed distance of `p` from the edge line (positive on the left).
            let off = is_left(e0, e1, p) / (e1 - e0).norm();
            if closer || off.abs() > offset.abs() {
                offset = off;
            }
            best = best.min(d2);
        }
        match self.orientation {
            Orientation::CounterClockwise => offset >= 0.0,
            Orientation::Clockwise => offset <= 0.0,
        }
    }
}

//! Closed 2D polygons (validated vertex rings) and exact containment tests.
//!
//! Purpose
//! - Hold the immutable input of the grid: an ordered ring `v[0], …, v[N]` with
//!   `v[0] == v[N]`, edges `(v[i], v[i+1])` for `i < N`.
//! - Provide the exact point-in-polygon predicates (winding number, crossing
//!   number) used to resolve ambiguous grid regions and by the strict query mode.
//! - Offer loader-side normalization (center at origin, unit area). The grid never
//!   normalizes on its own; callers decide.
//!
//! Conventions
//! - Counter-clockwise rings have positive signed area.
//! - Self-intersecting rings are not rejected (too expensive to detect here) but
//!   are unsupported downstream.

use nalgebra::Vector2;
use std::fmt;

/// 2D point / vector type used throughout the crate.
pub type Point = Vector2<f64>;

/// Validation failures for polygon input.
#[derive(Clone, Debug, PartialEq)]
pub enum PolygonError {
    /// Fewer than three edges (a closed ring needs at least 4 points).
    TooFewEdges { edges: usize },
    /// First and last vertex differ.
    NotClosed,
    /// A coordinate is NaN or infinite.
    NonFinite { index: usize },
    /// Two consecutive vertices coincide.
    ZeroLengthEdge { edge: usize },
    /// The ring encloses no area (normalization impossible).
    ZeroArea,
}

impl fmt::Display for PolygonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolygonError::TooFewEdges { edges } => {
                write!(f, "polygon needs at least 3 edges, got {edges}")
            }
            PolygonError::NotClosed => write!(f, "polygon is not closed (first != last vertex)"),
            PolygonError::NonFinite { index } => {
                write!(f, "vertex {index} has a non-finite coordinate")
            }
            PolygonError::ZeroLengthEdge { edge } => write!(f, "edge {edge} has zero length"),
            PolygonError::ZeroArea => write!(f, "polygon encloses zero area"),
        }
    }
}

impl std::error::Error for PolygonError {}

/// Orientation of a closed ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
}

/// Validated closed polygon.
///
/// Invariants: `pts.len() >= 4`, `pts[0] == pts[last]`, all coordinates finite,
/// no zero-length edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pts: Vec<Point>,
}

impl Polygon {
    /// Validate a closed ring.
    pub fn new(pts: Vec<Point>) -> Result<Self, PolygonError> {
        if pts.len() < 4 {
            return Err(PolygonError::TooFewEdges {
                edges: pts.len().saturating_sub(1),
            });
        }
        if let Some(index) = pts
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(PolygonError::NonFinite { index });
        }
        if pts[0] != pts[pts.len() - 1] {
            return Err(PolygonError::NotClosed);
        }
        if let Some(edge) = pts.windows(2).position(|w| w[0] == w[1]) {
            return Err(PolygonError::ZeroLengthEdge { edge });
        }
        Ok(Self { pts })
    }

    /// Close an open vertex list (append the first vertex) and validate.
    pub fn from_open(mut pts: Vec<Point>) -> Result<Self, PolygonError> {
        if let Some(&first) = pts.first() {
            pts.push(first);
        }
        Self::new(pts)
    }

    /// All ring points, including the repeated closing vertex.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.pts
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.pts.len() - 1
    }

    #[inline]
    pub fn edge(&self, i: usize) -> (Point, Point) {
        (self.pts[i], self.pts[i + 1])
    }

    /// Direction `v[i+1] - v[i]` (not normalized).
    #[inline]
    pub fn edge_dir(&self, i: usize) -> Point {
        self.pts[i + 1] - self.pts[i]
    }

    /// `v[i] + t (v[i+1] - v[i])`.
    #[inline]
    pub fn point_on_edge(&self, i: usize, t: f64) -> Point {
        self.pts[i] + self.edge_dir(i) * t
    }

    /// Shoelace area; positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        0.5 * self
            .pts
            .windows(2)
            .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
            .sum::<f64>()
    }

    /// Ring orientation (zero-area rings report counter-clockwise).
    pub fn orientation(&self) -> Orientation {
        if self.signed_area() < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::CounterClockwise
        }
    }

    /// Mean of the unique vertices (the closing duplicate is skipped).
    pub fn center_of_mass(&self) -> Point {
        let n = self.num_edges();
        self.pts[..n].iter().sum::<Point>() / n as f64
    }

    /// Recenter at the vertex mean and rescale to unit area.
    pub fn normalized(&self) -> Result<Self, PolygonError> {
        let area = self.signed_area().abs();
        if !(area.is_finite() && area > 0.0) {
            return Err(PolygonError::ZeroArea);
        }
        let c = self.center_of_mass();
        let s = (1.0 / area).sqrt();
        Self::new(self.pts.iter().map(|p| (p - c) * s).collect())
    }

    /// Insert the midpoint of every edge (same shape, twice the vertices).
    pub fn refined(&self) -> Self {
        let mut pts = Vec::with_capacity(2 * self.num_edges() + 1);
        for w in self.pts.windows(2) {
            pts.push(w[0]);
            pts.push((w[0] + w[1]) * 0.5);
        }
        pts.push(self.pts[0]);
        Self { pts }
    }

    /// Same ring traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        let mut pts = self.pts.clone();
        pts.reverse();
        Self { pts }
    }

    /// Winding number of the ring around `p` (signed upward/downward crossings).
    ///
    /// Points exactly on the boundary may count either way.
    pub fn winding_number(&self, p: Point) -> i32 {
        let mut wn = 0;
        for w in self.pts.windows(2) {
            let (a, b) = (w[0], w[1]);
            if a.y <= p.y {
                if b.y > p.y && is_left(a, b, p) > 0.0 {
                    wn += 1;
                }
            } else if b.y <= p.y && is_left(a, b, p) < 0.0 {
                wn -= 1;
            }
        }
        wn
    }

    /// Non-zero rule containment (exact, O(edges)).
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.winding_number(p) != 0
    }

    /// Number of ring edges crossed by the ray from `p` towards +x.
    pub fn crossing_number(&self, p: Point) -> usize {
        self.pts
            .windows(2)
            .filter(|w| {
                let (a, b) = (w[0], w[1]);
                if (a.y <= p.y) == (b.y <= p.y) {
                    return false;
                }
                let t = (p.y - a.y) / (b.y - a.y);
                p.x < a.x + t * (b.x - a.x)
            })
            .count()
    }

    /// Even-odd rule containment (ray casting).
    #[inline]
    pub fn contains_even_odd(&self, p: Point) -> bool {
        self.crossing_number(p) % 2 == 1
    }
}

/// Cross product `(b - a) × (p - a)`; positive when `p` is left of `a → b`.
#[inline]
pub fn is_left(a: Point, b: Point, p: Point) -> f64 {
    let ab = b - a;
    let ap = p - a;
    ab.x * ap.y - ab.y * ap.x
}

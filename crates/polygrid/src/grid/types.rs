//! Data types for the cell grid: cells, labels, clipped segments, tolerances, errors.
//!
//! Kept small and explicit to make `build`, `label` and `query` easy to read.

use std::fmt;

use crate::polygon::{Orientation, Point, Polygon, PolygonError};

/// Cell state. `Mixed` is set only by the edge clipper and is terminal;
/// `Unknown` disappears once labeling completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellLabel {
    Unknown,
    Interior,
    Exterior,
    Mixed,
}

/// Piece `[t0, t1]` of polygon edge `edge` (parametric, `0 <= t0 < t1 <= 1`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub edge: usize,
    pub t0: f64,
    pub t1: f64,
}

/// Axis-aligned box `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    /// Tight box around `pts` (must be non-empty).
    pub fn from_points(pts: &[Point]) -> Self {
        let mut min = Point::new(f64::MAX, f64::MAX);
        let mut max = Point::new(-f64::MAX, -f64::MAX);
        for p in pts {
            min = min.inf(p);
            max = max.sup(p);
        }
        Self { min, max }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Point {
        (self.min + self.max) * 0.5
    }

    /// Grow by `eps` on every side.
    #[inline]
    pub fn expanded(&self, eps: f64) -> Self {
        let e = Point::new(eps, eps);
        Self {
            min: self.min - e,
            max: self.max + e,
        }
    }

    /// Strict containment (points on the border are outside).
    #[inline]
    pub fn contains_strict(&self, p: Point) -> bool {
        self.min.x < p.x && p.x < self.max.x && self.min.y < p.y && p.y < self.max.y
    }
}

/// One grid cell: its box, the polygon pieces crossing it, and its label.
#[derive(Clone, Debug)]
pub struct Cell {
    pub bbox: BBox,
    pub segments: Vec<Segment>,
    pub label: CellLabel,
}

impl Cell {
    pub(crate) fn new(bbox: BBox) -> Self {
        Self {
            bbox,
            segments: Vec::new(),
            label: CellLabel::Unknown,
        }
    }
}

/// Grid configuration.
#[derive(Clone, Copy, Debug)]
pub struct GridCfg {
    /// Cells per side (grid is `grid_size × grid_size`).
    pub grid_size: usize,
    /// Bounding-box padding relative to the smaller raw cell side.
    pub eps_rel: f64,
}

impl GridCfg {
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Self::default()
        }
    }
}

impl Default for GridCfg {
    fn default() -> Self {
        Self {
            grid_size: 64,
            eps_rel: 1e-4,
        }
    }
}

/// Construction failures.
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    Polygon(PolygonError),
    /// `grid_size` must be at least 1.
    InvalidGridSize { grid_size: usize },
    /// `eps_rel` must be finite and positive.
    InvalidEpsilon { eps_rel: f64 },
    /// Bounding box has zero (or non-finite) width or height.
    DegenerateExtent { width: f64, height: f64 },
    /// Some cells are still `Unknown` (labeling has not run).
    NotLabeled { unknown: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::Polygon(e) => write!(f, "invalid polygon: {e}"),
            GridError::InvalidGridSize { grid_size } => {
                write!(f, "grid size must be a positive integer, got {grid_size}")
            }
            GridError::InvalidEpsilon { eps_rel } => {
                write!(f, "eps_rel must be finite and > 0, got {eps_rel}")
            }
            GridError::DegenerateExtent { width, height } => write!(
                f,
                "polygon bounding box is degenerate ({width} x {height})"
            ),
            GridError::NotLabeled { unknown } => {
                write!(f, "grid has {unknown} unlabeled cells")
            }
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridError::Polygon(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PolygonError> for GridError {
    fn from(e: PolygonError) -> Self {
        GridError::Polygon(e)
    }
}

/// Query failures.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryError {
    /// Query coordinate is NaN or infinite.
    NonFinitePoint,
    /// Ring expansion searched `rings` rings without meeting a boundary segment.
    NoBoundaryNearby { rings: usize },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::NonFinitePoint => write!(f, "query point has a non-finite coordinate"),
            QueryError::NoBoundaryNearby { rings } => write!(
                f,
                "no boundary segment found within {rings} rings of the query cell"
            ),
        }
    }
}

impl std::error::Error for QueryError {}

/// How `Mixed` cells are resolved at query time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClassifyMode {
    /// Side test against the nearest local segment. Fast; may misclassify
    /// points very close to a reflex vertex.
    #[default]
    AssumeLocalConvex,
    /// Full winding-number test against the whole polygon.
    Exact,
}

/// Uniform `grid_size × grid_size` decomposition of the padded polygon bounding box.
///
/// Cells are stored row-major (`row * grid_size + col`); row 0 is at `bbox.min.y`.
/// After `init` the grid is immutable and safe to share across threads.
#[derive(Clone, Debug)]
pub struct Grid {
    pub(crate) polygon: Polygon,
    pub(crate) grid_size: usize,
    pub(crate) eps: f64,
    pub(crate) bbox: BBox,
    pub(crate) cell_w: f64,
    pub(crate) cell_h: f64,
    pub(crate) orientation: Orientation,
    pub(crate) cells: Vec<Cell>,
}

impl Grid {
    #[inline]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    #[inline]
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Padding applied to the raw bounding box; also the clipper's sampling offset.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.eps
    }

    /// Padded bounding box covered by the cells.
    #[inline]
    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    #[inline]
    pub fn cell_width(&self) -> f64 {
        self.cell_w
    }

    #[inline]
    pub fn cell_height(&self) -> f64 {
        self.cell_h
    }

    /// Row-major cell storage.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cell(&self, col: usize, row: usize) -> &Cell {
        &self.cells[row * self.grid_size + col]
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, col: usize, row: usize) -> &mut Cell {
        &mut self.cells[row * self.grid_size + col]
    }

    /// `(col, row)` of the cell containing `p`, or `None` outside the padded box.
    pub fn cell_index(&self, p: Point) -> Option<(usize, usize)> {
        if !self.bbox.contains_strict(p) {
            return None;
        }
        let last = self.grid_size - 1;
        let col = ((p.x - self.bbox.min.x) / self.cell_w).floor() as usize;
        let row = ((p.y - self.bbox.min.y) / self.cell_h).floor() as usize;
        // Rounding can land exactly on `grid_size` just below the max border.
        Some((col.min(last), row.min(last)))
    }

    /// True once no cell is `Unknown`.
    pub fn is_labeled(&self) -> bool {
        self.cells.iter().all(|c| c.label != CellLabel::Unknown)
    }

    /// Cell counts as `[unknown, interior, exterior, mixed]`.
    pub fn label_counts(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for c in &self.cells {
            let k = match c.label {
                CellLabel::Unknown => 0,
                CellLabel::Interior => 1,
                CellLabel::Exterior => 2,
                CellLabel::Mixed => 3,
            };
            counts[k] += 1;
        }
        counts
    }
}

//! Grid allocation and the edge clipper (polygon edges → per-cell segments).
//!
//! Neighboring cells share their border coordinates exactly, so an exit parameter
//! computed in one cell is never re-entered as a zero-length piece in the next.
//!
//! Known limitation: the clipper looks up the next cell `EPSILON` (in length) past
//! the current exit point. An edge that only grazes a cell corner within that
//! distance skips the cell, which then stays non-`Mixed`; the affected area is
//! on the order of `EPSILON²`.

use tracing::{debug, warn};

use crate::polygon::{Point, Polygon};

use super::types::{BBox, Cell, CellLabel, Grid, GridCfg, GridError, Segment};

impl Grid {
    /// Build a fully labeled grid (allocate, clip edges, label cells).
    pub fn init(polygon: &Polygon, grid_size: usize) -> Result<Self, GridError> {
        Self::init_with(polygon, GridCfg::new(grid_size))
    }

    /// `init` with explicit tolerances.
    pub fn init_with(polygon: &Polygon, cfg: GridCfg) -> Result<Self, GridError> {
        let mut grid = Self::new_with(polygon, cfg)?;
        grid.compute_cell_line_segments();
        grid.assign_cell_types();
        let [_, interior, exterior, mixed] = grid.label_counts();
        debug!(
            grid_size = grid.grid_size,
            edges = grid.polygon.num_edges(),
            interior,
            exterior,
            mixed,
            "grid ready"
        );
        Ok(grid)
    }

    /// Allocate `grid_size²` `Unknown` cells over the padded bounding box.
    ///
    /// The polygon is copied; the grid never aliases caller data.
    pub fn new(polygon: &Polygon, grid_size: usize) -> Result<Self, GridError> {
        Self::new_with(polygon, GridCfg::new(grid_size))
    }

    pub fn new_with(polygon: &Polygon, cfg: GridCfg) -> Result<Self, GridError> {
        let n = cfg.grid_size;
        if n == 0 {
            return Err(GridError::InvalidGridSize { grid_size: n });
        }
        if !(cfg.eps_rel.is_finite() && cfg.eps_rel > 0.0) {
            return Err(GridError::InvalidEpsilon {
                eps_rel: cfg.eps_rel,
            });
        }
        let raw = BBox::from_points(polygon.vertices());
        let (width, height) = (raw.width(), raw.height());
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(GridError::DegenerateExtent { width, height });
        }
        // Padding is derived from the unpadded cell size.
        let eps = (width / n as f64).min(height / n as f64) * cfg.eps_rel;
        let bbox = raw.expanded(eps);
        let cell_w = bbox.width() / n as f64;
        let cell_h = bbox.height() / n as f64;

        // Grid line `k` along each axis; the last line is the box border itself.
        let line = |axis: usize, k: usize, step: f64| {
            if k == n {
                bbox.max[axis]
            } else {
                bbox.min[axis] + k as f64 * step
            }
        };
        let line_x = |k: usize| line(0, k, cell_w);
        let line_y = |k: usize| line(1, k, cell_h);
        let mut cells = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                cells.push(Cell::new(BBox {
                    min: Point::new(line_x(col), line_y(row)),
                    max: Point::new(line_x(col + 1), line_y(row + 1)),
                }));
            }
        }

        Ok(Self {
            polygon: polygon.clone(),
            grid_size: n,
            eps,
            bbox,
            cell_w,
            cell_h,
            orientation: polygon.orientation(),
            cells,
        })
    }

    /// Cut every polygon edge at the grid lines and store the pieces in the
    /// cells they cross; those cells become `Mixed`.
    ///
    /// Resets all cells first, so calling it twice is harmless.
    pub fn compute_cell_line_segments(&mut self) {
        for c in &mut self.cells {
            c.segments.clear();
            c.label = CellLabel::Unknown;
        }
        let mut pieces = 0usize;
        for i in 0..self.polygon.num_edges() {
            pieces += self.clip_edge(i);
        }
        debug!(
            edges = self.polygon.num_edges(),
            pieces,
            "clipped polygon edges"
        );
    }

    /// Walk edge `i` cell by cell; returns the number of pieces pushed.
    fn clip_edge(&mut self, i: usize) -> usize {
        let (v0, v1) = self.polygon.edge(i);
        let start = self.cell_index(v0);
        if let Some((col, row)) = start {
            if start == self.cell_index(v1) {
                self.push_segment(col, row, Segment { edge: i, t0: 0.0, t1: 1.0 });
                return 1;
            }
        }

        let dir = v1 - v0;
        // Sample `eps` (in length) past the current parameter so the lookup lands
        // strictly inside the next cell instead of on the shared border.
        let nudge = self.eps / dir.norm();
        let mut pieces = 0;
        let mut t = 0.0;
        while t < 1.0 {
            let sample = self.polygon.point_on_edge(i, (t + nudge).min(1.0));
            let Some((col, row)) = self.cell_index(sample) else {
                warn!(edge = i, t, "edge sample left the grid; clipping stopped early");
                break;
            };
            let next_t = exit_param(&self.cell(col, row).bbox, v0, dir, t);
            let t1 = next_t.min(1.0);
            self.push_segment(col, row, Segment { edge: i, t0: t, t1 });
            pieces += 1;
            t = next_t;
        }
        pieces
    }

    fn push_segment(&mut self, col: usize, row: usize, seg: Segment) {
        let cell = self.cell_mut(col, row);
        cell.segments.push(seg);
        cell.label = CellLabel::Mixed;
    }
}

/// Smallest parameter `> t` at which the line `start + s·dir` meets one of the
/// four border lines of `bbox`. Axes with zero direction are skipped; returns
/// `+∞` if no border lies ahead.
fn exit_param(bbox: &BBox, start: Point, dir: Point, t: f64) -> f64 {
    let mut best = f64::INFINITY;
    for axis in 0..2 {
        if dir[axis] == 0.0 {
            continue;
        }
        for bound in [bbox.min[axis], bbox.max[axis]] {
            let s = (bound - start[axis]) / dir[axis];
            if s > t && s < best {
                best = s;
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn exit_param_skips_zero_axis() {
        let b = BBox {
            min: vector![0.0, 0.0],
            max: vector![1.0, 1.0],
        };
        // Horizontal ray from x=0.25 heading +x: exits at x=1 → s=0.75.
        let s = exit_param(&b, vector![0.25, 0.5], vector![1.0, 0.0], 0.0);
        assert!((s - 0.75).abs() < 1e-15);
        // Heading -x: x=0 at s=0.25.
        let s = exit_param(&b, vector![0.25, 0.5], vector![-1.0, 0.0], 0.0);
        assert!((s - 0.25).abs() < 1e-15);
        // Nothing ahead.
        let s = exit_param(&b, vector![0.25, 0.5], vector![1.0, 0.0], 0.9);
        assert!(s.is_infinite());
    }

    #[test]
    fn exit_param_diagonal_takes_nearest_border() {
        let b = BBox {
            min: vector![0.0, 0.0],
            max: vector![1.0, 2.0],
        };
        let s = exit_param(&b, vector![0.5, 0.5], vector![1.0, 1.0], 0.0);
        assert!((s - 0.5).abs() < 1e-15);
    }
}

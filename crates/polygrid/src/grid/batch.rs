//! Flattened, read-only label view and the data-parallel batch classifier.
//!
//! The view is what a compute backend would receive: grid parameters plus one
//! `u32` code per cell (row-major). The per-point kernel is a single floor
//! division and array read; only `Mixed` cells need the CPU classifier.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::polygon::Point;

use super::types::{CellLabel, ClassifyMode, Grid, GridError, QueryError};

pub const CODE_EXTERIOR: u32 = 0;
pub const CODE_INTERIOR: u32 = 1;
pub const CODE_MIXED: u32 = 2;

/// Result of the per-point kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    Outside,
    Inside,
    /// Point falls in a `Mixed` cell; the caller must fall back to `Grid::classify`.
    Ambiguous,
}

/// Serializable snapshot of a fully labeled grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelView {
    pub grid_size: usize,
    pub min: [f64; 2],
    pub max: [f64; 2],
    pub cell_width: f64,
    pub cell_height: f64,
    /// Row-major cell codes (`CODE_*`).
    pub codes: Vec<u32>,
}

impl LabelView {
    /// Per-point kernel (cell lookup only, no ring expansion).
    ///
    /// A view whose `codes` do not cover `grid_size²` cells (e.g. hand-edited
    /// JSON) answers `Ambiguous` for the cells it cannot resolve.
    pub fn lookup(&self, p: Point) -> Lookup {
        let inside_box =
            self.min[0] < p.x && p.x < self.max[0] && self.min[1] < p.y && p.y < self.max[1];
        if !inside_box {
            return Lookup::Outside;
        }
        let Some(last) = self.grid_size.checked_sub(1) else {
            return Lookup::Ambiguous;
        };
        let col = (((p.x - self.min[0]) / self.cell_width).floor() as usize).min(last);
        let row = (((p.y - self.min[1]) / self.cell_height).floor() as usize).min(last);
        let code = row
            .checked_mul(self.grid_size)
            .and_then(|i| i.checked_add(col))
            .and_then(|i| self.codes.get(i));
        match code {
            Some(&CODE_INTERIOR) => Lookup::Inside,
            Some(&CODE_EXTERIOR) => Lookup::Outside,
            _ => Lookup::Ambiguous,
        }
    }

    /// `true` if `codes` holds exactly one entry per cell and every entry is a
    /// known code.
    pub fn is_well_formed(&self) -> bool {
        self.grid_size > 0
            && self.grid_size.checked_mul(self.grid_size) == Some(self.codes.len())
            && self.codes.iter().all(|&c| c <= CODE_MIXED)
    }

    /// Classify `points` in parallel (`true` = outside). Ambiguous lookups are
    /// resolved by `grid`, which must be the grid this view was taken from.
    pub fn classify_batch(
        &self,
        grid: &Grid,
        points: &[Point],
        mode: ClassifyMode,
    ) -> Result<Vec<bool>, QueryError> {
        points
            .par_iter()
            .map(|&p| {
                if !(p.x.is_finite() && p.y.is_finite()) {
                    return Err(QueryError::NonFinitePoint);
                }
                match self.lookup(p) {
                    Lookup::Outside => Ok(true),
                    Lookup::Inside => Ok(false),
                    Lookup::Ambiguous => grid.classify_with(p, mode),
                }
            })
            .collect()
    }
}

impl Grid {
    /// Flattened codes for upload. Fails while any cell is still `Unknown`.
    pub fn label_view(&self) -> Result<LabelView, GridError> {
        let codes = self
            .cells
            .iter()
            .map(|c| match c.label {
                CellLabel::Interior => Some(CODE_INTERIOR),
                CellLabel::Exterior => Some(CODE_EXTERIOR),
                CellLabel::Mixed => Some(CODE_MIXED),
                CellLabel::Unknown => None,
            })
            .collect::<Option<Vec<u32>>>()
            .ok_or_else(|| GridError::NotLabeled {
                unknown: self.label_counts()[0],
            })?;
        Ok(LabelView {
            grid_size: self.grid_size,
            min: [self.bbox.min.x, self.bbox.min.y],
            max: [self.bbox.max.x, self.bbox.max.y],
            cell_width: self.cell_w,
            cell_height: self.cell_h,
            codes,
        })
    }

    /// Binary `{0, 1}` codes with `Mixed` cells pre-resolved by the winding number
    /// at the cell center (interior bias for backends without a CPU fallback).
    pub fn biased_labels(&self) -> Result<Vec<u32>, GridError> {
        let view = self.label_view()?;
        Ok(view
            .codes
            .iter()
            .zip(&self.cells)
            .map(|(&code, cell)| {
                if code == CODE_MIXED {
                    u32::from(self.polygon.contains(cell.bbox.center()))
                } else {
                    code
                }
            })
            .collect())
    }

    /// Parallel `classify` over many points (`true` = outside).
    pub fn classify_batch(&self, points: &[Point]) -> Result<Vec<bool>, QueryError> {
        self.classify_batch_with(points, ClassifyMode::default())
    }

    /// On a labeled grid this goes through the flattened view; otherwise every
    /// point takes the full classifier.
    pub fn classify_batch_with(
        &self,
        points: &[Point],
        mode: ClassifyMode,
    ) -> Result<Vec<bool>, QueryError> {
        match self.label_view() {
            Ok(view) => view.classify_batch(self, points, mode),
            Err(_) => points
                .par_iter()
                .map(|&p| self.classify_with(p, mode))
                .collect(),
        }
    }
}

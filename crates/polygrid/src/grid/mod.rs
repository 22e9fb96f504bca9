//! Grid-accelerated point-in-polygon classification.
//!
//! Pipeline
//! - `build`: pad the polygon bounding box, allocate `grid_size²` cells, and clip
//!   every edge into per-cell parametric pieces (cells hit become `Mixed`).
//! - `label`: flood-fill the remaining `Unknown` cells (4-connectivity) and settle
//!   each component with one winding-number probe.
//! - `query`: O(1) answers for Interior/Exterior cells, nearest-segment side test
//!   for Mixed cells, bounded ring expansion when a cell carries no segments.
//! - `batch`: flattened label view and a rayon-parallel batch classifier.
//!
//! The grid is built once and then read-only; rebuild to change polygon or size.

mod batch;
mod build;
mod label;
mod query;
mod types;

pub use batch::{LabelView, Lookup, CODE_EXTERIOR, CODE_INTERIOR, CODE_MIXED};
pub use types::{
    BBox, Cell, CellLabel, ClassifyMode, Grid, GridCfg, GridError, QueryError, Segment,
};

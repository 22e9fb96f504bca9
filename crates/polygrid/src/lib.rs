//! Grid-accelerated point-in-polygon classification.
//!
//! A `Grid` is built once from a closed polygon and a cell count per side; it then
//! answers "is this point outside?" in near-constant time, singly or in parallel
//! batches, and exposes a flattened label view for compute backends.
//!
//! API Policy
//! - Breaking changes are fine while the crate is pre-1.0; prefer clarity over
//!   compatibility.

pub mod grid;
pub mod polygon;
pub mod sample;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use grid::{ClassifyMode, Grid, GridCfg, GridError, LabelView, QueryError};
pub use polygon::{Point, Polygon, PolygonError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::grid::{
        BBox, Cell, CellLabel, ClassifyMode, Grid, GridCfg, GridError, LabelView, Lookup,
        QueryError, Segment,
    };
    pub use crate::polygon::{Orientation, Point, Polygon, PolygonError};
    pub use crate::sample::{draw_star_polygon, ReplayToken, StarCfg, VertexCount};
}

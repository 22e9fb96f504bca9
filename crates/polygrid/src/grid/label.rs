//! Flood-fill labeling of the cells the clipper left `Unknown`.
//!
//! Each 4-connected component of `Unknown` cells lies entirely on one side of the
//! boundary, so a single winding-number probe (at the center of any member)
//! decides the whole component.

use std::collections::VecDeque;

use tracing::debug;

use super::types::{CellLabel, Grid};

const MOVES: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

impl Grid {
    /// Resolve every `Unknown` cell to `Interior` or `Exterior`.
    ///
    /// `Mixed` cells are never touched. Each cell joins at most one component,
    /// so the pass is linear in the number of cells plus one O(edges) probe per
    /// component.
    pub fn assign_cell_types(&mut self) {
        let n = self.grid_size;
        let mut visited = vec![false; n * n];
        let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
        let mut component: Vec<(usize, usize)> = Vec::new();
        let mut components = 0usize;
        let mut probes = 0usize;

        for start in 0..n * n {
            if visited[start] || self.cells[start].label != CellLabel::Unknown {
                continue;
            }
            visited[start] = true;
            queue.push_back((start % n, start / n));
            component.clear();
            let mut connected = CellLabel::Unknown;

            while let Some((col, row)) = queue.pop_front() {
                component.push((col, row));
                for (dc, dr) in MOVES {
                    let (Some(nc), Some(nr)) =
                        (col.checked_add_signed(dc), row.checked_add_signed(dr))
                    else {
                        continue;
                    };
                    if nc >= n || nr >= n {
                        continue;
                    }
                    let k = nr * n + nc;
                    match self.cells[k].label {
                        CellLabel::Unknown => {
                            if !visited[k] {
                                visited[k] = true;
                                queue.push_back((nc, nr));
                            }
                        }
                        CellLabel::Mixed => {}
                        known => connected = known,
                    }
                }
            }

            if connected == CellLabel::Unknown {
                let (col, row) = component[0];
                let probe = self.cell(col, row).bbox.center();
                connected = if self.polygon.contains(probe) {
                    CellLabel::Interior
                } else {
                    CellLabel::Exterior
                };
                probes += 1;
            }
            for &(col, row) in &component {
                self.cell_mut(col, row).label = connected;
            }
            components += 1;
        }
        debug!(components, probes, "labeled unknown cells");
    }
}

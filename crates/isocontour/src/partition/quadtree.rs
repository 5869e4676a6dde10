//! Adaptive quadtree partition.
//!
//! Starting from a root that spans the domain, a node is split into four
//! children while
//!
//! ```text
//!   |sample(center)| <= radius * √2    and    remaining depth > 0
//! ```
//!
//! For a distance field this keeps every cell the contour might cross, so
//! boundary leaves all reach the maximum depth. Fields that overestimate
//! distance stop early and produce coarse boundary leaves beside fine ones
//! (T-junctions), which the adjacency stage handles.
//!
//! Children are numbered by quadrant, bit 0 = +x, bit 1 = +y:
//!
//! ```text
//!   ┌─────┬─────┐
//!   │  2  │  3  │
//!   ├─────┼─────┤
//!   │  0  │  1  │
//!   └─────┴─────┘
//! ```
//!
//! Every leaf samples its four corners. Interior nodes only sample their
//! center.
//!
//! The arena is capped by a node budget. A field that hugs zero over a wide
//! area would otherwise refine all of it down to `4^max_depth` nodes.

use glam::UVec2;

use super::{Cell, Layout, Lattice, Partition};
use crate::bounds::Domain;
use crate::constants::{
  CROSSING_REACH, MAX_QUADTREE_NODES, MAX_SUBDIVISION_DEPTH, NO_CELL, QUADRANT_OFFSETS,
};
use crate::error::{ExtractionError, ExtractionResult};
use crate::field::ScalarField;

/// Build a quadtree of at most `max_depth` levels below the root.
pub fn build<F: ScalarField + ?Sized>(
  field: &F,
  domain: &Domain,
  max_depth: u32,
) -> ExtractionResult<Partition> {
  build_with_budget(field, domain, max_depth, MAX_QUADTREE_NODES)
}

/// Same as [`build`], failing with [`ExtractionError::NodeBudgetExceeded`]
/// instead of growing past `node_budget` nodes.
pub fn build_with_budget<F: ScalarField + ?Sized>(
  field: &F,
  domain: &Domain,
  max_depth: u32,
  node_budget: usize,
) -> ExtractionResult<Partition> {
  if max_depth > MAX_SUBDIVISION_DEPTH {
    return Err(ExtractionError::DepthTooLarge {
      depth: max_depth,
      max: MAX_SUBDIVISION_DEPTH,
    });
  }

  let span = 1u32 << max_depth;
  let lattice = Lattice {
    origin: domain.min,
    unit: domain.size / span as f64,
  };

  let mut builder = Builder {
    field,
    lattice,
    cells: Vec::new(),
    node_budget,
  };
  let root = builder.subdivide(UVec2::ZERO, span, 0, max_depth, NO_CELL, 0)?;

  let mut partition = Partition {
    cells: builder.cells,
    boundary_cells: Vec::new(),
    lattice,
    layout: Layout::Quadtree { root, max_depth },
  };
  partition.assign_boundary_indices();

  #[cfg(feature = "tracing")]
  tracing::debug!(
    nodes = partition.cells.len(),
    boundary_cells = partition.boundary_count(),
    "quadtree built"
  );

  Ok(partition)
}

struct Builder<'a, F: ?Sized> {
  field: &'a F,
  lattice: Lattice,
  cells: Vec<Cell>,
  node_budget: usize,
}

impl<F: ScalarField + ?Sized> Builder<'_, F> {
  fn subdivide(
    &mut self,
    lattice_min: UVec2,
    span: u32,
    depth: u32,
    remaining: u32,
    parent: i32,
    quadrant: u8,
  ) -> ExtractionResult<usize> {
    let index = self.cells.len();
    if index >= self.node_budget {
      return Err(ExtractionError::NodeBudgetExceeded {
        limit: self.node_budget,
      });
    }

    let center = self.lattice.cell_center(lattice_min, span);
    let radius = span as f64 * self.lattice.unit * 0.5;
    let value = self.field.sample_at(center);

    let mut cell = Cell::new(center, radius, lattice_min, span, depth);
    cell.center_value = Some(value);
    cell.parent = parent;
    cell.parent_quadrant = quadrant;

    // NaN compares false and ends the descent.
    let may_cross = value.abs() <= radius * CROSSING_REACH;

    if remaining > 0 && may_cross {
      cell.leaf = false;
      self.cells.push(cell);

      let half = span / 2;
      for (q, offset) in QUADRANT_OFFSETS.iter().enumerate() {
        let child_min = lattice_min + UVec2::from_array(*offset) * half;
        let child =
          self.subdivide(child_min, half, depth + 1, remaining - 1, index as i32, q as u8)?;
        self.cells[index].children[q] = child as i32;
      }
    } else {
      let lattice = self.lattice;
      let field = self.field;
      let corners = [0, 1, 2, 3].map(|c| field.sample_at(lattice.point(cell.lattice_corner(c))));
      cell.classify(corners);
      self.cells.push(cell);
    }

    Ok(index)
  }
}

#[cfg(test)]
#[path = "quadtree_test.rs"]
mod quadtree_test;

//! Spatial partition of the domain into square cells.
//!
//! Two layouts share one arena of [`Cell`]s:
//!
//! - [`uniform`]: a fixed grid, `(size / cell_diameter)²` cells, row-major
//!   from the minimum corner.
//! - [`quadtree`]: a root spanning the domain, subdivided where the contour
//!   may pass. Children and parents are arena indices.
//!
//! # Lattice
//!
//! Every cell corner sits on an integer lattice. World positions are
//! `origin + lattice * unit`, so neighboring cells (including cells of
//! different depth meeting at a T-junction) sample bit-identical corners.
//!
//! ```text
//!   quadtree, max_depth = 2         lattice unit = size / 4
//!
//!   4 ┌───────┬───┬───┐
//!     │       │   │   │
//!   2 │       ├───┼───┤
//!     │       │   │   │
//!   0 └───────┴───┴───┘
//!     0       2   3   4
//! ```
//!
//! After building, boundary cells (leaves with mixed corner signs) receive
//! dense indices in arena order.

pub mod cell;
pub mod quadtree;
pub mod uniform;

pub use cell::Cell;

use glam::{DVec2, UVec2};

use crate::bounds::Domain;
use crate::constants::MAX_QUADTREE_NODES;
use crate::error::ExtractionResult;
use crate::field::ScalarField;
use crate::types::PartitionMode;

/// Mapping from integer lattice coordinates to world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lattice {
  pub origin: DVec2,
  /// World length of one lattice step.
  pub unit: f64,
}

impl Lattice {
  #[inline]
  pub fn point(&self, p: UVec2) -> DVec2 {
    self.origin + p.as_dvec2() * self.unit
  }

  /// Center of the square `[min, min + span]`.
  #[inline]
  pub fn cell_center(&self, min: UVec2, span: u32) -> DVec2 {
    self.origin + (min.as_dvec2() + DVec2::splat(span as f64 * 0.5)) * self.unit
  }
}

/// How the arena is organized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
  Uniform { grid_width: u32 },
  Quadtree { root: usize, max_depth: u32 },
}

/// Cell arena plus the list of boundary cells.
#[derive(Clone, Debug)]
pub struct Partition {
  pub cells: Vec<Cell>,
  /// Arena index of each boundary cell, indexed by boundary cell index.
  pub boundary_cells: Vec<usize>,
  pub lattice: Lattice,
  pub layout: Layout,
}

impl Partition {
  /// Partition `domain` according to `mode`, with the default node budget.
  pub fn build<F: ScalarField + ?Sized>(
    field: &F,
    domain: &Domain,
    mode: PartitionMode,
  ) -> ExtractionResult<Self> {
    Self::build_with_budget(field, domain, mode, MAX_QUADTREE_NODES)
  }

  /// Partition `domain` according to `mode`. An adaptive build fails once it
  /// would hold more than `node_budget` nodes.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "partition::build"))]
  pub fn build_with_budget<F: ScalarField + ?Sized>(
    field: &F,
    domain: &Domain,
    mode: PartitionMode,
    node_budget: usize,
  ) -> ExtractionResult<Self> {
    match mode {
      PartitionMode::Uniform { cell_diameter } => uniform::build(field, domain, cell_diameter),
      PartitionMode::Adaptive { max_depth } => {
        quadtree::build_with_budget(field, domain, max_depth, node_budget)
      }
    }
  }

  #[inline]
  pub fn boundary_count(&self) -> usize {
    self.boundary_cells.len()
  }

  /// Boundary cell by its dense boundary index.
  #[inline]
  pub fn boundary_cell(&self, boundary_index: usize) -> &Cell {
    &self.cells[self.boundary_cells[boundary_index]]
  }

  pub fn leaf_count(&self) -> usize {
    self.cells.iter().filter(|c| c.leaf).count()
  }

  pub fn max_leaf_depth(&self) -> u32 {
    self
      .cells
      .iter()
      .filter(|c| c.leaf)
      .map(|c| c.depth)
      .max()
      .unwrap_or(0)
  }

  /// World position of a Morton corner of `cell`.
  #[inline]
  pub fn corner_position(&self, cell: &Cell, corner: usize) -> DVec2 {
    self.lattice.point(cell.lattice_corner(corner))
  }

  pub(crate) fn assign_boundary_indices(&mut self) {
    self.boundary_cells.clear();
    for (index, cell) in self.cells.iter_mut().enumerate() {
      if cell.is_boundary() {
        cell.boundary_cell_index = self.boundary_cells.len() as i32;
        self.boundary_cells.push(index);
      }
    }
  }
}

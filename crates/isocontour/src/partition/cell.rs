//! Cell - one quadtree node or uniform grid cell.

use glam::{DVec2, UVec2};
use smallvec::SmallVec;

use crate::constants::NO_CELL;
use crate::topology::{crosses, MORTON_TO_MARCHING};

/// One node of the partition arena.
///
/// Positions are stored both in world space and as integer lattice
/// coordinates. Corner positions are always derived from the lattice so two
/// cells sharing a corner sample exactly the same point.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
  /// World-space center.
  pub center: DVec2,
  /// Half edge length.
  pub radius: f64,
  /// Minimum corner in lattice units.
  pub lattice_min: UVec2,
  /// Edge length in lattice units.
  pub span: u32,
  /// Depth below the root (always 0 in a uniform grid).
  pub depth: u32,

  /// Field value at the center, when sampled.
  pub center_value: Option<f64>,
  /// Field values at the corners in Morton order (leaves only).
  pub corner_values: [f64; 4],
  /// Inside bit per Morton corner.
  pub corner_code: u8,
  /// `corner_code` in marching-squares order.
  pub topology_code: u8,

  pub leaf: bool,
  /// Corner signs are mixed.
  pub contains_contour: bool,

  /// Child arena indices per quadrant, [`NO_CELL`] when absent.
  pub children: [i32; 4],
  /// Parent arena index, [`NO_CELL`] for the root and for grid cells.
  pub parent: i32,
  /// Quadrant of this cell within its parent.
  pub parent_quadrant: u8,

  /// Dense index among boundary cells, [`NO_CELL`] if not a boundary cell.
  pub boundary_cell_index: i32,
  /// Row-major grid index (uniform grid only), [`NO_CELL`] otherwise.
  pub grid_index: i32,
}

impl Cell {
  pub(crate) fn new(center: DVec2, radius: f64, lattice_min: UVec2, span: u32, depth: u32) -> Self {
    Self {
      center,
      radius,
      lattice_min,
      span,
      depth,
      center_value: None,
      corner_values: [f64::NAN; 4],
      corner_code: 0,
      topology_code: 0,
      leaf: true,
      contains_contour: false,
      children: [NO_CELL; 4],
      parent: NO_CELL,
      parent_quadrant: 0,
      boundary_cell_index: NO_CELL,
      grid_index: NO_CELL,
    }
  }

  /// Store corner samples and derive both codes.
  pub(crate) fn classify(&mut self, corner_values: [f64; 4]) {
    self.corner_values = corner_values;
    self.corner_code = crate::topology::corner_code(&corner_values);
    self.topology_code = MORTON_TO_MARCHING[self.corner_code as usize];
    self.contains_contour = self.corner_code != 0 && self.corner_code != 0b1111;
  }

  /// Lattice coordinates of a Morton corner.
  #[inline]
  pub fn lattice_corner(&self, corner: usize) -> UVec2 {
    self.lattice_min + UVec2::new((corner & 1) as u32, (corner >> 1) as u32) * self.span
  }

  /// Leaf crossed by the contour.
  #[inline]
  pub fn is_boundary(&self) -> bool {
    self.leaf && self.contains_contour
  }

  /// True when edge `edge` (marching-squares numbering) has a sign change.
  #[inline]
  pub fn crosses(&self, edge: usize) -> bool {
    crosses(self.topology_code, edge)
  }

  #[inline]
  pub fn child(&self, quadrant: usize) -> Option<usize> {
    usize::try_from(self.children[quadrant]).ok()
  }

  /// Arena indices of all present children.
  pub fn child_indices(&self) -> SmallVec<[usize; 4]> {
    (0..4).filter_map(|q| self.child(q)).collect()
  }

  #[inline]
  pub fn parent(&self) -> Option<usize> {
    usize::try_from(self.parent).ok()
  }

  #[inline]
  pub fn boundary_index(&self) -> Option<usize> {
    usize::try_from(self.boundary_cell_index).ok()
  }
}

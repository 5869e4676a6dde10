//! Face adjacency between boundary cells.
//!
//! The table is flat, `boundary_count * 4` entries, indexed by
//! `boundary_index * 4 + edge` (marching-squares edge numbering). Each entry
//! is the neighboring boundary cell across that edge, or [`NO_CELL`].
//!
//! # Uniform Grid
//!
//! Row and column arithmetic on the grid index: top is `+width`, right is
//! `+1`, bottom is `-width`, left is `-1`.
//!
//! # Quadtree
//!
//! Three mutually recursive walks over the arena:
//!
//! ```text
//!   face(node)               recurse into the children, then pair the
//!                            four internal faces:
//!                              ┌────┬────┐
//!                              │ c2 │ c3 │   vertical(c2, c0)  vertical(c3, c1)
//!                              ├────┼────┤   horizontal(c0, c1)
//!                              │ c0 │ c1 │   horizontal(c2, c3)
//!                              └────┴────┘
//!
//!   horizontal(left, right)  shared vertical face, pairs (L1, R0) (L3, R2)
//!   vertical(upper, lower)   shared horizontal face, pairs (U0, L2) (U1, L3)
//! ```
//!
//! When exactly one side is a leaf, only the two children of the other side
//! that touch the leaf are visited, so a coarse leaf is offered every fine
//! leaf along its face (a T-junction). A table slot keeps one neighbor:
//! the first candidate, replaced only by a candidate whose facing edge is
//! crossed when the current holder's is not. A replaced holder loses its
//! back-link, so the table stays symmetric.

use crate::constants::{EDGES_PER_CELL, NO_CELL};
use crate::partition::{Layout, Partition};
use crate::topology::{opposite, BOTTOM, LEFT, RIGHT, TOP};

/// Per-edge neighbors of every boundary cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyTable {
  links: Vec<i32>,
}

impl AdjacencyTable {
  /// Table for `boundary_count` cells with no links.
  pub fn new(boundary_count: usize) -> Self {
    Self {
      links: vec![NO_CELL; boundary_count * EDGES_PER_CELL],
    }
  }

  /// Resolve adjacency for every boundary cell of `partition`.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "adjacency::build"))]
  pub fn build(partition: &Partition) -> Self {
    let mut table = Self::new(partition.boundary_count());

    match partition.layout {
      Layout::Uniform { grid_width } => uniform_adjacency(partition, grid_width, &mut table),
      Layout::Quadtree { root, .. } => face_adjacency(partition, &mut table, root),
    }

    debug_assert!(table.is_symmetric());
    table
  }

  /// Neighbor boundary index across `edge`, if any.
  #[inline]
  pub fn neighbor(&self, boundary_index: usize, edge: usize) -> Option<usize> {
    usize::try_from(self.get(boundary_index, edge)).ok()
  }

  /// Raw entry, [`NO_CELL`] when absent.
  #[inline]
  pub fn get(&self, boundary_index: usize, edge: usize) -> i32 {
    self.links[boundary_index * EDGES_PER_CELL + edge]
  }

  #[inline]
  pub(crate) fn set(&mut self, boundary_index: usize, edge: usize, value: i32) {
    self.links[boundary_index * EDGES_PER_CELL + edge] = value;
  }

  /// Number of cells in the table.
  #[inline]
  pub fn len(&self) -> usize {
    self.links.len() / EDGES_PER_CELL
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.links.is_empty()
  }

  pub fn as_slice(&self) -> &[i32] {
    &self.links
  }

  /// Every link `c --e--> d` has the matching `d --opposite(e)--> c`.
  pub fn is_symmetric(&self) -> bool {
    (0..self.len()).all(|cell| {
      (0..EDGES_PER_CELL).all(|edge| match self.neighbor(cell, edge) {
        Some(other) => self.get(other, opposite(edge)) == cell as i32,
        None => true,
      })
    })
  }
}

fn uniform_adjacency(partition: &Partition, grid_width: u32, table: &mut AdjacencyTable) {
  let width = grid_width as usize;

  for (b, &index) in partition.boundary_cells.iter().enumerate() {
    let col = index % width;
    let row = index / width;

    let neighbors = [
      (TOP, (row + 1 < width).then(|| index + width)),
      (RIGHT, (col + 1 < width).then(|| index + 1)),
      (BOTTOM, (row > 0).then(|| index - width)),
      (LEFT, (col > 0).then(|| index - 1)),
    ];

    for (edge, neighbor) in neighbors {
      if let Some(other) = neighbor.and_then(|n| partition.cells[n].boundary_index()) {
        table.set(b, edge, other as i32);
      }
    }
  }
}

/// Pair up the faces inside `node`, children first.
pub fn face_adjacency(partition: &Partition, table: &mut AdjacencyTable, node: usize) {
  let cell = &partition.cells[node];
  if cell.leaf {
    return;
  }

  let children = cell.child_indices();
  for &child in &children {
    face_adjacency(partition, table, child);
  }

  let &[c0, c1, c2, c3] = children.as_slice() else {
    return;
  };
  vertical_adjacency(partition, table, c2, c0);
  vertical_adjacency(partition, table, c3, c1);
  horizontal_adjacency(partition, table, c0, c1);
  horizontal_adjacency(partition, table, c2, c3);
}

/// Resolve the shared face of `left` and `right` (left's right edge).
pub fn horizontal_adjacency(
  partition: &Partition,
  table: &mut AdjacencyTable,
  left: usize,
  right: usize,
) {
  let (l, r) = (&partition.cells[left], &partition.cells[right]);

  match (l.leaf, r.leaf) {
    (true, true) => {
      if l.is_boundary() && r.is_boundary() {
        link(partition, table, left, RIGHT, right);
      }
    }
    (true, false) => {
      if l.is_boundary() {
        let [r0, _, r2, _] = r.children.map(|c| c as usize);
        horizontal_adjacency(partition, table, left, r0);
        horizontal_adjacency(partition, table, left, r2);
      }
    }
    (false, true) => {
      if r.is_boundary() {
        let [_, l1, _, l3] = l.children.map(|c| c as usize);
        horizontal_adjacency(partition, table, l1, right);
        horizontal_adjacency(partition, table, l3, right);
      }
    }
    (false, false) => {
      let [_, l1, _, l3] = l.children.map(|c| c as usize);
      let [r0, _, r2, _] = r.children.map(|c| c as usize);
      horizontal_adjacency(partition, table, l1, r0);
      horizontal_adjacency(partition, table, l3, r2);
    }
  }
}

/// Resolve the shared face of `upper` and `lower` (upper's bottom edge).
pub fn vertical_adjacency(
  partition: &Partition,
  table: &mut AdjacencyTable,
  upper: usize,
  lower: usize,
) {
  let (u, d) = (&partition.cells[upper], &partition.cells[lower]);

  match (u.leaf, d.leaf) {
    (true, true) => {
      if u.is_boundary() && d.is_boundary() {
        link(partition, table, upper, BOTTOM, lower);
      }
    }
    (true, false) => {
      if u.is_boundary() {
        let [_, _, d2, d3] = d.children.map(|c| c as usize);
        vertical_adjacency(partition, table, upper, d2);
        vertical_adjacency(partition, table, upper, d3);
      }
    }
    (false, true) => {
      if d.is_boundary() {
        let [u0, u1, _, _] = u.children.map(|c| c as usize);
        vertical_adjacency(partition, table, u0, lower);
        vertical_adjacency(partition, table, u1, lower);
      }
    }
    (false, false) => {
      let [u0, u1, _, _] = u.children.map(|c| c as usize);
      let [_, _, d2, d3] = d.children.map(|c| c as usize);
      vertical_adjacency(partition, table, u0, d2);
      vertical_adjacency(partition, table, u1, d3);
    }
  }
}

/// Link arena cells `a` and `b` across `a`'s `edge`.
fn link(partition: &Partition, table: &mut AdjacencyTable, a: usize, edge: usize, b: usize) {
  let back = opposite(edge);
  let (Some(ba), Some(bb)) = (
    partition.cells[a].boundary_index(),
    partition.cells[b].boundary_index(),
  ) else {
    return;
  };

  if !accepts(partition, table, ba, edge, bb) || !accepts(partition, table, bb, back, ba) {
    return;
  }

  evict(table, ba, edge);
  evict(table, bb, back);
  table.set(ba, edge, bb as i32);
  table.set(bb, back, ba as i32);
}

/// Whether slot `(cell, edge)` takes `candidate`.
fn accepts(
  partition: &Partition,
  table: &AdjacencyTable,
  cell: usize,
  edge: usize,
  candidate: usize,
) -> bool {
  let Some(holder) = table.neighbor(cell, edge) else {
    return true;
  };
  if holder == candidate {
    return true;
  }

  // Both sit on the same side, so both face this slot with `opposite(edge)`.
  let facing = opposite(edge);
  partition.boundary_cell(candidate).crosses(facing)
    && !partition.boundary_cell(holder).crosses(facing)
}

/// Clear slot `(cell, edge)` and the holder's link back to `cell`.
fn evict(table: &mut AdjacencyTable, cell: usize, edge: usize) {
  if let Some(holder) = table.neighbor(cell, edge) {
    if table.get(holder, opposite(edge)) == cell as i32 {
      table.set(holder, opposite(edge), NO_CELL);
    }
  }
  table.set(cell, edge, NO_CELL);
}

#[cfg(test)]
#[path = "adjacency_test.rs"]
mod adjacency_test;

//! Zero-crossing location along cell edges.
//!
//! Both methods take an edge whose endpoints have opposite sign and narrow
//! the bracket until a sample is within `epsilon` of zero. They give up after
//! `max_steps` samples and return `None`; the caller records a missing
//! vertex instead of inventing a point.

use glam::DVec2;

use crate::adjacency::AdjacencyTable;
use crate::constants::{EDGES_PER_CELL, NO_VERTEX};
use crate::field::{is_inside, ScalarField};
use crate::partition::Partition;
use crate::topology::{opposite, EDGE_CORNERS, MARCHING_TO_MORTON};
use crate::types::ExtractionConfig;

/// Root-finding method for edge crossings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CrossingMethod {
  /// Halve the bracket every step.
  #[default]
  Bisection,
  /// Illinois false position: interpolate the bracket linearly, halving the
  /// value of an endpoint that survives two steps in a row.
  FalsePosition,
}

impl CrossingMethod {
  #[inline]
  pub fn locate<F: ScalarField + ?Sized>(
    self,
    field: &F,
    a: DVec2,
    da: f64,
    b: DVec2,
    db: f64,
    epsilon: f64,
    max_steps: u32,
  ) -> Option<DVec2> {
    match self {
      CrossingMethod::Bisection => locate_crossing(field, a, da, b, db, epsilon, max_steps),
      CrossingMethod::FalsePosition => {
        locate_crossing_false_position(field, a, da, b, db, epsilon, max_steps)
      }
    }
  }
}

/// Bisect `[a, b]` for the zero crossing of `field`.
///
/// `da` and `db` are the field values at the endpoints and must lie on
/// opposite sides of the surface.
///
/// # Panics
///
/// If `da` and `db` are both inside or both outside.
pub fn locate_crossing<F: ScalarField + ?Sized>(
  field: &F,
  a: DVec2,
  da: f64,
  b: DVec2,
  db: f64,
  epsilon: f64,
  max_steps: u32,
) -> Option<DVec2> {
  assert!(
    is_inside(da) != is_inside(db),
    "crossing requested on an edge without a sign change ({da}, {db})"
  );

  let lo_inside = is_inside(da);
  let (mut lo, mut hi) = (a, b);

  for _ in 0..max_steps {
    let mid = (lo + hi) * 0.5;
    let value = field.sample_at(mid);
    if value.abs() <= epsilon {
      return Some(mid);
    }

    if is_inside(value) == lo_inside {
      lo = mid;
    } else {
      hi = mid;
    }
  }

  None
}

/// Illinois false position on `[a, b]`. Same contract as [`locate_crossing`].
///
/// # Panics
///
/// If `da` and `db` are both inside or both outside.
pub fn locate_crossing_false_position<F: ScalarField + ?Sized>(
  field: &F,
  a: DVec2,
  da: f64,
  b: DVec2,
  db: f64,
  epsilon: f64,
  max_steps: u32,
) -> Option<DVec2> {
  assert!(
    is_inside(da) != is_inside(db),
    "crossing requested on an edge without a sign change ({da}, {db})"
  );

  let lo_inside = is_inside(da);
  let (mut lo, mut f_lo) = (a, da);
  let (mut hi, mut f_hi) = (b, db);
  // Which end moved last: Some(true) = lo.
  let mut last_moved: Option<bool> = None;

  for _ in 0..max_steps {
    let t = f_lo / (f_lo - f_hi);
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    let p = lo + (hi - lo) * t;
    let value = field.sample_at(p);
    if value.abs() <= epsilon {
      return Some(p);
    }

    if is_inside(value) == lo_inside {
      lo = p;
      f_lo = value;
      if last_moved == Some(true) {
        f_hi *= 0.5;
      }
      last_moved = Some(true);
    } else {
      hi = p;
      f_hi = value;
      if last_moved == Some(false) {
        f_lo *= 0.5;
      }
      last_moved = Some(false);
    }
  }

  None
}

/// Located crossings of every boundary cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Crossings {
  pub vertices: Vec<DVec2>,
  /// `boundary_count * 4` vertex indices, [`NO_VERTEX`] where an edge has
  /// no crossing or the locator gave up.
  pub cell_vertices: Vec<i32>,
  /// Edges where the locator ran out of steps.
  pub failures: u32,
}

impl Crossings {
  #[inline]
  pub fn get(&self, boundary_index: usize, edge: usize) -> i32 {
    self.cell_vertices[boundary_index * EDGES_PER_CELL + edge]
  }

  #[inline]
  pub fn vertex(&self, boundary_index: usize, edge: usize) -> Option<usize> {
    usize::try_from(self.get(boundary_index, edge)).ok()
  }

  /// Locate the crossing on every crossed edge of every boundary cell.
  ///
  /// Cells are visited in boundary order. An edge whose neighbor has a lower
  /// index and also crosses the shared face reuses the neighbor's result, so
  /// each shared crossing is one vertex.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "crossing::locate_all"))]
  pub fn locate_all<F: ScalarField + ?Sized>(
    field: &F,
    partition: &Partition,
    adjacency: &AdjacencyTable,
    config: &ExtractionConfig,
  ) -> Self {
    let count = partition.boundary_count();
    let mut crossings = Crossings {
      vertices: Vec::new(),
      cell_vertices: vec![NO_VERTEX; count * EDGES_PER_CELL],
      failures: 0,
    };

    for b in 0..count {
      let cell = partition.boundary_cell(b);

      for edge in 0..EDGES_PER_CELL {
        if !cell.crosses(edge) {
          continue;
        }

        let shared = adjacency
          .neighbor(b, edge)
          .filter(|&other| other < b && partition.boundary_cell(other).crosses(opposite(edge)));
        if let Some(other) = shared {
          crossings.cell_vertices[b * EDGES_PER_CELL + edge] = crossings.get(other, opposite(edge));
          continue;
        }

        let [m0, m1] = EDGE_CORNERS[edge].map(|c| MARCHING_TO_MORTON[c as usize] as usize);
        let located = config.crossing_method.locate(
          field,
          partition.corner_position(cell, m0),
          cell.corner_values[m0],
          partition.corner_position(cell, m1),
          cell.corner_values[m1],
          config.epsilon,
          config.max_steps,
        );

        match located {
          Some(point) => {
            crossings.cell_vertices[b * EDGES_PER_CELL + edge] = crossings.vertices.len() as i32;
            crossings.vertices.push(point);
          }
          None => crossings.failures += 1,
        }
      }
    }

    crossings
  }
}

#[cfg(test)]
#[path = "crossing_test.rs"]
mod crossing_test;

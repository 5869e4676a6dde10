//! Configuration and output types for contour extraction.

use glam::DVec2;

use crate::bounds::Domain;
use crate::constants::{
  DEFAULT_DOMAIN_SIZE, DEFAULT_EPSILON, DEFAULT_MAX_DEPTH, DEFAULT_MAX_STEPS,
  MAX_QUADTREE_NODES, MAX_SUBDIVISION_DEPTH, NO_VERTEX,
};
use crate::crossing::CrossingMethod;
use crate::error::{ExtractionError, ExtractionResult};
use crate::partition::uniform;
use crate::predicates::{orient2d, point_in_polygon, Containment};
use crate::topology::SaddleRule;

/// How the domain is divided into cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PartitionMode {
  /// Fixed grid of `cell_diameter` cells. The diameter must be a power of
  /// two that divides the domain size.
  Uniform { cell_diameter: f64 },

  /// Quadtree refined near the contour, at most `max_depth` levels below
  /// the root.
  Adaptive { max_depth: u32 },
}

impl Default for PartitionMode {
  fn default() -> Self {
    PartitionMode::Adaptive {
      max_depth: DEFAULT_MAX_DEPTH,
    }
  }
}

/// Parameters for one extraction.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractionConfig {
  pub domain: Domain,
  pub mode: PartitionMode,
  /// Most quadtree nodes one adaptive build may allocate.
  pub node_budget: usize,

  /// A crossing is accepted once `|sample| <= epsilon`.
  pub epsilon: f64,

  /// Field samples allowed per edge before the crossing is abandoned.
  pub max_steps: u32,

  pub saddle_rule: SaddleRule,
  pub crossing_method: CrossingMethod,

  /// Fill [`ExtractionOutput::normals`].
  pub compute_normals: bool,

  /// Fill [`ExtractionOutput::diagnostics`].
  pub collect_diagnostics: bool,
}

impl Default for ExtractionConfig {
  fn default() -> Self {
    Self {
      domain: Domain::new(DVec2::ZERO, DEFAULT_DOMAIN_SIZE),
      mode: PartitionMode::default(),
      node_budget: MAX_QUADTREE_NODES,
      epsilon: DEFAULT_EPSILON,
      max_steps: DEFAULT_MAX_STEPS,
      saddle_rule: SaddleRule::default(),
      crossing_method: CrossingMethod::default(),
      compute_normals: false,
      collect_diagnostics: false,
    }
  }
}

impl ExtractionConfig {
  pub fn new() -> Self {
    Self::default()
  }

  /// Uniform grid over `domain`.
  pub fn uniform(domain: Domain, cell_diameter: f64) -> Self {
    Self::default()
      .with_domain(domain)
      .with_mode(PartitionMode::Uniform { cell_diameter })
  }

  /// Adaptive quadtree over `domain`.
  pub fn adaptive(domain: Domain, max_depth: u32) -> Self {
    Self::default()
      .with_domain(domain)
      .with_mode(PartitionMode::Adaptive { max_depth })
  }

  pub fn with_domain(mut self, domain: Domain) -> Self {
    self.domain = domain;
    self
  }

  pub fn with_mode(mut self, mode: PartitionMode) -> Self {
    self.mode = mode;
    self
  }

  pub fn with_node_budget(mut self, node_budget: usize) -> Self {
    self.node_budget = node_budget;
    self
  }

  pub fn with_epsilon(mut self, epsilon: f64) -> Self {
    self.epsilon = epsilon;
    self
  }

  pub fn with_max_steps(mut self, max_steps: u32) -> Self {
    self.max_steps = max_steps;
    self
  }

  pub fn with_saddle_rule(mut self, rule: SaddleRule) -> Self {
    self.saddle_rule = rule;
    self
  }

  pub fn with_crossing_method(mut self, method: CrossingMethod) -> Self {
    self.crossing_method = method;
    self
  }

  pub fn with_normals(mut self, enabled: bool) -> Self {
    self.compute_normals = enabled;
    self
  }

  pub fn with_diagnostics(mut self, enabled: bool) -> Self {
    self.collect_diagnostics = enabled;
    self
  }

  /// Reject configurations the partitioner cannot honour.
  pub fn validate(&self) -> ExtractionResult<()> {
    if !self.domain.is_valid() {
      return Err(ExtractionError::InvalidDomain {
        min: self.domain.min,
        size: self.domain.size,
      });
    }

    match self.mode {
      PartitionMode::Uniform { cell_diameter } => {
        uniform::grid_width(&self.domain, cell_diameter)?;
      }
      PartitionMode::Adaptive { max_depth } => {
        if max_depth > MAX_SUBDIVISION_DEPTH {
          return Err(ExtractionError::DepthTooLarge {
            depth: max_depth,
            max: MAX_SUBDIVISION_DEPTH,
          });
        }
      }
    }

    if !self.epsilon.is_finite() || self.epsilon < 0.0 {
      return Err(ExtractionError::InvalidEpsilon {
        epsilon: self.epsilon,
      });
    }

    Ok(())
  }
}

/// Counters describing one extraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractionStats {
  /// Cells in the partition arena (interior quadtree nodes included).
  pub cell_count: usize,
  pub leaf_count: usize,
  pub boundary_cell_count: usize,
  /// Boundary cells with topology code 5 or 10.
  pub saddle_cell_count: usize,
  pub vertex_count: usize,
  pub loop_count: usize,
  pub closed_loop_count: usize,
  pub open_loop_count: usize,
  /// Crossed edges where the locator ran out of steps.
  pub convergence_failures: u32,
  pub max_leaf_depth: u32,
}

/// Per boundary cell debug arrays, indexed by boundary index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
  pub corner_codes: Vec<u8>,
  pub topology_codes: Vec<u8>,
  pub centers: Vec<DVec2>,
  pub radii: Vec<f64>,
  pub depths: Vec<u32>,
  /// `boundary_count * 4` neighbor indices.
  pub adjacency: Vec<i32>,
  /// `boundary_count * 4` vertex indices.
  pub cell_vertices: Vec<i32>,
}

/// Orientation of a closed loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winding {
  CounterClockwise,
  Clockwise,
  /// Fewer than three distinct points, or all collinear.
  Degenerate,
}

/// Result of an extraction.
///
/// Loops are vertex index lists. A closed loop repeats its first index at
/// the end; [`NO_VERTEX`] marks a point where the chain was broken.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractionOutput {
  pub vertices: Vec<DVec2>,
  pub loops: Vec<Vec<i32>>,
  /// Unit field gradient per vertex, empty unless requested.
  pub normals: Vec<DVec2>,
  pub stats: ExtractionStats,
  pub diagnostics: Option<Diagnostics>,
}

impl ExtractionOutput {
  pub fn is_empty(&self) -> bool {
    self.loops.is_empty()
  }

  /// First index equals last index and no vertex is missing.
  pub fn is_closed_loop(&self, index: usize) -> bool {
    let Some(indices) = self.loops.get(index) else {
      return false;
    };
    indices.len() > 1
      && indices.first() == indices.last()
      && !indices.contains(&NO_VERTEX)
  }

  /// Points of a loop, missing vertices skipped and the closing repeat
  /// dropped.
  pub fn loop_points(&self, index: usize) -> Vec<DVec2> {
    let Some(indices) = self.loops.get(index) else {
      return Vec::new();
    };

    let mut slice = indices.as_slice();
    if slice.len() > 1 && slice.first() == slice.last() {
      slice = &slice[..slice.len() - 1];
    }

    slice
      .iter()
      .filter_map(|&i| usize::try_from(i).ok())
      .map(|i| self.vertices[i])
      .collect()
  }

  /// Shoelace area of a loop, treated as closed. Negative for clockwise
  /// loops, which is how every loop around an inside region winds.
  pub fn signed_area(&self, index: usize) -> f64 {
    let points = self.loop_points(index);
    if points.len() < 3 {
      return 0.0;
    }

    let twice: f64 = points
      .iter()
      .zip(points.iter().cycle().skip(1))
      .map(|(a, b)| a.perp_dot(*b))
      .sum();
    twice * 0.5
  }

  /// Exact orientation of a loop, taken at its lowest-leftmost point.
  pub fn winding(&self, index: usize) -> Winding {
    let points = self.loop_points(index);
    let n = points.len();
    if n < 3 {
      return Winding::Degenerate;
    }

    let pivot = (0..n)
      .min_by(|&i, &j| {
        let (a, b) = (points[i], points[j]);
        a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x))
      })
      .unwrap_or(0);

    let prev = points[(pivot + n - 1) % n];
    let next = points[(pivot + 1) % n];
    let det = orient2d(prev, points[pivot], next);

    if det > 0.0 {
      Winding::CounterClockwise
    } else if det < 0.0 {
      Winding::Clockwise
    } else {
      Winding::Degenerate
    }
  }

  /// Classify `point` against the closed loops with the even-odd rule.
  ///
  /// A point on any closed loop is [`Containment::Boundary`]. Open loops are
  /// ignored.
  pub fn classify_point(&self, point: DVec2) -> Containment {
    let mut inside = false;

    for index in 0..self.loops.len() {
      if !self.is_closed_loop(index) {
        continue;
      }

      match point_in_polygon(&self.loop_points(index), point) {
        Containment::Boundary => return Containment::Boundary,
        Containment::Inside => inside = !inside,
        Containment::Outside => {}
      }
    }

    if inside {
      Containment::Inside
    } else {
      Containment::Outside
    }
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

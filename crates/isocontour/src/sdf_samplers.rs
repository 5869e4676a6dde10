//! Simple SDF samplers for testing, benchmarking and demos.
//!
//! These implement deterministic mathematical fields that are easy to verify
//! by hand. Combinators compose them with the usual min/max CSG rules.

use glam::DVec2;

use crate::field::ScalarField;
use crate::predicates::{point_in_polygon, Containment};

/// Circle SDF: `|p - center| - radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleSdf {
  pub center: DVec2,
  pub radius: f64,
}

impl CircleSdf {
  pub fn new(center: DVec2, radius: f64) -> Self {
    Self { center, radius }
  }
}

impl ScalarField for CircleSdf {
  #[inline]
  fn sample(&self, x: f64, y: f64) -> f64 {
    DVec2::new(x, y).distance(self.center) - self.radius
  }
}

/// Axis-aligned box SDF (exact, including the rounded outer corners).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSdf {
  pub center: DVec2,
  pub half_extents: DVec2,
}

impl BoxSdf {
  pub fn new(center: DVec2, half_extents: DVec2) -> Self {
    Self {
      center,
      half_extents,
    }
  }
}

impl ScalarField for BoxSdf {
  #[inline]
  fn sample(&self, x: f64, y: f64) -> f64 {
    let d = (DVec2::new(x, y) - self.center).abs() - self.half_extents;
    d.max(DVec2::ZERO).length() + d.x.max(d.y).min(0.0)
  }
}

/// Simple polygon SDF.
///
/// Magnitude is the distance to the nearest edge, sign comes from the robust
/// point-in-polygon test so points exactly on an edge sample to zero.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonSdf {
  pub vertices: Vec<DVec2>,
}

impl PolygonSdf {
  pub fn new(vertices: Vec<DVec2>) -> Self {
    Self { vertices }
  }

  /// Distance from `p` to the closest edge of the polygon.
  pub fn edge_distance(&self, p: DVec2) -> f64 {
    let n = self.vertices.len();
    (0..n)
      .map(|i| segment_distance(p, self.vertices[i], self.vertices[(i + 1) % n]))
      .fold(f64::INFINITY, f64::min)
  }
}

impl ScalarField for PolygonSdf {
  fn sample(&self, x: f64, y: f64) -> f64 {
    let p = DVec2::new(x, y);
    match point_in_polygon(&self.vertices, p) {
      Containment::Boundary => 0.0,
      Containment::Inside => -self.edge_distance(p),
      Containment::Outside => self.edge_distance(p),
    }
  }
}

fn segment_distance(p: DVec2, a: DVec2, b: DVec2) -> f64 {
  let ab = b - a;
  let len_sq = ab.length_squared();
  if len_sq == 0.0 {
    return p.distance(a);
  }
  let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
  p.distance(a + ab * t)
}

/// `min(a, b)`
#[derive(Clone, Debug)]
pub struct Union<A, B>(pub A, pub B);

impl<A: ScalarField, B: ScalarField> ScalarField for Union<A, B> {
  #[inline]
  fn sample(&self, x: f64, y: f64) -> f64 {
    self.0.sample(x, y).min(self.1.sample(x, y))
  }
}

/// `max(a, b)`
#[derive(Clone, Debug)]
pub struct Intersection<A, B>(pub A, pub B);

impl<A: ScalarField, B: ScalarField> ScalarField for Intersection<A, B> {
  #[inline]
  fn sample(&self, x: f64, y: f64) -> f64 {
    self.0.sample(x, y).max(self.1.sample(x, y))
  }
}

/// `max(a, -b)`: carve `b` out of `a`.
#[derive(Clone, Debug)]
pub struct Subtraction<A, B>(pub A, pub B);

impl<A: ScalarField, B: ScalarField> ScalarField for Subtraction<A, B> {
  #[inline]
  fn sample(&self, x: f64, y: f64) -> f64 {
    self.0.sample(x, y).max(-self.1.sample(x, y))
  }
}

/// Shift the contour to another isolevel: `field - isolevel`.
#[derive(Clone, Debug)]
pub struct Offset<F> {
  pub field: F,
  pub isolevel: f64,
}

impl<F: ScalarField> ScalarField for Offset<F> {
  #[inline]
  fn sample(&self, x: f64, y: f64) -> f64 {
    self.field.sample(x, y) - self.isolevel
  }
}

/// Multiply a field by a constant. The zero set is unchanged but the field is
/// no longer a distance, which makes the quadtree stop early near the contour
/// (factor > 1) or subdivide far from it (factor < 1).
#[derive(Clone, Debug)]
pub struct Scaled<F> {
  pub field: F,
  pub factor: f64,
}

impl<F: ScalarField> ScalarField for Scaled<F> {
  #[inline]
  fn sample(&self, x: f64, y: f64) -> f64 {
    self.field.sample(x, y) * self.factor
  }
}

/// Composite scene over a 1024 x 1024 canvas: a union of circles, one carved
/// hole, an adjustable isolevel, clamped inside a box 10 units in from the
/// canvas edge so every contour closes.
#[derive(Clone, Debug)]
pub struct DemoScene {
  pub size: f64,
  pub isolevel: f64,
}

impl Default for DemoScene {
  fn default() -> Self {
    Self {
      size: 1024.0,
      isolevel: 0.0,
    }
  }
}

impl DemoScene {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_isolevel(mut self, isolevel: f64) -> Self {
    self.isolevel = isolevel;
    self
  }
}

impl ScalarField for DemoScene {
  fn sample(&self, x: f64, y: f64) -> f64 {
    let half = self.size * 0.5;
    let p = DVec2::new(x, y);
    let circle = |cx: f64, cy: f64, r: f64| p.distance(DVec2::new(cx, cy)) - r;

    let mut d = circle(half + 16.123, half, 256.0);
    d = d.min(circle(256.0, 256.0, 128.0));
    d = d.min(circle(256.0, 768.0, 64.0));
    d = d.min(circle(840.0, 768.0, 32.0));
    d = d.min(circle(700.0, 708.0, 32.0));
    d = d.max(-circle(720.0, 512.0, 70.0));
    d -= self.isolevel;

    let clamp = BoxSdf::new(DVec2::splat(half), DVec2::splat(half - 10.0));
    d.max(clamp.sample(x, y))
  }
}

#[cfg(test)]
#[path = "sdf_samplers_test.rs"]
mod sdf_samplers_test;

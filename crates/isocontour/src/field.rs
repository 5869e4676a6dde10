//! Scalar field abstraction.
//!
//! The engine only ever calls [`ScalarField::sample`]. Negative values are
//! inside, positive values are outside, and zero counts as inside. Within one
//! cell edge the field is assumed to cross zero at most once; coarse cells
//! that violate this lose detail, which is what subdivision depth is for.

use glam::DVec2;

use crate::constants::NORMAL_STEP;

/// A pure function of 2D position.
pub trait ScalarField {
  fn sample(&self, x: f64, y: f64) -> f64;

  #[inline]
  fn sample_at(&self, p: DVec2) -> f64 {
    self.sample(p.x, p.y)
  }
}

impl<F> ScalarField for F
where
  F: Fn(f64, f64) -> f64,
{
  #[inline]
  fn sample(&self, x: f64, y: f64) -> f64 {
    self(x, y)
  }
}

/// Inside test shared by corner classification, saddle resolution and the
/// crossing locator. NaN is outside.
#[inline(always)]
pub fn is_inside(value: f64) -> bool {
  value <= 0.0
}

/// Unit normal of the field at `p` from a 4-sample diagonal stencil.
///
/// ```text
///   s2 ─── s3
///   │   p   │     nx = (s1 + s3) - (s0 + s2)
///   s0 ─── s1     ny = (s2 + s3) - (s0 + s1)
/// ```
///
/// Returns zero where the gradient vanishes.
pub fn gradient<F: ScalarField + ?Sized>(field: &F, p: DVec2) -> DVec2 {
  let h = NORMAL_STEP;
  let s0 = field.sample(p.x - h, p.y - h);
  let s1 = field.sample(p.x + h, p.y - h);
  let s2 = field.sample(p.x - h, p.y + h);
  let s3 = field.sample(p.x + h, p.y + h);

  DVec2::new(-s0 + s1 - s2 + s3, -s0 - s1 + s2 + s3).normalize_or_zero()
}

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;

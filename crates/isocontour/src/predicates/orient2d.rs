//! Robust 2D orientation test.
//!
//! Returns a value whose sign is the exact sign of the determinant
//!
//! ```text
//!   | ax - cx   ay - cy |
//!   | bx - cx   by - cy |
//! ```
//!
//! Positive when `a`, `b`, `c` wind counter-clockwise, negative when they
//! wind clockwise, exactly zero when they are collinear.
//!
//! The fast determinant is accepted when it clears a forward error bound.
//! Otherwise the result is refined through expansion arithmetic in three
//! stages (B, C, D), each stopping as soon as its own error bound is cleared.

use glam::DVec2;

use super::expansion::{
  cross_product, estimate, fast_expansion_sum_zeroelim, two_diff_tail, EPSILON, RESULT_ERR_BOUND,
};

/// Error bound for the fast (non-robust) determinant.
pub const CCW_ERR_BOUND_A: f64 = (3.0 + 16.0 * EPSILON) * EPSILON;
/// Error bound after the first expansion stage.
pub const CCW_ERR_BOUND_B: f64 = (2.0 + 12.0 * EPSILON) * EPSILON;
/// Error bound after folding in the first-order tails.
pub const CCW_ERR_BOUND_C: f64 = (9.0 + 64.0 * EPSILON) * EPSILON * EPSILON;

/// Exact-sign orientation of the triangle `(a, b, c)`.
///
/// Satisfies `orient2d(a, b, c) == -orient2d(b, a, c)` bit for bit and
/// returns `0.0` for exactly collinear input.
#[inline]
pub fn orient2d(a: DVec2, b: DVec2, c: DVec2) -> f64 {
  let detleft = (a.x - c.x) * (b.y - c.y);
  let detright = (a.y - c.y) * (b.x - c.x);
  let det = detleft - detright;

  let detsum = (detleft + detright).abs();
  if det.abs() >= CCW_ERR_BOUND_A * detsum {
    return det;
  }

  // The adaptive stages may return an intermediate estimate, so run them
  // with a canonical operand order to keep swapped calls exact negations.
  if precedes(b, a) {
    -orient2d_adapt(b, a, c, detsum)
  } else {
    orient2d_adapt(a, b, c, detsum)
  }
}

/// Non-robust orientation. Same sign convention as [`orient2d`].
#[inline]
pub fn orient2d_fast(a: DVec2, b: DVec2, c: DVec2) -> f64 {
  (a.x - c.x) * (b.y - c.y) - (a.y - c.y) * (b.x - c.x)
}

#[inline(always)]
fn precedes(p: DVec2, q: DVec2) -> bool {
  p.x < q.x || (p.x == q.x && p.y < q.y)
}

fn orient2d_adapt(a: DVec2, b: DVec2, c: DVec2, detsum: f64) -> f64 {
  let acx = a.x - c.x;
  let bcx = b.x - c.x;
  let acy = a.y - c.y;
  let bcy = b.y - c.y;

  let b_exp = cross_product(acx, bcy, acy, bcx);
  let mut det = estimate(&b_exp);
  let errbound = CCW_ERR_BOUND_B * detsum;
  if det >= errbound || -det >= errbound {
    return det;
  }

  let acxtail = two_diff_tail(a.x, c.x, acx);
  let bcxtail = two_diff_tail(b.x, c.x, bcx);
  let acytail = two_diff_tail(a.y, c.y, acy);
  let bcytail = two_diff_tail(b.y, c.y, bcy);

  if acxtail == 0.0 && acytail == 0.0 && bcxtail == 0.0 && bcytail == 0.0 {
    return det;
  }

  let errbound = CCW_ERR_BOUND_C * detsum + RESULT_ERR_BOUND * det.abs();
  det += (acx * bcytail + bcy * acxtail) - (acy * bcxtail + bcx * acytail);
  if det >= errbound || -det >= errbound {
    return det;
  }

  let mut c1 = [0.0; 8];
  let u = cross_product(acxtail, bcy, acytail, bcx);
  let c1_len = fast_expansion_sum_zeroelim(&b_exp, &u, &mut c1);

  let mut c2 = [0.0; 12];
  let u = cross_product(acx, bcytail, acy, bcxtail);
  let c2_len = fast_expansion_sum_zeroelim(&c1[..c1_len], &u, &mut c2);

  let mut d = [0.0; 16];
  let u = cross_product(acxtail, bcytail, acytail, bcxtail);
  let d_len = fast_expansion_sum_zeroelim(&c2[..c2_len], &u, &mut d);

  d[d_len - 1]
}

#[cfg(test)]
#[path = "orient2d_test.rs"]
mod orient2d_test;

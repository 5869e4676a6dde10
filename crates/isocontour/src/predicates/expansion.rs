//! Error-free floating point transformations and expansion arithmetic.
//!
//! An *expansion* is a sequence of doubles, ordered by increasing magnitude,
//! whose components do not overlap. Its exact value is the sum of its
//! components. The routines below follow Shewchuk's "Adaptive Precision
//! Floating-Point Arithmetic and Fast Robust Geometric Predicates" (1997).
//!
//! ```text
//!   a * b  =  x + y        two_product: x = fl(a * b), y = exact error
//!   a + b  =  x + y        two_sum:     x = fl(a + b), y = exact error
//!
//!   expansion  e = [e0, e1, ... en]   |e0| < |e1| < ... < |en|
//!   value(e)   = e0 + e1 + ... + en   (exact)
//!   estimate   = fl(value(e))         (≈ en for a well-formed expansion)
//! ```

/// Half an ulp of 1.0 (machine epsilon for round-to-nearest).
pub const EPSILON: f64 = f64::EPSILON * 0.5;

/// 2^ceil(53 / 2) + 1, used to split a double into two 26-bit halves.
pub const SPLITTER: f64 = 134_217_729.0;

/// Relative error bound on the final rounding of an adaptive result.
pub const RESULT_ERR_BOUND: f64 = (3.0 + 8.0 * EPSILON) * EPSILON;

/// Split `a` into high and low halves that each fit in 26 bits.
#[inline(always)]
pub fn split(a: f64) -> (f64, f64) {
  let c = SPLITTER * a;
  let hi = c - (c - a);
  (hi, a - hi)
}

/// `a + b` as a rounded sum and its exact round-off.
#[inline(always)]
pub fn two_sum(a: f64, b: f64) -> (f64, f64) {
  let x = a + b;
  let bvirt = x - a;
  let avirt = x - bvirt;
  (x, (a - avirt) + (b - bvirt))
}

/// Same as [`two_sum`], exact only when `|a| >= |b|` (or `a == 0`).
#[inline(always)]
pub fn fast_two_sum(a: f64, b: f64) -> (f64, f64) {
  let x = a + b;
  let bvirt = x - a;
  (x, b - bvirt)
}

/// `a - b` as a rounded difference and its exact round-off.
#[inline(always)]
pub fn two_diff(a: f64, b: f64) -> (f64, f64) {
  let x = a - b;
  (x, two_diff_tail(a, b, x))
}

/// Round-off of an already computed difference `x = fl(a - b)`.
#[inline(always)]
pub fn two_diff_tail(a: f64, b: f64, x: f64) -> f64 {
  let bvirt = a - x;
  let avirt = x + bvirt;
  (a - avirt) + (bvirt - b)
}

/// `a * b` as a rounded product and its exact round-off.
#[inline(always)]
pub fn two_product(a: f64, b: f64) -> (f64, f64) {
  let x = a * b;
  let (ahi, alo) = split(a);
  let (bhi, blo) = split(b);
  let y = alo * blo - (x - ahi * bhi - alo * bhi - ahi * blo);
  (x, y)
}

/// Exact difference of two 2-component expansions `(a1 + a0) - (b1 + b0)`.
#[inline(always)]
pub fn two_two_diff(a1: f64, a0: f64, b1: f64, b0: f64) -> [f64; 4] {
  let (i, x0) = two_diff(a0, b0);
  let (j, zero) = two_sum(a1, i);
  let (i, x1) = two_diff(zero, b1);
  let (x3, x2) = two_sum(j, i);
  [x0, x1, x2, x3]
}

/// Exact value of the 2x2 determinant `a * d - b * c` as a 4-component
/// expansion.
#[inline(always)]
pub fn cross_product(a: f64, d: f64, b: f64, c: f64) -> [f64; 4] {
  let (s1, s0) = two_product(a, d);
  let (t1, t0) = two_product(b, c);
  two_two_diff(s1, s0, t1, t0)
}

#[inline(always)]
fn component(e: &[f64], index: usize) -> f64 {
  e.get(index).copied().unwrap_or(0.0)
}

/// Sum two expansions, eliminating zero components from the output.
///
/// `h` must hold at least `e.len() + f.len()` components. Returns the number
/// of components written to `h`. Both inputs must be non-empty.
pub fn fast_expansion_sum_zeroelim(e: &[f64], f: &[f64], h: &mut [f64]) -> usize {
  debug_assert!(!e.is_empty() && !f.is_empty());
  debug_assert!(h.len() >= e.len() + f.len());

  let elen = e.len();
  let flen = f.len();
  let mut eindex = 0;
  let mut findex = 0;
  let mut enow = e[0];
  let mut fnow = f[0];

  let mut q = if (fnow > enow) == (fnow > -enow) {
    eindex += 1;
    let q = enow;
    enow = component(e, eindex);
    q
  } else {
    findex += 1;
    let q = fnow;
    fnow = component(f, findex);
    q
  };

  let mut hindex = 0;
  if eindex < elen && findex < flen {
    let (qnew, hh) = if (fnow > enow) == (fnow > -enow) {
      let r = fast_two_sum(enow, q);
      eindex += 1;
      enow = component(e, eindex);
      r
    } else {
      let r = fast_two_sum(fnow, q);
      findex += 1;
      fnow = component(f, findex);
      r
    };
    q = qnew;
    if hh != 0.0 {
      h[hindex] = hh;
      hindex += 1;
    }

    while eindex < elen && findex < flen {
      let (qnew, hh) = if (fnow > enow) == (fnow > -enow) {
        let r = two_sum(q, enow);
        eindex += 1;
        enow = component(e, eindex);
        r
      } else {
        let r = two_sum(q, fnow);
        findex += 1;
        fnow = component(f, findex);
        r
      };
      q = qnew;
      if hh != 0.0 {
        h[hindex] = hh;
        hindex += 1;
      }
    }
  }

  while eindex < elen {
    let (qnew, hh) = two_sum(q, enow);
    eindex += 1;
    enow = component(e, eindex);
    q = qnew;
    if hh != 0.0 {
      h[hindex] = hh;
      hindex += 1;
    }
  }

  while findex < flen {
    let (qnew, hh) = two_sum(q, fnow);
    findex += 1;
    fnow = component(f, findex);
    q = qnew;
    if hh != 0.0 {
      h[hindex] = hh;
      hindex += 1;
    }
  }

  if q != 0.0 || hindex == 0 {
    h[hindex] = q;
    hindex += 1;
  }

  hindex
}

/// Approximate value of an expansion (sum of its components).
#[inline]
pub fn estimate(e: &[f64]) -> f64 {
  e.iter().sum()
}

#[cfg(test)]
#[path = "expansion_test.rs"]
mod expansion_test;

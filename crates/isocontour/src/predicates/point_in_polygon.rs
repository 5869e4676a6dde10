//! Robust point-in-polygon classification.
//!
//! Crossing-number test over the polygon's edges. Side tests go through
//! [`orient2d`], so a point lying exactly on an edge is reported as
//! [`Containment::Boundary`] rather than landing on either side by
//! round-off. Runs of horizontal edges are collapsed into one span so that
//! a ray passing along them is counted once.
//!
//! ```text
//!   y ▲        ┌───────┐
//!     │   p ───┼──►    │      one crossing   → Inside
//!     │        │  ┌────┘
//!     │   q ───┼──┼──►        two crossings  → Outside
//!     │        └──┘
//!     └──────────────────► x
//! ```
//!
//! Works for either winding order, tolerates repeated (zero-length) edges.

use glam::DVec2;

use super::orient2d;

/// Result of a point-in-polygon query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Containment {
  Outside = -1,
  Boundary = 0,
  Inside = 1,
}

impl Containment {
  /// `-1` outside, `0` on the boundary, `1` inside.
  #[inline]
  pub fn sign(self) -> i8 {
    self as i8
  }

  #[inline]
  pub fn is_inside(self) -> bool {
    self == Containment::Inside
  }
}

/// Classify `point` against the closed polygon through `polygon`'s vertices.
///
/// The closing edge from the last vertex back to the first is implicit. An
/// empty polygon contains nothing.
pub fn point_in_polygon(polygon: &[DVec2], point: DVec2) -> Containment {
  let n = polygon.len();
  if n == 0 {
    return Containment::Outside;
  }

  let (x, y) = (point.x, point.y);
  let mut outside = true;
  let mut lim = n;
  let mut i = 0;
  let mut j = n - 1;

  while i < lim {
    let a = polygon[i];
    let b = polygon[j];
    let yi = a.y;
    let yj = b.y;

    if yj < yi {
      // Edge runs upward from b to a.
      if (yj < y && y < yi) || (y == yi && yi < polygon[(i + 1) % n].y) {
        let s = orient2d(a, b, point);
        if s == 0.0 {
          return Containment::Boundary;
        }
        outside ^= s < 0.0;
      }
    } else if yi < yj {
      // Edge runs downward from b to a.
      if (yi < y && y < yj) || (y == yi && polygon[(i + 1) % n].y < yi) {
        let s = orient2d(a, b, point);
        if s == 0.0 {
          return Containment::Boundary;
        }
        outside ^= s > 0.0;
      }
    } else if y == yi {
      // Horizontal run at the query height: widen it to all of its vertices.
      let mut x0 = a.x.min(b.x);
      let mut x1 = a.x.max(b.x);

      if i == 0 {
        while j > 0 {
          let k = (j + n - 1) % n;
          let p = polygon[k];
          if p.y != y {
            break;
          }
          x0 = x0.min(p.x);
          x1 = x1.max(p.x);
          j = k;
        }
        if j == 0 {
          // Every vertex shares this height.
          return if x0 <= x && x <= x1 {
            Containment::Boundary
          } else {
            Containment::Outside
          };
        }
        lim = j + 1;
      }

      let y0 = polygon[(j + n - 1) % n].y;
      while i + 1 < lim {
        let p = polygon[i + 1];
        if p.y != y {
          break;
        }
        x0 = x0.min(p.x);
        x1 = x1.max(p.x);
        i += 1;
      }

      if x0 <= x && x <= x1 {
        return Containment::Boundary;
      }

      let y1 = polygon[(i + 1) % n].y;
      if x < x0 && ((y0 < y) != (y1 < y)) {
        outside = !outside;
      }
    }

    j = i;
    i += 1;
  }

  if outside {
    Containment::Outside
  } else {
    Containment::Inside
  }
}

#[cfg(test)]
#[path = "point_in_polygon_test.rs"]
mod point_in_polygon_test;

//! Marching-squares topology tables.
//!
//! Corner signs are sampled in Morton order and packed into a 4-bit code.
//! The code is then permuted into marching-squares order, where corners and
//! edges are numbered clockwise from the top-left:
//!
//! ```text
//!   Morton corners        Marching corners        Edges
//!
//!     2 ───── 3             0 ───── 1               0
//!     │       │     =>      │       │           ┌───────┐
//!     │       │             │       │         3 │       │ 1
//!     0 ───── 1             3 ───── 2           └───────┘
//!                                                   2
//! ```
//!
//! Edge `e` joins marching corners `e` and `(e + 1) % 4`. Across a shared
//! edge, edge `e` of one cell meets edge `opposite(e)` of its neighbor.
//!
//! # Edge Pairs
//!
//! Each non-trivial code maps to one or two directed `(entry, exit)` edge
//! pairs. Pairs are oriented so the inside region is always on the right of
//! travel, which makes the exit of one cell the entry of the next and winds
//! every closed loop clockwise around the inside (y-up).
//!
//! ```text
//!   code 1 (corner 0 inside)     code 5, Separated       code 5, Joined
//!
//!     ●───┬───○                    ●───┬───○               ●───┬───○
//!     │  ╱    │                    │  ╱    │               │    ╲  │
//!     ├─╯     │                    ├─╯   ╭─┤               ├─╮   ╰─┤
//!     │       │                    │    ╱  │               │  ╲    │
//!     ○───────○                    ○───┴───●               ○───┴───●
//!   entry 0, exit 3               (0,3) (2,1)             (0,1) (2,3)
//! ```
//!
//! Codes 5 and 10 are saddles: diagonal corners agree, and the contour can
//! either keep the inside corners apart (`Separated`) or join them through
//! the cell center (`Joined`). [`SaddleRule`] decides which.

use crate::field::is_inside;

pub const TOP: usize = 0;
pub const RIGHT: usize = 1;
pub const BOTTOM: usize = 2;
pub const LEFT: usize = 3;

/// Edge on the other side of a shared cell boundary.
#[inline(always)]
pub const fn opposite(edge: usize) -> usize {
  (edge + 2) % 4
}

/// Morton corner index of each marching-squares corner.
pub const MARCHING_TO_MORTON: [u8; 4] = [2, 3, 1, 0];

/// Marching corner endpoints of each edge.
pub const EDGE_CORNERS: [[u8; 2]; 4] = [
  [0, 1], // Edge 0: top
  [1, 2], // Edge 1: right
  [2, 3], // Edge 2: bottom
  [3, 0], // Edge 3: left
];

/// Morton corner code to marching-squares topology code.
pub const MORTON_TO_MARCHING: [u8; 16] = generate_code_remap();

/// Topology code to 4-bit mask of edges with a sign change.
pub const EDGE_CROSSINGS: [u8; 16] = generate_edge_crossings();

const fn generate_code_remap() -> [u8; 16] {
  let mut table = [0u8; 16];
  let mut morton = 0usize;

  while morton < 16 {
    let mut code = 0u8;
    let mut corner = 0;

    while corner < 4 {
      let bit = (morton >> MARCHING_TO_MORTON[corner]) & 1;
      code |= (bit as u8) << corner;
      corner += 1;
    }

    table[morton] = code;
    morton += 1;
  }

  table
}

const fn generate_edge_crossings() -> [u8; 16] {
  let mut table = [0u8; 16];
  let mut code = 0usize;

  while code < 16 {
    let mut mask = 0u8;
    let mut edge = 0;

    while edge < 4 {
      let c0 = EDGE_CORNERS[edge][0] as usize;
      let c1 = EDGE_CORNERS[edge][1] as usize;

      if (code >> c0) & 1 != (code >> c1) & 1 {
        mask |= 1 << edge;
      }

      edge += 1;
    }

    table[code] = mask;
    code += 1;
  }

  table
}

/// Directed pass of the contour through a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgePair {
  pub entry: u8,
  pub exit: u8,
}

const fn pair(entry: u8, exit: u8) -> EdgePair {
  EdgePair { entry, exit }
}

/// Edge pairs per topology code. Saddles (5, 10) hold their `Separated`
/// pairing here, see [`JOINED_SADDLE_PAIRS`].
pub const EDGE_PAIRS: [&[EdgePair]; 16] = [
  &[],
  &[pair(0, 3)],
  &[pair(1, 0)],
  &[pair(1, 3)],
  &[pair(2, 1)],
  &[pair(0, 3), pair(2, 1)],
  &[pair(2, 0)],
  &[pair(2, 3)],
  &[pair(3, 2)],
  &[pair(0, 2)],
  &[pair(1, 0), pair(3, 2)],
  &[pair(1, 2)],
  &[pair(3, 1)],
  &[pair(0, 1)],
  &[pair(3, 0)],
  &[],
];

/// Saddle pairings when the inside corners connect through the center.
pub const JOINED_SADDLE_PAIRS: [&[EdgePair]; 2] = [
  &[pair(0, 1), pair(2, 3)], // code 5
  &[pair(3, 0), pair(1, 2)], // code 10
];

#[inline(always)]
pub const fn is_saddle(code: u8) -> bool {
  code == 5 || code == 10
}

/// True when edge `edge` of a cell with topology `code` has a sign change.
#[inline(always)]
pub const fn crosses(code: u8, edge: usize) -> bool {
  (EDGE_CROSSINGS[code as usize & 0xF] >> edge) & 1 == 1
}

/// Morton corner code from corner values in Morton order.
#[inline]
pub fn corner_code(values: &[f64; 4]) -> u8 {
  values
    .iter()
    .enumerate()
    .fold(0u8, |code, (i, &v)| code | ((is_inside(v) as u8) << i))
}

/// How a saddle cell's two inside corners relate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SaddleConnection {
  /// Inside corners stay apart; the center is outside.
  Separated,
  /// Inside corners connect through the center.
  Joined,
}

/// Rule for disambiguating saddle codes 5 and 10.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SaddleRule {
  /// Sign of the field sampled at the cell center. An inside center joins
  /// the inside corners.
  #[default]
  CenterSample,
  /// Sign of the bilinear interpolant at its saddle point (asymptotic
  /// decider). Uses the corner values only.
  Bilinear,
}

impl SaddleRule {
  /// Decide the connection for a saddle cell.
  ///
  /// `corners` are in Morton order. `CenterSample` falls back to the
  /// bilinear estimate when no center value is available.
  pub fn resolve(self, center_value: Option<f64>, corners: &[f64; 4]) -> SaddleConnection {
    let center_inside = match (self, center_value) {
      (SaddleRule::CenterSample, Some(value)) => is_inside(value),
      _ => is_inside(bilinear_saddle_value(corners)),
    };

    if center_inside {
      SaddleConnection::Joined
    } else {
      SaddleConnection::Separated
    }
  }
}

/// Value of the bilinear interpolant of the corners at its saddle point.
///
/// ```text
///   f01 ── f11
///    │      │      (f00 * f11 - f10 * f01) / (f00 + f11 - f10 - f01)
///   f00 ── f10
/// ```
pub fn bilinear_saddle_value(corners: &[f64; 4]) -> f64 {
  let [f00, f10, f01, f11] = *corners;
  let denom = f00 + f11 - f10 - f01;
  if denom == 0.0 {
    // Degenerate interpolant: fall back to the corner average.
    return (f00 + f10 + f01 + f11) * 0.25;
  }
  (f00 * f11 - f10 * f01) / denom
}

/// Edge pairs for a topology code with the saddle connection applied.
#[inline]
pub fn edge_pairs(code: u8, connection: SaddleConnection) -> &'static [EdgePair] {
  let code = code & 0xF;
  match (code, connection) {
    (5, SaddleConnection::Joined) => JOINED_SADDLE_PAIRS[0],
    (10, SaddleConnection::Joined) => JOINED_SADDLE_PAIRS[1],
    _ => EDGE_PAIRS[code as usize],
  }
}

/// Edges touched by a list of pairs, as a 4-bit mask.
pub fn pair_edge_mask(pairs: &[EdgePair]) -> u8 {
  pairs
    .iter()
    .fold(0u8, |mask, p| mask | (1 << p.entry) | (1 << p.exit))
}

#[cfg(test)]
#[path = "topology_test.rs"]
mod topology_test;

//! Fixed constants shared by the partition, topology and adjacency stages.
//!
//! # Cell Layout
//!
//! ```text
//!   Morton corners (y-up)       Quadrants (children)
//!
//!     2 ───── 3                   ┌─────┬─────┐
//!     │       │                   │  2  │  3  │
//!     │   c   │                   ├─────┼─────┤
//!     │       │                   │  0  │  1  │
//!     0 ───── 1                   └─────┴─────┘
//!
//!   bit 0 = +x, bit 1 = +y for both corners and quadrants
//! ```

/// Edges per cell (top, right, bottom, left).
pub const EDGES_PER_CELL: usize = 4;

/// Sentinel for an absent cell (child, parent, neighbor, boundary index).
pub const NO_CELL: i32 = -1;

/// Sentinel for a missing vertex (no crossing, or the locator gave up).
pub const NO_VERTEX: i32 = -1;

/// Deepest quadtree the lattice coordinates can address (2^20 per axis).
pub const MAX_SUBDIVISION_DEPTH: u32 = 20;

/// Largest uniform grid accepted (4096 x 4096 cells).
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Default cap on quadtree nodes. A field that stays near zero over a wide
/// area refines all of it, so depth alone does not bound the arena.
pub const MAX_QUADTREE_NODES: usize = 1 << 22;

/// A cell may contain a crossing when `|sample(center)| <= radius * SQRT_2`,
/// i.e. the center is within reach of the farthest corner.
pub const CROSSING_REACH: f64 = std::f64::consts::SQRT_2;

/// Lattice offset (in child spans) of each quadrant's minimum corner.
pub const QUADRANT_OFFSETS: [[u32; 2]; 4] = [[0, 0], [1, 0], [0, 1], [1, 1]];

/// Default zero-crossing tolerance.
pub const DEFAULT_EPSILON: f64 = 1e-3;

/// Default root-finding step budget per edge.
pub const DEFAULT_MAX_STEPS: u32 = 64;

/// Default quadtree depth.
pub const DEFAULT_MAX_DEPTH: u32 = 8;

/// Default domain edge length.
pub const DEFAULT_DOMAIN_SIZE: f64 = 1024.0;

/// Finite-difference step for vertex normals.
pub const NORMAL_STEP: f64 = 1e-4;

//! isocontour - Adaptive 2D isocontour extraction
//!
//! This crate turns an implicit scalar field `f(x, y)` into closed polygonal
//! loops tracing its zero level set. The domain is partitioned into square
//! cells (a uniform grid or an adaptive quadtree), each cell is classified by
//! marching squares, crossings are refined along cell edges, and the per-cell
//! segments are stitched into loops through a face adjacency table.
//!
//! # Features
//!
//! - **Adaptive Quadtree**: Subdivides only where the surface can pass,
//!   using the distance bound of the sampled field
//! - **T-junction Adjacency**: Symmetric neighbor links across cells of
//!   different sizes
//! - **Robust Predicates**: Adaptive-precision `orient2d` and exact
//!   point-in-polygon tests for post-processing the loops
//! - **Batch Extraction**: Rayon-backed stage for many fields at once
//!
//! # Example
//!
//! ```ignore
//! use glam::DVec2;
//! use isocontour::{extract, CircleSdf, Domain, ExtractionConfig};
//!
//! let circle = CircleSdf::new(DVec2::splat(512.0), 200.0);
//! let config = ExtractionConfig::adaptive(Domain::new(DVec2::ZERO, 1024.0), 7);
//!
//! let output = extract(&circle, &config)?;
//! for loop_indices in &output.loops {
//!     println!("loop with {} points", loop_indices.len());
//! }
//! ```

pub mod bounds;
pub mod constants;
pub mod error;
pub mod field;
pub mod topology;
pub mod types;

// Re-export commonly used items
pub use bounds::Domain;
pub use constants::{NO_CELL, NO_VERTEX};
pub use error::{ExtractionError, ExtractionResult};
pub use field::{gradient, is_inside, ScalarField};
pub use topology::{EdgePair, SaddleConnection, SaddleRule};
pub use types::{
  Diagnostics, ExtractionConfig, ExtractionOutput, ExtractionStats, PartitionMode, Winding,
};

// Exact geometric predicates
pub mod predicates;
pub use predicates::{orient2d, point_in_polygon, Containment};

// Spatial partitioning (uniform grid and quadtree)
pub mod partition;
pub use partition::{Cell, Partition};

// Face adjacency between boundary cells
pub mod adjacency;
pub use adjacency::AdjacencyTable;

// Edge crossing refinement
pub mod crossing;
pub use crossing::{CrossingMethod, Crossings};

// Loop assembly
pub mod assemble;

// Full pipeline
pub mod extract;
pub use extract::{extract, resolve_pairs};

// Task queue for parallel extraction
pub mod task_queue;
pub use task_queue::{ExtractionCompletion, ExtractionRequest, ExtractionStage, SharedField};

// Metrics collection (feature-gated)
pub mod metrics;

// Reference fields for tests, benches and demos
pub mod sdf_samplers;
pub use sdf_samplers::{BoxSdf, CircleSdf, DemoScene, PolygonSdf};

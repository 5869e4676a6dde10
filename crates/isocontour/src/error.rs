//! Configuration errors reported by [`extract`](crate::extract).
//!
//! Only invalid input is an error. Crossing-locator convergence failures are
//! data (missing vertices, counted in the statistics) and a locator called
//! on a same-sign edge is an internal bug that panics.

use glam::DVec2;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
  #[error("Invalid domain: min {min:?}, size {size} (need finite min and positive finite size)")]
  InvalidDomain { min: DVec2, size: f64 },

  #[error("Cell diameter {diameter} is not a positive power of two")]
  InvalidCellDiameter { diameter: f64 },

  #[error("Cell diameter {diameter} does not evenly divide domain size {size}")]
  GridMismatch { diameter: f64, size: f64 },

  #[error("Uniform grid of {width}x{width} cells exceeds the limit of {limit} cells")]
  GridTooLarge { width: u64, limit: usize },

  #[error("Subdivision depth {depth} exceeds the maximum of {max}")]
  DepthTooLarge { depth: u32, max: u32 },

  #[error("Quadtree needs more than {limit} nodes")]
  NodeBudgetExceeded { limit: usize },

  #[error("Epsilon must be finite and non-negative, got {epsilon}")]
  InvalidEpsilon { epsilon: f64 },
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;

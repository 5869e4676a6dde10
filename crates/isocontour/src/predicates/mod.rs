//! Exact-sign geometric predicates.
//!
//! - [`orient2d`]: orientation of three points, robust near collinearity
//! - [`point_in_polygon`]: inside / boundary / outside classification

pub mod expansion;
pub mod orient2d;
pub mod point_in_polygon;

pub use orient2d::{orient2d, orient2d_fast};
pub use point_in_polygon::{point_in_polygon, Containment};

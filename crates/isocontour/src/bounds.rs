//! Square extraction domain with double precision.

use glam::DVec2;

use crate::constants::DEFAULT_DOMAIN_SIZE;

/// Axis-aligned square region covered by the partition.
///
/// Square so that quadtree children stay square at every depth and the
/// uniform grid has the same cell count per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
	/// Minimum corner (inclusive).
	pub min: DVec2,
	/// Edge length.
	pub size: f64,
}

impl Domain {
	pub fn new(min: DVec2, size: f64) -> Self {
		Self { min, size }
	}

	/// Create a domain from its center and half edge length.
	pub fn from_center_half_extent(center: DVec2, half_extent: f64) -> Self {
		Self {
			min: center - DVec2::splat(half_extent),
			size: half_extent * 2.0,
		}
	}

	/// Maximum corner (inclusive).
	#[inline]
	pub fn max(&self) -> DVec2 {
		self.min + DVec2::splat(self.size)
	}

	#[inline]
	pub fn center(&self) -> DVec2 {
		self.min + DVec2::splat(self.size * 0.5)
	}

	/// Half the edge length.
	#[inline]
	pub fn radius(&self) -> f64 {
		self.size * 0.5
	}

	/// True for a finite minimum corner and a finite, positive size.
	#[inline]
	pub fn is_valid(&self) -> bool {
		self.min.is_finite() && self.size.is_finite() && self.size > 0.0
	}

	/// Check if the domain contains a point (boundary inclusive).
	#[inline]
	pub fn contains_point(&self, point: DVec2) -> bool {
		let max = self.max();
		point.x >= self.min.x && point.x <= max.x && point.y >= self.min.y && point.y <= max.y
	}
}

impl Default for Domain {
	fn default() -> Self {
		Self::new(DVec2::ZERO, DEFAULT_DOMAIN_SIZE)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_from_center_half_extent() {
		let domain = Domain::from_center_half_extent(DVec2::ZERO, 16.0);
		assert_eq!(domain.min, DVec2::splat(-16.0));
		assert_eq!(domain.max(), DVec2::splat(16.0));
		assert_eq!(domain.center(), DVec2::ZERO);
		assert_eq!(domain.radius(), 16.0);
	}

	#[test]
	fn test_contains_point_boundary_inclusive() {
		let domain = Domain::new(DVec2::ZERO, 10.0);
		assert!(domain.contains_point(DVec2::new(5.0, 5.0)));
		assert!(domain.contains_point(DVec2::ZERO));
		assert!(domain.contains_point(DVec2::splat(10.0)));
		assert!(!domain.contains_point(DVec2::new(10.5, 5.0)));
		assert!(!domain.contains_point(DVec2::new(5.0, -0.1)));
	}

	#[test]
	fn test_validity() {
		assert!(Domain::default().is_valid());
		assert!(!Domain::new(DVec2::ZERO, 0.0).is_valid());
		assert!(!Domain::new(DVec2::ZERO, -1.0).is_valid());
		assert!(!Domain::new(DVec2::new(f64::NAN, 0.0), 1.0).is_valid());
		assert!(!Domain::new(DVec2::ZERO, f64::INFINITY).is_valid());
	}
}

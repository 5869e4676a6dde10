//! Uniform grid partition.

use glam::UVec2;

use super::{Cell, Layout, Lattice, Partition};
use crate::bounds::Domain;
use crate::constants::MAX_GRID_CELLS;
use crate::error::{ExtractionError, ExtractionResult};
use crate::field::ScalarField;

/// Cells per axis for `cell_diameter` over `domain`.
///
/// The diameter must be a power of two (2^k for any integer k, so 0.5 is
/// accepted) that divides the domain size exactly.
pub fn grid_width(domain: &Domain, cell_diameter: f64) -> ExtractionResult<u32> {
  if !is_power_of_two(cell_diameter) {
    return Err(ExtractionError::InvalidCellDiameter {
      diameter: cell_diameter,
    });
  }

  let ratio = domain.size / cell_diameter;
  if !(ratio >= 1.0) || ratio.fract() != 0.0 {
    return Err(ExtractionError::GridMismatch {
      diameter: cell_diameter,
      size: domain.size,
    });
  }

  if ratio * ratio > MAX_GRID_CELLS as f64 {
    return Err(ExtractionError::GridTooLarge {
      width: ratio as u64,
      limit: MAX_GRID_CELLS,
    });
  }

  Ok(ratio as u32)
}

#[inline]
fn is_power_of_two(value: f64) -> bool {
  const MANTISSA: u64 = (1 << 52) - 1;
  value.is_normal() && value > 0.0 && value.to_bits() & MANTISSA == 0
}

/// Build a `width x width` grid, row 0 at the bottom of the domain.
pub fn build<F: ScalarField + ?Sized>(
  field: &F,
  domain: &Domain,
  cell_diameter: f64,
) -> ExtractionResult<Partition> {
  let width = grid_width(domain, cell_diameter)?;
  let lattice = Lattice {
    origin: domain.min,
    unit: cell_diameter,
  };

  // Sample each lattice point once, neighbors share their corners.
  let stride = width as usize + 1;
  let mut samples = Vec::with_capacity(stride * stride);
  for y in 0..=width {
    for x in 0..=width {
      samples.push(field.sample_at(lattice.point(UVec2::new(x, y))));
    }
  }

  let radius = cell_diameter * 0.5;
  let mut cells = Vec::with_capacity(width as usize * width as usize);
  for row in 0..width {
    for col in 0..width {
      let min = UVec2::new(col, row);
      let mut cell = Cell::new(lattice.cell_center(min, 1), radius, min, 1, 0);
      cell.grid_index = (row * width + col) as i32;

      let at = |dx: u32, dy: u32| samples[(row + dy) as usize * stride + (col + dx) as usize];
      cell.classify([at(0, 0), at(1, 0), at(0, 1), at(1, 1)]);

      // Only saddle resolution reads the center, and only crossed cells
      // can be saddles.
      if cell.contains_contour {
        cell.center_value = Some(field.sample_at(cell.center));
      }

      cells.push(cell);
    }
  }

  let mut partition = Partition {
    cells,
    boundary_cells: Vec::new(),
    lattice,
    layout: Layout::Uniform { grid_width: width },
  };
  partition.assign_boundary_indices();

  #[cfg(feature = "tracing")]
  tracing::debug!(
    width,
    boundary_cells = partition.boundary_count(),
    "uniform grid built"
  );

  Ok(partition)
}

#[cfg(test)]
#[path = "uniform_test.rs"]
mod uniform_test;

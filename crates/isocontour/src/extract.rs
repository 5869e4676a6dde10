//! Extraction pipeline.
//!
//! ```text
//!   validate -> partition -> adjacency -> edge pairs -> crossings -> assemble
//! ```
//!
//! Every structure is built fresh for the call and dropped at the end, so
//! identical inputs give bit-identical output.

use crate::adjacency::AdjacencyTable;
use crate::assemble::assemble;
use crate::crossing::Crossings;
use crate::error::ExtractionResult;
use crate::field::{gradient, ScalarField};
use crate::partition::Partition;
use crate::topology::{edge_pairs, is_saddle, EdgePair, SaddleConnection, SaddleRule};
use crate::types::{Diagnostics, ExtractionConfig, ExtractionOutput, ExtractionStats};

/// Extract the zero contour of `field`.
///
/// Returns an error only for an invalid `config`. Crossings the locator
/// could not pin down show up as missing vertices and are counted in
/// [`ExtractionStats::convergence_failures`].
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "extract"))]
pub fn extract<F: ScalarField + ?Sized>(
  field: &F,
  config: &ExtractionConfig,
) -> ExtractionResult<ExtractionOutput> {
  config.validate()?;

  let partition = {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("partition").entered();
    Partition::build_with_budget(field, &config.domain, config.mode, config.node_budget)?
  };

  let adjacency = {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("adjacency").entered();
    AdjacencyTable::build(&partition)
  };

  let pairs = {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("classify").entered();
    resolve_pairs(&partition, config.saddle_rule)
  };

  let crossings = {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("locate_crossings").entered();
    Crossings::locate_all(field, &partition, &adjacency, config)
  };

  #[cfg(feature = "tracing")]
  if crossings.failures > 0 {
    tracing::warn!(
      failures = crossings.failures,
      epsilon = config.epsilon,
      max_steps = config.max_steps,
      "crossing locator ran out of steps"
    );
  }

  let loops = {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("assemble").entered();
    assemble(&adjacency, &crossings.cell_vertices, &pairs)
  };

  let normals = if config.compute_normals {
    crossings.vertices.iter().map(|&p| gradient(field, p)).collect()
  } else {
    Vec::new()
  };

  let diagnostics = config
    .collect_diagnostics
    .then(|| collect_diagnostics(&partition, &adjacency, &crossings));

  let mut output = ExtractionOutput {
    vertices: crossings.vertices,
    loops,
    normals,
    stats: ExtractionStats::default(),
    diagnostics,
  };

  let closed_loop_count = (0..output.loops.len())
    .filter(|&i| output.is_closed_loop(i))
    .count();

  output.stats = ExtractionStats {
    cell_count: partition.cells.len(),
    leaf_count: partition.leaf_count(),
    boundary_cell_count: partition.boundary_count(),
    saddle_cell_count: partition
      .boundary_cells
      .iter()
      .filter(|&&i| is_saddle(partition.cells[i].topology_code))
      .count(),
    vertex_count: output.vertices.len(),
    loop_count: output.loops.len(),
    closed_loop_count,
    open_loop_count: output.loops.len() - closed_loop_count,
    convergence_failures: crossings.failures,
    max_leaf_depth: partition.max_leaf_depth(),
  };

  #[cfg(feature = "tracing")]
  tracing::debug!(
    cells = output.stats.cell_count,
    boundary_cells = output.stats.boundary_cell_count,
    vertices = output.stats.vertex_count,
    loops = output.stats.loop_count,
    open_loops = output.stats.open_loop_count,
    "extraction complete"
  );

  Ok(output)
}

/// Edge pairs of every boundary cell, saddles resolved by `rule`.
pub fn resolve_pairs(partition: &Partition, rule: SaddleRule) -> Vec<&'static [EdgePair]> {
  partition
    .boundary_cells
    .iter()
    .map(|&index| {
      let cell = &partition.cells[index];
      let connection = if is_saddle(cell.topology_code) {
        rule.resolve(cell.center_value, &cell.corner_values)
      } else {
        SaddleConnection::Separated
      };
      edge_pairs(cell.topology_code, connection)
    })
    .collect()
}

fn collect_diagnostics(
  partition: &Partition,
  adjacency: &AdjacencyTable,
  crossings: &Crossings,
) -> Diagnostics {
  let cells = move || partition.boundary_cells.iter().map(move |&i| &partition.cells[i]);

  Diagnostics {
    corner_codes: cells().map(|c| c.corner_code).collect(),
    topology_codes: cells().map(|c| c.topology_code).collect(),
    centers: cells().map(|c| c.center).collect(),
    radii: cells().map(|c| c.radius).collect(),
    depths: cells().map(|c| c.depth).collect(),
    adjacency: adjacency.as_slice().to_vec(),
    cell_vertices: crossings.cell_vertices.clone(),
  }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod extract_test;

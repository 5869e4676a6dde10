use glam::DVec2;

use super::*;
use crate::bounds::Domain;
use crate::constants::{NO_CELL, NO_VERTEX};
use crate::crossing::CrossingMethod;
use crate::error::ExtractionError;
use crate::predicates::Containment;
use crate::sdf_samplers::{CircleSdf, DemoScene};
use crate::topology::{opposite, EDGE_PAIRS, JOINED_SADDLE_PAIRS};
use crate::types::{PartitionMode, Winding};

fn circle() -> CircleSdf {
  CircleSdf::new(DVec2::ZERO, 10.0)
}

fn domain16() -> Domain {
  Domain::from_center_half_extent(DVec2::ZERO, 16.0)
}

fn assert_single_circle_loop(output: &ExtractionOutput, epsilon: f64) {
  let field = circle();

  assert_eq!(output.loops.len(), 1, "Expected exactly one loop");
  assert!(output.is_closed_loop(0), "Loop should be closed: {:?}", output.loops[0]);
  assert_eq!(output.stats.convergence_failures, 0);

  for &index in &output.loops[0] {
    let v = output.vertices[index as usize];
    assert!(
      field.sample_at(v).abs() <= epsilon,
      "Vertex {:?} is {} from the contour",
      v,
      field.sample_at(v)
    );
  }

  let area = output.signed_area(0);
  let expected = -std::f64::consts::PI * 100.0;
  assert!((area - expected).abs() < 2.0, "Area {} expected ~{}", area, expected);
  assert_eq!(output.winding(0), Winding::Clockwise);
}

#[test]
fn test_uniform_circle_single_loop() {
  let config = ExtractionConfig::uniform(domain16(), 1.0).with_epsilon(1e-3);
  let output = extract(&circle(), &config).unwrap();

  assert_single_circle_loop(&output, 1e-3);
  assert_eq!(output.stats.cell_count, 32 * 32);
  assert_eq!(output.stats.leaf_count, 32 * 32);
  assert_eq!(output.stats.max_leaf_depth, 0);
}

#[test]
fn test_adaptive_circle_single_loop() {
  let config = ExtractionConfig::adaptive(domain16(), 5).with_epsilon(1e-3);
  let output = extract(&circle(), &config).unwrap();

  assert_single_circle_loop(&output, 1e-3);
  assert_eq!(output.stats.max_leaf_depth, 5);
  assert!(output.stats.cell_count < 32 * 32, "Quadtree should not refine everywhere");
}

#[test]
fn test_false_position_circle() {
  let config = ExtractionConfig::uniform(domain16(), 1.0)
    .with_epsilon(1e-9)
    .with_crossing_method(CrossingMethod::FalsePosition);
  let output = extract(&circle(), &config).unwrap();
  assert_single_circle_loop(&output, 1e-9);
}

#[test]
fn test_vertex_count_matches_loop() {
  let config = ExtractionConfig::uniform(domain16(), 1.0);
  let output = extract(&circle(), &config).unwrap();

  // Every vertex appears once, plus the closing repeat.
  assert_eq!(output.loops[0].len(), output.vertices.len() + 1);
  assert_eq!(output.stats.vertex_count, output.vertices.len());
  assert_eq!(output.stats.closed_loop_count, 1);
  assert_eq!(output.stats.open_loop_count, 0);
}

#[test]
fn test_adjacency_symmetry() {
  for config in [
    ExtractionConfig::uniform(domain16(), 1.0),
    ExtractionConfig::adaptive(domain16(), 6),
  ] {
    let output = extract(&circle(), &config.with_diagnostics(true)).unwrap();
    let diagnostics = output.diagnostics.unwrap();
    let adjacency = &diagnostics.adjacency;

    for c in 0..adjacency.len() / 4 {
      for e in 0..4 {
        let d = adjacency[c * 4 + e];
        if d >= 0 {
          assert_eq!(
            adjacency[d as usize * 4 + opposite(e)],
            c as i32,
            "Adjacency {} --{}--> {} is not mirrored",
            c,
            e,
            d
          );
        }
      }
    }
  }
}

#[test]
fn test_idempotent() {
  let field = DemoScene::new();
  let config = ExtractionConfig::default().with_normals(true);

  let a = extract(&field, &config).unwrap();
  let b = extract(&field, &config).unwrap();

  assert_eq!(a.vertices.len(), b.vertices.len());
  for (va, vb) in a.vertices.iter().zip(&b.vertices) {
    assert_eq!(va.x.to_bits(), vb.x.to_bits());
    assert_eq!(va.y.to_bits(), vb.y.to_bits());
  }
  assert_eq!(a.loops, b.loops);
  assert_eq!(a.stats, b.stats);
}

/// One 2x2 cell with a checkerboard of corner signs. Inside corners are
/// bottom-right and top-left, so the topology code is 5.
fn checkerboard(center_offset: f64) -> impl Fn(f64, f64) -> f64 {
  move |x: f64, y: f64| (x - 1.0) * (y - 1.0) + center_offset
}

fn single_cell(rule: SaddleRule) -> ExtractionConfig {
  ExtractionConfig::uniform(Domain::new(DVec2::ZERO, 2.0), 2.0)
    .with_epsilon(1e-9)
    .with_saddle_rule(rule)
    .with_diagnostics(true)
}

#[test]
fn test_saddle_center_outside_separates() {
  let output = extract(&checkerboard(0.5), &single_cell(SaddleRule::CenterSample)).unwrap();
  let diagnostics = output.diagnostics.as_ref().unwrap();

  assert_eq!(diagnostics.topology_codes, vec![5]);
  assert_eq!(output.stats.saddle_cell_count, 1);
  assert_eq!(EDGE_PAIRS[5].len(), 2);

  // (top -> left) then (bottom -> right): each inside corner gets its own cut.
  assert_eq!(output.loops.len(), 2);
  let [top, left] = [output.loops[0][0], output.loops[0][1]].map(|i| output.vertices[i as usize]);
  let [bottom, right] = [output.loops[1][0], output.loops[1][1]].map(|i| output.vertices[i as usize]);
  assert_eq!(top.y, 2.0);
  assert_eq!(left.x, 0.0);
  assert_eq!(bottom.y, 0.0);
  assert_eq!(right.x, 2.0);
}

#[test]
fn test_saddle_center_inside_joins() {
  let output = extract(&checkerboard(-0.5), &single_cell(SaddleRule::CenterSample)).unwrap();
  assert_eq!(output.diagnostics.as_ref().unwrap().topology_codes, vec![5]);

  // Joined code 5: (top -> right) then (bottom -> left).
  assert_eq!(JOINED_SADDLE_PAIRS[0][0], EdgePair { entry: 0, exit: 1 });
  assert_eq!(output.loops.len(), 2);
  let [top, right] = [output.loops[0][0], output.loops[0][1]].map(|i| output.vertices[i as usize]);
  let [bottom, left] = [output.loops[1][0], output.loops[1][1]].map(|i| output.vertices[i as usize]);
  assert_eq!(top.y, 2.0);
  assert_eq!(right.x, 2.0);
  assert_eq!(bottom.y, 0.0);
  assert_eq!(left.x, 0.0);
}

#[test]
fn test_saddle_rules_disagree_on_center_bump() {
  // Corner values say separated, a narrow dip at the center says joined.
  let field = |x: f64, y: f64| {
    let r2 = (x - 1.0).powi(2) + (y - 1.0).powi(2);
    (x - 1.0) * (y - 1.0) + 0.5 - (-r2 * 50.0).exp()
  };

  let center = extract(&field, &single_cell(SaddleRule::CenterSample)).unwrap();
  let bilinear = extract(&field, &single_cell(SaddleRule::Bilinear)).unwrap();

  let first_exit = |output: &ExtractionOutput| output.vertices[output.loops[0][1] as usize];
  // CenterSample joins: top -> right.
  assert_eq!(first_exit(&center).x, 2.0);
  // Bilinear separates: top -> left.
  assert_eq!(first_exit(&bilinear).x, 0.0);
}

#[test]
fn test_resolve_pairs_follows_rule() {
  let field = checkerboard(-0.5);
  let partition =
    Partition::build(&field, &Domain::new(DVec2::ZERO, 2.0), PartitionMode::Uniform { cell_diameter: 2.0 })
      .unwrap();

  let joined = resolve_pairs(&partition, SaddleRule::CenterSample);
  assert_eq!(joined, vec![JOINED_SADDLE_PAIRS[0]]);
}

#[test]
fn test_no_contour() {
  let positive = |_x: f64, _y: f64| 1.0;
  let negative = |_x: f64, _y: f64| -1.0;

  for config in [
    ExtractionConfig::uniform(domain16(), 2.0),
    ExtractionConfig::adaptive(domain16(), 4),
  ] {
    for output in [extract(&positive, &config).unwrap(), extract(&negative, &config).unwrap()] {
      assert_eq!(output.stats.boundary_cell_count, 0);
      assert!(output.loops.is_empty());
      assert!(output.vertices.is_empty());
      assert!(output.is_empty());
    }
  }
}

#[test]
fn test_invalid_config_is_rejected() {
  let config = ExtractionConfig::uniform(domain16(), 3.0);
  assert!(matches!(
    extract(&circle(), &config),
    Err(ExtractionError::InvalidCellDiameter { .. })
  ));

  let config = ExtractionConfig::default().with_epsilon(-1.0);
  assert!(matches!(
    extract(&circle(), &config),
    Err(ExtractionError::InvalidEpsilon { .. })
  ));

  let config = ExtractionConfig::adaptive(domain16(), 8).with_node_budget(64);
  assert_eq!(
    extract(&circle(), &config),
    Err(ExtractionError::NodeBudgetExceeded { limit: 64 })
  );
}

#[test]
fn test_convergence_failure_opens_loop() {
  let config = ExtractionConfig::uniform(domain16(), 1.0)
    .with_epsilon(1e-15)
    .with_max_steps(3);
  let output = extract(&circle(), &config).unwrap();

  assert!(output.stats.convergence_failures > 0);
  assert!(output.stats.open_loop_count > 0);
  assert!(output.loops.iter().any(|l| l.contains(&NO_VERTEX)));
  assert_eq!(output.stats.loop_count, output.stats.closed_loop_count + output.stats.open_loop_count);
}

#[test]
fn test_contour_leaving_domain_is_open() {
  // Circle centered on the domain corner: only a quarter arc is inside.
  let field = CircleSdf::new(DVec2::splat(-16.0), 10.0);
  let output = extract(&field, &ExtractionConfig::uniform(domain16(), 1.0)).unwrap();

  assert!(!output.loops.is_empty());
  assert_eq!(output.stats.closed_loop_count, 0);
  assert_eq!(output.stats.open_loop_count, output.loops.len());
  assert!(output.loops.iter().all(|l| !l.contains(&NO_VERTEX)));

  // Chains started mid-arc stop where an earlier chain began, so the pieces
  // share endpoints and together hold one segment per boundary cell.
  let segments: usize = output.loops.iter().map(|l| l.len() - 1).sum();
  assert_eq!(segments, output.stats.boundary_cell_count);
  assert_eq!(segments, output.vertices.len() - 1);
}

#[test]
fn test_normals_point_outward() {
  let config = ExtractionConfig::uniform(domain16(), 1.0).with_normals(true);
  let output = extract(&circle(), &config).unwrap();

  assert_eq!(output.normals.len(), output.vertices.len());
  for (v, n) in output.vertices.iter().zip(&output.normals) {
    assert!((n.length() - 1.0).abs() < 1e-9);
    assert!(n.dot(v.normalize()) > 0.999, "Normal {:?} at {:?}", n, v);
  }

  let without = extract(&circle(), &ExtractionConfig::uniform(domain16(), 1.0)).unwrap();
  assert!(without.normals.is_empty());
  assert!(without.diagnostics.is_none());
}

#[test]
fn test_diagnostics_shapes() {
  let config = ExtractionConfig::adaptive(domain16(), 5).with_diagnostics(true);
  let output = extract(&circle(), &config).unwrap();
  let diagnostics = output.diagnostics.as_ref().unwrap();
  let count = output.stats.boundary_cell_count;

  assert_eq!(diagnostics.corner_codes.len(), count);
  assert_eq!(diagnostics.topology_codes.len(), count);
  assert_eq!(diagnostics.centers.len(), count);
  assert_eq!(diagnostics.radii.len(), count);
  assert_eq!(diagnostics.depths.len(), count);
  assert_eq!(diagnostics.adjacency.len(), count * 4);
  assert_eq!(diagnostics.cell_vertices.len(), count * 4);

  assert!(diagnostics.corner_codes.iter().all(|&c| c != 0 && c != 0b1111));
  assert!(diagnostics.depths.iter().all(|&d| d == 5));
  assert!(diagnostics.adjacency.iter().all(|&a| a == NO_CELL || (a as usize) < count));
}

#[test]
fn test_demo_scene() {
  let output = extract(&DemoScene::new(), &ExtractionConfig::default()).unwrap();

  // Merged central blob, and two separate small circles.
  assert_eq!(output.stats.loop_count, 3);
  assert_eq!(output.stats.closed_loop_count, 3);
  assert_eq!(output.stats.convergence_failures, 0);
  for i in 0..output.loops.len() {
    assert!(output.signed_area(i) < 0.0, "Loop {} should wind clockwise", i);
  }

  assert_eq!(output.classify_point(DVec2::new(528.0, 512.0)), Containment::Inside);
  assert_eq!(output.classify_point(DVec2::new(256.0, 768.0)), Containment::Inside);
  assert_eq!(output.classify_point(DVec2::new(720.0, 512.0)), Containment::Outside, "Bite");
  assert_eq!(output.classify_point(DVec2::new(100.0, 1000.0)), Containment::Outside);
}

#[test]
fn test_closure_field() {
  let field = |x: f64, y: f64| (x * x + y * y).sqrt() - 10.0;
  let config = ExtractionConfig::uniform(domain16(), 1.0);
  let output = extract(&field, &config).unwrap();
  assert_single_circle_loop(&output, 1e-3);
}

#[test]
fn test_dyn_field() {
  let field: Box<dyn ScalarField> = Box::new(circle());
  let config = ExtractionConfig::uniform(domain16(), 1.0);
  let output = extract(field.as_ref(), &config).unwrap();
  assert_single_circle_loop(&output, 1e-3);
}

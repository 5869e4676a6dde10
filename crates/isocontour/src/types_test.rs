use super::*;

// Config tests
#[test]
fn test_config_defaults() {
  let config = ExtractionConfig::default();
  assert_eq!(config.domain, Domain::new(DVec2::ZERO, 1024.0));
  assert_eq!(config.mode, PartitionMode::Adaptive { max_depth: 8 });
  assert_eq!(config.epsilon, 1e-3);
  assert_eq!(config.max_steps, 64);
  assert_eq!(config.node_budget, 1 << 22);
  assert_eq!(config.saddle_rule, SaddleRule::CenterSample);
  assert_eq!(config.crossing_method, CrossingMethod::Bisection);
  assert!(!config.compute_normals);
  assert!(!config.collect_diagnostics);
  assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_config_builders() {
  let domain = Domain::from_center_half_extent(DVec2::ZERO, 16.0);
  let config = ExtractionConfig::uniform(domain, 2.0)
    .with_epsilon(1e-6)
    .with_max_steps(10)
    .with_saddle_rule(SaddleRule::Bilinear)
    .with_crossing_method(CrossingMethod::FalsePosition)
    .with_normals(true)
    .with_diagnostics(true);

  assert_eq!(config.domain, domain);
  assert_eq!(config.mode, PartitionMode::Uniform { cell_diameter: 2.0 });
  assert_eq!(config.epsilon, 1e-6);
  assert_eq!(config.max_steps, 10);
  assert_eq!(config.saddle_rule, SaddleRule::Bilinear);
  assert_eq!(config.crossing_method, CrossingMethod::FalsePosition);
  assert!(config.compute_normals);
  assert!(config.collect_diagnostics);

  let adaptive = ExtractionConfig::adaptive(domain, 5);
  assert_eq!(adaptive.mode, PartitionMode::Adaptive { max_depth: 5 });
}

#[test]
fn test_validate_domain() {
  let config = ExtractionConfig::new().with_domain(Domain::new(DVec2::ZERO, 0.0));
  assert!(matches!(config.validate(), Err(ExtractionError::InvalidDomain { .. })));

  let config = ExtractionConfig::new().with_domain(Domain::new(DVec2::splat(f64::NAN), 4.0));
  assert!(matches!(config.validate(), Err(ExtractionError::InvalidDomain { .. })));
}

#[test]
fn test_validate_uniform() {
  let domain = Domain::new(DVec2::ZERO, 96.0);
  assert!(matches!(
    ExtractionConfig::uniform(domain, 3.0).validate(),
    Err(ExtractionError::InvalidCellDiameter { .. })
  ));
  assert!(matches!(
    ExtractionConfig::uniform(domain, 64.0).validate(),
    Err(ExtractionError::GridMismatch { .. })
  ));
  assert_eq!(ExtractionConfig::uniform(domain, 32.0).validate(), Ok(()));
}

#[test]
fn test_validate_depth() {
  let domain = Domain::default();
  assert_eq!(ExtractionConfig::adaptive(domain, 20).validate(), Ok(()));
  assert_eq!(
    ExtractionConfig::adaptive(domain, 21).validate(),
    Err(ExtractionError::DepthTooLarge { depth: 21, max: 20 })
  );
}

#[test]
fn test_validate_epsilon() {
  for epsilon in [-1e-3, f64::NAN, f64::INFINITY] {
    assert!(
      matches!(
        ExtractionConfig::new().with_epsilon(epsilon).validate(),
        Err(ExtractionError::InvalidEpsilon { .. })
      ),
      "Epsilon {} should be rejected",
      epsilon
    );
  }
  assert_eq!(ExtractionConfig::new().with_epsilon(0.0).validate(), Ok(()));
}

// Output helper tests

/// Clockwise unit square plus a clockwise inner square, and one open chain.
fn squares() -> ExtractionOutput {
  let vertices = vec![
    DVec2::new(0.0, 0.0),
    DVec2::new(0.0, 4.0),
    DVec2::new(4.0, 4.0),
    DVec2::new(4.0, 0.0),
    DVec2::new(1.0, 1.0),
    DVec2::new(1.0, 3.0),
    DVec2::new(3.0, 3.0),
    DVec2::new(3.0, 1.0),
    DVec2::new(10.0, 10.0),
    DVec2::new(12.0, 10.0),
  ];
  ExtractionOutput {
    vertices,
    loops: vec![vec![0, 1, 2, 3, 0], vec![4, 5, 6, 7, 4], vec![8, NO_VERTEX, 9]],
    ..Default::default()
  }
}

#[test]
fn test_is_closed_loop() {
  let output = squares();
  assert!(output.is_closed_loop(0));
  assert!(output.is_closed_loop(1));
  assert!(!output.is_closed_loop(2));
  assert!(!output.is_closed_loop(3), "Out of range");

  let broken = ExtractionOutput {
    vertices: output.vertices.clone(),
    loops: vec![vec![0, NO_VERTEX, 2, 0], vec![0]],
    ..Default::default()
  };
  assert!(!broken.is_closed_loop(0), "Missing vertex breaks the loop");
  assert!(!broken.is_closed_loop(1), "Single index is not a loop");
}

#[test]
fn test_loop_points() {
  let output = squares();
  let points = output.loop_points(0);
  assert_eq!(points.len(), 4, "Closing repeat is dropped");
  assert_eq!(points[0], DVec2::ZERO);
  assert_eq!(points[3], DVec2::new(4.0, 0.0));

  let open = output.loop_points(2);
  assert_eq!(open, vec![DVec2::new(10.0, 10.0), DVec2::new(12.0, 10.0)]);
  assert!(output.loop_points(9).is_empty());
}

#[test]
fn test_signed_area_and_winding() {
  let output = squares();
  assert_eq!(output.signed_area(0), -16.0);
  assert_eq!(output.signed_area(1), -4.0);
  assert_eq!(output.signed_area(2), 0.0, "Fewer than three points");

  assert_eq!(output.winding(0), Winding::Clockwise);
  assert_eq!(output.winding(2), Winding::Degenerate);

  let mut reversed = output.clone();
  reversed.loops[0].reverse();
  assert_eq!(reversed.signed_area(0), 16.0);
  assert_eq!(reversed.winding(0), Winding::CounterClockwise);
}

#[test]
fn test_winding_collinear_is_degenerate() {
  let output = ExtractionOutput {
    vertices: vec![DVec2::ZERO, DVec2::new(1.0, 0.0), DVec2::new(2.0, 0.0)],
    loops: vec![vec![0, 1, 2, 0]],
    ..Default::default()
  };
  assert_eq!(output.winding(0), Winding::Degenerate);
}

#[test]
fn test_classify_point_even_odd() {
  let output = squares();
  assert_eq!(output.classify_point(DVec2::new(0.5, 0.5)), Containment::Inside);
  assert_eq!(output.classify_point(DVec2::new(2.0, 2.0)), Containment::Outside, "Inside the hole");
  assert_eq!(output.classify_point(DVec2::new(5.0, 5.0)), Containment::Outside);
  assert_eq!(output.classify_point(DVec2::new(0.0, 2.0)), Containment::Boundary);
  assert_eq!(output.classify_point(DVec2::new(1.0, 2.0)), Containment::Boundary);
  // The open chain is ignored.
  assert_eq!(output.classify_point(DVec2::new(11.0, 10.0)), Containment::Outside);
}

#[test]
fn test_empty_output() {
  let output = ExtractionOutput::default();
  assert!(output.is_empty());
  assert_eq!(output.classify_point(DVec2::ZERO), Containment::Outside);
}

//! Benchmark the adaptive predicates against the plain floating point
//! determinant, on random and nearly collinear inputs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::DVec2;
use isocontour::predicates::{orient2d, orient2d_fast, point_in_polygon};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_points(count: usize) -> Vec<DVec2> {
  let mut rng = StdRng::seed_from_u64(7);
  (0..count)
    .map(|_| DVec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
    .collect()
}

/// Points jittered by a few ulps around the line y = x, forcing the exact
/// fallback.
fn nearly_collinear(count: usize) -> Vec<DVec2> {
  (0..count)
    .map(|i| {
      let t = 0.5 + i as f64 * f64::EPSILON;
      DVec2::new(t, t + (i % 3) as f64 * f64::EPSILON)
    })
    .collect()
}

fn bench_orient2d(c: &mut Criterion) {
  let random = random_points(1024);
  let degenerate = nearly_collinear(1024);
  let (a, b) = (DVec2::new(12.0, 12.0), DVec2::new(24.0, 24.0));

  c.bench_function("orient2d_fast (random)", |bench| {
    bench.iter(|| random.iter().map(|&p| orient2d_fast(a, b, black_box(p))).sum::<f64>())
  });

  c.bench_function("orient2d (random)", |bench| {
    bench.iter(|| random.iter().map(|&p| orient2d(a, b, black_box(p))).sum::<f64>())
  });

  c.bench_function("orient2d (nearly collinear)", |bench| {
    bench.iter(|| degenerate.iter().map(|&p| orient2d(a, b, black_box(p))).sum::<f64>())
  });
}

fn bench_point_in_polygon(c: &mut Criterion) {
  let polygon: Vec<DVec2> = (0..256)
    .map(|i| {
      let angle = i as f64 / 256.0 * std::f64::consts::TAU;
      DVec2::new(angle.cos(), angle.sin())
    })
    .collect();
  let queries = random_points(256);

  c.bench_function("point_in_polygon (256-gon)", |bench| {
    bench.iter(|| {
      queries
        .iter()
        .map(|&p| point_in_polygon(black_box(&polygon), p))
        .count()
    })
  });
}

criterion_group!(benches, bench_orient2d, bench_point_in_polygon);
criterion_main!(benches);

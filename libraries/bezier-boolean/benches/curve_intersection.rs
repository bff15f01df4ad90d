use bezier_boolean::*;
use criterion::{Criterion, criterion_group, criterion_main};
use glam::DVec2;
use std::hint::black_box;

pub fn criterion_benchmark(crit: &mut Criterion) {
	crit.bench_function("intersect crossing cubics", |bench| bench.iter(|| black_box(&a()).intersections(black_box(&b()))));
	crit.bench_function("intersect looping cubics", |bench| bench.iter(|| black_box(&c()).intersections(black_box(&d()))));
	crit.bench_function("intersect cubic and line", |bench| bench.iter(|| black_box(&a()).intersections(black_box(&line()))));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn a() -> Curve {
	Curve::new(DVec2::new(458.37027, 572.165771), DVec2::new(428.525848, 486.720093), DVec2::new(368.618805, 467.485992), DVec2::new(273., 476.))
}
fn b() -> Curve {
	Curve::new(DVec2::new(300., 400.), DVec2::new(419., 463.), DVec2::new(481.741198, 514.692273), DVec2::new(481.333333, 768.))
}
fn c() -> Curve {
	Curve::new(DVec2::new(0., 0.), DVec2::new(100., 100.), DVec2::new(0., 100.), DVec2::new(100., 0.))
}
fn d() -> Curve {
	Curve::new(DVec2::new(0., 80.), DVec2::new(100., -20.), DVec2::new(0., -20.), DVec2::new(100., 80.))
}
fn line() -> Curve {
	Curve::line(DVec2::new(250., 500.), DVec2::new(500., 500.))
}

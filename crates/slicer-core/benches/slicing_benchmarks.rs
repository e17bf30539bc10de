//! Benchmarks for BVH construction and end-to-end slicing.
//!
//! Run with: cargo bench -p slicer-core
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p slicer-core -- --save-baseline main
//! 2. After changes: cargo bench -p slicer-core -- --baseline main

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use slicer_core::{slice, slice_parallel, SliceParams};
use slicer_geometry::{cube_triangles, Point3, Triangle};
use slicer_spatial::{Bvh, LinearIndex, SpatialIndex, SplitStrategy};

// =============================================================================
// Test mesh generation
// =============================================================================

/// A field of disjoint closed boxes; `n^3` boxes, `12 * n^3` triangles.
fn box_field(n: usize) -> Vec<Triangle> {
    let mut triangles = Vec::new();
    for ix in 0..n {
        for iy in 0..n {
            for iz in 0..n {
                #[allow(clippy::cast_precision_loss)]
                let base = Point3::new(ix as f32 * 3.0, iy as f32 * 3.0, iz as f32 * 3.0);
                #[allow(clippy::cast_precision_loss)]
                let size = 1.0 + 0.25 * ((ix + iy + iz) % 3) as f32;
                triangles.extend(cube_triangles(
                    base,
                    Point3::new(base.x + size, base.y + size, base.z + size),
                ));
            }
        }
    }
    triangles
}

fn bench_bvh_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("bvh_build");

    for n in [4usize, 8] {
        let triangles = box_field(n);
        group.throughput(Throughput::Elements(triangles.len() as u64));

        group.bench_function(format!("median_{}", triangles.len()), |b| {
            b.iter(|| {
                let mut bvh = Bvh::new(SplitStrategy::MedianSplit);
                bvh.build(black_box(triangles.clone())).unwrap();
                bvh
            });
        });

        group.bench_function(format!("sah_{}", triangles.len()), |b| {
            b.iter(|| {
                let mut bvh = Bvh::new(SplitStrategy::SurfaceAreaHeuristic);
                bvh.build(black_box(triangles.clone())).unwrap();
                bvh
            });
        });
    }

    group.finish();
}

fn bench_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("slice");
    let params = SliceParams::default().with_thickness(0.4);

    let triangles = box_field(6);

    let mut bvh = Bvh::new(SplitStrategy::SurfaceAreaHeuristic);
    bvh.build(triangles.clone()).unwrap();

    let mut linear = LinearIndex::new();
    linear.build(triangles).unwrap();

    group.bench_function("bvh", |b| {
        b.iter(|| slice(black_box(&bvh), &params).unwrap());
    });

    group.bench_function("linear", |b| {
        b.iter(|| slice(black_box(&linear), &params).unwrap());
    });

    group.bench_function("bvh_parallel", |b| {
        b.iter(|| slice_parallel(black_box(&bvh), &params).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_bvh_build, bench_slice);
criterion_main!(benches);

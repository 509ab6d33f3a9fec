// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use plotstory_index::{Aabb2D, QuadTree};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Aabb2D::<f64>::from_xywh(x0, y0, cell, cell));
        }
    }
    out
}

fn to_rstar_rects(v: &[Aabb2D<f64>]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|r| Rectangle::from_corners([r.min_x, r.min_y], [r.max_x, r.max_y]))
        .collect()
}

fn bench_point_hits_vs_rstar(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_hits_vs_rstar");
    for &n in &[64usize, 128] {
        let cell = 10.0;
        let rects = gen_grid_rects(n, cell);
        let extent = n as f64 * cell;
        let probes: Vec<(f64, f64)> = (0..256)
            .map(|q| {
                let t = q as f64 / 256.0;
                (t * extent + 0.5, (1.0 - t) * extent - 0.5)
            })
            .collect();
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("quadtree_build_query_n{n}"), |b| {
            b.iter_batched(
                || QuadTree::<f64, u32>::from_xywh(0.0, 0.0, extent, extent, 0.015, 10).unwrap(),
                |mut tree| {
                    for (i, r) in rects.iter().copied().enumerate() {
                        let _ = tree.insert(r, i as u32);
                    }
                    let hits: usize = probes
                        .iter()
                        .map(|&(x, y)| tree.collisions(x, y).count())
                        .sum();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_build_query_bulk_n{n}"), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let hits: usize = probes
                        .iter()
                        .map(|&(x, y)| {
                            tree.locate_in_envelope_intersecting(&AABB::from_point([x, y]))
                                .count()
                        })
                        .sum();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_point_hits_vs_rstar);
criterion_main!(benches);

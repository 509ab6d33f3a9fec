// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use plotstory_index::{Aabb2D, QuadTree};

const EXTENT: f64 = 2000.0;
const ITEM: f64 = 12.0;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Scatter-like items: uniform positions, one item-sized box each.
fn gen_uniform(count: usize) -> Vec<Aabb2D<f64>> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let x = rng.next_f64() * (EXTENT - ITEM);
            let y = rng.next_f64() * (EXTENT - ITEM);
            Aabb2D::from_xywh(x, y, ITEM, ITEM)
        })
        .collect()
}

/// Manhattan-like items: dense towers around a few positions.
fn gen_clustered(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Aabb2D<f64>> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let centers: Vec<(f64, f64)> = (0..n_clusters)
        .map(|_| (rng.next_f64() * EXTENT, rng.next_f64() * EXTENT))
        .collect();
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Aabb2D::from_xywh(cx + dx, cy + dy, ITEM, ITEM));
        }
    }
    out
}

fn gen_points(count: usize) -> Vec<(f64, f64)> {
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    (0..count)
        .map(|_| (rng.next_f64() * EXTENT, rng.next_f64() * EXTENT))
        .collect()
}

fn build(rects: &[Aabb2D<f64>], ratio: f64, capacity: usize) -> QuadTree<f64, u32> {
    let mut tree = QuadTree::from_xywh(0.0, 0.0, EXTENT, EXTENT, ratio, capacity).unwrap();
    for (i, r) in rects.iter().copied().enumerate() {
        let _ = tree.insert(r, i as u32);
    }
    tree
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_build");
    for &n in &[1_000usize, 10_000, 100_000] {
        let rects = gen_uniform(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("uniform_n{n}"), |b| {
            b.iter(|| black_box(build(&rects, 0.015, 10).len()));
        });
    }
    let rects = gen_clustered(22, 2_000, 150.0);
    group.bench_function("clustered_n44000", |b| {
        b.iter(|| black_box(build(&rects, 0.015, 10).len()));
    });
    group.finish();
}

fn bench_point_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_query");
    let points = gen_points(1_024);
    group.throughput(Throughput::Elements(points.len() as u64));
    for &n in &[1_000usize, 10_000, 100_000] {
        let rects = gen_uniform(n);
        let tree = build(&rects, 0.015, 10);
        group.bench_function(format!("quadtree_n{n}"), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for &(x, y) in &points {
                    hits += tree.collisions(x, y).count();
                }
                black_box(hits)
            });
        });
        group.bench_function(format!("linear_scan_n{n}"), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for &(x, y) in &points {
                    hits += rects.iter().filter(|r| r.contains_point(x, y)).count();
                }
                black_box(hits)
            });
        });
    }
    group.finish();
}

fn bench_capacity(c: &mut Criterion) {
    let mut group = c.benchmark_group("capacity");
    let rects = gen_clustered(22, 2_000, 150.0);
    let points = gen_points(1_024);
    for &capacity in &[4usize, 10, 32, 128] {
        group.bench_function(format!("build_then_query_cap{capacity}"), |b| {
            b.iter_batched(
                || rects.clone(),
                |rects| {
                    let tree = build(&rects, 0.015, capacity);
                    let hits: usize = points
                        .iter()
                        .map(|&(x, y)| tree.collisions(x, y).count())
                        .sum();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_point_queries, bench_capacity);
criterion_main!(benches);

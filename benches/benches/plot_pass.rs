// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::BTreeMap;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use plotstory_plugins::{Heatmap, PlotCore, PlotKind, Scatter, SettingValue, Settings, Table};

fn scatter_table(n: usize) -> Table {
    let vals = (0..n).flat_map(|i| {
        let t = i as f64;
        [t.sin() * 100.0, (t * 0.37).cos() * 100.0]
    });
    Table::new(n, 2)
        .with_col_info("name", ["x", "y"])
        .with_vals("v", vals)
}

fn matrix_table(nrows: usize, ncols: usize) -> Table {
    let names: Vec<String> = (0..ncols).map(|c| format!("c{c}")).collect();
    Table::new(nrows, ncols)
        .with_col_info("name", names)
        .with_vals("v", (0..nrows * ncols).map(|i| (i % 97) as f64))
}

fn settings<K: PlotKind>() -> Settings {
    let mut map = BTreeMap::new();
    map.insert("width".to_owned(), SettingValue::Number(2000.0));
    map.insert("height".to_owned(), SettingValue::Number(2000.0));
    Settings::from_resolver(&K::schema(), &map).unwrap()
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("begin_draw");
    for &n in &[1_000usize, 10_000, 100_000] {
        let data = scatter_table(n);
        let settings = settings::<Scatter>();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("scatter_n{n}"), |b| {
            let mut core = PlotCore::new();
            b.iter(|| black_box(core.rebuild::<Scatter, _>(&settings, &data).unwrap().len()));
        });
    }
    let data = matrix_table(2_000, 24);
    let settings = settings::<Heatmap>();
    group.bench_function("heatmap_2000x24", |b| {
        let mut core = PlotCore::new();
        b.iter(|| black_box(core.rebuild::<Heatmap, _>(&settings, &data).unwrap().len()));
    });
    group.finish();
}

criterion_group!(benches, bench_rebuild);
criterion_main!(benches);

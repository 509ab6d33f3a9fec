// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scatter plot painted on a software pixmap, then hit-tested.
//!
//! Draws 5000 points, counts the painted pixels, and walks the pointer across
//! the plot printing hover transitions.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p plotstory_demos --example scatter_raster`

use std::collections::BTreeMap;
use std::sync::Arc;

use futures_lite::future::block_on;
use plotstory_plugins::{
    HoverState, Pixmap, RasterPlot, Scatter, SettingValue, Table, VisualizationPlugin,
    update_hover,
};
use tracing_subscriber::EnvFilter;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

fn spiral(n: usize) -> Table {
    let vals = (0..n).flat_map(|i| {
        let t = i as f64 * 0.01;
        [t * t.cos(), t * t.sin()]
    });
    Table::new(n, 2)
        .with_col_info("name", ["x", "y"])
        .with_vals("position", vals)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut settings = BTreeMap::new();
    settings.insert("width".to_owned(), SettingValue::Number(f64::from(WIDTH)));
    settings.insert("height".to_owned(), SettingValue::Number(f64::from(HEIGHT)));
    settings.insert("itemRatio".to_owned(), SettingValue::Number(0.006));

    let mut plot = RasterPlot::<Scatter>::new();
    plot.configure(&settings).unwrap();
    plot.set_data(Arc::new(spiral(5_000)));
    plot.begin_draw().unwrap();

    let mut canvas = Pixmap::new(WIDTH, HEIGHT);
    block_on(plot.end_draw(&mut canvas)).unwrap();
    let painted = canvas.pixels().iter().filter(|p| p[3] > 0).count();
    tracing::info!(painted, rejected = plot.rejected().len(), "pass painted");
    println!("== Pass ==");
    if let Some(index) = plot.core().index() {
        println!(
            "  index: {} entries, {} nodes, depth {}",
            index.len(),
            index.node_count(),
            index.depth()
        );
    }

    println!("== Hover ==");
    let mut overlay = Pixmap::new(WIDTH, HEIGHT);
    let mut hover = HoverState::new();
    for step in 0..=16 {
        let x = 20.0 + f64::from(step) * 37.5;
        let y = f64::from(HEIGHT) / 2.0;
        let events = update_hover(&mut plot, &mut hover, &mut overlay, x, y).unwrap();
        if !events.is_empty() {
            println!("  ({x:>5.1}, {y:>5.1}) {events:?}");
        }
    }
    println!("  top item at center: {:?}", plot.top_item_at(320.0, 240.0));
}

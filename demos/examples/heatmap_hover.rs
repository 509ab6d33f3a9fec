// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hovering the rows of a heatmap kept in a scene.
//!
//! Rows shorter than the minimum highlight height grow while hovered and get
//! a border; leaving restores them.
//!
//! Run:
//! - `RUST_LOG=plotstory_plugins=trace cargo run -p plotstory_demos --example heatmap_hover`

use std::collections::BTreeMap;
use std::sync::Arc;

use futures_lite::future::block_on;
use plotstory_plugins::{
    Heatmap, HoverState, SettingValue, Table, VectorPlot, VisualizationPlugin, update_hover,
};
use plotstory_scene::Scene;
use tracing_subscriber::EnvFilter;

fn expression(nrows: usize, ncols: usize) -> Table {
    let genes = (0..nrows).map(|r| format!("gene{r}"));
    let samples: Vec<String> = (0..ncols).map(|c| format!("s{c}")).collect();
    let vals = (0..nrows * ncols).map(|i| ((i * 37) % 101) as f64 / 10.0);
    Table::new(nrows, ncols)
        .with_row_info("gene", genes)
        .with_col_info("name", samples)
        .with_vals("expression", vals)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut settings = BTreeMap::new();
    settings.insert("fill".to_owned(), SettingValue::Text("#8b0000".to_owned()));

    let mut plot = VectorPlot::<Heatmap>::new();
    plot.configure(&settings).unwrap();
    plot.set_data(Arc::new(expression(26, 6)));
    plot.begin_draw().unwrap();

    let mut scene = Scene::new();
    block_on(plot.end_draw(&mut scene)).unwrap();

    let mut hover = HoverState::new();
    for y in [25.0, 33.0, 45.0, 45.5, 290.0] {
        let events = update_hover(&mut plot, &mut hover, &mut scene, 200.0, y).unwrap();
        let bounds = hover
            .current()
            .iter()
            .filter_map(|&row| plot.row_node(&scene, row))
            .filter_map(|node| scene.world_bounds(node))
            .collect::<Vec<_>>();
        println!("y = {y:>5.1}: {events:?} hovered bounds {bounds:?}");
    }
}

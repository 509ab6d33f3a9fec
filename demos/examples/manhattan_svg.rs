// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A Manhattan plot loaded from JSON and kept as an SVG scene.
//!
//! Data and settings use the JSON layouts accepted by `Table::from_json` and
//! `Settings::from_json`. The SVG is printed to stdout, or written to the path
//! given as the first argument.
//!
//! Run:
//! - `cargo run -p plotstory_demos --example manhattan_svg -- manhattan.svg`

use std::sync::Arc;

use futures_lite::future::block_on;
use plotstory_plugins::{Manhattan, PlotKind, Settings, Table, VectorPlot, VisualizationPlugin};
use plotstory_scene::Scene;
use tracing_subscriber::EnvFilter;

const DATA: &str = r#"{
  "nrows": 8,
  "ncols": 1,
  "rows": [
    {"label": "snp", "d": ["rs1", "rs2", "rs3", "rs4", "rs5", "rs6", "rs7", "rs8"]},
    {"label": "position", "d": [1200, 5400, 9800, 15000, 21000, 26500, 31000, "unmapped"]}
  ],
  "cols": [{"label": "name", "d": ["-log10(p)"]}],
  "vals": [{"label": "score", "d": [1.2, 3.4, 7.9, 2.2, 0.4, 5.1, 8.8, 4.0]}]
}"#;

const SETTINGS: &str = r##"{
  "width": 600,
  "height": 240,
  "margins": {"left": 40, "top": 10, "right": 10, "bottom": 30},
  "rows": "position",
  "yBoundaries": {"min": 0, "max": 10},
  "fill": "#3a7d44",
  "strokeThickness": 1
}"##;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data = Table::from_json(DATA).unwrap();
    let json: serde_json::Value = serde_json::from_str(SETTINGS).unwrap();
    let settings = Settings::from_json(&Manhattan::schema(), &json).unwrap();

    let mut plot = VectorPlot::<Manhattan>::new();
    plot.configure(&settings).unwrap();
    plot.set_data(Arc::new(data));
    plot.begin_draw().unwrap();

    let mut scene = Scene::new();
    block_on(plot.end_draw(&mut scene)).unwrap();

    // Highlight the strongest association.
    plot.highlight_item(&mut scene, 6).unwrap();

    let svg = scene.to_svg(600, 240);
    match std::env::args().nth(1) {
        Some(path) => {
            std::fs::write(&path, &svg).unwrap();
            tracing::info!(path = %path, bytes = svg.len(), "svg written");
        }
        None => println!("{svg}"),
    }
}

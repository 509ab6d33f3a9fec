// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=plotstory_plugins --heading-base-level=0

//! Plotstory Plugins: interactive plot visualizations with quad-tree hit testing.
//!
//! A visualization turns the rows of a [`DataSource`] into marks on a surface,
//! and answers "which rows are under this point?" fast enough for hover. Each
//! draw pass has two phases:
//!
//! - [`VisualizationPlugin::begin_draw`] resolves the [`Settings`] against the
//!   data into a [`DrawConfig`], builds the data-to-screen
//!   [`CoordinateTransform`](plotstory_transform::CoordinateTransform) and
//!   indexes every row's box in a [`QuadTree`](plotstory_index::QuadTree).
//! - [`VisualizationPlugin::end_draw`] returns a future that draws row by row,
//!   yielding to the executor between rows (see [`draw_yielding`]).
//!
//! Plot kinds ([`Scatter`], [`Manhattan`], [`Heatmap`]) implement [`PlotKind`]
//! and are independent of the backend. Two backends compose the same
//! [`PlotCore`]:
//!
//! - [`RasterPlot`] paints onto any [`RasterSurface`], e.g. the bundled [`Pixmap`].
//! - [`VectorPlot`] keeps rows as keyed groups of a
//!   [`Scene`](plotstory_scene::Scene) that can be exported to SVG.
//!
//! Hover is a set of rows; [`update_hover`] turns pointer moves into
//! highlight and unhighlight calls.
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use std::sync::Arc;
//!
//! use futures_lite::future::block_on;
//! use plotstory_plugins::{
//!     HoverState, Pixmap, RasterPlot, Scatter, SettingValue, Table, VisualizationPlugin,
//!     update_hover,
//! };
//!
//! let data = Table::new(3, 2)
//!     .with_col_info("name", ["x", "y"])
//!     .with_vals("v", [0.0, 0.0, 5.0, 5.0, 10.0, 10.0]);
//!
//! let mut settings = BTreeMap::new();
//! settings.insert("width".to_owned(), SettingValue::Number(120.0));
//! settings.insert("height".to_owned(), SettingValue::Number(120.0));
//!
//! let mut plot = RasterPlot::<Scatter>::new();
//! plot.configure(&settings).unwrap();
//! plot.set_data(Arc::new(data));
//! plot.begin_draw().unwrap();
//!
//! let mut canvas = Pixmap::new(120, 120);
//! block_on(plot.end_draw(&mut canvas)).unwrap();
//!
//! // 20 px margins: (5, 5) lands in the middle of the plot area.
//! assert_eq!(plot.items_at(60.0, 60.0), [1]);
//!
//! let mut overlay = Pixmap::new(120, 120);
//! let mut hover = HoverState::new();
//! update_hover(&mut plot, &mut hover, &mut overlay, 60.0, 60.0).unwrap();
//! assert_eq!(hover.current(), &[1]);
//! ```

mod config;
mod data;
mod draw;
mod error;
pub mod hover;
mod kinds;
mod plugin;
mod raster;
mod settings;
mod style;
mod vector;

pub use config::{AxisBinding, DrawConfig};
pub use data::{Boundaries, DataRow, DataSource, InfoVector, SharedData, Table, ValueLayer};
pub use draw::{StepFailure, draw_yielding};
pub use error::{ConfigurationError, DrawError, PluginError, SurfaceError};
pub use hit_test::{INDEX_CAPACITY, PlotCore, Rejected, build_index, build_transform, query};
pub use hover::{HoverEvent, HoverState};
pub use kinds::{Heatmap, MIN_HIGHLIGHT_HEIGHT, Manhattan, PlotKind, RowLayout, Scatter};
pub use plugin::{DrawFuture, VisualizationPlugin, update_hover};
pub use raster::{Pixmap, RasterPlot, RasterSurface};
pub use settings::{
    Margins, SettingDef, SettingDefault, SettingKind, SettingValue, Settings, SettingsResolver,
    SettingsSchema, predefined,
};
pub use style::{ColorRamp, lerp, parse_setting_color};
pub use vector::VectorPlot;

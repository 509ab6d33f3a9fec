// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plot kinds: how a row becomes marks and an index box.

use kurbo::{Point, Rect};
use plotstory_scene::{ItemStyle, Mark};
use plotstory_transform::CoordinateTransform;

use crate::config::{AxisBinding, DrawConfig};
use crate::data::DataSource;
use crate::settings::{SettingDef, SettingsSchema, predefined};

mod heatmap;
mod manhattan;
mod scatter;

pub use heatmap::{Heatmap, MIN_HIGHLIGHT_HEIGHT};
pub use manhattan::Manhattan;
pub use scatter::Scatter;

/// Geometry of one row for one pass.
#[derive(Clone, Debug)]
pub struct RowLayout {
    /// Box used for hit testing, in the transform's output space.
    pub bounds: Rect,
    /// Marks to draw, in the transform's output space.
    pub marks: Vec<Mark>,
}

/// A kind of plot, independent of the backend drawing it.
///
/// Kinds are stateless; everything they need arrives through the
/// [`DrawConfig`] of the pass and the transform. Pass the full transform to
/// get surface coordinates, or [`CoordinateTransform::without_translation`]
/// to get coordinates relative to the plot area.
pub trait PlotKind {
    /// Name used in logs and as the schema name.
    const NAME: &'static str;

    /// Where the axes are read from.
    const AXES: AxisBinding;

    /// Declared settings.
    fn schema() -> SettingsSchema;

    /// Marks and index box of `row`, or `None` if the row has no position.
    fn layout<D: DataSource + ?Sized>(
        config: &DrawConfig,
        data: &D,
        transform: &CoordinateTransform,
        row: usize,
    ) -> Option<RowLayout>;

    /// Marks that replace the row's marks while it is highlighted.
    fn highlight<D: DataSource + ?Sized>(
        config: &DrawConfig,
        data: &D,
        transform: &CoordinateTransform,
        row: usize,
    ) -> Vec<Mark>;
}

/// Settings every kind with free axes declares.
fn point_plot_defs() -> [SettingDef; 16] {
    [
        predefined::MARGINS,
        predefined::WIDTH,
        predefined::HEIGHT,
        predefined::VALS,
        predefined::X_BOUNDARIES,
        predefined::Y_BOUNDARIES,
        predefined::X_SCALE,
        predefined::Y_SCALE,
        predefined::COLS,
        predefined::ITEM_RATIO,
        predefined::FILL,
        predefined::STROKE,
        predefined::STROKE_THICKNESS,
        predefined::SELECT_FILL,
        predefined::SELECT_STROKE,
        predefined::SELECT_STROKE_THICKNESS,
    ]
}

/// One circle of the item radius around `center`; `None` if `center` is not finite.
fn circle_layout(center: Point, radius: f64, style: ItemStyle) -> Option<RowLayout> {
    if !center.is_finite() {
        return None;
    }
    let mark = Mark::Circle {
        center,
        radius,
        style,
    };
    Some(RowLayout {
        bounds: mark.bounds(),
        marks: vec![mark],
    })
}

// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;
use peniko::Color;
use plotstory_scene::{ItemStyle, Mark};
use plotstory_transform::CoordinateTransform;

use super::{PlotKind, RowLayout};
use crate::config::{AxisBinding, DrawConfig};
use crate::data::DataSource;
use crate::settings::{SettingsSchema, predefined};
use crate::style::ColorRamp;

/// Rows grow to at least this height while highlighted.
pub const MIN_HIGHLIGHT_HEIGHT: f64 = 25.0;

/// One row of cells per data row, one cell per bound column, colored from
/// white to the fill color over the y boundaries. The whole row is one item.
#[derive(Copy, Clone, Debug, Default)]
pub struct Heatmap;

#[allow(clippy::cast_precision_loss, reason = "row and column indices are small")]
fn cell_rect(transform: &CoordinateTransform, col: usize, row: usize, grow: f64) -> Rect {
    let p0 = transform.calc((col as f64, row as f64));
    let p1 = transform.calc(((col + 1) as f64, (row + 1) as f64));
    Rect::from_points(p0, p1).inflate(0.0, 0.5 * grow)
}

fn cells<D: DataSource + ?Sized>(
    config: &DrawConfig,
    data: &D,
    transform: &CoordinateTransform,
    row: usize,
    fill: Color,
    grow: f64,
) -> Vec<Mark> {
    let ramp = ColorRamp::from_white(config.y_boundaries, fill);
    config
        .cols
        .iter()
        .enumerate()
        .filter_map(|(j, &col)| {
            let v = data.val(row, col, &config.vals)?;
            let mut style = ItemStyle::filled(ramp.color(v));
            style.stroke = config.style.stroke;
            style.stroke_width = config.style.stroke_width;
            Some(Mark::Rect {
                rect: cell_rect(transform, j, row, grow),
                style,
            })
        })
        .collect()
}

impl PlotKind for Heatmap {
    const NAME: &'static str = "heatmap";
    const AXES: AxisBinding = AxisBinding::Matrix;

    fn schema() -> SettingsSchema {
        SettingsSchema::new(
            Self::NAME,
            [
                predefined::MARGINS,
                predefined::WIDTH,
                predefined::HEIGHT,
                predefined::VALS,
                predefined::X_BOUNDARIES,
                predefined::Y_BOUNDARIES,
                predefined::COLS,
                predefined::ITEM_RATIO,
                predefined::FILL,
                predefined::STROKE,
                predefined::STROKE_THICKNESS,
                predefined::SELECT_FILL,
                predefined::SELECT_STROKE,
                predefined::SELECT_STROKE_THICKNESS,
            ],
        )
    }

    fn layout<D: DataSource + ?Sized>(
        config: &DrawConfig,
        data: &D,
        transform: &CoordinateTransform,
        row: usize,
    ) -> Option<RowLayout> {
        if row >= data.nrows() {
            return None;
        }
        let last_col = config.cols.len().checked_sub(1)?;
        let first = cell_rect(transform, 0, row, 0.0);
        let last = cell_rect(transform, last_col, row, 0.0);
        let bounds = first.union(last);
        bounds.is_finite().then(|| RowLayout {
            bounds,
            marks: cells(config, data, transform, row, config.fill(), 0.0),
        })
    }

    fn highlight<D: DataSource + ?Sized>(
        config: &DrawConfig,
        data: &D,
        transform: &CoordinateTransform,
        row: usize,
    ) -> Vec<Mark> {
        let Some(layout) = Self::layout(config, data, transform, row) else {
            return Vec::new();
        };
        let item_height = layout.bounds.height();
        let grow = (item_height.max(MIN_HIGHLIGHT_HEIGHT) - item_height).max(0.0);
        let mut marks = cells(config, data, transform, row, config.select_fill(), grow);

        let sst = config.select_style.stroke_width;
        if let Some(stroke) = config.select_style.visible_stroke() {
            marks.push(Mark::Rect {
                rect: layout.bounds.inflate(sst, sst + 0.5 * grow),
                style: ItemStyle::outlined(stroke, sst),
            });
        }
        marks
    }
}

// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use plotstory_scene::Mark;
use plotstory_transform::CoordinateTransform;

use super::{PlotKind, RowLayout, circle_layout, point_plot_defs};
use crate::config::{AxisBinding, DrawConfig, parse_info};
use crate::data::DataSource;
use crate::settings::{SettingsSchema, predefined};

/// Genome-wide association style plot: x is a numeric row info (a position),
/// y is the value in `cols[0]`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Manhattan;

impl Manhattan {
    fn position<D: DataSource + ?Sized>(
        config: &DrawConfig,
        data: &D,
        transform: &CoordinateTransform,
        row: usize,
    ) -> Option<Point> {
        let label = config.row_label.as_deref()?;
        let x = parse_info(data.info(row, label))?;
        let y = data.val(row, *config.cols.first()?, &config.vals)?;
        Some(transform.calc((x, y)))
    }
}

impl PlotKind for Manhattan {
    const NAME: &'static str = "manhattan";
    const AXES: AxisBinding = AxisBinding::RowInfo;

    fn schema() -> SettingsSchema {
        SettingsSchema::new(
            Self::NAME,
            point_plot_defs().into_iter().chain([predefined::ROWS]),
        )
    }

    fn layout<D: DataSource + ?Sized>(
        config: &DrawConfig,
        data: &D,
        transform: &CoordinateTransform,
        row: usize,
    ) -> Option<RowLayout> {
        let center = Self::position(config, data, transform, row)?;
        circle_layout(center, config.item_radius, config.style)
    }

    fn highlight<D: DataSource + ?Sized>(
        config: &DrawConfig,
        data: &D,
        transform: &CoordinateTransform,
        row: usize,
    ) -> Vec<Mark> {
        Self::position(config, data, transform, row)
            .and_then(|center| circle_layout(center, config.item_radius, config.select_style))
            .map(|l| l.marks)
            .unwrap_or_default()
    }
}

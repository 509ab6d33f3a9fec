// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use plotstory_scene::Mark;
use plotstory_transform::CoordinateTransform;

use super::{PlotKind, RowLayout, circle_layout, point_plot_defs};
use crate::config::{AxisBinding, DrawConfig};
use crate::data::DataSource;
use crate::settings::{SettingDefault, SettingsSchema, predefined};

/// One circle per row at `(cols[0], cols[1])`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Scatter;

impl Scatter {
    fn position<D: DataSource + ?Sized>(
        config: &DrawConfig,
        data: &D,
        transform: &CoordinateTransform,
        row: usize,
    ) -> Option<Point> {
        let x = data.val(row, *config.cols.first()?, &config.vals)?;
        let y = data.val(row, *config.cols.get(1)?, &config.vals)?;
        Some(transform.calc((x, y)))
    }
}

impl PlotKind for Scatter {
    const NAME: &'static str = "scatter";
    const AXES: AxisBinding = AxisBinding::Columns;

    fn schema() -> SettingsSchema {
        SettingsSchema::new(
            Self::NAME,
            point_plot_defs().into_iter().chain([predefined::FILL
                .with_default(SettingDefault::Text("#ff6520"))]),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Table;
    use crate::settings::Settings;
    use kurbo::Rect;
    use peniko::Color;
    use std::collections::BTreeMap;

    fn setup() -> (DrawConfig, Table) {
        let data = Table::new(3, 2)
            .with_col_info("name", ["x", "y"])
            .with_vals("v", [0.0, 0.0, 10.0, 10.0, f64::NAN, 3.0]);
        let settings = Settings::from_resolver(&Scatter::schema(), &BTreeMap::new()).unwrap();
        let config = DrawConfig::resolve(&settings, &data, Scatter::AXES).unwrap();
        (config, data)
    }

    #[test]
    fn rows_become_circles_around_their_position() {
        let (config, data) = setup();
        let t = crate::hit_test::build_transform(&config.x_scale, &config.y_scale, config.margins);
        // Default 400 × 300 surface with 20 px margins; data spans [0, 10] on both axes.
        let l = Scatter::layout(&config, &data, &t, 1).unwrap();
        let r = config.item_radius;
        assert_eq!(l.bounds, Rect::new(380.0 - r, 20.0 - r, 380.0 + r, 20.0 + r));
        match l.marks[..] {
            [Mark::Circle { center, style, .. }] => {
                assert_eq!(center, Point::new(380.0, 20.0));
                assert_eq!(
                    style.fill.map(|c| c.to_rgba8()),
                    Some(Color::from_rgba8(0xff, 0x65, 0x20, 0xff).to_rgba8())
                );
            }
            _ => panic!("expected one circle, got {:?}", l.marks),
        }
    }

    #[test]
    fn missing_or_nan_values_have_no_layout() {
        let (config, data) = setup();
        let t = crate::hit_test::build_transform(&config.x_scale, &config.y_scale, config.margins);
        assert!(Scatter::layout(&config, &data, &t, 2).is_none());
        assert!(Scatter::layout(&config, &data, &t, 9).is_none());
        assert!(Scatter::highlight(&config, &data, &t, 2).is_empty());
    }

    #[test]
    fn too_few_bound_columns_have_no_layout() {
        let (mut config, data) = setup();
        let t = crate::hit_test::build_transform(&config.x_scale, &config.y_scale, config.margins);
        config.cols.truncate(1);
        assert!(Scatter::layout(&config, &data, &t, 1).is_none());
        config.cols.clear();
        assert!(Scatter::highlight(&config, &data, &t, 1).is_empty());
    }

    #[test]
    fn highlight_uses_select_style() {
        let (config, data) = setup();
        let t = crate::hit_test::build_transform(&config.x_scale, &config.y_scale, config.margins);
        let marks = Scatter::highlight(&config, &data, &t, 0);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].style().stroke_width, 2.0);
    }
}

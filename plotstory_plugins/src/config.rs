// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pass configuration derived from settings and data.

use kurbo::Rect;
use peniko::Color;
use plotstory_scene::ItemStyle;
use plotstory_transform::{BandScale, LinearScale, SharedScale};

use crate::data::{Boundaries, DataSource};
use crate::error::ConfigurationError;
use crate::settings::{Margins, Settings, predefined};
use crate::style::parse_setting_color;

/// Where a plot kind reads its axis positions from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AxisBinding {
    /// x from `cols[0]`, y from `cols[1]`.
    Columns,
    /// x parsed from the row info `rows[0]`, y from `cols[0]`.
    RowInfo,
    /// One band per bound column horizontally and one per row vertically;
    /// values are colors, ranging over the y boundaries.
    Matrix,
}

impl AxisBinding {
    fn min_cols(self) -> usize {
        match self {
            Self::Columns => 2,
            Self::RowInfo | Self::Matrix => 1,
        }
    }
}

/// Everything one draw pass needs, resolved once at its start.
#[derive(Clone, Debug)]
pub struct DrawConfig {
    /// Surface width.
    pub width: f64,
    /// Surface height.
    pub height: f64,
    /// Margins around the plot area.
    pub margins: Margins,
    /// Plot area in surface coordinates; also the indexed region.
    pub plot_area: Rect,
    /// Item radius as a fraction of the smaller surface dimension.
    pub item_ratio: f64,
    /// `min(|width|, |height|) × item_ratio`.
    pub item_radius: f64,
    /// Bound column indices, in binding order.
    pub cols: Vec<usize>,
    /// Bound row info label, for [`AxisBinding::RowInfo`].
    pub row_label: Option<String>,
    /// Value layer.
    pub vals: String,
    /// Data-space range of the horizontal axis.
    pub x_boundaries: Boundaries,
    /// Data-space range of the vertical axis, or the color domain for [`AxisBinding::Matrix`].
    pub y_boundaries: Boundaries,
    /// Horizontal scale onto the plot area (origin at the plot area's corner).
    pub x_scale: SharedScale,
    /// Vertical scale onto the plot area (origin at the plot area's corner).
    pub y_scale: SharedScale,
    /// Paint of items.
    pub style: ItemStyle,
    /// Paint of highlighted items.
    pub select_style: ItemStyle,
}

impl DrawConfig {
    /// Resolve `settings` against `data` for a plot reading its axes through `binding`.
    ///
    /// `data` must hold at least one row.
    pub fn resolve<D: DataSource + ?Sized>(
        settings: &Settings,
        data: &D,
        binding: AxisBinding,
    ) -> Result<Self, ConfigurationError> {
        let width = number(settings, predefined::WIDTH.key)?;
        let height = number(settings, predefined::HEIGHT.key)?;
        let margins = settings
            .margins(predefined::MARGINS.key)
            .ok_or(ConfigurationError::Missing {
                key: predefined::MARGINS.key,
            })?;
        let plot_area = Rect::new(
            margins.left,
            margins.top,
            width - margins.right,
            height - margins.bottom,
        );
        if !(plot_area.width() > 0.0 && plot_area.height() > 0.0) {
            return Err(ConfigurationError::Invalid {
                key: predefined::MARGINS.key,
                reason: format!("plot area {plot_area:?} is empty"),
            });
        }

        let item_ratio = number(settings, predefined::ITEM_RATIO.key)?;
        if !(0.0..=1.0).contains(&item_ratio) {
            return Err(ConfigurationError::Invalid {
                key: predefined::ITEM_RATIO.key,
                reason: format!("{item_ratio} is not in [0, 1]"),
            });
        }
        let item_radius = width.abs().min(height.abs()) * item_ratio;

        let vals = match settings.text(predefined::VALS.key) {
            Some(v) => v.to_owned(),
            None => data
                .vals_labels()
                .first()
                .map(|v| (*v).to_owned())
                .ok_or(ConfigurationError::Missing {
                    key: predefined::VALS.key,
                })?,
        };
        if !data.vals_labels().contains(&vals.as_str()) {
            return Err(ConfigurationError::UnknownValues(vals));
        }

        let cols = resolve_cols(settings, data, binding)?;
        let row_label = if binding == AxisBinding::RowInfo {
            Some(resolve_row_label(settings, data)?)
        } else {
            None
        };

        let x_boundaries = match settings.boundaries(predefined::X_BOUNDARIES.key) {
            Some(b) => b,
            None => match binding {
                AxisBinding::Columns => column_boundaries(data, cols[0], &vals),
                AxisBinding::RowInfo => {
                    let label = row_label.as_deref().unwrap_or_default();
                    Boundaries::from_values(
                        (0..data.nrows()).filter_map(|r| parse_info(data.info(r, label))),
                    )
                    .unwrap_or(Boundaries::new(0.0, 1.0))
                }
                #[allow(
                    clippy::cast_precision_loss,
                    reason = "column counts are far below 2^52"
                )]
                AxisBinding::Matrix => Boundaries::new(0.0, cols.len() as f64),
            },
        };
        let y_boundaries = match settings.boundaries(predefined::Y_BOUNDARIES.key) {
            Some(b) => b,
            None => match binding {
                AxisBinding::Columns => column_boundaries(data, cols[1], &vals),
                AxisBinding::RowInfo => column_boundaries(data, cols[0], &vals),
                AxisBinding::Matrix => data.vals_boundaries(&vals).unwrap_or_else(|| {
                    let vals = vals.as_str();
                    Boundaries::from_values(cols.iter().flat_map(|&c| {
                        (0..data.nrows()).filter_map(move |r| data.val(r, c, vals))
                    }))
                    .unwrap_or(Boundaries::new(0.0, 1.0))
                }),
            },
        };

        let (w, h) = (plot_area.width(), plot_area.height());
        let (x_scale, y_scale) = match binding {
            AxisBinding::Matrix => (
                SharedScale::new(BandScale::new(cols.len(), [0.0, w])),
                SharedScale::new(BandScale::new(data.nrows(), [0.0, h])),
            ),
            AxisBinding::Columns | AxisBinding::RowInfo => (
                settings
                    .scale(predefined::X_SCALE.key)
                    .cloned()
                    .unwrap_or_else(|| {
                        SharedScale::new(LinearScale::new(
                            [x_boundaries.min, x_boundaries.max],
                            [0.0, w],
                        ))
                    }),
                settings
                    .scale(predefined::Y_SCALE.key)
                    .cloned()
                    .unwrap_or_else(|| {
                        SharedScale::new(LinearScale::new(
                            [y_boundaries.min, y_boundaries.max],
                            [h, 0.0],
                        ))
                    }),
            ),
        };

        let style = item_style(
            settings,
            predefined::FILL.key,
            predefined::STROKE.key,
            predefined::STROKE_THICKNESS.key,
        )?;
        let select_style = item_style(
            settings,
            predefined::SELECT_FILL.key,
            predefined::SELECT_STROKE.key,
            predefined::SELECT_STROKE_THICKNESS.key,
        )?;

        Ok(Self {
            width,
            height,
            margins,
            plot_area,
            item_ratio,
            item_radius,
            cols,
            row_label,
            vals,
            x_boundaries,
            y_boundaries,
            x_scale,
            y_scale,
            style,
            select_style,
        })
    }

    /// Fill of items, or black if the style has none.
    pub fn fill(&self) -> Color {
        self.style.fill.unwrap_or(Color::BLACK)
    }

    /// Fill of highlighted items, or black if the style has none.
    pub fn select_fill(&self) -> Color {
        self.select_style.fill.unwrap_or(Color::BLACK)
    }
}

/// Parse a numeric row info cell.
pub(crate) fn parse_info(cell: Option<&str>) -> Option<f64> {
    cell?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn number(settings: &Settings, key: &'static str) -> Result<f64, ConfigurationError> {
    let n = settings
        .number(key)
        .ok_or(ConfigurationError::Missing { key })?;
    if n.is_finite() {
        Ok(n)
    } else {
        Err(ConfigurationError::Invalid {
            key,
            reason: format!("{n} is not finite"),
        })
    }
}

fn resolve_cols<D: DataSource + ?Sized>(
    settings: &Settings,
    data: &D,
    binding: AxisBinding,
) -> Result<Vec<usize>, ConfigurationError> {
    let cols: Vec<usize> = match settings.list(predefined::COLS.key) {
        Some(names) => names
            .iter()
            .map(|name| {
                data.col_index(name)
                    .ok_or_else(|| ConfigurationError::UnknownColumn(name.clone()))
            })
            .collect::<Result<_, _>>()?,
        None => match binding {
            AxisBinding::Matrix => (0..data.ncols()).collect(),
            AxisBinding::Columns | AxisBinding::RowInfo => {
                (0..data.ncols().min(binding.min_cols())).collect()
            }
        },
    };
    if cols.len() < binding.min_cols() {
        return Err(ConfigurationError::Invalid {
            key: predefined::COLS.key,
            reason: format!(
                "{} column(s) bound, at least {} required",
                cols.len(),
                binding.min_cols()
            ),
        });
    }
    Ok(cols)
}

fn resolve_row_label<D: DataSource + ?Sized>(
    settings: &Settings,
    data: &D,
) -> Result<String, ConfigurationError> {
    let labels = data.row_labels();
    let label = match settings.list(predefined::ROWS.key) {
        Some(rows) => rows.first().cloned(),
        None => labels.first().map(|l| (*l).to_owned()),
    }
    .ok_or(ConfigurationError::Missing {
        key: predefined::ROWS.key,
    })?;
    if labels.contains(&label.as_str()) {
        Ok(label)
    } else {
        Err(ConfigurationError::UnknownRowLabel(label))
    }
}

fn column_boundaries<D: DataSource + ?Sized>(data: &D, col: usize, vals: &str) -> Boundaries {
    Boundaries::from_values((0..data.nrows()).filter_map(|r| data.val(r, col, vals)))
        .unwrap_or(Boundaries::new(0.0, 1.0))
}

fn item_style(
    settings: &Settings,
    fill: &'static str,
    stroke: &'static str,
    thickness: &'static str,
) -> Result<ItemStyle, ConfigurationError> {
    let color = |key: &'static str| -> Result<Option<Color>, ConfigurationError> {
        settings
            .text(key)
            .map(|text| parse_setting_color(key, text))
            .transpose()
    };
    Ok(ItemStyle {
        fill: color(fill)?,
        stroke: color(stroke)?,
        stroke_width: settings.number(thickness).unwrap_or(0.0).max(0.0),
    })
}

// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabular data consumed by the plots.
//!
//! A data set is a matrix of `nrows × ncols` values, possibly in several
//! layers (each layer has a `vals` label), plus textual info per row and per
//! column, each also addressed by a label. Rows are identified by their index.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

/// Inclusive value range of an axis or a value layer.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Boundaries {
    /// Lower end.
    pub min: f64,
    /// Upper end.
    pub max: f64,
}

impl Boundaries {
    /// Create boundaries.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Smallest boundaries containing every finite value, or `None` if there is none.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<Self>, v| match acc {
                None => Some(Self::new(v, v)),
                Some(b) => Some(Self::new(b.min.min(v), b.max.max(v))),
            })
    }

    /// Position of `v` inside the range, `0.0` at `min` and `1.0` at `max`.
    ///
    /// Not clamped. An empty range maps everything to `0.0`.
    pub fn normalize(&self, v: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 { 0.0 } else { (v - self.min) / span }
    }
}

/// Source of rows for a visualization.
///
/// Implementations must be cheap to query by index; the plots read every row
/// once per pass while building the index and once while drawing.
pub trait DataSource {
    /// Whether the data has finished loading. Plots draw nothing until it has.
    fn is_ready(&self) -> bool {
        true
    }

    /// Number of rows.
    fn nrows(&self) -> usize;

    /// Number of value columns.
    fn ncols(&self) -> usize;

    /// Labels of the per-row info columns.
    fn row_labels(&self) -> Vec<&str>;

    /// Labels of the per-column info rows.
    fn col_labels(&self) -> Vec<&str>;

    /// Labels of the value layers.
    fn vals_labels(&self) -> Vec<&str>;

    /// Value at `row`, `col` in the layer `vals_label`; `None` for a missing cell.
    fn val(&self, row: usize, col: usize, vals_label: &str) -> Option<f64>;

    /// Info of `row` under `label`.
    fn info(&self, row: usize, label: &str) -> Option<&str>;

    /// Info of column `col` under `label`.
    fn col_info(&self, col: usize, label: &str) -> Option<&str>;

    /// Boundaries declared by the data for a value layer, if any.
    fn vals_boundaries(&self, _vals_label: &str) -> Option<Boundaries> {
        None
    }

    /// Name of column `col`: its info under the first column label.
    fn col_name(&self, col: usize) -> Option<&str> {
        let label = *self.col_labels().first()?;
        self.col_info(col, label)
    }

    /// Index of the column whose info under any column label equals `name`.
    fn col_index(&self, name: &str) -> Option<usize> {
        let labels = self.col_labels();
        (0..self.ncols()).find(|&col| {
            labels
                .iter()
                .any(|label| self.col_info(col, label) == Some(name))
        })
    }
}

/// Shared handle to a data source, as held by the plugins.
pub type SharedData = Arc<dyn DataSource + Send + Sync>;

/// View of one row, addressed by column name.
pub struct DataRow<'a, D: ?Sized> {
    data: &'a D,
    index: usize,
}

impl<D: ?Sized> Clone for DataRow<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: ?Sized> Copy for DataRow<'_, D> {}

impl<'a, D: DataSource + ?Sized> DataRow<'a, D> {
    /// View of row `index`.
    pub fn new(data: &'a D, index: usize) -> Self {
        Self { data, index }
    }

    /// Row index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of this row in the column named `col` and the layer `vals_label`.
    pub fn val(&self, col: &str, vals_label: &str) -> Option<f64> {
        let col = self.data.col_index(col)?;
        self.data.val(self.index, col, vals_label)
    }

    /// Info of this row under `label`.
    pub fn info(&self, label: &str) -> Option<&'a str> {
        self.data.info(self.index, label)
    }
}

impl<D: ?Sized> fmt::Debug for DataRow<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataRow")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

/// One labelled info vector (per row or per column).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InfoVector {
    /// Label.
    pub label: String,
    /// One entry per row (or column). Numbers are accepted and kept as text.
    #[serde(deserialize_with = "text_cells")]
    pub d: Vec<String>,
}

/// One labelled value layer, row-major.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueLayer {
    /// Label.
    pub label: String,
    /// Declared value range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundaries: Option<Boundaries>,
    /// `nrows × ncols` cells; `null` marks a missing value.
    pub d: Vec<Option<f64>>,
}

/// In-memory [`DataSource`] in the JSON layout used by visualization hosts:
///
/// ```json
/// {"nrows": 2, "ncols": 2,
///  "rows": [{"label": "id", "d": ["a", "b"]}],
///  "cols": [{"label": "name", "d": ["x", "y"]}],
///  "vals": [{"label": "v", "boundaries": {"min": 0, "max": 1}, "d": [0.1, 0.2, 0.3, null]}]}
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Number of rows.
    pub nrows: usize,
    /// Number of value columns.
    pub ncols: usize,
    /// Per-row info.
    #[serde(default)]
    pub rows: Vec<InfoVector>,
    /// Per-column info.
    #[serde(default)]
    pub cols: Vec<InfoVector>,
    /// Value layers.
    #[serde(default)]
    pub vals: Vec<ValueLayer>,
}

impl Table {
    /// Empty table with the given shape.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            ..Self::default()
        }
    }

    /// Builder-style: add per-row info.
    #[must_use]
    pub fn with_row_info<S: Into<String>>(
        mut self,
        label: impl Into<String>,
        d: impl IntoIterator<Item = S>,
    ) -> Self {
        self.rows.push(InfoVector {
            label: label.into(),
            d: d.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Builder-style: add per-column info.
    #[must_use]
    pub fn with_col_info<S: Into<String>>(
        mut self,
        label: impl Into<String>,
        d: impl IntoIterator<Item = S>,
    ) -> Self {
        self.cols.push(InfoVector {
            label: label.into(),
            d: d.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Builder-style: add a fully populated value layer, row-major.
    #[must_use]
    pub fn with_vals(mut self, label: impl Into<String>, d: impl IntoIterator<Item = f64>) -> Self {
        self.vals.push(ValueLayer {
            label: label.into(),
            boundaries: None,
            d: d.into_iter().map(Some).collect(),
        });
        self
    }

    /// Parse the JSON layout shown on [`Table`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    fn layer(&self, label: &str) -> Option<&ValueLayer> {
        self.vals.iter().find(|l| l.label == label)
    }
}

impl DataSource for Table {
    fn nrows(&self) -> usize {
        self.nrows
    }

    fn ncols(&self) -> usize {
        self.ncols
    }

    fn row_labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.label.as_str()).collect()
    }

    fn col_labels(&self) -> Vec<&str> {
        self.cols.iter().map(|c| c.label.as_str()).collect()
    }

    fn vals_labels(&self) -> Vec<&str> {
        self.vals.iter().map(|v| v.label.as_str()).collect()
    }

    fn val(&self, row: usize, col: usize, vals_label: &str) -> Option<f64> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        let layer = self.layer(vals_label)?;
        let i = row.checked_mul(self.ncols)?.checked_add(col)?;
        layer.d.get(i).copied().flatten()
    }

    fn info(&self, row: usize, label: &str) -> Option<&str> {
        let v = self.rows.iter().find(|r| r.label == label)?;
        v.d.get(row).map(String::as_str)
    }

    fn col_info(&self, col: usize, label: &str) -> Option<&str> {
        let v = self.cols.iter().find(|c| c.label == label)?;
        v.d.get(col).map(String::as_str)
    }

    fn vals_boundaries(&self, vals_label: &str) -> Option<Boundaries> {
        self.layer(vals_label)?.boundaries
    }
}

fn text_cells<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Vec::<Cell>::deserialize(deserializer)?
        .into_iter()
        .map(|c| match c {
            Cell::Text(s) => s,
            Cell::Number(n) => n.to_string(),
        })
        .collect())
}

// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for configuration, drawing and the plugin lifecycle.

use std::fmt;

use plotstory_index::IndexError;

use crate::settings::SettingKind;

/// A required setting is missing or malformed, or does not match the data.
///
/// Aborts the draw pass; no partial index is published.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigurationError {
    /// The setting has no value and no default.
    Missing {
        /// Setting key.
        key: &'static str,
    },
    /// The resolver returned a value of another kind.
    WrongKind {
        /// Setting key.
        key: &'static str,
        /// Kind declared in the schema.
        expected: SettingKind,
    },
    /// The value has the right kind but cannot be used.
    Invalid {
        /// Setting key.
        key: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// A column binding names a column the data does not have.
    UnknownColumn(String),
    /// The values label does not exist in the data.
    UnknownValues(String),
    /// The row info label does not exist in the data.
    UnknownRowLabel(String),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { key } => write!(f, "setting `{key}` is required"),
            Self::WrongKind { key, expected } => {
                write!(f, "setting `{key}` must be a {expected:?} value")
            }
            Self::Invalid { key, reason } => write!(f, "setting `{key}` is invalid: {reason}"),
            Self::UnknownColumn(name) => write!(f, "no column named `{name}`"),
            Self::UnknownValues(label) => write!(f, "no values labelled `{label}`"),
            Self::UnknownRowLabel(label) => write!(f, "no row info labelled `{label}`"),
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// A drawing surface refused a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceError {
    /// The mark has NaN or infinite geometry.
    NonFinite,
    /// Backend-specific failure.
    Backend(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => f.write_str("mark geometry is not finite"),
            Self::Backend(msg) => write!(f, "surface error: {msg}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A per-item draw step failed; the pass stopped there.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawError {
    /// The step drawing row `item` failed.
    StepFailed {
        /// Row whose step failed.
        item: usize,
        /// Surface failure.
        source: SurfaceError,
    },
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StepFailed { item, .. } => write!(f, "drawing row {item} failed"),
        }
    }
}

impl std::error::Error for DrawError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StepFailed { source, .. } => Some(source),
        }
    }
}

/// Errors surfaced by [`VisualizationPlugin`](crate::VisualizationPlugin) calls.
#[derive(Clone, Debug, PartialEq)]
pub enum PluginError {
    /// A lifecycle call needs settings or data that were never provided.
    NotConfigured,
    /// See [`ConfigurationError`].
    Configuration(ConfigurationError),
    /// The index could not be created for the plot area.
    Index(IndexError<f64>),
    /// See [`DrawError`].
    Draw(DrawError),
    /// A surface failed outside of a draw pass (e.g. while highlighting).
    Surface(SurfaceError),
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => f.write_str("plugin has no settings or data"),
            Self::Configuration(e) => write!(f, "configuration error: {e}"),
            Self::Index(e) => write!(f, "index error: {e}"),
            Self::Draw(e) => write!(f, "draw error: {e}"),
            Self::Surface(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for PluginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotConfigured => None,
            Self::Configuration(e) => Some(e),
            Self::Index(e) => Some(e),
            Self::Draw(e) => Some(e),
            Self::Surface(e) => Some(e),
        }
    }
}

impl From<ConfigurationError> for PluginError {
    fn from(e: ConfigurationError) -> Self {
        Self::Configuration(e)
    }
}

impl From<IndexError<f64>> for PluginError {
    fn from(e: IndexError<f64>) -> Self {
        Self::Index(e)
    }
}

impl From<DrawError> for PluginError {
    fn from(e: DrawError) -> Self {
        Self::Draw(e)
    }
}

impl From<SurfaceError> for PluginError {
    fn from(e: SurfaceError) -> Self {
        Self::Surface(e)
    }
}

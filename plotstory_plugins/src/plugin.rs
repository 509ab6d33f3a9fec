// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The lifecycle contract between a host and a visualization.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use plotstory_transform::CoordinateTransform;

use crate::config::DrawConfig;
use crate::data::{DataSource, SharedData};
use crate::error::PluginError;
use crate::hit_test::{PlotCore, Rejected};
use crate::hover::{HoverEvent, HoverState};
use crate::kinds::PlotKind;
use crate::settings::{Settings, SettingsResolver};

/// Future returned by [`VisualizationPlugin::end_draw`].
pub type DrawFuture<'a> = Pin<Box<dyn Future<Output = Result<(), PluginError>> + 'a>>;

/// A visualization driven by a host framework.
///
/// Per redraw the host calls [`begin_draw`](Self::begin_draw), which resolves
/// the configuration and builds the hit-testing index, then awaits
/// [`end_draw`](Self::end_draw), which draws item by item. Between passes the
/// host maps pointer positions to rows with [`items_at`](Self::items_at) and
/// toggles highlighting on a surface.
pub trait VisualizationPlugin {
    /// What the plugin draws on.
    type Surface: ?Sized;

    /// Name of the plot kind.
    fn name(&self) -> &'static str;

    /// Resolve settings against the plugin's schema. Takes effect on the next pass.
    fn configure(&mut self, resolver: &dyn SettingsResolver) -> Result<(), PluginError>;

    /// Replace the data. Takes effect on the next pass.
    fn set_data(&mut self, data: SharedData);

    /// Build the transform and the index for the current settings and data.
    ///
    /// On error the previous pass stays published.
    fn begin_draw(&mut self) -> Result<(), PluginError>;

    /// Draw every row of the published pass onto `surface`, yielding between rows.
    ///
    /// Fails with the first row that cannot be drawn.
    fn end_draw<'a>(&'a mut self, surface: &'a mut Self::Surface) -> DrawFuture<'a>;

    /// Rows whose boxes contain the surface point `(x, y)`, in no particular order.
    fn items_at(&self, x: f64, y: f64) -> Vec<usize>;

    /// The topmost row at `(x, y)`.
    fn top_item_at(&self, x: f64, y: f64) -> Option<usize>;

    /// Show `row` as highlighted.
    fn highlight_item(&mut self, surface: &mut Self::Surface, row: usize)
    -> Result<(), PluginError>;

    /// Undo [`highlight_item`](Self::highlight_item).
    fn unhighlight_item(
        &mut self,
        surface: &mut Self::Surface,
        row: usize,
    ) -> Result<(), PluginError>;
}

/// Move the hover to the rows under `(x, y)`, unhighlighting rows it left and
/// highlighting rows it entered.
///
/// Returns the transitions that were applied. `hover` is only updated once
/// every transition succeeded, so after an error it still describes the
/// previous hover and the call can be retried.
pub fn update_hover<P: VisualizationPlugin + ?Sized>(
    plugin: &mut P,
    hover: &mut HoverState<usize>,
    surface: &mut P::Surface,
    x: f64,
    y: f64,
) -> Result<Vec<HoverEvent<usize>>, PluginError> {
    let mut hits = plugin.items_at(x, y);
    hits.sort_unstable();
    let mut next = hover.clone();
    let events = next.update(&hits);
    for event in &events {
        match *event {
            HoverEvent::Leave(row) => plugin.unhighlight_item(surface, row)?,
            HoverEvent::Enter(row) => plugin.highlight_item(surface, row)?,
        }
    }
    *hover = next;
    Ok(events)
}

/// Settings, data and the published pass, shared by both backends.
#[derive(Default)]
pub(crate) struct PlotState {
    settings: Option<Settings>,
    data: Option<SharedData>,
    core: PlotCore,
    /// Data the published pass was built from; `data` may have moved on since.
    pass_data: Option<SharedData>,
    rejected: Vec<Rejected>,
}

/// Borrowed view of the published pass.
pub(crate) struct PassRef<'a> {
    pub(crate) config: &'a DrawConfig,
    pub(crate) transform: &'a CoordinateTransform,
    pub(crate) data: &'a (dyn DataSource + Send + Sync),
}

impl PlotState {
    pub(crate) fn configure<K: PlotKind>(
        &mut self,
        resolver: &dyn SettingsResolver,
    ) -> Result<(), PluginError> {
        self.settings = Some(Settings::from_resolver(&K::schema(), resolver)?);
        Ok(())
    }

    pub(crate) fn set_data(&mut self, data: SharedData) {
        self.data = Some(data);
    }

    pub(crate) fn begin_draw<K: PlotKind>(&mut self) -> Result<(), PluginError> {
        let (Some(settings), Some(data)) = (&self.settings, &self.data) else {
            return Err(PluginError::NotConfigured);
        };
        self.rejected = self.core.rebuild::<K, _>(settings, &**data)?;
        self.pass_data = self.core.is_built().then(|| Arc::clone(data));
        Ok(())
    }

    /// The published pass; `Ok(None)` when the last pass had no rows.
    pub(crate) fn pass(&self) -> Result<Option<PassRef<'_>>, PluginError> {
        if self.settings.is_none() || self.data.is_none() {
            return Err(PluginError::NotConfigured);
        }
        let (Some(config), Some(transform), Some(data)) =
            (self.core.config(), self.core.transform(), &self.pass_data)
        else {
            return Ok(None);
        };
        Ok(Some(PassRef {
            config,
            transform,
            data: &**data,
        }))
    }

    pub(crate) fn core(&self) -> &PlotCore {
        &self.core
    }

    pub(crate) fn rejected(&self) -> &[Rejected] {
        &self.rejected
    }
}

impl fmt::Debug for PlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotState")
            .field("settings", &self.settings)
            .field("has_data", &self.data.is_some())
            .field("core", &self.core)
            .field("rejected", &self.rejected.len())
            .finish()
    }
}

// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained-mode backend: rows live on as keyed groups of a [`Scene`].

use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;

use kurbo::Affine;
use plotstory_scene::{Mark, NodeFlags, NodeId, Scene, SceneNode};
use tracing::Instrument;

use crate::hit_test::{PlotCore, Rejected};
use crate::data::SharedData;
use crate::draw::draw_yielding;
use crate::error::{DrawError, PluginError, SurfaceError};
use crate::kinds::PlotKind;
use crate::plugin::{DrawFuture, PassRef, PlotState, VisualizationPlugin};
use crate::settings::SettingsResolver;

fn row_key(row: usize) -> u64 {
    row as u64
}

fn check_finite(marks: &[Mark]) -> Result<(), SurfaceError> {
    if marks.iter().all(Mark::is_finite) {
        Ok(())
    } else {
        Err(SurfaceError::NonFinite)
    }
}

/// A plot of kind `K` kept as a scene subtree.
///
/// The plot owns one viewport group, translated by the margins, under which
/// every drawn row is a group keyed by its row index. Each
/// [`end_draw`](VisualizationPlugin::end_draw) joins the rows onto those
/// groups: new rows are inserted, kept rows get fresh marks, and rows that
/// disappeared or no longer have a position are removed. Marks are in plot
/// area coordinates.
pub struct VectorPlot<K> {
    state: PlotState,
    viewport: Option<NodeId>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: PlotKind> VectorPlot<K> {
    /// An unconfigured plot.
    pub fn new() -> Self {
        Self {
            state: PlotState::default(),
            viewport: None,
            _kind: PhantomData,
        }
    }

    /// Hit-testing core of the published pass.
    pub fn core(&self) -> &PlotCore {
        self.state.core()
    }

    /// Rows the last [`begin_draw`](VisualizationPlugin::begin_draw) could not index.
    pub fn rejected(&self) -> &[Rejected] {
        self.state.rejected()
    }

    /// The viewport group, once drawn.
    pub fn viewport(&self) -> Option<NodeId> {
        self.viewport
    }

    /// The group drawing `row` in `scene`.
    pub fn row_node(&self, scene: &Scene, row: usize) -> Option<NodeId> {
        let viewport = self.viewport.filter(|v| scene.is_alive(*v))?;
        scene.child_by_key(Some(viewport), row_key(row))
    }

    fn restyle(
        &self,
        scene: &mut Scene,
        row: usize,
        marks: impl FnOnce(&PassRef<'_>) -> Vec<Mark>,
        flags: NodeFlags,
    ) -> Result<(), PluginError> {
        let (Some(pass), Some(group)) = (self.state.pass()?, self.row_node(scene, row)) else {
            return Ok(());
        };
        let marks = marks(&pass);
        check_finite(&marks)?;
        scene.replace_marks(group, marks);
        scene.set_flags(group, flags);
        if flags.contains(NodeFlags::HIGHLIGHTED) {
            scene.raise(group);
        }
        Ok(())
    }
}

impl<K: PlotKind> Default for VectorPlot<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PlotKind> fmt::Debug for VectorPlot<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorPlot")
            .field("kind", &K::NAME)
            .field("state", &self.state)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl<K: PlotKind + 'static> VisualizationPlugin for VectorPlot<K> {
    type Surface = Scene;

    fn name(&self) -> &'static str {
        K::NAME
    }

    fn configure(&mut self, resolver: &dyn SettingsResolver) -> Result<(), PluginError> {
        let _span = tracing::debug_span!("configure", kind = K::NAME, backend = "vector").entered();
        self.state.configure::<K>(resolver)
    }

    fn set_data(&mut self, data: SharedData) {
        self.state.set_data(data);
    }

    fn begin_draw(&mut self) -> Result<(), PluginError> {
        let _span =
            tracing::debug_span!("begin_draw", kind = K::NAME, backend = "vector").entered();
        self.state.begin_draw::<K>()
    }

    fn end_draw<'a>(&'a mut self, scene: &'a mut Scene) -> DrawFuture<'a> {
        let span = tracing::debug_span!("end_draw", kind = K::NAME, backend = "vector");
        let Self {
            state, viewport, ..
        } = self;
        Box::pin(
            async move {
                let Some(pass) = state.pass()? else {
                    if let Some(v) = viewport.take() {
                        scene.remove(v);
                    }
                    return Ok(());
                };
                let offset = Affine::translate(pass.config.margins.offset());
                let root = match viewport.filter(|v| scene.is_alive(*v)) {
                    Some(v) => {
                        scene.set_transform(v, offset);
                        v
                    }
                    None => scene.insert(None, SceneNode::group(offset)),
                };
                *viewport = Some(root);

                let local = pass.transform.without_translation();
                let mut kept = BTreeSet::new();
                let drawn = draw_yielding(0..pass.data.nrows(), |_, row| {
                    let Some(layout) = K::layout(pass.config, pass.data, &local, row) else {
                        return Ok(());
                    };
                    check_finite(&layout.marks)?;
                    let key = row_key(row);
                    let group = scene.child_by_key(Some(root), key).unwrap_or_else(|| {
                        scene.insert_keyed(Some(root), key, SceneNode::group(Affine::IDENTITY))
                    });
                    scene.replace_marks(group, layout.marks);
                    scene.set_flags(group, NodeFlags::VISIBLE);
                    kept.insert(key);
                    tracing::trace!(row, "row joined");
                    Ok(())
                })
                .await
                .map_err(|f| DrawError::StepFailed {
                    item: f.index,
                    source: f.error,
                })?;
                scene.retain_keyed(Some(root), |key| kept.contains(&key));
                tracing::debug!(rows = drawn, groups = kept.len(), "pass joined");
                Ok(())
            }
            .instrument(span),
        )
    }

    fn items_at(&self, x: f64, y: f64) -> Vec<usize> {
        self.state.core().items_at(x, y)
    }

    fn top_item_at(&self, x: f64, y: f64) -> Option<usize> {
        self.state.core().top_item_at(x, y)
    }

    fn highlight_item(&mut self, scene: &mut Scene, row: usize) -> Result<(), PluginError> {
        tracing::trace!(kind = K::NAME, row, "row highlighted");
        self.restyle(
            scene,
            row,
            |pass| {
                K::highlight(
                    pass.config,
                    pass.data,
                    &pass.transform.without_translation(),
                    row,
                )
            },
            NodeFlags::VISIBLE | NodeFlags::HIGHLIGHTED,
        )
    }

    fn unhighlight_item(&mut self, scene: &mut Scene, row: usize) -> Result<(), PluginError> {
        self.restyle(
            scene,
            row,
            |pass| {
                K::layout(
                    pass.config,
                    pass.data,
                    &pass.transform.without_translation(),
                    row,
                )
                .map(|l| l.marks)
                .unwrap_or_default()
            },
            NodeFlags::VISIBLE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Table;
    use crate::hover::{HoverEvent, HoverState};
    use crate::kinds::{Heatmap, Manhattan, Scatter};
    use crate::plugin::update_hover;
    use crate::settings::SettingValue;
    use futures_lite::future::block_on;
    use kurbo::{Point, Rect};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn points(xy: &[(f64, f64)]) -> SharedData {
        Arc::new(
            Table::new(xy.len(), 2)
                .with_col_info("name", ["x", "y"])
                .with_vals("v", xy.iter().flat_map(|&(x, y)| [x, y])),
        )
    }

    fn drawn<K: PlotKind + 'static>(
        plot: &mut VectorPlot<K>,
        scene: &mut Scene,
        data: SharedData,
    ) {
        plot.set_data(data);
        plot.begin_draw().unwrap();
        block_on(plot.end_draw(scene)).unwrap();
    }

    fn configured<K: PlotKind + 'static>(settings: &[(&str, SettingValue)]) -> VectorPlot<K> {
        let map: BTreeMap<String, SettingValue> = settings
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect();
        let mut plot = VectorPlot::new();
        plot.configure(&map).unwrap();
        plot
    }

    fn center(scene: &Scene, id: NodeId) -> Point {
        scene.world_bounds(id).unwrap().center()
    }

    #[test]
    fn rows_join_keyed_groups_under_the_viewport() {
        let mut scene = Scene::new();
        let mut plot = configured::<Scatter>(&[]);
        drawn(&mut plot, &mut scene, points(&[(0.0, 0.0), (10.0, 10.0)]));

        let viewport = plot.viewport().unwrap();
        assert_eq!(scene.roots(), &[viewport]);
        assert_eq!(scene.children(viewport).len(), 2);
        // Marks are local to the plot area; the viewport adds the 20 px margins.
        let top_right = plot.row_node(&scene, 1).unwrap();
        assert!((center(&scene, top_right) - Point::new(380.0, 20.0)).hypot() < 1e-9);
        assert_eq!(plot.items_at(379.5, 20.5), [1]);
    }

    #[test]
    fn redraw_updates_kept_rows_and_removes_missing_ones() {
        let mut scene = Scene::new();
        let mut plot = configured::<Scatter>(&[]);
        drawn(
            &mut plot,
            &mut scene,
            points(&[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]),
        );
        let row0 = plot.row_node(&scene, 0).unwrap();
        assert!(plot.row_node(&scene, 2).is_some());

        drawn(&mut plot, &mut scene, points(&[(0.0, 10.0), (10.0, 0.0)]));
        assert_eq!(plot.row_node(&scene, 0), Some(row0), "kept rows keep their node");
        assert!((center(&scene, row0) - Point::new(20.0, 20.0)).hypot() < 1e-9);
        assert!(plot.row_node(&scene, 2).is_none());
        assert_eq!(scene.children(plot.viewport().unwrap()).len(), 2);
    }

    #[test]
    fn rows_without_position_get_no_group() {
        let data: SharedData = Arc::new(
            Table::new(3, 1)
                .with_row_info("pos", ["1", "?", "3"])
                .with_col_info("name", ["p"])
                .with_vals("v", [1.0, 2.0, 3.0]),
        );
        let mut scene = Scene::new();
        let mut plot =
            configured::<Manhattan>(&[("rows", SettingValue::List(vec!["pos".into()]))]);
        drawn(&mut plot, &mut scene, data);
        assert!(plot.row_node(&scene, 0).is_some());
        assert!(plot.row_node(&scene, 1).is_none());
        assert!(plot.row_node(&scene, 2).is_some());
    }

    #[test]
    fn highlight_raises_and_unhighlight_restores() {
        let mut scene = Scene::new();
        let mut plot = configured::<Scatter>(&[]);
        drawn(
            &mut plot,
            &mut scene,
            points(&[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]),
        );
        let viewport = plot.viewport().unwrap();
        let row0 = plot.row_node(&scene, 0).unwrap();
        let before = scene.world_bounds(row0);

        plot.highlight_item(&mut scene, 0).unwrap();
        assert_eq!(scene.children(viewport).last(), Some(&row0));
        assert_eq!(
            scene.flags(row0),
            Some(NodeFlags::VISIBLE | NodeFlags::HIGHLIGHTED)
        );
        let mark = scene.children(row0)[0];
        let Some(SceneNode {
            kind: plotstory_scene::NodeKind::Mark(m),
            ..
        }) = scene.get(mark)
        else {
            panic!("row groups hold marks");
        };
        assert_eq!(m.style().stroke_width, 2.0);

        plot.unhighlight_item(&mut scene, 0).unwrap();
        assert_eq!(scene.flags(row0), Some(NodeFlags::VISIBLE));
        assert_eq!(scene.world_bounds(row0), before);

        // Rows that were never drawn are ignored.
        plot.highlight_item(&mut scene, 99).unwrap();
    }

    #[test]
    fn heatmap_hover_grows_the_row_and_adds_a_border() {
        let data: SharedData = Arc::new(
            Table::new(13, 2)
                .with_col_info("name", ["a", "b"])
                .with_vals("v", (0..26).map(f64::from)),
        );
        let mut scene = Scene::new();
        let mut plot = configured::<Heatmap>(&[]);
        drawn(&mut plot, &mut scene, data);
        let row1 = plot.row_node(&scene, 1).unwrap();
        assert_eq!(scene.world_bounds(row1), Some(Rect::new(20.0, 40.0, 380.0, 60.0)));

        let mut hover = HoverState::new();
        let events = update_hover(&mut plot, &mut hover, &mut scene, 100.0, 50.0).unwrap();
        assert_eq!(events, [HoverEvent::Enter(1)]);
        // Two grown cells plus the border, 2 px outside the grown row.
        assert_eq!(scene.children(row1).len(), 3);
        assert_eq!(scene.world_bounds(row1), Some(Rect::new(18.0, 35.5, 382.0, 64.5)));

        let events = update_hover(&mut plot, &mut hover, &mut scene, 100.0, 10.0).unwrap();
        assert_eq!(events, [HoverEvent::Leave(1)]);
        assert_eq!(scene.children(row1).len(), 2);
    }

    #[test]
    fn empty_data_removes_the_viewport() {
        let mut scene = Scene::new();
        let mut plot = configured::<Scatter>(&[]);
        drawn(&mut plot, &mut scene, points(&[(0.0, 0.0), (1.0, 1.0)]));
        assert_eq!(scene.roots().len(), 1);
        drawn(&mut plot, &mut scene, points(&[]));
        assert!(scene.roots().is_empty());
        assert!(plot.viewport().is_none());
        assert!(plot.items_at(379.5, 20.5).is_empty());
    }

    #[test]
    fn svg_export_contains_every_row() {
        let mut scene = Scene::new();
        let mut plot = configured::<Scatter>(&[]);
        drawn(&mut plot, &mut scene, points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.5)]));
        let svg = scene.to_svg(400, 300);
        assert_eq!(svg.matches("<circle").count(), 3);
    }
}

// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immediate-mode backend: marks are painted onto a raster surface and forgotten.

use std::fmt;
use std::marker::PhantomData;

use kurbo::{Point, Rect};
use peniko::Color;
use plotstory_scene::Mark;
use tracing::Instrument;

use crate::hit_test::{PlotCore, Rejected};
use crate::data::SharedData;
use crate::draw::draw_yielding;
use crate::error::{DrawError, PluginError, SurfaceError};
use crate::kinds::PlotKind;
use crate::plugin::{DrawFuture, PlotState, VisualizationPlugin};
use crate::settings::SettingsResolver;

/// Something marks can be painted on, such as a canvas or an overlay layer.
pub trait RasterSurface {
    /// Erase everything.
    fn clear(&mut self);

    /// Paint one mark in surface coordinates.
    fn draw(&mut self, mark: &Mark) -> Result<(), SurfaceError>;
}

/// A small RGBA8 software surface.
///
/// Pixels are sampled at their centers and painted source-over without
/// anti-aliasing. Strokes are centered on the geometry.
#[derive(Clone, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Pixmap {
    /// A transparent pixmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Straight-alpha RGBA of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Row-major pixels.
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Pixel range covering `r`, clipped to the pixmap.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "values are clamped to the pixmap size first"
    )]
    fn span(&self, r: Rect) -> (core::ops::Range<u32>, core::ops::Range<u32>) {
        let clip = |v: f64, max: u32| v.clamp(0.0, f64::from(max)) as u32;
        (
            clip(r.x0.floor(), self.width)..clip(r.x1.ceil(), self.width),
            clip(r.y0.floor(), self.height)..clip(r.y1.ceil(), self.height),
        )
    }

    fn paint(&mut self, r: Rect, color: Color, mut inside: impl FnMut(Point) -> bool) {
        let (xs, ys) = self.span(r);
        for y in ys {
            for x in xs.clone() {
                if inside(Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5)) {
                    let i = y as usize * self.width as usize + x as usize;
                    self.pixels[i] = blend(self.pixels[i], color);
                }
            }
        }
    }
}

impl fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pixmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "channels are clamped to [0, 255] first"
)]
fn blend(dst: [u8; 4], src: Color) -> [u8; 4] {
    let [r, g, b, a] = src.components;
    let dst_a = f32::from(dst[3]) / 255.0;
    let out_a = a + dst_a * (1.0 - a);
    if out_a <= 0.0 {
        return [0; 4];
    }
    let channel = |s: f32, d: u8| {
        let d = f32::from(d) / 255.0;
        let c = (s * a + d * dst_a * (1.0 - a)) / out_a;
        (c.clamp(0.0, 1.0) * 255.0).round() as u8
    };
    [
        channel(r, dst[0]),
        channel(g, dst[1]),
        channel(b, dst[2]),
        (out_a.clamp(0.0, 1.0) * 255.0).round() as u8,
    ]
}

impl RasterSurface for Pixmap {
    fn clear(&mut self) {
        self.pixels.fill([0; 4]);
    }

    fn draw(&mut self, mark: &Mark) -> Result<(), SurfaceError> {
        if !mark.is_finite() {
            return Err(SurfaceError::NonFinite);
        }
        let style = *mark.style();
        let half = 0.5 * style.stroke_width;
        match *mark {
            Mark::Circle { center, radius, .. } => {
                let bounds = mark.bounds();
                if let Some(fill) = style.fill {
                    self.paint(bounds, fill, |p| p.distance(center) <= radius);
                }
                if let Some(stroke) = style.visible_stroke() {
                    self.paint(bounds.inflate(half, half), stroke, |p| {
                        (p.distance(center) - radius).abs() <= half
                    });
                }
            }
            Mark::Rect { rect, .. } => {
                let rect = rect.abs();
                if let Some(fill) = style.fill {
                    self.paint(rect, fill, |p| rect.contains(p));
                }
                if let Some(stroke) = style.visible_stroke() {
                    let outer = rect.inflate(half, half);
                    let inner = rect.inflate(-half, -half);
                    self.paint(outer, stroke, |p| outer.contains(p) && !inner.contains(p));
                }
            }
        }
        Ok(())
    }
}

/// A plot of kind `K` painted in immediate mode.
///
/// Every [`end_draw`](VisualizationPlugin::end_draw) clears the surface and
/// repaints every row. Highlighting paints the highlight marks on whatever
/// surface the host passes, usually an overlay it clears itself, so
/// unhighlighting has nothing to undo.
pub struct RasterPlot<K> {
    state: PlotState,
    _kind: PhantomData<fn() -> K>,
}

impl<K: PlotKind> RasterPlot<K> {
    /// An unconfigured plot.
    pub fn new() -> Self {
        Self {
            state: PlotState::default(),
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
}

impl<K: PlotKind> Default for RasterPlot<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PlotKind> fmt::Debug for RasterPlot<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterPlot")
            .field("kind", &K::NAME)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<K: PlotKind + 'static> VisualizationPlugin for RasterPlot<K> {
    type Surface = dyn RasterSurface;

    fn name(&self) -> &'static str {
        K::NAME
    }

    fn configure(&mut self, resolver: &dyn SettingsResolver) -> Result<(), PluginError> {
        let _span = tracing::debug_span!("configure", kind = K::NAME, backend = "raster").entered();
        self.state.configure::<K>(resolver)
    }

    fn set_data(&mut self, data: SharedData) {
        self.state.set_data(data);
    }

    fn begin_draw(&mut self) -> Result<(), PluginError> {
        let _span =
            tracing::debug_span!("begin_draw", kind = K::NAME, backend = "raster").entered();
        self.state.begin_draw::<K>()
    }

    fn end_draw<'a>(&'a mut self, surface: &'a mut Self::Surface) -> DrawFuture<'a> {
        let span = tracing::debug_span!("end_draw", kind = K::NAME, backend = "raster");
        Box::pin(
            async move {
                let Some(pass) = self.state.pass()? else {
                    surface.clear();
                    return Ok(());
                };
                surface.clear();
                let drawn = draw_yielding(0..pass.data.nrows(), |_, row| {
                    let Some(layout) = K::layout(pass.config, pass.data, pass.transform, row)
                    else {
                        return Ok(());
                    };
                    for mark in &layout.marks {
                        surface.draw(mark)?;
                    }
                    tracing::trace!(row, marks = layout.marks.len(), "row painted");
                    Ok(())
                })
                .await
                .map_err(|f| DrawError::StepFailed {
                    item: f.index,
                    source: f.error,
                })?;
                tracing::debug!(rows = drawn, "pass painted");
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

    fn highlight_item(
        &mut self,
        surface: &mut Self::Surface,
        row: usize,
    ) -> Result<(), PluginError> {
        let Some(pass) = self.state.pass()? else {
            return Ok(());
        };
        for mark in K::highlight(pass.config, pass.data, pass.transform, row) {
            surface.draw(&mark)?;
        }
        tracing::trace!(kind = K::NAME, row, "row highlighted");
        Ok(())
    }

    fn unhighlight_item(
        &mut self,
        _surface: &mut Self::Surface,
        _row: usize,
    ) -> Result<(), PluginError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Table;
    use crate::hover::{HoverEvent, HoverState};
    use crate::kinds::{Heatmap, Scatter};
    use crate::plugin::update_hover;
    use crate::settings::SettingValue;
    use futures_lite::future::block_on;
    use plotstory_scene::ItemStyle;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    /// Records marks and fails on the `fail_at`-th one.
    #[derive(Default)]
    struct FlakySurface {
        drawn: Vec<Mark>,
        fail_at: Option<usize>,
    }

    impl RasterSurface for FlakySurface {
        fn clear(&mut self) {
            self.drawn.clear();
        }

        fn draw(&mut self, mark: &Mark) -> Result<(), SurfaceError> {
            if self.fail_at == Some(self.drawn.len()) {
                return Err(SurfaceError::Backend("device lost".into()));
            }
            self.drawn.push(*mark);
            Ok(())
        }
    }

    fn diagonal(n: usize) -> SharedData {
        #[allow(clippy::cast_precision_loss, reason = "small test sizes")]
        let vals = (0..n).flat_map(|i| [i as f64, i as f64]);
        Arc::new(
            Table::new(n, 2)
                .with_col_info("name", ["x", "y"])
                .with_vals("v", vals),
        )
    }

    fn scatter(data: SharedData) -> RasterPlot<Scatter> {
        let mut plot = RasterPlot::<Scatter>::new();
        plot.configure(&BTreeMap::<String, SettingValue>::new())
            .unwrap();
        plot.set_data(data);
        plot.begin_draw().unwrap();
        plot
    }

    #[test]
    fn pixmap_paints_circles_with_a_stroke_ring() {
        let mut pm = Pixmap::new(20, 20);
        let red = Color::from_rgba8(255, 0, 0, 255);
        let black = Color::from_rgba8(0, 0, 0, 255);
        pm.draw(&Mark::Circle {
            center: Point::new(10.0, 10.0),
            radius: 6.0,
            style: ItemStyle::filled(red).with_stroke(black, 2.0),
        })
        .unwrap();
        assert_eq!(pm.pixel(10, 10), Some([255, 0, 0, 255]));
        // Pixel center (15.5, 10.5) is ~5.5 from the center: on the ring.
        assert_eq!(pm.pixel(15, 10), Some([0, 0, 0, 255]));
        assert_eq!(pm.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(pm.pixel(20, 0), None);

        pm.clear();
        assert!(pm.pixels().iter().all(|p| *p == [0; 4]));
    }

    #[test]
    fn pixmap_clips_rects_and_rejects_non_finite_marks() {
        let mut pm = Pixmap::new(8, 8);
        let blue = Color::from_rgba8(0, 0, 255, 255);
        pm.draw(&Mark::Rect {
            rect: Rect::new(-10.0, 4.0, 100.0, 100.0),
            style: ItemStyle::filled(blue),
        })
        .unwrap();
        assert_eq!(pm.pixel(0, 7), Some([0, 0, 255, 255]));
        assert_eq!(pm.pixel(0, 3), Some([0, 0, 0, 0]));

        let err = pm.draw(&Mark::Circle {
            center: Point::new(f64::NAN, 1.0),
            radius: 1.0,
            style: ItemStyle::filled(blue),
        });
        assert_eq!(err, Err(SurfaceError::NonFinite));
    }

    #[test]
    fn half_transparent_paint_blends() {
        let mut pm = Pixmap::new(1, 1);
        let style = ItemStyle::filled(Color::from_rgba8(255, 255, 255, 255));
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0);
        pm.draw(&Mark::Rect { rect, style }).unwrap();
        pm.draw(&Mark::Rect {
            rect,
            style: ItemStyle::filled(Color::from_rgba8(0, 0, 0, 128)),
        })
        .unwrap();
        let [r, g, b, a] = pm.pixel(0, 0).unwrap();
        assert_eq!(a, 255);
        assert!(r == g && g == b && (126..=128).contains(&r), "got {r}");
    }

    #[test]
    fn a_failing_row_fails_the_whole_pass() {
        let mut plot = scatter(diagonal(50));
        let mut surface = FlakySurface {
            fail_at: Some(17),
            ..FlakySurface::default()
        };
        let result = block_on(plot.end_draw(&mut surface));
        assert_eq!(
            result,
            Err(PluginError::Draw(DrawError::StepFailed {
                item: 17,
                source: SurfaceError::Backend("device lost".into()),
            }))
        );
        assert_eq!(surface.drawn.len(), 17, "no row is painted after the failure");

        let mut surface = FlakySurface::default();
        assert_eq!(block_on(plot.end_draw(&mut surface)), Ok(()));
        assert_eq!(surface.drawn.len(), 50);
    }

    #[test]
    fn end_draw_paints_rows_on_a_pixmap() {
        // Default 400 × 300 surface, 20 px margins; (1, 1) maps to the top right corner.
        let mut plot = scatter(diagonal(2));
        let mut pm = Pixmap::new(400, 300);
        block_on(plot.end_draw(&mut pm)).unwrap();
        assert_eq!(pm.pixel(380, 20), Some([0xff, 0x65, 0x20, 0xff]));
        assert_eq!(pm.pixel(200, 150), Some([0; 4]));
        assert_eq!(plot.items_at(379.5, 20.5), [1]);
        assert_eq!(plot.top_item_at(20.5, 279.5), Some(0));
    }

    #[test]
    fn unconfigured_plots_refuse_to_draw() {
        let mut plot = RasterPlot::<Heatmap>::new();
        assert_eq!(plot.begin_draw(), Err(PluginError::NotConfigured));
        let mut pm = Pixmap::new(4, 4);
        assert_eq!(block_on(plot.end_draw(&mut pm)), Err(PluginError::NotConfigured));
        assert!(plot.items_at(1.0, 1.0).is_empty());
    }

    #[test]
    fn empty_data_clears_the_surface_and_the_index() {
        let mut plot = scatter(diagonal(2));
        assert_eq!(plot.items_at(379.5, 20.5), [1]);
        plot.set_data(Arc::new(Table::new(0, 2).with_col_info("name", ["x", "y"])));
        plot.begin_draw().unwrap();
        let mut surface = FlakySurface::default();
        surface.drawn.push(Mark::Rect {
            rect: Rect::ZERO,
            style: ItemStyle::filled(Color::BLACK),
        });
        block_on(plot.end_draw(&mut surface)).unwrap();
        assert!(surface.drawn.is_empty());
        assert!(plot.items_at(379.5, 20.5).is_empty());
    }

    #[test]
    fn new_data_waits_for_the_next_pass() {
        let mut plot = scatter(diagonal(2));
        plot.set_data(diagonal(5));

        let mut surface = FlakySurface::default();
        block_on(plot.end_draw(&mut surface)).unwrap();
        assert_eq!(surface.drawn.len(), 2, "only the indexed rows are painted");
        assert_eq!(plot.items_at(379.5, 20.5), [1]);

        let mut overlay = FlakySurface::default();
        plot.highlight_item(&mut overlay, 4).unwrap();
        assert!(overlay.drawn.is_empty(), "row 4 is not part of the published pass");

        plot.begin_draw().unwrap();
        block_on(plot.end_draw(&mut surface)).unwrap();
        assert_eq!(surface.drawn.len(), 5);
        // Rows 0..=4 now span the plot area; row 2 sits in its middle.
        assert_eq!(plot.items_at(200.0, 150.0), [2]);
    }

    #[test]
    fn failed_highlight_leaves_the_hover_unchanged() {
        let mut plot = scatter(diagonal(2));
        let mut overlay = FlakySurface {
            fail_at: Some(0),
            ..FlakySurface::default()
        };
        let mut hover = HoverState::new();
        let result = update_hover(&mut plot, &mut hover, &mut overlay, 379.5, 20.5);
        assert_eq!(
            result,
            Err(PluginError::Surface(SurfaceError::Backend(
                "device lost".into()
            )))
        );
        assert!(hover.current().is_empty());

        overlay.fail_at = None;
        let events = update_hover(&mut plot, &mut hover, &mut overlay, 379.5, 20.5).unwrap();
        assert_eq!(events, [HoverEvent::Enter(1)]);
        assert_eq!(hover.current(), &[1]);
    }

    #[test]
    fn hover_paints_highlights_on_the_overlay() {
        let mut plot = scatter(diagonal(2));
        let mut overlay = FlakySurface::default();
        let mut hover = HoverState::new();
        let events = update_hover(&mut plot, &mut hover, &mut overlay, 379.5, 20.5).unwrap();
        assert_eq!(events, [HoverEvent::Enter(1)]);
        assert_eq!(overlay.drawn.len(), 1);
        assert_eq!(overlay.drawn[0].style().stroke_width, 2.0);

        let events = update_hover(&mut plot, &mut hover, &mut overlay, 200.0, 150.0).unwrap();
        assert_eq!(events, [HoverEvent::Leave(1)]);
    }
}

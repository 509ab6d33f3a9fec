// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scale-then-translate pipeline.

use kurbo::{Affine, Point, Vec2};

use crate::scale::{Scale, SharedScale};

/// One step of a [`CoordinateTransform`], in application order.
#[derive(Copy, Clone, Debug)]
pub enum TransformStep<'a> {
    /// Per-axis scaling; always the first step.
    Scale {
        /// Horizontal scale.
        x: &'a SharedScale,
        /// Vertical scale.
        y: &'a SharedScale,
    },
    /// Constant offset added after scaling.
    Translate(Vec2),
}

/// Maps data-space points to screen space: per-axis scales first, then translations.
///
/// The only way to start a transform is [`CoordinateTransform::scale`], and
/// [`CoordinateTransform::translate`] only appends, so a translation can never
/// run before the scales.
///
/// ```
/// use kurbo::{Point, Vec2};
/// use plotstory_transform::CoordinateTransform;
///
/// let t = CoordinateTransform::scale(|v: f64| 2.0 * v, |v: f64| 3.0 * v)
///     .translate(Vec2::new(10.0, 20.0));
/// assert_eq!(t.calc(Point::new(5.0, 5.0)), Point::new(20.0, 35.0));
/// ```
#[derive(Clone, Debug)]
pub struct CoordinateTransform {
    x: SharedScale,
    y: SharedScale,
    translations: Vec<Vec2>,
}

impl CoordinateTransform {
    /// Start a transform with the given per-axis scales.
    pub fn scale(
        x: impl Scale + Send + Sync + 'static,
        y: impl Scale + Send + Sync + 'static,
    ) -> Self {
        Self::scale_shared(SharedScale::new(x), SharedScale::new(y))
    }

    /// Start a transform from scales that may be shared with other transforms.
    pub fn scale_shared(x: SharedScale, y: SharedScale) -> Self {
        Self {
            x,
            y,
            translations: Vec::new(),
        }
    }

    /// Append a translation step.
    #[must_use]
    pub fn translate(mut self, offset: impl Into<Vec2>) -> Self {
        self.translations.push(offset.into());
        self
    }

    /// Map a data-space point to screen space.
    pub fn calc(&self, p: impl Into<Point>) -> Point {
        let p = p.into();
        Point::new(self.x.apply(p.x), self.y.apply(p.y)) + self.translation()
    }

    /// Map a screen-space point back to data space, when both scales are invertible.
    pub fn invert(&self, p: impl Into<Point>) -> Option<Point> {
        let p = p.into() - self.translation();
        Some(Point::new(self.x.invert(p.x)?, self.y.invert(p.y)?))
    }

    /// Sum of all translation steps.
    pub fn translation(&self) -> Vec2 {
        self.translations.iter().fold(Vec2::ZERO, |acc, t| acc + *t)
    }

    /// The same scales without any translation steps.
    pub fn without_translation(&self) -> Self {
        Self::scale_shared(self.x.clone(), self.y.clone())
    }

    /// Horizontal scale.
    pub fn x_scale(&self) -> &SharedScale {
        &self.x
    }

    /// Vertical scale.
    pub fn y_scale(&self) -> &SharedScale {
        &self.y
    }

    /// The steps in application order.
    pub fn steps(&self) -> impl Iterator<Item = TransformStep<'_>> + '_ {
        core::iter::once(TransformStep::Scale {
            x: &self.x,
            y: &self.y,
        })
        .chain(self.translations.iter().copied().map(TransformStep::Translate))
    }

    /// The whole pipeline as an [`Affine`], when both scales are linear.
    pub fn affine(&self) -> Option<Affine> {
        let (ax, bx) = self.x.linear()?;
        let (ay, by) = self.y.linear()?;
        let t = self.translation();
        Some(Affine::new([ax, 0.0, 0.0, ay, bx + t.x, by + t.y]))
    }
}

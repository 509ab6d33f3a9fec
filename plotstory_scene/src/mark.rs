// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend-agnostic drawing primitives.

use kurbo::{Point, Rect};
use peniko::Color;

/// Fill and stroke of a mark.
#[derive(Copy, Clone, Debug)]
pub struct ItemStyle {
    /// Interior color; `None` leaves the interior unpainted.
    pub fill: Option<Color>,
    /// Outline color; `None` or a zero width draws no outline.
    pub stroke: Option<Color>,
    /// Outline width in pixels.
    pub stroke_width: f64,
}

impl ItemStyle {
    /// Fill only.
    pub const fn filled(fill: Color) -> Self {
        Self {
            fill: Some(fill),
            stroke: None,
            stroke_width: 0.0,
        }
    }

    /// Outline only.
    pub const fn outlined(stroke: Color, stroke_width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke),
            stroke_width,
        }
    }

    /// Builder-style outline setter.
    #[must_use]
    pub const fn with_stroke(mut self, stroke: Color, stroke_width: f64) -> Self {
        self.stroke = Some(stroke);
        self.stroke_width = stroke_width;
        self
    }

    /// Builder-style fill setter.
    #[must_use]
    pub const fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    /// The outline color, if the outline has a positive width.
    pub fn visible_stroke(&self) -> Option<Color> {
        self.stroke.filter(|_| self.stroke_width > 0.0)
    }
}

/// A shape drawn for one item, in the coordinate space of whoever draws it.
#[derive(Copy, Clone, Debug)]
pub enum Mark {
    /// Circle around `center`.
    Circle {
        /// Center point.
        center: Point,
        /// Radius.
        radius: f64,
        /// Paint.
        style: ItemStyle,
    },
    /// Axis-aligned rectangle.
    Rect {
        /// Geometry.
        rect: Rect,
        /// Paint.
        style: ItemStyle,
    },
}

impl Mark {
    /// Geometric bounds, ignoring stroke width.
    pub fn bounds(&self) -> Rect {
        match *self {
            Self::Circle { center, radius, .. } => Rect::new(
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            ),
            Self::Rect { rect, .. } => rect.abs(),
        }
    }

    /// Paint of the mark.
    pub fn style(&self) -> &ItemStyle {
        match self {
            Self::Circle { style, .. } | Self::Rect { style, .. } => style,
        }
    }

    /// Whether every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        match *self {
            Self::Circle { center, radius, .. } => center.is_finite() && radius.is_finite(),
            Self::Rect { rect, .. } => rect.is_finite(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_bounds_are_centered() {
        let m = Mark::Circle {
            center: Point::new(10.0, 20.0),
            radius: 3.0,
            style: ItemStyle::filled(Color::BLACK),
        };
        assert_eq!(m.bounds(), Rect::new(7.0, 17.0, 13.0, 23.0));
        assert!(m.is_finite());
    }

    #[test]
    fn rect_bounds_are_normalized() {
        let m = Mark::Rect {
            rect: Rect::new(10.0, 10.0, 0.0, 0.0),
            style: ItemStyle::outlined(Color::BLACK, 1.0),
        };
        assert_eq!(m.bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn zero_width_stroke_is_not_drawn() {
        let s = ItemStyle::filled(Color::WHITE).with_stroke(Color::BLACK, 0.0);
        assert!(s.visible_stroke().is_none());
        assert!(s.with_stroke(Color::BLACK, 2.0).visible_stroke().is_some());
    }

    #[test]
    fn nan_geometry_is_reported() {
        let m = Mark::Circle {
            center: Point::new(f64::NAN, 0.0),
            radius: 1.0,
            style: ItemStyle::filled(Color::BLACK),
        };
        assert!(!m.is_finite());
    }
}

// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt::Debug;

/// Axis-aligned bounding box in 2D.
///
/// Containment is half-open: a box covers `[min_x, max_x) × [min_y, max_y)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Scalar> Aabb2D<T> {
    /// Create an AABB from origin and size.
    pub fn from_xywh(x: T, y: T, w: T, h: T) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: T::add(x, w),
            max_y: T::add(y, h),
        }
    }

    /// Width of the box (may be negative for inverted boxes).
    pub fn width(&self) -> T {
        T::sub(self.max_x, self.min_x)
    }

    /// Height of the box (may be negative for inverted boxes).
    pub fn height(&self) -> T {
        T::sub(self.max_y, self.min_y)
    }

    /// Split into four equal quadrants: top-left, top-right, bottom-left, bottom-right.
    pub fn quadrants(&self) -> [Self; 4] {
        let mx = T::mid(self.min_x, self.max_x);
        let my = T::mid(self.min_y, self.max_y);
        [
            Self::new(self.min_x, self.min_y, mx, my),
            Self::new(mx, self.min_y, self.max_x, my),
            Self::new(self.min_x, my, mx, self.max_y),
            Self::new(mx, my, self.max_x, self.max_y),
        ]
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Whether the point lies in `[min_x, max_x) × [min_y, max_y)`.
    pub fn contains_point(&self, x: T, y: T) -> bool {
        le(self.min_x, x) && le(self.min_y, y) && lt(x, self.max_x) && lt(y, self.max_y)
    }

    /// Whether `other` lies wholly inside this box.
    ///
    /// A degenerate `other` is inside when its position is, so it is never claimed
    /// by a box whose max edge it sits on.
    pub fn contains_aabb(&self, other: &Self) -> bool {
        span_contains(self.min_x, self.max_x, other.min_x, other.max_x)
            && span_contains(self.min_y, self.max_y, other.min_y, other.max_y)
    }

    /// Whether the two boxes share any point.
    ///
    /// A degenerate `other` (zero width or height) overlaps when it sits strictly
    /// inside, or on the min edge of, this box.
    pub fn overlaps(&self, other: &Self) -> bool {
        span_overlaps(self.min_x, self.max_x, other.min_x, other.max_x)
            && span_overlaps(self.min_y, self.max_y, other.min_y, other.max_y)
    }

    /// The intersection of two AABBs.
    pub fn intersect(&self, other: &Self) -> Self {
        let min_x = max_t(self.min_x, other.min_x);
        let min_y = max_t(self.min_y, other.min_y);
        let max_x = min_t(self.max_x, other.max_x);
        let max_y = min_t(self.max_y, other.max_y);
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Return true if the AABB has no area (zero-size or inverted on either axis).
    /// Comparisons involving NaN count as empty.
    pub fn is_empty(&self) -> bool {
        !lt(self.min_x, self.max_x) || !lt(self.min_y, self.max_y)
    }
}

/// Numeric scalar abstraction for the quad-tree.
///
/// Provides the handful of operations needed to split regions and compare sizes.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// Midpoint between a and b (used for quadrant splits).
    fn mid(a: Self, b: Self) -> Self;

    /// Multiply by a ratio in `[0, 1]`, rounding toward zero for integers.
    fn scale_by(v: Self, ratio: f64) -> Self;
}

impl Scalar for f32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }

    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "ratios are small fractions; f32 precision suffices"
    )]
    fn scale_by(v: Self, ratio: f64) -> Self {
        (f64::from(v) * ratio) as Self
    }
}

impl Scalar for f64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }

    #[inline]
    fn scale_by(v: Self, ratio: f64) -> Self {
        v * ratio
    }
}

impl Scalar for i64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Average without overflow: (a & b) + ((a ^ b) >> 1)
        (a & b) + ((a ^ b) >> 1)
    }

    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "truncation toward zero is the intended rounding"
    )]
    fn scale_by(v: Self, ratio: f64) -> Self {
        (v as f64 * ratio) as Self
    }
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}

fn span_contains<T: PartialOrd + Copy>(lo: T, hi: T, min: T, max: T) -> bool {
    if lt(min, max) {
        le(lo, min) && le(max, hi)
    } else {
        le(lo, min) && lt(min, hi)
    }
}

// Half-open span `[lo, hi)` against `[min, max)`; an empty `[min, max)` is treated as
// the point `min`.
fn span_overlaps<T: PartialOrd + Copy>(lo: T, hi: T, min: T, max: T) -> bool {
    if lt(min, max) {
        lt(lo, max) && lt(min, hi)
    } else {
        le(lo, min) && lt(min, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_half_open() {
        let a = Aabb2D::from_xywh(0.0, 0.0, 10.0, 10.0);
        assert!(a.contains_point(0.0, 0.0), "min corner is inside");
        assert!(a.contains_point(9.999, 9.999), "interior is inside");
        assert!(!a.contains_point(10.0, 5.0), "max x edge is outside");
        assert!(!a.contains_point(5.0, 10.0), "max y edge is outside");
    }

    #[test]
    fn quadrants_tile_the_box() {
        let q = Aabb2D::from_xywh(0_i64, 0, 10, 20).quadrants();
        assert_eq!(q[0], Aabb2D::new(0, 0, 5, 10));
        assert_eq!(q[1], Aabb2D::new(5, 0, 10, 10));
        assert_eq!(q[2], Aabb2D::new(0, 10, 5, 20));
        assert_eq!(q[3], Aabb2D::new(5, 10, 10, 20));
    }

    #[test]
    fn overlap_rules() {
        let r = Aabb2D::from_xywh(0.0, 0.0, 100.0, 100.0);
        assert!(r.overlaps(&Aabb2D::from_xywh(95.0, 95.0, 10.0, 10.0)));
        assert!(r.overlaps(&Aabb2D::from_xywh(50.0, 50.0, 0.0, 0.0)));
        assert!(!r.overlaps(&Aabb2D::from_xywh(100.0, 0.0, 10.0, 10.0)));
        assert!(!r.overlaps(&Aabb2D::from_xywh(-10.0, 0.0, 10.0, 10.0)));
        assert!(!r.overlaps(&Aabb2D::from_xywh(200.0, 200.0, 10.0, 10.0)));
    }

    #[test]
    fn degenerate_boxes_belong_to_the_quadrant_they_sit_in() {
        let q = Aabb2D::from_xywh(0.0, 0.0, 100.0, 100.0).quadrants();
        let p = Aabb2D::from_xywh(50.0, 10.0, 0.0, 0.0);
        assert!(!q[0].contains_aabb(&p), "max edge does not claim a point");
        assert!(q[1].contains_aabb(&p));
        assert!(q[0].contains_aabb(&Aabb2D::from_xywh(40.0, 40.0, 10.0, 10.0)));
    }

    #[test]
    fn empty_and_extent() {
        let a = Aabb2D::from_xywh(1.0_f32, 2.0, 3.0, 0.0);
        assert!(a.is_empty(), "zero height has no area");
        assert_eq!(a.width(), 3.0);
        assert!(!Aabb2D::from_xywh(0_i64, 0, 1, 1).is_empty());
    }

    #[test]
    fn scale_by_rounds_integers_down() {
        assert_eq!(i64::scale_by(1000, 0.015), 15);
        assert_eq!(f64::scale_by(200.0, 0.5), 100.0);
    }
}

// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=plotstory_transform --heading-base-level=0

//! Plotstory Transform: map data-space points to screen space.
//!
//! A [`CoordinateTransform`] applies one scale function per axis and then any
//! number of translations (typically the plot margins):
//!
//! ```text
//! calc(p) = (x_scale(p.x) + Σ tx, y_scale(p.y) + Σ ty)
//! ```
//!
//! Scale functions are anything implementing [`Scale`]: plain `Fn(f64) -> f64`
//! closures, or the concrete [`LinearScale`], [`LogScale`], and [`BandScale`].
//! Concrete scales also report their inverse, which lets pointer positions be
//! mapped back into data space, and linear pipelines collapse into a
//! [`kurbo::Affine`].
//!
//! ```rust
//! use kurbo::Point;
//! use plotstory_transform::{CoordinateTransform, LinearScale};
//!
//! // Data x in [0, 10] spans a 200 px wide plot; data y in [0, 1] spans 100 px, growing up.
//! let t = CoordinateTransform::scale(
//!     LinearScale::new([0.0, 10.0], [0.0, 200.0]),
//!     LinearScale::new([0.0, 1.0], [100.0, 0.0]),
//! )
//! .translate((20.0, 10.0));
//!
//! assert_eq!(t.calc(Point::new(5.0, 0.5)), Point::new(120.0, 60.0));
//! assert_eq!(t.invert(Point::new(120.0, 60.0)), Some(Point::new(5.0, 0.5)));
//! ```
//!
//! With the `serde` feature, [`ScaleSpec`] describes a scale declaratively.

pub mod scale;
pub mod transform;

#[cfg(feature = "serde")]
pub use scale::ScaleSpec;
pub use scale::{BandScale, LinearScale, LogScale, Scale, SharedScale};
pub use transform::{CoordinateTransform, TransformStep};

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Vec2};

    #[test]
    fn doubling_tripling_and_offset() {
        let t = CoordinateTransform::scale(|v: f64| 2.0 * v, |v: f64| 3.0 * v)
            .translate(Vec2::new(10.0, 20.0));
        assert_eq!(t.calc(Point::new(5.0, 5.0)), Point::new(20.0, 35.0));
    }

    #[test]
    fn composition_matches_scales_plus_offsets() {
        let xs = LinearScale::new([-1.0, 1.0], [0.0, 50.0]);
        let ys = LogScale::new([1.0, 100.0], [80.0, 0.0]);
        let t = CoordinateTransform::scale(xs, ys)
            .translate((3.0, 4.0))
            .translate((-1.0, 0.5));
        for p in [Point::new(0.0, 10.0), Point::new(-1.0, 1.0), Point::new(0.25, 50.0)] {
            let expected = Point::new(xs.apply(p.x) + 2.0, ys.apply(p.y) + 4.5);
            assert_eq!(t.calc(p), expected);
        }
    }

    #[test]
    fn one_scale_shared_by_two_transforms() {
        let shared = SharedScale::new(BandScale::new(10, [0.0, 100.0]));
        let a = CoordinateTransform::scale_shared(shared.clone(), SharedScale::new(|v: f64| v));
        let b = CoordinateTransform::scale_shared(shared, SharedScale::new(|v: f64| -v))
            .translate((0.0, 7.0));
        assert_eq!(a.calc((3.0, 1.0)).x, b.calc((3.0, 1.0)).x);
    }
}

// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-axis scale functions.

use std::fmt;
use std::sync::Arc;

/// A function mapping one axis of data space to screen space.
///
/// Any `Fn(f64) -> f64` closure is a scale. Concrete scales can additionally
/// report an inverse and, when they are affine, their coefficients.
pub trait Scale {
    /// Map a data value to a screen coordinate.
    fn apply(&self, v: f64) -> f64;

    /// Map a screen coordinate back to a data value, when the scale is invertible.
    fn invert(&self, _v: f64) -> Option<f64> {
        None
    }

    /// `Some((factor, offset))` when `apply(v) == factor * v + offset` for every `v`.
    fn linear(&self) -> Option<(f64, f64)> {
        None
    }
}

impl<F: Fn(f64) -> f64> Scale for F {
    fn apply(&self, v: f64) -> f64 {
        self(v)
    }
}

/// Reference-counted scale, shareable between visualizations that share an axis.
#[derive(Clone)]
pub struct SharedScale(Arc<dyn Scale + Send + Sync>);

impl SharedScale {
    /// Wrap a scale.
    pub fn new(scale: impl Scale + Send + Sync + 'static) -> Self {
        Self(Arc::new(scale))
    }

    /// Whether both handles point at the same scale.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Scale for SharedScale {
    fn apply(&self, v: f64) -> f64 {
        self.0.apply(v)
    }

    fn invert(&self, v: f64) -> Option<f64> {
        self.0.invert(v)
    }

    fn linear(&self) -> Option<(f64, f64)> {
        self.0.linear()
    }
}

impl fmt::Debug for SharedScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedScale")
            .field("linear", &self.0.linear())
            .finish_non_exhaustive()
    }
}

/// Affine map from `domain` onto `range`.
///
/// A degenerate domain (both ends equal) maps everything to the middle of the range.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearScale {
    /// Input interval.
    pub domain: [f64; 2],
    /// Output interval. May be reversed (e.g. for a y axis growing downward).
    pub range: [f64; 2],
}

impl LinearScale {
    /// Create a linear scale.
    pub const fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    fn coefficients(&self) -> (f64, f64) {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if d1 == d0 {
            return (0.0, 0.5 * (r0 + r1));
        }
        let factor = (r1 - r0) / (d1 - d0);
        (factor, r0 - factor * d0)
    }
}

impl Scale for LinearScale {
    fn apply(&self, v: f64) -> f64 {
        let (factor, offset) = self.coefficients();
        factor * v + offset
    }

    fn invert(&self, v: f64) -> Option<f64> {
        let (factor, offset) = self.coefficients();
        (factor != 0.0).then(|| (v - offset) / factor)
    }

    fn linear(&self) -> Option<(f64, f64)> {
        Some(self.coefficients())
    }
}

/// Logarithmic map from a strictly positive `domain` onto `range`.
///
/// Non-positive inputs map to NaN.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogScale {
    /// Input interval; both ends must be positive.
    pub domain: [f64; 2],
    /// Output interval.
    pub range: [f64; 2],
}

impl LogScale {
    /// Create a logarithmic scale.
    pub const fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    fn log_domain(&self) -> (f64, f64) {
        (self.domain[0].ln(), self.domain[1].ln())
    }
}

impl Scale for LogScale {
    fn apply(&self, v: f64) -> f64 {
        if v <= 0.0 {
            return f64::NAN;
        }
        let (l0, l1) = self.log_domain();
        let [r0, r1] = self.range;
        if l1 == l0 {
            return 0.5 * (r0 + r1);
        }
        r0 + (v.ln() - l0) / (l1 - l0) * (r1 - r0)
    }

    fn invert(&self, v: f64) -> Option<f64> {
        let (l0, l1) = self.log_domain();
        let [r0, r1] = self.range;
        if r1 == r0 || !l0.is_finite() || !l1.is_finite() {
            return None;
        }
        Some((l0 + (v - r0) / (r1 - r0) * (l1 - l0)).exp())
    }
}

/// Ordinal banding: splits `range` into `count` equal bands.
///
/// `padding` is the fraction of each step left empty, split evenly between the
/// outer edges. An index `i` maps to the start of band `i`; fractional indices
/// interpolate, so `apply(count)` is the end of `range`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BandScale {
    /// Number of bands.
    pub count: usize,
    /// Output interval.
    pub range: [f64; 2],
    /// Fraction of a step reserved for padding, in `[0, 1)`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub padding: f64,
}

impl BandScale {
    /// Create an unpadded band scale.
    pub const fn new(count: usize, range: [f64; 2]) -> Self {
        Self {
            count,
            range,
            padding: 0.0,
        }
    }

    /// Builder-style padding setter.
    #[must_use]
    pub const fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Distance between the starts of two consecutive bands.
    pub fn step(&self) -> f64 {
        let [r0, r1] = self.range;
        (r1 - r0) / (self.count as f64 + self.padding).max(1.0)
    }

    /// Width of one band.
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    fn start(&self) -> f64 {
        self.range[0] + self.step() * self.padding
    }
}

impl Scale for BandScale {
    fn apply(&self, v: f64) -> f64 {
        self.start() + self.step() * v
    }

    fn invert(&self, v: f64) -> Option<f64> {
        let step = self.step();
        (step != 0.0).then(|| (v - self.start()) / step)
    }

    fn linear(&self) -> Option<(f64, f64)> {
        Some((self.step(), self.start()))
    }
}

/// Declarative description of a scale, e.g. from a settings file.
///
/// ```
/// # use plotstory_transform::{Scale, ScaleSpec};
/// let spec: ScaleSpec =
///     serde_json::from_str(r#"{"type": "linear", "domain": [0, 10], "range": [0, 100]}"#).unwrap();
/// assert_eq!(spec.build().apply(5.0), 50.0);
/// ```
#[cfg(feature = "serde")]
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScaleSpec {
    /// See [`LinearScale`].
    Linear(LinearScale),
    /// See [`LogScale`].
    Log(LogScale),
    /// See [`BandScale`].
    Band(BandScale),
}

#[cfg(feature = "serde")]
impl ScaleSpec {
    /// Instantiate the described scale.
    pub fn build(&self) -> SharedScale {
        match *self {
            Self::Linear(s) => SharedScale::new(s),
            Self::Log(s) => SharedScale::new(s),
            Self::Band(s) => SharedScale::new(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_scales() {
        let s = |v: f64| v * 2.0;
        assert_eq!(s.apply(4.0), 8.0);
        assert!(s.linear().is_none());
        assert!(s.invert(8.0).is_none());
    }

    #[test]
    fn linear_maps_and_inverts() {
        let s = LinearScale::new([0.0, 10.0], [100.0, 0.0]);
        assert_eq!(s.apply(0.0), 100.0);
        assert_eq!(s.apply(10.0), 0.0);
        assert_eq!(s.apply(2.5), 75.0);
        assert_eq!(s.invert(75.0), Some(2.5));
        assert_eq!(s.linear(), Some((-10.0, 100.0)));
    }

    #[test]
    fn degenerate_linear_domain_maps_to_the_middle() {
        let s = LinearScale::new([3.0, 3.0], [0.0, 200.0]);
        assert_eq!(s.apply(3.0), 100.0);
        assert_eq!(s.apply(-50.0), 100.0);
        assert_eq!(s.invert(100.0), None);
    }

    #[test]
    fn log_scale_spaces_decades_evenly() {
        let s = LogScale::new([1.0, 1000.0], [0.0, 300.0]);
        assert!((s.apply(10.0) - 100.0).abs() < 1e-9);
        assert!((s.apply(100.0) - 200.0).abs() < 1e-9);
        assert!(s.apply(0.0).is_nan());
        assert!(s.apply(-1.0).is_nan());
        let back = s.invert(200.0).unwrap();
        assert!((back - 100.0).abs() < 1e-6);
    }

    #[test]
    fn band_scale_without_padding_is_a_grid() {
        let s = BandScale::new(4, [0.0, 200.0]);
        assert_eq!(s.step(), 50.0);
        assert_eq!(s.bandwidth(), 50.0);
        assert_eq!(s.apply(0.0), 0.0);
        assert_eq!(s.apply(3.0), 150.0);
        assert_eq!(s.apply(4.0), 200.0);
        assert_eq!(s.invert(125.0), Some(2.5));
    }

    #[test]
    fn band_scale_padding_shrinks_bands() {
        let s = BandScale::new(3, [0.0, 70.0]).with_padding(0.5);
        // 3 bands + 0.5 padding → step 20, outer edge 10.
        assert_eq!(s.step(), 20.0);
        assert_eq!(s.bandwidth(), 10.0);
        assert_eq!(s.apply(0.0), 10.0);
        assert_eq!(s.apply(2.0), 50.0);
    }

    #[test]
    fn shared_scales_delegate() {
        let a = SharedScale::new(LinearScale::new([0.0, 1.0], [0.0, 10.0]));
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(b.apply(0.5), 5.0);
        assert_eq!(b.linear(), Some((10.0, 0.0)));
        assert!(!a.ptr_eq(&SharedScale::new(|v: f64| v)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn specs_build_the_described_scale() {
        let spec = ScaleSpec::Band(BandScale::new(2, [0.0, 10.0]));
        assert_eq!(spec.build().apply(1.0), 5.0);
        let spec = ScaleSpec::Log(LogScale::new([1.0, 100.0], [0.0, 2.0]));
        assert!((spec.build().apply(10.0) - 1.0).abs() < 1e-9);
    }
}

// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color parsing and color ramps.

use peniko::Color;
use peniko::color::{Srgb, parse_color};

use crate::data::Boundaries;
use crate::error::ConfigurationError;

/// Parse a CSS color string held by setting `key`.
pub fn parse_setting_color(key: &'static str, text: &str) -> Result<Color, ConfigurationError> {
    parse_color(text)
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|e| ConfigurationError::Invalid {
            key,
            reason: format!("`{text}` is not a color: {e}"),
        })
}

/// Linear interpolation between two colors in sRGB, `t` clamped to `[0, 1]`.
pub fn lerp(from: Color, to: Color, t: f64) -> Color {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "color components are f32"
    )]
    let t = t.clamp(0.0, 1.0) as f32;
    let [r0, g0, b0, a0] = from.components;
    let [r1, g1, b1, a1] = to.components;
    Color::new([
        r0 + (r1 - r0) * t,
        g0 + (g1 - g0) * t,
        b0 + (b1 - b0) * t,
        a0 + (a1 - a0) * t,
    ])
}

/// Maps values in `domain` onto a ramp from white to `to`.
#[derive(Copy, Clone, Debug)]
pub struct ColorRamp {
    /// Values mapped to the ends of the ramp.
    pub domain: Boundaries,
    /// Color at `domain.max`.
    pub to: Color,
}

impl ColorRamp {
    /// Ramp from white at `domain.min` to `to` at `domain.max`.
    pub const fn from_white(domain: Boundaries, to: Color) -> Self {
        Self { domain, to }
    }

    /// Color of `v`; out-of-domain values take the nearest end.
    pub fn color(&self, v: f64) -> Color {
        lerp(Color::WHITE, self.to, self.domain.normalize(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_css_colors() {
        let c = parse_setting_color("fill", "#1e60d4").unwrap();
        let rgba = c.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (0x1e, 0x60, 0xd4, 0xff));
        assert!(parse_setting_color("fill", "red").is_ok());
        assert!(matches!(
            parse_setting_color("stroke", "not a color"),
            Err(ConfigurationError::Invalid { key: "stroke", .. })
        ));
    }

    #[test]
    fn ramp_runs_from_white() {
        let ramp = ColorRamp::from_white(Boundaries::new(0.0, 10.0), Color::BLACK);
        assert_eq!(ramp.color(0.0).to_rgba8(), Color::WHITE.to_rgba8());
        assert_eq!(ramp.color(10.0).to_rgba8(), Color::BLACK.to_rgba8());
        assert_eq!(ramp.color(-5.0).to_rgba8(), Color::WHITE.to_rgba8());
        let mid = ramp.color(5.0).to_rgba8();
        assert!((127..=128).contains(&mid.r), "mid gray, got {}", mid.r);
    }
}

// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG export.

use alloc::format;
use alloc::string::String;
use core::fmt::Write as _;

use kurbo::Affine;
use peniko::Color;

use crate::mark::{ItemStyle, Mark};
use crate::scene::Scene;
use crate::types::{NodeFlags, NodeId, NodeKind};

impl Scene {
    /// Serialize the visible part of the scene as a standalone SVG document.
    ///
    /// Groups become `<g>` elements carrying their local transform; marks become
    /// `<circle>` and `<rect>` elements. Hidden subtrees are skipped.
    pub fn to_svg(&self, width: u32, height: u32) -> String {
        let mut body = String::new();
        for root in self.roots() {
            self.write_node(&mut body, *root);
        }
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">{body}</svg>"
        )
    }

    fn write_node(&self, out: &mut String, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        if !node.flags.contains(NodeFlags::VISIBLE) {
            return;
        }
        let transform = svg_transform_attr(node.transform);
        match &node.kind {
            NodeKind::Group => {
                let _ = write!(out, "<g{transform}>");
                for child in self.children(id) {
                    self.write_node(out, *child);
                }
                out.push_str("</g>");
            }
            NodeKind::Mark(mark) => write_mark(out, mark, &transform),
        }
    }
}

fn write_mark(out: &mut String, mark: &Mark, transform: &str) {
    match *mark {
        Mark::Circle {
            center,
            radius,
            ref style,
        } => {
            let _ = write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}{transform}/>",
                fmt_num(center.x),
                fmt_num(center.y),
                fmt_num(radius),
                paint_attrs(style),
            );
        }
        Mark::Rect { rect, ref style } => {
            let r = rect.abs();
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{}{transform}/>",
                fmt_num(r.x0),
                fmt_num(r.y0),
                fmt_num(r.width()),
                fmt_num(r.height()),
                paint_attrs(style),
            );
        }
    }
}

fn paint_attrs(style: &ItemStyle) -> String {
    let mut attrs = String::new();
    match style.fill {
        Some(fill) => {
            let (hex, alpha) = color_to_svg(fill);
            let _ = write!(attrs, " fill=\"{hex}\"");
            if alpha < 1.0 {
                let _ = write!(attrs, " fill-opacity=\"{}\"", fmt_num(alpha));
            }
        }
        None => attrs.push_str(" fill=\"none\""),
    }
    if let Some(stroke) = style.visible_stroke() {
        let (hex, alpha) = color_to_svg(stroke);
        let _ = write!(
            attrs,
            " stroke=\"{hex}\" stroke-width=\"{}\"",
            fmt_num(style.stroke_width)
        );
        if alpha < 1.0 {
            let _ = write!(attrs, " stroke-opacity=\"{}\"", fmt_num(alpha));
        }
    }
    attrs
}

fn svg_transform_attr(transform: Affine) -> String {
    if transform == Affine::IDENTITY {
        return String::new();
    }
    let c = transform.as_coeffs();
    format!(
        " transform=\"matrix({} {} {} {} {} {})\"",
        fmt_num(c[0]),
        fmt_num(c[1]),
        fmt_num(c[2]),
        fmt_num(c[3]),
        fmt_num(c[4]),
        fmt_num(c[5]),
    )
}

fn color_to_svg(color: Color) -> (String, f64) {
    let rgba = color.to_rgba8();
    let a = f64::from(rgba.a) / 255.0;
    (format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b), a)
}

fn fmt_num(v: f64) -> String {
    // Keep output readable and stable enough for debugging.
    if v.is_finite() {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "best-effort pretty formatting"
        )]
        let i = v as i64;
        #[allow(clippy::cast_precision_loss, reason = "only used for an equality check")]
        let exact = i as f64 == v;
        if exact {
            return format!("{i}");
        }
    }
    let mut s = format!("{v:.3}");
    while s.contains('.') && s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SceneNode;
    use kurbo::{Point, Rect, Vec2};

    #[test]
    fn numbers_are_compact() {
        assert_eq!(fmt_num(10.0), "10");
        assert_eq!(fmt_num(-2.5), "-2.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333");
    }

    #[test]
    fn colors_are_hex() {
        let (hex, a) = color_to_svg(Color::from_rgba8(0x1e, 0x60, 0xd4, 0xff));
        assert_eq!(hex, "#1e60d4");
        assert_eq!(a, 1.0);
    }

    #[test]
    fn groups_and_marks_are_serialized_in_paint_order() {
        let mut scene = Scene::new();
        let g = scene.insert(
            None,
            SceneNode::group(Affine::translate(Vec2::new(20.0, 10.0))),
        );
        scene.insert(
            Some(g),
            SceneNode::mark(Mark::Rect {
                rect: Rect::new(0.0, 0.0, 4.0, 2.0),
                style: ItemStyle::outlined(Color::BLACK, 1.0),
            }),
        );
        let c = scene.insert(
            Some(g),
            SceneNode::mark(Mark::Circle {
                center: Point::new(5.0, 6.0),
                radius: 1.5,
                style: ItemStyle::filled(Color::WHITE),
            }),
        );
        let svg = scene.to_svg(100, 50);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\""));
        assert!(svg.contains("<g transform=\"matrix(1 0 0 1 20 10)\">"));
        assert!(svg.contains(
            "<rect x=\"0\" y=\"0\" width=\"4\" height=\"2\" fill=\"none\" stroke=\"#000000\" stroke-width=\"1\"/>"
        ));
        assert!(svg.contains("<circle cx=\"5\" cy=\"6\" r=\"1.5\" fill=\"#ffffff\"/>"));
        assert!(svg.find("<rect").unwrap() < svg.find("<circle").unwrap());

        scene.set_flags(c, NodeFlags::empty());
        assert!(!scene.to_svg(100, 50).contains("<circle"));
    }
}

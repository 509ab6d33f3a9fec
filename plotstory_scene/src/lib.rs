// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=plotstory_scene --heading-base-level=0

//! Plotstory Scene: a retained-mode scenegraph of plot marks.
//!
//! The vector rendering backend keeps one node per drawn element instead of
//! repainting pixels. Between draw passes, rows are joined onto the nodes of the
//! previous pass by key: new rows get new nodes, surviving rows are updated in
//! place, and rows that disappeared are removed.
//!
//! - [`Scene`]: container of nodes with stable generational [`NodeId`]s.
//! - [`SceneNode`]: a [`NodeKind::Group`] with a local [`kurbo::Affine`], or a [`NodeKind::Mark`].
//! - [`Mark`] and [`ItemStyle`]: backend-agnostic shapes with [`peniko::Color`] paint,
//!   shared with immediate-mode surfaces.
//! - [`NodeFlags`]: visibility and highlight state.
//!
//! Key operations:
//! - [`Scene::insert_keyed`] and [`Scene::child_by_key`] for joins; [`Scene::retain_keyed`] for exits.
//! - [`Scene::replace_marks`] to restyle an item, [`Scene::raise`] to bring it to the top.
//! - [`Scene::world_bounds`] and [`Scene::paint_order`] for inspection.
//! - [`Scene::to_svg`] to export the visible nodes.
//!
//! ```rust
//! use kurbo::{Affine, Point, Vec2};
//! use peniko::Color;
//! use plotstory_scene::{ItemStyle, Mark, Scene, SceneNode};
//!
//! let mut scene = Scene::new();
//! let viewport = scene.insert(None, SceneNode::group(Affine::translate(Vec2::new(20.0, 20.0))));
//! let row = scene.insert_keyed(Some(viewport), 0, SceneNode::group(Affine::IDENTITY));
//! scene.replace_marks(row, [Mark::Circle {
//!     center: Point::new(10.0, 10.0),
//!     radius: 2.0,
//!     style: ItemStyle::filled(Color::BLACK),
//! }]);
//!
//! assert_eq!(scene.child_by_key(Some(viewport), 0), Some(row));
//! assert_eq!(scene.world_bounds(row).unwrap().origin(), Point::new(28.0, 28.0));
//! assert!(scene.to_svg(100, 100).contains("<circle"));
//! ```

#![no_std]

extern crate alloc;

mod mark;
mod scene;
mod svg;
mod types;

pub use mark::{ItemStyle, Mark};
pub use scene::Scene;
pub use types::{NodeFlags, NodeId, NodeKind, SceneNode};

// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=plotstory_index --heading-base-level=0

//! Plotstory Index: a region quad-tree for hit testing plotted items.
//!
//! Every drawn item of a visualization is represented by an axis-aligned box in
//! screen space. The [`QuadTree`] answers "which items cover this point?" without
//! scanning every item.
//!
//! - Build a tree sized to the plot area with [`QuadTree::new`].
//! - Insert one box per item with a small `Copy` payload (usually a row index).
//! - Query by point with [`QuadTree::query`] or by rectangle with [`QuadTree::query_rect`].
//!
//! It is generic over the scalar type `T` and does not depend on any geometry crate.
//!
//! # Example
//!
//! ```rust
//! use plotstory_index::{Aabb2D, QuadTree};
//!
//! // A 100×100 region, nodes split after 4 entries, quadrants never smaller than 1% of the root.
//! let mut tree: QuadTree<f64, usize> = QuadTree::from_xywh(0.0, 0.0, 100.0, 100.0, 0.01, 4).unwrap();
//! tree.insert(Aabb2D::from_xywh(10.0, 10.0, 5.0, 5.0), 0).unwrap();
//! tree.insert(Aabb2D::from_xywh(12.0, 12.0, 5.0, 5.0), 1).unwrap();
//!
//! let mut hits: Vec<usize> = tree.query(13.0, 13.0).map(|e| e.value).collect();
//! hits.sort();
//! assert_eq!(hits, [0, 1]);
//!
//! // Boxes entirely outside the region are rejected rather than dropped silently.
//! assert!(tree.insert(Aabb2D::from_xywh(500.0, 0.0, 5.0, 5.0), 2).is_err());
//! ```
//!
//! ## Edge convention
//!
//! Boxes and node regions are half-open: a box at `(x, y)` of size `w × h`
//! covers `[x, x + w) × [y, y + h)`. A point on the right or bottom edge of a
//! box does not hit it, and each point belongs to exactly one quadrant.
//!
//! ### Float semantics
//!
//! Comparisons involving NaN are false, so NaN boxes are reported as out of bounds
//! and NaN query points match nothing.

#![no_std]

extern crate alloc;

pub mod error;
pub mod quadtree;
pub mod types;

pub use error::IndexError;
pub use quadtree::{Entry, MAX_DEPTH, QuadTree};
pub use types::{Aabb2D, Scalar};

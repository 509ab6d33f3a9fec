// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Plotstory Index: build a tree, insert boxes, and query points.

use plotstory_index::{Aabb2D, QuadTree};

fn main() {
    let mut tree: QuadTree<i64, u32> = QuadTree::from_xywh(0, 0, 256, 256, 0.0, 2).unwrap();
    tree.insert(Aabb2D::new(0, 0, 10, 10), 1).unwrap();
    tree.insert(Aabb2D::new(5, 5, 15, 15), 2).unwrap();
    tree.insert(Aabb2D::new(120, 120, 140, 140), 3).unwrap();

    // Straddles the center, so it is kept at the root.
    tree.insert(Aabb2D::new(100, 100, 160, 160), 4).unwrap();
    println!("{tree:?}");

    let hits: Vec<_> = tree.query(6, 6).map(|e| e.value).collect();
    println!("hits at (6,6): {hits:?}");

    let hits: Vec<_> = tree.query(130, 130).map(|e| e.value).collect();
    println!("hits at (130,130): {hits:?}");

    match tree.insert(Aabb2D::new(300, 300, 310, 310), 5) {
        Ok(()) => println!("inserted"),
        Err(err) => println!("rejected: {err}"),
    }
}

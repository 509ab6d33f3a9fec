// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region quad-tree over axis-aligned boxes.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::IndexError;
use crate::types::{Aabb2D, Scalar, lt};

/// Hard limit on subdivision depth, independent of the minimum size ratio.
pub const MAX_DEPTH: usize = 32;

/// A stored box with its payload.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Entry<T, P> {
    /// Bounds the entry was inserted with.
    pub bounds: Aabb2D<T>,
    /// Caller payload (typically a row index).
    pub value: P,
}

#[derive(Clone)]
struct Node<T, P> {
    region: Aabb2D<T>,
    depth: usize,
    entries: Vec<Entry<T, P>>,
    // Top-left, top-right, bottom-left, bottom-right.
    children: Option<[NodeIdx; 4]>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const ROOT: Self = Self(0);

    const fn get(self) -> usize {
        self.0
    }
}

/// Region quad-tree mapping boxes to payloads.
///
/// Each node holds up to `capacity` entries before it splits into four equal
/// quadrants. An entry that fits wholly inside one quadrant is pushed down into
/// it; an entry that straddles quadrant boundaries stays at the node where it
/// straddles and is never duplicated. Nodes whose quadrants would be narrower or
/// shorter than `min_size_ratio` times the root region keep appending instead of
/// splitting.
///
/// Many large boxes that straddle the root's center all land at the root, so
/// point queries degrade toward a linear scan for such inputs.
///
/// The tree has no removal; rebuild it when the underlying data changes.
pub struct QuadTree<T: Scalar, P: Copy + Debug> {
    capacity: usize,
    min_size_ratio: f64,
    min_width: T,
    min_height: T,
    arena: Vec<Node<T, P>>,
    len: usize,
}

impl<T: Scalar, P: Copy + Debug> QuadTree<T, P> {
    /// Create an empty tree covering `region`.
    ///
    /// `min_size_ratio` bounds subdivision: a node only splits when its quadrants
    /// stay at least `min_size_ratio × region` on both axes. `capacity` is the
    /// number of entries a leaf holds before it tries to split.
    pub fn new(
        region: Aabb2D<T>,
        min_size_ratio: f64,
        capacity: usize,
    ) -> Result<Self, IndexError<T>> {
        if region.is_empty() {
            return Err(IndexError::InvalidRegion(region));
        }
        if capacity == 0 {
            return Err(IndexError::ZeroCapacity);
        }
        if !(0.0..=1.0).contains(&min_size_ratio) {
            return Err(IndexError::InvalidRatio(min_size_ratio));
        }
        Ok(Self {
            capacity,
            min_size_ratio,
            min_width: T::scale_by(region.width(), min_size_ratio),
            min_height: T::scale_by(region.height(), min_size_ratio),
            arena: alloc::vec![Node {
                region,
                depth: 0,
                entries: Vec::new(),
                children: None,
            }],
            len: 0,
        })
    }

    /// Create an empty tree covering the rectangle at `(x, y)` of size `w × h`.
    pub fn from_xywh(
        x: T,
        y: T,
        w: T,
        h: T,
        min_size_ratio: f64,
        capacity: usize,
    ) -> Result<Self, IndexError<T>> {
        Self::new(Aabb2D::from_xywh(x, y, w, h), min_size_ratio, capacity)
    }

    /// Insert a box with its payload.
    ///
    /// Boxes that only partially overlap the root region are kept. Boxes with a
    /// negative extent, or that lie entirely outside the root region, are
    /// rejected and not stored. Zero-size boxes are accepted.
    pub fn insert(&mut self, bounds: Aabb2D<T>, value: P) -> Result<(), IndexError<T>> {
        if lt(bounds.width(), T::zero()) || lt(bounds.height(), T::zero()) {
            return Err(IndexError::NegativeSize(bounds));
        }
        let region = self.region();
        if !region.overlaps(&bounds) {
            return Err(IndexError::OutOfBounds { bounds, region });
        }

        let entry = Entry { bounds, value };
        let mut idx = NodeIdx::ROOT;
        loop {
            let children = self.node(idx).children;
            match children {
                Some(children) => {
                    match children
                        .into_iter()
                        .find(|c| self.node(*c).region.contains_aabb(&bounds))
                    {
                        Some(child) => idx = child,
                        None => {
                            self.node_mut(idx).entries.push(entry);
                            break;
                        }
                    }
                }
                None => {
                    if self.node(idx).entries.len() < self.capacity || !self.can_split(idx) {
                        self.node_mut(idx).entries.push(entry);
                        break;
                    }
                    self.subdivide(idx);
                }
            }
        }
        self.len += 1;
        Ok(())
    }

    /// Insert the box at `(x, y)` of size `w × h`.
    pub fn insert_xywh(&mut self, x: T, y: T, w: T, h: T, value: P) -> Result<(), IndexError<T>> {
        self.insert(Aabb2D::from_xywh(x, y, w, h), value)
    }

    /// Entries whose box contains the point.
    ///
    /// Only the chain of quadrants containing the point is visited. Points
    /// outside the root region match nothing. Result order is unspecified.
    pub fn query(&self, x: T, y: T) -> impl Iterator<Item = &Entry<T, P>> + '_ {
        let mut out = Vec::new();
        let mut next = self
            .region()
            .contains_point(x, y)
            .then_some(NodeIdx::ROOT);
        while let Some(idx) = next {
            let node = self.node(idx);
            out.extend(node.entries.iter().filter(|e| e.bounds.contains_point(x, y)));
            next = node.children.and_then(|children| {
                children
                    .into_iter()
                    .find(|c| self.node(*c).region.contains_point(x, y))
            });
        }
        out.into_iter()
    }

    /// Same as [`QuadTree::query`]; the name hit-testing code reaches for.
    pub fn collisions(&self, x: T, y: T) -> impl Iterator<Item = &Entry<T, P>> + '_ {
        self.query(x, y)
    }

    /// Entries whose box overlaps `rect`.
    pub fn query_rect(&self, rect: Aabb2D<T>) -> impl Iterator<Item = &Entry<T, P>> + '_ {
        let mut out = Vec::new();
        let mut stack = Vec::new();
        if rect.overlaps(&self.region()) {
            stack.push(NodeIdx::ROOT);
        }
        while let Some(idx) = stack.pop() {
            let node = self.node(idx);
            out.extend(node.entries.iter().filter(|e| rect.overlaps(&e.bounds)));
            if let Some(children) = node.children {
                stack.extend(
                    children
                        .into_iter()
                        .filter(|c| rect.overlaps(&self.node(*c).region)),
                );
            }
        }
        out.into_iter()
    }

    /// All entries in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<T, P>> + '_ {
        self.arena.iter().flat_map(|n| n.entries.iter())
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Root region covered by the tree.
    pub fn region(&self) -> Aabb2D<T> {
        self.node(NodeIdx::ROOT).region
    }

    /// Leaf capacity before subdivision.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Minimum quadrant size, as a fraction of the root region.
    pub fn min_size_ratio(&self) -> f64 {
        self.min_size_ratio
    }

    /// Depth of the deepest node; a tree that never split has depth 0.
    pub fn depth(&self) -> usize {
        self.arena.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    fn node(&self, idx: NodeIdx) -> &Node<T, P> {
        &self.arena[idx.get()]
    }

    fn node_mut(&mut self, idx: NodeIdx) -> &mut Node<T, P> {
        &mut self.arena[idx.get()]
    }

    fn can_split(&self, idx: NodeIdx) -> bool {
        let node = self.node(idx);
        if node.depth >= MAX_DEPTH {
            return false;
        }
        let [tl, _, _, br] = node.region.quadrants();
        !tl.is_empty()
            && !br.is_empty()
            && !lt(tl.width(), self.min_width)
            && !lt(tl.height(), self.min_height)
    }

    fn subdivide(&mut self, idx: NodeIdx) {
        let (region, depth) = {
            let node = self.node(idx);
            (node.region, node.depth)
        };
        let base = self.arena.len();
        let children = [
            NodeIdx(base),
            NodeIdx(base + 1),
            NodeIdx(base + 2),
            NodeIdx(base + 3),
        ];
        for quadrant in region.quadrants() {
            self.arena.push(Node {
                region: quadrant,
                depth: depth + 1,
                entries: Vec::new(),
                children: None,
            });
        }

        let entries = core::mem::take(&mut self.node_mut(idx).entries);
        let mut straddling = Vec::new();
        for entry in entries {
            match children
                .into_iter()
                .find(|c| self.node(*c).region.contains_aabb(&entry.bounds))
            {
                Some(child) => self.node_mut(child).entries.push(entry),
                None => straddling.push(entry),
            }
        }
        let node = self.node_mut(idx);
        node.entries = straddling;
        node.children = Some(children);
    }
}

impl<T: Scalar, P: Copy + Debug> Debug for QuadTree<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("region", &self.region())
            .field("capacity", &self.capacity)
            .field("min_size_ratio", &self.min_size_ratio)
            .field("nodes", &self.arena.len())
            .field("len", &self.len)
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}

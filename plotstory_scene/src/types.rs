// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, and node contents.

use kurbo::Affine;

use crate::mark::Mark;

/// Identifier for a node in the scene.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check whether a `NodeId` still
/// refers to a live node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and highlight state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible (painted and exported).
        const VISIBLE     = 0b0000_0001;
        /// Node currently shows its highlight styling.
        const HIGHLIGHTED = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// What a node draws.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// Container whose transform applies to its children.
    Group,
    /// A single drawn shape.
    Mark(Mark),
}

/// Local data for a node.
#[derive(Clone, Debug)]
pub struct SceneNode {
    /// Node contents.
    pub kind: NodeKind,
    /// Local transform relative to the parent.
    pub transform: Affine,
    /// Visibility and highlight flags.
    pub flags: NodeFlags,
}

impl SceneNode {
    /// An empty group with the given local transform.
    pub fn group(transform: Affine) -> Self {
        Self {
            kind: NodeKind::Group,
            transform,
            flags: NodeFlags::default(),
        }
    }

    /// A mark in its parent's coordinate space.
    pub fn mark(mark: Mark) -> Self {
        Self {
            kind: NodeKind::Mark(mark),
            transform: Affine::IDENTITY,
            flags: NodeFlags::default(),
        }
    }
}

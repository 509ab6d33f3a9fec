// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, keyed children, z-order, and queries.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use kurbo::{Affine, Rect};

use crate::mark::Mark;
use crate::types::{NodeFlags, NodeId, NodeKind, SceneNode};

/// Retained tree of groups and marks.
///
/// Children are painted in order, so the last child of a parent is on top.
/// Children may carry a `u64` key (typically a data row index), which makes it
/// possible to join a fresh set of rows onto the nodes of the previous pass.
pub struct Scene {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    roots: Vec<NodeId>,
    keyed: BTreeMap<(Option<NodeId>, u64), NodeId>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("roots", &self.roots.len())
            .field("keyed", &self.keyed.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    key: Option<u64>,
    local: SceneNode,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
            keyed: BTreeMap::new(),
        }
    }

    /// Insert a node as the topmost child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<NodeId>, local: SceneNode) -> NodeId {
        self.insert_with_key(parent, None, local)
    }

    /// Insert a node under `parent` and register it under `key`.
    ///
    /// A node previously registered under the same parent and key is removed first.
    pub fn insert_keyed(&mut self, parent: Option<NodeId>, key: u64, local: SceneNode) -> NodeId {
        if let Some(old) = self.child_by_key(parent, key) {
            self.remove(old);
        }
        self.insert_with_key(parent, Some(key), local)
    }

    fn insert_with_key(
        &mut self,
        parent: Option<NodeId>,
        key: Option<u64>,
        local: SceneNode,
    ) -> NodeId {
        let node = Node {
            generation: 1,
            parent: None,
            children: Vec::new(),
            key,
            local,
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node { generation, ..node });
            (idx, generation)
        } else {
            self.nodes.push(Some(node));
            self.generations.push(1);
            (self.nodes.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId::new(idx as u32, generation);
        match parent.filter(|p| self.is_alive(*p)) {
            Some(p) => {
                self.node_mut(p).children.push(id);
                self.node_mut(id).parent = Some(p);
            }
            None => self.roots.push(id),
        }
        if let Some(k) = key {
            let parent = self.node(id).parent;
            self.keyed.insert((parent, k), id);
        }
        id
    }

    /// Remove a node (and its subtree) from the scene.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        let (parent, key) = {
            let n = self.node(id);
            (n.parent, n.key)
        };
        match parent {
            Some(p) => self.node_mut(p).children.retain(|c| *c != id),
            None => self.roots.retain(|c| *c != id),
        }
        if let Some(k) = key
            && self.keyed.get(&(parent, k)) == Some(&id)
        {
            self.keyed.remove(&(parent, k));
        }
        self.free_subtree(id);
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            if let Some(k) = self.node(child).key {
                self.keyed.remove(&(Some(id), k));
            }
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Whether the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Root nodes in paint order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Children of `id` in paint order; empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Parent of `id`, if any.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Key `id` was inserted with, if any.
    pub fn key(&self, id: NodeId) -> Option<u64> {
        self.node_opt(id)?.key
    }

    /// Local data of `id`.
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.node_opt(id).map(|n| &n.local)
    }

    /// The child of `parent` registered under `key`.
    pub fn child_by_key(&self, parent: Option<NodeId>, key: u64) -> Option<NodeId> {
        self.keyed
            .get(&(parent, key))
            .copied()
            .filter(|id| self.is_alive(*id))
    }

    /// Remove every keyed child of `parent` for which `keep` returns false.
    ///
    /// Unkeyed children are left alone.
    pub fn retain_keyed(&mut self, parent: Option<NodeId>, mut keep: impl FnMut(u64) -> bool) {
        let siblings = match parent {
            Some(p) => self.children(p).to_vec(),
            None => self.roots.clone(),
        };
        for id in siblings {
            if let Some(k) = self.key(id)
                && !keep(k)
            {
                self.remove(id);
            }
        }
    }

    /// Update the local transform.
    pub fn set_transform(&mut self, id: NodeId, transform: Affine) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.transform = transform;
        }
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Current flags of `id`.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.local.flags)
    }

    /// Replace all children of `group` with one mark node per entry of `marks`.
    pub fn replace_marks(&mut self, group: NodeId, marks: impl IntoIterator<Item = Mark>) {
        if !self.is_alive(group) {
            return;
        }
        for child in self.children(group).to_vec() {
            self.remove(child);
        }
        for mark in marks {
            self.insert(Some(group), SceneNode::mark(mark));
        }
    }

    /// Move `id` above all of its siblings.
    pub fn raise(&mut self, id: NodeId) {
        let Some(parent) = self.node_opt(id).map(|n| n.parent) else {
            return;
        };
        let siblings = match parent {
            Some(p) => &mut self.node_mut(p).children,
            None => &mut self.roots,
        };
        siblings.retain(|c| *c != id);
        siblings.push(id);
    }

    /// Product of the transforms from the root down to `id`.
    pub fn world_transform(&self, id: NodeId) -> Option<Affine> {
        let mut n = self.node_opt(id)?;
        let mut tf = n.local.transform;
        while let Some(p) = n.parent {
            n = self.node(p);
            tf = n.local.transform * tf;
        }
        Some(tf)
    }

    /// World-space bounding box of the marks in the subtree of `id`.
    ///
    /// Groups without marks have no bounds.
    pub fn world_bounds(&self, id: NodeId) -> Option<Rect> {
        let tf = self.world_transform(id)?;
        self.subtree_bounds(id, tf)
    }

    fn subtree_bounds(&self, id: NodeId, tf: Affine) -> Option<Rect> {
        let n = self.node(id);
        let own = match &n.local.kind {
            NodeKind::Mark(m) => Some(tf.transform_rect_bbox(m.bounds())),
            NodeKind::Group => None,
        };
        n.children
            .iter()
            .filter_map(|c| self.subtree_bounds(*c, tf * self.node(*c).local.transform))
            .fold(own, |acc, r| Some(acc.map_or(r, |a| a.union(r))))
    }

    /// Visible marks in paint order, with their world transforms.
    pub fn paint_order(&self) -> Vec<(NodeId, Affine, &Mark)> {
        let mut out = Vec::new();
        for root in &self.roots {
            self.collect_paint(*root, Affine::IDENTITY, &mut out);
        }
        out
    }

    fn collect_paint<'a>(
        &'a self,
        id: NodeId,
        parent_tf: Affine,
        out: &mut Vec<(NodeId, Affine, &'a Mark)>,
    ) {
        let n = self.node(id);
        if !n.local.flags.contains(NodeFlags::VISIBLE) {
            return;
        }
        let tf = parent_tf * n.local.transform;
        if let NodeKind::Mark(m) = &n.local.kind {
            out.push((id, tf, m));
        }
        for c in &n.children {
            self.collect_paint(*c, tf, out);
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }
}

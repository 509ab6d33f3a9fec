// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state helper: compute enter/leave transitions between hit sets.
//!
//! Overlapping items are hit together, so the hover state is a set of rows
//! rather than a single one. Feed it the rows under the pointer after every
//! move and apply the returned transitions, or let
//! [`update_hover`](crate::update_hover) do both.
//!
//! ```
//! use plotstory_plugins::hover::{HoverEvent, HoverState};
//! let mut h: HoverState<usize> = HoverState::new();
//! assert_eq!(h.update(&[1, 2]), vec![HoverEvent::Enter(1), HoverEvent::Enter(2)]);
//! assert_eq!(h.update(&[2, 3]), vec![HoverEvent::Leave(1), HoverEvent::Enter(3)]);
//! ```

/// The set of currently hovered items.
///
/// Updating with a new hit set emits a `Leave` for every item no longer hit,
/// in the order they were entered, then an `Enter` for every newly hit item,
/// in hit order. Items hit before and after produce nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState<K: Copy + Eq> {
    current: Vec<K>,
}

/// A hover transition event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// The pointer is now over the item.
    Enter(K),
    /// The pointer is no longer over the item.
    Leave(K),
}

impl<K: Copy + Eq> HoverState<K> {
    /// Create an empty hover state.
    pub fn new() -> Self {
        Self {
            current: Vec::new(),
        }
    }

    /// Currently hovered items, in the order they were entered.
    pub fn current(&self) -> &[K] {
        &self.current
    }

    /// Leave every hovered item.
    pub fn clear(&mut self) -> Vec<HoverEvent<K>> {
        let out = self.current.iter().map(|&k| HoverEvent::Leave(k)).collect();
        self.current.clear();
        out
    }

    /// Move to the hit set `hits`. Duplicates in `hits` count once.
    pub fn update(&mut self, hits: &[K]) -> Vec<HoverEvent<K>> {
        let mut out: Vec<HoverEvent<K>> = self
            .current
            .iter()
            .filter(|k| !hits.contains(k))
            .map(|&k| HoverEvent::Leave(k))
            .collect();
        self.current.retain(|k| hits.contains(k));
        for &k in hits {
            if !self.current.contains(&k) {
                self.current.push(k);
                out.push(HoverEvent::Enter(k));
            }
        }
        out
    }
}

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Multi-select state and derived highlighting.
//!
//! `Selection` is the single source of truth for what is selected; the
//! renderer's visual tagging and the inspector's subject are both derived
//! from it. `compute_highlight` is pure so every entry point (clicks,
//! select-all, deletion cleanup) funnels through the same derivation.

use std::collections::BTreeSet;

use crate::graph::{ElementKind, GraphData, VisualState, VisualStateMap};

/// Selected element ids, nodes and edges kept disjoint. The revision
/// counter increments on every observable change so downstream caches can
/// cheaply detect staleness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    nodes: BTreeSet<String>,
    edges: BTreeSet<String>,
    revision: u64,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain click: the element becomes the sole selection.
    pub fn click(&mut self, kind: ElementKind, id: &str) {
        self.nodes.clear();
        self.edges.clear();
        self.set_of(kind).insert(id.to_string());
        self.revision += 1;
    }

    /// Additive click: toggles the element's membership, leaving the rest
    /// of the selection intact.
    pub fn toggle(&mut self, kind: ElementKind, id: &str) {
        let set = self.set_of(kind);
        if !set.remove(id) {
            set.insert(id.to_string());
        }
        self.revision += 1;
    }

    /// Background click or escape: empty selection.
    pub fn clear(&mut self) {
        if self.nodes.is_empty() && self.edges.is_empty() {
            return;
        }
        self.nodes.clear();
        self.edges.clear();
        self.revision += 1;
    }

    /// Select exactly the given node ids (the select-all path).
    pub fn replace_nodes(&mut self, ids: impl IntoIterator<Item = String>) {
        self.nodes = ids.into_iter().collect();
        self.edges.clear();
        self.revision += 1;
    }

    /// Drop an id from the selection, used when the element is deleted.
    pub fn remove(&mut self, kind: ElementKind, id: &str) {
        if self.set_of(kind).remove(id) {
            self.revision += 1;
        }
    }

    pub fn contains(&self, kind: ElementKind, id: &str) -> bool {
        match kind {
            ElementKind::Node => self.nodes.contains(id),
            ElementKind::Edge => self.edges.contains(id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    /// The sole selected element, if exactly one is selected.
    pub fn single(&self) -> Option<(ElementKind, &str)> {
        match (self.nodes.len(), self.edges.len()) {
            (1, 0) => self.nodes.iter().next().map(|id| (ElementKind::Node, id.as_str())),
            (0, 1) => self.edges.iter().next().map(|id| (ElementKind::Edge, id.as_str())),
            _ => None,
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn edges(&self) -> impl Iterator<Item = &str> {
        self.edges.iter().map(String::as_str)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn set_of(&mut self, kind: ElementKind) -> &mut BTreeSet<String> {
        match kind {
            ElementKind::Node => &mut self.nodes,
            ElementKind::Edge => &mut self.edges,
        }
    }
}

/// Derived emphasis partition over the whole dataset. Every element id
/// lands in exactly one tier; all three sets empty means no selection and
/// therefore no tagging at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlight {
    pub selected: BTreeSet<String>,
    pub active: BTreeSet<String>,
    pub inactive: BTreeSet<String>,
}

/// Compute emphasis for the current selection over the current dataset.
///
/// Selected elements are emphasized directly. Their immediate context is
/// kept readable: for a selected node, its incident edges and their far
/// endpoints; for a selected edge, its two endpoints. Everything else is
/// dimmed. Selected membership wins over active.
pub fn compute_highlight(selection: &Selection, data: &GraphData) -> Highlight {
    if selection.is_empty() {
        return Highlight::default();
    }

    let mut highlight = Highlight::default();
    for id in selection.nodes() {
        highlight.selected.insert(id.to_string());
    }
    for id in selection.edges() {
        highlight.selected.insert(id.to_string());
    }

    for edge in &data.edges {
        if selection.contains(ElementKind::Edge, &edge.id) {
            highlight.active.insert(edge.source.clone());
            highlight.active.insert(edge.target.clone());
            continue;
        }
        let source_selected = selection.contains(ElementKind::Node, &edge.source);
        let target_selected = selection.contains(ElementKind::Node, &edge.target);
        if source_selected || target_selected {
            highlight.active.insert(edge.id.clone());
            if !source_selected {
                highlight.active.insert(edge.source.clone());
            }
            if !target_selected {
                highlight.active.insert(edge.target.clone());
            }
        }
    }

    for id in &highlight.selected {
        highlight.active.remove(id);
    }

    for node in &data.nodes {
        if !highlight.selected.contains(&node.id) && !highlight.active.contains(&node.id) {
            highlight.inactive.insert(node.id.clone());
        }
    }
    for edge in &data.edges {
        if !highlight.selected.contains(&edge.id) && !highlight.active.contains(&edge.id) {
            highlight.inactive.insert(edge.id.clone());
        }
    }

    highlight
}

/// Flatten a highlight into the renderer's batched visual-state map.
/// Selected elements are part of the highlight set, so they carry both
/// tags: `Active` plus `Selected` on top.
pub fn visual_states_for(highlight: &Highlight) -> VisualStateMap {
    let mut states = VisualStateMap::new();
    for id in &highlight.selected {
        states.insert(id.clone(), vec![VisualState::Active, VisualState::Selected]);
    }
    for id in &highlight.active {
        states.insert(id.clone(), vec![VisualState::Active]);
    }
    for id in &highlight.inactive {
        states.insert(id.clone(), vec![VisualState::Inactive]);
    }
    states
}

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! In-memory reference graph store backed by petgraph::StableGraph.
//!
//! Headless: "animated" moves are applied in interpolation steps with
//! cooperative yields, and the layout loop is a plain force-directed
//! iteration with a generation counter so `stop_layout` (or a newer run)
//! supersedes it. Rendering shells own real tween timing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::Mutex;
use petgraph::Directed;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use super::{
    EdgeRecord, ElementEdit, GraphData, GraphEvent, GraphStore, LayoutConfig, NodeRecord,
    Position, PositionMap, RemovedNode, StoreError, StoreFuture, StoreResult, VisualStateMap,
};

/// Interpolation steps for an animated move.
const ANIMATE_STEPS: usize = 4;

/// Iterations between cooperative yields during a layout run.
const LAYOUT_YIELD_INTERVAL: usize = 16;

struct StoreInner {
    graph: StableGraph<NodeRecord, EdgeRecord, Directed>,
    node_ids: HashMap<String, NodeIndex>,
    edge_ids: HashMap<String, EdgeIndex>,
    visual_states: VisualStateMap,
}

/// Reference `GraphStore` for the session and for tests.
pub struct MemoryGraphStore {
    inner: Mutex<StoreInner>,
    /// Bumped by `stop_layout` and by each new `run_layout`; an in-flight
    /// run exits once its captured generation is stale.
    layout_generation: AtomicU64,
    /// Number of batched visual-state pushes (one expected per transition).
    visual_batches: AtomicU64,
    events_tx: Sender<GraphEvent>,
    events_rx: Receiver<GraphEvent>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        let (events_tx, events_rx) = unbounded();
        Self {
            inner: Mutex::new(StoreInner {
                graph: StableGraph::new(),
                node_ids: HashMap::new(),
                edge_ids: HashMap::new(),
                visual_states: VisualStateMap::new(),
            }),
            layout_generation: AtomicU64::new(0),
            visual_batches: AtomicU64::new(0),
            events_tx,
            events_rx,
        }
    }

    /// Publish a canvas event to subscribers (the session).
    pub fn emit(&self, event: GraphEvent) {
        let _ = self.events_tx.send(event);
    }

    /// Direct position write used by the drag interaction (the renderer
    /// moves the node while the pointer is down; drag-end reads it back).
    pub fn set_node_position(&self, id: &str, position: Position) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        let idx = *inner
            .node_ids
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if let Some(node) = inner.graph.node_weight_mut(idx) {
            node.position = Some(position);
        }
        Ok(())
    }

    /// Current visual-state tagging, for assertions.
    pub fn visual_states(&self) -> VisualStateMap {
        self.inner.lock().visual_states.clone()
    }

    /// How many batched visual-state pushes have happened.
    pub fn visual_batch_count(&self) -> u64 {
        self.visual_batches.load(Ordering::SeqCst)
    }

    fn apply_positions(&self, positions: &PositionMap) {
        let mut inner = self.inner.lock();
        for (id, position) in positions {
            let Some(idx) = inner.node_ids.get(id).copied() else {
                continue; // deleted since the snapshot was taken
            };
            if let Some(node) = inner.graph.node_weight_mut(idx) {
                node.position = Some(*position);
            }
        }
    }

    fn current_positions(&self, ids: impl Iterator<Item = impl AsRef<str>>) -> PositionMap {
        let inner = self.inner.lock();
        let mut out = PositionMap::new();
        for id in ids {
            let id = id.as_ref();
            if let Some(idx) = inner.node_ids.get(id)
                && let Some(node) = inner.graph.node_weight(*idx)
                && let Some(position) = node.position
            {
                out.insert(id.to_string(), position);
            }
        }
        out
    }

    /// Place position-less nodes on a circle so the force loop has distinct
    /// starting coordinates. Deterministic (golden-angle spiral by id order).
    fn seed_missing_positions(&self, link_distance: f64) {
        let mut inner = self.inner.lock();
        let mut missing: Vec<NodeIndex> = inner
            .graph
            .node_indices()
            .filter(|idx| inner.graph[*idx].position.is_none())
            .collect();
        if missing.is_empty() {
            return;
        }
        missing.sort_by(|a, b| inner.graph[*a].id.cmp(&inner.graph[*b].id));

        const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;
        for (slot, idx) in missing.into_iter().enumerate() {
            let radius = link_distance * 0.5 * ((slot + 1) as f64).sqrt();
            let angle = GOLDEN_ANGLE * slot as f64;
            if let Some(node) = inner.graph.node_weight_mut(idx) {
                node.position = Some(Position::new(radius * angle.cos(), radius * angle.sin()));
            }
        }
    }

    /// One Fruchterman-Reingold style step: pairwise repulsion, spring
    /// attraction along edges, displacement capped by a cooling temperature.
    fn layout_step(&self, config: &LayoutConfig, iteration: usize) {
        let mut inner = self.inner.lock();
        let indices: Vec<NodeIndex> = inner.graph.node_indices().collect();
        if indices.len() < 2 {
            return;
        }

        let k = config.link_distance.max(1.0);
        let positions: HashMap<NodeIndex, Position> = indices
            .iter()
            .filter_map(|idx| inner.graph[*idx].position.map(|p| (*idx, p)))
            .collect();
        let mut displacement: HashMap<NodeIndex, (f64, f64)> =
            indices.iter().map(|idx| (*idx, (0.0, 0.0))).collect();

        for (i, a) in indices.iter().enumerate() {
            for b in indices.iter().skip(i + 1) {
                let (Some(pa), Some(pb)) = (positions.get(a), positions.get(b)) else {
                    continue;
                };
                let dx = pa.x - pb.x;
                let dy = pa.y - pb.y;
                let dist = (dx * dx + dy * dy).sqrt().max(0.01);
                let force = (config.repulsion / 120.0) * k * k / dist;
                let fx = force * dx / dist;
                let fy = force * dy / dist;
                if let Some(d) = displacement.get_mut(a) {
                    d.0 += fx;
                    d.1 += fy;
                }
                if let Some(d) = displacement.get_mut(b) {
                    d.0 -= fx;
                    d.1 -= fy;
                }
            }
        }

        let edge_endpoints: Vec<(NodeIndex, NodeIndex)> = inner
            .graph
            .edge_references()
            .map(|e| (e.source(), e.target()))
            .collect();
        for (source, target) in edge_endpoints {
            if source == target {
                continue; // self-loop exerts no spring force
            }
            let (Some(ps), Some(pt)) = (positions.get(&source), positions.get(&target)) else {
                continue;
            };
            let dx = ps.x - pt.x;
            let dy = ps.y - pt.y;
            let dist = (dx * dx + dy * dy).sqrt().max(0.01);
            let force = (config.attraction / 0.03) * dist * dist / k / dist;
            let fx = force * dx / dist;
            let fy = force * dy / dist;
            if let Some(d) = displacement.get_mut(&source) {
                d.0 -= fx;
                d.1 -= fy;
            }
            if let Some(d) = displacement.get_mut(&target) {
                d.0 += fx;
                d.1 += fy;
            }
        }

        // Cooling schedule: large moves early, settling toward the end.
        let progress = iteration as f64 / config.iterations.max(1) as f64;
        let temperature = (k * (1.0 - progress)).max(1.0);

        for idx in indices {
            let Some((dx, dy)) = displacement.get(&idx).copied() else {
                continue;
            };
            let len = (dx * dx + dy * dy).sqrt();
            if len < f64::EPSILON {
                continue;
            }
            let capped = len.min(temperature);
            if let Some(node) = inner.graph.node_weight_mut(idx)
                && let Some(position) = node.position
            {
                node.position = Some(Position::new(
                    position.x + dx / len * capped,
                    position.y + dy / len * capped,
                ));
            }
        }
    }

    fn incident_edges(inner: &StoreInner, idx: NodeIndex) -> Vec<EdgeRecord> {
        let mut seen = Vec::new();
        let mut out = Vec::new();
        for edge in inner.graph.edge_references() {
            if edge.source() == idx || edge.target() == idx {
                if seen.contains(&edge.id()) {
                    continue;
                }
                seen.push(edge.id());
                out.push(edge.weight().clone());
            }
        }
        out
    }
}

impl Default for MemoryGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore for MemoryGraphStore {
    fn add_node(&self, record: NodeRecord) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        if inner.node_ids.contains_key(&record.id) {
            return Err(StoreError::Duplicate(record.id));
        }
        let id = record.id.clone();
        let idx = inner.graph.add_node(record);
        inner.node_ids.insert(id, idx);
        Ok(())
    }

    fn remove_node(&self, id: &str) -> StoreResult<RemovedNode> {
        let mut inner = self.inner.lock();
        let idx = inner
            .node_ids
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let edges = Self::incident_edges(&inner, idx);
        for edge in &edges {
            inner.edge_ids.remove(&edge.id);
        }
        let node = inner
            .graph
            .remove_node(idx)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        inner.visual_states.remove(id);
        for edge in &edges {
            inner.visual_states.remove(&edge.id);
        }
        Ok(RemovedNode { node, edges })
    }

    fn update_node(&self, id: &str, edit: &ElementEdit) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        let idx = *inner
            .node_ids
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let node = inner
            .graph
            .node_weight_mut(idx)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        edit.apply_to(&mut node.data);
        Ok(())
    }

    fn add_edge(&self, record: EdgeRecord) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        if inner.edge_ids.contains_key(&record.id) {
            return Err(StoreError::Duplicate(record.id));
        }
        let source = *inner.node_ids.get(&record.source).ok_or_else(|| {
            StoreError::InvalidEdge(format!("{}: unknown source {}", record.id, record.source))
        })?;
        let target = *inner.node_ids.get(&record.target).ok_or_else(|| {
            StoreError::InvalidEdge(format!("{}: unknown target {}", record.id, record.target))
        })?;
        let id = record.id.clone();
        let idx = inner.graph.add_edge(source, target, record);
        inner.edge_ids.insert(id, idx);
        Ok(())
    }

    fn remove_edge(&self, id: &str) -> StoreResult<EdgeRecord> {
        let mut inner = self.inner.lock();
        let idx = inner
            .edge_ids
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let record = inner
            .graph
            .remove_edge(idx)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        inner.visual_states.remove(id);
        Ok(record)
    }

    fn update_edge(&self, id: &str, edit: &ElementEdit) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        let idx = *inner
            .edge_ids
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let edge = inner
            .graph
            .edge_weight_mut(idx)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        edit.apply_to(&mut edge.data);
        Ok(())
    }

    fn node(&self, id: &str) -> Option<NodeRecord> {
        let inner = self.inner.lock();
        let idx = inner.node_ids.get(id)?;
        inner.graph.node_weight(*idx).cloned()
    }

    fn edge(&self, id: &str) -> Option<EdgeRecord> {
        let inner = self.inner.lock();
        let idx = inner.edge_ids.get(id)?;
        inner.graph.edge_weight(*idx).cloned()
    }

    fn related_edges(&self, node_id: &str) -> Vec<EdgeRecord> {
        let inner = self.inner.lock();
        let Some(idx) = inner.node_ids.get(node_id).copied() else {
            return Vec::new();
        };
        Self::incident_edges(&inner, idx)
    }

    fn position(&self, node_id: &str) -> Option<Position> {
        let inner = self.inner.lock();
        let idx = inner.node_ids.get(node_id)?;
        inner.graph.node_weight(*idx)?.position
    }

    fn graph_data(&self) -> GraphData {
        let inner = self.inner.lock();
        GraphData {
            nodes: inner
                .graph
                .node_indices()
                .filter_map(|idx| inner.graph.node_weight(idx).cloned())
                .collect(),
            edges: inner
                .graph
                .edge_references()
                .map(|e| e.weight().clone())
                .collect(),
        }
    }

    fn move_nodes_to(&self, positions: PositionMap, animate: bool) -> StoreFuture<'_> {
        Box::pin(async move {
            if positions.is_empty() {
                return Ok(());
            }
            if !animate {
                self.apply_positions(&positions);
                return Ok(());
            }

            let starts = self.current_positions(positions.keys());
            for step in 1..=ANIMATE_STEPS {
                let t = step as f64 / ANIMATE_STEPS as f64;
                let mut frame = PositionMap::new();
                for (id, target) in &positions {
                    let interpolated = match starts.get(id) {
                        Some(start) => Position::new(
                            start.x + (target.x - start.x) * t,
                            start.y + (target.y - start.y) * t,
                        ),
                        // No prior position: snap straight to the target.
                        None => *target,
                    };
                    frame.insert(id.clone(), interpolated);
                }
                self.apply_positions(&frame);
                tokio::task::yield_now().await;
            }
            // Final frame lands exactly on the targets, no drift.
            self.apply_positions(&positions);
            Ok(())
        })
    }

    fn run_layout(&self, config: LayoutConfig) -> StoreFuture<'_> {
        Box::pin(async move {
            let generation = self.layout_generation.fetch_add(1, Ordering::SeqCst) + 1;
            self.seed_missing_positions(config.link_distance);
            for iteration in 0..config.iterations {
                if self.layout_generation.load(Ordering::SeqCst) != generation {
                    // Superseded; the newer writer owns the final positions.
                    return Ok(());
                }
                self.layout_step(&config, iteration);
                if iteration % LAYOUT_YIELD_INTERVAL == LAYOUT_YIELD_INTERVAL - 1 {
                    tokio::task::yield_now().await;
                }
            }
            Ok(())
        })
    }

    fn stop_layout(&self) {
        self.layout_generation.fetch_add(1, Ordering::SeqCst);
    }

    fn set_visual_states(&self, states: VisualStateMap, _animate: bool) {
        self.inner.lock().visual_states = states;
        self.visual_batches.fetch_add(1, Ordering::SeqCst);
    }

    fn subscribe(&self) -> Receiver<GraphEvent> {
        self.events_rx.clone()
    }
}

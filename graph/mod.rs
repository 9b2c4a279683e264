/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Graph store contract and shared element types.
//!
//! The rendering engine is an external collaborator; the core only depends
//! on the `GraphStore` trait defined here. `memory::MemoryGraphStore` is the
//! headless reference implementation used by the session and by tests.

use std::collections::BTreeMap;

use crossbeam_channel::Receiver;
use euclid::default::Point2D;
use futures_util::future::BoxFuture;
use serde_json::{Map, Value};

pub mod memory;

/// World-coordinate position of a node on the canvas.
pub type Position = Point2D<f64>;

/// Mapping from node id to target position, ordered for determinism.
pub type PositionMap = BTreeMap<String, Position>;

/// Discriminates the two element kinds. Ids are unique within a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    Edge,
}

/// Open attribute mapping shared by nodes and edges.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementData {
    /// Display name (label).
    pub name: String,

    /// Entity or relation type, drives palette assignment in the shell.
    pub kind: String,

    /// Free-form description shown in the inspector.
    pub description: String,

    /// Remaining free-form properties.
    pub properties: Map<String, Value>,
}

/// Partial edit applied to an element's data, the inspector save payload.
#[derive(Debug, Clone, Default)]
pub struct ElementEdit {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub description: Option<String>,
    pub properties: Option<Map<String, Value>>,
}

impl ElementEdit {
    /// Merge this edit into existing element data. `None` fields are kept.
    pub fn apply_to(&self, data: &mut ElementData) {
        if let Some(name) = &self.name {
            data.name = name.clone();
        }
        if let Some(kind) = &self.kind {
            data.kind = kind.clone();
        }
        if let Some(description) = &self.description {
            data.description = description.clone();
        }
        if let Some(properties) = &self.properties {
            data.properties = properties.clone();
        }
    }
}

/// A node record. Position is absent until a drag, move, or layout run
/// assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub id: String,
    pub data: ElementData,
    pub position: Option<Position>,
}

/// An edge record. `source` and `target` must name live nodes for as long
/// as the edge exists; removing a node cascades to its incident edges.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    pub id: String,
    pub source: String,
    pub target: String,
    pub data: ElementData,
}

/// A node removal result: the node plus every incident edge that was
/// cascade-removed with it, in one logical operation.
#[derive(Debug, Clone)]
pub struct RemovedNode {
    pub node: NodeRecord,
    pub edges: Vec<EdgeRecord>,
}

/// Full point-in-time copy of the store contents.
#[derive(Debug, Clone, Default)]
pub struct GraphData {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

/// Visual state tags pushed to the renderer in one batched call per
/// selection transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Selected,
    Active,
    Inactive,
}

/// Batched element-id to visual-state assignment. An empty map is the
/// neutral state (no activity tagging at all).
pub type VisualStateMap = BTreeMap<String, Vec<VisualState>>;

/// Force-directed layout parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutConfig {
    /// Preferred edge length in world units.
    pub link_distance: f64,
    /// Maximum iterations before the run stops on its own.
    pub iterations: usize,
    /// Pairwise repulsion strength.
    pub repulsion: f64,
    /// Spring attraction strength along edges.
    pub attraction: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            link_distance: 160.0,
            iterations: 200,
            repulsion: 120.0,
            attraction: 0.03,
        }
    }
}

/// Click and drag events emitted by the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphEvent {
    NodeClick { id: String, additive: bool },
    EdgeClick { id: String, additive: bool },
    CanvasClick { position: Position },
    NodeDragStart { id: String },
    NodeDragEnd { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The named node or edge does not exist in the store.
    NotFound(String),
    /// An element with this id already exists within its kind.
    Duplicate(String),
    /// An edge references a node id that is not in the store.
    InvalidEdge(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "Element not found: {id}"),
            StoreError::Duplicate(id) => write!(f, "Element already exists: {id}"),
            StoreError::InvalidEdge(e) => write!(f, "Invalid edge: {e}"),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Boxed future for the store's asynchronous operations, keeping the trait
/// object-safe so commands can hold `Arc<dyn GraphStore>`.
pub type StoreFuture<'a> = BoxFuture<'a, StoreResult<()>>;

/// Contract consumed by the core. Implementers substitute any rendering
/// engine that satisfies the same operation set without touching the core.
pub trait GraphStore: Send + Sync {
    fn add_node(&self, record: NodeRecord) -> StoreResult<()>;

    /// Remove a node and cascade-remove its incident edges. Returns the
    /// removed records so the caller can build a revert command.
    fn remove_node(&self, id: &str) -> StoreResult<RemovedNode>;

    fn update_node(&self, id: &str, edit: &ElementEdit) -> StoreResult<()>;

    fn add_edge(&self, record: EdgeRecord) -> StoreResult<()>;

    fn remove_edge(&self, id: &str) -> StoreResult<EdgeRecord>;

    fn update_edge(&self, id: &str, edit: &ElementEdit) -> StoreResult<()>;

    fn node(&self, id: &str) -> Option<NodeRecord>;

    fn edge(&self, id: &str) -> Option<EdgeRecord>;

    /// Every edge whose source or target is the given node.
    fn related_edges(&self, node_id: &str) -> Vec<EdgeRecord>;

    /// Current resolved position of a node, if it has one.
    fn position(&self, node_id: &str) -> Option<Position>;

    /// Full copy of the current dataset.
    fn graph_data(&self) -> GraphData;

    /// Move the named nodes to absolute coordinates, optionally animated.
    /// Ids absent from the store are silently skipped.
    fn move_nodes_to(&self, positions: PositionMap, animate: bool) -> StoreFuture<'_>;

    /// Run the asynchronous force-directed layout to convergence or until
    /// superseded by `stop_layout` / a newer `run_layout` call.
    fn run_layout(&self, config: LayoutConfig) -> StoreFuture<'_>;

    /// Halt any in-progress layout run.
    fn stop_layout(&self);

    /// Replace the visual-state tagging wholesale, one batched call per
    /// selection transition. An empty map clears all tags.
    fn set_visual_states(&self, states: VisualStateMap, animate: bool);

    /// Click/drag event stream drained by the session.
    fn subscribe(&self) -> Receiver<GraphEvent>;
}

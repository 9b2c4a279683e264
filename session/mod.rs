/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The editing session controller.
//!
//! `GraphSession` owns the selection, the draft workflow, and the history
//! engine, and wires canvas events into store mutations. Every mutation
//! follows the same shape: mutate the store, record the inverse pair on
//! the history engine, write the graph blob through, fan out status and
//! flag events to the shell.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::draft::{CanvasClickAction, DraftWorkflow, NodeClickAction, Tool};
use crate::graph::{
    EdgeRecord, ElementData, ElementEdit, ElementKind, GraphEvent, GraphStore, LayoutConfig,
    NodeRecord, Position, PositionMap, StoreError,
};
use crate::history::{Command, DEFAULT_HISTORY_CAPACITY, HistoryEngine, HistoryFlags};
use crate::persistence::types::PersistedGraph;
use crate::persistence::{BlobStore, PersistResult, graph_key};
use crate::selection::{Selection, compute_highlight, visual_states_for};
use crate::view::{self, ViewRecord, ViewSnapshot};

/// Placeholder data for a freshly staged draft.
const DRAFT_NAME: &str = "Untitled";
const DRAFT_NODE_KIND: &str = "entity";
const DRAFT_EDGE_KIND: &str = "related-to";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub workspace_id: String,
    pub history_capacity: usize,
    pub layout: LayoutConfig,
    /// When false, mutations stay in memory and nothing is written through.
    pub autosave: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            workspace_id: "default".to_string(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            layout: LayoutConfig::default(),
            autosave: true,
        }
    }
}

/// What the inspector panel should show. `Single` carries the element's
/// live data so the panel never re-queries the store.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectorSelection {
    None,
    Single {
        kind: ElementKind,
        id: String,
        data: ElementData,
    },
    Multiple {
        count: usize,
    },
}

/// Notifications fanned out to the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SelectionChanged(InspectorSelection),
    History(HistoryFlags),
    /// A draft was staged and awaits confirm or cancel in the inspector.
    DraftStaged { kind: ElementKind, id: String },
    Status(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Store(StoreError),
    /// The session was torn down while an operation was in flight.
    TornDown,
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        SessionError::Store(err)
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Store(err) => err.fmt(f),
            SessionError::TornDown => write!(f, "Session is torn down"),
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

pub struct GraphSession {
    store: Arc<dyn GraphStore>,
    blob: Arc<dyn BlobStore>,
    history: HistoryEngine,
    selection: Mutex<Selection>,
    workflow: Mutex<DraftWorkflow>,
    drag_origin: Mutex<Option<(String, Position)>>,
    config: SessionConfig,
    /// Cleared by `teardown`; async paths re-check it after every await.
    alive: Arc<AtomicBool>,
    /// Set when a blob write failed; the next successful write announces
    /// that saving has recovered.
    persist_retry_pending: AtomicBool,
    graph_events: Receiver<GraphEvent>,
    events_tx: Sender<SessionEvent>,
    events_rx: Receiver<SessionEvent>,
}

impl GraphSession {
    pub fn new(
        store: Arc<dyn GraphStore>,
        blob: Arc<dyn BlobStore>,
        config: SessionConfig,
    ) -> Self {
        let (events_tx, events_rx) = unbounded();
        let graph_events = store.subscribe();
        Self {
            history: HistoryEngine::new(config.history_capacity),
            store,
            blob,
            selection: Mutex::new(Selection::new()),
            workflow: Mutex::new(DraftWorkflow::new()),
            drag_origin: Mutex::new(None),
            config,
            alive: Arc::new(AtomicBool::new(true)),
            persist_retry_pending: AtomicBool::new(false),
            graph_events,
            events_tx,
            events_rx,
        }
    }

    /// Shell-facing notification stream.
    pub fn events(&self) -> Receiver<SessionEvent> {
        self.events_rx.clone()
    }

    pub fn history_flags(&self) -> HistoryFlags {
        self.history.flags()
    }

    pub fn inspector_selection(&self) -> InspectorSelection {
        let selection = self.selection.lock();
        if let Some((kind, id)) = selection.single() {
            let data = match kind {
                ElementKind::Node => self.store.node(id).map(|n| n.data),
                ElementKind::Edge => self.store.edge(id).map(|e| e.data),
            }
            .unwrap_or_default();
            InspectorSelection::Single {
                kind,
                id: id.to_string(),
                data,
            }
        } else if selection.is_empty() {
            InspectorSelection::None
        } else {
            InspectorSelection::Multiple {
                count: selection.len(),
            }
        }
    }

    pub fn tool(&self) -> Tool {
        self.workflow.lock().tool()
    }

    /// Populate the store from the persisted workspace blob. A missing
    /// blob seeds the starter template; an unreadable blob is reported and
    /// replaced by the template rather than aborting the session.
    pub fn load_workspace(&self) -> SessionResult<()> {
        let key = graph_key(&self.config.workspace_id);
        let data = match self.blob.read(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<PersistedGraph>(&raw) {
                Ok(doc) => doc.into_data(),
                Err(e) => {
                    log::warn!("unreadable workspace blob at {key}: {e}");
                    self.emit(SessionEvent::Status(
                        "Saved workspace could not be read; starting fresh".to_string(),
                    ));
                    starter_template()
                }
            },
            Ok(None) => starter_template(),
            Err(e) => {
                log::warn!("workspace read failed at {key}: {e}");
                self.emit(SessionEvent::Status(
                    "Saved workspace could not be read; starting fresh".to_string(),
                ));
                starter_template()
            }
        };

        for node in data.nodes {
            self.store.add_node(node)?;
        }
        for edge in data.edges {
            self.store.add_edge(edge)?;
        }
        self.persist_graph();
        self.refresh();
        Ok(())
    }

    /// Drain pending canvas events. The shell calls this once per frame.
    pub fn pump_events(&self) {
        while let Ok(event) = self.graph_events.try_recv() {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&self, event: GraphEvent) {
        if !self.alive.load(Ordering::SeqCst) {
            return;
        }
        match event {
            GraphEvent::NodeClick { id, additive } => self.on_node_click(&id, additive),
            GraphEvent::EdgeClick { id, additive } => self.on_edge_click(&id, additive),
            GraphEvent::CanvasClick { position } => self.on_canvas_click(position),
            GraphEvent::NodeDragStart { id } => {
                let origin = self.store.position(&id);
                *self.drag_origin.lock() = origin.map(|p| (id, p));
            }
            GraphEvent::NodeDragEnd { id } => self.on_drag_end(&id),
        }
    }

    pub fn set_tool(&self, tool: Tool) {
        let abandoned = self.workflow.lock().set_tool(tool);
        if let Some((kind, id)) = abandoned {
            self.discard_draft(kind, &id);
        }
        self.refresh();
    }

    /// Select every node.
    pub fn select_all(&self) {
        let ids: Vec<String> = self.store.graph_data().nodes.into_iter().map(|n| n.id).collect();
        self.selection.lock().replace_nodes(ids);
        self.refresh();
    }

    /// Escape: cancel a staged draft if one exists, otherwise clear the
    /// selection.
    pub fn cancel(&self) {
        if self.workflow.lock().pending().is_some() {
            self.cancel_draft();
        } else {
            self.selection.lock().clear();
            self.refresh();
        }
    }

    /// Fill in the staged draft from the inspector and make it permanent.
    /// Confirmed elements simply exist; creation is not a history entry.
    pub fn confirm_draft(&self, edit: &ElementEdit) -> SessionResult<()> {
        let Some((kind, id)) = self.workflow.lock().take_pending() else {
            return Ok(());
        };
        match kind {
            ElementKind::Node => self.store.update_node(&id, edit)?,
            ElementKind::Edge => self.store.update_edge(&id, edit)?,
        }
        self.selection.lock().click(kind, &id);
        self.persist_graph();
        let name = edit.name.clone().unwrap_or_else(|| DRAFT_NAME.to_string());
        self.emit(SessionEvent::Status(format!("Created {name}")));
        self.refresh();
        Ok(())
    }

    /// Remove the staged draft without leaving any trace in history.
    pub fn cancel_draft(&self) {
        let Some((kind, id)) = self.workflow.lock().take_pending() else {
            return;
        };
        self.discard_draft(kind, &id);
        self.refresh();
    }

    /// Apply an inspector edit to a committed element as an undoable
    /// command.
    pub fn save_inspector_edit(
        &self,
        kind: ElementKind,
        id: &str,
        edit: &ElementEdit,
    ) -> SessionResult<()> {
        let before = match kind {
            ElementKind::Node => self.store.node(id).map(|n| n.data),
            ElementKind::Edge => self.store.edge(id).map(|e| e.data),
        }
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        match kind {
            ElementKind::Node => self.store.update_node(id, edit)?,
            ElementKind::Edge => self.store.update_edge(id, edit)?,
        }

        let after_edit = edit.clone();
        let before_edit = full_edit(&before);
        let id_owned = id.to_string();
        let store_fwd = Arc::clone(&self.store);
        let store_back = Arc::clone(&self.store);
        self.history.record(Command::new(
            format!("Edit {}", display_name(&before, id)),
            move || {
                let store = Arc::clone(&store_fwd);
                let edit = after_edit.clone();
                let id = id_owned.clone();
                Box::pin(async move { apply_edit(&*store, kind, &id, &edit) })
            },
            {
                let id_owned = id.to_string();
                move || {
                    let store = Arc::clone(&store_back);
                    let edit = before_edit.clone();
                    let id = id_owned.clone();
                    Box::pin(async move { apply_edit(&*store, kind, &id, &edit) })
                }
            },
        ));

        self.persist_graph();
        self.emit(SessionEvent::History(self.history.flags()));
        self.refresh();
        Ok(())
    }

    /// Delete an element as an undoable command. Deleting a node cascades
    /// to its incident edges, and undo restores the whole set.
    pub fn delete_element(&self, kind: ElementKind, id: &str) -> SessionResult<()> {
        let name = match kind {
            ElementKind::Node => {
                let removed = self.store.remove_node(id)?;
                {
                    let mut selection = self.selection.lock();
                    selection.remove(ElementKind::Node, id);
                    for edge in &removed.edges {
                        selection.remove(ElementKind::Edge, &edge.id);
                    }
                }
                let name = display_name(&removed.node.data, id);
                let id_owned = id.to_string();
                let store_fwd = Arc::clone(&self.store);
                let store_back = Arc::clone(&self.store);
                let restore = removed.clone();
                self.history.record(Command::new(
                    format!("Delete {name}"),
                    move || {
                        let store = Arc::clone(&store_fwd);
                        let id = id_owned.clone();
                        Box::pin(async move { store.remove_node(&id).map(|_| ()) })
                    },
                    move || {
                        let store = Arc::clone(&store_back);
                        let restore = restore.clone();
                        Box::pin(async move {
                            store.add_node(restore.node.clone())?;
                            for edge in &restore.edges {
                                store.add_edge(edge.clone())?;
                            }
                            Ok(())
                        })
                    },
                ));
                name
            }
            ElementKind::Edge => {
                let removed = self.store.remove_edge(id)?;
                self.selection.lock().remove(ElementKind::Edge, id);
                let name = display_name(&removed.data, id);
                let id_owned = id.to_string();
                let store_fwd = Arc::clone(&self.store);
                let store_back = Arc::clone(&self.store);
                self.history.record(Command::new(
                    format!("Delete {name}"),
                    move || {
                        let store = Arc::clone(&store_fwd);
                        let id = id_owned.clone();
                        Box::pin(async move { store.remove_edge(&id).map(|_| ()) })
                    },
                    move || {
                        let store = Arc::clone(&store_back);
                        let record = removed.clone();
                        Box::pin(async move { store.add_edge(record.clone()) })
                    },
                ));
                name
            }
        };

        self.persist_graph();
        self.emit(SessionEvent::History(self.history.flags()));
        self.emit(SessionEvent::Status(format!("Deleted {name}")));
        self.refresh();
        Ok(())
    }

    pub async fn undo(&self) -> SessionResult<()> {
        self.check_alive()?;
        let name = self.history.undo().await?;
        self.check_alive()?;
        if let Some(name) = name {
            self.after_history_step(&format!("Undid: {name}"));
        }
        Ok(())
    }

    pub async fn redo(&self) -> SessionResult<()> {
        self.check_alive()?;
        let name = self.history.redo().await?;
        self.check_alive()?;
        if let Some(name) = name {
            self.after_history_step(&format!("Redid: {name}"));
        }
        Ok(())
    }

    /// Run the force layout as an undoable command: the before and after
    /// position snapshots become the command's revert and apply sides.
    pub async fn run_layout(&self) -> SessionResult<()> {
        self.check_alive()?;
        let before = ViewSnapshot::capture(&self.store.graph_data());
        self.store.run_layout(self.config.layout.clone()).await?;
        self.check_alive()?;
        let after = ViewSnapshot::capture(&self.store.graph_data());

        self.history.record(move_command(
            Arc::clone(&self.store),
            "Arrange layout",
            before.nodes,
            after.nodes,
            true,
        ));
        self.persist_graph();
        self.emit(SessionEvent::History(self.history.flags()));
        self.emit(SessionEvent::Status("Layout arranged".to_string()));
        Ok(())
    }

    /// Capture the current positions as a named saved view.
    pub fn save_view(&self, name: &str) -> PersistResult<ViewRecord> {
        let snapshot = ViewSnapshot::capture(&self.store.graph_data());
        let record = ViewRecord::new(name, self.config.layout.clone(), snapshot);
        match view::save_view(&*self.blob, &self.config.workspace_id, &record) {
            Ok(()) => {
                self.emit(SessionEvent::Status(format!("Saved view '{name}'")));
                Ok(record)
            }
            Err(e) => {
                log::warn!("saving view '{name}' failed: {e}");
                self.emit(SessionEvent::Status(
                    "View could not be saved".to_string(),
                ));
                Err(e)
            }
        }
    }

    pub fn saved_views(&self) -> PersistResult<Vec<ViewRecord>> {
        view::list_views(&*self.blob, &self.config.workspace_id)
    }

    /// Move the graph back to a saved view's positions, undoably.
    pub async fn restore_view(&self, record: &ViewRecord) -> SessionResult<()> {
        self.check_alive()?;
        let before = ViewSnapshot::capture(&self.store.graph_data());
        record.snapshot.restore(&*self.store, true).await?;
        self.check_alive()?;

        self.history.record(move_command(
            Arc::clone(&self.store),
            format!("Restore view '{}'", record.name),
            before.nodes,
            record.snapshot.nodes.clone(),
            true,
        ));
        self.persist_graph();
        self.emit(SessionEvent::History(self.history.flags()));
        self.emit(SessionEvent::Status(format!(
            "Restored view '{}'",
            record.name
        )));
        Ok(())
    }

    /// The whole dataset as a pretty-printed JSON document for export.
    pub fn export_graph(&self) -> String {
        let doc = PersistedGraph::from_data(&self.store.graph_data());
        serde_json::to_string_pretty(&doc).unwrap_or_else(|e| {
            log::warn!("export serialization failed: {e}");
            String::new()
        })
    }

    /// End the session. In-flight async operations observe this and bail
    /// with `TornDown` instead of touching the store again.
    pub fn teardown(&self) {
        self.alive.store(false, Ordering::SeqCst);
        self.store.stop_layout();
        self.history.clear();
    }

    fn check_alive(&self) -> SessionResult<()> {
        if self.alive.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(SessionError::TornDown)
        }
    }

    fn on_node_click(&self, id: &str, additive: bool) {
        self.cancel_draft_if_other(id);
        let action = self.workflow.lock().node_click(id);
        match action {
            NodeClickAction::Select => {
                let mut selection = self.selection.lock();
                if additive {
                    selection.toggle(ElementKind::Node, id);
                } else {
                    selection.click(ElementKind::Node, id);
                }
                drop(selection);
                self.refresh();
            }
            NodeClickAction::SourceArmed => {
                self.emit(SessionEvent::Status(
                    "Source set; click a target node".to_string(),
                ));
            }
            NodeClickAction::SourceDisarmed => {
                self.emit(SessionEvent::Status("Source cleared".to_string()));
            }
            NodeClickAction::CreateEdge { source } => {
                self.create_draft_edge(&source, id);
            }
        }
    }

    fn on_edge_click(&self, id: &str, additive: bool) {
        self.cancel_draft_if_other(id);
        let mut selection = self.selection.lock();
        if additive {
            selection.toggle(ElementKind::Edge, id);
        } else {
            selection.click(ElementKind::Edge, id);
        }
        drop(selection);
        self.refresh();
    }

    fn on_canvas_click(&self, position: Position) {
        if self.workflow.lock().pending().is_some() {
            self.cancel_draft();
        }
        let action = self.workflow.lock().canvas_click();
        match action {
            CanvasClickAction::ClearSelection => {
                self.selection.lock().clear();
                self.refresh();
            }
            CanvasClickAction::CreateNode => self.create_draft_node(position),
            CanvasClickAction::SourceCleared => {
                self.emit(SessionEvent::Status("Source cleared".to_string()));
            }
        }
    }

    /// A finished drag becomes an undoable single-node move.
    fn on_drag_end(&self, id: &str) {
        let Some((origin_id, origin)) = self.drag_origin.lock().take() else {
            return;
        };
        if origin_id != id {
            return;
        }
        let Some(current) = self.store.position(id) else {
            return;
        };
        if current == origin {
            return;
        }

        let mut before = PositionMap::new();
        before.insert(id.to_string(), origin);
        let mut after = PositionMap::new();
        after.insert(id.to_string(), current);

        let name = self
            .store
            .node(id)
            .map(|n| display_name(&n.data, id))
            .unwrap_or_else(|| id.to_string());
        self.history.record(move_command(
            Arc::clone(&self.store),
            format!("Move {name}"),
            before,
            after,
            false,
        ));
        self.persist_graph();
        self.emit(SessionEvent::History(self.history.flags()));
        self.emit(SessionEvent::Status(format!("Moved {name}")));
    }

    fn create_draft_node(&self, position: Position) {
        let id = format!("n_{}", Uuid::new_v4().simple());
        let record = NodeRecord {
            id: id.clone(),
            data: ElementData {
                name: DRAFT_NAME.to_string(),
                kind: DRAFT_NODE_KIND.to_string(),
                ..Default::default()
            },
            position: Some(position),
        };
        if let Err(e) = self.store.add_node(record) {
            log::warn!("draft node creation failed: {e}");
            return;
        }
        self.stage_draft(ElementKind::Node, id);
    }

    fn create_draft_edge(&self, source: &str, target: &str) {
        let id = format!("e_{}", Uuid::new_v4().simple());
        let record = EdgeRecord {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            data: ElementData {
                name: DRAFT_NAME.to_string(),
                kind: DRAFT_EDGE_KIND.to_string(),
                ..Default::default()
            },
        };
        if let Err(e) = self.store.add_edge(record) {
            log::warn!("draft edge creation failed: {e}");
            return;
        }
        self.stage_draft(ElementKind::Edge, id);
    }

    fn stage_draft(&self, kind: ElementKind, id: String) {
        self.workflow.lock().stage(kind, id.clone());
        self.selection.lock().click(kind, &id);
        self.emit(SessionEvent::DraftStaged { kind, id });
        self.refresh();
    }

    fn cancel_draft_if_other(&self, clicked_id: &str) {
        let is_other = self
            .workflow
            .lock()
            .pending()
            .is_some_and(|(_, id)| id != clicked_id);
        if is_other {
            self.cancel_draft();
        }
    }

    fn discard_draft(&self, kind: ElementKind, id: &str) {
        let result = match kind {
            ElementKind::Node => self.store.remove_node(id).map(|_| ()),
            ElementKind::Edge => self.store.remove_edge(id).map(|_| ()),
        };
        if let Err(e) = result {
            log::warn!("draft discard failed: {e}");
        }
        self.selection.lock().remove(kind, id);
        self.persist_graph();
        self.emit(SessionEvent::Status("Draft discarded".to_string()));
    }

    fn after_history_step(&self, status: &str) {
        // A history step may have removed elements out from under the
        // selection; drop the stale ids before re-deriving highlight.
        {
            let mut selection = self.selection.lock();
            let stale_nodes: Vec<String> = selection
                .nodes()
                .filter(|id| self.store.node(id).is_none())
                .map(str::to_string)
                .collect();
            let stale_edges: Vec<String> = selection
                .edges()
                .filter(|id| self.store.edge(id).is_none())
                .map(str::to_string)
                .collect();
            for id in stale_nodes {
                selection.remove(ElementKind::Node, &id);
            }
            for id in stale_edges {
                selection.remove(ElementKind::Edge, &id);
            }
        }
        self.persist_graph();
        self.emit(SessionEvent::History(self.history.flags()));
        self.emit(SessionEvent::Status(status.to_string()));
        self.refresh();
    }

    /// Write-through persistence. Failure degrades the session instead of
    /// failing the mutation: the in-memory graph stays authoritative and
    /// the next mutation retries the write.
    fn persist_graph(&self) {
        if !self.config.autosave {
            return;
        }
        let key = graph_key(&self.config.workspace_id);
        let doc = PersistedGraph::from_data(&self.store.graph_data());
        let raw = match serde_json::to_string(&doc) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("workspace serialization failed: {e}");
                return;
            }
        };
        match self.blob.write(&key, &raw) {
            Ok(()) => {
                if self.persist_retry_pending.swap(false, Ordering::SeqCst) {
                    self.emit(SessionEvent::Status("Saving recovered".to_string()));
                }
            }
            Err(e) => {
                log::warn!("workspace write failed at {key}: {e}");
                if !self.persist_retry_pending.swap(true, Ordering::SeqCst) {
                    self.emit(SessionEvent::Status(
                        "Changes are not being saved".to_string(),
                    ));
                }
            }
        }
    }

    /// Re-derive highlight tagging and notify the inspector, one batched
    /// visual-state push per transition.
    fn refresh(&self) {
        let states = {
            let selection = self.selection.lock();
            visual_states_for(&compute_highlight(&selection, &self.store.graph_data()))
        };
        self.store.set_visual_states(states, true);
        self.emit(SessionEvent::SelectionChanged(self.inspector_selection()));
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events_tx.send(event);
    }
}

/// Build a command that moves nodes between two position snapshots.
fn move_command(
    store: Arc<dyn GraphStore>,
    name: impl Into<String>,
    before: PositionMap,
    after: PositionMap,
    animate: bool,
) -> Command {
    let store_fwd = Arc::clone(&store);
    Command::new(
        name,
        move || {
            let store = Arc::clone(&store_fwd);
            let after = after.clone();
            Box::pin(async move {
                store.stop_layout();
                store.move_nodes_to(after, animate).await
            })
        },
        move || {
            let store = Arc::clone(&store);
            let before = before.clone();
            Box::pin(async move {
                store.stop_layout();
                store.move_nodes_to(before, animate).await
            })
        },
    )
}

fn apply_edit(
    store: &dyn GraphStore,
    kind: ElementKind,
    id: &str,
    edit: &ElementEdit,
) -> Result<(), StoreError> {
    match kind {
        ElementKind::Node => store.update_node(id, edit),
        ElementKind::Edge => store.update_edge(id, edit),
    }
}

/// An edit that restores every field of the captured data.
fn full_edit(data: &ElementData) -> ElementEdit {
    ElementEdit {
        name: Some(data.name.clone()),
        kind: Some(data.kind.clone()),
        description: Some(data.description.clone()),
        properties: Some(data.properties.clone()),
    }
}

fn display_name(data: &ElementData, id: &str) -> String {
    if data.name.is_empty() {
        id.to_string()
    } else {
        data.name.clone()
    }
}

/// Starter content for a workspace that has never been saved.
fn starter_template() -> crate::graph::GraphData {
    let node = |id: &str, name: &str, x: f64, y: f64| NodeRecord {
        id: id.to_string(),
        data: ElementData {
            name: name.to_string(),
            kind: DRAFT_NODE_KIND.to_string(),
            ..Default::default()
        },
        position: Some(Position::new(x, y)),
    };
    let edge = |id: &str, s: &str, t: &str| EdgeRecord {
        id: id.to_string(),
        source: s.to_string(),
        target: t.to_string(),
        data: ElementData {
            name: "related to".to_string(),
            kind: DRAFT_EDGE_KIND.to_string(),
            ..Default::default()
        },
    };
    crate::graph::GraphData {
        nodes: vec![
            node("start_a", "Alpha", -120.0, 0.0),
            node("start_b", "Beta", 120.0, 0.0),
            node("start_c", "Gamma", 0.0, 140.0),
        ],
        edges: vec![edge("start_ab", "start_a", "start_b"), edge("start_bc", "start_b", "start_c")],
    }
}

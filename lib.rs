/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Interaction and history core for a local-first graph editing surface.
//!
//! The rendering engine, inspector form, and page chrome are external
//! collaborators. This crate owns the parts that make direct manipulation
//! of a mutable graph safe and recoverable:
//!
//! - `graph`: the graph store contract plus an in-memory reference store
//! - `selection`: multi-select state and derived highlight computation
//! - `history`: the command-based undo/redo engine
//! - `view`: position snapshots and named, persisted saved views
//! - `draft`: the staged node/edge creation workflow
//! - `session`: the controller wiring events, commands, and persistence
//! - `input`: the keyboard undo/redo surface
//! - `persistence`: the key-value blob store boundary

pub mod draft;
pub mod graph;
pub mod history;
pub mod input;
pub mod persistence;
pub mod selection;
pub mod session;
pub mod view;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use graph::{
    ElementData, ElementEdit, ElementKind, GraphEvent, GraphStore, LayoutConfig, Position,
    StoreError,
};
pub use draft::Tool;
pub use history::{Command, HistoryEngine, HistoryFlags};
pub use input::{EditorAction, action_for};
pub use selection::Selection;
pub use session::{
    GraphSession, InspectorSelection, SessionConfig, SessionError, SessionEvent,
};
pub use view::{ViewRecord, ViewSnapshot};

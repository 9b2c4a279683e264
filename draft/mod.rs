/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Tool modes and the staged element-creation workflow.
//!
//! A draft element already exists in the store (so the canvas shows it)
//! but is provisional until the inspector confirms it. This module is the
//! pure state machine; the session owns the store mutations each decision
//! calls for.

use crate::graph::ElementKind;

/// Active interaction tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Select,
    AddNode,
    AddEdge,
}

/// Workflow state. `AwaitingEdgeSource` only occurs under the `AddEdge`
/// tool; `Pending` can hold a draft of either kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftState {
    Idle,
    AwaitingEdgeSource { source: Option<String> },
    Pending { kind: ElementKind, id: String },
}

/// What the session must do after a node click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeClickAction {
    /// Routine selection handling.
    Select,
    /// The node became the armed edge source; mark it visually.
    SourceArmed,
    /// The armed source was clicked again and is no longer armed.
    SourceDisarmed,
    /// Create a draft edge from `source` to the clicked node.
    CreateEdge { source: String },
}

/// What the session must do after a background click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasClickAction {
    /// Routine clear-selection handling.
    ClearSelection,
    /// Create a draft node at the click position.
    CreateNode,
    /// The armed edge source was dropped without creating anything.
    SourceCleared,
}

#[derive(Debug, Default)]
pub struct DraftWorkflow {
    tool: Tool,
    state: DraftState,
}

impl Default for DraftState {
    fn default() -> Self {
        DraftState::Idle
    }
}

impl DraftWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    /// The staged draft, if any.
    pub fn pending(&self) -> Option<(ElementKind, &str)> {
        match &self.state {
            DraftState::Pending { kind, id } => Some((*kind, id.as_str())),
            _ => None,
        }
    }

    pub fn armed_source(&self) -> Option<&str> {
        match &self.state {
            DraftState::AwaitingEdgeSource { source } => source.as_deref(),
            _ => None,
        }
    }

    /// Switch tools. Any staged draft is handed back so the caller can
    /// remove it from the store; an armed source is simply dropped.
    pub fn set_tool(&mut self, tool: Tool) -> Option<(ElementKind, String)> {
        let abandoned = self.take_pending();
        self.tool = tool;
        self.state = self.base_state();
        abandoned
    }

    /// Route a node click through the active tool.
    pub fn node_click(&mut self, id: &str) -> NodeClickAction {
        match self.tool {
            Tool::Select | Tool::AddNode => NodeClickAction::Select,
            Tool::AddEdge => match &self.state {
                DraftState::AwaitingEdgeSource { source: Some(source) } if source == id => {
                    self.state = DraftState::AwaitingEdgeSource { source: None };
                    NodeClickAction::SourceDisarmed
                }
                DraftState::AwaitingEdgeSource { source: Some(source) } => {
                    NodeClickAction::CreateEdge {
                        source: source.clone(),
                    }
                }
                _ => {
                    self.state = DraftState::AwaitingEdgeSource {
                        source: Some(id.to_string()),
                    };
                    NodeClickAction::SourceArmed
                }
            },
        }
    }

    /// Route a background click through the active tool.
    pub fn canvas_click(&mut self) -> CanvasClickAction {
        match self.tool {
            Tool::Select => CanvasClickAction::ClearSelection,
            Tool::AddNode => CanvasClickAction::CreateNode,
            Tool::AddEdge => {
                if self.armed_source().is_some() {
                    self.state = DraftState::AwaitingEdgeSource { source: None };
                    CanvasClickAction::SourceCleared
                } else {
                    CanvasClickAction::ClearSelection
                }
            }
        }
    }

    /// Mark a just-created element as the staged draft.
    pub fn stage(&mut self, kind: ElementKind, id: impl Into<String>) {
        self.state = DraftState::Pending {
            kind,
            id: id.into(),
        };
    }

    /// Take the staged draft out of the workflow, returning to the active
    /// tool's base state. Used by both confirm and cancel.
    pub fn take_pending(&mut self) -> Option<(ElementKind, String)> {
        if let DraftState::Pending { kind, id } = std::mem::take(&mut self.state) {
            self.state = self.base_state();
            Some((kind, id))
        } else {
            None
        }
    }

    fn base_state(&self) -> DraftState {
        match self.tool {
            Tool::Select | Tool::AddNode => DraftState::Idle,
            Tool::AddEdge => DraftState::AwaitingEdgeSource { source: None },
        }
    }
}

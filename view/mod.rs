/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Position snapshots and named saved views.
//!
//! A snapshot is a plain node-id-to-position map over the nodes that have
//! resolved positions at capture time. Restores are tolerant: an id whose
//! node has since been deleted is skipped, and any running layout is
//! stopped first so it cannot overwrite the restored coordinates.

use std::collections::BTreeMap;

use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use crate::graph::{GraphData, GraphStore, LayoutConfig, Position, StoreResult};
use crate::persistence::types::{PersistedViewRecord, PersistedViews};
use crate::persistence::{BlobStore, PersistError, PersistResult, views_key};

/// Point-in-time copy of node positions. Nodes without a resolved position
/// are omitted rather than recorded at a placeholder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSnapshot {
    pub nodes: BTreeMap<String, Position>,
}

impl ViewSnapshot {
    pub fn capture(data: &GraphData) -> Self {
        let mut nodes = BTreeMap::new();
        for node in &data.nodes {
            if let Some(position) = node.position {
                nodes.insert(node.id.clone(), position);
            }
        }
        Self { nodes }
    }

    /// Capture only the named nodes, for single-drag and partial-move
    /// commands.
    pub fn capture_nodes<'a>(
        data: &GraphData,
        ids: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut nodes = BTreeMap::new();
        for id in ids {
            if let Some(node) = data.nodes.iter().find(|n| n.id == id)
                && let Some(position) = node.position
            {
                nodes.insert(id.to_string(), position);
            }
        }
        Self { nodes }
    }

    /// Move the captured nodes back to their recorded positions. Stops any
    /// in-flight layout first; ids no longer in the store are skipped.
    pub async fn restore(&self, store: &dyn GraphStore, animate: bool) -> StoreResult<()> {
        store.stop_layout();
        store.move_nodes_to(self.nodes.clone(), animate).await
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A named, persisted snapshot plus the layout parameters in effect when
/// it was captured.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRecord {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub layout: LayoutConfig,
    pub snapshot: ViewSnapshot,
}

impl ViewRecord {
    pub fn new(name: impl Into<String>, layout: LayoutConfig, snapshot: ViewSnapshot) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            name: name.into(),
            created_at: time::OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_default(),
            layout,
            snapshot,
        }
    }

    fn to_persisted(&self) -> PersistedViewRecord {
        PersistedViewRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.created_at.clone(),
            layout: self.layout.clone(),
            nodes: self
                .snapshot
                .nodes
                .iter()
                .map(|(id, p)| (id.clone(), (*p).into()))
                .collect(),
        }
    }

    fn from_persisted(record: PersistedViewRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            created_at: record.created_at,
            layout: record.layout,
            snapshot: ViewSnapshot {
                nodes: record
                    .nodes
                    .into_iter()
                    .map(|(id, p)| (id, p.into()))
                    .collect(),
            },
        }
    }
}

fn load_views(blob: &dyn BlobStore, workspace_id: &str) -> PersistResult<PersistedViews> {
    let key = views_key(workspace_id);
    let Some(raw) = blob.read(&key)? else {
        return Ok(PersistedViews::default());
    };
    match serde_json::from_str(&raw) {
        Ok(views) => Ok(views),
        Err(e) => {
            // A corrupt list must not block saving new views.
            log::warn!("discarding unreadable saved-view list at {key}: {e}");
            Ok(PersistedViews::default())
        }
    }
}

fn store_views(
    blob: &dyn BlobStore,
    workspace_id: &str,
    views: &PersistedViews,
) -> PersistResult<()> {
    let raw = serde_json::to_string(views).map_err(|e| PersistError::Corrupt(e.to_string()))?;
    blob.write(&views_key(workspace_id), &raw)
}

/// Prepend a view to the workspace's saved-view list.
pub fn save_view(
    blob: &dyn BlobStore,
    workspace_id: &str,
    record: &ViewRecord,
) -> PersistResult<()> {
    let mut views = load_views(blob, workspace_id)?;
    views.views.insert(0, record.to_persisted());
    store_views(blob, workspace_id, &views)
}

/// Saved views, newest first.
pub fn list_views(blob: &dyn BlobStore, workspace_id: &str) -> PersistResult<Vec<ViewRecord>> {
    Ok(load_views(blob, workspace_id)?
        .views
        .into_iter()
        .map(ViewRecord::from_persisted)
        .collect())
}

/// Remove a view by id. Removing an unknown id is a no-op.
pub fn delete_view(blob: &dyn BlobStore, workspace_id: &str, view_id: &str) -> PersistResult<()> {
    let mut views = load_views(blob, workspace_id)?;
    views.views.retain(|v| v.id != view_id);
    store_views(blob, workspace_id, &views)
}

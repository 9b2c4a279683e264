/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Serialized document shapes for the workspace blobs.
//!
//! These are the on-disk contract and evolve carefully: fields are optional
//! or defaulted so older blobs keep loading.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::graph::{
    EdgeRecord, ElementData, GraphData, LayoutConfig, NodeRecord, Position,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedGraph {
    pub nodes: Vec<PersistedNode>,
    pub edges: Vec<PersistedEdge>,
    /// Unix seconds of the write, informational only.
    #[serde(default)]
    pub timestamp_secs: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
}

/// Saved-view list blob, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedViews {
    pub views: Vec<PersistedViewRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedViewRecord {
    pub id: String,
    pub name: String,
    /// RFC 3339 capture time.
    pub created_at: String,
    pub layout: LayoutConfig,
    /// Node id to captured position.
    pub nodes: BTreeMap<String, PersistedPosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistedPosition {
    pub x: f64,
    pub y: f64,
}

impl From<Position> for PersistedPosition {
    fn from(p: Position) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PersistedPosition> for Position {
    fn from(p: PersistedPosition) -> Self {
        Position::new(p.x, p.y)
    }
}

impl PersistedGraph {
    pub fn from_data(data: &GraphData) -> Self {
        Self {
            nodes: data
                .nodes
                .iter()
                .map(|node| PersistedNode {
                    id: node.id.clone(),
                    name: node.data.name.clone(),
                    kind: node.data.kind.clone(),
                    description: node.data.description.clone(),
                    properties: node.data.properties.clone(),
                    x: node.position.map(|p| p.x),
                    y: node.position.map(|p| p.y),
                })
                .collect(),
            edges: data
                .edges
                .iter()
                .map(|edge| PersistedEdge {
                    id: edge.id.clone(),
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    name: edge.data.name.clone(),
                    kind: edge.data.kind.clone(),
                    description: edge.data.description.clone(),
                    properties: edge.data.properties.clone(),
                })
                .collect(),
            timestamp_secs: time::OffsetDateTime::now_utc().unix_timestamp(),
        }
    }

    pub fn into_data(self) -> GraphData {
        GraphData {
            nodes: self
                .nodes
                .into_iter()
                .map(|node| NodeRecord {
                    position: match (node.x, node.y) {
                        (Some(x), Some(y)) => Some(Position::new(x, y)),
                        _ => None,
                    },
                    id: node.id,
                    data: ElementData {
                        name: node.name,
                        kind: node.kind,
                        description: node.description,
                        properties: node.properties,
                    },
                })
                .collect(),
            edges: self
                .edges
                .into_iter()
                .map(|edge| EdgeRecord {
                    id: edge.id,
                    source: edge.source,
                    target: edge.target,
                    data: ElementData {
                        name: edge.name,
                        kind: edge.kind,
                        description: edge.description,
                        properties: edge.properties,
                    },
                })
                .collect(),
        }
    }
}

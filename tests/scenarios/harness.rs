/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Shared scenario fixture: a session over the in-memory store and blob
//! store, with click/drag helpers that feed events the way a canvas would.

use std::sync::Arc;

use graphview::graph::memory::MemoryGraphStore;
use graphview::graph::{
    EdgeRecord, ElementData, GraphEvent, GraphStore, NodeRecord, Position,
};
use graphview::persistence::{BlobStore, MemoryBlobStore};
use graphview::session::{GraphSession, SessionConfig, SessionEvent};

pub struct Scene {
    pub store: Arc<MemoryGraphStore>,
    pub blob: Arc<MemoryBlobStore>,
    pub session: GraphSession,
}

impl Scene {
    pub fn empty() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let store = Arc::new(MemoryGraphStore::new());
        let blob = Arc::new(MemoryBlobStore::new());
        let session = GraphSession::new(
            Arc::clone(&store) as Arc<dyn GraphStore>,
            Arc::clone(&blob) as Arc<dyn BlobStore>,
            config,
        );
        Self {
            store,
            blob,
            session,
        }
    }

    /// Three nodes in a line with two edges: n1 -e12-> n2 -e23-> n3.
    pub fn seeded() -> Self {
        let scene = Self::empty();
        scene.add_node("n1", 0.0, 0.0);
        scene.add_node("n2", 100.0, 0.0);
        scene.add_node("n3", 200.0, 0.0);
        scene.add_edge("e12", "n1", "n2");
        scene.add_edge("e23", "n2", "n3");
        scene
    }

    pub fn add_node(&self, id: &str, x: f64, y: f64) {
        self.store
            .add_node(NodeRecord {
                id: id.to_string(),
                data: ElementData {
                    name: id.to_string(),
                    kind: "entity".to_string(),
                    ..Default::default()
                },
                position: Some(Position::new(x, y)),
            })
            .unwrap();
    }

    pub fn add_edge(&self, id: &str, source: &str, target: &str) {
        self.store
            .add_edge(EdgeRecord {
                id: id.to_string(),
                source: source.to_string(),
                target: target.to_string(),
                data: ElementData {
                    name: id.to_string(),
                    kind: "related-to".to_string(),
                    ..Default::default()
                },
            })
            .unwrap();
    }

    pub fn click_node(&self, id: &str, additive: bool) {
        self.session.handle_event(GraphEvent::NodeClick {
            id: id.to_string(),
            additive,
        });
    }

    pub fn click_edge(&self, id: &str, additive: bool) {
        self.session.handle_event(GraphEvent::EdgeClick {
            id: id.to_string(),
            additive,
        });
    }

    pub fn click_canvas(&self, x: f64, y: f64) {
        self.session.handle_event(GraphEvent::CanvasClick {
            position: Position::new(x, y),
        });
    }

    /// Simulate a complete drag: start, renderer position update, end.
    pub fn drag(&self, id: &str, x: f64, y: f64) {
        self.session.handle_event(GraphEvent::NodeDragStart {
            id: id.to_string(),
        });
        self.store.set_node_position(id, Position::new(x, y)).unwrap();
        self.session.handle_event(GraphEvent::NodeDragEnd {
            id: id.to_string(),
        });
    }

    /// Drain and return the status messages emitted so far.
    pub fn statuses(&self) -> Vec<String> {
        self.session
            .events()
            .try_iter()
            .filter_map(|event| match event {
                SessionEvent::Status(s) => Some(s),
                _ => None,
            })
            .collect()
    }
}

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::sync::Arc;

use graphview::graph::memory::MemoryGraphStore;
use graphview::graph::{ElementEdit, ElementKind, GraphStore, Position};
use graphview::persistence::types::PersistedGraph;
use graphview::persistence::{BlobStore, FileBlobStore, graph_key};
use graphview::session::{GraphSession, SessionConfig};

use crate::harness::Scene;

fn session_over(blob: Arc<dyn BlobStore>) -> (Arc<MemoryGraphStore>, GraphSession) {
    let store = Arc::new(MemoryGraphStore::new());
    let session = GraphSession::new(
        Arc::clone(&store) as Arc<dyn GraphStore>,
        blob,
        SessionConfig::default(),
    );
    (store, session)
}

#[test]
fn workspace_round_trips_across_sessions_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let blob: Arc<dyn BlobStore> = Arc::new(FileBlobStore::new(dir.path()).unwrap());

    let (store, session) = session_over(Arc::clone(&blob));
    session.load_workspace().unwrap();
    session
        .save_inspector_edit(
            ElementKind::Node,
            "start_a",
            &ElementEdit {
                name: Some("Renamed alpha".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    let expected = store.graph_data();
    drop(session);

    let (store2, session2) = session_over(blob);
    session2.load_workspace().unwrap();
    let reloaded = store2.graph_data();

    assert_eq!(reloaded.nodes.len(), expected.nodes.len());
    assert_eq!(reloaded.edges.len(), expected.edges.len());
    assert_eq!(
        store2.node("start_a").unwrap().data.name,
        "Renamed alpha"
    );
    assert_eq!(
        store2.position("start_a"),
        store.position("start_a")
    );
}

#[test]
fn every_mutation_writes_the_graph_blob_through() {
    let scene = Scene::seeded();
    let key = graph_key("default");
    assert!(!scene.blob.contains(&key));

    scene.drag("n1", 10.0, 10.0);
    let raw = scene.blob.read(&key).unwrap().expect("blob after drag");
    let doc: PersistedGraph = serde_json::from_str(&raw).unwrap();
    let n1 = doc.nodes.iter().find(|n| n.id == "n1").unwrap();
    assert_eq!((n1.x, n1.y), (Some(10.0), Some(10.0)));

    scene
        .session
        .delete_element(ElementKind::Edge, "e23")
        .unwrap();
    let raw = scene.blob.read(&key).unwrap().expect("blob after delete");
    let doc: PersistedGraph = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc.edges.len(), 1);
}

#[tokio::test]
async fn write_failure_keeps_memory_authoritative_and_retries() {
    let scene = Scene::seeded();
    let key = graph_key("default");

    scene.blob.set_write_fault(true);
    scene.drag("n1", 30.0, 0.0);
    assert_eq!(scene.store.position("n1"), Some(Position::new(30.0, 0.0)));
    assert!(!scene.blob.contains(&key));
    assert!(scene
        .statuses()
        .iter()
        .any(|s| s.contains("not being saved")));

    // Undo still works against the in-memory graph.
    scene.session.undo().await.unwrap();
    assert_eq!(scene.store.position("n1"), Some(Position::new(0.0, 0.0)));

    scene.blob.set_write_fault(false);
    scene.drag("n2", 130.0, 0.0);
    assert!(scene.blob.contains(&key));
    assert!(scene.statuses().iter().any(|s| s.contains("recovered")));
}

#[test]
fn degraded_status_is_reported_once_until_recovery() {
    let scene = Scene::seeded();
    scene.blob.set_write_fault(true);

    scene.drag("n1", 10.0, 0.0);
    scene.drag("n1", 20.0, 0.0);
    scene.drag("n1", 30.0, 0.0);

    let warnings = scene
        .statuses()
        .iter()
        .filter(|s| s.contains("not being saved"))
        .count();
    assert_eq!(warnings, 1);
}

#[test]
fn export_produces_a_parseable_document() {
    let scene = Scene::seeded();
    let json = scene.session.export_graph();

    let doc: PersistedGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(doc.nodes.len(), 3);
    assert_eq!(doc.edges.len(), 2);
    assert!(doc.timestamp_secs > 0);
}

#[test]
fn corrupt_graph_blob_falls_back_to_the_template() {
    let scene = Scene::empty();
    scene
        .blob
        .write(&graph_key("default"), "{\"nodes\": \"oops\"}")
        .unwrap();

    scene.session.load_workspace().unwrap();
    assert!(!scene.store.graph_data().nodes.is_empty());
    assert!(scene.statuses().iter().any(|s| s.contains("starting fresh")));
}

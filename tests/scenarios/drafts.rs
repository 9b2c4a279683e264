/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use graphview::draft::Tool;
use graphview::graph::{ElementEdit, ElementKind, GraphStore};
use graphview::session::{InspectorSelection, SessionEvent};

use crate::harness::Scene;

#[test]
fn node_draft_confirm_flow() {
    let scene = Scene::empty();
    scene.session.set_tool(Tool::AddNode);
    scene.click_canvas(25.0, 75.0);

    // The draft exists on the canvas and is selected for the inspector.
    let nodes = scene.store.graph_data().nodes;
    assert_eq!(nodes.len(), 1);
    let draft_id = nodes[0].id.clone();
    assert_eq!(nodes[0].data.name, "Untitled");
    assert_eq!(
        scene.session.inspector_selection(),
        InspectorSelection::Single {
            kind: ElementKind::Node,
            id: draft_id.clone(),
            data: nodes[0].data.clone(),
        }
    );

    scene
        .session
        .confirm_draft(&ElementEdit {
            name: Some("Billing service".to_string()),
            kind: Some("service".to_string()),
            ..Default::default()
        })
        .unwrap();

    let node = scene.store.node(&draft_id).unwrap();
    assert_eq!(node.data.name, "Billing service");
    assert_eq!(node.data.kind, "service");
    // Creation leaves no history entry.
    assert!(!scene.session.history_flags().can_undo);
}

#[test]
fn edge_draft_cancel_leaves_no_trace() {
    let scene = Scene::seeded();
    scene.session.set_tool(Tool::AddEdge);

    scene.click_node("n1", false);
    assert_eq!(scene.store.graph_data().edges.len(), 2);

    scene.click_node("n3", false);
    let edges = scene.store.graph_data().edges;
    assert_eq!(edges.len(), 3);
    let draft = edges.iter().find(|e| e.id.starts_with("e_")).unwrap();
    assert_eq!(draft.source, "n1");
    assert_eq!(draft.target, "n3");

    scene.session.cancel_draft();
    assert_eq!(scene.store.graph_data().edges.len(), 2);
    assert!(!scene.session.history_flags().can_undo);
    assert!(scene.session.history_flags() == Default::default());
}

#[test]
fn clicking_armed_source_again_disarms_it() {
    let scene = Scene::seeded();
    scene.session.set_tool(Tool::AddEdge);

    scene.click_node("n1", false);
    scene.click_node("n1", false);
    // Now n2 arms a fresh source instead of completing a pair.
    scene.click_node("n2", false);
    assert_eq!(scene.store.graph_data().edges.len(), 2);

    scene.click_node("n3", false);
    let edges = scene.store.graph_data().edges;
    let draft = edges.iter().find(|e| e.id.starts_with("e_")).unwrap();
    assert_eq!(draft.source, "n2");
}

#[test]
fn canvas_click_drops_armed_source_without_creating() {
    let scene = Scene::seeded();
    scene.session.set_tool(Tool::AddEdge);
    scene.click_node("n1", false);

    scene.click_canvas(300.0, 300.0);
    scene.click_node("n2", false);
    // n2 is the new armed source, so nothing has been created yet.
    assert_eq!(scene.store.graph_data().edges.len(), 2);
}

#[test]
fn clicking_elsewhere_cancels_a_staged_draft() {
    let scene = Scene::seeded();
    scene.session.set_tool(Tool::AddNode);
    scene.click_canvas(10.0, 10.0);
    assert_eq!(scene.store.graph_data().nodes.len(), 4);

    scene.click_node("n1", false);
    assert_eq!(scene.store.graph_data().nodes.len(), 3);
    assert!(scene
        .statuses()
        .iter()
        .any(|s| s.contains("Draft discarded")));
}

#[test]
fn escape_cancels_draft_before_clearing_selection() {
    let scene = Scene::seeded();
    scene.session.set_tool(Tool::AddNode);
    scene.click_canvas(10.0, 10.0);
    assert_eq!(scene.store.graph_data().nodes.len(), 4);

    scene.session.cancel();
    assert_eq!(scene.store.graph_data().nodes.len(), 3);

    scene.click_node("n1", false);
    scene.session.cancel();
    assert_eq!(scene.session.inspector_selection(), InspectorSelection::None);
    assert_eq!(scene.store.graph_data().nodes.len(), 3);
}

#[test]
fn draft_staged_event_reaches_the_shell() {
    let scene = Scene::empty();
    scene.session.set_tool(Tool::AddNode);
    scene.click_canvas(0.0, 0.0);

    let staged = scene.session.events().try_iter().find_map(|e| match e {
        SessionEvent::DraftStaged { kind, id } => Some((kind, id)),
        _ => None,
    });
    let (kind, id) = staged.expect("a staged-draft notification");
    assert_eq!(kind, ElementKind::Node);
    assert!(id.starts_with("n_"));
}

#[tokio::test]
async fn confirmed_element_participates_in_history_afterwards() {
    let scene = Scene::empty();
    scene.session.set_tool(Tool::AddNode);
    scene.click_canvas(0.0, 0.0);
    scene
        .session
        .confirm_draft(&ElementEdit {
            name: Some("Keeper".to_string()),
            ..Default::default()
        })
        .unwrap();
    let id = scene.store.graph_data().nodes[0].id.clone();

    scene.session.set_tool(Tool::Select);
    scene
        .session
        .delete_element(ElementKind::Node, &id)
        .unwrap();
    assert!(scene.store.node(&id).is_none());

    scene.session.undo().await.unwrap();
    assert_eq!(scene.store.node(&id).unwrap().data.name, "Keeper");
}

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use graphview::graph::{ElementData, ElementEdit, ElementKind, VisualState};
use graphview::session::{InspectorSelection, SessionEvent};

use crate::harness::Scene;

/// Data the harness seeds nodes with: name matches the id.
fn seeded_node_data(id: &str) -> ElementData {
    ElementData {
        name: id.to_string(),
        kind: "entity".to_string(),
        ..Default::default()
    }
}

#[test]
fn plain_click_replaces_additive_click_extends() {
    let scene = Scene::seeded();

    scene.click_node("n1", false);
    assert_eq!(
        scene.session.inspector_selection(),
        InspectorSelection::Single {
            kind: ElementKind::Node,
            id: "n1".to_string(),
            data: seeded_node_data("n1"),
        }
    );

    scene.click_node("n2", true);
    scene.click_edge("e23", true);
    assert_eq!(
        scene.session.inspector_selection(),
        InspectorSelection::Multiple { count: 3 }
    );

    // A second additive click on a member removes just that member.
    scene.click_node("n2", true);
    assert_eq!(
        scene.session.inspector_selection(),
        InspectorSelection::Multiple { count: 2 }
    );

    // A plain click collapses back to a single element.
    scene.click_node("n3", false);
    assert_eq!(
        scene.session.inspector_selection(),
        InspectorSelection::Single {
            kind: ElementKind::Node,
            id: "n3".to_string(),
            data: seeded_node_data("n3"),
        }
    );
}

#[test]
fn canvas_click_clears_everything() {
    let scene = Scene::seeded();
    scene.click_node("n1", false);
    scene.click_node("n2", true);

    scene.click_canvas(500.0, 500.0);
    assert_eq!(scene.session.inspector_selection(), InspectorSelection::None);
    assert!(scene.store.visual_states().is_empty());
}

#[test]
fn selecting_a_node_emphasizes_its_neighborhood() {
    let scene = Scene::seeded();
    scene.click_node("n2", false);

    let states = scene.store.visual_states();
    assert_eq!(
        states.get("n2"),
        Some(&vec![VisualState::Active, VisualState::Selected])
    );
    assert_eq!(states.get("n1"), Some(&vec![VisualState::Active]));
    assert_eq!(states.get("e12"), Some(&vec![VisualState::Active]));
    assert_eq!(states.get("e23"), Some(&vec![VisualState::Active]));
    assert_eq!(states.get("n3"), Some(&vec![VisualState::Active]));
}

#[test]
fn unrelated_elements_are_dimmed() {
    let scene = Scene::seeded();
    scene.add_node("island", 400.0, 400.0);
    scene.click_node("n1", false);

    let states = scene.store.visual_states();
    assert_eq!(states.get("island"), Some(&vec![VisualState::Inactive]));
    assert_eq!(states.get("n3"), Some(&vec![VisualState::Inactive]));
}

#[test]
fn each_selection_transition_pushes_exactly_one_batch() {
    let scene = Scene::seeded();
    let start = scene.store.visual_batch_count();

    scene.click_node("n1", false);
    scene.click_node("n2", true);
    scene.click_canvas(0.0, 0.0);

    assert_eq!(scene.store.visual_batch_count(), start + 3);
}

#[test]
fn selection_changes_notify_the_inspector() {
    let scene = Scene::seeded();
    scene.click_node("n1", false);
    scene.click_canvas(0.0, 0.0);

    let notifications: Vec<InspectorSelection> = scene
        .session
        .events()
        .try_iter()
        .filter_map(|event| match event {
            SessionEvent::SelectionChanged(sel) => Some(sel),
            _ => None,
        })
        .collect();

    assert!(notifications.contains(&InspectorSelection::Single {
        kind: ElementKind::Node,
        id: "n1".to_string(),
        data: seeded_node_data("n1"),
    }));
    assert_eq!(notifications.last(), Some(&InspectorSelection::None));
}

#[test]
fn select_all_then_cancel_round_trips() {
    let scene = Scene::seeded();
    scene.session.select_all();
    assert_eq!(
        scene.session.inspector_selection(),
        InspectorSelection::Multiple { count: 3 }
    );

    scene.session.cancel();
    assert_eq!(scene.session.inspector_selection(), InspectorSelection::None);
}

#[tokio::test]
async fn deleting_a_selected_element_prunes_the_selection() {
    let scene = Scene::seeded();
    scene.click_node("n1", false);
    scene.click_node("n2", true);

    scene
        .session
        .delete_element(ElementKind::Node, "n1")
        .unwrap();
    assert_eq!(
        scene.session.inspector_selection(),
        InspectorSelection::Single {
            kind: ElementKind::Node,
            id: "n2".to_string(),
            data: seeded_node_data("n2"),
        }
    );
}

#[test]
fn single_selection_carries_the_live_data() {
    let scene = Scene::seeded();
    scene.click_node("n1", false);

    scene
        .session
        .save_inspector_edit(
            ElementKind::Node,
            "n1",
            &ElementEdit {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    // The notification reflects the edit, not the stale seed data.
    match scene.session.inspector_selection() {
        InspectorSelection::Single { kind, id, data } => {
            assert_eq!(kind, ElementKind::Node);
            assert_eq!(id, "n1");
            assert_eq!(data.name, "Renamed");
            assert_eq!(data.kind, "entity");
        }
        other => panic!("expected a single selection, got {other:?}"),
    }
}

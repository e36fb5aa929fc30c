//! Tests for longer mutation sequences
//!
//! This tests:
//! - Id uniqueness after many inserts
//! - Index-stable moves inside and across parents
//! - Deep recursive removal
//! - Tab renumbering through add/remove/update chains
//! - Undo/redo across mixed edits

use sitecraft_editor::{
    tabs::TabUpdate, Component, ComponentType, Direction, Document, EditorOptions, Mutation, MutationError,
    MutationResult, PropsPatch, Tab, WebsiteData,
};
use sitecraft_model::{IdCollector, Visitor};

fn ids(nodes: &[sitecraft_editor::NodeRef]) -> Vec<&str> {
    nodes.iter().map(|n| n.id.as_str()).collect()
}

/// Root: parent-p holding a..e, parent-q holding x, y, z, w, v
fn two_parents() -> WebsiteData {
    let p = Component::new("parent-p", ComponentType::Column).with_children(
        ["a", "b", "c", "d", "e"]
            .into_iter()
            .map(|id| Component::new(id, ComponentType::Paragraph))
            .collect(),
    );
    let q = Component::new("parent-q", ComponentType::Column).with_children(
        ["x", "y", "z", "w", "v"]
            .into_iter()
            .map(|id| Component::new(id, ComponentType::Paragraph))
            .collect(),
    );

    let mut data = WebsiteData::single_tab("home", "Home");
    data.tabs[0] = Tab::new("home", "Home", 1).with_content(vec![p, q]);
    data
}

#[test]
fn test_ids_stay_unique_across_many_inserts() {
    let mut doc = Document::from_forest(WebsiteData::single_tab("home", "Home"), EditorOptions::default());

    let flex = doc
        .add_component(ComponentType::FlexContainer, PropsPatch::new(), None, None, false)
        .unwrap();
    for i in 0..20 {
        let column = doc
            .add_component(ComponentType::Column, PropsPatch::new(), Some(flex.as_str()), Some(i % 3), false)
            .unwrap();
        doc.add_component(ComponentType::Paragraph, PropsPatch::new(), Some(column.as_str()), None, false)
            .unwrap();
    }
    doc.add_tab("Second").unwrap();
    doc.add_component(ComponentType::Image, PropsPatch::new(), None, None, false).unwrap();

    let mut collector = IdCollector::default();
    collector.visit_forest(doc.forest());
    assert!(collector.duplicates.is_empty());
    assert_eq!(collector.ids.len(), 1 + 40 + 1);
}

#[test]
fn test_explicit_duplicate_insert_is_noop() {
    let mut doc = Document::from_forest(two_parents(), EditorOptions::default());

    let result = doc.apply(Mutation::InsertComponent {
        component: Component::new("c", ComponentType::Title),
        parent_id: Some("parent-q".to_string()),
        index: None,
    });

    assert_eq!(
        result,
        MutationResult::Noop {
            reason: MutationError::DuplicateId("c".to_string())
        }
    );
    assert_eq!(doc.version, 0);
}

#[test]
fn test_same_parent_move_lands_one_earlier() {
    let forest = two_parents();
    let mutation = Mutation::MoveToPosition {
        component_id: "c".to_string(),
        target_parent_id: Some("parent-p".to_string()),
        target_index: 4,
    };

    let next = mutation.apply(&forest).unwrap();
    let p = &next.active_tab().unwrap().content[0];
    assert_eq!(ids(p.children()), vec!["a", "b", "d", "c", "e"]);
}

#[test]
fn test_cross_parent_move_lands_exactly() {
    let forest = two_parents();
    let mutation = Mutation::MoveToPosition {
        component_id: "c".to_string(),
        target_parent_id: Some("parent-q".to_string()),
        target_index: 4,
    };

    let next = mutation.apply(&forest).unwrap();
    let content = &next.active_tab().unwrap().content;
    assert_eq!(ids(content[0].children()), vec!["a", "b", "d", "e"]);
    assert_eq!(content[1].children()[4].id, "c");
    assert_eq!(content[1].children().len(), 6);
}

#[test]
fn test_remove_deeply_nested() {
    let leaf = Component::new("deep", ComponentType::Paragraph);
    let level3 = Component::new("l3", ComponentType::Column)
        .with_children(vec![Component::new("before", ComponentType::Title), leaf, Component::new("after", ComponentType::Title)]);
    let level2 = Component::new("l2", ComponentType::FlexContainer).with_children(vec![level3]);
    let level1 = Component::new("l1", ComponentType::Column).with_children(vec![level2]);

    let mut forest = WebsiteData::single_tab("home", "Home");
    forest.tabs[0] = Tab::new("home", "Home", 1).with_content(vec![level1]);

    let next = Mutation::RemoveComponent {
        component_id: "deep".to_string(),
    }
    .apply(&forest)
    .unwrap();

    let l3 = &next.active_tab().unwrap().content[0].children()[0].children()[0];
    assert_eq!(ids(l3.children()), vec!["before", "after"]);
    assert!(!next.component_ids().contains("deep"));
}

#[test]
fn test_rejected_move_keeps_node() {
    let mut doc = Document::from_forest(two_parents(), EditorOptions::default());

    let result = doc.move_component_to_position("parent-p", Some("b"), 0);
    assert!(!result.is_applied());

    let result = doc.move_component_to_position("parent-p", Some("a"), 0);
    assert!(!result.is_applied());
    assert!(doc.find_component("parent-p").is_some());
    assert_eq!(doc.forest(), &two_parents());
}

#[test]
fn test_sibling_swaps() {
    let mut doc = Document::from_forest(two_parents(), EditorOptions::default());

    assert!(doc.move_component("a", Direction::Down).is_applied());
    assert!(doc.move_component("e", Direction::Up).is_applied());
    assert_eq!(
        doc.move_component("x", Direction::Up),
        MutationResult::Noop {
            reason: MutationError::AtBoundary("x".to_string())
        }
    );

    let p = &doc.forest().active_tab().unwrap().content[0];
    assert_eq!(ids(p.children()), vec!["b", "a", "c", "e", "d"]);
}

#[test]
fn test_tab_chain_keeps_positions_dense() {
    let mut doc = Document::from_forest(WebsiteData::single_tab("home", "Home"), EditorOptions::default());
    let second = doc.add_tab("Second").unwrap();
    let third = doc.add_tab("Third").unwrap();
    let fourth = doc.add_tab("Fourth").unwrap();

    doc.update_tab(&fourth, TabUpdate::default().position(1));
    doc.remove_tab(&second);

    let order: Vec<_> = doc
        .forest()
        .tabs
        .iter()
        .map(|t| (t.id.clone(), t.position))
        .collect();
    assert_eq!(
        order,
        vec![(fourth.clone(), 1), (third, 2), ("home".to_string(), 3)]
    );

    // Removing the active tab activates the first by position
    doc.set_active_tab("home");
    doc.remove_tab("home");
    assert_eq!(doc.forest().active_tab_id, fourth);
}

#[test]
fn test_undo_redo_mixed_sequence() {
    let mut doc = Document::from_forest(two_parents(), EditorOptions::default());
    let original = doc.forest().clone();

    doc.update_component("a", PropsPatch::new().with("content", serde_json::json!("edited")));
    doc.move_component_to_position("a", Some("parent-q"), 0);
    doc.remove_component("parent-p");
    doc.add_tab("Later").unwrap();

    while doc.undo() {}
    assert_eq!(doc.forest(), &original);

    assert!(doc.redo());
    assert!(doc.redo());
    let q = doc.find_component("parent-q").unwrap();
    assert_eq!(q.children()[0].id, "a");
    assert_eq!(q.children()[0].props.get_str("content"), Some("edited"));
}

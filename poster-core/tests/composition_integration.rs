//! Composition Integration Tests
//!
//! Exercises the store end to end:
//! - Combine/separate with the reference geometry
//! - Rejected combines
//! - Gestures on grouped children
//! - Property edits through the editor registry
//! - JSON persistence of grouped documents

use poster_core::{
    check_combine, editor_registry, CombineRejection, Component, ComponentData, ComponentId,
    ComponentType, Document, DocumentStore, EditorConfig, Handlers,
};

fn id(s: &str) -> ComponentId {
    ComponentId::from(s)
}

/// Rectangle "a" at (0,0) 100x50 and circle "b" at (200,10) 60x60.
fn two_shapes() -> DocumentStore {
    let mut store = DocumentStore::new();
    store.add_component(
        Component::template(ComponentType::Rectangle)
            .with_id("a")
            .with_position(0.0, 0.0)
            .with_size(100.0, 50.0)
            .with_z_index(1),
    );
    store.add_component(
        Component::template(ComponentType::Circle)
            .with_id("b")
            .with_position(200.0, 10.0)
            .with_size(60.0, 60.0)
            .with_z_index(4),
    );
    store
}

// ============================================================================
// Combine / Separate
// ============================================================================

#[test]
fn test_combine_reference_geometry() {
    let mut store = two_shapes();
    let group = store.combine(&[id("a"), id("b")]).expect("combine");

    let doc = store.document();
    let container = doc.get(&group).expect("container");
    assert_eq!(container.component_type(), ComponentType::HeaderGroup);
    assert_eq!(
        (
            container.geometry.x,
            container.geometry.y,
            container.geometry.width,
            container.geometry.height
        ),
        (-20.0, -20.0, 300.0, 100.0)
    );
    assert_eq!(container.z_index, 5);
    assert_eq!(container.child_ids(), &[id("a"), id("b")]);

    let a = doc.get(&id("a")).expect("a");
    let b = doc.get(&id("b")).expect("b");
    assert_eq!((a.geometry.x, a.geometry.y), (20.0, 20.0));
    assert_eq!((b.geometry.x, b.geometry.y), (220.0, 30.0));
    assert_eq!(doc.selected_ids(), &[group.clone()]);

    let top: Vec<_> = doc.top_level().into_iter().map(|c| c.id.clone()).collect();
    assert_eq!(top, vec![group]);
}

#[test]
fn test_separate_restores_absolute_positions() {
    let mut store = two_shapes();
    let group = store.combine(&[id("a"), id("b")]).expect("combine");
    let children = store.separate(&group).expect("separate");

    assert_eq!(children, vec![id("a"), id("b")]);
    let doc = store.document();
    assert!(!doc.contains(&group));
    assert_eq!(doc.selected_ids(), &[id("a"), id("b")]);
    let a = doc.get(&id("a")).expect("a");
    let b = doc.get(&id("b")).expect("b");
    assert_eq!((a.geometry.x, a.geometry.y), (0.0, 0.0));
    assert_eq!((b.geometry.x, b.geometry.y), (200.0, 10.0));
}

#[test]
fn test_combine_respects_configured_margin() {
    let config = EditorConfig {
        group_margin: 5.0,
        ..EditorConfig::default()
    };
    let mut store = DocumentStore::with_config(config);
    store.add_component(
        Component::template(ComponentType::Text)
            .with_id("t")
            .with_position(10.0, 10.0)
            .with_size(50.0, 20.0),
    );
    store.add_component(
        Component::template(ComponentType::Icon)
            .with_id("i")
            .with_position(70.0, 10.0)
            .with_size(20.0, 20.0),
    );
    let group = store.combine(&[id("t"), id("i")]).expect("combine");
    let g = store.document().get(&group).expect("group").geometry;
    assert_eq!((g.x, g.y, g.width, g.height), (5.0, 5.0, 90.0, 30.0));
}

// ============================================================================
// Rejections
// ============================================================================

#[test]
fn test_rejected_combines_leave_document_untouched() {
    let mut store = two_shapes();
    store.select_component(&id("a"));
    let before = store.snapshot();

    assert!(store.combine(&[id("a")]).is_none());
    assert!(store.combine(&[id("a"), id("a")]).is_none());
    assert!(store.combine(&[id("a"), id("missing")]).is_none());
    assert!(store.combine(&[]).is_none());
    assert_eq!(*store.document(), *before);

    let group = store.combine(&[id("a"), id("b")]).expect("combine");
    store.add_component(Component::template(ComponentType::Star).with_id("c"));
    let before = store.snapshot();
    assert!(store.combine(&[group.clone(), id("c")]).is_none());
    assert!(store.combine(&[id("a"), id("c")]).is_none());
    assert_eq!(*store.document(), *before);

    assert_eq!(
        check_combine(store.document(), &[group.clone(), id("c")]),
        Err(CombineRejection::ContainsComposite(group))
    );
    assert_eq!(
        check_combine(store.document(), &[id("c"), id("a")]),
        Err(CombineRejection::AlreadyGrouped(id("a")))
    );
}

#[test]
fn test_separate_on_leaf_is_noop() {
    let mut store = two_shapes();
    let revision = store.revision();
    assert!(store.separate(&id("a")).is_none());
    assert!(store.separate(&id("nope")).is_none());
    assert_eq!(store.revision(), revision);
}

// ============================================================================
// Gestures on grouped children
// ============================================================================

#[test]
fn test_child_drag_then_separate_keeps_drop_position() {
    let mut store = two_shapes();
    let group = store.combine(&[id("a"), id("b")]).expect("combine");

    let handlers = Handlers::child_of(id("b"), group.clone());
    assert!(store.handle_interaction(&handlers.on_drag_end(-40.0, 15.0)));

    store.separate(&group).expect("separate");
    let b = store.document().get(&id("b")).expect("b");
    assert_eq!((b.geometry.x, b.geometry.y), (160.0, 25.0));
}

#[test]
fn test_container_geometry_is_not_recomputed_after_child_moves() {
    let mut store = two_shapes();
    let group = store.combine(&[id("a"), id("b")]).expect("combine");
    store.move_components(&[id("a")], 500.0, 500.0);
    let g = store.document().get(&group).expect("group").geometry;
    assert_eq!((g.width, g.height), (300.0, 100.0));
}

// ============================================================================
// Property edits
// ============================================================================

#[test]
fn test_container_style_edit_via_registry() {
    let editors = editor_registry();
    let mut store = two_shapes();
    let group = store.combine(&[id("a"), id("b")]).expect("combine");

    let changed = store
        .edit_property(&editors, &group, "spacing", &serde_json::json!(24.0))
        .expect("edit");
    assert!(changed);

    let container = store.document().get(&group).expect("group");
    let ComponentData::HeaderGroup(data) = &container.payload else {
        panic!("expected header group");
    };
    assert_eq!(data.spacing, 24.0);
    assert_eq!(data.child_ids, vec![id("a"), id("b")]);
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_grouped_document_survives_json() {
    let mut store = two_shapes();
    let group = store.combine(&[id("a"), id("b")]).expect("combine");
    let json = store.document().to_json().expect("serialize");

    let restored = Document::from_json(&json).expect("parse");
    assert_eq!(restored, *store.document());

    let mut reopened = DocumentStore::from_document(restored, EditorConfig::default());
    reopened.separate(&group).expect("separate");
    let a = reopened.document().get(&id("a")).expect("a");
    assert_eq!((a.geometry.x, a.geometry.y), (0.0, 0.0));
}

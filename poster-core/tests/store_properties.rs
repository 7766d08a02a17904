//! Property-based tests for the document store.

use std::collections::HashSet;

use poster_core::{
    editor_registry, Component, ComponentId, ComponentType, DocumentStore, Geometry,
};
use proptest::prelude::*;

/// Integer-valued coordinates keep float arithmetic exact.
fn geometry() -> impl Strategy<Value = Geometry> {
    (-500i32..500, -500i32..500, 1i32..300, 1i32..300).prop_map(|(x, y, w, h)| Geometry {
        x: f64::from(x),
        y: f64::from(y),
        width: f64::from(w),
        height: f64::from(h),
        rotation: 0.0,
    })
}

/// Arbitrary fractional coordinates; the round trip is only approximate here.
fn fractional_geometry() -> impl Strategy<Value = Geometry> {
    (-500.0f64..500.0, -500.0f64..500.0, 0.5f64..300.0, 0.5f64..300.0).prop_map(
        |(x, y, width, height)| Geometry {
            x,
            y,
            width,
            height,
            rotation: 0.0,
        },
    )
}

/// Two roundings (into the container frame and back) bound the error.
const FRACTIONAL_TOLERANCE: f64 = 1e-9;

fn leaf_type() -> impl Strategy<Value = ComponentType> {
    proptest::sample::select(
        ComponentType::ALL
            .into_iter()
            .filter(|t| !t.is_composite())
            .collect::<Vec<_>>(),
    )
}

fn store_with(layout: &[(ComponentType, Geometry)]) -> (DocumentStore, Vec<ComponentId>) {
    let mut store = DocumentStore::new();
    let ids = layout
        .iter()
        .map(|(t, g)| store.add_component(Component::template(*t).with_geometry(*g)))
        .collect();
    (store, ids)
}

proptest! {
    #[test]
    fn prop_added_ids_are_unique(types in prop::collection::vec(leaf_type(), 0..40)) {
        let mut store = DocumentStore::new();
        for t in &types {
            store.add_component(Component::template(*t));
        }
        let ids: HashSet<_> = store.document().components().map(|c| c.id.clone()).collect();
        prop_assert_eq!(ids.len(), types.len());
        prop_assert_eq!(store.document().len(), types.len());
    }

    #[test]
    fn prop_combine_separate_roundtrip(
        layout in prop::collection::vec((leaf_type(), geometry()), 2..8)
    ) {
        let (mut store, ids) = store_with(&layout);
        let group = store.combine(&ids);
        prop_assert!(group.is_some());
        let separated = store.separate(&group.unwrap_or_default());
        prop_assert_eq!(separated.as_ref(), Some(&ids));

        for (id, (_, original)) in ids.iter().zip(&layout) {
            let restored = store.document().get(id).map(|c| (c.geometry.x, c.geometry.y));
            prop_assert_eq!(restored, Some((original.x, original.y)));
        }
    }

    #[test]
    fn prop_fractional_roundtrip_is_within_rounding_error(
        layout in prop::collection::vec((leaf_type(), fractional_geometry()), 2..8)
    ) {
        let (mut store, ids) = store_with(&layout);
        let group = store.combine(&ids).unwrap_or_default();
        prop_assert!(store.separate(&group).is_some());

        for (id, (_, original)) in ids.iter().zip(&layout) {
            let restored = store.document().get(id).map(|c| c.geometry);
            prop_assert!(restored.is_some());
            let restored = restored.unwrap_or_default();
            prop_assert!((restored.x - original.x).abs() <= FRACTIONAL_TOLERANCE);
            prop_assert!((restored.y - original.y).abs() <= FRACTIONAL_TOLERANCE);
        }
    }

    #[test]
    fn prop_combine_frames_bounds_with_margin(
        layout in prop::collection::vec((leaf_type(), geometry()), 2..8)
    ) {
        let (mut store, ids) = store_with(&layout);
        let group = store.combine(&ids).unwrap_or_default();
        let frame = store.document().get(&group).map(|c| c.geometry);
        prop_assert!(frame.is_some());
        let frame = frame.unwrap_or_default();

        let min_x = layout.iter().map(|(_, g)| g.x).fold(f64::INFINITY, f64::min);
        let min_y = layout.iter().map(|(_, g)| g.y).fold(f64::INFINITY, f64::min);
        let max_x = layout.iter().map(|(_, g)| g.right()).fold(f64::NEG_INFINITY, f64::max);
        let max_y = layout.iter().map(|(_, g)| g.bottom()).fold(f64::NEG_INFINITY, f64::max);

        prop_assert_eq!(frame.x, min_x - 20.0);
        prop_assert_eq!(frame.y, min_y - 20.0);
        prop_assert_eq!(frame.width, (max_x - min_x) + 40.0);
        prop_assert_eq!(frame.height, (max_y - min_y) + 40.0);
    }

    #[test]
    fn prop_moves_are_additive(
        g in geometry(),
        (dx1, dy1, dx2, dy2) in (-200i32..200, -200i32..200, -200i32..200, -200i32..200)
    ) {
        let (dx1, dy1, dx2, dy2) = (f64::from(dx1), f64::from(dy1), f64::from(dx2), f64::from(dy2));
        let (mut twice, ids) = store_with(&[(ComponentType::Rectangle, g)]);
        let (mut once, once_ids) = store_with(&[(ComponentType::Rectangle, g)]);

        twice.move_components(&ids, dx1, dy1);
        twice.move_components(&ids, dx2, dy2);
        once.move_components(&once_ids, dx1 + dx2, dy1 + dy2);

        let a = twice.document().get(&ids[0]).map(|c| (c.geometry.x, c.geometry.y));
        let b = once.document().get(&once_ids[0]).map(|c| (c.geometry.x, c.geometry.y));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_delete_scrubs_selection(count in 1usize..10, pick in any::<prop::sample::Index>()) {
        let layout = vec![(ComponentType::Star, Geometry::default()); count];
        let (mut store, ids) = store_with(&layout);
        store.select_multiple(ids.clone());
        let victim = ids[pick.index(count)].clone();

        prop_assert!(store.delete_component(&victim));
        prop_assert!(!store.document().contains(&victim));
        prop_assert!(!store.document().selected_ids().contains(&victim));
        prop_assert_eq!(store.document().selected_ids().len(), count - 1);
    }

    #[test]
    fn prop_selection_reflects_last_selection_op(
        count in 1usize..8,
        ops in prop::collection::vec((0u8..3, any::<prop::sample::Index>()), 1..20)
    ) {
        let layout = vec![(ComponentType::Circle, Geometry::default()); count];
        let (mut store, ids) = store_with(&layout);
        for (op, index) in ops {
            let target = ids[index.index(count)].clone();
            match op {
                0 => { store.select_component(&target); }
                1 => { store.select_multiple(vec![target, ids[0].clone()]); }
                _ => { store.clear_selection(); }
            }
            let selected: HashSet<_> = store.document().selected_ids().iter().collect();
            for component in store.document().components() {
                prop_assert_eq!(
                    store.document().is_selected(&component.id),
                    selected.contains(&component.id)
                );
            }
            let flagged = store
                .document()
                .components()
                .filter(|c| store.document().is_selected(&c.id))
                .count();
            prop_assert_eq!(flagged, selected.len());
        }
    }

    #[test]
    fn prop_rejected_combine_changes_nothing(g in geometry(), t in leaf_type()) {
        let (mut store, ids) = store_with(&[(t, g), (t, g)]);
        let group = store.combine(&ids).unwrap_or_default();
        store.add_component(Component::template(t).with_id("loose"));
        store.select_component(&ComponentId::from("loose"));
        let before = store.snapshot();

        prop_assert!(store.combine(&[ids[0].clone()]).is_none());
        prop_assert!(store.combine(&[group, ComponentId::from("loose")]).is_none());
        let after = store.snapshot();
        prop_assert_eq!(&*after, &*before);
    }
}

#[test]
fn fractional_positions_survive_roundtrip_up_to_rounding() {
    let layout = [
        (
            ComponentType::Rectangle,
            Geometry {
                x: 0.1,
                y: 0.7,
                width: 10.0,
                height: 10.0,
                rotation: 0.0,
            },
        ),
        (
            ComponentType::Circle,
            Geometry {
                x: 123.45,
                y: 67.89,
                width: 10.0,
                height: 10.0,
                rotation: 0.0,
            },
        ),
    ];
    let (mut store, ids) = store_with(&layout);
    let group = store.combine(&ids).expect("combine");
    store.separate(&group).expect("separate");

    let a = store.document().get(&ids[0]).expect("a").geometry;
    // Not bit-exact: 0.1 and 0.7 pass through the container frame.
    assert!((a.x - 0.1).abs() <= FRACTIONAL_TOLERANCE);
    assert!((a.y - 0.7).abs() <= FRACTIONAL_TOLERANCE);
}

#[test]
fn editor_registry_is_complete() {
    let registry = editor_registry();
    for tag in ComponentType::ALL {
        assert!(registry.lookup(tag).is_some(), "no editor for {tag}");
    }
    assert!(registry.is_complete());
}

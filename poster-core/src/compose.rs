//! Grouping: combine selected components into a container and separate it
//! again.
//!
//! ```text
//!   combine                              separate
//!   a(0,0) b(200,10)   ──────────▶   header-group(-20,-20)   ──────────▶   a(0,0) b(200,10)
//!                                      ├ a(20,20)  (relative)
//!                                      └ b(220,30) (relative)
//! ```
//!
//! Both transforms are plain additions/subtractions of the container origin.
//! A combine followed by a separate restores every child's absolute position
//! exactly when coordinates and sizes are integral. Fractional coordinates
//! such as `0.1` are rounded once going into the container frame and once
//! coming back, so they return within a few ULPs rather than bit-for-bit.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentData, ComponentId, ContainerData, Geometry};
use crate::config::EditorConfig;
use crate::document::Document;

/// Axis-aligned bounds of a set of components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest x.
    pub min_x: f64,
    /// Smallest y.
    pub min_y: f64,
    /// Largest `x + width`.
    pub max_x: f64,
    /// Largest `y + height`.
    pub max_y: f64,
}

impl Bounds {
    /// Bounds of the given geometries, or `None` when empty.
    pub fn of<'a>(geometries: impl IntoIterator<Item = &'a Geometry>) -> Option<Self> {
        geometries.into_iter().fold(None, |acc, g| {
            Some(match acc {
                None => Self {
                    min_x: g.x,
                    min_y: g.y,
                    max_x: g.right(),
                    max_y: g.bottom(),
                },
                Some(b) => Self {
                    min_x: b.min_x.min(g.x),
                    min_y: b.min_y.min(g.y),
                    max_x: b.max_x.max(g.right()),
                    max_y: b.max_y.max(g.bottom()),
                },
            })
        })
    }

    /// Grow the bounds by `margin` on every side and convert to a geometry.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Geometry {
        Geometry {
            x: self.min_x - margin,
            y: self.min_y - margin,
            width: (self.max_x - self.min_x) + 2.0 * margin,
            height: (self.max_y - self.min_y) + 2.0 * margin,
            rotation: 0.0,
        }
    }
}

/// Why a combine request was turned down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombineRejection {
    /// Fewer than two of the requested ids exist.
    TooFew(usize),
    /// A requested component is already a composite.
    ContainsComposite(ComponentId),
    /// A requested component already belongs to a composite.
    AlreadyGrouped(ComponentId),
}

/// Check whether `ids` can be combined, returning the resolved, de-duplicated
/// ids in request order.
///
/// # Errors
///
/// Returns the reason the combine would be rejected.
pub fn check_combine(
    document: &Document,
    ids: &[ComponentId],
) -> Result<Vec<ComponentId>, CombineRejection> {
    let mut seen = HashSet::new();
    let resolved: Vec<ComponentId> = ids
        .iter()
        .filter(|id| document.contains(id) && seen.insert(*id))
        .cloned()
        .collect();

    if resolved.len() < 2 {
        return Err(CombineRejection::TooFew(resolved.len()));
    }

    let owned = document.owned_ids();
    for id in &resolved {
        if document.get(id).is_some_and(Component::is_composite) {
            return Err(CombineRejection::ContainsComposite(id.clone()));
        }
        if owned.contains(id) {
            return Err(CombineRejection::AlreadyGrouped(id.clone()));
        }
    }

    Ok(resolved)
}

/// Group `ids` into a new `header-group` container.
///
/// Returns the container id, or `None` (document untouched) when rejected.
pub(crate) fn combine(
    document: &mut Document,
    ids: &[ComponentId],
    config: &EditorConfig,
) -> Option<ComponentId> {
    let resolved = match check_combine(document, ids) {
        Ok(resolved) => resolved,
        Err(reason) => {
            tracing::debug!("Combine rejected: {reason:?}");
            return None;
        }
    };

    let bounds = Bounds::of(
        resolved
            .iter()
            .filter_map(|id| document.get(id))
            .map(|c| &c.geometry),
    )?;
    let frame = bounds.expanded(config.group_margin);

    let members: Vec<Component> = resolved
        .iter()
        .filter_map(|id| document.take(id))
        .collect();
    let z_index = members
        .iter()
        .map(|c| c.z_index)
        .max()
        .unwrap_or(0)
        .saturating_add(1);

    let container = Component::new(ComponentData::HeaderGroup(ContainerData {
        child_ids: resolved.clone(),
        layout: config.group_layout,
        spacing: config.group_spacing,
        ..ContainerData::default()
    }))
    .with_geometry(frame)
    .with_z_index(z_index);
    let container_id = container.id.clone();

    tracing::debug!(
        "Combined {} components into {container_id} at ({}, {}) size {}x{}",
        members.len(),
        frame.x,
        frame.y,
        frame.width,
        frame.height
    );

    document.insert(container);
    for mut child in members {
        child.geometry.x -= frame.x;
        child.geometry.y -= frame.y;
        document.insert(child);
    }
    document.set_selection(vec![container_id.clone()]);

    Some(container_id)
}

/// Dissolve a composite back into top-level components.
///
/// Returns the surviving child ids, or `None` (document untouched) when `id`
/// is not a composite. Child ids that no longer resolve are dropped.
pub(crate) fn separate(document: &mut Document, id: &ComponentId) -> Option<Vec<ComponentId>> {
    let container = document.get(id).filter(|c| c.is_composite())?;
    let origin = container.geometry;
    let child_ids = container.child_ids().to_vec();

    let dangling = document.dangling_children(id);
    if !dangling.is_empty() {
        tracing::warn!(
            "Separating {id}: dropping {} dangling child reference(s)",
            dangling.len()
        );
    }

    document.take(id);
    let mut restored = Vec::with_capacity(child_ids.len());
    let mut seen = HashSet::new();
    for child_id in child_ids {
        if !seen.insert(child_id.clone()) {
            continue;
        }
        let Some(mut child) = document.take(&child_id) else {
            continue;
        };
        child.geometry.x += origin.x;
        child.geometry.y += origin.y;
        restored.push(child);
    }

    let ids: Vec<ComponentId> = restored.iter().map(|c| c.id.clone()).collect();
    tracing::debug!("Separated {id} into {} components", ids.len());
    for child in restored {
        document.insert(child);
    }
    document.set_selection(ids.clone());

    Some(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentType;

    fn shape(id: &str, kind: ComponentType, x: f64, y: f64, w: f64, h: f64) -> Component {
        Component::template(kind)
            .with_id(id)
            .with_position(x, y)
            .with_size(w, h)
    }

    fn sample() -> Document {
        let mut doc = Document::default();
        doc.insert(shape("a", ComponentType::Rectangle, 0.0, 0.0, 100.0, 50.0).with_z_index(2));
        doc.insert(shape("b", ComponentType::Circle, 200.0, 10.0, 60.0, 60.0).with_z_index(4));
        doc
    }

    fn ids(raw: &[&str]) -> Vec<ComponentId> {
        raw.iter().map(|s| ComponentId::from(*s)).collect()
    }

    #[test]
    fn combine_builds_margin_box_and_relative_children() {
        let mut doc = sample();
        let group = combine(&mut doc, &ids(&["a", "b"]), &EditorConfig::default())
            .expect("should combine");

        let container = doc.get(&group).expect("container exists");
        assert_eq!(container.component_type(), ComponentType::HeaderGroup);
        assert_eq!(
            container.geometry,
            Geometry {
                x: -20.0,
                y: -20.0,
                width: 300.0,
                height: 100.0,
                rotation: 0.0
            }
        );
        assert_eq!(container.z_index, 5);
        assert_eq!(container.child_ids(), ids(&["a", "b"]).as_slice());

        let a = doc.get(&"a".into()).expect("a");
        let b = doc.get(&"b".into()).expect("b");
        assert_eq!((a.geometry.x, a.geometry.y), (20.0, 20.0));
        assert_eq!((b.geometry.x, b.geometry.y), (220.0, 30.0));
        assert_eq!(doc.selected_ids(), &[group]);
    }

    #[test]
    fn combine_order_puts_container_before_children() {
        let mut doc = sample();
        doc.insert(shape("c", ComponentType::Text, 500.0, 500.0, 10.0, 10.0));
        let group = combine(&mut doc, &ids(&["b", "a"]), &EditorConfig::default())
            .expect("should combine");
        let order: Vec<_> = doc.components().map(|c| c.id.clone()).collect();
        assert_eq!(order, vec!["c".into(), group, "b".into(), "a".into()]);
    }

    #[test]
    fn combine_rejects_single_and_composite() {
        let mut doc = sample();
        let before = doc.clone();
        assert!(combine(&mut doc, &ids(&["a"]), &EditorConfig::default()).is_none());
        assert!(combine(&mut doc, &ids(&["a", "missing"]), &EditorConfig::default()).is_none());
        assert!(combine(&mut doc, &ids(&["a", "a"]), &EditorConfig::default()).is_none());
        assert_eq!(doc, before);

        doc.insert(Component::template(ComponentType::ContentCard).with_id("card"));
        let before = doc.clone();
        assert_eq!(
            check_combine(&doc, &ids(&["a", "card"])),
            Err(CombineRejection::ContainsComposite("card".into()))
        );
        assert!(combine(&mut doc, &ids(&["a", "card"]), &EditorConfig::default()).is_none());
        assert_eq!(doc, before);
    }

    #[test]
    fn separate_restores_absolute_positions() {
        let mut doc = sample();
        let group = combine(&mut doc, &ids(&["a", "b"]), &EditorConfig::default())
            .expect("combine");
        let restored = separate(&mut doc, &group).expect("separate");

        assert_eq!(restored, ids(&["a", "b"]));
        assert!(doc.get(&group).is_none());
        let a = doc.get(&"a".into()).expect("a");
        let b = doc.get(&"b".into()).expect("b");
        assert_eq!((a.geometry.x, a.geometry.y), (0.0, 0.0));
        assert_eq!((b.geometry.x, b.geometry.y), (200.0, 10.0));
        assert_eq!(doc.selected_ids(), ids(&["a", "b"]).as_slice());
    }

    #[test]
    fn separate_rejects_non_composite() {
        let mut doc = sample();
        let before = doc.clone();
        assert!(separate(&mut doc, &"a".into()).is_none());
        assert!(separate(&mut doc, &"nope".into()).is_none());
        assert_eq!(doc, before);
    }

    #[test]
    fn separate_silently_drops_dangling_children() {
        let mut doc = sample();
        let group = combine(&mut doc, &ids(&["a", "b"]), &EditorConfig::default())
            .expect("combine");
        // Deleting a child directly leaves a dangling reference behind.
        assert!(doc.delete_component(&"a".into()));
        assert_eq!(doc.dangling_children(&group), ids(&["a"]));

        let restored = separate(&mut doc, &group).expect("separate");
        assert_eq!(restored, ids(&["b"]));
        assert_eq!(doc.len(), 1);
        let b = doc.get(&"b".into()).expect("b");
        assert_eq!((b.geometry.x, b.geometry.y), (200.0, 10.0));
    }

    #[test]
    fn grouped_children_cannot_be_regrouped() {
        let mut doc = sample();
        combine(&mut doc, &ids(&["a", "b"]), &EditorConfig::default()).expect("combine");
        doc.insert(shape("c", ComponentType::Star, 0.0, 0.0, 10.0, 10.0));
        assert_eq!(
            check_combine(&doc, &ids(&["a", "c"])),
            Err(CombineRejection::AlreadyGrouped("a".into()))
        );
    }

    #[test]
    fn bounds_of_empty_is_none() {
        assert!(Bounds::of(std::iter::empty()).is_none());
    }
}

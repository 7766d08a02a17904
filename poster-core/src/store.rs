//! The document store: sole owner and writer of the poster document.
//!
//! Every mutation replaces the current [`Document`] snapshot wholesale, so a
//! reader holding an `Arc<Document>` from [`DocumentStore::snapshot`] sees
//! either the state before an action or the state after it, never a partial
//! write. Store operations are total: ids that do not resolve are ignored.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::action::{Action, Outcome};
use crate::component::{Component, ComponentId, ComponentPatch};
use crate::config::EditorConfig;
use crate::document::Document;

/// Single-writer store for one poster document.
///
/// # Example
///
/// ```
/// use poster_core::{Component, ComponentType, DocumentStore};
///
/// let mut store = DocumentStore::new();
/// let a = store.add_component(Component::template(ComponentType::Rectangle).with_position(0.0, 0.0));
/// let b = store.add_component(Component::template(ComponentType::Circle).with_position(300.0, 0.0));
///
/// let group = store.combine(&[a.clone(), b.clone()]).unwrap();
/// assert_eq!(store.document().selected_ids(), &[group.clone()]);
///
/// store.separate(&group);
/// assert_eq!(store.document().selected_ids(), &[a, b]);
/// ```
#[derive(Debug, Clone)]
pub struct DocumentStore {
    current: Arc<Document>,
    config: EditorConfig,
    undo: VecDeque<Arc<Document>>,
    redo: Vec<Arc<Document>>,
    revision: u64,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    /// Create a store holding an empty document with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create a store holding an empty document sized from `config`.
    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        let document = Document::from_config(&config);
        Self::from_document(document, config)
    }

    /// Create a store around an existing document.
    #[must_use]
    pub fn from_document(document: Document, config: EditorConfig) -> Self {
        Self {
            current: Arc::new(document),
            config,
            undo: VecDeque::new(),
            redo: Vec::new(),
            revision: 0,
        }
    }

    /// The current document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.current
    }

    /// A shared handle to the current document; unaffected by later actions.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Document> {
        Arc::clone(&self.current)
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Number of state replacements so far.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply an action, replacing the current document if it changed.
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        // Work on a private copy; outstanding snapshots keep the old state.
        let mut next = Document::clone(&self.current);
        let outcome = action.apply(&mut next, &self.config);
        if !outcome.changed() {
            tracing::trace!("{} left the document unchanged", action.name());
            return outcome;
        }

        tracing::debug!("Applied {} (revision {})", action.name(), self.revision + 1);
        let previous = std::mem::replace(&mut self.current, Arc::new(next));
        if records_history(&action) {
            self.push_undo(previous);
            self.redo.clear();
        }
        self.revision += 1;
        outcome
    }

    /// Apply several actions in order, returning how many changed the document.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = Action>) -> usize {
        actions
            .into_iter()
            .map(|action| self.dispatch(action))
            .filter(Outcome::changed)
            .count()
    }

    /// Swap in a whole new document (e.g. one decoded from JSON).
    ///
    /// Undo and redo history belong to the old document and are dropped.
    pub fn replace_document(&mut self, document: Document) {
        self.current = Arc::new(document);
        self.undo.clear();
        self.redo.clear();
        self.revision += 1;
        tracing::debug!("Replaced document (revision {})", self.revision);
    }

    fn push_undo(&mut self, previous: Arc<Document>) {
        self.undo.push_back(previous);
        while self.undo.len() > self.config.history_limit {
            self.undo.pop_front();
        }
    }

    // -----------------------------------------------------------------------
    // Operation set
    // -----------------------------------------------------------------------

    /// Append a component and return its id.
    pub fn add_component(&mut self, component: Component) -> ComponentId {
        let id = component.id.clone();
        self.dispatch(Action::AddComponent { component });
        id
    }

    /// Shallow-merge `patch` into the component. No-op if absent.
    pub fn update_component(&mut self, id: &ComponentId, patch: ComponentPatch) -> bool {
        self.dispatch(Action::UpdateComponent {
            id: id.clone(),
            patch,
        })
        .changed()
    }

    /// Remove a component and scrub it from the selection. No-op if absent.
    pub fn delete_component(&mut self, id: &ComponentId) -> bool {
        self.dispatch(Action::DeleteComponent { id: id.clone() })
            .changed()
    }

    /// Select exactly `id`. No-op if absent.
    pub fn select_component(&mut self, id: &ComponentId) -> bool {
        self.dispatch(Action::SelectComponent { id: id.clone() })
            .changed()
    }

    /// Set the selection to `ids` verbatim.
    pub fn select_multiple(&mut self, ids: Vec<ComponentId>) -> bool {
        self.dispatch(Action::SelectMultiple { ids }).changed()
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) -> bool {
        self.dispatch(Action::ClearSelection).changed()
    }

    /// Translate every listed component by `(dx, dy)`.
    ///
    /// Locked components are moved too; callers filter them beforehand.
    pub fn move_components(&mut self, ids: &[ComponentId], dx: f64, dy: f64) -> bool {
        self.dispatch(Action::MoveComponents {
            ids: ids.to_vec(),
            dx,
            dy,
        })
        .changed()
    }

    /// Set a component's size without clamping.
    pub fn resize_component(&mut self, id: &ComponentId, width: f64, height: f64) -> bool {
        self.dispatch(Action::ResizeComponent {
            id: id.clone(),
            width,
            height,
        })
        .changed()
    }

    /// Set a component's rotation in degrees.
    pub fn rotate_component(&mut self, id: &ComponentId, rotation: f64) -> bool {
        self.dispatch(Action::RotateComponent {
            id: id.clone(),
            rotation,
        })
        .changed()
    }

    /// Set a component's z-index.
    pub fn change_z_index(&mut self, id: &ComponentId, z_index: u32) -> bool {
        self.dispatch(Action::ChangeZIndex {
            id: id.clone(),
            z_index,
        })
        .changed()
    }

    /// Group `ids` into a new container, returning its id.
    ///
    /// Returns `None` and leaves the document untouched when fewer than two
    /// ids resolve or any of them is a composite.
    pub fn combine(&mut self, ids: &[ComponentId]) -> Option<ComponentId> {
        match self.dispatch(Action::Combine { ids: ids.to_vec() }) {
            Outcome::Combined(id) => Some(id),
            _ => None,
        }
    }

    /// Group the current selection.
    pub fn combine_selected(&mut self) -> Option<ComponentId> {
        let ids = self.current.selected_ids().to_vec();
        self.combine(&ids)
    }

    /// Dissolve a container, returning the ids of its surviving children.
    pub fn separate(&mut self, id: &ComponentId) -> Option<Vec<ComponentId>> {
        match self.dispatch(Action::Separate { id: id.clone() }) {
            Outcome::Separated(ids) => Some(ids),
            _ => None,
        }
    }

    /// Remove every component.
    pub fn clear(&mut self) -> bool {
        self.dispatch(Action::Clear).changed()
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// Whether there is a step to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether there is a step to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Restore the document before the last recorded change.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.current, previous);
        self.redo.push(current);
        self.revision += 1;
        true
    }

    /// Re-apply the last undone change.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.current, next);
        self.push_undo(current);
        self.revision += 1;
        true
    }
}

/// Selection-only changes are not undo steps.
fn records_history(action: &Action) -> bool {
    !matches!(
        action,
        Action::SelectComponent { .. } | Action::SelectMultiple { .. } | Action::ClearSelection
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentType;

    fn rect(id: &str, x: f64, y: f64) -> Component {
        Component::template(ComponentType::Rectangle)
            .with_id(id)
            .with_position(x, y)
            .with_size(100.0, 50.0)
    }

    fn store_with(ids: &[&str]) -> DocumentStore {
        let mut store = DocumentStore::new();
        for (i, id) in ids.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let offset = i as f64 * 150.0;
            store.add_component(rect(id, offset, 0.0));
        }
        store
    }

    fn assert_selection_consistent(store: &DocumentStore) {
        let doc = store.document();
        for c in doc.components() {
            assert_eq!(
                doc.is_selected(&c.id),
                doc.selected_ids().contains(&c.id),
                "selection flag for {} out of sync",
                c.id
            );
        }
    }

    #[test]
    fn test_add_appends_in_order() {
        let store = store_with(&["a", "b", "c"]);
        let order: Vec<_> = store
            .document()
            .components()
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(order, ["a", "b", "c"]);
        assert_eq!(store.revision(), 3);
    }

    #[test]
    fn test_update_merges_fields() {
        let mut store = store_with(&["a"]);
        let id = ComponentId::from("a");
        assert!(store.update_component(
            &id,
            ComponentPatch {
                x: Some(42.0),
                locked: Some(true),
                ..ComponentPatch::default()
            }
        ));
        let a = store.document().get(&id).expect("exists");
        assert!((a.geometry.x - 42.0).abs() < f64::EPSILON);
        assert!((a.geometry.width - 100.0).abs() < f64::EPSILON);
        assert!(a.locked);
        assert!(!store.update_component(&"missing".into(), ComponentPatch::position(1.0, 1.0)));
    }

    #[test]
    fn test_delete_scrubs_selection() {
        let mut store = store_with(&["a", "b"]);
        store.select_multiple(vec!["a".into(), "b".into()]);
        assert!(store.delete_component(&"a".into()));
        assert_eq!(store.document().selected_ids(), &[ComponentId::from("b")]);
        assert!(store.document().get(&"a".into()).is_none());
        assert!(!store.delete_component(&"a".into()));
    }

    #[test]
    fn test_selection_operations_stay_consistent() {
        let mut store = store_with(&["a", "b", "c"]);

        store.select_component(&"b".into());
        assert_eq!(store.document().selected_ids(), &[ComponentId::from("b")]);
        assert_selection_consistent(&store);

        store.select_multiple(vec!["a".into(), "c".into()]);
        assert!(store.document().is_selected(&"a".into()));
        assert!(!store.document().is_selected(&"b".into()));
        assert_selection_consistent(&store);

        store.clear_selection();
        assert!(store.document().selected_ids().is_empty());
        assert_selection_consistent(&store);
    }

    #[test]
    fn test_select_multiple_is_verbatim() {
        let mut store = store_with(&["a"]);
        let ids: Vec<ComponentId> = vec!["a".into(), "a".into(), "ghost".into()];
        store.select_multiple(ids.clone());
        assert_eq!(store.document().selected_ids(), ids.as_slice());
        assert_eq!(store.document().selected_components().count(), 2);
    }

    #[test]
    fn test_select_missing_is_noop() {
        let mut store = store_with(&["a"]);
        store.select_component(&"a".into());
        assert!(!store.select_component(&"ghost".into()));
        assert_eq!(store.document().selected_ids(), &[ComponentId::from("a")]);
    }

    #[test]
    fn test_move_ignores_lock_flag() {
        let mut store = DocumentStore::new();
        let id = store.add_component(rect("a", 0.0, 0.0).with_locked(true));
        assert!(store.move_components(&[id.clone()], 5.0, 6.0));
        let a = store.document().get(&id).expect("exists");
        assert!((a.geometry.x - 5.0).abs() < f64::EPSILON);
        assert!((a.geometry.y - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snapshots_are_isolated() {
        let mut store = store_with(&["a"]);
        let before = store.snapshot();
        store.move_components(&["a".into()], 10.0, 0.0);
        let old = before.get(&"a".into()).expect("exists");
        let new = store.document().get(&"a".into()).expect("exists");
        assert!(old.geometry.x.abs() < f64::EPSILON);
        assert!((new.geometry.x - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejected_combine_keeps_snapshot() {
        let mut store = store_with(&["a", "b"]);
        store.select_component(&"a".into());
        let before = store.snapshot();
        let revision = store.revision();
        assert!(store.combine_selected().is_none());
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_combine_selected_then_separate() {
        let mut store = store_with(&["a", "b"]);
        store.select_multiple(vec!["a".into(), "b".into()]);
        let group = store.combine_selected().expect("combine");
        assert_eq!(store.document().len(), 3);
        assert_eq!(store.document().selected_ids(), &[group.clone()]);

        let children = store.separate(&group).expect("separate");
        assert_eq!(children.len(), 2);
        assert_eq!(store.document().len(), 2);
        assert!(store.separate(&group).is_none());
    }

    #[test]
    fn test_undo_redo() {
        let mut store = store_with(&["a"]);
        store.move_components(&["a".into()], 10.0, 0.0);
        store.select_component(&"a".into());

        assert!(store.undo());
        let a = store.document().get(&"a".into()).expect("exists");
        assert!(a.geometry.x.abs() < f64::EPSILON);

        assert!(store.redo());
        let a = store.document().get(&"a".into()).expect("exists");
        assert!((a.geometry.x - 10.0).abs() < f64::EPSILON);
        assert!(!store.redo());
    }

    #[test]
    fn test_history_is_bounded() {
        let config = EditorConfig {
            history_limit: 2,
            ..EditorConfig::default()
        };
        let mut store = DocumentStore::with_config(config);
        for id in ["a", "b", "c", "d"] {
            store.add_component(rect(id, 0.0, 0.0));
        }
        assert!(store.undo());
        assert!(store.undo());
        assert!(!store.undo());
        assert_eq!(store.document().len(), 2);
    }

    #[test]
    fn test_replace_document_drops_history() {
        let config = EditorConfig {
            history_limit: 2,
            ..EditorConfig::default()
        };
        let mut store = DocumentStore::with_config(config);
        store.add_component(rect("a", 0.0, 0.0));
        for _ in 0..10 {
            store.replace_document(Document::default());
        }
        assert!(!store.can_undo());
        assert!(!store.can_redo());

        for id in ["b", "c", "d"] {
            store.add_component(rect(id, 0.0, 0.0));
        }
        assert!(store.undo());
        assert!(store.undo());
        assert!(!store.undo());
        assert_eq!(store.document().len(), 1);
    }

    #[test]
    fn test_zero_history_limit_keeps_nothing() {
        let config = EditorConfig {
            history_limit: 0,
            ..EditorConfig::default()
        };
        let mut store = DocumentStore::with_config(config);
        store.add_component(rect("a", 0.0, 0.0));
        assert!(!store.can_undo());
    }

    #[test]
    fn test_unusable_canvas_limit_does_not_panic() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"max_canvas_width": 0.5}"#).expect("parse");
        let store = DocumentStore::with_config(config);
        assert!((store.document().width - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clear() {
        let mut store = store_with(&["a", "b"]);
        store.select_component(&"a".into());
        assert!(store.clear());
        assert!(store.document().is_empty());
        assert!(store.document().selected_ids().is_empty());
        assert!(!store.clear());
    }
}

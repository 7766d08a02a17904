//! The poster document: an arena of components plus their order and the
//! current selection.
//!
//! Composite children are flat siblings in the arena; a composite only holds
//! their ids. Mutating methods are crate-private so that every change goes
//! through the store's operation set.

use std::collections::{HashMap, HashSet};

use crate::component::{Component, ComponentId, ComponentPatch};
use crate::config::EditorConfig;

/// A poster document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// All components, indexed by ID.
    components: HashMap<ComponentId, Component>,
    /// Document order of every component (ties in z-index paint in this order).
    order: Vec<ComponentId>,
    /// Currently selected IDs, verbatim as last set.
    selected_ids: Vec<ComponentId>,
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Canvas background color.
    pub background_color: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl Document {
    /// Create an empty document with the given canvas size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            components: HashMap::new(),
            order: Vec::new(),
            selected_ids: Vec::new(),
            width,
            height,
            background_color: "#ffffff".to_string(),
        }
    }

    /// Create an empty document using the configured canvas defaults.
    #[must_use]
    pub fn from_config(config: &EditorConfig) -> Self {
        let (width, height) = config.clamp_canvas(config.canvas_width, config.canvas_height);
        Self {
            background_color: config.background_color.clone(),
            ..Self::new(width, height)
        }
    }

    /// Get a component by ID.
    #[must_use]
    pub fn get(&self, id: &ComponentId) -> Option<&Component> {
        self.components.get(id)
    }

    /// Whether a component with this ID exists.
    #[must_use]
    pub fn contains(&self, id: &ComponentId) -> bool {
        self.components.contains_key(id)
    }

    /// All components in document order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.order.iter().filter_map(|id| self.components.get(id))
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if the document has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The selection, exactly as last set.
    #[must_use]
    pub fn selected_ids(&self) -> &[ComponentId] {
        &self.selected_ids
    }

    /// Whether the component is part of the selection.
    #[must_use]
    pub fn is_selected(&self, id: &ComponentId) -> bool {
        self.selected_ids.contains(id)
    }

    /// Selected components that exist, in selection order.
    pub fn selected_components(&self) -> impl Iterator<Item = &Component> {
        self.selected_ids
            .iter()
            .filter_map(|id| self.components.get(id))
    }

    /// The composite that lists `id` among its children, if any.
    #[must_use]
    pub fn owner_of(&self, id: &ComponentId) -> Option<&Component> {
        self.components()
            .find(|c| c.child_ids().iter().any(|child| child == id))
    }

    /// IDs referenced as children by some composite in the document.
    #[must_use]
    pub fn owned_ids(&self) -> HashSet<&ComponentId> {
        self.components
            .values()
            .flat_map(|c| c.child_ids().iter())
            .collect()
    }

    /// Components not owned by any composite, in document order.
    pub fn top_level(&self) -> Vec<&Component> {
        let owned = self.owned_ids();
        self.components()
            .filter(|c| !owned.contains(&c.id))
            .collect()
    }

    /// Children of a composite that still exist, in `child_ids` order.
    #[must_use]
    pub fn children_of(&self, id: &ComponentId) -> Vec<&Component> {
        self.components.get(id).map_or_else(Vec::new, |c| {
            c.child_ids()
                .iter()
                .filter_map(|child| self.components.get(child))
                .collect()
        })
    }

    /// Child IDs of a composite that no longer resolve.
    #[must_use]
    pub fn dangling_children(&self, id: &ComponentId) -> Vec<ComponentId> {
        self.components.get(id).map_or_else(Vec::new, |c| {
            c.child_ids()
                .iter()
                .filter(|child| !self.components.contains_key(*child))
                .cloned()
                .collect()
        })
    }

    /// Find the topmost top-level component at canvas coordinates.
    ///
    /// Ties in z-index go to the component later in document order.
    #[must_use]
    pub fn component_at(&self, x: f64, y: f64) -> Option<&ComponentId> {
        self.top_level()
            .into_iter()
            .enumerate()
            .filter(|(_, c)| c.geometry.contains_point(x, y))
            .max_by_key(|(index, c)| (c.z_index, *index))
            .map(|(_, c)| &c.id)
    }

    // -----------------------------------------------------------------------
    // Crate-private mutation used by the store reducer and composition engine
    // -----------------------------------------------------------------------

    /// Append a component. A repeated ID replaces the existing record in place.
    pub(crate) fn insert(&mut self, component: Component) {
        let id = component.id.clone();
        if self.components.insert(id.clone(), component).is_some() {
            tracing::warn!("Component {id} added twice; replacing existing record");
        } else {
            self.order.push(id);
        }
    }

    /// Remove a component from the arena and order, leaving selection alone.
    pub(crate) fn take(&mut self, id: &ComponentId) -> Option<Component> {
        let removed = self.components.remove(id)?;
        self.order.retain(|eid| eid != id);
        Some(removed)
    }

    pub(crate) fn get_mut(&mut self, id: &ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id)
    }

    pub(crate) fn set_selection(&mut self, ids: Vec<ComponentId>) {
        self.selected_ids = ids;
    }

    pub(crate) fn update_component(&mut self, id: &ComponentId, patch: &ComponentPatch) -> bool {
        let Some(component) = self.components.get_mut(id) else {
            return false;
        };
        patch.apply_to(component);
        true
    }

    pub(crate) fn delete_component(&mut self, id: &ComponentId) -> bool {
        if self.take(id).is_none() {
            return false;
        }
        self.selected_ids.retain(|eid| eid != id);
        true
    }

    pub(crate) fn move_components(&mut self, ids: &[ComponentId], dx: f64, dy: f64) -> bool {
        let mut moved = false;
        // Each distinct id moves once, even if listed twice.
        let unique: HashSet<&ComponentId> = ids.iter().collect();
        for id in unique {
            if let Some(component) = self.components.get_mut(id) {
                component.geometry.x += dx;
                component.geometry.y += dy;
                moved = true;
            }
        }
        moved
    }

    pub(crate) fn clear(&mut self) {
        self.components.clear();
        self.order.clear();
        self.selected_ids.clear();
    }
}

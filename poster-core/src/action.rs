//! The fixed set of document mutations.
//!
//! Every change to a [`Document`] is expressed as an [`Action`] and applied by
//! the store. Actions referencing ids that do not exist are silent no-ops.

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentId, ComponentPatch};
use crate::compose;
use crate::config::EditorConfig;
use crate::document::Document;

/// A document mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Append a component. The caller guarantees the id is fresh.
    AddComponent {
        /// The component to add.
        component: Component,
    },
    /// Shallow-merge a patch into a component.
    UpdateComponent {
        /// Target component.
        id: ComponentId,
        /// Fields to replace.
        patch: ComponentPatch,
    },
    /// Remove a component and drop it from the selection.
    DeleteComponent {
        /// Target component.
        id: ComponentId,
    },
    /// Make `id` the only selected component.
    SelectComponent {
        /// Target component.
        id: ComponentId,
    },
    /// Replace the selection verbatim.
    SelectMultiple {
        /// New selection.
        ids: Vec<ComponentId>,
    },
    /// Empty the selection.
    ClearSelection,
    /// Translate components by a delta.
    MoveComponents {
        /// Components to move.
        ids: Vec<ComponentId>,
        /// Horizontal delta.
        dx: f64,
        /// Vertical delta.
        dy: f64,
    },
    /// Set a component's size.
    ResizeComponent {
        /// Target component.
        id: ComponentId,
        /// New width.
        width: f64,
        /// New height.
        height: f64,
    },
    /// Set a component's rotation in degrees.
    RotateComponent {
        /// Target component.
        id: ComponentId,
        /// New rotation.
        rotation: f64,
    },
    /// Set a component's paint order key.
    ChangeZIndex {
        /// Target component.
        id: ComponentId,
        /// New z-index.
        z_index: u32,
    },
    /// Group components into a new container.
    Combine {
        /// Components to group.
        ids: Vec<ComponentId>,
    },
    /// Dissolve a container into top-level components.
    Separate {
        /// The container.
        id: ComponentId,
    },
    /// Remove every component.
    Clear,
}

/// What applying an action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed (absent id, rejected grouping, identical selection).
    Unchanged,
    /// The document changed.
    Changed,
    /// A container was created.
    Combined(ComponentId),
    /// A container was dissolved into these components.
    Separated(Vec<ComponentId>),
}

impl Outcome {
    /// Whether the document changed.
    #[must_use]
    pub const fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    fn from_bool(changed: bool) -> Self {
        if changed {
            Self::Changed
        } else {
            Self::Unchanged
        }
    }
}

impl Action {
    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddComponent { .. } => "add_component",
            Self::UpdateComponent { .. } => "update_component",
            Self::DeleteComponent { .. } => "delete_component",
            Self::SelectComponent { .. } => "select_component",
            Self::SelectMultiple { .. } => "select_multiple",
            Self::ClearSelection => "clear_selection",
            Self::MoveComponents { .. } => "move_components",
            Self::ResizeComponent { .. } => "resize_component",
            Self::RotateComponent { .. } => "rotate_component",
            Self::ChangeZIndex { .. } => "change_z_index",
            Self::Combine { .. } => "combine",
            Self::Separate { .. } => "separate",
            Self::Clear => "clear",
        }
    }

    /// Apply this action to a document.
    pub(crate) fn apply(&self, document: &mut Document, config: &EditorConfig) -> Outcome {
        match self {
            Self::AddComponent { component } => {
                document.insert(component.clone());
                Outcome::Changed
            }
            Self::UpdateComponent { id, patch } => {
                Outcome::from_bool(!patch.is_empty() && document.update_component(id, patch))
            }
            Self::DeleteComponent { id } => Outcome::from_bool(document.delete_component(id)),
            Self::SelectComponent { id } => {
                if !document.contains(id) {
                    return Outcome::Unchanged;
                }
                let next = vec![id.clone()];
                Outcome::from_bool(replace_selection(document, next))
            }
            Self::SelectMultiple { ids } => {
                Outcome::from_bool(replace_selection(document, ids.clone()))
            }
            Self::ClearSelection => Outcome::from_bool(replace_selection(document, Vec::new())),
            Self::MoveComponents { ids, dx, dy } => {
                Outcome::from_bool(document.move_components(ids, *dx, *dy))
            }
            Self::ResizeComponent { id, width, height } => {
                with_component(document, id, |c| {
                    c.geometry.width = *width;
                    c.geometry.height = *height;
                })
            }
            Self::RotateComponent { id, rotation } => {
                with_component(document, id, |c| c.geometry.rotation = *rotation)
            }
            Self::ChangeZIndex { id, z_index } => {
                with_component(document, id, |c| c.z_index = *z_index)
            }
            Self::Combine { ids } => compose::combine(document, ids, config)
                .map_or(Outcome::Unchanged, Outcome::Combined),
            Self::Separate { id } => {
                compose::separate(document, id).map_or(Outcome::Unchanged, Outcome::Separated)
            }
            Self::Clear => {
                let changed = !document.is_empty() || !document.selected_ids().is_empty();
                document.clear();
                Outcome::from_bool(changed)
            }
        }
    }
}

fn replace_selection(document: &mut Document, next: Vec<ComponentId>) -> bool {
    if document.selected_ids() == next.as_slice() {
        return false;
    }
    document.set_selection(next);
    true
}

fn with_component(
    document: &mut Document,
    id: &ComponentId,
    f: impl FnOnce(&mut Component),
) -> Outcome {
    document.get_mut(id).map_or(Outcome::Unchanged, |c| {
        f(c);
        Outcome::Changed
    })
}

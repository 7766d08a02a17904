//! Pointer gestures reported by the rendering surface.
//!
//! The surface never mutates the document. Each rendered component carries
//! [`Handlers`] that turn a gesture into an [`InteractionEvent`]; the store
//! translates that event into ordinary [`Action`]s.

use serde::{Deserialize, Serialize};

use crate::action::{Action, Outcome};
use crate::component::{ComponentId, ComponentPatch};
use crate::document::Document;
use crate::store::DocumentStore;

/// A user gesture on one rendered component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum Gesture {
    /// Pointer pressed and dragging began.
    DragStart,
    /// Dragging finished after moving by `(dx, dy)` in canvas space.
    DragEnd {
        /// Horizontal delta.
        dx: f64,
        /// Vertical delta.
        dy: f64,
    },
    /// Clicked. `toggle` is set when ctrl/cmd was held.
    Select {
        /// Modifier key held.
        toggle: bool,
    },
}

/// Which rendered component a gesture hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureTarget {
    /// The component.
    pub id: ComponentId,
    /// The composite it was rendered inside, if any.
    pub container: Option<ComponentId>,
}

/// A gesture bound to its target, ready to send to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    /// What was hit.
    pub target: GestureTarget,
    /// What happened.
    pub gesture: Gesture,
}

/// The three interaction callbacks handed to every renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handlers {
    target: GestureTarget,
}

impl Handlers {
    /// Handlers for a top-level component.
    #[must_use]
    pub fn top_level(id: ComponentId) -> Self {
        Self {
            target: GestureTarget {
                id,
                container: None,
            },
        }
    }

    /// Handlers for a child rendered inside `container`.
    #[must_use]
    pub fn child_of(id: ComponentId, container: ComponentId) -> Self {
        Self {
            target: GestureTarget {
                id,
                container: Some(container),
            },
        }
    }

    /// The bound target.
    #[must_use]
    pub fn target(&self) -> &GestureTarget {
        &self.target
    }

    /// Drag started.
    #[must_use]
    pub fn on_drag_start(&self) -> InteractionEvent {
        self.event(Gesture::DragStart)
    }

    /// Drag finished with the given canvas-space delta.
    #[must_use]
    pub fn on_drag_end(&self, dx: f64, dy: f64) -> InteractionEvent {
        self.event(Gesture::DragEnd { dx, dy })
    }

    /// Clicked, with or without the toggle modifier.
    #[must_use]
    pub fn on_select(&self, toggle: bool) -> InteractionEvent {
        self.event(Gesture::Select { toggle })
    }

    fn event(&self, gesture: Gesture) -> InteractionEvent {
        InteractionEvent {
            target: self.target.clone(),
            gesture,
        }
    }
}

/// Translate an interaction into the actions it should trigger.
///
/// Drag gestures on locked components produce nothing.
#[must_use]
pub fn actions_for(document: &Document, event: &InteractionEvent) -> Vec<Action> {
    let target = &event.target;
    let Some(component) = document.get(&target.id) else {
        return Vec::new();
    };

    match event.gesture {
        Gesture::DragStart => {
            if component.locked || document.is_selected(&target.id) {
                Vec::new()
            } else {
                vec![Action::SelectComponent {
                    id: target.id.clone(),
                }]
            }
        }
        Gesture::DragEnd { dx, dy } => {
            if component.locked {
                tracing::debug!("Ignoring drag on locked component {}", target.id);
                return Vec::new();
            }
            let in_container = target
                .container
                .as_ref()
                .is_some_and(|cid| document.contains(cid));
            if in_container {
                // The container origin is fixed during a child drag, so the
                // canvas-space delta is also the delta in the container frame:
                // relative drop = relative start + (dx, dy).
                vec![Action::UpdateComponent {
                    id: target.id.clone(),
                    patch: ComponentPatch::position(
                        component.geometry.x + dx,
                        component.geometry.y + dy,
                    ),
                }]
            } else {
                vec![Action::MoveComponents {
                    ids: vec![target.id.clone()],
                    dx,
                    dy,
                }]
            }
        }
        Gesture::Select { toggle: false } => vec![Action::SelectComponent {
            id: target.id.clone(),
        }],
        Gesture::Select { toggle: true } => {
            let mut ids = document.selected_ids().to_vec();
            if document.is_selected(&target.id) {
                ids.retain(|id| id != &target.id);
            } else {
                ids.push(target.id.clone());
            }
            vec![Action::SelectMultiple { ids }]
        }
    }
}

impl DocumentStore {
    /// Apply a gesture reported by the rendering surface.
    ///
    /// Returns `true` if the document changed.
    pub fn handle_interaction(&mut self, event: &InteractionEvent) -> bool {
        let actions = actions_for(self.document(), event);
        actions
            .into_iter()
            .map(|action| self.dispatch(action))
            .fold(false, |changed, outcome: Outcome| changed | outcome.changed())
    }
}

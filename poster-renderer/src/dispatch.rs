//! Render dispatch: document snapshot in, paint list out.
//!
//! ```text
//!   top-level components (stable sort by z_index)
//!     │
//!     ├─ registry.lookup(tag) ── none ──▶ warn, skip (children too)
//!     │
//!     ├─ renderer.render(props)          geometry in canvas space
//!     ├─ selection outline               if selected
//!     └─ children (stable sort by z_index), origin += container origin
//! ```

use std::collections::HashSet;

use poster_core::{Component, ComponentId, Document, Geometry, Handlers, Registry};

use crate::paint::{PaintList, Primitive};
use crate::renderers::{ComponentRenderer, RenderProps};
use crate::RendererConfig;

/// Translate a document into paint ops.
///
/// Never fails: components whose tag has no renderer are skipped with a
/// warning, together with anything they contain.
#[must_use]
pub fn paint_document(
    document: &Document,
    registry: &Registry<dyn ComponentRenderer>,
    config: &RendererConfig,
) -> PaintList {
    let mut walk = Walk {
        document,
        registry,
        config,
        painted: HashSet::new(),
        out: PaintList::new(),
    };

    for component in by_z(document.top_level()) {
        walk.paint(component, (0.0, 0.0), Handlers::top_level(component.id.clone()));
    }

    tracing::trace!(
        "Painted {} ops for {} components",
        walk.out.len(),
        document.len()
    );
    walk.out
}

struct Walk<'a> {
    document: &'a Document,
    registry: &'a Registry<dyn ComponentRenderer>,
    config: &'a RendererConfig,
    painted: HashSet<&'a ComponentId>,
    out: PaintList,
}

impl<'a> Walk<'a> {
    fn paint(&mut self, component: &'a Component, origin: (f64, f64), handlers: Handlers) {
        // Guards against a child listed by two composites or a composite cycle.
        if !self.painted.insert(&component.id) {
            tracing::warn!("Component {} reached twice while painting", component.id);
            return;
        }

        let tag = component.component_type();
        let Some(renderer) = self.registry.lookup(tag) else {
            tracing::warn!("No renderer for {tag}; skipping {}", component.id);
            return;
        };

        let geometry = Geometry {
            x: origin.0 + component.geometry.x,
            y: origin.1 + component.geometry.y,
            ..component.geometry
        };
        let children = by_z(self.document.children_of(&component.id));
        let props = RenderProps {
            id: &component.id,
            geometry,
            opacity: clamp_opacity(component.opacity),
            z_index: component.z_index,
            is_selected: self.document.is_selected(&component.id),
            locked: component.locked,
            payload: &component.payload,
            handlers,
            child_count: children.len(),
        };

        tracing::trace!(
            "Render {tag} {} at ({}, {}) size {}x{} via {}",
            component.id,
            geometry.x,
            geometry.y,
            geometry.width,
            geometry.height,
            renderer.name()
        );
        renderer.render(&props, &mut self.out);

        if props.is_selected && self.config.show_selection {
            self.out.push(props.op(Primitive::SelectionOutline {
                color: self.config.selection_color.clone(),
                width: self.config.selection_width,
            }));
        }

        for child in children {
            let child_handlers = Handlers::child_of(child.id.clone(), component.id.clone());
            self.paint(child, (geometry.x, geometry.y), child_handlers);
        }
    }
}

/// Stable sort by z-index; equal keys keep document order.
fn by_z(mut components: Vec<&Component>) -> Vec<&Component> {
    components.sort_by_key(|c| c.z_index);
    components
}

fn clamp_opacity(opacity: f64) -> f64 {
    if opacity.is_nan() {
        1.0
    } else {
        opacity.clamp(0.0, 1.0)
    }
}

//! Composite frames.
//!
//! The container renderer draws only the frame; the dispatcher paints the
//! children right after it, offset by the container origin.

use super::{unexpected_payload, ComponentRenderer, RenderProps};
use crate::paint::{PaintList, Primitive};

/// Shared renderer for every composite tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerRenderer;

impl ComponentRenderer for ContainerRenderer {
    fn name(&self) -> &'static str {
        "container"
    }

    fn render(&self, props: &RenderProps<'_>, out: &mut PaintList) {
        let Some(container) = props.payload.container() else {
            return unexpected_payload(self.name(), props);
        };
        let style = &container.style;
        out.push(props.op(Primitive::Container {
            kind: props.payload.component_type(),
            layout: container.layout,
            spacing: container.spacing,
            background: style.background.clone(),
            border_color: style.border_color.clone(),
            border_width: style.border_width.max(0.0),
            corner_radius: style.corner_radius.max(0.0),
            child_count: props.child_count,
        }));
    }
}

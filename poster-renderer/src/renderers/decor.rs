//! Backgrounds, borders and dot markers.

use poster_core::ComponentData;

use super::{unexpected_payload, ComponentRenderer, RenderProps};
use crate::paint::{PaintList, Primitive};

/// Full-bleed background.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackgroundRenderer;

impl ComponentRenderer for BackgroundRenderer {
    fn name(&self) -> &'static str {
        "background"
    }

    fn render(&self, props: &RenderProps<'_>, out: &mut PaintList) {
        let ComponentData::Background(background) = props.payload else {
            return unexpected_payload(self.name(), props);
        };
        out.push(props.op(Primitive::Fill {
            color: background.color.clone(),
            image: background.image.clone().filter(|src| !src.is_empty()),
        }));
    }
}

/// Decorative frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorderRenderer;

impl ComponentRenderer for BorderRenderer {
    fn name(&self) -> &'static str {
        "border"
    }

    fn render(&self, props: &RenderProps<'_>, out: &mut PaintList) {
        let ComponentData::Border(border) = props.payload else {
            return unexpected_payload(self.name(), props);
        };
        if border.width <= 0.0 {
            return;
        }
        out.push(props.op(Primitive::Frame {
            color: border.color.clone(),
            width: border.width,
            style: border.style,
            corner_radius: border.corner_radius.max(0.0),
        }));
    }
}

/// Dot with optional label.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotMarkerRenderer;

impl ComponentRenderer for DotMarkerRenderer {
    fn name(&self) -> &'static str {
        "dot-marker"
    }

    fn render(&self, props: &RenderProps<'_>, out: &mut PaintList) {
        let ComponentData::DotMarker(dot) = props.payload else {
            return unexpected_payload(self.name(), props);
        };
        out.push(props.op(Primitive::Dot {
            color: dot.color.clone(),
            label: dot.label.clone(),
        }));
    }
}

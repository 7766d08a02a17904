//! Text and watermark.

use poster_core::ComponentData;

use super::{unexpected_payload, ComponentRenderer, RenderProps};
use crate::paint::{PaintList, Primitive};

/// Styled text block.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl ComponentRenderer for TextRenderer {
    fn name(&self) -> &'static str {
        "text"
    }

    fn render(&self, props: &RenderProps<'_>, out: &mut PaintList) {
        let ComponentData::Text(text) = props.payload else {
            return unexpected_payload(self.name(), props);
        };
        tracing::trace!("Text {} ({} chars)", props.id, text.content.chars().count());
        out.push(props.op(Primitive::Text {
            content: text.content.clone(),
            font_size: text.font_size,
            font_family: text.font_family.clone(),
            bold: text.bold,
            italic: text.italic,
            color: text.color.clone(),
            align: text.align,
        }));
    }
}

/// Repeated text tiled across the component box.
#[derive(Debug, Clone, Copy, Default)]
pub struct WatermarkRenderer;

impl ComponentRenderer for WatermarkRenderer {
    fn name(&self) -> &'static str {
        "watermark"
    }

    fn render(&self, props: &RenderProps<'_>, out: &mut PaintList) {
        let ComponentData::Watermark(mark) = props.payload else {
            return unexpected_payload(self.name(), props);
        };
        if mark.text.is_empty() {
            return;
        }
        out.push(props.op(Primitive::Pattern {
            text: mark.text.clone(),
            color: mark.color.clone(),
            font_size: mark.font_size,
            gap: mark.gap.max(0.0),
        }));
    }
}

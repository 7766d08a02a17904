//! Images, icons and machine-readable codes.

use poster_core::ComponentData;

use super::{unexpected_payload, ComponentRenderer, RenderProps};
use crate::paint::{PaintList, Primitive, Symbology};

/// Image box.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRenderer;

impl ComponentRenderer for ImageRenderer {
    fn name(&self) -> &'static str {
        "image"
    }

    fn render(&self, props: &RenderProps<'_>, out: &mut PaintList) {
        let ComponentData::Image(image) = props.payload else {
            return unexpected_payload(self.name(), props);
        };
        if image.src.is_empty() {
            tracing::debug!("Image {} has no source; drawing placeholder", props.id);
        }
        out.push(props.op(Primitive::Image {
            src: image.src.clone(),
            fit: image.fit,
        }));
    }
}

/// Icon glyph.
#[derive(Debug, Clone, Copy, Default)]
pub struct IconRenderer;

impl ComponentRenderer for IconRenderer {
    fn name(&self) -> &'static str {
        "icon"
    }

    fn render(&self, props: &RenderProps<'_>, out: &mut PaintList) {
        let ComponentData::Icon(icon) = props.payload else {
            return unexpected_payload(self.name(), props);
        };
        out.push(props.op(Primitive::Glyph {
            name: icon.name.clone(),
            color: icon.color.clone(),
        }));
    }
}

/// Barcode and QR code, sharing one payload shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeRenderer;

impl ComponentRenderer for CodeRenderer {
    fn name(&self) -> &'static str {
        "code"
    }

    fn render(&self, props: &RenderProps<'_>, out: &mut PaintList) {
        let (symbology, code) = match props.payload {
            ComponentData::Barcode(code) => (Symbology::Barcode, code),
            ComponentData::Qrcode(code) => (Symbology::Qr, code),
            _ => return unexpected_payload(self.name(), props),
        };
        out.push(props.op(Primitive::Code {
            symbology,
            value: code.value.clone(),
            foreground: code.foreground.clone(),
            background: code.background.clone(),
        }));
    }
}

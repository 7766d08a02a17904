//! Per-tag renderers.
//!
//! Each renderer turns one component's [`RenderProps`] into paint ops. The
//! registry decides which renderer a tag gets; a renderer only ever sees the
//! payload variants it was registered for.

pub mod container;
pub mod data;
pub mod decor;
pub mod media;
pub mod shape;
pub mod text;

use poster_core::{ComponentData, ComponentId, Geometry, Handlers};

use crate::paint::{PaintList, PaintOp, Primitive};

pub use container::ContainerRenderer;
pub use data::{ChartRenderer, CountdownRenderer, ProgressRenderer, RatingRenderer, TableRenderer};
pub use decor::{BackgroundRenderer, BorderRenderer, DotMarkerRenderer};
pub use media::{CodeRenderer, IconRenderer, ImageRenderer};
pub use shape::{ShapeRenderer, TagRenderer};
pub use text::{TextRenderer, WatermarkRenderer};

/// Everything a renderer gets for one component.
#[derive(Debug, Clone)]
pub struct RenderProps<'a> {
    /// Component id.
    pub id: &'a ComponentId,
    /// Box in canvas space (container origin already added for children).
    pub geometry: Geometry,
    /// Opacity clamped to `0..=1`.
    pub opacity: f64,
    /// Paint order key.
    pub z_index: u32,
    /// Whether the id is in the selection.
    pub is_selected: bool,
    /// Lock flag.
    pub locked: bool,
    /// Type-specific payload.
    pub payload: &'a ComponentData,
    /// Pointer callbacks.
    pub handlers: Handlers,
    /// Number of children that resolved (composites only).
    pub child_count: usize,
}

impl RenderProps<'_> {
    /// Wrap a primitive in an op positioned at this component.
    #[must_use]
    pub fn op(&self, primitive: Primitive) -> PaintOp {
        PaintOp {
            component_id: self.id.clone(),
            geometry: self.geometry,
            rotation: self.geometry.normalized_rotation(),
            opacity: self.opacity,
            handlers: self.handlers.clone(),
            primitive,
        }
    }
}

/// Draws one family of component types.
pub trait ComponentRenderer: Send + Sync {
    /// Renderer name for diagnostics.
    fn name(&self) -> &'static str;

    /// Append this component's ops to `out`.
    fn render(&self, props: &RenderProps<'_>, out: &mut PaintList);
}

/// Log a payload the renderer was not registered for and draw nothing.
pub(crate) fn unexpected_payload(renderer: &str, props: &RenderProps<'_>) {
    tracing::warn!(
        "{renderer} cannot draw {} payload of {}",
        props.payload.component_type(),
        props.id
    );
}

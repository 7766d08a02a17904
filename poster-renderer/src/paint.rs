//! Paint lists: the flat, ordered output of render dispatch.
//!
//! A drawing surface replays a [`PaintList`] front to back. Every op carries
//! the canvas-space geometry it occupies and the [`Handlers`] the surface must
//! wire to pointer events for that component.

use serde::Serialize;

use poster_core::component::{BorderStyle, ChartKind, DataPoint, ImageFit, Layout, TextAlign};
use poster_core::{ComponentId, ComponentType, Geometry, Handlers};

use crate::RenderResult;

/// Outline primitives shared by the shape tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeKind {
    /// Axis-aligned rectangle, optionally rounded.
    Rectangle,
    /// Ellipse inscribed in the box.
    Ellipse,
    /// Isosceles triangle pointing up.
    Triangle,
    /// Star polygon.
    Star {
        /// Number of outer points.
        points: u8,
    },
    /// Right-pointing arrow.
    Arrow,
    /// Horizontal line through the box centre.
    Line,
}

/// Barcode symbology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbology {
    /// Linear barcode.
    Barcode,
    /// QR matrix code.
    Qr,
}

/// What to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "primitive", rename_all = "snake_case")]
pub enum Primitive {
    /// Geometric outline.
    Shape {
        /// Outline kind.
        kind: ShapeKind,
        /// Fill color.
        fill: Option<String>,
        /// Stroke color.
        stroke: Option<String>,
        /// Stroke width.
        stroke_width: f64,
        /// Corner radius.
        corner_radius: f64,
    },
    /// Text run.
    Text {
        /// Content.
        content: String,
        /// Font size.
        font_size: f64,
        /// Font family.
        font_family: String,
        /// Bold weight.
        bold: bool,
        /// Italic style.
        italic: bool,
        /// Color.
        color: String,
        /// Alignment.
        align: TextAlign,
    },
    /// Pill label.
    Tag {
        /// Label text.
        label: String,
        /// Background.
        fill: String,
        /// Text color.
        text_color: String,
    },
    /// Bitmap or vector image.
    Image {
        /// Source URI.
        src: String,
        /// Fit mode.
        fit: ImageFit,
    },
    /// Icon glyph.
    Glyph {
        /// Icon name.
        name: String,
        /// Color.
        color: String,
    },
    /// Machine-readable code.
    Code {
        /// Barcode or QR.
        symbology: Symbology,
        /// Encoded value.
        value: String,
        /// Module color.
        foreground: String,
        /// Background color.
        background: String,
    },
    /// Table grid.
    Table {
        /// Cell text.
        rows: Vec<Vec<String>>,
        /// First row is a header.
        header: bool,
        /// Grid color.
        border_color: String,
    },
    /// Chart series.
    Chart {
        /// Chart kind.
        kind: ChartKind,
        /// Data points.
        points: Vec<DataPoint>,
        /// Series color.
        color: String,
    },
    /// Tiled repeated text.
    Pattern {
        /// Text.
        text: String,
        /// Color.
        color: String,
        /// Font size.
        font_size: f64,
        /// Gap between tiles.
        gap: f64,
    },
    /// Countdown display.
    Countdown {
        /// Target date.
        target: String,
        /// Caption.
        label: String,
        /// Digit color.
        color: String,
    },
    /// Progress bar.
    Progress {
        /// Filled fraction in `0..=1`.
        fraction: f64,
        /// Filled color.
        fill: String,
        /// Track color.
        track: String,
    },
    /// Row of stars.
    Rating {
        /// Rating value clamped to `0..=max`.
        value: f64,
        /// Star count.
        max: u32,
        /// Active color.
        color: String,
    },
    /// Solid or image fill.
    Fill {
        /// Fill color.
        color: String,
        /// Optional image.
        image: Option<String>,
    },
    /// Frame stroke.
    Frame {
        /// Stroke color.
        color: String,
        /// Stroke width.
        width: f64,
        /// Line style.
        style: BorderStyle,
        /// Corner radius.
        corner_radius: f64,
    },
    /// Dot marker.
    Dot {
        /// Dot color.
        color: String,
        /// Optional label.
        label: Option<String>,
    },
    /// Composite frame; children follow as separate ops.
    Container {
        /// Composite tag.
        kind: ComponentType,
        /// Child arrangement hint.
        layout: Layout,
        /// Gap between children.
        spacing: f64,
        /// Background fill.
        background: Option<String>,
        /// Frame color.
        border_color: Option<String>,
        /// Frame width.
        border_width: f64,
        /// Corner radius.
        corner_radius: f64,
        /// Number of children that resolved.
        child_count: usize,
    },
    /// Selection highlight around a component.
    SelectionOutline {
        /// Stroke color.
        color: String,
        /// Stroke width.
        width: f64,
    },
}

impl Primitive {
    /// Wire name of the primitive.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Shape { .. } => "shape",
            Self::Text { .. } => "text",
            Self::Tag { .. } => "tag",
            Self::Image { .. } => "image",
            Self::Glyph { .. } => "glyph",
            Self::Code { .. } => "code",
            Self::Table { .. } => "table",
            Self::Chart { .. } => "chart",
            Self::Pattern { .. } => "pattern",
            Self::Countdown { .. } => "countdown",
            Self::Progress { .. } => "progress",
            Self::Rating { .. } => "rating",
            Self::Fill { .. } => "fill",
            Self::Frame { .. } => "frame",
            Self::Dot { .. } => "dot",
            Self::Container { .. } => "container",
            Self::SelectionOutline { .. } => "selection_outline",
        }
    }
}

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaintOp {
    /// Component this op belongs to.
    pub component_id: ComponentId,
    /// Canvas-space box.
    pub geometry: Geometry,
    /// Rotation in `[0, 360)`.
    pub rotation: f64,
    /// Opacity in `0..=1`.
    pub opacity: f64,
    /// Pointer callbacks for this component.
    pub handlers: Handlers,
    /// What to draw.
    pub primitive: Primitive,
}

/// Ordered drawing instructions for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PaintList {
    ops: Vec<PaintOp>,
}

impl PaintList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an op.
    pub fn push(&mut self, op: PaintOp) {
        self.ops.push(op);
    }

    /// Ops in paint order.
    #[must_use]
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Number of ops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether nothing will be drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Ids of painted components in paint order, selection outlines excluded.
    pub fn component_order(&self) -> impl Iterator<Item = &ComponentId> {
        self.ops
            .iter()
            .filter(|op| !matches!(op.primitive, Primitive::SelectionOutline { .. }))
            .map(|op| &op.component_id)
    }

    /// Encode the list as pretty-printed JSON for a host surface.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The first op painted for a component.
    #[must_use]
    pub fn find(&self, id: &ComponentId) -> Option<&PaintOp> {
        self.ops.iter().find(|op| &op.component_id == id)
    }
}

impl IntoIterator for PaintList {
    type Item = PaintOp;
    type IntoIter = std::vec::IntoIter<PaintOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a PaintList {
    type Item = &'a PaintOp;
    type IntoIter = std::slice::Iter<'a, PaintOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

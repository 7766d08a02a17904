//! Poster components - the building blocks of a document.
//!
//! A [`Component`] is geometry plus a [`ComponentData`] payload. The payload is
//! a tagged union with exactly one variant per [`ComponentType`], so the type
//! tag is always derived from the payload and can never disagree with it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    /// Create a new unique component ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The closed set of component type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentType {
    /// Styled text block.
    Text,
    /// Rectangle shape.
    Rectangle,
    /// Circle/ellipse shape.
    Circle,
    /// Triangle shape.
    Triangle,
    /// Star shape.
    Star,
    /// Arrow shape.
    Arrow,
    /// Straight line.
    Line,
    /// Pill-shaped label.
    Tag,
    /// Raster or vector image.
    Image,
    /// Named icon glyph.
    Icon,
    /// One-dimensional barcode.
    Barcode,
    /// QR code.
    Qrcode,
    /// Table of text cells.
    Table,
    /// Data chart.
    Chart,
    /// Repeated translucent watermark text.
    Watermark,
    /// Countdown to a target date.
    Countdown,
    /// Horizontal progress bar.
    ProgressBar,
    /// Star rating.
    Rating,
    /// Full-bleed background fill.
    Background,
    /// Decorative border frame.
    Border,
    /// Dot marker with optional label.
    DotMarker,
    /// Header group container.
    HeaderGroup,
    /// Content card container.
    ContentCard,
    /// Info grid container.
    InfoGrid,
    /// Callout box container.
    CalloutBox,
    /// Divider container.
    Divider,
    /// Timeline block container.
    TimelineBlock,
    /// Stats card container.
    StatsCard,
    /// Title block container (second composite family).
    NewTitleBlock,
    /// Feature card container (second composite family).
    NewFeatureCard,
    /// Stat panel container (second composite family).
    NewStatPanel,
    /// Timeline container (second composite family).
    NewTimeline,
    /// Quote card container (second composite family).
    NewQuoteCard,
}

impl ComponentType {
    /// Every type tag, in declaration order.
    pub const ALL: [Self; 33] = [
        Self::Text,
        Self::Rectangle,
        Self::Circle,
        Self::Triangle,
        Self::Star,
        Self::Arrow,
        Self::Line,
        Self::Tag,
        Self::Image,
        Self::Icon,
        Self::Barcode,
        Self::Qrcode,
        Self::Table,
        Self::Chart,
        Self::Watermark,
        Self::Countdown,
        Self::ProgressBar,
        Self::Rating,
        Self::Background,
        Self::Border,
        Self::DotMarker,
        Self::HeaderGroup,
        Self::ContentCard,
        Self::InfoGrid,
        Self::CalloutBox,
        Self::Divider,
        Self::TimelineBlock,
        Self::StatsCard,
        Self::NewTitleBlock,
        Self::NewFeatureCard,
        Self::NewStatPanel,
        Self::NewTimeline,
        Self::NewQuoteCard,
    ];

    /// The string form of the tag, as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Star => "star",
            Self::Arrow => "arrow",
            Self::Line => "line",
            Self::Tag => "tag",
            Self::Image => "image",
            Self::Icon => "icon",
            Self::Barcode => "barcode",
            Self::Qrcode => "qrcode",
            Self::Table => "table",
            Self::Chart => "chart",
            Self::Watermark => "watermark",
            Self::Countdown => "countdown",
            Self::ProgressBar => "progress-bar",
            Self::Rating => "rating",
            Self::Background => "background",
            Self::Border => "border",
            Self::DotMarker => "dot-marker",
            Self::HeaderGroup => "header-group",
            Self::ContentCard => "content-card",
            Self::InfoGrid => "info-grid",
            Self::CalloutBox => "callout-box",
            Self::Divider => "divider",
            Self::TimelineBlock => "timeline-block",
            Self::StatsCard => "stats-card",
            Self::NewTitleBlock => "new-title-block",
            Self::NewFeatureCard => "new-feature-card",
            Self::NewStatPanel => "new-stat-panel",
            Self::NewTimeline => "new-timeline",
            Self::NewQuoteCard => "new-quote-card",
        }
    }

    /// Whether this tag denotes a composite (container) component.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(
            self,
            Self::HeaderGroup
                | Self::ContentCard
                | Self::InfoGrid
                | Self::CalloutBox
                | Self::Divider
                | Self::TimelineBlock
                | Self::StatsCard
                | Self::NewTitleBlock
                | Self::NewFeatureCard
                | Self::NewStatPanel
                | Self::NewTimeline
                | Self::NewQuoteCard
        )
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown component type: {s}"))
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Left aligned.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right aligned.
    Right,
}

/// Text payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextData {
    /// Text content.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Font family name.
    pub font_family: String,
    /// Bold weight.
    #[serde(default)]
    pub bold: bool,
    /// Italic style.
    #[serde(default)]
    pub italic: bool,
    /// Text color as hex.
    pub color: String,
    /// Alignment within the box.
    #[serde(default)]
    pub align: TextAlign,
}

impl Default for TextData {
    fn default() -> Self {
        Self {
            content: "Double-click to edit".to_string(),
            font_size: 24.0,
            font_family: "Inter".to_string(),
            bold: false,
            italic: false,
            color: "#1f2937".to_string(),
            align: TextAlign::Left,
        }
    }
}

/// Payload shared by the geometric shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeData {
    /// Fill color as hex (`None` for no fill).
    pub fill: Option<String>,
    /// Stroke color as hex.
    pub stroke: Option<String>,
    /// Stroke width in pixels.
    #[serde(default)]
    pub stroke_width: f64,
    /// Corner radius (rectangles only).
    #[serde(default)]
    pub corner_radius: f64,
}

impl Default for ShapeData {
    fn default() -> Self {
        Self {
            fill: Some("#3b82f6".to_string()),
            stroke: None,
            stroke_width: 0.0,
            corner_radius: 0.0,
        }
    }
}

impl ShapeData {
    fn outline() -> Self {
        Self {
            fill: None,
            stroke: Some("#1f2937".to_string()),
            stroke_width: 4.0,
            corner_radius: 0.0,
        }
    }
}

/// Pill-shaped label payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagData {
    /// Label text.
    pub label: String,
    /// Background color.
    pub fill: String,
    /// Label color.
    pub text_color: String,
}

impl Default for TagData {
    fn default() -> Self {
        Self {
            label: "NEW".to_string(),
            fill: "#ef4444".to_string(),
            text_color: "#ffffff".to_string(),
        }
    }
}

/// How an image fills its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    /// Scale to cover, cropping overflow.
    #[default]
    Cover,
    /// Scale to fit entirely inside.
    Contain,
    /// Stretch to the box.
    Fill,
}

/// Image payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageData {
    /// Image source URI or data URL.
    pub src: String,
    /// Fit mode.
    #[serde(default)]
    pub fit: ImageFit,
}

/// Icon payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconData {
    /// Icon name in the icon set.
    pub name: String,
    /// Icon color as hex.
    pub color: String,
}

impl Default for IconData {
    fn default() -> Self {
        Self {
            name: "star".to_string(),
            color: "#f59e0b".to_string(),
        }
    }
}

/// Barcode / QR code payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeData {
    /// Encoded value.
    pub value: String,
    /// Module color.
    pub foreground: String,
    /// Quiet-zone color.
    pub background: String,
}

impl Default for CodeData {
    fn default() -> Self {
        Self {
            value: "https://example.com".to_string(),
            foreground: "#000000".to_string(),
            background: "#ffffff".to_string(),
        }
    }
}

/// Table payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    /// Cell text, row-major.
    pub rows: Vec<Vec<String>>,
    /// Whether the first row is a header.
    #[serde(default)]
    pub header: bool,
    /// Grid line color.
    pub border_color: String,
}

impl Default for TableData {
    fn default() -> Self {
        Self {
            rows: vec![
                vec!["Item".to_string(), "Value".to_string()],
                vec!["A".to_string(), "1".to_string()],
                vec!["B".to_string(), "2".to_string()],
            ],
            header: true,
            border_color: "#d1d5db".to_string(),
        }
    }
}

/// Chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Vertical bars.
    #[default]
    Bar,
    /// Polyline.
    Line,
    /// Pie slices.
    Pie,
}

/// One labelled chart value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Category label.
    pub label: String,
    /// Value.
    pub value: f64,
}

/// Chart payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Chart kind.
    pub kind: ChartKind,
    /// Data series.
    pub points: Vec<DataPoint>,
    /// Series color.
    pub color: String,
}

impl Default for ChartData {
    fn default() -> Self {
        let points = [("Q1", 30.0), ("Q2", 45.0), ("Q3", 28.0), ("Q4", 60.0)]
            .into_iter()
            .map(|(label, value)| DataPoint {
                label: label.to_string(),
                value,
            })
            .collect();
        Self {
            kind: ChartKind::Bar,
            points,
            color: "#6366f1".to_string(),
        }
    }
}

/// Watermark payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatermarkData {
    /// Watermark text.
    pub text: String,
    /// Text color.
    pub color: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Tiling gap between repetitions.
    pub gap: f64,
}

impl Default for WatermarkData {
    fn default() -> Self {
        Self {
            text: "DRAFT".to_string(),
            color: "#9ca3af".to_string(),
            font_size: 32.0,
            gap: 120.0,
        }
    }
}

/// Countdown payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownData {
    /// Target date (ISO-8601).
    pub target: String,
    /// Caption shown above the digits.
    pub label: String,
    /// Digit color.
    pub color: String,
}

impl Default for CountdownData {
    fn default() -> Self {
        Self {
            target: "2030-01-01T00:00:00Z".to_string(),
            label: "Starts in".to_string(),
            color: "#111827".to_string(),
        }
    }
}

/// Progress bar payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressData {
    /// Current value.
    pub value: f64,
    /// Maximum value.
    pub max: f64,
    /// Filled portion color.
    pub fill: String,
    /// Track color.
    pub track: String,
}

impl ProgressData {
    /// Filled fraction in `0.0..=1.0`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.value / self.max).clamp(0.0, 1.0)
    }
}

impl Default for ProgressData {
    fn default() -> Self {
        Self {
            value: 60.0,
            max: 100.0,
            fill: "#10b981".to_string(),
            track: "#e5e7eb".to_string(),
        }
    }
}

/// Rating payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingData {
    /// Rating value (may be fractional).
    pub value: f64,
    /// Number of stars.
    pub max: u32,
    /// Active star color.
    pub color: String,
}

impl Default for RatingData {
    fn default() -> Self {
        Self {
            value: 4.0,
            max: 5,
            color: "#fbbf24".to_string(),
        }
    }
}

/// Background payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundData {
    /// Fill color.
    pub color: String,
    /// Optional image drawn over the fill.
    pub image: Option<String>,
}

impl Default for BackgroundData {
    fn default() -> Self {
        Self {
            color: "#f3f4f6".to_string(),
            image: None,
        }
    }
}

/// Border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// Continuous line.
    #[default]
    Solid,
    /// Dashed line.
    Dashed,
    /// Dotted line.
    Dotted,
}

/// Border frame payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderData {
    /// Line color.
    pub color: String,
    /// Line width.
    pub width: f64,
    /// Line style.
    #[serde(default)]
    pub style: BorderStyle,
    /// Corner radius.
    #[serde(default)]
    pub corner_radius: f64,
}

impl Default for BorderData {
    fn default() -> Self {
        Self {
            color: "#111827".to_string(),
            width: 6.0,
            style: BorderStyle::Solid,
            corner_radius: 0.0,
        }
    }
}

/// Dot marker payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotMarkerData {
    /// Dot color.
    pub color: String,
    /// Optional label beside the dot.
    pub label: Option<String>,
}

impl Default for DotMarkerData {
    fn default() -> Self {
        Self {
            color: "#ef4444".to_string(),
            label: None,
        }
    }
}

/// How a container arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Stacked top to bottom.
    #[default]
    Vertical,
    /// Side by side.
    Horizontal,
    /// Grid cells.
    Grid,
}

/// Visual styling of a container frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerStyle {
    /// Background fill.
    pub background: Option<String>,
    /// Frame color.
    pub border_color: Option<String>,
    /// Frame width.
    #[serde(default)]
    pub border_width: f64,
    /// Corner radius.
    #[serde(default)]
    pub corner_radius: f64,
}

/// Payload of every composite component.
///
/// Children are stored as independent components in the document; the
/// container only references them by id, and their `x`/`y` are relative to
/// the container origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerData {
    /// Ids of the grouped components.
    pub child_ids: Vec<ComponentId>,
    /// Child arrangement hint.
    #[serde(default)]
    pub layout: Layout,
    /// Gap between children.
    #[serde(default)]
    pub spacing: f64,
    /// Frame styling.
    #[serde(default)]
    pub style: ContainerStyle,
}

impl Default for ContainerData {
    fn default() -> Self {
        Self {
            child_ids: Vec::new(),
            layout: Layout::Vertical,
            spacing: 10.0,
            style: ContainerStyle::default(),
        }
    }
}

impl ContainerData {
    fn styled(background: &str, border: Option<&str>, corner_radius: f64) -> Self {
        Self {
            style: ContainerStyle {
                background: Some(background.to_string()),
                border_color: border.map(str::to_string),
                border_width: if border.is_some() { 1.0 } else { 0.0 },
                corner_radius,
            },
            ..Self::default()
        }
    }
}

/// The type-specific payload of a component.
///
/// Serialized as `{"type": "<tag>", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ComponentData {
    /// Text.
    Text(TextData),
    /// Rectangle.
    Rectangle(ShapeData),
    /// Circle.
    Circle(ShapeData),
    /// Triangle.
    Triangle(ShapeData),
    /// Star.
    Star(ShapeData),
    /// Arrow.
    Arrow(ShapeData),
    /// Line.
    Line(ShapeData),
    /// Tag.
    Tag(TagData),
    /// Image.
    Image(ImageData),
    /// Icon.
    Icon(IconData),
    /// Barcode.
    Barcode(CodeData),
    /// QR code.
    Qrcode(CodeData),
    /// Table.
    Table(TableData),
    /// Chart.
    Chart(ChartData),
    /// Watermark.
    Watermark(WatermarkData),
    /// Countdown.
    Countdown(CountdownData),
    /// Progress bar.
    ProgressBar(ProgressData),
    /// Rating.
    Rating(RatingData),
    /// Background.
    Background(BackgroundData),
    /// Border.
    Border(BorderData),
    /// Dot marker.
    DotMarker(DotMarkerData),
    /// Header group.
    HeaderGroup(ContainerData),
    /// Content card.
    ContentCard(ContainerData),
    /// Info grid.
    InfoGrid(ContainerData),
    /// Callout box.
    CalloutBox(ContainerData),
    /// Divider.
    Divider(ContainerData),
    /// Timeline block.
    TimelineBlock(ContainerData),
    /// Stats card.
    StatsCard(ContainerData),
    /// Title block.
    NewTitleBlock(ContainerData),
    /// Feature card.
    NewFeatureCard(ContainerData),
    /// Stat panel.
    NewStatPanel(ContainerData),
    /// Timeline.
    NewTimeline(ContainerData),
    /// Quote card.
    NewQuoteCard(ContainerData),
}

impl ComponentData {
    /// The type tag this payload belongs to.
    #[must_use]
    pub const fn component_type(&self) -> ComponentType {
        match self {
            Self::Text(_) => ComponentType::Text,
            Self::Rectangle(_) => ComponentType::Rectangle,
            Self::Circle(_) => ComponentType::Circle,
            Self::Triangle(_) => ComponentType::Triangle,
            Self::Star(_) => ComponentType::Star,
            Self::Arrow(_) => ComponentType::Arrow,
            Self::Line(_) => ComponentType::Line,
            Self::Tag(_) => ComponentType::Tag,
            Self::Image(_) => ComponentType::Image,
            Self::Icon(_) => ComponentType::Icon,
            Self::Barcode(_) => ComponentType::Barcode,
            Self::Qrcode(_) => ComponentType::Qrcode,
            Self::Table(_) => ComponentType::Table,
            Self::Chart(_) => ComponentType::Chart,
            Self::Watermark(_) => ComponentType::Watermark,
            Self::Countdown(_) => ComponentType::Countdown,
            Self::ProgressBar(_) => ComponentType::ProgressBar,
            Self::Rating(_) => ComponentType::Rating,
            Self::Background(_) => ComponentType::Background,
            Self::Border(_) => ComponentType::Border,
            Self::DotMarker(_) => ComponentType::DotMarker,
            Self::HeaderGroup(_) => ComponentType::HeaderGroup,
            Self::ContentCard(_) => ComponentType::ContentCard,
            Self::InfoGrid(_) => ComponentType::InfoGrid,
            Self::CalloutBox(_) => ComponentType::CalloutBox,
            Self::Divider(_) => ComponentType::Divider,
            Self::TimelineBlock(_) => ComponentType::TimelineBlock,
            Self::StatsCard(_) => ComponentType::StatsCard,
            Self::NewTitleBlock(_) => ComponentType::NewTitleBlock,
            Self::NewFeatureCard(_) => ComponentType::NewFeatureCard,
            Self::NewStatPanel(_) => ComponentType::NewStatPanel,
            Self::NewTimeline(_) => ComponentType::NewTimeline,
            Self::NewQuoteCard(_) => ComponentType::NewQuoteCard,
        }
    }

    /// The container payload, if this is a composite.
    #[must_use]
    pub const fn container(&self) -> Option<&ContainerData> {
        match self {
            Self::HeaderGroup(c)
            | Self::ContentCard(c)
            | Self::InfoGrid(c)
            | Self::CalloutBox(c)
            | Self::Divider(c)
            | Self::TimelineBlock(c)
            | Self::StatsCard(c)
            | Self::NewTitleBlock(c)
            | Self::NewFeatureCard(c)
            | Self::NewStatPanel(c)
            | Self::NewTimeline(c)
            | Self::NewQuoteCard(c) => Some(c),
            _ => None,
        }
    }

    /// Mutable container payload, if this is a composite.
    pub fn container_mut(&mut self) -> Option<&mut ContainerData> {
        match self {
            Self::HeaderGroup(c)
            | Self::ContentCard(c)
            | Self::InfoGrid(c)
            | Self::CalloutBox(c)
            | Self::Divider(c)
            | Self::TimelineBlock(c)
            | Self::StatsCard(c)
            | Self::NewTitleBlock(c)
            | Self::NewFeatureCard(c)
            | Self::NewStatPanel(c)
            | Self::NewTimeline(c)
            | Self::NewQuoteCard(c) => Some(c),
            _ => None,
        }
    }

    /// Default payload for a type tag, as the creation toolbox uses it.
    #[must_use]
    pub fn default_for(component_type: ComponentType) -> Self {
        match component_type {
            ComponentType::Text => Self::Text(TextData::default()),
            ComponentType::Rectangle => Self::Rectangle(ShapeData::default()),
            ComponentType::Circle => Self::Circle(ShapeData {
                fill: Some("#f97316".to_string()),
                ..ShapeData::default()
            }),
            ComponentType::Triangle => Self::Triangle(ShapeData {
                fill: Some("#22c55e".to_string()),
                ..ShapeData::default()
            }),
            ComponentType::Star => Self::Star(ShapeData {
                fill: Some("#facc15".to_string()),
                ..ShapeData::default()
            }),
            ComponentType::Arrow => Self::Arrow(ShapeData::outline()),
            ComponentType::Line => Self::Line(ShapeData::outline()),
            ComponentType::Tag => Self::Tag(TagData::default()),
            ComponentType::Image => Self::Image(ImageData::default()),
            ComponentType::Icon => Self::Icon(IconData::default()),
            ComponentType::Barcode => Self::Barcode(CodeData {
                value: "012345678905".to_string(),
                ..CodeData::default()
            }),
            ComponentType::Qrcode => Self::Qrcode(CodeData::default()),
            ComponentType::Table => Self::Table(TableData::default()),
            ComponentType::Chart => Self::Chart(ChartData::default()),
            ComponentType::Watermark => Self::Watermark(WatermarkData::default()),
            ComponentType::Countdown => Self::Countdown(CountdownData::default()),
            ComponentType::ProgressBar => Self::ProgressBar(ProgressData::default()),
            ComponentType::Rating => Self::Rating(RatingData::default()),
            ComponentType::Background => Self::Background(BackgroundData::default()),
            ComponentType::Border => Self::Border(BorderData::default()),
            ComponentType::DotMarker => Self::DotMarker(DotMarkerData::default()),
            ComponentType::HeaderGroup => Self::HeaderGroup(ContainerData::default()),
            ComponentType::ContentCard => {
                Self::ContentCard(ContainerData::styled("#ffffff", Some("#e5e7eb"), 12.0))
            }
            ComponentType::InfoGrid => Self::InfoGrid(ContainerData {
                layout: Layout::Grid,
                ..ContainerData::default()
            }),
            ComponentType::CalloutBox => {
                Self::CalloutBox(ContainerData::styled("#fef3c7", Some("#f59e0b"), 8.0))
            }
            ComponentType::Divider => Self::Divider(ContainerData {
                layout: Layout::Horizontal,
                ..ContainerData::default()
            }),
            ComponentType::TimelineBlock => Self::TimelineBlock(ContainerData::default()),
            ComponentType::StatsCard => Self::StatsCard(ContainerData {
                layout: Layout::Horizontal,
                ..ContainerData::styled("#eef2ff", None, 12.0)
            }),
            ComponentType::NewTitleBlock => Self::NewTitleBlock(ContainerData::default()),
            ComponentType::NewFeatureCard => {
                Self::NewFeatureCard(ContainerData::styled("#ffffff", Some("#d1d5db"), 16.0))
            }
            ComponentType::NewStatPanel => Self::NewStatPanel(ContainerData {
                layout: Layout::Grid,
                ..ContainerData::styled("#f0fdf4", None, 12.0)
            }),
            ComponentType::NewTimeline => Self::NewTimeline(ContainerData::default()),
            ComponentType::NewQuoteCard => {
                Self::NewQuoteCard(ContainerData::styled("#f9fafb", Some("#9ca3af"), 8.0))
            }
        }
    }
}

/// Position, size and rotation of a component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// X position of the top-left corner.
    pub x: f64,
    /// Y position of the top-left corner.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Rotation in degrees (any real value).
    #[serde(default)]
    pub rotation: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            x: 100.0,
            y: 100.0,
            width: 200.0,
            height: 100.0,
            rotation: 0.0,
        }
    }
}

impl Geometry {
    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Rotation wrapped into `[0, 360)`.
    #[must_use]
    pub fn normalized_rotation(&self) -> f64 {
        let wrapped = self.rotation.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negatives
        if wrapped >= 360.0 {
            0.0
        } else {
            wrapped
        }
    }

    /// Check if a point is within the unrotated box.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// A positioned, typed visual element of a poster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Unique identifier.
    pub id: ComponentId,
    /// Position and size (container-relative for composite children).
    pub geometry: Geometry,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
    /// Paint order key; higher paints later.
    pub z_index: u32,
    /// Locked components cannot be moved or resized by the user.
    #[serde(default)]
    pub locked: bool,
    /// Type-specific payload.
    pub payload: ComponentData,
}

impl Component {
    /// Create a component with a fresh id and default geometry.
    #[must_use]
    pub fn new(payload: ComponentData) -> Self {
        Self {
            id: ComponentId::new(),
            geometry: Geometry::default(),
            opacity: 1.0,
            z_index: 0,
            locked: false,
            payload,
        }
    }

    /// Create a fully-populated component for a type tag, as the toolbox does.
    #[must_use]
    pub fn template(component_type: ComponentType) -> Self {
        let (width, height) = default_size(component_type);
        Self::new(ComponentData::default_for(component_type)).with_size(width, height)
    }

    /// Replace the id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the geometry.
    #[must_use]
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the top-left position.
    #[must_use]
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.geometry.x = x;
        self.geometry.y = y;
        self
    }

    /// Set the size.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.geometry.width = width;
        self.geometry.height = height;
        self
    }

    /// Set the paint order key.
    #[must_use]
    pub fn with_z_index(mut self, z_index: u32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Set the lock flag.
    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// The component's type tag.
    #[must_use]
    pub const fn component_type(&self) -> ComponentType {
        self.payload.component_type()
    }

    /// Whether the component is a composite.
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        self.payload.container().is_some()
    }

    /// Child ids if this is a composite, otherwise empty.
    #[must_use]
    pub fn child_ids(&self) -> &[ComponentId] {
        self.payload
            .container()
            .map_or(&[], |c| c.child_ids.as_slice())
    }
}

fn default_size(component_type: ComponentType) -> (f64, f64) {
    match component_type {
        ComponentType::Text => (300.0, 60.0),
        ComponentType::Circle | ComponentType::Star | ComponentType::Icon => (120.0, 120.0),
        ComponentType::Triangle => (140.0, 120.0),
        ComponentType::Arrow => (200.0, 40.0),
        ComponentType::Line | ComponentType::Divider => (300.0, 4.0),
        ComponentType::Tag => (100.0, 36.0),
        ComponentType::Qrcode => (160.0, 160.0),
        ComponentType::Barcode => (240.0, 100.0),
        ComponentType::Table | ComponentType::InfoGrid => (360.0, 180.0),
        ComponentType::Chart => (360.0, 240.0),
        ComponentType::Watermark | ComponentType::Background | ComponentType::Border => {
            (800.0, 1200.0)
        }
        ComponentType::ProgressBar => (300.0, 24.0),
        ComponentType::Rating => (160.0, 32.0),
        ComponentType::DotMarker => (24.0, 24.0),
        ComponentType::Countdown => (320.0, 100.0),
        _ => (320.0, 200.0),
    }
}

/// A partial update: every `Some` field replaces the component's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentPatch {
    /// New x.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New y.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// New height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// New rotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// New opacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// New z-index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<u32>,
    /// New lock flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    /// Replacement payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<ComponentData>,
}

impl ComponentPatch {
    /// Patch that moves to an absolute position.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch that replaces the payload.
    #[must_use]
    pub fn payload(payload: ComponentData) -> Self {
        Self {
            payload: Some(payload),
            ..Self::default()
        }
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow-merge this patch into a component.
    ///
    /// The payload is taken verbatim; no check is made that it keeps the
    /// component's previous type tag.
    pub fn apply_to(&self, component: &mut Component) {
        let g = &mut component.geometry;
        if let Some(x) = self.x {
            g.x = x;
        }
        if let Some(y) = self.y {
            g.y = y;
        }
        if let Some(width) = self.width {
            g.width = width;
        }
        if let Some(height) = self.height {
            g.height = height;
        }
        if let Some(rotation) = self.rotation {
            g.rotation = rotation;
        }
        if let Some(opacity) = self.opacity {
            component.opacity = opacity;
        }
        if let Some(z_index) = self.z_index {
            component.z_index = z_index;
        }
        if let Some(locked) = self.locked {
            component.locked = locked;
        }
        if let Some(payload) = &self.payload {
            component.payload = payload.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tags_roundtrip_through_strings() {
        for t in ComponentType::ALL {
            assert_eq!(t.as_str().parse::<ComponentType>(), Ok(t));
            let json = serde_json::to_string(&t).expect("serialize");
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
        assert!("hexagon".parse::<ComponentType>().is_err());
    }

    #[test]
    fn default_payload_matches_its_tag() {
        for t in ComponentType::ALL {
            let data = ComponentData::default_for(t);
            assert_eq!(data.component_type(), t);
            assert_eq!(data.container().is_some(), t.is_composite(), "{t}");
        }
    }

    #[test]
    fn payload_serializes_with_type_and_data() {
        let data = ComponentData::ProgressBar(ProgressData::default());
        let json = serde_json::to_value(&data).expect("serialize");
        assert_eq!(json["type"], "progress-bar");
        assert_eq!(json["data"]["max"], 100.0);
    }

    #[test]
    fn templates_get_fresh_ids() {
        let a = Component::template(ComponentType::Text);
        let b = Component::template(ComponentType::Text);
        assert_ne!(a.id, b.id);
        assert!((a.geometry.width - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn normalized_rotation_wraps() {
        let mut g = Geometry::default();
        g.rotation = -90.0;
        assert!((g.normalized_rotation() - 270.0).abs() < f64::EPSILON);
        g.rotation = 720.0 + 45.0;
        assert!((g.normalized_rotation() - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut c = Component::template(ComponentType::Rectangle).with_position(10.0, 20.0);
        let patch = ComponentPatch {
            y: Some(99.0),
            opacity: Some(0.5),
            ..ComponentPatch::default()
        };
        patch.apply_to(&mut c);
        assert!((c.geometry.x - 10.0).abs() < f64::EPSILON);
        assert!((c.geometry.y - 99.0).abs() < f64::EPSILON);
        assert!((c.opacity - 0.5).abs() < f64::EPSILON);
        assert_eq!(c.component_type(), ComponentType::Rectangle);
    }

    #[test]
    fn progress_fraction_is_clamped() {
        let mut p = ProgressData::default();
        p.value = 150.0;
        assert!((p.fraction() - 1.0).abs() < f64::EPSILON);
        p.max = 0.0;
        assert!(p.fraction().abs() < f64::EPSILON);
    }
}

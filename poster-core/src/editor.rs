//! Property editors: the non-visual half of the component registry.
//!
//! A property panel asks the editor registered for a component's tag which
//! fields to show ([`PropertyEditor::fields`]) and turns a user edit into a
//! [`ComponentPatch`] ([`PropertyEditor::apply`]) that it then hands to
//! `DocumentStore::update_component`. Editors never touch the document.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::component::{Component, ComponentData, ComponentId, ComponentPatch, ComponentType};
use crate::config::EditorConfig;
use crate::error::{PosterError, PosterResult};
use crate::registry::Registry;
use crate::store::DocumentStore;

/// Kind of input a property needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "options", rename_all = "lowercase")]
pub enum FieldKind {
    /// Floating point number.
    Number,
    /// Non-negative integer.
    Integer,
    /// Free text.
    Text,
    /// Hex color (`#rgb`, `#rrggbb`, `#rrggbbaa`); `null` clears optional colors.
    Color,
    /// Checkbox.
    Boolean,
    /// One of a fixed set of strings.
    Choice(&'static [&'static str]),
    /// Structured list edited as JSON.
    List,
}

/// Static description of one editable payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Dotted path inside the payload (`style.background`).
    pub name: &'static str,
    /// Input kind.
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

/// One field as shown in a property panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyField {
    /// Property name.
    pub name: String,
    /// Input kind.
    pub kind: FieldKind,
    /// Current value.
    pub value: Value,
}

/// Presents and edits one component type's properties.
pub trait PropertyEditor: Send + Sync {
    /// Panel title.
    fn label(&self) -> &'static str;

    /// Editable payload fields for this type.
    fn payload_fields(&self) -> &'static [FieldSpec];

    /// All fields with their current values, geometry first.
    fn fields(&self, component: &Component) -> Vec<PropertyField> {
        let g = &component.geometry;
        let mut fields = vec![
            geometry_field("x", FieldKind::Number, g.x.into()),
            geometry_field("y", FieldKind::Number, g.y.into()),
            geometry_field("width", FieldKind::Number, g.width.into()),
            geometry_field("height", FieldKind::Number, g.height.into()),
            geometry_field("rotation", FieldKind::Number, g.rotation.into()),
            geometry_field("opacity", FieldKind::Number, component.opacity.into()),
            geometry_field("z_index", FieldKind::Integer, component.z_index.into()),
            geometry_field("locked", FieldKind::Boolean, component.locked.into()),
        ];
        let data = payload_value(&component.payload);
        fields.extend(self.payload_fields().iter().map(|spec| PropertyField {
            name: spec.name.to_string(),
            kind: spec.kind,
            value: lookup_path(&data, spec.name).cloned().unwrap_or(Value::Null),
        }));
        fields
    }

    /// Turn an edit of `name` to `value` into a patch.
    ///
    /// Geometry values are clamped the way the editing UI clamps them:
    /// z-index to `>= 0`, size to the configured limits, opacity to `0..=1`.
    ///
    /// # Errors
    ///
    /// Returns [`PosterError::UnknownProperty`] for names this editor does not
    /// expose, [`PosterError::InvalidValue`] for values of the wrong shape, and
    /// [`PosterError::Locked`] for geometry edits on locked components.
    fn apply(
        &self,
        component: &Component,
        name: &str,
        value: &Value,
        config: &EditorConfig,
    ) -> PosterResult<ComponentPatch> {
        if let Some(patch) = geometry_patch(component, name, value, config)? {
            return Ok(patch);
        }

        let spec = self
            .payload_fields()
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| PosterError::UnknownProperty {
                component_type: component.component_type().to_string(),
                property: name.to_string(),
            })?;
        validate(spec, value)?;

        let mut data = payload_value(&component.payload);
        let slot = lookup_path_mut(&mut data, name).ok_or_else(|| invalid(name, "missing slot"))?;
        *slot = value.clone();

        let payload: ComponentData = serde_json::from_value(serde_json::json!({
            "type": component.component_type().as_str(),
            "data": data,
        }))
        .map_err(|e| invalid(name, &e.to_string()))?;
        Ok(ComponentPatch::payload(payload))
    }
}

/// Table-driven editor used for every built-in type.
#[derive(Debug, Clone, Copy)]
pub struct PayloadEditor {
    label: &'static str,
    fields: &'static [FieldSpec],
}

impl PropertyEditor for PayloadEditor {
    fn label(&self) -> &'static str {
        self.label
    }

    fn payload_fields(&self) -> &'static [FieldSpec] {
        self.fields
    }
}

const ALIGN_CHOICES: &[&str] = &["left", "center", "right"];
const FIT_CHOICES: &[&str] = &["cover", "contain", "fill"];
const CHART_CHOICES: &[&str] = &["bar", "line", "pie"];
const BORDER_CHOICES: &[&str] = &["solid", "dashed", "dotted"];
const LAYOUT_CHOICES: &[&str] = &["vertical", "horizontal", "grid"];

const TEXT_FIELDS: &[FieldSpec] = &[
    field("content", FieldKind::Text),
    field("font_size", FieldKind::Number),
    field("font_family", FieldKind::Text),
    field("bold", FieldKind::Boolean),
    field("italic", FieldKind::Boolean),
    field("color", FieldKind::Color),
    field("align", FieldKind::Choice(ALIGN_CHOICES)),
];
const SHAPE_FIELDS: &[FieldSpec] = &[
    field("fill", FieldKind::Color),
    field("stroke", FieldKind::Color),
    field("stroke_width", FieldKind::Number),
    field("corner_radius", FieldKind::Number),
];
const TAG_FIELDS: &[FieldSpec] = &[
    field("label", FieldKind::Text),
    field("fill", FieldKind::Color),
    field("text_color", FieldKind::Color),
];
const IMAGE_FIELDS: &[FieldSpec] = &[
    field("src", FieldKind::Text),
    field("fit", FieldKind::Choice(FIT_CHOICES)),
];
const ICON_FIELDS: &[FieldSpec] = &[
    field("name", FieldKind::Text),
    field("color", FieldKind::Color),
];
const CODE_FIELDS: &[FieldSpec] = &[
    field("value", FieldKind::Text),
    field("foreground", FieldKind::Color),
    field("background", FieldKind::Color),
];
const TABLE_FIELDS: &[FieldSpec] = &[
    field("rows", FieldKind::List),
    field("header", FieldKind::Boolean),
    field("border_color", FieldKind::Color),
];
const CHART_FIELDS: &[FieldSpec] = &[
    field("kind", FieldKind::Choice(CHART_CHOICES)),
    field("points", FieldKind::List),
    field("color", FieldKind::Color),
];
const WATERMARK_FIELDS: &[FieldSpec] = &[
    field("text", FieldKind::Text),
    field("color", FieldKind::Color),
    field("font_size", FieldKind::Number),
    field("gap", FieldKind::Number),
];
const COUNTDOWN_FIELDS: &[FieldSpec] = &[
    field("target", FieldKind::Text),
    field("label", FieldKind::Text),
    field("color", FieldKind::Color),
];
const PROGRESS_FIELDS: &[FieldSpec] = &[
    field("value", FieldKind::Number),
    field("max", FieldKind::Number),
    field("fill", FieldKind::Color),
    field("track", FieldKind::Color),
];
const RATING_FIELDS: &[FieldSpec] = &[
    field("value", FieldKind::Number),
    field("max", FieldKind::Integer),
    field("color", FieldKind::Color),
];
const BACKGROUND_FIELDS: &[FieldSpec] = &[
    field("color", FieldKind::Color),
    field("image", FieldKind::Text),
];
const BORDER_FIELDS: &[FieldSpec] = &[
    field("color", FieldKind::Color),
    field("width", FieldKind::Number),
    field("style", FieldKind::Choice(BORDER_CHOICES)),
    field("corner_radius", FieldKind::Number),
];
const DOT_FIELDS: &[FieldSpec] = &[
    field("color", FieldKind::Color),
    field("label", FieldKind::Text),
];
const CONTAINER_FIELDS: &[FieldSpec] = &[
    field("layout", FieldKind::Choice(LAYOUT_CHOICES)),
    field("spacing", FieldKind::Number),
    field("style.background", FieldKind::Color),
    field("style.border_color", FieldKind::Color),
    field("style.border_width", FieldKind::Number),
    field("style.corner_radius", FieldKind::Number),
];

/// The editor for a tag. Exhaustive, so a new tag cannot ship without one.
#[must_use]
pub fn editor_for(tag: ComponentType) -> PayloadEditor {
    let (label, fields) = match tag {
        ComponentType::Text => ("Text", TEXT_FIELDS),
        ComponentType::Rectangle => ("Rectangle", SHAPE_FIELDS),
        ComponentType::Circle => ("Circle", SHAPE_FIELDS),
        ComponentType::Triangle => ("Triangle", SHAPE_FIELDS),
        ComponentType::Star => ("Star", SHAPE_FIELDS),
        ComponentType::Arrow => ("Arrow", SHAPE_FIELDS),
        ComponentType::Line => ("Line", SHAPE_FIELDS),
        ComponentType::Tag => ("Tag", TAG_FIELDS),
        ComponentType::Image => ("Image", IMAGE_FIELDS),
        ComponentType::Icon => ("Icon", ICON_FIELDS),
        ComponentType::Barcode => ("Barcode", CODE_FIELDS),
        ComponentType::Qrcode => ("QR code", CODE_FIELDS),
        ComponentType::Table => ("Table", TABLE_FIELDS),
        ComponentType::Chart => ("Chart", CHART_FIELDS),
        ComponentType::Watermark => ("Watermark", WATERMARK_FIELDS),
        ComponentType::Countdown => ("Countdown", COUNTDOWN_FIELDS),
        ComponentType::ProgressBar => ("Progress bar", PROGRESS_FIELDS),
        ComponentType::Rating => ("Rating", RATING_FIELDS),
        ComponentType::Background => ("Background", BACKGROUND_FIELDS),
        ComponentType::Border => ("Border", BORDER_FIELDS),
        ComponentType::DotMarker => ("Dot marker", DOT_FIELDS),
        ComponentType::HeaderGroup => ("Header group", CONTAINER_FIELDS),
        ComponentType::ContentCard => ("Content card", CONTAINER_FIELDS),
        ComponentType::InfoGrid => ("Info grid", CONTAINER_FIELDS),
        ComponentType::CalloutBox => ("Callout box", CONTAINER_FIELDS),
        ComponentType::Divider => ("Divider", CONTAINER_FIELDS),
        ComponentType::TimelineBlock => ("Timeline block", CONTAINER_FIELDS),
        ComponentType::StatsCard => ("Stats card", CONTAINER_FIELDS),
        ComponentType::NewTitleBlock => ("Title block", CONTAINER_FIELDS),
        ComponentType::NewFeatureCard => ("Feature card", CONTAINER_FIELDS),
        ComponentType::NewStatPanel => ("Stat panel", CONTAINER_FIELDS),
        ComponentType::NewTimeline => ("Timeline", CONTAINER_FIELDS),
        ComponentType::NewQuoteCard => ("Quote card", CONTAINER_FIELDS),
    };
    PayloadEditor { label, fields }
}

/// Build the property-editor registry covering every tag.
#[must_use]
pub fn editor_registry() -> Registry<dyn PropertyEditor> {
    ComponentType::ALL
        .into_iter()
        .fold(Registry::builder(), |builder, tag| {
            let editor: Arc<dyn PropertyEditor> = Arc::new(editor_for(tag));
            builder.register(tag, editor)
        })
        .build()
}

impl DocumentStore {
    /// Apply a property-panel edit to one component.
    ///
    /// Returns `Ok(true)` if the document changed.
    ///
    /// # Errors
    ///
    /// Returns [`PosterError::ComponentNotFound`] if `id` does not resolve,
    /// [`PosterError::UnknownProperty`] if no editor is registered for the
    /// component's tag, and any error from [`PropertyEditor::apply`].
    pub fn edit_property(
        &mut self,
        editors: &Registry<dyn PropertyEditor>,
        id: &ComponentId,
        name: &str,
        value: &Value,
    ) -> PosterResult<bool> {
        let component = self
            .document()
            .get(id)
            .ok_or_else(|| PosterError::ComponentNotFound(id.to_string()))?;
        let editor = editors.lookup(component.component_type()).ok_or_else(|| {
            PosterError::UnknownProperty {
                component_type: component.component_type().to_string(),
                property: name.to_string(),
            }
        })?;
        let patch = editor.apply(component, name, value, self.config())?;
        tracing::debug!("Editing {name} on {id}");
        Ok(self.update_component(id, patch))
    }
}

fn geometry_field(name: &str, kind: FieldKind, value: Value) -> PropertyField {
    PropertyField {
        name: name.to_string(),
        kind,
        value,
    }
}

fn geometry_patch(
    component: &Component,
    name: &str,
    value: &Value,
    config: &EditorConfig,
) -> PosterResult<Option<ComponentPatch>> {
    let mut patch = ComponentPatch::default();
    match name {
        "x" | "y" | "width" | "height" | "rotation" if component.locked => {
            return Err(PosterError::Locked(component.id.to_string()));
        }
        "x" => patch.x = Some(number(name, value)?),
        "y" => patch.y = Some(number(name, value)?),
        "width" => {
            let (width, _) = config.clamp_size(number(name, value)?, component.geometry.height);
            patch.width = Some(width);
        }
        "height" => {
            let (_, height) = config.clamp_size(component.geometry.width, number(name, value)?);
            patch.height = Some(height);
        }
        "rotation" => patch.rotation = Some(number(name, value)?),
        "opacity" => patch.opacity = Some(number(name, value)?.clamp(0.0, 1.0)),
        "z_index" => {
            let raw = value
                .as_i64()
                .ok_or_else(|| invalid(name, "expected an integer"))?;
            let clamped = u32::try_from(raw.max(0)).unwrap_or(u32::MAX);
            patch.z_index = Some(clamped);
        }
        "locked" => {
            patch.locked = Some(
                value
                    .as_bool()
                    .ok_or_else(|| invalid(name, "expected a boolean"))?,
            );
        }
        _ => return Ok(None),
    }
    Ok(Some(patch))
}

fn number(name: &str, value: &Value) -> PosterResult<f64> {
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(name, "expected a finite number"))
}

fn validate(spec: &FieldSpec, value: &Value) -> PosterResult<()> {
    match spec.kind {
        FieldKind::Color => match value {
            Value::Null => Ok(()),
            Value::String(s) if is_hex_color(s) => Ok(()),
            _ => Err(invalid(spec.name, "expected a hex color")),
        },
        FieldKind::Choice(options) => match value.as_str() {
            Some(s) if options.contains(&s) => Ok(()),
            _ => Err(invalid(
                spec.name,
                &format!("expected one of {}", options.join(", ")),
            )),
        },
        // Shape is checked when the payload is rebuilt.
        _ => Ok(()),
    }
}

/// Whether `s` is `#rgb`, `#rrggbb` or `#rrggbbaa`.
#[must_use]
pub fn is_hex_color(s: &str) -> bool {
    s.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}

fn invalid(property: &str, reason: &str) -> PosterError {
    PosterError::InvalidValue {
        property: property.to_string(),
        reason: reason.to_string(),
    }
}

fn payload_value(payload: &ComponentData) -> Value {
    serde_json::to_value(payload)
        .ok()
        .and_then(|mut v| v.get_mut("data").map(Value::take))
        .unwrap_or(Value::Null)
}

fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |v, key| v.get(key))
}

fn lookup_path_mut<'a>(value: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    path.split('.').try_fold(value, |v, key| v.get_mut(key))
}

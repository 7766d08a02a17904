//! Geometric shapes and tags.

use poster_core::ComponentData;

use super::{unexpected_payload, ComponentRenderer, RenderProps};
use crate::paint::{PaintList, Primitive, ShapeKind};

/// Shared renderer for every outline tag.
///
/// One instance serves `rectangle`, `circle`, `triangle`, `star`, `arrow` and
/// `line`; the [`ShapeKind`] is picked from the payload variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeRenderer {
    star_points: u8,
}

impl ShapeRenderer {
    /// Renderer drawing stars with `star_points` outer points.
    #[must_use]
    pub const fn new(star_points: u8) -> Self {
        Self { star_points }
    }

    /// The outline drawn for a payload, or `None` for non-shape payloads.
    #[must_use]
    pub const fn kind_for(&self, payload: &ComponentData) -> Option<ShapeKind> {
        Some(match payload {
            ComponentData::Rectangle(_) => ShapeKind::Rectangle,
            ComponentData::Circle(_) => ShapeKind::Ellipse,
            ComponentData::Triangle(_) => ShapeKind::Triangle,
            ComponentData::Star(_) => ShapeKind::Star {
                points: self.star_points,
            },
            ComponentData::Arrow(_) => ShapeKind::Arrow,
            ComponentData::Line(_) => ShapeKind::Line,
            _ => return None,
        })
    }
}

impl ComponentRenderer for ShapeRenderer {
    fn name(&self) -> &'static str {
        "shape"
    }

    fn render(&self, props: &RenderProps<'_>, out: &mut PaintList) {
        let (kind, shape) = match (self.kind_for(props.payload), props.payload) {
            (
                Some(kind),
                ComponentData::Rectangle(s)
                | ComponentData::Circle(s)
                | ComponentData::Triangle(s)
                | ComponentData::Star(s)
                | ComponentData::Arrow(s)
                | ComponentData::Line(s),
            ) => (kind, s),
            _ => return unexpected_payload(self.name(), props),
        };

        // Only rectangles round their corners.
        let corner_radius = if kind == ShapeKind::Rectangle {
            shape.corner_radius.min(props.geometry.width.min(props.geometry.height) / 2.0)
        } else {
            0.0
        };
        out.push(props.op(Primitive::Shape {
            kind,
            fill: shape.fill.clone(),
            stroke: shape.stroke.clone(),
            stroke_width: shape.stroke_width.max(0.0),
            corner_radius: corner_radius.max(0.0),
        }));
    }
}

/// Pill label.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagRenderer;

impl ComponentRenderer for TagRenderer {
    fn name(&self) -> &'static str {
        "tag"
    }

    fn render(&self, props: &RenderProps<'_>, out: &mut PaintList) {
        let ComponentData::Tag(tag) = props.payload else {
            return unexpected_payload(self.name(), props);
        };
        out.push(props.op(Primitive::Tag {
            label: tag.label.clone(),
            fill: tag.fill.clone(),
            text_color: tag.text_color.clone(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poster_core::component::ShapeData;
    use poster_core::{ComponentId, Geometry, Handlers};

    fn props<'a>(id: &'a ComponentId, payload: &'a ComponentData) -> RenderProps<'a> {
        RenderProps {
            id,
            geometry: Geometry {
                x: 0.0,
                y: 0.0,
                width: 40.0,
                height: 20.0,
                rotation: 0.0,
            },
            opacity: 1.0,
            z_index: 0,
            is_selected: false,
            locked: false,
            payload,
            handlers: Handlers::top_level(id.clone()),
            child_count: 0,
        }
    }

    #[test]
    fn corner_radius_is_limited_to_half_the_short_side() {
        let id = ComponentId::from("r");
        let payload = ComponentData::Rectangle(ShapeData {
            corner_radius: 50.0,
            ..ShapeData::default()
        });
        let mut out = PaintList::new();
        ShapeRenderer::new(5).render(&props(&id, &payload), &mut out);
        let Primitive::Shape { corner_radius, .. } = &out.ops()[0].primitive else {
            panic!("expected shape");
        };
        assert!((corner_radius - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn circle_ignores_corner_radius() {
        let id = ComponentId::from("c");
        let payload = ComponentData::Circle(ShapeData {
            corner_radius: 8.0,
            ..ShapeData::default()
        });
        let mut out = PaintList::new();
        ShapeRenderer::new(5).render(&props(&id, &payload), &mut out);
        assert!(matches!(
            out.ops()[0].primitive,
            Primitive::Shape {
                kind: ShapeKind::Ellipse,
                corner_radius,
                ..
            } if corner_radius == 0.0
        ));
    }

    #[test]
    fn star_uses_configured_point_count() {
        let id = ComponentId::from("s");
        let payload = ComponentData::Star(ShapeData::default());
        let mut out = PaintList::new();
        ShapeRenderer::new(7).render(&props(&id, &payload), &mut out);
        assert!(matches!(
            out.ops()[0].primitive,
            Primitive::Shape {
                kind: ShapeKind::Star { points: 7 },
                ..
            }
        ));
    }

    #[test]
    fn foreign_payload_draws_nothing() {
        let id = ComponentId::from("t");
        let payload = ComponentData::default_for(poster_core::ComponentType::Text);
        let mut out = PaintList::new();
        ShapeRenderer::new(5).render(&props(&id, &payload), &mut out);
        TagRenderer.render(&props(&id, &payload), &mut out);
        assert!(out.is_empty());
    }
}

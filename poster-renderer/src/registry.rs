//! The render registry: type tag → renderer.

use std::sync::Arc;

use poster_core::{ComponentType, Registry};

use crate::renderers::{
    BackgroundRenderer, BorderRenderer, ChartRenderer, CodeRenderer, ComponentRenderer,
    ContainerRenderer, CountdownRenderer, DotMarkerRenderer, IconRenderer, ImageRenderer,
    ProgressRenderer, RatingRenderer, ShapeRenderer, TableRenderer, TagRenderer, TextRenderer,
    WatermarkRenderer,
};

/// Points on the star outline.
const STAR_POINTS: u8 = 5;

fn shared<R: ComponentRenderer + 'static>(renderer: R) -> Arc<dyn ComponentRenderer> {
    Arc::new(renderer)
}

/// Build the render registry covering every tag.
///
/// The `match` is exhaustive, so adding a tag without a renderer fails to
/// compile. Outline tags share a single [`ShapeRenderer`] and composite tags
/// a single [`ContainerRenderer`].
#[must_use]
pub fn render_registry() -> Registry<dyn ComponentRenderer> {
    let shapes = shared(ShapeRenderer::new(STAR_POINTS));
    let container = shared(ContainerRenderer);
    let codes = shared(CodeRenderer);

    ComponentType::ALL
        .into_iter()
        .fold(Registry::builder(), |builder, tag| {
            let renderer = match tag {
                ComponentType::Text => shared(TextRenderer),
                ComponentType::Rectangle
                | ComponentType::Circle
                | ComponentType::Triangle
                | ComponentType::Star
                | ComponentType::Arrow
                | ComponentType::Line => Arc::clone(&shapes),
                ComponentType::Tag => shared(TagRenderer),
                ComponentType::Image => shared(ImageRenderer),
                ComponentType::Icon => shared(IconRenderer),
                ComponentType::Barcode | ComponentType::Qrcode => Arc::clone(&codes),
                ComponentType::Table => shared(TableRenderer),
                ComponentType::Chart => shared(ChartRenderer),
                ComponentType::Watermark => shared(WatermarkRenderer),
                ComponentType::Countdown => shared(CountdownRenderer),
                ComponentType::ProgressBar => shared(ProgressRenderer),
                ComponentType::Rating => shared(RatingRenderer),
                ComponentType::Background => shared(BackgroundRenderer),
                ComponentType::Border => shared(BorderRenderer),
                ComponentType::DotMarker => shared(DotMarkerRenderer),
                ComponentType::HeaderGroup
                | ComponentType::ContentCard
                | ComponentType::InfoGrid
                | ComponentType::CalloutBox
                | ComponentType::Divider
                | ComponentType::TimelineBlock
                | ComponentType::StatsCard
                | ComponentType::NewTitleBlock
                | ComponentType::NewFeatureCard
                | ComponentType::NewStatPanel
                | ComponentType::NewTimeline
                | ComponentType::NewQuoteCard => Arc::clone(&container),
            };
            builder.register(tag, renderer)
        })
        .build()
}

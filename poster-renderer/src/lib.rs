//! # Poster Renderer
//!
//! Maps each component to a renderer by its type tag and emits a z-ordered
//! paint list for whatever surface draws the poster.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        Document snapshot (poster-core)      │
//! ├─────────────────────────────────────────────┤
//! │  Dispatch: stable z-order, children follow  │
//! │  their container, unknown tags skipped      │
//! ├─────────────┬─────────────┬─────────────────┤
//! │ Shape       │ Text / Data │ Container       │
//! │ renderers   │ renderers   │ renderer        │
//! ├─────────────┴─────────────┴─────────────────┤
//! │         PaintList → RenderBackend           │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod dispatch;
pub mod error;
pub mod paint;
pub mod registry;
pub mod renderers;

pub use backend::RenderBackend;
pub use dispatch::paint_document;
pub use error::{RenderError, RenderResult};
pub use paint::{PaintList, PaintOp, Primitive, ShapeKind};
pub use registry::render_registry;
pub use renderers::{ComponentRenderer, RenderProps};

use poster_core::{Document, Registry};
use serde::{Deserialize, Serialize};

/// Configuration for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Emit a selection outline after each selected component.
    pub show_selection: bool,
    /// Selection outline color.
    pub selection_color: String,
    /// Selection outline width.
    pub selection_width: f64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            show_selection: true,
            selection_color: "#2563eb".to_string(),
            selection_width: 2.0,
        }
    }
}

/// The main renderer interface.
pub struct Renderer {
    config: RendererConfig,
    registry: Registry<dyn ComponentRenderer>,
    backend: Box<dyn RenderBackend>,
    frame_count: u64,
}

impl Renderer {
    /// Create a renderer with the full registry and a 2D canvas backend.
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        Self::with_backend(config, Box::new(backend::canvas2d::Canvas2DBackend::default()))
    }

    /// Create a renderer drawing to `backend`.
    #[must_use]
    pub fn with_backend(config: RendererConfig, backend: Box<dyn RenderBackend>) -> Self {
        Self {
            config,
            registry: render_registry(),
            backend,
            frame_count: 0,
        }
    }

    /// Replace the render registry.
    #[must_use]
    pub fn with_registry(mut self, registry: Registry<dyn ComponentRenderer>) -> Self {
        if !registry.is_complete() {
            tracing::warn!("Render registry lacks {:?}", registry.missing());
        }
        self.registry = registry;
        self
    }

    /// Build the paint list for a document without drawing it.
    #[must_use]
    pub fn plan(&self, document: &Document) -> PaintList {
        paint_document(document, &self.registry, &self.config)
    }

    /// Render a frame and return what was drawn.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the frame.
    pub fn render(&mut self, document: &Document) -> RenderResult<PaintList> {
        let frame = self.plan(document);
        self.backend.render(&frame)?;
        self.frame_count += 1;
        Ok(frame)
    }

    /// Get the current frame count.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Name of the active backend.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Get the renderer configuration.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// The render registry in use.
    #[must_use]
    pub fn registry(&self) -> &Registry<dyn ComponentRenderer> {
        &self.registry
    }

    /// Resize the rendering surface.
    ///
    /// # Errors
    ///
    /// Returns an error if resize fails.
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.backend.resize(width, height)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("backend", &self.backend.name())
            .field("frame_count", &self.frame_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_counts_frames() {
        let mut renderer = Renderer::default();
        assert_eq!(renderer.backend_name(), "canvas2d");
        let document = Document::default();
        let frame = renderer.render(&document).expect("render");
        assert!(frame.is_empty());
        assert_eq!(renderer.frame_count(), 1);
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: RendererConfig =
            serde_json::from_str(r#"{"show_selection": false}"#).expect("parse");
        assert!(!config.show_selection);
        assert_eq!(config.selection_color, "#2563eb");
    }

    #[test]
    fn resize_propagates_backend_errors() {
        let mut renderer = Renderer::default();
        assert!(renderer.resize(0, 0).is_err());
        assert!(renderer.resize(1024, 768).is_ok());
    }
}

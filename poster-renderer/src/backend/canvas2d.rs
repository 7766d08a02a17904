//! 2D canvas backend.
//!
//! Walks the paint list the way a browser `CanvasRenderingContext2D` host
//! would, logging each op. The host page does the actual pixel work.

use crate::paint::{PaintList, PaintOp};
use crate::{RenderError, RenderResult};

use super::RenderBackend;

/// 2D canvas surface.
#[derive(Debug, Clone)]
pub struct Canvas2DBackend {
    width: u32,
    height: u32,
    ops_drawn: u64,
}

impl Canvas2DBackend {
    /// Create a backend for a surface of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops_drawn: 0,
        }
    }

    /// Surface size.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total ops replayed so far.
    #[must_use]
    pub fn ops_drawn(&self) -> u64 {
        self.ops_drawn
    }

    fn draw_op(op: &PaintOp) {
        let g = &op.geometry;
        tracing::trace!(
            "Draw {} for {} at ({}, {}) size {}x{} rot {} alpha {}",
            op.primitive.name(),
            op.component_id,
            g.x,
            g.y,
            g.width,
            g.height,
            op.rotation,
            op.opacity
        );
    }
}

impl Default for Canvas2DBackend {
    fn default() -> Self {
        Self::new(800, 1200)
    }
}

impl RenderBackend for Canvas2DBackend {
    fn name(&self) -> &'static str {
        "canvas2d"
    }

    fn render(&mut self, frame: &PaintList) -> RenderResult<()> {
        tracing::trace!(
            "Canvas2D render: {} ops, surface {}x{}",
            frame.len(),
            self.width,
            self.height
        );
        for op in frame {
            let g = &op.geometry;
            if ![g.x, g.y, g.width, g.height].iter().all(|v| v.is_finite()) {
                return Err(RenderError::Frame(format!(
                    "non-finite geometry for {}",
                    op.component_id
                )));
            }
            Self::draw_op(op);
        }
        self.ops_drawn += u64::try_from(frame.len()).unwrap_or(u64::MAX);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize { width, height });
        }
        self.width = width;
        self.height = height;
        tracing::debug!("Canvas2D resized to {}x{}", width, height);
        Ok(())
    }
}

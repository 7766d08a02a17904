//! Drawing surfaces that consume paint lists.

pub mod canvas2d;

use crate::paint::PaintList;
use crate::RenderResult;

/// A surface that can replay a paint list.
pub trait RenderBackend {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Draw one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface rejects the frame.
    fn render(&mut self, frame: &PaintList) -> RenderResult<()>;

    /// Resize the drawing surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is unusable.
    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()>;
}

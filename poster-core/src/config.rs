//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::component::Layout;
use crate::error::{PosterError, PosterResult};

/// Tunables shared by the document store, the composition engine and the
/// property editors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Width of a new canvas.
    pub canvas_width: f64,
    /// Height of a new canvas.
    pub canvas_height: f64,
    /// Largest canvas width the editor accepts.
    pub max_canvas_width: f64,
    /// Largest canvas height the editor accepts.
    pub max_canvas_height: f64,
    /// Background color of a new canvas.
    pub background_color: String,
    /// Margin added on every side of a combined group's bounding box.
    pub group_margin: f64,
    /// Layout assigned to combined groups.
    pub group_layout: Layout,
    /// Spacing assigned to combined groups.
    pub group_spacing: f64,
    /// Smallest width/height a property edit may set.
    pub min_component_size: f64,
    /// Number of undo steps the store keeps.
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 1200.0,
            max_canvas_width: 1600.0,
            max_canvas_height: 2560.0,
            background_color: "#ffffff".to_string(),
            group_margin: 20.0,
            group_layout: Layout::Vertical,
            group_spacing: 10.0,
            min_component_size: 1.0,
            history_limit: 100,
        }
    }
}

impl EditorConfig {
    /// Check that every limit is usable.
    ///
    /// # Errors
    ///
    /// Returns [`PosterError::InvalidConfig`] naming the first bad setting.
    pub fn validate(&self) -> PosterResult<()> {
        let finite = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("group_margin", self.group_margin),
            ("group_spacing", self.group_spacing),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(invalid(field, format!("{value} is not a finite number")));
            }
        }

        for (field, value) in [
            ("max_canvas_width", self.max_canvas_width),
            ("max_canvas_height", self.max_canvas_height),
        ] {
            if !value.is_finite() || value < 1.0 {
                return Err(invalid(field, format!("{value} must be at least 1")));
            }
        }

        let min = self.min_component_size;
        if !min.is_finite() || min <= 0.0 {
            return Err(invalid("min_component_size", format!("{min} must be positive")));
        }
        let limit = self.max_canvas_width.min(self.max_canvas_height);
        if min > limit {
            return Err(invalid(
                "min_component_size",
                format!("{min} exceeds the canvas limit {limit}"),
            ));
        }
        Ok(())
    }

    /// Clamp a requested canvas size to the configured limits.
    #[must_use]
    pub fn clamp_canvas(&self, width: f64, height: f64) -> (f64, f64) {
        (
            bounded(width, 1.0, self.max_canvas_width),
            bounded(height, 1.0, self.max_canvas_height),
        )
    }

    /// Clamp a component size to what property edits allow.
    #[must_use]
    pub fn clamp_size(&self, width: f64, height: f64) -> (f64, f64) {
        (
            bounded(width, self.min_component_size, self.max_canvas_width),
            bounded(height, self.min_component_size, self.max_canvas_height),
        )
    }
}

/// Clamp without panicking on inverted or NaN bounds; the upper bound wins.
fn bounded(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

fn invalid(field: &'static str, reason: String) -> PosterError {
    PosterError::InvalidConfig { field, reason }
}

//! Data-driven components: tables, charts, countdowns, progress and ratings.

use poster_core::ComponentData;

use super::{unexpected_payload, ComponentRenderer, RenderProps};
use crate::paint::{PaintList, Primitive};

/// Table grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer;

impl ComponentRenderer for TableRenderer {
    fn name(&self) -> &'static str {
        "table"
    }

    fn render(&self, props: &RenderProps<'_>, out: &mut PaintList) {
        let ComponentData::Table(table) = props.payload else {
            return unexpected_payload(self.name(), props);
        };
        // Ragged rows are padded so the surface can lay out a rectangular grid.
        let columns = table.rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = table
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.resize(columns, String::new());
                row
            })
            .collect();
        out.push(props.op(Primitive::Table {
            rows,
            header: table.header,
            border_color: table.border_color.clone(),
        }));
    }
}

/// Chart series.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartRenderer;

impl ComponentRenderer for ChartRenderer {
    fn name(&self) -> &'static str {
        "chart"
    }

    fn render(&self, props: &RenderProps<'_>, out: &mut PaintList) {
        let ComponentData::Chart(chart) = props.payload else {
            return unexpected_payload(self.name(), props);
        };
        let points = chart
            .points
            .iter()
            .filter(|p| p.value.is_finite())
            .cloned()
            .collect();
        out.push(props.op(Primitive::Chart {
            kind: chart.kind,
            points,
            color: chart.color.clone(),
        }));
    }
}

/// Countdown display.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountdownRenderer;

impl ComponentRenderer for CountdownRenderer {
    fn name(&self) -> &'static str {
        "countdown"
    }

    fn render(&self, props: &RenderProps<'_>, out: &mut PaintList) {
        let ComponentData::Countdown(countdown) = props.payload else {
            return unexpected_payload(self.name(), props);
        };
        out.push(props.op(Primitive::Countdown {
            target: countdown.target.clone(),
            label: countdown.label.clone(),
            color: countdown.color.clone(),
        }));
    }
}

/// Progress bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressRenderer;

impl ComponentRenderer for ProgressRenderer {
    fn name(&self) -> &'static str {
        "progress"
    }

    fn render(&self, props: &RenderProps<'_>, out: &mut PaintList) {
        let ComponentData::ProgressBar(progress) = props.payload else {
            return unexpected_payload(self.name(), props);
        };
        out.push(props.op(Primitive::Progress {
            fraction: progress.fraction(),
            fill: progress.fill.clone(),
            track: progress.track.clone(),
        }));
    }
}

/// Star rating.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingRenderer;

impl ComponentRenderer for RatingRenderer {
    fn name(&self) -> &'static str {
        "rating"
    }

    fn render(&self, props: &RenderProps<'_>, out: &mut PaintList) {
        let ComponentData::Rating(rating) = props.payload else {
            return unexpected_payload(self.name(), props);
        };
        out.push(props.op(Primitive::Rating {
            value: rating.value.clamp(0.0, f64::from(rating.max)),
            max: rating.max,
            color: rating.color.clone(),
        }));
    }
}

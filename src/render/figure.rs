//! Plotly building blocks shared by the dashboard views.
//!
//! Figures are assembled with the `plotly` crate and handed to the API as
//! plain JSON (`{data, layout, config}`), which the page passes straight to
//! `Plotly.react`.

use plotly::color::Color;
use plotly::common::{DashType, Title};
use plotly::layout::themes::PLOTLY_DARK;
use plotly::layout::{Annotation, Axis, Layout, Shape, ShapeLine, ShapeType};
use plotly::Plot;
use serde::Serialize;

/// Figure JSON as served to the page.
pub type Figure = serde_json::Value;

/// One row of a numeric `surfacecolor` matrix.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ColorRow(pub Vec<f64>);

impl Color for ColorRow {}

/// Serialize a plot to the value served in snapshots. NaN cells become null.
pub fn to_figure(plot: &Plot) -> Figure {
    serde_json::from_str(&plot.to_json()).unwrap_or_default()
}

/// Empty layout on the `plotly_dark` template.
pub fn dark_layout() -> Layout {
    Layout::new().template(&*PLOTLY_DARK)
}

pub fn titled_axis(title: &str) -> Axis {
    Axis::new().title(Title::with_text(title))
}

/// Dashed vertical line across the full plot height at data coordinate `x`.
pub fn vline(x: f64, color: &'static str) -> Shape {
    Shape::new()
        .shape_type(ShapeType::Line)
        .x_ref("x")
        .y_ref("paper")
        .x0(x)
        .x1(x)
        .y0(0.0)
        .y1(1.0)
        .line(ShapeLine::new().color(color).dash(DashType::Dash))
}

/// Label pinned to the top of a vertical line at `x`.
pub fn vline_label(x: f64, text: &str) -> Annotation {
    Annotation::new()
        .text(text)
        .x(x)
        .y(1.0)
        .x_ref("x")
        .y_ref("paper")
        .show_arrow(false)
}

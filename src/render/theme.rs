//! Dashboard colours.
//!
//! Chart chrome comes from plotly's `plotly_dark` template; only the trace
//! colours and the diverging colorscale are set here.

use plotly::common::{ColorScale, ColorScaleElement};

/// 3D scene background, matches the page.
pub const SCENE_BACKGROUND: &str = "#0e1117";

/// Well-log trace.
pub const LOG_LINE_COLOR: &str = "#3b82f6";
pub const LOG_LINE_WIDTH: f64 = 2.0;

/// Decline-curve trace.
pub const FORECAST_LINE_COLOR: &str = "#f87171";
/// Forecast horizon marker.
pub const HORIZON_LINE_COLOR: &str = "yellow";

pub const SURFACE_HEIGHT_PX: usize = 650;
pub const COLORBAR_THICKNESS: usize = 20;

/// ColorBrewer RdYlBu, red (low) to blue (high). plotly.js has no named
/// palette for it.
pub const RD_YL_BU: [&str; 11] = [
    "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee090", "#ffffbf", "#e0f3f8", "#abd9e9",
    "#74add1", "#4575b4", "#313695",
];

/// Evenly spaced colorscale stops over `[0, 1]`.
pub fn colorscale(colors: &[&str]) -> ColorScale {
    let last = colors.len().saturating_sub(1).max(1) as f64;
    ColorScale::Vector(
        colors
            .iter()
            .enumerate()
            .map(|(i, c)| ColorScaleElement(i as f64 / last, (*c).to_string()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorscale_spans_unit_interval() {
        let json = serde_json::to_value(colorscale(&RD_YL_BU)).unwrap();
        let stops = json.as_array().unwrap();
        assert_eq!(stops.len(), 11);
        assert_eq!(stops[0], serde_json::json!([0.0, "#a50026"]));
        assert_eq!(stops[10], serde_json::json!([1.0, "#313695"]));
        assert!((stops[5][0].as_f64().unwrap() - 0.5).abs() < 1e-12);
    }
}

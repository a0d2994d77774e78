//! Dashboard renderer: forecast year + well data in, three views out.

use plotly::common::{ColorBar, Line, Mode, Title};
use plotly::layout::{AspectMode, AspectRatio, LayoutScene, Margin};
use plotly::{Plot, Scatter, Surface};
use serde::Serialize;

use super::figure::{self, ColorRow, Figure};
use super::theme;
use crate::config::DisplayConfig;
use crate::reservoir::{field_pressure_psi, pressure_drop_psi, DeclineModel, PressureGrid};
use crate::types::{DatasetSummary, FieldMetrics, ForecastYear, WellDataset};

pub const SURFACE_COLORBAR_TITLE: &str = "Pressure (psi)";
pub const LOG_FIGURE_TITLE: &str = "Lithology Depth Profile";
pub const DECLINE_FIGURE_TITLE: &str = "Long-term Estimated Ultimate Recovery (EUR)";
pub const DECLINE_TRACE_NAME: &str = "Oil Forecast";
pub const HORIZON_LABEL: &str = "Forecast Horizon";

/// Everything the page shows for one forecast year and dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub year: ForecastYear,
    pub metrics: FieldMetrics,
    pub surface: SurfaceView,
    pub well_log: WellLogView,
    pub decline: DeclineView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceView {
    pub figure: Figure,
    pub pressure_min: f64,
    pub pressure_max: f64,
}

/// First rows of the active table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    pub total_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellLogView {
    pub table: TablePreview,
    pub figure: Figure,
    pub summary: DatasetSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclineView {
    pub figure: Figure,
    /// Cumulative production over the forecast window (bbl/day·years).
    pub eur: f64,
    /// Rate at the selected horizon.
    pub horizon_rate: f64,
}

/// Stateless view builder. Same inputs always give the same snapshot.
#[derive(Debug, Clone)]
pub struct DashboardRenderer {
    display: DisplayConfig,
    decline: DeclineModel,
}

impl DashboardRenderer {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            display,
            decline: DeclineModel::default(),
        }
    }

    pub fn render(&self, year: ForecastYear, dataset: &WellDataset) -> DashboardSnapshot {
        DashboardSnapshot {
            year,
            metrics: self.metrics(year),
            surface: self.surface_view(year),
            well_log: self.well_log_view(dataset),
            decline: self.decline_view(year),
        }
    }

    pub fn metrics(&self, year: ForecastYear) -> FieldMetrics {
        let drop = pressure_drop_psi(year);
        let pressure = field_pressure_psi(year);
        FieldMetrics {
            target_year: year,
            field_pressure_psi: pressure,
            pressure_delta_psi: -drop,
            field_pressure_label: format!("{pressure} psi"),
            pressure_delta_label: format!("-{drop} psi"),
            recovery_factor: self.display.recovery_factor.clone(),
            recovery_factor_delta: self.display.recovery_factor_delta.clone(),
            algorithm: self.display.algorithm.clone(),
        }
    }

    pub fn surface_view(&self, year: ForecastYear) -> SurfaceView {
        let grid = PressureGrid::compute(year);
        let (pressure_min, pressure_max) = grid.pressure_range();

        let trace = Surface::new(grid.depth.clone())
            .x(grid.east_matrix())
            .y(grid.north_matrix())
            .surface_color(grid.pressure.iter().cloned().map(ColorRow).collect())
            .color_scale(theme::colorscale(&theme::RD_YL_BU))
            .color_bar(
                ColorBar::new()
                    .title(Title::with_text(SURFACE_COLORBAR_TITLE))
                    .thickness(theme::COLORBAR_THICKNESS),
            );

        let scene = LayoutScene::new()
            .x_axis(figure::titled_axis("East (m)"))
            .y_axis(figure::titled_axis("North (m)"))
            .z_axis(figure::titled_axis("Depth (m)"))
            .aspect_mode(AspectMode::Manual)
            .aspect_ratio(AspectRatio::from((1.0, 1.0, 0.5)))
            .background_color(theme::SCENE_BACKGROUND);

        let layout = figure::dark_layout()
            .scene(scene)
            .margin(Margin::new().left(0).right(0).bottom(0).top(0))
            .height(theme::SURFACE_HEIGHT_PX);

        let mut plot = Plot::new();
        plot.add_trace(trace);
        plot.set_layout(layout);

        SurfaceView {
            figure: figure::to_figure(&plot),
            pressure_min,
            pressure_max,
        }
    }

    pub fn well_log_view(&self, dataset: &WellDataset) -> WellLogView {
        let table = TablePreview {
            columns: dataset.columns().to_vec(),
            rows: dataset.head(self.display.table_preview_rows).to_vec(),
            total_rows: dataset.len(),
        };

        // All rows are plotted; NaN cells become gaps in the line.
        let values: Vec<f64> = dataset.values().collect();
        let depths: Vec<f64> = dataset.depths().collect();
        let trace = Scatter::new(values, depths)
            .name(dataset.value_column())
            .line(
                Line::new()
                    .color(theme::LOG_LINE_COLOR)
                    .width(theme::LOG_LINE_WIDTH),
            );

        // Depth increases downward.
        let mut yaxis = figure::titled_axis(dataset.depth_column());
        if let Some((shallow, deep)) = depth_extent(dataset) {
            yaxis = yaxis.range(vec![deep, shallow]);
        }

        let layout = figure::dark_layout()
            .title(Title::with_text(LOG_FIGURE_TITLE))
            .x_axis(figure::titled_axis(dataset.value_column()))
            .y_axis(yaxis);

        let mut plot = Plot::new();
        plot.add_trace(trace);
        plot.set_layout(layout);

        WellLogView {
            table,
            figure: figure::to_figure(&plot),
            summary: dataset.summary(),
        }
    }

    pub fn decline_view(&self, year: ForecastYear) -> DeclineView {
        let series = self.decline.series();
        let horizon = f64::from(year.get());

        let trace = Scatter::new(series.years.clone(), series.rates.clone())
            .mode(Mode::LinesMarkers)
            .name(DECLINE_TRACE_NAME)
            .line(Line::new().color(theme::FORECAST_LINE_COLOR));

        let layout = figure::dark_layout()
            .title(Title::with_text(DECLINE_FIGURE_TITLE))
            .shapes(vec![figure::vline(horizon, theme::HORIZON_LINE_COLOR)])
            .annotations(vec![figure::vline_label(horizon, HORIZON_LABEL)]);

        let mut plot = Plot::new();
        plot.add_trace(trace);
        plot.set_layout(layout);

        DeclineView {
            figure: figure::to_figure(&plot),
            eur: series.eur(),
            horizon_rate: self.decline.rate_at(year.get()),
        }
    }
}

/// Shallowest and deepest finite depth, if any.
fn depth_extent(dataset: &WellDataset) -> Option<(f64, f64)> {
    dataset
        .depths()
        .filter(|d| d.is_finite())
        .fold(None, |acc, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((f64::min(lo, d), f64::max(hi, d))),
        })
}

use serde::Serialize;
use serde_json::json;

use crate::{errors::RenderError, models::HistoryDocument, views::format};

pub const CHART_TITLE: &str = "Price history (last 30 days)";
pub const LEGEND_NAME_CAP: usize = 30;

const PALETTE: [(u8, u8, u8); 6] = [
    (102, 126, 234), // blue
    (255, 99, 132),  // red
    (75, 192, 192),  // green
    (255, 205, 86),  // yellow
    (153, 102, 255), // purple
    (255, 159, 64),  // orange
];

/// Palette color for the series at `index`, wrapping past the end.
pub fn palette_color(index: usize, alpha: f64) -> String {
    let (r, g, b) = PALETTE[index % PALETTE.len()];
    format!("rgba({r}, {g}, {b}, {alpha})")
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub x: String,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartDataset {
    pub label: String,
    pub points: Vec<ChartPoint>,
    pub border_color: String,
    pub background_color: String,
}

/// Toolkit-independent description of the price chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub datasets: Vec<ChartDataset>,
    pub x_unit: &'static str,
    pub x_title: &'static str,
    pub y_title: String,
    pub y_begin_at_zero: bool,
    pub y_tick_prefix: &'static str,
}

pub fn line_chart_spec(history: &HistoryDocument) -> ChartSpec {
    let datasets = history
        .history
        .iter()
        .enumerate()
        .map(|(index, series)| ChartDataset {
            label: format::truncate(&series.name, LEGEND_NAME_CAP),
            points: series
                .entries
                .iter()
                .map(|e| ChartPoint { x: e.date.clone(), y: e.price })
                .collect(),
            border_color: palette_color(index, 1.0),
            background_color: palette_color(index, 0.1),
        })
        .collect();

    ChartSpec {
        title: CHART_TITLE.to_string(),
        datasets,
        x_unit: "day",
        x_title: "Date",
        y_title: format!("Price ({})", format::CURRENCY),
        y_begin_at_zero: false,
        y_tick_prefix: format::CURRENCY,
    }
}

/// What the page needs to mount a rendered chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartMarkup {
    pub surface_id: String,
    pub script_urls: Vec<String>,
    // safe to inline inside a <script> element
    pub config_json: String,
    pub tick_prefix: String,
}

pub trait ChartRenderer: Send + Sync {
    fn is_available(&self) -> bool;

    fn render_line_series(
        &self,
        surface_id: &str,
        spec: &ChartSpec,
    ) -> Result<ChartMarkup, RenderError>;
}

/// Emits a Chart.js line configuration loaded from a CDN.
#[derive(Debug, Clone)]
pub struct ChartJsRenderer {
    lib_url: String,
    adapter_url: String,
}

impl ChartJsRenderer {
    pub fn new(lib_url: impl Into<String>, adapter_url: impl Into<String>) -> Self {
        Self {
            lib_url: lib_url.into(),
            adapter_url: adapter_url.into(),
        }
    }

    fn config(spec: &ChartSpec) -> serde_json::Value {
        let datasets: Vec<serde_json::Value> = spec
            .datasets
            .iter()
            .map(|d| {
                json!({
                    "label": d.label,
                    "data": d.points,
                    "borderColor": d.border_color,
                    "backgroundColor": d.background_color,
                    "tension": 0.4,
                    "pointRadius": 4,
                    "pointHoverRadius": 6,
                })
            })
            .collect();

        json!({
            "type": "line",
            "data": { "datasets": datasets },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": {
                    "title": { "display": true, "text": spec.title, "font": { "size": 16 } },
                    "legend": {
                        "position": "top",
                        "labels": { "usePointStyle": true, "padding": 20 }
                    }
                },
                "scales": {
                    "x": {
                        "type": "time",
                        "time": { "unit": spec.x_unit, "displayFormats": { "day": "dd/MM" } },
                        "title": { "display": true, "text": spec.x_title }
                    },
                    "y": {
                        "beginAtZero": spec.y_begin_at_zero,
                        "title": { "display": true, "text": spec.y_title }
                    }
                }
            }
        })
    }
}

impl ChartRenderer for ChartJsRenderer {
    fn is_available(&self) -> bool {
        !self.lib_url.trim().is_empty()
    }

    fn render_line_series(
        &self,
        surface_id: &str,
        spec: &ChartSpec,
    ) -> Result<ChartMarkup, RenderError> {
        if !self.is_available() {
            return Err(RenderError::Backend("Chart.js is not configured".to_string()));
        }

        let config_json = serde_json::to_string(&Self::config(spec))?.replace("</", "<\\/");

        let mut script_urls = vec![self.lib_url.clone()];
        if !self.adapter_url.trim().is_empty() {
            script_urls.push(self.adapter_url.clone());
        }

        Ok(ChartMarkup {
            surface_id: surface_id.to_string(),
            script_urls,
            config_json,
            tick_prefix: spec.y_tick_prefix.to_string(),
        })
    }
}

//! Library entrypoint for PriceWatch.
//!
//! Integration tests under `tests/` build the app state and router from here.

use std::sync::Arc;

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod views;

pub use views::{render, templates};

pub mod controllers;
pub mod routes;

use services::{
    charts::{ChartJsRenderer, ChartRenderer},
    data_source::{DirSource, DocumentSource, HttpSource},
};

/// Application context shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub hbs: templates::Hbs,
    pub settings: config::Settings,
    pub source: Arc<dyn DocumentSource>,
    pub charts: Arc<dyn ChartRenderer>,
}

impl AppState {
    /// Picks the document source and chart backend from settings.
    pub fn from_settings(settings: config::Settings) -> Result<Self, String> {
        let hbs = templates::build_handlebars().map_err(|e| e.to_string())?;

        let source: Arc<dyn DocumentSource> = match &settings.data_base_url {
            Some(base) => Arc::new(HttpSource::new(base, settings.fetch_timeout)?),
            None => Arc::new(DirSource::new(settings.data_dir.clone())),
        };

        let charts: Arc<dyn ChartRenderer> = Arc::new(ChartJsRenderer::new(
            settings.chart_lib_url.clone(),
            settings.chart_adapter_url.clone(),
        ));

        Ok(Self { hbs, settings, source, charts })
    }
}

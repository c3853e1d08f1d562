use serde::de::DeserializeOwned;

use crate::{
    AppState,
    config::Settings,
    errors::LoadError,
    models::{CurrentPricesDocument, HistoryDocument},
    services::{
        charts::{self, ChartRenderer},
        data_source::{CURRENT_PRICES_PATH, DocumentSource, PRICE_HISTORY_PATH, RawDocument},
    },
    views::model::{
        self, ChartUnavailable, ChartView, DashboardView, ErrorView, HistoryView, Page,
        ProductsView, SummaryView,
    },
};

/// Both documents for one page load. Read-only once loaded.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub current: CurrentPricesDocument,
    pub history: HistoryDocument,
}

/// Load-then-render pipeline for a single page view.
pub struct DashboardController<'a> {
    source: &'a dyn DocumentSource,
    charts: &'a dyn ChartRenderer,
    settings: &'a Settings,
}

fn resource_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn parse_document<T: DeserializeOwned>(
    path: &str,
    fetched: Result<RawDocument, String>,
) -> Result<T, LoadError> {
    let resource = resource_name(path).to_string();

    let raw = fetched.map_err(|message| LoadError::Transport {
        resource: resource.clone(),
        message,
    })?;

    if !raw.is_success() {
        return Err(LoadError::Fetch {
            resource,
            status: raw.status,
        });
    }

    serde_json::from_str(&raw.body).map_err(|source| LoadError::Parse { resource, source })
}

impl<'a> DashboardController<'a> {
    pub fn new(
        source: &'a dyn DocumentSource,
        charts: &'a dyn ChartRenderer,
        settings: &'a Settings,
    ) -> Self {
        Self { source, charts, settings }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(state.source.as_ref(), state.charts.as_ref(), &state.settings)
    }

    /// Runs load, summary, products and chart in order. Any load failure
    /// replaces the whole page with the error view.
    pub async fn initialize(&self) -> Page {
        tracing::info!(source = %self.source.describe(), "loading dashboard");

        let data = match self.load_data().await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(error = %e, "dashboard failed to load");
                return Page::Error(self.show_error(&e.to_string()));
            }
        };

        let summary = self.render_summary(&data);
        let products = self.render_products(&data);
        let chart = self.render_chart(&data);

        tracing::info!(
            products = summary.total_products,
            alerts = summary.active_alerts,
            savings = %summary.potential_savings,
            "dashboard rendered"
        );

        Page::Dashboard(DashboardView { summary, products, chart })
    }

    /// Issues both requests before awaiting either; current prices are
    /// checked first when both fail.
    pub async fn load_data(&self) -> Result<LoadedData, LoadError> {
        let (current, history) = tokio::join!(
            self.source.fetch(CURRENT_PRICES_PATH),
            self.source.fetch(PRICE_HISTORY_PATH),
        );

        let current: CurrentPricesDocument = parse_document(CURRENT_PRICES_PATH, current)?;
        tracing::debug!(products = current.products.len(), "current-prices.json loaded");

        let history: HistoryDocument = parse_document(PRICE_HISTORY_PATH, history)?;
        tracing::debug!(series = history.history.len(), "price-history.json loaded");

        Ok(LoadedData { current, history })
    }

    pub fn render_summary(&self, data: &LoadedData) -> SummaryView {
        model::summary_view(&data.current)
    }

    pub fn render_products(&self, data: &LoadedData) -> ProductsView {
        let view = model::products_view(&data.current);
        if view.is_empty() {
            tracing::info!("no products configured");
        }
        view
    }

    /// Never fails: every problem degrades to a placeholder.
    pub fn render_chart(&self, data: &LoadedData) -> ChartView {
        if !self.charts.is_available() {
            tracing::warn!("charting library not available");
            return ChartView::unavailable(ChartUnavailable::LibraryMissing);
        }

        let surface = self.settings.chart_surface_id.trim();
        if surface.is_empty() {
            tracing::warn!("no chart surface on the page");
            return ChartView::unavailable(ChartUnavailable::SurfaceMissing);
        }

        if data.history.is_empty() {
            tracing::warn!("no price history to chart");
            return ChartView::unavailable(ChartUnavailable::NoHistory);
        }

        let spec = charts::line_chart_spec(&data.history);
        match self.charts.render_line_series(surface, &spec) {
            Ok(markup) => {
                tracing::debug!(datasets = spec.datasets.len(), "chart rendered");
                ChartView::Rendered(markup)
            }
            Err(e) => {
                tracing::error!(error = %e, "chart rendering failed");
                ChartView::unavailable(ChartUnavailable::RenderFailed)
            }
        }
    }

    /// Fresh history load for the per-product "view history" action.
    pub async fn show_history(&self, product: &str) -> Result<HistoryView, LoadError> {
        let fetched = self.source.fetch(PRICE_HISTORY_PATH).await;
        let history: HistoryDocument = parse_document(PRICE_HISTORY_PATH, fetched)?;

        Ok(self.history_from(&history, product))
    }

    pub fn history_from(&self, history: &HistoryDocument, product: &str) -> HistoryView {
        let view = model::history_view(product, history.series(product), self.settings.history_limit);
        if let HistoryView::Empty { .. } = view {
            tracing::info!(product, "no history for product");
        }
        view
    }

    pub fn show_error(&self, message: &str) -> ErrorView {
        model::error_view(message, &self.settings.repository_url)
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use pricewatch::{
    AppState, config,
    errors::RenderError,
    routes,
    services::{
        charts::{ChartMarkup, ChartRenderer, ChartSpec},
        data_source::{CURRENT_PRICES_PATH, DocumentSource, PRICE_HISTORY_PATH, RawDocument},
    },
    templates,
};
use tower::ServiceExt;

struct MemorySource {
    docs: HashMap<&'static str, RawDocument>,
}

impl MemorySource {
    fn new(current: RawDocument, history: RawDocument) -> Self {
        let mut docs = HashMap::new();
        docs.insert(CURRENT_PRICES_PATH, current);
        docs.insert(PRICE_HISTORY_PATH, history);
        Self { docs }
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn fetch(&self, path: &str) -> Result<RawDocument, String> {
        Ok(self.docs.get(path).cloned().unwrap_or(RawDocument {
            status: 404,
            body: String::new(),
        }))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

struct StubCharts {
    available: bool,
}

impl ChartRenderer for StubCharts {
    fn is_available(&self) -> bool {
        self.available
    }

    fn render_line_series(&self, surface_id: &str, spec: &ChartSpec) -> Result<ChartMarkup, RenderError> {
        Ok(ChartMarkup {
            surface_id: surface_id.to_string(),
            script_urls: vec!["https://cdn.example/chart.js".to_string()],
            config_json: format!("{{\"datasets\":{}}}", spec.datasets.len()),
            tick_prefix: spec.y_tick_prefix.to_string(),
        })
    }
}

const WIDGET_HISTORY: &str = r#"{"history": {"Widget": [
    {"date": "2024-01-01", "price": 22.5},
    {"date": "2024-01-02", "price": 19.99}
]}}"#;

fn widget_prices(current_price: f64) -> String {
    format!(
        r#"{{"products": [{{"name": "Widget", "url": "http://x", "current_price": {current_price}, "target_price": 25.00}}],
            "total_savings": 5.01, "last_update": "2024-01-01T00:00:00Z"}}"#
    )
}

fn test_state(source: MemorySource, charts_available: bool) -> AppState {
    AppState {
        hbs: templates::build_handlebars().unwrap(),
        settings: config::Settings::default(),
        source: Arc::new(source),
        charts: Arc::new(StubCharts { available: charts_available }),
    }
}

async fn get(state: AppState, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let res = routes::app(state).oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).to_string())
}

#[tokio::test]
async fn dashboard_shows_alerted_product() {
    let source = MemorySource::new(
        RawDocument::ok(widget_prices(19.99)),
        RawDocument::ok(WIDGET_HISTORY),
    );

    let (status, body) = get(test_state(source, true), "/").await;
    assert_eq!(status, StatusCode::OK);

    assert!(body.contains(r#"id="total-products">1<"#));
    assert!(body.contains(r#"id="active-alerts">1<"#));
    assert!(body.contains(r#"id="potential-savings">€5.01<"#));
    assert!(body.contains("You save €5.01"));
    assert!(body.contains("status target_reached"));
    assert!(body.contains("01/01/2024, 00:00:00"));
    assert!(body.contains(r#"<canvas id="price-chart""#));
}

#[tokio::test]
async fn dashboard_shows_waiting_product_above_target() {
    let source = MemorySource::new(
        RawDocument::ok(widget_prices(30.00)),
        RawDocument::ok(WIDGET_HISTORY),
    );

    let (_, body) = get(test_state(source, true), "/").await;

    assert!(body.contains(r#"id="active-alerts">0<"#));
    assert!(body.contains("status waiting"));
    assert!(body.contains("€5.00 to go"));
    assert!(!body.contains("You save"));
}

#[tokio::test]
async fn missing_current_prices_shows_error_page() {
    let source = MemorySource::new(
        RawDocument { status: 404, body: String::new() },
        RawDocument::ok(WIDGET_HISTORY),
    );

    let (status, body) = get(test_state(source, true), "/").await;
    assert_eq!(status, StatusCode::OK);

    assert!(body.contains("Error loading data"));
    assert!(body.contains("current-prices.json"));
    assert!(body.contains("404"));
    assert!(body.contains("location.reload()"));
    assert!(body.contains(config::DEFAULT_REPOSITORY_URL));
    assert!(!body.contains(r#"id="products-grid""#));
}

#[tokio::test]
async fn history_failure_also_shows_error_page() {
    let source = MemorySource::new(
        RawDocument::ok(widget_prices(19.99)),
        RawDocument { status: 500, body: "oops".to_string() },
    );

    let (_, body) = get(test_state(source, true), "/").await;

    assert!(body.contains("price-history.json"));
    assert!(body.contains("500"));
    assert!(!body.contains("total-products"));
}

#[tokio::test]
async fn invalid_json_shows_error_page() {
    let source = MemorySource::new(
        RawDocument::ok("{not json"),
        RawDocument::ok(WIDGET_HISTORY),
    );

    let (_, body) = get(test_state(source, true), "/").await;

    assert!(body.contains("Invalid JSON in current-prices.json"));
}

#[tokio::test]
async fn chart_library_missing_keeps_rest_of_dashboard() {
    let source = MemorySource::new(
        RawDocument::ok(widget_prices(19.99)),
        RawDocument::ok(WIDGET_HISTORY),
    );

    let (status, body) = get(test_state(source, false), "/").await;
    assert_eq!(status, StatusCode::OK);

    assert!(body.contains("charting library could not be loaded"));
    assert!(!body.contains("<canvas"));
    assert!(body.contains(r#"id="total-products">1<"#));
    assert!(body.contains("You save €5.01"));
}

#[tokio::test]
async fn empty_product_list_shows_placeholder() {
    let source = MemorySource::new(
        RawDocument::ok(r#"{"products": [], "last_update": "2024-01-01T00:00:00Z"}"#),
        RawDocument::ok(r#"{"history": {}}"#),
    );

    let (_, body) = get(test_state(source, true), "/").await;

    assert!(body.contains("No products configured"));
    assert!(body.contains(r#"id="total-products">0<"#));
    assert!(body.contains(r#"id="active-alerts">0<"#));
    assert!(body.contains(r#"id="potential-savings">€0.00<"#));
    assert!(body.contains("no price history recorded yet"));
}

#[tokio::test]
async fn history_partial_lists_entries() {
    let source = MemorySource::new(
        RawDocument::ok(widget_prices(19.99)),
        RawDocument::ok(WIDGET_HISTORY),
    );

    let req = Request::builder()
        .uri("/history?name=Widget")
        .header("HX-Request", "true")
        .body(Body::empty())
        .unwrap();
    let res = routes::app(test_state(source, true)).oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8_lossy(&bytes).to_string();

    assert!(body.contains("01/01/2024: €22.50"));
    assert!(body.contains("02/01/2024: €19.99"));
    assert!(!body.contains("<html"));
}

#[tokio::test]
async fn history_for_unknown_product_says_so() {
    let source = MemorySource::new(
        RawDocument::ok(widget_prices(19.99)),
        RawDocument::ok(WIDGET_HISTORY),
    );

    let (status, body) = get(test_state(source, true), "/history?name=Gadget%20Pro").await;
    assert_eq!(status, StatusCode::OK);

    assert!(body.contains("No price history available for"));
    assert!(body.contains("Gadget Pro"));
    assert!(body.contains("<html"));
}

#[tokio::test]
async fn history_load_failure_returns_bare_error_for_htmx() {
    let source = MemorySource::new(
        RawDocument::ok(widget_prices(19.99)),
        RawDocument { status: 500, body: String::new() },
    );

    let req = Request::builder()
        .uri("/history?name=Widget")
        .header("HX-Request", "true")
        .body(Body::empty())
        .unwrap();
    let res = routes::app(test_state(source, true)).oneshot(req).await.unwrap();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8_lossy(&bytes).to_string();

    assert!(body.contains("Error loading data"));
    assert!(body.contains("price-history.json"));
    assert!(!body.contains("<html"));

    let source = MemorySource::new(
        RawDocument::ok(widget_prices(19.99)),
        RawDocument { status: 500, body: String::new() },
    );
    let (_, body) = get(test_state(source, true), "/history?name=Widget").await;
    assert!(body.contains("<html"));
    assert!(body.contains("Error loading data"));
}

#[tokio::test]
async fn product_card_links_to_history() {
    let source = MemorySource::new(
        RawDocument::ok(widget_prices(19.99)),
        RawDocument::ok(WIDGET_HISTORY),
    );

    let (_, body) = get(test_state(source, true), "/").await;

    // handlebars escapes `=` inside attributes
    assert!(body.contains(r#"hx-get="/history?name&#x3D;Widget""#));
    assert!(body.contains(r#"href="http://x""#));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let source = MemorySource::new(RawDocument::ok("{}"), RawDocument::ok("{}"));

    let (status, body) = get(test_state(source, true), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page not found"));
}

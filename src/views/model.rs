//! Display tree for the dashboard.
//!
//! Everything here is a pure function of the loaded documents, so the whole
//! page can be checked without a browser. `views::render` turns these into
//! HTML.

use serde::Serialize;

use crate::{
    models::{CurrentPricesDocument, HistoryEntry, Product},
    services::charts::ChartMarkup,
    views::format,
};

pub const CARD_NAME_CAP: usize = 60;

#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    pub total_products: usize,
    pub active_alerts: usize,
    pub potential_savings: String,
    pub last_update: String,
}

pub fn summary_view(doc: &CurrentPricesDocument) -> SummaryView {
    let last_update = doc
        .last_update
        .as_deref()
        .map(format::timestamp)
        .unwrap_or_else(|| "unknown".to_string());

    SummaryView {
        total_products: doc.products.len(),
        active_alerts: doc.alerted().count(),
        potential_savings: format::currency(doc.total_savings()),
        last_update,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    TargetReached,
    Waiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    Savings,
    Shortfall,
    Unavailable,
}

#[derive(Debug, Clone, Serialize)]
pub struct DifferenceView {
    pub kind: DifferenceKind,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductCard {
    pub name: String,
    pub display_name: String,
    pub alert: bool,
    pub status: CardStatus,
    pub status_label: &'static str,
    pub current_price: String,
    pub target_price: String,
    pub difference: DifferenceView,
    pub url: String,
    pub history_href: String,
}

/// Savings or shortfall from the prices themselves; the status badge
/// follows the alert flag.
fn difference(product: &Product) -> DifferenceView {
    match (product.savings(), product.shortfall()) {
        (Some(amount), _) => DifferenceView {
            kind: DifferenceKind::Savings,
            text: format!("You save {}", format::currency(amount)),
        },
        (None, Some(amount)) => DifferenceView {
            kind: DifferenceKind::Shortfall,
            text: format!("{} to go", format::currency(amount)),
        },
        (None, None) => DifferenceView {
            kind: DifferenceKind::Unavailable,
            text: "Price unavailable".to_string(),
        },
    }
}

pub fn history_href(name: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(name.as_bytes()).collect();
    format!("/history?name={encoded}")
}

pub fn product_card(product: &Product) -> ProductCard {
    let alert = product.is_alert();
    let (status, status_label) = if alert {
        (CardStatus::TargetReached, "Target reached!")
    } else {
        (CardStatus::Waiting, "Waiting")
    };

    ProductCard {
        name: product.name.clone(),
        display_name: format::truncate(&product.name, CARD_NAME_CAP),
        alert,
        status,
        status_label,
        current_price: format::optional_currency(product.current_price),
        target_price: format::currency(product.target_price),
        difference: difference(product),
        url: product.url.clone(),
        history_href: history_href(&product.name),
    }
}

/// Empty `cards` renders the "no products configured" placeholder.
#[derive(Debug, Clone, Serialize)]
pub struct ProductsView {
    pub cards: Vec<ProductCard>,
}

impl ProductsView {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

pub fn products_view(doc: &CurrentPricesDocument) -> ProductsView {
    ProductsView {
        cards: doc.products.iter().map(product_card).collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartUnavailable {
    LibraryMissing,
    SurfaceMissing,
    NoHistory,
    RenderFailed,
}

impl ChartUnavailable {
    pub fn message(self) -> &'static str {
        match self {
            ChartUnavailable::LibraryMissing => "Chart unavailable: the charting library could not be loaded.",
            ChartUnavailable::SurfaceMissing => "Chart unavailable: this page has no chart area.",
            ChartUnavailable::NoHistory => "Chart unavailable: no price history recorded yet.",
            ChartUnavailable::RenderFailed => "Chart unavailable: the chart could not be drawn.",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartView {
    Rendered(ChartMarkup),
    Unavailable {
        reason: ChartUnavailable,
        message: &'static str,
    },
}

impl ChartView {
    pub fn unavailable(reason: ChartUnavailable) -> Self {
        ChartView::Unavailable {
            reason,
            message: reason.message(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub summary: SummaryView,
    pub products: ProductsView,
    pub chart: ChartView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorView {
    pub message: String,
    pub causes: Vec<&'static str>,
    pub repository_url: String,
}

pub fn error_view(message: &str, repository_url: &str) -> ErrorView {
    let message = if message.trim().is_empty() {
        "Unknown error".to_string()
    } else {
        message.to_string()
    };

    ErrorView {
        message,
        causes: vec![
            "The price monitor has not generated the JSON files yet",
            "The data location is misconfigured (check DATA_DIR / DATA_BASE_URL)",
            "Inspect the browser developer tools (F12) and the server logs",
        ],
        repository_url: repository_url.to_string(),
    }
}

/// Outcome of one page load.
#[derive(Debug, Clone)]
pub enum Page {
    Dashboard(DashboardView),
    Error(ErrorView),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryView {
    Empty {
        product: String,
        message: String,
    },
    Entries {
        product: String,
        lines: Vec<String>,
        shown: usize,
    },
}

/// Last `limit` entries, oldest first, as `dd/mm/yyyy: €price`.
pub fn history_view(product: &str, entries: Option<&[HistoryEntry]>, limit: usize) -> HistoryView {
    let entries = entries.unwrap_or_default();
    if entries.is_empty() {
        return HistoryView::Empty {
            product: product.to_string(),
            message: format!("No price history available for \"{product}\""),
        };
    }

    let start = entries.len().saturating_sub(limit);
    let lines: Vec<String> = entries[start..]
        .iter()
        .map(|e| format!("{}: {}", format::date(&e.date), format::currency(e.price)))
        .collect();

    HistoryView::Entries {
        product: product.to_string(),
        shown: lines.len(),
        lines,
    }
}

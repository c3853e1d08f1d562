use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::{AppState, render, services::dashboard::DashboardController};

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub name: Option<String>,
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

// GET /
pub async fn get_dashboard(State(state): State<AppState>) -> Response {
    let page = DashboardController::from_state(&state).initialize().await;

    match render::render_page(&state, &page) {
        Ok(html) => (StatusCode::OK, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "dashboard template failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(e.to_string())).into_response()
        }
    }
}

// GET /history?name=...
pub async fn get_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let name = query.name.unwrap_or_default();
    let controller = DashboardController::from_state(&state);

    let view = match controller.show_history(&name).await {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, product = %name, "history failed to load");
            let page = controller.show_error(&e.to_string());

            // htmx swaps into #history-panel, so no second layout
            if is_htmx(&headers) {
                return match render::render_error_body(&state, &page) {
                    Ok(html) => (StatusCode::OK, Html(html)).into_response(),
                    Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(e.to_string())).into_response(),
                };
            }

            return match render::render_error(&state, &page) {
                Ok(html) => (StatusCode::OK, Html(html)).into_response(),
                Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(e.to_string())).into_response(),
            };
        }
    };

    let body = match render::render_history(&state, &view) {
        Ok(s) => s,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, Html(e.to_string())).into_response();
        }
    };

    if is_htmx(&headers) {
        return (StatusCode::OK, Html(body)).into_response();
    }

    match render::render_full(&state, "History", body) {
        Ok(page) => (StatusCode::OK, Html(page)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(e.to_string())).into_response(),
    }
}

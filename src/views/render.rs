use serde_json::json;

use crate::{
    AppState,
    errors::ViewError,
    views::model::{DashboardView, ErrorView, HistoryView, Page},
};

pub fn render_full(state: &AppState, title: &str, body_html: String) -> Result<String, ViewError> {
    let ctx = json!({
        "title": title,
        "body": body_html,
    });

    Ok(state.hbs.render("layouts/base", &ctx)?)
}

pub fn render_dashboard(state: &AppState, view: &DashboardView) -> Result<String, ViewError> {
    let body = state.hbs.render("pages/dashboard", view)?;
    render_full(state, "Dashboard", body)
}

pub fn render_error_body(state: &AppState, view: &ErrorView) -> Result<String, ViewError> {
    Ok(state.hbs.render("pages/error", view)?)
}

/// The error layout replaces the whole page body.
pub fn render_error(state: &AppState, view: &ErrorView) -> Result<String, ViewError> {
    let body = render_error_body(state, view)?;
    render_full(state, "Error", body)
}

pub fn render_page(state: &AppState, page: &Page) -> Result<String, ViewError> {
    match page {
        Page::Dashboard(view) => render_dashboard(state, view),
        Page::Error(view) => render_error(state, view),
    }
}

pub fn render_history(state: &AppState, view: &HistoryView) -> Result<String, ViewError> {
    Ok(state.hbs.render("partials/history", view)?)
}

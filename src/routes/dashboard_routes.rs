use axum::{Router, routing::get};
use crate::{AppState, controllers::dashboard_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/", get(dashboard_controller::get_dashboard))
        .route("/history", get(dashboard_controller::get_history))
}

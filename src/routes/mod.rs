use axum::Router;
use tower_http::services::ServeDir;

use crate::{AppState, controllers::home_controller};

pub mod dashboard_routes;
pub mod home_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = dashboard_routes::add_routes(router);

    // the monitor's output, so DATA_BASE_URL can point back at this server
    let data_dir = state.settings.data_dir.join("data");

    router
        .nest_service("/data", ServeDir::new(data_dir))
        .fallback(home_controller::not_found)
        .with_state(state)
}

use std::net::SocketAddr;

use pricewatch::{AppState, config, routes};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    let state = match AppState::from_settings(settings.clone()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("startup failed: {}", e);
            std::process::exit(1);
        }
    };

    let app = routes::app(state);

    let ip = match settings.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::error!("invalid HOST {}: {}", settings.host, e);
            std::process::exit(1);
        }
    };
    let addr = SocketAddr::from((ip, settings.port));

    match &settings.data_base_url {
        Some(url) => tracing::info!("reading price data from {}", url),
        None => tracing::info!("reading price data from {}", settings.data_dir.display()),
    }
    tracing::info!("listening on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("bind {} failed: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {}", e);
    }
}

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CHART_LIB_URL: &str =
    "https://cdn.jsdelivr.net/npm/chart.js@4/dist/chart.umd.min.js";
pub const DEFAULT_CHART_ADAPTER_URL: &str =
    "https://cdn.jsdelivr.net/npm/chartjs-adapter-date-fns@3/dist/chartjs-adapter-date-fns.bundle.min.js";
pub const DEFAULT_REPOSITORY_URL: &str = "https://github.com/tinchodeluca/scann_url";

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,

    // where the monitor writes current-prices.json / price-history.json
    pub data_dir: PathBuf,
    // when set, documents are fetched over HTTP instead of read from data_dir
    pub data_base_url: Option<String>,
    pub fetch_timeout: Option<Duration>,

    // empty = charting library not available
    pub chart_lib_url: String,
    pub chart_adapter_url: String,
    // empty = the page has no chart surface
    pub chart_surface_id: String,

    pub history_limit: usize,
    pub repository_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            data_dir: PathBuf::from("docs"),
            data_base_url: None,
            fetch_timeout: None,
            chart_lib_url: DEFAULT_CHART_LIB_URL.to_string(),
            chart_adapter_url: DEFAULT_CHART_ADAPTER_URL.to_string(),
            chart_surface_id: "price-chart".to_string(),
            history_limit: 10,
            repository_url: DEFAULT_REPOSITORY_URL.to_string(),
        }
    }
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let defaults = Settings::default();

    let host = env::var("HOST").unwrap_or(defaults.host);

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(defaults.port);

    let data_dir = env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or(defaults.data_dir);

    let data_base_url = env::var("DATA_BASE_URL")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let fetch_timeout = env::var("FETCH_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    let chart_lib_url = env::var("CHART_LIB_URL").unwrap_or(defaults.chart_lib_url);
    let chart_adapter_url = env::var("CHART_ADAPTER_URL").unwrap_or(defaults.chart_adapter_url);
    let chart_surface_id = env::var("CHART_SURFACE_ID").unwrap_or(defaults.chart_surface_id);

    let history_limit = env::var("HISTORY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(defaults.history_limit);

    let repository_url = env::var("REPOSITORY_URL").unwrap_or(defaults.repository_url);

    Settings {
        host,
        port,
        data_dir,
        data_base_url,
        fetch_timeout,
        chart_lib_url,
        chart_adapter_url,
        chart_surface_id,
        history_limit,
        repository_url,
    }
}

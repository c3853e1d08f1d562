use thiserror::Error;

/// Failures while loading the monitor's JSON documents. Any of these aborts
/// the dashboard and shows the full-page error view.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load {resource}: HTTP {status}")]
    Fetch { resource: String, status: u16 },

    #[error("Failed to load {resource}: {message}")]
    Transport { resource: String, message: String },

    #[error("Invalid JSON in {resource}: {source}")]
    Parse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Chart construction failure. Contained by the controller, never shown as
/// the error page.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("chart configuration could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("chart rendering failed: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

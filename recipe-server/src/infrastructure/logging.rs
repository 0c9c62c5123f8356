use tracing_subscriber::{EnvFilter, fmt};

use crate::infrastructure::config::LogFormat;

pub fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,recipe_server=debug"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    let installed = match format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.finish()),
    };
    if installed.is_err() {
        tracing::warn!("global tracing subscriber already installed");
    }
}

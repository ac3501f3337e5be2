use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

/// Install the global subscriber. Logs go to stderr so that stdout carries
/// only the formatted result.
pub fn init_logger(config: &LogConfig, verbose: bool) {
    let directive = if verbose {
        "loan_calc_core=debug,loancalc=debug,info"
    } else {
        config.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.compact()).init();
    }
}

//! Installs the global `tracing` subscriber.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

use super::config::{Log, LogFormat};

/// Keeps the non-blocking writer flushing until dropped.
#[derive(Debug)]
pub struct TelemetryGuard {
    _log_guards: Vec<WorkerGuard>,
}

/// Sets up the console layer described by `config`.
///
/// Events from `crates_to_filter` are kept at the configured level, everything else at
/// `WARN`, unless `filtering_directive` overrides both. Calling this twice keeps the
/// first subscriber.
pub fn setup(config: &Log, crates_to_filter: impl AsRef<[&'static str]>) -> TelemetryGuard {
    let mut guards = Vec::new();

    let console_layer = if config.console.enabled {
        let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);

        let level = config.console.level.into_level();
        let directive = config.console.filtering_directive.clone().unwrap_or_else(|| {
            default_directive(level, crates_to_filter.as_ref())
        });
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse_lossy(directive);

        let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.console.log_format {
            LogFormat::Default => fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_filter(filter)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(writer)
                .with_filter(filter)
                .boxed(),
        };
        Some(layer)
    } else {
        None
    };

    if let Err(error) = tracing_subscriber::registry().with(console_layer).try_init() {
        tracing::warn!(%error, "tracing subscriber already installed");
    }

    TelemetryGuard {
        _log_guards: guards,
    }
}

fn default_directive(level: tracing::Level, crates_to_filter: &[&'static str]) -> String {
    let mut directives = vec![LevelFilter::WARN.to_string()];
    directives.extend(
        crates_to_filter
            .iter()
            .map(|crate_name| format!("{}={level}", crate_name.replace('-', "_"))),
    );
    directives.join(",")
}

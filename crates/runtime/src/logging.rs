//! Tracing subscriber setup for hosts embedding the runtime.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber.
///
/// `filter` is an `EnvFilter` directive string such as `"info"` or
/// `"inventory_runtime=debug"`; `RUST_LOG` overrides it when set. With a
/// `log_dir` the output goes to `inventory.log` there through a non-blocking
/// writer, otherwise to stderr. Keep the returned guard alive for as long as
/// file logging should keep flushing.
pub fn init_logging(filter: &str, log_dir: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(filter))?;

    let Some(log_dir) = log_dir else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
        return Ok(None);
    };

    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::never(log_dir, "inventory.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    tracing::info!("Log file: {}/inventory.log", log_dir.display());
    Ok(Some(guard))
}

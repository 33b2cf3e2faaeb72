use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_DIR_ENV: &str = "FINETUNE_SERVER_LOG_DIR";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,finetune=debug,finetune_server=debug"))
}

/// Initialize the global subscriber.
///
/// With `FINETUNE_SERVER_LOG_DIR` set, logs go to a daily-rolling file named
/// after `name` and the returned guard must be held for the process
/// lifetime; otherwise logs go to stdout and no guard is needed.
pub fn setup_logging(name: Option<&str>) -> Result<Option<WorkerGuard>> {
    match std::env::var(LOG_DIR_ENV) {
        Ok(log_dir) => {
            std::fs::create_dir_all(&log_dir)?;
            let file_name = format!("{}.log", name.unwrap_or("finetuned"));
            let file_appender = tracing_appender::rolling::daily(&log_dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::fmt()
                .with_writer(non_blocking)
                .with_env_filter(env_filter())
                .with_ansi(false)
                .init();

            Ok(Some(guard))
        }
        Err(_) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .init();

            Ok(None)
        }
    }
}

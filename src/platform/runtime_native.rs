use std::fs::OpenOptions;
use std::time::Duration;

pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Route `log` output through env_logger.
///
/// The terminal UI owns stdout/stderr, so records only go somewhere when a
/// log file is configured. `RUST_LOG` picks the level (default `info`).
pub fn init_logging(log_file: Option<&str>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        log::set_max_level(log::LevelFilter::Off);
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber. `log_file` of "-" logs to stderr,
/// anything else is appended to without ANSI colors.
pub fn init(log_file: &str) -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt::Subscriber::builder().with_env_filter(env);

    if log_file == "-" {
        builder.with_writer(std::io::stderr).init();
        return Ok(());
    }

    let path = Path::new(log_file);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    builder
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

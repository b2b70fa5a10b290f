// Infrastructure: tracing subscriber setup

use std::error::Error;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Where log lines go
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    /// Headless commands: stderr keeps stdout free for results
    Stderr,
    /// Terminal UI: the screen belongs to ratatui, so log to a file
    File(&'a Path),
}

/// Build the filter: `RUST_LOG` wins, otherwise `transportopt=<level>`
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("transportopt={level},warn")))
}

pub fn init_tracing(level: &str, target: LogTarget<'_>) -> Result<(), Box<dyn Error + Send + Sync>> {
    use tracing_subscriber::fmt;

    let builder = fmt()
        .with_env_filter(env_filter(level))
        .with_target(true)
        .with_thread_ids(false);

    match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).finish().try_init()?,
        LogTarget::File(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("transportopt.log");
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(file_name)
                .build(directory)?;
            builder
                .with_writer(appender)
                .with_ansi(false)
                .finish()
                .try_init()?
        }
    }

    Ok(())
}

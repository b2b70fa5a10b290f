// Infrastructure layer: configuration, logging, CLI and instance files

pub mod cli;
pub mod config;
pub mod instance;
pub mod logging;

pub use cli::{Cli, Command};
pub use config::{AppConfig, ConfigError};
pub use instance::{load_instance, render_instance, InstanceError};
pub use logging::{init_tracing, LogTarget};

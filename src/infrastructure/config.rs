// Infrastructure: layered configuration
// defaults <- TOML file <- TRANSPORTOPT_* environment variables

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::application::{CsvExporter, ExportLayout};
use crate::domain::{SolverBackend, DEFAULT_BALANCE_TOLERANCE, MAX_NODES, MIN_NODES};

pub const DEFAULT_CONFIG_FILE: &str = "transportopt.toml";
pub const ENV_PREFIX: &str = "TRANSPORTOPT_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub solver: SolverSection,
    pub defaults: DefaultsSection,
    pub export: ExportSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSection {
    pub backend: SolverBackend,
    pub balance_tolerance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsSection {
    pub factories: usize,
    pub warehouses: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSection {
    pub path: PathBuf,
    pub delimiter: char,
    pub layout: ExportLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: String,
    /// Log file used while the terminal UI owns the screen
    pub file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            solver: SolverSection {
                backend: SolverBackend::Auto,
                balance_tolerance: DEFAULT_BALANCE_TOLERANCE,
            },
            defaults: DefaultsSection {
                factories: 3,
                warehouses: 3,
            },
            export: ExportSection {
                path: PathBuf::from("transport_solution.csv"),
                delimiter: ';',
                layout: ExportLayout::Matrix,
            },
            logging: LoggingSection {
                level: "info".to_string(),
                file: PathBuf::from("transportopt.log"),
            },
        }
    }
}

impl AppConfig {
    /// Load from `path` (or `transportopt.toml` in the working directory when
    /// absent), then apply `TRANSPORTOPT_SECTION__KEY` overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        if path.is_some() && !file.exists() {
            return Err(ConfigError::Invalid(format!(
                "config file {} does not exist",
                file.display()
            )));
        }

        let config: AppConfig = Self::figment(file).extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("defaults.factories", self.defaults.factories),
            ("defaults.warehouses", self.defaults.warehouses),
        ] {
            if !(MIN_NODES..=MAX_NODES).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be between {MIN_NODES} and {MAX_NODES}, got {value}"
                )));
            }
        }

        if !(self.solver.balance_tolerance >= 0.0 && self.solver.balance_tolerance.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "solver.balance_tolerance must be a non-negative number, got {}",
                self.solver.balance_tolerance
            )));
        }

        let delimiter = self.export.delimiter;
        if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' {
            return Err(ConfigError::Invalid(format!(
                "export.delimiter must be a single ASCII character other than a quote or newline, got {delimiter:?}"
            )));
        }

        Ok(())
    }

    pub fn exporter(&self) -> CsvExporter {
        // validate() guarantees an ASCII delimiter
        CsvExporter::new(self.export.layout).with_delimiter(self.export.delimiter as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_apply_without_a_file() {
        Jail::expect_with(|_jail| {
            let config = AppConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config, AppConfig::default());
            Ok(())
        });
    }

    #[test]
    fn file_and_env_layers_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                [solver]
                backend = "microlp"

                [defaults]
                factories = 5

                [export]
                layout = "flows"
                delimiter = ","
                "#,
            )?;
            jail.set_env("TRANSPORTOPT_DEFAULTS__WAREHOUSES", "7");

            let config = AppConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.solver.backend, SolverBackend::MicroLp);
            assert_eq!(config.defaults.factories, 5);
            assert_eq!(config.defaults.warehouses, 7);
            assert_eq!(config.export.layout, ExportLayout::Flows);
            assert_eq!(config.export.delimiter, ',');
            assert_eq!(config.solver.balance_tolerance, DEFAULT_BALANCE_TOLERANCE);
            Ok(())
        });
    }

    #[test]
    fn out_of_range_defaults_are_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("TRANSPORTOPT_DEFAULTS__FACTORIES", "12");
            let err = AppConfig::load(None).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("defaults.factories")));
            Ok(())
        });
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        Jail::expect_with(|_jail| {
            assert!(AppConfig::load(Some(Path::new("nope.toml"))).is_err());
            Ok(())
        });
    }
}

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::error::Result;

// Top-level configuration, one block per concern
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub projects: ProjectsConfig,
    pub export: ExportConfig,
}

// Runtime and logging settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

// Where saved plans live
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectsConfig {
    pub dir: PathBuf,
}

// Export defaults
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub include_ga_rows: bool,
    pub pretty_json: bool,
}

impl Config {
    /// Defaults, overridden by `SEATMAP__SECTION__KEY` variables
    /// (e.g. `SEATMAP__PROJECTS__DIR`). A plain `RUST_LOG` wins over
    /// `SEATMAP__APP__RUST_LOG`.
    pub fn from_env() -> Result<Self> {
        Self::load(environment(), env::var("RUST_LOG").ok())
    }

    fn load(source: config::Environment, rust_log: Option<String>) -> Result<Self> {
        let config = config::Config::builder()
            .set_default("app.environment", "development")?
            .set_default("app.rust_log", "seating_plan=info,seatmap=info")?
            .set_default("app.log_format", "text")?
            .set_default("projects.dir", "projects")?
            .set_default("export.include_ga_rows", true)?
            .set_default("export.pretty_json", true)?
            .add_source(source)
            .set_override_option("app.rust_log", rust_log)?
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("SEATMAP")
        .separator("__")
        .try_parsing(true)
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                environment: "development".to_string(),
                rust_log: "seating_plan=info,seatmap=info".to_string(),
                log_format: LogFormat::Text,
            },
            projects: ProjectsConfig {
                dir: PathBuf::from("projects"),
            },
            export: ExportConfig {
                include_ga_rows: true,
                pretty_json: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn defaults_load_without_environment() {
        let config = Config::load(vars(&[]), None).unwrap();
        assert!(config.export.include_ga_rows);
        assert_eq!(config.app.rust_log, "seating_plan=info,seatmap=info");
        assert_eq!(config.app.log_format, LogFormat::Text);
        assert_eq!(config.projects.dir, PathBuf::from("projects"));
    }

    #[test]
    fn prefixed_variables_override_defaults() {
        let source = vars(&[
            ("SEATMAP__PROJECTS__DIR", "/srv/plans"),
            ("SEATMAP__APP__LOG_FORMAT", "json"),
            ("SEATMAP__EXPORT__PRETTY_JSON", "false"),
            ("SEATMAP__APP__RUST_LOG", "debug"),
        ]);
        let config = Config::load(source, Some("warn".to_string())).unwrap();
        assert_eq!(config.projects.dir, PathBuf::from("/srv/plans"));
        assert_eq!(config.app.log_format, LogFormat::Json);
        assert!(!config.export.pretty_json);
        assert_eq!(config.app.rust_log, "warn");
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let source = vars(&[("SEATMAP__APP__LOG_FORMAT", "xml")]);
        assert!(Config::load(source, None).is_err());
    }

    #[test]
    fn default_impl_is_development() {
        let config = Config::default();
        assert_eq!(config.app.environment, "development");
        assert_eq!(config.app.log_format, LogFormat::Text);
        assert_eq!(config.projects.dir, PathBuf::from("projects"));
    }
}

//! # fyrvakt Configuration System
//!
//! Hierarchical configuration for the analytics node.
//!
//! ## Features
//! - **Unified Configuration**: one `FyrvaktConfig` shared by every component
//! - **Validation**: every section is checked with `validator` before use
//! - **Environment Awareness**: per-environment YAML overrides and `FYRVAKT_*` variables

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
mod node;
mod pipeline;
mod simulator;
mod status;
mod telemetry;
mod validation;

pub use error::ConfigError;
pub use node::NodeConfig;
pub use pipeline::PipelineConfig;
pub use simulator::SimulatorConfig;
pub use status::StatusConfig;
pub use telemetry::TelemetryConfig;

/// Base settings file, merged over the defaults when present.
pub const BASE_CONFIG_FILE: &str = "config/fyrvakt.yaml";

/// Top-level configuration container for all fyrvakt components.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone)]
pub struct FyrvaktConfig {
    /// Node identity and log verbosity.
    #[validate(nested)]
    #[serde(default)]
    pub node: NodeConfig,

    /// Aggregation loop cadence and analyzer selection.
    #[validate(nested)]
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Status export target.
    #[validate(nested)]
    #[serde(default)]
    pub status: StatusConfig,

    /// Simulated fleet used when no replay file is given.
    #[validate(nested)]
    #[serde(default)]
    pub simulation: SimulatorConfig,

    /// Logging and metrics output.
    #[validate(nested)]
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl FyrvaktConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/fyrvakt.yaml` - base settings, skipped when missing
    /// 3. `config/<FYRVAKT_ENV>.yaml` - environment overrides (`production` by default)
    /// 4. `FYRVAKT_*` environment variables, `__` separating nested keys
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(FyrvaktConfig::default()));

        if Path::new(BASE_CONFIG_FILE).exists() {
            figment = figment.merge(Yaml::file(BASE_CONFIG_FILE));
        }

        let env = std::env::var("FYRVAKT_ENV").unwrap_or_else(|_| "production".into());
        let env_file = format!("config/{}.yaml", env);
        if Path::new(&env_file).exists() {
            figment = figment.merge(Yaml::file(env_file));
        }

        Self::extract(figment.merge(Env::prefixed("FYRVAKT_").split("__")))
    }

    /// Load configuration from a specific file, layered over defaults and
    /// under `FYRVAKT_*` environment variables.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Self::extract(
            Figment::from(Serialized::defaults(FyrvaktConfig::default()))
                .merge(Yaml::file(path))
                .merge(Env::prefixed("FYRVAKT_").split("__")),
        )
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn full_config_validation() {
        let config = FyrvaktConfig::default();
        config.validate().expect("Default config should validate");
    }

    #[test]
    fn loads_defaults_without_files() {
        Jail::expect_with(|_jail| {
            let config = FyrvaktConfig::load().expect("defaults should load");
            assert_eq!(config.pipeline.packet_interval_ms, 1000);
            assert_eq!(
                config.pipeline.enabled_analyzers,
                vec!["packet-analyzer", "predictive-maintenance"]
            );
            Ok(())
        });
    }

    #[test]
    fn environment_override() {
        Jail::expect_with(|jail| {
            jail.set_env("FYRVAKT_PIPELINE__PACKET_INTERVAL_MS", "250");
            jail.set_env("FYRVAKT_NODE__DEVICE_ID", "RPI4-NODE-009");
            let config = FyrvaktConfig::load().expect("env override should load");
            assert_eq!(config.pipeline.packet_interval_ms, 250);
            assert_eq!(config.node.device_id, "RPI4-NODE-009");
            Ok(())
        });
    }

    #[test]
    fn base_and_environment_files_are_layered() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/fyrvakt.yaml",
                r#"
node:
  device_id: RPI4-NODE-002
pipeline:
  packet_interval_ms: 500
  enabled_analyzers: [predictive-maintenance]
"#,
            )?;
            jail.create_file(
                "config/staging.yaml",
                "pipeline:\n  packet_interval_ms: 2000\n",
            )?;
            jail.set_env("FYRVAKT_ENV", "staging");

            let config = FyrvaktConfig::load().expect("layered config should load");
            assert_eq!(config.node.device_id, "RPI4-NODE-002");
            assert_eq!(config.pipeline.packet_interval_ms, 2000);
            assert_eq!(config.pipeline.enabled_analyzers, vec!["predictive-maintenance"]);
            Ok(())
        });
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = FyrvaktConfig::load_from_path("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn invalid_values_fail_validation() {
        Jail::expect_with(|jail| {
            jail.create_file("node.yaml", "pipeline:\n  packet_interval_ms: 0\n")?;
            let err = FyrvaktConfig::load_from_path("node.yaml").unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)));
            Ok(())
        });
    }

    #[test]
    fn malformed_yaml_is_a_parsing_error() {
        Jail::expect_with(|jail| {
            jail.create_file("node.yaml", "pipeline:\n  packet_interval_ms: fast\n")?;
            let err = FyrvaktConfig::load_from_path("node.yaml").unwrap_err();
            assert!(matches!(err, ConfigError::Parsing(_)));
            Ok(())
        });
    }
}

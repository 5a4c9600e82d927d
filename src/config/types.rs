use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::reporter::{ReporterConfig, ServerConfig};
use crate::sources::SourceConfig;
use crate::transport::TransportConfig;

/// Prefix of environment variables overriding file settings,
/// e.g. `CWREPORTER_REPORTER__NAMESPACE=Workers`.
pub const ENV_PREFIX: &str = "CWREPORTER_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default)]
    pub logging: LoggingConfig,
    pub reporter: ReporterConfig,
    pub transport: TransportConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Build the figment for a YAML file, with environment overrides on top.
pub fn config_figment(path: &str) -> Figment {
    Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load config from the given YAML file plus `CWREPORTER_*` environment variables.
pub fn load_config(path: &str) -> Result<ConfigV1, figment::Error> {
    extract(config_figment(path))
}

/// Extract a versioned config from any figment.
pub fn extract(figment: Figment) -> Result<ConfigV1, figment::Error> {
    let config = match figment.extract::<Config>()? {
        Config::ConfigV1(c) => c,
    };
    // handle configuration migration between versions here when necessary
    config.reporter.validate().map_err(figment::Error::from)?;
    Ok(config)
}

/// Render the JSON schema for the configuration.
pub fn schema() -> Result<String, serde_json::Error> {
    let schema = schema_for!(Config);
    serde_json::to_string_pretty(&schema)
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Artifact storage configuration
    pub artifacts: ArtifactsConfig,

    /// Model presentation configuration
    pub model: ModelConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: QDP_)
            .add_source(
                config::Environment::with_prefix("QDP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Directory holding the serialized artifacts
    #[serde(default = "default_artifact_dir")]
    pub dir: PathBuf,

    /// Numeric imputer artifact file name
    #[serde(default = "default_imputer_file")]
    pub imputer_file: String,

    /// Numeric scaler artifact file name
    #[serde(default = "default_scaler_file")]
    pub scaler_file: String,

    /// Final feature-name list artifact file name
    #[serde(default = "default_features_file")]
    pub features_file: String,

    /// Trained classifier artifact file name
    #[serde(default = "default_model_file")]
    pub model_file: String,

    /// Label decoder artifact file name
    #[serde(default = "default_labels_file")]
    pub labels_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Hold-out accuracy reported alongside predictions
    #[serde(default = "default_reported_accuracy")]
    pub reported_accuracy: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_artifact_dir() -> PathBuf {
    "./data/artifacts".into()
}

fn default_imputer_file() -> String {
    "num_imputer.json".to_string()
}

fn default_scaler_file() -> String {
    "scaler.json".to_string()
}

fn default_features_file() -> String {
    "features.json".to_string()
}

fn default_model_file() -> String {
    "model.json".to_string()
}

fn default_labels_file() -> String {
    "label_encoder.json".to_string()
}

fn default_reported_accuracy() -> f64 {
    0.76
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "quake-damage-predictor".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        assert_eq!(default_http_port(), 8080);
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_reported_accuracy(), 0.76);
        assert_eq!(default_imputer_file(), "num_imputer.json");
    }
}

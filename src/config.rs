use crate::error::{ExporterError, Result as ExporterResult};
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub zfs: ZfsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    /// Prefix of every exported metric name
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Registered collector names to enable
    #[serde(default = "default_collectors")]
    pub collectors: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ZfsConfig {
    #[serde(default = "default_zfs_binary")]
    pub binary: String,
    /// Restrict listing to one pool (or dataset subtree). Empty means every pool.
    #[serde(default)]
    pub pool_filter: String,
    /// Report zero filesystems instead of failing the scrape when `zfs list` fails
    #[serde(default)]
    pub suppress_query_errors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            collectors: default_collectors(),
        }
    }
}

impl Default for ZfsConfig {
    fn default() -> Self {
        Self {
            binary: default_zfs_binary(),
            pool_filter: String::new(),
            suppress_query_errors: false,
        }
    }
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9134
}

fn default_namespace() -> String {
    "node".to_string()
}

fn default_collectors() -> Vec<String> {
    vec!["zfs".to_string()]
}

fn default_zfs_binary() -> String {
    "zfs".to_string()
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("ZFS_EXPORTER").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would only surface later as confusing runtime failures
    pub fn validate(&self) -> ExporterResult<()> {
        if self.server.port == 0 {
            return Err(ExporterError::Config(
                "server.port must be non-zero".to_string(),
            ));
        }
        if self.metrics.collectors.is_empty() {
            return Err(ExporterError::Config(
                "metrics.collectors must name at least one collector".to_string(),
            ));
        }
        if self.zfs.binary.trim().is_empty() {
            return Err(ExporterError::Config(
                "zfs.binary must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

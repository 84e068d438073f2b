//! Configuration Loader - File Loading and Validation
//!
//! Loads reporter configuration from a TOML file and validates it
//! before the facade is constructed, so misconfiguration fails with a
//! clear message at startup instead of a silent metric blackout.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::Config;

/// Load and validate reporter configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<Config> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: Config = toml::from_str(&content)
    .with_context(|| "Failed to parse metrics config")?;

  validate_config(&config)?;

  info!(
    namespace = %config.namespace,
    serverless = config.serverless,
    "Metrics configuration loaded"
  );

  Ok(config)
}

/// Validate configuration parameters.
fn validate_config(config: &Config) -> Result<()> {
  anyhow::ensure!(
    !config.namespace.is_empty(),
    "namespace must not be empty"
  );

  if !config.serverless {
    anyhow::ensure!(
      !config.statsd_host.is_empty(),
      "statsd_host must not be empty when the collector backend is selected"
    );
    anyhow::ensure!(
      config.statsd_port != 0,
      "statsd_port must be non-zero when the collector backend is selected"
    );
  }

  Ok(())
}

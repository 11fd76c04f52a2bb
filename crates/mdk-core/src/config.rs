//! Configuration loading
//!
//! Configuration is read from an optional JSON file. Every field is optional; absent
//! fields keep their defaults.

use std::path::Path;

use crate::constant::CONFIG_FILE_NAME;
use crate::{ClientConfig, Error, Result};

/// Read and validate a configuration file
pub fn try_load_client_config<P>(path: P) -> Result<ClientConfig>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
    let config: ClientConfig = serde_json::from_slice(&bytes)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;
    config.validate()?;
    Ok(config)
}

/// Load a configuration file, falling back to defaults.
///
/// A missing file silently yields the defaults. An unreadable, malformed or invalid file
/// is logged and also yields the defaults.
pub fn load_client_config<P>(path: P) -> ClientConfig
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return ClientConfig::default();
    }

    match try_load_client_config(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(
                target: "mdk_core::config",
                error = %e,
                "Ignoring configuration file, using defaults"
            );
            ClientConfig::default()
        }
    }
}

/// Load `mdk_config.json` from a data directory, falling back to defaults
pub fn load_client_config_from_dir<P>(data_dir: P) -> ClientConfig
where
    P: AsRef<Path>,
{
    load_client_config(data_dir.as_ref().join(CONFIG_FILE_NAME))
}

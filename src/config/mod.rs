#[cfg(feature = "cli")]
pub mod cli;
pub mod schema;

use crate::core::loader::{fatal_load, load_validated};
use crate::utils::error::{LoadFailure, Result};
use schema::{CONFIG_SCHEMA, PORT_RANGE_SCHEMA};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// An inclusive interval of ports that must never be handed to a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    pub start: u32,
    pub end: u32,
}

impl PortRange {
    pub fn contains(&self, port: u32) -> bool {
        self.start <= port && port <= self.end
    }
}

/// Shell server deployment settings.
///
/// Keys the schema does not know about are kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployConfig {
    pub deploy_secret: String,
    pub hostname: String,
    pub web_server: String,
    pub default_user: String,
    pub web_root: String,
    pub problem_directory_root: String,
    pub obfuscate_problem_directories: bool,
    pub banned_ports: Vec<PortRange>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeployConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        get_config(path.as_ref())
    }

    pub fn is_port_banned(&self, port: u32) -> bool {
        self.banned_ports.iter().any(|range| range.contains(port))
    }

    pub fn extra_value(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Retrieves the deploy configuration stored at `path`.
///
/// Every banned port range is checked in order and the first bad one aborts
/// the load.
pub fn get_config(path: &Path) -> Result<DeployConfig> {
    let config_object = load_validated(path, &CONFIG_SCHEMA)?;

    let banned_ports = config_object
        .get("banned_ports")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for (index, port_range) in banned_ports.iter().enumerate() {
        if let Err(violations) = PORT_RANGE_SCHEMA.validate(port_range) {
            return Err(fatal_load(
                path,
                "port range",
                LoadFailure::PortRange { index, violations },
            ));
        }

        let range: PortRange = serde_json::from_value(port_range.clone())
            .map_err(|e| fatal_load(path, "port range", LoadFailure::Parse(e)))?;
        if range.start > range.end {
            return Err(fatal_load(
                path,
                "port range",
                LoadFailure::InvertedPortRange {
                    start: range.start,
                    end: range.end,
                },
            ));
        }
    }

    let config: DeployConfig = serde_json::from_value(Value::Object(config_object))
        .map_err(|e| fatal_load(path, "config", LoadFailure::Parse(e)))?;

    tracing::debug!(
        "Loaded config from {} ({} banned port ranges, {} extra keys)",
        path.display(),
        config.banned_ports.len(),
        config.extra.len()
    );

    Ok(config)
}

use crate::catalog::{Catalog, CatalogError};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Base uplink ports per leaf before oversubscription is applied
pub const DEFAULT_BASE_UPLINK_PORTS: u32 = 8;

/// Bandwidth of each compute node's NIC in Gbps
pub const DEFAULT_NODE_BANDWIDTH_GBPS: u64 = 200;

/// Fabric-wide scalar constants shared by every combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FabricSettings {
    pub base_uplink_ports: u32,
    pub node_bandwidth_gbps: u64,
}

impl Default for FabricSettings {
    fn default() -> Self {
        Self {
            base_uplink_ports: DEFAULT_BASE_UPLINK_PORTS,
            node_bandwidth_gbps: DEFAULT_NODE_BANDWIDTH_GBPS,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Invalid fabric settings: {0}")]
    InvalidFabric(String),
    #[error("Invalid leaf '{leaf}': {port_count} ports cannot carry {base_uplink_ports} base uplink ports")]
    LeafTooSmall {
        leaf: String,
        port_count: u32,
        base_uplink_ports: u32,
    },
}

/// A complete calculator configuration: fabric settings plus the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default)]
    pub fabric: FabricSettings,
    #[serde(flatten)]
    pub catalog: Catalog,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            fabric: FabricSettings::default(),
            catalog: Catalog::reference(),
        }
    }
}

impl CalculatorConfig {
    /// Validate the settings and the catalog
    ///
    /// Zero uplinks from an oversized divisor is left to the enumerator so the
    /// error can name the exact combination.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fabric.base_uplink_ports == 0 {
            return Err(ConfigError::InvalidFabric(
                "base_uplink_ports must be greater than zero".to_string(),
            ));
        }
        if self.fabric.node_bandwidth_gbps == 0 {
            return Err(ConfigError::InvalidFabric(
                "node_bandwidth_gbps must be greater than zero".to_string(),
            ));
        }

        self.catalog.validate()?;

        // Uplinks never exceed the base count, so this keeps workload ports non-negative
        if let Some(leaf) = self
            .catalog
            .leaves
            .iter()
            .find(|leaf| leaf.port_count < self.fabric.base_uplink_ports)
        {
            return Err(ConfigError::LeafTooSmall {
                leaf: leaf.name.clone(),
                port_count: leaf.port_count,
                base_uplink_ports: self.fabric.base_uplink_ports,
            });
        }

        Ok(())
    }

    /// Serialize the configuration in the same YAML layout `load_config` reads
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).wrap_err("Failed to serialize catalog to YAML")
    }
}

/// Load and parse a calculator configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<CalculatorConfig> {
    info!("Loading catalog from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open catalog file '{}'", config_path.display()))?;

    let config: CalculatorConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse catalog file '{}'", config_path.display()))?;

    info!(
        "Catalog defines {} spines, {} leaves and {} oversubscription ratios",
        config.catalog.spines.len(),
        config.catalog.leaves.len(),
        config.catalog.oversubscription.len()
    );

    config.validate()?;

    Ok(config)
}

/// CLI arguments that override the fabric settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub base_uplink_ports: Option<u32>,
    pub node_bandwidth_gbps: Option<u64>,
}

/// Apply CLI overrides to a configuration
pub fn apply_overrides(config: &mut CalculatorConfig, overrides: &CliOverrides) -> Result<()> {
    if let Some(ports) = overrides.base_uplink_ports {
        info!("Overriding base uplink ports: {} -> {}", config.fabric.base_uplink_ports, ports);
        config.fabric.base_uplink_ports = ports;
    }

    if let Some(gbps) = overrides.node_bandwidth_gbps {
        info!("Overriding node bandwidth: {} -> {} Gbps", config.fabric.node_bandwidth_gbps, gbps);
        config.fabric.node_bandwidth_gbps = gbps;
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}

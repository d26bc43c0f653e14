//! Configuration loading

use defmt::*;

use airglow_core::config::{parse_config, DisplayConfig};

/// Embedded configuration (compiled into firmware)
/// Edit airglow.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../airglow.toml");

/// Parse the embedded config, falling back to defaults
pub fn load() -> DisplayConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Config loaded from airglow.toml");
            config
        }
        Err(e) => {
            error!("airglow.toml rejected ({:?}), using defaults", e);
            DisplayConfig::default()
        }
    }
}

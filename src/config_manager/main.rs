use serde::{Deserialize, Serialize};

use crate::config_manager::system::SystemConfig;
use crate::config_manager::translator::TranslatorConfig;

/// Main configuration for the application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,

    #[serde(default)]
    pub translator_config: TranslatorConfig,
}

impl Config {
    /// Load configuration from a YAML or JSON file
    pub fn load(path: &str) -> anyhow::Result<Self> {
        use crate::config_manager::utils::{read_config_value, validate_config};
        let value = read_config_value(path)?;
        validate_config(&value)
    }
}

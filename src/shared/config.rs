use std::fs;
use std::path::Path;

use crate::shared::errors::AppError;
use crate::shared::types::AggregatorConfig;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file
    pub fn load_config(path: impl AsRef<Path>) -> Result<AggregatorConfig, AppError> {
        let config_content = fs::read_to_string(path.as_ref())
            .map_err(|e| AppError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config: AggregatorConfig = toml::from_str(&config_content)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_toml() {
        let raw = r#"
            cache_ttl_ms = 300000
            retry_attempts = 7
            retry_base_delay_ms = 50

            [dexes.icpswap]
            enabled = true
            canister_id = "4mmnk-kiaaa-aaaag-qbllq-cai"

            [dexes.kongswap]
            enabled = false
            canister_id = "2ipq2-uqaaa-aaaar-qailq-cai"

            [dexes.sonic]
            enabled = true
            canister_id = "3xwpq-ziaaa-aaaah-qcn4a-cai"
        "#;

        let config: AggregatorConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.cache_ttl_ms, 300_000);
        assert_eq!(config.retry_attempts, 7);
        assert!(!config.dexes.kongswap.enabled);
    }
}

//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::wallet::features::Feature;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct KitConfig {
    /// Wallet provider settings.
    pub provider: WalletProviderConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Wallet provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WalletProviderConfig {
    /// Wallet names listed first, in this order.
    pub preferred_wallets: Vec<String>,

    /// Features a wallet must support to be listed, on top of
    /// `standard:connect` and `standard:events`.
    pub required_features: Vec<Feature>,

    /// Register the in-memory burner wallet. Development only.
    pub enable_unsafe_burner: bool,

    /// Burner wallet settings.
    pub burner: BurnerConfig,
}

/// Unsafe burner wallet configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BurnerConfig {
    /// EVM chain ID the burner account lives on (31337 for local Anvil).
    pub chain_id: u64,
}

impl Default for BurnerConfig {
    fn default() -> Self {
        Self { chain_id: 31337 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KitConfig::default();
        assert!(config.provider.preferred_wallets.is_empty());
        assert!(!config.provider.enable_unsafe_burner);
        assert_eq!(config.provider.burner.chain_id, 31337);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_parse_toml() {
        let config: KitConfig = toml::from_str(
            r#"
            [provider]
            preferred_wallets = ["Mock Wallet 2", "Mock Wallet 1"]
            required_features = ["wallet:signTransaction", "my-dapp:super-cool-feature"]
            enable_unsafe_burner = true

            [provider.burner]
            chain_id = 1

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.provider.preferred_wallets.len(), 2);
        assert_eq!(config.provider.required_features[0], Feature::SignTransaction);
        assert_eq!(
            config.provider.required_features[1],
            Feature::Custom("my-dapp:super-cool-feature".to_string())
        );
        assert!(config.provider.enable_unsafe_burner);
        assert_eq!(config.provider.burner.chain_id, 1);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_level, "info");
    }
}

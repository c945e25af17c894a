use crate::core::error::{BotError, Result};
use crate::core::types::FilterPolicy;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "config.toml";
pub const DEFAULT_FUTURES_TESTNET_ENDPOINT: &str = "https://testnet.binancefuture.com";
pub const DEFAULT_LOG_FILENAME: &str = "trading_bot.log";

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ConfigStruct {
    pub exchange: ConfigExchange,
    pub logging: ConfigLogging,
    pub validation: ConfigValidation,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConfigExchange {
    pub futures_rest_api_endpoint: String,
    // asset whose balance is shown right after login
    pub balance_asset: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConfigLogging {
    pub log_file: String,
    pub level: log::LevelFilter,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ConfigValidation {
    pub filter_policy: FilterPolicy,
}

impl Default for ConfigExchange {
    fn default() -> Self {
        Self {
            futures_rest_api_endpoint: DEFAULT_FUTURES_TESTNET_ENDPOINT.to_string(),
            balance_asset: "USDT".to_string(),
        }
    }
}

impl Default for ConfigLogging {
    fn default() -> Self {
        Self {
            log_file: DEFAULT_LOG_FILENAME.to_string(),
            level: log::LevelFilter::Debug,
        }
    }
}

impl ConfigStruct {
    pub fn from_toml(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }

    /// Reads the TOML config at `path`. Only the default file is optional: when
    /// it does not exist the built-in defaults are used.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(data) => {
                let config = Self::from_toml(&data)?;
                info!("config loaded from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound && path == Path::new(CONFIG_FILENAME) => {
                warn!("{} not found, using built-in defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(BotError::Config(format!("cannot read {}: {e}", path.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_testnet_defaults() {
        let config = ConfigStruct::from_toml("").unwrap();
        assert_eq!(config, ConfigStruct::default());
        assert_eq!(
            config.exchange.futures_rest_api_endpoint,
            "https://testnet.binancefuture.com"
        );
        assert_eq!(config.logging.log_file, "trading_bot.log");
        assert_eq!(config.validation.filter_policy, FilterPolicy::Lenient);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = ConfigStruct::from_toml(
            r#"
            [logging]
            level = "warn"

            [validation]
            filter_policy = "strict"
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, log::LevelFilter::Warn);
        assert_eq!(config.logging.log_file, "trading_bot.log");
        assert_eq!(config.validation.filter_policy, FilterPolicy::Strict);
        assert_eq!(config.exchange.balance_asset, "USDT");
    }

    #[test]
    fn unknown_policy_is_a_config_error() {
        let res = ConfigStruct::from_toml("[validation]\nfilter_policy = \"sloppy\"\n");
        assert!(matches!(res, Err(BotError::Config(_))));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let res = ConfigStruct::load(Path::new("does/not/exist.toml"));
        assert!(matches!(res, Err(BotError::Config(_))));
    }
}

//! Error types for order placement.
//!
//! Every operation of the bot returns a tagged [`Result`]: either the payload or a
//! [`BotError`] naming why nothing was sent (or why the exchange refused it).
use crate::core::types::{FilterType, OrderField, Symbol};
use rust_decimal::Decimal;
use std::io;
use thiserror::Error;

/// Failure reported by the exchange client boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// The exchange answered with a machine-readable error code.
    #[error("exchange rejected request: code={code}, msg={msg}")]
    Rejected { code: i64, msg: String },

    /// The request never got a proper answer (connection, TLS, timeout).
    #[error("transport failure: {0}")]
    Transport(String),

    /// Anything the client library raised that is neither of the above.
    #[error("unexpected client error: {0}")]
    Unexpected(String),
}

/// Unified error type of the bot.
#[derive(Error, Debug)]
pub enum BotError {
    /// Trading rules could not be fetched at startup.
    #[error("trading rules are not available")]
    RulesUnavailable,

    /// Symbol is not listed in the cached trading rules.
    #[error("symbol {0} not found in trading rules")]
    UnknownSymbol(Symbol),

    /// Value falls outside the inclusive bounds of its filter.
    #[error("{symbol}: {field} {value} outside allowed range [{min}, {max}]")]
    OutOfRange {
        symbol: Symbol,
        field: OrderField,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    /// Filter needed for a field is absent and the policy is strict.
    #[error("{symbol}: no {filter} filter to validate {field}")]
    MissingFilter {
        symbol: Symbol,
        filter: FilterType,
        field: OrderField,
    },

    /// Balance list has no entry for the asset.
    #[error("asset {0} not found in account balances")]
    AssetNotFound(String),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error("config error: {0}")]
    Config(String),

    /// Failure while decoding an exchangeInfo payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("logging setup error: {0}")]
    Logging(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<toml::de::Error> for BotError {
    fn from(err: toml::de::Error) -> Self {
        BotError::Config(err.to_string())
    }
}

impl From<log::SetLoggerError> for BotError {
    fn from(err: log::SetLoggerError) -> Self {
        BotError::Logging(err.to_string())
    }
}

/// Crate-wide `Result` alias with `BotError` as the default error.
pub type Result<T, E = BotError> = std::result::Result<T, E>;

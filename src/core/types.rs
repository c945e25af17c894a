use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumString};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub String);

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum OrderSide {
    Buy,
    Sell,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    Market,
    Limit,
    StopLimit,
}

// order type as the futures API names it; a stop-limit goes out as STOP
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ExchangeOrderType {
    Market,
    Limit,
    Stop,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
pub enum TimeInForce {
    /// good till cancelled
    #[serde(rename = "GTC")]
    #[strum(serialize = "GTC")]
    GoodTillCancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterType {
    PriceFilter,
    LotSize,
    MarketLotSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum OrderField {
    #[strum(serialize = "quantity")]
    Quantity,
    #[strum(serialize = "price")]
    Price,
    #[strum(serialize = "stop price")]
    StopPrice,
}

/// What to do with a field whose filter the exchange did not publish.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FilterPolicy {
    /// pass the value through unvalidated, with a warning
    #[default]
    Lenient,
    /// reject the whole order
    Strict,
}

impl OrderKind {
    pub fn exchange_order_type(&self) -> ExchangeOrderType {
        match self {
            OrderKind::Market => ExchangeOrderType::Market,
            OrderKind::Limit => ExchangeOrderType::Limit,
            OrderKind::StopLimit => ExchangeOrderType::Stop,
        }
    }

    pub fn time_in_force(&self) -> Option<TimeInForce> {
        match self {
            OrderKind::Market => None,
            OrderKind::Limit | OrderKind::StopLimit => Some(TimeInForce::GoodTillCancelled),
        }
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Symbol(value)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol(value.to_string())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

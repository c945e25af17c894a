use crate::binance::exchange_info::TradingRules;
use crate::core::error::ExchangeError;
use crate::core::types::{ExchangeOrderType, OrderSide, Symbol, TimeInForce};
use rust_decimal::Decimal;
use serde::Serialize;

/// Order as it is handed to the exchange: every numeric field already normalized.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderTicket {
    pub symbol: Symbol,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: ExchangeOrderType,
    pub quantity: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
}

/// What the exchange reported back for an accepted order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderAck {
    pub order_id: u64,
    pub symbol: String,
    pub side: String,
    pub order_type: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetBalance {
    pub asset: String,
    pub balance: Decimal,
    pub available: Decimal,
}

/// Boundary to the exchange. Everything behind it belongs to the client library.
pub trait ExchangeClient {
    fn ping(&self) -> Result<(), ExchangeError>;
    fn trading_rules(&self) -> Result<TradingRules, ExchangeError>;
    fn balances(&self) -> Result<Vec<AssetBalance>, ExchangeError>;
    fn submit_order(&self, ticket: &OrderTicket) -> Result<OrderAck, ExchangeError>;
}

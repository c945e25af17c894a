//! In-memory exchange used by the unit tests.
use crate::binance::exchange_info::TradingRules;
use crate::core::error::ExchangeError;
use crate::exchange::{AssetBalance, ExchangeClient, OrderAck, OrderTicket};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const EXCHANGE_INFO_JSON: &str = r#"{
  "timezone": "UTC",
  "serverTime": 1700000000000,
  "symbols": [
    {
      "symbol": "BTCUSDT",
      "pair": "BTCUSDT",
      "contractType": "PERPETUAL",
      "status": "TRADING",
      "filters": [
        {"filterType": "PRICE_FILTER", "minPrice": "556.80", "maxPrice": "4529764", "tickSize": "0.10"},
        {"filterType": "LOT_SIZE", "minQty": "0.001", "maxQty": "1000", "stepSize": "0.001"},
        {"filterType": "MARKET_LOT_SIZE", "minQty": "0.001", "maxQty": "120", "stepSize": "0.001"},
        {"filterType": "MAX_NUM_ORDERS", "limit": 200},
        {"filterType": "PERCENT_PRICE", "multiplierUp": "1.0500", "multiplierDown": "0.9500", "multiplierDecimal": "4"}
      ]
    },
    {
      "symbol": "ETHUSDT",
      "pair": "ETHUSDT",
      "contractType": "PERPETUAL",
      "status": "TRADING",
      "filters": [
        {"filterType": "PRICE_FILTER", "minPrice": "39.86", "maxPrice": "306177", "tickSize": "0.01"},
        {"filterType": "LOT_SIZE", "minQty": "0.001", "maxQty": "10000", "stepSize": "0.001"}
      ]
    },
    {
      "symbol": "LUNAUSDT",
      "status": "SETTLING",
      "filters": [
        {"filterType": "LOT_SIZE", "minQty": "1", "maxQty": "100000", "stepSize": "1"}
      ]
    },
    {
      "symbol": "NOLOTUSDT",
      "status": "TRADING",
      "filters": [
        {"filterType": "PRICE_FILTER", "minPrice": "0.0001", "maxPrice": "200", "tickSize": "0.0001"}
      ]
    }
  ]
}"#;

#[derive(Debug, Default)]
pub struct MockExchange {
    pub rules: Option<TradingRules>,
    pub balances: Vec<AssetBalance>,
    pub ping_error: Option<ExchangeError>,
    pub balance_error: Option<ExchangeError>,
    pub submit_error: Option<ExchangeError>,
    pub submitted: RefCell<Vec<OrderTicket>>,
    // shared so a test can still read it after the client is moved away
    pub rules_fetches: Rc<Cell<usize>>,
}

impl MockExchange {
    pub fn with_fixture_rules() -> Self {
        Self {
            rules: TradingRules::from_json(EXCHANGE_INFO_JSON).ok(),
            ..Default::default()
        }
    }

    pub fn submitted(&self) -> Vec<OrderTicket> {
        self.submitted.borrow().clone()
    }
}

impl ExchangeClient for MockExchange {
    fn ping(&self) -> Result<(), ExchangeError> {
        match &self.ping_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn trading_rules(&self) -> Result<TradingRules, ExchangeError> {
        self.rules_fetches.set(self.rules_fetches.get() + 1);
        self.rules
            .clone()
            .ok_or_else(|| ExchangeError::Transport("exchangeInfo unreachable".to_string()))
    }

    fn balances(&self) -> Result<Vec<AssetBalance>, ExchangeError> {
        match &self.balance_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.balances.clone()),
        }
    }

    fn submit_order(&self, ticket: &OrderTicket) -> Result<OrderAck, ExchangeError> {
        if let Some(e) = &self.submit_error {
            return Err(e.clone());
        }

        let mut submitted = self.submitted.borrow_mut();
        submitted.push(ticket.clone());

        Ok(OrderAck {
            order_id: 1000 + submitted.len() as u64,
            symbol: ticket.symbol.to_string(),
            side: ticket.side.to_string(),
            order_type: ticket.order_type.to_string(),
            status: "NEW".to_string(),
        })
    }
}

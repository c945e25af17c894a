use crate::binance::exchange_info::TradingRules;
use crate::binance::symbols::ExchangeInfoResponse;
use crate::core::error::ExchangeError;
use crate::core::types::{ExchangeOrderType, OrderSide as BotOrderSide, TimeInForce as BotTimeInForce};
use crate::exchange::{AssetBalance, ExchangeClient, OrderAck, OrderTicket};
use binance::account::OrderSide;
use binance::api::Binance;
use binance::config::Config;
use binance::errors::{Error as BinanceLibError, ErrorKind as BinanceLibErrorKind};
use binance::futures::account::{CustomOrderRequest, FuturesAccount, OrderType, TimeInForce};
use binance::futures::general::FuturesGeneral;
use log::{debug, info};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// USD-M futures client backed by the `binance` crate (blocking API).
pub struct BinanceFuturesClient {
    general: FuturesGeneral,
    account: FuturesAccount,
}

impl BinanceFuturesClient {
    pub fn new(api_key: String, secret_key: String, futures_endpoint: &str) -> Self {
        let config = Config::default().set_futures_rest_api_endpoint(futures_endpoint);

        info!("futures client configured for {futures_endpoint}");

        Self {
            general: Binance::new_with_config(None, None, &config),
            account: Binance::new_with_config(Some(api_key), Some(secret_key), &config),
        }
    }
}

impl ExchangeClient for BinanceFuturesClient {
    fn ping(&self) -> Result<(), ExchangeError> {
        self.general.ping().map_err(classify_error)?;
        Ok(())
    }

    fn trading_rules(&self) -> Result<TradingRules, ExchangeError> {
        let exchange_info = self.general.exchange_info().map_err(classify_error)?;

        // the crate models filters as a tagged enum; go through JSON so only the
        // fields the normalizer reads have to line up
        let value = serde_json::to_value(&exchange_info)
            .map_err(|e| ExchangeError::Unexpected(format!("cannot encode exchangeInfo: {e}")))?;
        let info: ExchangeInfoResponse = serde_json::from_value(value)
            .map_err(|e| ExchangeError::Unexpected(format!("cannot decode exchangeInfo: {e}")))?;

        Ok(TradingRules::from_exchange_info(info))
    }

    fn balances(&self) -> Result<Vec<AssetBalance>, ExchangeError> {
        let balances = self.account.account_balance().map_err(classify_error)?;

        balances
            .into_iter()
            .map(|b| -> Result<AssetBalance, ExchangeError> {
                Ok(AssetBalance {
                    balance: from_f64(&b.asset, b.balance)?,
                    available: from_f64(&b.asset, b.available_balance)?,
                    asset: b.asset,
                })
            })
            .collect()
    }

    fn submit_order(&self, ticket: &OrderTicket) -> Result<OrderAck, ExchangeError> {
        let request = CustomOrderRequest {
            symbol: ticket.symbol.to_string(),
            side: match ticket.side {
                BotOrderSide::Buy => OrderSide::Buy,
                BotOrderSide::Sell => OrderSide::Sell,
            },
            position_side: None,
            order_type: match ticket.order_type {
                ExchangeOrderType::Market => OrderType::Market,
                ExchangeOrderType::Limit => OrderType::Limit,
                ExchangeOrderType::Stop => OrderType::Stop,
            },
            time_in_force: ticket.time_in_force.map(|tif| match tif {
                BotTimeInForce::GoodTillCancelled => TimeInForce::GTC,
            }),
            qty: Some(to_f64(ticket.quantity)?),
            reduce_only: None,
            price: ticket.price.map(to_f64).transpose()?,
            stop_price: ticket.stop_price.map(to_f64).transpose()?,
            close_position: None,
            activation_price: None,
            callback_rate: None,
            working_type: None,
            price_protect: None,
            new_client_order_id: None,
        };

        debug!("{} sending {} {} order", ticket.symbol, ticket.order_type, ticket.side);

        let t = self.account.custom_order(request).map_err(classify_error)?;

        Ok(OrderAck {
            order_id: t.order_id,
            symbol: ticket.symbol.to_string(),
            side: ticket.side.to_string(),
            order_type: ticket.order_type.to_string(),
            status: t.status,
        })
    }
}

fn to_f64(value: Decimal) -> Result<f64, ExchangeError> {
    value
        .to_f64()
        .ok_or_else(|| ExchangeError::Unexpected(format!("{value} does not fit into f64")))
}

fn from_f64(asset: &str, value: f64) -> Result<Decimal, ExchangeError> {
    Decimal::from_f64(value)
        .ok_or_else(|| ExchangeError::Unexpected(format!("{asset} balance {value} is not a finite number")))
}

fn classify_error(err: BinanceLibError) -> ExchangeError {
    match err.0 {
        BinanceLibErrorKind::BinanceError(response) => ExchangeError::Rejected {
            code: i64::from(response.code),
            msg: response.msg,
        },
        BinanceLibErrorKind::ReqError(e) => ExchangeError::Transport(e.to_string()),
        other => ExchangeError::Unexpected(other.to_string()),
    }
}

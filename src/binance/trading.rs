use crate::binance::object::BinanceObj;
use crate::core::error::{BotError, ExchangeError, Result};
use crate::core::types::{OrderKind, OrderSide, Symbol};
use crate::exchange::{ExchangeClient, OrderAck, OrderTicket};
use log::{debug, error, info, warn};
use rust_decimal::Decimal;

impl<C: ExchangeClient> BinanceObj<C> {
    pub fn place_market_order(
        &self,
        symbol: &Symbol,
        side: OrderSide,
        quantity: Decimal,
    ) -> Result<OrderAck> {
        info!("{symbol} MARKET {side} (request) => qty: {quantity}");
        self.place_order(OrderKind::Market, symbol, side, quantity, None, None)
    }

    pub fn place_limit_order(
        &self,
        symbol: &Symbol,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<OrderAck> {
        info!("{symbol} LIMIT {side} (request) => qty: {quantity}, price: {price}");
        self.place_order(OrderKind::Limit, symbol, side, quantity, Some(price), None)
    }

    pub fn place_stop_limit_order(
        &self,
        symbol: &Symbol,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
        stop_price: Decimal,
    ) -> Result<OrderAck> {
        info!(
            "{symbol} STOP-LIMIT {side} (request) => qty: {quantity}, price: {price}, stop price: {stop_price}"
        );
        self.place_order(
            OrderKind::StopLimit,
            symbol,
            side,
            quantity,
            Some(price),
            Some(stop_price),
        )
    }

    /// Available amount of `asset`, looked up in a fresh balance list.
    pub fn account_balance(&self, asset: &str) -> Result<Decimal> {
        let balances = self.client.balances().map_err(|e| {
            log_exchange_error("balance query", &e);
            BotError::from(e)
        })?;

        match balances.iter().find(|b| b.asset == asset) {
            Some(b) => {
                info!("{asset} balance: {}, available: {}", b.balance, b.available);
                Ok(b.available)
            }
            None => {
                warn!("asset {asset} not found in account balances");
                Err(BotError::AssetNotFound(asset.to_string()))
            }
        }
    }

    fn place_order(
        &self,
        kind: OrderKind,
        symbol: &Symbol,
        side: OrderSide,
        quantity: Decimal,
        price: Option<Decimal>,
        stop_price: Option<Decimal>,
    ) -> Result<OrderAck> {
        let normalized = match self.normalizer.normalize(symbol, quantity, price, stop_price) {
            Ok(n) => n,
            Err(e) => {
                error!("{symbol} {kind} {side} rejected before submission: {e}");
                return Err(e);
            }
        };

        let ticket = OrderTicket {
            symbol: symbol.clone(),
            side,
            order_type: kind.exchange_order_type(),
            quantity: normalized.quantity,
            price: normalized.price,
            stop_price: normalized.stop_price,
            time_in_force: kind.time_in_force(),
        };

        match serde_json::to_string(&ticket) {
            Ok(payload) => debug!("{symbol} order payload: {payload}"),
            Err(e) => warn!("{symbol} cannot encode order payload for the log: {e}"),
        }

        match self.client.submit_order(&ticket) {
            Ok(ack) => {
                info!(
                    "{symbol} {kind} {side} (result) => order_id: [{}], status: [{}], type: [{}]",
                    ack.order_id, ack.status, ack.order_type
                );
                Ok(ack)
            }
            Err(e) => {
                log_exchange_error(&format!("{symbol} {kind} {side} order"), &e);
                Err(e.into())
            }
        }
    }
}

fn log_exchange_error(context: &str, err: &ExchangeError) {
    match err {
        ExchangeError::Rejected { code, msg } => {
            error!("{context}: API error (code {code}): {msg}")
        }
        ExchangeError::Transport(msg) => error!("{context}: request error: {msg}"),
        ExchangeError::Unexpected(msg) => error!("{context}: unexpected error: {msg}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binance::filters::{StepFilter, SymbolFilters};
    use crate::binance::exchange_info::TradingRules;
    use crate::core::mock::MockExchange;
    use crate::core::types::{ExchangeOrderType, FilterPolicy, FilterType, TimeInForce};
    use crate::exchange::AssetBalance;
    use rust_decimal_macros::dec;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn fixture_bot() -> BinanceObj<MockExchange> {
        init_logger();
        BinanceObj::new(MockExchange::with_fixture_rules(), FilterPolicy::Lenient)
    }

    fn bot_with_lot_size(min: Decimal) -> BinanceObj<MockExchange> {
        init_logger();
        let filters = SymbolFilters::new(Symbol::from("TSTUSDT"))
            .with_filter(FilterType::LotSize, StepFilter::new(min, dec!(100), "0.001"));
        let client = MockExchange {
            rules: Some([filters].into_iter().collect::<TradingRules>()),
            ..Default::default()
        };
        BinanceObj::new(client, FilterPolicy::Lenient)
    }

    #[test]
    fn market_order_has_no_price_and_no_tif() {
        let bot = fixture_bot();
        let ack = bot
            .place_market_order(&Symbol::from("BTCUSDT"), OrderSide::Buy, dec!(0.0126))
            .unwrap();
        assert_eq!(ack.order_id, 1001);

        let sent = bot.client.submitted();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].order_type, ExchangeOrderType::Market);
        assert_eq!(sent[0].quantity, dec!(0.013));
        assert_eq!(sent[0].price, None);
        assert_eq!(sent[0].stop_price, None);
        assert_eq!(sent[0].time_in_force, None);
    }

    #[test]
    fn market_order_tiny_quantity_rounds_to_zero() {
        let bot = bot_with_lot_size(dec!(0));
        bot.place_market_order(&Symbol::from("TSTUSDT"), OrderSide::Sell, dec!(0.0001))
            .unwrap();
        assert_eq!(bot.client.submitted()[0].quantity, dec!(0.000));
    }

    #[test]
    fn market_order_below_min_never_reaches_exchange() {
        let bot = bot_with_lot_size(dec!(0.001));
        let res = bot.place_market_order(&Symbol::from("TSTUSDT"), OrderSide::Sell, dec!(0.0001));
        assert!(matches!(res, Err(BotError::OutOfRange { .. })));
        assert!(bot.client.submitted().is_empty());
    }

    #[test]
    fn limit_order_is_gtc_with_rounded_price() {
        let bot = fixture_bot();
        bot.place_limit_order(
            &Symbol::from("ETHUSDT"),
            OrderSide::Sell,
            dec!(1.5),
            dec!(2012.345),
        )
        .unwrap();

        let sent = bot.client.submitted();
        assert_eq!(sent[0].order_type, ExchangeOrderType::Limit);
        assert_eq!(sent[0].time_in_force, Some(TimeInForce::GoodTillCancelled));
        assert_eq!(sent[0].quantity, dec!(1.5));
        assert_eq!(sent[0].price, Some(dec!(2012.35)));
        assert_eq!(sent[0].stop_price, None);
    }

    #[test]
    fn stop_limit_order_goes_out_as_stop_gtc() {
        let bot = fixture_bot();
        let ack = bot
            .place_stop_limit_order(
                &Symbol::from("BTCUSDT"),
                OrderSide::Buy,
                dec!(0.0105),
                dec!(30100.04),
                dec!(30000.06),
            )
            .unwrap();
        assert_eq!(ack.order_type, "STOP");

        let sent = bot.client.submitted();
        assert_eq!(
            sent[0],
            OrderTicket {
                symbol: Symbol::from("BTCUSDT"),
                side: OrderSide::Buy,
                order_type: ExchangeOrderType::Stop,
                quantity: dec!(0.011),
                price: Some(dec!(30100.04)),
                stop_price: Some(dec!(30000.06)),
                time_in_force: Some(TimeInForce::GoodTillCancelled),
            }
        );
    }

    #[test]
    fn stop_limit_with_bad_stop_price_is_rejected_whole() {
        let bot = fixture_bot();
        let res = bot.place_stop_limit_order(
            &Symbol::from("BTCUSDT"),
            OrderSide::Buy,
            dec!(0.01),
            dec!(30000),
            dec!(1),
        );
        assert!(res.is_err());
        assert!(bot.client.submitted().is_empty());
    }

    #[test]
    fn unknown_symbol_is_rejected_without_call() {
        let bot = fixture_bot();
        let res = bot.place_limit_order(&Symbol::from("ABCUSDT"), OrderSide::Buy, dec!(1), dec!(1));
        assert!(matches!(res, Err(BotError::UnknownSymbol(_))));
        assert!(bot.client.submitted().is_empty());
    }

    #[test]
    fn exchange_rejection_carries_code_and_message() {
        init_logger();
        let client = MockExchange {
            submit_error: Some(ExchangeError::Rejected {
                code: -2019,
                msg: "Margin is insufficient.".to_string(),
            }),
            ..MockExchange::with_fixture_rules()
        };
        let bot = BinanceObj::new(client, FilterPolicy::Lenient);

        let res = bot.place_market_order(&Symbol::from("BTCUSDT"), OrderSide::Buy, dec!(0.01));
        let err = res.unwrap_err();
        assert!(matches!(
            &err,
            BotError::Exchange(ExchangeError::Rejected { code: -2019, .. })
        ));
        let text = err.to_string();
        assert!(text.contains("-2019"));
        assert!(text.contains("Margin is insufficient."));
    }

    #[test]
    fn transport_failure_gives_no_order() {
        init_logger();
        let client = MockExchange {
            submit_error: Some(ExchangeError::Transport("connection reset".to_string())),
            ..MockExchange::with_fixture_rules()
        };
        let bot = BinanceObj::new(client, FilterPolicy::Lenient);

        let res = bot.place_limit_order(&Symbol::from("BTCUSDT"), OrderSide::Sell, dec!(0.01), dec!(40000));
        assert!(matches!(res, Err(BotError::Exchange(ExchangeError::Transport(_)))));
    }

    #[test]
    fn balance_lookup_returns_available_amount() {
        init_logger();
        let client = MockExchange {
            balances: vec![
                AssetBalance {
                    asset: "BNB".to_string(),
                    balance: dec!(0),
                    available: dec!(0),
                },
                AssetBalance {
                    asset: "USDT".to_string(),
                    balance: dec!(15000),
                    available: dec!(14872.25),
                },
            ],
            ..Default::default()
        };
        let bot = BinanceObj::new(client, FilterPolicy::Lenient);

        assert_eq!(bot.account_balance("USDT").unwrap(), dec!(14872.25));
        assert!(matches!(
            bot.account_balance("BUSD"),
            Err(BotError::AssetNotFound(a)) if a == "BUSD"
        ));
    }

    #[test]
    fn balance_client_error_is_reported() {
        init_logger();
        let client = MockExchange {
            balance_error: Some(ExchangeError::Rejected {
                code: -2015,
                msg: "Invalid API-key, IP, or permissions for action.".to_string(),
            }),
            ..Default::default()
        };
        let bot = BinanceObj::new(client, FilterPolicy::Lenient);
        assert!(matches!(
            bot.account_balance("USDT"),
            Err(BotError::Exchange(ExchangeError::Rejected { code: -2015, .. }))
        ));
    }
}

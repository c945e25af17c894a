use crate::binance::exchange_info::FilterExtractor;
use crate::binance::object::BinanceObj;
use crate::binance::prices::ParameterNormalizer;
use crate::core::error::Result;
use crate::core::types::FilterPolicy;
use crate::exchange::ExchangeClient;
use log::{error, info, warn};

impl<C: ExchangeClient> BinanceObj<C> {
    /// Checks connectivity first; an unreachable exchange is the one startup
    /// failure that stops the bot before any rules are fetched.
    pub fn connect(client: C, policy: FilterPolicy) -> Result<Self> {
        if let Err(e) = client.ping() {
            error!("exchange client initialization failed: {e}");
            return Err(e.into());
        }

        info!("exchange reachable");
        Ok(Self::new(client, policy))
    }

    /// Fetches the trading rules once. A failed fetch is not fatal: the bot
    /// starts anyway and every order is rejected by the normalizer.
    pub fn new(client: C, policy: FilterPolicy) -> Self {
        info!("fetching exchangeInfo...");

        let rules = match client.trading_rules() {
            Ok(rules) => {
                info!("exchangeInfo fetched, {} symbols cached", rules.len());
                Some(rules)
            }
            Err(e) => {
                error!("cannot fetch exchangeInfo: {e}");
                warn!("no trading rules loaded - all orders will be rejected");
                None
            }
        };

        info!("order bot initialized (filter policy: {policy}).");

        Self {
            client,
            normalizer: ParameterNormalizer::new(FilterExtractor::new(rules), policy),
        }
    }
}

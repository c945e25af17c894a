use crate::binance::filters::SymbolFilters;
use crate::binance::symbols::ExchangeInfoResponse;
use crate::core::error::{BotError, Result};
use crate::core::types::Symbol;
use log::{debug, error, info};
use std::collections::HashMap;

/// Snapshot of the exchange trading rules, taken once and never refreshed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradingRules {
    symbols: HashMap<Symbol, SymbolFilters>,
}

impl TradingRules {
    /// Only symbols in TRADING status are kept; orders for the others are
    /// rejected as unknown.
    pub fn from_exchange_info(info: ExchangeInfoResponse) -> Self {
        let total = info.symbols.len();

        let rules: TradingRules = info
            .symbols
            .into_iter()
            .filter(|s| {
                let trading = s.status == "TRADING";
                if !trading {
                    debug!("{} skipped, status: {}", s.symbol, s.status);
                }
                trading
            })
            .map(|s| SymbolFilters::from_filters(Symbol(s.symbol), &s.filters))
            .collect();

        info!(
            "exchangeInfo data processed, symbols found: {total}, trading: {}",
            rules.len()
        );

        rules
    }

    #[cfg(test)]
    pub fn from_json(data: &str) -> Result<Self> {
        let info: ExchangeInfoResponse = serde_json::from_str(data)?;
        Ok(Self::from_exchange_info(info))
    }

    pub fn insert(&mut self, filters: SymbolFilters) {
        self.symbols.insert(filters.symbol.clone(), filters);
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&SymbolFilters> {
        self.symbols.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

}

impl FromIterator<SymbolFilters> for TradingRules {
    fn from_iter<I: IntoIterator<Item = SymbolFilters>>(iter: I) -> Self {
        let mut rules = TradingRules::default();
        for filters in iter {
            rules.insert(filters);
        }
        rules
    }
}

/// Lookup of per-symbol filters over the cached rules. `None` means the rules
/// could not be loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct FilterExtractor {
    rules: Option<TradingRules>,
}

impl FilterExtractor {
    pub fn new(rules: Option<TradingRules>) -> Self {
        Self { rules }
    }

    #[cfg(test)]
    pub fn rules(&self) -> Option<&TradingRules> {
        self.rules.as_ref()
    }

    pub fn extract(&self, symbol: &Symbol) -> Result<&SymbolFilters> {
        let rules = match &self.rules {
            Some(r) => r,
            None => {
                error!("{symbol} => trading rules were not loaded, cannot get filters");
                return Err(BotError::RulesUnavailable);
            }
        };

        match rules.get(symbol) {
            Some(filters) => Ok(filters),
            None => {
                error!("{symbol} => symbol not found in exchange info");
                Err(BotError::UnknownSymbol(symbol.clone()))
            }
        }
    }
}

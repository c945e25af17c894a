use crate::binance::symbols::Filter;
use crate::core::types::{FilterType, Symbol};
use log::warn;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

/// Inclusive bounds plus the step granularity, kept exactly as the exchange wrote it.
/// The count of digits after the decimal point of `step` is the rounding precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFilter {
    pub min: Decimal,
    pub max: Decimal,
    pub step: String,
}

/// All filters published for one symbol, by filter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolFilters {
    pub symbol: Symbol,
    pub filters: HashMap<FilterType, StepFilter>,
}

impl StepFilter {
    pub fn new(min: Decimal, max: Decimal, step: &str) -> Self {
        Self {
            min,
            max,
            step: step.to_string(),
        }
    }

    pub fn contains(&self, value: Decimal) -> bool {
        self.min <= value && value <= self.max
    }
}

impl SymbolFilters {
    #[cfg(test)]
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            filters: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_filter(mut self, filter_type: FilterType, filter: StepFilter) -> Self {
        self.filters.insert(filter_type, filter);
        self
    }

    pub fn get(&self, filter_type: FilterType) -> Option<&StepFilter> {
        self.filters.get(&filter_type)
    }

    #[cfg(test)]
    pub fn lot_size(&self) -> Option<&StepFilter> {
        self.get(FilterType::LotSize)
    }

    #[cfg(test)]
    pub fn price_filter(&self) -> Option<&StepFilter> {
        self.get(FilterType::PriceFilter)
    }

    #[cfg(test)]
    pub fn market_lot_size(&self) -> Option<&StepFilter> {
        self.get(FilterType::MarketLotSize)
    }

    /// Picks PRICE_FILTER, LOT_SIZE and MARKET_LOT_SIZE out of the raw list.
    /// Other filter types are ignored; an entry with unusable bounds is skipped.
    pub fn from_filters(symbol: Symbol, raw: &[Filter]) -> Self {
        let mut filters = HashMap::new();

        for line in raw.iter() {
            let filter_type = match FilterType::from_str(&line.filter_type) {
                Ok(t) => t,
                Err(_) => continue,
            };

            let (min, max, step) = match filter_type {
                FilterType::PriceFilter => (&line.min_price, &line.max_price, &line.tick_size),
                FilterType::LotSize | FilterType::MarketLotSize => {
                    (&line.min_qty, &line.max_qty, &line.step_size)
                }
            };

            match (parse_bound(min), parse_bound(max)) {
                (Some(min), Some(max)) => {
                    let step = step.as_deref().unwrap_or_default().trim();
                    filters.insert(filter_type, StepFilter::new(min, max, step));
                }
                _ => {
                    warn!("{symbol} => {filter_type}: unusable bounds min={min:?} max={max:?}, filter skipped");
                }
            }
        }

        Self { symbol, filters }
    }
}

fn parse_bound(value: &Option<String>) -> Option<Decimal> {
    value
        .as_deref()
        .and_then(|v| Decimal::from_str(v.trim()).ok())
}

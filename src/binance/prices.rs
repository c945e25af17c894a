use crate::binance::exchange_info::FilterExtractor;
use crate::binance::filters::{StepFilter, SymbolFilters};
use crate::core::error::{BotError, Result};
use crate::core::types::{FilterPolicy, FilterType, OrderField, Symbol};
use log::{debug, info, warn};
use rust_decimal::{Decimal, RoundingStrategy};

/// Quantity, price and stop price after filter validation and rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalized {
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
}

// number of fractional digits a step string allows: "0.001" => 3, "1" => 0, "" => None
pub fn step_precision(step: &str) -> Option<u32> {
    let step = step.trim();
    if step.is_empty() {
        return None;
    }

    match step.split_once('.') {
        Some((_, fraction)) => Some(fraction.len() as u32),
        None => Some(0),
    }
}

pub fn round_to_step(value: Decimal, step: &str) -> Decimal {
    match step_precision(step) {
        Some(dp) => value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        None => value,
    }
}

/// Validates every present field of an order against the cached filters and
/// rounds it to the step granularity. Any violation rejects the whole order.
#[derive(Debug, Clone, Default)]
pub struct ParameterNormalizer {
    extractor: FilterExtractor,
    policy: FilterPolicy,
}

impl ParameterNormalizer {
    pub fn new(extractor: FilterExtractor, policy: FilterPolicy) -> Self {
        Self { extractor, policy }
    }

    #[cfg(test)]
    pub fn extractor(&self) -> &FilterExtractor {
        &self.extractor
    }

    #[cfg(test)]
    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    pub fn normalize(
        &self,
        symbol: &Symbol,
        quantity: Decimal,
        price: Option<Decimal>,
        stop_price: Option<Decimal>,
    ) -> Result<Normalized> {
        let filters = self.extractor.extract(symbol)?;

        let quantity = self.process_field(filters, FilterType::LotSize, OrderField::Quantity, quantity)?;

        let price = price
            .map(|p| self.process_field(filters, FilterType::PriceFilter, OrderField::Price, p))
            .transpose()?;

        let stop_price = stop_price
            .map(|p| self.process_field(filters, FilterType::PriceFilter, OrderField::StopPrice, p))
            .transpose()?;

        info!("{symbol} => normalized quantity: {quantity}, price: {price:?}, stop price: {stop_price:?}");

        Ok(Normalized {
            quantity,
            price,
            stop_price,
        })
    }

    fn process_field(
        &self,
        filters: &SymbolFilters,
        filter_type: FilterType,
        field: OrderField,
        value: Decimal,
    ) -> Result<Decimal> {
        let symbol = &filters.symbol;

        match filters.get(filter_type) {
            Some(filter) => check_and_round(symbol, field, value, filter),
            None => match self.policy {
                FilterPolicy::Lenient => {
                    warn!("{symbol} => no {filter_type} filter, {field} {value} passed without validation");
                    Ok(value)
                }
                FilterPolicy::Strict => {
                    warn!("{symbol} => no {filter_type} filter, {field} {value} rejected (strict policy)");
                    Err(BotError::MissingFilter {
                        symbol: symbol.clone(),
                        filter: filter_type,
                        field,
                    })
                }
            },
        }
    }
}

// range check runs on the raw value, rounding comes after and never rejects
fn check_and_round(
    symbol: &Symbol,
    field: OrderField,
    value: Decimal,
    filter: &StepFilter,
) -> Result<Decimal> {
    if !filter.contains(value) {
        warn!(
            "{symbol} => {field}: {value}: filter violation, allowed range [{}, {}]",
            filter.min, filter.max
        );
        return Err(BotError::OutOfRange {
            symbol: symbol.clone(),
            field,
            value,
            min: filter.min,
            max: filter.max,
        });
    }

    let rounded = round_to_step(value, &filter.step);
    if rounded != value {
        debug!("{symbol} => {field} rounded from {value} to {rounded} (step {})", filter.step);
    }

    Ok(rounded)
}

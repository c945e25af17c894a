use serde::*;

/// The subset of the futures `exchangeInfo` payload the bot needs.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeInfoResponse {
    #[serde(default)]
    pub symbols: Vec<BinanceSymbol>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceSymbol {
    pub symbol: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub filters: Vec<Filter>,
}

// one entry of "filters": [], fields depend on filterType
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(alias = "filter_type")]
    pub filter_type: String,
    #[serde(alias = "max_price")]
    pub max_price: Option<String>,
    #[serde(alias = "min_price")]
    pub min_price: Option<String>,
    #[serde(alias = "tick_size")]
    pub tick_size: Option<String>,
    #[serde(alias = "max_qty")]
    pub max_qty: Option<String>,
    #[serde(alias = "min_qty")]
    pub min_qty: Option<String>,
    #[serde(alias = "step_size")]
    pub step_size: Option<String>,
}

use crate::binance::prices::ParameterNormalizer;
use crate::exchange::ExchangeClient;

/// Order facade: validates every order against the cached trading rules
/// before it reaches the exchange client.
pub struct BinanceObj<C: ExchangeClient> {
    pub client: C,
    pub normalizer: ParameterNormalizer,
}

//! Price oracle port trait.

use crate::domain::error::TradefloorError;

/// A source of share prices.
///
/// The contract: `Ok(0.0)` means the provider definitively does not
/// recognize the symbol; `Err(..)` means the provider could not answer at
/// all (and a caller may try another provider). A non-zero price is the
/// best available value, whether realtime, end-of-day or synthetic.
pub trait PricePort: Send + Sync {
    /// Short provider name used in diagnostics.
    fn name(&self) -> &'static str;

    fn get_price(&self, symbol: &str) -> Result<f64, TradefloorError>;
}

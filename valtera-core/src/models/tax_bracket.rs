use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a progressive schedule: income above `threshold` (up to the
/// next bracket's threshold) is taxed at `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub threshold: Decimal,
    /// Marginal rate as a fraction (e.g. 0.16 for 16%).
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        threshold: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { threshold, rate }
    }
}

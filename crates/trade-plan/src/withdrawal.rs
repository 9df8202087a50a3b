//! Per-asset withdrawal evaluation.
//!
//! Only the configuration shape and the evaluation hook exist so far;
//! no withdrawal is ever submitted.

use kraken_rest::KrakenClient;
use rust_decimal::Decimal;

/// One asset's withdrawal settings.
pub struct Withdrawal {
    asset: String,
    threshold: Decimal,
    address: String,
    amount: Option<Decimal>,
}

impl Withdrawal {
    /// Create a withdrawal entry for one configured asset.
    pub fn new(
        asset: String,
        threshold: Decimal,
        address: String,
        amount: Option<Decimal>,
    ) -> Self {
        Self {
            asset,
            threshold,
            address,
            amount,
        }
    }

    /// The asset this entry watches.
    pub fn asset(&self) -> &str {
        &self.asset
    }

    /// Evaluate this withdrawal against the cached balance snapshot.
    ///
    /// TODO: once the balance exceeds the threshold, submit a
    /// WithdrawAddFunds call for `amount` (or the balance above the
    /// threshold) to `address`. Until then this only reports what it
    /// sees.
    pub fn evaluate(&self, client: &KrakenClient) {
        tracing::debug!(asset = %self.asset, address = %self.address, "evaluating withdrawal");

        if let Some(balance) = client.cached_balance(&self.asset) {
            tracing::trace!(
                asset = %self.asset,
                balance = %balance,
                threshold = %self.threshold,
                amount = ?self.amount,
                "balance snapshot"
            );
        }
    }
}

impl std::fmt::Debug for Withdrawal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Withdrawal")
            .field("asset", &self.asset)
            .field("threshold", &self.threshold)
            .field("address", &self.address)
            .field("amount", &self.amount)
            .finish()
    }
}

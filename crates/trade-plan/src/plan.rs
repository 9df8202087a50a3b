//! Per-pair trade plan evaluation.

use crate::decision::{decide, Decision, RetryPolicy};
use crate::error::TradePlanError;
use crate::userref::user_ref;
use kraken_rest::{KrakenClient, KrakenError, Order};
use rust_decimal::Decimal;
use std::time::Duration;

/// One trading pair's plan and retained state.
///
/// The only state carried between cycles is the most recent closed
/// order as last observed and the timestamp of the last local
/// submission failure. Neither is persisted: after a restart the order
/// history is re-derived from the exchange, while failure-retry memory
/// is lost (there is no exchange-side trace of a submission that never
/// created an order).
pub struct TradePlan {
    pair: String,
    amount: Decimal,
    interval: Duration,
    user_ref: i32,
    last_order: Option<Order>,
    last_failed: Option<f64>,
}

impl TradePlan {
    /// Create a plan for one configured pair.
    ///
    /// The order reference is derived from the API key and the pair,
    /// so it is identical on every run with the same configuration.
    pub fn new(pair: String, amount: Decimal, interval: Duration, api_key: &str) -> Self {
        let user_ref = user_ref(api_key, &pair);

        Self {
            pair,
            amount,
            interval,
            user_ref,
            last_order: None,
            last_failed: None,
        }
    }

    /// The trading pair this plan manages.
    pub fn pair(&self) -> &str {
        &self.pair
    }

    /// The order reference tagged onto all of this plan's orders.
    pub fn user_ref(&self) -> i32 {
        self.user_ref
    }

    /// Evaluate this plan for one cycle and submit an order if due.
    ///
    /// Steps, in order:
    ///
    /// 1. Open-order guard: any open order carrying this plan's
    ///    reference skips the cycle with a plan-local error.
    /// 2. History refresh: the closed order with the greatest close
    ///    timestamp becomes the new `last_order`.
    /// 3. The decision chain picks open or skip.
    /// 4. On open: clear the failure marker and submit a market buy.
    ///    A submission rejected by the exchange records the failure
    ///    timestamp and succeeds (the retry window picks it up next
    ///    cycle); transport failures propagate.
    pub async fn evaluate(
        &mut self,
        client: &KrakenClient,
        retry: &RetryPolicy,
        test_mode: bool,
    ) -> Result<(), TradePlanError> {
        tracing::debug!(pair = %self.pair, userref = self.user_ref, "evaluating trade plan");

        let open = client.open_orders(self.user_ref).await?;
        if !open.open.is_empty() {
            return Err(TradePlanError::StillOpenOrders {
                pair: self.pair.clone(),
                count: open.open.len(),
            });
        }

        let closed = client.closed_orders(self.user_ref).await?;
        self.last_order = closed
            .closed
            .into_values()
            .max_by(|a, b| a.closetm.total_cmp(&b.closetm));

        let now = common::epoch_secs();
        let decision = decide(
            &self.pair,
            now,
            self.last_order.as_ref(),
            self.last_failed,
            self.interval,
            retry,
        )?;

        match decision {
            Decision::Skip { reason } => {
                tracing::debug!(pair = %self.pair, reason = %reason, "not ordering");
                Ok(())
            }
            Decision::Open { reason } => {
                tracing::info!(pair = %self.pair, reason = %reason, "opening order");
                self.last_failed = None;

                match client
                    .add_market_buy(&self.pair, self.user_ref, self.amount, test_mode)
                    .await
                {
                    Ok(confirmation) => {
                        tracing::info!(
                            pair = %self.pair,
                            order = %confirmation.descr.order,
                            txid = ?confirmation.txid,
                            "order submitted"
                        );
                        Ok(())
                    }
                    Err(KrakenError::Response(message)) => {
                        // The exchange rejected the order, so nothing was
                        // created; remember the failure locally and let the
                        // retry window govern the next cycles.
                        tracing::warn!(pair = %self.pair, error = %message, "order submission failed");
                        self.last_failed = Some(now);
                        Ok(())
                    }
                    Err(other) => Err(other.into()),
                }
            }
        }
    }
}

impl std::fmt::Debug for TradePlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradePlan")
            .field("pair", &self.pair)
            .field("amount", &self.amount)
            .field("interval", &self.interval)
            .field("user_ref", &self.user_ref)
            .field("last_failed", &self.last_failed)
            .finish()
    }
}

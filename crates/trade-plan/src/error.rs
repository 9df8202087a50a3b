//! Trade plan error types.

use kraken_rest::{KrakenError, OrderStatus};
use thiserror::Error;

/// Errors raised while evaluating a trade plan.
#[derive(Debug, Error)]
pub enum TradePlanError {
    /// The pair still has open orders from a previous cycle; nothing
    /// may be submitted until they settle.
    #[error("trade plan {pair} still has {count} open order(s)")]
    StillOpenOrders {
        /// Trading pair.
        pair: String,
        /// Number of open orders found.
        count: usize,
    },

    /// The most recent closed order reports a status the decision
    /// chain cannot reason about. This is an API contract violation,
    /// not a transient condition.
    #[error("trade plan {pair}: unexpected closed-order status {status}")]
    UnexpectedStatus {
        /// Trading pair.
        pair: String,
        /// The offending status.
        status: OrderStatus,
    },

    /// The exchange or transport failed during a query or submission.
    #[error(transparent)]
    Exchange(#[from] KrakenError),
}

impl TradePlanError {
    /// Whether this is a plan-local fault.
    ///
    /// Plan-local faults are caught per plan by the runner and only
    /// skip the current cycle for that pair; exchange faults propagate
    /// and abort the whole cycle.
    pub fn is_plan_fault(&self) -> bool {
        !matches!(self, Self::Exchange(_))
    }
}

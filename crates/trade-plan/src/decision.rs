//! The order decision chain.
//!
//! Pure time-window arithmetic over the plan's last known order and
//! its last local submission failure. Keeping this free of I/O makes
//! every branch of the chain directly testable.

use crate::error::TradePlanError;
use kraken_rest::{Order, OrderStatus};
use std::time::Duration;

/// Runner-wide retry policy shared by all trade plans.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Minimum wait before a failed or abnormal occurrence is retried.
    pub interval: Duration,
    /// Ceiling after which the occurrence is abandoned.
    pub timeout: Duration,
}

/// Outcome of one evaluation: place an order now, or sit this cycle out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Submit an order this cycle.
    Open {
        /// Which branch of the chain fired.
        reason: String,
    },
    /// Do nothing this cycle.
    Skip {
        /// Which branch of the chain fired.
        reason: String,
    },
}

impl Decision {
    fn open(reason: impl Into<String>) -> Self {
        Self::Open {
            reason: reason.into(),
        }
    }

    fn skip(reason: impl Into<String>) -> Self {
        Self::Skip {
            reason: reason.into(),
        }
    }

    /// Whether an order should be submitted.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// The branch explanation, for logging.
    pub fn reason(&self) -> &str {
        match self {
            Self::Open { reason } | Self::Skip { reason } => reason,
        }
    }
}

/// Evaluate the decision chain for one pair.
///
/// Strict priority order, first match wins:
///
/// 1. A recorded local submission failure delegates to the retry
///    sub-decision (the exchange never created an order, so there is
///    no exchange-side trace to reason from).
/// 2. No previous order at all: open (first run for this pair).
/// 3. A non-terminal status on a *closed* order is a contract
///    violation: error.
/// 4. The pair interval has elapsed since the last close: open,
///    regardless of how that order ended.
/// 5. The last order closed normally: wait out the interval.
/// 6. The last order was canceled or expired: retry sub-decision.
///
/// All timestamps are epoch seconds.
pub fn decide(
    pair: &str,
    now: f64,
    last_order: Option<&Order>,
    last_failed: Option<f64>,
    interval: Duration,
    retry: &RetryPolicy,
) -> Result<Decision, TradePlanError> {
    if let Some(failed_at) = last_failed {
        return Ok(retry_decision(now, failed_at, "failed opening", retry));
    }

    let Some(order) = last_order else {
        return Ok(Decision::open("no previous order"));
    };

    if !order.status.is_terminal() {
        return Err(TradePlanError::UnexpectedStatus {
            pair: pair.to_string(),
            status: order.status,
        });
    }

    if now >= order.closetm + interval.as_secs_f64() {
        return Ok(Decision::open("interval exceeded"));
    }

    match order.status {
        OrderStatus::Closed => Ok(Decision::skip("interval not yet exceeded")),
        status => Ok(retry_decision(now, order.closetm, status.as_str(), retry)),
    }
}

/// Retry sub-decision for a failed or abnormally closed occurrence.
///
/// The occurrence is abandoned once the retry timeout has passed,
/// retried once the retry interval has passed, and otherwise left to
/// cool down.
fn retry_decision(now: f64, occurred_at: f64, label: &str, retry: &RetryPolicy) -> Decision {
    if now > occurred_at + retry.timeout.as_secs_f64() {
        Decision::skip(format!("{label}: retry timeout exceeded"))
    } else if now >= occurred_at + retry.interval.as_secs_f64() {
        Decision::open(format!("{label}: retry interval exceeded"))
    } else {
        Decision::skip(format!("{label}: retry interval not yet exceeded"))
    }
}

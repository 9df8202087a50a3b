//! Per-pair trade plans and the order decision chain.
//!
//! One `TradePlan` instance exists per configured trading pair. Each
//! runner cycle it queries the exchange for open and closed orders
//! carrying its order reference, feeds the result through a pure
//! decision chain, and submits a market buy when the chain says so.
//!
//! The decision chain distinguishes three situations that need
//! different cooldowns:
//!
//! - a submission that failed locally without the exchange ever
//!   creating an order (retried within the retry window),
//! - an order the exchange closed abnormally (canceled/expired, also
//!   retried within the retry window),
//! - a healthy closed order that is simply waiting out the configured
//!   pair interval.
//!
//! An elapsed pair interval always wins over a stale abnormal state so
//! a plan cannot stay wedged once enough wall-clock time has passed.

mod decision;
mod error;
mod plan;
mod userref;
mod withdrawal;

pub use decision::{decide, Decision, RetryPolicy};
pub use error::TradePlanError;
pub use plan::TradePlan;
pub use userref::user_ref;
pub use withdrawal::Withdrawal;

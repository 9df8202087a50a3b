//! Top-level error type of the cryptobob binary.

use auth::AuthError;
use config::ConfigError;
use kraken_rest::KrakenError;
use thiserror::Error;
use trade_plan::TradePlanError;

/// Any failure that can reach the program boundary.
///
/// The boundary prints exactly one `ERROR: ...` line to stderr and
/// exits non-zero; the variants only preserve where the message came
/// from.
#[derive(Debug, Error)]
pub enum CryptoBobError {
    /// Configuration missing or invalid (fatal at startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Credential or OTP failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Exchange or transport failure outside plan evaluation.
    #[error(transparent)]
    Exchange(#[from] KrakenError),

    /// Trade plan failure that escaped per-plan isolation.
    #[error(transparent)]
    TradePlan(#[from] TradePlanError),
}

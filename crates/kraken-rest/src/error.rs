//! Kraken REST API error types.

use auth::AuthError;
use rest_client::RestError;
use thiserror::Error;

/// Errors that can occur when interacting with the Kraken REST API.
#[derive(Debug, Error)]
pub enum KrakenError {
    /// Transport-level error (network, timeout, HTTP status, JSON).
    #[error("REST client error: {0}")]
    Rest(#[from] RestError),

    /// Authentication error (key decoding, OTP generation).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The exchange answered with a non-empty error list.
    #[error("exchange error: {0}")]
    Response(String),

    /// The exchange is not online (maintenance or degraded mode).
    #[error("system status is {0:?}")]
    Status(String),

    /// The envelope carried neither errors nor a result payload.
    #[error("response envelope carried no result")]
    EmptyResult,

    /// A payload value could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),
}

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The private key is not valid base64.
    #[error("private key is not valid base64: {0}")]
    InvalidPrivateKey(String),

    /// The OTP URI could not be parsed.
    #[error("invalid OTP URI: {0}")]
    InvalidOtpUri(String),

    /// The system clock failed while generating an OTP code.
    #[error("failed to generate OTP code: {0}")]
    OtpGeneration(String),
}

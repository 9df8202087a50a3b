//! Authentication and request signing for the Kraken REST API.
//!
//! This crate owns the credential material (API key, base64-decoded
//! private key, optional OTP URI) and produces signed private requests:
//!
//! - **Secure credentials**: the private key and OTP URI are wrapped in
//!   `secrecy` types so they cannot leak through Debug output and are
//!   zeroed on drop.
//! - **Kraken signing scheme**: `HMAC-SHA512(private_key,
//!   path ++ SHA256(nonce ++ encoded_body))`, base64-encoded into the
//!   `API-Sign` header.
//! - **One-time passwords**: time-based codes generated from an
//!   `otpauth://` URI for accounts with 2FA enabled on the API key.

mod credentials;
mod error;
mod otp;
mod signer;

pub use credentials::Credentials;
pub use error::AuthError;
pub use otp::current_code;
pub use signer::{RequestSigner, SignedRequest};

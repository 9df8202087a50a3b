//! Generic REST client wrapper around reqwest.
//!
//! The exchange client builds on two primitives: plain GET requests for
//! public endpoints and form-encoded POST requests for private ones.
//! Private bodies arrive pre-encoded because their exact bytes are
//! covered by the request signature, so the POST path transmits them
//! unmodified.

mod client;
mod error;

pub use client::RestClient;
pub use error::RestError;

//! Kraken REST API client.
//!
//! This crate provides a typed client for the Kraken REST API with:
//!
//! - **Envelope decoding**: every payload arrives as
//!   `{"error": [...], "result": ...}`; a non-empty error list becomes a
//!   typed error carrying the joined messages.
//! - **Public/private routing**: a fixed allow-list of public actions;
//!   everything else is signed through the `auth` crate.
//! - **Order management**: open/closed order queries filtered by a
//!   caller-supplied order reference, and market buy submission with an
//!   exchange-side validate (dry-run) flag.
//! - **Balance snapshot**: an account balance cache refreshed once per
//!   runner cycle and read by withdrawal evaluation.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::Credentials;
//! use kraken_rest::KrakenClient;
//!
//! let credentials = Credentials::new(api_key, private_key_b64, None)?;
//! let client = KrakenClient::new(credentials)?;
//!
//! client.assert_online_status().await?;
//! let closed = client.closed_orders(user_ref).await?;
//! ```

mod client;
mod error;
mod responses;

pub use client::KrakenClient;
pub use error::KrakenError;
pub use responses::{
    AddOrder, AddOrderDescription, AssetInfo, Assets, ClosedOrders, KrakenResponse, OpenOrders,
    Order, OrderDescription, OrderStatus, SystemStatus,
};

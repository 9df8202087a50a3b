//! Kraken REST API client.

use crate::error::KrakenError;
use crate::responses::{AddOrder, Assets, ClosedOrders, KrakenResponse, OpenOrders, SystemStatus};
use auth::{Credentials, RequestSigner};
use parking_lot::RwLock;
use rest_client::RestClient;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

/// Base URL of the Kraken REST API.
const API_BASE_URL: &str = "https://api.kraken.com";

/// Request timeout for Kraken API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request.
const USER_AGENT: &str = "CryptoBob";

/// Actions served unauthenticated; everything else is signed.
const PUBLIC_ACTIONS: &[&str] = &["SystemStatus", "Assets"];

/// Kraken REST API client with authentication support.
///
/// Owns the credentials and a balance snapshot that the runner refreshes
/// once per cycle. All other state is per-request.
pub struct KrakenClient {
    rest: RestClient,
    credentials: Credentials,
    balances: RwLock<HashMap<String, Decimal>>,
}

impl KrakenClient {
    /// Create a new Kraken REST client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(credentials: Credentials) -> Result<Self, KrakenError> {
        let rest = RestClient::new(API_BASE_URL, REQUEST_TIMEOUT)?;

        Ok(Self {
            rest,
            credentials,
            balances: RwLock::new(HashMap::new()),
        })
    }

    /// Get the API key (for deriving order references and logging).
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Execute one API call and unwrap the response envelope.
    ///
    /// Routing is decided by the fixed public allow-list: public actions
    /// go out as plain GETs, private actions are signed and POSTed.
    async fn request<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &[(&str, String)],
    ) -> Result<T, KrakenError> {
        if PUBLIC_ACTIONS.contains(&action) {
            let path = format!("/0/public/{action}");
            return Self::public_request(&self.rest, &path).await;
        }

        let path = format!("/0/private/{action}");
        let signer = RequestSigner::new(&self.credentials);
        let signed = signer.sign(&path, params)?;

        tracing::debug!(action = %action, "private request");

        let headers = [
            ("User-Agent", USER_AGENT),
            ("API-Key", self.credentials.api_key()),
            ("API-Sign", signed.signature.as_str()),
        ];

        let envelope: KrakenResponse<T> = self
            .rest
            .post_form(&path, &signed.body, Some(&headers))
            .await?;

        Self::unwrap_envelope(envelope)
    }

    /// Execute an unauthenticated GET against a public path.
    async fn public_request<T: DeserializeOwned>(
        rest: &RestClient,
        path: &str,
    ) -> Result<T, KrakenError> {
        tracing::debug!(path = %path, "public request");

        let envelope: KrakenResponse<T> = rest.get(path, Some(&[("User-Agent", USER_AGENT)])).await?;

        Self::unwrap_envelope(envelope)
    }

    /// Turn the exchange's error list into a typed error, or hand the
    /// result payload to the caller.
    fn unwrap_envelope<T>(envelope: KrakenResponse<T>) -> Result<T, KrakenError> {
        if !envelope.error.is_empty() {
            return Err(KrakenError::Response(envelope.error.join(", ")));
        }

        envelope.result.ok_or(KrakenError::EmptyResult)
    }

    // ========================================================================
    // System
    // ========================================================================

    /// Current system status of the exchange.
    ///
    /// GET /0/public/SystemStatus
    pub async fn system_status(&self) -> Result<SystemStatus, KrakenError> {
        self.request("SystemStatus", &[]).await
    }

    /// Assert that the exchange status is `online`.
    ///
    /// This is the per-cycle precondition check: anything else
    /// (`maintenance`, `cancel_only`, ...) fails with a Status error
    /// that aborts the whole cycle.
    pub async fn assert_online_status(&self) -> Result<(), KrakenError> {
        tracing::debug!("asserting online system status");

        let status = self.system_status().await?;
        if status.status != "online" {
            return Err(KrakenError::Status(status.status));
        }

        Ok(())
    }

    // ========================================================================
    // Account
    // ========================================================================

    /// Fetch the account balance.
    ///
    /// POST /0/private/Balance
    ///
    /// The exchange reports amounts as strings; they are parsed into
    /// decimals here.
    pub async fn balance(&self) -> Result<HashMap<String, Decimal>, KrakenError> {
        let raw: HashMap<String, String> = self.request("Balance", &[]).await?;

        let mut balances = HashMap::with_capacity(raw.len());
        for (asset, amount) in raw {
            let value = amount
                .parse::<Decimal>()
                .map_err(|e| KrakenError::Parse(format!("balance for {asset}: {e}")))?;
            balances.insert(asset, value);
        }

        Ok(balances)
    }

    /// Refresh the cached balance snapshot.
    ///
    /// Called once per runner cycle, after all trade plans ran.
    pub async fn refresh_balances(&self) -> Result<(), KrakenError> {
        let balances = self.balance().await?;

        tracing::debug!(assets = balances.len(), "refreshed balance snapshot");
        *self.balances.write() = balances;

        Ok(())
    }

    /// Read one asset from the cached balance snapshot.
    ///
    /// Returns `None` until the first refresh, or when the account holds
    /// no such asset.
    pub fn cached_balance(&self, asset: &str) -> Option<Decimal> {
        self.balances.read().get(asset).copied()
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Query open orders carrying the given order reference.
    ///
    /// POST /0/private/OpenOrders
    pub async fn open_orders(&self, userref: i32) -> Result<OpenOrders, KrakenError> {
        self.request("OpenOrders", &[("userref", userref.to_string())])
            .await
    }

    /// Query closed orders carrying the given order reference.
    ///
    /// POST /0/private/ClosedOrders
    pub async fn closed_orders(&self, userref: i32) -> Result<ClosedOrders, KrakenError> {
        self.request("ClosedOrders", &[("userref", userref.to_string())])
            .await
    }

    /// Submit a market buy order spending `volume` of the quote currency.
    ///
    /// POST /0/private/AddOrder
    ///
    /// The order is tagged with the caller's order reference so later
    /// open/closed queries can be filtered down to it. With `validate`
    /// set the exchange checks the order without executing it.
    pub async fn add_market_buy(
        &self,
        pair: &str,
        userref: i32,
        volume: Decimal,
        validate: bool,
    ) -> Result<AddOrder, KrakenError> {
        let mut params: Vec<(&str, String)> = vec![
            ("pair", pair.to_string()),
            ("type", "buy".to_string()),
            ("ordertype", "market".to_string()),
            ("volume", volume.to_string()),
            ("oflags", "viqc".to_string()),
            ("timeinforce", "GTC".to_string()),
            ("userref", userref.to_string()),
        ];
        if validate {
            params.push(("validate", "true".to_string()));
        }

        tracing::info!(
            pair = %pair,
            userref = userref,
            volume = %volume,
            validate = validate,
            "submitting market buy order"
        );

        self.request("AddOrder", &params).await
    }

    // ========================================================================
    // Public catalog
    // ========================================================================

    /// Fetch the public asset catalog.
    ///
    /// GET /0/public/Assets
    ///
    /// Needs no credentials; used by the CLI listing.
    pub async fn assets() -> Result<Assets, KrakenError> {
        let rest = RestClient::new(API_BASE_URL, REQUEST_TIMEOUT)?;
        Self::public_request(&rest, "/0/public/Assets").await
    }
}

impl std::fmt::Debug for KrakenClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrakenClient")
            .field("base_url", &self.rest.base_url())
            .field("api_key", &self.credentials.api_key())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_envelope_ok() {
        let envelope = KrakenResponse {
            error: vec![],
            result: Some(42),
        };
        assert_eq!(KrakenClient::unwrap_envelope(envelope).unwrap(), 42);
    }

    #[test]
    fn test_unwrap_envelope_joins_errors() {
        let envelope: KrakenResponse<i32> = KrakenResponse {
            error: vec!["EGeneral:Invalid arguments".into(), "EOrder:Unknown".into()],
            result: None,
        };

        let err = KrakenClient::unwrap_envelope(envelope).unwrap_err();
        match err {
            KrakenError::Response(msg) => {
                assert_eq!(msg, "EGeneral:Invalid arguments, EOrder:Unknown");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unwrap_envelope_missing_result() {
        let envelope: KrakenResponse<i32> = KrakenResponse {
            error: vec![],
            result: None,
        };

        assert!(matches!(
            KrakenClient::unwrap_envelope(envelope),
            Err(KrakenError::EmptyResult)
        ));
    }

    #[test]
    fn test_public_allow_list() {
        assert!(PUBLIC_ACTIONS.contains(&"SystemStatus"));
        assert!(PUBLIC_ACTIONS.contains(&"Assets"));
        assert!(!PUBLIC_ACTIONS.contains(&"Balance"));
        assert!(!PUBLIC_ACTIONS.contains(&"AddOrder"));
    }
}

//! Kraken API response types.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Response envelope wrapping every Kraken payload.
///
/// The exchange reports failures in-band: `error` is non-empty and
/// `result` is absent or partial. Callers must check `error` before
/// touching `result`.
#[derive(Debug, Clone, Deserialize)]
pub struct KrakenResponse<T> {
    #[serde(default)]
    pub error: Vec<String>,
    pub result: Option<T>,
}

/// Result of the public SystemStatus call.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatus {
    /// One of `online`, `maintenance`, `cancel_only`, `post_only`.
    pub status: String,
    pub timestamp: String,
}

/// Order status as reported by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Open,
    Closed,
    Canceled,
    Expired,
}

impl OrderStatus {
    /// Whether the order has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Canceled | Self::Expired)
    }

    /// The exchange's string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Canceled => "canceled",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description block attached to every order record.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDescription {
    pub pair: String,
    /// Buy or sell.
    #[serde(rename = "type")]
    pub side: String,
    pub ordertype: String,
    /// Human-readable order summary.
    #[serde(default)]
    pub order: String,
}

/// One order as returned by the OpenOrders and ClosedOrders calls.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub status: OrderStatus,
    /// Opening timestamp, epoch seconds.
    #[serde(default)]
    pub opentm: f64,
    /// Close timestamp, epoch seconds. Zero while the order is open.
    #[serde(default)]
    pub closetm: f64,
    #[serde(default)]
    pub userref: Option<i64>,
    #[serde(default, deserialize_with = "decimal_from_str")]
    pub vol: Decimal,
    #[serde(default, deserialize_with = "decimal_from_str")]
    pub cost: Decimal,
    pub descr: OrderDescription,
    /// Populated for canceled/expired orders.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Result of the private OpenOrders call.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenOrders {
    /// Transaction id to order, filtered by the queried order reference.
    #[serde(default)]
    pub open: HashMap<String, Order>,
}

/// Result of the private ClosedOrders call.
#[derive(Debug, Clone, Deserialize)]
pub struct ClosedOrders {
    #[serde(default)]
    pub closed: HashMap<String, Order>,
    #[serde(default)]
    pub count: u64,
}

/// Result of the private AddOrder call.
#[derive(Debug, Clone, Deserialize)]
pub struct AddOrder {
    pub descr: AddOrderDescription,
    /// Absent when the order was submitted with the validate flag.
    #[serde(default)]
    pub txid: Vec<String>,
}

/// Description block of an AddOrder confirmation.
#[derive(Debug, Clone, Deserialize)]
pub struct AddOrderDescription {
    pub order: String,
}

/// One asset from the public Assets catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetInfo {
    pub altname: String,
    #[serde(default)]
    pub decimals: u32,
}

/// The public Assets catalog, keyed by asset id.
///
/// A `BTreeMap` keeps the CLI listing sorted.
pub type Assets = BTreeMap<String, AssetInfo>;

/// Deserialize a Decimal from its string representation.
fn decimal_from_str<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    s.parse::<Decimal>().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_system_status() {
        let json = r#"{
            "error": [],
            "result": {"status": "online", "timestamp": "2024-03-24T17:41:56Z"}
        }"#;

        let envelope: KrakenResponse<SystemStatus> = serde_json::from_str(json).unwrap();
        assert!(envelope.error.is_empty());
        assert_eq!(envelope.result.unwrap().status, "online");
    }

    #[test]
    fn test_deserialize_error_envelope() {
        let json = r#"{"error": ["EAPI:Invalid nonce"]}"#;

        let envelope: KrakenResponse<SystemStatus> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error, vec!["EAPI:Invalid nonce"]);
        assert!(envelope.result.is_none());
    }

    #[test]
    fn test_deserialize_closed_orders() {
        let json = r#"{
            "closed": {
                "O6Z5V2-ZXCVB-ASDFGH": {
                    "status": "closed",
                    "opentm": 1688666448.0,
                    "closetm": 1688666559.8974,
                    "userref": -873187034,
                    "vol": "0.00080000",
                    "cost": "25.00000",
                    "descr": {
                        "pair": "XBTEUR",
                        "type": "buy",
                        "ordertype": "market",
                        "order": "buy 0.00080000 XBTEUR @ market"
                    }
                },
                "OABCDE-12345-QWERTY": {
                    "status": "canceled",
                    "opentm": 1688580000.0,
                    "closetm": 1688580120.5,
                    "vol": "0.00080000",
                    "cost": "0.00000",
                    "descr": {
                        "pair": "XBTEUR",
                        "type": "buy",
                        "ordertype": "market",
                        "order": "buy 0.00080000 XBTEUR @ market"
                    },
                    "reason": "User requested"
                }
            },
            "count": 2
        }"#;

        let closed: ClosedOrders = serde_json::from_str(json).unwrap();
        assert_eq!(closed.count, 2);

        let order = &closed.closed["O6Z5V2-ZXCVB-ASDFGH"];
        assert_eq!(order.status, OrderStatus::Closed);
        assert_eq!(order.vol, dec!(0.00080000));
        assert_eq!(order.userref, Some(-873187034));
        assert_eq!(order.descr.pair, "XBTEUR");

        let canceled = &closed.closed["OABCDE-12345-QWERTY"];
        assert_eq!(canceled.status, OrderStatus::Canceled);
        assert_eq!(canceled.reason.as_deref(), Some("User requested"));
    }

    #[test]
    fn test_deserialize_open_orders_empty() {
        let json = r#"{"open": {}}"#;
        let open: OpenOrders = serde_json::from_str(json).unwrap();
        assert!(open.open.is_empty());
    }

    #[test]
    fn test_deserialize_add_order() {
        let json = r#"{
            "descr": {"order": "buy 0.00080000 XBTEUR @ market"},
            "txid": ["OUF4EM-FRGI2-MQMWZD"]
        }"#;

        let response: AddOrder = serde_json::from_str(json).unwrap();
        assert_eq!(response.descr.order, "buy 0.00080000 XBTEUR @ market");
        assert_eq!(response.txid, vec!["OUF4EM-FRGI2-MQMWZD"]);
    }

    #[test]
    fn test_deserialize_add_order_validate_only() {
        // With validate=true the exchange echoes the description only.
        let json = r#"{"descr": {"order": "buy 0.00080000 XBTEUR @ market"}}"#;

        let response: AddOrder = serde_json::from_str(json).unwrap();
        assert!(response.txid.is_empty());
    }

    #[test]
    fn test_deserialize_assets() {
        let json = r#"{
            "XXBT": {"aclass": "currency", "altname": "XBT", "decimals": 10},
            "ZEUR": {"aclass": "currency", "altname": "EUR", "decimals": 4}
        }"#;

        let assets: Assets = serde_json::from_str(json).unwrap();
        assert_eq!(assets["XXBT"].altname, "XBT");
        assert_eq!(assets["ZEUR"].decimals, 4);
        // BTreeMap iteration is sorted by asset id.
        let ids: Vec<_> = assets.keys().collect();
        assert_eq!(ids, vec!["XXBT", "ZEUR"]);
    }

    #[test]
    fn test_order_status_terminal() {
        assert!(OrderStatus::Closed.is_terminal());
        assert!(OrderStatus::Canceled.is_terminal());
        assert!(OrderStatus::Expired.is_terminal());
        assert!(!OrderStatus::Open.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
    }

    #[test]
    fn test_order_status_display() {
        assert_eq!(OrderStatus::Canceled.to_string(), "canceled");
    }
}

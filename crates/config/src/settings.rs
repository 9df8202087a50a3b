//! The configuration schema and loader.

use crate::error::ConfigError;
use crate::schedule::Schedule;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level CryptoBob configuration.
#[derive(Deserialize)]
pub struct Config {
    /// Exchange API key.
    pub api_key: String,
    /// Exchange private key, base64-encoded as issued.
    pub private_key: String,
    /// `otpauth://` URI for API keys with 2FA enabled.
    #[serde(default)]
    pub otp_uri: Option<String>,
    /// Sleep between runner cycles, in minutes.
    pub interval: u64,
    /// Earliest point after a failed or abnormal occurrence at which a
    /// retry may be attempted.
    pub retry_interval: Schedule,
    /// Point after which a failed or abnormal occurrence is abandoned.
    pub retry_timeout: Schedule,
    /// Submit orders with the exchange-side validate flag (dry run).
    #[serde(default)]
    pub test: bool,
    /// One entry per trading pair.
    pub trade_plans: Vec<TradePlanConfig>,
    /// One entry per withdrawal asset.
    #[serde(default)]
    pub withdrawals: Vec<WithdrawalConfig>,
}

/// Configuration of one trade plan.
#[derive(Debug, Clone, Deserialize)]
pub struct TradePlanConfig {
    /// Trading pair, e.g. `XBTEUR`.
    pub pair: String,
    /// Quote-currency amount to spend per order.
    pub amount: Decimal,
    /// Minimum spacing between two successful orders for this pair.
    pub interval: Schedule,
}

/// Configuration of one withdrawal.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalConfig {
    /// Asset id, e.g. `XXBT`.
    pub asset: String,
    /// Balance above which a withdrawal should be triggered.
    pub threshold: Decimal,
    /// Destination address (a withdrawal key name on the exchange).
    pub address: String,
    /// Fixed amount to withdraw; defaults to the balance above the
    /// threshold.
    #[serde(default)]
    pub amount: Option<Decimal>,
}

impl Config {
    /// Load and validate the configuration from a YAML file.
    ///
    /// A leading `~` in the path is expanded to the home directory.
    ///
    /// # Errors
    /// `ConfigError::Io` when the file cannot be read,
    /// `ConfigError::Parse` when it cannot be deserialized (missing
    /// fields are reported by name), `ConfigError::Invalid` when a
    /// value fails semantic validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let path = expand_home(path);

        tracing::debug!(path = %path.display(), "loading configuration");

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        let config: Config = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.interval == 0 {
            return Err(invalid("interval", "must be greater than zero"));
        }

        let retry_interval = self.retry_interval.as_duration();
        let retry_timeout = self.retry_timeout.as_duration();
        if retry_interval.is_zero() {
            return Err(invalid("retry_interval", "must be greater than zero"));
        }
        if retry_timeout < retry_interval {
            return Err(invalid(
                "retry_timeout",
                "must not be shorter than retry_interval",
            ));
        }

        if self.trade_plans.is_empty() {
            return Err(invalid("trade_plans", "at least one trade plan is required"));
        }
        for (index, plan) in self.trade_plans.iter().enumerate() {
            if plan.pair.is_empty() {
                return Err(invalid(
                    &format!("trade_plans[{index}].pair"),
                    "must not be empty",
                ));
            }
            if plan.amount <= Decimal::ZERO {
                return Err(invalid(
                    &format!("trade_plans[{index}].amount"),
                    "must be greater than zero",
                ));
            }
            if plan.interval.as_duration().is_zero() {
                return Err(invalid(
                    &format!("trade_plans[{index}].interval"),
                    "must be greater than zero",
                ));
            }
        }

        for (index, withdrawal) in self.withdrawals.iter().enumerate() {
            if withdrawal.asset.is_empty() {
                return Err(invalid(
                    &format!("withdrawals[{index}].asset"),
                    "must not be empty",
                ));
            }
            if withdrawal.address.is_empty() {
                return Err(invalid(
                    &format!("withdrawals[{index}].address"),
                    "must not be empty",
                ));
            }
            if withdrawal.threshold <= Decimal::ZERO {
                return Err(invalid(
                    &format!("withdrawals[{index}].threshold"),
                    "must be greater than zero",
                ));
            }
            if let Some(amount) = withdrawal.amount {
                if amount <= Decimal::ZERO {
                    return Err(invalid(
                        &format!("withdrawals[{index}].amount"),
                        "must be greater than zero",
                    ));
                }
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key)
            .field("private_key", &"[REDACTED]")
            .field("otp_uri", &self.otp_uri.as_ref().map(|_| "[REDACTED]"))
            .field("interval", &self.interval)
            .field("retry_interval", &self.retry_interval)
            .field("retry_timeout", &self.retry_timeout)
            .field("test", &self.test)
            .field("trade_plans", &self.trade_plans)
            .field("withdrawals", &self.withdrawals)
            .finish()
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Expand a leading `~` to the user's home directory.
fn expand_home(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

//! The runner orchestration loop.

use crate::error::CryptoBobError;
use auth::Credentials;
use config::Config;
use kraken_rest::KrakenClient;
use std::time::Duration;
use tokio::sync::watch;
use trade_plan::{RetryPolicy, TradePlan, Withdrawal};
use tracing::{debug, info, warn};

/// Orchestrates one evaluation cycle across all trade plans and
/// withdrawals, then sleeps until the next cycle.
pub struct Runner {
    client: KrakenClient,
    plans: Vec<TradePlan>,
    withdrawals: Vec<Withdrawal>,
    cycle_interval: Duration,
    retry: RetryPolicy,
    test_mode: bool,
}

impl Runner {
    /// Build the runner from a validated configuration.
    ///
    /// Each trade plan and withdrawal entry is constructed through its
    /// own factory here, so a bad entry fails with an error naming the
    /// entry rather than a generic construction failure (the config
    /// crate has already validated the per-entry fields).
    pub fn from_config(config: &Config) -> Result<Self, CryptoBobError> {
        debug!("initialising client");
        let credentials = Credentials::new(
            config.api_key.clone(),
            &config.private_key,
            config.otp_uri.clone(),
        )?;
        let client = KrakenClient::new(credentials)?;

        debug!("initialising trade plans");
        let plans = config
            .trade_plans
            .iter()
            .map(|plan| {
                debug!(pair = %plan.pair, "found trade plan configuration");
                TradePlan::new(
                    plan.pair.clone(),
                    plan.amount,
                    plan.interval.as_duration(),
                    client.api_key(),
                )
            })
            .collect();

        debug!("initialising withdrawals");
        let withdrawals = config
            .withdrawals
            .iter()
            .map(|withdrawal| {
                debug!(asset = %withdrawal.asset, "found withdrawal configuration");
                Withdrawal::new(
                    withdrawal.asset.clone(),
                    withdrawal.threshold,
                    withdrawal.address.clone(),
                    withdrawal.amount,
                )
            })
            .collect();

        Ok(Self {
            client,
            plans,
            withdrawals,
            cycle_interval: Duration::from_secs(config.interval * 60),
            retry: RetryPolicy {
                interval: config.retry_interval.as_duration(),
                timeout: config.retry_timeout.as_duration(),
            },
            test_mode: config.test,
        })
    }

    /// Run cycles until shutdown is signaled.
    ///
    /// Plan-local faults (open orders still pending, unexpected order
    /// status) are logged and only skip the affected pair. Everything
    /// else — exchange offline, or exchange/transport failures during
    /// the order queries and the balance refresh — aborts the loop and
    /// with it the process.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Result<(), CryptoBobError> {
        info!(
            plans = self.plans.len(),
            withdrawals = self.withdrawals.len(),
            test_mode = self.test_mode,
            "starting CryptoBob runner"
        );

        loop {
            debug!("starting new runner cycle");

            self.client.assert_online_status().await?;

            for plan in &mut self.plans {
                if let Err(err) = plan.evaluate(&self.client, &self.retry, self.test_mode).await {
                    if err.is_plan_fault() {
                        warn!(pair = %plan.pair(), error = %err, "trade plan skipped");
                    } else {
                        return Err(err.into());
                    }
                }
            }

            self.client.refresh_balances().await?;

            for withdrawal in &self.withdrawals {
                withdrawal.evaluate(&self.client);
            }

            debug!(
                seconds = self.cycle_interval.as_secs(),
                "runner cycle finished, sleeping"
            );

            tokio::select! {
                _ = tokio::time::sleep(self.cycle_interval) => {}
                changed = shutdown.changed() => {
                    // A closed channel means the signal watcher is gone;
                    // stop rather than spin through cycles unprotected.
                    if changed.is_err() || *shutdown.borrow() {
                        info!("shutdown signal received, stopping runner");
                        return Ok(());
                    }
                }
            }
        }
    }
}

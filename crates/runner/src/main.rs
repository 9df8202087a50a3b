//! CryptoBob - the bot which buys & withdraws crypto automatically.

mod cli;
mod error;
mod runner;

use clap::Parser;
use cli::{Action, Cli};
use config::{Config, ConfigError};
use error::CryptoBobError;
use kraken_rest::KrakenClient;
use runner::Runner;
use tokio::sync::watch;
use tracing::info;

#[tokio::main]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CryptoBobError> {
    let config = Config::load(&cli.config)?;

    common::init_logging(cli.verbose);

    match cli.action {
        Action::Run => {
            let runner = Runner::from_config(&config)?;

            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            tokio::spawn(async move {
                let _ = tokio::signal::ctrl_c().await;
                info!("received Ctrl+C, initiating shutdown");
                let _ = shutdown_tx.send(true);
            });

            runner.run(shutdown_rx).await
        }
        Action::Assets => {
            let assets = KrakenClient::assets().await?;

            println!("ID         | Altname");
            println!("-----------+-----------");
            for (id, info) in &assets {
                println!("{id:<10} | {}", info.altname);
            }

            Ok(())
        }
        Action::Otp => {
            let otp_uri = config
                .otp_uri
                .as_deref()
                .ok_or(ConfigError::MissingProperty("otp_uri"))?;

            println!("{}", auth::current_code(otp_uri)?);
            Ok(())
        }
    }
}

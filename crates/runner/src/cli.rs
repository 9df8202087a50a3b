//! Command-line interface definition.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CryptoBob - the bot which buys & withdraws crypto automatically.
#[derive(Debug, Parser)]
#[command(name = "cryptobob", version, about)]
pub struct Cli {
    /// The path to the CryptoBob config.
    #[arg(short, long, default_value = "~/.cryptobob.yml")]
    pub config: PathBuf,

    /// Enable verbose logging mode (repeat to increase verbosity, up to -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Action to execute.
    #[arg(value_enum)]
    pub action: Action,
}

/// What this invocation should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Start the trading runner.
    Run,
    /// List the exchange's asset catalog.
    Assets,
    /// Print the current one-time password.
    Otp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["cryptobob", "run"]);
        assert_eq!(cli.action, Action::Run);
        assert_eq!(cli.config, PathBuf::from("~/.cryptobob.yml"));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_verbosity_count_and_config_override() {
        let cli = Cli::parse_from(["cryptobob", "-vvv", "-c", "/tmp/bob.yml", "otp"]);
        assert_eq!(cli.verbose, 3);
        assert_eq!(cli.config, PathBuf::from("/tmp/bob.yml"));
        assert_eq!(cli.action, Action::Otp);
    }
}

//! Typed CryptoBob configuration.
//!
//! The configuration lives in a YAML file (by default
//! `~/.cryptobob.yml`) and is deserialized into a strongly-typed struct
//! in one step. Required keys are validated eagerly at load time:
//! serde reports each missing field by name, and semantic checks
//! (positive amounts, retry windows that make sense) raise an error
//! naming the offending field. Nothing touches the file again after
//! startup.

mod error;
mod schedule;
mod settings;

pub use error::ConfigError;
pub use schedule::Schedule;
pub use settings::{Config, TradePlanConfig, WithdrawalConfig};

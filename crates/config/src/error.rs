use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path:?}: {source}")]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be parsed. Missing required
    /// keys surface here with the field name in the message.
    #[error("failed to parse configuration file {path:?}: {message}")]
    Parse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Parser message, e.g. "missing field `api_key`".
        message: String,
    },

    /// An optional property is required for the requested action but
    /// was not configured.
    #[error("missing configuration property `{0}`")]
    MissingProperty(&'static str),

    /// A property is present but semantically invalid.
    #[error("invalid configuration property `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

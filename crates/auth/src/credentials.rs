//! Secure credential management.
//!
//! The private key arrives base64-encoded (as issued by the exchange)
//! and is decoded once at construction time. Both the decoded key bytes
//! and the OTP URI are held in `secrecy` wrappers so they are redacted
//! from Debug output and zeroed on drop.

use crate::error::AuthError;
use crate::otp;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::{ExposeSecret, Secret, SecretString};

/// API credentials for authenticated exchange requests.
pub struct Credentials {
    api_key: String,
    private_key: Secret<Vec<u8>>,
    otp_uri: Option<SecretString>,
}

impl Credentials {
    /// Create credentials from the values the exchange issues.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidPrivateKey` if the private key is not
    /// valid base64.
    pub fn new(
        api_key: String,
        private_key_b64: &str,
        otp_uri: Option<String>,
    ) -> Result<Self, AuthError> {
        let private_key = STANDARD
            .decode(private_key_b64)
            .map_err(|e| AuthError::InvalidPrivateKey(e.to_string()))?;

        Ok(Self {
            api_key,
            private_key: Secret::new(private_key),
            otp_uri: otp_uri.map(SecretString::from),
        })
    }

    /// Get the API key (public identifier, safe to log).
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Whether a one-time-password URI is configured.
    pub fn has_otp(&self) -> bool {
        self.otp_uri.is_some()
    }

    /// Current one-time-password code, or `None` when no OTP URI is
    /// configured.
    pub fn otp_code(&self) -> Result<Option<String>, AuthError> {
        match &self.otp_uri {
            Some(uri) => otp::current_code(uri.expose_secret()).map(Some),
            None => Ok(None),
        }
    }

    /// Expose the decoded private key for signing.
    ///
    /// **WARNING**: only use this for cryptographic operations.
    pub(crate) fn expose_private_key(&self) -> &[u8] {
        self.private_key.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("private_key", &"[REDACTED]")
            .field("otp_uri", &self.otp_uri.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_decode_private_key() {
        let creds = Credentials::new("key".into(), "c2VjcmV0", None).unwrap();
        assert_eq!(creds.api_key(), "key");
        assert_eq!(creds.expose_private_key(), b"secret");
        assert!(!creds.has_otp());
    }

    #[test]
    fn test_credentials_reject_bad_base64() {
        let result = Credentials::new("key".into(), "not base64!!!", None);
        assert!(matches!(result, Err(AuthError::InvalidPrivateKey(_))));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new(
            "public_key".into(),
            "c3VwZXJzZWNyZXQ=",
            Some("otpauth://totp/Kraken:me?secret=JBSWY3DPEHPK3PXP&issuer=Kraken".into()),
        )
        .unwrap();

        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("public_key"));
        assert!(!debug_str.contains("supersecret"));
        assert!(!debug_str.contains("JBSWY3DPEHPK3PXP"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_otp_code_without_uri_is_none() {
        let creds = Credentials::new("key".into(), "c2VjcmV0", None).unwrap();
        assert!(creds.otp_code().unwrap().is_none());
    }
}

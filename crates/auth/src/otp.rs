//! Time-based one-time-password generation.

use crate::error::AuthError;
use totp_rs::TOTP;

/// Generate the current TOTP code for an `otpauth://` URI.
///
/// The URI is the form the exchange hands out when enabling 2FA on an
/// API key; it carries the shared secret, digit count, and period.
pub fn current_code(otp_uri: &str) -> Result<String, AuthError> {
    let totp = TOTP::from_url(otp_uri).map_err(|e| AuthError::InvalidOtpUri(e.to_string()))?;

    totp.generate_current()
        .map_err(|e| AuthError::OtpGeneration(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_URI: &str =
        "otpauth://totp/Kraken:me?secret=JBSWY3DPEHPK3PXPJBSWY3DPEHPK3PXP&issuer=Kraken";

    #[test]
    fn test_current_code_shape() {
        let code = current_code(TEST_URI).unwrap();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_invalid_uri_rejected() {
        assert!(matches!(
            current_code("https://example.com/not-an-otp-uri"),
            Err(AuthError::InvalidOtpUri(_))
        ));
    }
}

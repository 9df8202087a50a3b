//! Stable per-pair order reference derivation.

/// Derive the order reference for an (api_key, pair) combination.
///
/// CRC32 of `"{api_key}:{pair}"`, reinterpreted bit for bit as a
/// signed 32-bit integer — the representation the exchange expects in
/// its `userref` field. The value is stable across process restarts,
/// which makes it the correlation key for re-attributing order history
/// after the in-memory state is lost.
pub fn user_ref(api_key: &str, pair: &str) -> i32 {
    crc32fast::hash(format!("{api_key}:{pair}").as_bytes()) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_ref_is_deterministic() {
        let first = user_ref("api-key", "XBTEUR");
        let second = user_ref("api-key", "XBTEUR");
        assert_eq!(first, second);
    }

    #[test]
    fn test_user_ref_distinguishes_pairs_and_keys() {
        assert_ne!(user_ref("api-key", "XBTEUR"), user_ref("api-key", "ETHEUR"));
        assert_ne!(user_ref("api-key", "XBTEUR"), user_ref("other-key", "XBTEUR"));
    }

    #[test]
    fn test_signed_reinterpretation_matches_bit_pattern() {
        // CRC32 check value: crc32("123456789") = 0xCBF43926, whose
        // two's-complement reading is negative.
        assert_eq!(crc32fast::hash(b"123456789"), 0xCBF4_3926);
        assert_eq!(0xCBF4_3926_u32 as i32, -873_187_034);
    }
}

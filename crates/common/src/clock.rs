//! Wall-clock helpers.
//!
//! Nonces use epoch milliseconds (strictly increasing given real call
//! latency); trade-plan decision math uses epoch seconds because the
//! exchange reports order close times as float seconds.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as epoch milliseconds.
pub fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}

/// Current wall-clock time as epoch seconds.
pub fn epoch_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_millis_nonzero() {
        assert!(epoch_millis() > 1_600_000_000_000);
    }

    #[test]
    fn test_epoch_units_agree() {
        let millis = epoch_millis();
        let secs = epoch_secs();
        assert!((secs - millis as f64 / 1000.0).abs() < 5.0);
    }
}

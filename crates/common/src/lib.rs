//! Shared helpers used across the CryptoBob crates.

mod clock;
mod logging;

pub use clock::{epoch_millis, epoch_secs};
pub use logging::init_logging;

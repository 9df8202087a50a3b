//! Duration components as written in the configuration file.

use serde::Deserialize;
use std::time::Duration;

/// A duration broken into components, e.g. `{days: 1}` or
/// `{hours: 4, minutes: 30}`.
///
/// Unknown keys are rejected so a typo like `minute:` fails at load
/// time instead of silently configuring a zero window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schedule {
    #[serde(default)]
    pub days: u64,
    #[serde(default)]
    pub hours: u64,
    #[serde(default)]
    pub minutes: u64,
    #[serde(default)]
    pub seconds: u64,
}

impl Schedule {
    /// Total duration of all components.
    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(
            self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_components_add_up() {
        let schedule: Schedule =
            serde_yaml::from_str("{days: 1, hours: 2, minutes: 3, seconds: 4}").unwrap();
        assert_eq!(
            schedule.as_duration(),
            Duration::from_secs(86_400 + 2 * 3_600 + 3 * 60 + 4)
        );
    }

    #[test]
    fn test_schedule_partial_components() {
        let schedule: Schedule = serde_yaml::from_str("{minutes: 30}").unwrap();
        assert_eq!(schedule.as_duration(), Duration::from_secs(1_800));
    }

    #[test]
    fn test_schedule_rejects_unknown_keys() {
        let result: Result<Schedule, _> = serde_yaml::from_str("{minute: 30}");
        assert!(result.is_err());
    }
}

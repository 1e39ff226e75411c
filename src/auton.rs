//! The autonomous routine: one fixed, timed drive.
//!
//! The robot drives straight at `auton_drive_speed` for `auton_drive_time`
//! and then stops. Mechanisms stay idle. There is no path following and no
//! feedback of any kind.

use std::time::Duration;

use crate::config::GobblerConfig;

/// A straight drive that runs for a fixed time from when it was started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedDrive {
    started_at: Duration,
    speed:      f64,
    duration:   Duration,
}

impl TimedDrive {
    /// Starts the drive at `now` with the configured speed and duration.
    pub fn new(now: Duration, config: &GobblerConfig) -> Self {
        Self {
            started_at: now,
            speed:      config.auton_drive_speed,
            duration:   config.auton_drive_time,
        }
    }

    /// Returns true once the drive time has elapsed.
    pub fn is_finished(&self, now: Duration) -> bool {
        now.saturating_sub(self.started_at) >= self.duration
    }

    /// `(left, right)` drive speeds at `now`.
    pub fn drive(&self, now: Duration) -> (f64, f64) {
        if self.is_finished(now) {
            (0.0, 0.0)
        } else {
            (self.speed, self.speed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drives_then_stops() {
        let config = GobblerConfig::default();
        let start = Duration::from_secs(10);
        let maneuver = TimedDrive::new(start, &config);

        assert_eq!(maneuver.drive(start), (0.5, 0.5));
        assert_eq!(maneuver.drive(start + Duration::from_millis(1_999)), (0.5, 0.5));
        assert!(maneuver.is_finished(start + Duration::from_secs(2)));
        assert_eq!(maneuver.drive(start + Duration::from_secs(2)), (0.0, 0.0));
    }
}

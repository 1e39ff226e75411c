//! Elapsed-time helpers driven by the cycle's monotonic clock reading.
//!
//! Neither type reads a clock itself. The current time always comes in from
//! [`CycleInputs::now`](crate::io::CycleInputs::now), which keeps the state
//! machines deterministic under test.

use std::time::Duration;

use crate::error::{Fault, Faults, report};

/// A timed travel that a [`TravelWatch`] can be watching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Arm driving down to the lower switch.
    Extending,
    /// Arm driving home to the upper switch.
    Retracting,
    /// Fire sequence driving the arm down out of the shot.
    ClearingArm,
    /// Shooter running one stroke.
    Firing,
}

/// Free-running timer for the intake roller, restarted on every retract.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use gobbler::timer::PickupTimer;
///
/// let mut timer = PickupTimer::new(Duration::from_secs(1));
/// timer.reset(Duration::from_secs(2));
/// assert_eq!(timer.elapsed(Duration::from_millis(2_500)), Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupTimer {
    started_at: Duration,
}

impl PickupTimer {
    /// Creates a timer that starts counting at `now`.
    pub fn new(now: Duration) -> Self { Self { started_at: now } }

    /// Restarts the count at `now`.
    pub fn reset(&mut self, now: Duration) { self.started_at = now; }

    /// Time since the last reset. A clock that steps backwards reads as zero.
    pub fn elapsed(&self, now: Duration) -> Duration { now.saturating_sub(self.started_at) }
}

/// Watches one arm travel for a switch that never arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelWatch {
    started_at: Duration,
    reported:   bool,
}

impl TravelWatch {
    /// Starts watching a travel that began at `now`.
    pub fn new(now: Duration) -> Self {
        Self {
            started_at: now,
            reported:   false,
        }
    }

    /// Starts watching a new travel.
    pub fn restart(&mut self, now: Duration) { *self = Self::new(now); }

    /// Returns true once `stage` has run for `timeout` or longer.
    ///
    /// The first overrun is reported as [`Fault::TravelTimeout`]; later calls
    /// keep returning true without reporting again.
    pub fn stalled(
        &mut self,
        now: Duration,
        timeout: Duration,
        stage: Stage,
        faults: &mut Faults,
    ) -> bool {
        let stalled = now.saturating_sub(self.started_at) >= timeout;
        if stalled && !self.reported {
            self.reported = true;
            report(faults, Fault::TravelTimeout { stage });
        }
        stalled
    }
}

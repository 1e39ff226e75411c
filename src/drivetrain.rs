//! Tank drive conditioning and two-speed gear shifting.
//!
//! Each drive stick maps straight onto one side of the robot. Before it gets
//! there the raw axis is optionally inverted, clamped to [-1, 1], and run
//! through a deadband so a stick resting slightly off-centre doesn't creep.
//!
//! The gearbox is shifted by two solenoids, one per gear, driven by a pair of
//! momentary buttons.
//!
//! # Example
//!
//! ```
//! use gobbler::{
//!     config::GobblerConfig,
//!     drivetrain::{self, GearShifter, GearState},
//! };
//!
//! let config = GobblerConfig::default();
//! // Left stick pushed fully up reads -1.0 on this gamepad.
//! assert_eq!(drivetrain::tank(-1.0, 0.05, &config), (1.0, 0.0));
//!
//! let mut shifter = GearShifter::new(GearState::Low);
//! assert!(shifter.update(true, false));
//! assert_eq!(shifter.gear(), GearState::High);
//! ```

use log::info;

use crate::config::GobblerConfig;

/// Drivetrain gear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GearState {
    Low,
    High,
}

/// Computes `(left, right)` drive speeds from the two stick axes.
pub fn tank(left_axis: f64, right_axis: f64, config: &GobblerConfig) -> (f64, f64) {
    let left = if config.invert_left_axis { -left_axis } else { left_axis };
    let right = if config.invert_right_axis { -right_axis } else { right_axis };
    (
        condition(left, config.drive_deadband),
        condition(right, config.drive_deadband),
    )
}

/// Clamps `axis` to [-1, 1] and zeroes anything with magnitude below
/// `deadband`. A NaN axis reads as zero.
pub fn condition(axis: f64, deadband: f64) -> f64 {
    if axis.is_nan() {
        return 0.0;
    }
    let axis = axis.clamp(-1.0, 1.0);
    if axis.abs() < deadband { 0.0 } else { axis }
}

/// Tracks the commanded gear and only shifts when the target differs.
///
/// Holding both shift buttons, or neither, keeps the last gear. This stops the
/// solenoids chattering when both buttons are mashed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GearShifter {
    gear:   GearState,
    shifts: u32,
}

impl GearShifter {
    /// Starts in `gear` without writing the solenoids.
    pub fn new(gear: GearState) -> Self { Self { gear, shifts: 0 } }

    pub fn gear(&self) -> GearState { self.gear }

    /// Number of shifts actually performed, each one a pair of solenoid writes.
    pub fn shift_count(&self) -> u32 { self.shifts }

    /// Engages high gear. Returns true if a shift happened.
    pub fn shift_high(&mut self) -> bool { self.shift_to(GearState::High) }

    /// Engages low gear. Returns true if a shift happened.
    pub fn shift_low(&mut self) -> bool { self.shift_to(GearState::Low) }

    /// Applies this cycle's shift button levels.
    pub fn update(&mut self, high: bool, low: bool) -> bool {
        match (high, low) {
            (true, false) => self.shift_high(),
            (false, true) => self.shift_low(),
            _ => false,
        }
    }

    fn shift_to(&mut self, target: GearState) -> bool {
        if self.gear == target {
            return false;
        }
        info!("shifting {:?} -> {:?}", self.gear, target);
        self.gear = target;
        self.shifts += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadband_zeroes_small_axes() {
        assert_eq!(condition(0.09, 0.1), 0.0);
        assert_eq!(condition(-0.099, 0.1), 0.0);
        assert_eq!(condition(0.1, 0.1), 0.1);
        assert_eq!(condition(-0.5, 0.1), -0.5);
    }

    #[test]
    fn axes_are_clamped() {
        assert_eq!(condition(1.3, 0.1), 1.0);
        assert_eq!(condition(-7.0, 0.1), -1.0);
        assert_eq!(condition(f64::NAN, 0.1), 0.0);
    }

    #[test]
    fn left_axis_is_inverted_by_default() {
        let config = GobblerConfig::default();
        assert_eq!(tank(-0.8, 0.8, &config), (0.8, 0.8));

        let straight = GobblerConfig {
            invert_left_axis: false,
            ..GobblerConfig::default()
        };
        assert_eq!(tank(-0.8, 0.8, &straight), (-0.8, 0.8));
    }

    #[test]
    fn shifting_is_idempotent() {
        let mut shifter = GearShifter::new(GearState::Low);
        assert!(!shifter.shift_low());
        assert!(shifter.shift_high());
        assert!(!shifter.shift_high());
        assert_eq!(shifter.shift_count(), 1);
    }

    #[test]
    fn both_buttons_never_shift() {
        for start in [GearState::Low, GearState::High] {
            let mut shifter = GearShifter::new(start);
            for _ in 0..50 {
                assert!(!shifter.update(true, true));
                assert!(!shifter.update(false, false));
            }
            assert_eq!(shifter.gear(), start);
            assert_eq!(shifter.shift_count(), 0);
        }
    }

    #[test]
    fn held_button_shifts_once() {
        let mut shifter = GearShifter::new(GearState::Low);
        let shifts = (0..10).filter(|_| shifter.update(true, false)).count();
        assert_eq!(shifts, 1);
        assert_eq!(shifter.gear(), GearState::High);
    }
}

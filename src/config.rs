//! Tunables for the ball-handling mechanisms.
//!
//! All speeds are open-loop fractions of full power in [-1, 1]. Negative arm
//! speed drives the arm down toward the floor; positive brings it home.
//!
//! # Example
//!
//! ```
//! use gobbler::config::{GobblerConfig, SwitchPolarity};
//!
//! let config = GobblerConfig {
//!     roller_settle_speed: 0.25,
//!     ..GobblerConfig::default()
//! }
//! .with_shooter_switch(SwitchPolarity::ActiveLow);
//!
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use crate::error::ConfigError;

/// Electrical convention of a digital switch input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchPolarity {
    /// Pressed reads `false`.
    ActiveLow,
    /// Pressed reads `true`.
    ActiveHigh,
}

impl SwitchPolarity {
    /// Returns true if `level` means the switch is pressed.
    pub fn is_triggered(self, level: bool) -> bool {
        match self {
            Self::ActiveLow => !level,
            Self::ActiveHigh => level,
        }
    }
}

/// Mechanism and drivetrain configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GobblerConfig {
    /// Roller speed while the arm extends, sits extended, and starts retracting.
    pub roller_intake_speed:     f64,
    /// Roller speed once the retract has run for `roller_decel_after`.
    pub roller_settle_speed:     f64,
    /// Time into a retract after which the roller slows to `roller_settle_speed`.
    pub roller_decel_after:      Duration,
    pub arm_extend_speed:        f64,
    pub arm_retract_speed:       f64,
    /// Arm travel that runs this long without reaching its switch is reported
    /// as a sensor fault and the arm motor is stopped.
    pub travel_timeout:          Duration,

    /// Arm speed while the fire sequence clears the arm out of the shot.
    pub fire_clear_arm_speed:    f64,
    /// Roller speed while the arm is being cleared, to keep the ball seated.
    pub fire_clear_roller_speed: f64,
    pub shooter_speed:           f64,
    /// Polarity of the shooter switch.
    ///
    /// The same switch reads as "ready to fire" when idle and "stroke complete"
    /// while firing, and its wiring has not been consistent between robot
    /// builds. There is deliberately no default: [`validate`](Self::validate)
    /// rejects a config that leaves this unset.
    pub shooter_switch:          Option<SwitchPolarity>,

    pub manual_arm_down_speed:   f64,
    pub manual_arm_up_speed:     f64,
    /// Roller speed while the pass button is held in manual mode.
    pub pass_roller_speed:       f64,
    /// Roller speed while the intake button is held in manual mode.
    pub manual_intake_speed:     f64,

    /// Axis magnitudes below this are treated as zero.
    pub drive_deadband:          f64,
    /// The gamepad reports "stick up" as negative on the left axis.
    pub invert_left_axis:        bool,
    pub invert_right_axis:       bool,

    /// Cycles between periodic status lines at debug level.
    pub status_period:           u32,

    pub auton_drive_speed:       f64,
    pub auton_drive_time:        Duration,
}

impl Default for GobblerConfig {
    fn default() -> Self {
        Self {
            roller_intake_speed:     0.7,
            roller_settle_speed:     0.3,
            roller_decel_after:      Duration::from_millis(500),
            arm_extend_speed:        -1.0,
            arm_retract_speed:       0.7,
            travel_timeout:          Duration::from_secs(3),
            fire_clear_arm_speed:    -1.0,
            fire_clear_roller_speed: 0.5,
            shooter_speed:           1.0,
            shooter_switch:          None,
            manual_arm_down_speed:   -1.0,
            manual_arm_up_speed:     1.0,
            pass_roller_speed:       -1.0,
            manual_intake_speed:     1.0,
            drive_deadband:          0.1,
            invert_left_axis:        true,
            invert_right_axis:       false,
            status_period:           20,
            auton_drive_speed:       0.5,
            auton_drive_time:        Duration::from_secs(2),
        }
    }
}

impl GobblerConfig {
    /// Sets the shooter switch polarity.
    pub fn with_shooter_switch(mut self, polarity: SwitchPolarity) -> Self {
        self.shooter_switch = Some(polarity);
        self
    }

    /// Checks every tunable and returns the resolved shooter switch polarity.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ShooterSwitchPolarityUnset`] if `shooter_switch` is `None`.
    /// - [`ConfigError::SpeedOutOfRange`] for any speed outside [-1, 1] or non-finite.
    /// - [`ConfigError::DeadbandOutOfRange`] unless `0 <= drive_deadband < 1`.
    /// - [`ConfigError::ZeroTravelTimeout`] / [`ConfigError::ZeroStatusPeriod`].
    pub fn validate(&self) -> Result<SwitchPolarity, ConfigError> {
        let speeds = [
            ("roller_intake_speed", self.roller_intake_speed),
            ("roller_settle_speed", self.roller_settle_speed),
            ("arm_extend_speed", self.arm_extend_speed),
            ("arm_retract_speed", self.arm_retract_speed),
            ("fire_clear_arm_speed", self.fire_clear_arm_speed),
            ("fire_clear_roller_speed", self.fire_clear_roller_speed),
            ("shooter_speed", self.shooter_speed),
            ("manual_arm_down_speed", self.manual_arm_down_speed),
            ("manual_arm_up_speed", self.manual_arm_up_speed),
            ("pass_roller_speed", self.pass_roller_speed),
            ("manual_intake_speed", self.manual_intake_speed),
            ("auton_drive_speed", self.auton_drive_speed),
        ];
        for (name, value) in speeds {
            if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                return Err(ConfigError::SpeedOutOfRange { name, value });
            }
        }

        if !self.drive_deadband.is_finite() || !(0.0..1.0).contains(&self.drive_deadband) {
            return Err(ConfigError::DeadbandOutOfRange(self.drive_deadband));
        }
        if self.travel_timeout.is_zero() {
            return Err(ConfigError::ZeroTravelTimeout);
        }
        if self.status_period == 0 {
            return Err(ConfigError::ZeroStatusPeriod);
        }

        self.shooter_switch
            .ok_or(ConfigError::ShooterSwitchPolarityUnset)
    }
}

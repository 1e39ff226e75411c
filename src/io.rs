//! Per-cycle input snapshot and actuator command set.
//!
//! The control core never touches hardware directly. Once per cycle an
//! [`InputPort`](crate::ports::InputPort) produces a [`CycleInputs`] snapshot,
//! and the core answers with a complete [`ActuatorCommands`] set that an
//! [`OutputPort`](crate::ports::OutputPort) writes back out.
//!
//! # Limit switches
//!
//! The arm switches are wired active-low: a raw level of `false` means the
//! switch is pressed. [`LimitSwitches`] keeps the raw levels exactly as
//! sampled, and [`SwitchReadings`] is the interpreted view the state machines
//! consume (`true` = triggered).

use std::time::Duration;

use crate::{config::SwitchPolarity, drivetrain::GearState};

/// Button levels sampled from the operator gamepads.
///
/// Every field is the raw held level for this cycle. Edge detection and
/// toggling happen in [`opcontrol`](crate::opcontrol).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    /// Extend the arm (drive it down to the floor).
    pub extend:            bool,
    /// Retract the arm (bring it back home).
    pub retract:           bool,
    /// Request a shot.
    pub fire:              bool,
    /// Reverse the roller to pass the ball (manual mode only).
    pub pass:              bool,
    /// Run the roller forward to pull a ball in (manual mode only).
    pub intake:            bool,
    pub gear_high:         bool,
    pub gear_low:          bool,
    pub compressor_toggle: bool,
    pub manual_toggle:     bool,
}

/// Raw limit-switch levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitSwitches {
    /// Lower switch, pressed when the arm is fully extended. Active-low.
    pub arm_extended_level:  bool,
    /// Upper switch, pressed when the arm is fully retracted. Active-low.
    pub arm_retracted_level: bool,
    /// Shooter switch. Polarity comes from
    /// [`GobblerConfig::shooter_switch`](crate::config::GobblerConfig::shooter_switch).
    pub shooter_level:       bool,
}

impl Default for LimitSwitches {
    /// All switches released (high).
    fn default() -> Self {
        Self {
            arm_extended_level:  true,
            arm_retracted_level: true,
            shooter_level:       true,
        }
    }
}

/// Everything the core reads in one control cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CycleInputs {
    /// Left drive stick, nominally in [-1, 1], as read from the gamepad.
    pub left_axis:  f64,
    /// Right drive stick, nominally in [-1, 1], as read from the gamepad.
    pub right_axis: f64,
    pub buttons:    Buttons,
    pub switches:   LimitSwitches,
    /// Monotonic time since program start.
    pub now:        Duration,
}

/// Limit switches after polarity has been applied. `true` means triggered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwitchReadings {
    pub arm_extended:    bool,
    pub arm_retracted:   bool,
    pub shooter_tripped: bool,
}

impl SwitchReadings {
    /// Interprets raw levels. Arm switches are always active-low; the shooter
    /// switch follows `shooter`.
    pub fn interpret(levels: &LimitSwitches, shooter: SwitchPolarity) -> Self {
        Self {
            arm_extended:    SwitchPolarity::ActiveLow.is_triggered(levels.arm_extended_level),
            arm_retracted:   SwitchPolarity::ActiveLow.is_triggered(levels.arm_retracted_level),
            shooter_tripped: shooter.is_triggered(levels.shooter_level),
        }
    }

    /// The arm cannot be at both ends of its travel at once.
    pub fn conflicting(&self) -> bool { self.arm_extended && self.arm_retracted }
}

/// Operator request for the arm, resolved from the two position triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmRequest {
    Extend,
    Retract,
}

impl ArmRequest {
    /// Holding both triggers, or neither, requests nothing.
    pub fn from_triggers(extend: bool, retract: bool) -> Option<Self> {
        match (extend, retract) {
            (true, false) => Some(Self::Extend),
            (false, true) => Some(Self::Retract),
            _ => None,
        }
    }
}

/// Arm, roller and shooter speeds produced by whichever layer is in control.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MechanismSpeeds {
    pub arm:     f64,
    pub roller:  f64,
    pub shooter: f64,
}

impl MechanismSpeeds {
    pub const STOPPED: Self = Self {
        arm:     0.0,
        roller:  0.0,
        shooter: 0.0,
    };
}

/// The full command set written to the hardware every cycle.
///
/// There is no partial form of this type. Anything that drives the robot
/// produces all of it, so a cycle can't silently skip an actuator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuatorCommands {
    pub drive_left:  f64,
    pub drive_right: f64,
    pub roller:      f64,
    pub arm:         f64,
    pub shooter:     f64,
    pub gear:        GearState,
    pub compressor:  bool,
}

impl ActuatorCommands {
    /// Every motor stopped, solenoids held where they are.
    pub const fn idle(gear: GearState, compressor: bool) -> Self {
        Self {
            drive_left: 0.0,
            drive_right: 0.0,
            roller: 0.0,
            arm: 0.0,
            shooter: 0.0,
            gear,
            compressor,
        }
    }

    /// `(high, low)` shifter solenoid levels. Never both on.
    pub fn shifter_levels(&self) -> (bool, bool) {
        match self.gear {
            GearState::High => (true, false),
            GearState::Low => (false, true),
        }
    }

    /// Speeds in emission order: drive left, drive right, roller, arm, shooter.
    pub fn speeds(&self) -> [f64; 5] {
        [
            self.drive_left,
            self.drive_right,
            self.roller,
            self.arm,
            self.shooter,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_switches_read_untriggered() {
        let readings =
            SwitchReadings::interpret(&LimitSwitches::default(), SwitchPolarity::ActiveLow);
        assert_eq!(readings, SwitchReadings::default());
        assert!(!readings.conflicting());
    }

    #[test]
    fn shooter_polarity_is_applied() {
        let levels = LimitSwitches {
            shooter_level: true,
            ..LimitSwitches::default()
        };
        assert!(!SwitchReadings::interpret(&levels, SwitchPolarity::ActiveLow).shooter_tripped);
        assert!(SwitchReadings::interpret(&levels, SwitchPolarity::ActiveHigh).shooter_tripped);
    }

    #[test]
    fn both_arm_switches_pressed_is_a_conflict() {
        let levels = LimitSwitches {
            arm_extended_level: false,
            arm_retracted_level: false,
            shooter_level: true,
        };
        assert!(SwitchReadings::interpret(&levels, SwitchPolarity::ActiveLow).conflicting());
    }

    #[test]
    fn trigger_tie_break() {
        assert_eq!(ArmRequest::from_triggers(true, false), Some(ArmRequest::Extend));
        assert_eq!(ArmRequest::from_triggers(false, true), Some(ArmRequest::Retract));
        assert_eq!(ArmRequest::from_triggers(true, true), None);
        assert_eq!(ArmRequest::from_triggers(false, false), None);
    }

    #[test]
    fn shifter_levels_are_exclusive() {
        let high = ActuatorCommands::idle(GearState::High, true);
        let low = ActuatorCommands::idle(GearState::Low, true);
        assert_eq!(high.shifter_levels(), (true, false));
        assert_eq!(low.shifter_levels(), (false, true));
    }
}

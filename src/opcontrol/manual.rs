//! Manual override of the arm, roller and shooter.
//!
//! Manual mode hands the mechanisms straight to the operator, for when a
//! switch fails or the automatic sequence gets into a state nobody wants.
//! The triggers drive the arm directly, the pass and intake buttons run the
//! roller in reverse or forward, and a held fire button runs the shooter. Both state machines are
//! bypassed for as long as the mode stays on.

use log::info;

use super::toggle::Toggle;
use crate::{
    config::GobblerConfig,
    io::{ArmRequest, Buttons, MechanismSpeeds},
};

/// Latched manual mode, toggled by its own button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualOverride {
    toggle: Toggle,
}

impl ManualOverride {
    /// Starts in automatic mode.
    pub const fn new() -> Self {
        Self {
            toggle: Toggle::new(false),
        }
    }

    pub fn is_enabled(&self) -> bool { self.toggle.is_on() }

    /// Feeds the manual toggle button. Returns the new mode if it changed.
    pub fn update(&mut self, level: bool) -> Option<bool> {
        let (enabled, changed) = self.toggle.update(level);
        if !changed {
            return None;
        }
        if enabled {
            info!("manual override on");
        } else {
            info!("manual override off, automatic control resumes from Home");
        }
        Some(enabled)
    }

    /// Maps buttons straight to mechanism speeds.
    ///
    /// Extend drives the arm down at `manual_arm_down_speed`, retract brings it
    /// up at `manual_arm_up_speed`, and both or neither hold it still. The
    /// roller follows the same rule with pass (`pass_roller_speed`) and intake
    /// (`manual_intake_speed`).
    pub fn speeds(&self, buttons: &Buttons, config: &GobblerConfig) -> MechanismSpeeds {
        let arm = match ArmRequest::from_triggers(buttons.extend, buttons.retract) {
            Some(ArmRequest::Extend) => config.manual_arm_down_speed,
            Some(ArmRequest::Retract) => config.manual_arm_up_speed,
            None => 0.0,
        };

        let roller = match (buttons.pass, buttons.intake) {
            (true, false) => config.pass_roller_speed,
            (false, true) => config.manual_intake_speed,
            _ => 0.0,
        };

        MechanismSpeeds {
            arm,
            roller,
            shooter: if buttons.fire { config.shooter_speed } else { 0.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_on_and_off() {
        let mut manual = ManualOverride::new();
        assert_eq!(manual.update(true), Some(true));
        assert_eq!(manual.update(true), None);
        assert_eq!(manual.update(false), None);
        assert!(manual.is_enabled());
        assert_eq!(manual.update(true), Some(false));
        assert!(!manual.is_enabled());
    }

    #[test]
    fn triggers_drive_arm() {
        let config = GobblerConfig::default();
        let manual = ManualOverride::new();

        let down = Buttons {
            extend: true,
            ..Buttons::default()
        };
        let up = Buttons {
            retract: true,
            ..Buttons::default()
        };
        let both = Buttons {
            extend: true,
            retract: true,
            ..Buttons::default()
        };

        assert_eq!(manual.speeds(&down, &config).arm, -1.0);
        assert_eq!(manual.speeds(&up, &config).arm, 1.0);
        assert_eq!(manual.speeds(&both, &config).arm, 0.0);
        assert_eq!(manual.speeds(&Buttons::default(), &config), MechanismSpeeds::STOPPED);
    }

    #[test]
    fn reduced_down_rate() {
        let config = GobblerConfig {
            manual_arm_down_speed: -0.5,
            ..GobblerConfig::default()
        };
        let down = Buttons {
            extend: true,
            ..Buttons::default()
        };
        assert_eq!(ManualOverride::new().speeds(&down, &config).arm, -0.5);
    }

    #[test]
    fn intake_button_pulls_ball_in() {
        let config = GobblerConfig::default();
        let manual = ManualOverride::new();

        let intake = Buttons {
            intake: true,
            ..Buttons::default()
        };
        assert_eq!(manual.speeds(&intake, &config).roller, 1.0);

        let both = Buttons {
            intake: true,
            pass: true,
            ..Buttons::default()
        };
        assert_eq!(manual.speeds(&both, &config).roller, 0.0);
    }

    #[test]
    fn pass_and_shoot_buttons() {
        let config = GobblerConfig::default();
        let buttons = Buttons {
            pass: true,
            fire: true,
            ..Buttons::default()
        };
        let speeds = ManualOverride::new().speeds(&buttons, &config);
        assert_eq!(speeds.roller, -1.0);
        assert_eq!(speeds.shooter, 1.0);
    }
}

//! Shot sequencing.
//!
//! A shot is only started by a fire press, and only outside manual mode.
//! While it runs, the intake state machine is frozen.
//!
//! 1. **ClearingArm**: drive the arm down out of the shooter's path, with the
//!    roller turning gently to keep the ball seated, until the lower switch
//!    confirms the arm is extended.
//! 2. **Firing**: run the shooter through one stroke.
//!
//! # Stroke completion
//!
//! The shooter switch is the same one the idle path reads as "cocked and
//! ready", so at the start of a shot it is usually already tripped. A stroke
//! counts as complete only once the switch has been seen released and then
//! tripped again. Treating the very first trip as completion would end the
//! shot before the shooter moved.
//!
//! Both phases are bounded by `travel_timeout`. A clearing arm that never
//! reaches the floor is stopped and waits for the switch. A stroke that never
//! completes (a stuck or dead shooter switch) stops the shooter and ends the
//! shot, so the robot does not sit in the fire sequence forever.

use std::time::Duration;

use log::info;

use crate::{
    config::GobblerConfig,
    error::Faults,
    io::{MechanismSpeeds, SwitchReadings},
    timer::{Stage, TravelWatch},
};

/// Phase of a shot in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireState {
    ClearingArm,
    Firing,
}

/// Result of one fire cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireStep {
    pub speeds:   MechanismSpeeds,
    /// The shot is over, by a finished stroke or a stroke timeout.
    pub complete: bool,
}

/// The fire state machine. It exists only while a shot is requested.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use gobbler::{
///     config::{GobblerConfig, SwitchPolarity},
///     error::Faults,
///     fire::{FireFsm, FireState},
///     io::SwitchReadings,
/// };
///
/// let config = GobblerConfig::default().with_shooter_switch(SwitchPolarity::ActiveLow);
/// let mut faults = Faults::new();
/// let mut fire = FireFsm::new(Duration::ZERO);
///
/// let at_floor = SwitchReadings {
///     arm_extended: true,
///     ..SwitchReadings::default()
/// };
/// let step = fire.step(&at_floor, Duration::ZERO, &config, &mut faults);
/// assert_eq!(fire.state(), FireState::Firing);
/// assert_eq!(step.speeds.shooter, config.shooter_speed);
/// ```
#[derive(Debug, Clone)]
pub struct FireFsm {
    state:           FireState,
    stroke_released: bool,
    /// Watches the arm while clearing, then the shooter while firing.
    travel:          TravelWatch,
}

impl FireFsm {
    /// Starts a shot at `ClearingArm`.
    pub fn new(now: Duration) -> Self {
        Self {
            state:           FireState::ClearingArm,
            stroke_released: false,
            travel:          TravelWatch::new(now),
        }
    }

    /// Current phase of the shot.
    pub fn state(&self) -> FireState { self.state }

    /// Runs one cycle of the shot.
    ///
    /// # Arguments
    ///
    /// - `switches`: this cycle's interpreted limit switches.
    /// - `now`: this cycle's clock reading.
    /// - `faults`: a phase that overruns `travel_timeout` is reported here.
    pub fn step(
        &mut self,
        switches: &SwitchReadings,
        now: Duration,
        config: &GobblerConfig,
        faults: &mut Faults,
    ) -> FireStep {
        if self.state == FireState::ClearingArm
            && switches.arm_extended
            && !switches.conflicting()
        {
            info!("fire {:?} -> {:?}", self.state, FireState::Firing);
            self.state = FireState::Firing;
            self.stroke_released = false;
            self.travel.restart(now);
        }

        match self.state {
            FireState::ClearingArm => {
                let stalled =
                    self.travel
                        .stalled(now, config.travel_timeout, Stage::ClearingArm, faults);
                let arm = if stalled { 0.0 } else { config.fire_clear_arm_speed };
                FireStep {
                    speeds:   MechanismSpeeds {
                        arm,
                        roller: config.fire_clear_roller_speed,
                        ..MechanismSpeeds::STOPPED
                    },
                    complete: false,
                }
            }
            FireState::Firing => {
                if !switches.shooter_tripped {
                    self.stroke_released = true;
                }
                let stroked = self.stroke_released && switches.shooter_tripped;
                let stalled = !stroked
                    && self
                        .travel
                        .stalled(now, config.travel_timeout, Stage::Firing, faults);
                if stroked {
                    info!("fire stroke complete");
                } else if stalled {
                    info!("fire abandoned, shooter stopped");
                }

                let complete = stroked || stalled;
                FireStep {
                    speeds: MechanismSpeeds {
                        shooter: if complete { 0.0 } else { config.shooter_speed },
                        ..MechanismSpeeds::STOPPED
                    },
                    complete,
                }
            }
        }
    }
}

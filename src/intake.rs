//! Arm and intake roller sequencing.
//!
//! The arm swings between its home position and the floor. Picking up a ball
//! is a four-state cycle:
//!
//! ```text
//!           extend              lower switch
//!   Home ───────────► Extending ────────────► Extended
//!    ▲                 │     ▲                   │
//!    │ upper switch    │     │ extend            │ retract
//!    │          retract│     │                   │
//!    └──────────── Retracting ◄──────────────────┘
//! ```
//!
//! Operator triggers always win over the switches, so a retract can be
//! started before the arm reaches the floor and an extend can interrupt a
//! retract.
//!
//! The roller pulls the ball in at `roller_intake_speed` until the retract
//! has run for `roller_decel_after`, then drops to `roller_settle_speed` so the
//! ball doesn't slam into its resting spot. There is no ball sensor, so this
//! is a plain time step.

use std::time::Duration;

use log::info;

use crate::{
    config::GobblerConfig,
    error::{Fault, Faults, report},
    io::{ArmRequest, MechanismSpeeds, SwitchReadings},
    timer::{PickupTimer, Stage, TravelWatch},
};

/// Position of the pickup arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmState {
    Home,
    Extending,
    Extended,
    Retracting,
}

/// The arm/intake state machine.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use gobbler::{
///     config::{GobblerConfig, SwitchPolarity},
///     error::Faults,
///     intake::{ArmState, IntakeFsm},
///     io::{ArmRequest, SwitchReadings},
/// };
///
/// let config = GobblerConfig::default().with_shooter_switch(SwitchPolarity::ActiveLow);
/// let mut faults = Faults::new();
/// let mut fsm = IntakeFsm::new(Duration::ZERO);
///
/// let speeds = fsm.step(
///     Some(ArmRequest::Extend),
///     &SwitchReadings::default(),
///     Duration::ZERO,
///     &config,
///     &mut faults,
/// );
/// assert_eq!(fsm.state(), ArmState::Extending);
/// assert_eq!(speeds.arm, config.arm_extend_speed);
/// ```
#[derive(Debug, Clone)]
pub struct IntakeFsm {
    state:        ArmState,
    pickup_timer: PickupTimer,
    travel:       TravelWatch,
    /// Conflicting arm switches were seen last cycle.
    switch_fault: bool,
}

impl IntakeFsm {
    /// Starts at `Home` with every timer running from `now`.
    pub fn new(now: Duration) -> Self {
        Self {
            state:        ArmState::Home,
            pickup_timer: PickupTimer::new(now),
            travel:       TravelWatch::new(now),
            switch_fault: false,
        }
    }

    /// Current arm state.
    pub fn state(&self) -> ArmState { self.state }

    /// Timer the roller slow-down reads. Reset on every entry into `Retracting`.
    pub fn pickup_timer(&self) -> &PickupTimer { &self.pickup_timer }

    /// Runs one cycle: take at most one transition, then return the speeds
    /// for the state the arm is now in.
    ///
    /// # Arguments
    ///
    /// - `request`: the resolved operator trigger request, if any.
    /// - `switches`: this cycle's interpreted limit switches.
    /// - `now`: this cycle's clock reading.
    /// - `faults`: sensor faults detected this cycle are reported here.
    pub fn step(
        &mut self,
        request: Option<ArmRequest>,
        switches: &SwitchReadings,
        now: Duration,
        config: &GobblerConfig,
        faults: &mut Faults,
    ) -> MechanismSpeeds {
        let conflict = switches.conflicting();
        if conflict && !self.switch_fault {
            report(faults, Fault::ConflictingLimitSwitches);
        }
        self.switch_fault = conflict;

        if let Some(next) = self.next_state(request, switches, conflict) {
            info!("arm {:?} -> {:?}", self.state, next);
            self.enter(next, now);
        }

        let stage = match self.state {
            ArmState::Extending => Some(Stage::Extending),
            ArmState::Retracting => Some(Stage::Retracting),
            ArmState::Home | ArmState::Extended => None,
        };
        let stalled = stage.is_some_and(|stage| {
            self.travel
                .stalled(now, config.travel_timeout, stage, faults)
        });

        let mut speeds = self.output(now, config);
        if stalled {
            speeds.arm = 0.0;
        }
        speeds.shooter = if switches.shooter_tripped { 0.0 } else { config.shooter_speed };
        speeds
    }

    /// Forces the arm back to `Home` without finishing whatever was running.
    pub fn pin_home(&mut self, now: Duration) {
        if self.state != ArmState::Home {
            info!("arm {:?} abandoned, pinned Home", self.state);
        }
        self.enter(ArmState::Home, now);
    }

    /// Resumes automatic control at `state` after another layer has moved the
    /// arm.
    ///
    /// Only the two resting states make sense here. Resuming mid-travel would
    /// skip the entry bookkeeping of that travel, so any other request is a
    /// logic fault and the arm goes to `Home` instead.
    pub fn resume_at(&mut self, state: ArmState, now: Duration, faults: &mut Faults) {
        match state {
            ArmState::Home | ArmState::Extended => {
                info!("arm resumes at {state:?}");
                self.enter(state, now);
            }
            ArmState::Extending | ArmState::Retracting => {
                report(faults, Fault::InvalidHandOff(state));
                self.enter(ArmState::Home, now);
            }
        }
    }

    fn next_state(
        &self,
        request: Option<ArmRequest>,
        switches: &SwitchReadings,
        conflict: bool,
    ) -> Option<ArmState> {
        use ArmState::*;

        match (self.state, request) {
            (Home, Some(ArmRequest::Extend)) => Some(Extending),
            (Extending, Some(ArmRequest::Retract)) => Some(Retracting),
            (Extending, _) if !conflict && switches.arm_extended => Some(Extended),
            (Extended, Some(ArmRequest::Retract)) => Some(Retracting),
            (Retracting, Some(ArmRequest::Extend)) => Some(Extending),
            (Retracting, _) if !conflict && switches.arm_retracted => Some(Home),
            _ => None,
        }
    }

    fn enter(&mut self, next: ArmState, now: Duration) {
        self.state = next;
        self.travel.restart(now);
        if next == ArmState::Retracting {
            self.pickup_timer.reset(now);
        }
    }

    fn output(&self, now: Duration, config: &GobblerConfig) -> MechanismSpeeds {
        let (arm, roller) = match self.state {
            ArmState::Home => (0.0, 0.0),
            ArmState::Extending => (config.arm_extend_speed, config.roller_intake_speed),
            ArmState::Extended => (0.0, config.roller_intake_speed),
            ArmState::Retracting => {
                let roller = if self.pickup_timer.elapsed(now) >= config.roller_decel_after {
                    config.roller_settle_speed
                } else {
                    config.roller_intake_speed
                };
                (config.arm_retract_speed, roller)
            }
        };

        MechanismSpeeds {
            arm,
            roller,
            shooter: 0.0,
        }
    }
}

//! The control core and the robot lifecycle around it.
//!
//! [`Teleop`] owns every piece of state the driver-control period needs:
//! toggles, the gear shifter, both state machines and the fire request. One
//! call to [`Teleop::cycle`] runs the whole pipeline:
//!
//! 1. toggles (compressor, manual mode) and the fire button edge
//! 2. gear shift
//! 3. pick the layer in control: manual, fire, or intake
//! 4. advance that layer's state machine
//! 5. condition the drive axes
//! 6. assemble the full command set
//!
//! Exactly one layer produces the mechanism speeds each cycle. While a shot is
//! requested the intake state machine does not run at all, and while manual
//! mode is on neither state machine does.
//!
//! [`Robot`] wraps the core with the competition lifecycle and the hardware
//! ports. Every periodic call samples once and emits once.

use std::time::Duration;

use log::{debug, info, warn};

use crate::{
    auton::TimedDrive,
    config::{GobblerConfig, SwitchPolarity},
    drivetrain::{self, GearShifter, GearState},
    error::{ConfigError, Faults},
    fire::{FireFsm, FireState},
    intake::{ArmState, IntakeFsm},
    io::{ActuatorCommands, ArmRequest, CycleInputs, SwitchReadings},
    opcontrol::{
        manual::ManualOverride,
        toggle::{RisingEdge, Toggle},
    },
    ports::{InputPort, OutputPort},
};

/// What one cycle produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub commands: ActuatorCommands,
    /// Faults detected this cycle, already logged.
    pub faults:   Faults,
}

/// Driver-control state, created once at the start of the period.
#[derive(Debug, Clone)]
pub struct Teleop {
    config:     GobblerConfig,
    shooter:    SwitchPolarity,
    compressor: Toggle,
    manual:     ManualOverride,
    fire_edge:  RisingEdge,
    shifter:    GearShifter,
    intake:     IntakeFsm,
    /// Present exactly while a shot is requested.
    fire:       Option<FireFsm>,
    cycles:     u64,
}

impl Teleop {
    /// Creates the core in low gear with the compressor on.
    ///
    /// # Errors
    ///
    /// Returns the first problem [`GobblerConfig::validate`] finds.
    pub fn new(config: GobblerConfig, now: Duration) -> Result<Self, ConfigError> {
        let shooter = config.validate()?;
        Ok(Self::from_validated(config, shooter, now, GearState::Low))
    }

    pub(crate) fn from_validated(
        config: GobblerConfig,
        shooter: SwitchPolarity,
        now: Duration,
        gear: GearState,
    ) -> Self {
        Self {
            config,
            shooter,
            compressor: Toggle::new(true),
            manual: ManualOverride::new(),
            fire_edge: RisingEdge::new(),
            shifter: GearShifter::new(gear),
            intake: IntakeFsm::new(now),
            fire: None,
            cycles: 0,
        }
    }

    /// Current arm state. Frozen while a shot runs, `Home` in manual mode.
    pub fn arm_state(&self) -> ArmState { self.intake.state() }

    /// Phase of the shot in progress, if one is requested.
    pub fn fire_state(&self) -> Option<FireState> { self.fire.as_ref().map(FireFsm::state) }

    /// Returns true from the fire press until the shot ends.
    pub fn fire_requested(&self) -> bool { self.fire.is_some() }

    pub fn manual_enabled(&self) -> bool { self.manual.is_enabled() }

    pub fn compressor_enabled(&self) -> bool { self.compressor.is_on() }

    pub fn gear(&self) -> GearState { self.shifter.gear() }

    /// Gear shifts performed since the period started.
    pub fn shift_count(&self) -> u32 { self.shifter.shift_count() }

    /// Cycles run since the period started.
    pub fn cycles(&self) -> u64 { self.cycles }

    /// Runs one control cycle.
    ///
    /// Returns the full command set for this cycle together with any faults
    /// detected along the way. Nothing here fails: faults are logged, handled
    /// and reported, and the commands are always complete.
    pub fn cycle(&mut self, inputs: &CycleInputs) -> CycleReport {
        let buttons = &inputs.buttons;
        let now = inputs.now;
        let mut faults = Faults::new();

        let (compressor, compressor_changed) = self.compressor.update(buttons.compressor_toggle);
        if compressor_changed {
            info!("compressor {}", if compressor { "on" } else { "off" });
        }

        if self.manual.update(buttons.manual_toggle) == Some(true) {
            self.intake.pin_home(now);
            if self.fire.take().is_some() {
                warn!("fire request abandoned for manual override");
            }
        }
        let fire_pressed = self.fire_edge.update(buttons.fire);

        self.shifter.update(buttons.gear_high, buttons.gear_low);

        let switches = SwitchReadings::interpret(&inputs.switches, self.shooter);

        let speeds = if self.manual.is_enabled() {
            self.manual.speeds(buttons, &self.config)
        } else {
            if fire_pressed && self.fire.is_none() {
                info!("fire requested with arm {:?}", self.intake.state());
                self.fire = Some(FireFsm::new(now));
            }

            match self.fire.as_mut() {
                Some(fire) => {
                    let step = fire.step(&switches, now, &self.config, &mut faults);
                    if step.complete {
                        self.fire = None;
                        self.intake.resume_at(ArmState::Extended, now, &mut faults);
                    }
                    step.speeds
                }
                None => {
                    let request = ArmRequest::from_triggers(buttons.extend, buttons.retract);
                    self.intake
                        .step(request, &switches, now, &self.config, &mut faults)
                }
            }
        };

        let (drive_left, drive_right) =
            drivetrain::tank(inputs.left_axis, inputs.right_axis, &self.config);

        let commands = ActuatorCommands {
            drive_left,
            drive_right,
            roller: speeds.roller,
            arm: speeds.arm,
            shooter: speeds.shooter,
            gear: self.shifter.gear(),
            compressor,
        };

        if self.cycles % u64::from(self.config.status_period) == 0 {
            debug!(
                "cycle {}: arm {:?} fire {:?} manual {} roller {:.2} arm {:.2} shooter {:.2}",
                self.cycles,
                self.intake.state(),
                self.fire_state(),
                self.manual.is_enabled(),
                commands.roller,
                commands.arm,
                commands.shooter,
            );
        }
        self.cycles += 1;

        CycleReport { commands, faults }
    }
}

/// Competition period the robot is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Disabled,
    Autonomous,
    Teleop,
}

/// The robot: hardware ports plus whichever period's logic is running.
pub struct Robot<I, O> {
    inputs:     I,
    outputs:    O,
    config:     GobblerConfig,
    shooter:    SwitchPolarity,
    period:     Period,
    gear:       GearState,
    compressor: bool,
    teleop:     Option<Teleop>,
    auton:      Option<TimedDrive>,
}

impl<I: InputPort, O: OutputPort> Robot<I, O> {
    /// # Errors
    ///
    /// Returns the first problem [`GobblerConfig::validate`] finds.
    pub fn new(config: GobblerConfig, inputs: I, outputs: O) -> Result<Self, ConfigError> {
        let shooter = config.validate()?;
        Ok(Self {
            inputs,
            outputs,
            config,
            shooter,
            period: Period::Disabled,
            gear: GearState::Low,
            compressor: false,
            teleop: None,
            auton: None,
        })
    }

    /// The period the last lifecycle call ran in.
    pub fn period(&self) -> Period { self.period }

    /// Driver-control state, once teleop has started.
    pub fn teleop(&self) -> Option<&Teleop> { self.teleop.as_ref() }

    pub fn inputs_mut(&mut self) -> &mut I { &mut self.inputs }

    pub fn outputs(&self) -> &O { &self.outputs }

    /// Once at power-on: shift to low gear with everything stopped.
    pub fn robot_init(&mut self) {
        self.gear = GearState::Low;
        self.outputs
            .emit(&ActuatorCommands::idle(self.gear, self.compressor));
        info!("robot init complete");
    }

    /// Every cycle while disabled: all motors stopped.
    ///
    /// Nothing is read from the snapshot. It is still taken so every cycle
    /// samples exactly once.
    pub fn disabled_periodic(&mut self) {
        self.period = Period::Disabled;
        let _ = self.inputs.sample();
        self.outputs
            .emit(&ActuatorCommands::idle(self.gear, self.compressor));
    }

    /// Start of autonomous: compressor on, timed drive started.
    pub fn autonomous_init(&mut self) {
        let now = self.inputs.sample().now;
        self.period = Period::Autonomous;
        self.compressor = true;
        self.auton = Some(TimedDrive::new(now, &self.config));
        info!("autonomous started");
    }

    /// Every autonomous cycle. Starts the timed drive if init was skipped.
    pub fn autonomous_periodic(&mut self) {
        let now = self.inputs.sample().now;
        if self.period != Period::Autonomous {
            warn!("autonomous periodic before autonomous init");
            self.period = Period::Autonomous;
            self.compressor = true;
            self.auton = None;
        }
        let config = &self.config;
        let maneuver = *self.auton.get_or_insert_with(|| TimedDrive::new(now, config));
        let (drive_left, drive_right) = maneuver.drive(now);

        self.outputs.emit(&ActuatorCommands {
            drive_left,
            drive_right,
            ..ActuatorCommands::idle(self.gear, self.compressor)
        });
    }

    /// Start of driver control: fresh state, compressor on, timers reset,
    /// every actuator zeroed.
    pub fn teleop_init(&mut self) {
        let now = self.inputs.sample().now;
        self.start_teleop(now);
        self.outputs
            .emit(&ActuatorCommands::idle(self.gear, self.compressor));
    }

    /// Every driver-control cycle. Starts teleop if init was skipped.
    pub fn teleop_periodic(&mut self) -> CycleReport {
        let inputs = self.inputs.sample();
        if self.teleop.is_none() {
            warn!("teleop periodic before teleop init");
            self.start_teleop(inputs.now);
        }

        let report = match self.teleop.as_mut() {
            Some(teleop) => teleop.cycle(&inputs),
            None => CycleReport {
                commands: ActuatorCommands::idle(self.gear, self.compressor),
                faults:   Faults::new(),
            },
        };
        self.gear = report.commands.gear;
        self.compressor = report.commands.compressor;
        self.outputs.emit(&report.commands);
        report
    }

    fn start_teleop(&mut self, now: Duration) {
        self.period = Period::Teleop;
        self.auton = None;
        self.compressor = true;
        self.teleop = Some(Teleop::from_validated(
            self.config.clone(),
            self.shooter,
            now,
            self.gear,
        ));
        info!("teleop started");
    }
}

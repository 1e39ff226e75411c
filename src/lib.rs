//! # Gobbler
//!
//! Gobbler is the control core for a ball-handling competition robot: a
//! pickup arm with an intake roller (the "gobbler"), a shooter, a two-speed
//! tank drivetrain and a pneumatic compressor. It provides:
//!
//! - **Intake sequencing**: an arm/roller state machine driven by limit
//!   switches, the operator's triggers and a timed roller slow-down.
//! - **Shot sequencing**: a fire state machine that clears the arm out of the
//!   way and runs the shooter through one stroke.
//! - **Manual override**: a latched mode that hands the arm straight to the
//!   operator's triggers.
//! - **Operator Control**: press-to-toggle latches, gear shifting and drive
//!   stick conditioning.
//! - **Logging**: a console and file logger for reading back a match.
//!
//! The core is pure over two port traits. It reads one input snapshot and
//! writes one full command set per cycle, and never blocks. Device bindings
//! for the V5 Brain live behind the `vex` feature.
//!
//! ## Quick Start
//!
//! ```
//! use std::time::Duration;
//!
//! use gobbler::{
//!     config::{GobblerConfig, SwitchPolarity},
//!     intake::ArmState,
//!     io::{Buttons, CycleInputs},
//!     robot::Teleop,
//! };
//!
//! let config = GobblerConfig::default().with_shooter_switch(SwitchPolarity::ActiveLow);
//! let mut teleop = Teleop::new(config, Duration::ZERO).expect("valid config");
//!
//! let inputs = CycleInputs {
//!     buttons: Buttons { extend: true, ..Buttons::default() },
//!     ..CycleInputs::default()
//! };
//! let report = teleop.cycle(&inputs);
//!
//! assert_eq!(teleop.arm_state(), ArmState::Extending);
//! assert_eq!(report.commands.arm, -1.0);
//! ```
//!
//! ## Modules
//!
//! - [`robot`]: the per-cycle control core and the competition lifecycle.
//! - [`intake`] and [`fire`]: the two mechanism state machines.
//! - [`opcontrol`]: toggles, edge detection and manual override.
//! - [`drivetrain`]: drive conditioning and gear shifting.
//! - [`fs`]: logging.

/// The autonomous routine.
///
/// Provides [`TimedDrive`](auton::TimedDrive), a single straight drive for a
/// fixed time.
pub mod auton;

/// Mechanism and drivetrain tunables.
pub mod config;

/// Tank drive conditioning and gear shifting.
///
/// Provides the [`GearShifter`](drivetrain::GearShifter) and the deadband and
/// clamping applied to the drive sticks.
pub mod drivetrain;

/// Configuration errors and runtime faults.
pub mod error;

/// Shot sequencing state machine.
pub mod fire;

/// Filesystem utilities module.
///
/// Contains the logger that records state machine transitions and sensor
/// faults to the console and `log.txt`.
pub mod fs;

/// Arm and intake roller state machine.
pub mod intake;

/// Per-cycle input snapshot and actuator command types.
pub mod io;

/// Operator control utilities module.
///
/// Turns raw button levels into one-shot events and latched toggles, and
/// provides the manual override layer.
pub mod opcontrol;

/// Hardware port traits the control core reads and writes through.
pub mod ports;

/// The control core and the robot lifecycle.
///
/// Provides [`Teleop`](robot::Teleop), which owns all driver-control state,
/// and [`Robot`](robot::Robot), which wires it to the hardware ports.
pub mod robot;

/// Elapsed-time helpers for the state machines.
pub mod timer;

/// V5 Brain device bindings.
///
/// Provides [`VexRobot`](hardware::VexRobot), which implements the ports over
/// real motors, ADI switches and solenoids and runs the competition periods.
#[cfg(feature = "vex")]
pub mod hardware;

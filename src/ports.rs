//! Hardware port traits.
//!
//! The control core reads one snapshot and writes one command set per cycle
//! through these two traits. The `vex` feature provides implementations
//! backed by V5 devices in the `hardware` module; tests use in-memory ones.
//!
//! # Contract
//!
//! - Both calls are non-blocking, register-style accesses.
//! - `sample` is called exactly once per cycle, before any decision is made.
//!   Periods that act on nothing (disabled) still sample, so a port can count
//!   cycles by its reads.
//! - `emit` is called exactly once per cycle with the full command set. Device
//!   errors are the implementation's to log; they must not stop the loop.

use crate::io::{ActuatorCommands, CycleInputs};

/// Source of the per-cycle input snapshot.
pub trait InputPort {
    /// Reads every input for this cycle.
    fn sample(&mut self) -> CycleInputs;
}

/// Sink for the per-cycle command set.
pub trait OutputPort {
    /// Writes every actuator for this cycle.
    fn emit(&mut self, commands: &ActuatorCommands);
}

//! Configuration errors and runtime faults.
//!
//! Nothing that goes wrong during a cycle is allowed to stop the control loop.
//! Runtime problems are [`Fault`] values: they are logged the moment they are
//! detected and handed back with the cycle's commands so callers and tests can
//! see them. Only configuration can fail outright, before the loop starts.

use core::fmt;

use log::{error, warn};

use crate::{intake::ArmState, timer::Stage};

/// Most faults a single cycle can report.
pub const MAX_FAULTS_PER_CYCLE: usize = 4;

/// Faults detected during one cycle.
pub type Faults = heapless::Vec<Fault, MAX_FAULTS_PER_CYCLE>;

/// Rejected configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The shooter switch polarity was not chosen.
    ShooterSwitchPolarityUnset,
    /// A speed is outside [-1, 1] or not finite.
    SpeedOutOfRange { name: &'static str, value: f64 },
    /// Deadband must be in [0, 1).
    DeadbandOutOfRange(f64),
    ZeroTravelTimeout,
    ZeroStatusPeriod,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShooterSwitchPolarityUnset => {
                write!(f, "shooter switch polarity must be set explicitly")
            }
            Self::SpeedOutOfRange { name, value } => {
                write!(f, "{name} = {value} is outside [-1, 1]")
            }
            Self::DeadbandOutOfRange(value) => {
                write!(f, "drive deadband {value} is outside [0, 1)")
            }
            Self::ZeroTravelTimeout => write!(f, "travel timeout must be non-zero"),
            Self::ZeroStatusPeriod => write!(f, "status period must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Something implausible seen while running a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Both arm switches report triggered. Limit-driven transitions are held.
    ConflictingLimitSwitches,
    /// A travel or shooter stroke ran past the travel timeout without reaching
    /// its switch.
    TravelTimeout { stage: Stage },
    /// A state machine was handed a state it cannot resume from. The arm was
    /// forced back to `Home`.
    InvalidHandOff(ArmState),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConflictingLimitSwitches => {
                write!(f, "arm extended and retracted switches both triggered")
            }
            Self::TravelTimeout { stage } => {
                write!(f, "{stage:?} did not reach its switch in time")
            }
            Self::InvalidHandOff(state) => {
                write!(f, "cannot resume arm at {state:?}, forcing Home")
            }
        }
    }
}

/// Logs `fault` and records it for this cycle.
///
/// Logic faults log at error level, sensor faults at warn. If the cycle has
/// already recorded [`MAX_FAULTS_PER_CYCLE`] faults the extra one is only
/// logged.
pub fn report(faults: &mut Faults, fault: Fault) {
    match fault {
        Fault::InvalidHandOff(_) => error!("{fault}"),
        _ => warn!("{fault}"),
    }
    let _ = faults.push(fault);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_keeps_at_most_capacity() {
        let mut faults = Faults::new();
        for _ in 0..MAX_FAULTS_PER_CYCLE + 2 {
            report(&mut faults, Fault::ConflictingLimitSwitches);
        }
        assert_eq!(faults.len(), MAX_FAULTS_PER_CYCLE);
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            ConfigError::ShooterSwitchPolarityUnset.to_string(),
            "shooter switch polarity must be set explicitly"
        );
        assert_eq!(
            Fault::TravelTimeout {
                stage: Stage::Retracting,
            }
            .to_string(),
            "Retracting did not reach its switch in time"
        );
    }
}

//! Operator control building blocks.
//!
//! This module turns raw gamepad levels into the operator intents the control
//! core acts on.
//!
//! # Features
//!
//! - **Edge detection**: one event per press, however long it is held.
//! - **Toggles**: press-to-flip latches for the compressor and manual mode.
//! - **Manual override**: direct trigger-to-arm control that bypasses the
//!   state machines.
//!
//! # Example
//!
//! ```
//! use gobbler::opcontrol::{manual::ManualOverride, toggle::RisingEdge};
//!
//! let mut fire = RisingEdge::new();
//! let mut manual = ManualOverride::new();
//!
//! assert!(fire.update(true));
//! assert!(!fire.update(true));
//! assert_eq!(manual.update(true), Some(true));
//! ```

/// Manual override layer.
///
/// Provides [`ManualOverride`](manual::ManualOverride), which maps the
/// triggers straight onto arm speed while manual mode is latched on.
pub mod manual;

/// Button edge detection and toggles.
///
/// Provides [`RisingEdge`](toggle::RisingEdge) and
/// [`Toggle`](toggle::Toggle).
pub mod toggle;

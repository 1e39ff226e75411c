//! Edge detection and press-to-toggle latches for gamepad buttons.
//!
//! The gamepad reports levels: a button held for half a second reads `true`
//! for every cycle in that time. [`RisingEdge`] turns that into one event per
//! press and [`Toggle`] latches a boolean that flips on each press.
//!
//! Each instance owns its own memory of the previous level, so every button
//! that needs edge behaviour gets its own instance.
//!
//! # Example
//!
//! ```
//! use gobbler::opcontrol::toggle::Toggle;
//!
//! let mut compressor = Toggle::new(true);
//! assert_eq!(compressor.update(true), (false, true)); // pressed
//! assert_eq!(compressor.update(true), (false, false)); // still held
//! assert_eq!(compressor.update(false), (false, false)); // released
//! assert_eq!(compressor.update(true), (true, true)); // pressed again
//! ```

/// Reports a single `true` for each low-to-high transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RisingEdge {
    previous: bool,
}

impl RisingEdge {
    /// Starts as if the button were released.
    pub const fn new() -> Self { Self { previous: false } }

    /// Returns true if `level` is high and the previous level was low.
    pub fn update(&mut self, level: bool) -> bool {
        let rose = level && !self.previous;
        self.previous = level;
        rose
    }
}

/// A latched boolean flipped once per button press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggle {
    edge:    RisingEdge,
    latched: bool,
}

impl Toggle {
    /// Creates a toggle latched at `initial`, as if its button were released.
    pub const fn new(initial: bool) -> Self {
        Self {
            edge:    RisingEdge::new(),
            latched: initial,
        }
    }

    /// Feeds this cycle's button level.
    ///
    /// Returns `(latched, changed)`: the latch after this update and whether it
    /// flipped on this call.
    pub fn update(&mut self, level: bool) -> (bool, bool) {
        let changed = self.edge.update(level);
        if changed {
            self.latched = !self.latched;
        }
        (self.latched, changed)
    }

    /// Current latch value.
    pub fn is_on(&self) -> bool { self.latched }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_fires_once_per_press() {
        let mut edge = RisingEdge::new();
        let levels = [false, true, true, true, false, false, true, false];
        let fired: Vec<bool> = levels.iter().map(|&l| edge.update(l)).collect();
        assert_eq!(fired, [false, true, false, false, false, false, true, false]);
    }

    #[test]
    fn held_at_start_counts_as_a_press() {
        let mut toggle = Toggle::new(false);
        assert_eq!(toggle.update(true), (true, true));
    }

    #[test]
    fn toggle_flips_only_on_rising_edges() {
        // Every level sequence of length 8.
        for pattern in 0u32..256 {
            let mut toggle = Toggle::new(false);
            let mut previous = false;
            let mut expected = false;

            for bit in 0..8 {
                let level = pattern & (1 << bit) != 0;
                let rising = level && !previous;
                if rising {
                    expected = !expected;
                }

                let (latched, changed) = toggle.update(level);
                assert_eq!(changed, rising, "pattern {pattern:#010b} bit {bit}");
                assert_eq!(latched, expected, "pattern {pattern:#010b} bit {bit}");
                previous = level;
            }
        }
    }

    #[test]
    fn toggles_are_independent() {
        let mut compressor = Toggle::new(true);
        let mut manual = Toggle::new(false);

        compressor.update(true);
        assert!(!compressor.is_on());
        assert!(!manual.is_on());

        // The manual toggle has never seen a press.
        assert_eq!(manual.update(true), (true, true));
    }
}

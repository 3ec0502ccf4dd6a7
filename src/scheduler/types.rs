/*!
 * Scheduler Types
 * Domain types for weight control
 */

use super::window::in_window;
use crate::core::types::{Degrees, Weight};
use serde::{Deserialize, Serialize};

/// A weight that applies only while an angle lies inside a window
///
/// The window is `degree ± range` on the 360-degree circle, tested with
/// [`in_window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGate {
    pub degree: Degrees,
    pub range: Degrees,
    pub weight: Weight,
}

impl WindowGate {
    pub const fn new(degree: Degrees, range: Degrees, weight: Weight) -> Self {
        Self {
            degree,
            range,
            weight,
        }
    }

    /// Whether `now` opens the gate
    #[inline]
    pub const fn admits(&self, now: Degrees) -> bool {
        in_window(now, self.degree, self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_admits() {
        let gate = WindowGate::new(90, 45, 20);
        assert!(gate.admits(90));
        assert!(!gate.admits(135));
        assert!(!gate.admits(0));
    }
}

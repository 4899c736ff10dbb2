//! Ramp combo bonus
//!
//! Each qualifying shot inside the bonus window scores `points * multiplier`,
//! restarts the window and bumps the multiplier. When the window runs out the
//! multiplier drops back to 1.

use serde::{Deserialize, Serialize};

/// Points awarded for one shot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboAward {
    pub points: i64,
    /// Multiplier that was applied to this shot
    pub multiplier: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboBonus {
    remaining_nanos: i64,
    multiplier: u32,
}

impl Default for ComboBonus {
    fn default() -> Self {
        Self {
            remaining_nanos: 0,
            multiplier: 1,
        }
    }
}

impl ComboBonus {
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn remaining_nanos(&self) -> i64 {
        self.remaining_nanos
    }

    /// Score a qualifying shot and restart the window
    pub fn register_shot(&mut self, points: i64, window_nanos: i64) -> ComboAward {
        let award = ComboAward {
            points: points * self.multiplier as i64,
            multiplier: self.multiplier,
        };
        self.remaining_nanos = window_nanos;
        self.multiplier += 1;
        award
    }

    /// Run the window down by `nanos`
    pub fn decay(&mut self, nanos: u64) {
        if self.remaining_nanos > 0 {
            self.remaining_nanos = self
                .remaining_nanos
                .saturating_sub(i64::try_from(nanos).unwrap_or(i64::MAX));
        }
        if self.remaining_nanos <= 0 {
            self.multiplier = 1;
        }
    }
}

//! Multiball mode and jackpot escalation
//!
//! Status only ever moves Inactive -> Starting -> Active -> Inactive. Starting covers
//! the gap while the extra balls are still being fed in, so a single ball in play
//! during that window does not end the mode.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MultiballStatus {
    #[default]
    Inactive,
    /// Balls are being launched
    Starting,
    Active,
}

/// Jackpot points awarded while multiball runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JackpotAward {
    pub points: i64,
    /// Multiplier applied to this jackpot
    pub multiplier: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiballController {
    status: MultiballStatus,
    jackpot_multiplier: u32,
}

impl Default for MultiballController {
    fn default() -> Self {
        Self {
            status: MultiballStatus::Inactive,
            jackpot_multiplier: 1,
        }
    }
}

impl MultiballController {
    pub fn status(&self) -> MultiballStatus {
        self.status
    }

    pub fn jackpot_multiplier(&self) -> u32 {
        self.jackpot_multiplier
    }

    /// Inactive -> Starting. Returns false (and changes nothing) from any other status.
    pub fn begin(&mut self) -> bool {
        if self.status != MultiballStatus::Inactive {
            return false;
        }
        self.status = MultiballStatus::Starting;
        self.jackpot_multiplier = 1;
        true
    }

    /// Starting -> Active, once the last ball is out
    pub fn go_live(&mut self) -> bool {
        if self.status != MultiballStatus::Starting {
            return false;
        }
        self.status = MultiballStatus::Active;
        true
    }

    /// Award `base * multiplier` and escalate the multiplier
    pub fn award_jackpot(&mut self, base: i64) -> JackpotAward {
        let award = JackpotAward {
            points: base * self.jackpot_multiplier as i64,
            multiplier: self.jackpot_multiplier,
        };
        self.jackpot_multiplier += 1;
        award
    }

    /// Active with at most one ball left?
    pub fn should_end(&self, balls_in_play: usize) -> bool {
        self.status == MultiballStatus::Active && balls_in_play <= 1
    }

    /// Active -> Inactive
    pub fn end(&mut self) -> bool {
        if self.status != MultiballStatus::Active {
            return false;
        }
        self.status = MultiballStatus::Inactive;
        true
    }
}

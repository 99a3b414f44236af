use serde::{Deserialize, Serialize};

pub const DEFAULT_HIGH_PRIORITY_SCORE: u8 = 8;
pub const DEFAULT_MEDIUM_PRIORITY_SCORE: u8 = 5;

/// Score cut-offs mapping an accumulated vitals score onto a priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityThresholds {
    pub high_priority_score: u8,
    pub medium_priority_score: u8,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            high_priority_score: DEFAULT_HIGH_PRIORITY_SCORE,
            medium_priority_score: DEFAULT_MEDIUM_PRIORITY_SCORE,
        }
    }
}

//! Round pacing and end-of-game rewards.

use serde::{Deserialize, Serialize};

/// Delays between state machine phases, all on the simulation clock (s).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// New game → first Aiming
    pub start_delay_s: f32,
    /// How long the GOAL!/SAVED!/MISSED! message stays up
    pub outcome_message_s: f32,
    /// KeeperTurn → OpponentShot ("opponent is aiming")
    pub opponent_aim_s: f32,
    /// End of a round → next Aiming
    pub next_round_delay_s: f32,
    /// Power bar fill rate (% per second)
    pub power_rate_per_s: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            start_delay_s: 1.0,
            outcome_message_s: 2.0,
            opponent_aim_s: 1.5,
            next_round_delay_s: 1.0,
            power_rate_per_s: 150.0,
        }
    }
}

/// Gold granted once at game over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    pub win: u32,
    pub draw: u32,
    pub lose: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self { win: 1500, draw: 500, lose: 250 }
    }
}

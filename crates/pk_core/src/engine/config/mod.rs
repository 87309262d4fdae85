//! # Shootout Configuration
//!
//! Every tuning constant of the shootout in one serde-friendly tree.
//!
//! ## Usage
//! ```rust
//! use pk_core::engine::config::ShootoutConfig;
//!
//! let config = ShootoutConfig::default();
//! let arcade = ShootoutConfig::arcade();
//! assert!(arcade.keeper.dive_duration_s > config.keeper.dive_duration_s);
//! ```
//!
//! ## Environment Variables
//!
//! - `PK_PROFILE`: Select preset (standard, arcade, deterministic)

mod flow_config;
mod gameplay_config;
mod physics_config;

pub use flow_config::{RewardConfig, TimingConfig};
pub use gameplay_config::{KeeperConfig, OutcomeConfig, ShotConfig};
pub use physics_config::{BallPhysicsConfig, PitchConfig};

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{CoreError, Result};

/// Number of penalty rounds in a standard shootout
pub const DEFAULT_ROUNDS: u32 = 5;

/// Environment variable holding the preset name
pub const PROFILE_ENV: &str = "PK_PROFILE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShootoutConfig {
    /// Rounds per match (one player kick + one opponent kick each)
    pub rounds: u32,
    #[serde(default)]
    pub pitch: PitchConfig,
    #[serde(default)]
    pub ball: BallPhysicsConfig,
    #[serde(default)]
    pub shot: ShotConfig,
    #[serde(default)]
    pub keeper: KeeperConfig,
    #[serde(default)]
    pub outcome: OutcomeConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub rewards: RewardConfig,
}

impl Default for ShootoutConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            pitch: PitchConfig::default(),
            ball: BallPhysicsConfig::default(),
            shot: ShotConfig::default(),
            keeper: KeeperConfig::default(),
            outcome: OutcomeConfig::default(),
            timing: TimingConfig::default(),
            rewards: RewardConfig::default(),
        }
    }
}

impl ShootoutConfig {
    /// Standard shootout (default)
    pub fn standard() -> Self {
        Self::default()
    }

    /// Arcade: slower, shorter keeper, more gold
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.keeper.dive_duration_s = 0.55;
        cfg.keeper.reach_margin_m = 0.1;
        cfg.shot.inaccuracy_base = 0.35;
        cfg.rewards = RewardConfig { win: 2000, draw: 750, lose: 400 };
        cfg
    }

    /// For tests: no aim jitter on either side
    pub fn deterministic() -> Self {
        let mut cfg = Self::default();
        cfg.shot.inaccuracy_base = 0.0;
        cfg.shot.opponent_inaccuracy = 0.0;
        cfg
    }

    pub fn from_profile(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "" | "standard" | "default" => Ok(Self::standard()),
            "arcade" => Ok(Self::arcade()),
            "deterministic" => Ok(Self::deterministic()),
            other => Err(CoreError::UnknownProfile(other.to_string())),
        }
    }

    /// Load from `PK_PROFILE` or fall back to the standard preset
    pub fn from_env_or_default() -> Self {
        let profile = env::var(PROFILE_ENV).unwrap_or_default();
        Self::from_profile(&profile).unwrap_or_else(|err| {
            log::warn!("{}; using standard profile", err);
            Self::standard()
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, v: f32) -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(CoreError::InvalidConfig(format!("{name} must be > 0 (got {v})")))
            }
        }

        if self.rounds == 0 {
            return Err(CoreError::InvalidConfig("rounds must be at least 1".into()));
        }

        positive("ball.mass_kg", self.ball.mass_kg)?;
        positive("ball.radius_m", self.ball.radius_m)?;
        positive("ball.max_spin_radps", self.ball.max_spin_radps)?;
        positive("ball.stop_speed_mps", self.ball.stop_speed_mps)?;
        positive("keeper.dive_duration_s", self.keeper.dive_duration_s)?;
        positive("outcome.depth_window_m", self.outcome.depth_window_m)?;
        positive("outcome.shot_timeout_s", self.outcome.shot_timeout_s)?;
        positive("timing.power_rate_per_s", self.timing.power_rate_per_s)?;

        if !(0.0..=1.0).contains(&self.ball.restitution) {
            return Err(CoreError::InvalidConfig("ball.restitution must be within 0..=1".into()));
        }
        if self.keeper.dive_left_probability < 0.0
            || self.keeper.dive_right_probability < 0.0
            || self.keeper.dive_left_probability + self.keeper.dive_right_probability > 1.0
        {
            return Err(CoreError::InvalidConfig(
                "keeper dive probabilities must be >= 0 and sum to at most 1".into(),
            ));
        }
        positive("shot.speed_min_mps", self.shot.speed_min_mps)?;
        for (name, v) in [
            ("shot.speed_range_mps", self.shot.speed_range_mps),
            ("shot.speed_attr_swing", self.shot.speed_attr_swing),
            ("shot.inaccuracy_base", self.shot.inaccuracy_base),
            ("shot.control_reduction", self.shot.control_reduction),
            ("shot.side_spin_max_radps", self.shot.side_spin_max_radps),
            ("shot.forward_roll_per_mps", self.shot.forward_roll_per_mps),
            ("shot.opponent_power_min", self.shot.opponent_power_min),
            ("shot.opponent_inaccuracy", self.shot.opponent_inaccuracy),
            ("shot.opponent_side_spin_max_radps", self.shot.opponent_side_spin_max_radps),
            ("shot.target_inset_m", self.shot.target_inset_m),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(CoreError::InvalidConfig(format!("{name} must be >= 0 (got {v})")));
            }
        }
        // Range endpoints; NaN would slip past the ordering checks below
        for (name, v) in [
            ("shot.opponent_power_max", self.shot.opponent_power_max),
            ("shot.target_min_height_m", self.shot.target_min_height_m),
            ("shot.target_max_height_m", self.shot.target_max_height_m),
        ] {
            if !v.is_finite() {
                return Err(CoreError::InvalidConfig(format!("{name} must be finite (got {v})")));
            }
        }
        if self.shot.opponent_power_min > self.shot.opponent_power_max {
            return Err(CoreError::InvalidConfig("shot.opponent_power_min > max".into()));
        }
        if self.shot.target_min_height_m > self.shot.target_max_height_m {
            return Err(CoreError::InvalidConfig("shot target height range inverted".into()));
        }
        if self.outcome.floor_m >= self.outcome.ceiling_m {
            return Err(CoreError::InvalidConfig("outcome floor must be below ceiling".into()));
        }
        for (name, v) in [
            ("timing.start_delay_s", self.timing.start_delay_s),
            ("timing.outcome_message_s", self.timing.outcome_message_s),
            ("timing.opponent_aim_s", self.timing.opponent_aim_s),
            ("timing.next_round_delay_s", self.timing.next_round_delay_s),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(CoreError::InvalidConfig(format!("{name} must be >= 0 (got {v})")));
            }
        }
        Ok(())
    }
}

// ========== Tests ==========

//! Shot, goalkeeper and outcome tuning.

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::keeper;
use crate::engine::vec_math::{vec3, Vec3};

/// Shot computation settings for both the player and the scripted opponent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotConfig {
    /// Speed at zero power (m/s)
    pub speed_min_mps: f32,
    /// Extra speed at full power (m/s)
    pub speed_range_mps: f32,
    /// Max ± speed scale from the speed attribute (0.3 = ±30%)
    pub speed_attr_swing: f32,
    /// Aim jitter amplitude for a 50-control shooter
    pub inaccuracy_base: f32,
    /// How much of the jitter a 100-control shooter removes
    pub control_reduction: f32,
    /// Side spin at full curve and full horizontal offset (rad/s)
    pub side_spin_max_radps: f32,
    /// Forward-roll spin per m/s of shot speed (rad/s)
    pub forward_roll_per_mps: f32,

    /// Opponent power range (0..1 of full power)
    pub opponent_power_min: f32,
    pub opponent_power_max: f32,
    /// Opponent aim jitter (fixed, no attributes)
    pub opponent_inaccuracy: f32,
    /// Opponent side spin range ± (rad/s)
    pub opponent_side_spin_max_radps: f32,
    /// Opponent targets stay this far inside the posts (m)
    pub target_inset_m: f32,
    pub target_min_height_m: f32,
    pub target_max_height_m: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            speed_min_mps: 15.0,
            speed_range_mps: 20.0,
            speed_attr_swing: 0.3,
            inaccuracy_base: 0.5,
            control_reduction: 0.9,
            side_spin_max_radps: 40.0,
            forward_roll_per_mps: 0.2,
            opponent_power_min: 0.6,
            opponent_power_max: 1.0,
            opponent_inaccuracy: 0.15,
            opponent_side_spin_max_radps: 15.0,
            target_inset_m: 0.3,
            target_min_height_m: 0.3,
            target_max_height_m: 2.1,
        }
    }
}

/// Goalkeeper body, dive and anticipation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeeperConfig {
    /// Canonical idle stance (body center)
    pub idle_position: Vec3,
    pub body_width_m: f32,
    pub body_height_m: f32,
    pub body_depth_m: f32,
    /// Collision box grows by this much on every side (arm reach)
    pub reach_margin_m: f32,
    /// Lateral travel of a side dive (m)
    pub dive_distance_m: f32,
    pub dive_duration_s: f32,
    pub max_lean_deg: f32,
    /// Jump arc peak when diving on the player's kick (m)
    pub jump_height_player_shot_m: f32,
    /// Jump arc peak when reacting to the opponent's kick (m)
    pub jump_height_opponent_shot_m: f32,
    /// Lottery weights on the player's kick; center takes the remainder
    pub dive_left_probability: f32,
    pub dive_right_probability: f32,
    /// Predicted crossings within ± this band are handled by staying central (m)
    pub center_band_m: f32,
    pub sprite_frame_rate: f32,
    pub dive_frames: u32,
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            idle_position: vec3(0.0, keeper::BODY_HEIGHT_M / 2.0, keeper::STAND_Z),
            body_width_m: keeper::BODY_WIDTH_M,
            body_height_m: keeper::BODY_HEIGHT_M,
            body_depth_m: keeper::BODY_DEPTH_M,
            reach_margin_m: 0.25,
            dive_distance_m: 2.5,
            dive_duration_s: 0.4,
            max_lean_deg: 30.0,
            jump_height_player_shot_m: 1.0,
            jump_height_opponent_shot_m: 0.8,
            dive_left_probability: 0.4,
            dive_right_probability: 0.4,
            center_band_m: 1.0,
            sprite_frame_rate: keeper::SPRITE_FRAME_RATE,
            dive_frames: keeper::DIVE_FRAMES,
        }
    }
}

/// Goal/save/miss arbitration thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeConfig {
    /// Classification happens within ± this depth of the goal line (m)
    pub depth_window_m: f32,
    /// |x| beyond this is a miss wide (m)
    pub lateral_miss_m: f32,
    /// Ball below this height is a miss (m)
    pub floor_m: f32,
    /// Ball above this height is a miss (m)
    pub ceiling_m: f32,
    /// Unresolved shots become a miss after this long (s)
    pub shot_timeout_s: f32,
}

impl Default for OutcomeConfig {
    fn default() -> Self {
        Self {
            depth_window_m: 0.5,
            lateral_miss_m: 5.0,
            floor_m: -0.5,
            ceiling_m: 6.0,
            shot_timeout_s: 6.0,
        }
    }
}

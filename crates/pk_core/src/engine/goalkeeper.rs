//! Goalkeeper Reaction Model
//!
//! Two dive strategies that are intentionally different:
//!
//! - [`StochasticDive`] for the player's kick: a fixed-probability lottery,
//!   decided at the moment of the kick, blind to where the ball is going.
//! - [`AnticipatoryDive`] for the opponent's kick: the shot is generated
//!   before the keeper commits, so the keeper extrapolates its launch
//!   velocity to the goal line and dives to the predicted side.
//!
//! Movement is a lerp between fixed endpoints plus a `4p(1−p)` jump arc,
//! with the body leaning toward the dive side as progress grows.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::{KeeperConfig, ShootoutConfig};
use super::outcome::{Aabb, Shooter};
use super::physics_constants::keeper::FACING_YAW;
use super::vec_math::{is_finite, lerp, lerp_vec, vec3, Vec3};
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DiveSide {
    #[default]
    Idle,
    Left,
    Right,
    Center,
}

impl DiveSide {
    /// Lateral direction of travel (−x for left)
    fn lateral_sign(self) -> f32 {
        match self {
            DiveSide::Left => -1.0,
            DiveSide::Right => 1.0,
            DiveSide::Idle | DiveSide::Center => 0.0,
        }
    }

    /// Lean direction about z (left leans positive)
    fn lean_sign(self) -> f32 {
        -self.lateral_sign()
    }
}

/// Which sprite sequence is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationSet {
    #[default]
    Idle,
    DiveLeft,
    DiveRight,
    DiveCenter,
}

impl From<DiveSide> for AnimationSet {
    fn from(side: DiveSide) -> Self {
        match side {
            DiveSide::Idle => AnimationSet::Idle,
            DiveSide::Left => AnimationSet::DiveLeft,
            DiveSide::Right => AnimationSet::DiveRight,
            DiveSide::Center => AnimationSet::DiveCenter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeeperAnimation {
    pub set: AnimationSet,
    pub frame: u32,
}

/// One interpolated keeper sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeeperPose {
    pub position: Vec3,
    /// Euler angles (rad): yaw in y, lean in z
    pub orientation: Vec3,
    pub animation: KeeperAnimation,
    /// Interpolation progress 0..=1
    pub progress: f32,
}

/// Timed dive record. Re-armed once per shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiveState {
    pub active: bool,
    pub start: Option<Vec3>,
    pub end: Option<Vec3>,
    pub start_time: f32,
    pub duration: f32,
    pub side: DiveSide,
    /// Peak of the jump arc (m)
    pub jump_height: f32,
    /// Lean at full progress (rad)
    pub max_lean_rad: f32,
    /// Yaw the keeper faces while diving (rad)
    pub facing_yaw: f32,
}

impl Default for DiveState {
    fn default() -> Self {
        Self {
            active: false,
            start: None,
            end: None,
            start_time: 0.0,
            duration: 0.0,
            side: DiveSide::Idle,
            jump_height: 0.0,
            max_lean_rad: 0.0,
            facing_yaw: 0.0,
        }
    }
}

/// Arming parameters other than the endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiveTiming {
    pub now: f32,
    pub duration: f32,
    pub jump_height: f32,
    pub max_lean_rad: f32,
    pub facing_yaw: f32,
}

impl DiveState {
    /// Arm a dive. Both endpoints must be finite.
    pub fn arm(start: Vec3, end: Vec3, side: DiveSide, timing: DiveTiming) -> Result<Self> {
        if !is_finite(&start) || !is_finite(&end) {
            return Err(CoreError::InvalidDiveEndpoints);
        }
        if !(timing.duration.is_finite() && timing.duration > 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "dive duration must be > 0 (got {})",
                timing.duration
            )));
        }
        Ok(Self {
            active: true,
            start: Some(start),
            end: Some(end),
            start_time: timing.now,
            duration: timing.duration,
            side,
            jump_height: timing.jump_height,
            max_lean_rad: timing.max_lean_rad,
            facing_yaw: timing.facing_yaw,
        })
    }

    pub fn disarm(&mut self) {
        self.active = false;
    }
}

/// Player's kick: lottery, independent of the actual aim.
#[derive(Debug, Clone, Copy)]
pub struct StochasticDive {
    pub left_probability: f32,
    pub right_probability: f32,
}

impl StochasticDive {
    pub fn from_config(cfg: &KeeperConfig) -> Self {
        Self {
            left_probability: cfg.dive_left_probability,
            right_probability: cfg.dive_right_probability,
        }
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> DiveSide {
        let r: f32 = rng.gen();
        if r < self.left_probability {
            DiveSide::Left
        } else if r < self.left_probability + self.right_probability {
            DiveSide::Right
        } else {
            DiveSide::Center
        }
    }
}

/// Opponent's kick: extrapolate the launch velocity to the goal line.
#[derive(Debug, Clone, Copy)]
pub struct AnticipatoryDive {
    pub goal_line_z: f32,
    pub center_band_m: f32,
}

impl AnticipatoryDive {
    pub fn from_config(cfg: &ShootoutConfig) -> Self {
        Self { goal_line_z: cfg.pitch.goal_line_z, center_band_m: cfg.keeper.center_band_m }
    }

    /// Straight-line x at the goal line, `None` if the ball never gets there
    pub fn predicted_crossing_x(&self, spawn: &Vec3, velocity: &Vec3) -> Option<f32> {
        let t = (self.goal_line_z - spawn.z) / velocity.z;
        if !t.is_finite() || t <= 0.0 {
            return None;
        }
        let x = spawn.x + velocity.x * t;
        x.is_finite().then_some(x)
    }

    pub fn choose(&self, spawn: &Vec3, velocity: &Vec3) -> DiveSide {
        match self.predicted_crossing_x(spawn, velocity) {
            Some(x) if x < -self.center_band_m => DiveSide::Left,
            Some(x) if x > self.center_band_m => DiveSide::Right,
            _ => DiveSide::Center,
        }
    }
}

/// What the keeper knows when deciding
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiveContext {
    PlayerShot,
    OpponentShot { spawn: Vec3, velocity: Vec3 },
}

/// Decide side and arm a dive starting from `keeper_pos`.
pub fn decide_dive<R: Rng + ?Sized>(
    context: DiveContext,
    keeper_pos: &Vec3,
    facing_yaw: f32,
    now: f32,
    cfg: &ShootoutConfig,
    rng: &mut R,
) -> Result<DiveState> {
    let keeper = &cfg.keeper;
    let (side, jump_height) = match context {
        DiveContext::PlayerShot => (
            StochasticDive::from_config(keeper).choose(rng),
            keeper.jump_height_player_shot_m,
        ),
        DiveContext::OpponentShot { spawn, velocity } => (
            AnticipatoryDive::from_config(cfg).choose(&spawn, &velocity),
            keeper.jump_height_opponent_shot_m,
        ),
    };

    let end = keeper_pos + vec3(side.lateral_sign() * keeper.dive_distance_m, 0.0, 0.0);
    log::debug!("keeper dive: {:?} ({:?}) → x={:.2}", side, context, end.x);

    DiveState::arm(
        *keeper_pos,
        end,
        side,
        DiveTiming {
            now,
            duration: keeper.dive_duration_s,
            jump_height,
            max_lean_rad: keeper.max_lean_deg.to_radians(),
            facing_yaw,
        },
    )
}

/// Sample the dive at `now`. Returns `None` when inactive or when the
/// endpoints are missing (movement skipped for this tick).
///
/// Reaching progress 1.0 pins the end position, clears the lean and
/// disarms the dive. A dive whose endpoints never arrive is disarmed once
/// its duration has passed.
pub fn step_dive(dive: &mut DiveState, now: f32, cfg: &KeeperConfig) -> Option<KeeperPose> {
    if !dive.active {
        return None;
    }
    let elapsed = (now - dive.start_time).max(0.0);

    let (start, end) = match (dive.start, dive.end) {
        (Some(s), Some(e)) => (s, e),
        _ => {
            log::warn!("keeper dive active without endpoints; skipping movement");
            if elapsed > dive.duration {
                dive.disarm();
            }
            return None;
        }
    };

    let progress = if dive.duration > 0.0 { (elapsed / dive.duration).min(1.0) } else { 1.0 };
    let last_frame = cfg.dive_frames.saturating_sub(1);
    let frame = ((elapsed * cfg.sprite_frame_rate).floor() as u32).min(last_frame);
    let animation = KeeperAnimation { set: dive.side.into(), frame };

    if progress >= 1.0 {
        dive.disarm();
        return Some(KeeperPose {
            position: end,
            orientation: vec3(0.0, dive.facing_yaw, 0.0),
            animation: KeeperAnimation::default(),
            progress: 1.0,
        });
    }

    let mut position = lerp_vec(&start, &end, progress);
    position.y += 4.0 * progress * (1.0 - progress) * dive.jump_height;
    let lean = lerp(0.0, dive.side.lean_sign() * dive.max_lean_rad, progress);

    Some(KeeperPose {
        position,
        orientation: vec3(0.0, dive.facing_yaw, lean),
        animation,
        progress,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goalkeeper {
    pub position: Vec3,
    pub orientation: Vec3,
    pub dive: DiveState,
    pub animation: KeeperAnimation,
}

impl Goalkeeper {
    pub fn new(cfg: &ShootoutConfig) -> Self {
        let mut keeper = Self {
            position: Vec3::zeros(),
            orientation: Vec3::zeros(),
            dive: DiveState::default(),
            animation: KeeperAnimation::default(),
        };
        keeper.reset_idle(Shooter::Player, cfg);
        keeper
    }

    /// Idle stance in front of the line, facing whoever is about to shoot.
    ///
    /// The configured idle position is the one facing the player's spot; for
    /// the opponent's kick it is mirrored across the goal plane.
    pub fn idle_pose(shooter: Shooter, cfg: &ShootoutConfig) -> (Vec3, f32) {
        let idle = cfg.keeper.idle_position;
        match shooter {
            Shooter::Player => (idle, FACING_YAW),
            Shooter::Opponent => {
                let z = 2.0 * cfg.pitch.goal_line_z - idle.z;
                (vec3(idle.x, idle.y, z), 0.0)
            }
        }
    }

    pub fn reset_idle(&mut self, shooter: Shooter, cfg: &ShootoutConfig) {
        let (position, yaw) = Self::idle_pose(shooter, cfg);
        self.position = position;
        self.orientation = vec3(0.0, yaw, 0.0);
        self.dive = DiveState::default();
        self.animation = KeeperAnimation::default();
    }

    pub fn is_diving(&self) -> bool {
        self.dive.active
    }

    /// Decide and arm a dive from the current position
    pub fn arm_dive<R: Rng + ?Sized>(
        &mut self,
        context: DiveContext,
        now: f32,
        cfg: &ShootoutConfig,
        rng: &mut R,
    ) -> Result<DiveSide> {
        let dive = decide_dive(context, &self.position, self.orientation.y, now, cfg, rng)?;
        let side = dive.side;
        self.dive = dive;
        Ok(side)
    }

    /// Advance the dive and apply the sampled pose
    pub fn update(&mut self, now: f32, cfg: &KeeperConfig) {
        if let Some(pose) = step_dive(&mut self.dive, now, cfg) {
            self.position = pose.position;
            self.orientation = pose.orientation;
            self.animation = pose.animation;
        }
    }

    /// Body box grown by the reach margin
    pub fn collision_box(&self, cfg: &KeeperConfig) -> Aabb {
        let half = vec3(
            cfg.body_width_m / 2.0 + cfg.reach_margin_m,
            cfg.body_height_m / 2.0 + cfg.reach_margin_m,
            cfg.body_depth_m / 2.0 + cfg.reach_margin_m,
        );
        Aabb::from_center_half(&self.position, &half)
    }
}

//! Outcome Resolver
//!
//! Goal / save / miss arbitration for one shot. The resolver only reads
//! ball and keeper state; freezing after the first non-`None` result is the
//! state machine's job.
//!
//! Depth is measured along the direction of travel (from the shot origin
//! toward the goal line), so the same rules serve both halves of a round.

use serde::{Deserialize, Serialize};

use super::config::ShootoutConfig;
use super::vec_math::{vec3, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    None,
    Goal,
    Save,
    Miss,
}

impl Outcome {
    pub fn is_resolved(self) -> bool {
        self != Outcome::None
    }

    /// HUD text shown after the shot
    pub fn message(self) -> &'static str {
        match self {
            Outcome::None => "",
            Outcome::Goal => "GOAL!",
            Outcome::Save => "SAVED!",
            Outcome::Miss => "MISSED!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shooter {
    Player,
    Opponent,
}

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_half(center: &Vec3, half: &Vec3) -> Self {
        Self { min: center - half, max: center + half }
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && self.max[i] >= other.min[i])
    }
}

/// Ball state for one resolver call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallSample {
    /// Position at the end of the previous tick
    pub previous: Vec3,
    pub current: Vec3,
    /// Ball came to rest this tick
    pub settled: bool,
}

/// Signed distance past the goal line along the direction of travel
fn depth_past_line(p: &Vec3, line_z: f32, travel_sign: f32) -> f32 {
    (p.z - line_z) * travel_sign
}

/// Where to evaluate this tick. When one tick carries the ball across the
/// whole window, use the point where the segment meets the goal plane.
fn evaluation_point(ball: &BallSample, line_z: f32, travel_sign: f32, window: f32) -> Vec3 {
    let d_prev = depth_past_line(&ball.previous, line_z, travel_sign);
    let d_cur = depth_past_line(&ball.current, line_z, travel_sign);
    if d_prev < -window && d_cur > window {
        let t = -d_prev / (d_cur - d_prev);
        ball.previous + (ball.current - ball.previous) * t
    } else {
        ball.current
    }
}

/// Classify the current tick of a shot kicked from `origin`.
pub fn resolve(
    ball: &BallSample,
    keeper_box: &Aabb,
    origin: &Vec3,
    cfg: &ShootoutConfig,
) -> Outcome {
    let pitch = &cfg.pitch;
    let limits = &cfg.outcome;
    let line_z = pitch.goal_line_z;
    let travel_sign = if origin.z >= line_z { -1.0 } else { 1.0 };
    let window = limits.depth_window_m;

    let p = evaluation_point(ball, line_z, travel_sign, window);
    let depth = depth_past_line(&p, line_z, travel_sign);

    if depth.abs() <= window {
        let r = cfg.ball.collision_radius_m;
        let ball_box = Aabb::from_center_half(&p, &vec3(r, r, r));
        // Save before goal
        if ball_box.intersects(keeper_box) {
            return Outcome::Save;
        }
        if p.x.abs() <= pitch.goal_half_width_m && (0.0..=pitch.goal_height_m).contains(&p.y) {
            return Outcome::Goal;
        }
        return if ball.settled { Outcome::Miss } else { Outcome::None };
    }

    let out_of_play = p.x.abs() > limits.lateral_miss_m
        || p.y < limits.floor_m
        || p.y > limits.ceiling_m
        || depth > window;
    if out_of_play || ball.settled {
        Outcome::Miss
    } else {
        Outcome::None
    }
}

/// Goals per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub player: u32,
    pub opponent: u32,
}

impl Scoreboard {
    /// Credit a goal to whoever was shooting. Returns whether the score changed.
    pub fn record(&mut self, outcome: Outcome, shooter: Shooter) -> bool {
        if outcome != Outcome::Goal {
            return false;
        }
        match shooter {
            Shooter::Player => self.player += 1,
            Shooter::Opponent => self.opponent += 1,
        }
        true
    }

    pub fn total(&self) -> u32 {
        self.player + self.opponent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ShootoutConfig {
        ShootoutConfig::default()
    }

    fn still(p: Vec3) -> BallSample {
        BallSample { previous: p, current: p, settled: false }
    }

    /// Keeper box far from anything interesting
    fn keeper_away() -> Aabb {
        Aabb::from_center_half(&vec3(50.0, 1.2, 0.5), &vec3(0.75, 1.45, 0.45))
    }

    fn player_origin() -> Vec3 {
        vec3(0.0, 0.2, 11.0)
    }

    #[test]
    fn test_goal_inside_frame() {
        let cfg = cfg();
        let outcome = resolve(&still(vec3(0.0, 1.0, 0.3)), &keeper_away(), &player_origin(), &cfg);
        assert_eq!(outcome, Outcome::Goal);

        let mut score = Scoreboard::default();
        assert!(score.record(outcome, Shooter::Player));
        assert_eq!(score, Scoreboard { player: 1, opponent: 0 });
        assert!(score.record(outcome, Shooter::Opponent));
        assert_eq!(score.opponent, 1);
    }

    #[test]
    fn test_save_takes_precedence_over_goal() {
        let cfg = cfg();
        let ball = vec3(0.0, 1.0, 0.3);
        let keeper = Aabb::from_center_half(&vec3(0.2, 1.2, 0.5), &vec3(0.75, 1.45, 0.45));
        assert_eq!(resolve(&still(ball), &keeper, &player_origin(), &cfg), Outcome::Save);
    }

    #[test]
    fn test_outside_window_in_flight_is_none() {
        let cfg = cfg();
        assert_eq!(
            resolve(&still(vec3(0.5, 1.5, 5.0)), &keeper_away(), &player_origin(), &cfg),
            Outcome::None
        );
    }

    #[test]
    fn test_window_outside_frame_is_unclassified() {
        let cfg = cfg();
        // Over the bar but still inside the depth window
        assert_eq!(
            resolve(&still(vec3(0.0, 3.0, 0.1)), &keeper_away(), &player_origin(), &cfg),
            Outcome::None
        );
        // Next tick it is past the window
        assert_eq!(
            resolve(&still(vec3(0.0, 3.1, -0.8)), &keeper_away(), &player_origin(), &cfg),
            Outcome::Miss
        );
    }

    #[test]
    fn test_miss_bounds() {
        let cfg = cfg();
        let k = keeper_away();
        let o = player_origin();
        assert_eq!(resolve(&still(vec3(5.5, 1.0, 4.0)), &k, &o, &cfg), Outcome::Miss);
        assert_eq!(resolve(&still(vec3(0.0, 6.5, 4.0)), &k, &o, &cfg), Outcome::Miss);
        assert_eq!(resolve(&still(vec3(0.0, -0.6, 4.0)), &k, &o, &cfg), Outcome::Miss);
    }

    #[test]
    fn test_settled_ball_short_of_goal_is_miss() {
        let cfg = cfg();
        let at = vec3(0.0, 0.2, 3.0);
        let ball = BallSample { previous: at, current: at, settled: true };
        assert_eq!(resolve(&ball, &keeper_away(), &player_origin(), &cfg), Outcome::Miss);
    }

    #[test]
    fn test_opponent_direction_is_mirrored() {
        let cfg = cfg();
        let origin = cfg.pitch.opponent_spot;
        let k = keeper_away();
        // Still in front of the goal from the opponent's side
        assert_eq!(resolve(&still(vec3(0.0, 1.0, -4.0)), &k, &origin, &cfg), Outcome::None);
        assert_eq!(resolve(&still(vec3(0.0, 1.0, -0.3)), &k, &origin, &cfg), Outcome::Goal);
        // Behind the goal from the opponent's side
        assert_eq!(resolve(&still(vec3(0.0, 3.0, 1.0)), &k, &origin, &cfg), Outcome::Miss);
    }

    #[test]
    fn test_fast_ball_cannot_tunnel_through_window() {
        let cfg = cfg();
        let ball = BallSample {
            previous: vec3(0.0, 1.0, 0.8),
            current: vec3(0.0, 1.0, -0.8),
            settled: false,
        };
        assert_eq!(resolve(&ball, &keeper_away(), &player_origin(), &cfg), Outcome::Goal);

        let keeper = Aabb::from_center_half(&vec3(0.0, 1.2, 0.0), &vec3(0.75, 1.45, 0.45));
        assert_eq!(resolve(&ball, &keeper, &player_origin(), &cfg), Outcome::Save);
    }

    #[test]
    fn test_scoreboard_ignores_save_and_miss() {
        let mut s = Scoreboard::default();
        assert!(!s.record(Outcome::Save, Shooter::Player));
        assert!(!s.record(Outcome::Miss, Shooter::Opponent));
        assert!(!s.record(Outcome::None, Shooter::Player));
        assert_eq!(s.total(), 0);
    }

    #[test]
    fn test_aabb() {
        let a = Aabb::from_center_half(&Vec3::zeros(), &vec3(1.0, 1.0, 1.0));
        let b = Aabb::from_center_half(&vec3(1.5, 0.0, 0.0), &vec3(0.5, 0.5, 0.5));
        let c = Aabb::from_center_half(&vec3(3.0, 0.0, 0.0), &vec3(0.5, 0.5, 0.5));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: whenever the keeper box overlaps the ball inside the window, it's a save
            #[test]
            fn prop_save_wins_on_overlap(
                x in -3.5f32..3.5,
                y in 0.2f32..2.3,
                z in -0.5f32..0.5,
                kx in -4.0f32..4.0,
                ky in 0.0f32..3.0,
            ) {
                let cfg = ShootoutConfig::default();
                let ball = vec3(x, y, z);
                let keeper = Aabb::from_center_half(&vec3(kx, ky, 0.5), &vec3(0.75, 1.45, 0.45));
                let r = cfg.ball.collision_radius_m;
                let overlap = Aabb::from_center_half(&ball, &vec3(r, r, r)).intersects(&keeper);

                let outcome = resolve(&still(ball), &keeper, &player_origin(), &cfg);
                if overlap {
                    prop_assert_eq!(outcome, Outcome::Save);
                } else {
                    prop_assert_eq!(outcome, Outcome::Goal);
                }
            }
        }
    }
}

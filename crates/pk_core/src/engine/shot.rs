//! Shot Computation
//!
//! Turns an aim point + power + shooter attributes into launch velocity and
//! spin for the player's kick, and rolls a fully random kick for the
//! scripted opponent.
//!
//! ## Attribute → Physics mapping (0..100 scale, 50 = neutral)
//! - speed   → ±`speed_attr_swing` on launch speed
//! - control → less aim jitter (`inaccuracy = base · (1 − (c−50)/50 · reduction)`)
//! - curve   → side spin, scaled by how far from center the aim is

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::{ShootoutConfig, ShotConfig};
use super::vec_math::{clamp_length, horizontal, normalize_or_zero, up, vec3, Vec3};
use crate::roster::ShooterAttributes;

/// Launch parameters handed to the ball flight model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotParams {
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
}

/// A scripted opponent kick, generated before the keeper decides
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpponentShot {
    /// Where the ball is spotted
    pub spawn: Vec3,
    /// Point inside the goal frame the opponent aimed at (pre-jitter)
    pub target: Vec3,
    /// Power actually used (0..1)
    pub power: f32,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl OpponentShot {
    pub fn params(&self) -> ShotParams {
        ShotParams { velocity: self.velocity, angular_velocity: self.angular_velocity }
    }
}

/// Launch speed (m/s) for `power` (0..100) and a speed attribute (0..100)
pub fn shot_speed(cfg: &ShotConfig, power: f32, speed_attr: f32) -> f32 {
    let power01 = (power / 100.0).clamp(0.0, 1.0);
    let base = power01 * cfg.speed_range_mps + cfg.speed_min_mps;
    base * (1.0 + (speed_attr - 50.0) / 50.0 * cfg.speed_attr_swing)
}

/// Aim jitter amplitude for a control attribute (0..100)
pub fn player_inaccuracy(cfg: &ShotConfig, control_attr: f32) -> f32 {
    (cfg.inaccuracy_base * (1.0 - (control_attr - 50.0) / 50.0 * cfg.control_reduction)).max(0.0)
}

/// Perturb a unit direction on the lateral and vertical axes and renormalize
fn jitter_direction<R: Rng + ?Sized>(dir: &Vec3, inaccuracy: f32, rng: &mut R) -> Vec3 {
    let jx = rng.gen_range(-0.5..=0.5) * inaccuracy;
    let jy = rng.gen_range(-0.5..=0.5) * inaccuracy;
    normalize_or_zero(&(dir + vec3(jx, jy, 0.0)))
}

/// Spin from a side-spin amount (rad/s about +y, signed toward the curve
/// side) plus forward roll about the horizontal axis.
///
/// `up × dir_h` is the topspin axis for a ball moving along `dir_h`; its x
/// component also tells which way +side bends the ball.
fn compose_spin(dir: &Vec3, curve_toward_x: f32, forward_roll: f32, max_spin: f32) -> Vec3 {
    let dir_h = normalize_or_zero(&horizontal(dir));
    let lateral = up().cross(&dir_h);
    let side = curve_toward_x * lateral.x.signum();
    clamp_length(&(up() * side + lateral * forward_roll), max_spin)
}

/// Fallback direction when the aim point coincides with the ball
fn toward_goal(ball_pos: &Vec3, goal_line_z: f32) -> Vec3 {
    let dz = goal_line_z - ball_pos.z;
    vec3(0.0, 0.0, if dz < 0.0 { -1.0 } else { 1.0 })
}

/// Player kick.
///
/// `power` is the 0..100 bar value at release.
pub fn compute_player_shot<R: Rng + ?Sized>(
    aim_point: &Vec3,
    power: f32,
    attrs: &ShooterAttributes,
    ball_pos: &Vec3,
    cfg: &ShootoutConfig,
    rng: &mut R,
) -> ShotParams {
    let attrs = attrs.sanitized();
    let shot = &cfg.shot;

    let speed = shot_speed(shot, power, attrs.speed);

    let mut dir = normalize_or_zero(&(aim_point - ball_pos));
    if dir == Vec3::zeros() {
        dir = toward_goal(ball_pos, cfg.pitch.goal_line_z);
    }
    let inaccuracy = player_inaccuracy(shot, attrs.control);
    let dir = jitter_direction(&dir, inaccuracy, rng);

    // Aiming at a post curls the ball toward that post
    let offset = (aim_point.x / cfg.pitch.goal_half_width_m).clamp(-1.0, 1.0);
    let side = shot.side_spin_max_radps * (attrs.curve / 100.0) * offset;
    let roll = speed * shot.forward_roll_per_mps;
    let angular_velocity = compose_spin(&dir, side, roll, cfg.ball.max_spin_radps);

    log::debug!(
        "player shot: power={:.0} speed={:.1}m/s inaccuracy={:.3} spin={:.1}rad/s",
        power,
        speed,
        inaccuracy,
        angular_velocity.norm()
    );

    ShotParams { velocity: dir * speed, angular_velocity }
}

/// Opponent kick: random target in the frame, random power and side spin.
/// No attribute model.
pub fn compute_opponent_shot<R: Rng + ?Sized>(
    keeper_pos: &Vec3,
    cfg: &ShootoutConfig,
    rng: &mut R,
) -> OpponentShot {
    let shot = &cfg.shot;
    let spawn = cfg.pitch.opponent_spot;

    let x_limit = (cfg.pitch.goal_half_width_m - shot.target_inset_m).max(0.0);
    let target = vec3(
        rng.gen_range(-x_limit..=x_limit),
        rng.gen_range(shot.target_min_height_m..=shot.target_max_height_m),
        cfg.pitch.goal_line_z,
    );

    let power = rng.gen_range(shot.opponent_power_min..=shot.opponent_power_max);
    let speed = shot_speed(shot, power * 100.0, 50.0);

    let mut dir = normalize_or_zero(&(target - spawn));
    if dir == Vec3::zeros() {
        dir = toward_goal(&spawn, cfg.pitch.goal_line_z);
    }
    let dir = jitter_direction(&dir, shot.opponent_inaccuracy, rng);

    let side_max = shot.opponent_side_spin_max_radps;
    let side = rng.gen_range(-side_max..=side_max);
    let roll = speed * shot.forward_roll_per_mps;
    let angular_velocity = compose_spin(&dir, side, roll, cfg.ball.max_spin_radps);

    log::debug!(
        "opponent shot: target=({:.2}, {:.2}) {:.2}m from keeper, power={:.2} speed={:.1}m/s",
        target.x,
        target.y,
        (target.x - keeper_pos.x).abs(),
        power,
        speed
    );

    OpponentShot { spawn, target, power, velocity: dir * speed, angular_velocity }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn spot() -> Vec3 {
        vec3(0.0, 0.2, 11.0)
    }

    #[test]
    fn test_shot_speed_range() {
        let cfg = ShotConfig::default();
        assert!((shot_speed(&cfg, 0.0, 50.0) - 15.0).abs() < 1e-4);
        assert!((shot_speed(&cfg, 100.0, 50.0) - 35.0).abs() < 1e-4);
        // ±30% from the speed attribute
        assert!((shot_speed(&cfg, 100.0, 100.0) - 35.0 * 1.3).abs() < 1e-3);
        assert!((shot_speed(&cfg, 100.0, 0.0) - 35.0 * 0.7).abs() < 1e-3);
        // Power above 100 is clamped
        assert_eq!(shot_speed(&cfg, 250.0, 50.0), shot_speed(&cfg, 100.0, 50.0));
    }

    #[test]
    fn test_inaccuracy_by_control() {
        let cfg = ShotConfig::default();
        assert!((player_inaccuracy(&cfg, 50.0) - 0.5).abs() < 1e-6);
        assert!((player_inaccuracy(&cfg, 100.0) - 0.05).abs() < 1e-6);
        assert!(player_inaccuracy(&cfg, 0.0) > player_inaccuracy(&cfg, 50.0));
    }

    #[test]
    fn test_center_shot_high_control_is_nearly_straight() {
        let cfg = ShootoutConfig::default();
        let attrs = ShooterAttributes { speed: 50.0, control: 100.0, curve: 0.0 };
        let aim = vec3(0.0, 1.2, 0.0);
        let mut rng = rng();

        for _ in 0..50 {
            let shot = compute_player_shot(&aim, 100.0, &attrs, &spot(), &cfg, &mut rng);
            let dir = normalize_or_zero(&shot.velocity);
            // inaccuracy 0.05 → at most ±0.025 lateral before renormalizing
            assert!(dir.x.abs() < 0.03, "dir={dir:?}");
            assert!((shot.velocity.norm() - 35.0).abs() < 1e-3);

            // No curve: only forward roll remains
            let roll = 35.0 * cfg.shot.forward_roll_per_mps;
            assert!((shot.angular_velocity.norm() - roll).abs() < 1e-3);
            assert!(shot.angular_velocity.y.abs() < 1e-6);
        }
    }

    #[test]
    fn test_forward_roll_is_topspin() {
        let cfg = ShootoutConfig::deterministic();
        let attrs = ShooterAttributes { speed: 50.0, control: 50.0, curve: 0.0 };
        let aim = vec3(0.0, 1.0, 0.0);
        let shot = compute_player_shot(&aim, 80.0, &attrs, &spot(), &cfg, &mut rng());
        // ω × v points down for a topspin kick
        let magnus = shot.angular_velocity.cross(&shot.velocity);
        assert!(magnus.y < 0.0, "magnus={magnus:?}");
    }

    #[test]
    fn test_curve_bends_toward_aimed_post() {
        let cfg = ShootoutConfig::deterministic();
        let attrs = ShooterAttributes { speed: 50.0, control: 50.0, curve: 90.0 };

        for (aim_x, expected_sign) in [(3.0f32, 1.0f32), (-3.0, -1.0)] {
            let shot = compute_player_shot(
                &vec3(aim_x, 1.0, 0.0),
                80.0,
                &attrs,
                &spot(),
                &cfg,
                &mut rng(),
            );
            let magnus = shot.angular_velocity.cross(&shot.velocity);
            assert_eq!(magnus.x.signum(), expected_sign, "aim_x={aim_x} magnus={magnus:?}");
        }
    }

    #[test]
    fn test_zero_length_aim_falls_back_to_goal() {
        let cfg = ShootoutConfig::deterministic();
        let attrs = ShooterAttributes::default();
        let shot = compute_player_shot(&spot(), 50.0, &attrs, &spot(), &cfg, &mut rng());
        assert!(shot.velocity.z < 0.0);
        assert!(shot.velocity.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_garbage_attributes_use_neutral_values() {
        let cfg = ShootoutConfig::deterministic();
        let bad = ShooterAttributes { speed: f32::NAN, control: f32::INFINITY, curve: -5.0 };
        let aim = vec3(0.0, 1.0, 0.0);
        let shot = compute_player_shot(&aim, 100.0, &bad, &spot(), &cfg, &mut rng());
        assert!(shot.velocity.iter().all(|c| c.is_finite()));
        assert!(shot.angular_velocity.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_opponent_shot_heads_for_goal_frame() {
        let cfg = ShootoutConfig::deterministic();
        let keeper = cfg.keeper.idle_position;
        let mut rng = rng();

        for _ in 0..100 {
            let shot = compute_opponent_shot(&keeper, &cfg, &mut rng);
            assert_eq!(shot.spawn, cfg.pitch.opponent_spot);
            assert!(shot.target.x.abs() <= cfg.pitch.goal_half_width_m - cfg.shot.target_inset_m);
            assert!(shot.target.y >= cfg.shot.target_min_height_m);
            assert!(shot.target.y <= cfg.shot.target_max_height_m);
            assert!((0.6..=1.0).contains(&shot.power));
            // Mirrored spot shoots toward +z
            assert!(shot.velocity.z > 0.0);
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: computed spin never exceeds the realistic maximum
            #[test]
            fn prop_player_spin_clamped(
                aim_x in -10.0f32..10.0,
                aim_y in -1.0f32..6.0,
                power in 0.0f32..100.0,
                speed in 0.0f32..100.0,
                control in 0.0f32..100.0,
                curve in 0.0f32..100.0,
                seed in any::<u64>(),
            ) {
                let mut cfg = ShootoutConfig::default();
                // Crank spin sources well past the clamp
                cfg.shot.side_spin_max_radps = 400.0;
                cfg.shot.forward_roll_per_mps = 5.0;
                let attrs = ShooterAttributes { speed, control, curve };
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let shot = compute_player_shot(
                    &vec3(aim_x, aim_y, 0.0), power, &attrs, &spot(), &cfg, &mut rng,
                );
                prop_assert!(shot.angular_velocity.norm() <= cfg.ball.max_spin_radps + 1e-3);
            }

            #[test]
            fn prop_opponent_spin_clamped(seed in any::<u64>()) {
                let mut cfg = ShootoutConfig::default();
                cfg.shot.opponent_side_spin_max_radps = 500.0;
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let shot = compute_opponent_shot(&cfg.keeper.idle_position, &cfg, &mut rng);
                prop_assert!(shot.angular_velocity.norm() <= cfg.ball.max_spin_radps + 1e-3);
            }
        }
    }
}

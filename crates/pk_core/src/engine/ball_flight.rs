//! Ball Flight Model
//!
//! Explicit-Euler integration of a kicked ball under gravity, quadratic drag
//! and Magnus lift, with a simple grass contact model.
//!
//! Spin bleeds off exponentially in the air; without that a heavily
//! back-spun ball reaches a Magnus/gravity balance and hovers forever.
//!
//! ## Per-tick flow
//! ```text
//! settled? ──yes──▶ zero v/ω/rotation, done
//!    │no
//!    ▼
//! a = drag + magnus + gravity ─▶ v += a·dt ─▶ p += v·dt
//!    │
//!    ▼
//! below resting height? ──yes──▶ clamp, bounce or stick, damp horizontal
//!    │
//!    ▼
//! ω *= exp(-k·dt), visual rotation += ω·dt   (rotation is cosmetic only)
//! ```

use serde::{Deserialize, Serialize};

use super::config::BallPhysicsConfig;
use super::vec_math::{clamp_length, normalize_or_zero, up, Vec3};

/// Result of one `step_ball` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightPhase {
    /// Ball at rest; nothing was integrated
    Settled,
    /// Ball integrated without touching the ground
    Airborne,
    /// Ball touched the ground this tick (bounce or roll)
    GroundContact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center position (m)
    pub position: Vec3,
    /// Linear velocity (m/s)
    pub velocity: Vec3,
    /// Spin axis × magnitude (rad/s)
    pub angular_velocity: Vec3,
    /// Display-only orientation (euler, rad). Never read by the dynamics.
    pub rotation: Vec3,
}

impl Ball {
    /// Ball lying still at `spot`
    pub fn at_spot(spot: Vec3) -> Self {
        Self {
            position: spot,
            velocity: Vec3::zeros(),
            angular_velocity: Vec3::zeros(),
            rotation: Vec3::zeros(),
        }
    }

    /// Re-spot for a new kick
    pub fn reset_to(&mut self, spot: Vec3) {
        *self = Self::at_spot(spot);
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.norm()
    }

    #[inline]
    pub fn is_grounded(&self, cfg: &BallPhysicsConfig) -> bool {
        self.position.y <= cfg.ground_contact_height()
    }

    /// Slow enough and on the ground: the next step will zero it out
    #[inline]
    pub fn is_settled(&self, cfg: &BallPhysicsConfig) -> bool {
        self.speed() < cfg.stop_speed_mps && self.is_grounded(cfg)
    }

    /// Set the spin, clamped to `max_spin_radps`
    pub fn set_spin(&mut self, angular_velocity: Vec3, cfg: &BallPhysicsConfig) {
        self.angular_velocity = clamp_length(&angular_velocity, cfg.max_spin_radps);
    }

    /// Kick the ball: overwrite velocity and (clamped) spin
    pub fn launch(&mut self, velocity: Vec3, angular_velocity: Vec3, cfg: &BallPhysicsConfig) {
        self.velocity = velocity;
        self.set_spin(angular_velocity, cfg);
    }

    fn settle(&mut self) {
        self.velocity = Vec3::zeros();
        self.angular_velocity = Vec3::zeros();
        self.rotation = Vec3::zeros();
    }
}

/// Aerodynamic + gravity acceleration for the given state
pub fn acceleration(velocity: &Vec3, angular_velocity: &Vec3, cfg: &BallPhysicsConfig) -> Vec3 {
    let speed = velocity.norm();
    // normalize_or_zero: a ball with no velocity feels no drag
    let drag = -normalize_or_zero(velocity) * (cfg.drag_constant() * speed * speed);
    let magnus = angular_velocity.cross(velocity) * cfg.magnus_constant();
    drag + magnus - up() * cfg.gravity
}

/// Advance the ball by `dt` seconds.
pub fn step_ball(ball: &mut Ball, dt: f32, cfg: &BallPhysicsConfig) -> FlightPhase {
    if ball.is_settled(cfg) {
        ball.settle();
        return FlightPhase::Settled;
    }
    if !(dt.is_finite() && dt > 0.0) {
        return FlightPhase::Airborne;
    }

    let accel = acceleration(&ball.velocity, &ball.angular_velocity, cfg);
    ball.velocity += accel * dt;
    ball.position += ball.velocity * dt;

    let mut phase = FlightPhase::Airborne;
    if ball.position.y < cfg.resting_height_m {
        ball.position.y = cfg.resting_height_m;
        if ball.velocity.y < -cfg.min_bounce_vy {
            ball.velocity.y *= -cfg.restitution;
        } else {
            ball.velocity.y = 0.0;
        }
        ball.velocity.x *= cfg.horizontal_damping;
        ball.velocity.z *= cfg.horizontal_damping;
        // Grass scrubs spin at the same rate as rolling speed
        ball.angular_velocity *= cfg.horizontal_damping;
        phase = FlightPhase::GroundContact;
    }
    ball.angular_velocity *= cfg.spin_multiplier(dt);

    ball.rotation += ball.angular_velocity * dt;
    phase
}

//! Pitch geometry and ball physics settings.

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::{ball, bounce, goal};
use crate::engine::vec_math::{vec3, Vec3};

/// Where the ball is spotted and where the goal frame sits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchConfig {
    /// Ball spawn for the player's kick
    pub player_spot: Vec3,
    /// Ball spawn for the opponent's kick (mirrored across the goal plane)
    pub opponent_spot: Vec3,
    /// Goal line depth (z)
    pub goal_line_z: f32,
    /// Half the distance between the posts (m)
    pub goal_half_width_m: f32,
    /// Crossbar height (m)
    pub goal_height_m: f32,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            player_spot: vec3(0.0, ball::RESTING_HEIGHT_M, goal::PENALTY_SPOT_M),
            opponent_spot: vec3(0.0, ball::RESTING_HEIGHT_M, -goal::PENALTY_SPOT_M),
            goal_line_z: goal::LINE_Z,
            goal_half_width_m: goal::HALF_WIDTH_M,
            goal_height_m: goal::HEIGHT_M,
        }
    }
}

/// Ball flight parameters.
///
/// Aerodynamic constants are derived on demand so a tweaked mass or radius
/// always stays consistent with drag/Magnus strength.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallPhysicsConfig {
    pub gravity: f32,
    pub air_density: f32,
    pub drag_coefficient: f32,
    pub lift_coefficient: f32,
    pub mass_kg: f32,
    pub radius_m: f32,
    /// Center height when lying on the grass (m)
    pub resting_height_m: f32,
    /// Half extent of the ball's bounding box for keeper collision (m)
    pub collision_radius_m: f32,
    pub stop_speed_mps: f32,
    pub contact_tolerance_m: f32,
    pub restitution: f32,
    pub min_bounce_vy: f32,
    pub horizontal_damping: f32,
    pub max_spin_radps: f32,
    /// Air spin decay coefficient (1/s). Per-step multiplier is `exp(-k·dt)`.
    pub spin_decay_per_s: f32,
}

impl Default for BallPhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: ball::GRAVITY,
            air_density: ball::AIR_DENSITY,
            drag_coefficient: ball::DRAG_COEFFICIENT,
            lift_coefficient: ball::LIFT_COEFFICIENT,
            mass_kg: ball::MASS_KG,
            radius_m: ball::RADIUS_M,
            resting_height_m: ball::RESTING_HEIGHT_M,
            collision_radius_m: ball::RESTING_HEIGHT_M,
            stop_speed_mps: ball::STOP_SPEED_MPS,
            contact_tolerance_m: bounce::CONTACT_TOLERANCE_M,
            restitution: bounce::RESTITUTION,
            min_bounce_vy: bounce::MIN_BOUNCE_VY,
            horizontal_damping: bounce::HORIZONTAL_DAMPING,
            max_spin_radps: ball::MAX_SPIN_RADPS,
            spin_decay_per_s: ball::SPIN_DECAY_PER_S,
        }
    }
}

impl BallPhysicsConfig {
    #[inline]
    pub fn cross_section_m2(&self) -> f32 {
        std::f32::consts::PI * self.radius_m * self.radius_m
    }

    #[inline]
    pub fn drag_constant(&self) -> f32 {
        ball::drag_constant(
            self.air_density,
            self.cross_section_m2(),
            self.drag_coefficient,
            self.mass_kg,
        )
    }

    #[inline]
    pub fn magnus_constant(&self) -> f32 {
        ball::magnus_constant(
            self.air_density,
            self.cross_section_m2(),
            self.lift_coefficient,
            self.mass_kg,
        )
    }

    /// Convert `spin_decay_per_s` to a per-step spin multiplier.
    #[inline]
    pub fn spin_multiplier(&self, dt: f32) -> f32 {
        (-self.spin_decay_per_s * dt).exp()
    }

    /// Height at or below which the ball counts as touching the ground.
    #[inline]
    pub fn ground_contact_height(&self) -> f32 {
        self.resting_height_m + self.contact_tolerance_m
    }
}

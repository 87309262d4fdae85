//! Physics constants for the penalty shootout
//!
//! Raw physical quantities live here. Gameplay tuning (thresholds, delays,
//! probabilities) lives in `engine::config` and takes its defaults from these.

// ============================================================
// Ball (FIFA size 5, slightly light for arcade feel)
// ============================================================
pub mod ball {
    /// Gravity (m/s²)
    pub const GRAVITY: f32 = 9.81;

    /// Air density at sea level (kg/m³)
    pub const AIR_DENSITY: f32 = 1.2;

    /// Drag coefficient
    pub const DRAG_COEFFICIENT: f32 = 0.25;

    /// Lift coefficient (spin-induced)
    pub const LIFT_COEFFICIENT: f32 = 0.28;

    /// Mass (kg)
    pub const MASS_KG: f32 = 0.4;

    /// Physical radius (m)
    pub const RADIUS_M: f32 = 0.1095;

    /// Height of the ball center when resting on the grass (m).
    ///
    /// Matches the rendered ball, which is larger than the physical radius.
    pub const RESTING_HEIGHT_M: f32 = 0.2;

    /// Below this speed a grounded ball is considered settled (m/s)
    pub const STOP_SPEED_MPS: f32 = 0.1;

    /// Upper bound for |ω| (rad/s)
    pub const MAX_SPIN_RADPS: f32 = 120.0;

    /// Air friction on spin (1/s); ~17% of the spin is gone after 0.3 s
    pub const SPIN_DECAY_PER_S: f32 = 0.6;

    /// `ρ·A·Cd / (2·m)`; multiply by |v|² to get drag acceleration
    pub fn drag_constant(air_density: f32, area: f32, cd: f32, mass: f32) -> f32 {
        air_density * area * cd / (2.0 * mass)
    }

    /// `ρ·A·Cl / (2·m)`; multiply by (ω × v) to get Magnus acceleration
    pub fn magnus_constant(air_density: f32, area: f32, cl: f32, mass: f32) -> f32 {
        air_density * area * cl / (2.0 * mass)
    }
}

// ============================================================
// Grass contact
// ============================================================
pub mod bounce {
    /// Fraction of vertical speed kept after a bounce
    pub const RESTITUTION: f32 = 0.5;

    /// Downward speed needed to bounce instead of sticking (m/s)
    pub const MIN_BOUNCE_VY: f32 = 0.1;

    /// Horizontal velocity retention per ground contact
    pub const HORIZONTAL_DAMPING: f32 = 0.9;

    /// Height tolerance for "on the ground" checks (m)
    pub const CONTACT_TOLERANCE_M: f32 = 0.01;
}

// ============================================================
// Goal frame (goal line at z = 0, centered on x = 0)
// ============================================================
pub mod goal {
    pub const WIDTH_M: f32 = 7.32;
    pub const HALF_WIDTH_M: f32 = WIDTH_M / 2.0;
    pub const HEIGHT_M: f32 = 2.44;
    pub const LINE_Z: f32 = 0.0;

    /// Penalty spot distance from the goal line (m)
    pub const PENALTY_SPOT_M: f32 = 11.0;
}

// ============================================================
// Goalkeeper body + sprite sheet
// ============================================================
pub mod keeper {
    pub const BODY_WIDTH_M: f32 = 1.0;
    pub const BODY_HEIGHT_M: f32 = 2.4;
    pub const BODY_DEPTH_M: f32 = 0.4;

    /// Keeper stands slightly in front of the line
    pub const STAND_Z: f32 = 0.5;

    /// Keeper faces the penalty spot (yaw, rad)
    pub const FACING_YAW: f32 = std::f32::consts::PI;

    /// Dive sprite frames per second
    pub const SPRITE_FRAME_RATE: f32 = 20.0;

    /// Frames in each dive sequence (0..=17)
    pub const DIVE_FRAMES: u32 = 18;
}

pub mod autopilot;
pub mod ball_flight;
pub mod config;
pub mod goalkeeper;
pub mod outcome;
pub mod physics_constants;
pub mod shootout;
pub mod shot;
pub mod timeline;
pub mod vec_math;

pub use ball_flight::{step_ball, Ball, FlightPhase};
pub use config::ShootoutConfig;
pub use goalkeeper::{DiveContext, DiveSide, DiveState, Goalkeeper, KeeperAnimation, KeeperPose};
pub use outcome::{resolve, Aabb, Outcome, Scoreboard, Shooter};
pub use shootout::{
    HudSnapshot, InputEvent, MatchResult, MatchState, MatchSummary, PenaltyShootout, PenaltyState,
    ShootoutEvent, ShotRecord,
};
pub use shot::{compute_opponent_shot, compute_player_shot, OpponentShot, ShotParams};
pub use timeline::{Timeline, TransitionKind};
pub use vec_math::Vec3;

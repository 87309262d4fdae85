//! Scripted stand-in for the human kicker.
//!
//! Picks an aim point inside the frame and a hold duration for the power
//! bar, then feeds the same `InputEvent`s a real input source would.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::shootout::{InputEvent, MatchSummary, PenaltyShootout, PenaltyState, ShootoutEvent};
use super::vec_math::{vec3, Vec3};
use crate::collaborators::Collaborators;

/// Simulation step used by the headless drivers (s)
pub const DEFAULT_TICK_S: f32 = 1.0 / 60.0;

/// Ten simulated minutes at 60 Hz; a 5-round match takes about one
pub const MAX_MATCH_TICKS: usize = 60 * 60 * 10;

#[derive(Debug, Clone)]
pub struct ScriptedKicker {
    rng: ChaCha8Rng,
    /// Aim stays this far inside the posts and bar (m)
    pub aim_inset_m: f32,
    /// Power bar hold range (s)
    pub hold_min_s: f32,
    pub hold_max_s: f32,
    hold_remaining: Option<f32>,
}

impl ScriptedKicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            aim_inset_m: 0.4,
            hold_min_s: 0.35,
            hold_max_s: 0.65,
            hold_remaining: None,
        }
    }

    fn pick_aim(&mut self, game: &PenaltyShootout) -> Vec3 {
        let pitch = &game.config().pitch;
        let x_limit = (pitch.goal_half_width_m - self.aim_inset_m).max(0.0);
        let y_max = (pitch.goal_height_m - self.aim_inset_m).max(self.aim_inset_m);
        vec3(
            self.rng.gen_range(-x_limit..=x_limit),
            self.rng.gen_range(self.aim_inset_m..=y_max),
            pitch.goal_line_z,
        )
    }

    /// Inputs to send this tick, given the current state
    pub fn next_inputs(&mut self, game: &PenaltyShootout, dt: f32) -> Vec<InputEvent> {
        match game.state() {
            PenaltyState::Aiming => {
                let aim = self.pick_aim(game);
                let lo = self.hold_min_s.min(self.hold_max_s);
                let hi = self.hold_max_s.max(self.hold_min_s);
                self.hold_remaining = Some(self.rng.gen_range(lo..=hi));
                vec![InputEvent::AimUpdated(aim), InputEvent::PowerStart]
            }
            PenaltyState::Powering => match self.hold_remaining {
                Some(left) if left > dt => {
                    self.hold_remaining = Some(left - dt);
                    Vec::new()
                }
                _ => {
                    self.hold_remaining = None;
                    vec![InputEvent::PowerRelease]
                }
            },
            _ => Vec::new(),
        }
    }
}

/// Start a fresh game and drive it with `kicker` until game over.
///
/// Returns `None` if the match doesn't finish within `max_ticks`.
pub fn play_match(
    game: &mut PenaltyShootout,
    kicker: &mut ScriptedKicker,
    collab: &mut Collaborators,
    dt: f32,
    max_ticks: usize,
) -> Option<MatchSummary> {
    let mut events: Vec<ShootoutEvent> = game.start_game();
    for _ in 0..max_ticks {
        for input in kicker.next_inputs(game, dt) {
            events.extend(game.handle_input(input, collab));
        }
        events.extend(game.tick(dt, collab));
        if game.is_over() {
            log::debug!("match finished after {:.1}s, {} events", game.now(), events.len());
            return game.summary();
        }
    }
    log::warn!("match did not finish within {} ticks", max_ticks);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{NeutralRoster, NullRenderSink, RewardLedger};
    use crate::engine::config::ShootoutConfig;

    #[test]
    fn test_kicker_aims_inside_frame_then_releases() {
        let cfg = ShootoutConfig::default();
        let mut game = PenaltyShootout::new(cfg.clone(), 1);
        let mut render = NullRenderSink;
        let mut ledger = RewardLedger::default();
        let mut c = Collaborators::new(&mut render, &NeutralRoster, &mut ledger);
        game.start_game();
        game.tick(cfg.timing.start_delay_s, &mut c);
        assert_eq!(game.state(), PenaltyState::Aiming);

        let mut kicker = ScriptedKicker::new(9);
        let inputs = kicker.next_inputs(&game, DEFAULT_TICK_S);
        assert_eq!(inputs.len(), 2);
        match inputs[0] {
            InputEvent::AimUpdated(aim) => {
                assert!(aim.x.abs() <= cfg.pitch.goal_half_width_m);
                assert!(aim.y > 0.0 && aim.y < cfg.pitch.goal_height_m);
            }
            other => panic!("expected aim first, got {other:?}"),
        }
        for input in inputs {
            game.handle_input(input, &mut c);
        }
        assert_eq!(game.state(), PenaltyState::Powering);

        // Hold at most 0.65 s
        let mut released = false;
        for _ in 0..60 {
            for input in kicker.next_inputs(&game, DEFAULT_TICK_S) {
                if input == InputEvent::PowerRelease {
                    released = true;
                }
                game.handle_input(input, &mut c);
            }
            if released {
                break;
            }
            game.tick(DEFAULT_TICK_S, &mut c);
        }
        assert!(released);
        assert!(game.state().is_in_flight());
    }

    #[test]
    fn test_play_match_finishes() {
        let mut game = PenaltyShootout::new(ShootoutConfig::default(), 5);
        let mut kicker = ScriptedKicker::new(6);
        let mut render = NullRenderSink;
        let mut ledger = RewardLedger::default();
        let summary = {
            let mut c = Collaborators::new(&mut render, &NeutralRoster, &mut ledger);
            play_match(&mut game, &mut kicker, &mut c, DEFAULT_TICK_S, MAX_MATCH_TICKS)
        }
        .expect("match should finish");

        assert_eq!(summary.shots.len(), 10);
        assert_eq!(ledger.grants, vec![summary.reward]);
    }
}

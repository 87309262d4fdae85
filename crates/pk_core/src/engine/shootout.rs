//! Round State Machine
//!
//! Owns the match state, the ball, the keeper and the simulation clock.
//! Everything happens synchronously inside [`PenaltyShootout::tick`] and
//! [`PenaltyShootout::handle_input`]; delayed transitions live on a
//! cancelable [`Timeline`] instead of wall-clock timers.
//!
//! ## Round flow
//! ```text
//! Inactive ─▶ Aiming ─▶ Powering ─▶ ShotTaken ─▶ AnimatingKeeper ─▶ EndRound
//!                ▲                                                    │
//!                │                               KeeperTurn ◀─────────┘
//!                │                                    │ (opponent aims)
//!                │                                    ▼
//!                └──── EndRound (round += 1) ◀── OpponentShot
//!                           │
//!                           └─▶ GameOver (round > N)
//! ```
//!
//! ## Tick order
//! 1. power bar
//! 2. due transition
//! 3. keeper dive (before its box is sampled)
//! 4. ball flight (before the resolver runs)
//! 5. outcome resolution, frozen after the first result

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::ball_flight::{step_ball, Ball, FlightPhase};
use super::config::ShootoutConfig;
use super::goalkeeper::{DiveContext, Goalkeeper};
use super::outcome::{resolve, BallSample, Outcome, Scoreboard, Shooter};
use super::shot::{compute_opponent_shot, compute_player_shot};
use super::timeline::{Timeline, TransitionKind};
use super::vec_math::{is_finite, vec3, Vec3};
use crate::collaborators::{CameraView, Collaborators};
use crate::roster::ShooterAttributes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PenaltyState {
    #[default]
    Inactive,
    Aiming,
    Powering,
    ShotTaken,
    AnimatingKeeper,
    EndRound,
    KeeperTurn,
    OpponentShot,
    GameOver,
}

impl PenaltyState {
    /// States in which the ball is flying and the resolver runs
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            PenaltyState::ShotTaken | PenaltyState::AnimatingKeeper | PenaltyState::OpponentShot
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    AimUpdated(Vec3),
    PowerStart,
    PowerRelease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Win,
    Lose,
    Draw,
}

impl MatchResult {
    pub fn from_scores(player: u32, opponent: u32) -> Self {
        match player.cmp(&opponent) {
            std::cmp::Ordering::Greater => MatchResult::Win,
            std::cmp::Ordering::Less => MatchResult::Lose,
            std::cmp::Ordering::Equal => MatchResult::Draw,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            MatchResult::Win => "YOU WIN!",
            MatchResult::Lose => "YOU LOSE!",
            MatchResult::Draw => "IT'S A DRAW!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotRecord {
    pub round: u32,
    pub shooter: Shooter,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShootoutEvent {
    StateChanged { from: PenaltyState, to: PenaltyState },
    ShotResolved(ShotRecord),
    GameOver { result: MatchResult, player_score: u32, opponent_score: u32, reward: u32 },
}

/// Match bookkeeping, reset at every new game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub state: PenaltyState,
    /// 1-based; exceeds `rounds` only once the match is over
    pub round: u32,
    pub score: Scoreboard,
    /// Power bar 0..=100
    pub shot_power: f32,
    pub aim: Vec3,
    /// Whose half of the round is current
    pub turn: Shooter,
    pub result: Option<MatchResult>,
    pub reward_granted: bool,
}

impl MatchState {
    fn new(default_aim: Vec3) -> Self {
        Self {
            state: PenaltyState::Inactive,
            round: 1,
            score: Scoreboard::default(),
            shot_power: 0.0,
            aim: default_aim,
            turn: Shooter::Player,
            result: None,
            reward_granted: false,
        }
    }
}

/// The shot currently in the air
#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveShot {
    shooter: Shooter,
    origin: Vec3,
    launched_at: f64,
    /// Set once; no further evaluation after that
    resolved: Option<Outcome>,
}

/// Read-only view for the HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub state: PenaltyState,
    pub round: u32,
    pub rounds: u32,
    pub player_score: u32,
    pub opponent_score: u32,
    pub shot_power: f32,
    pub score_text: String,
    pub turn_text: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub result: MatchResult,
    pub player_score: u32,
    pub opponent_score: u32,
    pub reward: u32,
    pub shots: Vec<ShotRecord>,
}

pub struct PenaltyShootout {
    config: ShootoutConfig,
    rng: ChaCha8Rng,
    clock: Timeline,
    state: MatchState,
    ball: Ball,
    keeper: Goalkeeper,
    shot: Option<ActiveShot>,
    shots: Vec<ShotRecord>,
    message: String,
    events: Vec<ShootoutEvent>,
}

impl PenaltyShootout {
    pub fn new(config: ShootoutConfig, seed: u64) -> Self {
        let default_aim = Self::goal_center(&config);
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            clock: Timeline::new(),
            state: MatchState::new(default_aim),
            ball: Ball::at_spot(config.pitch.player_spot),
            keeper: Goalkeeper::new(&config),
            shot: None,
            shots: Vec::new(),
            message: String::new(),
            events: Vec::new(),
            config,
        }
    }

    fn goal_center(config: &ShootoutConfig) -> Vec3 {
        vec3(0.0, config.pitch.goal_height_m / 2.0, config.pitch.goal_line_z)
    }

    // ========== Accessors ==========

    pub fn config(&self) -> &ShootoutConfig {
        &self.config
    }

    pub fn state(&self) -> PenaltyState {
        self.state.state
    }

    pub fn match_state(&self) -> &MatchState {
        &self.state
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn keeper(&self) -> &Goalkeeper {
        &self.keeper
    }

    pub fn shots(&self) -> &[ShotRecord] {
        &self.shots
    }

    /// Simulation time (s) since the current game started
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn pending_transition(&self) -> Option<TransitionKind> {
        self.clock.pending().map(|p| p.kind)
    }

    pub fn is_over(&self) -> bool {
        self.state.state == PenaltyState::GameOver
    }

    pub fn hud(&self) -> HudSnapshot {
        let s = &self.state;
        let rounds = self.config.rounds;
        let turn_text = match s.state {
            PenaltyState::Inactive | PenaltyState::GameOver => String::new(),
            _ => match s.turn {
                Shooter::Player => {
                    format!("Round {}/{}: Your Turn - Taker #{}", s.round, rounds, s.round)
                }
                Shooter::Opponent => format!("Round {}/{}: Opponent's Turn", s.round, rounds),
            },
        };
        HudSnapshot {
            state: s.state,
            round: s.round,
            rounds,
            player_score: s.score.player,
            opponent_score: s.score.opponent,
            shot_power: s.shot_power,
            score_text: format!("Player {} - {} Opponent", s.score.player, s.score.opponent),
            turn_text,
            message: self.message.clone(),
        }
    }

    pub fn summary(&self) -> Option<MatchSummary> {
        let result = self.state.result?;
        Some(MatchSummary {
            result,
            player_score: self.state.score.player,
            opponent_score: self.state.score.opponent,
            reward: self.reward_for(result),
            shots: self.shots.clone(),
        })
    }

    fn reward_for(&self, result: MatchResult) -> u32 {
        let rewards = &self.config.rewards;
        match result {
            MatchResult::Win => rewards.win,
            MatchResult::Draw => rewards.draw,
            MatchResult::Lose => rewards.lose,
        }
    }

    // ========== Lifecycle ==========

    /// Reset everything and schedule the first round
    pub fn start_game(&mut self) -> Vec<ShootoutEvent> {
        if let Some(stale) = self.clock.cancel() {
            log::warn!("new game cancelled pending {:?}", stale.kind);
        }
        self.clock.reset();
        let previous = self.state.state;
        self.state = MatchState::new(Self::goal_center(&self.config));
        if previous != PenaltyState::Inactive {
            self.events
                .push(ShootoutEvent::StateChanged { from: previous, to: PenaltyState::Inactive });
        }
        self.ball.reset_to(self.config.pitch.player_spot);
        self.keeper.reset_idle(Shooter::Player, &self.config);
        self.shot = None;
        self.shots.clear();
        self.message.clear();

        log::info!("penalty shootout started: {} rounds", self.config.rounds);
        self.clock.schedule(TransitionKind::BeginPlayerTurn, self.config.timing.start_delay_s);
        self.drain_events()
    }

    /// Cancel whatever is pending and go back to `Inactive`
    pub fn abort(&mut self) -> Vec<ShootoutEvent> {
        if let Some(p) = self.clock.cancel() {
            log::debug!("abort cancelled pending {:?}", p.kind);
        }
        self.shot = None;
        self.message.clear();
        self.set_state(PenaltyState::Inactive);
        log::info!("penalty shootout aborted in round {}", self.state.round);
        self.drain_events()
    }

    // ========== Input ==========

    pub fn handle_input(
        &mut self,
        event: InputEvent,
        collab: &mut Collaborators,
    ) -> Vec<ShootoutEvent> {
        match (event, self.state.state) {
            (InputEvent::AimUpdated(point), PenaltyState::Aiming | PenaltyState::Powering) => {
                if is_finite(&point) {
                    self.state.aim = point;
                }
            }
            (InputEvent::PowerStart, PenaltyState::Aiming) => {
                self.state.shot_power = 0.0;
                self.set_state(PenaltyState::Powering);
            }
            (InputEvent::PowerRelease, PenaltyState::Powering) => self.take_player_shot(collab),
            (event, state) => log::debug!("ignoring {:?} in {:?}", event, state),
        }
        self.drain_events()
    }

    fn take_player_shot(&mut self, collab: &mut Collaborators) {
        let round = self.state.round;
        let attrs = collab.roster.shooter_attributes(round).unwrap_or_else(|| {
            log::warn!("no shooter attributes for round {}; using neutral", round);
            ShooterAttributes::default()
        });

        let origin = self.ball.position;
        let params = compute_player_shot(
            &self.state.aim,
            self.state.shot_power,
            &attrs,
            &origin,
            &self.config,
            &mut self.rng,
        );
        self.ball.launch(params.velocity, params.angular_velocity, &self.config.ball);
        collab.render.sync_shooter(false);
        self.launch_shot(Shooter::Player, origin);
        self.set_state(PenaltyState::ShotTaken);

        let now = self.clock.now() as f32;
        match self.keeper.arm_dive(DiveContext::PlayerShot, now, &self.config, &mut self.rng) {
            Ok(side) => {
                log::debug!("keeper guesses {:?}", side);
                self.set_state(PenaltyState::AnimatingKeeper);
            }
            Err(err) => log::warn!("keeper dive not armed: {}", err),
        }
    }

    fn launch_shot(&mut self, shooter: Shooter, origin: Vec3) {
        self.shot =
            Some(ActiveShot { shooter, origin, launched_at: self.clock.now(), resolved: None });
    }

    // ========== Tick ==========

    pub fn tick(&mut self, dt: f32, collab: &mut Collaborators) -> Vec<ShootoutEvent> {
        if !(dt.is_finite() && dt > 0.0) {
            return Vec::new();
        }
        self.clock.advance(dt);

        if self.state.state == PenaltyState::Powering {
            let power = self.state.shot_power + self.config.timing.power_rate_per_s * dt;
            self.state.shot_power = power.min(100.0);
        }

        if let Some(kind) = self.clock.take_due() {
            self.fire(kind, collab);
        }

        let now = self.clock.now() as f32;
        if self.keeper.is_diving() {
            self.keeper.update(now, &self.config.keeper);
        }

        if self.state.state.is_in_flight() {
            let previous = self.ball.position;
            let phase = step_ball(&mut self.ball, dt, &self.config.ball);
            self.evaluate_shot(previous, phase == FlightPhase::Settled, collab);
        }

        collab.render.sync_ball(&self.ball.position, &self.ball.rotation);
        collab.render.sync_keeper(
            &self.keeper.position,
            &self.keeper.orientation,
            &self.keeper.animation,
        );
        self.drain_events()
    }

    fn evaluate_shot(&mut self, previous: Vec3, settled: bool, collab: &mut Collaborators) {
        let Some(shot) = self.shot else {
            return;
        };
        if shot.resolved.is_some() {
            return;
        }

        let sample = BallSample { previous, current: self.ball.position, settled };
        let keeper_box = self.keeper.collision_box(&self.config.keeper);
        let mut outcome = resolve(&sample, &keeper_box, &shot.origin, &self.config);

        if !outcome.is_resolved()
            && self.clock.now() - shot.launched_at > f64::from(self.config.outcome.shot_timeout_s)
        {
            log::warn!("round {} shot timed out unresolved; counting as a miss", self.state.round);
            outcome = Outcome::Miss;
        }

        if outcome.is_resolved() {
            self.finish_shot(shot.shooter, outcome, collab);
        }
    }

    fn finish_shot(&mut self, shooter: Shooter, outcome: Outcome, collab: &mut Collaborators) {
        if let Some(shot) = self.shot.as_mut() {
            shot.resolved = Some(outcome);
        }
        self.state.score.record(outcome, shooter);

        let record = ShotRecord { round: self.state.round, shooter, outcome };
        self.shots.push(record);
        self.events.push(ShootoutEvent::ShotResolved(record));
        log::info!(
            "round {} {:?}: {:?} ({} - {})",
            record.round,
            shooter,
            outcome,
            self.state.score.player,
            self.state.score.opponent
        );

        self.show_message(outcome.message(), collab);
        self.set_state(PenaltyState::EndRound);

        let next = match shooter {
            Shooter::Player => TransitionKind::BeginKeeperTurn,
            Shooter::Opponent => TransitionKind::FinishRound,
        };
        self.clock.schedule(next, self.config.timing.outcome_message_s);
    }

    // ========== Transitions ==========

    fn fire(&mut self, kind: TransitionKind, collab: &mut Collaborators) {
        let state = self.state.state;
        let expected = match kind {
            TransitionKind::BeginPlayerTurn => {
                matches!(state, PenaltyState::Inactive | PenaltyState::EndRound)
            }
            TransitionKind::BeginKeeperTurn | TransitionKind::FinishRound => {
                state == PenaltyState::EndRound
            }
            TransitionKind::TakeOpponentShot => state == PenaltyState::KeeperTurn,
        };
        if !expected {
            log::warn!("dropping stale transition {:?} in {:?}", kind, state);
            return;
        }

        match kind {
            TransitionKind::BeginPlayerTurn => self.begin_player_turn(collab),
            TransitionKind::BeginKeeperTurn => self.begin_keeper_turn(collab),
            TransitionKind::TakeOpponentShot => self.take_opponent_shot(),
            TransitionKind::FinishRound => self.finish_round(collab),
        }
    }

    fn begin_player_turn(&mut self, collab: &mut Collaborators) {
        self.ball.reset_to(self.config.pitch.player_spot);
        self.keeper.reset_idle(Shooter::Player, &self.config);
        self.shot = None;
        self.state.turn = Shooter::Player;
        self.state.shot_power = 0.0;
        self.state.aim = Self::goal_center(&self.config);
        self.show_message("", collab);

        collab.render.sync_shooter(true);
        collab.render.set_camera(CameraView::PlayerShot);
        log::info!("round {}/{}: player's kick", self.state.round, self.config.rounds);
        self.set_state(PenaltyState::Aiming);
    }

    fn begin_keeper_turn(&mut self, collab: &mut Collaborators) {
        self.ball.reset_to(self.config.pitch.opponent_spot);
        self.keeper.reset_idle(Shooter::Opponent, &self.config);
        self.shot = None;
        self.state.turn = Shooter::Opponent;
        self.show_message("", collab);

        collab.render.set_camera(CameraView::KeeperView);
        log::info!("round {}/{}: opponent's kick", self.state.round, self.config.rounds);
        self.set_state(PenaltyState::KeeperTurn);
        self.clock.schedule(TransitionKind::TakeOpponentShot, self.config.timing.opponent_aim_s);
    }

    fn take_opponent_shot(&mut self) {
        let shot = compute_opponent_shot(&self.keeper.position, &self.config, &mut self.rng);
        self.ball.reset_to(shot.spawn);
        self.ball.launch(shot.velocity, shot.angular_velocity, &self.config.ball);
        self.launch_shot(Shooter::Opponent, shot.spawn);
        self.set_state(PenaltyState::OpponentShot);

        let now = self.clock.now() as f32;
        let context = DiveContext::OpponentShot { spawn: shot.spawn, velocity: shot.velocity };
        if let Err(err) = self.keeper.arm_dive(context, now, &self.config, &mut self.rng) {
            log::warn!("keeper dive not armed: {}", err);
        }
    }

    fn finish_round(&mut self, collab: &mut Collaborators) {
        self.state.round += 1;
        if self.state.round > self.config.rounds {
            self.game_over(collab);
            return;
        }

        self.ball.reset_to(self.config.pitch.player_spot);
        self.keeper.reset_idle(Shooter::Player, &self.config);
        self.shot = None;
        self.state.turn = Shooter::Player;
        self.show_message("", collab);
        self.clock.schedule(TransitionKind::BeginPlayerTurn, self.config.timing.next_round_delay_s);
    }

    fn game_over(&mut self, collab: &mut Collaborators) {
        let score = self.state.score;
        let result = MatchResult::from_scores(score.player, score.opponent);
        let reward = self.reward_for(result);
        self.state.result = Some(result);

        if !self.state.reward_granted {
            collab.rewards.grant_reward(reward);
            self.state.reward_granted = true;
        }

        self.shot = None;
        self.show_message(result.text(), collab);
        self.set_state(PenaltyState::GameOver);
        self.events.push(ShootoutEvent::GameOver {
            result,
            player_score: score.player,
            opponent_score: score.opponent,
            reward,
        });
        log::info!(
            "game over: {} {} - {}, reward {}",
            result.text(),
            score.player,
            score.opponent,
            reward
        );
    }

    /// Resolve the shot in the air as if the resolver had returned `outcome`
    #[cfg(test)]
    pub(crate) fn force_outcome(
        &mut self,
        outcome: Outcome,
        collab: &mut Collaborators,
    ) -> Vec<ShootoutEvent> {
        let in_flight = self.state.state.is_in_flight();
        match self.shot {
            Some(shot) if in_flight && outcome.is_resolved() && shot.resolved.is_none() => {
                self.finish_shot(shot.shooter, outcome, collab);
            }
            _ => {}
        }
        self.drain_events()
    }

    // ========== Helpers ==========

    fn set_state(&mut self, to: PenaltyState) {
        let from = self.state.state;
        if from == to {
            return;
        }
        log::debug!("state {:?} → {:?}", from, to);
        self.state.state = to;
        self.events.push(ShootoutEvent::StateChanged { from, to });
    }

    fn show_message(&mut self, text: &str, collab: &mut Collaborators) {
        self.message = text.to_string();
        collab.render.show_message(text);
    }

    fn drain_events(&mut self) -> Vec<ShootoutEvent> {
        std::mem::take(&mut self.events)
    }
}

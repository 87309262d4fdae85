//! Narrow interfaces to everything outside the simulation core.
//!
//! The core pushes poses and messages out through [`RenderSink`], reads
//! takers through [`RosterProvider`] and pays out through [`RewardSink`].
//! All render methods default to no-ops so a sink that isn't ready yet (or
//! a headless run) needs no code at all.

use serde::{Deserialize, Serialize};

use crate::engine::goalkeeper::KeeperAnimation;
use crate::engine::vec_math::Vec3;
use crate::roster::ShooterAttributes;

/// Camera framing requested at turn boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraView {
    /// Behind the player's spot looking at goal
    PlayerShot,
    /// Behind the goal looking out at the opponent
    KeeperView,
}

pub trait RenderSink {
    fn sync_ball(&mut self, _position: &Vec3, _rotation: &Vec3) {}
    fn sync_keeper(&mut self, _position: &Vec3, _orientation: &Vec3, _anim: &KeeperAnimation) {}
    fn sync_shooter(&mut self, _visible: bool) {}
    fn set_camera(&mut self, _view: CameraView) {}
    fn show_message(&mut self, _text: &str) {}
}

pub trait RosterProvider {
    /// Attributes of the taker for `round` (1-based), `None` if unknown
    fn shooter_attributes(&self, round: u32) -> Option<ShooterAttributes>;
}

pub trait RewardSink {
    fn grant_reward(&mut self, amount: u32);
}

/// Render sink that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderSink;

impl RenderSink for NullRenderSink {}

/// Roster with no takers; every round uses neutral attributes
#[derive(Debug, Default, Clone, Copy)]
pub struct NeutralRoster;

impl RosterProvider for NeutralRoster {
    fn shooter_attributes(&self, _round: u32) -> Option<ShooterAttributes> {
        None
    }
}

/// Collects every reward granted
#[derive(Debug, Default, Clone)]
pub struct RewardLedger {
    pub grants: Vec<u32>,
}

impl RewardLedger {
    pub fn total(&self) -> u32 {
        self.grants.iter().sum()
    }
}

impl RewardSink for RewardLedger {
    fn grant_reward(&mut self, amount: u32) {
        self.grants.push(amount);
    }
}

/// Borrowed collaborators for one `tick`/`handle_input` call
pub struct Collaborators<'a> {
    pub render: &'a mut dyn RenderSink,
    pub roster: &'a dyn RosterProvider,
    pub rewards: &'a mut dyn RewardSink,
}

impl<'a> Collaborators<'a> {
    pub fn new(
        render: &'a mut dyn RenderSink,
        roster: &'a dyn RosterProvider,
        rewards: &'a mut dyn RewardSink,
    ) -> Self {
        Self { render, roster, rewards }
    }
}

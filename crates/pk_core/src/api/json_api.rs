use serde::{Deserialize, Serialize};

use crate::collaborators::{Collaborators, NullRenderSink, RewardLedger};
use crate::engine::autopilot::{play_match, ScriptedKicker, DEFAULT_TICK_S, MAX_MATCH_TICKS};
use crate::engine::config::ShootoutConfig;
use crate::engine::shootout::{MatchResult, PenaltyShootout, ShotRecord};
use crate::error::{CoreError, Result};
use crate::roster::{Lineup, PlayerCard};
use crate::SCHEMA_VERSION;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShootoutRequest {
    pub schema_version: u8,
    pub seed: u64,
    /// Config preset (standard, arcade, deterministic); standard if absent
    #[serde(default)]
    pub profile: Option<String>,
    /// Penalty takers in round order; the default squad if absent
    #[serde(default)]
    pub lineup: Option<Vec<PlayerCard>>,
}

impl ShootoutRequest {
    pub fn new(seed: u64) -> Self {
        Self { schema_version: SCHEMA_VERSION, seed, profile: None, lineup: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShootoutResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub profile: String,
    pub result: MatchResult,
    pub result_text: String,
    pub player_score: u32,
    pub opponent_score: u32,
    pub reward: u32,
    pub takers: Vec<String>,
    pub shots: Vec<ShotRecord>,
}

/// Play one headless shootout with the scripted kicker.
pub fn simulate_shootout(request: &ShootoutRequest) -> Result<ShootoutResponse> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(CoreError::SchemaVersion {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    let profile = request.profile.clone().unwrap_or_else(|| "standard".to_string());
    let config = ShootoutConfig::from_profile(&profile)?;
    config.validate()?;

    let lineup = match &request.lineup {
        Some(cards) => Lineup::new(cards.clone()),
        None => Lineup::default_squad(),
    };
    lineup.validate(config.rounds)?;

    let mut game = PenaltyShootout::new(config, request.seed);
    let mut kicker = ScriptedKicker::new(request.seed.wrapping_add(1));
    let mut render = NullRenderSink;
    let mut ledger = RewardLedger::default();

    let summary = {
        let mut collab = Collaborators::new(&mut render, &lineup, &mut ledger);
        play_match(&mut game, &mut kicker, &mut collab, DEFAULT_TICK_S, MAX_MATCH_TICKS)
    }
    .ok_or(CoreError::Unfinished(MAX_MATCH_TICKS))?;

    log::info!(
        "simulated shootout seed={} profile={}: {} {} - {} (reward {})",
        request.seed,
        profile,
        summary.result.text(),
        summary.player_score,
        summary.opponent_score,
        ledger.total()
    );

    Ok(ShootoutResponse {
        schema_version: SCHEMA_VERSION,
        seed: request.seed,
        profile,
        result: summary.result,
        result_text: summary.result.text().to_string(),
        player_score: summary.player_score,
        opponent_score: summary.opponent_score,
        reward: ledger.total(),
        takers: lineup.takers.iter().map(|c| c.name.clone()).collect(),
        shots: summary.shots,
    })
}

/// JSON in, JSON out wrapper around [`simulate_shootout`].
pub fn simulate_shootout_json(request_json: &str) -> Result<String> {
    let request: ShootoutRequest = serde_json::from_str(request_json)?;
    let response = simulate_shootout(&request)?;
    Ok(serde_json::to_string(&response)?)
}

//! JSON API
//!
//! One request in, one response out. The same request always produces the
//! same response bytes.

use crate::engine::config::{Difficulty, MatchConfig, Matchup, ProfileOverride, SteeringProfile};
use crate::engine::match_engine::{MatchEngine, MatchSummary};
use crate::engine::snapshot::{FrameRecorder, MatchSnapshot};
use crate::engine::types::PerSide;
use crate::error::{DuelError, Result};
use crate::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// One minute of play at 60 ticks per second
pub const DEFAULT_TICKS: u64 = 3600;

fn default_ticks() -> u64 {
    DEFAULT_TICKS
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    pub schema_version: u8,
    pub seed: u64,
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// `"<home>-vs-<away>"`, defaults to `minimax-vs-dqn`
    #[serde(default)]
    pub matchup: Matchup,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Partial overrides of the stock configuration
    #[serde(default)]
    pub config: Option<MatchConfig>,
    /// Per-side profile tweaks. Each one is laid over that side's matchup
    /// preset at the request's difficulty; omitted fields keep the preset.
    #[serde(default)]
    pub profiles: PerSide<Option<ProfileOverride>>,
    /// Record every n-th snapshot (and every goal tick); 0 disables frames
    #[serde(default)]
    pub frame_interval: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub summary: MatchSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<MatchSnapshot>,
}

/// Run a parsed request
pub fn simulate_match(request: &MatchRequest) -> Result<MatchResponse> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(DuelError::UnsupportedSchema {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    let config = request.config.unwrap_or_default();
    let mut engine = MatchEngine::new(config, request.matchup, request.difficulty, request.seed)?;

    if request.profiles.home.is_some() || request.profiles.away.is_some() {
        engine = engine.with_profiles(resolve_profiles(request))?;
    }

    let mut recorder = FrameRecorder::new(request.frame_interval);
    let summary = engine.run_with(&mut recorder, request.ticks);
    log::info!(
        "Simulated {} ticks of {} (seed {}): {}-{}",
        summary.ticks,
        summary.matchup,
        summary.seed,
        summary.score.home,
        summary.score.away
    );

    Ok(MatchResponse { schema_version: SCHEMA_VERSION, summary, frames: recorder.into_frames() })
}

fn resolve_profiles(request: &MatchRequest) -> PerSide<SteeringProfile> {
    let styles = PerSide::new(request.matchup.home, request.matchup.away);
    request.profiles.map(|side, tweak| {
        let preset = SteeringProfile::new(*styles.get(side), request.difficulty);
        tweak.map_or(preset, |tweak| tweak.apply(preset))
    })
}

/// JSON entry point: parse, simulate, serialize
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let response = simulate_match(&request)?;
    Ok(serde_json::to_string(&response)?)
}

use serde::{Deserialize, Serialize};
use shorebreak_core::{DeclareKind, RoundSummary};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    StepCapReached,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerScoreRecord {
    pub player: String,
    pub card_score: i64,
    pub color_bonus: i64,
    pub final_score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub mode: Option<DeclareKind>,
    pub declarer: Option<String>,
    pub declarer_has_highest: Option<bool>,
    pub scores: Vec<PlayerScoreRecord>,
    pub winner: Option<String>,
}

impl From<&RoundSummary> for RoundRecord {
    fn from(summary: &RoundSummary) -> Self {
        Self {
            round: summary.round,
            mode: summary.mode,
            declarer: summary.declarer.clone(),
            declarer_has_highest: summary.declarer_has_highest,
            scores: summary
                .scores
                .iter()
                .map(|entry| PlayerScoreRecord {
                    player: entry.player.clone(),
                    card_score: entry.card_score,
                    color_bonus: entry.color_bonus,
                    final_score: entry.final_score,
                })
                .collect(),
            winner: summary.round_winner.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub seed: u64,
    pub status: RunStatus,
    pub steps: u32,
    pub rounds: Vec<RoundRecord>,
    /// Final match totals in seat order.
    pub totals: Vec<(String, i64)>,
    pub winner: Option<String>,
}

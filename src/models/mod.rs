use serde::{Deserialize, Serialize};

use crate::domain::strategy::Recommendation;

/// Player-visible round status, rendered the way the frontend expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Active,
    Bust,
    #[serde(rename = "Game Over")]
    GameOver,
}

/// Structured view of the round returned by every operation: both hands,
/// recomputed totals, status, recommendation, and the outcome once the
/// round has resolved.
#[derive(Debug, Clone, Serialize)]
pub struct RoundSnapshot {
    pub player_hand: Vec<String>,
    pub player_value: u8,
    pub dealer_hand: Vec<String>,
    pub dealer_value: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealer_upcard: Option<String>,
    pub status: Status,
    pub recommendation: Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DealerCardRequest {
    pub card: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub card_detected: String,
    pub confidence: f32,
    #[serde(flatten)]
    pub snapshot: RoundSnapshot,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(flatten)]
    pub snapshot: RoundSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_with_spaces() {
        assert_eq!(serde_json::to_string(&Status::GameOver).unwrap(), "\"Game Over\"");
        assert_eq!(serde_json::to_string(&Status::Active).unwrap(), "\"Active\"");
    }

    #[test]
    fn recommendation_serializes_verbatim() {
        assert_eq!(
            serde_json::to_string(&Recommendation::AddDealerCard).unwrap(),
            "\"Add dealer card\""
        );
        assert_eq!(serde_json::to_string(&Recommendation::Hit).unwrap(), "\"Hit\"");
    }
}

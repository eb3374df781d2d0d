use serde::Serialize;
use std::fmt;

/// Basic-strategy advice for the player, or a prompt to finish table setup
/// when the dealer upcard is still unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    Hit,
    Stand,
    #[serde(rename = "Add dealer card")]
    AddDealerCard,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Hit => write!(f, "Hit"),
            Recommendation::Stand => write!(f, "Stand"),
            Recommendation::AddDealerCard => write!(f, "Add dealer card"),
        }
    }
}

/// Fixed basic-strategy table over (player total, dealer upcard value).
/// An upcard value of 0 means the dealer hand is not set yet.
pub fn recommend(player_total: u8, dealer_upcard: u8) -> Recommendation {
    if dealer_upcard == 0 {
        return Recommendation::AddDealerCard;
    }
    if player_total >= 17 {
        return Recommendation::Stand;
    }
    if player_total <= 11 {
        return Recommendation::Hit;
    }
    // Stiff totals, 12 through 16.
    if dealer_upcard >= 7 || (player_total == 12 && (2..=3).contains(&dealer_upcard)) {
        Recommendation::Hit
    } else {
        Recommendation::Stand
    }
}

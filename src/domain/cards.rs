use crate::shared::SUIT_LETTERS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub fn parse(raw: &str) -> Option<Rank> {
        match raw {
            "2" => Some(Rank::Two),
            "3" => Some(Rank::Three),
            "4" => Some(Rank::Four),
            "5" => Some(Rank::Five),
            "6" => Some(Rank::Six),
            "7" => Some(Rank::Seven),
            "8" => Some(Rank::Eight),
            "9" => Some(Rank::Nine),
            "10" => Some(Rank::Ten),
            "J" | "Jack" => Some(Rank::Jack),
            "Q" | "Queen" => Some(Rank::Queen),
            "K" | "King" => Some(Rank::King),
            "A" | "Ace" => Some(Rank::Ace),
            _ => None,
        }
    }

    /// Blackjack value of the rank. Aces count as 11 here; hand evaluation
    /// downgrades them to 1 as needed.
    pub fn value(&self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
        }
    }
}

/// Extract the rank from a detector label. Labels come in a compact form
/// with a trailing suit letter ("KC", "10C", "AC") or a verbose form
/// ("King of Clubs").
pub fn rank_of(label: &str) -> Option<Rank> {
    let raw = match label.chars().last() {
        Some(c) if SUIT_LETTERS.contains(&c) && label.len() > 1 => &label[..label.len() - 1],
        _ => label.split(" of ").next().unwrap_or(label),
    };
    Rank::parse(raw)
}

/// Resolve a label to its blackjack value. Unrecognized ranks yield 0,
/// which callers must treat as "reject this card".
pub fn card_value(label: &str) -> u8 {
    match rank_of(label) {
        Some(rank) => rank.value(),
        None => {
            tracing::warn!(%label, "invalid card rank");
            0
        }
    }
}

use std::collections::HashSet;
use std::fmt;

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::domain::cards::card_value;
use crate::domain::hand::{hand_value, is_blackjack};
use crate::error::GameError;
use crate::shared::{BLACKJACK, DEALER_DRAW_LABELS, DEALER_STAND_MIN};

/// How repeated card detections are rejected within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DuplicatePolicy {
    /// Reject only an immediate repeat of the last player card. Useful when
    /// the camera keeps re-detecting the card still on the table.
    LastCard,
    /// Single-deck discipline: reject any label already dealt this round,
    /// across both hands.
    SingleDeck,
}

/// How the dealer hand is completed when the round settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DealerPolicy {
    /// Synthesize random draws until the dealer total reaches 17.
    AutoDraw,
    /// The dealer hand is fed manually and taken as complete.
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    PlayerTurn,
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    PlayerBust,
    DealerBust,
    Push,
    Blackjack,
    PlayerWin,
    DealerWin,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::PlayerBust => "Player busts! Dealer wins.",
            Outcome::DealerBust => "Dealer busts! Player wins.",
            Outcome::Push => "Push! It's a tie.",
            Outcome::Blackjack => "Blackjack! Player wins.",
            Outcome::PlayerWin => "Player wins!",
            Outcome::DealerWin => "Dealer wins.",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The single table round: both hands, the used-card set, and the phase.
/// Hand totals are always recomputed from the card sequences; only the
/// settled outcome is stored, since random dealer draws fix it at settle
/// time.
pub struct Round {
    player: Vec<String>,
    dealer: Vec<String>,
    used: HashSet<String>,
    phase: Phase,
    outcome: Option<Outcome>,
    duplicate_policy: DuplicatePolicy,
    dealer_policy: DealerPolicy,
}

impl Round {
    pub fn new(duplicate_policy: DuplicatePolicy, dealer_policy: DealerPolicy) -> Self {
        Self {
            player: Vec::new(),
            dealer: Vec::new(),
            used: HashSet::new(),
            phase: Phase::Idle,
            outcome: None,
            duplicate_policy,
            dealer_policy,
        }
    }

    pub fn player(&self) -> &[String] {
        &self.player
    }

    pub fn dealer(&self) -> &[String] {
        &self.dealer
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn player_value(&self) -> u8 {
        hand_value(&self.player).0
    }

    pub fn dealer_value(&self) -> u8 {
        hand_value(&self.dealer).0
    }

    /// Value of the dealer's face-up card, 0 while the dealer is not set.
    pub fn upcard_value(&self) -> u8 {
        self.dealer.first().map(|c| card_value(c)).unwrap_or(0)
    }

    /// Append a detected card to the player hand. Starts a fresh round when
    /// none is in progress. A bust settles the round immediately.
    pub fn add_player_card(&mut self, label: &str, rng: &mut StdRng) -> Result<(), GameError> {
        if card_value(label) == 0 {
            return Err(GameError::InvalidCardLabel(label.to_string()));
        }
        if self.phase != Phase::PlayerTurn {
            self.start();
        }
        self.check_duplicate(label, self.player.last())?;

        self.player.push(label.to_string());
        self.used.insert(label.to_string());

        if self.player_value() > BLACKJACK {
            self.settle(rng);
        }
        Ok(())
    }

    /// Append a card to the dealer hand. Starts a fresh round when none is
    /// in progress, so setting the upcard first is a valid opening.
    pub fn add_dealer_card(&mut self, label: &str) -> Result<(), GameError> {
        if card_value(label) == 0 {
            return Err(GameError::InvalidCardLabel(label.to_string()));
        }
        if self.phase != Phase::PlayerTurn {
            self.start();
        }
        self.check_duplicate(label, None)?;

        self.dealer.push(label.to_string());
        self.used.insert(label.to_string());
        Ok(())
    }

    /// Player stands; the dealer settles and the outcome is fixed.
    pub fn stand(&mut self, rng: &mut StdRng) -> Result<(), GameError> {
        if self.phase != Phase::PlayerTurn {
            return Err(GameError::NoActiveRound);
        }
        if self.dealer.is_empty() {
            return Err(GameError::DealerNotSet);
        }
        self.settle(rng);
        Ok(())
    }

    /// Back to Idle with empty hands and an empty used-card set.
    pub fn reset(&mut self) {
        self.player.clear();
        self.dealer.clear();
        self.used.clear();
        self.phase = Phase::Idle;
        self.outcome = None;
    }

    fn start(&mut self) {
        self.reset();
        self.phase = Phase::PlayerTurn;
        tracing::info!("new round started");
    }

    fn check_duplicate(&self, label: &str, last: Option<&String>) -> Result<(), GameError> {
        let rejected = match self.duplicate_policy {
            DuplicatePolicy::LastCard => last.map(|l| l.as_str() == label).unwrap_or(false),
            DuplicatePolicy::SingleDeck => self.used.contains(label),
        };
        if rejected {
            return Err(GameError::DuplicateCard(label.to_string()));
        }
        Ok(())
    }

    fn settle(&mut self, rng: &mut StdRng) {
        if self.dealer_policy == DealerPolicy::AutoDraw {
            while self.dealer_value() < DEALER_STAND_MIN {
                let Some(label) = self.pick_dealer_draw(rng) else {
                    tracing::warn!("no undealt rank left for dealer draw");
                    break;
                };
                tracing::info!(card = %label, "dealer draws");
                self.used.insert(label.clone());
                self.dealer.push(label);
            }
        }

        let outcome = self.determine_outcome();
        tracing::info!(
            player_hand = ?self.player,
            player_value = self.player_value(),
            dealer_hand = ?self.dealer,
            dealer_value = self.dealer_value(),
            outcome = %outcome,
            "round settled"
        );
        self.outcome = Some(outcome);
        self.phase = Phase::Resolved;
    }

    // Draws are uniform over the thirteen ranks. Under single-deck
    // discipline the used set is honored, so a synthesized draw can never
    // collide with a card already on the table.
    fn pick_dealer_draw(&self, rng: &mut StdRng) -> Option<String> {
        let candidates: Vec<&str> = match self.duplicate_policy {
            DuplicatePolicy::SingleDeck => DEALER_DRAW_LABELS
                .iter()
                .copied()
                .filter(|label| !self.used.contains(*label))
                .collect(),
            DuplicatePolicy::LastCard => DEALER_DRAW_LABELS.to_vec(),
        };
        candidates.choose(rng).map(|label| label.to_string())
    }

    fn determine_outcome(&self) -> Outcome {
        let player = self.player_value();
        let dealer = self.dealer_value();
        // A natural beats any non-natural dealer 21, so it is checked ahead
        // of the tie; two naturals still push.
        if player > BLACKJACK {
            Outcome::PlayerBust
        } else if dealer > BLACKJACK {
            Outcome::DealerBust
        } else if is_blackjack(&self.player) && !is_blackjack(&self.dealer) {
            Outcome::Blackjack
        } else if player == dealer {
            Outcome::Push
        } else if player > dealer {
            Outcome::PlayerWin
        } else {
            Outcome::DealerWin
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn strict_round() -> Round {
        Round::new(DuplicatePolicy::SingleDeck, DealerPolicy::Manual)
    }

    #[test]
    fn first_player_card_starts_a_round() {
        let mut round = strict_round();
        assert_eq!(round.phase(), Phase::Idle);

        round.add_player_card("KC", &mut rng()).unwrap();
        assert_eq!(round.phase(), Phase::PlayerTurn);
        assert_eq!(round.player(), ["KC".to_string()]);
    }

    #[test]
    fn dealer_upcard_also_starts_a_round() {
        let mut round = strict_round();
        round.add_dealer_card("5H").unwrap();
        assert_eq!(round.phase(), Phase::PlayerTurn);
        assert_eq!(round.upcard_value(), 5);
    }

    #[test]
    fn invalid_label_is_rejected_without_starting() {
        let mut round = strict_round();
        let err = round.add_player_card("XX", &mut rng()).unwrap_err();
        assert!(matches!(err, GameError::InvalidCardLabel(_)));
        assert_eq!(round.phase(), Phase::Idle);
        assert!(round.player().is_empty());
    }

    #[test]
    fn bust_settles_immediately() {
        let mut round = strict_round();
        let mut rng = rng();
        round.add_player_card("KC", &mut rng).unwrap();
        round.add_player_card("9D", &mut rng).unwrap();
        round.add_player_card("5H", &mut rng).unwrap();

        assert_eq!(round.phase(), Phase::Resolved);
        assert_eq!(round.outcome(), Some(Outcome::PlayerBust));
        assert_eq!(round.outcome().unwrap().message(), "Player busts! Dealer wins.");
    }

    #[test]
    fn bust_beats_any_dealer_total() {
        // Dealer is already bust-worthy too; player bust still loses.
        let mut round = strict_round();
        let mut rng = rng();
        round.add_dealer_card("KH").unwrap();
        round.add_dealer_card("QH").unwrap();
        round.add_dealer_card("5D").unwrap();
        round.add_player_card("KC", &mut rng).unwrap();
        round.add_player_card("9D", &mut rng).unwrap();
        round.add_player_card("5H", &mut rng).unwrap();

        assert_eq!(round.outcome(), Some(Outcome::PlayerBust));
    }

    #[test]
    fn stand_requires_an_active_round() {
        let mut round = strict_round();
        assert!(matches!(round.stand(&mut rng()), Err(GameError::NoActiveRound)));
    }

    #[test]
    fn stand_requires_a_dealer_card() {
        let mut round = strict_round();
        let mut rng = rng();
        round.add_player_card("KC", &mut rng).unwrap();
        assert!(matches!(round.stand(&mut rng), Err(GameError::DealerNotSet)));
        // Round state is untouched by the rejected stand.
        assert_eq!(round.phase(), Phase::PlayerTurn);
    }

    #[test]
    fn higher_player_total_wins() {
        let mut round = strict_round();
        let mut rng = rng();
        round.add_dealer_card("KH").unwrap();
        round.add_dealer_card("9H").unwrap();
        round.add_player_card("KC", &mut rng).unwrap();
        round.add_player_card("QD", &mut rng).unwrap();
        round.stand(&mut rng).unwrap();

        assert_eq!(round.outcome(), Some(Outcome::PlayerWin));
    }

    #[test]
    fn equal_totals_push() {
        let mut round = strict_round();
        let mut rng = rng();
        round.add_dealer_card("KH").unwrap();
        round.add_dealer_card("QH").unwrap();
        round.add_player_card("KC", &mut rng).unwrap();
        round.add_player_card("QD", &mut rng).unwrap();
        round.stand(&mut rng).unwrap();

        assert_eq!(round.outcome(), Some(Outcome::Push));
    }

    #[test]
    fn dealer_bust_loses() {
        let mut round = strict_round();
        let mut rng = rng();
        round.add_dealer_card("KH").unwrap();
        round.add_dealer_card("9H").unwrap();
        round.add_dealer_card("5D").unwrap();
        round.add_player_card("KC", &mut rng).unwrap();
        round.add_player_card("8D", &mut rng).unwrap();
        round.stand(&mut rng).unwrap();

        assert_eq!(round.outcome(), Some(Outcome::DealerBust));
    }

    #[test]
    fn two_card_twenty_one_beats_dealer_twenty_one() {
        let mut round = strict_round();
        let mut rng = rng();
        round.add_dealer_card("7H").unwrap();
        round.add_dealer_card("7D").unwrap();
        round.add_dealer_card("7S").unwrap();
        round.add_player_card("AC", &mut rng).unwrap();
        round.add_player_card("KC", &mut rng).unwrap();
        round.stand(&mut rng).unwrap();

        assert_eq!(round.outcome(), Some(Outcome::Blackjack));
        assert_eq!(round.outcome().unwrap().message(), "Blackjack! Player wins.");
    }

    #[test]
    fn two_naturals_push() {
        let mut round = strict_round();
        let mut rng = rng();
        round.add_dealer_card("AD").unwrap();
        round.add_dealer_card("KD").unwrap();
        round.add_player_card("AC", &mut rng).unwrap();
        round.add_player_card("KC", &mut rng).unwrap();
        round.stand(&mut rng).unwrap();

        assert_eq!(round.outcome(), Some(Outcome::Push));
    }

    #[test]
    fn single_deck_rejects_any_reuse() {
        let mut round = strict_round();
        let mut rng = rng();
        round.add_player_card("KC", &mut rng).unwrap();
        round.add_player_card("5D", &mut rng).unwrap();

        // Not consecutive, still rejected.
        let err = round.add_player_card("KC", &mut rng).unwrap_err();
        assert!(matches!(err, GameError::DuplicateCard(_)));
        assert_eq!(round.player().len(), 2);

        // Dealer cannot reuse a player card either.
        assert!(matches!(
            round.add_dealer_card("5D"),
            Err(GameError::DuplicateCard(_))
        ));
    }

    #[test]
    fn last_card_policy_only_suppresses_repeats() {
        let mut round = Round::new(DuplicatePolicy::LastCard, DealerPolicy::Manual);
        let mut rng = rng();
        round.add_player_card("KC", &mut rng).unwrap();
        assert!(matches!(
            round.add_player_card("KC", &mut rng),
            Err(GameError::DuplicateCard(_))
        ));

        round.add_player_card("5D", &mut rng).unwrap();
        // The same label is allowed again once another card intervened.
        round.add_player_card("KC", &mut rng).unwrap();
        assert_eq!(round.player().len(), 3);
    }

    #[test]
    fn reset_returns_to_idle_from_any_state() {
        let mut round = strict_round();
        let mut rng = rng();
        round.add_dealer_card("KH").unwrap();
        round.add_player_card("QC", &mut rng).unwrap();
        round.add_player_card("9D", &mut rng).unwrap();
        round.stand(&mut rng).unwrap();
        assert_eq!(round.phase(), Phase::Resolved);

        round.reset();
        assert_eq!(round.phase(), Phase::Idle);
        assert!(round.player().is_empty());
        assert!(round.dealer().is_empty());
        assert_eq!(round.outcome(), None);

        // A previously used label is playable again after reset.
        round.add_player_card("QC", &mut rng).unwrap();
    }

    #[test]
    fn detected_card_after_resolution_starts_fresh_round() {
        let mut round = strict_round();
        let mut rng = rng();
        round.add_dealer_card("KH").unwrap();
        round.add_player_card("QC", &mut rng).unwrap();
        round.add_player_card("9D", &mut rng).unwrap();
        round.stand(&mut rng).unwrap();

        round.add_player_card("2C", &mut rng).unwrap();
        assert_eq!(round.phase(), Phase::PlayerTurn);
        assert_eq!(round.player(), ["2C".to_string()]);
        assert!(round.dealer().is_empty());
        assert_eq!(round.outcome(), None);
    }

    #[test]
    fn auto_draw_dealer_settles_at_seventeen() {
        let mut round = Round::new(DuplicatePolicy::SingleDeck, DealerPolicy::AutoDraw);
        let mut rng = rng();
        round.add_dealer_card("2D").unwrap();
        round.add_player_card("KH", &mut rng).unwrap();
        round.add_player_card("8H", &mut rng).unwrap();
        round.stand(&mut rng).unwrap();

        assert!(round.dealer_value() >= DEALER_STAND_MIN);
        assert!(round.outcome().is_some());
    }

    #[test]
    fn auto_draw_honors_the_used_set() {
        for seed in 0..32 {
            let mut round = Round::new(DuplicatePolicy::SingleDeck, DealerPolicy::AutoDraw);
            let mut rng = StdRng::seed_from_u64(seed);
            round.add_dealer_card("2C").unwrap();
            round.add_player_card("KH", &mut rng).unwrap();
            round.add_player_card("8H", &mut rng).unwrap();
            round.stand(&mut rng).unwrap();

            let mut seen = HashSet::new();
            for label in round.player().iter().chain(round.dealer()) {
                assert!(seen.insert(label.clone()), "label {label} dealt twice");
            }
        }
    }

    #[test]
    fn auto_draw_settles_even_with_empty_dealer_hand() {
        // A bust before any dealer card still resolves the round.
        let mut round = Round::new(DuplicatePolicy::SingleDeck, DealerPolicy::AutoDraw);
        let mut rng = rng();
        round.add_player_card("KH", &mut rng).unwrap();
        round.add_player_card("QH", &mut rng).unwrap();
        round.add_player_card("5S", &mut rng).unwrap();

        assert_eq!(round.phase(), Phase::Resolved);
        assert_eq!(round.outcome(), Some(Outcome::PlayerBust));
        assert!(round.dealer_value() >= DEALER_STAND_MIN);
    }

    #[test]
    fn manual_dealer_hand_is_taken_as_complete() {
        let mut round = strict_round();
        let mut rng = rng();
        round.add_dealer_card("2D").unwrap();
        round.add_player_card("KH", &mut rng).unwrap();
        round.add_player_card("8H", &mut rng).unwrap();
        round.stand(&mut rng).unwrap();

        // No synthesized draws: dealer stays on the bare upcard.
        assert_eq!(round.dealer().len(), 1);
        assert_eq!(round.outcome(), Some(Outcome::PlayerWin));
    }
}

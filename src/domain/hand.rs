use crate::domain::cards::card_value;
use crate::shared::BLACKJACK;

/// Best blackjack total for a hand of labels, plus whether the total is
/// soft (an Ace still counted as 11). Each Ace starts at 11 and is
/// downgraded by 10 only while the total exceeds 21.
pub fn hand_value(hand: &[String]) -> (u8, bool) {
    let mut total: u8 = 0;
    let mut aces: u8 = 0;

    for card in hand {
        let value = card_value(card);
        if value == 11 {
            aces += 1;
        }
        total = total.saturating_add(value);
    }

    while total > BLACKJACK && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    (total, aces > 0 && total <= BLACKJACK)
}

/// A natural: exactly two cards totalling 21.
pub fn is_blackjack(hand: &[String]) -> bool {
    hand.len() == 2 && hand_value(hand).0 == BLACKJACK
}

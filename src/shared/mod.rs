pub mod config;

pub use config::Config;

pub const BLACKJACK: u8 = 21;
pub const DEALER_STAND_MIN: u8 = 17;
pub const COMMAND_CHANNEL_CAPACITY: usize = 256;

pub const SUIT_LETTERS: [char; 4] = ['C', 'D', 'H', 'S'];

/// Rank pool for synthesized dealer draws. Suits carry no value, so the
/// club labels stand in for all thirteen ranks.
pub const DEALER_DRAW_LABELS: [&str; 13] = [
    "2C", "3C", "4C", "5C", "6C", "7C", "8C", "9C", "10C", "JC", "QC", "KC", "AC",
];

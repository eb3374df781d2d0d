pub mod cards;
pub mod hand;
pub mod round;
pub mod strategy;

pub use cards::*;
pub use hand::*;
pub use round::*;
pub use strategy::*;

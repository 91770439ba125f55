mod coin_flip;

pub use coin_flip::{CoinFlip, HEADS, TAILS};

//! Cards and card collections.
//!
//! ## Key Types
//!
//! - `Card`: Identifier of one of 52 unique cards, or the joker sentinel
//! - `Suit`, `Rank`: Card properties (ace low, joker above king)
//! - `SuitSet`: Packed set of suits
//! - `CardStack`: Packed set of unique cards plus a joker count
//!
//! The `symbol` module converts cards to and from two-character notation.

pub mod card;
pub mod stack;
pub mod symbol;

pub use card::{Card, Rank, Suit, SuitSet, NUM_RANKS, NUM_SUITS, NUM_UNIQUE_CARDS};
pub use stack::{CardStack, MAX_JOKERS};
pub use symbol::{card_symbol, parse_card, JOKER_SYMBOL};

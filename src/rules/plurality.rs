//! Parliament suit plurality.
//!
//! Used to break tied elections (a strict plurality is required) and to
//! qualify a vote of no confidence (any tied-plurality suit will do).
//! Jokers in Parliament have no suit and never count.

use crate::cards::{CardStack, Suit, SuitSet};

/// Number of Parliament seats held by each suit, indexed by `Suit::index`.
#[must_use]
pub fn suit_counts(parliament: CardStack) -> [u32; 4] {
    Suit::ALL.map(|suit| parliament.count_suit(suit))
}

/// Every suit holding the most Parliament seats. An empty Parliament ties
/// all four suits.
///
/// ```
/// use parliament_engine::cards::{parse_card, CardStack, Suit, SuitSet};
/// use parliament_engine::rules::tied_pluralities;
///
/// let parliament = CardStack::from_cards(["3h", "4h", "5d", "6d", "2c"].map(|s| parse_card(s).unwrap())).unwrap();
/// let tied = tied_pluralities(parliament);
/// assert_eq!(tied, [Suit::Hearts, Suit::Diamonds].into_iter().collect::<SuitSet>());
/// ```
#[must_use]
pub fn tied_pluralities(parliament: CardStack) -> SuitSet {
    let counts = suit_counts(parliament);
    let most = counts.iter().copied().max().unwrap_or(0);
    Suit::ALL
        .into_iter()
        .filter(|suit| counts[suit.index()] == most)
        .collect()
}

/// The suit holding a strict plurality, or `None` when two or more tie.
#[must_use]
pub fn plurality(parliament: CardStack) -> Option<Suit> {
    tied_pluralities(parliament).single_member()
}

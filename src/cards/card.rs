//! Card identifiers: suits, ranks, and the joker sentinel.
//!
//! A `Card` is an integer 0..52 naming one of the 52 unique cards, laid out
//! suit-major (`suit * 13 + rank`). Any identifier of 52 or above is a joker;
//! jokers have no suit and no individual identity.

use serde::{Deserialize, Serialize};

use crate::error::CardError;

/// Number of ranks per suit.
pub const NUM_RANKS: u8 = 13;

/// Number of suits.
pub const NUM_SUITS: u8 = 4;

/// Number of individually identifiable cards.
pub const NUM_UNIQUE_CARDS: u8 = NUM_RANKS * NUM_SUITS;

/// A card suit. Jokers have none.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Clubs = 0,
    Spades = 1,
    Hearts = 2,
    Diamonds = 3,
}

impl Suit {
    /// All suits in identifier order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Spades, Suit::Hearts, Suit::Diamonds];

    /// Get the suit's index (0..4).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a suit by index.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Suit> {
        match index {
            0 => Some(Suit::Clubs),
            1 => Some(Suit::Spades),
            2 => Some(Suit::Hearts),
            3 => Some(Suit::Diamonds),
            _ => None,
        }
    }
}

/// A card rank. Ace is the lowest unique rank; the joker ranks above king.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(0);
    pub const TEN: Rank = Rank(9);
    pub const JACK: Rank = Rank(10);
    pub const QUEEN: Rank = Rank(11);
    pub const KING: Rank = Rank(12);
    pub const JOKER: Rank = Rank(13);

    /// Create a rank from its zero-based value (13 is the joker rank).
    #[must_use]
    pub const fn new(value: u8) -> Option<Rank> {
        if value <= Rank::JOKER.0 {
            Some(Rank(value))
        } else {
            None
        }
    }

    /// Get the zero-based rank value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_joker(self) -> bool {
        self.0 == Rank::JOKER.0
    }

    /// Iterate the thirteen ranks of unique cards, ace first.
    pub fn unique_ranks() -> impl Iterator<Item = Rank> {
        (0..NUM_RANKS).map(Rank)
    }
}

impl TryFrom<u8> for Rank {
    type Error = CardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::new(value).ok_or(CardError::RankOutOfRange(value))
    }
}

/// A card identifier.
///
/// ```
/// use parliament_engine::cards::{Card, Rank, Suit};
///
/// let queen = Card::of(Rank::QUEEN, Suit::Hearts);
/// assert_eq!(queen.suit(), Some(Suit::Hearts));
/// assert_eq!(queen.rank(), Rank::QUEEN);
///
/// assert!(Card::new(60).is_joker());
/// assert_eq!(Card::JOKER.suit(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8")]
pub struct Card(u8);

impl Card {
    /// The canonical joker identifier.
    pub const JOKER: Card = Card(NUM_UNIQUE_CARDS);

    /// Create a card from its identifier. Identifiers of 52 and above
    /// collapse to the joker.
    #[must_use]
    pub const fn new(id: u8) -> Card {
        if id >= NUM_UNIQUE_CARDS {
            Card::JOKER
        } else {
            Card(id)
        }
    }

    /// The unique card of the given rank and suit.
    ///
    /// Passing the joker rank yields the joker.
    #[must_use]
    pub const fn of(rank: Rank, suit: Suit) -> Card {
        if rank.is_joker() {
            Card::JOKER
        } else {
            Card(suit as u8 * NUM_RANKS + rank.0)
        }
    }

    /// Get the raw identifier.
    #[must_use]
    pub const fn id(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_joker(self) -> bool {
        self.0 >= NUM_UNIQUE_CARDS
    }

    /// The card's suit, or `None` for a joker.
    #[must_use]
    pub const fn suit(self) -> Option<Suit> {
        if self.is_joker() {
            None
        } else {
            Suit::from_index(self.0 / NUM_RANKS)
        }
    }

    #[must_use]
    pub const fn rank(self) -> Rank {
        if self.is_joker() {
            Rank::JOKER
        } else {
            Rank(self.0 % NUM_RANKS)
        }
    }

    /// Strict rank comparison. Jokers outrank every unique card.
    #[must_use]
    pub fn outranks(self, other: Card) -> bool {
        self.rank() > other.rank()
    }

    /// Whether this card may stand for `suit`: a card of that suit, or a joker.
    #[must_use]
    pub fn fits_suit(self, suit: Suit) -> bool {
        self.is_joker() || self.suit() == Some(suit)
    }

    /// Iterate all 52 unique cards.
    pub fn all_unique() -> impl Iterator<Item = Card> {
        (0..NUM_UNIQUE_CARDS).map(Card)
    }
}

impl From<u8> for Card {
    fn from(id: u8) -> Self {
        Card::new(id)
    }
}

impl TryFrom<i32> for Card {
    type Error = CardError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        if id < 0 {
            return Err(CardError::OutOfRange(id));
        }
        Ok(Card::new(u8::try_from(id).unwrap_or(u8::MAX)))
    }
}

/// A set of suits, packed into the low four bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuitSet(u8);

impl SuitSet {
    pub const EMPTY: SuitSet = SuitSet(0);
    pub const ALL: SuitSet = SuitSet(0b1111);

    /// A set holding exactly one suit.
    #[must_use]
    pub const fn single(suit: Suit) -> SuitSet {
        SuitSet(1 << suit as u8)
    }

    /// Get the raw bitmask; bit `i` is set for the suit with index `i`.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn insert(&mut self, suit: Suit) {
        self.0 |= 1 << suit as u8;
    }

    #[must_use]
    pub const fn contains(self, suit: Suit) -> bool {
        self.0 & (1 << suit as u8) != 0
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The only member, if the set has exactly one.
    #[must_use]
    pub fn single_member(self) -> Option<Suit> {
        if self.len() == 1 {
            Suit::from_index(self.0.trailing_zeros() as u8)
        } else {
            None
        }
    }

    pub fn iter(self) -> impl Iterator<Item = Suit> {
        Suit::ALL.into_iter().filter(move |&s| self.contains(s))
    }
}

impl FromIterator<Suit> for SuitSet {
    fn from_iter<I: IntoIterator<Item = Suit>>(iter: I) -> Self {
        let mut set = SuitSet::EMPTY;
        for suit in iter {
            set.insert(suit);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suit_major_layout() {
        let card = Card::new(15);
        assert_eq!(card.suit(), Some(Suit::Spades));
        assert_eq!(card.rank(), Rank::new(2).unwrap());
        assert_eq!(Card::of(Rank::KING, Suit::Diamonds).id(), 51);
        assert_eq!(Card::of(Rank::ACE, Suit::Clubs).id(), 0);
    }

    #[test]
    fn test_joker_sentinel() {
        for id in [52u8, 53, 100, 255] {
            let card = Card::new(id);
            assert!(card.is_joker());
            assert_eq!(card, Card::JOKER);
            assert_eq!(card.rank(), Rank::JOKER);
            assert_eq!(card.suit(), None);
        }
        assert_eq!(Card::of(Rank::JOKER, Suit::Hearts), Card::JOKER);
    }

    #[test]
    fn test_try_from_i32() {
        assert_eq!(Card::try_from(7), Ok(Card::new(7)));
        assert_eq!(Card::try_from(52), Ok(Card::JOKER));
        assert_eq!(Card::try_from(10_000), Ok(Card::JOKER));
        assert_eq!(Card::try_from(-1), Err(CardError::OutOfRange(-1)));
    }

    #[test]
    fn test_serde_normalizes_identifiers() {
        let card: Card = serde_json::from_str("200").unwrap();
        assert_eq!(card, Card::JOKER);
        let card: Card = serde_json::from_str("51").unwrap();
        assert_eq!(card, Card::of(Rank::KING, Suit::Diamonds));
        assert_eq!(serde_json::to_string(&Card::new(17)).unwrap(), "17");

        let rank: Rank = serde_json::from_str("13").unwrap();
        assert_eq!(rank, Rank::JOKER);
        assert!(serde_json::from_str::<Rank>("14").is_err());
        assert!(serde_json::from_str::<Rank>("200").is_err());
        assert_eq!(Rank::try_from(200), Err(CardError::RankOutOfRange(200)));
    }

    #[test]
    fn test_outranks() {
        let ace = Card::of(Rank::ACE, Suit::Hearts);
        let king = Card::of(Rank::KING, Suit::Clubs);
        assert!(king.outranks(ace));
        assert!(!ace.outranks(king));
        assert!(Card::JOKER.outranks(king));
        assert!(!Card::JOKER.outranks(Card::JOKER));
    }

    #[test]
    fn test_fits_suit() {
        let five = Card::of(Rank::new(4).unwrap(), Suit::Hearts);
        assert!(five.fits_suit(Suit::Hearts));
        assert!(!five.fits_suit(Suit::Spades));
        assert!(Card::JOKER.fits_suit(Suit::Spades));
    }

    #[test]
    fn test_suit_set() {
        let mut set = SuitSet::single(Suit::Hearts);
        assert_eq!(set.single_member(), Some(Suit::Hearts));

        set.insert(Suit::Clubs);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Suit::Clubs));
        assert!(!set.contains(Suit::Diamonds));
        assert_eq!(set.single_member(), None);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Suit::Clubs, Suit::Hearts]);

        let all: SuitSet = Suit::ALL.into_iter().collect();
        assert_eq!(all, SuitSet::ALL);
    }
}

//! Packed card collections.
//!
//! A `CardStack` is a `u64`: bits 0..52 flag which unique cards are present
//! and bits 52..64 hold the number of jokers. Jokers are interchangeable, so
//! stacks only ever count them.
//!
//! ## Containment
//!
//! `a.contains(b)` holds when every unique card of `b` is in `a` and `a` has
//! at least as many jokers as `b`. This lets callers ask "does `a` have
//! enough of whatever `b` specifies" without jokers needing an identity.
//!
//! ## Usage
//!
//! ```
//! use parliament_engine::cards::{Card, CardStack};
//!
//! let mut hand = CardStack::from_cards([Card::new(3), Card::new(17), Card::JOKER]).unwrap();
//! let mut parliament = CardStack::EMPTY;
//!
//! CardStack::move_cards(&mut parliament, &mut hand, CardStack::card(Card::new(17))).unwrap();
//! assert_eq!(hand.size(), 2);
//! assert!(parliament.contains_card(Card::new(17)));
//!
//! // Moving cards that are not there fails and touches neither side.
//! assert!(CardStack::move_cards(&mut parliament, &mut hand, CardStack::card(Card::new(40))).is_err());
//! assert_eq!(hand.size(), 2);
//! ```

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit, NUM_RANKS, NUM_UNIQUE_CARDS};
use crate::error::StackError;

/// Bit position of the joker count.
pub const JOKER_SHIFT: u32 = NUM_UNIQUE_CARDS as u32;

/// Mask of the unique-card bits.
pub const UNIQUE_MASK: u64 = (1u64 << JOKER_SHIFT) - 1;

/// Largest joker count a stack can hold.
pub const MAX_JOKERS: u32 = (1u32 << (64 - JOKER_SHIFT)) - 1;

const SUIT_MASK: u64 = (1u64 << NUM_RANKS) - 1;
const RANK_MASK: u64 = 1 | 1 << 13 | 1 << 26 | 1 << 39;

/// A collection of cards: a set of unique cards plus a joker count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardStack(u64);

impl CardStack {
    /// The empty stack.
    pub const EMPTY: CardStack = CardStack(0);

    /// Every unique card, no jokers.
    pub const ALL_UNIQUE: CardStack = CardStack(UNIQUE_MASK);

    /// Reinterpret raw bits as a stack.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Get the raw packed bits.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// A stack holding a single card (one joker for the joker sentinel).
    #[must_use]
    pub const fn card(card: Card) -> Self {
        if card.is_joker() {
            Self(1u64 << JOKER_SHIFT)
        } else {
            Self(1u64 << card.id())
        }
    }

    /// A stack holding `count` jokers and nothing else.
    pub fn jokers(count: u32) -> Result<Self, StackError> {
        if count > MAX_JOKERS {
            return Err(StackError::JokerOverflow { max: MAX_JOKERS });
        }
        Ok(Self((count as u64) << JOKER_SHIFT))
    }

    /// All 52 unique cards plus `num_jokers` jokers.
    pub fn full_deck(num_jokers: u32) -> Result<Self, StackError> {
        Ok(Self(Self::jokers(num_jokers)?.0 | UNIQUE_MASK))
    }

    /// Collect cards into a stack. Jokers accumulate; a repeated unique card
    /// is an error.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self, StackError> {
        let mut stack = Self::EMPTY;
        for card in cards {
            stack.insert(Self::card(card))?;
        }
        Ok(stack)
    }

    /// The unique-card bits.
    #[must_use]
    pub const fn unique(self) -> u64 {
        self.0 & UNIQUE_MASK
    }

    #[must_use]
    pub const fn joker_count(self) -> u32 {
        (self.0 >> JOKER_SHIFT) as u32
    }

    /// Number of cards: unique cards plus jokers.
    #[must_use]
    pub const fn size(self) -> u32 {
        self.unique().count_ones() + self.joker_count()
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether `self` has at least the cards `other` specifies.
    #[must_use]
    pub const fn contains(self, other: CardStack) -> bool {
        other.unique() & !self.unique() == 0 && self.joker_count() >= other.joker_count()
    }

    #[must_use]
    pub const fn contains_card(self, card: Card) -> bool {
        self.contains(Self::card(card))
    }

    /// Whether the two stacks share no unique card.
    #[must_use]
    pub const fn is_disjoint(self, other: CardStack) -> bool {
        self.unique() & other.unique() == 0
    }

    /// Cards present in both stacks (jokers: the smaller count).
    #[must_use]
    pub fn intersection(self, other: CardStack) -> CardStack {
        let jokers = self.joker_count().min(other.joker_count());
        Self((self.unique() & other.unique()) | (jokers as u64) << JOKER_SHIFT)
    }

    /// Cards of `self` not in `other` (jokers: saturating difference).
    #[must_use]
    pub fn difference(self, other: CardStack) -> CardStack {
        let jokers = self.joker_count().saturating_sub(other.joker_count());
        Self((self.unique() & !other.unique()) | (jokers as u64) << JOKER_SHIFT)
    }

    /// Add `cards` to this stack. Joker counts are summed, never OR'd.
    ///
    /// Fails without mutating if a unique card is already present or the
    /// joker count would overflow its bit range.
    pub fn insert(&mut self, cards: CardStack) -> Result<(), StackError> {
        if let Some(dup) = Self(self.unique() & cards.unique()).cards().next() {
            return Err(StackError::DuplicateCard(dup));
        }
        let jokers = self.joker_count() + cards.joker_count();
        if jokers > MAX_JOKERS {
            return Err(StackError::JokerOverflow { max: MAX_JOKERS });
        }
        self.0 = self.unique() | cards.unique() | (jokers as u64) << JOKER_SHIFT;
        Ok(())
    }

    /// Remove exactly `cards`. Fails without mutating unless
    /// `self.contains(cards)`.
    pub fn remove(&mut self, cards: CardStack) -> Result<(), StackError> {
        if !self.contains(cards) {
            return Err(StackError::NotContained);
        }
        *self = self.difference(cards);
        Ok(())
    }

    /// Remove whichever of `cards` are present and return what was removed.
    ///
    /// Used to attribute cards that are known to lie somewhere in the union
    /// of this stack and another disjoint pool: the caller takes the
    /// remainder from the other pool.
    pub fn remove_partial(&mut self, cards: CardStack) -> CardStack {
        let removed = self.intersection(cards);
        *self = self.difference(removed);
        removed
    }

    /// Move `cards` from `orig` to `dest`.
    ///
    /// Fails without mutating either side unless `orig` contains `cards`
    /// and `dest` can accept them.
    pub fn move_cards(
        dest: &mut CardStack,
        orig: &mut CardStack,
        cards: CardStack,
    ) -> Result<(), StackError> {
        let mut from = *orig;
        let mut to = *dest;
        from.remove(cards)?;
        to.insert(cards)?;
        *orig = from;
        *dest = to;
        Ok(())
    }

    /// Only the cards of `suit`.
    #[must_use]
    pub const fn filter_suit(self, suit: Suit) -> CardStack {
        Self(self.0 & SUIT_MASK << (suit as u32 * NUM_RANKS as u32))
    }

    /// Only the cards of `rank`. The joker rank keeps just the jokers.
    #[must_use]
    pub const fn filter_rank(self, rank: Rank) -> CardStack {
        if rank.is_joker() {
            Self(self.0 & !UNIQUE_MASK)
        } else {
            Self(self.0 & RANK_MASK << rank.value())
        }
    }

    /// Number of cards of `suit`.
    #[must_use]
    pub const fn count_suit(self, suit: Suit) -> u32 {
        self.filter_suit(suit).size()
    }

    /// The highest-ranked card of `suit`, if any.
    #[must_use]
    pub fn highest_of_suit(self, suit: Suit) -> Option<Card> {
        self.filter_suit(suit).cards().last()
    }

    /// Iterate the unique cards, lowest identifier first. Jokers are skipped.
    pub fn cards(self) -> impl Iterator<Item = Card> {
        let mut bits = self.unique();
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let id = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Some(Card::new(id))
        })
    }

    /// Iterate each distinct playable card: the unique cards, then a single
    /// joker if any are present.
    pub fn distinct(self) -> impl Iterator<Item = Card> {
        let joker = (self.joker_count() > 0).then_some(Card::JOKER);
        self.cards().chain(joker)
    }

    /// The first distinct card, if the stack is non-empty.
    #[must_use]
    pub fn first(self) -> Option<Card> {
        self.distinct().next()
    }
}

//! Game state from the observer's point of view.
//!
//! ## Where cards live
//!
//! Every card is in exactly one of:
//! - a seat's known cards
//! - the face-down pool (the draw pile plus every unknown card in another
//!   seat's hand; the two cannot be told apart)
//! - Parliament, the Cabinet, the Discard pile, or the PM slot
//! - the open sub-protocol (`Mode::pending_cards`)
//!
//! A seat's hand size counts known and unknown cards alike. The observer's
//! hand is always fully known.
//!
//! ## Hand bookkeeping
//!
//! Hand sizes and known cards change together, only through
//! `take_from_hand`, `give_to_hand` and the two draw operations, so they
//! cannot drift apart. `audit` checks every invariant from scratch.

use im::Vector;

use super::action::ActionRecord;
use super::config::GameConfig;
use super::mode::Mode;
use super::seat::{Seat, SeatMap};
use crate::cards::{Card, CardStack, Suit, SuitSet};
use crate::error::{ActionError, ConfigError, EngineError, InvariantViolation};

/// One seat's hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hand {
    /// Number of cards held, known or not.
    pub(crate) size: u32,

    /// The cards known to be held.
    pub(crate) known: CardStack,
}

impl Hand {
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn known(&self) -> CardStack {
        self.known
    }

    /// Cards held whose identity is unknown.
    #[must_use]
    pub fn unknown(&self) -> u32 {
        self.size.saturating_sub(self.known.size())
    }
}

/// Complete observed game state.
///
/// Mutated only by the rules engine. `duplicate` gives an independent copy
/// for speculative play; the action history is shared structurally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) turn: Seat,
    pub(crate) mode: Mode,

    pub(crate) pm_seat: Option<Seat>,
    pub(crate) pm_card: Option<Card>,
    pub(crate) cabinet: CardStack,
    pub(crate) parliament: CardStack,
    pub(crate) discard: CardStack,

    pub(crate) draw_pile: u32,
    pub(crate) hands: SeatMap<Hand>,
    pub(crate) face_down: CardStack,

    pub(crate) history: Vector<ActionRecord>,
}

impl GameState {
    /// Start tracking a game. Every seat holds one card; the observer's is
    /// `first_card`.
    pub fn new(config: GameConfig, first_card: Card) -> Result<Self, EngineError> {
        config.validate()?;
        if first_card.is_joker() && config.num_jokers == 0 {
            return Err(ConfigError::FirstCardUnavailable.into());
        }

        let mut face_down = CardStack::full_deck(config.num_jokers.into())
            .map_err(|_| ConfigError::TooManyJokers {
                got: config.num_jokers.into(),
                max: crate::cards::MAX_JOKERS,
            })?;
        let first = CardStack::card(first_card);
        face_down
            .remove(first)
            .map_err(|_| ConfigError::FirstCardUnavailable)?;

        let observer = config.observer;
        let hands = SeatMap::try_new(config.seat_count, |seat| Hand {
            size: 1,
            known: if seat == observer { first } else { CardStack::EMPTY },
        })
        .map_err(EngineError::exhausted("creating hands"))?;

        Ok(Self {
            draw_pile: config.initial_draw_pile(),
            config,
            turn: Seat::FIRST,
            mode: Mode::Normal,
            pm_seat: None,
            pm_card: None,
            cabinet: CardStack::EMPTY,
            parliament: CardStack::EMPTY,
            discard: CardStack::EMPTY,
            hands,
            face_down,
            history: Vector::new(),
        })
    }

    /// Shorthand for `new` with the default hand-size cap and joker rules.
    pub fn init(
        num_jokers: u8,
        seat_count: u8,
        observer: Seat,
        first_card: Card,
    ) -> Result<Self, EngineError> {
        Self::new(GameConfig::new(seat_count, observer).with_jokers(num_jokers), first_card)
    }

    /// An independent copy. Fails only if memory runs out.
    pub fn duplicate(&self) -> Result<Self, EngineError> {
        Ok(Self {
            config: self.config.clone(),
            turn: self.turn,
            mode: self
                .mode
                .try_clone()
                .map_err(EngineError::exhausted("copying the election table"))?,
            pm_seat: self.pm_seat,
            pm_card: self.pm_card,
            cabinet: self.cabinet,
            parliament: self.parliament,
            discard: self.discard,
            draw_pile: self.draw_pile,
            hands: self
                .hands
                .try_clone()
                .map_err(EngineError::exhausted("copying hands"))?,
            face_down: self.face_down,
            history: self.history.clone(),
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn seat_count(&self) -> u8 {
        self.config.seat_count
    }

    #[must_use]
    pub fn observer(&self) -> Seat {
        self.config.observer
    }

    /// The seat to act.
    #[must_use]
    pub fn turn(&self) -> Seat {
        self.turn
    }

    #[must_use]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    #[must_use]
    pub fn pm_seat(&self) -> Option<Seat> {
        self.pm_seat
    }

    #[must_use]
    pub fn pm_card(&self) -> Option<Card> {
        self.pm_card
    }

    #[must_use]
    pub fn cabinet(&self) -> CardStack {
        self.cabinet
    }

    #[must_use]
    pub fn parliament(&self) -> CardStack {
        self.parliament
    }

    #[must_use]
    pub fn discard(&self) -> CardStack {
        self.discard
    }

    #[must_use]
    pub fn draw_pile(&self) -> u32 {
        self.draw_pile
    }

    #[must_use]
    pub fn face_down(&self) -> CardStack {
        self.face_down
    }

    #[must_use]
    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat]
    }

    #[must_use]
    pub fn hand_size(&self, seat: Seat) -> u32 {
        self.hands[seat].size
    }

    /// The observer's hand.
    #[must_use]
    pub fn observer_hand(&self) -> CardStack {
        self.hands[self.config.observer].known
    }

    /// Every accepted action, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Parliament's strict plurality suit, if one suit leads outright.
    #[must_use]
    pub fn plurality(&self) -> Option<Suit> {
        crate::rules::plurality(self.parliament)
    }

    /// Every suit tied for the most Parliament seats.
    #[must_use]
    pub fn tied_pluralities(&self) -> SuitSet {
        crate::rules::tied_pluralities(self.parliament)
    }

    #[must_use]
    pub fn is_pm(&self, seat: Seat) -> bool {
        self.pm_seat == Some(seat)
    }

    #[must_use]
    pub fn is_observer(&self, seat: Seat) -> bool {
        self.config.observer == seat
    }

    // === Hand queries ===

    /// Whether `seat` could play `cards` from its hand.
    ///
    /// Exact for the observer. For other seats, cards not known to be held
    /// must be in the face-down pool and fit within the seat's unknown
    /// cards.
    #[must_use]
    pub fn seat_can_supply(&self, seat: Seat, cards: CardStack) -> bool {
        let hand = &self.hands[seat];
        if self.is_observer(seat) {
            return hand.known.contains(cards);
        }
        let rest = cards.difference(hand.known.intersection(cards));
        rest.size() <= hand.unknown() && self.face_down.contains(rest)
    }

    /// Whether the seat to act could play `cards` from its hand.
    #[must_use]
    pub fn hand_contains(&self, cards: CardStack) -> bool {
        self.seat_can_supply(self.turn, cards)
    }

    // === Hand mutation ===

    /// Take `cards` out of `seat`'s hand. Nothing changes on failure.
    pub(crate) fn take_from_hand(&mut self, seat: Seat, cards: CardStack) -> Result<(), ActionError> {
        if !self.seat_can_supply(seat, cards) {
            return Err(ActionError::NotInHand { seat, cards });
        }
        let hand = &mut self.hands[seat];
        let unknown = cards.difference(hand.known.intersection(cards));
        self.face_down.remove(unknown)?;
        hand.known.remove_partial(cards);
        hand.size -= cards.size();
        tracing::trace!(%seat, %cards, "cards left hand");
        Ok(())
    }

    /// Put publicly seen `cards` into `seat`'s hand.
    pub(crate) fn give_to_hand(&mut self, seat: Seat, cards: CardStack) -> Result<(), ActionError> {
        let hand = &mut self.hands[seat];
        hand.known.insert(cards)?;
        hand.size += cards.size();
        tracing::trace!(%seat, %cards, "cards returned to hand");
        Ok(())
    }

    /// A seat other than the observer draws an unseen card.
    pub(crate) fn draw_hidden(&mut self, seat: Seat) -> Result<(), ActionError> {
        if self.draw_pile == 0 {
            return Err(ActionError::DrawPileEmpty);
        }
        self.draw_pile -= 1;
        self.hands[seat].size += 1;
        Ok(())
    }

    /// The observer draws `card`.
    pub(crate) fn draw_revealed(&mut self, card: Card) -> Result<(), ActionError> {
        if self.draw_pile == 0 {
            return Err(ActionError::DrawPileEmpty);
        }
        let drawn = CardStack::card(card);
        if !self.face_down.contains(drawn) {
            return Err(ActionError::NotFaceDown(card));
        }
        self.face_down.remove(drawn)?;
        self.draw_pile -= 1;
        let observer = self.config.observer;
        self.give_to_hand(observer, drawn)
    }

    /// Move the next seat into the turn.
    pub(crate) fn advance_turn(&mut self) {
        self.turn = self.turn.next(self.config.seat_count);
    }

    // === Invariants ===

    /// Cards in the PM slot.
    #[must_use]
    pub fn pm_slot(&self) -> CardStack {
        self.pm_card.map_or(CardStack::EMPTY, CardStack::card)
    }

    /// Check every bookkeeping invariant.
    ///
    /// ```
    /// use parliament_engine::cards::parse_card;
    /// use parliament_engine::core::{GameState, Seat};
    ///
    /// let state = GameState::init(2, 3, Seat(1), parse_card("3h").unwrap()).unwrap();
    /// assert!(state.audit().is_ok());
    /// ```
    pub fn audit(&self) -> Result<(), InvariantViolation> {
        let observer = self.config.observer;
        let pending = self.mode.pending_cards();

        let mut locations = vec![
            self.face_down,
            self.parliament,
            self.cabinet,
            self.discard,
            self.pm_slot(),
            pending,
        ];
        locations.extend(self.hands.values().map(|h| h.known));

        let mut seen = 0u64;
        let mut jokers = 0u32;
        for stack in &locations {
            if let Some(dup) = CardStack::from_bits(seen & stack.unique()).cards().next() {
                return Err(InvariantViolation::DuplicatedCard(dup));
            }
            seen |= stack.unique();
            jokers += stack.joker_count();
        }
        if let Some(missing) = CardStack::ALL_UNIQUE.difference(CardStack::from_bits(seen)).cards().next() {
            return Err(InvariantViolation::MissingCard(missing));
        }
        if jokers != u32::from(self.config.num_jokers) {
            return Err(InvariantViolation::JokerCount {
                found: jokers,
                expected: self.config.num_jokers.into(),
            });
        }

        let mut hidden = 0;
        for (seat, hand) in self.hands.iter() {
            let known = hand.known.size();
            if seat == observer {
                if known != hand.size {
                    return Err(InvariantViolation::ObserverHandUnknown { size: hand.size, known });
                }
            } else if known > hand.size {
                return Err(InvariantViolation::KnownExceedsHand {
                    seat,
                    size: hand.size,
                    known,
                });
            }
            hidden += hand.unknown();
        }
        if self.face_down.size() != self.draw_pile + hidden {
            return Err(InvariantViolation::FaceDownSize {
                found: self.face_down.size(),
                expected: self.draw_pile + hidden,
            });
        }

        let counted = self.draw_pile
            + self.hands.values().map(|h| h.size).sum::<u32>()
            + self.parliament.size()
            + self.cabinet.size()
            + self.discard.size()
            + self.pm_slot().size()
            + pending.size();
        if counted != self.config.total_cards() {
            return Err(InvariantViolation::CardCount {
                found: counted,
                expected: self.config.total_cards(),
            });
        }
        Ok(())
    }
}

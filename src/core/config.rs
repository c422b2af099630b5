//! Game configuration.
//!
//! A `GameConfig` fixes the table for the lifetime of one observed game:
//! - `seat_count`: number of seats (2-8)
//! - `observer`: the seat whose hand is known
//! - `num_jokers`: jokers shuffled into the deck
//! - `max_hand_size`: a draw that pushes a hand past this forces a discard
//! - `joker_precedence`: whether an ace can beat a joker
//!
//! Configuration is validated once, when a `GameState` is created.

use serde::{Deserialize, Serialize};

use super::seat::Seat;
use crate::cards::{MAX_JOKERS, NUM_UNIQUE_CARDS};
use crate::error::ConfigError;

/// Fewest seats a game can have.
pub const MIN_SEATS: u8 = 2;

/// Most seats a game can have.
pub const MAX_SEATS: u8 = 8;

/// How a joker ranks against an ace.
///
/// A joker outranks every unique card. The only question is whether the
/// lowest card is allowed to topple it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JokerPrecedence {
    /// An ace (of the required suit, where one applies) beats a joker.
    #[default]
    AceBeatsJoker,
    /// Nothing beats a joker.
    Unbeatable,
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats at the table.
    pub seat_count: u8,

    /// The seat whose cards are known.
    pub observer: Seat,

    /// Number of jokers in play.
    pub num_jokers: u8,

    /// Largest hand a seat may keep at the end of a draw.
    pub max_hand_size: u32,

    pub joker_precedence: JokerPrecedence,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seat_count: 3,
            observer: Seat(0),
            num_jokers: 2,
            max_hand_size: 9,
            joker_precedence: JokerPrecedence::default(),
        }
    }
}

impl GameConfig {
    /// Create a configuration for `seat_count` seats, observing `observer`.
    #[must_use]
    pub fn new(seat_count: u8, observer: Seat) -> Self {
        Self {
            seat_count,
            observer,
            ..Self::default()
        }
    }

    /// Set the number of jokers.
    #[must_use]
    pub fn with_jokers(mut self, num_jokers: u8) -> Self {
        self.num_jokers = num_jokers;
        self
    }

    /// Set the hand-size cap.
    #[must_use]
    pub fn with_max_hand_size(mut self, max_hand_size: u32) -> Self {
        self.max_hand_size = max_hand_size;
        self
    }

    /// Set how jokers rank against aces.
    #[must_use]
    pub fn with_joker_precedence(mut self, precedence: JokerPrecedence) -> Self {
        self.joker_precedence = precedence;
        self
    }

    /// Check that the configuration describes a playable table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.seat_count) {
            return Err(ConfigError::SeatCount {
                got: self.seat_count,
                min: MIN_SEATS,
                max: MAX_SEATS,
            });
        }
        if self.observer.0 >= self.seat_count {
            return Err(ConfigError::ObserverOutOfRange {
                observer: self.observer,
                seat_count: self.seat_count,
            });
        }
        if u32::from(self.num_jokers) > MAX_JOKERS {
            return Err(ConfigError::TooManyJokers {
                got: self.num_jokers.into(),
                max: MAX_JOKERS,
            });
        }
        if self.max_hand_size == 0 {
            return Err(ConfigError::ZeroHandSize);
        }
        Ok(())
    }

    /// Total cards in play: the unique cards plus the jokers.
    #[must_use]
    pub fn total_cards(&self) -> u32 {
        u32::from(NUM_UNIQUE_CARDS) + u32::from(self.num_jokers)
    }

    /// Most cards Parliament can hold.
    #[must_use]
    pub fn parliament_capacity(&self) -> u32 {
        2 * u32::from(self.seat_count)
    }

    /// Support a coalition needs: more than half of Parliament's capacity.
    #[must_use]
    pub fn majority(&self) -> u32 {
        u32::from(self.seat_count) + 1
    }

    /// Draw-pile size once every seat holds its starting card.
    #[must_use]
    pub fn initial_draw_pile(&self) -> u32 {
        self.total_cards() - u32::from(self.seat_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.joker_precedence, JokerPrecedence::AceBeatsJoker);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new(5, Seat(4))
            .with_jokers(0)
            .with_max_hand_size(12)
            .with_joker_precedence(JokerPrecedence::Unbeatable);

        assert_eq!(config.seat_count, 5);
        assert_eq!(config.observer, Seat(4));
        assert_eq!(config.num_jokers, 0);
        assert_eq!(config.max_hand_size, 12);
        assert_eq!(config.joker_precedence, JokerPrecedence::Unbeatable);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_derived_quantities() {
        let config = GameConfig::new(3, Seat(1)).with_jokers(2);
        assert_eq!(config.total_cards(), 54);
        assert_eq!(config.parliament_capacity(), 6);
        assert_eq!(config.majority(), 4);
        assert_eq!(config.initial_draw_pile(), 51);
    }

    #[test]
    fn test_validate_rejects() {
        assert_eq!(
            GameConfig::new(1, Seat(0)).validate(),
            Err(ConfigError::SeatCount { got: 1, min: 2, max: 8 })
        );
        assert_eq!(
            GameConfig::new(9, Seat(0)).validate(),
            Err(ConfigError::SeatCount { got: 9, min: 2, max: 8 })
        );
        assert_eq!(
            GameConfig::new(3, Seat(3)).validate(),
            Err(ConfigError::ObserverOutOfRange {
                observer: Seat(3),
                seat_count: 3,
            })
        );
        assert_eq!(
            GameConfig::default().with_max_hand_size(0).validate(),
            Err(ConfigError::ZeroHandSize)
        );
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::new(4, Seat(2)).with_jokers(1);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}

//! Which card beats which.
//!
//! Ranks run ace (low) to king, then joker. A challenger beats a unique
//! target by strictly outranking it, so a joker beats every unique card.
//! A joker target can only fall to an ace, and only under
//! `JokerPrecedence::AceBeatsJoker`.

use crate::cards::{Card, Rank, Suit};
use crate::core::JokerPrecedence;

/// Whether `challenger` beats `target`.
///
/// `required_suit` is the suit a challenge must follow, if any. The caller
/// checks that the challenger fits it; here it only restricts which ace
/// may topple a joker.
///
/// ```
/// use parliament_engine::cards::parse_card;
/// use parliament_engine::core::JokerPrecedence;
/// use parliament_engine::rules::beats;
///
/// let p = JokerPrecedence::AceBeatsJoker;
/// let c = |s| parse_card(s).unwrap();
/// assert!(beats(c("5h"), c("4h"), None, p));
/// assert!(!beats(c("4h"), c("4d"), None, p));
/// assert!(beats(c("ah"), c("zz"), None, p));
/// assert!(!beats(c("ah"), c("zz"), None, JokerPrecedence::Unbeatable));
/// ```
#[must_use]
pub fn beats(challenger: Card, target: Card, required_suit: Option<Suit>, precedence: JokerPrecedence) -> bool {
    if target.is_joker() {
        let ace_allowed = precedence == JokerPrecedence::AceBeatsJoker;
        let suit_ok = required_suit.map_or(true, |suit| challenger.suit() == Some(suit));
        return ace_allowed && challenger.rank() == Rank::ACE && suit_ok;
    }
    challenger.outranks(target)
}

/// Whether `challenger` can impeach the PM card. A king also topples a king.
#[must_use]
pub fn can_impeach_pm(challenger: Card, pm_card: Card, precedence: JokerPrecedence) -> bool {
    (challenger.rank() == Rank::KING && pm_card.rank() == Rank::KING)
        || beats(challenger, pm_card, None, precedence)
}

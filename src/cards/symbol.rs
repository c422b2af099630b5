//! Two-character card notation.
//!
//! The first character is the rank: `a` (ace), `2`-`9`, `x` (ten), `j`, `q`,
//! `k`. The second is the suit's initial: `c`, `s`, `h`, `d`. Jokers are `zz`.
//! Parsing ignores case.

use std::fmt;
use std::str::FromStr;

use super::card::{Card, Rank, Suit};
use super::stack::CardStack;
use crate::error::CardError;

/// The symbol written for every joker.
pub const JOKER_SYMBOL: &str = "zz";

const SUIT_SYMBOLS: [char; 4] = ['c', 's', 'h', 'd'];

fn rank_symbol(rank: Rank) -> char {
    match rank {
        Rank::ACE => 'a',
        Rank::TEN => 'x',
        Rank::JACK => 'j',
        Rank::QUEEN => 'q',
        Rank::KING => 'k',
        // Ranks 1..=8 are the pips two through nine.
        r => char::from(b'1' + r.value()),
    }
}

fn parse_rank(symbol: char) -> Option<Rank> {
    match symbol.to_ascii_lowercase() {
        'a' => Some(Rank::ACE),
        'x' => Some(Rank::TEN),
        'j' => Some(Rank::JACK),
        'q' => Some(Rank::QUEEN),
        'k' => Some(Rank::KING),
        d @ '2'..='9' => Rank::new(d as u8 - b'1'),
        _ => None,
    }
}

fn parse_suit(symbol: char) -> Option<Suit> {
    let lower = symbol.to_ascii_lowercase();
    SUIT_SYMBOLS
        .iter()
        .position(|&s| s == lower)
        .and_then(|i| Suit::from_index(i as u8))
}

/// Parse a two-character card symbol.
///
/// ```
/// use parliament_engine::cards::{parse_card, Card, Rank, Suit};
///
/// assert_eq!(parse_card("qh").unwrap(), Card::of(Rank::QUEEN, Suit::Hearts));
/// assert_eq!(parse_card("xc").unwrap(), Card::of(Rank::TEN, Suit::Clubs));
/// assert!(parse_card("zz").unwrap().is_joker());
/// assert!(parse_card("1h").is_err());
/// ```
pub fn parse_card(symbol: &str) -> Result<Card, CardError> {
    if symbol.eq_ignore_ascii_case(JOKER_SYMBOL) {
        return Ok(Card::JOKER);
    }
    let mut chars = symbol.chars();
    let (Some(r), Some(s), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(CardError::SymbolLength(symbol.to_string()));
    };
    let rank = parse_rank(r).ok_or(CardError::UnknownRank(r))?;
    let suit = parse_suit(s).ok_or(CardError::UnknownSuit(s))?;
    Ok(Card::of(rank, suit))
}

/// The two-character symbol for a card.
#[must_use]
pub fn card_symbol(card: Card) -> String {
    card.to_string()
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit() {
            Some(suit) => write!(f, "{}{}", rank_symbol(self.rank()), SUIT_SYMBOLS[suit.index()]),
            None => f.write_str(JOKER_SYMBOL),
        }
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_card(s)
    }
}

impl fmt::Display for CardStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut first = true;
        for card in self.cards() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
            first = false;
        }
        match self.joker_count() {
            0 => {}
            n => {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "+{n} joker{}", if n == 1 { "" } else { "s" })?;
            }
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_unique_card() {
        for card in Card::all_unique() {
            let symbol = card_symbol(card);
            assert_eq!(symbol.len(), 2);
            assert_eq!(parse_card(&symbol), Ok(card));
        }
    }

    #[test]
    fn test_parse_examples() {
        assert_eq!(parse_card("3h"), Ok(Card::of(Rank::new(2).unwrap(), Suit::Hearts)));
        assert_eq!(parse_card("ac"), Ok(Card::of(Rank::ACE, Suit::Clubs)));
        assert_eq!(parse_card("kd"), Ok(Card::of(Rank::KING, Suit::Diamonds)));
        assert_eq!(parse_card("9s"), Ok(Card::of(Rank::new(8).unwrap(), Suit::Spades)));
        assert_eq!(parse_card("QH"), Ok(Card::of(Rank::QUEEN, Suit::Hearts)));
        assert_eq!("zz".parse::<Card>(), Ok(Card::JOKER));
        assert_eq!(parse_card("ZZ"), Ok(Card::JOKER));
        assert_eq!(parse_card("Zz"), Ok(Card::JOKER));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_card("3"), Err(CardError::SymbolLength("3".to_string())));
        assert_eq!(parse_card("3hh"), Err(CardError::SymbolLength("3hh".to_string())));
        assert_eq!(parse_card("1h"), Err(CardError::UnknownRank('1')));
        assert_eq!(parse_card("th"), Err(CardError::UnknownRank('t')));
        assert_eq!(parse_card("3z"), Err(CardError::UnknownSuit('z')));
    }

    #[test]
    fn test_format() {
        assert_eq!(Card::JOKER.to_string(), "zz");
        assert_eq!(Card::of(Rank::TEN, Suit::Spades).to_string(), "xs");
        assert_eq!(Card::of(Rank::new(1).unwrap(), Suit::Clubs).to_string(), "2c");
    }

    #[test]
    fn test_stack_display() {
        let mut s = CardStack::from_cards(["3h", "4d"].map(|c| parse_card(c).unwrap())).unwrap();
        assert_eq!(s.to_string(), "[3h 4d]");
        s.insert(CardStack::jokers(2).unwrap()).unwrap();
        assert_eq!(s.to_string(), "[3h 4d +2 jokers]");
        assert_eq!(CardStack::card(Card::JOKER).to_string(), "[+1 joker]");
        assert_eq!(CardStack::EMPTY.to_string(), "[]");
    }
}

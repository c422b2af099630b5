//! MP impeachment chains.
//!
//! A challenger outranks an MP and the table gets a chance to answer,
//! seat 0 first. Blocks and reimpeachments alternate: each must follow
//! the impeached MP's suit and beat the card currently standing, and
//! restarts the cycle at seat 0. The overtaken card is discarded. Once a
//! full cycle passes without an answer, the impeached MP is discarded and
//! the standing card takes its seat in Parliament.

use tracing::{info, trace};

use crate::cards::{Card, CardStack};
use crate::core::{ActionKind, GameState, ImpeachChain, Mode, Seat};
use crate::error::ActionError;

use super::ordering::beats;

pub(super) fn impeach_mp(state: &mut GameState, mp: Card, challenger: Card) -> Result<(), ActionError> {
    if !state.parliament.contains_card(mp) {
        return Err(ActionError::NotInParliament(mp));
    }
    if !beats(challenger, mp, None, state.config.joker_precedence) {
        return Err(ActionError::Outranked { challenger, target: mp });
    }

    let impeacher = state.turn;
    state.take_from_hand(impeacher, CardStack::card(challenger))?;
    trace!(%impeacher, %mp, %challenger, "MP impeached");

    state.mode = Mode::BlockImpeach(ImpeachChain {
        impeached: mp,
        card_to_beat: challenger,
        resume: impeacher.next(state.config.seat_count),
    });
    state.turn = Seat::FIRST;
    Ok(())
}

fn open_chain(state: &GameState, action: ActionKind) -> Result<ImpeachChain, ActionError> {
    match &state.mode {
        Mode::BlockImpeach(chain) | Mode::Reimpeach(chain) => Ok(*chain),
        other => Err(ActionError::WrongMode {
            action,
            mode: other.kind(),
        }),
    }
}

/// Play `card` over the standing card: a block or a reimpeachment.
pub(super) fn overtake(state: &mut GameState, card: Card, action: ActionKind) -> Result<(), ActionError> {
    let chain = open_chain(state, action)?;
    let required = chain.impeached.suit();
    if let Some(suit) = required {
        if !card.fits_suit(suit) {
            return Err(ActionError::WrongSuit(card));
        }
    }
    if !beats(card, chain.card_to_beat, required, state.config.joker_precedence) {
        return Err(ActionError::Outranked {
            challenger: card,
            target: chain.card_to_beat,
        });
    }

    let seat = state.turn;
    state.take_from_hand(seat, CardStack::card(card))?;
    state.discard.insert(CardStack::card(chain.card_to_beat))?;
    trace!(%seat, %card, overtaken = %chain.card_to_beat, "impeachment answered");

    let chain = ImpeachChain {
        card_to_beat: card,
        ..chain
    };
    state.mode = match state.mode {
        Mode::BlockImpeach(_) => Mode::Reimpeach(chain),
        _ => Mode::BlockImpeach(chain),
    };
    state.turn = Seat::FIRST;
    Ok(())
}

/// Pass on answering. After the last seat passes, the chain resolves.
pub(super) fn decline(state: &mut GameState, action: ActionKind) -> Result<(), ActionError> {
    let chain = open_chain(state, action)?;
    let next = state.turn.next(state.config.seat_count);
    if next != Seat::FIRST {
        state.turn = next;
        return Ok(());
    }

    state.parliament.remove(CardStack::card(chain.impeached))?;
    state.discard.insert(CardStack::card(chain.impeached))?;
    state.parliament.insert(CardStack::card(chain.card_to_beat))?;
    info!(
        removed = %chain.impeached,
        seated = %chain.card_to_beat,
        "impeachment settled"
    );
    state.mode = Mode::Normal;
    state.turn = chain.resume;
    Ok(())
}

//! Legal-action oracle.
//!
//! Outside `NORMAL` the legal set depends only on the mode: each open
//! sub-protocol offers a forced choice. In `NORMAL` the set is built from
//! the acting seat's situation. Hidden hands are given the benefit of the
//! doubt: card-level feasibility is only checked for the observer.
//!
//! The oracle is advisory. `apply_action` re-validates everything.

use crate::cards::{CardStack, Rank};
use crate::core::{ActionKind, ActionSet, GameState, Mode, ModeKind, Seat};

use super::ordering::{beats, can_impeach_pm};
use super::plurality::tied_pluralities;

const NORMAL_ACTIONS: ActionSet = ActionSet::of(&[
    ActionKind::Draw,
    ActionKind::SelfDraw,
    ActionKind::Discard,
    ActionKind::AppointMp,
    ActionKind::CallElection,
    ActionKind::ImpeachMp,
    ActionKind::ImpeachPm,
    ActionKind::VoteNoConfidence,
    ActionKind::CabinetReshuffle,
    ActionKind::AppointPm,
]);

/// Every action kind `apply_action` will consider in a mode.
#[must_use]
pub fn mode_actions(mode: ModeKind) -> ActionSet {
    match mode {
        ModeKind::Normal => NORMAL_ACTIONS,
        ModeKind::DiscardAfterDraw => ActionSet::of(&[ActionKind::Discard]),
        ModeKind::BlockImpeach => ActionSet::of(&[ActionKind::BlockImpeach, ActionKind::NoBlockImpeach]),
        ModeKind::Reimpeach => ActionSet::of(&[ActionKind::Reimpeach, ActionKind::NoReimpeach]),
        ModeKind::Election => ActionSet::of(&[ActionKind::ContestElection, ActionKind::NoContestElection]),
        ModeKind::BackupPm => ActionSet::of(&[ActionKind::AppointBackupPm]),
        ModeKind::PmChooseOrder => ActionSet::of(&[ActionKind::EndgamePmFirst, ActionKind::EndgamePmLast]),
        ModeKind::Endgame => ActionSet::of(&[ActionKind::EndgameTryFormation, ActionKind::EndgamePassFormation]),
        ModeKind::BlockCoalition => ActionSet::of(&[
            ActionKind::EndgameBlockCoalition,
            ActionKind::EndgameNoBlockCoalition,
        ]),
        ModeKind::CounterBlockCoalition => ActionSet::of(&[
            ActionKind::EndgameCounterBlockCoalition,
            ActionKind::EndgameNoCounterBlockCoalition,
        ]),
        ModeKind::GameOver => ActionSet::EMPTY,
    }
}

/// The actions currently permitted to the seat to act.
#[must_use]
pub fn legal_actions(state: &GameState) -> ActionSet {
    match state.mode() {
        Mode::Normal => normal_actions(state),
        other => mode_actions(other.kind()),
    }
}

fn normal_actions(state: &GameState) -> ActionSet {
    let seat = state.turn();
    let observed = state.is_observer(seat);
    let hand_size = state.hand_size(seat);
    let hand = state.hand(seat).known();
    let mut set = ActionSet::EMPTY;

    if state.draw_pile() > 0 {
        set.insert(if observed { ActionKind::SelfDraw } else { ActionKind::Draw });
    }

    if hand_size > 0 {
        set.insert(ActionKind::Discard);
        if state.parliament().size() < state.config().parliament_capacity() {
            set.insert(ActionKind::AppointMp);
        }
        if !state.parliament().is_empty() && (!observed || can_impeach_some_mp(state, hand)) {
            set.insert(ActionKind::ImpeachMp);
        }
        if let Some(pm_card) = state.pm_card() {
            let precedence = state.config().joker_precedence;
            if !observed || hand.distinct().any(|c| can_impeach_pm(c, pm_card, precedence)) {
                set.insert(ActionKind::ImpeachPm);
            }
        }
    }

    // The PM may stake Cabinet members alongside hand cards.
    let (stake_pool, stake_size) = if state.is_pm(seat) {
        let cabinet = state.cabinet();
        (CardStack::from_bits(hand.unique() | cabinet.unique()), hand_size + cabinet.size())
    } else {
        (hand, hand_size)
    };
    if stake_size >= 3 && (!observed || has_three_of_a_suit(stake_pool)) {
        set.insert(ActionKind::CallElection);
    }
    if hand_size >= 3 && state.pm_card().is_some() && (!observed || can_vote_no_confidence(state, hand)) {
        set.insert(ActionKind::VoteNoConfidence);
    }

    if is_sitting_pm(state, seat) && !state.cabinet().is_empty() {
        set.insert(ActionKind::AppointPm);
        if !state.parliament().is_empty() {
            set.insert(ActionKind::CabinetReshuffle);
        }
    }

    set
}

fn is_sitting_pm(state: &GameState, seat: Seat) -> bool {
    state.is_pm(seat) && state.pm_card().is_some()
}

fn can_impeach_some_mp(state: &GameState, hand: CardStack) -> bool {
    let precedence = state.config().joker_precedence;
    hand.distinct()
        .any(|c| state.parliament().distinct().any(|mp| beats(c, mp, None, precedence)))
}

fn has_three_of_a_suit(cards: CardStack) -> bool {
    crate::cards::Suit::ALL
        .into_iter()
        .any(|suit| cards.count_suit(suit) >= 3)
}

/// Three unique cards of one rank, one of which stands for a tied-plurality
/// suit without an MP of that suit outranking it.
fn can_vote_no_confidence(state: &GameState, hand: CardStack) -> bool {
    let tied = tied_pluralities(state.parliament());
    Rank::unique_ranks().any(|rank| {
        let of_rank = hand.filter_rank(rank);
        of_rank.size() >= 3
            && of_rank
                .cards()
                .any(|card| super::transition::stands_against_plurality(state, card, tied))
    })
}

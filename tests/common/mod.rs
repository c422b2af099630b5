//! Shared helpers for integration tests.
//!
//! - card notation shortcuts
//! - quiet, idempotent tracing setup
//! - an argument enumerator that turns legal action kinds into concrete
//!   actions, and a playout driver built on it

#![allow(dead_code)]

use std::sync::OnceLock;

use parliament_engine::cards::{parse_card, Card, CardStack, Rank, Suit};
use parliament_engine::core::{Action, ActionKind, GameState, Seat};
use parliament_engine::rules::{ParliamentRules, RulesEngine};
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceLock<()> = OnceLock::new();

/// Initialize tracing for tests.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn card(symbol: &str) -> Card {
    parse_card(symbol).unwrap_or_else(|e| panic!("bad card symbol {symbol:?}: {e}"))
}

pub fn stack(symbols: &[&str]) -> CardStack {
    CardStack::from_cards(symbols.iter().map(|s| card(s))).unwrap()
}

pub fn action(kind: ActionKind, symbols: &[&str]) -> Action {
    let cards: Vec<Card> = symbols.iter().map(|s| card(s)).collect();
    Action::with_cards(kind, &cards)
}

/// Apply an action that must be accepted, checking the bookkeeping after.
#[track_caller]
pub fn play(state: &mut GameState, kind: ActionKind, symbols: &[&str]) {
    let seat = state.turn();
    ParliamentRules::new()
        .apply_action(state, &action(kind, symbols))
        .unwrap_or_else(|e| panic!("{seat} {kind:?} {symbols:?} rejected: {e}\n{state}"));
    state
        .audit()
        .unwrap_or_else(|e| panic!("audit failed after {kind:?} {symbols:?}: {e}\n{state}"));
}

/// Apply an action that must be rejected, checking nothing changed.
#[track_caller]
pub fn reject(state: &mut GameState, kind: ActionKind, symbols: &[&str]) {
    let before = state.clone();
    let result = ParliamentRules::new().apply_action(state, &action(kind, symbols));
    assert!(result.is_err(), "{kind:?} {symbols:?} was accepted");
    assert_eq!(*state, before, "rejected {kind:?} changed the state");
}

/// Every seat draws in turn until the draw pile holds `left` cards. The
/// observer draws the lowest face-down card each time.
pub fn draw_until(state: &mut GameState, left: u32) {
    while state.draw_pile() > left {
        let kind = if state.is_observer(state.turn()) {
            ActionKind::SelfDraw
        } else {
            ActionKind::Draw
        };
        let cards: Vec<Card> = match kind {
            ActionKind::SelfDraw => state.face_down().first().into_iter().collect(),
            _ => Vec::new(),
        };
        let result = ParliamentRules::new().apply_action(state, &Action::with_cards(kind, &cards));
        result.unwrap_or_else(|e| panic!("draw rejected: {e}\n{state}"));
    }
}

// =============================================================================
// Argument enumeration
// =============================================================================

/// Cards `seat` might play from hand. Exact for the observer; for hidden
/// seats, the known cards plus at most `per_suit` face-down cards of each
/// suit and a joker.
fn hand_pool(state: &GameState, seat: Seat, per_suit: usize) -> Vec<Card> {
    let known = state.hand(seat).known();
    if state.is_observer(seat) {
        return known.distinct().collect();
    }
    let mut pool: Vec<Card> = known.distinct().collect();
    if state.hand(seat).unknown() > 0 {
        let face_down = state.face_down();
        for suit in Suit::ALL {
            pool.extend(face_down.filter_suit(suit).cards().take(per_suit));
        }
        if face_down.joker_count() > 0 && !pool.contains(&Card::JOKER) {
            pool.push(Card::JOKER);
        }
    }
    pool
}

fn triples(pool: &[Card], same: impl Fn(Card, Card) -> bool) -> Vec<[Card; 3]> {
    let mut out = Vec::new();
    for (i, &a) in pool.iter().enumerate() {
        for (j, &b) in pool.iter().enumerate().skip(i + 1) {
            for &c in &pool[j + 1..] {
                if !a.is_joker() && same(a, b) && same(a, c) {
                    out.push([a, b, c]);
                }
            }
        }
    }
    out
}

/// Concrete actions to try for `kind` in the current state.
pub fn candidate_actions(state: &GameState, kind: ActionKind) -> Vec<Action> {
    let seat = state.turn();
    let pool = hand_pool(state, seat, 5);
    let one = |cards: Vec<Card>| -> Vec<Action> {
        cards.into_iter().map(|c| Action::with_cards(kind, &[c])).collect()
    };

    match kind.arity() {
        0 => vec![Action::new(kind)],
        _ => match kind {
            ActionKind::SelfDraw => one(state.face_down().distinct().collect()),
            ActionKind::AppointPm | ActionKind::AppointBackupPm => one(state.cabinet().distinct().collect()),
            ActionKind::EndgameTryFormation => {
                let mut cards = pool;
                if state.is_pm(seat) {
                    cards.extend(state.pm_card());
                }
                one(cards)
            }
            ActionKind::ImpeachMp => state
                .parliament()
                .distinct()
                .flat_map(|mp| pool.iter().map(move |&c| Action::with_cards(kind, &[mp, c])))
                .collect(),
            ActionKind::CabinetReshuffle => state
                .cabinet()
                .distinct()
                .flat_map(|cab| {
                    state
                        .parliament()
                        .distinct()
                        .map(move |mp| Action::with_cards(kind, &[cab, mp]))
                })
                .collect(),
            ActionKind::CallElection | ActionKind::ContestElection => {
                let mut cards = pool;
                if state.is_pm(seat) {
                    cards.extend(state.cabinet().cards());
                }
                triples(&cards, |a, b| a.suit() == b.suit())
                    .into_iter()
                    .map(|t| Action::with_cards(kind, &t))
                    .collect()
            }
            ActionKind::VoteNoConfidence => triples(&pool, |a, b| a.rank() == b.rank() && a.rank() != Rank::JOKER)
                .into_iter()
                .map(|t| Action::with_cards(kind, &t))
                .collect(),
            _ => one(pool),
        },
    }
}

/// Apply the first acceptable candidate for some legal kind, starting the
/// search at `choice`. Returns the applied action, or `None` if nothing
/// was accepted.
pub fn step(state: &mut GameState, choice: usize) -> Option<Action> {
    let rules = ParliamentRules::new();
    let mut candidates: Vec<Action> = rules
        .legal_actions(state)
        .iter()
        .flat_map(|kind| candidate_actions(state, kind))
        .collect();
    if candidates.is_empty() {
        return None;
    }
    let start = choice % candidates.len();
    candidates.rotate_left(start);
    candidates
        .into_iter()
        .find(|action| rules.apply_action(state, action).is_ok())
}

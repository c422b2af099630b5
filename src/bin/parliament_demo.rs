//! Plays a short scripted game from seat 1's point of view and prints the
//! table along the way. Set `RUST_LOG=debug` to see every action.

use std::error::Error;
use std::time::Instant;

use parliament_engine::{parse_card, Action, ActionKind, GameState, ModeKind, ParliamentRules, RulesEngine, Seat};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SCRIPT: &[(ActionKind, &[&str])] = &[
    (ActionKind::Draw, &[]),
    (ActionKind::AppointMp, &["3h"]),
    (ActionKind::ImpeachMp, &["3h", "4d"]),
    (ActionKind::BlockImpeach, &["5h"]),
    (ActionKind::NoReimpeach, &[]),
    (ActionKind::NoReimpeach, &[]),
    (ActionKind::NoReimpeach, &[]),
    (ActionKind::Draw, &[]),
    (ActionKind::SelfDraw, &["xc"]),
    (ActionKind::Draw, &[]),
    (ActionKind::Draw, &[]),
    (ActionKind::SelfDraw, &["7d"]),
    (ActionKind::Draw, &[]),
    (ActionKind::CallElection, &["qh", "8h", "4h"]),
    (ActionKind::NoContestElection, &[]),
    // Rejected: a stake is three cards.
    (ActionKind::ContestElection, &["qd", "xd"]),
    (ActionKind::NoContestElection, &[]),
];

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let rules = ParliamentRules::new();
    let mut game = GameState::init(2, 3, Seat(1), parse_card("3h")?)?;
    info!(seats = game.seat_count(), observer = %game.observer(), "game started");

    let started = Instant::now();
    for (step, (kind, symbols)) in SCRIPT.iter().enumerate() {
        let cards = symbols.iter().map(|s| parse_card(s)).collect::<Result<Vec<_>, _>>()?;
        let action = Action::with_cards(*kind, &cards);
        if let Err(error) = rules.apply_action(&mut game, &action) {
            warn!(step, action = ?kind, %error, "scripted action rejected");
        }
        if *kind == ActionKind::NoReimpeach && game.mode().kind() == ModeKind::Normal {
            println!("{game}\n");
        }
    }
    let elapsed = started.elapsed();

    println!("{game}\n");
    println!("Face-down: {}", game.face_down());
    game.audit()?;
    info!(micros = elapsed.as_micros() as u64, actions = game.history().len(), "script finished");
    Ok(())
}

mod config;
mod input;
mod render;

use std::io::{self, BufRead, Write};

use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uno_engine::{
    turn::{DrawResult, PenaltyResult, Phase, TurnAction, TurnActionResult},
    uno::{MatchConfig, Seat, Uno},
};

use crate::config::Settings;

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let settings = Settings::from_env()?;
    info!(?settings, "starting match");

    let seats = (0..settings.players)
        .map(|seat| {
            let id = seat as u64 + 1;
            if settings.human && seat == 0 {
                Seat::human(id, "You")
            } else {
                Seat::cpu(id, format!("CPU {seat}"))
            }
        })
        .collect();
    let config = MatchConfig {
        seed: settings.seed,
        ..MatchConfig::default()
    };
    let mut uno = Uno::new_with_seats(seats, config).wrap_err("could not start the match")?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut last_mover: Option<usize> = None;

    for _ in 0..settings.max_turns {
        if uno.is_game_over() {
            break;
        }

        let current = uno.current_player_index();
        if uno.current_player().is_cpu() {
            play_cpu(&mut uno, current)?;
        } else {
            play_human(&mut uno, current, &mut lines)?;
        }

        // A missed safety call can be punished until the next player has moved.
        if let Some(previous) = last_mover.replace(current) {
            if previous != current && uno.players()[current].is_cpu() && !uno.is_game_over() {
                call_out(&mut uno, current, previous)?;
            }
        }
    }

    match uno.result() {
        Some(result) => {
            let winner = uno.winner().map(|winner| winner.name().to_string());
            println!("{} wins!", winner.unwrap_or_default());
            info!(
                winner_id = result.winner_id,
                participants = ?result.participant_ids,
                "match finished"
            );
        }
        None => {
            warn!(max_turns = settings.max_turns, "match stopped without a winner");
            println!("No winner after {} turns.", settings.max_turns);
        }
    }

    Ok(())
}

fn play_cpu(uno: &mut Uno, current: usize) -> Result<()> {
    let results = uno
        .play_cpu_turn(current)
        .wrap_err("the match had to be aborted")?;

    let name = uno.players()[current].name().to_string();
    for result in &results {
        println!("{}", render::result(&name, result));
    }
    Ok(())
}

/// Prompts until the human's turn has passed on or the match is over.
fn play_human(
    uno: &mut Uno,
    current: usize,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<()> {
    while uno.current_player_index() == current && !uno.is_game_over() {
        println!("{}", render::table(uno));
        let player = &uno.players()[current];
        println!("Your hand:\n{}", render::hand(player));
        if uno.phase() == Phase::AwaitingMove
            && !player.has_any_legal_move(uno.top_card(), uno.current_color())
        {
            println!("Nothing in your hand fits, you will have to draw.");
        }
        print!("{}\n> ", render::prompt(uno.phase()));
        io::stdout().flush()?;

        let line = lines
            .next()
            .ok_or_else(|| eyre!("input closed before the match ended"))??;

        let actions = match input::parse_line(&line) {
            Ok(actions) => actions,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        for action in actions {
            if !apply_human(uno, current, action)? {
                break;
            }
        }
    }

    Ok(())
}

/// Returns false when the action was refused and the rest of the line should be dropped.
fn apply_human(uno: &mut Uno, current: usize, action: TurnAction) -> Result<bool> {
    match uno.play_turn(current, action) {
        Ok(result) => {
            println!("{}", render::result("You", &result));
            if let TurnActionResult::Draw(DrawResult::DrewOne { card, .. }) = result {
                println!("You drew {card}");
            }
            Ok(true)
        }
        Err(err) if err.is_fatal() => Err(err).wrap_err("the match had to be aborted"),
        Err(err) => {
            println!("Not allowed: {err}");
            Ok(false)
        }
    }
}

fn call_out(uno: &mut Uno, caller: usize, target: usize) -> Result<()> {
    let result = uno
        .play_turn(caller, TurnAction::Callout { target })
        .wrap_err("the match had to be aborted")?;

    if result == TurnActionResult::Callout(PenaltyResult::PenaltyApplied) {
        let caller_name = uno.players()[caller].name();
        let target_name = uno.players()[target].name();
        println!("{caller_name} caught {target_name} without an UNO call, two penalty cards");
    }
    Ok(())
}

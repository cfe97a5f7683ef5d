use strum::IntoEnumIterator;
use uno_engine::{
    card::CardColor,
    player::Player,
    turn::{DrawResult, PenaltyResult, Phase, PlayResult, TurnActionResult},
    uno::Uno,
};

pub fn table(uno: &Uno) -> String {
    let snapshot = uno.snapshot();
    let mut out = format!(
        "Top card: {} (color {}), {:?}\n",
        snapshot.top_card, snapshot.current_color, snapshot.direction
    );

    if snapshot.pending_draw_two > 0 {
        out.push_str(&format!("Pending draw two: {}\n", snapshot.pending_draw_two));
    }
    if snapshot.pending_draw_four > 0 {
        out.push_str(&format!("Pending wild draw four: {}\n", snapshot.pending_draw_four));
    }

    for (index, player) in snapshot.players.iter().enumerate() {
        let marker = if index == snapshot.current_player_index { ">" } else { " " };
        let safety = if player.safety_declared { " UNO!" } else { "" };
        out.push_str(&format!(
            "{marker} [{index}] {}: {} cards{safety}\n",
            player.name, player.cards_count
        ));
    }

    out
}

pub fn hand(player: &Player) -> String {
    player
        .hand
        .iter()
        .enumerate()
        .map(|(index, card)| format!("  {index}: {card}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn prompt(phase: Phase) -> String {
    let colors = CardColor::iter()
        .filter(CardColor::is_concrete)
        .map(|color| color.to_string().to_lowercase())
        .collect::<Vec<_>>()
        .join("/");

    match phase {
        Phase::AwaitingColorChoice => format!("Choose a color: color <{colors}>"),
        Phase::AwaitingDrawnCard { hand_index } => {
            format!("You drew a playable card: play {hand_index} or pass")
        }
        Phase::AwaitingDrawTwoResolution | Phase::AwaitingDrawFourResolution => {
            "Stack a matching draw card with play <n>, or draw to take the stack".to_string()
        }
        _ => "play <n> [uno] | draw | uno | callout <seat>".to_string(),
    }
}

pub fn result(name: &str, result: &TurnActionResult) -> String {
    match result {
        TurnActionResult::Play(PlayResult::Played) => format!("{name} played a card"),
        TurnActionResult::Play(PlayResult::RequiresColorChoice) => {
            format!("{name} played a wild card")
        }
        TurnActionResult::Draw(DrawResult::DrewOne { .. }) => format!("{name} drew a card"),
        TurnActionResult::Draw(DrawResult::ForcedDraw(count)) => {
            format!("{name} took the stack of {count} cards")
        }
        TurnActionResult::ColorChosen => format!("{name} chose a color"),
        TurnActionResult::SafetyDeclared => format!("{name} shouts UNO!"),
        TurnActionResult::Passed => format!("{name} kept the drawn card"),
        TurnActionResult::Callout(PenaltyResult::PenaltyApplied) => {
            format!("{name} called someone out, two penalty cards dealt")
        }
        TurnActionResult::Callout(PenaltyResult::NoPenalty) => {
            format!("{name} called out nobody")
        }
    }
}

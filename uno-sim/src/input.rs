use std::str::FromStr;

use strum_macros::EnumString;
use thiserror::Error;
use uno_engine::{card::CardColor, turn::TurnAction};

#[derive(Debug, EnumString)]
#[strum(ascii_case_insensitive)]
enum Verb {
    #[strum(serialize = "play", serialize = "p")]
    Play,
    #[strum(serialize = "draw", serialize = "d")]
    Draw,
    Pass,
    #[strum(serialize = "color", serialize = "c")]
    Color,
    Uno,
    Callout,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("type a command")]
    Empty,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a number")]
    BadNumber(String),
    #[error("`{0}` is not a color")]
    BadColor(String),
}

/// Turns one line of input into the engine actions it stands for.
///
/// `play 3 uno` plays the fourth card and declares safety right after.
pub fn parse_line(line: &str) -> Result<Vec<TurnAction>, InputError> {
    let mut words = line.split_whitespace();
    let first = words.next().ok_or(InputError::Empty)?;
    let verb = Verb::from_str(first).map_err(|_| InputError::UnknownCommand(first.to_string()))?;

    let mut actions = match verb {
        Verb::Play => {
            let hand_index = parse_number(words.next(), "card number")?;
            vec![TurnAction::Play { hand_index }]
        }
        Verb::Draw => vec![TurnAction::Draw],
        Verb::Pass => vec![TurnAction::Pass],
        Verb::Color => {
            let word = words.next().ok_or(InputError::MissingArgument("color"))?;
            let color = CardColor::from_str(word)
                .ok()
                .filter(CardColor::is_concrete)
                .ok_or_else(|| InputError::BadColor(word.to_string()))?;
            vec![TurnAction::ChooseColor(color)]
        }
        Verb::Uno => vec![TurnAction::DeclareSafety],
        Verb::Callout => {
            let target = parse_number(words.next(), "seat number")?;
            vec![TurnAction::Callout { target }]
        }
    };

    if words.next().is_some_and(|word| word.eq_ignore_ascii_case("uno")) {
        actions.push(TurnAction::DeclareSafety);
    }

    Ok(actions)
}

fn parse_number(word: Option<&str>, what: &'static str) -> Result<usize, InputError> {
    let word = word.ok_or(InputError::MissingArgument(what))?;
    word.parse()
        .map_err(|_| InputError::BadNumber(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_play_with_safety_call() {
        assert_eq!(
            parse_line("play 3 uno"),
            Ok(vec![
                TurnAction::Play { hand_index: 3 },
                TurnAction::DeclareSafety
            ])
        );
    }

    #[test]
    fn parses_short_forms() {
        assert_eq!(parse_line("d"), Ok(vec![TurnAction::Draw]));
        assert_eq!(
            parse_line("C green"),
            Ok(vec![TurnAction::ChooseColor(CardColor::Green)])
        );
        assert_eq!(
            parse_line("callout 2"),
            Ok(vec![TurnAction::Callout { target: 2 }])
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_line("   "), Err(InputError::Empty));
        assert_eq!(
            parse_line("dance"),
            Err(InputError::UnknownCommand("dance".to_string()))
        );
        assert_eq!(parse_line("play"), Err(InputError::MissingArgument("card number")));
        assert_eq!(parse_line("play x"), Err(InputError::BadNumber("x".to_string())));
        assert_eq!(parse_line("color wild"), Err(InputError::BadColor("wild".to_string())));
    }
}

use crate::card::{Card, CardColor};

/// One inbound request from a player, mapped onto exactly one engine command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnAction {
    Play { hand_index: usize },
    Draw,
    ChooseColor(CardColor),
    DeclareSafety,
    Pass,
    /// Ask the engine to check `target` for a missed safety call.
    Callout { target: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayResult {
    Played,
    RequiresColorChoice,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawResult {
    /// A normal draw. When `playable` the turn stays with the player.
    DrewOne { card: Card, playable: bool },
    /// A pending stack of `count` cards was taken and the turn forfeited.
    ForcedDraw(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PenaltyResult {
    PenaltyApplied,
    NoPenalty,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnActionResult {
    Play(PlayResult),
    Draw(DrawResult),
    ColorChosen,
    SafetyDeclared,
    Passed,
    Callout(PenaltyResult),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    AwaitingMove,
    /// The player drew a playable card and may play it or pass.
    AwaitingDrawnCard { hand_index: usize },
    AwaitingDrawTwoResolution,
    AwaitingDrawFourResolution,
    AwaitingColorChoice,
    GameOver,
    /// The deck ran dry mid-draw. No further command is accepted.
    Aborted,
}

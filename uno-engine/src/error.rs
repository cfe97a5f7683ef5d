use std::fmt::Debug;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnoError {
    #[error("Not enough players")]
    NotEnoughPlayers,
    #[error("Too many players")]
    TooManyPlayers,
    #[error("Two seats share the same player id")]
    DuplicatePlayerId,
    #[error("Hand size leaves no cards to start the discard pile")]
    InvalidHandSize,
    #[error("It is not this player's turn")]
    NotYourTurn,
    #[error("No card at that position in the hand")]
    InvalidCard,
    #[error("That card cannot be played on the current top card")]
    IllegalPlay,
    #[error("A draw stack is pending, play a matching draw card or draw")]
    MustResolveDrawStack,
    #[error("Wild Draw Four cannot be played while holding a card of the current color")]
    WildDrawFourWhenAlternativeExists,
    #[error("A color must be chosen for the wild card first")]
    ColorChoicePending,
    #[error("No wild card is waiting for a color")]
    NoColorChoicePending,
    #[error("Wild is not a color that can be chosen")]
    InvalidColor,
    #[error("Safety can only be declared while holding exactly one card")]
    InvalidSafetyDeclaration,
    #[error("A card was already drawn this turn, play it or pass")]
    DrawnCardPending,
    #[error("There is nothing to pass on")]
    NothingToPass,
    #[error("The match is over")]
    GameOver,
    #[error("Draw pile and discard pile are exhausted, the match cannot continue")]
    DeckExhausted,
    #[error("Nothing left in the discard pile to reshuffle")]
    ReshuffleImpossible,
    #[error("Player index out of range")]
    IndexError,
    #[error("Wild color and wild kind must go together")]
    InvalidCardComposition,
}

impl UnoError {
    /// Fatal errors end the match, everything else leaves state untouched.
    pub fn is_fatal(&self) -> bool {
        matches!(self, UnoError::DeckExhausted)
    }
}

pub type Result<T, E = UnoError> = std::result::Result<T, E>;

use core::fmt;
use std::fmt::Display;

use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{Result, UnoError};

#[derive(Clone, Copy, Debug, Display, EnumString, EnumIter, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[strum(ascii_case_insensitive)]
pub enum CardColor {
    Red,
    Yellow,
    Green,
    Blue,
    Wild,
}

impl CardColor {
    /// Every color except `Wild`, in tie-break priority order.
    pub const CONCRETE: [CardColor; 4] = [
        CardColor::Red,
        CardColor::Yellow,
        CardColor::Green,
        CardColor::Blue,
    ];

    pub fn is_concrete(&self) -> bool {
        !matches!(self, CardColor::Wild)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardKind {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl CardKind {
    pub fn is_wild(&self) -> bool {
        matches!(self, CardKind::Wild | CardKind::WildDrawFour)
    }
}

/// An immutable card value. Equality is structural, the deck holds duplicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    color: CardColor,
    kind: CardKind,
}

impl Card {
    /// Builds a card, rejecting a wild color on a colored kind and vice versa.
    pub fn new(color: CardColor, kind: CardKind) -> Result<Self> {
        let number_in_range = !matches!(kind, CardKind::Number(n) if n > 9);
        if (color == CardColor::Wild) != kind.is_wild() || !number_in_range {
            return Err(UnoError::InvalidCardComposition);
        }
        Ok(Self { color, kind })
    }

    pub(crate) const fn colored(color: CardColor, kind: CardKind) -> Self {
        Self { color, kind }
    }

    pub fn number(color: CardColor, number: u8) -> Result<Self> {
        Self::new(color, CardKind::Number(number))
    }

    pub fn skip(color: CardColor) -> Result<Self> {
        Self::new(color, CardKind::Skip)
    }

    pub fn reverse(color: CardColor) -> Result<Self> {
        Self::new(color, CardKind::Reverse)
    }

    pub fn draw_two(color: CardColor) -> Result<Self> {
        Self::new(color, CardKind::DrawTwo)
    }

    pub const fn wild() -> Self {
        Self {
            color: CardColor::Wild,
            kind: CardKind::Wild,
        }
    }

    pub const fn wild_draw_four() -> Self {
        Self {
            color: CardColor::Wild,
            kind: CardKind::WildDrawFour,
        }
    }

    pub fn color(&self) -> CardColor {
        self.color
    }

    pub fn kind(&self) -> CardKind {
        self.kind
    }

    pub fn is_wild(&self) -> bool {
        self.kind.is_wild()
    }

    /// Whether this card may be laid on `top` while `active_color` is in force.
    pub fn can_follow(&self, top: &Card, active_color: CardColor) -> bool {
        if self.is_wild() {
            return true;
        }
        if self.color == top.color {
            return true;
        }
        if top.color == CardColor::Wild && self.color == active_color {
            return true;
        }
        // Number cards compare by face value, action cards by kind.
        self.kind == top.kind
    }
}

impl Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardKind::Number(number) => write!(f, "{number}"),
            CardKind::Skip => write!(f, "Skip"),
            CardKind::Reverse => write!(f, "Reverse"),
            CardKind::DrawTwo => write!(f, "Draw Two"),
            CardKind::Wild => write!(f, "Wild"),
            CardKind::WildDrawFour => write!(f, "Wild Draw Four"),
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wild() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} {}", self.color, self.kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use proptest::prelude::*;

    use super::*;

    fn red(kind: CardKind) -> Card {
        Card::new(CardColor::Red, kind).unwrap()
    }

    fn blue(kind: CardKind) -> Card {
        Card::new(CardColor::Blue, kind).unwrap()
    }

    #[test]
    fn return_correct_string_for_colored_cards() {
        assert_eq!(red(CardKind::Number(3)).to_string(), "Red 3");
        assert_eq!(blue(CardKind::Skip).to_string(), "Blue Skip");
        assert_eq!(
            Card::reverse(CardColor::Yellow).unwrap().to_string(),
            "Yellow Reverse"
        );
        assert_eq!(
            Card::draw_two(CardColor::Green).unwrap().to_string(),
            "Green Draw Two"
        );
    }

    #[test]
    fn return_correct_string_for_wild_cards() {
        assert_eq!(Card::wild().to_string(), "Wild");
        assert_eq!(Card::wild_draw_four().to_string(), "Wild Draw Four");
    }

    #[test]
    fn color_parses_case_insensitively() {
        assert_eq!(CardColor::from_str("green").unwrap(), CardColor::Green);
        assert_eq!(CardColor::from_str("BLUE").unwrap(), CardColor::Blue);
        assert!(CardColor::from_str("purple").is_err());
    }

    #[test]
    fn reject_mismatched_wild_color() {
        assert!(matches!(
            Card::new(CardColor::Wild, CardKind::Skip),
            Err(UnoError::InvalidCardComposition)
        ));
        assert!(matches!(
            Card::new(CardColor::Red, CardKind::Wild),
            Err(UnoError::InvalidCardComposition)
        ));
        assert!(matches!(
            Card::number(CardColor::Red, 10),
            Err(UnoError::InvalidCardComposition)
        ));
    }

    #[test]
    fn same_color_follows() {
        assert!(red(CardKind::Number(2)).can_follow(&red(CardKind::Skip), CardColor::Red));
    }

    #[test]
    fn same_number_follows_across_colors() {
        assert!(red(CardKind::Number(5)).can_follow(&blue(CardKind::Number(5)), CardColor::Blue));
        assert!(!red(CardKind::Number(4)).can_follow(&blue(CardKind::Number(5)), CardColor::Blue));
    }

    #[test]
    fn same_action_follows_across_colors() {
        assert!(red(CardKind::Reverse).can_follow(&blue(CardKind::Reverse), CardColor::Blue));
        assert!(!red(CardKind::Reverse).can_follow(&blue(CardKind::Skip), CardColor::Blue));
    }

    #[test]
    fn chosen_color_governs_after_wild() {
        let top = Card::wild();
        assert!(red(CardKind::Number(1)).can_follow(&top, CardColor::Red));
        assert!(!blue(CardKind::Number(1)).can_follow(&top, CardColor::Red));
        assert!(!blue(CardKind::Number(1)).can_follow(&Card::wild_draw_four(), CardColor::Red));
    }

    #[test]
    fn wilds_always_follow() {
        let top = blue(CardKind::Number(7));
        assert!(Card::wild().can_follow(&top, CardColor::Blue));
        assert!(Card::wild_draw_four().can_follow(&top, CardColor::Blue));
    }

    fn any_card() -> impl Strategy<Value = Card> {
        let kind = prop_oneof![
            (0u8..=9).prop_map(CardKind::Number),
            Just(CardKind::Skip),
            Just(CardKind::Reverse),
            Just(CardKind::DrawTwo),
        ];
        let colored = (proptest::sample::select(CardColor::CONCRETE.to_vec()), kind)
            .prop_map(|(color, kind)| Card::colored(color, kind));
        prop_oneof![
            colored,
            Just(Card::wild()),
            Just(Card::wild_draw_four()),
        ]
    }

    proptest! {
        #[test]
        fn card_follows_identical_copy(
            card in any_card(),
            active in proptest::sample::select(CardColor::CONCRETE.to_vec()),
        ) {
            let active = if card.is_wild() { active } else { card.color() };
            prop_assert!(card.can_follow(&card, active));
        }
    }
}

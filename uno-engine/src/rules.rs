use crate::{
    card::{Card, CardColor, CardKind},
    error::{Result, UnoError},
};

/// An unresolved run of draw cards. Only the same kind may extend it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawStack {
    DrawTwo(usize),
    DrawFour(usize),
}

/// Checks whether `hand[index]` may be played right now and returns the card.
///
/// `stack` is the pending draw stack, if any. The Wild Draw Four restriction
/// only applies outside a stack, since no colored card is playable inside one.
pub fn check_play(
    hand: &[Card],
    index: usize,
    top: &Card,
    current_color: CardColor,
    stack: Option<DrawStack>,
) -> Result<Card> {
    let card = *hand.get(index).ok_or(UnoError::InvalidCard)?;

    match stack {
        Some(DrawStack::DrawTwo(_)) => {
            if card.kind() != CardKind::DrawTwo {
                return Err(UnoError::MustResolveDrawStack);
            }
        }
        Some(DrawStack::DrawFour(_)) => {
            if card.kind() != CardKind::WildDrawFour {
                return Err(UnoError::MustResolveDrawStack);
            }
        }
        None => {
            if !card.can_follow(top, current_color) {
                return Err(UnoError::IllegalPlay);
            }
            if card.kind() == CardKind::WildDrawFour
                && hand
                    .iter()
                    .enumerate()
                    .any(|(i, other)| i != index && other.color() == current_color)
            {
                return Err(UnoError::WildDrawFourWhenAlternativeExists);
            }
        }
    }

    Ok(card)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(color: CardColor, kind: CardKind) -> Card {
        Card::new(color, kind).unwrap()
    }

    #[test]
    fn bad_index_is_invalid_card() {
        let top = card(CardColor::Red, CardKind::Number(7));
        assert_eq!(
            check_play(&[], 0, &top, CardColor::Red, None),
            Err(UnoError::InvalidCard)
        );
    }

    #[test]
    fn wild_draw_four_allowed_without_current_color() {
        let top = card(CardColor::Red, CardKind::Number(7));
        let hand = [Card::wild_draw_four(), card(CardColor::Blue, CardKind::Number(3))];

        assert_eq!(
            check_play(&hand, 0, &top, CardColor::Red, None),
            Ok(Card::wild_draw_four())
        );
    }

    #[test]
    fn wild_draw_four_rejected_with_current_color_in_hand() {
        let top = card(CardColor::Red, CardKind::Number(7));
        let hand = [
            Card::wild_draw_four(),
            card(CardColor::Blue, CardKind::Number(3)),
            card(CardColor::Red, CardKind::Number(2)),
        ];

        assert_eq!(
            check_play(&hand, 0, &top, CardColor::Red, None),
            Err(UnoError::WildDrawFourWhenAlternativeExists)
        );
    }

    #[test]
    fn second_wild_draw_four_is_not_an_alternative() {
        let top = card(CardColor::Red, CardKind::Number(7));
        let hand = [Card::wild_draw_four(), Card::wild_draw_four()];

        assert!(check_play(&hand, 1, &top, CardColor::Red, None).is_ok());
    }

    #[test]
    fn draw_two_stack_only_accepts_draw_two() {
        let top = card(CardColor::Red, CardKind::DrawTwo);
        let hand = [
            card(CardColor::Red, CardKind::Number(5)),
            card(CardColor::Blue, CardKind::DrawTwo),
            Card::wild_draw_four(),
        ];
        let stack = Some(DrawStack::DrawTwo(2));

        assert_eq!(
            check_play(&hand, 0, &top, CardColor::Red, stack),
            Err(UnoError::MustResolveDrawStack)
        );
        assert_eq!(
            check_play(&hand, 2, &top, CardColor::Red, stack),
            Err(UnoError::MustResolveDrawStack)
        );
        assert!(check_play(&hand, 1, &top, CardColor::Red, stack).is_ok());
    }

    #[test]
    fn draw_four_stack_ignores_current_color_cards() {
        let top = Card::wild_draw_four();
        let hand = [card(CardColor::Green, CardKind::Number(5)), Card::wild_draw_four()];
        let stack = Some(DrawStack::DrawFour(4));

        assert_eq!(
            check_play(&hand, 0, &top, CardColor::Green, stack),
            Err(UnoError::MustResolveDrawStack)
        );
        assert!(check_play(&hand, 1, &top, CardColor::Green, stack).is_ok());
    }

    #[test]
    fn unmatched_card_is_illegal() {
        let top = card(CardColor::Red, CardKind::Number(7));
        let hand = [card(CardColor::Blue, CardKind::Skip)];

        assert_eq!(
            check_play(&hand, 0, &top, CardColor::Red, None),
            Err(UnoError::IllegalPlay)
        );
    }
}

use std::ops::Deref;

use crate::{
    card::{Card, CardColor},
    error::{Result, UnoError},
};

/// The cards one player holds, in the order they were received.
///
/// The safety flag can only be raised while exactly one card is held, and any
/// card received lowers it again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
    safety_declared: bool,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards,
            safety_declared: false,
        }
    }

    pub fn add_card(&mut self, card: Card) {
        self.safety_declared = false;
        self.cards.push(card);
    }

    pub fn remove_card_at(&mut self, index: usize) -> Result<Card> {
        if index >= self.cards.len() {
            return Err(UnoError::IndexError);
        }
        let card = self.cards.remove(index);
        if self.cards.len() != 1 {
            self.safety_declared = false;
        }
        Ok(card)
    }

    /// Swaps the card at `index` for another one, returning the old card.
    pub fn replace_card_at(&mut self, index: usize, card: Card) -> Result<Card> {
        let slot = self.cards.get_mut(index).ok_or(UnoError::IndexError)?;
        Ok(std::mem::replace(slot, card))
    }

    pub fn truncate(&mut self, len: usize) {
        self.cards.truncate(len);
        if self.cards.len() != 1 {
            self.safety_declared = false;
        }
    }

    pub fn has_any_legal_move(&self, top: &Card, active_color: CardColor) -> bool {
        self.cards.iter().any(|card| card.can_follow(top, active_color))
    }

    pub fn declare_safety(&mut self) -> Result<()> {
        if self.cards.len() != 1 {
            return Err(UnoError::InvalidSafetyDeclaration);
        }
        self.safety_declared = true;
        Ok(())
    }

    pub fn safety_declared(&self) -> bool {
        self.safety_declared
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Deref for Hand {
    type Target = [Card];

    fn deref(&self) -> &Self::Target {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardKind;

    fn red(number: u8) -> Card {
        Card::number(CardColor::Red, number).unwrap()
    }

    #[test]
    fn declare_safety_only_with_one_card() {
        let mut hand = Hand::new(vec![red(1), red(2)]);
        assert_eq!(hand.declare_safety(), Err(UnoError::InvalidSafetyDeclaration));
        assert!(!hand.safety_declared());

        hand.remove_card_at(0).unwrap();
        hand.declare_safety().unwrap();
        assert!(hand.safety_declared());
    }

    #[test]
    fn declare_safety_rejected_with_empty_hand() {
        let mut hand = Hand::default();
        assert_eq!(hand.declare_safety(), Err(UnoError::InvalidSafetyDeclaration));
    }

    #[test]
    fn adding_a_card_clears_safety() {
        let mut hand = Hand::new(vec![red(1)]);
        hand.declare_safety().unwrap();

        hand.add_card(red(2));

        assert!(!hand.safety_declared());
        assert_eq!(hand.len(), 2);
    }

    #[test]
    fn remove_out_of_range_fails() {
        let mut hand = Hand::new(vec![red(1)]);
        assert_eq!(hand.remove_card_at(1), Err(UnoError::IndexError));
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn remove_keeps_insertion_order() {
        let mut hand = Hand::new(vec![red(1), red(2), red(3)]);
        assert_eq!(hand.remove_card_at(1), Ok(red(2)));
        assert_eq!(hand.cards(), &[red(1), red(3)]);
    }

    #[test]
    fn replace_swaps_in_place() {
        let mut hand = Hand::new(vec![red(1), red(2)]);

        assert_eq!(hand.replace_card_at(1, Card::wild()), Ok(red(2)));
        assert_eq!(hand.cards(), &[red(1), Card::wild()]);
        assert_eq!(hand.replace_card_at(2, red(3)), Err(UnoError::IndexError));
    }

    #[test]
    fn legal_move_detection() {
        let hand = Hand::new(vec![red(1), Card::skip(CardColor::Green).unwrap()]);
        let blue_skip = Card::new(CardColor::Blue, CardKind::Skip).unwrap();
        let blue_4 = Card::number(CardColor::Blue, 4).unwrap();

        assert!(hand.has_any_legal_move(&blue_skip, CardColor::Blue));
        assert!(!hand.has_any_legal_move(&blue_4, CardColor::Blue));
    }
}

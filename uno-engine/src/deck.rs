use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{
    card::{Card, CardColor, CardKind},
    constants::*,
    error::{Result, UnoError},
};

/// The draw pile. The last card of the vector is the top of the pile.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha8Rng,
}

impl Deck {
    /// A freshly shuffled 108 card deck. A seed makes every shuffle reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let mut deck = Self::from_cards(Self::standard_cards(), seed);
        deck.shuffle();
        deck
    }

    /// A deck in exactly the given order, nothing is shuffled until a reshuffle.
    pub fn from_cards(cards: Vec<Card>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { cards, rng }
    }

    pub fn standard_cards() -> Vec<Card> {
        let mut cards = Vec::with_capacity(TOTAL_CARDS_IN_DECK.into());

        for color in CardColor::CONCRETE {
            for _ in 0..SKIP_CARDS_PER_COLOR {
                cards.push(Card::colored(color, CardKind::Skip));
            }

            for _ in 0..REVERSE_CARDS_PER_COLOR {
                cards.push(Card::colored(color, CardKind::Reverse));
            }

            for _ in 0..DRAW_TWO_CARDS_PER_COLOR {
                cards.push(Card::colored(color, CardKind::DrawTwo));
            }

            for number in NUMBER_CARDS_PER_COLOR {
                cards.push(Card::colored(color, CardKind::Number(*number)));
            }
        }

        for _ in 0..WILD_CARDS_IN_DECK {
            cards.push(Card::wild());
        }

        for _ in 0..WILD_DRAW_FOUR_CARDS_IN_DECK {
            cards.push(Card::wild_draw_four());
        }

        cards
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Takes the top card, `None` once the pile is empty.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Takes up to `count` cards from the top.
    pub(crate) fn draw_cards(&mut self, count: usize) -> Vec<Card> {
        let start = self.cards.len().saturating_sub(count);
        let mut drawn = self.cards.split_off(start);
        drawn.reverse();
        drawn
    }

    /// Takes the colored card nearest the top, skipping over wilds.
    pub(crate) fn draw_colored_card(&mut self) -> Option<Card> {
        self.cards
            .iter()
            .rposition(|card| !card.is_wild())
            .map(|pos| self.cards.remove(pos))
    }

    /// Absorbs the reclaimed discard cards and shuffles them into the pile.
    pub fn reshuffle(&mut self, reclaimed: Vec<Card>) -> Result<()> {
        if reclaimed.is_empty() {
            return Err(UnoError::ReshuffleImpossible);
        }
        debug!(reclaimed = reclaimed.len(), remaining = self.cards.len(), "reshuffling");
        self.cards.extend(reclaimed);
        self.shuffle();
        Ok(())
    }

    pub fn cards_count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn correct_card_count_new_deck() {
        assert_eq!(Deck::new(None).cards_count(), TOTAL_CARDS_IN_DECK as usize);
    }

    #[test]
    fn standard_composition() {
        let mut counts: HashMap<Card, usize> = HashMap::new();
        for card in Deck::standard_cards() {
            *counts.entry(card).or_default() += 1;
        }

        for color in CardColor::CONCRETE {
            assert_eq!(counts[&Card::colored(color, CardKind::Number(0))], 1);
            for number in 1..=9 {
                assert_eq!(counts[&Card::colored(color, CardKind::Number(number))], 2);
            }
            assert_eq!(counts[&Card::colored(color, CardKind::Skip)], 2);
            assert_eq!(counts[&Card::colored(color, CardKind::Reverse)], 2);
            assert_eq!(counts[&Card::colored(color, CardKind::DrawTwo)], 2);
        }
        assert_eq!(counts[&Card::wild()], 4);
        assert_eq!(counts[&Card::wild_draw_four()], 4);
    }

    #[test]
    fn same_seed_same_order() {
        assert_eq!(Deck::new(Some(7)).cards(), Deck::new(Some(7)).cards());
        assert_ne!(Deck::new(Some(7)).cards(), Deck::new(Some(8)).cards());
    }

    #[test]
    fn draw_takes_from_the_top_until_empty() {
        let red_1 = Card::colored(CardColor::Red, CardKind::Number(1));
        let blue_2 = Card::colored(CardColor::Blue, CardKind::Number(2));
        let mut deck = Deck::from_cards(vec![red_1, blue_2], Some(1));

        assert_eq!(deck.draw(), Some(blue_2));
        assert_eq!(deck.draw(), Some(red_1));
        assert_eq!(deck.draw(), None);
    }

    #[test]
    fn draw_cards_stops_at_empty() {
        let mut deck = Deck::new(Some(3));
        let top = *deck.cards().last().unwrap();

        let drawn = deck.draw_cards(100);
        assert_eq!(drawn.len(), 100);
        assert_eq!(drawn[0], top);
        assert_eq!(deck.draw_cards(20).len(), 8);
        assert!(deck.is_empty());
    }

    #[test]
    fn colored_card_skips_wilds_on_top() {
        let green_skip = Card::colored(CardColor::Green, CardKind::Skip);
        let mut deck = Deck::from_cards(
            vec![green_skip, Card::wild(), Card::wild_draw_four()],
            Some(1),
        );

        assert_eq!(deck.draw_colored_card(), Some(green_skip));
        assert_eq!(deck.cards(), &[Card::wild(), Card::wild_draw_four()]);
    }

    #[test]
    fn reshuffle_refills_an_empty_pile() {
        let mut deck = Deck::from_cards(vec![], Some(5));
        let reclaimed = Deck::standard_cards().into_iter().take(4).collect::<Vec<_>>();

        deck.reshuffle(reclaimed).unwrap();

        assert_eq!(deck.cards_count(), 4);
    }

    #[test]
    fn reshuffle_with_nothing_fails() {
        let mut deck = Deck::from_cards(vec![], Some(5));
        assert_eq!(deck.reshuffle(vec![]), Err(UnoError::ReshuffleImpossible));
    }
}

use crate::{
    card::{Card, CardColor},
    error::Result,
    hand::Hand,
};

#[derive(Debug, Clone)]
pub struct Player {
    pub id: u64,
    name: String,
    pub hand: Hand,
    is_cpu: bool,
}

impl Player {
    pub fn new(id: u64, name: String, cards: Vec<Card>, is_cpu: bool) -> Self {
        Self {
            id,
            name,
            hand: Hand::new(cards),
            is_cpu,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_cpu(&self) -> bool {
        self.is_cpu
    }

    pub fn cards_count(&self) -> usize {
        self.hand.len()
    }

    pub fn add_card(&mut self, card: Card) {
        self.hand.add_card(card);
    }

    pub fn remove_card_at(&mut self, index: usize) -> Result<Card> {
        self.hand.remove_card_at(index)
    }

    pub fn has_any_legal_move(&self, top: &Card, active_color: CardColor) -> bool {
        self.hand.has_any_legal_move(top, active_color)
    }

    pub fn declare_safety(&mut self) -> Result<()> {
        self.hand.declare_safety()
    }

    pub fn safety_declared(&self) -> bool {
        self.hand.safety_declared()
    }
}

pub mod card;
pub mod constants;
pub mod cpu;
pub mod deck;
pub mod error;
pub mod hand;
pub mod player;
pub mod rules;
pub mod turn;
pub mod uno;

//! Move selection for computer controlled seats.
//!
//! Selection is deterministic: the first legal card in hand order wins, and
//! wild colors go to the color held most, ties broken Red, Yellow, Green, Blue.

use crate::{
    card::{Card, CardColor},
    rules::{check_play, DrawStack},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuDecision {
    /// Play the card at `hand_index`. `color` is set when the card is wild.
    Play {
        hand_index: usize,
        color: Option<CardColor>,
    },
    Draw,
}

pub fn choose_move(
    hand: &[Card],
    top: &Card,
    current_color: CardColor,
    stack: Option<DrawStack>,
) -> CpuDecision {
    let Some(hand_index) =
        (0..hand.len()).find(|&index| check_play(hand, index, top, current_color, stack).is_ok())
    else {
        return CpuDecision::Draw;
    };

    let color = hand[hand_index].is_wild().then(|| {
        let remaining = hand
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != hand_index)
            .map(|(_, card)| *card)
            .collect::<Vec<_>>();
        choose_color(&remaining)
    });

    CpuDecision::Play { hand_index, color }
}

/// The concrete color most represented in `hand`.
pub fn choose_color(hand: &[Card]) -> CardColor {
    let mut best = CardColor::CONCRETE[0];
    let mut best_count = 0;

    for color in CardColor::CONCRETE {
        let count = hand.iter().filter(|card| card.color() == color).count();
        // Strictly greater keeps the earlier color on ties.
        if count > best_count {
            best = color;
            best_count = count;
        }
    }

    best
}

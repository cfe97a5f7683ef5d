use std::collections::HashSet;

use rand::{thread_rng, Rng};
use tracing::{debug, info, warn};

use crate::card::{Card, CardColor, CardKind};
use crate::constants::*;
use crate::cpu::{self, CpuDecision};
use crate::deck::Deck;
use crate::error::{Result, UnoError};
use crate::player::Player;
use crate::rules::{check_play, DrawStack};
use crate::turn::{
    Direction, DrawResult, PenaltyResult, Phase, PlayResult, TurnAction, TurnActionResult,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    /// Seeds every shuffle of the match. `None` draws from entropy.
    pub seed: Option<u64>,
    pub hand_size: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: None,
            hand_size: STARTING_HAND_SIZE,
        }
    }
}

/// A participant as supplied by the caller, in turn order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seat {
    pub id: u64,
    pub name: String,
    pub is_cpu: bool,
}

impl Seat {
    pub fn human(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_cpu: false,
        }
    }

    pub fn cpu(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_cpu: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub id: u64,
    pub name: String,
    pub is_cpu: bool,
    pub cards_count: usize,
    pub safety_declared: bool,
}

/// Everything a presentation layer needs to redraw after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchSnapshot {
    pub players: Vec<PlayerSnapshot>,
    pub current_player_index: usize,
    pub direction: Direction,
    pub top_card: Card,
    pub current_color: CardColor,
    pub pending_draw_two: usize,
    pub pending_draw_four: usize,
    pub phase: Phase,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub winner_index: Option<usize>,
}

/// The terminal outcome handed to whoever records results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult {
    pub winner_id: u64,
    pub participant_ids: Vec<u64>,
}

#[derive(Debug, Clone)]
pub struct Uno {
    deck: Deck,
    discard: Vec<Card>,
    players: Vec<Player>,
    current_turn_player_index: usize,
    direction: Direction,
    current_color: CardColor,
    pending_draw_two: usize,
    pending_draw_four: usize,
    phase: Phase,
    winner_index: Option<usize>,
}

impl Uno {
    /// Starts a match between human players with generated ids.
    pub fn new(player_names: Vec<String>) -> Result<Self> {
        let mut rng = thread_rng();
        let mut ids = HashSet::new();
        let mut seats = Vec::with_capacity(player_names.len());

        for player_name in player_names {
            loop {
                let id = rng.gen();
                if ids.insert(id) {
                    seats.push(Seat::human(id, player_name));
                    break;
                }
            }
        }

        Self::new_with_seats(seats, MatchConfig::default())
    }

    pub fn new_with_seats(seats: Vec<Seat>, config: MatchConfig) -> Result<Self> {
        if seats.len() < MIN_PLAYERS {
            return Err(UnoError::NotEnoughPlayers);
        }
        if seats.len() > MAX_PLAYERS {
            return Err(UnoError::TooManyPlayers);
        }
        let wilds = (WILD_CARDS_IN_DECK + WILD_DRAW_FOUR_CARDS_IN_DECK) as usize;
        if config.hand_size == 0
            || seats.len() * config.hand_size + wilds >= TOTAL_CARDS_IN_DECK as usize
        {
            return Err(UnoError::InvalidHandSize);
        }
        let mut ids = HashSet::new();
        if !seats.iter().all(|seat| ids.insert(seat.id)) {
            return Err(UnoError::DuplicatePlayerId);
        }

        let mut deck = Deck::new(config.seed);
        let mut players = Vec::with_capacity(seats.len());

        for seat in seats {
            let cards = deck.draw_cards(config.hand_size);
            players.push(Player::new(seat.id, seat.name, cards, seat.is_cpu));
        }

        // Enough cards are left over that a colored one always remains.
        let starting_card = deck
            .draw_colored_card()
            .ok_or(UnoError::InvalidHandSize)?;

        info!(
            players = players.len(),
            starting_card = %starting_card,
            "match started"
        );

        Ok(Uno {
            deck,
            discard: vec![starting_card],
            players,
            current_turn_player_index: 0,
            direction: Direction::Clockwise,
            current_color: starting_card.color(),
            pending_draw_two: 0,
            pending_draw_four: 0,
            phase: Phase::AwaitingMove,
            winner_index: None,
        })
    }

    /// Plays the card at `hand_index` from the hand of `player_index`.
    ///
    /// Validation happens before anything moves, so an error leaves the match
    /// untouched. Emptying the hand wins the match before the card's effect
    /// would apply.
    pub fn play_card(&mut self, player_index: usize, hand_index: usize) -> Result<PlayResult> {
        self.ensure_accepting_moves(player_index)?;

        if let Phase::AwaitingDrawnCard {
            hand_index: drawn_index,
        } = self.phase
        {
            if hand_index != drawn_index {
                return Err(UnoError::IllegalPlay);
            }
        }

        let card = check_play(
            self.players[player_index].hand.cards(),
            hand_index,
            self.top_card(),
            self.current_color,
            self.draw_stack(),
        )?;

        let player = &mut self.players[player_index];
        player.remove_card_at(hand_index)?;
        self.discard.push(card);
        if !card.is_wild() {
            self.current_color = card.color();
        }

        debug!(player_index, card = %card, "card played");

        if self.players[player_index].cards_count() == 0 {
            self.finish(player_index);
            return Ok(PlayResult::Played);
        }

        Ok(self.resolve_effect(card))
    }

    /// Sets the color for the wild card just played and passes the turn.
    pub fn choose_color(&mut self, player_index: usize, color: CardColor) -> Result<()> {
        self.ensure_active()?;
        if self.phase != Phase::AwaitingColorChoice {
            return Err(UnoError::NoColorChoicePending);
        }
        if player_index != self.current_turn_player_index {
            return Err(UnoError::NotYourTurn);
        }
        if !color.is_concrete() {
            return Err(UnoError::InvalidColor);
        }

        self.current_color = color;
        self.move_turn_n_players_ahead(1);
        self.phase = if self.pending_draw_four > 0 {
            Phase::AwaitingDrawFourResolution
        } else {
            Phase::AwaitingMove
        };

        debug!(player_index, %color, "color chosen");
        Ok(())
    }

    /// Draws a single card, or takes the whole pending stack if there is one.
    pub fn draw_or_resolve_stack(&mut self, player_index: usize) -> Result<DrawResult> {
        self.ensure_accepting_moves(player_index)?;

        match self.phase {
            Phase::AwaitingDrawnCard { .. } => Err(UnoError::DrawnCardPending),
            Phase::AwaitingDrawTwoResolution => {
                let count = self.pending_draw_two;
                self.draw_cards_to_player(player_index, count)?;
                self.pending_draw_two = 0;
                self.end_turn();
                debug!(player_index, count, "draw two stack taken");
                Ok(DrawResult::ForcedDraw(count))
            }
            Phase::AwaitingDrawFourResolution => {
                let count = self.pending_draw_four;
                self.draw_cards_to_player(player_index, count)?;
                self.pending_draw_four = 0;
                self.end_turn();
                debug!(player_index, count, "wild draw four stack taken");
                Ok(DrawResult::ForcedDraw(count))
            }
            _ => {
                let card = self.draw_cards_to_player(player_index, 1)?[0];
                let hand_index = self.players[player_index].cards_count() - 1;
                let playable = check_play(
                    self.players[player_index].hand.cards(),
                    hand_index,
                    self.top_card(),
                    self.current_color,
                    None,
                )
                .is_ok();

                if playable {
                    self.phase = Phase::AwaitingDrawnCard { hand_index };
                } else {
                    self.end_turn();
                }

                debug!(player_index, card = %card, playable, "card drawn");
                Ok(DrawResult::DrewOne { card, playable })
            }
        }
    }

    /// Keeps a playable card that was just drawn and passes the turn.
    pub fn pass(&mut self, player_index: usize) -> Result<()> {
        self.ensure_accepting_moves(player_index)?;
        if !matches!(self.phase, Phase::AwaitingDrawnCard { .. }) {
            return Err(UnoError::NothingToPass);
        }

        self.end_turn();
        debug!(player_index, "passed");
        Ok(())
    }

    pub fn declare_safety(&mut self, player_index: usize) -> Result<()> {
        self.ensure_active()?;
        self.get_player_mut(player_index)
            .ok_or(UnoError::IndexError)?
            .declare_safety()?;

        debug!(player_index, "safety declared");
        Ok(())
    }

    /// Draws two penalty cards for a player holding one card without having
    /// declared safety. When to call this is up to the caller.
    pub fn check_missed_safety_penalty(&mut self, player_index: usize) -> Result<PenaltyResult> {
        self.ensure_active()?;
        let player = self.get_player(player_index).ok_or(UnoError::IndexError)?;

        if player.cards_count() != 1 || player.safety_declared() {
            return Ok(PenaltyResult::NoPenalty);
        }

        self.draw_cards_to_player(player_index, MISSED_SAFETY_PENALTY)?;
        debug!(player_index, "missed safety penalty applied");
        Ok(PenaltyResult::PenaltyApplied)
    }

    /// Applies one transport level action on behalf of `player_index`.
    pub fn play_turn(
        &mut self,
        player_index: usize,
        turn_action: TurnAction,
    ) -> Result<TurnActionResult> {
        let result = match turn_action {
            TurnAction::Play { hand_index } => {
                TurnActionResult::Play(self.play_card(player_index, hand_index)?)
            }
            TurnAction::Draw => TurnActionResult::Draw(self.draw_or_resolve_stack(player_index)?),
            TurnAction::ChooseColor(color) => {
                self.choose_color(player_index, color)?;
                TurnActionResult::ColorChosen
            }
            TurnAction::DeclareSafety => {
                self.declare_safety(player_index)?;
                TurnActionResult::SafetyDeclared
            }
            TurnAction::Pass => {
                self.pass(player_index)?;
                TurnActionResult::Passed
            }
            TurnAction::Callout { target } => {
                if player_index >= self.players.len() {
                    return Err(UnoError::IndexError);
                }
                TurnActionResult::Callout(self.check_missed_safety_penalty(target)?)
            }
        };

        Ok(result)
    }

    /// Lets the computer strategy finish the current turn of `player_index`.
    ///
    /// Plays the first legal card, otherwise draws and plays the drawn card if
    /// it fits. Wild colors and the safety call are handled along the way.
    pub fn play_cpu_turn(&mut self, player_index: usize) -> Result<Vec<TurnActionResult>> {
        self.ensure_active()?;
        if player_index != self.current_turn_player_index {
            return Err(UnoError::NotYourTurn);
        }
        let mut results = Vec::new();

        match self.phase {
            Phase::AwaitingColorChoice => {
                let color = cpu::choose_color(self.players[player_index].hand.cards());
                self.choose_color(player_index, color)?;
                results.push(TurnActionResult::ColorChosen);
            }
            Phase::AwaitingDrawnCard { hand_index } => {
                self.cpu_play(player_index, hand_index, None, &mut results)?;
            }
            _ => {
                let decision = cpu::choose_move(
                    self.players[player_index].hand.cards(),
                    self.top_card(),
                    self.current_color,
                    self.draw_stack(),
                );

                match decision {
                    CpuDecision::Play { hand_index, color } => {
                        self.cpu_play(player_index, hand_index, color, &mut results)?;
                    }
                    CpuDecision::Draw => {
                        let drawn = self.draw_or_resolve_stack(player_index)?;
                        results.push(TurnActionResult::Draw(drawn));

                        // Only a playable draw keeps the turn here.
                        if let Phase::AwaitingDrawnCard { hand_index } = self.phase {
                            self.cpu_play(player_index, hand_index, None, &mut results)?;
                        }
                    }
                }
            }
        }

        let player = &self.players[player_index];
        if !self.is_game_over() && player.cards_count() == 1 && !player.safety_declared() {
            self.declare_safety(player_index)?;
            results.push(TurnActionResult::SafetyDeclared);
        }

        Ok(results)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get_player(&self, player_index: usize) -> Option<&Player> {
        self.players.get(player_index)
    }

    pub fn get_player_mut(&mut self, player_index: usize) -> Option<&mut Player> {
        self.players.get_mut(player_index)
    }

    pub fn player_index_by_id(&self, player_id: u64) -> Option<usize> {
        self.players.iter().position(|player| player.id == player_id)
    }

    pub fn current_player_index(&self) -> usize {
        self.current_turn_player_index
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_turn_player_index]
    }

    pub fn next_player_index(&self) -> usize {
        self.nth_turn_player_index(1)
    }

    pub fn top_card(&self) -> &Card {
        self.discard
            .last()
            .expect("The discard pile holds the starting card from the first turn on.")
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    pub fn draw_pile_count(&self) -> usize {
        self.deck.cards_count()
    }

    pub fn current_color(&self) -> CardColor {
        self.current_color
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_draw_two(&self) -> usize {
        self.pending_draw_two
    }

    pub fn pending_draw_four(&self) -> usize {
        self.pending_draw_four
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn winner_index(&self) -> Option<usize> {
        self.winner_index
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner_index.and_then(|index| self.players.get(index))
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.winner().map(|winner| MatchResult {
            winner_id: winner.id,
            participant_ids: self.players.iter().map(|player| player.id).collect(),
        })
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            players: self
                .players
                .iter()
                .map(|player| PlayerSnapshot {
                    id: player.id,
                    name: player.name().to_string(),
                    is_cpu: player.is_cpu(),
                    cards_count: player.cards_count(),
                    safety_declared: player.safety_declared(),
                })
                .collect(),
            current_player_index: self.current_turn_player_index,
            direction: self.direction,
            top_card: *self.top_card(),
            current_color: self.current_color,
            pending_draw_two: self.pending_draw_two,
            pending_draw_four: self.pending_draw_four,
            phase: self.phase,
            draw_pile_count: self.deck.cards_count(),
            discard_pile_count: self.discard.len(),
            winner_index: self.winner_index,
        }
    }

    fn ensure_active(&self) -> Result<()> {
        match self.phase {
            Phase::GameOver => Err(UnoError::GameOver),
            Phase::Aborted => Err(UnoError::DeckExhausted),
            _ => Ok(()),
        }
    }

    /// Common gate for play, draw and pass.
    fn ensure_accepting_moves(&self, player_index: usize) -> Result<()> {
        self.ensure_active()?;
        if self.phase == Phase::AwaitingColorChoice {
            return Err(UnoError::ColorChoicePending);
        }
        if player_index != self.current_turn_player_index {
            return Err(UnoError::NotYourTurn);
        }
        Ok(())
    }

    fn draw_stack(&self) -> Option<DrawStack> {
        match self.phase {
            Phase::AwaitingDrawTwoResolution => Some(DrawStack::DrawTwo(self.pending_draw_two)),
            Phase::AwaitingDrawFourResolution => Some(DrawStack::DrawFour(self.pending_draw_four)),
            _ => None,
        }
    }

    fn resolve_effect(&mut self, card: Card) -> PlayResult {
        match card.kind() {
            CardKind::Number(_) => {
                self.end_turn();
                PlayResult::Played
            }
            CardKind::Skip => {
                self.move_turn_n_players_ahead(2);
                self.phase = Phase::AwaitingMove;
                PlayResult::Played
            }
            CardKind::Reverse => {
                self.direction = self.direction.reversed();
                // With two players a reverse hands the turn straight back.
                let steps = if self.players.len() == 2 { 2 } else { 1 };
                self.move_turn_n_players_ahead(steps);
                self.phase = Phase::AwaitingMove;
                PlayResult::Played
            }
            CardKind::DrawTwo => {
                self.pending_draw_two += DRAW_TWO_PENALTY;
                self.move_turn_n_players_ahead(1);
                self.phase = Phase::AwaitingDrawTwoResolution;
                PlayResult::Played
            }
            CardKind::Wild => {
                self.phase = Phase::AwaitingColorChoice;
                PlayResult::RequiresColorChoice
            }
            CardKind::WildDrawFour => {
                self.pending_draw_four += WILD_DRAW_FOUR_PENALTY;
                self.phase = Phase::AwaitingColorChoice;
                PlayResult::RequiresColorChoice
            }
        }
    }

    fn cpu_play(
        &mut self,
        player_index: usize,
        hand_index: usize,
        color: Option<CardColor>,
        results: &mut Vec<TurnActionResult>,
    ) -> Result<()> {
        let played = self.play_card(player_index, hand_index)?;
        results.push(TurnActionResult::Play(played));

        if played == PlayResult::RequiresColorChoice {
            let color = color
                .unwrap_or_else(|| cpu::choose_color(self.players[player_index].hand.cards()));
            self.choose_color(player_index, color)?;
            results.push(TurnActionResult::ColorChosen);
        }

        Ok(())
    }

    fn finish(&mut self, winner_index: usize) {
        self.phase = Phase::GameOver;
        self.winner_index = Some(winner_index);
        info!(
            winner_index,
            winner = self.players[winner_index].name(),
            "match won"
        );
    }

    fn end_turn(&mut self) {
        self.move_turn_n_players_ahead(1);
        self.phase = Phase::AwaitingMove;
    }

    /// Moves `count` cards to a player, reshuffling the discard pile when the
    /// draw pile runs out. Fails without moving anything if even a reshuffle
    /// could not cover the count, and the match is aborted.
    fn draw_cards_to_player(&mut self, player_index: usize, count: usize) -> Result<Vec<Card>> {
        let reclaimable = self.discard.len().saturating_sub(1);
        if self.deck.cards_count() + reclaimable < count {
            warn!(
                count,
                draw_pile = self.deck.cards_count(),
                reclaimable,
                "deck exhausted, aborting match"
            );
            self.phase = Phase::Aborted;
            return Err(UnoError::DeckExhausted);
        }

        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            let card = match self.deck.draw() {
                Some(card) => card,
                None => {
                    self.reshuffle_discard()?;
                    self.deck.draw().ok_or(UnoError::DeckExhausted)?
                }
            };
            drawn.push(card);
        }

        let player = &mut self.players[player_index];
        for card in &drawn {
            player.add_card(*card);
        }

        Ok(drawn)
    }

    fn reshuffle_discard(&mut self) -> Result<()> {
        let top = self.discard.pop().ok_or(UnoError::DeckExhausted)?;
        let reclaimed = std::mem::replace(&mut self.discard, vec![top]);
        let reclaimed_count = reclaimed.len();

        if let Err(err) = self.deck.reshuffle(reclaimed) {
            warn!(%err, "reshuffle impossible, aborting match");
            self.phase = Phase::Aborted;
            return Err(UnoError::DeckExhausted);
        }

        info!(reclaimed_count, "discard pile reshuffled into the draw pile");
        Ok(())
    }

    fn nth_turn_player_index(&self, n: usize) -> usize {
        let len = self.players.len();
        let n = n % len;
        match self.direction {
            Direction::Clockwise => (self.current_turn_player_index + n) % len,
            Direction::CounterClockwise => (self.current_turn_player_index + len - n) % len,
        }
    }

    fn move_turn_n_players_ahead(&mut self, n: usize) {
        self.current_turn_player_index = self.nth_turn_player_index(n);
    }
}

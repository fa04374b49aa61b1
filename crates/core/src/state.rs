use crate::{Card, CardKind, Deck, PairEffect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type PlayerId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    Draw,
    ChoosingCard,
    Pair,
    Declare,
    DeclareShowing,
    RoundEnd,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeclareKind {
    Stop,
    LastChance,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiscardSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DrawSource {
    Deck,
    DiscardLeft,
    DiscardRight,
}

/// Effect from a played pair awaiting the acting agent's choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingEffect {
    pub effect: PairEffect,
    pub player_id: PlayerId,
    pub kinds: [CardKind; 2],
}

/// Two freshly drawn cards awaiting the keep/discard decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingCardChoice {
    pub player_id: PlayerId,
    pub cards: [Card; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayedPair {
    pub cards: [Card; 2],
    /// Turn counter value when the pair hit the table.
    pub turn: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerState {
    pub hand: Vec<Card>,
    pub played_pairs: Vec<PlayedPair>,
}

impl PlayerState {
    /// Hand plus every card locked into played pairs.
    pub fn all_cards(&self) -> Vec<Card> {
        let mut cards = self.hand.clone();
        for pair in &self.played_pairs {
            cards.extend_from_slice(&pair.cards);
        }
        cards
    }

    pub fn card_count(&self) -> usize {
        self.hand.len() + self.played_pairs.len() * 2
    }
}

/// Token capturing who may act and in which phase. Decisions computed
/// against a stale snapshot fail the token match and are dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnToken {
    pub player_id: PlayerId,
    pub round: u32,
    pub turn_count: u32,
    pub phase: TurnPhase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub deck: Deck,
    pub discard_left: Vec<Card>,
    pub discard_right: Vec<Card>,
    pub players: HashMap<PlayerId, PlayerState>,
    /// Authoritative turn order. Never derive order from map iteration.
    pub player_order: Vec<PlayerId>,
    pub current_player_index: usize,
    pub current_player_id: PlayerId,
    pub starting_player_index: usize,
    pub turn_phase: TurnPhase,
    pub turn_count: u32,
    pub round: u32,
    pub declare_mode: Option<DeclareKind>,
    pub declaring_player_id: Option<PlayerId>,
    /// Last-chance countdown; round ends when it reaches zero.
    pub remaining_turns: Option<u32>,
    pub pending_effect: Option<PendingEffect>,
    pub pending_card_choice: Option<PendingCardChoice>,
    /// Armed by a resolved extra-turn effect; consumed by the next
    /// end-of-turn transition instead of advancing the player.
    #[serde(default)]
    pub extra_turn: bool,
    #[serde(default)]
    pub pairs_played_this_turn: u8,
    pub total_scores: HashMap<PlayerId, i64>,
    pub is_game_over: bool,
    pub winner: Option<PlayerId>,
}

impl GameState {
    pub fn player_count(&self) -> usize {
        self.player_order.len()
    }

    pub fn token(&self) -> TurnToken {
        TurnToken {
            player_id: self.current_player_id.clone(),
            round: self.round,
            turn_count: self.turn_count,
            phase: self.turn_phase,
        }
    }

    pub fn discard_pile(&self, side: DiscardSide) -> &Vec<Card> {
        match side {
            DiscardSide::Left => &self.discard_left,
            DiscardSide::Right => &self.discard_right,
        }
    }

    pub fn discard_pile_mut(&mut self, side: DiscardSide) -> &mut Vec<Card> {
        match side {
            DiscardSide::Left => &mut self.discard_left,
            DiscardSide::Right => &mut self.discard_right,
        }
    }

    /// Exactly one empty pile forces discards into it.
    pub fn forced_discard_side(&self) -> Option<DiscardSide> {
        match (self.discard_left.is_empty(), self.discard_right.is_empty()) {
            (true, false) => Some(DiscardSide::Left),
            (false, true) => Some(DiscardSide::Right),
            _ => None,
        }
    }

    /// Cards a deck draw could reach: the draw pile plus everything a
    /// reshuffle would recover (both piles minus their tops).
    pub fn drawable_cards(&self) -> usize {
        self.deck.len()
            + self.discard_left.len().saturating_sub(1)
            + self.discard_right.len().saturating_sub(1)
    }

    /// Total cards across deck, piles, hands, played pairs and any
    /// pending draw choice. Constant for the lifetime of a round.
    pub fn card_census(&self) -> usize {
        let held: usize = self
            .player_order
            .iter()
            .filter_map(|id| self.players.get(id))
            .map(PlayerState::card_count)
            .sum();
        let pending = self
            .pending_card_choice
            .as_ref()
            .map(|choice| choice.cards.len())
            .unwrap_or(0);
        self.deck.len() + self.discard_left.len() + self.discard_right.len() + held + pending
    }
}

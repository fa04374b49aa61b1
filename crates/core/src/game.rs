use crate::{
    Deck, DeclareKind, DiscardSide, DrawSource, Event, EventBus, GameConfig, GameState, PlayerId,
    PlayerState, RngState, TurnPhase, TurnToken,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

mod effects;
mod round;
mod turn;

pub use round::{PlayerRoundScore, RoundSummary};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("action for phase {expected:?} attempted in {found:?}")]
    WrongPhase { expected: TurnPhase, found: TurnPhase },
    #[error("not {0}'s turn")]
    NotYourTurn(PlayerId),
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("match is already over")]
    GameOver,
    #[error("not enough cards to draw after reshuffle")]
    InsufficientDeck,
    #[error("{0:?} discard pile is empty")]
    EmptyDiscard(DiscardSide),
    #[error("an empty discard pile forces the discard there")]
    MustDiscardToEmptyPile,
    #[error("no card choice pending")]
    NoCardChoicePending,
    #[error("cards do not form a legal pair")]
    InvalidPair,
    #[error("card not in hand")]
    CardNotInHand,
    #[error("pair limit for this turn reached")]
    PairLimitReached,
    #[error("a pair effect is awaiting resolution")]
    EffectPending,
    #[error("no pair effect pending")]
    NoEffectPending,
    #[error("no declaration to confirm")]
    NoDeclarePending,
    #[error("resolution does not match the pending effect")]
    EffectMismatch,
    #[error("cannot steal from {0}")]
    InvalidStealTarget(PlayerId),
    #[error("steal position {0} is out of range")]
    InvalidStealIndex(usize),
    #[error("score below the declare threshold")]
    ScoreTooLow,
    #[error("a last-chance declaration is already active")]
    AlreadyDeclared,
    #[error("unsupported player count {0}")]
    InvalidPlayerCount(usize),
}

/// Choice that resolves a pending pair effect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum EffectChoice {
    DrawBlind,
    TakeDiscard { side: DiscardSide },
    ExtraTurn,
    Steal { opponent: PlayerId, index: usize },
}

/// The full action vocabulary. Every caller, human-facing or
/// unattended, mutates the game exclusively through [`Game::apply`]
/// with one of these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Action {
    Draw { source: DrawSource },
    ChooseCard { keep: usize, discard_to: DiscardSide },
    PlayPair { first: u32, second: u32 },
    ResolveEffect { choice: EffectChoice },
    Declare { mode: DeclareKind },
    ConfirmDeclare,
    EndTurn,
}

/// Result of a token-guarded apply. `Stale` means the state moved on
/// since the decision was taken; the action was dropped, not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Stale,
}

#[derive(Debug)]
pub struct Game {
    pub config: GameConfig,
    pub rng: RngState,
    pub state: GameState,
}

impl Game {
    /// Start a match: shuffled deck, empty hands, one card per discard
    /// pile, random starting player.
    pub fn new(
        config: GameConfig,
        player_ids: &[PlayerId],
        seed: u64,
        events: &mut EventBus,
    ) -> Result<Self, GameError> {
        if !(2..=4).contains(&player_ids.len()) {
            return Err(GameError::InvalidPlayerCount(player_ids.len()));
        }
        let mut rng = RngState::from_seed(seed);
        let mut deck = Deck::build(&config, &mut rng);

        let mut players = HashMap::new();
        for id in player_ids {
            players.insert(id.clone(), PlayerState::default());
        }

        let discard_left = deck.draw_one().into_iter().collect();
        let discard_right = deck.draw_one().into_iter().collect();

        let starting_player_index = rng.gen_range(player_ids.len());
        let current_player_id = player_ids[starting_player_index].clone();

        let state = GameState {
            deck,
            discard_left,
            discard_right,
            players,
            player_order: player_ids.to_vec(),
            current_player_index: starting_player_index,
            current_player_id: current_player_id.clone(),
            starting_player_index,
            turn_phase: TurnPhase::Draw,
            turn_count: 0,
            round: 1,
            declare_mode: None,
            declaring_player_id: None,
            remaining_turns: None,
            pending_effect: None,
            pending_card_choice: None,
            extra_turn: false,
            pairs_played_this_turn: 0,
            total_scores: player_ids.iter().map(|id| (id.clone(), 0)).collect(),
            is_game_over: false,
            winner: None,
        };

        events.push(Event::RoundStarted {
            round: 1,
            starting_player: current_player_id,
            deck_size: state.deck.len(),
        });

        Ok(Self { config, rng, state })
    }

    /// Canonical transition function: validate the actor, dispatch on
    /// the action, mutate in place. Rejections leave state untouched.
    pub fn apply(
        &mut self,
        actor: &str,
        action: Action,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        if self.state.is_game_over {
            return Err(GameError::GameOver);
        }
        if !self.state.players.contains_key(actor) {
            return Err(GameError::UnknownPlayer(actor.to_string()));
        }
        if self.state.current_player_id != actor {
            return Err(GameError::NotYourTurn(actor.to_string()));
        }
        match action {
            Action::Draw { source } => match source {
                DrawSource::Deck => self.draw_from_deck(events),
                DrawSource::DiscardLeft => self.take_from_discard(DiscardSide::Left, events),
                DrawSource::DiscardRight => self.take_from_discard(DiscardSide::Right, events),
            },
            Action::ChooseCard { keep, discard_to } => self.choose_card(keep, discard_to, events),
            Action::PlayPair { first, second } => self.play_pair(first, second, events),
            Action::ResolveEffect { choice } => self.resolve_effect(choice, events),
            Action::Declare { mode } => self.declare(mode, events),
            Action::ConfirmDeclare => self.confirm_declare(events),
            Action::EndTurn => self.end_turn(events),
        }
    }

    /// Token-guarded apply for asynchronous callers: a decision taken
    /// against a snapshot is dropped as `Stale` when the live state no
    /// longer matches the token, instead of failing or corrupting.
    pub fn apply_with_token(
        &mut self,
        token: &TurnToken,
        actor: &str,
        action: Action,
        events: &mut EventBus,
    ) -> Result<ApplyOutcome, GameError> {
        if self.state.is_game_over || self.state.token() != *token {
            return Ok(ApplyOutcome::Stale);
        }
        self.apply(actor, action, events)?;
        Ok(ApplyOutcome::Applied)
    }

    pub fn player(&self, id: &str) -> Result<&PlayerState, GameError> {
        self.state
            .players
            .get(id)
            .ok_or_else(|| GameError::UnknownPlayer(id.to_string()))
    }

    pub(crate) fn player_mut(&mut self, id: &str) -> Result<&mut PlayerState, GameError> {
        self.state
            .players
            .get_mut(id)
            .ok_or_else(|| GameError::UnknownPlayer(id.to_string()))
    }

    pub(crate) fn expect_phase(&self, expected: TurnPhase) -> Result<(), GameError> {
        if self.state.turn_phase != expected {
            return Err(GameError::WrongPhase {
                expected,
                found: self.state.turn_phase,
            });
        }
        Ok(())
    }
}

use crate::{
    strategy_for, AutoplayError, MatchRecord, RoundRecord, RunStatus, SimulatorConfig, Strategy,
    Tier,
};
use shorebreak_core::{ApplyOutcome, EventBus, Game, GameConfig, RngState, TurnPhase};
use std::collections::HashMap;

/// Plays a match to completion, unattended: every seat is a strategy,
/// every mutation goes through the token-guarded apply path.
pub struct Simulator {
    pub game: Game,
    pub events: EventBus,
    strategies: HashMap<String, Box<dyn Strategy>>,
    decision_rng: RngState,
    config: SimulatorConfig,
    steps: u32,
    rounds: Vec<RoundRecord>,
}

impl Simulator {
    pub fn new(
        game_config: GameConfig,
        seats: Vec<(String, Box<dyn Strategy>)>,
        config: SimulatorConfig,
    ) -> Result<Self, AutoplayError> {
        let ids: Vec<String> = seats.iter().map(|(id, _)| id.clone()).collect();
        let mut events = EventBus::default();
        let game = Game::new(game_config, &ids, config.seed, &mut events)?;
        let decision_rng = RngState::from_seed(config.seed.wrapping_mul(0x9E37_79B9));
        Ok(Self {
            game,
            events,
            strategies: seats.into_iter().collect(),
            decision_rng,
            config,
            steps: 0,
            rounds: Vec::new(),
        })
    }

    pub fn with_tiers(
        game_config: GameConfig,
        seats: &[(String, Tier)],
        config: SimulatorConfig,
    ) -> Result<Self, AutoplayError> {
        let boxed = seats
            .iter()
            .map(|(id, tier)| (id.clone(), strategy_for(*tier)))
            .collect();
        Self::new(game_config, boxed, config)
    }

    /// Advance by one decision (or one round settlement). Returns
    /// false once the match is over.
    pub fn step(&mut self) -> Result<bool, AutoplayError> {
        if self.game.state.is_game_over && self.game.state.turn_phase != TurnPhase::RoundEnd {
            return Ok(false);
        }
        if self.game.state.turn_phase == TurnPhase::RoundEnd {
            let summary = self.game.resolve_round(&mut self.events)?;
            self.rounds.push(RoundRecord::from(&summary));
            return Ok(!self.game.state.is_game_over);
        }

        let actor = self.game.state.current_player_id.clone();
        let strategy = self
            .strategies
            .get(&actor)
            .ok_or_else(|| AutoplayError::MissingStrategy(actor.clone()))?;
        let token = self.game.state.token();
        let action = strategy.decide(
            &self.game.state,
            &self.game.config,
            &actor,
            &mut self.decision_rng,
        );
        match self
            .game
            .apply_with_token(&token, &actor, action.clone(), &mut self.events)
        {
            Ok(ApplyOutcome::Applied) => Ok(!self.game.state.is_game_over
                || self.game.state.turn_phase == TurnPhase::RoundEnd),
            // A stale token cannot happen in-process; dropping the
            // decision and re-deciding is still the correct recovery.
            Ok(ApplyOutcome::Stale) => Ok(true),
            // End-of-deck is surfaced to the caller by contract; with
            // nothing left to draw anywhere the round settles as-is.
            Err(shorebreak_core::GameError::InsufficientDeck) => {
                self.game.state.turn_phase = TurnPhase::RoundEnd;
                Ok(true)
            }
            Err(err) => Err(AutoplayError::IllegalAction {
                player: actor,
                detail: format!("{action:?}: {err}"),
            }),
        }
    }

    pub fn run(&mut self) -> Result<MatchRecord, AutoplayError> {
        let status = loop {
            if self.steps >= self.config.max_steps {
                break RunStatus::StepCapReached;
            }
            self.steps += 1;
            if !self.step()? {
                break RunStatus::Completed;
            }
        };
        Ok(self.record(status))
    }

    fn record(&self, status: RunStatus) -> MatchRecord {
        let totals = self
            .game
            .state
            .player_order
            .iter()
            .map(|id| {
                (
                    id.clone(),
                    self.game.state.total_scores.get(id).copied().unwrap_or(0),
                )
            })
            .collect();
        MatchRecord {
            seed: self.config.seed,
            status,
            steps: self.steps,
            rounds: self.rounds.clone(),
            totals,
            winner: self.game.state.winner.clone(),
        }
    }
}

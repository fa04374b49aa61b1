use super::{EffectChoice, Game, GameError};
use crate::{
    scoring, CardKind, DiscardSide, Event, EventBus, MatchEndReason, PairEffect, TurnPhase,
};

impl Game {
    /// Resolve the pending pair effect with the acting agent's choice.
    /// The turn cannot leave the pair phase while an effect is open.
    pub(super) fn resolve_effect(
        &mut self,
        choice: EffectChoice,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.expect_phase(TurnPhase::Pair)?;
        let pending = self
            .state
            .pending_effect
            .clone()
            .ok_or(GameError::NoEffectPending)?;
        match (pending.effect, choice) {
            (PairEffect::DrawBlind, EffectChoice::DrawBlind) => self.resolve_blind_draw(events),
            (PairEffect::DrawDiscard, EffectChoice::TakeDiscard { side }) => {
                self.resolve_discard_pick(side, events)
            }
            (PairEffect::ExtraTurn, EffectChoice::ExtraTurn) => {
                self.state.extra_turn = true;
                self.state.pending_effect = None;
                events.push(Event::ExtraTurnArmed {
                    player: self.state.current_player_id.clone(),
                });
                Ok(())
            }
            (PairEffect::StealCard, EffectChoice::Steal { opponent, index }) => {
                self.resolve_steal(&opponent, index, events)
            }
            _ => Err(GameError::EffectMismatch),
        }
    }

    fn resolve_blind_draw(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        if self.state.deck.is_empty() {
            let recovered = self.state.deck.reshuffle(
                &mut self.state.discard_left,
                &mut self.state.discard_right,
                &mut self.rng,
            );
            if recovered > 0 {
                events.push(Event::DeckReshuffled { recovered });
            }
        }
        let player_id = self.state.current_player_id.clone();
        let drew = self.state.deck.draw_one();
        if let Some(card) = drew {
            self.player_mut(&player_id)?.hand.push(card);
        }
        self.state.pending_effect = None;
        events.push(Event::BlindDraw {
            player: player_id.clone(),
            drew: drew.map(|card| card.kind),
        });
        if drew.is_some() {
            self.check_mermaid_win(&player_id, events)?;
        }
        Ok(())
    }

    fn resolve_discard_pick(
        &mut self,
        side: DiscardSide,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        if self.state.discard_left.is_empty() && self.state.discard_right.is_empty() {
            // Nothing anywhere to take; the effect fizzles.
            self.state.pending_effect = None;
            return Ok(());
        }
        let card = self
            .state
            .discard_pile_mut(side)
            .pop()
            .ok_or(GameError::EmptyDiscard(side))?;
        let player_id = self.state.current_player_id.clone();
        self.player_mut(&player_id)?.hand.push(card);
        self.state.pending_effect = None;
        events.push(Event::DiscardPicked {
            player: player_id.clone(),
            side,
            kind: card.kind,
        });
        self.check_mermaid_win(&player_id, events)?;
        Ok(())
    }

    fn resolve_steal(
        &mut self,
        opponent: &str,
        index: usize,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let player_id = self.state.current_player_id.clone();
        if opponent == player_id {
            return Err(GameError::InvalidStealTarget(opponent.to_string()));
        }
        if !self.state.players.contains_key(opponent) {
            return Err(GameError::UnknownPlayer(opponent.to_string()));
        }
        let any_stealable = self
            .state
            .player_order
            .iter()
            .filter(|id| **id != player_id)
            .filter_map(|id| self.state.players.get(id))
            .any(|player| !player.hand.is_empty());
        if !any_stealable {
            // No opponent holds a card; the effect fizzles.
            self.state.pending_effect = None;
            events.push(Event::CardStolen {
                player: player_id,
                from: opponent.to_string(),
                kind: None,
            });
            return Ok(());
        }
        let target = self.player_mut(opponent)?;
        if target.hand.is_empty() {
            return Err(GameError::InvalidStealTarget(opponent.to_string()));
        }
        if index >= target.hand.len() {
            return Err(GameError::InvalidStealIndex(index));
        }
        let stolen = target.hand.remove(index);
        self.player_mut(&player_id)?.hand.push(stolen);
        self.state.pending_effect = None;
        events.push(Event::CardStolen {
            player: player_id.clone(),
            from: opponent.to_string(),
            kind: Some(stolen.kind),
        });
        self.check_mermaid_win(&player_id, events)?;
        Ok(())
    }

    /// Collecting four Mermaids ends the match on the spot, checked
    /// after every hand mutation.
    pub(super) fn check_mermaid_win(
        &mut self,
        player_id: &str,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        if self.config.mermaid_win_count == 0 {
            return Ok(());
        }
        let player = self.player(player_id)?;
        let mermaids = scoring::count_kind(&player.all_cards(), CardKind::Mermaid);
        if mermaids >= self.config.mermaid_win_count {
            self.state.is_game_over = true;
            self.state.winner = Some(player_id.to_string());
            self.state.turn_phase = TurnPhase::RoundEnd;
            events.push(Event::MatchEnded {
                winner: Some(player_id.to_string()),
                reason: MatchEndReason::FourMermaids,
            });
        }
        Ok(())
    }
}

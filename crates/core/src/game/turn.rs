use super::{Game, GameError};
use crate::{
    pairs, scoring, DeclareKind, DiscardSide, Event, EventBus, PendingCardChoice, PendingEffect,
    PlayedPair, ScoreBreakdown, TurnPhase,
};

impl Game {
    /// Card-only score (no color bonus) for declare checks and AI.
    pub fn current_score(&self, player_id: &str) -> Result<ScoreBreakdown, GameError> {
        let player = self.player(player_id)?;
        Ok(scoring::score(&player.hand, &player.played_pairs, false))
    }

    pub(super) fn draw_from_deck(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        self.expect_phase(TurnPhase::Draw)?;
        if self.state.deck.len() < 2 {
            let recovered = self.state.deck.reshuffle(
                &mut self.state.discard_left,
                &mut self.state.discard_right,
                &mut self.rng,
            );
            if recovered > 0 {
                events.push(Event::DeckReshuffled { recovered });
            }
        }
        if self.state.deck.len() < 2 {
            return Err(GameError::InsufficientDeck);
        }
        let (Some(first), Some(second)) =
            (self.state.deck.draw_one(), self.state.deck.draw_one())
        else {
            return Err(GameError::InsufficientDeck);
        };
        self.state.pending_card_choice = Some(PendingCardChoice {
            player_id: self.state.current_player_id.clone(),
            cards: [first, second],
        });
        self.state.turn_phase = TurnPhase::ChoosingCard;
        events.push(Event::CardsDrawn {
            player: self.state.current_player_id.clone(),
            count: 2,
        });
        Ok(())
    }

    pub(super) fn take_from_discard(
        &mut self,
        side: DiscardSide,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.expect_phase(TurnPhase::Draw)?;
        let card = self
            .state
            .discard_pile_mut(side)
            .pop()
            .ok_or(GameError::EmptyDiscard(side))?;
        let player_id = self.state.current_player_id.clone();
        self.player_mut(&player_id)?.hand.push(card);
        self.state.turn_phase = TurnPhase::Pair;
        events.push(Event::DiscardTaken {
            player: player_id.clone(),
            side,
            kind: card.kind,
        });
        self.check_mermaid_win(&player_id, events)?;
        Ok(())
    }

    pub(super) fn choose_card(
        &mut self,
        keep: usize,
        discard_to: DiscardSide,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.expect_phase(TurnPhase::ChoosingCard)?;
        let cards = self
            .state
            .pending_card_choice
            .as_ref()
            .ok_or(GameError::NoCardChoicePending)?
            .cards;
        if keep > 1 {
            return Err(GameError::CardNotInHand);
        }
        if let Some(forced) = self.state.forced_discard_side() {
            if discard_to != forced {
                return Err(GameError::MustDiscardToEmptyPile);
            }
        }
        let kept = cards[keep];
        let discarded = cards[1 - keep];
        let player_id = self.state.current_player_id.clone();
        self.player_mut(&player_id)?.hand.push(kept);
        self.state.discard_pile_mut(discard_to).push(discarded);
        self.state.pending_card_choice = None;
        self.state.turn_phase = TurnPhase::Pair;
        events.push(Event::CardKept {
            player: player_id.clone(),
            kept: kept.kind,
            discarded: discarded.kind,
            side: discard_to,
        });
        self.check_mermaid_win(&player_id, events)?;
        Ok(())
    }

    pub(super) fn play_pair(
        &mut self,
        first: u32,
        second: u32,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.expect_phase(TurnPhase::Pair)?;
        if self.state.pending_effect.is_some() {
            return Err(GameError::EffectPending);
        }
        if self.state.pairs_played_this_turn >= self.config.pair_limit {
            return Err(GameError::PairLimitReached);
        }
        if first == second {
            return Err(GameError::InvalidPair);
        }
        let player_id = self.state.current_player_id.clone();
        let hand = &self.player(&player_id)?.hand;
        let first_at = hand
            .iter()
            .position(|card| card.id == first)
            .ok_or(GameError::CardNotInHand)?;
        let second_at = hand
            .iter()
            .position(|card| card.id == second)
            .ok_or(GameError::CardNotInHand)?;
        let (a, b) = (hand[first_at], hand[second_at]);
        if !pairs::is_valid_pair(&a, &b) {
            return Err(GameError::InvalidPair);
        }

        let effect = pairs::pair_effect(&a, &b);
        let turn = self.state.turn_count;
        let player = self.player_mut(&player_id)?;
        let (hi, lo) = if first_at > second_at {
            (first_at, second_at)
        } else {
            (second_at, first_at)
        };
        player.hand.remove(hi);
        player.hand.remove(lo);
        player.played_pairs.push(PlayedPair { cards: [a, b], turn });
        self.state.pairs_played_this_turn += 1;

        if let Some(effect) = effect {
            self.state.pending_effect = Some(PendingEffect {
                effect,
                player_id: player_id.clone(),
                kinds: [a.kind, b.kind],
            });
        }
        events.push(Event::PairPlayed {
            player: player_id,
            kinds: [a.kind, b.kind],
            effect,
        });
        Ok(())
    }

    pub(super) fn declare(
        &mut self,
        mode: DeclareKind,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.expect_phase(TurnPhase::Declare)?;
        if mode == DeclareKind::LastChance && self.state.declare_mode == Some(DeclareKind::LastChance)
        {
            return Err(GameError::AlreadyDeclared);
        }
        let player_id = self.state.current_player_id.clone();
        let breakdown = self.current_score(&player_id)?;
        if !scoring::can_declare(&breakdown, self.config.declare_threshold) {
            return Err(GameError::ScoreTooLow);
        }
        self.state.declare_mode = Some(mode);
        self.state.declaring_player_id = Some(player_id.clone());
        if mode == DeclareKind::LastChance {
            self.state.remaining_turns = Some(self.state.player_count() as u32 - 1);
        }
        self.state.turn_phase = TurnPhase::DeclareShowing;
        events.push(Event::Declared {
            player: player_id,
            mode,
            score: breakdown.total,
        });
        Ok(())
    }

    pub(super) fn confirm_declare(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        self.expect_phase(TurnPhase::DeclareShowing)?;
        let mode = self
            .state
            .declare_mode
            .ok_or(GameError::NoDeclarePending)?;
        let player_id = self.state.current_player_id.clone();
        events.push(Event::DeclareConfirmed {
            player: player_id.clone(),
            mode,
        });
        match mode {
            DeclareKind::Stop => {
                self.state.turn_phase = TurnPhase::RoundEnd;
            }
            DeclareKind::LastChance => {
                // The declarer's turn is over; the countdown burns down
                // on the other players' turns.
                self.state.pairs_played_this_turn = 0;
                self.state.extra_turn = false;
                self.advance_player(events);
            }
        }
        Ok(())
    }

    pub(super) fn end_turn(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        match self.state.turn_phase {
            TurnPhase::Pair => {
                if self.state.pending_effect.is_some() {
                    return Err(GameError::EffectPending);
                }
                let breakdown = self.current_score(&self.state.current_player_id.clone())?;
                if scoring::can_declare(&breakdown, self.config.declare_threshold) {
                    self.state.turn_phase = TurnPhase::Declare;
                    Ok(())
                } else {
                    // Below the threshold the declare phase is skipped.
                    self.finish_turn(events);
                    Ok(())
                }
            }
            TurnPhase::Declare => {
                self.finish_turn(events);
                Ok(())
            }
            found => Err(GameError::WrongPhase {
                expected: TurnPhase::Pair,
                found,
            }),
        }
    }

    /// Completed-turn transition. The extra-turn override wins over
    /// the normal advance and leaves both the turn counter and the
    /// last-chance countdown untouched.
    pub(super) fn finish_turn(&mut self, events: &mut EventBus) {
        self.state.pairs_played_this_turn = 0;
        if self.state.extra_turn {
            self.state.extra_turn = false;
            self.state.turn_phase = TurnPhase::Draw;
            events.push(Event::ExtraTurnStarted {
                player: self.state.current_player_id.clone(),
            });
            return;
        }
        self.state.turn_count += 1;
        if self.state.declare_mode == Some(DeclareKind::LastChance) {
            if let Some(remaining) = self.state.remaining_turns {
                let remaining = remaining.saturating_sub(1);
                self.state.remaining_turns = Some(remaining);
                if remaining == 0 {
                    self.state.turn_phase = TurnPhase::RoundEnd;
                    return;
                }
            }
        }
        self.advance_player(events);
    }

    fn advance_player(&mut self, events: &mut EventBus) {
        let previous = self.state.current_player_id.clone();
        let next_index = (self.state.current_player_index + 1) % self.state.player_count();
        self.state.current_player_index = next_index;
        self.state.current_player_id = self.state.player_order[next_index].clone();
        self.state.turn_phase = TurnPhase::Draw;
        self.state.pending_effect = None;
        events.push(Event::TurnEnded {
            player: previous,
            next: self.state.current_player_id.clone(),
            phase: self.state.turn_phase,
        });
    }
}

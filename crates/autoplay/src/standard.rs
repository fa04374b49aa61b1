use crate::strategy::{choose_drawn_card, declare_kind_for, resolve_pending};
use crate::{eval, Strategy};
use shorebreak_core::{
    can_declare, score, Action, DrawSource, GameConfig, GameState, RngState, TurnPhase,
};

/// Middle tier: weighs discard tops against an unknown deck draw using
/// pair potential, collection curves, multiplier synergy and the
/// dominant color; plays pairs while they pay.
pub struct StandardStrategy;

/// Worth assumed for the unseen top of the deck.
const DECK_BASE_VALUE: i64 = 3;

impl Strategy for StandardStrategy {
    fn decide(
        &self,
        state: &GameState,
        config: &GameConfig,
        player_id: &str,
        rng: &mut RngState,
    ) -> Action {
        let Some(player) = state.players.get(player_id) else {
            return Action::EndTurn;
        };
        match state.turn_phase {
            TurnPhase::Draw => {
                let left = state.discard_left.last();
                let right = state.discard_right.last();
                let left_value = left.map(|card| eval::discard_value(card, &player.hand));
                let right_value = right.map(|card| eval::discard_value(card, &player.hand));

                // With no second card reachable the blind draw would
                // fail; fall back to the better pile top.
                if state.drawable_cards() < 2 {
                    return match (left_value, right_value) {
                        (Some(lv), Some(rv)) if lv >= rv => {
                            Action::Draw { source: DrawSource::DiscardLeft }
                        }
                        (_, Some(_)) => Action::Draw { source: DrawSource::DiscardRight },
                        (Some(_), None) => Action::Draw { source: DrawSource::DiscardLeft },
                        (None, None) => Action::Draw { source: DrawSource::Deck },
                    };
                }

                if let (Some(value), Some(_)) = (left_value, left) {
                    if value > DECK_BASE_VALUE && value >= right_value.unwrap_or(i64::MIN) {
                        return Action::Draw { source: DrawSource::DiscardLeft };
                    }
                }
                if let (Some(value), Some(_)) = (right_value, right) {
                    if value > DECK_BASE_VALUE && value > left_value.unwrap_or(i64::MIN) {
                        return Action::Draw { source: DrawSource::DiscardRight };
                    }
                }

                // A top matching an established color run is still
                // worth taking over a blind draw.
                if let Some((color, count)) = eval::dominant_color(&player.hand) {
                    if count >= 2 {
                        if left.map(|card| card.color) == Some(color) {
                            return Action::Draw { source: DrawSource::DiscardLeft };
                        }
                        if right.map(|card| card.color) == Some(color) {
                            return Action::Draw { source: DrawSource::DiscardRight };
                        }
                    }
                }
                Action::Draw { source: DrawSource::Deck }
            }
            TurnPhase::ChoosingCard => {
                choose_drawn_card(state, player_id, eval::discard_value)
            }
            TurnPhase::Pair => {
                if let Some(action) = resolve_pending(state, player_id, rng, true) {
                    return action;
                }
                if state.pairs_played_this_turn >= config.pair_limit {
                    return Action::EndTurn;
                }
                if let Some(pick) = eval::best_pair(&player.hand, &player.played_pairs) {
                    return Action::PlayPair {
                        first: player.hand[pick.first].id,
                        second: player.hand[pick.second].id,
                    };
                }
                Action::EndTurn
            }
            TurnPhase::Declare => {
                let breakdown = score(&player.hand, &player.played_pairs, false);
                if can_declare(&breakdown, config.declare_threshold) {
                    Action::Declare {
                        mode: declare_kind_for(state, false),
                    }
                } else {
                    Action::EndTurn
                }
            }
            TurnPhase::DeclareShowing => Action::ConfirmDeclare,
            TurnPhase::RoundEnd => Action::EndTurn,
        }
    }
}

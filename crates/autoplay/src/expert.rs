use crate::strategy::{choose_drawn_card, declare_kind_for, resolve_pending};
use crate::{eval, Strategy};
use shorebreak_core::{
    can_declare, score, Action, DrawSource, GameConfig, GameState, RngState, TurnPhase,
};

/// Top tier: expected-value reads on the deck, effect-weighted discard
/// evaluation with Mermaid positioning, and opponent-aware stop
/// timing.
pub struct ExpertStrategy;

/// Card-score lead over the table that makes an immediate stop safe.
const STOP_LEAD: i64 = 3;

impl Strategy for ExpertStrategy {
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
                let mut best_source = DrawSource::Deck;
                let mut best_value = if state.drawable_cards() >= 2 {
                    eval::deck_expected_value(&player.hand)
                } else {
                    // The blind draw would fail; any pile top beats it.
                    f64::MIN
                };
                if let Some(top) = state.discard_left.last() {
                    let value = eval::discard_value_expert(top, &player.hand) as f64;
                    if value > best_value {
                        best_value = value;
                        best_source = DrawSource::DiscardLeft;
                    }
                }
                if let Some(top) = state.discard_right.last() {
                    let value = eval::discard_value_expert(top, &player.hand) as f64;
                    if value > best_value {
                        best_source = DrawSource::DiscardRight;
                    }
                }
                Action::Draw { source: best_source }
            }
            TurnPhase::ChoosingCard => {
                choose_drawn_card(state, player_id, eval::discard_value_expert)
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
                if !can_declare(&breakdown, config.declare_threshold) {
                    return Action::EndTurn;
                }
                let opponents = eval::opponent_summary(state, player_id);
                let lead = breakdown.total - opponents.max_score;
                Action::Declare {
                    mode: declare_kind_for(state, lead >= STOP_LEAD),
                }
            }
            TurnPhase::DeclareShowing => Action::ConfirmDeclare,
            TurnPhase::RoundEnd => Action::EndTurn,
        }
    }
}

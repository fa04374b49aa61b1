use crate::strategy::{declare_kind_for, resolve_pending};
use crate::Strategy;
use shorebreak_core::{
    can_declare, pairs, score, Action, DiscardSide, DrawSource, GameConfig, GameState, RngState,
    TurnPhase,
};

/// Bottom tier: random draws, coin-flip pair play, threshold-only
/// declarations.
pub struct CasualStrategy;

impl Strategy for CasualStrategy {
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
                let mut sources = Vec::new();
                if state.drawable_cards() >= 2 {
                    sources.push(DrawSource::Deck);
                }
                if !state.discard_left.is_empty() {
                    sources.push(DrawSource::DiscardLeft);
                }
                if !state.discard_right.is_empty() {
                    sources.push(DrawSource::DiscardRight);
                }
                let source = rng.pick(&sources).copied().unwrap_or(DrawSource::Deck);
                Action::Draw { source }
            }
            TurnPhase::ChoosingCard => {
                let discard_to = state.forced_discard_side().unwrap_or_else(|| {
                    if rng.chance(0.5) {
                        DiscardSide::Left
                    } else {
                        DiscardSide::Right
                    }
                });
                Action::ChooseCard {
                    keep: rng.gen_range(2),
                    discard_to,
                }
            }
            TurnPhase::Pair => {
                if let Some(action) = resolve_pending(state, player_id, rng, false) {
                    return action;
                }
                let options = pairs::find_pairs(&player.hand);
                let may_play = state.pairs_played_this_turn < config.pair_limit;
                if may_play && !options.is_empty() && rng.chance(0.5) {
                    let (first, second) = options[rng.gen_range(options.len())];
                    return Action::PlayPair {
                        first: player.hand[first].id,
                        second: player.hand[second].id,
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

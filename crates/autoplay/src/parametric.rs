use crate::strategy::resolve_pending;
use crate::{eval, Strategy};
use serde::{Deserialize, Serialize};
use shorebreak_core::{
    count_kind, pairs, score, Action, CardKind, DeclareKind, DrawSource, GameConfig, GameState,
    PairEffect, RngState, TurnPhase,
};

/// Tunable weights driving every decision point of the parametric
/// tier. Defaults approximate the expert tier; training loops can
/// load alternatives via serde.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genome {
    pub deck_base_value: f64,
    pub chased_collection_bonus: f64,
    pub discard_pair_bonus: f64,
    pub discard_collection_weight: f64,
    pub discard_multiplier_weight: f64,
    pub discard_color_bonus: f64,
    pub mermaid_priority: f64,
    pub sailor_priority: f64,
    pub fish_pair_bonus: f64,
    pub crab_pair_bonus: f64,
    pub sailboat_pair_bonus: f64,
    pub steal_pair_bonus: f64,
    pub early_round_turns: u32,
    pub early_pair_scale: f64,
    pub late_pair_scale: f64,
    pub min_pair_value: f64,
    pub declare_threshold: f64,
    pub opponent_hand_size_weight: f64,
    pub risk_tolerance: f64,
    pub stop_turn_threshold: u32,
    pub stop_score_lead: f64,
}

impl Default for Genome {
    fn default() -> Self {
        Self {
            deck_base_value: 3.0,
            chased_collection_bonus: 0.3,
            discard_pair_bonus: 3.0,
            discard_collection_weight: 1.0,
            discard_multiplier_weight: 1.0,
            discard_color_bonus: 1.0,
            mermaid_priority: 1.5,
            sailor_priority: 1.0,
            fish_pair_bonus: 2.0,
            crab_pair_bonus: 3.0,
            sailboat_pair_bonus: 4.0,
            steal_pair_bonus: 3.0,
            early_round_turns: 6,
            early_pair_scale: 1.2,
            late_pair_scale: 1.0,
            min_pair_value: 0.5,
            declare_threshold: 7.0,
            opponent_hand_size_weight: 0.3,
            risk_tolerance: 0.5,
            stop_turn_threshold: 10,
            stop_score_lead: 3.0,
        }
    }
}

pub struct ParametricStrategy {
    genome: Genome,
}

impl ParametricStrategy {
    pub fn new(genome: Genome) -> Self {
        Self { genome }
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    fn discard_worth(&self, card: &shorebreak_core::Card, hand: &[shorebreak_core::Card]) -> f64 {
        let genome = &self.genome;
        let mut worth = card.value as f64;
        if eval::can_pair_with(card, hand).is_some() {
            worth += genome.discard_pair_bonus;
        }
        if card.kind.is_collection() {
            worth += eval::collection_marginal(hand, card.kind).marginal as f64
                * genome.discard_collection_weight;
        }
        worth += eval::multiplier_synergy(hand, card) as f64 * genome.discard_multiplier_weight;
        if let Some((color, _)) = eval::dominant_color(hand) {
            if card.color == color {
                worth += genome.discard_color_bonus;
            }
        }
        if card.kind == CardKind::Mermaid {
            if count_kind(hand, CardKind::Mermaid) == 3 {
                worth += 100.0;
            } else {
                worth += genome.mermaid_priority * 2.0;
            }
        }
        if card.kind == CardKind::Sailor && count_kind(hand, CardKind::Sailor) == 1 {
            worth += genome.sailor_priority * 3.0;
        }
        worth
    }

    fn pair_worth(&self, effect: Option<PairEffect>, turn_count: u32) -> f64 {
        let genome = &self.genome;
        let base = match effect {
            Some(PairEffect::DrawBlind) => genome.fish_pair_bonus,
            Some(PairEffect::DrawDiscard) => genome.crab_pair_bonus,
            Some(PairEffect::ExtraTurn) => genome.sailboat_pair_bonus,
            Some(PairEffect::StealCard) => genome.steal_pair_bonus,
            None => 0.0,
        };
        if turn_count <= genome.early_round_turns {
            base * genome.early_pair_scale
        } else {
            base * genome.late_pair_scale
        }
    }
}

impl Strategy for ParametricStrategy {
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
        let genome = &self.genome;
        match state.turn_phase {
            TurnPhase::Draw => {
                let mut deck_worth = genome.deck_base_value;
                for kind in [CardKind::Shell, CardKind::Octopus, CardKind::Penguin, CardKind::Sailor]
                {
                    if count_kind(&player.hand, kind) >= 1 {
                        deck_worth += genome.chased_collection_bonus;
                    }
                }
                let mut best = if state.drawable_cards() >= 2 {
                    (DrawSource::Deck, deck_worth)
                } else {
                    (DrawSource::Deck, f64::MIN)
                };
                if let Some(top) = state.discard_left.last() {
                    let worth = self.discard_worth(top, &player.hand);
                    if worth > best.1 {
                        best = (DrawSource::DiscardLeft, worth);
                    }
                }
                if let Some(top) = state.discard_right.last() {
                    let worth = self.discard_worth(top, &player.hand);
                    if worth > best.1 {
                        best = (DrawSource::DiscardRight, worth);
                    }
                }
                Action::Draw { source: best.0 }
            }
            TurnPhase::ChoosingCard => {
                let keep = state
                    .pending_card_choice
                    .as_ref()
                    .map(|choice| {
                        let first = self.discard_worth(&choice.cards[0], &player.hand);
                        let second = self.discard_worth(&choice.cards[1], &player.hand);
                        usize::from(second > first)
                    })
                    .unwrap_or(0);
                Action::ChooseCard {
                    keep,
                    discard_to: crate::strategy::discard_side_for(state),
                }
            }
            TurnPhase::Pair => {
                if let Some(action) = resolve_pending(state, player_id, rng, true) {
                    return action;
                }
                if state.pairs_played_this_turn >= config.pair_limit {
                    return Action::EndTurn;
                }
                let mut best: Option<((usize, usize), f64)> = None;
                for (first, second) in pairs::find_pairs(&player.hand) {
                    let effect = pairs::pair_effect(&player.hand[first], &player.hand[second]);
                    let worth = self.pair_worth(effect, state.turn_count);
                    if best.map(|(_, held)| worth > held).unwrap_or(true) {
                        best = Some(((first, second), worth));
                    }
                }
                if let Some(((first, second), worth)) = best {
                    if worth >= genome.min_pair_value {
                        return Action::PlayPair {
                            first: player.hand[first].id,
                            second: player.hand[second].id,
                        };
                    }
                }
                Action::EndTurn
            }
            TurnPhase::Declare => {
                let breakdown = score(&player.hand, &player.played_pairs, false);
                let total = breakdown.total as f64;
                // The engine's own threshold is a hard floor under any
                // genome setting.
                if breakdown.total < config.declare_threshold || total < genome.declare_threshold {
                    return Action::EndTurn;
                }
                let opponents = eval::opponent_summary(state, player_id);
                let risk = 1.0 - genome.risk_tolerance;
                let adjusted = genome.declare_threshold
                    + opponents.max_hand_size as f64 * genome.opponent_hand_size_weight * 0.5 * risk;
                if total < adjusted {
                    return Action::EndTurn;
                }
                let lead = total - opponents.max_score as f64;
                let mode = if state.turn_count > genome.stop_turn_threshold
                    || lead >= genome.stop_score_lead
                    || state.declare_mode == Some(DeclareKind::LastChance)
                {
                    DeclareKind::Stop
                } else {
                    DeclareKind::LastChance
                };
                Action::Declare { mode }
            }
            TurnPhase::DeclareShowing => Action::ConfirmDeclare,
            TurnPhase::RoundEnd => Action::EndTurn,
        }
    }
}

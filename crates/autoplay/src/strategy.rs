use crate::{CasualStrategy, ExpertStrategy, ParametricStrategy, StandardStrategy};
use crate::eval;
use serde::{Deserialize, Serialize};
use shorebreak_core::{
    Action, Card, DiscardSide, EffectChoice, GameConfig, GameState, PairEffect, RngState,
};

/// Turn count past which the tiers prefer an immediate stop over a
/// last-chance gamble.
pub(crate) const LATE_ROUND_TURNS: u32 = 10;

/// A decision engine tier. `decide` is a pure read of the snapshot:
/// no IO, no hidden state, randomness only through the injected rng.
/// The returned action must be legal for the snapshot's phase.
pub trait Strategy {
    fn decide(
        &self,
        state: &GameState,
        config: &GameConfig,
        player_id: &str,
        rng: &mut RngState,
    ) -> Action;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Tier {
    Casual,
    Standard,
    Expert,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Casual, Tier::Standard, Tier::Expert];

    pub fn name(self) -> &'static str {
        match self {
            Tier::Casual => "casual",
            Tier::Standard => "standard",
            Tier::Expert => "expert",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "casual" | "easy" => Some(Tier::Casual),
            "standard" | "medium" => Some(Tier::Standard),
            "expert" | "hard" => Some(Tier::Expert),
            _ => None,
        }
    }
}

pub fn strategy_for(tier: Tier) -> Box<dyn Strategy> {
    match tier {
        Tier::Casual => Box::new(CasualStrategy),
        Tier::Standard => Box::new(StandardStrategy),
        Tier::Expert => Box::new(ExpertStrategy),
    }
}

/// The tunable variant is constructed separately from its genome.
pub fn parametric_strategy(genome: crate::Genome) -> Box<dyn Strategy> {
    Box::new(ParametricStrategy::new(genome))
}

/// Resolution for whatever pair effect is pending. Shared by every
/// tier; `smart` switches between random and evaluated choices.
pub(crate) fn resolve_pending(
    state: &GameState,
    player_id: &str,
    rng: &mut RngState,
    smart: bool,
) -> Option<Action> {
    let pending = state.pending_effect.as_ref()?;
    if pending.player_id != player_id {
        return None;
    }
    let hand = state
        .players
        .get(player_id)
        .map(|player| player.hand.as_slice())
        .unwrap_or(&[]);
    let choice = match pending.effect {
        PairEffect::DrawBlind => EffectChoice::DrawBlind,
        PairEffect::ExtraTurn => EffectChoice::ExtraTurn,
        PairEffect::DrawDiscard => EffectChoice::TakeDiscard {
            side: pick_discard_side(state, hand, rng, smart),
        },
        PairEffect::StealCard => pick_steal(state, player_id, rng, smart),
    };
    Some(Action::ResolveEffect { choice })
}

fn pick_discard_side(state: &GameState, hand: &[Card], rng: &mut RngState, smart: bool) -> DiscardSide {
    let left = state.discard_left.last();
    let right = state.discard_right.last();
    match (left, right) {
        (Some(left_top), Some(right_top)) => {
            if smart {
                if eval::discard_value(left_top, hand) >= eval::discard_value(right_top, hand) {
                    DiscardSide::Left
                } else {
                    DiscardSide::Right
                }
            } else if rng.chance(0.5) {
                DiscardSide::Left
            } else {
                DiscardSide::Right
            }
        }
        (Some(_), None) => DiscardSide::Left,
        (None, Some(_)) => DiscardSide::Right,
        // Both empty: the engine resolves this as a fizzle.
        (None, None) => DiscardSide::Left,
    }
}

fn pick_steal(state: &GameState, player_id: &str, rng: &mut RngState, smart: bool) -> EffectChoice {
    let holders: Vec<&String> = state
        .player_order
        .iter()
        .filter(|id| *id != player_id)
        .filter(|id| {
            state
                .players
                .get(*id)
                .map(|player| !player.hand.is_empty())
                .unwrap_or(false)
        })
        .collect();
    let target = if holders.is_empty() {
        // Nothing to steal anywhere; the engine fizzles the effect.
        state
            .player_order
            .iter()
            .find(|id| *id != player_id)
            .cloned()
            .unwrap_or_default()
    } else if smart {
        // Biggest hand, earliest seat on ties.
        let mut best: Option<(&String, usize)> = None;
        for &id in &holders {
            let size = state
                .players
                .get(id.as_str())
                .map(|player| player.hand.len())
                .unwrap_or(0);
            if best.map(|(_, held)| size > held).unwrap_or(true) {
                best = Some((id, size));
            }
        }
        best.map(|(id, _)| id.clone()).unwrap_or_default()
    } else {
        let at = rng.gen_range(holders.len());
        holders[at].clone()
    };
    let hand_size = state
        .players
        .get(&target)
        .map(|player| player.hand.len())
        .unwrap_or(0);
    let index = if hand_size > 0 { rng.gen_range(hand_size) } else { 0 };
    EffectChoice::Steal { opponent: target, index }
}

/// Keep/discard decision for the two freshly drawn cards.
pub(crate) fn choose_drawn_card<F>(state: &GameState, player_id: &str, value_of: F) -> Action
where
    F: Fn(&Card, &[Card]) -> i64,
{
    let hand = state
        .players
        .get(player_id)
        .map(|player| player.hand.as_slice())
        .unwrap_or(&[]);
    let keep = state
        .pending_card_choice
        .as_ref()
        .map(|choice| {
            let first = value_of(&choice.cards[0], hand);
            let second = value_of(&choice.cards[1], hand);
            usize::from(second > first)
        })
        .unwrap_or(0);
    Action::ChooseCard {
        keep,
        discard_to: discard_side_for(state),
    }
}

/// Forced empty pile first, then the shorter pile to keep both alive.
pub(crate) fn discard_side_for(state: &GameState) -> DiscardSide {
    if let Some(forced) = state.forced_discard_side() {
        return forced;
    }
    if state.discard_right.len() < state.discard_left.len() {
        DiscardSide::Right
    } else {
        DiscardSide::Left
    }
}

/// Declaration kind under turn pressure: late in the round (or when a
/// last chance is already running) stop immediately.
pub(crate) fn declare_kind_for(state: &GameState, prefer_stop: bool) -> shorebreak_core::DeclareKind {
    use shorebreak_core::DeclareKind;
    if prefer_stop
        || state.turn_count > LATE_ROUND_TURNS
        || state.declare_mode == Some(DeclareKind::LastChance)
    {
        DeclareKind::Stop
    } else {
        DeclareKind::LastChance
    }
}

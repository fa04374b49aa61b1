use shorebreak_core::{
    collection_score, color_counts, count_kind, pairs, score, Card, CardKind, Color, GameState,
    PairEffect, PlayedPair,
};

/// Marginal worth of adding one more copy of a collection kind.
#[derive(Debug, Clone, Copy)]
pub struct CollectionEval {
    pub count: usize,
    pub current: i64,
    pub next: i64,
    pub marginal: i64,
    pub priority: i64,
}

pub fn collection_marginal(hand: &[Card], kind: CardKind) -> CollectionEval {
    let count = count_kind(hand, kind);
    let current = collection_score(kind, count);
    let next = collection_score(kind, count + 1);
    let priority = match kind {
        CardKind::Shell => {
            if count >= 1 {
                3
            } else {
                1
            }
        }
        CardKind::Octopus => {
            if count >= 1 {
                4
            } else {
                2
            }
        }
        CardKind::Penguin => 2,
        // One Sailor in hand makes the second worth five points.
        CardKind::Sailor => match count {
            1 => 5,
            0 => 1,
            _ => 0,
        },
        _ => 0,
    };
    CollectionEval {
        count,
        current,
        next,
        marginal: next - current,
        priority,
    }
}

/// Bonus a card unlocks against the rest of the hand: a multiplier
/// meeting its targets, or a target meeting its multiplier.
pub fn multiplier_synergy(hand: &[Card], card: &Card) -> i64 {
    let mut synergy = 0;
    if let Some((target, per_unit)) = card.kind.multiplier() {
        synergy += count_kind(hand, target) as i64 * per_unit;
    }
    for holder in CardKind::ALL {
        if let Some((target, per_unit)) = holder.multiplier() {
            if target == card.kind && count_kind(hand, holder) > 0 {
                synergy += per_unit;
            }
        }
    }
    synergy
}

pub fn pair_effect_weight(effect: PairEffect) -> i64 {
    match effect {
        PairEffect::DrawBlind => 2,
        PairEffect::DrawDiscard => 3,
        PairEffect::ExtraTurn => 4,
        PairEffect::StealCard => 3,
    }
}

pub fn can_pair_with(card: &Card, hand: &[Card]) -> Option<usize> {
    hand.iter()
        .position(|held| pairs::is_valid_pair(card, held))
}

/// Quick worth of a face-up discard against the current hand.
pub fn discard_value(card: &Card, hand: &[Card]) -> i64 {
    let mut value = card.value;
    if can_pair_with(card, hand).is_some() {
        value += 3;
    }
    if card.kind.is_collection() {
        value += collection_marginal(hand, card.kind).marginal;
    }
    value + multiplier_synergy(hand, card)
}

/// Deeper read used by the expert tier: effect-weighted pair bonus,
/// collection priority, Mermaid positional value.
pub fn discard_value_expert(card: &Card, hand: &[Card]) -> i64 {
    let mut value = card.value;
    if let Some(at) = can_pair_with(card, hand) {
        let effect = pairs::pair_effect(card, &hand[at]);
        value += match effect {
            Some(PairEffect::DrawBlind) => 4,
            Some(PairEffect::DrawDiscard) => 5,
            Some(PairEffect::ExtraTurn) => 6,
            Some(PairEffect::StealCard) => 5,
            None => 3,
        };
    }
    if card.kind.is_collection() {
        let eval = collection_marginal(hand, card.kind);
        value += eval.marginal.max(0);
        if eval.priority >= 4 {
            value += 1;
        }
    }
    value += multiplier_synergy(hand, card);
    if card.kind == CardKind::Mermaid {
        let held = count_kind(hand, CardKind::Mermaid);
        if held == 3 {
            // The fourth copy ends the match.
            value += 100;
        } else {
            let mut ranked: Vec<i64> = color_counts(hand)
                .into_iter()
                .map(|(_, count)| count as i64)
                .collect();
            ranked.sort_unstable_by(|a, b| b.cmp(a));
            value += ranked.get(held).copied().unwrap_or(0);
        }
    }
    value
}

/// Expected worth of a blind deck draw given what the hand is chasing.
pub fn deck_expected_value(hand: &[Card]) -> f64 {
    let mut expected = 3.0;
    for kind in [CardKind::Shell, CardKind::Octopus, CardKind::Penguin, CardKind::Sailor] {
        if collection_marginal(hand, kind).priority >= 3 {
            expected += 0.5;
        }
    }
    for (kind, bump) in [
        (CardKind::Lighthouse, 0.3),
        (CardKind::FishSchool, 0.3),
        (CardKind::PenguinColony, 0.2),
        (CardKind::Captain, 0.2),
    ] {
        if count_kind(hand, kind) > 0 {
            expected += bump;
        }
    }
    expected
}

/// Score delta from moving the cards at `first`/`second` out of the
/// hand into a played pair.
pub fn pair_net_gain(hand: &[Card], played: &[PlayedPair], first: usize, second: usize) -> i64 {
    let before = score(hand, played, false).total;
    let mut next_hand = hand.to_vec();
    let pair = [hand[first], hand[second]];
    let (hi, lo) = if first > second { (first, second) } else { (second, first) };
    next_hand.remove(hi);
    next_hand.remove(lo);
    let mut next_played = played.to_vec();
    next_played.push(PlayedPair { cards: pair, turn: 0 });
    score(&next_hand, &next_played, false).total - before
}

#[derive(Debug, Clone)]
pub struct PairPick {
    pub first: usize,
    pub second: usize,
    pub net_gain: i64,
    pub effect_weight: i64,
}

/// Best pair by net score gain plus effect weight, or None when the
/// best option is not worth playing.
pub fn best_pair(hand: &[Card], played: &[PlayedPair]) -> Option<PairPick> {
    let mut best: Option<PairPick> = None;
    for (first, second) in pairs::find_pairs(hand) {
        let effect_weight = pairs::pair_effect(&hand[first], &hand[second])
            .map(pair_effect_weight)
            .unwrap_or(0);
        let pick = PairPick {
            first,
            second,
            net_gain: pair_net_gain(hand, played, first, second),
            effect_weight,
        };
        let total = pick.net_gain + pick.effect_weight;
        if best
            .as_ref()
            .map(|held| total > held.net_gain + held.effect_weight)
            .unwrap_or(true)
        {
            best = Some(pick);
        }
    }
    best.filter(|pick| pick.net_gain + pick.effect_weight > 0 || pick.effect_weight >= 2)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OpponentSummary {
    pub max_score: i64,
    pub avg_score: f64,
    pub max_hand_size: usize,
}

/// Visible read on everyone else: estimated card scores and hand sizes.
pub fn opponent_summary(state: &GameState, player_id: &str) -> OpponentSummary {
    let mut scores = Vec::new();
    let mut max_hand_size = 0;
    for id in &state.player_order {
        if id == player_id {
            continue;
        }
        if let Some(opponent) = state.players.get(id) {
            scores.push(score(&opponent.hand, &opponent.played_pairs, false).total);
            max_hand_size = max_hand_size.max(opponent.hand.len());
        }
    }
    if scores.is_empty() {
        return OpponentSummary::default();
    }
    OpponentSummary {
        max_score: scores.iter().copied().max().unwrap_or(0),
        avg_score: scores.iter().sum::<i64>() as f64 / scores.len() as f64,
        max_hand_size,
    }
}

pub fn dominant_color(hand: &[Card]) -> Option<(Color, usize)> {
    color_counts(hand)
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(_, count)| *count)
}

use crate::{Card, CardKind, PairEffect};

/// Two cards of the same pairable kind, or the Shark/Swimmer cross
/// pair. Nothing else may be played as a pair.
pub fn is_valid_pair(first: &Card, second: &Card) -> bool {
    if is_cross_pair(first.kind, second.kind) {
        return true;
    }
    first.kind == second.kind && first.kind.pairs_with_self()
}

pub fn is_cross_pair(a: CardKind, b: CardKind) -> bool {
    matches!(
        (a, b),
        (CardKind::Shark, CardKind::Swimmer) | (CardKind::Swimmer, CardKind::Shark)
    )
}

/// Effect a validated pair triggers, if any.
pub fn pair_effect(first: &Card, second: &Card) -> Option<PairEffect> {
    if !is_valid_pair(first, second) {
        return None;
    }
    if is_cross_pair(first.kind, second.kind) {
        return Some(PairEffect::StealCard);
    }
    first.pair_effect
}

/// All index pairs in `hand` that form a legal pair.
pub fn find_pairs(hand: &[Card]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..hand.len() {
        for j in (i + 1)..hand.len() {
            if is_valid_pair(&hand[i], &hand[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

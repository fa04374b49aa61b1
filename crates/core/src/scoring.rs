use crate::{Card, CardKind, Color, PlayedPair};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionScores {
    pub shell: i64,
    pub octopus: i64,
    pub penguin: i64,
    pub sailor: i64,
}

impl CollectionScores {
    pub fn total(&self) -> i64 {
        self.shell + self.octopus + self.penguin + self.sailor
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MultiplierScores {
    pub lighthouse: i64,
    pub fish_school: i64,
    pub penguin_colony: i64,
    pub captain: i64,
}

impl MultiplierScores {
    pub fn total(&self) -> i64 {
        self.lighthouse + self.fish_school + self.penguin_colony + self.captain
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub base: i64,
    pub collections: CollectionScores,
    pub pair_bonus: i64,
    pub multipliers: MultiplierScores,
    /// Per-copy Mermaid scores, highest color rank first.
    pub mermaid_slots: Vec<i64>,
    pub mermaids: i64,
    pub color_bonus: i64,
    pub total: i64,
}

/// Collection curve for a single kind held `count` times.
pub fn collection_score(kind: CardKind, count: usize) -> i64 {
    let n = count as i64;
    match kind {
        CardKind::Shell if n > 0 => (n - 1) * 2,
        CardKind::Octopus if n > 0 => (n - 1) * 3,
        CardKind::Penguin if n > 0 => 2 * n - 1,
        CardKind::Sailor if n >= 2 => 5,
        _ => 0,
    }
}

pub fn count_kind(cards: &[Card], kind: CardKind) -> usize {
    cards.iter().filter(|card| card.kind == kind).count()
}

/// Ordinary-color tallies; the reserved Mermaid color never counts.
pub fn color_counts(cards: &[Card]) -> Vec<(Color, usize)> {
    Color::ORDINARY
        .iter()
        .map(|&color| {
            let count = cards.iter().filter(|card| card.color == color).count();
            (color, count)
        })
        .collect()
}

pub fn best_color_count(cards: &[Card]) -> i64 {
    color_counts(cards)
        .into_iter()
        .map(|(_, count)| count as i64)
        .max()
        .unwrap_or(0)
}

/// Completed pairs derivable from raw kind counts anywhere in
/// hand + played pairs: two-of-a-kind per pairable kind, plus the
/// Shark/Swimmer cross pair.
pub fn pair_bonus(all_cards: &[Card]) -> i64 {
    let mut bonus = 0i64;
    for kind in [CardKind::Fish, CardKind::Crab, CardKind::Sailboat] {
        bonus += (count_kind(all_cards, kind) / 2) as i64;
    }
    let sharks = count_kind(all_cards, CardKind::Shark);
    let swimmers = count_kind(all_cards, CardKind::Swimmer);
    bonus + sharks.min(swimmers) as i64
}

/// Score a player's position. Pure: identical inputs always produce
/// the identical breakdown. The color bonus is only added when the
/// caller's declare-resolution rules ask for it.
pub fn score(hand: &[Card], played_pairs: &[PlayedPair], include_color_bonus: bool) -> ScoreBreakdown {
    let mut all_cards = hand.to_vec();
    for pair in played_pairs {
        all_cards.extend_from_slice(&pair.cards);
    }

    // Card values count from the hand only; pair cards are already
    // represented in the pair bonus.
    let base: i64 = hand
        .iter()
        .filter(|card| !card.kind.is_collection())
        .map(|card| card.value)
        .sum();

    let collections = CollectionScores {
        shell: collection_score(CardKind::Shell, count_kind(hand, CardKind::Shell)),
        octopus: collection_score(CardKind::Octopus, count_kind(hand, CardKind::Octopus)),
        penguin: collection_score(CardKind::Penguin, count_kind(hand, CardKind::Penguin)),
        sailor: collection_score(CardKind::Sailor, count_kind(hand, CardKind::Sailor)),
    };

    let pair_bonus = pair_bonus(&all_cards);

    let mut multipliers = MultiplierScores::default();
    for kind in [
        CardKind::Lighthouse,
        CardKind::FishSchool,
        CardKind::PenguinColony,
        CardKind::Captain,
    ] {
        let Some((target, per_unit)) = kind.multiplier() else {
            continue;
        };
        if count_kind(&all_cards, kind) == 0 {
            continue;
        }
        let bonus = count_kind(&all_cards, target) as i64 * per_unit;
        match kind {
            CardKind::Lighthouse => multipliers.lighthouse = bonus,
            CardKind::FishSchool => multipliers.fish_school = bonus,
            CardKind::PenguinColony => multipliers.penguin_colony = bonus,
            _ => multipliers.captain = bonus,
        }
    }

    let mermaid_count = count_kind(&all_cards, CardKind::Mermaid);
    let mut ranked: Vec<i64> = color_counts(&all_cards)
        .into_iter()
        .map(|(_, count)| count as i64)
        .collect();
    ranked.sort_unstable_by(|a, b| b.cmp(a));
    let mermaid_slots: Vec<i64> = (0..mermaid_count)
        .map(|i| ranked.get(i).copied().unwrap_or(0))
        .collect();
    let mermaids: i64 = mermaid_slots.iter().sum();

    let color_bonus = if include_color_bonus {
        best_color_count(&all_cards)
    } else {
        0
    };

    let total =
        base + collections.total() + pair_bonus + multipliers.total() + mermaids + color_bonus;

    ScoreBreakdown {
        base,
        collections,
        pair_bonus,
        multipliers,
        mermaid_slots,
        mermaids,
        color_bonus,
        total,
    }
}

/// Declaration requires the card-only score to reach the threshold.
pub fn can_declare(breakdown: &ScoreBreakdown, threshold: i64) -> bool {
    breakdown.total >= threshold
}

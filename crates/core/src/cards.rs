use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Color {
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
    Black,
    White,
}

impl Color {
    /// Colors the pool deals to regular cards. White is reserved for
    /// the Mermaid and never counts toward color tallies.
    pub const ORDINARY: [Color; 6] = [
        Color::Blue,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Black,
    ];

    pub fn is_ordinary(self) -> bool {
        self != Color::White
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PairEffect {
    DrawBlind,
    DrawDiscard,
    ExtraTurn,
    StealCard,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardKind {
    Fish,
    Crab,
    Sailboat,
    Shark,
    Swimmer,
    Shell,
    Octopus,
    Penguin,
    Sailor,
    Lighthouse,
    FishSchool,
    PenguinColony,
    Captain,
    Mermaid,
}

impl CardKind {
    pub const ALL: [CardKind; 14] = [
        CardKind::Fish,
        CardKind::Crab,
        CardKind::Sailboat,
        CardKind::Shark,
        CardKind::Swimmer,
        CardKind::Shell,
        CardKind::Octopus,
        CardKind::Penguin,
        CardKind::Sailor,
        CardKind::Lighthouse,
        CardKind::FishSchool,
        CardKind::PenguinColony,
        CardKind::Captain,
        CardKind::Mermaid,
    ];

    /// Effect a pair of this kind triggers. Shark and Swimmer only
    /// pair with each other; the cross pair steals.
    pub fn pair_effect(self) -> Option<PairEffect> {
        match self {
            CardKind::Fish => Some(PairEffect::DrawBlind),
            CardKind::Crab => Some(PairEffect::DrawDiscard),
            CardKind::Sailboat => Some(PairEffect::ExtraTurn),
            CardKind::Shark | CardKind::Swimmer => Some(PairEffect::StealCard),
            _ => None,
        }
    }

    /// Kinds that may be matched two-of-a-kind.
    pub fn pairs_with_self(self) -> bool {
        matches!(self, CardKind::Fish | CardKind::Crab | CardKind::Sailboat)
    }

    pub fn is_collection(self) -> bool {
        matches!(
            self,
            CardKind::Shell | CardKind::Octopus | CardKind::Penguin | CardKind::Sailor
        )
    }

    pub fn is_multiplier(self) -> bool {
        self.multiplier().is_some()
    }

    /// Target kind and per-unit bonus this multiplier card unlocks.
    pub fn multiplier(self) -> Option<(CardKind, i64)> {
        match self {
            CardKind::Lighthouse => Some((CardKind::Sailboat, 1)),
            CardKind::FishSchool => Some((CardKind::Fish, 1)),
            CardKind::PenguinColony => Some((CardKind::Penguin, 2)),
            CardKind::Captain => Some((CardKind::Sailor, 3)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: u32,
    pub kind: CardKind,
    pub value: i64,
    pub color: Color,
    #[serde(default)]
    pub pair_effect: Option<PairEffect>,
}

impl Card {
    pub fn new(id: u32, kind: CardKind, value: i64, color: Color) -> Self {
        Self {
            id,
            kind,
            value,
            color,
            pair_effect: kind.pair_effect(),
        }
    }
}

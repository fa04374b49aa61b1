use crate::{CardKind, Color};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeckRule {
    pub kind: CardKind,
    pub count: u8,
    #[serde(default)]
    pub value: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColorWeight {
    pub color: Color,
    pub count: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetRule {
    pub players: u8,
    pub target: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub deck: Vec<DeckRule>,
    pub color_pool: Vec<ColorWeight>,
    pub targets: Vec<TargetRule>,
    pub declare_threshold: i64,
    /// Cap on pairs played in a single turn; guards runaway effect chains.
    pub pair_limit: u8,
    pub mermaid_win_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            deck: vec![
                DeckRule { kind: CardKind::Fish, count: 7, value: 0 },
                DeckRule { kind: CardKind::Crab, count: 9, value: 0 },
                DeckRule { kind: CardKind::Sailboat, count: 8, value: 0 },
                DeckRule { kind: CardKind::Shark, count: 5, value: 0 },
                DeckRule { kind: CardKind::Swimmer, count: 5, value: 0 },
                DeckRule { kind: CardKind::Shell, count: 6, value: 0 },
                DeckRule { kind: CardKind::Octopus, count: 5, value: 0 },
                DeckRule { kind: CardKind::Penguin, count: 3, value: 0 },
                DeckRule { kind: CardKind::Sailor, count: 2, value: 0 },
                DeckRule { kind: CardKind::Lighthouse, count: 1, value: 0 },
                DeckRule { kind: CardKind::FishSchool, count: 1, value: 0 },
                DeckRule { kind: CardKind::PenguinColony, count: 1, value: 0 },
                DeckRule { kind: CardKind::Captain, count: 1, value: 0 },
                DeckRule { kind: CardKind::Mermaid, count: 4, value: 0 },
            ],
            color_pool: vec![
                ColorWeight { color: Color::Blue, count: 10 },
                ColorWeight { color: Color::Red, count: 10 },
                ColorWeight { color: Color::Green, count: 10 },
                ColorWeight { color: Color::Yellow, count: 10 },
                ColorWeight { color: Color::Purple, count: 10 },
                ColorWeight { color: Color::Black, count: 8 },
            ],
            targets: vec![
                TargetRule { players: 2, target: 40 },
                TargetRule { players: 3, target: 35 },
                TargetRule { players: 4, target: 30 },
            ],
            declare_threshold: 7,
            pair_limit: 5,
            mermaid_win_count: 4,
        }
    }
}

impl GameConfig {
    pub fn target_for(&self, players: usize) -> i64 {
        self.targets
            .iter()
            .find(|rule| rule.players as usize == players)
            .map(|rule| rule.target)
            .unwrap_or(30)
    }

    pub fn total_cards(&self) -> usize {
        self.deck.iter().map(|rule| rule.count as usize).sum()
    }

    pub fn count_of(&self, kind: CardKind) -> usize {
        self.deck
            .iter()
            .filter(|rule| rule.kind == kind)
            .map(|rule| rule.count as usize)
            .sum()
    }
}

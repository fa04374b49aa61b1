use crate::{Card, CardKind, Color, GameConfig, RngState};
use serde::{Deserialize, Serialize};

/// Draw pile. Cards are consumed from the back; the two discard piles
/// live on `GameState` and flow back in through [`Deck::reshuffle`].
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Deck {
    pub draw: Vec<Card>,
}

impl Deck {
    /// Assemble a full deck from the config: fixed kind counts, random
    /// colors dealt from the shuffled pool, stable per-card ids.
    /// Mermaids skip the pool and keep the reserved color.
    pub fn build(config: &GameConfig, rng: &mut RngState) -> Self {
        let mut pool = color_pool(config, rng);
        let mut draw = Vec::with_capacity(config.total_cards());
        let mut next_id = 1u32;
        for rule in &config.deck {
            for _ in 0..rule.count {
                let color = if rule.kind == CardKind::Mermaid {
                    Color::White
                } else {
                    match pool.pop() {
                        Some(color) => color,
                        None => {
                            pool = color_pool(config, rng);
                            pool.pop().unwrap_or(Color::Blue)
                        }
                    }
                };
                draw.push(Card::new(next_id, rule.kind, rule.value, color));
                next_id = next_id.saturating_add(1);
            }
        }
        rng.shuffle(&mut draw);
        Self { draw }
    }

    pub fn len(&self) -> usize {
        self.draw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty()
    }

    pub fn draw_one(&mut self) -> Option<Card> {
        self.draw.pop()
    }

    /// Fold both discard piles back into the draw pile, keeping each
    /// pile's current top card in place. Returns how many cards came
    /// back; zero means a draw is impossible.
    pub fn reshuffle(
        &mut self,
        discard_left: &mut Vec<Card>,
        discard_right: &mut Vec<Card>,
        rng: &mut RngState,
    ) -> usize {
        let mut recovered = Vec::new();
        for pile in [discard_left, discard_right] {
            if pile.len() <= 1 {
                continue;
            }
            if let Some(top) = pile.pop() {
                recovered.append(pile);
                pile.push(top);
            }
        }
        let count = recovered.len();
        self.draw.append(&mut recovered);
        rng.shuffle(&mut self.draw);
        count
    }
}

fn color_pool(config: &GameConfig, rng: &mut RngState) -> Vec<Color> {
    let mut pool = Vec::new();
    for weight in &config.color_pool {
        for _ in 0..weight.count {
            pool.push(weight.color);
        }
    }
    rng.shuffle(&mut pool);
    pool
}

use super::{Game, GameError};
use crate::{
    scoring, Deck, DeclareKind, Event, EventBus, MatchEndReason, PlayerId, ScoreBreakdown,
    TurnPhase,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRoundScore {
    pub player: PlayerId,
    /// Total without color bonus; this is what "declarer has highest"
    /// compares.
    pub card_score: i64,
    pub color_bonus: i64,
    pub final_score: i64,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub mode: Option<DeclareKind>,
    pub declarer: Option<PlayerId>,
    pub declarer_has_highest: Option<bool>,
    /// One entry per player, in turn order.
    pub scores: Vec<PlayerRoundScore>,
    pub round_winner: Option<PlayerId>,
    pub match_over: bool,
}

impl Game {
    /// Settle the round once the state machine reaches `RoundEnd`:
    /// payouts per the declare mode, match-target check, and either
    /// the match result or a reset for the next round.
    pub fn resolve_round(&mut self, events: &mut EventBus) -> Result<RoundSummary, GameError> {
        self.expect_phase(TurnPhase::RoundEnd)?;

        // A four-Mermaid win already decided the match; no payouts.
        if self.state.is_game_over {
            return Ok(RoundSummary {
                round: self.state.round,
                mode: self.state.declare_mode,
                declarer: self.state.declaring_player_id.clone(),
                declarer_has_highest: None,
                scores: Vec::new(),
                round_winner: self.state.winner.clone(),
                match_over: true,
            });
        }

        let mut scores = self.round_scores()?;
        let declarer = self.state.declaring_player_id.clone();
        let mode = self.state.declare_mode;
        let declarer_has_highest = match (mode, declarer.as_deref()) {
            (Some(DeclareKind::LastChance), Some(declarer_id)) => {
                Some(self.apply_last_chance_rule(&mut scores, declarer_id))
            }
            // Stop (and the defensive no-declaration case): card
            // scores stand, nobody collects a color bonus.
            _ => {
                for entry in &mut scores {
                    entry.final_score = entry.card_score;
                }
                None
            }
        };

        let round_winner = highest_by(&scores, |entry| entry.final_score);
        for entry in &scores {
            *self
                .state
                .total_scores
                .entry(entry.player.clone())
                .or_insert(0) += entry.final_score;
        }
        events.push(Event::RoundEnded {
            round: self.state.round,
            winner: round_winner.clone(),
        });

        let target = self.config.target_for(self.state.player_count());
        let target_reached = self
            .state
            .player_order
            .iter()
            .any(|id| self.state.total_scores.get(id).copied().unwrap_or(0) >= target);

        let match_over = if target_reached {
            self.state.is_game_over = true;
            // Earliest seat wins total-score ties.
            let best = self
                .state
                .player_order
                .iter()
                .map(|id| self.state.total_scores.get(id).copied().unwrap_or(0))
                .max()
                .unwrap_or(0);
            self.state.winner = self
                .state
                .player_order
                .iter()
                .find(|id| self.state.total_scores.get(*id).copied().unwrap_or(0) == best)
                .cloned();
            events.push(Event::MatchEnded {
                winner: self.state.winner.clone(),
                reason: MatchEndReason::TargetReached,
            });
            true
        } else {
            self.start_next_round(events);
            false
        };

        Ok(RoundSummary {
            round: if match_over {
                self.state.round
            } else {
                self.state.round - 1
            },
            mode,
            declarer,
            declarer_has_highest,
            scores,
            round_winner,
            match_over,
        })
    }

    fn round_scores(&self) -> Result<Vec<PlayerRoundScore>, GameError> {
        let mut scores = Vec::with_capacity(self.state.player_count());
        for id in &self.state.player_order {
            let player = self.player(id)?;
            let breakdown = scoring::score(&player.hand, &player.played_pairs, false);
            let color_bonus =
                scoring::score(&player.hand, &player.played_pairs, true).color_bonus;
            scores.push(PlayerRoundScore {
                player: id.clone(),
                card_score: breakdown.total,
                color_bonus,
                final_score: 0,
                breakdown,
            });
        }
        Ok(scores)
    }

    /// Last-chance payout: if the declarer still holds the highest
    /// card score (ties count for the declarer), they take card score
    /// plus color bonus and everyone else only their color bonus;
    /// otherwise the sides swap.
    fn apply_last_chance_rule(&self, scores: &mut [PlayerRoundScore], declarer_id: &str) -> bool {
        let highest = scores.iter().map(|entry| entry.card_score).max().unwrap_or(0);
        let declarer_score = scores
            .iter()
            .find(|entry| entry.player == declarer_id)
            .map(|entry| entry.card_score)
            .unwrap_or(0);
        let declarer_has_highest = declarer_score >= highest;
        for entry in scores.iter_mut() {
            let is_declarer = entry.player == declarer_id;
            let wins_cards = declarer_has_highest == is_declarer;
            entry.final_score = if wins_cards {
                entry.card_score + entry.color_bonus
            } else {
                entry.color_bonus
            };
        }
        declarer_has_highest
    }

    fn start_next_round(&mut self, events: &mut EventBus) {
        self.state.round += 1;
        self.state.deck = Deck::build(&self.config, &mut self.rng);
        for id in self.state.player_order.clone() {
            if let Some(player) = self.state.players.get_mut(&id) {
                player.hand.clear();
                player.played_pairs.clear();
            }
        }
        self.state.discard_left = self.state.deck.draw_one().into_iter().collect();
        self.state.discard_right = self.state.deck.draw_one().into_iter().collect();

        // Starting seat rotates counter-clockwise each round.
        let players = self.state.player_count();
        self.state.starting_player_index = (self.state.starting_player_index + players - 1) % players;
        self.state.current_player_index = self.state.starting_player_index;
        self.state.current_player_id =
            self.state.player_order[self.state.current_player_index].clone();

        self.state.turn_phase = TurnPhase::Draw;
        self.state.turn_count = 0;
        self.state.declare_mode = None;
        self.state.declaring_player_id = None;
        self.state.remaining_turns = None;
        self.state.pending_effect = None;
        self.state.pending_card_choice = None;
        self.state.extra_turn = false;
        self.state.pairs_played_this_turn = 0;

        events.push(Event::RoundStarted {
            round: self.state.round,
            starting_player: self.state.current_player_id.clone(),
            deck_size: self.state.deck.len(),
        });
    }
}

fn highest_by<F: Fn(&PlayerRoundScore) -> i64>(
    scores: &[PlayerRoundScore],
    key: F,
) -> Option<PlayerId> {
    let best = scores.iter().map(&key).max()?;
    scores
        .iter()
        .find(|entry| key(entry) == best)
        .map(|entry| entry.player.clone())
}

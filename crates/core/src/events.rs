use crate::{CardKind, DeclareKind, DiscardSide, PairEffect, PlayerId, TurnPhase};
use serde::{Deserialize, Serialize};

/// Append-only action records for presentation. Write-only from the
/// engine's perspective; never read back into logic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    RoundStarted {
        round: u32,
        starting_player: PlayerId,
        deck_size: usize,
    },
    CardsDrawn {
        player: PlayerId,
        count: usize,
    },
    CardKept {
        player: PlayerId,
        kept: CardKind,
        discarded: CardKind,
        side: DiscardSide,
    },
    DiscardTaken {
        player: PlayerId,
        side: DiscardSide,
        kind: CardKind,
    },
    DeckReshuffled {
        recovered: usize,
    },
    PairPlayed {
        player: PlayerId,
        kinds: [CardKind; 2],
        effect: Option<PairEffect>,
    },
    BlindDraw {
        player: PlayerId,
        drew: Option<CardKind>,
    },
    DiscardPicked {
        player: PlayerId,
        side: DiscardSide,
        kind: CardKind,
    },
    ExtraTurnArmed {
        player: PlayerId,
    },
    CardStolen {
        player: PlayerId,
        from: PlayerId,
        kind: Option<CardKind>,
    },
    ExtraTurnStarted {
        player: PlayerId,
    },
    TurnEnded {
        player: PlayerId,
        next: PlayerId,
        phase: TurnPhase,
    },
    Declared {
        player: PlayerId,
        mode: DeclareKind,
        score: i64,
    },
    DeclareConfirmed {
        player: PlayerId,
        mode: DeclareKind,
    },
    RoundEnded {
        round: u32,
        winner: Option<PlayerId>,
    },
    MatchEnded {
        winner: Option<PlayerId>,
        reason: MatchEndReason,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchEndReason {
    TargetReached,
    FourMermaids,
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}

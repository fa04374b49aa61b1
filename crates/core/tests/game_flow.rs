use shorebreak_core::{
    Action, ApplyOutcome, Card, CardKind, Color, DeclareKind, DiscardSide, DrawSource, EffectChoice,
    Event, EventBus, Game, GameConfig, GameError, MatchEndReason, PairEffect, TurnPhase,
};

fn new_game(seed: u64) -> Game {
    let mut events = EventBus::default();
    let players = vec!["p1".to_string(), "p2".to_string()];
    Game::new(GameConfig::default(), &players, seed, &mut events).expect("game setup")
}

fn set_current(game: &mut Game, id: &str) {
    let index = game
        .state
        .player_order
        .iter()
        .position(|player| player == id)
        .expect("known player");
    game.state.current_player_index = index;
    game.state.current_player_id = id.to_string();
}

fn give_hand(game: &mut Game, id: &str, cards: Vec<Card>) {
    game.state.players.get_mut(id).expect("known player").hand = cards;
}

fn card(id: u32, kind: CardKind, color: Color) -> Card {
    Card::new(id, kind, 0, color)
}

fn apply(game: &mut Game, actor: &str, action: Action) -> Result<Vec<Event>, GameError> {
    let mut events = EventBus::default();
    game.apply(actor, action, &mut events)?;
    Ok(events.drain().collect())
}

/// Six Shells, three blue / two red / one green: card score 10,
/// color bonus 3.
fn ten_point_hand(base_id: u32) -> Vec<Card> {
    vec![
        card(base_id, CardKind::Shell, Color::Blue),
        card(base_id + 1, CardKind::Shell, Color::Blue),
        card(base_id + 2, CardKind::Shell, Color::Blue),
        card(base_id + 3, CardKind::Shell, Color::Red),
        card(base_id + 4, CardKind::Shell, Color::Red),
        card(base_id + 5, CardKind::Shell, Color::Green),
    ]
}

/// Five Shells, two blue / two red / one green: card score 8,
/// color bonus 2.
fn eight_point_hand(base_id: u32) -> Vec<Card> {
    vec![
        card(base_id, CardKind::Shell, Color::Blue),
        card(base_id + 1, CardKind::Shell, Color::Blue),
        card(base_id + 2, CardKind::Shell, Color::Red),
        card(base_id + 3, CardKind::Shell, Color::Red),
        card(base_id + 4, CardKind::Shell, Color::Green),
    ]
}

#[test]
fn setup_invariants() {
    let game = new_game(1);
    assert_eq!(game.state.card_census(), game.config.total_cards());
    assert_eq!(game.state.discard_left.len(), 1);
    assert_eq!(game.state.discard_right.len(), 1);
    assert_eq!(game.state.turn_phase, TurnPhase::Draw);
    assert!(game.state.total_scores.values().all(|total| *total == 0));
}

#[test]
fn draw_two_then_choose_one() {
    let mut game = new_game(2);
    let actor = game.state.current_player_id.clone();
    let total = game.config.total_cards();

    apply(&mut game, &actor, Action::Draw { source: DrawSource::Deck }).expect("draw");
    assert_eq!(game.state.turn_phase, TurnPhase::ChoosingCard);
    assert!(game.state.pending_card_choice.is_some());
    assert_eq!(game.state.card_census(), total);

    let right_before = game.state.discard_right.len();
    apply(
        &mut game,
        &actor,
        Action::ChooseCard { keep: 0, discard_to: DiscardSide::Right },
    )
    .expect("choose");
    assert_eq!(game.state.turn_phase, TurnPhase::Pair);
    assert!(game.state.pending_card_choice.is_none());
    assert_eq!(game.state.players[&actor].hand.len(), 1);
    assert_eq!(game.state.discard_right.len(), right_before + 1);
    assert_eq!(game.state.card_census(), total);
}

#[test]
fn empty_pile_forces_the_discard() {
    let mut game = new_game(3);
    let actor = game.state.current_player_id.clone();
    game.state.discard_left.clear();

    apply(&mut game, &actor, Action::Draw { source: DrawSource::Deck }).expect("draw");
    let err = apply(
        &mut game,
        &actor,
        Action::ChooseCard { keep: 0, discard_to: DiscardSide::Right },
    )
    .expect_err("forced pile");
    assert_eq!(err, GameError::MustDiscardToEmptyPile);

    apply(
        &mut game,
        &actor,
        Action::ChooseCard { keep: 0, discard_to: DiscardSide::Left },
    )
    .expect("forced discard accepted");
    assert_eq!(game.state.discard_left.len(), 1);
}

#[test]
fn taking_a_discard_skips_the_choice() {
    let mut game = new_game(4);
    let actor = game.state.current_player_id.clone();
    let top = *game.state.discard_left.last().expect("seeded pile");

    apply(&mut game, &actor, Action::Draw { source: DrawSource::DiscardLeft }).expect("take");
    assert_eq!(game.state.turn_phase, TurnPhase::Pair);
    assert_eq!(game.state.players[&actor].hand, vec![top]);
    assert!(game.state.discard_left.is_empty());
}

#[test]
fn invalid_pair_rejected_without_mutation() {
    let mut game = new_game(5);
    set_current(&mut game, "p1");
    give_hand(
        &mut game,
        "p1",
        vec![card(100, CardKind::Fish, Color::Blue), card(101, CardKind::Shell, Color::Red)],
    );
    game.state.turn_phase = TurnPhase::Pair;

    let err = apply(&mut game, "p1", Action::PlayPair { first: 100, second: 101 })
        .expect_err("not a pair");
    assert_eq!(err, GameError::InvalidPair);
    assert_eq!(game.state.players["p1"].hand.len(), 2);
    assert!(game.state.players["p1"].played_pairs.is_empty());
    assert!(game.state.pending_effect.is_none());
}

#[test]
fn fish_pair_blocks_turn_until_blind_draw_resolves() {
    let mut game = new_game(6);
    set_current(&mut game, "p1");
    give_hand(
        &mut game,
        "p1",
        vec![card(100, CardKind::Fish, Color::Blue), card(101, CardKind::Fish, Color::Red)],
    );
    game.state.turn_phase = TurnPhase::Pair;

    apply(&mut game, "p1", Action::PlayPair { first: 100, second: 101 }).expect("pair");
    let pending = game.state.pending_effect.clone().expect("effect pending");
    assert_eq!(pending.effect, PairEffect::DrawBlind);

    let err = apply(&mut game, "p1", Action::EndTurn).expect_err("effect unresolved");
    assert_eq!(err, GameError::EffectPending);

    apply(
        &mut game,
        "p1",
        Action::ResolveEffect { choice: EffectChoice::DrawBlind },
    )
    .expect("resolve");
    assert!(game.state.pending_effect.is_none());
    assert_eq!(game.state.players["p1"].hand.len(), 1);
    assert_eq!(game.state.players["p1"].played_pairs.len(), 1);
}

#[test]
fn sailboat_pair_repeats_the_turn() {
    let mut game = new_game(7);
    set_current(&mut game, "p1");
    give_hand(
        &mut game,
        "p1",
        vec![
            card(100, CardKind::Sailboat, Color::Blue),
            card(101, CardKind::Sailboat, Color::Red),
        ],
    );
    game.state.turn_phase = TurnPhase::Pair;
    let turn_count = game.state.turn_count;

    apply(&mut game, "p1", Action::PlayPair { first: 100, second: 101 }).expect("pair");
    apply(
        &mut game,
        "p1",
        Action::ResolveEffect { choice: EffectChoice::ExtraTurn },
    )
    .expect("resolve");
    assert!(game.state.extra_turn);

    apply(&mut game, "p1", Action::EndTurn).expect("end turn");
    assert_eq!(game.state.current_player_id, "p1");
    assert_eq!(game.state.turn_phase, TurnPhase::Draw);
    assert_eq!(game.state.turn_count, turn_count);
    assert!(!game.state.extra_turn);
}

#[test]
fn steal_moves_a_blind_card() {
    let mut game = new_game(8);
    set_current(&mut game, "p1");
    give_hand(
        &mut game,
        "p1",
        vec![card(100, CardKind::Shark, Color::Blue), card(101, CardKind::Swimmer, Color::Red)],
    );
    give_hand(&mut game, "p2", vec![card(200, CardKind::Penguin, Color::Black)]);
    game.state.turn_phase = TurnPhase::Pair;

    apply(&mut game, "p1", Action::PlayPair { first: 100, second: 101 }).expect("pair");
    let events = apply(
        &mut game,
        "p1",
        Action::ResolveEffect {
            choice: EffectChoice::Steal { opponent: "p2".to_string(), index: 0 },
        },
    )
    .expect("steal");

    assert!(game.state.players["p2"].hand.is_empty());
    assert_eq!(game.state.players["p1"].hand.len(), 1);
    assert!(events.iter().any(|event| matches!(
        event,
        Event::CardStolen { kind: Some(CardKind::Penguin), .. }
    )));
}

#[test]
fn steal_fizzles_when_nothing_to_take() {
    let mut game = new_game(9);
    set_current(&mut game, "p1");
    give_hand(
        &mut game,
        "p1",
        vec![card(100, CardKind::Shark, Color::Blue), card(101, CardKind::Swimmer, Color::Red)],
    );
    give_hand(&mut game, "p2", Vec::new());
    game.state.turn_phase = TurnPhase::Pair;

    apply(&mut game, "p1", Action::PlayPair { first: 100, second: 101 }).expect("pair");
    apply(
        &mut game,
        "p1",
        Action::ResolveEffect {
            choice: EffectChoice::Steal { opponent: "p2".to_string(), index: 0 },
        },
    )
    .expect("fizzle");
    assert!(game.state.pending_effect.is_none());
    assert!(game.state.players["p1"].hand.is_empty());
}

#[test]
fn crab_pair_takes_a_pile_top() {
    let mut game = new_game(10);
    set_current(&mut game, "p1");
    give_hand(
        &mut game,
        "p1",
        vec![card(100, CardKind::Crab, Color::Blue), card(101, CardKind::Crab, Color::Red)],
    );
    game.state.turn_phase = TurnPhase::Pair;
    let top = *game.state.discard_right.last().expect("seeded pile");

    apply(&mut game, "p1", Action::PlayPair { first: 100, second: 101 }).expect("pair");
    apply(
        &mut game,
        "p1",
        Action::ResolveEffect {
            choice: EffectChoice::TakeDiscard { side: DiscardSide::Right },
        },
    )
    .expect("take");
    assert_eq!(game.state.players["p1"].hand, vec![top]);
    assert!(game.state.discard_right.is_empty());
}

#[test]
fn declare_below_threshold_rejected() {
    let mut game = new_game(11);
    set_current(&mut game, "p1");
    give_hand(&mut game, "p1", vec![card(100, CardKind::Shell, Color::Blue)]);
    game.state.turn_phase = TurnPhase::Declare;

    let err = apply(&mut game, "p1", Action::Declare { mode: DeclareKind::Stop })
        .expect_err("too low");
    assert_eq!(err, GameError::ScoreTooLow);
}

#[test]
fn ending_turn_below_threshold_skips_declare() {
    let mut game = new_game(12);
    set_current(&mut game, "p1");
    give_hand(&mut game, "p1", Vec::new());
    game.state.turn_phase = TurnPhase::Pair;

    apply(&mut game, "p1", Action::EndTurn).expect("end turn");
    assert_eq!(game.state.current_player_id, "p2");
    assert_eq!(game.state.turn_phase, TurnPhase::Draw);
    assert_eq!(game.state.turn_count, 1);
}

#[test]
fn ending_turn_at_threshold_offers_declare() {
    let mut game = new_game(13);
    set_current(&mut game, "p1");
    give_hand(&mut game, "p1", ten_point_hand(100));
    game.state.turn_phase = TurnPhase::Pair;

    apply(&mut game, "p1", Action::EndTurn).expect("enter declare");
    assert_eq!(game.state.turn_phase, TurnPhase::Declare);
    assert_eq!(game.state.current_player_id, "p1");

    apply(&mut game, "p1", Action::EndTurn).expect("decline");
    assert_eq!(game.state.current_player_id, "p2");
    assert_eq!(game.state.turn_phase, TurnPhase::Draw);
}

#[test]
fn stop_declaration_settles_card_scores_only() {
    let mut game = new_game(14);
    set_current(&mut game, "p1");
    give_hand(&mut game, "p1", ten_point_hand(100));
    give_hand(&mut game, "p2", eight_point_hand(200));
    game.state.turn_phase = TurnPhase::Declare;
    let starting_before = game.state.starting_player_index;

    let events = apply(&mut game, "p1", Action::Declare { mode: DeclareKind::Stop }).expect("stop");
    assert_eq!(game.state.turn_phase, TurnPhase::DeclareShowing);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::Declared { score: 10, .. })));

    apply(&mut game, "p1", Action::ConfirmDeclare).expect("confirm");
    assert_eq!(game.state.turn_phase, TurnPhase::RoundEnd);

    let mut events = EventBus::default();
    let summary = game.resolve_round(&mut events).expect("resolve");
    assert_eq!(summary.mode, Some(DeclareKind::Stop));
    assert_eq!(summary.round, 1);
    assert!(!summary.match_over);
    assert_eq!(summary.round_winner.as_deref(), Some("p1"));
    let finals: Vec<i64> = summary.scores.iter().map(|entry| entry.final_score).collect();
    assert_eq!(finals, vec![10, 8]);
    assert_eq!(game.state.total_scores["p1"], 10);
    assert_eq!(game.state.total_scores["p2"], 8);

    // Fresh round: rotated starting seat, cleared table, full census.
    assert_eq!(game.state.round, 2);
    assert_eq!(game.state.turn_count, 0);
    assert_eq!(game.state.starting_player_index, (starting_before + 1) % 2);
    assert_eq!(game.state.current_player_index, game.state.starting_player_index);
    assert!(game.state.players.values().all(|player| player.hand.is_empty()));
    assert_eq!(game.state.card_census(), game.config.total_cards());
}

#[test]
fn last_chance_payout_follows_the_highest_rule() {
    let mut game = new_game(15);
    give_hand(&mut game, "p1", ten_point_hand(100));
    give_hand(&mut game, "p2", eight_point_hand(200));
    game.state.declare_mode = Some(DeclareKind::LastChance);
    game.state.declaring_player_id = Some("p1".to_string());
    game.state.remaining_turns = Some(0);
    game.state.turn_phase = TurnPhase::RoundEnd;

    let mut events = EventBus::default();
    let summary = game.resolve_round(&mut events).expect("resolve");
    assert_eq!(summary.declarer_has_highest, Some(true));
    let p1 = summary.scores.iter().find(|entry| entry.player == "p1").unwrap();
    let p2 = summary.scores.iter().find(|entry| entry.player == "p2").unwrap();
    assert_eq!((p1.card_score, p1.color_bonus, p1.final_score), (10, 3, 13));
    assert_eq!((p2.card_score, p2.color_bonus, p2.final_score), (8, 2, 2));
}

#[test]
fn last_chance_payout_swaps_when_declarer_overtaken() {
    let mut game = new_game(16);
    give_hand(&mut game, "p1", eight_point_hand(100));
    give_hand(&mut game, "p2", ten_point_hand(200));
    game.state.declare_mode = Some(DeclareKind::LastChance);
    game.state.declaring_player_id = Some("p1".to_string());
    game.state.remaining_turns = Some(0);
    game.state.turn_phase = TurnPhase::RoundEnd;

    let mut events = EventBus::default();
    let summary = game.resolve_round(&mut events).expect("resolve");
    assert_eq!(summary.declarer_has_highest, Some(false));
    let p1 = summary.scores.iter().find(|entry| entry.player == "p1").unwrap();
    let p2 = summary.scores.iter().find(|entry| entry.player == "p2").unwrap();
    assert_eq!(p1.final_score, p1.color_bonus);
    assert_eq!(p2.final_score, p2.card_score + p2.color_bonus);
}

#[test]
fn last_chance_countdown_ends_the_round() {
    let mut game = new_game(17);
    set_current(&mut game, "p1");
    give_hand(&mut game, "p1", ten_point_hand(100));
    give_hand(&mut game, "p2", Vec::new());
    game.state.turn_phase = TurnPhase::Declare;

    apply(&mut game, "p1", Action::Declare { mode: DeclareKind::LastChance }).expect("declare");
    assert_eq!(game.state.remaining_turns, Some(1));
    apply(&mut game, "p1", Action::ConfirmDeclare).expect("confirm");
    assert_eq!(game.state.current_player_id, "p2");
    assert_eq!(game.state.turn_phase, TurnPhase::Draw);

    apply(&mut game, "p2", Action::Draw { source: DrawSource::Deck }).expect("draw");
    apply(
        &mut game,
        "p2",
        Action::ChooseCard { keep: 0, discard_to: DiscardSide::Left },
    )
    .expect("choose");
    apply(&mut game, "p2", Action::EndTurn).expect("final turn");
    assert_eq!(game.state.remaining_turns, Some(0));
    assert_eq!(game.state.turn_phase, TurnPhase::RoundEnd);
}

#[test]
fn stop_overrides_an_active_last_chance() {
    let mut game = new_game(18);
    set_current(&mut game, "p2");
    give_hand(&mut game, "p2", ten_point_hand(200));
    game.state.declare_mode = Some(DeclareKind::LastChance);
    game.state.declaring_player_id = Some("p1".to_string());
    game.state.remaining_turns = Some(1);
    game.state.turn_phase = TurnPhase::Declare;

    let err = apply(&mut game, "p2", Action::Declare { mode: DeclareKind::LastChance })
        .expect_err("no second last chance");
    assert_eq!(err, GameError::AlreadyDeclared);

    apply(&mut game, "p2", Action::Declare { mode: DeclareKind::Stop }).expect("stop override");
    assert_eq!(game.state.declare_mode, Some(DeclareKind::Stop));
    assert_eq!(game.state.declaring_player_id.as_deref(), Some("p2"));
}

#[test]
fn stale_token_application_is_a_noop() {
    let mut game = new_game(19);
    let actor = game.state.current_player_id.clone();
    let token = game.state.token();

    apply(&mut game, &actor, Action::Draw { source: DrawSource::Deck }).expect("draw");
    let phase_after = game.state.turn_phase;

    let mut events = EventBus::default();
    let outcome = game
        .apply_with_token(&token, &actor, Action::EndTurn, &mut events)
        .expect("stale apply");
    assert_eq!(outcome, ApplyOutcome::Stale);
    assert_eq!(game.state.turn_phase, phase_after);
}

#[test]
fn fourth_mermaid_wins_on_the_spot() {
    let mut game = new_game(20);
    set_current(&mut game, "p1");
    give_hand(
        &mut game,
        "p1",
        vec![
            card(100, CardKind::Mermaid, Color::White),
            card(101, CardKind::Mermaid, Color::White),
            card(102, CardKind::Mermaid, Color::White),
        ],
    );
    game.state
        .discard_right
        .push(card(103, CardKind::Mermaid, Color::White));

    let events = apply(&mut game, "p1", Action::Draw { source: DrawSource::DiscardRight })
        .expect("take fourth");
    assert!(game.state.is_game_over);
    assert_eq!(game.state.winner.as_deref(), Some("p1"));
    assert!(events.iter().any(|event| matches!(
        event,
        Event::MatchEnded { reason: MatchEndReason::FourMermaids, .. }
    )));
}

#[test]
fn empty_deck_reshuffles_and_keeps_census() {
    let mut game = new_game(21);
    let actor = game.state.current_player_id.clone();
    let total = game.config.total_cards();

    // Shift the whole draw pile onto the left discard.
    let drained: Vec<_> = std::mem::take(&mut game.state.deck.draw);
    game.state.discard_left.extend(drained);
    assert_eq!(game.state.card_census(), total);

    let events = apply(&mut game, &actor, Action::Draw { source: DrawSource::Deck }).expect("draw");
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::DeckReshuffled { .. })));
    assert_eq!(game.state.turn_phase, TurnPhase::ChoosingCard);
    assert_eq!(game.state.discard_left.len(), 1);
    assert_eq!(game.state.card_census(), total);
}

#[test]
fn draw_fails_when_nothing_can_reshuffle() {
    let mut game = new_game(22);
    let actor = game.state.current_player_id.clone();

    // Park the draw pile in a hand so only the two pile tops remain.
    let drained: Vec<_> = std::mem::take(&mut game.state.deck.draw);
    game.state.players.get_mut(&actor).unwrap().hand = drained;

    let err = apply(&mut game, &actor, Action::Draw { source: DrawSource::Deck })
        .expect_err("dead deck");
    assert_eq!(err, GameError::InsufficientDeck);
    assert_eq!(game.state.turn_phase, TurnPhase::Draw);
}

#[test]
fn match_ends_exactly_at_target() {
    let mut game = new_game(23);
    give_hand(&mut game, "p1", ten_point_hand(100));
    give_hand(&mut game, "p2", Vec::new());
    game.state.total_scores.insert("p1".to_string(), 29);
    game.state.declare_mode = Some(DeclareKind::Stop);
    game.state.declaring_player_id = Some("p1".to_string());
    game.state.turn_phase = TurnPhase::RoundEnd;

    // 29 + 10 = 39 < 40: the match continues.
    let mut events = EventBus::default();
    let summary = game.resolve_round(&mut events).expect("resolve");
    assert!(!summary.match_over);
    assert!(!game.state.is_game_over);
    assert_eq!(game.state.total_scores["p1"], 39);

    give_hand(&mut game, "p1", ten_point_hand(300));
    game.state.declare_mode = Some(DeclareKind::Stop);
    game.state.declaring_player_id = Some("p1".to_string());
    game.state.turn_phase = TurnPhase::RoundEnd;

    // 39 + 10 = 49 >= 40: the match ends this round.
    let mut events = EventBus::default();
    let summary = game.resolve_round(&mut events).expect("resolve");
    assert!(summary.match_over);
    assert!(game.state.is_game_over);
    assert_eq!(game.state.winner.as_deref(), Some("p1"));
}

#[test]
fn wrong_phase_and_actor_rejections() {
    let mut game = new_game(24);
    set_current(&mut game, "p1");

    let err = apply(&mut game, "p1", Action::PlayPair { first: 1, second: 2 })
        .expect_err("pair in draw phase");
    assert!(matches!(err, GameError::WrongPhase { .. }));

    let err = apply(&mut game, "p2", Action::Draw { source: DrawSource::Deck })
        .expect_err("out of turn");
    assert_eq!(err, GameError::NotYourTurn("p2".to_string()));

    let err = apply(&mut game, "ghost", Action::EndTurn).expect_err("unknown player");
    assert_eq!(err, GameError::UnknownPlayer("ghost".to_string()));
}

#[test]
fn pair_limit_caps_effect_chains() {
    let mut game = new_game(25);
    set_current(&mut game, "p1");
    give_hand(
        &mut game,
        "p1",
        vec![card(100, CardKind::Fish, Color::Blue), card(101, CardKind::Fish, Color::Red)],
    );
    game.state.turn_phase = TurnPhase::Pair;
    game.state.pairs_played_this_turn = game.config.pair_limit;

    let err = apply(&mut game, "p1", Action::PlayPair { first: 100, second: 101 })
        .expect_err("limit reached");
    assert_eq!(err, GameError::PairLimitReached);
}

use shorebreak_core::{
    can_declare, collection_score, score, Card, CardKind, Color, PlayedPair,
};

fn card(id: u32, kind: CardKind, color: Color) -> Card {
    Card::new(id, kind, 0, color)
}

fn played(id: u32, kind: CardKind) -> PlayedPair {
    PlayedPair {
        cards: [card(id, kind, Color::Blue), card(id + 1, kind, Color::Red)],
        turn: 0,
    }
}

macro_rules! curve_case {
    ($name:ident, $kind:expr, $count:expr, $expected:expr) => {
        #[test]
        fn $name() {
            assert_eq!(collection_score($kind, $count), $expected);
        }
    };
}

curve_case!(shell_curve_0, CardKind::Shell, 0, 0);
curve_case!(shell_curve_1, CardKind::Shell, 1, 0);
curve_case!(shell_curve_2, CardKind::Shell, 2, 2);
curve_case!(shell_curve_3, CardKind::Shell, 3, 4);
curve_case!(octopus_curve_1, CardKind::Octopus, 1, 0);
curve_case!(octopus_curve_2, CardKind::Octopus, 2, 3);
curve_case!(octopus_curve_4, CardKind::Octopus, 4, 9);
curve_case!(penguin_curve_1, CardKind::Penguin, 1, 1);
curve_case!(penguin_curve_2, CardKind::Penguin, 2, 3);
curve_case!(penguin_curve_3, CardKind::Penguin, 3, 5);
curve_case!(sailor_curve_1, CardKind::Sailor, 1, 0);
curve_case!(sailor_curve_2, CardKind::Sailor, 2, 5);
curve_case!(sailor_curve_3, CardKind::Sailor, 3, 5);

#[test]
fn scoring_is_deterministic() {
    let hand = vec![
        card(1, CardKind::Shell, Color::Blue),
        card(2, CardKind::Shell, Color::Red),
        card(3, CardKind::Fish, Color::Blue),
    ];
    let pairs = vec![played(10, CardKind::Fish)];
    assert_eq!(score(&hand, &pairs, true), score(&hand, &pairs, true));
}

#[test]
fn empty_inputs_score_zero() {
    let breakdown = score(&[], &[], true);
    assert_eq!(breakdown.total, 0);
    assert_eq!(breakdown.color_bonus, 0);
    assert!(breakdown.mermaid_slots.is_empty());
}

#[test]
fn pair_bonus_from_raw_counts() {
    // Four Fish anywhere make two pairs; one Shark plus one Swimmer
    // make a third.
    let hand = vec![
        card(1, CardKind::Fish, Color::Blue),
        card(2, CardKind::Fish, Color::Red),
        card(3, CardKind::Shark, Color::Green),
        card(4, CardKind::Swimmer, Color::Yellow),
    ];
    let pairs = vec![played(10, CardKind::Fish)];
    let breakdown = score(&hand, &pairs, false);
    assert_eq!(breakdown.pair_bonus, 3);
}

#[test]
fn odd_pairable_card_does_not_count() {
    let hand = vec![
        card(1, CardKind::Crab, Color::Blue),
        card(2, CardKind::Crab, Color::Red),
        card(3, CardKind::Crab, Color::Green),
    ];
    assert_eq!(score(&hand, &[], false).pair_bonus, 1);
}

#[test]
fn collections_count_hand_only() {
    // A Shell locked in a played pair would be illegal anyway; the
    // curve must ignore pair cards even if one sneaks in.
    let hand = vec![
        card(1, CardKind::Shell, Color::Blue),
        card(2, CardKind::Shell, Color::Red),
    ];
    let pairs = vec![PlayedPair {
        cards: [
            card(10, CardKind::Shell, Color::Green),
            card(11, CardKind::Shell, Color::Yellow),
        ],
        turn: 0,
    }];
    assert_eq!(score(&hand, &pairs, false).collections.shell, 2);
}

#[test]
fn multiplier_alone_contributes_nothing() {
    let hand = vec![card(1, CardKind::Captain, Color::Yellow)];
    assert_eq!(score(&hand, &[], false).total, 0);
}

#[test]
fn multipliers_count_hand_and_pairs() {
    let hand = vec![
        card(1, CardKind::Lighthouse, Color::Blue),
        card(2, CardKind::Sailboat, Color::Red),
    ];
    let pairs = vec![played(10, CardKind::Sailboat)];
    let breakdown = score(&hand, &pairs, false);
    // Three Sailboats visible, +1 each.
    assert_eq!(breakdown.multipliers.lighthouse, 3);
}

#[test]
fn captain_pays_three_per_sailor() {
    let hand = vec![
        card(1, CardKind::Captain, Color::Yellow),
        card(2, CardKind::Sailor, Color::Blue),
        card(3, CardKind::Sailor, Color::Red),
    ];
    let breakdown = score(&hand, &[], false);
    assert_eq!(breakdown.multipliers.captain, 6);
    // Two Sailors also complete the collection threshold.
    assert_eq!(breakdown.collections.sailor, 5);
}

#[test]
fn mermaid_ranking_example() {
    // Two Mermaids over {blue: 3, red: 2, yellow: 1} score 3 + 2.
    let hand = vec![
        card(1, CardKind::Mermaid, Color::White),
        card(2, CardKind::Mermaid, Color::White),
        card(3, CardKind::Shell, Color::Blue),
        card(4, CardKind::Fish, Color::Blue),
        card(5, CardKind::Crab, Color::Blue),
        card(6, CardKind::Shell, Color::Red),
        card(7, CardKind::Fish, Color::Red),
        card(8, CardKind::Swimmer, Color::Yellow),
    ];
    let breakdown = score(&hand, &[], false);
    assert_eq!(breakdown.mermaid_slots, vec![3, 2]);
    assert_eq!(breakdown.mermaids, 5);
}

#[test]
fn mermaid_reserved_color_never_counts() {
    let hand = vec![
        card(1, CardKind::Mermaid, Color::White),
        card(2, CardKind::Mermaid, Color::White),
        card(3, CardKind::Mermaid, Color::White),
    ];
    let breakdown = score(&hand, &[], true);
    // No ordinary colors in play: every slot ranks zero, and the
    // reserved color cannot carry the color bonus either.
    assert_eq!(breakdown.mermaids, 0);
    assert_eq!(breakdown.color_bonus, 0);
}

#[test]
fn color_bonus_only_when_requested() {
    let hand = vec![
        card(1, CardKind::Fish, Color::Blue),
        card(2, CardKind::Crab, Color::Blue),
        card(3, CardKind::Shell, Color::Red),
    ];
    assert_eq!(score(&hand, &[], false).color_bonus, 0);
    let with_bonus = score(&hand, &[], true);
    assert_eq!(with_bonus.color_bonus, 2);
    assert_eq!(with_bonus.total - score(&hand, &[], false).total, 2);
}

#[test]
fn base_counts_non_collection_hand_values_only() {
    let mut valued = card(1, CardKind::Fish, Color::Blue);
    valued.value = 2;
    let mut shell = card(2, CardKind::Shell, Color::Red);
    shell.value = 9;
    let breakdown = score(&[valued, shell], &[], false);
    assert_eq!(breakdown.base, 2);
}

#[test]
fn declare_threshold_boundary() {
    // Four Shells score exactly 6: not enough.
    let six: Vec<Card> = (0..4)
        .map(|i| card(i, CardKind::Shell, Color::Blue))
        .collect();
    let below = score(&six, &[], false);
    assert_eq!(below.total, 6);
    assert!(!can_declare(&below, 7));

    // Adding one Penguin lands exactly on 7.
    let mut seven = six;
    seven.push(card(9, CardKind::Penguin, Color::Black));
    let at = score(&seven, &[], false);
    assert_eq!(at.total, 7);
    assert!(can_declare(&at, 7));
}

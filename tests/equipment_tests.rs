//! Play state of cards that stay in play: usage limits, taps, hand limits
//! and ghosts. The base deck has none of these, so the games here run on
//! the base registry plus a few extra cards.

mod common;

use std::sync::Arc;

use bang_engine::cards::{CardColor, CardDefId, CardDefinition, CardKind, CardRegistry, CardSign, CardSuit};
use bang_engine::core::{ActionOutcome, GameConfig, PlayTarget, PlayerRole};
use bang_engine::effects::{EffectHolder, EffectKind, EquipKind, PlayerFilter};
use bang_engine::game::{Game, GameUpdate};
use bang_engine::stack::RequestKind;
use bang_engine::zones::PileKind;

use common::{cards_in, draw_phase, find_in_hand, hand, p, table};

fn extra_card(name: &str, rank: u8) -> CardDefinition {
    CardDefinition::new(CardDefId::new(0), name, CardKind::Deck)
        .with_color(CardColor::Blue)
        .with_sign(CardSign::new(CardSuit::Clubs, rank))
}

fn registry() -> Arc<CardRegistry> {
    let mut registry = CardRegistry::base_game(false);
    registry.register(extra_card("Belt", 3).with_equip(EquipKind::HandLimit(8)));
    registry.register(
        extra_card("Ghost", 4)
            .with_equip(EquipKind::Ghost)
            .with_equip_target(&[PlayerFilter::Dead]),
    );
    registry.register(
        CardDefinition::new(CardDefId::new(0), "Gunsmith", CardKind::Character)
            .with_equip(EquipKind::MaxHp(4))
            .with_effect(EffectHolder::new(EffectKind::MaxUsages(1)))
            .with_effect(EffectHolder::new(EffectKind::Draw(1))),
    );
    Arc::new(registry)
}

fn duel_seats(characters: [&str; 2]) -> GameConfig {
    GameConfig::new(2)
        .with_seed(13)
        .with_roles(vec![PlayerRole::Sheriff, PlayerRole::Outlaw])
        .with_characters(characters)
        .with_initial_cards(0)
}

fn tap_updates(game: &Game, from: usize) -> Vec<(bang_engine::cards::CardId, bool)> {
    game.updates().entries()[from..]
        .iter()
        .filter_map(|(_, u)| match u {
            GameUpdate::TapCard { card, tapped } => Some((*card, *tapped)),
            _ => None,
        })
        .collect()
}

/// Test that a once-per-turn character taps when used and is ready again
/// on its owner's next turn.
#[test]
fn test_usage_limit_taps_until_next_turn() {
    let mut game = Game::with_registry(
        duel_seats(["Gunsmith", "Willy the Kid"]).with_stacked_deck(["Bang!", "Missed!", "Beer"]),
        registry(),
    );
    draw_phase(&mut game);
    let gunsmith = game.player(p(0)).character.unwrap();
    assert!(game.can_play(p(0), gunsmith, &[]));

    let before = game.updates().len();
    game.play_card(p(0), gunsmith, vec![]).unwrap();
    find_in_hand(&game, p(0), "Beer");
    let card = game.zones().card(gunsmith);
    assert_eq!((card.usages, card.tapped), (1, true));
    assert_eq!(tap_updates(&game, before), vec![(gunsmith, true)]);
    assert_eq!(cards_in(&game, PileKind::PlayerCharacter, Some(p(0))), vec![gunsmith]);

    let err = game.play_card(p(0), gunsmith, vec![]).unwrap_err();
    assert_eq!(err.key(), Some("ERROR_MAX_USAGES"));
    assert!(!game.can_play(p(0), gunsmith, &[]));

    game.pass_turn(p(0)).unwrap();
    // Only the owner's own turn refreshes it.
    assert!(game.zones().card(gunsmith).tapped);
    draw_phase(&mut game);

    let before = game.updates().len();
    game.pass_turn(p(1)).unwrap();
    assert_eq!(tap_updates(&game, before), vec![(gunsmith, false)]);
    let card = game.zones().card(gunsmith);
    assert_eq!((card.usages, card.tapped), (0, false));

    draw_phase(&mut game);
    assert!(game.can_play(p(0), gunsmith, &[]));
}

/// Test that a hand limit card replaces the hit points at turn end, and
/// the smallest limit no longer applies once it leaves play.
#[test]
fn test_hand_limit_card_raises_discard_threshold() {
    let mut game = Game::with_registry(
        duel_seats(["Willy the Kid", "Rose Doolan"])
            .with_cards_to_draw(8)
            .with_stacked_deck([
                "Belt", "Bang!", "Bang!", "Missed!", "Missed!", "Beer", "Beer", "Gatling",
            ]),
        registry(),
    );
    draw_phase(&mut game);
    assert_eq!(game.player(p(0)).max_cards_end_of_turn(), 5);

    let belt = find_in_hand(&game, p(0), "Belt");
    game.play_card(p(0), belt, vec![]).unwrap();
    assert_eq!(game.player(p(0)).max_cards_end_of_turn(), 8);
    assert_eq!(hand(&game, p(0)).len(), 7);

    game.pass_turn(p(0)).unwrap();
    assert_eq!(game.playing(), Some(p(1)));
    assert_eq!(game.front_request().unwrap().kind, RequestKind::Draw);
}

/// Test that a ghost keeps a dead player in the game until the card
/// leaves play, taking no damage meanwhile.
#[test]
fn test_ghost_keeps_dead_player_in_game() {
    let mut game = Game::with_registry(
        GameConfig::new(4)
            .with_seed(13)
            .with_roles(vec![
                PlayerRole::Sheriff,
                PlayerRole::Outlaw,
                PlayerRole::Outlaw,
                PlayerRole::Renegade,
            ])
            .with_characters(["Willy the Kid", "Lucky Duke", "Rose Doolan", "Paul Regret"])
            .with_initial_cards(0)
            .with_cards_to_draw(7)
            .with_stacked_deck(["Bang!", "Bang!", "Bang!", "Bang!", "Bang!", "Ghost", "Cat Balou"]),
        registry(),
    );
    draw_phase(&mut game);
    for _ in 0..4 {
        let bang = find_in_hand(&game, p(0), "Bang!");
        game.play_card(p(0), bang, vec![PlayTarget::player(p(1))]).unwrap();
        game.resolve(p(1)).unwrap();
    }
    game.resolve(p(1)).unwrap();
    assert!(game.player(p(1)).dead);
    assert_eq!(game.next_player(p(0)), p(2));

    let ghost = find_in_hand(&game, p(0), "Ghost");
    let err = game.play_card(p(0), ghost, vec![PlayTarget::player(p(2))]).unwrap_err();
    assert_eq!(err.key(), Some("ERROR_TARGET_NOT_DEAD"));

    let before = game.updates().len();
    game.play_card(p(0), ghost, vec![PlayTarget::player(p(1))]).unwrap();
    assert!(game.player(p(1)).ghost);
    assert!(game.player(p(1)).alive());
    assert_eq!(table(&game, p(1)), vec![ghost]);
    assert_eq!(game.next_player(p(0)), p(1));
    assert!(game.updates().entries()[before..]
        .iter()
        .any(|(_, u)| *u == GameUpdate::PlayerHp { player: p(1), hp: 0, dead: false }));

    let bang = find_in_hand(&game, p(0), "Bang!");
    game.play_card(p(0), bang, vec![PlayTarget::player(p(1))]).unwrap();
    assert_eq!(game.resolve(p(1)), Ok(ActionOutcome::Applied));
    assert_eq!(game.player(p(1)).hp, 0);
    assert!(game.requests().is_empty());

    let cat_balou = find_in_hand(&game, p(0), "Cat Balou");
    game.play_card(p(0), cat_balou, vec![PlayTarget::card(ghost)]).unwrap();
    assert!(!game.player(p(1)).ghost);
    assert!(!game.player(p(1)).alive());
    assert!(table(&game, p(1)).is_empty());
    assert!(cards_in(&game, PileKind::DiscardPile, None).contains(&ghost));
    assert_eq!(game.next_player(p(0)), p(2));
    assert_eq!(game.playing(), Some(p(0)));
}

//! Shared helpers for the scenario tests.

#![allow(dead_code)]

use bang_engine::cards::CardId;
use bang_engine::core::{ActionOutcome, GameAction, PlayTarget, PlayerId};
use bang_engine::effects::TargetType;
use bang_engine::game::Game;
use bang_engine::stack::RequestKind;
use bang_engine::zones::PileKind;

/// Install a test subscriber once; `RUST_LOG=bang_engine=debug` shows traces.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn p(id: u8) -> PlayerId {
    PlayerId::new(id)
}

pub fn cards_in(game: &Game, pile: PileKind, owner: Option<PlayerId>) -> Vec<CardId> {
    game.zones().pile(pile, owner).iter().copied().collect()
}

pub fn hand(game: &Game, player: PlayerId) -> Vec<CardId> {
    cards_in(game, PileKind::PlayerHand, Some(player))
}

pub fn table(game: &Game, player: PlayerId) -> Vec<CardId> {
    cards_in(game, PileKind::PlayerTable, Some(player))
}

pub fn selection(game: &Game) -> Vec<CardId> {
    cards_in(game, PileKind::Selection, None)
}

/// The first card named `name` in a player's hand.
pub fn find_in_hand(game: &Game, player: PlayerId, name: &str) -> CardId {
    hand(game, player)
        .into_iter()
        .find(|&c| game.def_of(c).name == name)
        .unwrap_or_else(|| panic!("{} has no {:?} in hand", player, name))
}

/// Pick the deck for the draw phase of whoever is asked to draw.
pub fn draw_phase(game: &mut Game) {
    let player = game.front_request().expect("draw request").target;
    let outcome = game.pick_card(player, PileKind::MainDeck, None, None).unwrap();
    assert_eq!(outcome, ActionOutcome::Applied);
}

/// Apply one plausible action. Returns false once the game is over.
///
/// Answers the front request if there is one; otherwise tries each hand
/// card of the playing player against each other player, and passes if
/// nothing can be played.
pub fn autoplay_step(game: &mut Game) -> bool {
    if game.is_game_over() {
        return false;
    }
    if let Some(request) = game.front_request().cloned() {
        let actor = request.target;
        if matches!(request.kind, RequestKind::Draw | RequestKind::DrawChoice { .. }) {
            return apply(game, actor, GameAction::pick_deck());
        }
        if request.kind.is_resolvable() {
            return apply(game, actor, GameAction::Resolve);
        }
        let mut candidates = Vec::new();
        for card in selection(game) {
            candidates.push(GameAction::pick(PileKind::Selection, None, card));
        }
        for card in table(game, actor) {
            candidates.push(GameAction::pick(PileKind::PlayerTable, Some(actor), card));
        }
        for card in hand(game, actor) {
            candidates.push(GameAction::pick(PileKind::PlayerHand, Some(actor), card));
        }
        for action in candidates {
            if try_apply(game, actor, action) {
                return true;
            }
        }
        panic!("no accepted answer to {:?}", request.kind);
    }

    let player = game.playing().expect("someone is playing");
    for card in hand(game, player) {
        for action in play_options(game, player, card) {
            if try_apply(game, player, action) {
                return true;
            }
        }
    }
    apply(game, player, GameAction::PassTurn)
}

fn play_options(game: &Game, player: PlayerId, card: CardId) -> Vec<GameAction> {
    let def = game.def_of(card);
    let others: Vec<PlayerId> = game.alive_players_from(player).into_iter().skip(1).collect();
    let needs: Vec<TargetType> = def.effects.iter().filter(|e| e.needs_target()).map(|e| e.target).collect();

    if def.equip_on_other {
        return others.iter().map(|&t| GameAction::play_on(card, t)).collect();
    }
    if needs.is_empty() {
        return vec![GameAction::play(card)];
    }
    others
        .iter()
        .filter_map(|&t| {
            let targets = needs
                .iter()
                .map(|target| match target {
                    TargetType::Card => table(game, t)
                        .into_iter()
                        .chain(hand(game, t))
                        .next()
                        .map(PlayTarget::card),
                    _ => Some(PlayTarget::player(t)),
                })
                .collect::<Option<Vec<_>>>()?;
            Some(GameAction::PlayCard { card, targets })
        })
        .collect()
}

fn try_apply(game: &mut Game, player: PlayerId, action: GameAction) -> bool {
    matches!(game.handle_action(player, action), Ok(ActionOutcome::Applied))
}

fn apply(game: &mut Game, player: PlayerId, action: GameAction) -> bool {
    let outcome = game.handle_action(player, action.clone());
    assert_eq!(outcome, Ok(ActionOutcome::Applied), "{} could not {:?}", player, action);
    true
}

//! Game creation: deck, roles, characters and the opening hands.

use std::sync::Arc;

use tracing::info;

use super::updates::{GameUpdate, UpdateTarget};
use super::{Game, Player, UpdateLog, Visibility};
use crate::cards::{CardDefId, CardId, CardRegistry};
use crate::core::{FormattedText, GameConfig, GameRng, PlayerId, PlayerMap, PlayerRole};
use crate::stack::{PendingQueue, RequestQueue};
use crate::triggers::EventBus;
use crate::zones::{PileKind, ZoneManager};

impl Game {
    /// Start a game with the base card set.
    ///
    /// Panics if a configured character or stacked card does not exist.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let catalog = Arc::new(CardRegistry::base_game(config.escapes));
        Self::with_registry(config, catalog)
    }

    /// Start a game with a custom card set.
    #[must_use]
    pub fn with_registry(config: GameConfig, catalog: Arc<CardRegistry>) -> Self {
        let count = config.player_count;
        let mut rng = GameRng::new(config.seed);
        let roles = match &config.roles {
            Some(roles) => roles.clone(),
            None => {
                let mut pool = PlayerRole::pool(count).to_vec();
                rng.shuffle(&mut pool);
                pool
            }
        };

        let mut game = Self {
            zones: ZoneManager::new(count),
            players: PlayerMap::new(count, |p| Player::new(p, roles[p.index()])),
            requests: RequestQueue::new(),
            pending: PendingQueue::new(),
            bus: EventBus::new(),
            rng,
            updates: UpdateLog::new(),
            playing: None,
            winner: None,
            history: Vec::new(),
            catalog,
            config,
        };
        game.setup();
        game
    }

    fn setup(&mut self) {
        info!(players = self.config.player_count, seed = self.config.seed, "game starts");
        self.log(FormattedText::new("LOG_GAME_START"));

        let deck: Vec<CardDefId> = self.catalog.deck().map(|d| d.id).collect();
        for def in deck {
            self.zones.add_card(def, PileKind::MainDeck, None);
        }
        self.zones.shuffle(PileKind::MainDeck, None, &mut self.rng);
        self.stack_deck();

        self.reveal_roles();
        self.deal_characters();
        self.deal_hands();

        let first = self
            .find_role(PlayerRole::Sheriff)
            .or_else(|| self.find_role(PlayerRole::Deputy).filter(|_| self.config.player_count == 3))
            .unwrap_or(PlayerId::new(0));
        self.start_of_turn(first);
        self.drain_pending();
    }

    /// Raise the configured cards to the top, first name on top.
    fn stack_deck(&mut self) {
        let names = self.config.stacked_deck.clone();
        let mut raised: Vec<CardId> = Vec::with_capacity(names.len());
        for name in names.iter().rev() {
            let card = self
                .zones
                .pile(PileKind::MainDeck, None)
                .iter()
                .copied()
                .find(|c| !raised.contains(c) && self.def_of(*c).name == *name)
                .unwrap_or_else(|| panic!("Stacked card {:?} is not in the deck", name));
            self.zones.raise_to_top(card);
            raised.push(card);
        }
    }

    /// The sheriff is public, and so is everybody in a small game.
    /// Everybody else learns only their own role.
    fn reveal_roles(&mut self) {
        let everyone_public = self.config.player_count <= 3;
        let ids: Vec<PlayerId> = self.players.player_ids().collect();
        for player in ids {
            let role = self.players[player].role;
            if everyone_public || role == PlayerRole::Sheriff {
                self.show_role(player);
            } else {
                self.push_update(UpdateTarget::only(player), GameUpdate::PlayerShowRole { player, role });
            }
        }
    }

    fn deal_characters(&mut self) {
        let all: Vec<CardDefId> = self.catalog.characters().map(|d| d.id).collect();
        let cards: Vec<(CardDefId, CardId)> = all
            .iter()
            .map(|&def| (def, self.zones.add_card(def, PileKind::HiddenDeck, None)))
            .collect();

        let chosen: Vec<CardDefId> = match &self.config.characters {
            Some(names) => names
                .iter()
                .map(|name| {
                    self.catalog
                        .find_by_name(name)
                        .unwrap_or_else(|| panic!("Unknown character {:?}", name))
                })
                .collect(),
            None => {
                let mut shuffled = all;
                self.rng.shuffle(&mut shuffled);
                shuffled
            }
        };
        assert!(
            chosen.len() >= self.config.player_count,
            "Not enough characters for every seat"
        );

        let ids: Vec<PlayerId> = self.players.player_ids().collect();
        for (player, def) in ids.into_iter().zip(chosen) {
            let card = cards
                .iter()
                .find(|(d, _)| *d == def)
                .map(|&(_, card)| card)
                .unwrap_or_else(|| panic!("{} is not a character", def));
            self.move_card(card, PileKind::PlayerCharacter, Some(player), Visibility::Shown);
            self.players[player].character = Some(card);
            self.enable_equip(player, card);

            let p = &mut self.players[player];
            p.hp = p.max_hp;
            let hp = p.hp;
            self.push_update(UpdateTarget::Everyone, GameUpdate::PlayerHp { player, hp, dead: false });
        }
    }

    /// Deal opening hands round-robin, one card per seat at a time.
    fn deal_hands(&mut self) {
        let sizes: Vec<(PlayerId, u32)> = self
            .players
            .iter()
            .map(|(id, p)| (id, self.config.initial_cards.unwrap_or(p.max_hp.max(0) as u32)))
            .collect();
        let rounds = sizes.iter().map(|&(_, n)| n).max().unwrap_or(0);
        for round in 0..rounds {
            for &(player, size) in &sizes {
                if round < size {
                    self.draw_card_to(PileKind::PlayerHand, Some(player), Visibility::Known);
                }
            }
        }
    }

    fn find_role(&self, role: PlayerRole) -> Option<PlayerId> {
        self.players.iter().find(|(_, p)| p.role == role).map(|(id, _)| id)
    }
}

//! Card registry for definition lookup.
//!
//! The `CardRegistry` is the card catalog consumed once when a game starts.
//! Each physical card has its own definition, since copies of the same card
//! differ in their sign. Definitions are stored densely, so a `CardDefId`
//! is an index.

use rustc_hash::FxHashMap;

use super::definition::{
    CardColor, CardDefId, CardDefinition, CardKind, CardSign, CardSuit,
};
use crate::effects::{EffectHolder, EffectKind, EquipKind, PlayerFilter, TargetType};

const J: u8 = 11;
const Q: u8 = 12;
const K: u8 = 13;
const A: u8 = 14;

fn hearts(rank: u8) -> CardSign {
    CardSign::new(CardSuit::Hearts, rank)
}

fn diamonds(rank: u8) -> CardSign {
    CardSign::new(CardSuit::Diamonds, rank)
}

fn clubs(rank: u8) -> CardSign {
    CardSign::new(CardSuit::Clubs, rank)
}

fn spades(rank: u8) -> CardSign {
    CardSign::new(CardSuit::Spades, rank)
}

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use bang_engine::cards::{CardDefinition, CardDefId, CardKind, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// let id = registry.register(CardDefinition::new(CardDefId::new(0), "Beer", CardKind::Deck));
///
/// assert_eq!(registry.get(id).name, "Beer");
/// assert_eq!(registry.find_by_name("Beer"), Some(id));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    defs: Vec<CardDefinition>,

    /// First id registered under each name.
    by_name: FxHashMap<String, CardDefId>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, assigning it the next free id.
    pub fn register(&mut self, mut def: CardDefinition) -> CardDefId {
        let id = CardDefId::new(
            u16::try_from(self.defs.len()).expect("Card registry is full"),
        );
        def.id = id;
        self.by_name.entry(def.name.clone()).or_insert(id);
        self.defs.push(def);
        id
    }

    /// Register one copy of `template` per sign.
    pub fn register_copies(&mut self, template: &CardDefinition, signs: &[CardSign]) {
        for sign in signs {
            self.register(template.clone().with_sign(*sign));
        }
    }

    /// Get a definition. Panics on an id from another registry.
    #[must_use]
    pub fn get(&self, id: CardDefId) -> &CardDefinition {
        &self.defs[id.0 as usize]
    }

    /// First definition with the given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<CardDefId> {
        self.by_name.get(name).copied()
    }

    /// Definitions of the main deck, in registration order.
    pub fn deck(&self) -> impl Iterator<Item = &CardDefinition> {
        self.defs.iter().filter(|d| d.kind == CardKind::Deck)
    }

    /// Character definitions, in registration order.
    pub fn characters(&self) -> impl Iterator<Item = &CardDefinition> {
        self.defs.iter().filter(|d| d.kind == CardKind::Character)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// The base game: 80 deck cards and its characters.
    ///
    /// With `escapes` the deck also holds escape cards that discharge
    /// escapable destroy/steal requests.
    #[must_use]
    pub fn base_game(escapes: bool) -> Self {
        let mut registry = Self::new();
        registry.register_base_deck();
        if escapes {
            let escape = brown("Escape").with_response(EffectHolder::new(EffectKind::Escape));
            registry.register_copies(&escape, &[hearts(3), diamonds(7)]);
        }
        registry.register_base_characters();
        registry
    }

    fn register_base_deck(&mut self) {
        let bang = brown("Bang!")
            .with_effect(EffectHolder::new(EffectKind::BangLimit))
            .with_effect(
                EffectHolder::new(EffectKind::BangCard)
                    .with_target(TargetType::Player)
                    .with_player_filter(PlayerFilter::Reachable)
                    .with_player_filter(PlayerFilter::NotSelf),
            )
            .with_response(EffectHolder::new(EffectKind::BangAsMissed));
        let mut bang_signs = vec![spades(A), hearts(Q), hearts(K), hearts(A)];
        bang_signs.extend((2..=A).map(diamonds));
        bang_signs.extend((2..=9).map(clubs));
        self.register_copies(&bang, &bang_signs);

        let missed = brown("Missed!")
            .with_effect(
                EffectHolder::new(EffectKind::MissedAsBang)
                    .with_target(TargetType::Player)
                    .with_player_filter(PlayerFilter::Reachable)
                    .with_player_filter(PlayerFilter::NotSelf),
            )
            .with_response(EffectHolder::new(EffectKind::Missed));
        let mut missed_signs = vec![clubs(10), clubs(J), clubs(Q), clubs(K), clubs(A)];
        missed_signs.extend((2..=8).map(spades));
        self.register_copies(&missed, &missed_signs);

        let beer = brown("Beer")
            .with_effect(EffectHolder::new(EffectKind::Beer))
            .with_response(EffectHolder::new(EffectKind::Beer))
            .with_response(EffectHolder::new(EffectKind::DeathSave));
        let beer_signs: Vec<_> = (6..=J).map(hearts).collect();
        self.register_copies(&beer, &beer_signs);

        let panic = brown("Panic!").with_effect(
            EffectHolder::new(EffectKind::Steal)
                .with_target(TargetType::Card)
                .with_player_filter(PlayerFilter::Range1)
                .with_player_filter(PlayerFilter::NotSelf),
        );
        self.register_copies(&panic, &[hearts(J), hearts(Q), hearts(A), diamonds(8)]);

        let cat_balou = brown("Cat Balou").with_effect(
            EffectHolder::new(EffectKind::Destroy)
                .with_target(TargetType::Card)
                .with_player_filter(PlayerFilter::NotSelf),
        );
        self.register_copies(&cat_balou, &[hearts(K), diamonds(9), diamonds(10), diamonds(J)]);

        let stagecoach = brown("Stagecoach").with_effect(EffectHolder::new(EffectKind::Draw(2)));
        self.register_copies(&stagecoach, &[spades(9), spades(9)]);

        let wells_fargo = brown("Wells Fargo").with_effect(EffectHolder::new(EffectKind::Draw(3)));
        self.register_copies(&wells_fargo, &[hearts(3)]);

        let store = brown("General Store").with_effect(EffectHolder::new(EffectKind::GeneralStore));
        self.register_copies(&store, &[clubs(9), spades(Q)]);

        let duel = brown("Duel").with_effect(
            EffectHolder::new(EffectKind::Duel)
                .with_target(TargetType::Player)
                .with_player_filter(PlayerFilter::NotSelf),
        );
        self.register_copies(&duel, &[diamonds(Q), spades(J), clubs(8)]);

        let indians = brown("Indians!").with_effect(
            EffectHolder::new(EffectKind::Indians).with_target(TargetType::OtherPlayers),
        );
        self.register_copies(&indians, &[diamonds(K), diamonds(A)]);

        let gatling = brown("Gatling").with_effect(
            EffectHolder::new(EffectKind::Bang).with_target(TargetType::OtherPlayers),
        );
        self.register_copies(&gatling, &[hearts(10)]);

        let saloon = brown("Saloon").with_effect(
            EffectHolder::new(EffectKind::Heal(1)).with_target(TargetType::Everyone),
        );
        self.register_copies(&saloon, &[hearts(5)]);

        let barrel = blue("Barrel")
            .with_response(EffectHolder::new(EffectKind::Barrel));
        self.register_copies(&barrel, &[spades(Q), spades(K)]);

        let dynamite = blue("Dynamite").with_equip(EquipKind::Dynamite);
        self.register_copies(&dynamite, &[hearts(2)]);

        let jail = blue("Jail")
            .with_equip(EquipKind::Jail)
            .with_equip_target(&[PlayerFilter::NotSelf, PlayerFilter::NotSheriff]);
        self.register_copies(&jail, &[spades(J), spades(10), hearts(4)]);

        let mustang = blue("Mustang").with_equip(EquipKind::Mustang);
        self.register_copies(&mustang, &[hearts(8), hearts(9)]);

        let scope = blue("Scope").with_equip(EquipKind::Scope);
        self.register_copies(&scope, &[spades(A)]);

        let volcanic = blue("Volcanic")
            .with_equip(EquipKind::Weapon(1))
            .with_equip(EquipKind::Volcanic);
        self.register_copies(&volcanic, &[spades(10), clubs(10)]);

        let schofield = blue("Schofield").with_equip(EquipKind::Weapon(2));
        self.register_copies(&schofield, &[clubs(J), clubs(Q), spades(K)]);

        let remington = blue("Remington").with_equip(EquipKind::Weapon(3));
        self.register_copies(&remington, &[clubs(K)]);

        let carabine = blue("Rev. Carabine").with_equip(EquipKind::Weapon(4));
        self.register_copies(&carabine, &[clubs(A)]);

        let winchester = blue("Winchester").with_equip(EquipKind::Weapon(5));
        self.register_copies(&winchester, &[spades(8)]);
    }

    fn register_base_characters(&mut self) {
        let characters: [(&str, i32, EquipKind); 14] = [
            ("Bart Cassidy", 4, EquipKind::Boots),
            ("Black Jack", 4, EquipKind::BlackJack),
            ("El Gringo", 3, EquipKind::ElGringo),
            ("Kit Carlson", 4, EquipKind::KitCarlson),
            ("Lucky Duke", 4, EquipKind::HorseCharm),
            ("Paul Regret", 3, EquipKind::Mustang),
            ("Rose Doolan", 4, EquipKind::Scope),
            ("Slab the Killer", 4, EquipKind::SlabTheKiller),
            ("Suzy Lafayette", 4, EquipKind::SuzyLafayette),
            ("Vulture Sam", 4, EquipKind::VultureSam),
            ("Willy the Kid", 4, EquipKind::Volcanic),
            ("Calamity Janet", 4, EquipKind::CalamityJanet),
            ("Jesse Jones", 4, EquipKind::JesseJones),
            ("Pedro Ramirez", 4, EquipKind::PedroRamirez),
        ];
        for (name, hp, equip) in characters {
            self.register(character(name, hp).with_equip(equip));
        }

        self.register(
            character("Jourdonnais", 4).with_response(EffectHolder::new(EffectKind::Barrel)),
        );

        let discard = || EffectHolder::new(EffectKind::DiscardFromHand).with_target(TargetType::Card);
        self.register(
            character("Sid Ketchum", 4)
                .with_effect(discard())
                .with_effect(discard())
                .with_effect(EffectHolder::new(EffectKind::HealNotFull(1)))
                .with_response(discard())
                .with_response(discard())
                .with_response(EffectHolder::new(EffectKind::HealNotFull(1)))
                .with_response(EffectHolder::new(EffectKind::DeathSave)),
        );
    }
}

fn brown(name: &str) -> CardDefinition {
    CardDefinition::new(CardDefId::new(0), name, CardKind::Deck).with_color(CardColor::Brown)
}

fn blue(name: &str) -> CardDefinition {
    CardDefinition::new(CardDefId::new(0), name, CardKind::Deck).with_color(CardColor::Blue)
}

fn character(name: &str, max_hp: i32) -> CardDefinition {
    CardDefinition::new(CardDefId::new(0), name, CardKind::Character)
        .with_equip(EquipKind::MaxHp(max_hp))
}

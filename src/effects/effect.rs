//! Effect capability objects.
//!
//! Every card carries up to three ordered effect chains: play effects,
//! response effects and equip effects. Each link in a chain is a small
//! tagged value; all behavior is selected by matching on the tag in the
//! resolver, so a kind without a capability simply has no arm for it.
//!
//! ## Example
//!
//! ```
//! use bang_engine::effects::{EffectHolder, EffectKind, PlayerFilter, TargetType};
//!
//! let bang = EffectHolder::new(EffectKind::BangCard)
//!     .with_target(TargetType::Player)
//!     .with_player_filter(PlayerFilter::Reachable)
//!     .with_player_filter(PlayerFilter::NotSelf);
//!
//! assert!(bang.needs_target());
//! assert_eq!(bang.player_filter.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// What a single play or response effect does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Shoot a player: raises a bang request.
    Bang,
    /// Like `Bang`, but counts as a bang card (strength modifiers apply).
    BangCard,
    /// Enforces and consumes the per-turn bang allowance.
    BangLimit,
    /// Cancels one point of strength of a bang aimed at the responder.
    Missed,
    /// Draw check on hearts cancels one point of bang strength.
    Barrel,
    /// Heal one hit point, unless only two of several players remain.
    Beer,
    /// Heal the targeted players by the given amount.
    Heal(i32),
    /// Take a card from another player.
    Steal,
    /// Discard a card of another player.
    Destroy,
    /// Challenge a player to discard bang cards in turn.
    Duel,
    /// Every target discards a bang card or takes a hit.
    Indians,
    /// Draw cards from the deck.
    Draw(u32),
    /// Reveal one card per alive player and let everyone pick one.
    GeneralStore,
    /// Answer a death request; pops it once hit points are back above zero.
    DeathSave,
    /// Discharge an escapable destroy/steal request.
    Escape,
    /// Play a missed card as a bang card; needs the missed-as-bang ability.
    MissedAsBang,
    /// Answer a bang with a bang card; needs the missed-as-bang ability.
    BangAsMissed,
    /// Discard a card from the player's own hand as a cost.
    DiscardFromHand,
    /// Like `Heal`, but refused at full health.
    HealNotFull(i32),
    /// The card may be used this many times per turn, then it is tapped.
    MaxUsages(u32),
}

/// What an equipped card (or a character) does while in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipKind {
    /// Base max hit points of a character.
    MaxHp(i32),
    /// Others see the owner one seat further away.
    Mustang,
    /// The owner sees others one seat closer.
    Scope,
    /// Sets the weapon range.
    Weapon(i32),
    /// Lifts the one-bang-per-turn limit.
    Volcanic,
    /// Predraw check: hearts frees, otherwise the turn is skipped.
    Jail,
    /// Predraw check: spades 2-9 explodes, otherwise moves on.
    Dynamite,
    /// Draw one card per damage point taken.
    Boots,
    /// Flip one extra card on every draw check and keep the best.
    HorseCharm,
    /// Show the second drawn card; a red one draws another.
    BlackJack,
    /// Look at three cards and keep two in the draw phase.
    KitCarlson,
    /// Steal from whoever hits you outside your turn.
    ElGringo,
    /// Draw a card whenever your hand runs empty.
    SuzyLafayette,
    /// Take the cards of every eliminated player.
    VultureSam,
    /// Your bang cards need two misses.
    SlabTheKiller,
    /// Missed cards count as bang cards and the other way around.
    CalamityJanet,
    /// May draw the first card from another player's hand.
    JesseJones,
    /// May draw the first card from the top of the discard pile.
    PedroRamirez,
    /// Caps the hand size kept at the end of the turn, whatever the hit points.
    HandLimit(i32),
    /// A dead owner keeps playing while the card stays on its table.
    Ghost,
}

/// How an effect selects its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TargetType {
    /// No target group; the effect acts on the player who played it.
    #[default]
    None,
    /// One player, chosen by a target group.
    Player,
    /// One card held by a player, chosen by a target group.
    Card,
    /// Every other alive player, in seat order after the origin.
    OtherPlayers,
    /// Every alive player, starting with the origin.
    Everyone,
}

impl TargetType {
    /// Whether a target group must be supplied for this effect.
    #[must_use]
    pub const fn needs_group(self) -> bool {
        matches!(self, TargetType::Player | TargetType::Card)
    }
}

/// Restriction on the player targeted (or owning the targeted card).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerFilter {
    NotSelf,
    NotSheriff,
    /// Within weapon range.
    Reachable,
    /// At distance 1, plus the origin's range modifier.
    Range1,
    /// Only dead players.
    Dead,
}

impl PlayerFilter {
    /// Message key reported when the filter rejects a target.
    #[must_use]
    pub const fn error_key(self) -> &'static str {
        match self {
            PlayerFilter::NotSelf => "ERROR_TARGET_SELF",
            PlayerFilter::NotSheriff => "ERROR_TARGET_SHERIFF",
            PlayerFilter::Reachable => "ERROR_TARGET_NOT_REACHABLE",
            PlayerFilter::Range1 => "ERROR_TARGET_NOT_RANGE_1",
            PlayerFilter::Dead => "ERROR_TARGET_NOT_DEAD",
        }
    }
}

/// Flags carried from a played card into the requests it raises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EffectFlags {
    /// The request may be discharged by an escape response.
    pub escapable: bool,
    /// The card had a single player target.
    pub single_target: bool,
}

/// One link of a card's play or response chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectHolder {
    pub kind: EffectKind,
    pub target: TargetType,
    pub player_filter: SmallVec<[PlayerFilter; 2]>,
}

impl EffectHolder {
    /// An untargeted effect.
    #[must_use]
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            target: TargetType::None,
            player_filter: SmallVec::new(),
        }
    }

    /// Set the target type (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: TargetType) -> Self {
        self.target = target;
        self
    }

    /// Add a player filter (builder pattern).
    #[must_use]
    pub fn with_player_filter(mut self, filter: PlayerFilter) -> Self {
        self.player_filter.push(filter);
        self
    }

    /// Whether this effect consumes a target group.
    #[must_use]
    pub fn needs_target(&self) -> bool {
        self.target.needs_group()
    }
}

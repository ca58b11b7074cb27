//! Outbound notifications.
//!
//! Every state change the presentation layer needs is appended to the
//! `UpdateLog` with a recipient filter. Hidden information is expressed by
//! the filter: a card drawn into a hand is shown to its owner and hidden
//! from everyone else, so two players read different streams for the same
//! move.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::cards::{CardDefId, CardId};
use crate::core::{FormattedText, PlayerId, PlayerRole};
use crate::effects::EffectFlags;
use crate::zones::PileKind;

/// Who receives a notification.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateTarget {
    Everyone,
    Includes(SmallVec<[PlayerId; 2]>),
    Excludes(SmallVec<[PlayerId; 2]>),
}

impl UpdateTarget {
    #[must_use]
    pub fn only(player: PlayerId) -> Self {
        UpdateTarget::Includes(smallvec![player])
    }

    #[must_use]
    pub fn except(player: PlayerId) -> Self {
        UpdateTarget::Excludes(smallvec![player])
    }

    #[must_use]
    pub fn includes(&self, player: PlayerId) -> bool {
        match self {
            UpdateTarget::Everyone => true,
            UpdateTarget::Includes(players) => players.contains(&player),
            UpdateTarget::Excludes(players) => !players.contains(&player),
        }
    }
}

/// A `(pile, owner, card)` tuple a player may pick. `card` is `None` for
/// picking a whole deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PickTarget {
    pub pile: PileKind,
    pub owner: Option<PlayerId>,
    pub card: Option<CardId>,
}

/// Summary of the front request as seen by one player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestStatus {
    pub origin_card: Option<CardId>,
    pub origin: Option<PlayerId>,
    pub target: PlayerId,
    pub flags: EffectFlags,
    pub status_text: FormattedText,
    /// Cards the recipient may respond with.
    pub respond_ids: Vec<CardId>,
    /// What the recipient may pick.
    pub pick_ids: Vec<PickTarget>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameUpdate {
    /// A game-log line for players.
    Log(FormattedText),
    MoveCard {
        card: CardId,
        pile: PileKind,
        owner: Option<PlayerId>,
    },
    /// The recipient learns which definition is behind a card id.
    ShowCard { card: CardId, def: CardDefId },
    /// The recipient forgets it.
    HideCard { card: CardId },
    DeckShuffled { pile: PileKind },
    /// A card was used up, or became usable again.
    TapCard { card: CardId, tapped: bool },
    PlayerHp {
        player: PlayerId,
        hp: i32,
        dead: bool,
    },
    PlayerShowRole { player: PlayerId, role: PlayerRole },
    SwitchTurn { player: PlayerId },
    RequestStatus(RequestStatus),
    /// The request queue emptied.
    StatusClear,
    GameOver { winner: PlayerRole },
}

/// Ordered notification stream with per-entry recipients.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLog {
    entries: Vec<(UpdateTarget, GameUpdate)>,
}

impl UpdateLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, target: UpdateTarget, update: GameUpdate) {
        self.entries.push((target, update));
    }

    /// Every entry with its recipients, in emission order.
    #[must_use]
    pub fn entries(&self) -> &[(UpdateTarget, GameUpdate)] {
        &self.entries
    }

    /// The stream one player receives.
    pub fn for_player(&self, player: PlayerId) -> impl Iterator<Item = &GameUpdate> {
        self.entries
            .iter()
            .filter(move |(target, _)| target.includes(player))
            .map(|(_, update)| update)
    }

    /// Take every entry, leaving the log empty.
    pub fn drain(&mut self) -> Vec<(UpdateTarget, GameUpdate)> {
        std::mem::take(&mut self.entries)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipient_filters() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        assert!(UpdateTarget::Everyone.includes(p1));
        assert!(UpdateTarget::only(p0).includes(p0));
        assert!(!UpdateTarget::only(p0).includes(p1));
        assert!(!UpdateTarget::except(p0).includes(p0));
        assert!(UpdateTarget::except(p0).includes(p1));
    }

    #[test]
    fn test_per_player_stream() {
        let mut log = UpdateLog::new();
        let card = CardId::new(3);
        log.push(UpdateTarget::only(PlayerId::new(0)), GameUpdate::ShowCard { card, def: CardDefId::new(9) });
        log.push(UpdateTarget::except(PlayerId::new(0)), GameUpdate::HideCard { card });
        log.push(UpdateTarget::Everyone, GameUpdate::StatusClear);

        let p0: Vec<_> = log.for_player(PlayerId::new(0)).cloned().collect();
        let p1: Vec<_> = log.for_player(PlayerId::new(1)).cloned().collect();
        assert_eq!(p0, vec![GameUpdate::ShowCard { card, def: CardDefId::new(9) }, GameUpdate::StatusClear]);
        assert_eq!(p1, vec![GameUpdate::HideCard { card }, GameUpdate::StatusClear]);
    }

    #[test]
    fn test_tap_update_json_shape() {
        let update = GameUpdate::TapCard { card: CardId::new(5), tapped: true };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "TapCard": { "card": 5, "tapped": true } }));
    }

    #[test]
    fn test_drain_empties() {
        let mut log = UpdateLog::new();
        log.push(UpdateTarget::Everyone, GameUpdate::StatusClear);
        assert_eq!(log.drain().len(), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn test_update_json_roundtrip() {
        let update = GameUpdate::PlayerHp { player: PlayerId::new(2), hp: 3, dead: false };
        let json = serde_json::to_string(&update).unwrap();
        let back: GameUpdate = serde_json::from_str(&json).unwrap();
        assert_eq!(update, back);
    }
}

use serde::{Deserialize, Serialize};

use missilewars_core::player::PlayerId;

use crate::equipment::EquipmentItem;

/// Effects the round core asks its host to perform. The core mutates its own
/// state and returns these; it never touches inventories, displays, or chat
/// itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// A player's equipment countdown changed; mirror it on their display.
    CountdownSet {
        player_id: PlayerId,
        remaining_secs: u32,
    },
    /// A player's countdown expired and an item was drawn for them.
    EquipmentGranted {
        player_id: PlayerId,
        item: EquipmentItem,
    },
    /// The map vote closed; broadcast the winning arena.
    VoteFinished { arena: String, display_name: String },
    /// The round's arena is decided; preparation may proceed.
    RoundPreparing,
}

use serde::{Deserialize, Serialize};

/// Unique identifier for a player in a lobby.
pub type PlayerId = u64;

/// A player known to the lobby roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub is_spectator: bool,
}

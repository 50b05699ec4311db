use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::messages::MessageKey;

/// How the round's arena is chosen when the lobby countdown ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapChooseProcedure {
    /// Always play the first offered arena.
    First,
    /// Rotate through the offered arenas; the host supplies the position.
    MapCycle,
    /// Let the players vote during the lobby phase.
    MapVoting,
}

/// Configuration for a MissileWars lobby.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LobbyConfig {
    pub max_players: u8,
    pub lobby_countdown: Duration,
    pub map_choose_procedure: MapChooseProcedure,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            max_players: 20,
            lobby_countdown: Duration::from_secs(60),
            map_choose_procedure: MapChooseProcedure::MapVoting,
        }
    }
}

/// Lifecycle state of a round. Carries no text; hosts render it through the
/// message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Lobby,
    InGame,
    End,
    Error,
}

impl GameState {
    pub fn message_key(self) -> MessageKey {
        match self {
            Self::Lobby => MessageKey::GameStateLobby,
            Self::InGame => MessageKey::GameStateInGame,
            Self::End => MessageKey::GameStateEnd,
            Self::Error => MessageKey::GameStateError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lobby_votes_for_maps() {
        let config = LobbyConfig::default();
        assert_eq!(config.map_choose_procedure, MapChooseProcedure::MapVoting);
        assert!(config.max_players > 1);
    }

    #[test]
    fn every_state_has_a_message_key() {
        let states = [
            GameState::Lobby,
            GameState::InGame,
            GameState::End,
            GameState::Error,
        ];
        let keys: Vec<MessageKey> = states.iter().map(|s| s.message_key()).collect();
        for (i, key) in keys.iter().enumerate() {
            for other in &keys[i + 1..] {
                assert_ne!(key, other, "states must map to distinct keys");
            }
        }
    }
}

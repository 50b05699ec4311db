use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifies a user-facing notice. The round core only ever selects a key
/// and its parameters; rendering and localization happen outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    VoteNotStarted,
    VoteAlreadyEnded,
    UnknownMap,
    MapNotAvailable,
    MapAlreadySelected,
    VoteSuccess,
    VoteFinished,
    GameStateLobby,
    GameStateInGame,
    GameStateEnd,
    GameStateError,
}

impl MessageKey {
    pub const ALL: &[MessageKey] = &[
        Self::VoteNotStarted,
        Self::VoteAlreadyEnded,
        Self::UnknownMap,
        Self::MapNotAvailable,
        Self::MapAlreadySelected,
        Self::VoteSuccess,
        Self::VoteFinished,
        Self::GameStateLobby,
        Self::GameStateInGame,
        Self::GameStateEnd,
        Self::GameStateError,
    ];

    /// Catalog tag for this key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VoteNotStarted => "vote-not-started",
            Self::VoteAlreadyEnded => "vote-already-ended",
            Self::UnknownMap => "unknown-map",
            Self::MapNotAvailable => "map-not-available",
            Self::MapAlreadySelected => "map-already-selected",
            Self::VoteSuccess => "vote-success",
            Self::VoteFinished => "vote-finished",
            Self::GameStateLobby => "game-state-lobby",
            Self::GameStateInGame => "game-state-ingame",
            Self::GameStateEnd => "game-state-end",
            Self::GameStateError => "game-state-error",
        }
    }
}

/// Notice catalog keyed by message tags. Values may contain `%name%`
/// placeholders filled in at render time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Messages {
    entries: HashMap<String, String>,
}

impl Default for Messages {
    fn default() -> Self {
        let defaults = [
            (MessageKey::VoteNotStarted, "You can't vote for a map right now."),
            (MessageKey::VoteAlreadyEnded, "The map voting has already ended."),
            (MessageKey::UnknownMap, "Unknown map '%input%'."),
            (
                MessageKey::MapNotAvailable,
                "This map is not available for this round.",
            ),
            (MessageKey::MapAlreadySelected, "You already voted for %map%."),
            (MessageKey::VoteSuccess, "You voted for %map%."),
            (
                MessageKey::VoteFinished,
                "The map voting has finished. Playing on %map%!",
            ),
            (MessageKey::GameStateLobby, "Lobby"),
            (MessageKey::GameStateInGame, "Ingame"),
            (MessageKey::GameStateEnd, "End"),
            (MessageKey::GameStateError, "Error"),
        ];
        Self {
            entries: defaults
                .into_iter()
                .map(|(k, v)| (k.as_str().to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Messages {
    /// Load the catalog from a JSON file of tag → text overrides, merged
    /// over the defaults. Returns `None` if the file is missing or invalid.
    pub fn load_from_file(path: &str) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str::<HashMap<String, String>>(&content) {
            Ok(overrides) => {
                let mut messages = Self::default();
                messages.entries.extend(overrides);
                Some(messages)
            },
            Err(e) => {
                tracing::warn!("Failed to parse {path}: {e}");
                None
            },
        }
    }

    /// Load the catalog from the conventional location.
    ///
    /// Checks env var `MISSILEWARS_MESSAGES` (default `config/messages.json`)
    /// and falls back to the built-in defaults.
    pub fn load() -> Self {
        let path = std::env::var("MISSILEWARS_MESSAGES")
            .unwrap_or_else(|_| "config/messages.json".to_string());
        Self::load_from_file(&path).unwrap_or_default()
    }

    /// Raw text for a key. Unknown tags fall back to the tag itself.
    pub fn get(&self, key: MessageKey) -> &str {
        self.entries
            .get(key.as_str())
            .map(String::as_str)
            .unwrap_or(key.as_str())
    }

    /// Rendered text for a key with `%name%` placeholders substituted.
    pub fn format(&self, key: MessageKey, params: &[(&str, &str)]) -> String {
        let mut text = self.get(key).to_string();
        for (name, value) in params {
            text = text.replace(&format!("%{name}%"), value);
        }
        text
    }
}

pub mod tally;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use missilewars_core::arena::{self, Arena};
use missilewars_core::lobby::MapChooseProcedure;
use missilewars_core::messages::MessageKey;
use missilewars_core::player::PlayerId;

/// Lifecycle of a round's map vote. Advances one way only; a new round gets
/// a fresh `MapVoting`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteState {
    /// Votes are rejected until the lobby opens the vote.
    #[default]
    Idle,
    /// Votes are accepted.
    Open,
    /// Terminal for the round; votes are rejected again.
    Closed,
}

/// Why a vote command was turned away. Carries parameters, never text; hosts
/// render the matching message key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteRejection {
    NotOpenYet,
    AlreadyClosed,
    UnknownArena { input: String },
    NotOffered,
    AlreadySelected { display_name: String },
}

impl VoteRejection {
    pub fn message_key(&self) -> MessageKey {
        match self {
            Self::NotOpenYet => MessageKey::VoteNotStarted,
            Self::AlreadyClosed => MessageKey::VoteAlreadyEnded,
            Self::UnknownArena { .. } => MessageKey::UnknownMap,
            Self::NotOffered => MessageKey::MapNotAvailable,
            Self::AlreadySelected { .. } => MessageKey::MapAlreadySelected,
        }
    }
}

/// Acknowledgement for a recorded vote, naming the chosen arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteAccepted {
    pub display_name: String,
}

/// The map vote for one round: the record of player choices plus the
/// Idle/Open/Closed state machine around it.
///
/// Votes are stored as indexes into the round's offered-arena list, so every
/// recorded choice belongs to the offered set by construction.
#[derive(Debug, Default)]
pub struct MapVoting {
    state: VoteState,
    votes: HashMap<PlayerId, usize>,
}

impl MapVoting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> VoteState {
        self.state
    }

    pub fn total_votes(&self) -> usize {
        self.votes.len()
    }

    /// The offered-arena index `player_id` currently votes for, if any.
    pub fn voted_index_of(&self, player_id: PlayerId) -> Option<usize> {
        self.votes.get(&player_id).copied()
    }

    /// Unlock the vote.
    ///
    /// # Panics
    /// Only a lobby whose map-choose procedure is `MapVoting` may run a
    /// vote; anything else is a programming error.
    pub fn open(&mut self, procedure: MapChooseProcedure) {
        assert_eq!(
            procedure,
            MapChooseProcedure::MapVoting,
            "map vote opened but the lobby chooses maps via {procedure:?}"
        );
        if self.state == VoteState::Closed {
            tracing::warn!("ignoring attempt to reopen a closed map vote");
            return;
        }
        self.state = VoteState::Open;
    }

    /// Lock the vote. Same contract as [`open`](Self::open).
    pub fn close(&mut self, procedure: MapChooseProcedure) {
        assert_eq!(
            procedure,
            MapChooseProcedure::MapVoting,
            "map vote closed but the lobby chooses maps via {procedure:?}"
        );
        self.state = VoteState::Closed;
    }

    /// Record `player_id`'s choice, replacing any earlier one. `catalog` is
    /// every known arena, `offered` the subset playable this round.
    pub fn add_vote(
        &mut self,
        player_id: PlayerId,
        input: &str,
        catalog: &[Arena],
        offered: &[Arena],
    ) -> Result<VoteAccepted, VoteRejection> {
        match self.state {
            VoteState::Idle => return Err(VoteRejection::NotOpenYet),
            VoteState::Closed => return Err(VoteRejection::AlreadyClosed),
            VoteState::Open => {},
        }

        let Some(chosen) = arena::by_name(catalog, input) else {
            return Err(VoteRejection::UnknownArena {
                input: input.to_string(),
            });
        };

        let Some(index) = offered.iter().position(|a| a.name == chosen.name) else {
            return Err(VoteRejection::NotOffered);
        };

        if self.votes.get(&player_id) == Some(&index) {
            return Err(VoteRejection::AlreadySelected {
                display_name: chosen.display_name.clone(),
            });
        }

        self.votes.insert(player_id, index);
        Ok(VoteAccepted {
            display_name: chosen.display_name.clone(),
        })
    }

    /// Display percentage for one offered arena.
    pub fn percent_of(&self, index: usize) -> u32 {
        let votes_for = self.votes.values().filter(|&&i| i == index).count();
        tally::percent(votes_for, self.votes.len())
    }

    /// Close the vote and name the winning offered-arena index. A vote that
    /// never meant anything (one arena offered) or is not open stays
    /// untouched and yields `None`.
    pub fn finalize(
        &mut self,
        procedure: MapChooseProcedure,
        offered: &[Arena],
    ) -> Option<usize> {
        if offered.len() == 1 {
            return None;
        }
        if self.state != VoteState::Open {
            return None;
        }
        self.close(procedure);
        Some(tally::winner(&self.votes, offered))
    }

    /// Drop every recorded vote at round teardown.
    pub fn clear(&mut self) {
        self.votes.clear();
    }
}

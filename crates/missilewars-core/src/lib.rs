pub mod arena;
pub mod lobby;
pub mod messages;
pub mod player;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::arena::Arena;
    use crate::player::{Player, PlayerId};

    /// Create `n` test players with sequential IDs starting at 1.
    pub fn make_players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player {
                id: i as PlayerId + 1,
                display_name: format!("Player{}", i + 1),
                is_spectator: false,
            })
            .collect()
    }

    /// Create `n` arenas named `arena1..arenaN`.
    pub fn make_arenas(n: usize) -> Vec<Arena> {
        (0..n)
            .map(|i| Arena::new(format!("arena{}", i + 1), format!("Arena {}", i + 1)))
            .collect()
    }
}

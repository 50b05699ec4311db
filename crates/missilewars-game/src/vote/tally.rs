use std::collections::HashMap;

use smallvec::{SmallVec, smallvec};

use missilewars_core::arena::Arena;
use missilewars_core::player::PlayerId;

/// Vote share of `votes_for` out of `total` as a whole display percentage
/// (fractions truncate, so 2 of 3 reads as 66%). A zero total is defined as
/// zero rather than a division by zero.
pub fn percent(votes_for: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (votes_for * 100 / total) as u32
}

/// Plurality winner over `votes` (player → offered-arena index).
///
/// No votes fall back to the first offered arena. Ties resolve to the lowest
/// offered-list index, so the result is stable across runs.
pub fn winner(votes: &HashMap<PlayerId, usize>, offered: &[Arena]) -> usize {
    debug_assert!(!offered.is_empty(), "winner needs at least one offered arena");

    let mut counts: SmallVec<[u32; 8]> = smallvec![0; offered.len()];
    for &index in votes.values() {
        if let Some(count) = counts.get_mut(index) {
            *count += 1;
        }
    }

    let mut best = 0;
    for (index, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = index;
        }
    }
    best
}

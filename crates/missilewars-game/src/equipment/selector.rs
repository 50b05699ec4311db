use rand::Rng;

use super::{EquipmentItem, EquipmentPools};

/// Missiles granted before each special/shield draw.
pub const MISSILES_PER_SPECIAL: u8 = 2;

/// Draw the next item and advance the 2-missiles-then-1-special cycle.
///
/// Cycle positions 0 and 1 draw uniformly from the missile pool; position 2
/// draws uniformly from the specials and shields combined, so each side is
/// weighted by its pool size. An empty source pool yields `None` for that
/// draw; the cycle advances either way.
pub fn draw<R: Rng + ?Sized>(
    cycle: &mut u8,
    pools: &EquipmentPools,
    rng: &mut R,
) -> Option<EquipmentItem> {
    if *cycle >= MISSILES_PER_SPECIAL {
        *cycle = 0;
        let specials = pools.specials.len();
        let shields = pools.shields.len();
        if specials + shields == 0 {
            tracing::debug!("special and shield pools are empty, skipping this draw");
            return None;
        }
        let index = rng.random_range(0..specials + shields);
        let item = if index < specials {
            &pools.specials[index]
        } else {
            &pools.shields[index - specials]
        };
        Some(item.clone())
    } else {
        *cycle += 1;
        if pools.missiles.is_empty() {
            tracing::debug!("missile pool is empty, skipping this draw");
            return None;
        }
        let index = rng.random_range(0..pools.missiles.len());
        Some(pools.missiles[index].clone())
    }
}

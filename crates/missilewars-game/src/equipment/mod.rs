pub mod interval;
pub mod scheduler;
pub mod selector;

use serde::{Deserialize, Serialize};

use crate::config::{EquipmentConfig, ItemSpec};

/// Category of a grantable item template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentKind {
    Missile,
    Special,
    Shield,
}

/// An item template handed to a player on countdown expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub name: String,
    pub kind: EquipmentKind,
    pub amount: u32,
}

/// The three draw pools for one round. Read-only once built; shared across
/// all per-player schedulers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentPools {
    pub missiles: Vec<EquipmentItem>,
    pub specials: Vec<EquipmentItem>,
    pub shields: Vec<EquipmentItem>,
}

impl EquipmentPools {
    /// Expand configured specs into draw pools. An item appears once per
    /// occurrence point, so higher occurrences are drawn more often;
    /// occurrence 0 drops the item from its pool.
    pub fn from_config(config: &EquipmentConfig) -> Self {
        Self {
            missiles: expand(&config.missiles, EquipmentKind::Missile),
            specials: expand(&config.specials, EquipmentKind::Special),
            shields: expand(&config.shields, EquipmentKind::Shield),
        }
    }
}

fn expand(specs: &[ItemSpec], kind: EquipmentKind) -> Vec<EquipmentItem> {
    let mut pool = Vec::new();
    for spec in specs {
        for _ in 0..spec.occurrence {
            pool.push(EquipmentItem {
                name: spec.name.clone(),
                kind,
                amount: spec.amount,
            });
        }
    }
    pool
}

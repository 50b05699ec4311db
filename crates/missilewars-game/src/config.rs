use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Data-driven settings for one arena (equipment intervals, pools, duration).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    /// Round duration in minutes.
    pub game_duration_mins: u32,
    pub interval: IntervalConfig,
    pub equipment: EquipmentConfig,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            game_duration_mins: 20,
            interval: IntervalConfig::default(),
            equipment: EquipmentConfig::default(),
        }
    }
}

impl ArenaSettings {
    /// Load settings from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("MISSILEWARS_ARENA_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(settings) = toml::from_str::<Self>(&contents)
        {
            return settings;
        }
        if let Ok(contents) = std::fs::read_to_string("config/arena.toml")
            && let Ok(settings) = toml::from_str::<Self>(&contents)
        {
            return settings;
        }
        Self::default()
    }

    pub fn game_duration_secs(&self) -> u32 {
        self.game_duration_mins * 60
    }
}

/// Equipment countdown intervals for one arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalConfig {
    /// Fixed countdown applied when a player enters the round; absent means
    /// the computed basis interval is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    /// Fixed countdown applied after a respawn; absent means the computed
    /// basis interval is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respawn: Option<u32>,
    /// Whether a respawn restarts the countdown at all.
    pub reset_after_respawn: bool,
    /// Countdown seconds by team-size threshold; the greatest threshold at
    /// or below the current team size applies.
    #[serde(with = "int_keys")]
    pub by_team_size: BTreeMap<u32, u32>,
    /// Countdown factor by elapsed-seconds threshold; the smallest threshold
    /// at or above the current game time applies.
    #[serde(with = "int_keys")]
    pub factor_by_game_time: BTreeMap<u32, f64>,
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            start: None,
            respawn: None,
            reset_after_respawn: true,
            by_team_size: BTreeMap::from([(1, 20), (4, 15)]),
            factor_by_game_time: BTreeMap::from([(1080, 1.0), (1200, 2.0)]),
        }
    }
}

/// Equipment pool contents for one arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentConfig {
    pub missiles: Vec<ItemSpec>,
    pub specials: Vec<ItemSpec>,
    pub shields: Vec<ItemSpec>,
}

impl Default for EquipmentConfig {
    fn default() -> Self {
        Self {
            missiles: vec![
                ItemSpec {
                    occurrence: 2,
                    ..ItemSpec::new("Tomahawk")
                },
                ItemSpec::new("Guardian"),
                ItemSpec::new("Juggernaut"),
                ItemSpec::new("Piranha"),
            ],
            specials: vec![
                ItemSpec {
                    amount: 3,
                    occurrence: 2,
                    ..ItemSpec::new("Arrows")
                },
                ItemSpec::new("Fireball"),
            ],
            shields: vec![ItemSpec::new("Shield")],
        }
    }
}

/// One configured item template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub name: String,
    /// Stack size handed to the player.
    #[serde(default = "default_amount")]
    pub amount: u32,
    /// Spawn weight: the item enters its pool this many times; 0 removes it.
    #[serde(default = "default_occurrence")]
    pub occurrence: u32,
}

impl ItemSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: default_amount(),
            occurrence: default_occurrence(),
        }
    }
}

fn default_amount() -> u32 {
    1
}

fn default_occurrence() -> u32 {
    1
}

/// TOML table keys arrive as strings; interval thresholds are integers.
mod int_keys {
    use std::collections::BTreeMap;

    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, V>(map: &BTreeMap<u32, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        serializer.collect_map(map.iter().map(|(k, v)| (k.to_string(), v)))
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<BTreeMap<u32, V>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        let raw = BTreeMap::<String, V>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(k, v)| {
                k.trim()
                    .parse::<u32>()
                    .map(|k| (k, v))
                    .map_err(|_| D::Error::custom(format!("invalid interval threshold '{k}'")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_keyed_interval_tables() {
        let settings: ArenaSettings = toml::from_str(
            r#"
            game_duration_mins = 30

            [interval]
            start = 10
            reset_after_respawn = false

            [interval.by_team_size]
            1 = 30
            3 = 20

            [interval.factor_by_game_time]
            600 = 1.0
            1800 = 1.5
            "#,
        )
        .unwrap();

        assert_eq!(settings.game_duration_secs(), 1800);
        assert_eq!(settings.interval.start, Some(10));
        assert_eq!(settings.interval.respawn, None);
        assert!(!settings.interval.reset_after_respawn);
        assert_eq!(settings.interval.by_team_size[&3], 20);
        assert_eq!(settings.interval.factor_by_game_time[&1800], 1.5);
    }

    #[test]
    fn rejects_non_numeric_thresholds() {
        let result = toml::from_str::<ArenaSettings>(
            r#"
            [interval.by_team_size]
            abc = 30
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn item_spec_defaults() {
        let settings: ArenaSettings = toml::from_str(
            r#"
            [[equipment.missiles]]
            name = "Tomahawk"

            [[equipment.specials]]
            name = "Arrows"
            amount = 3
            occurrence = 2
            "#,
        )
        .unwrap();

        let missile = &settings.equipment.missiles[0];
        assert_eq!(missile.amount, 1);
        assert_eq!(missile.occurrence, 1);
        let special = &settings.equipment.specials[0];
        assert_eq!(special.amount, 3);
        assert_eq!(special.occurrence, 2);
    }

    #[test]
    fn toml_roundtrip_preserves_settings() {
        let settings = ArenaSettings::default();
        let text = toml::to_string(&settings).unwrap();
        let loaded: ArenaSettings = toml::from_str(&text).unwrap();
        assert_eq!(settings.game_duration_mins, loaded.game_duration_mins);
        assert_eq!(settings.interval.by_team_size, loaded.interval.by_team_size);
        assert_eq!(
            settings.interval.factor_by_game_time,
            loaded.interval.factor_by_game_time
        );
    }

    #[test]
    fn load_falls_back_to_defaults() {
        // Point at a nonexistent file so no TOML is found.
        unsafe {
            std::env::set_var("MISSILEWARS_ARENA_CONFIG", "/nonexistent/arena.toml");
        }
        let settings = ArenaSettings::load();
        assert_eq!(settings.game_duration_mins, ArenaSettings::default().game_duration_mins);
        unsafe {
            std::env::remove_var("MISSILEWARS_ARENA_CONFIG");
        }
    }
}

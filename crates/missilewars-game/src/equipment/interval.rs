use std::collections::BTreeMap;

use crate::config::IntervalConfig;

/// Fallback countdown seconds when the team-size table yields nothing.
pub const DEFAULT_TEAM_INTERVAL: u32 = 20;
/// Fallback factor when the game-time table yields nothing.
pub const DEFAULT_TIME_FACTOR: f64 = 1.0;

/// Countdown seconds for a team of `team_size`: the value of the greatest
/// configured threshold at or below the size.
pub fn interval_for_team_size(table: &BTreeMap<u32, u32>, team_size: u32) -> u32 {
    if table.is_empty() {
        tracing::warn!(
            "team-size interval table is empty, using default of {DEFAULT_TEAM_INTERVAL}s"
        );
        return DEFAULT_TEAM_INTERVAL;
    }
    if team_size == 0 {
        tracing::debug!("team size of 0 has no interval threshold, using default");
        return DEFAULT_TEAM_INTERVAL;
    }
    match table.range(1..=team_size).next_back() {
        Some((_, &secs)) => secs,
        None => {
            tracing::debug!(
                team_size,
                "no interval threshold at or below team size, using {DEFAULT_TEAM_INTERVAL}s"
            );
            DEFAULT_TEAM_INTERVAL
        },
    }
}

/// Interval factor for the current game time: the value of the smallest
/// configured threshold at or above `elapsed_secs`. Thresholds beyond the
/// maximum game duration never apply.
pub fn factor_for_game_time(
    table: &BTreeMap<u32, f64>,
    elapsed_secs: u32,
    max_duration_secs: u32,
) -> f64 {
    if table.is_empty() {
        tracing::warn!("game-time factor table is empty, using default of {DEFAULT_TIME_FACTOR}");
        return DEFAULT_TIME_FACTOR;
    }
    if elapsed_secs > max_duration_secs {
        tracing::debug!(
            elapsed_secs,
            max_duration_secs,
            "game time past the configured duration, using default factor"
        );
        return DEFAULT_TIME_FACTOR;
    }
    match table.range(elapsed_secs..=max_duration_secs).next() {
        Some((_, &factor)) => factor,
        None => {
            tracing::debug!(
                elapsed_secs,
                "no factor threshold at or above game time, using default of {DEFAULT_TIME_FACTOR}"
            );
            DEFAULT_TIME_FACTOR
        },
    }
}

/// Countdown length derived from team size and game time. Never below one
/// tick, whatever the configuration produces.
pub fn basis_interval(
    config: &IntervalConfig,
    team_size: u32,
    elapsed_secs: u32,
    max_duration_secs: u32,
) -> u32 {
    let interval = interval_for_team_size(&config.by_team_size, team_size);
    let factor = factor_for_game_time(&config.factor_by_game_time, elapsed_secs, max_duration_secs);
    (f64::from(interval) * factor).ceil().max(1.0) as u32
}

use rand::Rng;

use missilewars_core::player::PlayerId;

use super::{EquipmentPools, interval, selector};
use crate::config::ArenaSettings;
use crate::events::RoundEvent;

/// Per-call scheduling context supplied by the roster and the round clock.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleInputs {
    /// Current size of the player's team.
    pub team_size: u32,
    /// Seconds since the round started.
    pub elapsed_secs: u32,
}

/// Per-player equipment countdown.
///
/// Owned by the round and driven only by the tick loop; the countdown may
/// dip below zero on the expiry tick before it is reset.
#[derive(Debug)]
pub struct EquipmentScheduler {
    player_id: PlayerId,
    remaining: i32,
    cycle: u8,
}

impl EquipmentScheduler {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            remaining: 0,
            cycle: 0,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    pub fn cycle(&self) -> u8 {
        self.cycle
    }

    /// Set the countdown for a player entering the round. A configured start
    /// interval wins over the computed basis interval.
    pub fn initialize(
        &mut self,
        settings: &ArenaSettings,
        inputs: ScheduleInputs,
    ) -> Vec<RoundEvent> {
        let mut events = Vec::new();
        let ticks = settings
            .interval
            .start
            .unwrap_or_else(|| self.basis(settings, inputs));
        self.set_remaining(ticks as i32, &mut events);
        events
    }

    /// Advance the countdown by one tick. On expiry the next item in the
    /// cycle is drawn and the countdown restarts from a freshly computed
    /// basis interval. An empty pool means no item this expiry, nothing more.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        settings: &ArenaSettings,
        inputs: ScheduleInputs,
        pools: &EquipmentPools,
        rng: &mut R,
    ) -> Vec<RoundEvent> {
        let mut events = Vec::new();
        self.set_remaining(self.remaining - 1, &mut events);

        if self.remaining <= 0 {
            if let Some(item) = selector::draw(&mut self.cycle, pools, rng) {
                events.push(RoundEvent::EquipmentGranted {
                    player_id: self.player_id,
                    item,
                });
            }
            let next = self.basis(settings, inputs);
            self.set_remaining(next as i32, &mut events);
        }
        events
    }

    /// Restart the countdown after a respawn, when the arena enables it.
    /// One extra tick compensates for the countdown unit the tick right
    /// after the respawn consumes.
    pub fn reset_on_respawn(
        &mut self,
        settings: &ArenaSettings,
        inputs: ScheduleInputs,
    ) -> Vec<RoundEvent> {
        if !settings.interval.reset_after_respawn {
            return Vec::new();
        }
        let mut events = Vec::new();
        let ticks = settings
            .interval
            .respawn
            .unwrap_or_else(|| self.basis(settings, inputs))
            + 1;
        self.set_remaining(ticks as i32, &mut events);
        events
    }

    fn basis(&self, settings: &ArenaSettings, inputs: ScheduleInputs) -> u32 {
        interval::basis_interval(
            &settings.interval,
            inputs.team_size,
            inputs.elapsed_secs,
            settings.game_duration_secs(),
        )
    }

    /// Every countdown write surfaces the new value for external display.
    fn set_remaining(&mut self, value: i32, events: &mut Vec<RoundEvent>) {
        self.remaining = value;
        events.push(RoundEvent::CountdownSet {
            player_id: self.player_id,
            remaining_secs: value.max(0) as u32,
        });
    }
}

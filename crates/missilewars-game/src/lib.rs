pub mod config;
pub mod equipment;
pub mod events;
pub mod vote;

use std::collections::HashMap;

use rand::Rng;

use missilewars_core::arena::Arena;
use missilewars_core::lobby::{GameState, LobbyConfig, MapChooseProcedure};
use missilewars_core::player::{Player, PlayerId};

use config::ArenaSettings;
use equipment::EquipmentPools;
use equipment::scheduler::{EquipmentScheduler, ScheduleInputs};
use events::RoundEvent;
use vote::{MapVoting, VoteAccepted, VoteRejection};

/// One play session: the map vote during the lobby phase, then per-player
/// equipment scheduling while in game.
///
/// A round exclusively owns its vote record and one scheduler per active
/// player. All mutation funnels through one caller at a time (the host's
/// tick loop and command dispatch serialize onto the round); nothing here
/// blocks or locks.
pub struct Round {
    lobby: LobbyConfig,
    catalog: Vec<Arena>,
    offered: Vec<Arena>,
    voting: MapVoting,
    state: GameState,
    decided: Option<usize>,
    settings: Option<ArenaSettings>,
    pools: Option<EquipmentPools>,
    schedulers: HashMap<PlayerId, EquipmentScheduler>,
}

impl Round {
    /// Build a round over `offered` arenas (a subset of `catalog` by name).
    ///
    /// # Panics
    /// A round without a single offered arena cannot exist.
    pub fn new(lobby: LobbyConfig, catalog: Vec<Arena>, offered: Vec<Arena>) -> Self {
        assert!(!offered.is_empty(), "a round needs at least one offered arena");
        let decided = match lobby.map_choose_procedure {
            MapChooseProcedure::First => Some(0),
            MapChooseProcedure::MapCycle | MapChooseProcedure::MapVoting => None,
        };
        Self {
            lobby,
            catalog,
            offered,
            voting: MapVoting::new(),
            state: GameState::Lobby,
            decided,
            settings: None,
            pools: None,
            schedulers: HashMap::new(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn lobby(&self) -> &LobbyConfig {
        &self.lobby
    }

    pub fn offered(&self) -> &[Arena] {
        &self.offered
    }

    /// The arena this round will play on, once one is decided.
    pub fn decided_arena(&self) -> Option<&Arena> {
        self.decided.map(|index| &self.offered[index])
    }

    pub fn only_one_arena_offered(&self) -> bool {
        self.offered.len() == 1
    }

    pub fn voting(&self) -> &MapVoting {
        &self.voting
    }

    /// Unlock the map vote for the lobby phase.
    pub fn open_vote(&mut self) {
        self.voting.open(self.lobby.map_choose_procedure);
    }

    /// Lock the map vote without deciding an arena.
    pub fn close_vote(&mut self) {
        self.voting.close(self.lobby.map_choose_procedure);
    }

    /// Record a player's map choice.
    pub fn add_vote(
        &mut self,
        player_id: PlayerId,
        arena_name: &str,
    ) -> Result<VoteAccepted, VoteRejection> {
        self.voting
            .add_vote(player_id, arena_name, &self.catalog, &self.offered)
    }

    /// Display percentage for an offered arena, by name.
    pub fn vote_percent(&self, arena_name: &str) -> u32 {
        match self
            .offered
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(arena_name))
        {
            Some(index) => self.voting.percent_of(index),
            None => 0,
        }
    }

    /// Apply an externally chosen arena (First and MapCycle procedures).
    pub fn decide_arena(&mut self, index: usize) {
        if index >= self.offered.len() {
            tracing::warn!(index, "arena index outside the offered set, keeping current choice");
            return;
        }
        self.decided = Some(index);
    }

    /// Close the vote and adopt the winner as the round's arena. Emits the
    /// finished broadcast and the signal to proceed with round preparation;
    /// a vote that is not open (or never meant anything) emits nothing.
    pub fn finalize_vote(&mut self) -> Vec<RoundEvent> {
        let Some(winner) = self
            .voting
            .finalize(self.lobby.map_choose_procedure, &self.offered)
        else {
            return Vec::new();
        };
        self.decided = Some(winner);
        let arena = &self.offered[winner];
        vec![
            RoundEvent::VoteFinished {
                arena: arena.name.clone(),
                display_name: arena.display_name.clone(),
            },
            RoundEvent::RoundPreparing,
        ]
    }

    /// Leave the lobby phase and begin play on the decided arena (the first
    /// offered arena when nothing was decided) with the given settings.
    pub fn start_round(&mut self, settings: ArenaSettings) {
        if self.state != GameState::Lobby {
            tracing::warn!(state = ?self.state, "round can only start from the lobby phase");
            return;
        }
        if self.decided.is_none() {
            self.decided = Some(0);
        }
        self.pools = Some(EquipmentPools::from_config(&settings.equipment));
        self.settings = Some(settings);
        self.state = GameState::InGame;
    }

    /// Create and initialize the equipment countdown for a player entering
    /// the running round. Spectators get none.
    pub fn activate_player(&mut self, player: &Player, inputs: ScheduleInputs) -> Vec<RoundEvent> {
        if self.state != GameState::InGame {
            tracing::warn!(
                player_id = player.id,
                "cannot activate a player outside a running round"
            );
            return Vec::new();
        }
        if player.is_spectator {
            return Vec::new();
        }
        let Some(settings) = self.settings.as_ref() else {
            return Vec::new();
        };
        let mut scheduler = EquipmentScheduler::new(player.id);
        let events = scheduler.initialize(settings, inputs);
        self.schedulers.insert(player.id, scheduler);
        events
    }

    /// Advance one player's equipment countdown by one tick.
    pub fn tick_player<R: Rng + ?Sized>(
        &mut self,
        player_id: PlayerId,
        inputs: ScheduleInputs,
        rng: &mut R,
    ) -> Vec<RoundEvent> {
        let (Some(settings), Some(pools)) = (self.settings.as_ref(), self.pools.as_ref()) else {
            return Vec::new();
        };
        let Some(scheduler) = self.schedulers.get_mut(&player_id) else {
            tracing::debug!(player_id, "tick for a player with no active countdown");
            return Vec::new();
        };
        scheduler.tick(settings, inputs, pools, rng)
    }

    /// Restart a player's countdown after a respawn, when the arena enables
    /// it.
    pub fn respawn_player(
        &mut self,
        player_id: PlayerId,
        inputs: ScheduleInputs,
    ) -> Vec<RoundEvent> {
        let Some(settings) = self.settings.as_ref() else {
            return Vec::new();
        };
        let Some(scheduler) = self.schedulers.get_mut(&player_id) else {
            tracing::debug!(player_id, "respawn for a player with no active countdown");
            return Vec::new();
        };
        scheduler.reset_on_respawn(settings, inputs)
    }

    /// Drop a leaving player's countdown state.
    pub fn player_left(&mut self, player_id: PlayerId) {
        self.schedulers.remove(&player_id);
    }

    pub fn active_player_count(&self) -> usize {
        self.schedulers.len()
    }

    /// Tear the round down: schedulers are dropped and the vote record is
    /// cleared.
    pub fn end_round(&mut self) {
        self.state = GameState::End;
        self.schedulers.clear();
        self.voting.clear();
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use missilewars_core::test_helpers::{make_arenas, make_players};

    use super::*;

    fn voting_round(offered: usize) -> Round {
        let catalog = make_arenas(offered + 1);
        let offered = catalog[..offered].to_vec();
        Round::new(LobbyConfig::default(), catalog, offered)
    }

    fn inputs() -> ScheduleInputs {
        ScheduleInputs {
            team_size: 2,
            elapsed_secs: 0,
        }
    }

    #[test]
    fn first_procedure_decides_immediately() {
        let lobby = LobbyConfig {
            map_choose_procedure: MapChooseProcedure::First,
            ..LobbyConfig::default()
        };
        let arenas = make_arenas(3);
        let round = Round::new(lobby, arenas.clone(), arenas);
        assert_eq!(round.decided_arena().unwrap().name, "arena1");
    }

    #[test]
    fn vote_flow_decides_the_arena_and_emits_the_broadcast() {
        let mut round = voting_round(3);
        assert!(round.decided_arena().is_none());

        round.open_vote();
        round.add_vote(1, "arena2").unwrap();
        round.add_vote(2, "arena2").unwrap();
        round.add_vote(3, "arena1").unwrap();

        let events = round.finalize_vote();
        assert_eq!(
            events,
            vec![
                RoundEvent::VoteFinished {
                    arena: "arena2".to_string(),
                    display_name: "Arena 2".to_string(),
                },
                RoundEvent::RoundPreparing,
            ]
        );
        assert_eq!(round.decided_arena().unwrap().name, "arena2");

        // Finalizing again emits nothing.
        assert!(round.finalize_vote().is_empty());
    }

    #[test]
    fn vote_percent_resolves_names() {
        let mut round = voting_round(2);
        round.open_vote();
        round.add_vote(1, "arena1").unwrap();
        round.add_vote(2, "arena1").unwrap();
        round.add_vote(3, "arena2").unwrap();

        assert_eq!(round.vote_percent("Arena1"), 66);
        assert_eq!(round.vote_percent("arena2"), 33);
        assert_eq!(round.vote_percent("volcano"), 0);
    }

    #[test]
    fn voting_an_unoffered_catalog_arena_is_rejected() {
        let mut round = voting_round(2);
        round.open_vote();
        // arena3 exists in the catalog but is not offered this round.
        assert_eq!(round.add_vote(1, "arena3"), Err(VoteRejection::NotOffered));
    }

    #[test]
    fn round_grants_equipment_through_the_tick_loop() {
        let mut round = voting_round(2);
        round.open_vote();
        round.add_vote(1, "arena1").unwrap();
        round.finalize_vote();
        round.start_round(ArenaSettings::default());
        assert_eq!(round.state(), GameState::InGame);

        let players = make_players(2);
        let mut rng = StdRng::seed_from_u64(5);
        for player in &players {
            let events = round.activate_player(player, inputs());
            assert!(matches!(events[0], RoundEvent::CountdownSet { .. }));
        }
        assert_eq!(round.active_player_count(), 2);

        // Tick player 1 until the countdown expires once.
        let mut granted = false;
        for _ in 0..64 {
            let events = round.tick_player(1, inputs(), &mut rng);
            if events
                .iter()
                .any(|e| matches!(e, RoundEvent::EquipmentGranted { player_id: 1, .. }))
            {
                granted = true;
                break;
            }
        }
        assert!(granted, "countdown never expired");
    }

    #[test]
    fn spectators_and_unknown_players_get_no_countdown() {
        let mut round = voting_round(1);
        round.start_round(ArenaSettings::default());

        let mut spectator = make_players(1).remove(0);
        spectator.is_spectator = true;
        assert!(round.activate_player(&spectator, inputs()).is_empty());

        let mut rng = StdRng::seed_from_u64(5);
        assert!(round.tick_player(99, inputs(), &mut rng).is_empty());
        assert!(round.respawn_player(99, inputs()).is_empty());
    }

    #[test]
    fn starting_without_a_decision_falls_back_to_the_first_arena() {
        let mut round = voting_round(1);
        // One offered arena: the vote is meaningless and never finalizes.
        round.open_vote();
        assert!(round.finalize_vote().is_empty());

        round.start_round(ArenaSettings::default());
        assert_eq!(round.decided_arena().unwrap().name, "arena1");
    }

    #[test]
    fn round_end_clears_per_round_state() {
        let mut round = voting_round(2);
        round.open_vote();
        round.add_vote(1, "arena1").unwrap();
        round.finalize_vote();
        round.start_round(ArenaSettings::default());
        let players = make_players(2);
        for player in &players {
            round.activate_player(player, inputs());
        }

        round.end_round();
        assert_eq!(round.state(), GameState::End);
        assert_eq!(round.active_player_count(), 0);
        assert_eq!(round.voting().total_votes(), 0);

        // A finished round does not restart.
        round.start_round(ArenaSettings::default());
        assert_eq!(round.state(), GameState::End);
    }

    #[test]
    fn player_left_drops_the_scheduler() {
        let mut round = voting_round(1);
        round.start_round(ArenaSettings::default());
        let players = make_players(2);
        for player in &players {
            round.activate_player(player, inputs());
        }
        round.player_left(1);
        assert_eq!(round.active_player_count(), 1);

        let mut rng = StdRng::seed_from_u64(5);
        assert!(round.tick_player(1, inputs(), &mut rng).is_empty());
        assert!(!round.tick_player(2, inputs(), &mut rng).is_empty());
    }

    #[test]
    #[should_panic(expected = "at least one offered arena")]
    fn a_round_without_offered_arenas_is_a_contract_violation() {
        Round::new(LobbyConfig::default(), make_arenas(2), Vec::new());
    }
}

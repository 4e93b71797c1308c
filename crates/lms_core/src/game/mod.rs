//! Match lifecycle.
//!
//! A [`Game`] owns everything about one running match: participant and
//! spectator membership, the per-participant [`PlayerSnapshot`]s taken
//! before the match mutates anyone, and the lifecycle phase. All mutation
//! of a game happens synchronously inside the event callback that
//! triggered it; the core spawns no threads of its own.
//!
//! A participant is "alive" exactly while its snapshot is held. Removing
//! and restoring the snapshot is what takes a player out of the match,
//! whether through death or teardown.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::host::{PlayerId, WorldApi};
use crate::models::arena::Arena;
use crate::models::item::GameMode;
use crate::models::snapshot::PlayerSnapshot;

/// Lifecycle phase. Strictly forward: `Created -> Starting -> Active ->
/// Ended`, no transition back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Created,
    Starting,
    Active,
    Ended,
}

/// All state for one active last-man-standing match.
#[derive(Debug)]
pub struct Game {
    arena: Arena,
    phase: GamePhase,
    participants: HashSet<PlayerId>,
    spectators: HashSet<PlayerId>,
    snapshots: HashMap<PlayerId, PlayerSnapshot>,
}

impl Game {
    pub fn new(arena: Arena, participants: HashSet<PlayerId>) -> Self {
        Self {
            arena,
            phase: GamePhase::Created,
            participants,
            spectators: HashSet::new(),
            snapshots: HashMap::new(),
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn participants(&self) -> &HashSet<PlayerId> {
        &self.participants
    }

    pub fn spectators(&self) -> &HashSet<PlayerId> {
        &self.spectators
    }

    /// Whether the participant still holds a snapshot, i.e. is alive.
    pub fn is_alive(&self, player: PlayerId) -> bool {
        self.snapshots.contains_key(&player)
    }

    pub fn add_spectator(&mut self, player: PlayerId) -> bool {
        self.spectators.insert(player)
    }

    pub fn remove_spectator(&mut self, player: PlayerId) -> bool {
        self.spectators.remove(&player)
    }

    /// The last participant standing, once exactly one snapshot remains.
    pub fn winner(&self) -> Option<PlayerId> {
        if self.snapshots.len() == 1 {
            self.snapshots.keys().next().copied()
        } else {
            None
        }
    }

    /// Initializes the match: snapshots every participant, teleports them
    /// to arena spawns, installs kits and switches them to adventure mode.
    ///
    /// Snapshots are taken for all participants before any mutation, so
    /// restoration is exact even if a later step fails.
    pub fn start<R: Rng>(
        &mut self,
        world: &mut dyn WorldApi,
        rng: &mut R,
    ) -> Result<(), GameError> {
        if self.phase != GamePhase::Created {
            return Err(GameError::Phase { expected: GamePhase::Created, actual: self.phase });
        }
        self.phase = GamePhase::Starting;

        self.snapshot_participants(world)?;
        self.teleport_participants(world, rng)?;
        self.load_kits(world, rng)?;

        self.phase = GamePhase::Active;
        log::info!(
            "match started in arena '{}' with {} participants",
            self.arena.name,
            self.participants.len()
        );
        Ok(())
    }

    fn snapshot_participants(&mut self, world: &dyn WorldApi) -> Result<(), GameError> {
        for &player in &self.participants {
            let snapshot = PlayerSnapshot::capture(world, player)?;
            self.snapshots.insert(player, snapshot);
        }
        Ok(())
    }

    fn teleport_participants<R: Rng>(
        &self,
        world: &mut dyn WorldApi,
        rng: &mut R,
    ) -> Result<(), GameError> {
        for &player in &self.participants {
            let spawn = self
                .arena
                .random_spawn(rng)
                .ok_or_else(|| GameError::Config(format!("arena '{}' has no spawn points", self.arena.name)))?;
            world.teleport(player, spawn)?;
        }
        Ok(())
    }

    fn load_kits<R: Rng>(&self, world: &mut dyn WorldApi, rng: &mut R) -> Result<(), GameError> {
        let settings = &self.arena.settings;
        for &player in &self.participants {
            let contents = settings.inventory.iter().map(|rule| rule.try_create(rng)).collect();
            world.set_inventory(player, contents)?;
            world.set_armour(
                player,
                [
                    settings.helmet.as_ref().map(|rule| rule.force_create(rng)),
                    settings.chestplate.as_ref().map(|rule| rule.force_create(rng)),
                    settings.leggings.as_ref().map(|rule| rule.force_create(rng)),
                    settings.boots.as_ref().map(|rule| rule.force_create(rng)),
                ],
            )?;
            world.set_game_mode(player, GameMode::Adventure)?;
        }
        log::debug!("kits issued to {} participants", self.participants.len());
        Ok(())
    }

    /// Registers a participant death: restores the pre-match snapshot and
    /// takes the player out of the match.
    ///
    /// Silent no-op for non-members and for participants already restored,
    /// so spurious or repeated death events are harmless.
    pub fn player_death(
        &mut self,
        world: &mut dyn WorldApi,
        player: PlayerId,
    ) -> Result<(), GameError> {
        if !self.participants.contains(&player) {
            return Ok(());
        }

        if let Some(snapshot) = self.snapshots.remove(&player) {
            snapshot.restore(world, player)?;
            log::info!("participant {player} is out ({} still standing)", self.snapshots.len());
        }
        Ok(())
    }

    /// Tears the match down: restores every remaining participant and
    /// moves to `Ended`. Idempotent once ended.
    pub fn end(&mut self, world: &mut dyn WorldApi) -> Result<(), GameError> {
        if self.phase == GamePhase::Ended {
            return Ok(());
        }

        let remaining: Vec<PlayerId> = self.snapshots.keys().copied().collect();
        for player in remaining {
            if let Some(snapshot) = self.snapshots.remove(&player) {
                snapshot.restore(world, player)?;
            }
        }

        self.phase = GamePhase::Ended;
        log::info!("match in arena '{}' ended", self.arena.name);
        Ok(())
    }

    /// Periodic liveness hook.
    ///
    /// Intentionally a no-op extension point, reserved for fail-safe
    /// checks such as detecting participants who left the server
    /// mid-match.
    pub fn pulse(&mut self) {}
}

/// Holder for the (at most one) running game.
#[derive(Debug, Default)]
pub struct GameTask {
    game: Option<Game>,
}

impl GameTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_game(&self) -> bool {
        self.game.is_some()
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut Game> {
        self.game.as_mut()
    }

    pub fn set_game(&mut self, game: Game) {
        self.game = Some(game);
    }

    pub fn clear_game(&mut self) -> Option<Game> {
        self.game.take()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::host::mock::MockWorld;
    use crate::loot::ItemFactory;
    use crate::models::item::ItemStack;
    use crate::models::position::{BlockPos, EntityPos, Region};
    use crate::settings::ArenaSettings;
    use crate::store::{GeometryIndex, MemoryGeometryStore};

    use super::*;

    fn test_arena(settings: ArenaSettings) -> Arena {
        let index = GeometryIndex::new(MemoryGeometryStore::new());
        let region = Region::new(
            BlockPos::new("arena", 0.0, 0.0, 0.0),
            BlockPos::new("arena", 64.0, 128.0, 64.0),
        );
        let spawns = vec![
            EntityPos::new("arena", 8.0, 65.0, 8.0, 0.0, 0.0),
            EntityPos::new("arena", 56.0, 65.0, 56.0, 180.0, 0.0),
        ];
        Arena::register(&index, "colosseum", &region, spawns, settings).unwrap()
    }

    fn kit_settings() -> ArenaSettings {
        ArenaSettings {
            inventory: vec![ItemFactory::new("stone_sword"), ItemFactory::new("golden_apple")],
            helmet: Some(ItemFactory::new("iron_helmet")),
            ..ArenaSettings::default()
        }
    }

    fn lobby_pos() -> EntityPos {
        EntityPos::new("lobby", -100.0, 70.0, -100.0, 0.0, 0.0)
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(99)
    }

    fn setup(
        participants: usize,
    ) -> (MockWorld, Game, Vec<PlayerId>) {
        let mut world = MockWorld::new();
        let mut ids = Vec::new();
        for i in 0..participants {
            let inventory = vec![Some(ItemStack::new(format!("keepsake_{i}"), 1)), None];
            ids.push(world.spawn_player(lobby_pos(), GameMode::Survival, inventory));
        }
        let game = Game::new(test_arena(kit_settings()), ids.iter().copied().collect());
        (world, game, ids)
    }

    #[test]
    fn start_moves_players_into_arena() {
        let (mut world, mut game, ids) = setup(2);
        game.start(&mut world, &mut rng()).unwrap();

        assert_eq!(game.phase(), GamePhase::Active);
        for &id in &ids {
            let player = world.player(id);
            assert_eq!(player.location.world, "arena");
            assert_eq!(player.mode, GameMode::Adventure);
            assert_eq!(player.inventory.len(), 2);
            assert_eq!(player.armour[0].as_ref().unwrap().material, "iron_helmet");
            assert!(game.is_alive(id));
        }
    }

    #[test]
    fn death_restores_pre_match_state() {
        let (mut world, mut game, ids) = setup(2);
        let before = world.player(ids[0]).clone();

        game.start(&mut world, &mut rng()).unwrap();
        game.player_death(&mut world, ids[0]).unwrap();

        let after = world.player(ids[0]);
        assert_eq!(after.location, before.location);
        assert_eq!(after.inventory, before.inventory);
        assert_eq!(after.mode, before.mode);
        assert!(!game.is_alive(ids[0]));
        assert!(game.is_alive(ids[1]));
    }

    #[test]
    fn repeated_death_is_idempotent() {
        let (mut world, mut game, ids) = setup(2);
        game.start(&mut world, &mut rng()).unwrap();
        game.player_death(&mut world, ids[0]).unwrap();
        let restored = world.player(ids[0]).clone();

        game.player_death(&mut world, ids[0]).unwrap();
        assert_eq!(world.player(ids[0]).inventory, restored.inventory);
        assert_eq!(world.player(ids[0]).location, restored.location);
    }

    #[test]
    fn death_of_non_member_is_no_op() {
        let (mut world, mut game, _ids) = setup(2);
        game.start(&mut world, &mut rng()).unwrap();

        let outsider =
            world.spawn_player(lobby_pos(), GameMode::Creative, vec![None]);
        game.player_death(&mut world, outsider).unwrap();

        let player = world.player(outsider);
        assert_eq!(player.mode, GameMode::Creative);
        assert_eq!(player.location, lobby_pos());
    }

    #[test]
    fn winner_is_last_snapshot_holder() {
        let (mut world, mut game, ids) = setup(3);
        game.start(&mut world, &mut rng()).unwrap();
        assert_eq!(game.winner(), None);

        game.player_death(&mut world, ids[0]).unwrap();
        assert_eq!(game.winner(), None);

        game.player_death(&mut world, ids[1]).unwrap();
        assert_eq!(game.winner(), Some(ids[2]));
    }

    #[test]
    fn end_restores_all_remaining() {
        let (mut world, mut game, ids) = setup(3);
        let before: Vec<_> = ids.iter().map(|&id| world.player(id).clone()).collect();

        game.start(&mut world, &mut rng()).unwrap();
        game.player_death(&mut world, ids[0]).unwrap();
        game.end(&mut world).unwrap();

        assert_eq!(game.phase(), GamePhase::Ended);
        for (&id, original) in ids.iter().zip(&before) {
            let player = world.player(id);
            assert_eq!(player.location, original.location);
            assert_eq!(player.inventory, original.inventory);
            assert_eq!(player.mode, original.mode);
        }

        // Second teardown is a no-op.
        game.end(&mut world).unwrap();
        assert_eq!(game.phase(), GamePhase::Ended);
    }

    #[test]
    fn start_twice_is_a_phase_error() {
        let (mut world, mut game, _ids) = setup(1);
        game.start(&mut world, &mut rng()).unwrap();
        assert!(matches!(
            game.start(&mut world, &mut rng()),
            Err(GameError::Phase { expected: GamePhase::Created, actual: GamePhase::Active })
        ));
    }

    #[test]
    fn spectators_are_untouched_by_start() {
        let (mut world, mut game, _ids) = setup(1);
        let spectator = world.spawn_player(lobby_pos(), GameMode::Survival, vec![None]);
        game.add_spectator(spectator);

        game.start(&mut world, &mut rng()).unwrap();

        let player = world.player(spectator);
        assert_eq!(player.location, lobby_pos());
        assert_eq!(player.mode, GameMode::Survival);
        assert!(!game.is_alive(spectator));
        assert!(game.spectators().contains(&spectator));
    }

    #[test]
    fn kit_rules_with_partial_chance_can_leave_gaps() {
        let settings = ArenaSettings {
            inventory: vec![
                ItemFactory::new("stone_sword"),
                ItemFactory { chance: 0.0, ..ItemFactory::new("ender_pearl") },
            ],
            ..ArenaSettings::default()
        };
        let mut world = MockWorld::new();
        let id = world.spawn_player(lobby_pos(), GameMode::Survival, vec![None]);
        let mut game = Game::new(test_arena(settings), [id].into_iter().collect());

        game.start(&mut world, &mut rng()).unwrap();

        let inventory = &world.player(id).inventory;
        assert_eq!(inventory[0].as_ref().unwrap().material, "stone_sword");
        assert!(inventory[1].is_none());
    }

    #[test]
    fn game_task_holds_at_most_one_game() {
        let (_world, game, _ids) = setup(1);
        let mut task = GameTask::new();
        assert!(!task.has_game());

        task.set_game(game);
        assert!(task.has_game());
        assert!(task.game().is_some());

        let taken = task.clear_game();
        assert!(taken.is_some());
        assert!(!task.has_game());
    }
}

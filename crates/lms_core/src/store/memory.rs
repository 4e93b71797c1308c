//! In-memory geometry store.

use std::sync::Mutex;

use crate::models::position::{BlockPos, EntityPos};

use super::{BlockPosId, GeometryStore, PosId, RegionId, StoreError, WorldId};

#[derive(Debug)]
struct PosRow {
    world: WorldId,
    pos: EntityPos,
}

#[derive(Debug)]
struct BlockPosRow {
    world: WorldId,
    pos: BlockPos,
}

#[derive(Debug, Default)]
struct Tables {
    worlds: Vec<String>,
    positions: Vec<PosRow>,
    block_positions: Vec<BlockPosRow>,
    regions: Vec<(BlockPosId, BlockPosId)>,
}

/// Geometry tables backed by plain vectors. Ids are row indices and are
/// never reused.
#[derive(Debug, Default)]
pub struct MemoryGeometryStore {
    tables: Mutex<Tables>,
}

impl MemoryGeometryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GeometryStore for MemoryGeometryStore {
    fn find_world(&self, name: &str) -> Result<Option<WorldId>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.worlds.iter().position(|w| w == name).map(|i| WorldId(i as u64)))
    }

    fn create_world(&self, name: &str) -> Result<WorldId, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables.worlds.push(name.to_owned());
        Ok(WorldId(tables.worlds.len() as u64 - 1))
    }

    fn find_pos(&self, world: WorldId, pos: &EntityPos) -> Result<Option<PosId>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .positions
            .iter()
            .position(|row| row.world == world && row.pos.matches(pos))
            .map(|i| PosId(i as u64)))
    }

    fn create_pos(&self, world: WorldId, pos: &EntityPos) -> Result<PosId, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables.positions.push(PosRow { world, pos: pos.clone() });
        log::debug!("persisted position row {} in world {:?}", tables.positions.len() - 1, world);
        Ok(PosId(tables.positions.len() as u64 - 1))
    }

    fn find_block_pos(
        &self,
        world: WorldId,
        pos: &BlockPos,
    ) -> Result<Option<BlockPosId>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .block_positions
            .iter()
            .position(|row| row.world == world && row.pos.matches(pos))
            .map(|i| BlockPosId(i as u64)))
    }

    fn create_block_pos(
        &self,
        world: WorldId,
        pos: &BlockPos,
    ) -> Result<BlockPosId, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables.block_positions.push(BlockPosRow { world, pos: pos.clone() });
        Ok(BlockPosId(tables.block_positions.len() as u64 - 1))
    }

    fn find_region(
        &self,
        min: BlockPosId,
        max: BlockPosId,
    ) -> Result<Option<RegionId>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .regions
            .iter()
            .position(|&(rmin, rmax)| rmin == min && rmax == max)
            .map(|i| RegionId(i as u64)))
    }

    fn create_region(&self, min: BlockPosId, max: BlockPosId) -> Result<RegionId, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables.regions.push((min, max));
        log::debug!("persisted region row {}", tables.regions.len() - 1);
        Ok(RegionId(tables.regions.len() as u64 - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_rows_are_exact_match() {
        let store = MemoryGeometryStore::new();
        let id = store.create_world("arena").unwrap();
        assert_eq!(store.find_world("arena").unwrap(), Some(id));
        assert_eq!(store.find_world("Arena").unwrap(), None);
    }

    #[test]
    fn position_lookup_is_fuzzy() {
        let store = MemoryGeometryStore::new();
        let world = store.create_world("arena").unwrap();
        let pos = EntityPos::new("arena", 1.0, 2.0, 3.0, 0.0, 0.0);
        let id = store.create_pos(world, &pos).unwrap();

        let near = EntityPos::new("arena", 1.00004, 2.0, 3.0, 0.0, 0.0);
        assert_eq!(store.find_pos(world, &near).unwrap(), Some(id));

        let far = EntityPos::new("arena", 1.5, 2.0, 3.0, 0.0, 0.0);
        assert_eq!(store.find_pos(world, &far).unwrap(), None);
    }

    #[test]
    fn position_lookup_is_world_scoped() {
        let store = MemoryGeometryStore::new();
        let arena = store.create_world("arena").unwrap();
        let lobby = store.create_world("lobby").unwrap();
        let pos = EntityPos::new("arena", 1.0, 2.0, 3.0, 0.0, 0.0);
        store.create_pos(arena, &pos).unwrap();
        assert_eq!(store.find_pos(lobby, &pos).unwrap(), None);
    }
}

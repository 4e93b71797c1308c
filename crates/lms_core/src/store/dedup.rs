//! Canonicalization: deduplication-by-lookup over a [`GeometryStore`].

use std::sync::Mutex;

use crate::error::GameError;
use crate::models::position::{BlockPos, EntityPos, Region};

use super::{BlockPosId, GeometryStore, PosId, RegionId, WorldId};

/// Deduplicating front door to a geometry store.
///
/// Every canonicalization holds one internal lock across its
/// find-then-create sequence, so two near-identical inputs arriving
/// concurrently through the same index still collapse onto a single row.
/// (The underlying store alone does not give that guarantee.)
#[derive(Debug)]
pub struct GeometryIndex<S: GeometryStore> {
    store: S,
    guard: Mutex<()>,
}

impl<S: GeometryStore> GeometryIndex<S> {
    pub fn new(store: S) -> Self {
        Self { store, guard: Mutex::new(()) }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Canonical id for a position with orientation.
    ///
    /// Returns the id of an existing row whose every component lies within
    /// tolerance (no side effect), or persists a new row. Fails with
    /// [`GameError::MissingWorld`] when the world identifier is empty.
    pub fn canonicalize_pos(&self, pos: &EntityPos) -> Result<PosId, GameError> {
        if pos.world.is_empty() {
            return Err(GameError::MissingWorld);
        }
        let _guard = self.guard.lock().unwrap();
        let world = self.world_id(&pos.world)?;
        if let Some(id) = self.store.find_pos(world, pos)? {
            return Ok(id);
        }
        Ok(self.store.create_pos(world, pos)?)
    }

    /// Canonical id for a position without orientation.
    pub fn canonicalize_block_pos(&self, pos: &BlockPos) -> Result<BlockPosId, GameError> {
        let _guard = self.guard.lock().unwrap();
        self.block_pos_locked(pos)
    }

    /// Canonical id for a region.
    ///
    /// Both corners are deduplicated independently first; the region row
    /// is then keyed on the exact pair of corner ids.
    pub fn canonicalize_region(&self, region: &Region) -> Result<RegionId, GameError> {
        let _guard = self.guard.lock().unwrap();
        let min = self.block_pos_locked(&region.min)?;
        let max = self.block_pos_locked(&region.max)?;
        if let Some(id) = self.store.find_region(min, max)? {
            return Ok(id);
        }
        Ok(self.store.create_region(min, max)?)
    }

    // Callers hold `guard`.
    fn block_pos_locked(&self, pos: &BlockPos) -> Result<BlockPosId, GameError> {
        if pos.world.is_empty() {
            return Err(GameError::MissingWorld);
        }
        let world = self.world_id(&pos.world)?;
        if let Some(id) = self.store.find_block_pos(world, pos)? {
            return Ok(id);
        }
        Ok(self.store.create_block_pos(world, pos)?)
    }

    // World names deduplicate by exact match. Callers hold `guard`.
    fn world_id(&self, name: &str) -> Result<WorldId, GameError> {
        if let Some(id) = self.store.find_world(name)? {
            return Ok(id);
        }
        Ok(self.store.create_world(name)?)
    }
}

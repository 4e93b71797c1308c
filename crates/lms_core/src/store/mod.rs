//! Geometry persistence.
//!
//! Arena geometry (worlds, positions, regions) is stored once and referred
//! to by id everywhere else. The [`GeometryStore`] trait exposes bare
//! find/create semantics; [`GeometryIndex`] layers the deduplication
//! algorithm on top and is the only entry point the rest of the crate uses.

mod dedup;
mod memory;

pub use dedup::GeometryIndex;
pub use memory::MemoryGeometryStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::position::{BlockPos, EntityPos};

/// Id of a persisted world name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldId(pub u64);

/// Id of a persisted position with orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PosId(pub u64);

/// Id of a persisted position without orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPosId(pub u64);

/// Id of a persisted region (a pair of corner ids).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionId(pub u64);

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("persistence layer unavailable: {0}")]
    Unavailable(String),
}

/// Find/create access to the geometry tables.
///
/// "Not found" and "found" are the only two outcomes of a lookup; any
/// other failure is a [`StoreError`] and propagates unrecovered.
///
/// The trait itself does not serialize callers: a find followed by a
/// create can race with another thread and produce duplicate rows. Route
/// all canonicalization through one [`GeometryIndex`] to avoid that.
pub trait GeometryStore {
    fn find_world(&self, name: &str) -> Result<Option<WorldId>, StoreError>;
    fn create_world(&self, name: &str) -> Result<WorldId, StoreError>;

    /// Fuzzy lookup: a row matches when it is in `world` and every
    /// component lies within tolerance of `pos`.
    fn find_pos(&self, world: WorldId, pos: &EntityPos) -> Result<Option<PosId>, StoreError>;
    fn create_pos(&self, world: WorldId, pos: &EntityPos) -> Result<PosId, StoreError>;

    fn find_block_pos(
        &self,
        world: WorldId,
        pos: &BlockPos,
    ) -> Result<Option<BlockPosId>, StoreError>;
    fn create_block_pos(&self, world: WorldId, pos: &BlockPos)
        -> Result<BlockPosId, StoreError>;

    /// Exact lookup on the pair of already-canonical corner ids.
    fn find_region(
        &self,
        min: BlockPosId,
        max: BlockPosId,
    ) -> Result<Option<RegionId>, StoreError>;
    fn create_region(&self, min: BlockPosId, max: BlockPosId) -> Result<RegionId, StoreError>;
}

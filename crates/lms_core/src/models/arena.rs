//! Arena definitions.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::GameError;
use crate::models::position::{EntityPos, Region};
use crate::settings::ArenaSettings;
use crate::store::{GeometryIndex, GeometryStore, PosId, RegionId};

/// A registered arena: canonical geometry plus its kit settings.
#[derive(Debug, Clone)]
pub struct Arena {
    pub name: String,
    pub region: RegionId,
    pub spawns: Vec<EntityPos>,
    pub spawn_ids: Vec<PosId>,
    pub settings: ArenaSettings,
}

impl Arena {
    /// Registers an arena, resolving its geometry to canonical ids.
    ///
    /// The bounding region and every spawn point go through the geometry
    /// index exactly once, here. An arena without spawn points is
    /// rejected: the game could not place participants.
    pub fn register<S: GeometryStore>(
        index: &GeometryIndex<S>,
        name: impl Into<String>,
        region: &Region,
        spawns: Vec<EntityPos>,
        settings: ArenaSettings,
    ) -> Result<Self, GameError> {
        let name = name.into();
        if spawns.is_empty() {
            return Err(GameError::Config(format!("arena '{name}' has no spawn points")));
        }

        let region = index.canonicalize_region(region)?;
        let mut spawn_ids = Vec::with_capacity(spawns.len());
        for spawn in &spawns {
            spawn_ids.push(index.canonicalize_pos(spawn)?);
        }

        log::info!("registered arena '{}' with {} spawns", name, spawns.len());
        Ok(Self { name, region, spawns, spawn_ids, settings })
    }

    /// A uniformly chosen spawn point, or `None` when the spawn list is
    /// empty.
    pub fn random_spawn<R: Rng>(&self, rng: &mut R) -> Option<&EntityPos> {
        self.spawns.choose(rng)
    }
}

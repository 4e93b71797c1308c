//! The host world/entity surface the core calls.
//!
//! The core has no world model of its own; the hosting runtime supplies
//! inventory access, teleportation and game-mode control through this
//! trait. A mock implementation for tests lives in [`mock`].

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GameError;
use crate::models::item::{GameMode, ItemStack};
use crate::models::position::EntityPos;

/// Identity of a player known to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(Uuid);

impl PlayerId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Host world/entity operations used by the game lifecycle.
///
/// Implementations should surface host failures as
/// [`GameError::Host`]; the core never retries.
pub trait WorldApi {
    fn inventory(&self, player: PlayerId) -> Result<Vec<Option<ItemStack>>, GameError>;
    fn set_inventory(
        &mut self,
        player: PlayerId,
        contents: Vec<Option<ItemStack>>,
    ) -> Result<(), GameError>;

    /// Worn armour as `[helmet, chestplate, leggings, boots]`.
    fn armour(&self, player: PlayerId) -> Result<[Option<ItemStack>; 4], GameError>;
    fn set_armour(
        &mut self,
        player: PlayerId,
        armour: [Option<ItemStack>; 4],
    ) -> Result<(), GameError>;

    fn location(&self, player: PlayerId) -> Result<EntityPos, GameError>;
    fn teleport(&mut self, player: PlayerId, pos: &EntityPos) -> Result<(), GameError>;

    fn game_mode(&self, player: PlayerId) -> Result<GameMode, GameError>;
    fn set_game_mode(&mut self, player: PlayerId, mode: GameMode) -> Result<(), GameError>;
}

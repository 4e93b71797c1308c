//! Pre-match player state capture.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::host::{PlayerId, WorldApi};
use crate::models::item::{GameMode, ItemStack};
use crate::models::position::EntityPos;

/// Everything the game mutates on a participant, captured before the first
/// mutation so restoration is exact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub inventory: Vec<Option<ItemStack>>,
    pub armour: [Option<ItemStack>; 4],
    pub location: EntityPos,
    pub mode: GameMode,
}

impl PlayerSnapshot {
    /// Captures the player's current inventory, armour, location and mode.
    pub fn capture(world: &dyn WorldApi, player: PlayerId) -> Result<Self, GameError> {
        Ok(Self {
            inventory: world.inventory(player)?,
            armour: world.armour(player)?,
            location: world.location(player)?,
            mode: world.game_mode(player)?,
        })
    }

    /// Puts the player back exactly as captured.
    ///
    /// Consumes the snapshot: a capture is restored at most once.
    pub fn restore(self, world: &mut dyn WorldApi, player: PlayerId) -> Result<(), GameError> {
        world.teleport(player, &self.location)?;
        world.set_inventory(player, self.inventory)?;
        world.set_armour(player, self.armour)?;
        world.set_game_mode(player, self.mode)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip() {
        let snapshot = PlayerSnapshot {
            inventory: vec![Some(ItemStack::new("bread", 12)), None],
            armour: [Some(ItemStack::new("iron_helmet", 1)), None, None, None],
            location: EntityPos::new("lobby", 4.5, 70.0, -2.0, 90.0, 0.0),
            mode: GameMode::Survival,
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: PlayerSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}

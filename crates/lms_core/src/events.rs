//! Host event dispatch.
//!
//! The host event bus registers one handler per event kind and forwards
//! them all here. Events that do not concern an active match are dropped
//! silently.

use crate::error::GameError;
use crate::game::{GamePhase, GameTask};
use crate::host::{PlayerId, WorldApi};

/// Events delivered by the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    PlayerDeath(PlayerId),
    /// Periodic tick from the host scheduler.
    Pulse,
}

impl GameTask {
    /// Routes a host event into the running game.
    ///
    /// No-op when no game is running or the game is not active yet.
    pub fn handle_event(
        &mut self,
        world: &mut dyn WorldApi,
        event: HostEvent,
    ) -> Result<(), GameError> {
        let Some(game) = self.game_mut() else {
            return Ok(());
        };
        if game.phase() != GamePhase::Active {
            return Ok(());
        }

        match event {
            HostEvent::PlayerDeath(player) => game.player_death(world, player),
            HostEvent::Pulse => {
                game.pulse();
                Ok(())
            }
        }
    }
}

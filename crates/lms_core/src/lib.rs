//! # lms_core - Last Man Standing Minigame Core
//!
//! Core logic for a last-man-standing minigame hosted inside a game
//! server runtime. The host supplies the event bus, the world/entity API
//! and the players; this crate owns everything in between:
//!
//! - arena geometry deduplication against a persistence store
//!   ([`store`]),
//! - chance-weighted kit/loot generation from configuration ([`loot`],
//!   [`settings`]),
//! - the match lifecycle with exact pre-match state restoration
//!   ([`game`], [`events`]).
//!
//! The host surface is abstracted behind [`host::WorldApi`]; the crate
//! introduces no threads and mutates a match only from within the event
//! callback that triggered the mutation.

pub mod error;
pub mod events;
pub mod game;
pub mod host;
pub mod loot;
pub mod models;
pub mod settings;
pub mod store;

pub use error::{GameError, Result};
pub use events::HostEvent;
pub use game::{Game, GamePhase, GameTask};
pub use host::{PlayerId, WorldApi};
pub use loot::ItemFactory;
pub use models::{Arena, BlockPos, EntityPos, GameMode, ItemStack, PlayerSnapshot, Region};
pub use settings::ArenaSettings;
pub use store::{GeometryIndex, GeometryStore, MemoryGeometryStore};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

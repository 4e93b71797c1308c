pub mod arena;
pub mod item;
pub mod position;
pub mod snapshot;

pub use arena::Arena;
pub use item::{GameMode, ItemStack};
pub use position::{BlockPos, EntityPos, Region, TOLERANCE};
pub use snapshot::PlayerSnapshot;

use thiserror::Error;

use crate::game::GamePhase;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("position has no world reference")]
    MissingWorld,

    #[error("invalid game phase: expected {expected:?}, found {actual:?}")]
    Phase { expected: GamePhase, actual: GamePhase },

    #[error("persistence error: {0}")]
    Store(#[from] StoreError),

    #[error("malformed configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("host API error: {0}")]
    Host(String),
}

pub type Result<T> = std::result::Result<T, GameError>;

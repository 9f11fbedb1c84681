use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Viewport and tile sizes do not describe a usable layout")]
    InvalidLayout,
    #[error("Invalid game configuration")]
    InvalidConfig,
}

pub type Result<T> = core::result::Result<T, GameError>;

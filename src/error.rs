//! Error types for restitch

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Group not found: {0}")]
    GroupNotFound(usize),

    #[error("Fragment not found: {0}")]
    FragmentNotFound(u32),

    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;

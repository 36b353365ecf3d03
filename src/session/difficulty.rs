//! Puzzle difficulty levels

use crate::{PuzzleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty controls how much of the group starts pre-filled and how
/// many decoy fragments are mixed into the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Fraction of playable positions locked from the start
    pub fn prefill_fraction(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Medium => 0.4,
            Difficulty::Hard => 0.1,
        }
    }

    /// Number of decoy draws from other groups
    pub fn decoy_count(&self) -> usize {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 3,
            Difficulty::Hard => 6,
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(PuzzleError::ParseError(format!("Invalid difficulty: {}", s))),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

//! restitch - document reconstruction puzzles
//!
//! Compiles a structured text document into a reconstruction puzzle:
//! the document is segmented into typed, ordered fragments, a subset is
//! scrambled together with decoys from other sections, and the player
//! reassembles the original order under permutation-tolerant rules.

pub mod core;
pub mod engine;
pub mod error;
pub mod parser;
pub mod render;
pub mod session;

pub use error::{PuzzleError, Result};

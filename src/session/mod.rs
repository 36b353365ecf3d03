//! Puzzle sessions: generation, placement, correctness, events

pub mod difficulty;
pub mod evaluator;
pub mod events;
pub mod generator;
pub mod snapshot;
pub mod state;
pub mod transition;

pub use difficulty::Difficulty;
pub use evaluator::{block_fully_restored, slot_correct, slot_status, win_condition, SlotStatus};
pub use events::{EventLog, SessionEvent, VerbosityLevel};
pub use generator::generate;
pub use snapshot::SessionSnapshot;
pub use state::PuzzleSession;
pub use transition::{WinScheduler, WIN_DISPLAY_DELAY};

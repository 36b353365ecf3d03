//! Session event log
//!
//! Captures the discrete events collaborators subscribe to (session
//! started, fragment picked up / placed / removed, group restored) with
//! an in-memory buffer and optional stdout echo controlled by verbosity.

use crate::core::FragmentId;
use crate::session::difficulty::Difficulty;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much event output to echo to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum VerbosityLevel {
    /// No echo; events are still captured in memory
    Silent,
    /// Echo structural events (start, place, remove, restore)
    #[default]
    Normal,
    /// Also echo pool selection events
    Verbose,
}

/// Discrete player/engine events exposed to collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    SessionStarted {
        group_index: usize,
        difficulty: Difficulty,
    },
    FragmentSelected {
        fragment: FragmentId,
    },
    FragmentDeselected {
        fragment: FragmentId,
    },
    FragmentPlaced {
        slot: usize,
        fragment: FragmentId,
    },
    FragmentRemoved {
        slot: usize,
        fragment: FragmentId,
    },
    GroupRestored {
        group_index: usize,
    },
}

impl SessionEvent {
    fn is_pool_selection(&self) -> bool {
        matches!(
            self,
            SessionEvent::FragmentSelected { .. } | SessionEvent::FragmentDeselected { .. }
        )
    }
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEvent::SessionStarted {
                group_index,
                difficulty,
            } => write!(f, "session started: group {} ({})", group_index, difficulty),
            SessionEvent::FragmentSelected { fragment } => {
                write!(f, "selected fragment {}", fragment)
            }
            SessionEvent::FragmentDeselected { fragment } => {
                write!(f, "deselected fragment {}", fragment)
            }
            SessionEvent::FragmentPlaced { slot, fragment } => {
                write!(f, "placed fragment {} in slot {}", fragment, slot)
            }
            SessionEvent::FragmentRemoved { slot, fragment } => {
                write!(f, "removed fragment {} from slot {}", fragment, slot)
            }
            SessionEvent::GroupRestored { group_index } => {
                write!(f, "group {} restored", group_index)
            }
        }
    }
}

/// In-memory event buffer with verbosity-gated stdout echo
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    verbosity: VerbosityLevel,
    entries: Vec<SessionEvent>,
}

impl EventLog {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        EventLog {
            verbosity,
            entries: Vec::new(),
        }
    }

    pub fn log(&mut self, event: SessionEvent) {
        let echo = match self.verbosity {
            VerbosityLevel::Silent => false,
            VerbosityLevel::Normal => !event.is_pool_selection(),
            VerbosityLevel::Verbose => true,
        };
        if echo {
            println!("{}", event);
        }
        self.entries.push(event);
    }

    pub fn entries(&self) -> &[SessionEvent] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

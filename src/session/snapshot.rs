//! Session snapshot for host view resumption
//!
//! Hosts persist only fragment ids plus the session parameters; on
//! restore, ids are resolved against the parsed document. The prefilled
//! set travels as an ordered list so any serialization format works.

use crate::core::{Document, Fragment, FragmentId};
use crate::session::difficulty::Difficulty;
use crate::session::state::PuzzleSession;
use crate::{PuzzleError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serializable capture of one puzzle session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub group_index: usize,
    pub difficulty: Difficulty,
    /// Per-slot occupant ids, in slot order
    pub slots: Vec<Option<FragmentId>>,
    /// Prefilled positions as an ordered list
    pub prefilled: Vec<usize>,
    /// Pool superset ids, preserving shuffle order
    pub pool_items: Vec<FragmentId>,
}

impl SessionSnapshot {
    pub fn capture(session: &PuzzleSession) -> Self {
        SessionSnapshot {
            group_index: session.group_index,
            difficulty: session.difficulty,
            slots: session
                .slots
                .iter()
                .map(|s| s.as_ref().map(|f| f.id))
                .collect(),
            prefilled: session.prefilled.iter().copied().collect(),
            pool_items: session.pool_items.iter().map(|f| f.id).collect(),
        }
    }

    /// Rebuild a live session by resolving ids against the document
    pub fn restore(&self, document: &Document) -> Result<PuzzleSession> {
        let index = document.id_index();
        let resolve = |id: FragmentId| -> Result<Fragment> {
            index
                .get(&id)
                .map(|f| (*f).clone())
                .ok_or(PuzzleError::FragmentNotFound(id.as_u32()))
        };

        let mut slots = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            slots.push(match slot {
                Some(id) => Some(resolve(*id)?),
                None => None,
            });
        }

        let mut pool_items = Vec::with_capacity(self.pool_items.len());
        for &id in &self.pool_items {
            pool_items.push(resolve(id)?);
        }

        Ok(PuzzleSession {
            group_index: self.group_index,
            difficulty: self.difficulty,
            slots,
            prefilled: self.prefilled.iter().copied().collect(),
            pool_items,
            epoch: 0,
        })
    }

    /// Save the snapshot as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PuzzleError::SerializationError(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a snapshot from JSON
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| PuzzleError::SerializationError(e.to_string()))
    }
}

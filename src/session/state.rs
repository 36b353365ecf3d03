//! Puzzle session state and the placement engine
//!
//! A session is transient play state for one group. All mutations are
//! local, run to completion, and never fatal: invalid placements are
//! reported as errors and leave the session untouched.

use crate::core::{Fragment, FragmentId};
use crate::session::difficulty::Difficulty;
use crate::{PuzzleError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Transient play state for one group
///
/// `pool_items` is the immutable superset built at generation time (own
/// fragments plus decoys); the visible pool is always derived from it by
/// subtracting whatever currently occupies a slot. There is deliberately
/// no second mutable pool-membership collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleSession {
    /// Index of the group being played
    pub group_index: usize,

    pub difficulty: Difficulty,

    /// One slot per fragment of the group, in original order
    pub slots: Vec<Option<Fragment>>,

    /// Positions locked from the start (BTreeSet serializes as an
    /// ordered list, which is the host resume representation)
    pub prefilled: BTreeSet<usize>,

    /// Superset of placeable fragments, shuffled at generation time
    pub pool_items: Vec<Fragment>,

    /// Monotonic session identity used to ignore stale win timers
    pub epoch: u64,
}

impl PuzzleSession {
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// A slot is locked when it was pre-filled or holds a static fragment
    pub fn is_locked(&self, slot: usize) -> bool {
        self.prefilled.contains(&slot)
            || self.slots.get(slot).is_some_and(|s| {
                s.as_ref().is_some_and(|fragment| fragment.is_static)
            })
    }

    fn occupies_slot(&self, id: FragmentId) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|fragment| fragment.id == id)
    }

    /// The visible pool: pool items minus fragments occupying a slot
    pub fn available_pool(&self) -> Vec<&Fragment> {
        self.pool_items
            .iter()
            .filter(|fragment| !self.occupies_slot(fragment.id))
            .collect()
    }

    /// Place a pool fragment into a slot
    ///
    /// Fails if the slot is out of range or locked, or the fragment is
    /// not available in the pool. Placing over a non-locked occupant is
    /// allowed; the occupant falls back into the derived pool.
    pub fn place(&mut self, slot: usize, fragment_id: FragmentId) -> Result<()> {
        if slot >= self.slots.len() {
            return Err(PuzzleError::InvalidPlacement(format!(
                "slot {} out of range (0..{})",
                slot,
                self.slots.len()
            )));
        }
        if self.is_locked(slot) {
            return Err(PuzzleError::InvalidPlacement(format!(
                "slot {} is locked",
                slot
            )));
        }
        let fragment = self
            .pool_items
            .iter()
            .find(|f| f.id == fragment_id && !self.occupies_slot(f.id))
            .cloned()
            .ok_or_else(|| {
                PuzzleError::InvalidPlacement(format!(
                    "fragment {} is not available in the pool",
                    fragment_id
                ))
            })?;
        self.slots[slot] = Some(fragment);
        Ok(())
    }

    /// Clear a slot, returning its fragment to pool availability
    ///
    /// Fails if the slot is out of range, empty or locked.
    pub fn unplace(&mut self, slot: usize) -> Result<Fragment> {
        if slot >= self.slots.len() {
            return Err(PuzzleError::InvalidPlacement(format!(
                "slot {} out of range (0..{})",
                slot,
                self.slots.len()
            )));
        }
        if self.is_locked(slot) {
            return Err(PuzzleError::InvalidPlacement(format!(
                "slot {} is locked",
                slot
            )));
        }
        self.slots[slot]
            .take()
            .ok_or_else(|| PuzzleError::InvalidPlacement(format!("slot {} is empty", slot)))
    }
}

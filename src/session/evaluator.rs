//! Correctness evaluation
//!
//! Pure functions over (group, slots): per-slot correctness under
//! exact-position or flexible-group equivalence, atomic-block
//! restoration, and the whole-puzzle win condition.

use crate::core::{BlockId, Fragment, Group};
use crate::session::state::PuzzleSession;
use serde::{Deserialize, Serialize};

/// Visual status of one slot, for collaborator styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    Empty,
    Locked,
    Correct,
    Wrong,
}

/// Whether the fragment in a slot is a valid occupant of that position
///
/// True on an exact original-position match, or when the group's
/// original fragment at this index belongs to a flexible group and the
/// placed fragment carries the same flexible-group id. Decoys can never
/// match: their flex ids are document-wide unique to their own run.
pub fn slot_correct(slot: Option<&Fragment>, index: usize, group: &Group) -> bool {
    let Some(placed) = slot else {
        return false;
    };
    if placed.original_index == index && placed.source_group == group.title {
        return true;
    }
    match group.fragment_at(index).and_then(|orig| orig.flex_group_id) {
        Some(flex) => placed.flex_group_id == Some(flex),
        None => false,
    }
}

/// Whether every member of an atomic block sits correctly in its slot
pub fn block_fully_restored(
    block_id: BlockId,
    group: &Group,
    slots: &[Option<Fragment>],
) -> bool {
    group
        .block_members(block_id)
        .iter()
        .all(|&i| slot_correct(slots.get(i).and_then(|s| s.as_ref()), i, group))
}

/// Whole-puzzle win: every slot satisfies correctness
pub fn win_condition(group: &Group, slots: &[Option<Fragment>]) -> bool {
    slots.len() == group.len()
        && (0..slots.len())
            .all(|i| slot_correct(slots.get(i).and_then(|s| s.as_ref()), i, group))
}

/// Status flag for one slot of an active session
pub fn slot_status(session: &PuzzleSession, index: usize, group: &Group) -> SlotStatus {
    if session.is_locked(index) {
        return SlotStatus::Locked;
    }
    match session.slots.get(index).and_then(|s| s.as_ref()) {
        None => SlotStatus::Empty,
        Some(fragment) => {
            if slot_correct(Some(fragment), index, group) {
                SlotStatus::Correct
            } else {
                SlotStatus::Wrong
            }
        }
    }
}

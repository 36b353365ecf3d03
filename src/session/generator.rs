//! Session generation
//!
//! Builds a fresh puzzle session for one group: decides which playable
//! positions start pre-filled (stability scoring), draws decoy fragments
//! from other groups, and shuffles the candidate pool.
//!
//! All randomness comes from the caller-supplied generator, so a fixed
//! seed reproduces the exact same session.

use crate::core::{Document, Fragment};
use crate::session::difficulty::Difficulty;
use crate::session::state::PuzzleSession;
use crate::{PuzzleError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Dominant score keeping sub-headings pre-filled whenever possible
const SUB_HEADING_SCORE: f64 = 999.0;

/// Per-position stability score: shallower fragments are more likely to
/// be pre-filled, jitter breaks deterministic ties
fn stability_score(fragment: &Fragment, rng: &mut impl Rng) -> f64 {
    if fragment.is_sub_heading {
        return SUB_HEADING_SCORE;
    }
    100.0 / (fragment.indentation as f64 / 4.0 + 1.0) + rng.gen_range(0.0..20.0)
}

/// Generate a session for the group at `group_index`
pub fn generate(
    document: &Document,
    group_index: usize,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Result<PuzzleSession> {
    let group = document
        .group(group_index)
        .ok_or(PuzzleError::GroupNotFound(group_index))?;

    let playable = group.playable_indices();

    let mut scored: Vec<(usize, f64)> = playable
        .iter()
        .map(|&i| (i, stability_score(&group.fragments[i], rng)))
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let prefill_count =
        (playable.len() as f64 * difficulty.prefill_fraction()).floor() as usize;
    let prefilled: BTreeSet<usize> = scored
        .iter()
        .take(prefill_count)
        .map(|&(i, _)| i)
        .collect();

    // Statics and pre-filled positions start placed; everything else is empty
    let mut slots: Vec<Option<Fragment>> = vec![None; group.len()];
    for (i, fragment) in group.fragments.iter().enumerate() {
        if fragment.is_static || prefilled.contains(&i) {
            slots[i] = Some(fragment.clone());
        }
    }

    let mut pool_items: Vec<Fragment> = group
        .fragments
        .iter()
        .filter(|f| !f.is_static && !prefilled.contains(&f.original_index))
        .cloned()
        .collect();

    // Decoy draws: uniformly random other group, then uniformly random
    // fragment from it. Statics contribute nothing; duplicates are fine.
    if document.groups.len() > 1 {
        for _ in 0..difficulty.decoy_count() {
            let mut other_index = rng.gen_range(0..document.groups.len() - 1);
            if other_index >= group_index {
                other_index += 1;
            }
            let other = &document.groups[other_index];
            if other.is_empty() {
                continue;
            }
            let fragment = &other.fragments[rng.gen_range(0..other.len())];
            if fragment.is_static {
                continue;
            }
            pool_items.push(fragment.clone());
        }
    }

    pool_items.shuffle(rng);

    Ok(PuzzleSession {
        group_index,
        difficulty,
        slots,
        prefilled,
        pool_items,
        epoch: 0,
    })
}

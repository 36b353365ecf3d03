//! Heading-scoped groups of fragments

use crate::core::fragment::{BlockId, Fragment};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A heading-scoped section of the source document, the unit of puzzle
/// selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Heading text this group was opened by (empty for preamble content
    /// before the first heading)
    pub title: String,

    /// Fragments in original document order
    pub fragments: Vec<Fragment>,

    /// True once every slot in the group satisfies correctness; a restored
    /// group is read-only until the session state is reset externally
    pub is_restored: bool,
}

impl Group {
    pub fn new(title: impl Into<String>) -> Self {
        Group {
            title: title.into(),
            fragments: Vec::new(),
            is_restored: false,
        }
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn fragment_at(&self, index: usize) -> Option<&Fragment> {
        self.fragments.get(index)
    }

    /// Indices of fragments that take part in the shuffle (non-static)
    pub fn playable_indices(&self) -> Vec<usize> {
        self.fragments
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.is_static)
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of every fragment belonging to an atomic block
    pub fn block_members(&self, block_id: BlockId) -> SmallVec<[usize; 8]> {
        self.fragments
            .iter()
            .enumerate()
            .filter(|(_, f)| f.block_id == Some(block_id))
            .map(|(i, _)| i)
            .collect()
    }
}

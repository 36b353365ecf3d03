//! Parsed document: the full ordered group list

use crate::core::fragment::{Fragment, FragmentId};
use crate::core::group::Group;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A fully parsed document
///
/// The path is opaque to the core: it is carried through for rendering
/// collaborators that need document context, never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub path: String,
    pub groups: Vec<Group>,
}

impl Document {
    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    pub fn group_mut(&mut self, index: usize) -> Option<&mut Group> {
        self.groups.get_mut(index)
    }

    pub fn group_titles(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.title.as_str()).collect()
    }

    /// Look up a fragment anywhere in the document by id
    pub fn fragment_by_id(&self, id: FragmentId) -> Option<&Fragment> {
        self.groups
            .iter()
            .flat_map(|g| g.fragments.iter())
            .find(|f| f.id == id)
    }

    /// Document-wide id index for bulk lookups (snapshot restore)
    pub fn id_index(&self) -> FxHashMap<FragmentId, &Fragment> {
        self.groups
            .iter()
            .flat_map(|g| g.fragments.iter())
            .map(|f| (f.id, f))
            .collect()
    }
}

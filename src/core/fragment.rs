//! Fragment data model with simple integer IDs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple integer ID for parsed fragments
///
/// IDs are dense and unique across the whole parsed document, and stable
/// for the lifetime of a session - fragments are never reallocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FragmentId(u32);

impl FragmentId {
    pub fn new(id: u32) -> Self {
        FragmentId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies membership in an atomic multi-line block (table or callout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(u32);

impl BlockId {
    pub fn new(id: u32) -> Self {
        BlockId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// Identifies a maximal run of sibling unordered leaf list fragments that
/// are mutually interchangeable for correctness purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlexGroupId(u32);

impl FlexGroupId {
    pub fn new(id: u32) -> Self {
        FlexGroupId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for FlexGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// One parsed unit of content
///
/// Fragments are created once at parse time and never mutated afterwards,
/// except for the late assignment of `flex_group_id` during the flexible
/// grouping pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Unique across the whole parsed document
    pub id: FragmentId,

    /// Raw source text of the fragment (one line; block members span one
    /// line each)
    pub text: String,

    /// Title of the heading-scoped group this fragment was parsed from
    pub source_group: String,

    /// Position within the owning group's fragment sequence at parse time
    /// (0-based, dense)
    pub original_index: usize,

    /// Normalized leading-whitespace width (tabs expanded to 4 spaces)
    pub indentation: usize,

    /// Literal list marker text ("-", "*", "+", "1.", ...) when the
    /// fragment is a list entry
    pub list_marker: Option<String>,

    /// Never part of the shuffle; always shown in place (table header and
    /// separator rows, callout headers)
    pub is_static: bool,

    /// Sub-level heading (level >= 3), treated as an ordinary playable
    /// fragment rather than a group boundary
    pub is_sub_heading: bool,

    /// Membership in an atomic multi-line block
    pub block_id: Option<BlockId>,

    /// Flexible-group membership; absent for ordered-list items, statics,
    /// sub-headings and items with children
    pub flex_group_id: Option<FlexGroupId>,
}

impl Fragment {
    /// Whether this fragment is a list entry
    pub fn is_list_item(&self) -> bool {
        self.list_marker.is_some()
    }

    /// Whether the list marker is an unordered one (`-`, `*`, `+`)
    pub fn is_unordered(&self) -> bool {
        matches!(self.list_marker.as_deref(), Some("-" | "*" | "+"))
    }

    /// Nesting depth derived from indentation (4 spaces per level)
    pub fn depth(&self) -> usize {
        self.indentation / 4
    }
}

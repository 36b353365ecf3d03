//! Core data model: fragments, groups, documents

pub mod document;
pub mod fragment;
pub mod group;

pub use document::Document;
pub use fragment::{BlockId, FlexGroupId, Fragment, FragmentId};
pub use group::Group;

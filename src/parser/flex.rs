//! Flexible-group assignment
//!
//! Second parsing pass, per group: a maximal run of sibling, unordered,
//! leaf list fragments shares one flexible-group id, making its members
//! mutually interchangeable for correctness purposes. Ordered items,
//! statics, sub-headings and items with children never join a run.

use super::IdAlloc;
use crate::core::Group;

pub(crate) fn assign_flex_groups(group: &mut Group, ids: &mut IdAlloc) {
    // Open parents as (fragment index, indentation); a fragment becomes a
    // parent when the immediately following fragment is indented deeper.
    let mut parents: Vec<(usize, usize)> = Vec::new();
    let mut current = None;
    // (enclosing parent, indentation) of the previous fragment
    let mut prev: Option<(Option<usize>, usize)> = None;

    for i in 0..group.fragments.len() {
        let indent = group.fragments[i].indentation;
        let has_children = group
            .fragments
            .get(i + 1)
            .is_some_and(|next| next.indentation > indent);

        while parents.last().is_some_and(|&(_, p)| p >= indent) {
            parents.pop();
        }
        let parent = parents.last().map(|&(idx, _)| idx);

        let fragment = &group.fragments[i];
        let eligible = fragment.is_unordered()
            && !fragment.is_static
            && !fragment.is_sub_heading
            && !has_children;

        if !eligible {
            current = None;
        } else {
            let continues_run = current.is_some()
                && prev.is_some_and(|(prev_parent, prev_indent)| {
                    parent == prev_parent && indent == prev_indent
                });
            if !continues_run {
                current = Some(ids.flex());
            }
            group.fragments[i].flex_group_id = current;
        }

        prev = Some((parent, indent));
        if has_children {
            parents.push((i, indent));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_document;

    #[test]
    fn test_sibling_unordered_leaves_share_flex_group() {
        let doc = parse_document("# A\n- x\n- y\n- z\n", "doc.md");
        let frags = &doc.groups[0].fragments;
        let id = frags[0].flex_group_id.expect("x has flex id");
        assert_eq!(frags[1].flex_group_id, Some(id));
        assert_eq!(frags[2].flex_group_id, Some(id));
    }

    #[test]
    fn test_single_item_run_still_gets_flex_id() {
        let doc = parse_document("# A\n- only\n", "doc.md");
        assert!(doc.groups[0].fragments[0].flex_group_id.is_some());
    }

    #[test]
    fn test_ordered_items_never_flex() {
        let doc = parse_document("# A\n1. first\n2. second\n", "doc.md");
        assert!(doc.groups[0]
            .fragments
            .iter()
            .all(|f| f.flex_group_id.is_none()));
    }

    #[test]
    fn test_parent_with_children_excluded() {
        let doc = parse_document("# A\n- parent\n    - child a\n    - child b\n", "doc.md");
        let frags = &doc.groups[0].fragments;
        assert!(frags[0].flex_group_id.is_none());
        let id = frags[1].flex_group_id.expect("child a has flex id");
        assert_eq!(frags[2].flex_group_id, Some(id));
    }

    #[test]
    fn test_new_run_after_dedent() {
        let doc = parse_document(
            "# A\n- parent\n    - child\n- sibling a\n- sibling b\n",
            "doc.md",
        );
        let frags = &doc.groups[0].fragments;
        let child = frags[1].flex_group_id.expect("child flex id");
        let sibling = frags[2].flex_group_id.expect("sibling flex id");
        assert_ne!(child, sibling);
        assert_eq!(frags[3].flex_group_id, Some(sibling));
    }

    #[test]
    fn test_interruption_splits_runs() {
        let doc = parse_document("# A\n- x\n- y\nplain text\n- z\n", "doc.md");
        let frags = &doc.groups[0].fragments;
        let first = frags[0].flex_group_id.expect("x flex id");
        assert_eq!(frags[1].flex_group_id, Some(first));
        assert!(frags[2].flex_group_id.is_none());
        let second = frags[3].flex_group_id.expect("z flex id");
        assert_ne!(first, second);
    }

    #[test]
    fn test_indentation_change_splits_runs() {
        let doc = parse_document("# A\n- a\n- b\n  - c\n", "doc.md");
        let frags = &doc.groups[0].fragments;
        // b gains a child, so it is not a leaf and leaves the run
        let a = frags[0].flex_group_id.expect("a flex id");
        assert!(frags[1].flex_group_id.is_none());
        let c = frags[2].flex_group_id.expect("c flex id");
        assert_ne!(a, c);
    }

    #[test]
    fn test_flex_ids_unique_across_groups() {
        let doc = parse_document("# A\n- x\n# B\n- z\n", "doc.md");
        let a = doc.groups[0].fragments[0].flex_group_id.unwrap();
        let b = doc.groups[1].fragments[0].flex_group_id.unwrap();
        assert_ne!(a, b);
    }
}

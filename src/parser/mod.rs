//! Fragment parser
//!
//! Converts raw document text into an ordered list of heading-scoped
//! groups of typed fragments, tagging atomic-block membership (tables,
//! callouts) and flexible-group membership (interchangeable sibling list
//! items).
//!
//! Parsing never fails: malformed markup degrades to ordinary fragments.

pub mod flex;
pub mod line;

use crate::core::{BlockId, Document, FlexGroupId, Fragment, FragmentId, Group};

/// Dense id allocation for fragments, blocks and flexible groups
///
/// All counters are document-wide so ids stay unique across groups for
/// the lifetime of a session.
#[derive(Debug, Default)]
pub(crate) struct IdAlloc {
    next_fragment: u32,
    next_block: u32,
    next_flex: u32,
}

impl IdAlloc {
    fn fragment(&mut self) -> FragmentId {
        let id = FragmentId::new(self.next_fragment);
        self.next_fragment += 1;
        id
    }

    fn block(&mut self) -> BlockId {
        let id = BlockId::new(self.next_block);
        self.next_block += 1;
        id
    }

    pub(crate) fn flex(&mut self) -> FlexGroupId {
        let id = FlexGroupId::new(self.next_flex);
        self.next_flex += 1;
        id
    }
}

/// Parse a whole document into heading-scoped groups
///
/// `path` is opaque and only carried through for collaborator use.
pub fn parse_document(text: &str, path: &str) -> Document {
    // str::lines handles both \n and \r\n endings
    let lines: Vec<&str> = text.lines().collect();
    let mut ids = IdAlloc::default();
    let mut groups: Vec<Group> = Vec::new();
    let mut current = Group::new("");

    let mut i = 0;
    while i < lines.len() {
        let raw = lines[i];

        // Fully empty lines never produce a fragment; whitespace-only
        // lines do.
        if raw.is_empty() {
            i += 1;
            continue;
        }

        if let Some((level, title)) = line::heading_level(raw) {
            if level <= 2 {
                // A heading closes the current group only if it has
                // content; empty groups are discarded.
                if !current.is_empty() {
                    groups.push(current);
                }
                current = Group::new(title);
                i += 1;
                continue;
            }
            // Level >= 3: an ordinary playable fragment, not a boundary
            emit(&mut current, &mut ids, raw, false, true, None);
            i += 1;
            continue;
        }

        if line::is_table_row(raw)
            && lines.get(i + 1).is_some_and(|next| line::is_table_separator(next))
        {
            let block = ids.block();
            emit(&mut current, &mut ids, raw, true, false, Some(block));
            emit(&mut current, &mut ids, lines[i + 1], true, false, Some(block));
            i += 2;
            while i < lines.len() && line::is_table_row(lines[i]) {
                emit(&mut current, &mut ids, lines[i], false, false, Some(block));
                i += 1;
            }
            continue;
        }

        if line::is_callout_header(raw) {
            let block = ids.block();
            emit(&mut current, &mut ids, raw, true, false, Some(block));
            i += 1;
            // A blank or non-quoted line ends the callout without being
            // consumed; the outer loop handles it.
            while i < lines.len() && line::is_callout_member(lines[i]) {
                emit(&mut current, &mut ids, lines[i], false, false, Some(block));
                i += 1;
            }
            continue;
        }

        // Ordinary content, including a `|` line with no valid separator
        emit(&mut current, &mut ids, raw, false, false, None);
        i += 1;
    }

    if !current.is_empty() {
        groups.push(current);
    }

    for group in &mut groups {
        flex::assign_flex_groups(group, &mut ids);
    }

    Document {
        path: path.to_string(),
        groups,
    }
}

fn emit(
    group: &mut Group,
    ids: &mut IdAlloc,
    text: &str,
    is_static: bool,
    is_sub_heading: bool,
    block_id: Option<BlockId>,
) {
    let fragment = Fragment {
        id: ids.fragment(),
        text: text.to_string(),
        source_group: group.title.clone(),
        original_index: group.len(),
        indentation: line::indentation_width(text),
        list_marker: line::list_marker(text).map(String::from),
        is_static,
        is_sub_heading,
        block_id,
        flex_group_id: None,
    };
    group.fragments.push(fragment);
}

impl Document {
    /// Load a document from disk and parse it
    pub fn load(path: &std::path::Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(parse_document(&contents, &path.to_string_lossy()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_scope_groups() {
        let doc = parse_document("# A\none\ntwo\n## B\nthree\n", "doc.md");
        assert_eq!(doc.groups.len(), 2);
        assert_eq!(doc.groups[0].title, "A");
        assert_eq!(doc.groups[0].len(), 2);
        assert_eq!(doc.groups[1].title, "B");
        assert_eq!(doc.groups[1].fragments[0].text, "three");
    }

    #[test]
    fn test_sub_heading_is_ordinary_fragment() {
        let doc = parse_document("# A\n### Sub\nbody\n", "doc.md");
        assert_eq!(doc.groups.len(), 1);
        let sub = &doc.groups[0].fragments[0];
        assert!(sub.is_sub_heading);
        assert!(!sub.is_static);
        assert_eq!(sub.text, "### Sub");
    }

    #[test]
    fn test_preamble_before_first_heading() {
        let doc = parse_document("intro line\n# A\nbody\n", "doc.md");
        assert_eq!(doc.groups.len(), 2);
        assert_eq!(doc.groups[0].title, "");
        assert_eq!(doc.groups[0].fragments[0].text, "intro line");
    }

    #[test]
    fn test_empty_heading_group_discarded() {
        let doc = parse_document("# A\n# B\nbody\n", "doc.md");
        assert_eq!(doc.groups.len(), 1);
        assert_eq!(doc.groups[0].title, "B");
    }

    #[test]
    fn test_table_block() {
        let doc = parse_document("| H |\n|---|\n| r1 |\n| r2 |\n", "doc.md");
        let group = &doc.groups[0];
        assert_eq!(group.len(), 4);
        let block = group.fragments[0].block_id.expect("header has block id");
        assert!(group.fragments.iter().all(|f| f.block_id == Some(block)));
        assert!(group.fragments[0].is_static);
        assert!(group.fragments[1].is_static);
        assert!(!group.fragments[2].is_static);
        assert!(!group.fragments[3].is_static);
    }

    #[test]
    fn test_table_terminates_at_non_pipe_line() {
        let doc = parse_document("| H |\n|---|\n| r1 |\nafter\n", "doc.md");
        let group = &doc.groups[0];
        assert_eq!(group.len(), 4);
        assert_eq!(group.fragments[3].text, "after");
        assert!(group.fragments[3].block_id.is_none());
    }

    #[test]
    fn test_pipe_line_without_separator_is_ordinary() {
        let doc = parse_document("| not a table\nplain\n", "doc.md");
        let group = &doc.groups[0];
        assert_eq!(group.len(), 2);
        assert!(group.fragments[0].block_id.is_none());
        assert!(!group.fragments[0].is_static);
    }

    #[test]
    fn test_callout_block() {
        let doc = parse_document("> [!note] Heads up\n> first\n> second\n", "doc.md");
        let group = &doc.groups[0];
        assert_eq!(group.len(), 3);
        let block = group.fragments[0].block_id.expect("callout block id");
        assert!(group.fragments[0].is_static);
        assert!(group.fragments.iter().all(|f| f.block_id == Some(block)));
    }

    #[test]
    fn test_callout_stops_at_blank_line() {
        let doc = parse_document("> [!note] N\n> body\n\nafter\n", "doc.md");
        let group = &doc.groups[0];
        assert_eq!(group.len(), 3);
        assert_eq!(group.fragments[2].text, "after");
        assert!(group.fragments[2].block_id.is_none());
    }

    #[test]
    fn test_blank_vs_whitespace_only_lines() {
        let doc = parse_document("# A\n\n   \nbody\n", "doc.md");
        let group = &doc.groups[0];
        // The zero-length line is skipped, the whitespace-only line is not
        assert_eq!(group.len(), 2);
        assert_eq!(group.fragments[0].text, "   ");
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = parse_document("# A\r\n- x\r\n- y\r\n", "doc.md");
        let group = &doc.groups[0];
        assert_eq!(group.len(), 2);
        assert_eq!(group.fragments[0].text, "- x");
    }

    #[test]
    fn test_original_index_dense_per_group() {
        let doc = parse_document("# A\none\ntwo\n# B\nthree\nfour\n", "doc.md");
        for group in &doc.groups {
            for (i, fragment) in group.fragments.iter().enumerate() {
                assert_eq!(fragment.original_index, i);
                assert_eq!(fragment.source_group, group.title);
            }
        }
    }

    #[test]
    fn test_ids_unique_across_document() {
        let doc = parse_document("# A\none\n# B\ntwo\nthree\n", "doc.md");
        let mut seen = std::collections::HashSet::new();
        for group in &doc.groups {
            for fragment in &group.fragments {
                assert!(seen.insert(fragment.id), "duplicate id {}", fragment.id);
            }
        }
    }

    #[test]
    fn test_idempotent_parse() {
        let text = "# A\n- x\n- y\n| H |\n|---|\n| r |\n## B\n> [!tip] T\n> t1\n";
        let a = parse_document(text, "doc.md");
        let b = parse_document(text, "doc.md");
        assert_eq!(a, b);
    }
}

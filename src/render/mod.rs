//! Rendering collaborator seam
//!
//! The core never renders markup itself; a collaborator converts raw
//! fragment text into a presentational form. This module defines the
//! trait, the snippet preparation rules (marker stripping, paragraph
//! unwrapping) and a per-view cache keyed by (text, mode).

use crate::parser::line::split_list_marker;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Whether a conversion covers a whole multi-line block or a single
/// fragment snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderMode {
    Block,
    Snippet,
}

/// Converts raw fragment text to a presentational form
///
/// Implemented by the host; `doc_path` is the opaque document context
/// the converter may need for link resolution.
pub trait FragmentRenderer {
    fn render(&self, text: &str, mode: RenderMode, doc_path: &str) -> String;
}

/// Identity renderer for tests and the CLI
#[derive(Debug, Default)]
pub struct PlainRenderer;

impl FragmentRenderer for PlainRenderer {
    fn render(&self, text: &str, _mode: RenderMode, _doc_path: &str) -> String {
        text.to_string()
    }
}

/// Strip a single leading list marker for snippet rendering; the marker
/// is displayed separately as a structural hint
pub fn prepare_snippet(text: &str) -> &str {
    match split_list_marker(text) {
        Some((_, rest)) => rest,
        None => text,
    }
}

/// Unwrap a single `<p>...</p>` wrapper so the inline result is used
/// directly; anything else passes through unchanged
pub fn unwrap_paragraph(rendered: &str) -> &str {
    let trimmed = rendered.trim();
    if let Some(inner) = trimmed
        .strip_prefix("<p>")
        .and_then(|rest| rest.strip_suffix("</p>"))
    {
        if !inner.contains("<p>") {
            return inner;
        }
    }
    trimmed
}

/// Rendered-text cache with a lifetime bound to one active view
///
/// Cleared on view teardown; results already handed out are owned
/// strings and unaffected by a clear.
#[derive(Debug, Default)]
pub struct RenderCache {
    entries: FxHashMap<(String, RenderMode), String>,
}

impl RenderCache {
    pub fn new() -> Self {
        RenderCache {
            entries: FxHashMap::default(),
        }
    }

    /// Render through the cache, applying snippet preparation and
    /// paragraph unwrapping for snippet mode
    pub fn render(
        &mut self,
        renderer: &dyn FragmentRenderer,
        text: &str,
        mode: RenderMode,
        doc_path: &str,
    ) -> String {
        let key = (text.to_string(), mode);
        if let Some(hit) = self.entries.get(&key) {
            return hit.clone();
        }
        let rendered = match mode {
            RenderMode::Block => renderer.render(text, mode, doc_path),
            RenderMode::Snippet => {
                let converted = renderer.render(prepare_snippet(text), mode, doc_path);
                unwrap_paragraph(&converted).to_string()
            }
        };
        self.entries.insert(key, rendered.clone());
        rendered
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

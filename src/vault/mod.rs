//! Vault access layer
//!
//! Provides the two collaborator seams the relevance engine is built
//! against: a note store (load, list, link-graph traversal) and a keyword
//! search index (title, content, tag). Both are implemented by [`FsVault`],
//! which reads a directory of markdown notes with YAML frontmatter and
//! `[[wikilinks]]`.

pub mod fs;

pub use fs::FsVault;

use crate::error::Result;
use crate::types::Note;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Inline `#tag` pattern: starts with a letter, may contain nested segments
static INLINE_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([A-Za-z][A-Za-z0-9_/-]*)").expect("valid inline tag pattern"));

/// Note store contract: load notes and walk the link graph
pub trait NoteStore {
    /// Load a note by vault-relative path
    fn load(&self, path: &Path) -> Result<Note>;

    /// All notes in the vault
    fn list_all(&self) -> Result<Vec<Note>>;

    /// Paths reachable from `anchor` within `depth` hops
    ///
    /// Follows outgoing wikilinks, and backlinks too when
    /// `include_backlinks` is set, at every hop. The anchor itself is not
    /// part of the result.
    fn traverse(
        &self,
        anchor: &Path,
        depth: usize,
        include_backlinks: bool,
    ) -> Result<BTreeSet<PathBuf>>;

    /// Modification timestamp from a fresh storage stat
    fn modified_at(&self, path: &Path) -> Result<DateTime<Utc>>;
}

/// Keyword search contract over the vault
///
/// Title and content matching is case-insensitive substring; tag matching is
/// case-insensitive exact.
pub trait SearchIndex {
    fn search_by_title(&self, term: &str) -> Result<Vec<Note>>;
    fn search_content(&self, term: &str) -> Result<Vec<Note>>;
    fn search_by_tag(&self, term: &str) -> Result<Vec<Note>>;
}

/// Extract the full tag set of a note
///
/// Union of frontmatter `tags` (a YAML sequence, or a comma-separated
/// string) and inline `#tags` found in the content.
pub fn extract_all_tags(note: &Note) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();

    match note.frontmatter.get("tags") {
        Some(serde_yaml::Value::Sequence(seq)) => {
            for value in seq {
                if let Some(tag) = value.as_str() {
                    let tag = tag.trim().trim_start_matches('#');
                    if !tag.is_empty() {
                        tags.insert(tag.to_string());
                    }
                }
            }
        }
        Some(serde_yaml::Value::String(s)) => {
            for tag in s.split(',') {
                let tag = tag.trim().trim_start_matches('#');
                if !tag.is_empty() {
                    tags.insert(tag.to_string());
                }
            }
        }
        _ => {}
    }

    for capture in INLINE_TAG_RE.captures_iter(&note.content) {
        tags.insert(capture[1].to_string());
    }

    tags
}

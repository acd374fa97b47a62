//! Relevance engine: hybrid anchor search plus bounded graph expansion
//!
//! Turns a free-text query into a deduplicated, metadata-enriched candidate
//! set. Anchor notes come from keyword search over titles, content, and
//! tags; the candidate set is the anchors plus everything reachable over the
//! wikilink graph (both directions) within the traversal depth.
//!
//! This component only reads. Load or stat failures propagate as hard
//! errors; zero matches is a valid terminal outcome, not an error.

use crate::config::STOPWORDS;
use crate::error::Result;
use crate::types::{CandidateNote, Note};
use crate::utils::text::excerpt;
use crate::vault::{extract_all_tags, NoteStore, SearchIndex};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Maximum characters of content used for a derived snippet
const SNIPPET_CHARS: usize = 200;

/// Finds notes relevant to a prep query
pub struct RelevanceEngine<V> {
    vault: Arc<V>,
    max_candidates: usize,
}

impl<V: NoteStore + SearchIndex> RelevanceEngine<V> {
    pub fn new(vault: Arc<V>, max_candidates: usize) -> Self {
        Self {
            vault,
            max_candidates,
        }
    }

    /// Find anchor notes via keyword search
    ///
    /// Searches title and content for the full query, then title, content,
    /// and tags for each lowercase non-stopword word. Hits are deduplicated
    /// by path in first-seen order, matching the order the searches were
    /// issued.
    pub fn find_anchor_notes(&self, query: &str) -> Result<Vec<Note>> {
        fn absorb(hits: Vec<Note>, anchors: &mut Vec<Note>, seen: &mut HashSet<PathBuf>) {
            for note in hits {
                if seen.insert(note.path.clone()) {
                    anchors.push(note);
                }
            }
        }

        let mut seen: HashSet<PathBuf> = HashSet::new();
        let mut anchors: Vec<Note> = Vec::new();

        absorb(self.vault.search_by_title(query)?, &mut anchors, &mut seen);
        absorb(self.vault.search_content(query)?, &mut anchors, &mut seen);

        for word in query.to_lowercase().split_whitespace() {
            if STOPWORDS.contains(&word) {
                continue;
            }
            absorb(self.vault.search_by_title(word)?, &mut anchors, &mut seen);
            absorb(self.vault.search_content(word)?, &mut anchors, &mut seen);
            absorb(self.vault.search_by_tag(word)?, &mut anchors, &mut seen);
        }

        Ok(anchors)
    }

    /// Find all notes relevant to `query`
    ///
    /// Returns at most the configured maximum number of candidates. Zero
    /// anchors yields an empty vec.
    pub fn find_relevant_notes(
        &self,
        query: &str,
        traversal_depth: usize,
    ) -> Result<Vec<CandidateNote>> {
        let anchors = self.find_anchor_notes(query)?;
        debug!("Found {} anchor notes for '{}'", anchors.len(), query);

        if anchors.is_empty() {
            return Ok(Vec::new());
        }

        // Expand over the link graph; order stops mattering here, so the
        // union is just a set of paths
        let mut connected: BTreeSet<PathBuf> = BTreeSet::new();
        for anchor in &anchors {
            connected.insert(anchor.path.clone());
            connected.extend(self.vault.traverse(&anchor.path, traversal_depth, true)?);
        }
        debug!("Graph expansion reached {} notes", connected.len());

        // Anchors are already loaded; reuse them instead of reloading
        let loaded: HashMap<&PathBuf, &Note> =
            anchors.iter().map(|note| (&note.path, note)).collect();

        let mut candidates = Vec::new();
        for path in connected {
            if candidates.len() >= self.max_candidates {
                break;
            }

            let note = match loaded.get(&path) {
                Some(note) => (*note).clone(),
                None => self.vault.load(&path)?,
            };

            let tags = extract_all_tags(&note);
            let category = frontmatter_str(&note, "type")
                .or_else(|| frontmatter_str(&note, "category"));
            let snippet = frontmatter_str(&note, "summary")
                .unwrap_or_else(|| excerpt(&note.content, SNIPPET_CHARS));
            let modified_at = self.vault.modified_at(&path)?;

            candidates.push(CandidateNote {
                title: note.title,
                path,
                tags,
                category,
                snippet,
                modified_at,
            });
        }

        debug!("Materialized {} candidates", candidates.len());
        Ok(candidates)
    }
}

/// Non-empty string value of a frontmatter key
fn frontmatter_str(note: &Note, key: &str) -> Option<String> {
    note.frontmatter
        .get(key)
        .and_then(|value| value.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

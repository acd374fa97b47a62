//! `vaultprep search` — keyword search across titles, content, and tags

use crate::cli::print_matches;
use crate::config::STOPWORDS;
use crate::error::Result;
use crate::types::{MatchKind, Note, SearchMatch};
use crate::vault::{extract_all_tags, FsVault, NoteStore, SearchIndex};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub fn run(vault_dir: &Path, query: &str, json: bool) -> Result<()> {
    let vault = FsVault::open(vault_dir)?;

    let words: Vec<String> = query
        .to_lowercase()
        .split_whitespace()
        .filter(|word| !STOPWORDS.contains(word))
        .map(String::from)
        .collect();

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut matches: Vec<SearchMatch> = Vec::new();

    let mut absorb = |hits: Vec<Note>, kind: MatchKind| {
        for note in hits {
            if seen.insert(note.path.clone()) {
                matches.push(to_match(&vault, note, kind));
            }
        }
    };

    // Full query first, then individual words, per index
    absorb(vault.search_by_title(query)?, MatchKind::Title);
    for word in &words {
        absorb(vault.search_by_title(word)?, MatchKind::Title);
    }

    absorb(vault.search_content(query)?, MatchKind::Content);
    for word in &words {
        absorb(vault.search_content(word)?, MatchKind::Content);
    }

    for word in &words {
        absorb(vault.search_by_tag(word)?, MatchKind::Tag);
    }

    print_matches(&matches, json)
}

fn to_match(vault: &FsVault, note: Note, kind: MatchKind) -> SearchMatch {
    let tags = extract_all_tags(&note);
    let modified_at = vault.modified_at(&note.path).unwrap_or(note.modified_at);
    SearchMatch {
        path: note.path,
        title: note.title,
        tags,
        modified_at,
        match_kind: kind,
        distance: None,
    }
}

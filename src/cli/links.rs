//! `vaultprep links` — notes connected via wikilinks and backlinks

use crate::cli::print_matches;
use crate::error::Result;
use crate::types::{MatchKind, SearchMatch};
use crate::vault::{extract_all_tags, FsVault, NoteStore};
use std::path::Path;

pub fn run(vault_dir: &Path, note: &Path, depth: usize, json: bool) -> Result<()> {
    let vault = FsVault::open(vault_dir)?;

    // Fail early with NoteNotFound rather than an empty listing
    let anchor = vault.load(note)?;

    let distances = vault.hop_distances(&[anchor.path.clone()], depth, true);

    let mut matches: Vec<SearchMatch> = Vec::new();
    for (path, distance) in distances {
        if distance == 0 {
            continue;
        }
        let connected = vault.load(&path)?;
        let tags = extract_all_tags(&connected);
        let modified_at = vault.modified_at(&path).unwrap_or(connected.modified_at);
        matches.push(SearchMatch {
            path,
            title: connected.title,
            tags,
            modified_at,
            match_kind: MatchKind::Link,
            distance: Some(distance),
        });
    }

    // Nearest first
    matches.sort_by_key(|m| m.distance.unwrap_or(usize::MAX));

    print_matches(&matches, json)
}

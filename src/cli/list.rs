//! `vaultprep list` — list vault notes with optional filters

use crate::cli::print_matches;
use crate::error::{PrepError, Result};
use crate::types::{MatchKind, SearchMatch};
use crate::vault::{extract_all_tags, FsVault, NoteStore};
use chrono::{DateTime, Utc};
use std::path::Path;

pub fn run(
    vault_dir: &Path,
    tag: Option<&str>,
    modified_after: Option<&str>,
    json: bool,
) -> Result<()> {
    let vault = FsVault::open(vault_dir)?;

    let cutoff: Option<DateTime<Utc>> = match modified_after {
        Some(raw) => Some(
            DateTime::parse_from_rfc3339(raw)
                .map_err(|e| {
                    PrepError::Other(format!("Invalid modified-after timestamp '{}': {}", raw, e))
                })?
                .with_timezone(&Utc),
        ),
        None => None,
    };

    let mut matches: Vec<SearchMatch> = Vec::new();
    for note in vault.list_all()? {
        let tags = extract_all_tags(&note);

        if let Some(wanted) = tag {
            if !tags.iter().any(|t| t.eq_ignore_ascii_case(wanted)) {
                continue;
            }
        }

        let modified_at = vault.modified_at(&note.path)?;
        if let Some(cutoff) = cutoff {
            if modified_at <= cutoff {
                continue;
            }
        }

        matches.push(SearchMatch {
            path: note.path,
            title: note.title,
            tags,
            modified_at,
            match_kind: MatchKind::List,
            distance: None,
        });
    }

    print_matches(&matches, json)
}

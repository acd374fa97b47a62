//! `vaultprep info` — metadata for a single note

use crate::error::Result;
use crate::vault::{extract_all_tags, FsVault, NoteStore};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct NoteInfo {
    path: PathBuf,
    title: String,
    tags: BTreeSet<String>,
    category: Option<String>,
    modified_at: chrono::DateTime<chrono::Utc>,
    outgoing_links: BTreeSet<PathBuf>,
    backlinks: BTreeSet<PathBuf>,
}

pub fn run(vault_dir: &Path, note: &Path, json: bool) -> Result<()> {
    let vault = FsVault::open(vault_dir)?;
    let loaded = vault.load(note)?;

    let category = ["type", "category"].iter().find_map(|key| {
        loaded
            .frontmatter
            .get(*key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    });

    let info = NoteInfo {
        tags: extract_all_tags(&loaded),
        category,
        modified_at: vault.modified_at(note)?,
        outgoing_links: vault.outgoing_links(note),
        backlinks: vault.backlinks(note),
        path: loaded.path,
        title: loaded.title,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Title:    {}", info.title);
    println!("Path:     {}", info.path.display());
    if let Some(category) = &info.category {
        println!("Category: {}", category);
    }
    if !info.tags.is_empty() {
        println!(
            "Tags:     {}",
            info.tags.iter().cloned().collect::<Vec<_>>().join(", ")
        );
    }
    println!("Modified: {}", info.modified_at.to_rfc3339());

    if !info.outgoing_links.is_empty() {
        println!("\nLinks to:");
        for link in &info.outgoing_links {
            println!("  {}", link.display());
        }
    }
    if !info.backlinks.is_empty() {
        println!("\nLinked from:");
        for link in &info.backlinks {
            println!("  {}", link.display());
        }
    }

    Ok(())
}

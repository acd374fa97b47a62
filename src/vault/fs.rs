//! Filesystem-backed vault
//!
//! Scans a directory of markdown notes once at open, parsing frontmatter and
//! resolving the wikilink graph in both directions. All reads after open are
//! served from the in-memory snapshot, except modification timestamps, which
//! always come from a fresh stat so they reflect current on-disk state.

use crate::error::{PrepError, Result};
use crate::types::Note;
use crate::vault::{extract_all_tags, NoteStore, SearchIndex};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// `[[Target]]`, `[[Target|alias]]`, `[[Target#heading]]`
static WIKILINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\]\|#]+)(?:#[^\]\|]*)?(?:\|[^\]]*)?\]\]").expect("valid wikilink pattern"));

/// A markdown note vault rooted at a directory
#[derive(Debug)]
pub struct FsVault {
    root: PathBuf,
    name: String,
    notes: BTreeMap<PathBuf, Note>,
    links_out: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
    links_in: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
}

impl FsVault {
    /// Open a vault, loading every note and building the link graph
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        if !root.is_dir() {
            return Err(PrepError::VaultAccess(format!(
                "vault directory does not exist: {}",
                root.display()
            )));
        }

        let name = root
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| root.display().to_string());

        let mut notes = BTreeMap::new();

        for entry in WalkDir::new(&root)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        {
            let entry = entry.map_err(|e| PrepError::VaultAccess(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().and_then(|s| s.to_str()) != Some("md") {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(&root)
                .map_err(|e| PrepError::VaultAccess(e.to_string()))?
                .to_path_buf();

            let note = load_note_file(&root, &rel)?;
            notes.insert(rel, note);
        }

        // Resolve wikilinks by file stem, case-insensitively
        let mut stems: HashMap<String, PathBuf> = HashMap::new();
        for path in notes.keys() {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                stems.entry(stem.to_lowercase()).or_insert_with(|| path.clone());
            }
        }

        let mut links_out: BTreeMap<PathBuf, BTreeSet<PathBuf>> = BTreeMap::new();
        let mut links_in: BTreeMap<PathBuf, BTreeSet<PathBuf>> = BTreeMap::new();

        for (path, note) in &notes {
            let mut targets = BTreeSet::new();
            for capture in WIKILINK_RE.captures_iter(&note.content) {
                let target = capture[1].trim();
                // Links may carry a folder prefix; resolution is by stem
                let stem = target.rsplit('/').next().unwrap_or(target).to_lowercase();
                if let Some(resolved) = stems.get(&stem) {
                    if resolved != path {
                        targets.insert(resolved.clone());
                    }
                }
            }
            for target in &targets {
                links_in.entry(target.clone()).or_default().insert(path.clone());
            }
            links_out.insert(path.clone(), targets);
        }

        info!("Opened vault '{}' with {} notes", name, notes.len());

        Ok(Self {
            root,
            name,
            notes,
            links_out,
            links_in,
        })
    }

    /// Vault name (root directory name), used for deep links
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vault root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of notes in the vault
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Outgoing wikilink targets of a note
    pub fn outgoing_links(&self, path: &Path) -> BTreeSet<PathBuf> {
        self.links_out.get(path).cloned().unwrap_or_default()
    }

    /// Notes that link to this note
    pub fn backlinks(&self, path: &Path) -> BTreeSet<PathBuf> {
        self.links_in.get(path).cloned().unwrap_or_default()
    }

    /// Minimum hop distance from any anchor to each reachable note
    ///
    /// Multi-source BFS over the link graph, bounded at `depth` hops.
    /// Anchors appear in the result at distance 0; anchors not present in
    /// the vault are skipped.
    pub fn hop_distances(
        &self,
        anchors: &[PathBuf],
        depth: usize,
        include_backlinks: bool,
    ) -> BTreeMap<PathBuf, usize> {
        let mut distances: BTreeMap<PathBuf, usize> = BTreeMap::new();
        let mut queue: VecDeque<(PathBuf, usize)> = VecDeque::new();

        for anchor in anchors {
            if self.notes.contains_key(anchor) && !distances.contains_key(anchor) {
                distances.insert(anchor.clone(), 0);
                queue.push_back((anchor.clone(), 0));
            }
        }

        while let Some((path, dist)) = queue.pop_front() {
            if dist == depth {
                continue;
            }
            for neighbor in self.neighbors(&path, include_backlinks) {
                if !distances.contains_key(neighbor) {
                    distances.insert(neighbor.clone(), dist + 1);
                    queue.push_back((neighbor.clone(), dist + 1));
                }
            }
        }

        distances
    }

    fn neighbors(&self, path: &Path, include_backlinks: bool) -> Vec<&PathBuf> {
        let mut neighbors: Vec<&PathBuf> = self
            .links_out
            .get(path)
            .into_iter()
            .flatten()
            .collect();
        if include_backlinks {
            neighbors.extend(self.links_in.get(path).into_iter().flatten());
        }
        neighbors
    }
}

impl NoteStore for FsVault {
    fn load(&self, path: &Path) -> Result<Note> {
        self.notes
            .get(path)
            .cloned()
            .ok_or_else(|| PrepError::NoteNotFound(path.to_path_buf()))
    }

    fn list_all(&self) -> Result<Vec<Note>> {
        Ok(self.notes.values().cloned().collect())
    }

    fn traverse(
        &self,
        anchor: &Path,
        depth: usize,
        include_backlinks: bool,
    ) -> Result<BTreeSet<PathBuf>> {
        if !self.notes.contains_key(anchor) {
            return Err(PrepError::NoteNotFound(anchor.to_path_buf()));
        }

        let anchors = [anchor.to_path_buf()];
        let connected = self
            .hop_distances(&anchors, depth, include_backlinks)
            .into_iter()
            .filter(|(_, dist)| *dist > 0)
            .map(|(path, _)| path)
            .collect();

        debug!("Traversed {} hops from {}", depth, anchor.display());
        Ok(connected)
    }

    fn modified_at(&self, path: &Path) -> Result<DateTime<Utc>> {
        if !self.notes.contains_key(path) {
            return Err(PrepError::NoteNotFound(path.to_path_buf()));
        }
        let metadata = fs::metadata(self.root.join(path))?;
        Ok(metadata.modified()?.into())
    }
}

impl SearchIndex for FsVault {
    fn search_by_title(&self, term: &str) -> Result<Vec<Note>> {
        let needle = term.to_lowercase();
        Ok(self
            .notes
            .values()
            .filter(|note| note.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn search_content(&self, term: &str) -> Result<Vec<Note>> {
        let needle = term.to_lowercase();
        Ok(self
            .notes
            .values()
            .filter(|note| note.content.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn search_by_tag(&self, term: &str) -> Result<Vec<Note>> {
        Ok(self
            .notes
            .values()
            .filter(|note| {
                extract_all_tags(note)
                    .iter()
                    .any(|tag| tag.eq_ignore_ascii_case(term))
            })
            .cloned()
            .collect())
    }
}

/// Load a single note file: split frontmatter, stat, derive title from stem
fn load_note_file(root: &Path, rel: &Path) -> Result<Note> {
    let abs = root.join(rel);
    let raw = fs::read_to_string(&abs)?;
    let (frontmatter, content) = split_frontmatter(&raw)?;

    let title = rel
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    let modified_at: DateTime<Utc> = fs::metadata(&abs)?.modified()?.into();

    Ok(Note {
        path: rel.to_path_buf(),
        title,
        content,
        frontmatter,
        modified_at,
    })
}

/// Split a leading YAML frontmatter block from the markdown body
///
/// A block is delimited by a `---` line at the start of the file and a
/// closing `---` (or `...`) line. Files without a complete block are all
/// body.
fn split_frontmatter(raw: &str) -> Result<(BTreeMap<String, serde_yaml::Value>, String)> {
    let rest = match raw.strip_prefix("---") {
        Some(rest) => match rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) {
            Some(rest) => rest,
            None => return Ok((BTreeMap::new(), raw.to_string())),
        },
        None => return Ok((BTreeMap::new(), raw.to_string())),
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let fence = line.trim_end();
        if fence == "---" || fence == "..." {
            let yaml = &rest[..offset];
            let body = rest[offset + line.len()..].to_string();
            let frontmatter = if yaml.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_yaml::from_str(yaml)?
            };
            return Ok((frontmatter, body));
        }
        offset += line.len();
    }

    // Unterminated fence: treat the whole file as body
    Ok((BTreeMap::new(), raw.to_string()))
}

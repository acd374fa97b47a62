//! Core data types for the vaultprep brief compiler
//!
//! This module defines the fundamental data structures used throughout
//! vaultprep: vault notes, ranking candidates, relevance tiers, and search
//! matches. Notes are identified by their vault-relative path; everything
//! derived from a note is an immutable snapshot taken at query time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// A markdown note loaded from the vault
///
/// The vault-relative path is the note's identity. The frontmatter mapping
/// holds whatever YAML the note declared; consumers pick out the keys they
/// care about (`tags`, `type`, `category`, `summary`).
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Vault-relative path (identity)
    pub path: PathBuf,

    /// Note title (file stem)
    pub title: String,

    /// Markdown body with frontmatter stripped
    pub content: String,

    /// Parsed YAML frontmatter
    pub frontmatter: BTreeMap<String, serde_yaml::Value>,

    /// Last-modified timestamp read from storage at load time
    ///
    /// Candidate materialization re-stats the file instead of trusting this
    /// value, so candidates reflect on-disk state at query time.
    pub modified_at: DateTime<Utc>,
}

/// A note surfaced to the ranking stage, with derived metadata
///
/// Constructed once per `find_relevant_notes` call and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateNote {
    /// Note title
    pub title: String,

    /// Vault-relative path
    pub path: PathBuf,

    /// Frontmatter tags plus inline `#tags` (unique, order irrelevant)
    pub tags: BTreeSet<String>,

    /// Frontmatter `type` field, falling back to `category`
    pub category: Option<String>,

    /// Frontmatter `summary`, or a truncated content excerpt
    pub snippet: String,

    /// Modification timestamp from a fresh filesystem stat
    pub modified_at: DateTime<Utc>,
}

/// Relevance tier assigned to a candidate by the ranking service
///
/// Recomputed per query, never persisted. `NotRelevant` candidates are
/// dropped before the brief generator sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relevance {
    VeryRelevant,
    PotentiallyRelevant,
    NotRelevant,
}

impl Relevance {
    /// Canonical tier keywords, in prompt/parse order
    ///
    /// This is the classification vocabulary sent to the completion
    /// capability and matched in its response, kept as an explicit constant
    /// rather than embedded literals.
    pub const KEYWORDS: [&'static str; 3] =
        ["VERY_RELEVANT", "POTENTIALLY_RELEVANT", "NOT_RELEVANT"];

    /// The canonical keyword spelling for this tier
    pub fn as_keyword(&self) -> &'static str {
        match self {
            Relevance::VeryRelevant => "VERY_RELEVANT",
            Relevance::PotentiallyRelevant => "POTENTIALLY_RELEVANT",
            Relevance::NotRelevant => "NOT_RELEVANT",
        }
    }

    /// Parse a canonical tier keyword
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "VERY_RELEVANT" => Some(Relevance::VeryRelevant),
            "POTENTIALLY_RELEVANT" => Some(Relevance::PotentiallyRelevant),
            "NOT_RELEVANT" => Some(Relevance::NotRelevant),
            _ => None,
        }
    }
}

impl std::fmt::Display for Relevance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_keyword())
    }
}

/// Which index produced a search hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Title,
    Content,
    Tag,
    Link,
    List,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MatchKind::Title => "title",
            MatchKind::Content => "content",
            MatchKind::Tag => "tag",
            MatchKind::Link => "link",
            MatchKind::List => "list",
        };
        write!(f, "{}", s)
    }
}

/// A search or traversal hit with note metadata, serializable for CLI output
#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch {
    /// Vault-relative path
    pub path: PathBuf,

    /// Note title
    pub title: String,

    /// All tags on the note
    pub tags: BTreeSet<String>,

    /// Last-modified timestamp
    pub modified_at: DateTime<Utc>,

    /// Which index matched
    pub match_kind: MatchKind,

    /// Hop distance from the anchor (traversal hits only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<usize>,
}

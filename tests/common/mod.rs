//! Common test utilities and helpers
#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use vaultprep::error::{PrepError, Result};
use vaultprep::Completion;

/// Write a note file under the vault root, creating parent directories
pub fn write_note(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Build a small vault with people, meetings, projects, and link chains
///
/// Link structure:
///   Meeting with Sarah -> Sarah -> Project Atlas -> Roadmap
/// plus an unrelated, unlinked note.
pub fn sample_vault() -> TempDir {
    let dir = TempDir::new().unwrap();

    write_note(
        dir.path(),
        "people/Sarah.md",
        "---\ntags:\n  - person\n---\nEngineering manager on [[Project Atlas]].\n",
    );
    write_note(
        dir.path(),
        "meetings/Meeting with Sarah 2024-10-20.md",
        "---\ntype: meeting\nsummary: Discussed Q4 roadmap and priorities\ntags:\n  - meeting\n---\nNotes from the sync with [[Sarah]].\n",
    );
    write_note(
        dir.path(),
        "projects/Project Atlas.md",
        "---\ntype: project\n---\nPlatform migration. #atlas\n\nNext steps live in [[Roadmap]].\n",
    );
    write_note(
        dir.path(),
        "projects/Roadmap.md",
        "---\ncategory: reference\n---\nQ4 priorities:\n- ship the migration\n- close the audit findings\n",
    );
    write_note(
        dir.path(),
        "inbox/Cooking Recipes.md",
        "Pasta, curry, bread. Nothing to do with work.\n",
    );

    dir
}

/// Completion stub that distinguishes categorization from summary prompts
pub struct ScriptedCompletion {
    pub categorization: String,
    pub summary: String,
}

impl Completion for ScriptedCompletion {
    fn complete(&self, prompt: &str) -> Result<String> {
        if prompt.starts_with("You are helping prep for:") {
            Ok(self.categorization.clone())
        } else {
            Ok(self.summary.clone())
        }
    }
}

/// Completion stub that always fails
pub struct FailingCompletion;

impl Completion for FailingCompletion {
    fn complete(&self, _prompt: &str) -> Result<String> {
        Err(PrepError::Completion("API error".to_string()))
    }
}

//! End-to-end tests for the brief compilation pipeline
//!
//! Runs the full relevance -> ranking -> brief flow over an on-disk vault
//! with stubbed completions.

use std::sync::Arc;
use vaultprep::{BriefCompiler, Completion, FsVault, PrepConfig};

mod common;
use common::{sample_vault, FailingCompletion, ScriptedCompletion};

fn compile(dir: &std::path::Path, completion: Arc<dyn Completion>, query: &str) -> String {
    let vault = Arc::new(FsVault::open(dir).unwrap());
    let config = PrepConfig::default();
    let compiler = BriefCompiler::new(vault, "TestVault", &config, completion);
    compiler.compile_brief(query).unwrap()
}

/// Verdict lines for more candidates than any query here produces; indices
/// past the candidate count are ignored by the parser
fn verdicts_for_all(tier: &str) -> String {
    (1..=20)
        .map(|i| format!("{}. {}", i, tier))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_compile_brief_end_to_end() {
    let dir = sample_vault();
    let completion = Arc::new(ScriptedCompletion {
        categorization: verdicts_for_all("VERY_RELEVANT"),
        summary: "You have a recent meeting with Sarah.".to_string(),
    });

    let brief = compile(dir.path(), completion, "meeting with Sarah");

    assert!(brief.contains("# Prep for meeting with Sarah"));
    assert!(brief.contains("## Summary"));
    assert!(brief.contains("You have a recent meeting with Sarah."));
    assert!(brief.contains("## Very Relevant"));
    assert!(brief.contains("Sarah"));
    assert!(brief.contains("obsidian://open?vault=TestVault"));
}

#[test]
fn test_compile_brief_no_results() {
    let dir = sample_vault();
    let completion = Arc::new(ScriptedCompletion {
        categorization: verdicts_for_all("VERY_RELEVANT"),
        summary: "unused".to_string(),
    });

    let brief = compile(dir.path(), completion, "nonexistent topic xyz123");

    assert!(brief.contains("No notes found related to 'nonexistent topic xyz123'"));
    assert!(!brief.contains("## Very Relevant"));
    assert!(!brief.contains("## Summary"));
}

#[test]
fn test_compile_brief_degrades_on_completion_failure() {
    let dir = sample_vault();
    let brief = compile(dir.path(), Arc::new(FailingCompletion), "meeting with Sarah");

    // Ranking falls back to an unranked potentially-relevant listing, and
    // the summary section is skipped
    assert!(!brief.contains("## Very Relevant"));
    assert!(!brief.contains("## Summary"));
    assert!(brief.contains("## Potentially Relevant"));
    assert!(brief.contains("Sarah"));
}

#[test]
fn test_compile_brief_drops_all_not_relevant() {
    let dir = sample_vault();
    let completion = Arc::new(ScriptedCompletion {
        categorization: verdicts_for_all("NOT_RELEVANT"),
        summary: "unused".to_string(),
    });

    let brief = compile(dir.path(), completion, "meeting with Sarah");

    // Everything was categorized away; the brief reports no notes
    assert!(brief.contains("No notes found related to"));
    assert!(!brief.contains("## Potentially Relevant"));
}

#[test]
fn test_compile_brief_partitions_tiers() {
    let dir = sample_vault();
    let completion = Arc::new(ScriptedCompletion {
        // First candidate very relevant, the rest potentially relevant
        categorization: {
            let mut lines = vec!["1. VERY_RELEVANT - direct hit".to_string()];
            lines.extend((2..=20).map(|i| format!("{}. POTENTIALLY_RELEVANT", i)));
            lines.join("\n")
        },
        summary: "Mixed relevance.".to_string(),
    });

    let brief = compile(dir.path(), completion, "meeting with Sarah");

    assert!(brief.contains("## Very Relevant"));
    assert!(brief.contains("## Potentially Relevant"));
    let very_idx = brief.find("## Very Relevant").unwrap();
    let pot_idx = brief.find("## Potentially Relevant").unwrap();
    assert!(very_idx < pot_idx);
}

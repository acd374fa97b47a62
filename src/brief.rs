//! Markdown brief generation
//!
//! Renders the two surviving relevance tiers into a prep brief: an optional
//! completion-generated summary, one section per tier with per-note
//! metadata and `obsidian://` deep links, and a friendly message when
//! nothing matched. Summary generation failures never fail the brief; the
//! section is simply omitted.

use crate::services::Completion;
use crate::types::CandidateNote;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::sync::Arc;
use tracing::debug;

/// Renders prep briefs for a named vault
pub struct BriefGenerator {
    vault_name: String,
    completion: Arc<dyn Completion>,
}

impl BriefGenerator {
    pub fn new(vault_name: impl Into<String>, completion: Arc<dyn Completion>) -> Self {
        Self {
            vault_name: vault_name.into(),
            completion,
        }
    }

    /// Generate the complete markdown brief
    pub fn generate_brief(
        &self,
        very_relevant: &[CandidateNote],
        potentially_relevant: &[CandidateNote],
        query: &str,
    ) -> String {
        let mut brief = format!("# Prep for {}\n\n", query);

        if very_relevant.is_empty() && potentially_relevant.is_empty() {
            let _ = write!(
                brief,
                "No notes found related to '{}'. Try a different search term or check your vault.\n",
                query
            );
            return brief;
        }

        match self.generate_summary(very_relevant, potentially_relevant, query) {
            Ok(summary) => {
                let _ = write!(brief, "## Summary\n\n{}\n\n", summary.trim());
            }
            Err(e) => {
                debug!("Skipping brief summary: {}", e);
            }
        }

        if !very_relevant.is_empty() {
            brief.push_str("## Very Relevant\n\n");
            for note in very_relevant {
                brief.push_str(&self.format_note_entry(note));
            }
        }

        if !potentially_relevant.is_empty() {
            brief.push_str("## Potentially Relevant\n\n");
            for note in potentially_relevant {
                brief.push_str(&self.format_note_entry(note));
            }
        }

        brief
    }

    /// Ask the completion capability for a 2-3 sentence overview
    fn generate_summary(
        &self,
        very_relevant: &[CandidateNote],
        potentially_relevant: &[CandidateNote],
        query: &str,
    ) -> crate::error::Result<String> {
        let mut prompt = format!("You are preparing a brief for: {}\n\nVery relevant notes:\n", query);
        for note in very_relevant {
            let _ = writeln!(prompt, "- {}", note.title);
        }
        prompt.push_str("\nPotentially relevant notes:\n");
        for note in potentially_relevant {
            let _ = writeln!(prompt, "- {}", note.title);
        }
        prompt.push_str(
            "\nIn 2-3 sentences, summarize the key context to review before this. \
             Respond with the summary only.",
        );

        self.completion.complete(&prompt)
    }

    /// Format a single note as a markdown entry
    fn format_note_entry(&self, note: &CandidateNote) -> String {
        let tags = if note.tags.is_empty() {
            "none".to_string()
        } else {
            note.tags.iter().cloned().collect::<Vec<_>>().join(", ")
        };

        let obsidian_url = format!(
            "obsidian://open?vault={}&file={}",
            urlencoding::encode(&self.vault_name),
            urlencoding::encode(&note.path.to_string_lossy()),
        );

        format!(
            "### {}\n\n*Tags: {} | Modified: {}*\n\n{}\n\n[Open in Obsidian]({})\n\n",
            note.title,
            tags,
            format_relative_time(note.modified_at, Utc::now()),
            note.snippet,
            obsidian_url,
        )
    }
}

/// Format a timestamp relative to `now` ("today", "2 days ago", ...)
pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - then).num_days();

    if days <= 0 {
        "today".to_string()
    } else if days == 1 {
        "yesterday".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else if days < 30 {
        let weeks = days / 7;
        format!("{} week{} ago", weeks, if weeks > 1 { "s" } else { "" })
    } else if days < 365 {
        let months = days / 30;
        format!("{} month{} ago", months, if months > 1 { "s" } else { "" })
    } else {
        let years = days / 365;
        format!("{} year{} ago", years, if years > 1 { "s" } else { "" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PrepError, Result};
    use chrono::TimeZone;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    struct CannedCompletion(String);

    impl Completion for CannedCompletion {
        fn complete(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingCompletion;

    impl Completion for FailingCompletion {
        fn complete(&self, _prompt: &str) -> Result<String> {
            Err(PrepError::Completion("unavailable".to_string()))
        }
    }

    fn candidate() -> CandidateNote {
        CandidateNote {
            title: "Meeting with Sarah".to_string(),
            path: PathBuf::from("people/sarah-meeting.md"),
            tags: BTreeSet::from(["meeting".to_string(), "sarah".to_string()]),
            category: Some("meeting".to_string()),
            snippet: "Discussed Q4 roadmap and priorities".to_string(),
            modified_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_note_entry() {
        let generator =
            BriefGenerator::new("TestVault", Arc::new(CannedCompletion(String::new())));
        let entry = generator.format_note_entry(&candidate());

        assert!(entry.contains("### Meeting with Sarah"));
        assert!(entry.contains("meeting, sarah"));
        assert!(entry.contains("Discussed Q4 roadmap"));
        assert!(entry.contains("obsidian://open?vault=TestVault"));
        assert!(entry.contains("people%2Fsarah-meeting.md"));
    }

    #[test]
    fn test_generate_brief_with_summary() {
        let generator = BriefGenerator::new(
            "TestVault",
            Arc::new(CannedCompletion(
                "One recent meeting and background info.".to_string(),
            )),
        );

        let brief = generator.generate_brief(&[candidate()], &[], "meeting prep");

        assert!(brief.contains("# Prep for meeting prep"));
        assert!(brief.contains("## Summary"));
        assert!(brief.contains("One recent meeting and background info."));
        assert!(brief.contains("## Very Relevant"));
        assert!(!brief.contains("## Potentially Relevant"));
    }

    #[test]
    fn test_generate_brief_skips_summary_on_failure() {
        let generator = BriefGenerator::new("TestVault", Arc::new(FailingCompletion));

        let brief = generator.generate_brief(&[], &[candidate()], "meeting prep");

        assert!(!brief.contains("## Summary"));
        assert!(brief.contains("## Potentially Relevant"));
        assert!(brief.contains("Meeting with Sarah"));
    }

    #[test]
    fn test_generate_brief_empty_tiers() {
        let generator = BriefGenerator::new("TestVault", Arc::new(FailingCompletion));

        let brief = generator.generate_brief(&[], &[], "nonexistent topic xyz123");

        assert!(brief.contains("No notes found related to 'nonexistent topic xyz123'"));
        assert!(!brief.contains("## Very Relevant"));
    }

    #[test]
    fn test_format_relative_time() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let at = |y, m, d| Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap();

        assert_eq!(format_relative_time(at(2024, 6, 15), now), "today");
        assert_eq!(format_relative_time(at(2024, 6, 14), now), "yesterday");
        assert_eq!(format_relative_time(at(2024, 6, 12), now), "3 days ago");
        assert_eq!(format_relative_time(at(2024, 6, 1), now), "2 weeks ago");
        assert_eq!(format_relative_time(at(2024, 3, 15), now), "3 months ago");
        assert_eq!(format_relative_time(at(2022, 6, 15), now), "2 years ago");
    }
}

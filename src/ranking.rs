//! Ranking service: categorization of candidates into relevance tiers
//!
//! Builds a categorization prompt over the candidate set, makes a single
//! completion call (no retry), and parses the categorical response with a
//! strict per-line parser. Parsing is decoupled from fallback policy: any
//! failure between prompt and partition degrades to an unranked
//! "potentially relevant" listing instead of failing the request.

use crate::error::Result;
use crate::services::Completion;
use crate::types::{CandidateNote, Relevance};
use crate::utils::text::truncate_chars;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use tracing::{debug, warn};

/// Maximum snippet characters shown per candidate in the prompt
const PROMPT_SNIPPET_CHARS: usize = 100;

/// `<number>. <TIER_KEYWORD>`, keywords taken from the tier vocabulary
static VERDICT_RE: Lazy<Regex> = Lazy::new(|| {
    let tiers = Relevance::KEYWORDS.join("|");
    Regex::new(&format!(r"(\d+)\.\s*({tiers})")).expect("valid verdict pattern")
});

/// Outcome of parsing one response line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineVerdict {
    /// A numbered tier verdict (1-based candidate index)
    Verdict { index: usize, tier: Relevance },
    /// Line carries no verdict
    Unrecognized,
}

/// Partitions candidates into relevance tiers via the completion capability
pub struct RankingService {
    completion: Arc<dyn Completion>,
}

impl RankingService {
    pub fn new(completion: Arc<dyn Completion>) -> Self {
        Self { completion }
    }

    /// Categorize candidates into (very relevant, potentially relevant)
    ///
    /// NOT_RELEVANT candidates are dropped. Within each tier the result is
    /// sorted by modification time descending, ties keeping original
    /// candidate order. On any failure all candidates come back as
    /// potentially relevant, sorted the same way; this call never fails.
    pub fn categorize_notes(
        &self,
        candidates: &[CandidateNote],
        query: &str,
    ) -> (Vec<CandidateNote>, Vec<CandidateNote>) {
        if candidates.is_empty() {
            return (Vec::new(), Vec::new());
        }

        match self.rank(candidates, query) {
            Ok(tiers) => tiers,
            Err(e) => {
                warn!("Categorization failed, listing all candidates as potentially relevant: {}", e);
                let mut all = candidates.to_vec();
                sort_by_modified_desc(&mut all);
                (Vec::new(), all)
            }
        }
    }

    fn rank(
        &self,
        candidates: &[CandidateNote],
        query: &str,
    ) -> Result<(Vec<CandidateNote>, Vec<CandidateNote>)> {
        debug!("Categorizing {} candidates", candidates.len());

        let prompt = build_prompt(candidates, query);
        let response = self.completion.complete(&prompt)?;
        let verdicts = parse_response(&response, candidates.len());

        let mut very_relevant = Vec::new();
        let mut potentially_relevant = Vec::new();

        for (i, candidate) in candidates.iter().enumerate() {
            match verdicts.get(&i).copied().unwrap_or(Relevance::NotRelevant) {
                Relevance::VeryRelevant => very_relevant.push(candidate.clone()),
                Relevance::PotentiallyRelevant => potentially_relevant.push(candidate.clone()),
                Relevance::NotRelevant => {}
            }
        }

        sort_by_modified_desc(&mut very_relevant);
        sort_by_modified_desc(&mut potentially_relevant);

        debug!(
            "Categorized: {} very relevant, {} potentially relevant",
            very_relevant.len(),
            potentially_relevant.len()
        );
        Ok((very_relevant, potentially_relevant))
    }
}

/// Build the categorization prompt: query, tier definitions, numbered notes
fn build_prompt(candidates: &[CandidateNote], query: &str) -> String {
    let mut prompt = format!(
        "You are helping prep for: {}\n\n\
         Categorize each note as:\n\
         - {}: Recent interactions, open action items, critical context\n\
         - {}: Related background, past decisions, context that might matter\n\
         - {}: Weak/tangential connection\n\n\
         Notes to categorize:\n",
        query,
        Relevance::VeryRelevant.as_keyword(),
        Relevance::PotentiallyRelevant.as_keyword(),
        Relevance::NotRelevant.as_keyword(),
    );

    for (i, candidate) in candidates.iter().enumerate() {
        let tags = if candidate.tags.is_empty() {
            "none".to_string()
        } else {
            candidate
                .tags
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };

        let _ = write!(
            prompt,
            "\n{}. Title: \"{}\"\n   Tags: {}\n   Snippet: {}\n",
            i + 1,
            candidate.title,
            tags,
            truncate_chars(&candidate.snippet, PROMPT_SNIPPET_CHARS),
        );
    }

    prompt.push_str(
        "\nFor each note, respond with the number and categorization \
         (e.g., '1. VERY_RELEVANT - reason').",
    );

    prompt
}

/// Parse one line into a verdict, or `Unrecognized` if none is present
fn parse_verdict_line(line: &str) -> LineVerdict {
    let Some(caps) = VERDICT_RE.captures(line) else {
        return LineVerdict::Unrecognized;
    };

    let Ok(index) = caps[1].parse::<usize>() else {
        return LineVerdict::Unrecognized;
    };

    match Relevance::from_keyword(&caps[2]) {
        Some(tier) => LineVerdict::Verdict { index, tier },
        None => LineVerdict::Unrecognized,
    }
}

/// Collect all verdicts in a response, keyed by 0-based candidate index
///
/// Indices outside `[1, candidate_count]` are ignored; a later verdict for
/// the same candidate overrides an earlier one.
fn parse_response(response: &str, candidate_count: usize) -> HashMap<usize, Relevance> {
    let mut verdicts = HashMap::new();

    for line in response.lines() {
        if let LineVerdict::Verdict { index, tier } = parse_verdict_line(line) {
            if (1..=candidate_count).contains(&index) {
                verdicts.insert(index - 1, tier);
            } else {
                debug!("Ignoring verdict for out-of-range candidate {}", index);
            }
        }
    }

    verdicts
}

/// Newest first; stable, so equal timestamps keep candidate order
fn sort_by_modified_desc(notes: &mut [CandidateNote]) {
    notes.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrepError;
    use chrono::{TimeZone, Utc};
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
            Err(PrepError::Completion("API error".to_string()))
        }
    }

    fn candidate(title: &str, year: i32) -> CandidateNote {
        CandidateNote {
            title: title.to_string(),
            path: PathBuf::from(format!("{}.md", title)),
            tags: BTreeSet::new(),
            category: None,
            snippet: format!("{} snippet", title),
            modified_at: Utc.with_ymd_and_hms(year, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_parse_verdict_line() {
        assert_eq!(
            parse_verdict_line("1. VERY_RELEVANT - recent meeting"),
            LineVerdict::Verdict {
                index: 1,
                tier: Relevance::VeryRelevant
            }
        );
        assert_eq!(
            parse_verdict_line("   12. NOT_RELEVANT"),
            LineVerdict::Verdict {
                index: 12,
                tier: Relevance::NotRelevant
            }
        );
        assert_eq!(parse_verdict_line("no verdict here"), LineVerdict::Unrecognized);
        assert_eq!(parse_verdict_line("3. KIND_OF_RELEVANT"), LineVerdict::Unrecognized);
    }

    #[test]
    fn test_parse_verdict_line_huge_index() {
        assert_eq!(
            parse_verdict_line("99999999999999999999999999. VERY_RELEVANT"),
            LineVerdict::Unrecognized
        );
    }

    #[test]
    fn test_parse_response_ignores_out_of_range() {
        let response = "1. VERY_RELEVANT - ok\n7. NOT_RELEVANT - no such note\n0. VERY_RELEVANT";
        let verdicts = parse_response(response, 2);
        assert_eq!(verdicts.len(), 1);
        assert_eq!(verdicts.get(&0), Some(&Relevance::VeryRelevant));
    }

    #[test]
    fn test_parse_response_later_verdict_wins() {
        let response = "1. VERY_RELEVANT\n1. NOT_RELEVANT - on second thought";
        let verdicts = parse_response(response, 1);
        assert_eq!(verdicts.get(&0), Some(&Relevance::NotRelevant));
    }

    #[test]
    fn test_build_prompt_lists_candidates() {
        let mut tagged = candidate("Roadmap", 2024);
        tagged.tags = BTreeSet::from(["planning".to_string(), "atlas".to_string()]);
        let candidates = vec![tagged, candidate("Scratch", 2023)];

        let prompt = build_prompt(&candidates, "meeting with Sarah");

        assert!(prompt.contains("You are helping prep for: meeting with Sarah"));
        assert!(prompt.contains("1. Title: \"Roadmap\""));
        assert!(prompt.contains("Tags: atlas, planning"));
        assert!(prompt.contains("2. Title: \"Scratch\""));
        assert!(prompt.contains("Tags: none"));
    }

    #[test]
    fn test_build_prompt_truncates_snippet() {
        let mut long = candidate("Long", 2024);
        long.snippet = "x".repeat(500);
        let prompt = build_prompt(&[long], "query");
        assert!(!prompt.contains(&"x".repeat(PROMPT_SNIPPET_CHARS + 1)));
        assert!(prompt.contains(&"x".repeat(PROMPT_SNIPPET_CHARS)));
    }

    #[test]
    fn test_categorize_empty_input() {
        let service = RankingService::new(Arc::new(FailingCompletion));
        let (very, potential) = service.categorize_notes(&[], "query");
        assert!(very.is_empty());
        assert!(potential.is_empty());
    }

    #[test]
    fn test_categorize_partitions_and_drops() {
        let service = RankingService::new(Arc::new(CannedCompletion(
            "1. VERY_RELEVANT - x\n2. NOT_RELEVANT - y".to_string(),
        )));
        let candidates = vec![candidate("Recent", 2024), candidate("Old", 2020)];

        let (very, potential) = service.categorize_notes(&candidates, "query");

        assert_eq!(very.len(), 1);
        assert_eq!(very[0].title, "Recent");
        assert!(potential.is_empty());
    }

    #[test]
    fn test_categorize_unmatched_defaults_to_not_relevant() {
        let service = RankingService::new(Arc::new(CannedCompletion(
            "1. POTENTIALLY_RELEVANT".to_string(),
        )));
        let candidates = vec![candidate("Mentioned", 2024), candidate("Silent", 2023)];

        let (very, potential) = service.categorize_notes(&candidates, "query");

        assert!(very.is_empty());
        assert_eq!(potential.len(), 1);
        assert_eq!(potential[0].title, "Mentioned");
    }

    #[test]
    fn test_categorize_sorts_by_modified_desc() {
        let service = RankingService::new(Arc::new(CannedCompletion(
            "1. VERY_RELEVANT\n2. VERY_RELEVANT\n3. VERY_RELEVANT".to_string(),
        )));
        let candidates = vec![
            candidate("Jan", 2022),
            candidate("Newest", 2025),
            candidate("Mid", 2024),
        ];

        let (very, _) = service.categorize_notes(&candidates, "query");

        let titles: Vec<_> = very.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest", "Mid", "Jan"]);
    }

    #[test]
    fn test_categorize_fallback_on_completion_failure() {
        let service = RankingService::new(Arc::new(FailingCompletion));
        let candidates = vec![candidate("Old", 2020), candidate("New", 2024)];

        let (very, potential) = service.categorize_notes(&candidates, "query");

        assert!(very.is_empty());
        assert_eq!(potential.len(), 2);
        assert_eq!(potential[0].title, "New");
        assert_eq!(potential[1].title, "Old");
    }
}

//! Brief compilation pipeline
//!
//! Sequences the three stages: relevance engine, ranking service, brief
//! generator. Vault access failures propagate; categorization failures have
//! already been absorbed by the ranking fallback by the time they reach
//! this layer.

use crate::brief::BriefGenerator;
use crate::config::PrepConfig;
use crate::error::Result;
use crate::ranking::RankingService;
use crate::relevance::RelevanceEngine;
use crate::services::Completion;
use crate::vault::{NoteStore, SearchIndex};
use std::sync::Arc;
use tracing::info;

/// Compiles prep briefs for free-text queries
pub struct BriefCompiler<V> {
    engine: RelevanceEngine<V>,
    ranking: RankingService,
    generator: BriefGenerator,
    traversal_depth: usize,
}

impl<V: NoteStore + SearchIndex> BriefCompiler<V> {
    pub fn new(
        vault: Arc<V>,
        vault_name: impl Into<String>,
        config: &PrepConfig,
        completion: Arc<dyn Completion>,
    ) -> Self {
        Self {
            engine: RelevanceEngine::new(vault, config.max_candidates),
            ranking: RankingService::new(completion.clone()),
            generator: BriefGenerator::new(vault_name, completion),
            traversal_depth: config.traversal_depth,
        }
    }

    /// Compile a markdown prep brief for `query`
    pub fn compile_brief(&self, query: &str) -> Result<String> {
        info!("Compiling brief for '{}'", query);

        let candidates = self
            .engine
            .find_relevant_notes(query, self.traversal_depth)?;

        if candidates.is_empty() {
            return Ok(self.generator.generate_brief(&[], &[], query));
        }

        let (very_relevant, potentially_relevant) =
            self.ranking.categorize_notes(&candidates, query);

        Ok(self
            .generator
            .generate_brief(&very_relevant, &potentially_relevant, query))
    }
}

//! Vaultprep - Prep-Brief Compiler for Markdown Note Vaults
//!
//! Compiles a markdown "prep brief" for a free-text query (e.g. "meeting
//! with Sarah") from a personal note vault:
//! - Hybrid anchor search over titles, content, and tags
//! - Bounded bidirectional traversal of the wikilink graph
//! - LLM categorization of candidates into relevance tiers, with a
//!   graceful fallback when the completion call fails
//!
//! # Architecture
//!
//! The pipeline is organized into layers:
//! - **Types**: Core data structures (Note, CandidateNote, Relevance)
//! - **Vault**: Note store and search index over a markdown directory
//! - **Relevance**: Anchor discovery and graph expansion into candidates
//! - **Ranking**: Completion-driven tier partitioning
//! - **Brief**: Markdown rendering of the surviving tiers
//!
//! Everything runs single-threaded and synchronous: one query per
//! invocation, every external call blocking the caller until it returns.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use vaultprep::{AnthropicClient, BriefCompiler, FsVault, PrepConfig};
//!
//! fn main() -> vaultprep::Result<()> {
//!     let config = PrepConfig::load(None)?;
//!     let vault = Arc::new(FsVault::open("~/notes")?);
//!     let completion = Arc::new(AnthropicClient::with_default()?);
//!
//!     let name = vault.name().to_string();
//!     let compiler = BriefCompiler::new(vault, name, &config, completion);
//!     println!("{}", compiler.compile_brief("meeting with Sarah")?);
//!     Ok(())
//! }
//! ```

pub mod brief;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod error;
pub mod ranking;
pub mod relevance;
pub mod services;
pub mod types;
pub mod utils;
pub mod vault;

// Re-export commonly used types
pub use brief::BriefGenerator;
pub use compiler::BriefCompiler;
pub use config::PrepConfig;
pub use error::{PrepError, Result};
pub use ranking::RankingService;
pub use relevance::RelevanceEngine;
pub use services::{AnthropicClient, Completion, CompletionConfig};
pub use types::{CandidateNote, MatchKind, Note, Relevance, SearchMatch};
pub use vault::{extract_all_tags, FsVault, NoteStore, SearchIndex};

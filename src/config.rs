//! Configuration for the vaultprep brief compiler
//!
//! Settings are layered: built-in defaults, then an optional `vaultprep.toml`
//! in the working directory, then `VAULTPREP_*` environment variables. CLI
//! flags override all of these at the call site.

use crate::error::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Words dropped from queries before per-word anchor search
///
/// Kept as an explicit constant so the engine can be exercised against the
/// exact vocabulary it filters.
pub const STOPWORDS: &[&str] = &["a", "an", "the", "with", "for", "on", "in", "at", "to", "of"];

/// Default cap on the candidate set returned by the relevance engine
pub const DEFAULT_MAX_CANDIDATES: usize = 100;

/// Default graph traversal depth in hops
pub const DEFAULT_TRAVERSAL_DEPTH: usize = 2;

/// Runtime settings for the brief compiler
#[derive(Debug, Clone, Deserialize)]
pub struct PrepConfig {
    /// Maximum number of candidate notes per query
    pub max_candidates: usize,

    /// Graph traversal depth in hops
    pub traversal_depth: usize,

    /// Completion model identifier
    pub model: String,

    /// Max tokens for completion responses
    pub max_tokens: usize,

    /// Sampling temperature for completions
    pub temperature: f32,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
            traversal_depth: DEFAULT_TRAVERSAL_DEPTH,
            model: "claude-3-5-haiku-20241022".to_string(),
            max_tokens: 1024,
            temperature: 0.7,
        }
    }
}

impl PrepConfig {
    /// Load settings from defaults, an optional config file, and environment
    ///
    /// `file` overrides the default `vaultprep.toml` lookup; in either case a
    /// missing file is not an error.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = PrepConfig::default();

        let mut builder = Config::builder()
            .set_default("max_candidates", defaults.max_candidates as i64)?
            .set_default("traversal_depth", defaults.traversal_depth as i64)?
            .set_default("model", defaults.model.clone())?
            .set_default("max_tokens", defaults.max_tokens as i64)?
            .set_default("temperature", defaults.temperature as f64)?;

        builder = match file {
            Some(path) => builder.add_source(File::from(path).required(false)),
            None => builder.add_source(File::with_name("vaultprep").required(false)),
        };

        let settings = builder
            .add_source(Environment::with_prefix("VAULTPREP"))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}

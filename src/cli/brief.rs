//! `vaultprep brief` — compile a prep brief for a query

use crate::compiler::BriefCompiler;
use crate::config::PrepConfig;
use crate::error::Result;
use crate::services::{AnthropicClient, CompletionConfig};
use crate::vault::FsVault;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub fn run(
    vault_dir: &Path,
    vault_name: Option<String>,
    query: &str,
    config: &PrepConfig,
    output: Option<&Path>,
) -> Result<()> {
    let vault = Arc::new(FsVault::open(vault_dir)?);
    let name = vault_name.unwrap_or_else(|| vault.name().to_string());

    let completion = Arc::new(AnthropicClient::new(CompletionConfig {
        model: config.model.clone(),
        max_tokens: config.max_tokens,
        temperature: config.temperature,
        ..CompletionConfig::default()
    })?);

    let compiler = BriefCompiler::new(vault, name, config, completion);
    let brief = compiler.compile_brief(query)?;

    match output {
        Some(path) => {
            fs::write(path, &brief)?;
            info!("Brief written to {}", path.display());
        }
        None => println!("{}", brief),
    }

    Ok(())
}

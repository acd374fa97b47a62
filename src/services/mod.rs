//! External service integrations
//!
//! Currently a single service: the text-completion capability used for
//! candidate categorization and brief summaries.

pub mod completion;

pub use completion::{AnthropicClient, Completion, CompletionConfig};
